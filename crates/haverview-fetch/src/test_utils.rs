//! Scripted transport for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Url;
use serde_json::{Value, json};

use crate::transport::{Response, Transport, TransportError};
use crate::{ClientConfig, Haver};

pub(crate) const TEST_BASE: &str = "http://haver.test";

/// Answers requests from a fixed route table and records every request.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    routes: Mutex<HashMap<String, Result<Response, String>>>,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Routes are keyed by path plus query, e.g. `/v4/docs`.
    pub(crate) fn route(&self, path: &str, status: u16, body: impl Into<String>) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Ok(Response::new(status, body)));
    }

    pub(crate) fn route_json(&self, path: &str, body: &Value) {
        self.route(path, 200, body.to_string());
    }

    pub(crate) fn fail(&self, path: &str, message: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Err(message.to_string()));
    }

    /// Paths of every request so far, health probes included.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Requests other than health probes.
    pub(crate) fn data_requests(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|p| p != "/v4/docs")
            .collect()
    }

    pub(crate) fn last_headers(&self) -> Vec<(String, String)> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|(_, h)| h.clone())
            .unwrap_or_default()
    }
}

fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(q) => format!("{}?{q}", url.path()),
        None => url.path().to_string(),
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(
        &self,
        url: &Url,
        headers: &[(String, String)],
    ) -> Result<Response, TransportError> {
        let key = path_and_query(url);
        self.requests
            .lock()
            .unwrap()
            .push((key.clone(), headers.to_vec()));
        match self.routes.lock().unwrap().get(&key) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(TransportError::Connection(message.clone())),
            None => Ok(Response::new(404, r#"{"error": "not found"}"#)),
        }
    }
}

/// A transport that answers the health probe with 200.
pub(crate) fn healthy_transport() -> Arc<ScriptedTransport> {
    let transport = ScriptedTransport::new();
    transport.route("/v4/docs", 200, "{}");
    transport
}

/// A connected client over the given transport.
pub(crate) async fn connected_client(transport: Arc<ScriptedTransport>) -> Haver {
    let config = ClientConfig::default()
        .with_base_url(TEST_BASE)
        .with_api_key("test-key");
    Haver::with_transport(config, transport).await.unwrap()
}

/// Series listing records named by `names`.
pub(crate) fn series_page(names: impl IntoIterator<Item = String>) -> Value {
    let data: Vec<Value> = names
        .into_iter()
        .map(|name| {
            json!({
                "name": name,
                "description": format!("Description of {name}"),
                "frequency": "M",
            })
        })
        .collect();
    json!({ "data": data })
}

/// Series names `S0000`, `S0001`, ... for the given index range.
pub(crate) fn names(range: std::ops::Range<usize>) -> impl Iterator<Item = String> {
    range.map(|i| format!("S{i:04}"))
}

/// A single-series record with `points` monthly observations.
pub(crate) fn series_record(name: &str, geography: &str, points: usize) -> Value {
    let data_points: Vec<Value> = (0..points)
        .map(|i| {
            json!({
                "date": format!("{}-{:02}-01", 2020 + i / 12, i % 12 + 1),
                "nSeriesData": i as f64 * 0.5,
            })
        })
        .collect();
    json!({
        "name": name,
        "geography": geography,
        "frequency": "M",
        "dataPoints": data_points,
    })
}
