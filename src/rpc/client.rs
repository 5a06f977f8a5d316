use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::errors::{ClientError, ClientResult};
use crate::rpc::CookieSource;

/// Mempool metadata for one transaction, as transmitted by the node
///
/// The fee arrives in display units (TPC); conversion to tapyrus and the
/// fee-rate derivation happen in the analysis layer.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMempoolEntry {
    /// Fee in TPC
    pub fee: f64,
    /// Virtual size in vbytes (transmitted as `size` by Tapyrus nodes)
    #[serde(alias = "size")]
    pub vsize: u64,
}

/// Blocking JSON-RPC client for a Tapyrus node
///
/// Credentials are resolved from the cookie source at construction, so an
/// unreadable cookie aborts before any request is sent. No retries; the
/// caller sees transport failures unmodified.
pub struct NodeRpcClient {
    http: Client,
    url: String,
    user: String,
    password: String,
}

impl NodeRpcClient {
    pub fn new(
        host: &str,
        port: u16,
        cookie: CookieSource,
        timeout: Duration,
    ) -> ClientResult<Self> {
        let (user, password) = cookie.credentials()?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Connection(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            url: format!("http://{}:{}", host, port),
            user,
            password,
        })
    }

    /// Issue a single method call
    pub fn call(&self, method: &str, params: Value) -> ClientResult<Value> {
        let envelope = json!({"method": method, "params": params, "id": 0});
        let reply = self.post(method, &envelope)?;
        extract_result(method, &reply)
    }

    /// Issue one call per parameter set as a SINGLE batched request
    ///
    /// The whole batch travels in one HTTP POST regardless of its size.
    /// Replies are matched back to requests by id, so the returned results
    /// are in submission order even if the server reordered them.
    pub fn batch_call(&self, method: &str, params_list: &[Value]) -> ClientResult<Vec<Value>> {
        if params_list.is_empty() {
            return Ok(Vec::new());
        }

        let envelopes: Vec<Value> = params_list
            .iter()
            .enumerate()
            .map(|(id, params)| json!({"method": method, "params": params, "id": id}))
            .collect();
        let reply = self.post(method, &Value::Array(envelopes))?;

        let replies = match reply {
            Value::Array(items) => items,
            other => {
                return Err(ClientError::protocol(
                    method,
                    format!("expected batch reply array, got {}", other),
                ))
            }
        };
        if replies.len() != params_list.len() {
            return Err(ClientError::protocol(
                method,
                format!(
                    "batch reply count {} does not match request count {}",
                    replies.len(),
                    params_list.len()
                ),
            ));
        }

        let mut results: Vec<Option<Value>> = vec![None; params_list.len()];
        for item in &replies {
            let id = item
                .get("id")
                .and_then(Value::as_u64)
                .ok_or_else(|| ClientError::protocol(method, "batch reply item missing id"))?
                as usize;
            if id >= results.len() {
                return Err(ClientError::protocol(
                    method,
                    format!("batch reply carries unknown id {}", id),
                ));
            }
            results[id] = Some(extract_result(method, item)?);
        }
        results
            .into_iter()
            .enumerate()
            .map(|(id, result)| {
                result.ok_or_else(|| {
                    ClientError::protocol(method, format!("no batch reply for id {}", id))
                })
            })
            .collect()
    }

    /// List the ids of all pending transactions
    pub fn raw_mempool(&self) -> ClientResult<Vec<String>> {
        let method = "getrawmempool";
        let result = self.call(method, json!([false]))?;
        serde_json::from_value(result)
            .map_err(|e| ClientError::protocol(method, format!("unexpected result shape: {}", e)))
    }

    /// Fetch mempool metadata for every id in one batched round trip
    ///
    /// The returned sequence pairs each id with its entry, in input order.
    pub fn mempool_entries(
        &self,
        txids: &[String],
    ) -> ClientResult<Vec<(String, RawMempoolEntry)>> {
        let method = "getmempoolentry";
        let params_list: Vec<Value> = txids.iter().map(|txid| json!([txid])).collect();
        let results = self.batch_call(method, &params_list)?;

        txids
            .iter()
            .zip(results)
            .map(|(txid, result)| {
                let entry: RawMempoolEntry = serde_json::from_value(result).map_err(|e| {
                    ClientError::protocol(
                        method,
                        format!("unexpected result shape for {}: {}", txid, e),
                    )
                })?;
                Ok((txid.clone(), entry))
            })
            .collect()
    }

    fn post(&self, method: &str, body: &Value) -> ClientResult<Value> {
        debug!("rpc request to {}: {}", self.url, body);
        let response = self
            .http
            .post(&self.url)
            .basic_auth(&self.user, Some(&self.password))
            .json(body)
            .send()
            .map_err(|e| ClientError::Connection(format!("request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::Authentication(format!(
                "node rejected RPC credentials ({})",
                status
            )));
        }

        let text = response
            .text()
            .map_err(|e| ClientError::Connection(format!("failed to read reply body: {}", e)))?;
        serde_json::from_str(&text).map_err(|e| {
            if status.is_success() {
                ClientError::protocol(method, format!("undecodable reply: {}", e))
            } else {
                ClientError::Connection(format!("server returned {}", status))
            }
        })
    }
}

/// Pull the `result` out of a reply envelope, surfacing server-side errors
fn extract_result(method: &str, envelope: &Value) -> ClientResult<Value> {
    if let Some(err) = envelope.get("error").filter(|e| !e.is_null()) {
        return Err(ClientError::protocol(method, err.to_string()));
    }
    envelope
        .get("result")
        .cloned()
        .ok_or_else(|| ClientError::protocol(method, "reply missing result field"))
}
