use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::{ClientError, ClientResult};

/// Balance reply for one script hash, in tapyrus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBalance {
    pub confirmed: u64,
    /// May be negative while mempool transactions spend from the script
    #[serde(default)]
    pub unconfirmed: i64,
}

impl GetBalance {
    /// Spendable total including pending transactions
    pub fn total(&self) -> i64 {
        self.confirmed as i64 + self.unconfirmed
    }
}

/// Blocking Electrum protocol client
///
/// Each call writes a single JSON request line and blocks until the
/// matching reply line (or a transport error) arrives. No retries; errors
/// propagate unmodified to the caller.
pub struct ElectrumClient {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
    next_id: u64,
}

impl ElectrumClient {
    /// Connect to an Electrum server with the given IO timeouts
    pub fn connect(host: &str, port: u16, timeout: Duration) -> ClientResult<Self> {
        let addr = (host, port)
            .to_socket_addrs()
            .map_err(|e| {
                ClientError::Connection(format!("failed to resolve {}:{}: {}", host, port, e))
            })?
            .next()
            .ok_or_else(|| {
                ClientError::Connection(format!("no address found for {}:{}", host, port))
            })?;

        let stream = TcpStream::connect_timeout(&addr, timeout)
            .map_err(|e| ClientError::Connection(format!("failed to connect to {}: {}", addr, e)))?;
        stream
            .set_read_timeout(Some(timeout))
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        stream
            .set_write_timeout(Some(timeout))
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        let reader = BufReader::new(
            stream
                .try_clone()
                .map_err(|e| ClientError::Connection(e.to_string()))?,
        );

        info!("Connected to Electrum server at {}", addr);

        Ok(Self {
            stream,
            reader,
            next_id: 0,
        })
    }

    /// Issue one method call and block until the reply arrives
    ///
    /// Returns the reply's `result` value. Replies carrying an `error`
    /// member or lacking `result` are protocol errors.
    pub fn call(&mut self, method: &str, params: &[Value]) -> ClientResult<Value> {
        let id = self.next_id;
        self.next_id += 1;

        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        let mut line = request.to_string();
        line.push('\n');
        debug!("electrum request: {}", line.trim_end());

        self.stream
            .write_all(line.as_bytes())
            .map_err(|e| ClientError::Connection(format!("failed to send request: {}", e)))?;

        let mut reply_line = String::new();
        let bytes = self
            .reader
            .read_line(&mut reply_line)
            .map_err(|e| ClientError::Connection(format!("failed to read reply: {}", e)))?;
        if bytes == 0 {
            return Err(ClientError::Connection(
                "server closed the connection".to_string(),
            ));
        }
        debug!("electrum reply: {}", reply_line.trim_end());

        let mut reply: Value = serde_json::from_str(reply_line.trim())
            .map_err(|e| ClientError::protocol(method, format!("undecodable reply: {}", e)))?;

        if let Some(err) = reply.get("error").filter(|e| !e.is_null()) {
            return Err(ClientError::protocol(method, err.to_string()));
        }
        match reply.get("id").and_then(Value::as_u64) {
            Some(reply_id) if reply_id == id => (),
            other => {
                return Err(ClientError::protocol(
                    method,
                    format!("reply id {:?} does not match request id {}", other, id),
                ))
            }
        }
        reply
            .get_mut("result")
            .map(Value::take)
            .ok_or_else(|| ClientError::protocol(method, "reply missing result field"))
    }

    /// Look up the balance for a script-hash key
    pub fn script_hash_get_balance(&mut self, script_hash: &str) -> ClientResult<GetBalance> {
        let method = "blockchain.scripthash.get_balance";
        let result = self.call(method, &[json!(script_hash)])?;
        serde_json::from_value(result)
            .map_err(|e| ClientError::protocol(method, format!("unexpected result shape: {}", e)))
    }
}
