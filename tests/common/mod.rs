//! Shared test infrastructure
//!
//! In-process stand-ins for the two remote services: an Electrum server
//! speaking newline-delimited JSON over TCP, and a node JSON-RPC endpoint
//! speaking HTTP. Both bind an ephemeral localhost port and serve canned
//! replies, so tests exercise the real clients end-to-end without a node.

use serde_json::Value;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;

/// Spawn a single-connection Electrum server stub
///
/// For each request line received it pops the next canned body (a
/// `{"result": ...}` or `{"error": ...}` object), injects the request's id
/// and the jsonrpc marker, and writes it back as one line. The connection
/// closes once the canned replies run out.
pub fn spawn_electrum_stub(replies: Vec<Value>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind electrum stub");
    let addr = listener.local_addr().expect("stub addr");
    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            serve_electrum_connection(stream, replies);
        }
    });
    addr
}

fn serve_electrum_connection(stream: TcpStream, replies: Vec<Value>) {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stub stream"));
    let mut writer = stream;
    for reply in replies {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
        let request: Value = serde_json::from_str(line.trim()).expect("stub request json");
        let mut response = reply;
        response["id"] = request["id"].clone();
        response["jsonrpc"] = Value::from("2.0");
        let mut out = response.to_string();
        out.push('\n');
        if writer.write_all(out.as_bytes()).is_err() {
            return;
        }
    }
}

/// Spawn a node JSON-RPC stub serving `connections` sequential connections
///
/// The handler maps each decoded request body (single envelope or batch
/// array) to the reply body.
pub fn spawn_rpc_stub<F>(connections: usize, handler: F) -> SocketAddr
where
    F: Fn(Value) -> Value + Send + 'static,
{
    spawn_rpc_stub_with_status(connections, "200 OK", handler)
}

/// Same as [`spawn_rpc_stub`], but with a fixed HTTP status line
///
/// Non-200 statuses answer with an empty body, as a node does for
/// rejected credentials.
pub fn spawn_rpc_stub_with_status<F>(
    connections: usize,
    status: &'static str,
    handler: F,
) -> SocketAddr
where
    F: Fn(Value) -> Value + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind rpc stub");
    let addr = listener.local_addr().expect("stub addr");
    thread::spawn(move || {
        for _ in 0..connections {
            match listener.accept() {
                Ok((stream, _)) => serve_http_connection(stream, status, &handler),
                Err(_) => break,
            }
        }
    });
    addr
}

fn serve_http_connection<F>(stream: TcpStream, status: &str, handler: &F)
where
    F: Fn(Value) -> Value,
{
    let mut reader = BufReader::new(stream.try_clone().expect("clone stub stream"));
    let mut writer = stream;

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            return;
        }
        let line = line.trim_end().to_ascii_lowercase();
        if line.is_empty() {
            break;
        }
        if let Some(value) = line.strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    if reader.read_exact(&mut body).is_err() {
        return;
    }

    let reply_body = if status.starts_with("200") {
        let request: Value = serde_json::from_slice(&body).expect("stub request json");
        handler(request).to_string()
    } else {
        String::new()
    };

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reply_body.len(),
        reply_body
    );
    let _ = writer.write_all(response.as_bytes());
}
