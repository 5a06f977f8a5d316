//! Electrum client wire-protocol tests

use anyhow::Result;
use serde_json::json;
use std::time::Duration;

use tapyrus_node_tools::electrum::ElectrumClient;
use tapyrus_node_tools::errors::ClientError;

use crate::common::spawn_electrum_stub;

const TIMEOUT: Duration = Duration::from_secs(5);

fn connect(addr: std::net::SocketAddr) -> Result<ElectrumClient> {
    Ok(ElectrumClient::connect(
        &addr.ip().to_string(),
        addr.port(),
        TIMEOUT,
    )?)
}

#[test]
fn test_sequential_calls_share_one_connection() -> Result<()> {
    let addr = spawn_electrum_stub(vec![
        json!({"result": {"confirmed": 1u64}}),
        json!({"result": {"confirmed": 2u64}}),
    ]);
    let mut client = connect(addr)?;

    let first = client.script_hash_get_balance("aa".repeat(32).as_str())?;
    let second = client.script_hash_get_balance("bb".repeat(32).as_str())?;
    assert_eq!(first.confirmed, 1);
    assert_eq!(second.confirmed, 2);
    Ok(())
}

#[test]
fn test_server_error_member_is_a_protocol_error() -> Result<()> {
    let addr = spawn_electrum_stub(vec![
        json!({"error": "unable to get balance", "result": null}),
    ]);
    let mut client = connect(addr)?;

    let err = client
        .call("blockchain.scripthash.get_balance", &[json!("00")])
        .unwrap_err();
    match err {
        ClientError::Protocol { method, message } => {
            assert_eq!(method, "blockchain.scripthash.get_balance");
            assert!(message.contains("unable to get balance"));
        }
        other => panic!("expected Protocol, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_reply_missing_result_is_a_protocol_error() -> Result<()> {
    let addr = spawn_electrum_stub(vec![json!({"unexpected": true})]);
    let mut client = connect(addr)?;

    let err = client.call("server.version", &[]).unwrap_err();
    assert!(matches!(err, ClientError::Protocol { .. }));
    Ok(())
}

#[test]
fn test_unexpected_result_shape_is_a_protocol_error() -> Result<()> {
    let addr = spawn_electrum_stub(vec![json!({"result": "not-an-object"})]);
    let mut client = connect(addr)?;

    let err = client.script_hash_get_balance("00").unwrap_err();
    assert!(matches!(err, ClientError::Protocol { .. }));
    Ok(())
}

#[test]
fn test_closed_connection_is_a_connection_error() -> Result<()> {
    // Stub accepts, then closes without answering anything
    let addr = spawn_electrum_stub(Vec::new());
    let mut client = connect(addr)?;

    let err = client.call("server.version", &[]).unwrap_err();
    assert!(matches!(err, ClientError::Connection(_)));
    Ok(())
}

#[test]
fn test_connect_to_unused_port_fails() {
    // Bind-then-drop guarantees nothing is listening on the port
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let err =
        ElectrumClient::connect(&addr.ip().to_string(), addr.port(), TIMEOUT).unwrap_err();
    assert!(matches!(err, ClientError::Connection(_)));
}
