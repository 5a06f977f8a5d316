//! Balance lookup pipeline tests
//!
//! Runs the per-address query loop against the Electrum stub, covering
//! the mocked-reply report line and the continue-and-report failure
//! policy.

use anyhow::Result;
use serde_json::json;
use std::time::Duration;

use tapyrus_node_tools::cli::commands::balance::query_balances;
use tapyrus_node_tools::config::NetworkKind;
use tapyrus_node_tools::electrum::ElectrumClient;
use tapyrus_node_tools::errors::AppError;

use crate::common::spawn_electrum_stub;

const TESTNET_ADDRESS: &str = "mipcBbFg9gMiCh81Kj8tqqdgoZub1ZJRfn";
const TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn test_report_line_for_mocked_balance_reply() -> Result<()> {
    let addr = spawn_electrum_stub(vec![json!({"result": {"confirmed": 150_000_000u64}})]);
    let mut client = ElectrumClient::connect(&addr.ip().to_string(), addr.port(), TIMEOUT)?;

    let mut out = Vec::new();
    let failed = query_balances(
        &mut client,
        NetworkKind::Dev.address_network(),
        &[TESTNET_ADDRESS.to_string()],
        &mut out,
    )?;

    assert_eq!(failed, 0);
    assert_eq!(
        String::from_utf8(out)?,
        format!("{} has 150000000 tapyrus\n", TESTNET_ADDRESS)
    );
    Ok(())
}

#[test]
fn test_unconfirmed_defaults_to_zero_in_reply() -> Result<()> {
    let addr = spawn_electrum_stub(vec![
        json!({"result": {"confirmed": 42u64, "unconfirmed": 8}}),
    ]);
    let mut client = ElectrumClient::connect(&addr.ip().to_string(), addr.port(), TIMEOUT)?;

    let mut out = Vec::new();
    query_balances(
        &mut client,
        NetworkKind::Dev.address_network(),
        &[TESTNET_ADDRESS.to_string()],
        &mut out,
    )?;

    assert!(String::from_utf8(out)?.contains("has 50 tapyrus"));
    Ok(())
}

#[test]
fn test_invalid_address_does_not_stop_the_batch() -> Result<()> {
    // The malformed address fails before any round trip, so the stub only
    // ever sees the one request for the valid address.
    let addr = spawn_electrum_stub(vec![json!({"result": {"confirmed": 7u64}})]);
    let mut client = ElectrumClient::connect(&addr.ip().to_string(), addr.port(), TIMEOUT)?;

    let addresses = vec!["definitely-not-an-address".to_string(), TESTNET_ADDRESS.to_string()];
    let mut out = Vec::new();
    let failed = query_balances(
        &mut client,
        NetworkKind::Dev.address_network(),
        &addresses,
        &mut out,
    )?;

    assert_eq!(failed, 1);
    let printed = String::from_utf8(out)?;
    assert_eq!(printed.lines().count(), 1);
    assert!(printed.contains(&format!("{} has 7 tapyrus", TESTNET_ADDRESS)));
    Ok(())
}

#[test]
fn test_wrong_network_address_is_reported_per_item() -> Result<()> {
    let addr = spawn_electrum_stub(Vec::new());
    let mut client = ElectrumClient::connect(&addr.ip().to_string(), addr.port(), TIMEOUT)?;

    // Testnet address rejected under production parameters, no round trip
    let mut out = Vec::new();
    let failed = query_balances(
        &mut client,
        NetworkKind::Prod.address_network(),
        &[TESTNET_ADDRESS.to_string()],
        &mut out,
    )?;

    assert_eq!(failed, 1);
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn test_failed_batch_maps_to_nonzero_exit_error() {
    let err = AppError::LookupFailures {
        failed: 1,
        total: 2,
    };
    assert_eq!(err.to_string(), "1 of 2 address lookups failed");
}
