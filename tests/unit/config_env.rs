//! Configuration layering tests
//!
//! Environment variables mutate process state, so these run serially.

use serial_test::serial;
use std::env;

use tapyrus_node_tools::config::AppConfig;

#[test]
#[serial]
fn test_environment_overrides_defaults() {
    env::set_var("TAPYRUS_ELECTRUM__HOST", "10.1.2.3");
    env::set_var("TAPYRUS_UNITS__PER_COIN", "1000000.0");

    let config = AppConfig::load().unwrap();
    assert_eq!(config.electrum.host, "10.1.2.3");
    assert_eq!(config.units.per_coin, 1e6);

    env::remove_var("TAPYRUS_ELECTRUM__HOST");
    env::remove_var("TAPYRUS_UNITS__PER_COIN");
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    env::remove_var("TAPYRUS_ELECTRUM__HOST");
    env::remove_var("TAPYRUS_UNITS__PER_COIN");

    let config = AppConfig::load().unwrap();
    assert_eq!(config.electrum.host, "127.0.0.1");
    assert_eq!(config.node_rpc.host, "127.0.0.1");
    assert_eq!(config.units.per_coin, 1e8);
}
