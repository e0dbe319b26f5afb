//! ServerConfig loading from environment variables.

use serial_test::serial;
use std::env;
use std::net::SocketAddr;
use whatsapp_rpc::ServerConfig;

fn clear_env() {
    for name in [
        "GRPC_ADDR",
        "METRICS_ADDR",
        "LOG_FILE",
        "OPENAI_API_KEY",
        "OPENAI_API_KEY_ASSISTANT",
        "OPENAI_API_KEY_ASSISTANT_ANALYZER",
        "OPENAI_API_KEY_ASSISTANT_ANALIZER",
    ] {
        env::remove_var(name);
    }
}

fn set_credentials() {
    env::set_var("OPENAI_API_KEY", "sk-test");
    env::set_var("OPENAI_API_KEY_ASSISTANT", "asst_primary");
    env::set_var("OPENAI_API_KEY_ASSISTANT_ANALYZER", "asst_analyzer");
}

#[test]
#[serial]
fn test_defaults() {
    clear_env();
    set_credentials();

    let config = ServerConfig::load(None, None).unwrap();

    assert_eq!(config.grpc_addr, "127.0.0.1:50052".parse::<SocketAddr>().unwrap());
    assert_eq!(config.metrics_addr, "127.0.0.1:8001".parse::<SocketAddr>().unwrap());
    assert_eq!(config.log_file, "logs/whatsapp-gateway.log");
    assert_eq!(config.assistant.primary_assistant, "asst_primary");
    assert!(config.validate().is_ok());
    clear_env();
}

#[test]
#[serial]
fn test_env_and_flag_overrides() {
    clear_env();
    set_credentials();
    env::set_var("GRPC_ADDR", "0.0.0.0:6000");
    env::set_var("METRICS_ADDR", "0.0.0.0:6001");
    env::set_var("LOG_FILE", "/tmp/gw.log");

    let config = ServerConfig::load(None, None).unwrap();
    assert_eq!(config.grpc_addr.port(), 6000);
    assert_eq!(config.metrics_addr.port(), 6001);
    assert_eq!(config.log_file, "/tmp/gw.log");

    let flag: SocketAddr = "127.0.0.1:7000".parse().unwrap();
    let config = ServerConfig::load(Some(flag), None).unwrap();
    assert_eq!(config.grpc_addr, flag);
    assert_eq!(config.metrics_addr.port(), 6001);
    clear_env();
}

#[test]
#[serial]
fn test_invalid_address_is_an_error() {
    clear_env();
    set_credentials();
    env::set_var("GRPC_ADDR", "not-an-address");

    let err = ServerConfig::load(None, None).unwrap_err();
    assert!(err.to_string().contains("GRPC_ADDR"));
    clear_env();
}

#[test]
#[serial]
fn test_missing_credentials_is_an_error() {
    clear_env();
    assert!(ServerConfig::load(None, None).is_err());
}

#[test]
#[serial]
fn test_same_addresses_fail_validation() {
    clear_env();
    set_credentials();
    let addr: SocketAddr = "127.0.0.1:9000".parse().unwrap();

    let config = ServerConfig::load(Some(addr), Some(addr)).unwrap();
    assert!(config.validate().is_err());
    clear_env();
}
