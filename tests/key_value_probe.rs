//! Key-value probe against a fake RESP store.

use loadgen::config::ProbeConfig;
use loadgen::probe::{KeyValueProbe, Probe};

mod common;

fn data_commands(commands: &[Vec<String>]) -> Vec<Vec<String>> {
    commands
        .iter()
        .filter(|c| matches!(c.first().map(String::as_str), Some("SMEMBERS" | "EXISTS")))
        .cloned()
        .collect()
}

#[tokio::test]
async fn test_issues_membership_and_existence_queries() {
    let store = common::start_fake_kv_store().await;
    let probe = KeyValueProbe::new(&ProbeConfig::default());

    probe.check("127.0.0.1", store.addr.port()).await.unwrap();

    assert_eq!(
        data_commands(&store.commands()),
        vec![
            vec!["SMEMBERS".to_string(), "key1".to_string()],
            vec!["EXISTS".to_string(), "key10000000000000".to_string()],
        ]
    );
}

#[tokio::test]
async fn test_fresh_connection_per_call() {
    let store = common::start_fake_kv_store().await;
    let probe = KeyValueProbe::new(&ProbeConfig::default());

    probe.check("127.0.0.1", store.addr.port()).await.unwrap();
    probe.check("127.0.0.1", store.addr.port()).await.unwrap();

    assert_eq!(store.connections(), 2);
    assert_eq!(data_commands(&store.commands()).len(), 4);
}

#[tokio::test]
async fn test_configured_keys() {
    let store = common::start_fake_kv_store().await;
    let config = ProbeConfig {
        set_key: "members".into(),
        exists_key: "flag".into(),
        ..ProbeConfig::default()
    };
    let probe = KeyValueProbe::new(&config);

    probe.check("127.0.0.1", store.addr.port()).await.unwrap();

    let commands = data_commands(&store.commands());
    assert_eq!(commands[0][1], "members");
    assert_eq!(commands[1][1], "flag");
}
