//! Shared fixtures for gateway integration tests.
#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use elrond_gateway::config::{ApiConfig, HistoryConfig};
use elrond_gateway::gateway::{GatewayClient, HistoryAggregator, HttpTransport, TxSubmitter};

pub const ADDRESS: &str = "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th";

pub fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: server.uri(),
        request_timeout_secs: 5,
    }
}

pub fn client(server: &MockServer) -> GatewayClient {
    GatewayClient::new(&api_config(server)).unwrap()
}

/// Client built over a separately constructed transport.
pub fn client_over_transport(server: &MockServer) -> GatewayClient {
    GatewayClient::with_transport(HttpTransport::new(&api_config(server)).unwrap())
}

pub fn submitter(server: &MockServer) -> TxSubmitter {
    TxSubmitter::new(client(server))
}

pub fn aggregator(server: &MockServer, config: HistoryConfig) -> HistoryAggregator {
    HistoryAggregator::new(client(server), config)
}

pub fn history_config(page_size: usize) -> HistoryConfig {
    HistoryConfig {
        page_size,
        ..HistoryConfig::default()
    }
}

pub fn network_config_body() -> Value {
    json!({
        "data": {
            "config": {
                "erd_chain_id": "D",
                "erd_denomination": 18,
                "erd_min_gas_limit": 50000,
                "erd_min_gas_price": 1000000000u64,
                "erd_gas_per_data_byte": 1500,
                "erd_min_transaction_version": 1
            }
        },
        "code": "successful"
    })
}

pub async fn mount_network_config(server: &MockServer, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/network/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(network_config_body()))
        .expect(expected)
        .mount(server)
        .await;
}

pub async fn mount_send(server: &MockServer, tx_hash: &str, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/transaction/send"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "txHash": tx_hash },
            "code": "successful"
        })))
        .expect(expected)
        .mount(server)
        .await;
}

pub async fn mount_count(server: &MockServer, count: usize) {
    Mock::given(method("GET"))
        .and(path("/transactions/count"))
        .and(query_param("condition", "should"))
        .and(query_param("sender", ADDRESS))
        .and(query_param("receiver", ADDRESS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(count)))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_page(server: &MockServer, from: usize, transactions: Value, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("condition", "should"))
        .and(query_param("sender", ADDRESS))
        .and(query_param("receiver", ADDRESS))
        .and(query_param("from", from.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(transactions))
        .expect(expected)
        .mount(server)
        .await;
}

pub fn confirmation_body(height: u64, block_hash: &str) -> Value {
    json!({
        "data": {
            "transaction": {
                "status": "success",
                "hyperblockNonce": height,
                "blockHash": block_hash
            }
        },
        "code": "successful"
    })
}

pub async fn mount_confirmation(server: &MockServer, tx_hash: &str, height: u64, block_hash: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/transaction/{}", tx_hash)))
        .respond_with(ResponseTemplate::new(200).set_body_json(confirmation_body(height, block_hash)))
        .expect(1)
        .mount(server)
        .await;
}

/// Raw list record as returned by `/transactions`.
pub fn transaction(tx_hash: &str, value: &str) -> Value {
    json!({
        "txHash": tx_hash,
        "sender": ADDRESS,
        "receiver": "erd1spyavw0956vq68xj8y4tenjpq2wd5a9p2c6j8gsz7ztyrnpxrruqzu66jx",
        "value": value,
        "status": "success"
    })
}
