use alloy::primitives::U256;
use feewise::cli::build_estimator;
use feewise::config::parse_config;
use feewise::fees::{FeeDecision, FeeType, TransactionFeeRequest};
use feewise::test_utils::{fee_assertions, gwei, EstimatorFactory, MockFeeSource, MockGasStation};
use mockito::Matcher;

fn test_config_yaml(rpc_url: &str) -> String {
    format!(
        r#"
networks:
  - name: local
    chain_id: 31337
    rpc_url: {rpc_url}
    fee_type: legacy
  - name: ronin
    chain_id: 2020
    rpc_url: {rpc_url}
  - name: base
    chain_id: 8453
    rpc_url: {rpc_url}
    round_up_fees: true
fees:
  percent_multiplier: 10
"#
    )
}

#[tokio::test]
async fn test_configured_policies_drive_resolution() {
    let config = parse_config(&test_config_yaml("http://localhost:8545")).unwrap();
    let source = MockFeeSource::new().into_arc();
    let station = MockGasStation::unreachable().into_arc();
    let estimator =
        EstimatorFactory::create_with_networks(&config.networks, source.clone(), station.clone());

    // Configured fee type
    let local = estimator
        .resolve_fees(&TransactionFeeRequest::new(31337))
        .await
        .unwrap();
    assert_eq!(fee_assertions::assert_legacy(&local), gwei(22));

    // Built-in quirk, nothing configured beyond the network
    let ronin = estimator
        .resolve_fees(&TransactionFeeRequest::new(2020).with_transaction_type(FeeType::Eip1559))
        .await
        .unwrap();
    assert_eq!(fee_assertions::assert_legacy(&ronin), gwei(22));

    // Configured rounding
    let base = estimator
        .resolve_fees(&TransactionFeeRequest::new(8453))
        .await
        .unwrap();
    let (max_fee, priority_fee) = fee_assertions::assert_dynamic(&base);
    fee_assertions::assert_multiple_of(max_fee, 0x10000);
    fee_assertions::assert_multiple_of(priority_fee, 0x10000);
    assert!(max_fee >= U256::from(62_200_000_000u64));
    assert!(priority_fee >= U256::from(2_200_000_000u64));

    assert_eq!(station.calls(), 0);
}

#[tokio::test]
async fn test_polygon_falls_back_to_floor_then_legacy_on_flag() {
    let source = MockFeeSource::new().into_arc();
    let station = MockGasStation::unreachable().into_arc();
    let estimator = EstimatorFactory::create(source.clone(), station.clone());

    let polygon = estimator
        .resolve_fees(&TransactionFeeRequest::new(137))
        .await
        .unwrap();
    let (max_fee, priority_fee) = fee_assertions::assert_dynamic(&polygon);
    assert_eq!(priority_fee, U256::from(34_100_000_000u64));
    assert_eq!(max_fee, U256::from(94_100_000_000u64));
    assert_eq!(station.calls(), 1);

    let flag = estimator
        .resolve_fees(&TransactionFeeRequest::new(1220))
        .await
        .unwrap();
    fee_assertions::assert_unsupported(&flag);

    let flag_legacy = estimator
        .resolve_fees_or_legacy(&TransactionFeeRequest::new(1220))
        .await
        .unwrap();
    assert_eq!(flag_legacy, FeeDecision::Legacy { gas_price: gwei(22) });
}

#[tokio::test]
async fn test_explicit_values_skip_network_calls() {
    let source = MockFeeSource::new().into_arc();
    let station = MockGasStation::returning(gwei(50)).into_arc();
    let estimator = EstimatorFactory::create(source.clone(), station.clone());

    let request = TransactionFeeRequest::new(137)
        .with_max_fee_per_gas(gwei(200))
        .with_max_priority_fee_per_gas(gwei(40));
    let decision = estimator.resolve_fees(&request).await.unwrap();

    assert_eq!(
        decision,
        FeeDecision::Dynamic {
            max_fee_per_gas: gwei(200),
            max_priority_fee_per_gas: gwei(40),
        }
    );
    assert_eq!(source.total_calls(), 0);
    assert_eq!(station.calls(), 0);
}

#[tokio::test]
async fn test_legacy_resolution_over_json_rpc() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(
            serde_json::json!({"method": "eth_gasPrice"}),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"jsonrpc":"2.0","id":0,"result":"0x4a817c800"}"#)
        .create_async()
        .await;

    let config = parse_config(&test_config_yaml(&server.url())).unwrap();
    let estimator = build_estimator(&config, "local").unwrap();

    let decision = estimator
        .resolve_fees(&TransactionFeeRequest::new(31337))
        .await
        .unwrap();

    assert_eq!(decision, FeeDecision::Legacy { gas_price: gwei(22) });
    mock.assert_async().await;
}
