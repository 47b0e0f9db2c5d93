#[cfg(test)]
mod tests {
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::config::parser::{load_config, parse_config, ConfigError};
    use crate::fees::FeeType;

    // Helper function to create a temporary file with content
    fn create_temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_valid_configuration() {
        let config_yaml = r#"
        networks:
          - name: ethereum
            chain_id: 1
            rpc_url: https://eth.llamarpc.com
          - name: ronin
            chain_id: 2020
            rpc_url: https://api.roninchain.com/rpc
            fee_type: legacy
          - name: base
            chain_id: 8453
            rpc_url: https://mainnet.base.org
            round_up_fees: true

        fees:
          percent_multiplier: 15
          rounding_granularity: 4096

        gas_station:
          timeout_secs: 5
          min_priority_fee_gwei: 30
        "#;

        let temp_file = create_temp_file(config_yaml);
        let config = load_config(temp_file.path()).expect("Failed to load valid config");

        assert_eq!(config.networks.len(), 3);
        assert_eq!(config.networks[0].name, "ethereum");
        assert_eq!(config.networks[0].fee_type(), None);
        assert_eq!(config.networks[1].fee_type(), Some(FeeType::Legacy));
        assert!(config.networks[2].round_up_fees);
        assert!(!config.networks[2].force_legacy);

        assert_eq!(config.fees.percent_multiplier, 15);
        assert_eq!(config.fees.rounding_granularity, 4096);

        assert_eq!(config.gas_station.timeout_secs, 5);
        assert_eq!(config.gas_station.min_priority_fee_gwei, 30);
        assert_eq!(
            config.gas_station.polygon_url,
            "https://gasstation.polygon.technology/v2"
        );

        assert_eq!(config.network("base").unwrap().chain_id, 8453);
        assert!(config.network("missing").is_none());
    }

    #[test]
    fn test_defaults_applied() {
        let config = parse_config("networks: []").unwrap();

        assert!(config.networks.is_empty());
        assert_eq!(config.fees.percent_multiplier, 10);
        assert_eq!(config.fees.rounding_granularity, 0x10000);
        assert_eq!(config.gas_station.min_priority_fee_gwei, 31);
    }

    #[test]
    fn test_invalid_fee_type() {
        let config_yaml = r#"
        networks:
          - name: ethereum
            chain_id: 1
            rpc_url: https://eth.llamarpc.com
            fee_type: eip-1559
        "#;

        let result = parse_config(config_yaml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_invalid_rpc_url() {
        let config_yaml = r#"
        networks:
          - name: ethereum
            chain_id: 1
            rpc_url: not-a-url
        "#;

        let result = parse_config(config_yaml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_zero_chain_id_rejected() {
        let config_yaml = r#"
        networks:
          - name: ethereum
            chain_id: 0
            rpc_url: https://eth.llamarpc.com
        "#;

        let result = parse_config(config_yaml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_percent_multiplier_out_of_range() {
        let config_yaml = r#"
        fees:
          percent_multiplier: 250
        "#;

        let result = parse_config(config_yaml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_duplicate_network_names() {
        let config_yaml = r#"
        networks:
          - name: ethereum
            chain_id: 1
            rpc_url: https://eth.llamarpc.com
          - name: ethereum
            chain_id: 11155111
            rpc_url: https://sepolia.drpc.org
        "#;

        let result = parse_config(config_yaml);
        match result {
            Err(ConfigError::Other(msg)) => {
                assert!(msg.contains("'ethereum' is defined more than once"))
            }
            other => panic!("Expected duplicate network error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_chain_id() {
        let config_yaml = r#"
        networks:
          - name: ethereum
            rpc_url: https://eth.llamarpc.com
        "#;

        let result = parse_config(config_yaml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/feewise/config.yaml");
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }
}
