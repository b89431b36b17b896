#[cfg(test)]
mod tests {
    use crate::config::LLMConfig;
    use crate::llm::client::{GenerationClient, GenerationError, GenerationInputs, GenerationKind};

    fn inputs() -> GenerationInputs {
        GenerationInputs {
            industry: "specialty coffee".to_string(),
            name: "Driftwood Roasters".to_string(),
            product_service: "single-origin beans".to_string(),
        }
    }

    fn config_without_credential() -> LLMConfig {
        LLMConfig {
            api_key: String::new(),
            ..Default::default()
        }
    }

    #[test]
    fn test_generation_kind_roundtrip() {
        for kind in [
            GenerationKind::BrandName,
            GenerationKind::Mission,
            GenerationKind::Vision,
            GenerationKind::Values,
            GenerationKind::OriginStory,
        ] {
            assert_eq!(kind.as_str().parse::<GenerationKind>().unwrap(), kind);
        }

        assert!("jingle".parse::<GenerationKind>().is_err());
    }

    #[test]
    fn test_client_without_credential_still_constructs() {
        let client = GenerationClient::new(config_without_credential()).unwrap();

        assert!(!client.has_credential());
        assert!(!client.is_generating());
        assert!(client.last_error().is_none());
    }

    #[tokio::test]
    async fn test_generate_without_credential_fails_synchronously() {
        let client = GenerationClient::new(config_without_credential()).unwrap();

        let result = client.generate(GenerationKind::Mission, &inputs()).await;

        assert!(matches!(result, Err(GenerationError::MissingCredential)));
        // 错误消息被记录，in-flight标记已复位
        assert!(client.last_error().is_some());
        assert!(!client.is_generating());
    }

    #[tokio::test]
    async fn test_generate_palette_without_credential_fails_synchronously() {
        let client = GenerationClient::new(config_without_credential()).unwrap();

        let result = client.generate_palette(&inputs()).await;

        assert!(matches!(result, Err(GenerationError::MissingCredential)));
        assert!(client.last_error().is_some());
    }

    #[test]
    fn test_whitespace_credential_counts_as_missing() {
        let config = LLMConfig {
            api_key: "   ".to_string(),
            ..Default::default()
        };
        let client = GenerationClient::new(config).unwrap();

        assert!(!client.has_credential());
    }
}
