#[cfg(test)]
mod tests {
    use crate::config::{Config, DEFAULT_MODEL, HintConfig, LLMConfig, LLMProvider};
    use crate::pipeline::state::Mode;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.mode, Mode::Fast);
        assert_eq!(config.output.output_path, PathBuf::from("./validation.out"));
        assert!(!config.output.pitch_deck);
        assert!(!config.verbose);
    }

    #[test]
    fn test_llm_provider_default() {
        let provider = LLMProvider::default();
        assert_eq!(provider, LLMProvider::Gemini);
    }

    #[test]
    fn test_llm_provider_from_str() {
        assert_eq!(
            "gemini".parse::<LLMProvider>().unwrap(),
            LLMProvider::Gemini
        );
        assert_eq!(
            "Google".parse::<LLMProvider>().unwrap(),
            LLMProvider::Gemini
        );
        assert_eq!(
            "openai".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenAI
        );
        assert_eq!(
            "anthropic".parse::<LLMProvider>().unwrap(),
            LLMProvider::Anthropic
        );
        assert_eq!(
            "deepseek".parse::<LLMProvider>().unwrap(),
            LLMProvider::DeepSeek
        );
        assert_eq!(
            "ollama".parse::<LLMProvider>().unwrap(),
            LLMProvider::Ollama
        );

        assert!("invalid".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_llm_provider_display() {
        assert_eq!(LLMProvider::Gemini.to_string(), "gemini");
        assert_eq!(LLMProvider::OpenAI.to_string(), "openai");
        assert_eq!(LLMProvider::Anthropic.to_string(), "anthropic");
        assert_eq!(LLMProvider::DeepSeek.to_string(), "deepseek");
        assert_eq!(LLMProvider::Ollama.to_string(), "ollama");
    }

    #[test]
    fn test_ollama_does_not_require_key() {
        assert!(!LLMProvider::Ollama.requires_api_key());
        assert!(LLMProvider::Gemini.requires_api_key());
    }

    #[test]
    fn test_llm_config_default() {
        let config = LLMConfig::default();

        assert_eq!(config.provider, LLMProvider::Gemini);
        assert!(config.api_key.is_empty());
        assert!(config.api_base_url.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, 8192);
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.timeout_seconds, 120);
    }

    #[test]
    fn test_hint_config_default() {
        let config = HintConfig::default();

        assert!(config.web_search_enabled);
        assert!(config.forum_search_enabled);
        assert!(config.web_search_url.contains("duckduckgo"));
        assert!(config.forum_search_url.contains("hn.algolia.com"));
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn test_from_file_partial_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("validator.toml");
        std::fs::write(
            &path,
            r#"
mode = "deep"

[llm]
provider = "openai"
api_key = "file-key"
model = "gpt-4o-mini"

[hints]
forum_search_enabled = false
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.mode, Mode::Deep);
        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
        assert_eq!(config.llm.api_key, "file-key");
        // 未在文件中出现的字段保持默认值
        assert_eq!(config.llm.max_tokens, 8192);
        assert!(config.hints.web_search_enabled);
        assert!(!config.hints.forum_search_enabled);
    }

    fn write_config(temp_dir: &TempDir, content: &str) -> PathBuf {
        let path = temp_dir.path().join("validator.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn gemini_env(key: &str) -> Option<String> {
        match key {
            "GOOGLE_API_KEY" => Some("google-key".to_string()),
            "GEMINI_MODEL" => Some("gemini-2.5-pro".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_from_file_normalizes_mode() {
        let temp_dir = TempDir::new().unwrap();

        let upper = write_config(&temp_dir, "mode = \"DEEP\"\n");
        assert_eq!(Config::from_file(&upper).unwrap().mode, Mode::Deep);

        let unknown = write_config(&temp_dir, "mode = \"bogus\"\n");
        assert_eq!(Config::from_file(&unknown).unwrap().mode, Mode::Fast);
    }

    #[test]
    fn test_gemini_env_ignored_for_other_providers() {
        let config = Config {
            llm: LLMConfig {
                provider: LLMProvider::OpenAI,
                model: "gpt-4o-mini".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
        .with_overrides_from(gemini_env);

        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert!(config.llm.api_key.is_empty());
    }

    #[test]
    fn test_gemini_env_fills_defaults_only() {
        let filled = Config::default().with_overrides_from(gemini_env);
        assert_eq!(filled.llm.api_key, "google-key");
        assert_eq!(filled.llm.model, "gemini-2.5-pro");

        let explicit = Config {
            llm: LLMConfig {
                api_key: "file-key".to_string(),
                model: "gemini-2.0-flash".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
        .with_overrides_from(gemini_env);
        assert_eq!(explicit.llm.api_key, "file-key");
        assert_eq!(explicit.llm.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_from_file_uses_provider_default_model() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[llm]\nprovider = \"deepseek\"\n");

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.llm.provider, LLMProvider::DeepSeek);
        assert_eq!(config.llm.model, "deepseek-chat");
    }

    #[test]
    fn test_switch_provider_keeps_explicit_model() {
        let mut config = LLMConfig::default();
        config.switch_provider(LLMProvider::OpenAI);
        assert_eq!(config.model, LLMProvider::OpenAI.default_model());

        config.model = "gpt-4.1".to_string();
        config.switch_provider(LLMProvider::Anthropic);
        assert_eq!(config.provider, LLMProvider::Anthropic);
        assert_eq!(config.model, "gpt-4.1");
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file(&PathBuf::from("/nonexistent/validator.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        std::fs::write(&path, "mode = [").unwrap();

        assert!(Config::from_file(&path).is_err());
    }
}
