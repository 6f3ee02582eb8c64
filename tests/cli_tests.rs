use std::collections::HashMap;
use std::time::Duration;

use clap::Parser;
use pom_synth::cli::commands::{GenerateArgs, build_request, cmd_generate, read_hierarchy};
use pom_synth::cli::config::{
    AppConfig, Cli, Commands, ENV_LLM_API_KEY, ENV_LLM_ENDPOINT, ENV_LLM_MODEL, ENV_LLM_PROVIDER,
    ModelOverrides, load_config, resolve_model_config,
};
use pom_synth::model::ai_model::{DEFAULT_CHAT_ENDPOINT, DEFAULT_OLLAMA_MODEL, Provider};
use pom_synth::pom::error::GenerationError;
use pom_synth::pom::pom_model::{Mode, Strategy};

use crate::common::LOGIN_SCREEN;

mod common;

fn generate_args(hierarchy: &str) -> GenerateArgs {
    GenerateArgs {
        hierarchy: hierarchy.to_string(),
        mode: None,
        class_name: "LoginPage".to_string(),
        package: "com.example.pages".to_string(),
        base_class: None,
        strategy: None,
        output: None,
    }
}

fn env_map(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn no_env(_: &str) -> Option<String> {
    None
}

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_generate_minimal() {
    let cli = Cli::parse_from([
        "pom-synth",
        "generate",
        "--hierarchy",
        "login.xml",
        "--class-name",
        "LoginPage",
        "--package",
        "com.example.pages",
    ]);
    match cli.command {
        Commands::Generate {
            hierarchy,
            mode,
            class_name,
            package,
            base_class,
            strategy,
            output,
        } => {
            assert_eq!(hierarchy, "login.xml");
            assert_eq!(class_name, "LoginPage");
            assert_eq!(package, "com.example.pages");
            assert!(mode.is_none());
            assert!(base_class.is_none());
            assert!(strategy.is_none());
            assert!(output.is_none());
        }
        _ => panic!("Expected Generate command"),
    }
    assert_eq!(cli.verbose, 0);
    assert!(cli.trace.is_none());
}

#[test]
fn cli_parse_generate_all_args() {
    let cli = Cli::parse_from([
        "pom-synth",
        "generate",
        "--hierarchy",
        "-",
        "--mode",
        "cross-platform",
        "--class-name",
        "LoginPage",
        "--package",
        "com.example.pages",
        "--base-class",
        "BasePage",
        "--strategy",
        "rule-based",
        "-o",
        "LoginPage.java",
    ]);
    match cli.command {
        Commands::Generate {
            hierarchy,
            mode,
            base_class,
            strategy,
            output,
            ..
        } => {
            assert_eq!(hierarchy, "-");
            assert_eq!(mode.as_deref(), Some("cross-platform"));
            assert_eq!(base_class.as_deref(), Some("BasePage"));
            assert_eq!(strategy.as_deref(), Some("rule-based"));
            assert_eq!(output.as_deref(), Some("LoginPage.java"));
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn cli_parse_generate_requires_class_name() {
    let result = Cli::try_parse_from([
        "pom-synth",
        "generate",
        "--hierarchy",
        "login.xml",
        "--package",
        "com.example.pages",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_parse_locators() {
    let cli = Cli::parse_from(["pom-synth", "locators", "--hierarchy", "login.xml", "--mode", "ios"]);
    match cli.command {
        Commands::Locators { hierarchy, mode } => {
            assert_eq!(hierarchy, "login.xml");
            assert_eq!(mode.as_deref(), Some("ios"));
        }
        _ => panic!("Expected Locators command"),
    }
}

#[test]
fn cli_parse_global_options() {
    let cli = Cli::parse_from([
        "pom-synth",
        "-vv",
        "--llm-provider",
        "ollama",
        "locators",
        "--hierarchy",
        "login.xml",
        "--llm-model",
        "codellama",
        "--trace",
        "trace.jsonl",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.llm_provider.as_deref(), Some("ollama"));
    assert_eq!(cli.llm_model.as_deref(), Some("codellama"));
    assert_eq!(cli.trace.as_deref(), Some("trace.jsonl"));

    let overrides = ModelOverrides::from(&cli);
    assert_eq!(overrides.provider.as_deref(), Some("ollama"));
    assert_eq!(overrides.model.as_deref(), Some("codellama"));
    assert!(overrides.endpoint.is_none());
}

// ============================================================================
// Mode / Strategy Names
// ============================================================================

#[test]
fn mode_names_parse() {
    assert_eq!("android".parse::<Mode>().unwrap(), Mode::Android);
    assert_eq!("IOS".parse::<Mode>().unwrap(), Mode::Ios);
    assert_eq!("cross-platform".parse::<Mode>().unwrap(), Mode::CrossPlatform);
    assert_eq!("CROSS_PLATFORM".parse::<Mode>().unwrap(), Mode::CrossPlatform);
    assert_eq!(" dynamic_runtime ".parse::<Mode>().unwrap(), Mode::DynamicRuntime);
    assert_eq!("dynamic".parse::<Mode>().unwrap(), Mode::DynamicRuntime);

    match "windows".parse::<Mode>() {
        Err(GenerationError::UnsupportedMode(name)) => assert_eq!(name, "windows"),
        other => panic!("expected UnsupportedMode, got {:?}", other),
    }
}

#[test]
fn mode_display_parses_back() {
    for mode in Mode::ALL {
        assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
    }
}

#[test]
fn strategy_names_parse() {
    assert_eq!("rule-based".parse::<Strategy>().unwrap(), Strategy::RuleBased);
    assert_eq!("rules".parse::<Strategy>().unwrap(), Strategy::RuleBased);
    assert_eq!("model-assisted".parse::<Strategy>().unwrap(), Strategy::ModelAssisted);
    assert_eq!("LLM".parse::<Strategy>().unwrap(), Strategy::ModelAssisted);
    assert!(matches!(
        "guess".parse::<Strategy>(),
        Err(GenerationError::UnsupportedStrategy(_))
    ));
    assert_eq!(Strategy::default(), Strategy::ModelAssisted);
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn config_load_missing_file() {
    let config = load_config(Some("nonexistent_file_that_does_not_exist.yaml"));
    assert_eq!(config.generate.mode, "android");
    assert_eq!(config.generate.strategy, "model-assisted");
    assert!(config.model.provider.is_none());
}

#[test]
fn config_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pom-synth.yaml");
    std::fs::write(
        &path,
        "model:\n  provider: ollama\n  timeout_secs: 5\ngenerate:\n  mode: ios\n  base_class: BasePage\n",
    )
    .unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.model.provider.as_deref(), Some("ollama"));
    assert_eq!(config.model.timeout_secs, Some(5));
    assert_eq!(config.generate.mode, "ios");
    assert_eq!(config.generate.strategy, "model-assisted");
    assert_eq!(config.generate.base_class.as_deref(), Some("BasePage"));
}

#[test]
fn config_malformed_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "generate: [not, a, map\n").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.generate.mode, "android");
}

#[test]
fn config_yaml_roundtrip() {
    let config = AppConfig::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: AppConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed.generate.mode, config.generate.mode);
    assert_eq!(parsed.generate.strategy, config.generate.strategy);
}

// ============================================================================
// Model Config Resolution
// ============================================================================

#[test]
fn resolve_defaults_to_chat_completions_without_key() {
    let resolved = resolve_model_config(&ModelOverrides::default(), &AppConfig::default(), no_env).unwrap();
    assert_eq!(resolved.provider, Provider::ChatCompletions);
    assert_eq!(resolved.endpoint, DEFAULT_CHAT_ENDPOINT);
    assert!(resolved.api_key.is_none());
}

#[test]
fn resolve_precedence_cli_over_file_over_env() {
    let env = env_map(&[
        (ENV_LLM_PROVIDER, "none"),
        (ENV_LLM_ENDPOINT, "http://env/api"),
        (ENV_LLM_MODEL, "env-model"),
        (ENV_LLM_API_KEY, "env-key"),
    ]);

    let mut config = AppConfig::default();
    config.model.provider = Some("ollama".to_string());
    config.model.endpoint = Some("http://file/api".to_string());

    let overrides = ModelOverrides {
        endpoint: Some("http://cli/api".to_string()),
        ..ModelOverrides::default()
    };

    let resolved = resolve_model_config(&overrides, &config, env).unwrap();
    assert_eq!(resolved.provider, Provider::Ollama);
    assert_eq!(resolved.endpoint, "http://cli/api");
    assert_eq!(resolved.model, "env-model");
    assert_eq!(resolved.api_key.as_deref(), Some("env-key"));
}

#[test]
fn resolve_uses_provider_defaults_and_file_tuning() {
    let mut config = AppConfig::default();
    config.model.provider = Some("ollama".to_string());
    config.model.timeout_secs = Some(5);
    config.model.max_tokens = Some(1000);

    let resolved = resolve_model_config(&ModelOverrides::default(), &config, no_env).unwrap();
    assert_eq!(resolved.model, DEFAULT_OLLAMA_MODEL);
    assert_eq!(resolved.timeout, Duration::from_secs(5));
    assert_eq!(resolved.max_tokens, 1000);
}

#[test]
fn resolve_ignores_blank_api_key() {
    let env = env_map(&[(ENV_LLM_API_KEY, "  ")]);
    let resolved = resolve_model_config(&ModelOverrides::default(), &AppConfig::default(), env).unwrap();
    assert!(resolved.api_key.is_none());
}

#[test]
fn resolve_rejects_unknown_provider() {
    let overrides = ModelOverrides {
        provider: Some("gemini".to_string()),
        ..ModelOverrides::default()
    };
    let err = resolve_model_config(&overrides, &AppConfig::default(), no_env).unwrap_err();
    assert!(err.contains("gemini"));
}

// ============================================================================
// Request Building / Helpers
// ============================================================================

#[test]
fn build_request_uses_config_defaults() {
    let mut config = AppConfig::default();
    config.generate.base_class = Some("BasePage".to_string());

    let request = build_request(&generate_args("login.xml"), &config).unwrap();
    assert_eq!(request.mode, Mode::Android);
    assert_eq!(request.effective_strategy(), Strategy::ModelAssisted);
    assert_eq!(request.class.class_name, "LoginPage");
    assert_eq!(request.class.base_class(), Some("BasePage"));
}

#[test]
fn build_request_prefers_explicit_options() {
    let mut args = generate_args("login.xml");
    args.mode = Some("dynamic-runtime".to_string());
    args.strategy = Some("rule-based".to_string());
    args.base_class = Some("AppPage".to_string());

    let mut config = AppConfig::default();
    config.generate.base_class = Some("BasePage".to_string());

    let request = build_request(&args, &config).unwrap();
    assert_eq!(request.mode, Mode::DynamicRuntime);
    assert_eq!(request.strategy, Some(Strategy::RuleBased));
    assert_eq!(request.class.base_class(), Some("AppPage"));
}

#[test]
fn build_request_rejects_unknown_names() {
    let mut args = generate_args("login.xml");
    args.mode = Some("web".to_string());
    assert!(matches!(
        build_request(&args, &AppConfig::default()),
        Err(GenerationError::UnsupportedMode(_))
    ));

    let mut args = generate_args("login.xml");
    args.strategy = Some("magic".to_string());
    assert!(matches!(
        build_request(&args, &AppConfig::default()),
        Err(GenerationError::UnsupportedStrategy(_))
    ));
}

#[test]
fn read_hierarchy_missing_file_is_io_error() {
    match read_hierarchy("definitely_missing_hierarchy.xml") {
        Err(GenerationError::Io { context, .. }) => {
            assert!(context.contains("definitely_missing_hierarchy.xml"))
        }
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn read_hierarchy_rejects_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dump.xml");
    std::fs::write(&path, [b'<', b'h', 0xc3, 0x28]).unwrap();

    match read_hierarchy(path.to_str().unwrap()) {
        Err(GenerationError::MalformedHierarchy { position, .. }) => assert_eq!(position, 2),
        other => panic!("expected MalformedHierarchy, got {:?}", other),
    }
}

#[test]
fn cmd_generate_writes_rule_based_class_to_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("login.xml");
    let output = dir.path().join("LoginPage.java");
    std::fs::write(&input, LOGIN_SCREEN).unwrap();

    let mut args = generate_args(input.to_str().unwrap());
    args.mode = Some("cross-platform".to_string());
    args.strategy = Some("rule-based".to_string());
    args.output = Some(output.to_str().unwrap().to_string());

    let mut config = AppConfig::default();
    config.model.provider = Some("none".to_string());

    cmd_generate(&args, &config, &ModelOverrides::default(), None).unwrap();

    let java = std::fs::read_to_string(&output).unwrap();
    assert!(java.starts_with("package com.example.pages;\n"));
    assert!(java.contains("public void login(String username, String password)"));
}
