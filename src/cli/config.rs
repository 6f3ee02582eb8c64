use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::ai_model::{ModelConfig, Provider};

pub const DEFAULT_CONFIG_FILE: &str = "pom-synth.yaml";

pub const ENV_LLM_PROVIDER: &str = "POM_SYNTH_LLM_PROVIDER";
pub const ENV_LLM_ENDPOINT: &str = "POM_SYNTH_LLM_ENDPOINT";
pub const ENV_LLM_MODEL: &str = "POM_SYNTH_LLM_MODEL";
pub const ENV_LLM_API_KEY: &str = "POM_SYNTH_LLM_API_KEY";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "pom-synth",
    version,
    about = "Generate Appium page-object classes from mobile UI hierarchy dumps"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// LLM provider: openai, ollama or none
    #[arg(long, global = true)]
    pub llm_provider: Option<String>,

    /// LLM API endpoint
    #[arg(long, global = true)]
    pub llm_endpoint: Option<String>,

    /// LLM model name
    #[arg(long, global = true)]
    pub llm_model: Option<String>,

    /// Path to config file (default: pom-synth.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Append one JSON line per generation to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a page-object class from a hierarchy dump
    Generate {
        /// Hierarchy XML file, or `-` for stdin
        #[arg(long)]
        hierarchy: String,

        /// Mode: android, ios, cross-platform, dynamic-runtime
        #[arg(long)]
        mode: Option<String>,

        /// Name of the generated class
        #[arg(long)]
        class_name: String,

        /// Java package of the generated class
        #[arg(long)]
        package: String,

        /// Class the page object extends
        #[arg(long)]
        base_class: Option<String>,

        /// Strategy: model-assisted (model first, rules on failure) or rule-based
        #[arg(long)]
        strategy: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the locator records extracted from a hierarchy dump as JSON
    Locators {
        /// Hierarchy XML file, or `-` for stdin
        #[arg(long)]
        hierarchy: String,

        /// Mode: android, ios, cross-platform, dynamic-runtime
        #[arg(long)]
        mode: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `pom-synth.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub generate: GenerateSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSection {
    pub provider: Option<String>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSection {
    #[serde(default = "default_mode")]
    pub mode: String,

    #[serde(default = "default_strategy")]
    pub strategy: String,

    pub base_class: Option<String>,
}

impl Default for GenerateSection {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            strategy: default_strategy(),
            base_class: None,
        }
    }
}

// Serde default helpers
fn default_mode() -> String { "android".to_string() }
fn default_strategy() -> String { "model-assisted".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!("ignoring malformed config '{}': {}", config_path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Resolution (CLI > config file > env > defaults)
// ============================================================================

/// Model settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ModelOverrides {
    pub provider: Option<String>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
}

impl From<&Cli> for ModelOverrides {
    fn from(cli: &Cli) -> Self {
        Self {
            provider: cli.llm_provider.clone(),
            endpoint: cli.llm_endpoint.clone(),
            model: cli.llm_model.clone(),
        }
    }
}

/// Resolve the model configuration. `env` looks up environment variables so
/// callers can substitute a fixed map.
pub fn resolve_model_config(
    overrides: &ModelOverrides,
    config: &AppConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ModelConfig, String> {
    let section = &config.model;

    let provider = match overrides
        .provider
        .clone()
        .or_else(|| section.provider.clone())
        .or_else(|| env(ENV_LLM_PROVIDER))
    {
        Some(name) => name.parse::<Provider>()?,
        None => Provider::ChatCompletions,
    };

    let mut resolved = ModelConfig::for_provider(provider);

    if let Some(endpoint) = overrides
        .endpoint
        .clone()
        .or_else(|| section.endpoint.clone())
        .or_else(|| env(ENV_LLM_ENDPOINT))
    {
        resolved.endpoint = endpoint;
    }
    if let Some(model) = overrides
        .model
        .clone()
        .or_else(|| section.model.clone())
        .or_else(|| env(ENV_LLM_MODEL))
    {
        resolved.model = model;
    }
    resolved.api_key = section
        .api_key
        .clone()
        .or_else(|| env(ENV_LLM_API_KEY))
        .filter(|key| !key.trim().is_empty());

    if let Some(secs) = section.timeout_secs {
        resolved.timeout = Duration::from_secs(secs);
    }
    if let Some(temperature) = section.temperature {
        resolved.temperature = temperature;
    }
    if let Some(max_tokens) = section.max_tokens {
        resolved.max_tokens = max_tokens;
    }

    Ok(resolved)
}
