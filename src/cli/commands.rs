use std::io::Read;

use tracing::info;

use crate::cli::config::{AppConfig, ModelOverrides, resolve_model_config};
use crate::locator::extractor::extract_from_xml;
use crate::pom::coordinator::{PomGenerator, SynthesisPath};
use crate::pom::error::GenerationError;
use crate::pom::pom_model::{ClassSpec, GenerationRequest, Mode, Strategy};
use crate::trace::logger::TraceLogger;

/// Options of the `generate` subcommand after parsing.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub hierarchy: String,
    pub mode: Option<String>,
    pub class_name: String,
    pub package: String,
    pub base_class: Option<String>,
    pub strategy: Option<String>,
    pub output: Option<String>,
}

// ============================================================================
// generate subcommand
// ============================================================================

pub fn cmd_generate(
    args: &GenerateArgs,
    config: &AppConfig,
    overrides: &ModelOverrides,
    trace_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = build_request(args, config)?;
    let xml = read_hierarchy(&args.hierarchy)?;

    let model_config = resolve_model_config(overrides, config, |key| std::env::var(key).ok())?;
    let mut generator = PomGenerator::from_config(&model_config)?;
    if let Some(path) = trace_path {
        generator = generator.with_tracer(TraceLogger::new(path));
    }

    info!(
        mode = %request.mode,
        strategy = %request.effective_strategy(),
        provider = %model_config.provider,
        "generating {}.{}",
        request.class.package_name,
        request.class.class_name
    );

    let report = generator.generate_with_report(&xml, &request)?;

    match &report.path {
        SynthesisPath::Model => info!("class written by model"),
        SynthesisPath::RuleBased {
            style,
            fallback_reason: Some(reason),
        } => info!("class written by {} rules after model failure: {}", style, reason),
        SynthesisPath::RuleBased { style, .. } => info!("class written by {} rules", style),
    }

    match &args.output {
        Some(path) => {
            std::fs::write(path, &report.class.source_text).map_err(|source| GenerationError::Io {
                context: format!("writing {}", path),
                source,
            })?;
            eprintln!(
                "Wrote {} ({} locators) to {}",
                report.class.class_name,
                report.records.len(),
                path
            );
        }
        None => print!("{}", report.class.source_text),
    }

    Ok(())
}

// ============================================================================
// locators subcommand
// ============================================================================

pub fn cmd_locators(
    hierarchy: &str,
    mode: Option<&str>,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mode: Mode = mode.unwrap_or(&config.generate.mode).parse()?;
    let xml = read_hierarchy(hierarchy)?;
    let records = extract_from_xml(&xml, mode)?;

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Merge subcommand options with the config file's `generate` section.
pub fn build_request(
    args: &GenerateArgs,
    config: &AppConfig,
) -> Result<GenerationRequest, GenerationError> {
    let defaults = &config.generate;
    let mode: Mode = args.mode.as_deref().unwrap_or(&defaults.mode).parse()?;
    let strategy: Strategy = args
        .strategy
        .as_deref()
        .unwrap_or(&defaults.strategy)
        .parse()?;

    let mut class = ClassSpec::new(&args.class_name, &args.package);
    if let Some(base) = args.base_class.as_ref().or(defaults.base_class.as_ref()) {
        class = class.with_base_class(base);
    }

    Ok(GenerationRequest::new(mode, class).with_strategy(strategy))
}

/// Read hierarchy text from a file, or from stdin when the path is `-`.
pub fn read_hierarchy(path: &str) -> Result<String, GenerationError> {
    if path == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .map_err(|source| GenerationError::Io {
                context: "reading hierarchy from stdin".to_string(),
                source,
            })?;
        return decode_utf8(bytes);
    }

    let bytes = std::fs::read(path).map_err(|source| GenerationError::Io {
        context: format!("reading {}", path),
        source,
    })?;
    decode_utf8(bytes)
}

fn decode_utf8(bytes: Vec<u8>) -> Result<String, GenerationError> {
    String::from_utf8(bytes).map_err(|e| {
        let position = e.utf8_error().valid_up_to();
        GenerationError::malformed(position, format!("invalid UTF-8: {}", e.utf8_error()))
    })
}
