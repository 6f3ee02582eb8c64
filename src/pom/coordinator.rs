use tracing::{debug, info, warn};

use crate::hierarchy::parser::parse_hierarchy;
use crate::locator::extractor::extract_records;
use crate::locator::locator_model::LocatorRecord;
use crate::model::ai_model::{ModelConfig, TextInference, UnavailableInference, build_backend};
use crate::model::model_assisted::ModelAssistedSynthesizer;
use crate::pom::error::GenerationError;
use crate::pom::pom_model::{GeneratedClass, GenerationRequest, Strategy};
use crate::pom::synthesizer::{ClassSynthesizer, rule_based};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

// ============================================================================
// Fallback coordinator
// ============================================================================

/// Attempt order: the model first (unless rules were requested), then the
/// rule-based style for the mode. `RuleBased` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Model,
    RuleBased,
}

impl Attempt {
    pub fn initial(strategy: Strategy) -> Self {
        match strategy {
            Strategy::ModelAssisted => Attempt::Model,
            Strategy::RuleBased => Attempt::RuleBased,
        }
    }
}

/// How the returned class was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisPath {
    Model,
    RuleBased {
        style: &'static str,
        /// Why the model attempt was abandoned; `None` when rules were requested directly.
        fallback_reason: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub class: GeneratedClass,
    pub records: Vec<LocatorRecord>,
    pub path: SynthesisPath,
}

/// Entry point for page-object synthesis.
///
/// Holds the model backend and an optional trace sink; carries no per-request
/// state, so one generator serves any number of calls.
pub struct PomGenerator {
    backend: Box<dyn TextInference>,
    tracer: TraceLogger,
}

impl PomGenerator {
    pub fn new(backend: Box<dyn TextInference>) -> Self {
        Self {
            backend,
            tracer: TraceLogger::disabled(),
        }
    }

    pub fn from_config(config: &ModelConfig) -> Result<Self, GenerationError> {
        Ok(Self::new(build_backend(config)?))
    }

    /// Generator whose model attempts always fail; only rule-based output is produced.
    pub fn rule_based_only() -> Self {
        Self::new(Box::new(UnavailableInference {
            reason: "no model configured".to_string(),
        }))
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn generate(
        &self,
        hierarchy: &str,
        request: &GenerationRequest,
    ) -> Result<GeneratedClass, GenerationError> {
        self.generate_with_report(hierarchy, request)
            .map(|report| report.class)
    }

    pub fn generate_with_report(
        &self,
        hierarchy: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationReport, GenerationError> {
        let event = TraceEvent::now(request, hierarchy);
        let result = self.run(hierarchy, request);

        match &result {
            Ok(report) => {
                let mut event = event.with_records(report.records.len());
                event = match &report.path {
                    SynthesisPath::Model => event.with_style("model-assisted"),
                    SynthesisPath::RuleBased {
                        style,
                        fallback_reason,
                    } => {
                        let event = event.with_style(style);
                        match fallback_reason {
                            Some(reason) => event.with_fallback(reason),
                            None => event,
                        }
                    }
                };
                self.tracer.log(&event);
            }
            Err(e) => self.tracer.log(&event.with_error(e)),
        }

        result
    }

    fn run(
        &self,
        hierarchy: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationReport, GenerationError> {
        let nodes = parse_hierarchy(hierarchy)?;
        let records = extract_records(&nodes, request.mode);
        debug!(
            nodes = nodes.len(),
            records = records.len(),
            mode = %request.mode,
            "extracted locators"
        );

        let mut attempt = Attempt::initial(request.effective_strategy());
        let mut fallback_reason = None;

        loop {
            match attempt {
                Attempt::Model => {
                    let model = ModelAssistedSynthesizer::new(self.backend.as_ref(), request.mode);
                    match model.synthesize(&records, &request.class) {
                        Ok(class) => {
                            info!(class = %class.class_name, "page object generated by model");
                            return Ok(GenerationReport {
                                class,
                                records,
                                path: SynthesisPath::Model,
                            });
                        }
                        Err(e) if e.is_recoverable() => {
                            warn!("model-assisted generation failed, using rules: {}", e);
                            fallback_reason = Some(e.to_string());
                            attempt = Attempt::RuleBased;
                        }
                        Err(e) => return Err(e),
                    }
                }
                Attempt::RuleBased => {
                    let synthesizer = rule_based(request.mode);
                    let class = synthesizer.synthesize(&records, &request.class)?;
                    info!(
                        class = %class.class_name,
                        style = synthesizer.style(),
                        "page object generated by rules"
                    );
                    return Ok(GenerationReport {
                        class,
                        records,
                        path: SynthesisPath::RuleBased {
                            style: synthesizer.style(),
                            fallback_reason,
                        },
                    });
                }
            }
        }
    }
}
