use crate::{
    hierarchy::parser::parse_hierarchy,
    locator::extractor::extract_records,
    pom::{
        error::GenerationError,
        pom_model::{ClassSpec, GeneratedClass, Mode},
        synthesizer::{ClassSynthesizer, rule_based},
    },
};

pub mod cli;
pub mod hierarchy;
pub mod locator;
pub mod model;
pub mod pom;
pub mod trace;

/// Parse a hierarchy dump and synthesize the mode's rule-based page object,
/// without consulting any model.
pub fn generate_rule_based(
    hierarchy: &str,
    mode: Mode,
    spec: &ClassSpec,
) -> Result<GeneratedClass, GenerationError> {
    let nodes = parse_hierarchy(hierarchy)?;
    let records = extract_records(&nodes, mode);
    rule_based(mode).synthesize(&records, spec)
}
