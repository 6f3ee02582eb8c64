use crate::locator::locator_model::{LocatorRecord, Platform};
use crate::locator::naming::java_string_literal;
use crate::pom::cross_platform::CrossPlatformSynthesizer;
use crate::pom::dynamic_runtime::DynamicRuntimeSynthesizer;
use crate::pom::error::GenerationError;
use crate::pom::field_style::FieldStyleSynthesizer;
use crate::pom::pom_model::{ClassSpec, GeneratedClass, Mode};

// ============================================================================
// ClassSynthesizer trait: one implementation per page-object style
// ============================================================================

/// Turns extracted locator records into a complete page-object class.
///
/// Members are emitted in record order. Rule-based styles never fail and
/// accept an empty record set (the class body is then just the constructor).
pub trait ClassSynthesizer {
    /// Short style name used in logs and traces.
    fn style(&self) -> &'static str;

    fn synthesize(
        &self,
        records: &[LocatorRecord],
        spec: &ClassSpec,
    ) -> Result<GeneratedClass, GenerationError>;
}

/// The deterministic synthesizer for a mode.
pub fn rule_based(mode: Mode) -> Box<dyn ClassSynthesizer> {
    match mode {
        Mode::Android => Box::new(FieldStyleSynthesizer::new(Platform::Android)),
        Mode::Ios => Box::new(FieldStyleSynthesizer::new(Platform::Ios)),
        Mode::CrossPlatform => Box::new(CrossPlatformSynthesizer),
        Mode::DynamicRuntime => Box::new(DynamicRuntimeSynthesizer),
    }
}

// ============================================================================
// Shared fragments
// ============================================================================

/// Page-factory annotation binding a field to a platform locator.
pub fn find_by_annotation(platform: Platform, locator: &str) -> String {
    match platform {
        Platform::Android => format!("@AndroidFindBy(id = {})", java_string_literal(locator)),
        Platform::Ios => format!(
            "@iOSXCUITFindBy(accessibility = {})",
            java_string_literal(locator)
        ),
    }
}

/// Field names containing `login` get an `isLoginButtonVisible()` check.
pub fn mentions_login(field: &str) -> bool {
    field.to_ascii_lowercase().contains("login")
}

/// Field names containing `toast` or `error` get an `isErrorToastVisible()` check.
pub fn mentions_error_toast(field: &str) -> bool {
    let lower = field.to_ascii_lowercase();
    lower.contains("toast") || lower.contains("error")
}
