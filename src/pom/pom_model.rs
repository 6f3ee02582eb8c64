use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::locator::locator_model::Platform;
use crate::pom::error::GenerationError;

// ============================================================================
// Generation mode and strategy
// ============================================================================

/// Requested page-object style. Also selects the locator extraction policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    Android,
    Ios,
    CrossPlatform,
    DynamicRuntime,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Android, Mode::Ios, Mode::CrossPlatform, Mode::DynamicRuntime];

    /// Platforms whose attributes are consulted when extracting locators.
    pub fn platforms(self) -> &'static [Platform] {
        match self {
            Mode::Android => &[Platform::Android],
            Mode::Ios => &[Platform::Ios],
            Mode::CrossPlatform | Mode::DynamicRuntime => &[Platform::Android, Platform::Ios],
        }
    }

    pub fn includes(self, platform: Platform) -> bool {
        self.platforms().contains(&platform)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Android => "ANDROID",
            Mode::Ios => "IOS",
            Mode::CrossPlatform => "CROSS_PLATFORM",
            Mode::DynamicRuntime => "DYNAMIC_RUNTIME",
        }
    }

    /// Human-readable target platform(s), used in model prompts.
    pub fn platform_label(self) -> &'static str {
        match self {
            Mode::Android => "Android",
            Mode::Ios => "iOS",
            Mode::CrossPlatform | Mode::DynamicRuntime => "Android and iOS",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = GenerationError;

    /// Accepts `android`, `IOS`, `cross-platform`, `CROSS_PLATFORM`, `dynamic_runtime`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical_name(s).as_str() {
            "ANDROID" => Ok(Mode::Android),
            "IOS" => Ok(Mode::Ios),
            "CROSS_PLATFORM" | "CROSSPLATFORM" => Ok(Mode::CrossPlatform),
            "DYNAMIC_RUNTIME" | "DYNAMIC" => Ok(Mode::DynamicRuntime),
            _ => Err(GenerationError::UnsupportedMode(s.to_string())),
        }
    }
}

/// Whether the generative model is consulted before the deterministic rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    RuleBased,
    #[default]
    ModelAssisted,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::RuleBased => "RULE_BASED",
            Strategy::ModelAssisted => "MODEL_ASSISTED",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical_name(s).as_str() {
            "RULE_BASED" | "RULE" | "RULES" => Ok(Strategy::RuleBased),
            "MODEL_ASSISTED" | "MODEL" | "LLM" => Ok(Strategy::ModelAssisted),
            _ => Err(GenerationError::UnsupportedStrategy(s.to_string())),
        }
    }
}

fn canonical_name(s: &str) -> String {
    s.trim().replace('-', "_").to_ascii_uppercase()
}

// ============================================================================
// Class description and result
// ============================================================================

/// Names that shape the generated class declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSpec {
    pub class_name: String,
    pub package_name: String,
    #[serde(default)]
    pub base_class_name: Option<String>,
}

impl ClassSpec {
    pub fn new(class_name: &str, package_name: &str) -> Self {
        Self {
            class_name: class_name.trim().to_string(),
            package_name: package_name.trim().to_string(),
            base_class_name: None,
        }
    }

    pub fn with_base_class(mut self, base_class_name: &str) -> Self {
        self.base_class_name = Some(base_class_name.to_string());
        self
    }

    /// Base class to extend; blank names mean no `extends` clause.
    pub fn base_class(&self) -> Option<&str> {
        self.base_class_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Everything the caller supplies for one synthesis call besides the hierarchy text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub mode: Mode,
    pub class: ClassSpec,
    /// `None` means the default strategy (model first, rules on failure).
    #[serde(default)]
    pub strategy: Option<Strategy>,
}

impl GenerationRequest {
    pub fn new(mode: Mode, class: ClassSpec) -> Self {
        Self {
            mode,
            class,
            strategy: None,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn effective_strategy(&self) -> Strategy {
        self.strategy.unwrap_or_default()
    }
}

/// A synthesized page-object class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedClass {
    pub source_text: String,
    pub class_name: String,
    pub package_name: String,
}
