use tracing::debug;

use crate::locator::locator_model::LocatorRecord;
use crate::model::ai_model::TextInference;
use crate::model::code_fence::extract_code;
use crate::model::error::ModelError;
use crate::pom::error::GenerationError;
use crate::pom::pom_model::{ClassSpec, GeneratedClass, Mode};
use crate::pom::synthesizer::ClassSynthesizer;

/// Locator names listed in a prompt, to bound its size.
pub const MAX_PROMPT_LOCATORS: usize = 25;

/// Page object written by a generative model from the extracted locator names.
pub struct ModelAssistedSynthesizer<'a> {
    backend: &'a dyn TextInference,
    mode: Mode,
}

impl<'a> ModelAssistedSynthesizer<'a> {
    pub fn new(backend: &'a dyn TextInference, mode: Mode) -> Self {
        Self { backend, mode }
    }

    fn style_instructions(mode: Mode) -> &'static str {
        match mode {
            Mode::Android => {
                "Declare one WebElement field per element annotated with @AndroidFindBy(id = ...), initialised through PageFactory with AppiumFieldDecorator."
            }
            Mode::Ios => {
                "Declare one WebElement field per element annotated with @iOSXCUITFindBy(accessibility = ...), initialised through PageFactory with AppiumFieldDecorator."
            }
            Mode::CrossPlatform => {
                "Declare one WebElement field per element carrying both @AndroidFindBy and @iOSXCUITFindBy annotations where available."
            }
            Mode::DynamicRuntime => {
                "Declare no element fields; add a By getter per element that checks driver.getPlatformName() at run time and returns the matching MobileBy locator."
            }
        }
    }

    /// Prompt naming the target style, class shape and the first
    /// `MAX_PROMPT_LOCATORS` raw locator names in record order.
    pub fn build_prompt(mode: Mode, spec: &ClassSpec, records: &[LocatorRecord]) -> String {
        let mut prompt = format!(
            "Generate a Java Appium POM class for {} using {} mode.\n",
            mode.platform_label(),
            mode
        );
        prompt.push_str(&format!("Class name: {}\n", spec.class_name));
        prompt.push_str(&format!("Package: {}\n", spec.package_name));
        if let Some(base) = spec.base_class() {
            prompt.push_str(&format!("Extend base class: {}\n", base));
        }

        prompt.push_str("Structure: package clause, imports, class declaration, a constructor taking AppiumDriver driver, one member per element in the listed order, closing brace.\n");
        prompt.push_str(Self::style_instructions(mode));
        prompt.push('\n');

        prompt.push_str("Include:\n");
        prompt.push_str("- Basic actions like click, sendKeys\n");
        prompt.push_str("- Assertions like isVisible, isEnabled\n");
        prompt.push_str("- Waits using WebDriverWait\n");
        prompt.push_str("- Compound methods like login(username, password)\n");
        prompt.push_str("- Validations like isLoginButtonVisible() and toast error detection\n");

        prompt.push_str("Fields:\n");
        for record in records.iter().take(MAX_PROMPT_LOCATORS) {
            prompt.push_str(&format!("- {}\n", record.raw_name));
        }

        prompt.push_str("\nOutput only full Java code inside a code block like ```java ...```.");
        prompt
    }
}

impl ClassSynthesizer for ModelAssistedSynthesizer<'_> {
    fn style(&self) -> &'static str {
        "model-assisted"
    }

    fn synthesize(
        &self,
        records: &[LocatorRecord],
        spec: &ClassSpec,
    ) -> Result<GeneratedClass, GenerationError> {
        if records.is_empty() {
            return Err(GenerationError::NoLocatorsFound);
        }

        let prompt = Self::build_prompt(self.mode, spec, records);
        debug!(mode = %self.mode, locators = records.len(), "prompting model for page object");

        let response = self.backend.infer_text(&prompt)?;
        let code = extract_code(&response).into_code()?;

        if !code.starts_with(&format!("package {};", spec.package_name)) {
            return Err(ModelError::UnexpectedResponse(format!(
                "answer does not start with package {}",
                spec.package_name
            ))
            .into());
        }
        if !declares_class(&code, &spec.class_name) {
            return Err(ModelError::UnexpectedResponse(format!(
                "answer does not declare class {}",
                spec.class_name
            ))
            .into());
        }

        Ok(GeneratedClass {
            source_text: code,
            class_name: spec.class_name.clone(),
            package_name: spec.package_name.clone(),
        })
    }
}

/// Whether `code` contains `class <class_name>` with the name standing alone,
/// so `LoginPage` does not match `class LoginPageTest`.
pub fn declares_class(code: &str, class_name: &str) -> bool {
    let needle = format!("class {}", class_name);
    code.match_indices(&needle).any(|(idx, _)| {
        let before = code[..idx].chars().next_back();
        let after = code[idx + needle.len()..].chars().next();
        !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char)
    })
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
