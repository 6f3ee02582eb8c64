#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use pom_synth::model::ai_model::TextInference;
use pom_synth::model::error::ModelError;
use pom_synth::pom::pom_model::ClassSpec;

/// Login screen as an Appium page-source dump: a blank container, three
/// inputs/buttons with both platform attributes, an Android-only toast, and
/// a decorative node with no identifying attributes.
pub const LOGIN_SCREEN: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<hierarchy rotation="0">
  <node index="0" class="android.widget.FrameLayout" resource-id="" content-desc="">
    <node index="0" class="android.widget.EditText" resource-id="username" accessibilityLabel="username"/>
    <node index="1" class="android.widget.EditText" resource-id="password" accessibilityLabel="password"/>
    <node index="2" class="android.widget.Button" resource-id="loginBtn" accessibilityLabel="Login"/>
    <node index="3" class="android.widget.TextView" content-desc="error toast"/>
    <node index="4" class="android.widget.TextView" text="Welcome back"/>
  </node>
</hierarchy>"#;

pub const EMPTY_SCREEN: &str = "<hierarchy></hierarchy>";

/// Build a `<node .../>` element from attribute pairs.
pub fn node(attrs: &[(&str, &str)]) -> String {
    let attrs = attrs
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v))
        .collect::<Vec<_>>()
        .join(" ");
    format!("<node {}/>", attrs)
}

/// Wrap nodes in a `hierarchy` root.
pub fn hierarchy(nodes: &[String]) -> String {
    format!("<hierarchy>{}</hierarchy>", nodes.concat())
}

pub fn login_page() -> ClassSpec {
    ClassSpec::new("LoginPage", "com.example.pages")
}

/// Answers with a fixed result and records every prompt it receives.
pub struct RecordingInference {
    pub answer: Result<String, String>,
    pub prompts: RefCell<Vec<String>>,
}

impl RecordingInference {
    pub fn answering(text: &str) -> Self {
        Self {
            answer: Ok(text.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            answer: Err(reason.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }
}

impl TextInference for RecordingInference {
    fn infer_text(&self, prompt: &str) -> Result<String, ModelError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        match &self.answer {
            Ok(text) => Ok(text.clone()),
            Err(reason) => Err(ModelError::Unavailable(reason.clone())),
        }
    }
}

/// Lets a test keep a handle on a `RecordingInference` after handing it to a generator.
pub struct SharedInference(pub Rc<RecordingInference>);

impl TextInference for SharedInference {
    fn infer_text(&self, prompt: &str) -> Result<String, ModelError> {
        self.0.infer_text(prompt)
    }
}
