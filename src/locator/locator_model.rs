use serde::{Deserialize, Serialize};

/// Mobile platform whose attributes a locator comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Android,
    Ios,
}

/// Identifying attributes selected for one hierarchy node.
///
/// At least one of the locators is always present; `raw_name` is the value
/// that won the precedence order and seeds the generated identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorRecord {
    pub raw_name: String,
    pub android_locator: Option<String>,
    pub ios_locator: Option<String>,
}

impl LocatorRecord {
    pub fn locator_for(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::Android => self.android_locator.as_deref(),
            Platform::Ios => self.ios_locator.as_deref(),
        }
    }
}
