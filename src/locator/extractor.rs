use crate::hierarchy::hierarchy_model::HierarchyNode;
use crate::hierarchy::parser::parse_hierarchy;
use crate::locator::locator_model::{LocatorRecord, Platform};
use crate::pom::error::GenerationError;
use crate::pom::pom_model::Mode;

/// Android attributes in precedence order: ids are more stable than descriptions.
pub const ANDROID_ATTRIBUTES: [&str; 2] = ["resource-id", "content-desc"];

/// iOS attributes in precedence order.
pub const IOS_ATTRIBUTES: [&str; 2] = ["accessibilityLabel", "name"];

pub fn platform_attributes(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Android => &ANDROID_ATTRIBUTES,
        Platform::Ios => &IOS_ATTRIBUTES,
    }
}

/// First non-blank attribute of the platform's precedence list.
pub fn best_locator(node: &HierarchyNode, platform: Platform) -> Option<&str> {
    platform_attributes(platform)
        .iter()
        .find_map(|attr| node.non_blank_attr(attr))
}

/// Select the locators for a node under the mode's extraction policy.
///
/// The Android branch names the record when it matches; the iOS branch only
/// names it when Android produced nothing. Returns `None` when neither branch
/// applicable to the mode finds an attribute.
pub fn extract_record(node: &HierarchyNode, mode: Mode) -> Option<LocatorRecord> {
    let android = mode
        .includes(Platform::Android)
        .then(|| best_locator(node, Platform::Android))
        .flatten();
    let ios = mode
        .includes(Platform::Ios)
        .then(|| best_locator(node, Platform::Ios))
        .flatten();

    let raw_name = android.or(ios)?;

    Some(LocatorRecord {
        raw_name: raw_name.to_string(),
        android_locator: android.map(str::to_string),
        ios_locator: ios.map(str::to_string),
    })
}

/// Extract records for every qualifying node, preserving document order.
pub fn extract_records(nodes: &[HierarchyNode], mode: Mode) -> Vec<LocatorRecord> {
    nodes
        .iter()
        .filter_map(|node| extract_record(node, mode))
        .collect()
}

/// Parse a hierarchy dump and extract its locator records in one step.
pub fn extract_from_xml(xml: &str, mode: Mode) -> Result<Vec<LocatorRecord>, GenerationError> {
    let nodes = parse_hierarchy(xml)?;
    Ok(extract_records(&nodes, mode))
}
