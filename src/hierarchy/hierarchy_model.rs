use serde::Serialize;

/// Tag name of the elements collected from a UI dump.
pub const NODE_TAG: &str = "node";

/// One `node` element from a UI hierarchy dump.
///
/// Attributes keep their document order. `depth` counts the enclosing
/// `node` elements, so a top-level node has depth 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HierarchyNode {
    pub attributes: Vec<(String, String)>,
    pub depth: usize,
}

impl HierarchyNode {
    pub fn new(attributes: Vec<(String, String)>, depth: usize) -> Self {
        Self { attributes, depth }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attribute value, treating empty or whitespace-only values as absent.
    pub fn non_blank_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|v| !v.trim().is_empty())
    }
}
