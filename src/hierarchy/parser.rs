use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::hierarchy::hierarchy_model::{HierarchyNode, NODE_TAG};
use crate::pom::error::GenerationError;

// ============================================================================
// Hierarchy parsing (UIAutomator / XCUITest page-source dumps)
// ============================================================================

/// Parse raw bytes of a hierarchy dump. The bytes must be UTF-8.
pub fn parse_hierarchy_bytes(bytes: &[u8]) -> Result<Vec<HierarchyNode>, GenerationError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        GenerationError::malformed(e.valid_up_to(), format!("invalid UTF-8: {}", e))
    })?;
    parse_hierarchy(text)
}

/// Parse a hierarchy dump into its `node` elements, in document order.
///
/// Elements with any other tag are walked through but not collected. The
/// whole document must be well-formed: exactly one root element, every
/// element closed, matching end tags.
pub fn parse_hierarchy(xml: &str) -> Result<Vec<HierarchyNode>, GenerationError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut nodes = Vec::new();
    // One entry per open element: true when that element is a `node`.
    let mut open: Vec<bool> = Vec::new();
    let mut root_closed = false;

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                check_root(position, open.is_empty(), root_closed)?;
                let is_node = e.name().as_ref() == NODE_TAG.as_bytes();
                if is_node {
                    nodes.push(read_node(position, e, node_depth(&open))?);
                }
                open.push(is_node);
            }
            Ok(Event::Empty(ref e)) => {
                check_root(position, open.is_empty(), root_closed)?;
                if e.name().as_ref() == NODE_TAG.as_bytes() {
                    nodes.push(read_node(position, e, node_depth(&open))?);
                }
                if open.is_empty() {
                    root_closed = true;
                }
            }
            Ok(Event::End(_)) => {
                if open.pop().is_none() {
                    return Err(GenerationError::malformed(position, "closing tag without matching opening tag"));
                }
                if open.is_empty() {
                    root_closed = true;
                }
            }
            Ok(Event::Text(ref t)) if open.is_empty() => {
                if !t.iter().all(u8::is_ascii_whitespace) {
                    return Err(GenerationError::malformed(position, "text outside the root element"));
                }
            }
            Ok(Event::CData(_)) if open.is_empty() => {
                return Err(GenerationError::malformed(position, "CDATA outside the root element"));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(GenerationError::malformed(reader.buffer_position(), e.to_string()));
            }
            _ => {}
        }
    }

    if !open.is_empty() {
        return Err(GenerationError::malformed(
            reader.buffer_position(),
            format!("{} unterminated element(s) at end of input", open.len()),
        ));
    }
    if !root_closed {
        return Err(GenerationError::malformed(reader.buffer_position(), "no root element"));
    }

    Ok(nodes)
}

fn check_root(position: usize, at_top_level: bool, root_closed: bool) -> Result<(), GenerationError> {
    if at_top_level && root_closed {
        return Err(GenerationError::malformed(position, "more than one root element"));
    }
    Ok(())
}

fn node_depth(open: &[bool]) -> usize {
    open.iter().filter(|is_node| **is_node).count()
}

fn read_node(position: usize, e: &BytesStart, depth: usize) -> Result<HierarchyNode, GenerationError> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| GenerationError::malformed(position, err.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| GenerationError::malformed(position, format!("invalid attribute name: {}", err)))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| GenerationError::malformed(position, format!("attribute '{}': {}", key, err)))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(HierarchyNode::new(attributes, depth))
}
