use std::collections::HashSet;

// ============================================================================
// Identifier normalization
// ============================================================================

/// Turn a raw attribute value into a camel-case identifier.
///
/// Runs of characters outside `[A-Za-z0-9]` become word boundaries. Only the
/// first character of each word changes case; the rest is kept as-is, so
/// `com.app:id/loginBtn` becomes `comAppIdLoginBtn`. Returns an empty string
/// when the input has no alphanumeric characters.
pub fn normalize(raw: &str, capitalize_first: bool) -> String {
    let mut out = String::with_capacity(raw.len());

    let words = raw
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty());

    for (i, word) in words.enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 && !capitalize_first {
                out.push(first.to_ascii_lowercase());
            } else {
                out.push(first.to_ascii_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }

    out
}

/// Field name and method label derived from the same raw name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifiers {
    /// lowerCamel, used for fields
    pub field: String,
    /// UpperCamel, used as a method-name suffix (`click<Label>`)
    pub label: String,
}

pub fn identifiers(raw: &str) -> Identifiers {
    Identifiers {
        field: normalize(raw, false),
        label: normalize(raw, true),
    }
}

// ============================================================================
// Per-class identifier allocation
// ============================================================================

const JAVA_RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

/// Hands out valid, unique Java identifiers for one generated class.
#[derive(Debug, Default)]
pub struct IdentifierAllocator {
    used: HashSet<String>,
    members: Vec<String>,
}

impl IdentifierAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a member the class declares itself; a record normalizing to
    /// it gets the `Element` suffix.
    pub fn reserving(mut self, member: &str) -> Self {
        self.members.push(member.to_string());
        self.used.insert(member.to_string());
        self
    }

    /// Allocate identifiers for a raw name, or `None` when it normalizes to nothing.
    ///
    /// Leading digits get an `element` prefix, reserved words and reserved
    /// members an `Element` suffix, and repeats a numeric suffix from 2.
    pub fn allocate(&mut self, raw: &str) -> Option<Identifiers> {
        let Identifiers { mut field, mut label } = identifiers(raw);
        if field.is_empty() {
            return None;
        }

        if field.starts_with(|c: char| c.is_ascii_digit()) {
            field = format!("element{}", field);
            label = format!("Element{}", label);
        }
        if JAVA_RESERVED.contains(&field.as_str()) || self.members.iter().any(|m| *m == field) {
            field.push_str("Element");
            label.push_str("Element");
        }

        if self.used.insert(field.clone()) {
            return Some(Identifiers { field, label });
        }

        let mut n = 2;
        loop {
            let candidate = format!("{}{}", field, n);
            if self.used.insert(candidate.clone()) {
                return Some(Identifiers {
                    field: candidate,
                    label: format!("{}{}", label, n),
                });
            }
            n += 1;
        }
    }
}

// ============================================================================
// Java literals
// ============================================================================

/// Quote a value as a Java string literal.
///
/// Control characters use octal escapes: `\uXXXX` escapes are translated
/// before lexing in Java and would break the literal.
pub fn java_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
