use std::collections::HashSet;

use crate::pom::pom_model::{ClassSpec, GeneratedClass};

const INDENT: &str = "\t";

/// Member declared by `keep_driver()`.
pub const DRIVER_FIELD: &str = "driver";

/// Assembles a page-object class: package clause, imports, declaration,
/// constructor, then members in insertion order.
///
/// Members are blocks of lines without indentation; the writer indents them
/// one level and separates them with a blank line.
pub struct JavaClassWriter<'a> {
    spec: &'a ClassSpec,
    imports: &'static [&'static str],
    keeps_driver: bool,
    constructor_body: Vec<String>,
    members: Vec<Vec<String>>,
    method_names: HashSet<String>,
}

impl<'a> JavaClassWriter<'a> {
    pub fn new(spec: &'a ClassSpec, imports: &'static [&'static str]) -> Self {
        Self {
            spec,
            imports,
            keeps_driver: false,
            constructor_body: Vec::new(),
            members: Vec::new(),
            method_names: HashSet::new(),
        }
    }

    /// Declare `private AppiumDriver driver;` and assign it in the constructor.
    pub fn keep_driver(mut self) -> Self {
        self.keeps_driver = true;
        self
    }

    /// Wire annotated fields through the page-factory decorator.
    pub fn init_page_factory(mut self) -> Self {
        self.constructor_body
            .push("PageFactory.initElements(new AppiumFieldDecorator(driver), this);".to_string());
        self
    }

    pub fn add_field(&mut self, lines: Vec<String>) {
        self.members.push(lines);
    }

    /// Add a method unless one with the same name was already added.
    /// Returns whether the method was added.
    pub fn add_method(&mut self, name: &str, lines: Vec<String>) -> bool {
        if !self.method_names.insert(name.to_string()) {
            return false;
        }
        self.members.push(lines);
        true
    }

    pub fn finish(self) -> GeneratedClass {
        let class_name = &self.spec.class_name;
        let mut out = String::new();

        out.push_str(&format!("package {};\n\n", self.spec.package_name));
        for import in self.imports {
            out.push_str(&format!("import {};\n", import));
        }
        if !self.imports.is_empty() {
            out.push('\n');
        }

        out.push_str(&format!("public class {}", class_name));
        if let Some(base) = self.spec.base_class() {
            out.push_str(&format!(" extends {}", base));
        }
        out.push_str(" {\n\n");

        if self.keeps_driver {
            out.push_str(&format!("{}private AppiumDriver {};\n\n", INDENT, DRIVER_FIELD));
        }

        out.push_str(&format!("{}public {}(AppiumDriver driver) {{\n", INDENT, class_name));
        if self.keeps_driver {
            out.push_str(&format!("{0}{0}this.{1} = driver;\n", INDENT, DRIVER_FIELD));
        }
        for line in &self.constructor_body {
            out.push_str(&format!("{0}{0}{1}\n", INDENT, line));
        }
        out.push_str(&format!("{}}}\n", INDENT));

        for member in &self.members {
            out.push('\n');
            for line in member {
                if line.is_empty() {
                    out.push('\n');
                } else {
                    out.push_str(&format!("{}{}\n", INDENT, line));
                }
            }
        }

        out.push_str("}\n");

        GeneratedClass {
            source_text: out,
            class_name: self.spec.class_name.clone(),
            package_name: self.spec.package_name.clone(),
        }
    }
}

/// Build a method block: signature line, indented body lines, closing brace.
pub fn method(signature: &str, body: &[String]) -> Vec<String> {
    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(format!("{} {{", signature));
    for line in body {
        lines.push(format!("{}{}", INDENT, line));
    }
    lines.push("}".to_string());
    lines
}
