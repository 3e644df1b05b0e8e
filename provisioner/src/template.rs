//! `${TOKEN}` placeholder substitution
//!
//! Templates are scanned once, left to right. A placeholder is `${NAME}` where
//! `NAME` is `[A-Za-z_][A-Za-z0-9_]*`; anything else that starts with `${` is
//! copied through untouched. Substituted values are never re-scanned, so a
//! value containing `${...}` cannot trigger a second substitution.

use std::collections::HashMap;

use crate::errors::ProvisionError;

/// What to do with a placeholder that has no value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    /// Fail, naming every unresolved placeholder
    Reject,
    /// Copy the placeholder through unchanged
    Keep,
}

/// Placeholder values keyed by token name
#[derive(Debug, Clone, Default)]
pub struct TemplateValues {
    values: HashMap<String, String>,
}

impl TemplateValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A placeholder found in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placeholder<'a> {
    /// Byte offset of `$`
    start: usize,
    /// Byte offset one past `}`
    end: usize,
    name: &'a str,
}

/// Find the next placeholder at or after `from`
fn next_placeholder(template: &str, from: usize) -> Option<Placeholder<'_>> {
    let mut cursor = from;
    while let Some(offset) = template[cursor..].find("${") {
        let start = cursor + offset;
        let body_start = start + 2;
        if let Some(len) = template[body_start..].find('}') {
            let name = &template[body_start..body_start + len];
            if is_identifier(name) {
                return Some(Placeholder {
                    start,
                    end: body_start + len + 1,
                    name,
                });
            }
        }
        cursor = body_start;
    }
    None
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Names of all placeholders in `template`, in order of first appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    let mut cursor = 0;
    while let Some(placeholder) = next_placeholder(template, cursor) {
        if !names.contains(&placeholder.name) {
            names.push(placeholder.name);
        }
        cursor = placeholder.end;
    }
    names
}

/// Render `template` with `values`
pub fn render(
    template: &str,
    values: &TemplateValues,
    unresolved: Unresolved,
) -> Result<String, ProvisionError> {
    let mut output = String::with_capacity(template.len());
    let mut missing: Vec<String> = Vec::new();
    let mut cursor = 0;

    while let Some(placeholder) = next_placeholder(template, cursor) {
        output.push_str(&template[cursor..placeholder.start]);
        match values.get(placeholder.name) {
            Some(value) => output.push_str(value),
            None => {
                if !missing.iter().any(|name| name == placeholder.name) {
                    missing.push(placeholder.name.to_string());
                }
                output.push_str(&template[placeholder.start..placeholder.end]);
            }
        }
        cursor = placeholder.end;
    }
    output.push_str(&template[cursor..]);

    if unresolved == Unresolved::Reject && !missing.is_empty() {
        return Err(ProvisionError::UnresolvedPlaceholders(missing));
    }
    Ok(output)
}
