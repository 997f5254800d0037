/*
 * path.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Default path template renderer.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::TemplateRenderer;
use crate::error::{TemplateError, TemplateResult};

/// Matches `$$`, `${name}` and `$name$`, where a name is a dotted path of
/// identifiers that may contain hyphens.
static VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\$|\$\{([A-Za-z_][A-Za-z0-9_.\-]*)\}|\$([A-Za-z_][A-Za-z0-9_.\-]*)\$").unwrap()
});

/// Doctemplate-style interpolation for file paths.
///
/// Missing variables render as the empty string, so rendering with no data
/// yields the path with every placeholder removed. A template without
/// placeholders is returned unchanged whatever the data.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathTemplate;

impl TemplateRenderer for PathTemplate {
    fn render(&self, template: &str, data: &Map<String, Value>) -> TemplateResult<String> {
        let mut out = String::with_capacity(template.len());
        let mut last = 0;

        for caps in VARIABLE.captures_iter(template) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            push_literal(&mut out, template, last, whole.start())?;
            last = whole.end();

            match variable_name(&caps) {
                Some(name) => {
                    if let Some(value) = lookup(data, name) {
                        out.push_str(&render_value(value));
                    }
                }
                None => out.push('$'),
            }
        }

        push_literal(&mut out, template, last, template.len())?;
        Ok(out)
    }
}

fn variable_name<'t>(caps: &Captures<'t>) -> Option<&'t str> {
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

/// Copy literal text, rejecting any `$` the variable pattern did not consume.
fn push_literal(out: &mut String, template: &str, start: usize, end: usize) -> TemplateResult<()> {
    let literal = &template[start..end];
    if let Some(offset) = literal.find('$') {
        return Err(TemplateError::Unterminated {
            template: template.to_string(),
            position: start + offset,
        });
    }
    out.push_str(literal);
    Ok(())
}

fn lookup<'a>(data: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    let mut parts = name.split('.');
    let mut current = data.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Render a value for interpolation.
///
/// - String: returned as-is
/// - Number: JSON form
/// - Bool: "true" or "" (empty for false)
/// - List: concatenation of rendered elements
/// - Map: "true"
/// - Null: ""
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        Value::Array(items) => items.iter().map(render_value).collect(),
        Value::Object(_) => "true".to_string(),
    }
}
