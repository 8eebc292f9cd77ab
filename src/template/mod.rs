//! Template rendering with literal placeholder substitution.
//!
//! One scanner serves both placeholder dialects found across the template
//! set, selected per artifact rather than hardcoded:
//!
//! - `PlaceholderStyle::Dollar` - `${name}` placeholders; `$$` renders a
//!   literal `$`, so `$${name}` renders a literal `${name}`.
//! - `PlaceholderStyle::Braces` - legacy `{name}` placeholders; `{{` and
//!   `}}` render literal braces.
//!
//! Lookup consults the effective property map first, then the environment
//! fallback. Substitution is textual and non-recursive: a substituted value
//! is never re-scanned, so values containing placeholder syntax pass through
//! verbatim. Undefined placeholders are an error rather than a silent empty
//! substitution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Placeholder delimiter dialect for a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// `${name}` placeholders.
    #[default]
    Dollar,
    /// Legacy bare-brace `{name}` placeholders.
    Braces,
}

/// Error type for template rendering failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder was referenced but has no resolvable value.
    #[error("undefined placeholder '{name}' at position {position} in template")]
    UndefinedVariable {
        /// The unresolved placeholder identifier.
        name: String,
        /// Byte offset of the placeholder's opening delimiter.
        position: usize,
    },

    /// An opening delimiter was never closed.
    #[error("unterminated placeholder at position {position} in template")]
    Unterminated {
        /// Byte offset of the opening delimiter.
        position: usize,
    },

    /// A placeholder with an empty identifier.
    #[error("empty placeholder name at position {position} in template")]
    EmptyName {
        /// Byte offset of the opening delimiter.
        position: usize,
    },
}

/// Render a template by substituting placeholders with resolved values.
///
/// `values` is the effective property map; `env_fallback` is consulted for
/// identifiers absent from `values`. Rendering the same inputs twice yields
/// byte-identical output.
pub fn render(
    template: &str,
    style: PlaceholderStyle,
    values: &HashMap<String, String>,
    env_fallback: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let resolve = |name: &str| {
        values
            .get(name)
            .or_else(|| env_fallback.get(name))
            .map(String::as_str)
    };

    match style {
        PlaceholderStyle::Dollar => render_dollar(template, &resolve),
        PlaceholderStyle::Braces => render_braces(template, &resolve),
    }
}

fn render_dollar<'a>(
    template: &str,
    resolve: &impl Fn(&str) -> Option<&'a str>,
) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            // $$ escapes to a literal $
            Some((_, '$')) => {
                chars.next();
                result.push('$');
            }
            Some((_, '{')) => {
                chars.next();
                let name = read_until_close(&mut chars, pos)?;
                substitute(&name, pos, resolve, &mut result)?;
            }
            // A lone $ is just a regular character
            _ => result.push('$'),
        }
    }

    Ok(result)
}

fn render_braces<'a>(
    template: &str,
    resolve: &impl Fn(&str) -> Option<&'a str>,
) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                // {{ escapes to a literal {
                if let Some((_, '{')) = chars.peek() {
                    chars.next();
                    result.push('{');
                } else {
                    let name = read_until_close(&mut chars, pos)?;
                    substitute(&name, pos, resolve, &mut result)?;
                }
            }
            '}' => {
                // }} escapes to a literal }; a lone } passes through
                if let Some((_, '}')) = chars.peek() {
                    chars.next();
                }
                result.push('}');
            }
            _ => result.push(ch),
        }
    }

    Ok(result)
}

/// Consume characters up to the closing `}` and return the raw identifier.
fn read_until_close(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    open_pos: usize,
) -> Result<String, TemplateError> {
    let mut name = String::new();
    loop {
        match chars.next() {
            Some((_, '}')) => return Ok(name),
            Some((_, c)) => name.push(c),
            None => return Err(TemplateError::Unterminated { position: open_pos }),
        }
    }
}

/// Resolve one identifier and append its value to the output.
fn substitute<'a>(
    raw_name: &str,
    open_pos: usize,
    resolve: &impl Fn(&str) -> Option<&'a str>,
    result: &mut String,
) -> Result<(), TemplateError> {
    let name = raw_name.trim();
    if name.is_empty() {
        return Err(TemplateError::EmptyName { position: open_pos });
    }

    match resolve(name) {
        Some(value) => {
            result.push_str(value);
            Ok(())
        }
        None => Err(TemplateError::UndefinedVariable {
            name: name.to_string(),
            position: open_pos,
        }),
    }
}
