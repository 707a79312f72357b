// ABOUTME: Named bind parameters and @name-to-positional placeholder expansion
// ABOUTME: Shared by both backends so parameter handling stays uniform
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Async-IO.org

//! # Parameters
//!
//! Statements reference parameters as `@name`; callers supply values in a
//! [`Params`] set keyed by bare name. Before execution the statement is
//! rewritten to the backend's positional placeholders and the values are
//! lined up in placeholder order, so parameter values never touch SQL text.

use std::collections::BTreeMap;

use crate::errors::{GatewayError, Result};
use crate::value::Value;

/// Named, unordered collection of bind values for a parametrized statement
///
/// Names are unique; inserting under an existing name replaces the value.
/// A leading `@` on a supplied name is stripped, so `id` and `@id` address
/// the same slot. Iteration is name-ordered, which keeps generated SQL
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: BTreeMap<String, Value>,
}

impl Params {
    /// An empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` under `name`, replacing any existing binding
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        let name = name.strip_prefix('@').unwrap_or(name);
        self.values.insert(name.to_owned(), value.into());
        self
    }

    /// Value bound under `name`, if any
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        let name = name.strip_prefix('@').unwrap_or(name);
        self.values.get(name)
    }

    /// True when a value is bound under `name`
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Bound names, in name order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate (name, value) pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of bound parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<N: AsRef<str>, V: Into<Value>> FromIterator<(N, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.set(name.as_ref(), value);
        }
        params
    }
}

/// Positional placeholder syntax of a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placeholder {
    /// `SQLite` numbered placeholders: `?1`, `?2`, …
    Question,
    /// `PostgreSQL` numbered placeholders: `$1`, `$2`, …
    Dollar,
}

impl Placeholder {
    const fn sigil(self) -> char {
        match self {
            Self::Question => '?',
            Self::Dollar => '$',
        }
    }
}

/// Rewrite `@name` references into positional placeholders
///
/// Each distinct name gets one index, assigned in order of first occurrence;
/// repeated references reuse the same index. Returns the rewritten statement
/// and the values to bind, in index order. `@` inside single-quoted strings,
/// double-quoted identifiers, `--` line comments, and `/* */` block comments
/// is left untouched, as is `@` not followed by an identifier character
/// (`PostgreSQL` operators like `@>` keep working). Referencing a name with
/// no supplied value fails; supplied-but-unreferenced values are ignored.
pub(crate) fn expand(
    sql: &str,
    params: &Params,
    placeholder: Placeholder,
) -> Result<(String, Vec<Value>)> {
    let mut rewritten = String::with_capacity(sql.len());
    let mut ordered: Vec<(&str, &Value)> = Vec::new();
    let mut chars = sql.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        match ch {
            '\'' | '"' => {
                rewritten.push(ch);
                skip_quoted(&mut chars, &mut rewritten, ch);
            }
            '-' if matches!(chars.peek(), Some((_, '-'))) => {
                rewritten.push(ch);
                skip_line_comment(&mut chars, &mut rewritten);
            }
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                rewritten.push(ch);
                skip_block_comment(&mut chars, &mut rewritten);
            }
            '@' if matches!(chars.peek(), Some((_, c)) if is_ident_char(*c)) => {
                let start = index + ch.len_utf8();
                let mut end = start;
                while let Some((next, c)) = chars.peek().copied() {
                    if is_ident_char(c) {
                        end = next + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let name = &sql[start..end];
                let slot = match ordered.iter().position(|(seen, _)| *seen == name) {
                    Some(slot) => slot,
                    None => {
                        let value = params
                            .get(name)
                            .ok_or_else(|| GatewayError::MissingParameter(name.to_owned()))?;
                        ordered.push((name, value));
                        ordered.len() - 1
                    }
                };
                rewritten.push(placeholder.sigil());
                rewritten.push_str(&(slot + 1).to_string());
            }
            _ => rewritten.push(ch),
        }
    }

    let values = ordered.into_iter().map(|(_, value)| value.clone()).collect();
    Ok((rewritten, values))
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Copy a quoted region verbatim, honoring doubled-quote escapes
fn skip_quoted(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    out: &mut String,
    quote: char,
) {
    while let Some((_, ch)) = chars.next() {
        out.push(ch);
        if ch == quote {
            // '' / "" is an escaped quote, not the end of the region
            if matches!(chars.peek(), Some((_, c)) if *c == quote) {
                let (_, c) = chars.next().unwrap_or_default();
                out.push(c);
            } else {
                break;
            }
        }
    }
}

fn skip_line_comment(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    out: &mut String,
) {
    for (_, ch) in chars.by_ref() {
        out.push(ch);
        if ch == '\n' {
            break;
        }
    }
}

fn skip_block_comment(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    out: &mut String,
) {
    let mut prev = '\0';
    for (_, ch) in chars.by_ref() {
        out.push(ch);
        if prev == '*' && ch == '/' {
            break;
        }
        prev = ch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Params {
        let mut p = Params::new();
        p.set("id", 7).set("name", "ada");
        p
    }

    #[test]
    fn set_strips_leading_sigil() {
        let mut p = Params::new();
        p.set("@id", 1);
        assert_eq!(p.get("id"), Some(&Value::Integer(1)));
        assert_eq!(p.get("@id"), Some(&Value::Integer(1)));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn expands_in_first_occurrence_order() {
        let (sql, values) = expand(
            "SELECT * FROM t WHERE name = @name AND id = @id",
            &params(),
            Placeholder::Question,
        )
        .unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE name = ?1 AND id = ?2");
        assert_eq!(values, vec![Value::Text("ada".into()), Value::Integer(7)]);
    }

    #[test]
    fn repeated_reference_reuses_the_slot() {
        let (sql, values) = expand(
            "SELECT @id, @name, @id",
            &params(),
            Placeholder::Dollar,
        )
        .unwrap();
        assert_eq!(sql, "SELECT $1, $2, $1");
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn string_literals_and_comments_are_opaque() {
        let (sql, values) = expand(
            "SELECT '@id', \"@id\" FROM t -- @id\n WHERE id = @id /* @name */",
            &params(),
            Placeholder::Question,
        )
        .unwrap();
        assert_eq!(
            sql,
            "SELECT '@id', \"@id\" FROM t -- @id\n WHERE id = ?1 /* @name */"
        );
        assert_eq!(values, vec![Value::Integer(7)]);
    }

    #[test]
    fn escaped_quotes_stay_inside_the_literal() {
        let (sql, values) = expand(
            "SELECT 'it''s @id' WHERE id = @id",
            &params(),
            Placeholder::Question,
        )
        .unwrap();
        assert_eq!(sql, "SELECT 'it''s @id' WHERE id = ?1");
        assert_eq!(values, vec![Value::Integer(7)]);
    }

    #[test]
    fn bare_at_passes_through() {
        let (sql, values) = expand("SELECT a @> b", &params(), Placeholder::Dollar).unwrap();
        assert_eq!(sql, "SELECT a @> b");
        assert!(values.is_empty());
    }

    #[test]
    fn missing_parameter_is_an_error() {
        let err = expand("SELECT @absent", &params(), Placeholder::Question).unwrap_err();
        assert!(matches!(err, GatewayError::MissingParameter(name) if name == "absent"));
    }

    #[test]
    fn unreferenced_values_are_ignored() {
        let (sql, values) = expand("SELECT 1", &params(), Placeholder::Question).unwrap();
        assert_eq!(sql, "SELECT 1");
        assert!(values.is_empty());
    }

    #[test]
    fn from_iterator_collects_pairs() {
        let p: Params = [("a", Value::Integer(1)), ("b", Value::Boolean(true))]
            .into_iter()
            .collect();
        assert_eq!(p.len(), 2);
        assert_eq!(p.get("b"), Some(&Value::Boolean(true)));
    }
}
