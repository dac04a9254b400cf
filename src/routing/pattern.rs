//! Route pattern parsing, matching and rendering.
//!
//! A pattern is a `/`-separated list of segments:
//!
//! | Pattern token | Kind | Path form |
//! |---------------|------|-----------|
//! | `configs`     | literal | `configs` |
//! | `:id`         | required positional | `42` |
//! | `:id?`        | optional positional | `42` or absent |
//! | `name:?`      | optional named | `name:EUR*` or absent |
//! | `new:`        | required flag | `new:` (any value accepted) |
//!
//! Consecutive named segments may appear in the path in any order. A positional
//! segment never matches a `key:value` segment, which is what lets
//! `configs/deleted:` and `configs/42` live side by side.

use crate::domain::error::{ConfviewError, Result};
use crate::domain::RouteArgs;
use std::fmt;
use std::str::FromStr;

/// One segment of a compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Positional { key: String, optional: bool },
    Named { key: String, optional: bool },
}

/// A compiled route pattern.
///
/// # Examples
///
/// ```
/// use confview::routing::RoutePattern;
///
/// let pattern: RoutePattern = "/configs/:id/name:?/type:?".parse()?;
/// let args = pattern.match_path("configs/42/type:ViewDefinition").unwrap();
/// assert_eq!(args.id(), Some("42"));
/// assert_eq!(args.kind(), Some("ViewDefinition"));
/// # Ok::<(), confview::ConfviewError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compiles a pattern string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfviewError::Config`] for empty patterns or malformed tokens
    /// (a bare `:` or a named token without a key).
    pub fn parse(source: &str) -> Result<Self> {
        let segments = source
            .split('/')
            .filter(|token| !token.is_empty())
            .map(|token| parse_token(source, token))
            .collect::<Result<Vec<_>>>()?;

        if segments.is_empty() {
            return Err(ConfviewError::Config(format!("empty route pattern: '{source}'")));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Matches a route string against this pattern.
    ///
    /// Returns the parsed arguments, or `None` if the path does not
    /// structurally fit. A leading `/` on the path is ignored.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteArgs> {
        let parts: Vec<&str> = split_path(path).collect();
        let mut args = RouteArgs::new();
        let mut i = 0;
        let mut j = 0;

        while j < self.segments.len() {
            match &self.segments[j] {
                Segment::Literal(literal) => {
                    if parts.get(i).map(|part| decode(part)) != Some(literal.clone()) {
                        return None;
                    }
                    i += 1;
                }
                Segment::Positional { key, optional } => match parts.get(i) {
                    Some(part) if split_named(part).is_none() => {
                        args.insert(key.as_str(), decode(part));
                        i += 1;
                    }
                    _ if *optional => {}
                    _ => return None,
                },
                Segment::Named { .. } => {
                    let run_end = self.segments[j..]
                        .iter()
                        .position(|segment| !matches!(segment, Segment::Named { .. }))
                        .map_or(self.segments.len(), |offset| j + offset);
                    let run = &self.segments[j..run_end];

                    while let Some((key, value)) = parts.get(i).and_then(|part| split_named(part)) {
                        let declared = run
                            .iter()
                            .any(|segment| matches!(segment, Segment::Named { key: k, .. } if k == key));
                        if !declared || args.contains(key) {
                            break;
                        }
                        args.insert(key, decode(value));
                        i += 1;
                    }

                    let satisfied = run.iter().all(|segment| match segment {
                        Segment::Named { key, optional } => *optional || args.contains(key),
                        _ => true,
                    });
                    if !satisfied {
                        return None;
                    }

                    j = run_end;
                    continue;
                }
            }
            j += 1;
        }

        (i == parts.len()).then_some(args)
    }

    /// Renders a route string from arguments.
    ///
    /// Arguments the pattern does not name are dropped. Flags render as a bare
    /// `key:` whatever their value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfviewError::MissingArgument`] when a required positional
    /// segment or a required flag is absent from `args`.
    pub fn render(&self, rule: &str, args: &RouteArgs) -> Result<String> {
        let mut parts = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => parts.push(encode(literal)),
                Segment::Positional { key, optional } => {
                    match args.get(key).filter(|value| !value.is_empty()) {
                        Some(value) => parts.push(encode(value)),
                        None if *optional => {}
                        None => return Err(missing(rule, key)),
                    }
                }
                Segment::Named { key, optional } => match (args.get(key), *optional) {
                    (Some(value), true) => parts.push(format!("{key}:{}", encode(value))),
                    (Some(_), false) => parts.push(format!("{key}:")),
                    (None, true) => {}
                    (None, false) => return Err(missing(rule, key)),
                },
            }
        }

        Ok(parts.join("/"))
    }
}

impl FromStr for RoutePattern {
    type Err = ConfviewError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_token(source: &str, token: &str) -> Result<Segment> {
    let malformed = || ConfviewError::Config(format!("malformed token '{token}' in route pattern '{source}'"));

    if let Some(rest) = token.strip_prefix(':') {
        let (key, optional) = rest
            .strip_suffix('?')
            .map_or((rest, false), |key| (key, true));
        if key.is_empty() {
            return Err(malformed());
        }
        return Ok(Segment::Positional {
            key: key.to_string(),
            optional,
        });
    }

    if let Some((key, rest)) = token.split_once(':') {
        if !is_key(key) || !(rest.is_empty() || rest == "?") {
            return Err(malformed());
        }
        return Ok(Segment::Named {
            key: key.to_string(),
            optional: rest == "?",
        });
    }

    Ok(Segment::Literal(token.to_string()))
}

fn missing(rule: &str, key: &str) -> ConfviewError {
    ConfviewError::MissingArgument {
        rule: rule.to_string(),
        key: key.to_string(),
    }
}

fn is_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.trim_start_matches('#')
        .split('/')
        .filter(|part| !part.is_empty())
}

/// Splits a `key:value` path segment. Segments whose prefix is not a
/// lowercase key are positional values.
fn split_named(part: &str) -> Option<(&str, &str)> {
    part.split_once(':').filter(|(key, _)| is_key(key))
}

/// Escapes the characters that would break segment splitting.
#[must_use]
pub fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2F"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverses [`encode`]. Unknown escapes pass through untouched.
#[must_use]
pub fn decode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let escape = rest.get(pos..pos + 3);
        match escape {
            Some("%25") => out.push('%'),
            Some("%2F" | "%2f") => out.push('/'),
            _ => {
                out.push('%');
                rest = &rest[pos + 1..];
                continue;
            }
        }
        rest = &rest[pos + 3..];
    }
    out.push_str(rest);
    out
}
