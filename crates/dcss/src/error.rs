//! Error types for style sheet compilation.
//!
//! Neither error aborts compilation. A [`ParseError`] drops one declaration,
//! a [`SelectorError`] drops one rule. Both are kept on the compiled sheet
//! as [`Diagnostic`]s so hosts can show them in a style editor.

use std::fmt;

use thiserror::Error;

/// A declaration that could not be turned into a typed value.
///
/// # Examples
///
/// ```rust
/// use dcss::declarations::parse_declaration;
/// use dcss::ParseError;
///
/// let err = parse_declaration("colour", "red").unwrap_err();
/// assert_eq!(err, ParseError::UnknownProperty("colour".to_string()));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The property name is not part of the vocabulary.
    #[error("unknown property: {0}")]
    UnknownProperty(String),

    /// The value lies outside the property's domain.
    #[error("invalid value for {property}: {value:?} ({reason})")]
    InvalidValue {
        property: String,
        value: String,
        reason: String,
    },

    /// A declaration without a `name: value` separator.
    #[error("expected `name: value`, found {0:?}")]
    MissingColon(String),
}

impl ParseError {
    pub(crate) fn invalid(property: &str, value: &str, reason: impl Into<String>) -> Self {
        ParseError::InvalidValue {
            property: property.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// A rule that was excluded from the compiled sheet.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectorError {
    /// The selector text does not follow the selector grammar.
    #[error("invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },

    /// At-rules (`@media`, `@import`, ...) are not supported.
    #[error("unsupported at-rule: {0}")]
    UnsupportedAtRule(String),

    /// Text at the top level that is not followed by a `{ ... }` block.
    #[error("expected a declaration block after {0:?}")]
    MissingBlock(String),
}

/// Something the compiler dropped, tagged with the source order it occupied.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A whole rule was excluded.
    Rule { order: usize, error: SelectorError },
    /// A single declaration inside a rule was excluded.
    Declaration { order: usize, error: ParseError },
}

impl Diagnostic {
    /// The source order of the rule this diagnostic belongs to.
    pub fn order(&self) -> usize {
        match self {
            Diagnostic::Rule { order, .. } | Diagnostic::Declaration { order, .. } => *order,
        }
    }

    pub fn is_rule_error(&self) -> bool {
        matches!(self, Diagnostic::Rule { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Rule { order, error } => write!(f, "rule #{order}: {error}"),
            Diagnostic::Declaration { order, error } => write!(f, "rule #{order}: {error}"),
        }
    }
}
