//! Style sheet compilation.
//!
//! This module turns style sheet text into [`CompiledRule`]s:
//!
//! - [`compile_style_sheet`]: main entry point, never fails
//! - [`strip_comments`]: removes `/* ... */` comments
//! - [`split_rules`]: splits source text into selector/block pairs
//! - [`parse_declarations`]: parses a declaration block through the registry
//!
//! ## Submodules
//!
//! - [`selectors`]: selector parsing (type, state, attribute, combinators)
//! - [`stylesheet`]: selector AST, specificity and compiled rules
//! - [`units`]: number and length parsing
//! - [`values`]: identifiers, quoted strings and `var()` references
//!
//! ## Error recovery
//!
//! A rule whose selector does not parse is dropped and recorded as a
//! [`Diagnostic::Rule`]; a declaration that does not parse is dropped from its
//! rule and recorded as a [`Diagnostic::Declaration`]. Compilation always
//! runs to the end of the input.
//!
//! ## Example
//!
//! ```rust
//! use dcss::parser::compile_style_sheet;
//!
//! let compiled = compile_style_sheet([
//!     "class { font-size: 10 }",
//!     "!!!invalid!!! { color: red }",
//!     "class:selected { font-size: large; colour: red }",
//! ]);
//! assert_eq!(compiled.rules.len(), 2);
//! assert_eq!(compiled.diagnostics.len(), 2);
//! ```

pub mod selectors;
pub mod stylesheet;
pub mod units;
pub mod values;

use std::sync::Arc;

pub use crate::parser::selectors::parse_selector_list;
pub use crate::parser::stylesheet::{
    AttributeOp, Combinator, CompiledRule, ComplexSelector, CompoundSelector, Selector,
    SelectorList, SelectorPart, Specificity,
};

use crate::declarations::parse_declaration;
use crate::error::{Diagnostic, ParseError, SelectorError};
use crate::parser::values::parse_complete;
use crate::types::DeclarationBlock;

/// The output of [`compile_style_sheet`].
#[derive(Debug, Default)]
pub struct CompiledRules {
    /// Rules in source order.
    pub rules: Vec<CompiledRule>,
    /// Everything that was dropped along the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// A top-level rule before parsing: selector text and block text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRule<'a> {
    pub prelude: &'a str,
    /// `None` when the prelude is not followed by a block.
    pub block: Option<&'a str>,
}

/// Compiles one or more style sheet sources into a single ordered rule set.
///
/// Sources are compiled in sequence; later sources win specificity ties.
pub fn compile_style_sheet<'a>(sources: impl IntoIterator<Item = &'a str>) -> CompiledRules {
    let mut compiled = CompiledRules::default();
    let mut order = 0;

    for source in sources {
        let clean = strip_comments(source);
        for raw in split_rules(&clean) {
            order = compile_rule(raw, order, &mut compiled);
        }
    }

    log::debug!(
        "compiled {} rules ({} dropped rules, {} dropped declarations)",
        compiled.rules.len(),
        compiled.diagnostics.iter().filter(|d| d.is_rule_error()).count(),
        compiled.diagnostics.iter().filter(|d| !d.is_rule_error()).count(),
    );
    compiled
}

/// Compiles one raw rule starting at `order`, returning the next free order.
fn compile_rule(raw: RawRule<'_>, order: usize, out: &mut CompiledRules) -> usize {
    let prelude = raw.prelude.trim();

    let selectors = match raw.block {
        _ if prelude.starts_with('@') => Err(SelectorError::UnsupportedAtRule(
            prelude.split_whitespace().next().unwrap_or(prelude).to_string(),
        )),
        None => Err(SelectorError::MissingBlock(prelude.to_string())),
        Some(_) => parse_complete(parse_selector_list, prelude).ok_or_else(|| {
            SelectorError::InvalidSelector {
                selector: prelude.to_string(),
                message: "selector does not parse".to_string(),
            }
        }),
    };

    let selectors = match selectors {
        Ok(list) => list,
        Err(error) => {
            log::warn!("dropping rule #{}: {}", order, error);
            out.diagnostics.push(Diagnostic::Rule { order, error });
            return order + 1;
        }
    };

    let (block, errors) = parse_declarations(raw.block.unwrap_or_default());
    for error in errors {
        log::warn!("dropping declaration in rule #{}: {}", order, error);
        out.diagnostics.push(Diagnostic::Declaration { order, error });
    }

    let block = Arc::new(block);
    let mut next = order;
    for selector in selectors.selectors {
        out.rules
            .push(CompiledRule::new(selector, next, Arc::clone(&block)));
        next += 1;
    }
    next
}

/// Parses the inside of a `{ ... }` block.
///
/// Returns the declarations that parsed, and an error for each one that did
/// not. A trailing `!important` is accepted and ignored.
pub fn parse_declarations(block: &str) -> (DeclarationBlock, Vec<ParseError>) {
    let mut declarations = DeclarationBlock::new();
    let mut errors = Vec::new();

    for item in split_top_level(block, ';') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }

        let Some((name, raw)) = item.split_once(':') else {
            errors.push(ParseError::MissingColon(item.to_string()));
            continue;
        };

        match parse_declaration(name, strip_important(raw)) {
            Ok(declaration) => declarations.insert(declaration),
            Err(error) => errors.push(error),
        }
    }

    (declarations, errors)
}

fn strip_important(raw: &str) -> &str {
    let trimmed = raw.trim_end();
    let cut = trimmed.len().saturating_sub("!important".len());
    match trimmed.get(cut..) {
        Some(tail) if tail.eq_ignore_ascii_case("!important") => &trimmed[..cut],
        _ => trimmed,
    }
}

/// Removes `/* ... */` comments outside of quoted strings.
///
/// An unterminated comment runs to the end of the input.
pub fn strip_comments(source: &str) -> String {
    let mut clean = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            clean.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }

        if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            let mut prev = '\0';
            for inner in chars.by_ref() {
                if prev == '*' && inner == '/' {
                    break;
                }
                prev = inner;
            }
            continue;
        }

        if c == '"' || c == '\'' {
            quote = Some(c);
        }
        clean.push(c);
    }
    clean
}

/// Splits source text into top-level rules.
///
/// An unterminated block runs to the end of the input. Text followed by
/// `;` or `}` instead of a block becomes a rule without a block.
pub fn split_rules(source: &str) -> Vec<RawRule<'_>> {
    let mut rules = Vec::new();
    let mut rest = source;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        match find_top_level(rest, &['{', ';', '}']) {
            Some((idx, '{')) => {
                let body = &rest[idx + 1..];
                let (block, after) = match find_closing_brace(body) {
                    Some(end) => (&body[..end], &body[end + 1..]),
                    None => (body, ""),
                };
                rules.push(RawRule {
                    prelude: &rest[..idx],
                    block: Some(block),
                });
                rest = after;
            }
            Some((idx, _)) => {
                let prelude = rest[..idx].trim();
                if !prelude.is_empty() {
                    rules.push(RawRule {
                        prelude,
                        block: None,
                    });
                }
                rest = &rest[idx + 1..];
            }
            None => {
                rules.push(RawRule {
                    prelude: rest,
                    block: None,
                });
                break;
            }
        }
    }
    rules
}

/// Finds the first of `stops` outside quotes and parentheses.
fn find_top_level(input: &str, stops: &[char]) -> Option<(usize, char)> {
    let mut quote: Option<char> = None;
    let mut depth = 0usize;

    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, c) if depth == 0 && stops.contains(&c) => return Some((i, c)),
            _ => {}
        }
    }
    None
}

/// Finds the `}` closing a block whose `{` was just consumed.
fn find_closing_brace(body: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut depth = 0usize;

    for (i, c) in body.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '{') => depth += 1,
            (None, '}') if depth == 0 => return Some(i),
            (None, '}') => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Splits on `separator` outside quotes and parentheses.
fn split_top_level(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = input;
    while let Some((idx, _)) = find_top_level(rest, &[separator]) {
        parts.push(&rest[..idx]);
        rest = &rest[idx + 1..];
    }
    parts.push(rest);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::Property;
    use crate::types::Value;

    #[test]
    fn comments_are_removed_outside_strings() {
        assert_eq!(strip_comments("a /* x */ { }"), "a  { }");
        assert_eq!(
            strip_comments("a { content: '/* kept */' }"),
            "a { content: '/* kept */' }"
        );
        assert_eq!(strip_comments("a { } /* open"), "a { } ");
    }

    #[test]
    fn rules_split_on_balanced_braces() {
        let rules = split_rules("a { x: 1 } b{y:2}");
        assert_eq!(
            rules,
            vec![
                RawRule {
                    prelude: "a ",
                    block: Some(" x: 1 ")
                },
                RawRule {
                    prelude: "b",
                    block: Some("y:2")
                },
            ]
        );
    }

    #[test]
    fn unterminated_block_runs_to_end() {
        let rules = split_rules("a { x: 1");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].block, Some(" x: 1"));
    }

    #[test]
    fn statements_without_block() {
        let rules = split_rules("@import 'x.css'; a { }");
        assert_eq!(rules[0].prelude, "@import 'x.css'");
        assert_eq!(rules[0].block, None);
        assert_eq!(rules[1].prelude, "a ");
    }

    #[test]
    fn declarations_drop_individually() {
        let (block, errors) =
            parse_declarations("color: red; margin: 4; line-width: -1; font-size: 12 !important;");
        assert_eq!(block.len(), 2);
        assert_eq!(block.get(&Property::FontSize), Some(&Value::Number(12.0)));
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], ParseError::UnknownProperty(name) if name == "margin"));
    }

    #[test]
    fn semicolons_inside_strings_do_not_split() {
        let (block, errors) = parse_declarations("content: 'a;b'; --x: rgb(1, 2, 3)");
        assert!(errors.is_empty());
        assert_eq!(
            block.get(&Property::Content),
            Some(&Value::Text("a;b".to_string()))
        );
        assert_eq!(
            block.get(&Property::Custom("--x".into())),
            Some(&Value::Raw("rgb(1, 2, 3)".to_string()))
        );
    }

    #[test]
    fn missing_colon_is_reported() {
        let (block, errors) = parse_declarations("color red");
        assert!(block.is_empty());
        assert_eq!(errors, vec![ParseError::MissingColon("color red".to_string())]);
    }

    #[test]
    fn selector_lists_get_consecutive_orders() {
        let compiled = compile_style_sheet(["a, b { color: red }", "!!! { }", "c { }"]);
        let orders: Vec<_> = compiled.rules.iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![0, 1, 3]);
        assert!(Arc::ptr_eq(
            &compiled.rules[0].declarations,
            &compiled.rules[1].declarations
        ));
        assert_eq!(compiled.diagnostics.len(), 1);
        assert_eq!(compiled.diagnostics[0].order(), 2);
    }

    #[test]
    fn at_rules_are_dropped() {
        let compiled = compile_style_sheet(["@media dark { a { color: red } } b { }"]);
        assert_eq!(compiled.rules.len(), 1);
        assert!(matches!(
            &compiled.diagnostics[0],
            Diagnostic::Rule { error: SelectorError::UnsupportedAtRule(name), .. } if name == "@media"
        ));
    }
}
