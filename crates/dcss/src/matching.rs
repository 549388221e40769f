//! Selector interpreter.
//!
//! Selectors are plain data ([`ComplexSelector`] and friends); this module
//! evaluates them against any [`StyleNode`]. Complex selectors are matched
//! right to left: the last compound must match the node itself, then each
//! combinator walks up the parent chain. Descendant combinators backtrack,
//! so `a b > c` finds a `b` parent with some `a` ancestor even when the
//! nearest `a` is not the right one.
//!
//! Backtracking stops early: once the parts left of a descendant
//! combinator have been tried against every ancestor without success, no
//! higher starting point can succeed either, and the whole selector fails.

use crate::node::{StyleNode, any_descendant, ancestors};
use crate::parser::{
    AttributeOp, Combinator, ComplexSelector, CompoundSelector, Selector, SelectorList,
    SelectorPart,
};

/// Outcome of matching the parts of a complex selector at one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PartsMatch {
    Matched,
    /// No match here; a descendant combinator may retry at a higher ancestor.
    NotMatched,
    /// No match here or at any ancestor.
    NotMatchedGlobally,
}

/// Checks whether any selector of the list matches `node`.
pub fn matches_list<N: StyleNode>(list: &SelectorList, node: &N) -> bool {
    list.selectors.iter().any(|s| matches_complex(s, node))
}

pub fn matches_complex<N: StyleNode>(selector: &ComplexSelector, node: &N) -> bool {
    !selector.parts.is_empty() && matches_parts(&selector.parts, node) == PartsMatch::Matched
}

fn matches_parts<N: StyleNode>(parts: &[SelectorPart], node: &N) -> PartsMatch {
    let Some((last, rest)) = parts.split_last() else {
        return PartsMatch::Matched;
    };
    if !matches_compound(&last.compound, node) {
        return PartsMatch::NotMatched;
    }

    // The combinator linking `rest` to `last` sits on the part before it.
    let Some(previous) = rest.last() else {
        return PartsMatch::Matched;
    };
    match previous.combinator {
        Combinator::Child => match node.parent() {
            Some(parent) => matches_parts(rest, &parent),
            None => PartsMatch::NotMatchedGlobally,
        },
        Combinator::Descendant => {
            for ancestor in ancestors(node) {
                match matches_parts(rest, &ancestor) {
                    PartsMatch::NotMatched => continue,
                    result => return result,
                }
            }
            PartsMatch::NotMatchedGlobally
        }
        Combinator::None => unreachable!("only the last selector part has no combinator"),
    }
}

pub fn matches_compound<N: StyleNode>(compound: &CompoundSelector, node: &N) -> bool {
    compound.selectors.iter().all(|s| matches_selector(s, node))
}

/// Checks a single simple selector against `node`.
pub fn matches_selector<N: StyleNode>(selector: &Selector, node: &N) -> bool {
    match selector {
        Selector::Type(name) => node.name().eq_ignore_ascii_case(name),
        Selector::Universal => true,
        Selector::Id(id) => node.attribute("id").is_some_and(|v| v == *id),
        Selector::Class(class) => node
            .attribute("class")
            .is_some_and(|v| v.split_whitespace().any(|c| c == class)),
        Selector::State(token) => node.has_state(token),
        Selector::Root => node.parent().is_none(),
        Selector::Empty => node.children().next().is_none(),
        Selector::Attribute { name, op, value } => node
            .attribute(name)
            .is_some_and(|actual| attribute_matches(*op, &actual, value)),
        Selector::Not(list) => !matches_list(list, node),
        Selector::Is(list) => matches_list(list, node),
        Selector::Has(list) => any_descendant(node, |d| matches_list(list, d)),
    }
}

fn attribute_matches(op: AttributeOp, actual: &str, expected: &str) -> bool {
    match op {
        AttributeOp::Exists => !actual.is_empty(),
        AttributeOp::Equals => actual == expected,
        AttributeOp::Includes => {
            !expected.is_empty() && actual.split_whitespace().any(|w| w == expected)
        }
        AttributeOp::DashMatch => {
            actual == expected
                || actual
                    .strip_prefix(expected)
                    .is_some_and(|rest| rest.starts_with('-'))
        }
        AttributeOp::Prefix => !expected.is_empty() && actual.starts_with(expected),
        AttributeOp::Suffix => !expected.is_empty() && actual.ends_with(expected),
        AttributeOp::Substring => !expected.is_empty() && actual.contains(expected),
    }
}
