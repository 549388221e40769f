use std::ops::Add;
use std::sync::Arc;

use crate::types::DeclarationBlock;

/// CSS specificity for determining rule precedence.
///
/// Compared field by field: ids first, then classes (which also count
/// states and attributes), then types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity {
    pub ids: u32,
    pub classes: u32,
    pub types: u32,
}

impl Specificity {
    pub const fn new(ids: u32, classes: u32, types: u32) -> Self {
        Self {
            ids,
            classes,
            types,
        }
    }
}

impl Add for Specificity {
    type Output = Specificity;

    fn add(self, other: Specificity) -> Specificity {
        Specificity {
            ids: self.ids + other.ids,
            classes: self.classes + other.classes,
            types: self.types + other.types,
        }
    }
}

/// How an attribute selector compares the attribute value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeOp {
    /// `[name]`: present and non-empty.
    Exists,
    /// `[name=value]`
    Equals,
    /// `[name~=value]`: one of the whitespace separated words.
    Includes,
    /// `[name|=value]`: equal, or followed by `-`.
    DashMatch,
    /// `[name^=value]`
    Prefix,
    /// `[name$=value]`
    Suffix,
    /// `[name*=value]`
    Substring,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Type(String),
    Universal,
    /// `#name`, matched against the `id` attribute.
    Id(String),
    /// `.name`, matched against the words of the `class` attribute.
    Class(String),
    /// `:hover`, `:selected`, ...: the node has the state token.
    State(String),
    /// `:root`: the node has no parent.
    Root,
    /// `:empty`: the node has no children.
    Empty,
    Attribute {
        name: String,
        op: AttributeOp,
        value: String,
    },
    Not(SelectorList),
    Is(SelectorList),
    /// `:has(...)`: some descendant matches.
    Has(SelectorList),
}

impl Selector {
    pub fn specificity(&self) -> Specificity {
        match self {
            Selector::Id(_) => Specificity::new(1, 0, 0),
            Selector::Class(_)
            | Selector::State(_)
            | Selector::Root
            | Selector::Empty
            | Selector::Attribute { .. } => Specificity::new(0, 1, 0),
            Selector::Type(_) => Specificity::new(0, 0, 1),
            Selector::Universal => Specificity::default(),
            Selector::Not(list) | Selector::Is(list) | Selector::Has(list) => list.max_specificity(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompoundSelector {
    pub selectors: Vec<Selector>,
}

impl CompoundSelector {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    pub fn specificity(&self) -> Specificity {
        self.selectors
            .iter()
            .map(Selector::specificity)
            .fold(Specificity::default(), Add::add)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    None,
    Descendant,
    Child,
}

/// A compound selector and the combinator linking it to the next part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorPart {
    pub compound: CompoundSelector,
    pub combinator: Combinator,
}

impl SelectorPart {
    pub fn new(compound: CompoundSelector, combinator: Combinator) -> Self {
        Self {
            compound,
            combinator,
        }
    }
}

/// Compound selectors joined by combinators, left to right. The last part
/// always has [`Combinator::None`] and is matched against the node itself;
/// every other part has [`Combinator::Child`] or [`Combinator::Descendant`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    pub parts: Vec<SelectorPart>,
}

impl ComplexSelector {
    pub fn new(parts: Vec<SelectorPart>) -> Self {
        Self { parts }
    }

    pub fn specificity(&self) -> Specificity {
        self.parts
            .iter()
            .map(|p| p.compound.specificity())
            .fold(Specificity::default(), Add::add)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn new(selectors: Vec<ComplexSelector>) -> Self {
        Self { selectors }
    }

    fn max_specificity(&self) -> Specificity {
        self.selectors
            .iter()
            .map(ComplexSelector::specificity)
            .max()
            .unwrap_or_default()
    }
}

/// One selector of a rule, ready for matching.
///
/// Rules with a selector list produce one `CompiledRule` per selector; they
/// share the declaration block.
#[derive(Clone, Debug)]
pub struct CompiledRule {
    pub selector: ComplexSelector,
    pub specificity: Specificity,
    /// Position in the compiled source. Later rules win specificity ties.
    pub order: usize,
    pub declarations: Arc<DeclarationBlock>,
}

impl CompiledRule {
    pub fn new(selector: ComplexSelector, order: usize, declarations: Arc<DeclarationBlock>) -> Self {
        Self {
            specificity: selector.specificity(),
            selector,
            order,
            declarations,
        }
    }
}
