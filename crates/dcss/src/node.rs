//! The node capability the matcher queries.
//!
//! The engine never owns nodes. Hosts implement [`StyleNode`] for a cheap
//! handle type (a reference, an index into an arena, an `Rc`) and the
//! matcher walks the tree through it for the duration of a single match.

/// Parent and child chains deeper than this are treated as cycles.
pub const MAX_TREE_DEPTH: usize = 4096;

/// A node of the caller's item tree, as seen by selector matching.
///
/// Implementations must describe a finite, acyclic tree. Walking more than
/// [`MAX_TREE_DEPTH`] levels up or down panics.
pub trait StyleNode: Sized {
    /// The element type name, matched by type selectors.
    fn name(&self) -> &str;

    /// The parent node, or `None` for the root.
    fn parent(&self) -> Option<Self>;

    fn children(&self) -> impl Iterator<Item = Self>;

    /// Looks up a named attribute. `#id` and `.class` selectors read the
    /// `id` and `class` attributes.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Active state tokens, such as `hover` or `selected`.
    fn state(&self) -> impl Iterator<Item = &str>;

    fn has_state(&self, token: &str) -> bool {
        self.state().any(|s| s == token)
    }
}

/// Iterates from a node's parent up to the root.
pub struct Ancestors<N> {
    next: Option<N>,
    depth: usize,
}

impl<N: StyleNode> Iterator for Ancestors<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let node = self.next.take()?;
        self.depth += 1;
        if self.depth > MAX_TREE_DEPTH {
            panic!(
                "StyleNode parent chain exceeds {MAX_TREE_DEPTH} levels; the tree is cyclic"
            );
        }
        self.next = node.parent();
        Some(node)
    }
}

pub fn ancestors<N: StyleNode>(node: &N) -> Ancestors<N> {
    Ancestors {
        next: node.parent(),
        depth: 0,
    }
}

/// Depth-first search for a descendant satisfying `predicate`.
pub fn any_descendant<N: StyleNode>(node: &N, mut predicate: impl FnMut(&N) -> bool) -> bool {
    let mut stack: Vec<(N, usize)> = node.children().map(|c| (c, 1)).collect();

    while let Some((current, depth)) = stack.pop() {
        if depth > MAX_TREE_DEPTH {
            panic!(
                "StyleNode children nest deeper than {MAX_TREE_DEPTH} levels; the tree is cyclic"
            );
        }
        if predicate(&current) {
            return true;
        }
        stack.extend(current.children().map(|c| (c, depth + 1)));
    }
    false
}
