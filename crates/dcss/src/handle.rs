use std::sync::Arc;

use parking_lot::RwLock;

use crate::cascade::CompiledStyleSheet;
use crate::node::StyleNode;
use crate::types::Style;

/// A shared, swappable reference to the active style sheet.
///
/// Clones share the same slot. Matching works on a snapshot taken under a
/// short read lock, so a concurrent [`replace`](Self::replace) never exposes
/// a half-built sheet and never blocks on a running match.
///
/// ```rust
/// use dcss::{CompiledStyleSheet, NodeTree, StyleSheetHandle};
/// use dcss::declarations::Property;
///
/// let handle = StyleSheetHandle::new(CompiledStyleSheet::new("* { line-width: 1 }"));
/// let mut tree = NodeTree::new();
/// let item = tree.add_root("line");
///
/// let before = handle.load();
/// handle.recompile(["* { line-width: 3 }"]);
///
/// assert_eq!(before.match_node(&tree.node(item)).number(&Property::LineWidth), Some(1.0));
/// assert_eq!(handle.match_node(&tree.node(item)).number(&Property::LineWidth), Some(3.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StyleSheetHandle {
    current: Arc<RwLock<Arc<CompiledStyleSheet>>>,
}

impl StyleSheetHandle {
    pub fn new(sheet: CompiledStyleSheet) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(sheet))),
        }
    }

    /// The active sheet. The snapshot stays valid after later swaps.
    pub fn load(&self) -> Arc<CompiledStyleSheet> {
        let guard = self.current.read();
        Arc::clone(&guard)
    }

    /// Installs `sheet` and returns the one it replaced.
    pub fn replace(&self, sheet: CompiledStyleSheet) -> Arc<CompiledStyleSheet> {
        let sheet = Arc::new(sheet);
        let mut guard = self.current.write();
        std::mem::replace(&mut *guard, sheet)
    }

    /// Compiles `sources` with the active sheet's configuration and installs
    /// the result. Compilation happens before the lock is taken.
    pub fn recompile<'a>(
        &self,
        sources: impl IntoIterator<Item = &'a str>,
    ) -> Arc<CompiledStyleSheet> {
        let config = *self.load().config();
        let sheet = CompiledStyleSheet::from_sources(sources, config);
        log::debug!(
            "swapping style sheet: {} rules, {} diagnostics",
            sheet.rules().len(),
            sheet.diagnostics().len()
        );
        self.replace(sheet)
    }

    pub fn match_node<N: StyleNode>(&self, node: &N) -> Style {
        self.load().match_node(node)
    }
}
