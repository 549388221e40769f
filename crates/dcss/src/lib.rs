//! # DCSS - Diagram CSS
//!
//! Style resolution for diagram items: a CSS-like dialect whose selectors
//! match a tree of diagram nodes and whose declarations cascade into one
//! concrete [`Style`] per node.
//!
//! - **Compiling**: turn sheet text into a [`CompiledStyleSheet`]; broken
//!   rules and declarations are dropped and reported as [`Diagnostic`]s
//! - **Matching**: evaluate selectors against any [`StyleNode`]
//! - **Cascade**: order matches by specificity and source order, merge
//!   them, resolve relative font sizes, opacity and `var()` references
//!
//! ## Quick Start
//!
//! ```rust
//! use dcss::{CompiledStyleSheet, NodeTree};
//! use dcss::declarations::Property;
//! use dcss::types::Color;
//!
//! let sheet = CompiledStyleSheet::new(r#"
//!     diagram { --accent: red }
//!     diagram > class:hover { color: var(--accent) }
//!     diagram { color: var(--accent) }
//! "#);
//!
//! let mut tree = NodeTree::new();
//! let diagram = tree.add_root("diagram");
//! let class = tree.add_child(diagram, "class");
//! tree.add_state(class, "hover");
//!
//! // `--accent` is not inherited: it only exists on the diagram itself.
//! let style = sheet.match_node(&tree.node(diagram));
//! assert_eq!(style.color(&Property::Color), Some(Color::rgb8(255, 0, 0)));
//! assert!(sheet.match_node(&tree.node(class)).is_empty());
//! ```
//!
//! ## Supported Features
//!
//! ### Selectors
//! - Type selectors: `class`, `diagram`, `*`
//! - `#id` and `.class`, read from the `id` and `class` attributes
//! - States: `:hover`, `:selected`, any token the node reports
//! - `:root`, `:empty`, `:not(...)`, `:is(...)`, `:has(...)`
//! - Attributes: `[name]`, `[name=v]`, `[name~=v]`, `[name|=v]`,
//!   `[name^=v]`, `[name$=v]`, `[name*=v]`
//! - Descendant (`a b`) and child (`a > b`) combinators, selector lists
//!
//! ### Not Supported
//! - Sibling combinators, pseudo-elements, at-rules, `!important` ordering
//!
//! ## Modules
//!
//! - [`declarations`]: the property vocabulary and value parsing
//! - [`parser`]: style sheet compilation
//! - [`cascade`]: compiled sheets and style merging
//! - [`types`]: colors, keyword values and styles

pub mod cascade;
pub mod config;
pub mod declarations;
pub mod error;
pub mod handle;
pub mod matching;
pub mod node;
pub mod parser;
pub mod tree;
pub mod types;

pub use cascade::{CompiledStyleSheet, merge_styles, merge_styles_with, resolve_variables};
pub use config::CascadeConfig;
pub use error::{Diagnostic, ParseError, SelectorError};
pub use handle::StyleSheetHandle;
pub use node::StyleNode;
pub use tree::{NodeId, NodeRef, NodeTree};
pub use types::Style;
