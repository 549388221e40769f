//! Host-side glue for the [`dcss`] style engine: loading sheets from disk,
//! hot reloading them into a shared handle, and logging to a file.

pub mod error;
pub mod loader;
pub mod log_init;

pub use dcss::{
    CascadeConfig, CompiledStyleSheet, Diagnostic, NodeId, NodeRef, NodeTree, StyleNode,
    StyleSheetHandle,
};
pub use dcss::types::Style;
pub use error::{DiagramStyleError, Result};
pub use loader::{load_style_sheet, reload_style_sheet};
pub use log_init::init_logger;
