use std::fs;
use std::path::Path;
use std::sync::Arc;

use dcss::{CascadeConfig, CompiledStyleSheet, StyleSheetHandle};

use crate::error::{DiagramStyleError, Result};

/// Reads the sheets at `paths`, in order, and compiles them as one sheet.
///
/// Later files win specificity ties. Content problems never fail the load;
/// they end up in [`CompiledStyleSheet::diagnostics`].
pub fn load_style_sheet<P: AsRef<Path>>(
    paths: impl IntoIterator<Item = P>,
    config: CascadeConfig,
) -> Result<CompiledStyleSheet> {
    let sources = read_sources(paths)?;
    Ok(CompiledStyleSheet::from_sources(
        sources.iter().map(String::as_str),
        config,
    ))
}

/// Recompiles `handle` from files and returns the sheet it replaced.
///
/// Nothing is swapped when a file cannot be read.
pub fn reload_style_sheet<P: AsRef<Path>>(
    handle: &StyleSheetHandle,
    paths: impl IntoIterator<Item = P>,
) -> Result<Arc<CompiledStyleSheet>> {
    let sources = read_sources(paths)?;
    Ok(handle.recompile(sources.iter().map(String::as_str)))
}

fn read_sources<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Vec<String>> {
    paths
        .into_iter()
        .map(|path| {
            let path = path.as_ref();
            log::debug!("reading style sheet {}", path.display());
            fs::read_to_string(path).map_err(|source| DiagramStyleError::Io {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}
