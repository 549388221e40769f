/// Settings applied when merging matched rules into a [`Style`](crate::types::Style).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeConfig {
    /// Absolute font size that relative keywords (`small`, `large`, ...)
    /// scale when no matched rule sets a numeric `font-size`.
    pub base_font_size: f64,
}

impl CascadeConfig {
    pub const DEFAULT_FONT_SIZE: f64 = 14.0;

    pub fn with_base_font_size(base_font_size: f64) -> Self {
        Self { base_font_size }
    }
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            base_font_size: Self::DEFAULT_FONT_SIZE,
        }
    }
}
