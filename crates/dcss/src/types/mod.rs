//! Value types shared by the registry, the compiler and the cascade.

pub mod color;
pub mod named_colors;
pub mod style;
pub mod text;
pub mod value;

pub use color::{Color, ColorParseError};
pub use style::{Declaration, DeclarationBlock, Style};
pub use text::{
    FontStyle, FontWeight, JustifyContent, RelativeSize, TextAlign, TextDecoration, VerticalAlign,
    WhiteSpace,
};
pub use value::{Padding, Value, Var};
