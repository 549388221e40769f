//! Typed declaration values.

use crate::types::color::Color;
use crate::types::text::{
    FontStyle, FontWeight, JustifyContent, RelativeSize, TextAlign, TextDecoration, VerticalAlign,
    WhiteSpace,
};

/// Padding around an item's content, in diagram units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn all(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn vertical_horizontal(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            bottom: vertical,
            left: horizontal,
            right: horizontal,
        }
    }

    /// Expands the 1 to 4 value CSS shorthand.
    pub fn from_shorthand(values: &[f64]) -> Option<Self> {
        match *values {
            [all] => Some(Self::all(all)),
            [v, h] => Some(Self::vertical_horizontal(v, h)),
            [top, h, bottom] => Some(Self {
                top,
                right: h,
                bottom,
                left: h,
            }),
            [top, right, bottom, left] => Some(Self {
                top,
                right,
                bottom,
                left,
            }),
            _ => None,
        }
    }
}

/// A reference to a custom property, written `var(--name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Var {
    /// The referenced property name, including the leading `--`.
    pub name: String,
}

impl Var {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The value side of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Color(Color),
    Number(f64),
    /// `small`, `large`, ... resolved against an absolute size during merge.
    RelativeSize(RelativeSize),
    Padding(Padding),
    Dashes(Vec<f64>),
    FontStyle(FontStyle),
    FontWeight(FontWeight),
    TextAlign(TextAlign),
    TextDecoration(TextDecoration),
    VerticalAlign(VerticalAlign),
    JustifyContent(JustifyContent),
    WhiteSpace(WhiteSpace),
    /// Free text such as a font family or `content` string.
    Text(String),
    /// Unparsed custom property text.
    Raw(String),
    Variable(Var),
}

impl Value {
    pub fn is_variable(&self) -> bool {
        matches!(self, Value::Variable(_))
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Raw(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Color> for Value {
    fn from(color: Color) -> Self {
        Value::Color(color)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}
