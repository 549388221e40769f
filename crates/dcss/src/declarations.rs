//! The declaration registry.
//!
//! A closed vocabulary of style properties, each with its value domain.
//! [`parse_declaration`] turns raw `name: value` text into a typed
//! [`Declaration`], or reports why it cannot. Custom properties (`--name`)
//! are accepted with any non-empty value and kept as raw text until a
//! `var()` reference reinterprets them through [`Property::coerce`].
//!
//! Every property also accepts `var(--name)`, which parses to
//! [`Value::Variable`] and is resolved during the cascade.

use std::fmt;

use phf::phf_map;

use crate::error::ParseError;
use crate::parser::units::{parse_length, parse_length_list};
use crate::parser::values::{parse_complete, parse_quoted, parse_var};
use crate::types::{
    Color, Declaration, FontStyle, FontWeight, JustifyContent, Padding, RelativeSize, TextAlign,
    TextDecoration, Value, VerticalAlign, WhiteSpace,
};

/// A style property name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    Color,
    BackgroundColor,
    TextColor,
    HighlightColor,
    FontFamily,
    FontSize,
    FontStyle,
    FontWeight,
    TextAlign,
    TextDecoration,
    VerticalAlign,
    JustifyContent,
    WhiteSpace,
    Opacity,
    LineWidth,
    LineHeight,
    BorderRadius,
    MinWidth,
    MinHeight,
    VerticalSpacing,
    Padding,
    DashStyle,
    Content,
    /// A `--name` custom property. The name keeps its leading dashes.
    Custom(String),
}

static PROPERTY_NAMES: phf::Map<&'static str, Property> = phf_map! {
    "color" => Property::Color,
    "background-color" => Property::BackgroundColor,
    "text-color" => Property::TextColor,
    "highlight-color" => Property::HighlightColor,
    "font-family" => Property::FontFamily,
    "font-size" => Property::FontSize,
    "font-style" => Property::FontStyle,
    "font-weight" => Property::FontWeight,
    "text-align" => Property::TextAlign,
    "text-decoration" => Property::TextDecoration,
    "vertical-align" => Property::VerticalAlign,
    "justify-content" => Property::JustifyContent,
    "white-space" => Property::WhiteSpace,
    "opacity" => Property::Opacity,
    "line-width" => Property::LineWidth,
    "line-height" => Property::LineHeight,
    "border-radius" => Property::BorderRadius,
    "min-width" => Property::MinWidth,
    "min-height" => Property::MinHeight,
    "vertical-spacing" => Property::VerticalSpacing,
    "padding" => Property::Padding,
    "dash-style" => Property::DashStyle,
    "content" => Property::Content,
};

/// Colors whose alpha channel is scaled by `opacity`.
pub const OPACITY_TARGETS: [Property; 3] = [
    Property::Color,
    Property::BackgroundColor,
    Property::TextColor,
];

impl Property {
    /// Looks up a property by name.
    ///
    /// Known names are matched ignoring ASCII case; custom names are kept verbatim.
    pub fn parse(name: &str) -> Result<Self, ParseError> {
        let name = name.trim();
        if name.len() > 2 && name.starts_with("--") {
            return Ok(Property::Custom(name.to_string()));
        }
        PROPERTY_NAMES
            .get(name.to_ascii_lowercase().as_str())
            .cloned()
            .ok_or_else(|| ParseError::UnknownProperty(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Property::Color => "color",
            Property::BackgroundColor => "background-color",
            Property::TextColor => "text-color",
            Property::HighlightColor => "highlight-color",
            Property::FontFamily => "font-family",
            Property::FontSize => "font-size",
            Property::FontStyle => "font-style",
            Property::FontWeight => "font-weight",
            Property::TextAlign => "text-align",
            Property::TextDecoration => "text-decoration",
            Property::VerticalAlign => "vertical-align",
            Property::JustifyContent => "justify-content",
            Property::WhiteSpace => "white-space",
            Property::Opacity => "opacity",
            Property::LineWidth => "line-width",
            Property::LineHeight => "line-height",
            Property::BorderRadius => "border-radius",
            Property::MinWidth => "min-width",
            Property::MinHeight => "min-height",
            Property::VerticalSpacing => "vertical-spacing",
            Property::Padding => "padding",
            Property::DashStyle => "dash-style",
            Property::Content => "content",
            Property::Custom(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Property::Custom(_))
    }

    /// Parses raw value text in this property's domain.
    pub fn parse_value(&self, raw: &str) -> Result<Value, ParseError> {
        let raw = raw.trim();
        if let Some(var) = parse_complete(parse_var, raw) {
            return Ok(Value::Variable(var));
        }

        let name = self.as_str();
        match self {
            Property::Color
            | Property::BackgroundColor
            | Property::TextColor
            | Property::HighlightColor => Color::parse(raw)
                .map(Value::Color)
                .map_err(|e| ParseError::invalid(name, raw, e.message)),

            Property::FontFamily => {
                let family = parse_complete(parse_quoted, raw).unwrap_or(raw);
                if family.trim().is_empty() {
                    return Err(ParseError::invalid(name, raw, "empty font family"));
                }
                Ok(Value::Text(family.trim().to_string()))
            }

            Property::FontSize => {
                if let Some(size) = RelativeSize::from_keyword(raw) {
                    return Ok(Value::RelativeSize(size));
                }
                match parse_complete(parse_length, raw) {
                    Some(n) if n > 0.0 => Ok(Value::Number(n)),
                    _ => Err(ParseError::invalid(
                        name,
                        raw,
                        "expected a positive number or a relative size keyword",
                    )),
                }
            }

            Property::FontStyle => keyword(name, raw, FontStyle::from_keyword, FontStyle::keywords())
                .map(Value::FontStyle),
            Property::FontWeight => {
                keyword(name, raw, FontWeight::from_keyword, FontWeight::keywords())
                    .map(Value::FontWeight)
            }
            Property::TextAlign => keyword(name, raw, TextAlign::from_keyword, TextAlign::keywords())
                .map(Value::TextAlign),
            Property::VerticalAlign => {
                keyword(name, raw, VerticalAlign::from_keyword, VerticalAlign::keywords())
                    .map(Value::VerticalAlign)
            }
            Property::JustifyContent => {
                keyword(name, raw, JustifyContent::from_keyword, JustifyContent::keywords())
                    .map(Value::JustifyContent)
            }
            Property::WhiteSpace => {
                keyword(name, raw, WhiteSpace::from_keyword, WhiteSpace::keywords())
                    .map(Value::WhiteSpace)
            }

            Property::TextDecoration => TextDecoration::parse(raw)
                .map(Value::TextDecoration)
                .ok_or_else(|| {
                    ParseError::invalid(
                        name,
                        raw,
                        "expected none, underline, overline or line-through",
                    )
                }),

            Property::Opacity => match parse_complete(parse_length, raw) {
                Some(n) if (0.0..=1.0).contains(&n) => Ok(Value::Number(n)),
                _ => Err(ParseError::invalid(name, raw, "expected a number between 0 and 1")),
            },

            Property::LineWidth
            | Property::LineHeight
            | Property::BorderRadius
            | Property::MinWidth
            | Property::MinHeight
            | Property::VerticalSpacing => match parse_complete(parse_length, raw) {
                Some(n) if n >= 0.0 => Ok(Value::Number(n)),
                _ => Err(ParseError::invalid(name, raw, "expected a non-negative number")),
            },

            Property::Padding => non_negative_list(name, raw)
                .and_then(|values| {
                    Padding::from_shorthand(&values).ok_or_else(|| {
                        ParseError::invalid(name, raw, "expected 1 to 4 numbers")
                    })
                })
                .map(Value::Padding),

            Property::DashStyle => non_negative_list(name, raw).map(Value::Dashes),

            Property::Content => parse_complete(parse_quoted, raw)
                .map(|s| Value::Text(s.to_string()))
                .ok_or_else(|| ParseError::invalid(name, raw, "expected a quoted string")),

            Property::Custom(_) => {
                if raw.is_empty() {
                    Err(ParseError::invalid(name, raw, "empty custom property"))
                } else {
                    Ok(Value::Raw(raw.to_string()))
                }
            }
        }
    }

    /// Whether an already typed value lies in this property's domain.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Variable(_)) => false,
            (Property::Custom(_), _) => true,
            (
                Property::Color
                | Property::BackgroundColor
                | Property::TextColor
                | Property::HighlightColor,
                Value::Color(_),
            ) => true,
            (Property::FontFamily | Property::Content, Value::Text(_)) => true,
            (Property::FontSize, Value::Number(n)) => *n > 0.0,
            (Property::FontSize, Value::RelativeSize(_)) => true,
            (Property::FontStyle, Value::FontStyle(_))
            | (Property::FontWeight, Value::FontWeight(_))
            | (Property::TextAlign, Value::TextAlign(_))
            | (Property::TextDecoration, Value::TextDecoration(_))
            | (Property::VerticalAlign, Value::VerticalAlign(_))
            | (Property::JustifyContent, Value::JustifyContent(_))
            | (Property::WhiteSpace, Value::WhiteSpace(_))
            | (Property::Padding, Value::Padding(_))
            | (Property::DashStyle, Value::Dashes(_)) => true,
            (Property::Opacity, Value::Number(n)) => (0.0..=1.0).contains(n),
            (
                Property::LineWidth
                | Property::LineHeight
                | Property::BorderRadius
                | Property::MinWidth
                | Property::MinHeight
                | Property::VerticalSpacing,
                Value::Number(n),
            ) => *n >= 0.0,
            _ => false,
        }
    }

    /// Reinterprets `value` as a value of this property.
    ///
    /// Raw custom-property text is parsed in this property's domain; typed
    /// values are kept when the domain accepts them. Variables never coerce.
    pub fn coerce(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Variable(_) => None,
            Value::Raw(text) => self.parse_value(text).ok().filter(|v| !v.is_variable()),
            other => self.accepts(other).then(|| other.clone()),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a `name: value` pair into a typed declaration.
pub fn parse_declaration(name: &str, raw: &str) -> Result<Declaration, ParseError> {
    let property = Property::parse(name)?;
    let value = property.parse_value(raw)?;
    Ok(Declaration::new(property, value))
}

fn keyword<T>(
    property: &str,
    raw: &str,
    from_keyword: fn(&str) -> Option<T>,
    keywords: &[&str],
) -> Result<T, ParseError> {
    from_keyword(raw).ok_or_else(|| {
        ParseError::invalid(property, raw, format!("expected one of {}", keywords.join(", ")))
    })
}

fn non_negative_list(property: &str, raw: &str) -> Result<Vec<f64>, ParseError> {
    match parse_complete(parse_length_list, raw) {
        Some(values) if values.iter().all(|n| *n >= 0.0) => Ok(values),
        _ => Err(ParseError::invalid(
            property,
            raw,
            "expected non-negative numbers",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Var;

    #[test]
    fn known_and_custom_names() {
        assert_eq!(Property::parse("Font-Size"), Ok(Property::FontSize));
        assert_eq!(
            Property::parse("--Accent"),
            Ok(Property::Custom("--Accent".to_string()))
        );
        assert!(Property::parse("--").is_err());
        assert!(Property::parse("margin").is_err());
    }

    #[test]
    fn names_round_trip() {
        for name in PROPERTY_NAMES.keys() {
            assert_eq!(Property::parse(name).unwrap().as_str(), *name);
        }
    }

    #[test]
    fn font_size_keywords_and_numbers() {
        assert_eq!(
            Property::FontSize.parse_value("large"),
            Ok(Value::RelativeSize(RelativeSize::Large))
        );
        assert_eq!(Property::FontSize.parse_value("12px"), Ok(Value::Number(12.0)));
        assert!(Property::FontSize.parse_value("0").is_err());
        assert!(Property::FontSize.parse_value("huge").is_err());
    }

    #[test]
    fn any_property_takes_a_variable() {
        assert_eq!(
            Property::LineWidth.parse_value("var(--width)"),
            Ok(Value::Variable(Var::new("--width")))
        );
        assert_eq!(
            Property::Custom("--a".into()).parse_value("var(--b)"),
            Ok(Value::Variable(Var::new("--b")))
        );
    }

    #[test]
    fn opacity_domain() {
        assert_eq!(Property::Opacity.parse_value("0.5"), Ok(Value::Number(0.5)));
        assert!(Property::Opacity.parse_value("1.5").is_err());
        assert!(Property::Opacity.parse_value("-0.1").is_err());
    }

    #[test]
    fn lists() {
        assert_eq!(
            Property::Padding.parse_value("4 8"),
            Ok(Value::Padding(Padding::vertical_horizontal(4.0, 8.0)))
        );
        assert!(Property::Padding.parse_value("1 2 3 4 5").is_err());
        assert_eq!(
            Property::DashStyle.parse_value("7, 5"),
            Ok(Value::Dashes(vec![7.0, 5.0]))
        );
    }

    #[test]
    fn coerce_raw_text_into_domain() {
        let raw = Value::Raw("red".to_string());
        assert_eq!(Property::Color.coerce(&raw), Some(Value::Color(Color::rgb8(255, 0, 0))));
        assert_eq!(Property::LineWidth.coerce(&raw), None);
        assert_eq!(Property::Color.coerce(&Value::Variable(Var::new("--x"))), None);
        assert_eq!(Property::Opacity.coerce(&Value::Number(2.0)), None);
        assert_eq!(Property::LineWidth.coerce(&Value::Number(2.0)), Some(Value::Number(2.0)));
    }

    #[test]
    fn non_finite_color_channels_are_invalid() {
        assert!(matches!(
            parse_declaration("color", "rgba(0, 0, 0, NaN)"),
            Err(ParseError::InvalidValue { .. })
        ));
        assert!(parse_declaration("background-color", "hsl(inf, 50%, 50%)").is_err());
    }

    #[test]
    fn content_requires_quotes() {
        assert_eq!(
            Property::Content.parse_value("'«block»'"),
            Ok(Value::Text("«block»".to_string()))
        );
        assert!(Property::Content.parse_value("block").is_err());
    }
}
