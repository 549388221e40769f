//! Keyword-valued properties: font, alignment and decoration.

use bitflags::bitflags;

/// Declares a keyword enum together with its CSS spelling.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $keyword:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Parses the keyword, ignoring ASCII case.
            pub fn from_keyword(keyword: &str) -> Option<Self> {
                $(
                    if keyword.eq_ignore_ascii_case($keyword) {
                        return Some($name::$variant);
                    }
                )+
                None
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $keyword),+
                }
            }

            /// All accepted keywords, for error messages.
            pub fn keywords() -> &'static [&'static str] {
                &[$($keyword),+]
            }
        }
    };
}

keyword_enum! {
    pub enum FontStyle {
        Normal => "normal",
        Italic => "italic",
    }
}

keyword_enum! {
    pub enum FontWeight {
        Normal => "normal",
        Bold => "bold",
    }
}

keyword_enum! {
    pub enum TextAlign {
        Left => "left",
        Center => "center",
        Right => "right",
    }
}

keyword_enum! {
    pub enum VerticalAlign {
        Top => "top",
        Middle => "middle",
        Bottom => "bottom",
    }
}

keyword_enum! {
    pub enum JustifyContent {
        Start => "start",
        End => "end",
        Center => "center",
        Stretch => "stretch",
    }
}

keyword_enum! {
    pub enum WhiteSpace {
        Normal => "normal",
        NoWrap => "nowrap",
    }
}

keyword_enum! {
    /// Font sizes relative to the closest absolute size in the cascade.
    pub enum RelativeSize {
        XSmall => "x-small",
        Small => "small",
        Medium => "medium",
        Large => "large",
        XLarge => "x-large",
    }
}

impl RelativeSize {
    /// Factor applied to the absolute font size.
    pub fn scale(&self) -> f64 {
        match self {
            RelativeSize::XSmall => 3.0 / 4.0,
            RelativeSize::Small => 8.0 / 9.0,
            RelativeSize::Medium => 1.0,
            RelativeSize::Large => 6.0 / 5.0,
            RelativeSize::XLarge => 3.0 / 2.0,
        }
    }
}

bitflags! {
    /// Text decoration lines. `none` is the empty set.
    ///
    /// ```
    /// use dcss::types::TextDecoration;
    ///
    /// let deco = TextDecoration::parse("underline line-through").unwrap();
    /// assert!(deco.contains(TextDecoration::UNDERLINE | TextDecoration::LINE_THROUGH));
    /// assert!(TextDecoration::parse("none").unwrap().is_empty());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextDecoration: u8 {
        const UNDERLINE    = 0b001;
        const OVERLINE     = 0b010;
        const LINE_THROUGH = 0b100;
    }
}

impl TextDecoration {
    /// Parses `none` or a whitespace separated list of decoration lines.
    pub fn parse(input: &str) -> Option<Self> {
        let mut words = input.split_whitespace().peekable();
        words.peek()?;

        if input.trim().eq_ignore_ascii_case("none") {
            return Some(TextDecoration::empty());
        }

        let mut deco = TextDecoration::empty();
        for word in words {
            let line = match word.to_ascii_lowercase().as_str() {
                "underline" => TextDecoration::UNDERLINE,
                "overline" => TextDecoration::OVERLINE,
                "line-through" => TextDecoration::LINE_THROUGH,
                _ => return None,
            };
            deco |= line;
        }
        Some(deco)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(FontWeight::from_keyword("BOLD"), Some(FontWeight::Bold));
        assert_eq!(WhiteSpace::from_keyword("nowrap"), Some(WhiteSpace::NoWrap));
        assert_eq!(TextAlign::from_keyword("justify"), None);
    }

    #[test]
    fn relative_sizes_scale() {
        assert_eq!(RelativeSize::Medium.scale(), 1.0);
        assert!(RelativeSize::Small.scale() < 1.0);
        assert!(RelativeSize::XLarge.scale() > RelativeSize::Large.scale());
    }

    #[test]
    fn decoration_rejects_unknown_and_mixed_none() {
        assert_eq!(TextDecoration::parse("blink"), None);
        assert_eq!(TextDecoration::parse("none underline"), None);
        assert_eq!(TextDecoration::parse(""), None);
    }
}
