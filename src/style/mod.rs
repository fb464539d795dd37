//! Style choices, such as color, bolding, and underlining, and the emitter that turns annotated
//! layouts into styled text.

mod color_theme;
mod emitter;

pub use color_theme::{ColorTheme, Rgb};
pub use emitter::{emit, AnsiEncoder, StyleEncoder};

use crate::syntax::Token;

/// Styling to apply to text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub color: Color,
    pub bold: bool,
    pub underlined: bool,
    pub reversed: bool,
}

/// The foreground color of some text (or if reversed the background color).
///
/// This uses the [Base16](http://chriskempson.com/projects/base16/) colortheme definitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Default Background
    Base00,
    /// Lighter Background (Used for status bars)
    Base01,
    /// Selection Background
    Base02,
    /// Comments, Invisibles, Line Highlighting
    Base03,
    /// Dark Foreground (Used for status bars)
    Base04,
    /// Default Foreground, Caret, Delimiters, Operators
    Base05,
    /// Light Foreground (Not often used)
    Base06,
    /// Light Background (Not often used)
    Base07,
    /// Variables, XML Tags, Markup Link Text, Markup Lists, Diff Deleted
    Base08,
    /// Integers, Boolean, Constants, XML Attributes, Markup Link Url
    Base09,
    /// Classes, Markup Bold, Search Text Background
    Base0A,
    /// Strings, Inherited Class, Markup Code, Diff Inserted
    Base0B,
    /// Support, Regular Expressions, Escape Characters, Markup Quotes
    Base0C,
    /// Functions, Methods, Attribute IDs, Headings
    Base0D,
    /// Keywords, Storage, Selector, Markup Italic, Diff Changed
    Base0E,
    /// Deprecated, Opening/Closing Embedded Language Tags, e.g. <?php ?>
    Base0F,
}

impl Style {
    /// Typically, ordinary white on black.
    pub fn plain() -> Style {
        Style {
            color: Color::Base05,
            bold: false,
            underlined: false,
            reversed: false,
        }
    }

    pub fn underlined(self) -> Style {
        Style {
            underlined: true,
            ..self
        }
    }

    pub fn bold(self) -> Style {
        Style { bold: true, ..self }
    }

    pub fn reversed(self) -> Style {
        Style {
            reversed: true,
            ..self
        }
    }

    pub fn color(self, color: Color) -> Style {
        Style { color, ..self }
    }

    /// The default style for each kind of token.
    pub fn for_token(token: Token) -> Style {
        use Color::*;
        use Token::*;

        let plain = Style::plain();
        match token {
            KeywordConstant => plain.color(Base09).bold(),
            NameBuiltin => plain.color(Base0C),
            NameEntity => plain.color(Base03),
            NameFunction => plain.color(Base0D),
            NameVariable => plain.color(Base08),
            LiteralString => plain.color(Base0B),
            StringAffix => plain.color(Base0E),
            StringEscape => plain.color(Base0C).bold(),
            NumberFloat | NumberInt => plain.color(Base09),
            Operator | Punctuation => plain,
            CommentSingle => plain.color(Base03),
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::plain()
    }
}
