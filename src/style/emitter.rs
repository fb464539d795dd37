use super::{ColorTheme, Rgb, Style};
use crate::doc::Annotation;
use crate::infra::span;
use crate::options::ConfigError;
use crate::pretty_printing::{push_indent, Layout, Piece};
use crate::syntax::Token;
use rustc_hash::FxHashMap;
use std::fmt;

/// Decides how each kind of token is displayed, by producing the control sequence that switches
/// to its style.
pub trait StyleEncoder: Send + Sync + fmt::Debug {
    /// The sequence that starts text styled as `token`, or `None` if this encoder has no style
    /// for it.
    fn encode(&self, token: Token) -> Option<String>;

    /// The sequence that returns to unstyled text.
    fn reset(&self) -> String;
}

/// Encodes styles as 24-bit ANSI terminal escape sequences.
#[derive(Clone, Debug)]
pub struct AnsiEncoder {
    theme: ColorTheme,
    styles: FxHashMap<Token, Style>,
}

impl AnsiEncoder {
    /// An encoder with [`Style::for_token`] for every token.
    pub fn new(theme: ColorTheme) -> AnsiEncoder {
        AnsiEncoder {
            theme,
            styles: Token::ALL
                .iter()
                .map(|token| (*token, Style::for_token(*token)))
                .collect(),
        }
    }

    pub fn with_style(mut self, token: Token, style: Style) -> AnsiEncoder {
        self.styles.insert(token, style);
        self
    }

    pub fn without_style(mut self, token: Token) -> AnsiEncoder {
        self.styles.remove(&token);
        self
    }
}

impl Default for AnsiEncoder {
    fn default() -> Self {
        AnsiEncoder::new(ColorTheme::default())
    }
}

impl StyleEncoder for AnsiEncoder {
    fn encode(&self, token: Token) -> Option<String> {
        let style = self.styles.get(&token)?;
        let Rgb { red, green, blue } = self.theme.rgb(style.color);
        let mut code = format!("\x1b[0;38;2;{};{};{}", red, green, blue);
        if style.bold {
            code.push_str(";1");
        }
        if style.underlined {
            code.push_str(";4");
        }
        if style.reversed {
            code.push_str(";7");
        }
        code.push('m');
        Some(code)
    }

    fn reset(&self) -> String {
        "\x1b[0m".to_owned()
    }
}

/// Display a layout, switching styles at the boundaries of its token annotations.
///
/// Each token is looked up in the encoder at most once. When a styled span ends, the style of the
/// span enclosing it (if any) is re-emitted, otherwise the encoder's reset sequence is. Comment
/// annotations have no effect on styling.
pub fn emit(layout: &Layout, encoder: &dyn StyleEncoder) -> Result<String, ConfigError> {
    span!("emit");

    let mut cache = FxHashMap::<Token, String>::default();
    // One entry per open annotation. `None` for annotations that are not styled.
    let mut open = Vec::<Option<Token>>::new();
    let mut output = String::new();
    let mut pending_indent = 0;

    for piece in layout.pieces() {
        match piece {
            Piece::Text(s) if s.is_empty() => (),
            Piece::Text(s) => {
                push_indent(&mut output, pending_indent);
                pending_indent = 0;
                output.push_str(s);
            }
            Piece::Newline(indent) => {
                output.push('\n');
                pending_indent = *indent;
            }
            Piece::Begin(Annotation::Token(token)) => {
                output.push_str(lookup(&mut cache, encoder, *token)?);
                open.push(Some(*token));
            }
            Piece::Begin(Annotation::Comment(_)) => open.push(None),
            Piece::End => {
                if let Some(Some(_)) = open.pop() {
                    match open.iter().rev().find_map(|token| *token) {
                        Some(enclosing) => {
                            output.push_str(lookup(&mut cache, encoder, enclosing)?)
                        }
                        None => output.push_str(&encoder.reset()),
                    }
                }
            }
        }
    }
    if open.iter().any(Option::is_some) {
        output.push_str(&encoder.reset());
    }
    Ok(output)
}

fn lookup<'c>(
    cache: &'c mut FxHashMap<Token, String>,
    encoder: &dyn StyleEncoder,
    token: Token,
) -> Result<&'c str, ConfigError> {
    if !cache.contains_key(&token) {
        let code = encoder
            .encode(token)
            .ok_or(ConfigError::MissingStyle(token))?;
        cache.insert(token, code);
    }
    Ok(cache.get(&token).map(String::as_str).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc_constructors::*;
    use crate::pretty_printing::pretty_print;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct TagEncoder {
        lookups: AtomicUsize,
    }

    impl StyleEncoder for TagEncoder {
        fn encode(&self, token: Token) -> Option<String> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if token == Token::Operator {
                None
            } else {
                Some(format!("<{}>", token))
            }
        }

        fn reset(&self) -> String {
            "</>".to_owned()
        }
    }

    #[test]
    fn nested_spans_restore_the_enclosing_style() {
        let doc = annotate(
            Token::Punctuation,
            text("[") + token(Token::NumberInt, "1") + text("]"),
        );
        let layout = pretty_print(&doc, 80, 80);
        let encoder = TagEncoder::default();
        assert_eq!(
            emit(&layout, &encoder).unwrap(),
            "<punctuation>[<number.int>1<punctuation>]</>"
        );
    }

    #[test]
    fn each_token_is_looked_up_once() {
        let doc = concat(
            (0..5).map(|i| token(Token::NumberInt, i.to_string()) + token(Token::Punctuation, ",")),
        );
        let layout = pretty_print(&doc, 80, 80);
        let encoder = TagEncoder::default();
        emit(&layout, &encoder).unwrap();
        assert_eq!(encoder.lookups.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn comments_are_not_styled() {
        let doc = comment_doc(text("x"), "note");
        let layout = pretty_print(&doc, 80, 80);
        assert_eq!(emit(&layout, &TagEncoder::default()).unwrap(), "x");
    }

    #[test]
    fn missing_style_is_an_error() {
        let doc = token(Token::Operator, "=");
        let layout = pretty_print(&doc, 80, 80);
        assert_eq!(
            emit(&layout, &TagEncoder::default()),
            Err(ConfigError::MissingStyle(Token::Operator))
        );
    }

    #[test]
    fn ansi_codes() {
        let encoder = AnsiEncoder::default();
        assert_eq!(
            encoder.encode(Token::LiteralString).unwrap(),
            "\x1b[0;38;2;161;181;108m"
        );
        assert_eq!(encoder.without_style(Token::LiteralString).encode(Token::LiteralString), None);
    }
}
