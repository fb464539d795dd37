//! Printers for the built-in kinds of value: `None`, booleans, numbers, strings, bytes,
//! sequences, and mappings.

use crate::context::PrettyContext;
use crate::doc::Doc;
use crate::doc_constructors::{annotate, concat, text, token};
use crate::helpers::{
    build_fncall, builtin_identifier, identifier, pretty_mapping, pretty_sequence, punctuation,
};
use crate::registry::{default_printer, PrinterError, Registry};
use crate::syntax::Token;
use crate::value::{
    compare_keys, Inspect, SeqKind, Shape, TypeInfo, BOOL, BYTES, DICT, FLOAT, INT, LIST, NONE,
    SET, STR, TUPLE,
};

pub(crate) fn install(registry: &Registry) {
    registry.register(&NONE, pretty_none);
    registry.register(&BOOL, pretty_bool);
    registry.register(&INT, pretty_int);
    registry.register(&FLOAT, pretty_float);
    registry.register(&STR, pretty_str);
    registry.register(&BYTES, pretty_bytes);
    registry.register(&LIST, pretty_sequence_value);
    registry.register(&TUPLE, pretty_sequence_value);
    registry.register(&SET, pretty_sequence_value);
    registry.register(&DICT, pretty_mapping_value);
}

fn pretty_none(value: &dyn Inspect, ctx: &PrettyContext<'_>) -> Result<Doc, PrinterError> {
    match value.shape() {
        Shape::None => Ok(token(Token::KeywordConstant, "None")),
        _ => default_printer(value, ctx),
    }
}

fn pretty_bool(value: &dyn Inspect, ctx: &PrettyContext<'_>) -> Result<Doc, PrinterError> {
    match value.shape() {
        Shape::Bool(true) => Ok(token(Token::KeywordConstant, "True")),
        Shape::Bool(false) => Ok(token(Token::KeywordConstant, "False")),
        _ => default_printer(value, ctx),
    }
}

fn pretty_int(value: &dyn Inspect, ctx: &PrettyContext<'_>) -> Result<Doc, PrinterError> {
    match value.shape() {
        Shape::Int(n) => Ok(token(Token::NumberInt, n.to_string())),
        Shape::Bool(b) => Ok(token(Token::NumberInt, u8::from(b).to_string())),
        _ => default_printer(value, ctx),
    }
}

fn pretty_float(value: &dyn Inspect, ctx: &PrettyContext<'_>) -> Result<Doc, PrinterError> {
    let x = match value.shape() {
        Shape::Float(x) => x,
        _ => return default_printer(value, ctx),
    };
    let special = if x.is_nan() {
        "nan"
    } else if x == f64::INFINITY {
        "inf"
    } else if x == f64::NEG_INFINITY {
        "-inf"
    } else {
        return Ok(token(Token::NumberFloat, format!("{:?}", x)));
    };
    Ok(builtin_identifier("float")
        + punctuation("(")
        + string_literal(special)
        + punctuation(")"))
}

fn pretty_str(value: &dyn Inspect, ctx: &PrettyContext<'_>) -> Result<Doc, PrinterError> {
    match value.shape() {
        Shape::Str(s) => Ok(string_literal(&s)),
        _ => default_printer(value, ctx),
    }
}

fn pretty_bytes(value: &dyn Inspect, ctx: &PrettyContext<'_>) -> Result<Doc, PrinterError> {
    match value.shape() {
        Shape::Bytes(bytes) => Ok(bytes_literal(&bytes)),
        _ => default_printer(value, ctx),
    }
}

fn pretty_sequence_value(
    value: &dyn Inspect,
    ctx: &PrettyContext<'_>,
) -> Result<Doc, PrinterError> {
    match value.shape() {
        Shape::Sequence {
            kind,
            mut items,
            ordered,
        } => {
            if !ordered {
                items.sort_by(|a, b| compare_keys(*a, *b));
            }
            let builtin = match kind {
                SeqKind::List => &LIST,
                SeqKind::Tuple => &TUPLE,
                SeqKind::Set => &SET,
            };
            let doc = pretty_sequence(ctx, kind, &items)?;
            Ok(as_constructor_call(value, ctx, builtin, doc))
        }
        _ => default_printer(value, ctx),
    }
}

fn pretty_mapping_value(value: &dyn Inspect, ctx: &PrettyContext<'_>) -> Result<Doc, PrinterError> {
    match value.shape() {
        Shape::Mapping { entries, ordered } => {
            let doc = pretty_mapping(ctx, &entries, ordered)?;
            Ok(as_constructor_call(value, ctx, &DICT, doc))
        }
        _ => default_printer(value, ctx),
    }
}

/// Types that inherit from a built-in container show their name: `Name([1, 2])`.
fn as_constructor_call(
    value: &dyn Inspect,
    ctx: &PrettyContext<'_>,
    builtin: &TypeInfo,
    doc: Doc,
) -> Doc {
    let type_info = value.type_info();
    if type_info.is(builtin) {
        doc
    } else {
        build_fncall(ctx, identifier(type_info.name), vec![doc], vec![], true)
    }
}

/// Single quotes, unless the string contains single quotes but no double quotes.
fn choose_quote(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double {
        '"'
    } else {
        '\''
    }
}

/// Accumulates the pieces of a string literal, with escape sequences as separate tokens.
struct LiteralBuilder {
    parts: Vec<Doc>,
    run: String,
}

impl LiteralBuilder {
    fn new() -> LiteralBuilder {
        LiteralBuilder {
            parts: Vec::new(),
            run: String::new(),
        }
    }

    fn push_char(&mut self, ch: char) {
        self.run.push(ch);
    }

    fn push_escape(&mut self, escape: String) {
        self.flush();
        self.parts.push(token(Token::StringEscape, escape));
    }

    fn flush(&mut self) {
        if !self.run.is_empty() {
            self.parts.push(text(std::mem::take(&mut self.run)));
        }
    }

    fn finish(mut self, quote: char) -> Doc {
        self.flush();
        let quote = quote.to_string();
        annotate(
            Token::LiteralString,
            text(quote.clone()) + concat(self.parts) + text(quote),
        )
    }
}

/// A quoted string literal, like `'it\'s'` or `"it's"`.
pub fn string_literal(s: &str) -> Doc {
    let quote = choose_quote(s.contains('\''), s.contains('"'));
    let mut literal = LiteralBuilder::new();
    for ch in s.chars() {
        match ch {
            '\\' => literal.push_escape("\\\\".to_owned()),
            '\n' => literal.push_escape("\\n".to_owned()),
            '\r' => literal.push_escape("\\r".to_owned()),
            '\t' => literal.push_escape("\\t".to_owned()),
            _ if ch == quote => literal.push_escape(format!("\\{}", ch)),
            _ if ch.is_control() => literal.push_escape(char_escape(ch)),
            _ => literal.push_char(ch),
        }
    }
    literal.finish(quote)
}

fn char_escape(ch: char) -> String {
    let code = u32::from(ch);
    if code < 0x100 {
        format!("\\x{:02x}", code)
    } else if code < 0x10000 {
        format!("\\u{:04x}", code)
    } else {
        format!("\\U{:08x}", code)
    }
}

/// A bytes literal, like `b'\x00abc'`.
pub fn bytes_literal(bytes: &[u8]) -> Doc {
    let quote = choose_quote(bytes.contains(&b'\''), bytes.contains(&b'"'));
    let mut literal = LiteralBuilder::new();
    for &byte in bytes {
        match byte {
            b'\\' => literal.push_escape("\\\\".to_owned()),
            b'\n' => literal.push_escape("\\n".to_owned()),
            b'\r' => literal.push_escape("\\r".to_owned()),
            b'\t' => literal.push_escape("\\t".to_owned()),
            _ if char::from(byte) == quote => literal.push_escape(format!("\\{}", quote)),
            0x20..=0x7e => literal.push_char(char::from(byte)),
            _ => literal.push_escape(format!("\\x{:02x}", byte)),
        }
    }
    token(Token::StringAffix, "b") + literal.finish(quote)
}
