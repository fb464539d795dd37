//! Building blocks for printers: call-like, sequence-like, and mapping-like syntax, and comments.
//!
//! These take care of the conventions every printer should follow: nested values are printed
//! through the context one level deeper, containers past the depth limit elide their contents,
//! long containers are truncated, and commented values carry their comments.

use crate::context::PrettyContext;
use crate::doc::Doc;
use crate::doc_constructors::{
    align, always_break, annotate, comment_doc, concat, fill, flat_choice, group, hardline,
    intersperse, linebreak, nest, nil, softline, text, token,
};
use crate::registry::PrinterError;
use crate::syntax::Token;
use crate::value::{compare_keys, Inspect, SeqKind, DICT, LIST, TUPLE};

/// The order to display keyword arguments in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeywordOrder {
    Given,
    Sorted,
}

pub fn punctuation(s: &str) -> Doc {
    token(Token::Punctuation, s)
}

/// The name of a function or constructor.
pub fn identifier(name: &str) -> Doc {
    token(Token::NameFunction, name)
}

/// The name of a built-in function or type, like `set`.
pub fn builtin_identifier(name: &str) -> Doc {
    token(Token::NameBuiltin, name)
}

/// `name=value`
pub fn keyword_arg(name: &str, value: Doc) -> Doc {
    let (value, comment) = split_comment(value);
    let doc = token(Token::NameVariable, name) + token(Token::Operator, "=") + value;
    match comment {
        Some(comment) => comment_doc(doc, comment),
        None => doc,
    }
}

/// `name(arg, key=value)`, printing the arguments through the context.
pub fn pretty_call(
    ctx: &PrettyContext<'_>,
    name: &str,
    args: &[&dyn Inspect],
    kwargs: &[(&str, &dyn Inspect)],
) -> Result<Doc, PrinterError> {
    pretty_call_ordered(ctx, name, args, kwargs, KeywordOrder::Given)
}

/// Like [`pretty_call`], with control over the order of the keyword arguments.
pub fn pretty_call_ordered(
    ctx: &PrettyContext<'_>,
    name: &str,
    args: &[&dyn Inspect],
    kwargs: &[(&str, &dyn Inspect)],
    order: KeywordOrder,
) -> Result<Doc, PrinterError> {
    if ctx.depth_exhausted() {
        return Ok(identifier(name) + punctuation("(") + punctuation("...") + punctuation(")"));
    }
    let child = ctx.nested();
    let arg_docs = args
        .iter()
        .map(|arg| child.pretty(*arg))
        .collect::<Result<Vec<_>, _>>()?;
    let mut kwargs = kwargs.to_vec();
    if order == KeywordOrder::Sorted {
        kwargs.sort_by(|(a, _), (b, _)| a.cmp(b));
    }
    let kwarg_docs = kwargs
        .iter()
        .map(|(name, value)| Ok((name.to_string(), child.pretty(*value)?)))
        .collect::<Result<Vec<_>, PrinterError>>()?;
    let hug_sole_arg = args.len() == 1 && kwargs.is_empty() && is_plain_collection(args[0]);
    Ok(build_fncall(
        ctx,
        identifier(name),
        arg_docs,
        kwarg_docs,
        hug_sole_arg,
    ))
}

fn is_plain_collection(value: &dyn Inspect) -> bool {
    let ty = value.type_info();
    ty.is(&LIST) || ty.is(&TUPLE) || ty.is(&DICT)
}

/// A call from already-built docs.
///
/// If `hug_sole_arg`, a single positional argument is placed directly between the parentheses,
/// so that a collection argument breaks like `name([` ... `])` instead of on its own line.
pub fn build_fncall(
    ctx: &PrettyContext<'_>,
    name: Doc,
    args: Vec<Doc>,
    kwargs: Vec<(String, Doc)>,
    hug_sole_arg: bool,
) -> Doc {
    if args.is_empty() && kwargs.is_empty() {
        return name + punctuation("(") + punctuation(")");
    }
    if hug_sole_arg && args.len() == 1 && kwargs.is_empty() && args[0].comment().is_none() {
        let arg = args.into_iter().next().unwrap_or_default();
        return name + punctuation("(") + arg + punctuation(")");
    }
    let items = args
        .into_iter()
        .chain(
            kwargs
                .into_iter()
                .map(|(name, value)| keyword_arg(&name, value)),
        )
        .collect();
    name + bracket(ctx, "(", comma_separated(items, false, None), ")")
}

/// `[a, b]`, `(a, b)`, or `{a, b}`, printing the items through the context.
///
/// Past `max_seq_len` items, the rest are summarized in a trailing comment. An empty set is
/// `set()`, and a tuple of one item has a trailing comma.
pub fn pretty_sequence(
    ctx: &PrettyContext<'_>,
    kind: SeqKind,
    items: &[&dyn Inspect],
) -> Result<Doc, PrinterError> {
    let (open, close) = match kind {
        SeqKind::List => ("[", "]"),
        SeqKind::Tuple => ("(", ")"),
        SeqKind::Set => ("{", "}"),
    };
    if items.is_empty() {
        return Ok(match kind {
            SeqKind::Set => builtin_identifier("set") + punctuation("(") + punctuation(")"),
            _ => punctuation(open) + punctuation(close),
        });
    }
    if ctx.depth_exhausted() {
        return Ok(punctuation(open) + punctuation("...") + punctuation(close));
    }

    let child = ctx.nested();
    let (shown, hidden) = truncate(items, ctx.max_seq_len());
    let docs = shown
        .iter()
        .map(|item| child.pretty(*item))
        .collect::<Result<Vec<_>, _>>()?;
    let dangle = kind == SeqKind::Tuple && items.len() == 1;
    let body = comma_separated(docs, dangle, more_elements(hidden));
    Ok(bracket(ctx, open, body, close))
}

/// `{key: value}`, printing the entries through the context.
///
/// The entries are sorted by key if the mapping is unordered or the context asks for sorted keys.
/// Sorting happens before truncation, so the displayed entries are the smallest keys.
pub fn pretty_mapping(
    ctx: &PrettyContext<'_>,
    entries: &[(&dyn Inspect, &dyn Inspect)],
    ordered: bool,
) -> Result<Doc, PrinterError> {
    if entries.is_empty() {
        return Ok(punctuation("{") + punctuation("}"));
    }
    if ctx.depth_exhausted() {
        return Ok(punctuation("{") + punctuation("...") + punctuation("}"));
    }

    let mut entries = entries.to_vec();
    if ctx.sort_keys() || !ordered {
        entries.sort_by(|(a, _), (b, _)| compare_keys(*a, *b));
    }
    let child = ctx.nested();
    let (shown, hidden) = truncate(&entries, ctx.max_seq_len());
    let mut pairs = Vec::with_capacity(shown.len());
    for (key, value) in shown {
        pairs.push(mapping_pair(child.pretty(*key)?, child.pretty(*value)?));
    }
    let body = comma_separated(pairs, false, more_elements(hidden));
    Ok(bracket(ctx, "{", body, "}"))
}

fn mapping_pair(key: Doc, value: Doc) -> Doc {
    let (key, key_comment) = split_comment(key);
    let (value, value_comment) = split_comment(value);
    let pair = key + punctuation(":") + text(" ") + value;
    let comment = match (key_comment, value_comment) {
        (None, None) => return pair,
        (Some(comment), None) | (None, Some(comment)) => comment,
        (Some(key_comment), Some(value_comment)) => format!("{} {}", key_comment, value_comment),
    };
    comment_doc(pair, comment)
}

fn split_comment(doc: Doc) -> (Doc, Option<String>) {
    match doc.comment() {
        Some((comment, body)) => (body.clone(), Some(comment.to_owned())),
        None => (doc, None),
    }
}

fn truncate<T>(items: &[T], max_len: Option<usize>) -> (&[T], usize) {
    match max_len {
        Some(max_len) if items.len() > max_len => (&items[..max_len], items.len() - max_len),
        _ => (items, 0),
    }
}

fn more_elements(hidden: usize) -> Option<Doc> {
    if hidden == 0 {
        None
    } else {
        Some(comment_text(&format!("...and {} more elements", hidden)))
    }
}

/// `open` + `body` + `close`, either on one line or with `body` indented on lines of its own.
///
/// A body that could never fit on one line is broken without trying.
pub fn bracket(ctx: &PrettyContext<'_>, open: &str, body: Doc, close: &str) -> Doc {
    let doc = punctuation(open)
        + nest(ctx.indent(), linebreak() + body)
        + linebreak()
        + punctuation(close);
    if doc.flat_width() > ctx.max_width() {
        always_break(doc)
    } else {
        group(doc)
    }
}

/// Join items with commas. Commented items are followed by their comment, which forces a
/// break. A trailing comment, if any, goes on a line of its own after the last item, and also
/// forces a break.
pub fn comma_separated(items: Vec<Doc>, dangle: bool, trailing_comment: Option<Doc>) -> Doc {
    let len = items.len();
    let mut parts = Vec::with_capacity(2 * len + 2);
    let mut has_comments = false;
    for (i, item) in items.into_iter().enumerate() {
        let last = i + 1 == len;
        let comma = if !last || dangle || trailing_comment.is_some() {
            punctuation(",")
        } else {
            nil()
        };
        match item.comment() {
            Some((comment, body)) => {
                has_comments = true;
                parts.push(body.clone() + comma + text("  ") + comment_text(comment));
                if !last {
                    parts.push(hardline());
                }
            }
            None => {
                parts.push(item.clone() + comma);
                if !last {
                    parts.push(softline());
                }
            }
        }
    }
    let has_trailing_comment = trailing_comment.is_some();
    if let Some(trailing_comment) = trailing_comment {
        if !parts.is_empty() {
            parts.push(hardline());
        }
        parts.push(trailing_comment);
    }
    let doc = concat(parts);
    if has_comments || has_trailing_comment {
        always_break(doc)
    } else {
        doc
    }
}

/// A `# comment`, word-wrapped so that continuation lines start with `# ` aligned under the
/// first.
pub fn comment_text(comment: &str) -> Doc {
    let separator = flat_choice(hardline() + text("# "), text(" "));
    let words = comment.split_whitespace().map(text);
    annotate(
        Token::CommentSingle,
        align(text("# ") + fill(intersperse(separator, words))),
    )
}

/// Display the comment of a commented doc after it on the same line if everything fits, and on
/// the line above it otherwise. Docs without comments are returned unchanged.
pub fn place_comment(doc: Doc) -> Doc {
    match doc.comment() {
        Some((comment, body)) => group(flat_choice(
            comment_text(comment) + hardline() + body.clone(),
            body.clone() + text("  ") + comment_text(comment),
        )),
        None => doc,
    }
}
