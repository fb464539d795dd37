//! Constructors for [`Doc`]s. None of them can fail, and all of them are pure.

use crate::doc::{Annotation, Doc, DocNode, LineKind, Text};
use crate::geometry::Width;
use crate::syntax::Token;

/// Display nothing.
pub fn nil() -> Doc {
    Doc::new(DocNode::Nil)
}

/// Literal text. Any newlines in `s` become hard line breaks.
pub fn text(s: impl Into<String>) -> Doc {
    let string = s.into();
    if string.is_empty() {
        return nil();
    }
    if !string.contains('\n') {
        return Doc::new(DocNode::Text(Text::new(string)));
    }
    let mut docs = Vec::new();
    for (i, line) in string.split('\n').enumerate() {
        if i > 0 {
            docs.push(hardline());
        }
        if !line.is_empty() {
            docs.push(Doc::new(DocNode::Text(Text::new(line.to_owned()))));
        }
    }
    concat(docs)
}

/// Display each doc in order. Nested concatenations are flattened, and `nil`s are dropped.
pub fn concat(docs: impl IntoIterator<Item = Doc>) -> Doc {
    let mut flattened = Vec::new();
    for doc in docs {
        match doc.node() {
            DocNode::Nil => (),
            DocNode::Concat(inner) => flattened.extend(inner.iter().cloned()),
            _ => flattened.push(doc),
        }
    }
    match flattened.len() {
        0 => nil(),
        1 => flattened.pop().unwrap_or_default(),
        _ => Doc::new(DocNode::Concat(flattened)),
    }
}

/// Indent every line break inside `doc` by `amount` additional columns.
pub fn nest(amount: Width, doc: Doc) -> Doc {
    if doc.is_nil() {
        return doc;
    }
    Doc::new(DocNode::Nest(amount, doc))
}

/// Indent every line break inside `doc` to the column at which `doc` starts.
pub fn align(doc: Doc) -> Doc {
    Doc::new(DocNode::Align(doc))
}

/// Like `align`, but with line breaks indented `amount` columns past the start of `doc`.
pub fn hang(amount: Width, doc: Doc) -> Doc {
    align(nest(amount, doc))
}

/// A space when flat, a newline when broken.
pub fn softline() -> Doc {
    Doc::new(DocNode::Line(LineKind::Soft))
}

/// Nothing when flat, a newline when broken.
pub fn linebreak() -> Doc {
    Doc::new(DocNode::Line(LineKind::Break))
}

/// Always a newline.
pub fn hardline() -> Doc {
    Doc::new(DocNode::Line(LineKind::Hard))
}

/// Always a newline, without indentation.
pub fn literalline() -> Doc {
    Doc::new(DocNode::Line(LineKind::Literal))
}

/// Display `doc` on one line if it fits, otherwise break its lines.
pub fn group(doc: Doc) -> Doc {
    if doc.is_nil() {
        return doc;
    }
    Doc::new(DocNode::Group(doc))
}

/// A group that is always broken. Like a hard line break, this forces every enclosing group to
/// break as well, but nested groups may still be displayed flat.
pub fn always_break(doc: Doc) -> Doc {
    Doc::new_broken_group(doc)
}

/// Display `when_flat` inside a flat group, and `when_broken` otherwise.
pub fn flat_choice(when_broken: Doc, when_flat: Doc) -> Doc {
    Doc::new(DocNode::FlatChoice {
        when_broken,
        when_flat,
    })
}

/// Alternating content and separators (typically `softline()`s): `[word, sep, word, sep, word]`.
/// Each separator breaks only if the content after it would not fit on the line.
pub fn fill(docs: impl IntoIterator<Item = Doc>) -> Doc {
    let docs = docs.into_iter().collect::<Vec<_>>();
    if docs.is_empty() {
        return nil();
    }
    Doc::new(DocNode::Fill(docs))
}

/// Mark `doc` as the given kind of token, for styling.
pub fn annotate(token: Token, doc: Doc) -> Doc {
    Doc::new(DocNode::Annotated(Annotation::Token(token), doc))
}

/// Attach a comment to `doc`. The containing sequence or call decides where to display it.
pub fn comment_doc(doc: Doc, comment: impl Into<String>) -> Doc {
    Doc::new(DocNode::Annotated(Annotation::Comment(comment.into()), doc))
}

/// Text styled as the given kind of token.
pub fn token(token: Token, s: impl Into<String>) -> Doc {
    annotate(token, text(s))
}

/// Interleave `separator` between each doc.
pub fn intersperse(separator: Doc, docs: impl IntoIterator<Item = Doc>) -> Vec<Doc> {
    let mut result = Vec::new();
    for (i, doc) in docs.into_iter().enumerate() {
        if i > 0 {
            result.push(separator.clone());
        }
        result.push(doc);
    }
    result
}
