use crate::geometry::{str_width, Width};
use crate::syntax::Token;
use std::fmt;
use std::ops::{Add, BitOr, BitXor, Shr};
use std::rc::Rc;

/// Describes every way a value could be laid out. A `Doc` is immutable: cloning one is cheap (it
/// shares the underlying node), so the same sub-document may appear any number of times in a
/// larger one.
///
/// Construct docs with the functions in [`doc_constructors`](crate::doc_constructors), or the
/// operator shorthands:
///
/// - `a + b` concatenates,
/// - `a | b` is a [`FlatChoice`](DocNode::FlatChoice) that uses `a` when flat and `b` when broken,
/// - `a ^ b` joins with a hard line break,
/// - `n >> a` indents `a` by `n` on a new line (which is a space-free break when flat).
#[derive(Clone)]
pub struct Doc {
    node: Rc<DocNode>,
    /// Whether this doc contains a hard line break that is guaranteed to be displayed, and thus
    /// forces every enclosing `Group` to be broken.
    breaks: bool,
    /// The width of this doc when displayed flat (ignoring any hard line breaks).
    flat_width: Width,
}

/// The shape of a single [`Doc`] node.
#[derive(Debug)]
pub enum DocNode {
    /// Display nothing.
    Nil,
    /// Literal text. Never contains a newline.
    Text(Text),
    /// Display each doc in order. The first character of each immediately follows the last
    /// character of the one before it.
    Concat(Vec<Doc>),
    /// Indent every line break inside the contained doc by the given number of additional
    /// columns.
    Nest(Width, Doc),
    /// Indent every line break inside the contained doc to the column at which the doc starts.
    Align(Doc),
    /// A potential line break.
    Line(LineKind),
    /// Display the contained doc flat (on one line) if it fits, otherwise broken.
    Group(Doc),
    /// Display `when_flat` if the enclosing group is flat, and `when_broken` otherwise. Hard line
    /// breaks inside either option do not force enclosing groups to break.
    FlatChoice { when_broken: Doc, when_flat: Doc },
    /// Alternating content and separators. Each separator is displayed flat if the content on
    /// either side of it fits on the line, so the contents flow like words in a paragraph.
    Fill(Vec<Doc>),
    /// Mark the contained doc as belonging to some syntactic category, or as carrying a comment.
    /// Has no effect on layout.
    Annotated(Annotation, Doc),
}

/// A piece of literal text, along with its display width.
#[derive(Debug, Clone)]
pub struct Text {
    string: String,
    width: Width,
}

/// The different kinds of line break.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// A space when flat; a newline and indentation when broken.
    Soft,
    /// Nothing when flat; a newline and indentation when broken.
    Break,
    /// Always a newline and indentation. Forces enclosing groups to break.
    Hard,
    /// Always a newline, with no indentation. Forces enclosing groups to break. Used for text that
    /// is already formatted.
    Literal,
}

/// Extra information attached to a span of a doc.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Annotation {
    /// The span should be styled as the given kind of token.
    Token(Token),
    /// The span displays a value that carries a comment. Containers place the comment next to (or
    /// above) the value.
    Comment(String),
}

impl Text {
    pub(crate) fn new(string: String) -> Text {
        Text {
            width: str_width(&string),
            string,
        }
    }

    pub fn str(&self) -> &str {
        &self.string
    }

    /// Display width, in columns (*not* num bytes!)
    pub fn width(&self) -> Width {
        self.width
    }
}

impl Doc {
    pub(crate) fn new(node: DocNode) -> Doc {
        use DocNode::*;

        let (breaks, flat_width) = match &node {
            Nil => (false, 0),
            Text(text) => (false, text.width),
            Line(LineKind::Soft) => (false, 1),
            Line(LineKind::Break) => (false, 0),
            Line(LineKind::Hard | LineKind::Literal) => (true, 0),
            FlatChoice { when_flat, .. } => (false, when_flat.flat_width),
            Nest(_, doc) | Align(doc) | Group(doc) | Annotated(_, doc) => {
                (doc.breaks, doc.flat_width)
            }
            Concat(docs) | Fill(docs) => (
                docs.iter().any(|doc| doc.breaks),
                docs.iter().map(|doc| doc.flat_width).sum(),
            ),
        };
        Doc {
            node: Rc::new(node),
            breaks,
            flat_width,
        }
    }

    /// A group that is broken regardless of whether it would fit.
    pub(crate) fn new_broken_group(body: Doc) -> Doc {
        Doc {
            flat_width: body.flat_width,
            node: Rc::new(DocNode::Group(body)),
            breaks: true,
        }
    }

    pub fn node(&self) -> &DocNode {
        &self.node
    }

    /// Whether this doc can never be displayed on a single line, because it contains a hard line
    /// break (outside of any `FlatChoice`) or an `always_break`.
    pub fn forces_break(&self) -> bool {
        self.breaks
    }

    /// The width this doc would take up if displayed on a single line.
    pub fn flat_width(&self) -> Width {
        self.flat_width
    }

    pub fn is_nil(&self) -> bool {
        matches!(*self.node, DocNode::Nil)
    }

    /// If this doc is annotated with a comment, the comment text and the uncommented doc.
    pub fn comment(&self) -> Option<(&str, &Doc)> {
        match &*self.node {
            DocNode::Annotated(Annotation::Comment(comment), doc) => Some((comment, doc)),
            _ => None,
        }
    }
}

impl fmt::Debug for Doc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Doc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use DocNode::*;

        match &*self.node {
            Nil => write!(f, "ε"),
            Text(text) => write!(f, "'{}'", text.string),
            Concat(docs) => {
                write!(f, "(")?;
                for (i, doc) in docs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    write!(f, "{}", doc)?;
                }
                write!(f, ")")
            }
            Nest(i, doc) => write!(f, "{}⇒({})", i, doc),
            Align(doc) => write!(f, "Align({})", doc),
            Line(LineKind::Soft) => write!(f, "␣↵"),
            Line(LineKind::Break) => write!(f, "↵"),
            Line(LineKind::Hard) => write!(f, "⇩"),
            Line(LineKind::Literal) => write!(f, "⇊"),
            Group(doc) if self.breaks => write!(f, "Broken({})", doc),
            Group(doc) => write!(f, "Group({})", doc),
            FlatChoice {
                when_broken,
                when_flat,
            } => write!(f, "({} | {})", when_flat, when_broken),
            Fill(docs) => {
                write!(f, "Fill(")?;
                for (i, doc) in docs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", doc)?;
                }
                write!(f, ")")
            }
            Annotated(Annotation::Token(token), doc) => write!(f, "{}:{}", token, doc),
            Annotated(Annotation::Comment(comment), doc) => write!(f, "{} #{}", doc, comment),
        }
    }
}

impl Default for Doc {
    fn default() -> Doc {
        crate::doc_constructors::nil()
    }
}

impl From<&str> for Doc {
    fn from(s: &str) -> Doc {
        crate::doc_constructors::text(s)
    }
}

impl From<String> for Doc {
    fn from(s: String) -> Doc {
        crate::doc_constructors::text(s)
    }
}

impl Add<Doc> for Doc {
    type Output = Doc;

    /// Shorthand for `concat`.
    fn add(self, other: Doc) -> Doc {
        crate::doc_constructors::concat([self, other])
    }
}

impl BitOr<Doc> for Doc {
    type Output = Doc;

    /// Shorthand for `flat_choice`, with the flat option on the left.
    fn bitor(self, other: Doc) -> Doc {
        crate::doc_constructors::flat_choice(other, self)
    }
}

impl BitXor<Doc> for Doc {
    type Output = Doc;

    /// Shorthand for `X + hardline() + Y`.
    fn bitxor(self, other: Doc) -> Doc {
        crate::doc_constructors::concat([self, crate::doc_constructors::hardline(), other])
    }
}

impl Shr<Doc> for Width {
    type Output = Doc;

    /// Shorthand for nesting (indented line break, which vanishes when flat).
    fn shr(self, doc: Doc) -> Doc {
        crate::doc_constructors::nest(
            self,
            crate::doc_constructors::concat([crate::doc_constructors::linebreak(), doc]),
        )
    }
}
