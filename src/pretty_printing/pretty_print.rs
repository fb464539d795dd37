use super::layout::{Layout, Piece};
use crate::doc::{Doc, DocNode, LineKind};
use crate::geometry::{line_limit, Width};
use crate::infra::span;

/// Lay out a document.
///
/// `max_width` is the desired line width, and `ribbon_width` is the desired amount of non-indentation
/// text on any one line. The algorithm will attempt to, but is not guaranteed to, find a layout
/// within those limits: text that is longer than the line just overflows.
///
/// Each group is decided greedily, left to right: it is displayed flat if its flat layout, followed
/// by whatever comes after it up to the next line break, fits.
pub fn pretty_print(doc: &Doc, max_width: Width, ribbon_width: Width) -> Layout<'_> {
    span!("Pretty Print");

    let mut printer = Printer::new(doc, max_width, ribbon_width);
    printer.print();
    Layout::new(printer.pieces)
}

/// Lay out the document and display it as a plain string, ignoring annotations.
pub fn pretty_print_to_string(doc: &Doc, max_width: Width, ribbon_width: Width) -> String {
    pretty_print(doc, max_width, ribbon_width).to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Flat,
    Broken,
}

/// A piece of the document that has not been printed yet, along with the indentation and mode it
/// is to be printed with.
#[derive(Clone, Copy, Debug)]
enum Chunk<'d> {
    Doc {
        indent: Width,
        mode: Mode,
        doc: &'d Doc,
    },
    /// The unprinted remainder of a `Fill`. Always starts with content, not a separator.
    Fill {
        indent: Width,
        mode: Mode,
        items: &'d [Doc],
    },
    /// The end of an annotated span.
    End,
}

struct Printer<'d> {
    max_width: Width,
    ribbon_width: Width,
    /// The column the next piece of text will be printed at.
    col: Width,
    /// The indentation of the current line.
    line_indent: Width,
    /// Unprinted chunks. The last element is the next one to be printed.
    chunks: Vec<Chunk<'d>>,
    pieces: Vec<Piece<'d>>,
}

impl<'d> Printer<'d> {
    fn new(doc: &'d Doc, max_width: Width, ribbon_width: Width) -> Printer<'d> {
        Printer {
            max_width,
            ribbon_width,
            col: 0,
            line_indent: 0,
            chunks: vec![Chunk::Doc {
                indent: 0,
                mode: Mode::Broken,
                doc,
            }],
            pieces: Vec::new(),
        }
    }

    fn print(&mut self) {
        while let Some(chunk) = self.chunks.pop() {
            match chunk {
                Chunk::Doc { indent, mode, doc } => self.print_doc(indent, mode, doc),
                Chunk::Fill {
                    indent,
                    mode,
                    items,
                } => self.print_fill(indent, mode, items),
                Chunk::End => self.pieces.push(Piece::End),
            }
        }
    }

    fn print_doc(&mut self, indent: Width, mode: Mode, doc: &'d Doc) {
        use DocNode::*;

        match doc.node() {
            Nil => (),
            Text(text) => {
                self.pieces.push(Piece::Text(text.str()));
                self.col += text.width();
            }
            Concat(docs) => {
                for doc in docs.iter().rev() {
                    self.chunks.push(Chunk::Doc { indent, mode, doc });
                }
            }
            Nest(amount, doc) => self.chunks.push(Chunk::Doc {
                indent: indent + amount,
                mode,
                doc,
            }),
            Align(doc) => self.chunks.push(Chunk::Doc {
                indent: self.col,
                mode,
                doc,
            }),
            Line(kind) => match (kind, mode) {
                (LineKind::Soft, Mode::Flat) => {
                    self.pieces.push(Piece::Text(" "));
                    self.col += 1;
                }
                (LineKind::Break, Mode::Flat) => (),
                (LineKind::Literal, _) => self.newline(0),
                (_, _) => self.newline(indent),
            },
            Group(body) => {
                let mode = if doc.forces_break() {
                    Mode::Broken
                } else if mode == Mode::Flat {
                    Mode::Flat
                } else {
                    let trial = Chunk::Doc {
                        indent,
                        mode: Mode::Flat,
                        doc: body,
                    };
                    if self.fits(&[trial], true, indent) {
                        Mode::Flat
                    } else {
                        Mode::Broken
                    }
                };
                self.chunks.push(Chunk::Doc {
                    indent,
                    mode,
                    doc: body,
                });
            }
            FlatChoice {
                when_broken,
                when_flat,
            } => {
                let doc = match mode {
                    Mode::Flat => when_flat,
                    Mode::Broken => when_broken,
                };
                self.chunks.push(Chunk::Doc { indent, mode, doc });
            }
            Fill(items) => self.chunks.push(Chunk::Fill {
                indent,
                mode,
                items,
            }),
            Annotated(annotation, doc) => {
                self.pieces.push(Piece::Begin(annotation));
                self.chunks.push(Chunk::End);
                self.chunks.push(Chunk::Doc { indent, mode, doc });
            }
        }
    }

    /// Print the first content item of a fill, and decide whether the separator after it breaks:
    /// it stays flat only if the content on both sides of it fits on the line.
    fn print_fill(&mut self, indent: Width, mode: Mode, items: &'d [Doc]) {
        span!("print_fill");

        let (content, rest) = match items.split_first() {
            None => return,
            Some(split) => split,
        };
        let flat = |doc: &'d Doc| Chunk::Doc {
            indent,
            mode: Mode::Flat,
            doc,
        };
        let content_fits = mode == Mode::Flat || self.fits(&[flat(content)], false, indent);
        let content_mode = if content_fits {
            Mode::Flat
        } else {
            Mode::Broken
        };
        if let Some((separator, rest)) = rest.split_first() {
            let separator_fits = mode == Mode::Flat
                || content_fits
                    && match rest.first() {
                        Some(next) => {
                            self.fits(&[flat(content), flat(separator), flat(next)], false, indent)
                        }
                        None => self.fits(&[flat(content), flat(separator)], false, indent),
                    };
            let separator_mode = if separator_fits {
                Mode::Flat
            } else {
                Mode::Broken
            };
            self.chunks.push(Chunk::Fill {
                indent,
                mode,
                items: rest,
            });
            self.chunks.push(Chunk::Doc {
                indent,
                mode: separator_mode,
                doc: separator,
            });
        }
        self.chunks.push(Chunk::Doc {
            indent,
            mode: content_mode,
            doc: content,
        });
    }

    fn newline(&mut self, indent: Width) {
        self.pieces.push(Piece::Newline(indent));
        self.col = indent;
        self.line_indent = indent;
    }

    /// Determine whether `trial` (followed by the rest of the document, if `lookahead`) fits.
    ///
    /// Fitting means that no line exceeds its limit: `max_width`, or the ribbon width past that
    /// line's indentation, whichever is smaller. The check stops (successfully) at the first line
    /// break whose indentation is at most `indent`. Lines that are indented deeper than that still
    /// belong to the trial, so they are checked too.
    fn fits(&self, trial: &[Chunk<'d>], lookahead: bool, indent: Width) -> bool {
        use DocNode::*;
        span!("fits");

        let min_nesting = self.col.min(indent);
        let mut col = self.col;
        let mut limit = line_limit(self.line_indent, self.max_width, self.ribbon_width);
        let mut stack = trial.iter().rev().copied().collect::<Vec<_>>();
        let mut rest: &[Chunk<'d>] = if lookahead { &self.chunks } else { &[] };

        loop {
            if col > limit {
                return false;
            }
            let chunk = match stack.pop() {
                Some(chunk) => chunk,
                None => match rest.split_last() {
                    None => return true,
                    Some((chunk, more)) => {
                        rest = more;
                        *chunk
                    }
                },
            };
            let (indent, mode, doc) = match chunk {
                Chunk::Doc { indent, mode, doc } => (indent, mode, doc),
                Chunk::Fill {
                    indent,
                    mode,
                    items,
                } => {
                    for doc in items.iter().rev() {
                        stack.push(Chunk::Doc { indent, mode, doc });
                    }
                    continue;
                }
                Chunk::End => continue,
            };

            match doc.node() {
                Nil => (),
                Text(text) => col += text.width(),
                Concat(docs) | Fill(docs) => {
                    for doc in docs.iter().rev() {
                        stack.push(Chunk::Doc { indent, mode, doc });
                    }
                }
                Nest(amount, doc) => stack.push(Chunk::Doc {
                    indent: indent + amount,
                    mode,
                    doc,
                }),
                Align(doc) => stack.push(Chunk::Doc {
                    indent: col,
                    mode,
                    doc,
                }),
                Annotated(_, doc) => stack.push(Chunk::Doc { indent, mode, doc }),
                Group(body) => {
                    // Groups that have not been decided yet are optimistically assumed to be flat.
                    let mode = if doc.forces_break() {
                        Mode::Broken
                    } else {
                        Mode::Flat
                    };
                    stack.push(Chunk::Doc {
                        indent,
                        mode,
                        doc: body,
                    });
                }
                FlatChoice {
                    when_broken,
                    when_flat,
                } => {
                    let doc = match mode {
                        Mode::Flat => when_flat,
                        Mode::Broken => when_broken,
                    };
                    stack.push(Chunk::Doc { indent, mode, doc });
                }
                Line(kind) => {
                    let newline_indent = match (kind, mode) {
                        (LineKind::Soft, Mode::Flat) => {
                            col += 1;
                            continue;
                        }
                        (LineKind::Break, Mode::Flat) => continue,
                        (LineKind::Literal, _) => 0,
                        (_, _) => indent,
                    };
                    if newline_indent <= min_nesting {
                        return true;
                    }
                    col = newline_indent;
                    limit = line_limit(newline_indent, self.max_width, self.ribbon_width);
                }
            }
        }
    }
}
