use crate::doc::Annotation;
use crate::geometry::{str_width, Width};
use crate::infra::span;
use std::fmt;

/// One step of a finished layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Piece<'d> {
    /// Text to display on the current line.
    Text(&'d str),
    /// Start a new line, indented by the given number of spaces. The indentation is only
    /// displayed if the line has any text on it.
    Newline(Width),
    /// The following pieces, up to the matching `End`, belong to an annotated span.
    Begin(&'d Annotation),
    End,
}

/// The result of laying out a [`Doc`](crate::Doc): a flat sequence of text, newlines, and
/// annotation boundaries. Trailing spaces have already been removed from every line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout<'d> {
    pieces: Vec<Piece<'d>>,
}

impl<'d> Layout<'d> {
    pub(crate) fn new(mut pieces: Vec<Piece<'d>>) -> Layout<'d> {
        trim_trailing_spaces(&mut pieces);
        Layout { pieces }
    }

    pub fn pieces(&self) -> &[Piece<'d>] {
        &self.pieces
    }

    /// The plain text of each line, without any styling.
    pub fn lines(&self) -> Vec<String> {
        span!("Layout::lines");

        let mut lines = Vec::new();
        let mut line = String::new();
        let mut pending_indent = 0;
        for piece in &self.pieces {
            match piece {
                Piece::Text(s) if s.is_empty() => (),
                Piece::Text(s) => {
                    push_indent(&mut line, pending_indent);
                    pending_indent = 0;
                    line.push_str(s);
                }
                Piece::Newline(indent) => {
                    lines.push(std::mem::take(&mut line));
                    pending_indent = *indent;
                }
                Piece::Begin(_) | Piece::End => (),
            }
        }
        lines.push(line);
        lines
    }

    /// The display width of the widest line.
    pub fn max_line_width(&self) -> Width {
        self.lines()
            .iter()
            .map(|line| str_width(line))
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Layout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, line) in self.lines().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

pub(crate) fn push_indent(string: &mut String, indent: Width) {
    string.extend(std::iter::repeat(' ').take(indent));
}

/// Strip spaces from the end of every line. A separator like the space after `key:` can end up
/// last on its line when the value that follows it starts with a line break.
fn trim_trailing_spaces(pieces: &mut [Piece]) {
    let mut line_end = pieces.len();
    for i in (0..=pieces.len()).rev() {
        let at_newline = i == 0 || matches!(pieces[i - 1], Piece::Newline(_));
        if !at_newline {
            continue;
        }
        for piece in pieces[i..line_end].iter_mut().rev() {
            if let Piece::Text(s) = piece {
                let line_text: &str = *s;
                *s = line_text.trim_end_matches(' ');
                if !s.is_empty() {
                    break;
                }
            }
        }
        line_end = i.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_spaces_are_trimmed() {
        let layout = Layout::new(vec![
            Piece::Text("key:"),
            Piece::Text(" "),
            Piece::Newline(4),
            Piece::Text("value "),
            Piece::Text(""),
        ]);
        assert_eq!(layout.lines(), vec!["key:", "    value"]);
    }

    #[test]
    fn blank_lines_have_no_indentation() {
        let layout = Layout::new(vec![
            Piece::Text("a"),
            Piece::Newline(8),
            Piece::Newline(4),
            Piece::Text("b"),
        ]);
        assert_eq!(layout.to_string(), "a\n\n    b");
    }
}
