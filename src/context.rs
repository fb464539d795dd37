use crate::doc::Doc;
use crate::doc_constructors::{comment_doc, token};
use crate::geometry::Width;
use crate::options::RenderOptions;
use crate::registry::{PrinterError, Registry};
use crate::syntax::Token;
use crate::value::Inspect;
use std::rc::Rc;

/// The state of a render, as seen by one printer: the render's constraints, plus how deep the
/// value being printed is nested and which values enclose it.
///
/// Contexts are never modified. Printers produce a new context for their children with
/// [`nested`](PrettyContext::nested), and [`pretty`](PrettyContext::pretty) produces a new one
/// for each shared value it enters, so siblings never see each other's state.
#[derive(Clone)]
pub struct PrettyContext<'a> {
    registry: &'a Registry,
    options: &'a RenderOptions,
    depth: usize,
    visiting: Option<Rc<Visit>>,
}

/// A link in the chain of shared values currently being printed, innermost first.
struct Visit {
    identity: usize,
    parent: Option<Rc<Visit>>,
}

impl<'a> PrettyContext<'a> {
    pub fn new(registry: &'a Registry, options: &'a RenderOptions) -> PrettyContext<'a> {
        PrettyContext {
            registry,
            options,
            depth: 0,
            visiting: None,
        }
    }

    /// Build the doc for `value` with its registered printer.
    ///
    /// If `value` is already being printed further up (it contains itself), this is a
    /// placeholder instead. If `value` has a comment, the doc is annotated with it.
    pub fn pretty(&self, value: &dyn Inspect) -> Result<Doc, PrinterError> {
        let child = match value.identity() {
            Some(identity) if self.is_visiting(identity) => {
                return Ok(recursion_placeholder(value, identity));
            }
            Some(identity) => PrettyContext {
                visiting: Some(Rc::new(Visit {
                    identity,
                    parent: self.visiting.clone(),
                })),
                ..self.clone()
            },
            None => self.clone(),
        };
        let printer = self.registry.resolve(value);
        let doc = printer(value, &child)?;
        Ok(match value.comment() {
            Some(comment) => comment_doc(doc, comment),
            None => doc,
        })
    }

    /// The context for the contents of a container.
    pub fn nested(&self) -> PrettyContext<'a> {
        PrettyContext {
            depth: self.depth + 1,
            ..self.clone()
        }
    }

    /// Whether containers at this depth should elide their contents.
    pub fn depth_exhausted(&self) -> bool {
        self.options
            .max_depth
            .map_or(false, |max_depth| self.depth >= max_depth)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn indent(&self) -> Width {
        self.options.indent
    }

    pub fn max_width(&self) -> Width {
        self.options.max_width
    }

    pub fn max_seq_len(&self) -> Option<usize> {
        self.options.max_seq_len
    }

    pub fn sort_keys(&self) -> bool {
        self.options.sort_keys
    }

    pub fn options(&self) -> &'a RenderOptions {
        self.options
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    fn is_visiting(&self, identity: usize) -> bool {
        let mut visit = self.visiting.as_deref();
        while let Some(link) = visit {
            if link.identity == identity {
                return true;
            }
            visit = link.parent.as_deref();
        }
        false
    }
}

fn recursion_placeholder(value: &dyn Inspect, identity: usize) -> Doc {
    tracing::debug!(identity, "cut off a recursive value");
    token(
        Token::NameEntity,
        format!(
            "<Recursion on {} with id={:#x}>",
            value.type_info().name,
            identity
        ),
    )
}
