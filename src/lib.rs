//! Declarative pretty printing of structured values.
//!
//! Printers, registered per type, turn values into [`Doc`]s: abstract descriptions of every way
//! the value could be laid out. The layout engine then picks line breaks to fit a maximum line
//! width and ribbon width, and the style emitter turns the doc's token annotations into colors.
//!
//! ```
//! use pretty_values::{render, RenderOptions};
//! use std::collections::BTreeMap;
//!
//! let mut map = BTreeMap::new();
//! map.insert("numbers", vec![1, 2, 3]);
//! let options = RenderOptions::default();
//! assert_eq!(render(&map, &options).unwrap(), "{'numbers': [1, 2, 3]}");
//! ```

mod builtins;
mod context;
mod doc;
mod geometry;
mod infra;
mod options;
mod pretty_printing;
mod registry;
mod render;
mod style;
mod syntax;
mod value;

pub mod doc_constructors;
pub mod helpers;

pub use context::PrettyContext;
pub use doc::{Annotation, Doc, DocNode, LineKind, Text};
pub use geometry::{str_width, Width};
pub use options::{get_defaults, set_defaults, ConfigError, DefaultsUpdate, RenderOptions};
pub use pretty_printing::{pretty_print, pretty_print_to_string, Layout, Piece};
pub use registry::{
    declare, global_registry, is_registered, printer, register, register_deferred,
    register_deferred_checked, register_predicate, Predicate, PrettyFn, PrinterError, Registry,
    RegistryError, Strictness,
};
pub use render::{pformat, render, render_doc, render_with, RenderError};
pub use style::{emit, AnsiEncoder, Color, ColorTheme, Rgb, Style, StyleEncoder};
pub use syntax::Token;
pub use value::{
    commented, compare_keys, Bytes, Commented, Inspect, SeqKind, Shape, TypeInfo, BOOL, BYTES,
    DICT, FLOAT, INT, LIST, NONE, OBJECT, SET, STR, TUPLE,
};
