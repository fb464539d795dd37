mod layout;
mod pretty_print;

pub(crate) use layout::push_indent;
pub use layout::{Layout, Piece};
pub use pretty_print::{pretty_print, pretty_print_to_string};
