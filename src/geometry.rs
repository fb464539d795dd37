use unicode_width::UnicodeWidthStr;

/// Width, measured in terminal columns.
pub type Width = usize;

/// The number of terminal columns `s` occupies when displayed. Wide characters (such as most CJK
/// characters) count as two columns, and zero-width characters count as none.
pub fn str_width(s: &str) -> Width {
    UnicodeWidthStr::width(s)
}

/// The column at which a line indented by `indent` must end, given the page width and the ribbon
/// width (the number of columns of non-indentation content allowed on a line).
pub fn line_limit(indent: Width, max_width: Width, ribbon_width: Width) -> Width {
    max_width.min(indent.saturating_add(ribbon_width))
}
