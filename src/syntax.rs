use std::fmt;

/// The syntactic category of a span of output, used as the style tag of
/// [`Annotation::Token`](crate::Annotation::Token). A [`StyleEncoder`](crate::StyleEncoder)
/// decides how each category is displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// `None`, `True`, `False`
    KeywordConstant,
    /// Names of built-in types and functions, like `set` or `float`.
    NameBuiltin,
    /// Placeholders for values that are not shown, like recursion markers.
    NameEntity,
    /// Names of called functions and constructors.
    NameFunction,
    /// Keyword argument names.
    NameVariable,
    LiteralString,
    /// String prefixes, like the `b` of `b'bytes'`.
    StringAffix,
    StringEscape,
    NumberFloat,
    NumberInt,
    Operator,
    Punctuation,
    CommentSingle,
}

impl Token {
    pub const ALL: [Token; 13] = [
        Token::KeywordConstant,
        Token::NameBuiltin,
        Token::NameEntity,
        Token::NameFunction,
        Token::NameVariable,
        Token::LiteralString,
        Token::StringAffix,
        Token::StringEscape,
        Token::NumberFloat,
        Token::NumberInt,
        Token::Operator,
        Token::Punctuation,
        Token::CommentSingle,
    ];
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Token::*;

        let name = match self {
            KeywordConstant => "keyword.constant",
            NameBuiltin => "name.builtin",
            NameEntity => "name.entity",
            NameFunction => "name.function",
            NameVariable => "name.variable",
            LiteralString => "literal.string",
            StringAffix => "string.affix",
            StringEscape => "string.escape",
            NumberFloat => "number.float",
            NumberInt => "number.int",
            Operator => "operator",
            Punctuation => "punctuation",
            CommentSingle => "comment.single",
        };
        write!(f, "{}", name)
    }
}
