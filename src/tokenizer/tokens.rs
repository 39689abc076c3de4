use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::Keyword(Keyword::If));
        map.insert("elif", TokenKind::Keyword(Keyword::Elif));
        map.insert("else", TokenKind::Keyword(Keyword::Else));
        map.insert("while", TokenKind::Keyword(Keyword::While));
        map.insert("for", TokenKind::Keyword(Keyword::For));
        map.insert("break", TokenKind::Keyword(Keyword::Break));
        map.insert("continue", TokenKind::Keyword(Keyword::Continue));
        map.insert("return", TokenKind::Keyword(Keyword::Return));
        map.insert("def", TokenKind::Keyword(Keyword::Def));
        map.insert("use", TokenKind::Keyword(Keyword::Use));
        map.insert("var", TokenKind::Keyword(Keyword::Var));
        map.insert("new", TokenKind::Keyword(Keyword::New));
        map.insert("in", TokenKind::Keyword(Keyword::In));
        // Literal words lex as literals, not keywords.
        map.insert("true", TokenKind::Literal(LiteralKind::Bool));
        map.insert("false", TokenKind::Literal(LiteralKind::Bool));
        map.insert("null", TokenKind::Literal(LiteralKind::Null));
        map
    };

    /// Numeric literal suffixes and the value width each one selects.
    /// Bare integers are `Int`, bare decimals are `Double`.
    pub static ref SUFFIX_LOOKUP: HashMap<&'static str, LiteralKind> = {
        let mut map = HashMap::new();
        map.insert("b", LiteralKind::Byte);
        map.insert("s", LiteralKind::Short);
        map.insert("us", LiteralKind::UShort);
        map.insert("u", LiteralKind::UInt);
        map.insert("l", LiteralKind::Long);
        map.insert("ul", LiteralKind::ULong);
        map.insert("f", LiteralKind::Float);
        map.insert("d", LiteralKind::Double);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Keyword {
    If,
    Elif,
    Else,
    While,
    For,
    Break,
    Continue,
    Return,
    Def,
    Use,
    Var,
    New,
    In,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum OperatorKind {
    Assign,        // =
    PlusEquals,    // +=
    MinusEquals,   // -=
    StarEquals,    // *=
    SlashEquals,   // /=
    PercentEquals, // %=

    Equals,        // ==
    NotEquals,     // !=
    LessEquals,    // <=
    GreaterEquals, // >=

    Not, // !
    And, // &&
    Or,  // ||
    Xor, // ^^

    BitAnd, // &
    BitOr,  // |
    BitXor, // ^

    PlusPlus,   // ++
    MinusMinus, // --

    Plus,
    Dash,
    Star,
    Slash,
    Percent,

    Dot,
    OpenSquare,
    CloseSquare,
}

/// Value type inferred for a literal token at lex time, from its suffix,
/// quoting, or decimal point.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum LiteralKind {
    Byte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    Bool,
    Char,
    Str,
    Null,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// Run of spaces and tabs. Preserved; the parser skips it explicitly.
    Whitespace,
    /// `\n`, `\r\n` or `\r`. Statements terminate here.
    LineEnd,
    /// Identifier.
    Word,
    Keyword(Keyword),
    Operator(OperatorKind),
    Literal(LiteralKind),
    OpenParen,
    CloseParen,
    /// `<` and `>` carry their own kinds: the type parser reads them as
    /// generic-list delimiters, the expression parser as comparisons.
    OpenAngle,
    CloseAngle,
    Comma,
    /// `//` to end of line. Preserved like whitespace.
    Comment,
    /// A character no pattern recognizes. Tokenization never fails; the
    /// grammar rejects these as ordinary unexpected tokens.
    Unknown,
    /// Zero-width sentinel, always the final token.
    EndOfSequence,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The source text of the token, exactly as written. Synthesized
    /// tokens (trailing LineEnd, EndOfSequence) have empty text.
    pub text: String,
    pub start: Position,
    /// Position of the last character, inclusive. Equal to `start` for
    /// one-character and zero-width tokens.
    pub end: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?} at {}", self.kind, self.text, self.start)
    }
}

impl Token {
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment)
    }

    /// True at a statement boundary: an explicit line end or the end of
    /// the whole sequence.
    pub fn is_line_boundary(&self) -> bool {
        matches!(self.kind, TokenKind::LineEnd | TokenKind::EndOfSequence)
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }
}
