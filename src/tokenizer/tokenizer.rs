use regex::Regex;

use crate::{Position, MK_FIXED_HANDLER, MK_TOKEN};

use super::sequence::TokenSequence;
use super::tokens::{
    LiteralKind, OperatorKind, Token, TokenKind, RESERVED_LOOKUP, SUFFIX_LOOKUP,
};

pub type PatternHandler = fn(&mut Tokenizer, Regex);

#[derive(Clone)]
pub struct SourcePattern {
    regex: Regex,
    handler: PatternHandler,
}

pub struct Tokenizer {
    patterns: Vec<SourcePattern>,
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    row: u32,
    col: u32,
}

impl Tokenizer {
    pub fn new(source: &str) -> Tokenizer {
        Tokenizer {
            pos: 0,
            row: 0,
            col: 0,
            tokens: vec![],
            patterns: vec![
                SourcePattern { regex: Regex::new("\\r\\n|\\n|\\r").unwrap(), handler: line_end_handler },
                SourcePattern { regex: Regex::new("[ \\t]+").unwrap(), handler: whitespace_handler },
                SourcePattern { regex: Regex::new("//[^\\n\\r]*").unwrap(), handler: comment_handler },
                SourcePattern { regex: Regex::new("[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: word_handler },
                SourcePattern { regex: Regex::new("[0-9]+(\\.[0-9]+)?[a-zA-Z]*").unwrap(), handler: number_handler },
                SourcePattern { regex: Regex::new("\"(\\\\.|[^\"\\\\\\n\\r])*\"").unwrap(), handler: string_handler },
                SourcePattern { regex: Regex::new("'(\\\\.|[^'\\\\\\n\\r])'").unwrap(), handler: char_handler },
                SourcePattern { regex: Regex::new("\\+\\+").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::PlusPlus), "++") },
                SourcePattern { regex: Regex::new("--").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::MinusMinus), "--") },
                SourcePattern { regex: Regex::new("\\+=").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::PlusEquals), "+=") },
                SourcePattern { regex: Regex::new("-=").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::MinusEquals), "-=") },
                SourcePattern { regex: Regex::new("\\*=").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::StarEquals), "*=") },
                SourcePattern { regex: Regex::new("/=").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::SlashEquals), "/=") },
                SourcePattern { regex: Regex::new("%=").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::PercentEquals), "%=") },
                SourcePattern { regex: Regex::new("==").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::Equals), "==") },
                SourcePattern { regex: Regex::new("!=").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::NotEquals), "!=") },
                SourcePattern { regex: Regex::new("<=").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::LessEquals), "<=") },
                SourcePattern { regex: Regex::new(">=").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::GreaterEquals), ">=") },
                SourcePattern { regex: Regex::new("&&").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::And), "&&") },
                SourcePattern { regex: Regex::new("\\|\\|").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::Or), "||") },
                SourcePattern { regex: Regex::new("\\^\\^").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::Xor), "^^") },
                SourcePattern { regex: Regex::new("!").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::Not), "!") },
                SourcePattern { regex: Regex::new("=").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::Assign), "=") },
                SourcePattern { regex: Regex::new("<").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::OpenAngle, "<") },
                SourcePattern { regex: Regex::new(">").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::CloseAngle, ">") },
                SourcePattern { regex: Regex::new("&").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::BitAnd), "&") },
                SourcePattern { regex: Regex::new("\\|").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::BitOr), "|") },
                SourcePattern { regex: Regex::new("\\^").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::BitXor), "^") },
                SourcePattern { regex: Regex::new("\\+").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::Plus), "+") },
                SourcePattern { regex: Regex::new("-").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::Dash), "-") },
                SourcePattern { regex: Regex::new("\\*").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::Star), "*") },
                SourcePattern { regex: Regex::new("/").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::Slash), "/") },
                SourcePattern { regex: Regex::new("%").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::Percent), "%") },
                SourcePattern { regex: Regex::new("\\.").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::Dot), ".") },
                SourcePattern { regex: Regex::new("\\[").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::OpenSquare), "[") },
                SourcePattern { regex: Regex::new("\\]").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::CloseSquare), "]") },
                SourcePattern { regex: Regex::new("\\(").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::OpenParen, "(") },
                SourcePattern { regex: Regex::new("\\)").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::CloseParen, ")") },
                SourcePattern { regex: Regex::new(",").unwrap(), handler: MK_FIXED_HANDLER!(TokenKind::Comma, ",") },
            ],
            source: String::from(source),
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Advances past `text`, which must not contain line breaks.
    pub fn advance(&mut self, text: &str) {
        self.pos += text.len();
        self.col += text.chars().count() as u32;
    }

    /// Start and end positions for a token whose text begins at the
    /// cursor. The end position is inclusive.
    pub fn span_for(&self, text: &str) -> (Position, Position) {
        let chars = text.chars().count() as u32;
        let start = Position::new(self.row, self.col);
        let end = if chars > 1 {
            Position::new(self.row, self.col + chars - 1)
        } else {
            start
        };
        (start, end)
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Wraps the character at the cursor in an Unknown token. This is the
    /// fallback when no pattern matches, so tokenization itself never fails.
    fn push_unknown(&mut self) {
        let text = match self.remainder().chars().next() {
            Some(ch) => ch.to_string(),
            None => return,
        };
        let (start, end) = self.span_for(&text);
        self.push(MK_TOKEN!(TokenKind::Unknown, text.clone(), start, end));
        self.advance(&text);
    }

    /// Appends the synthesized trailing LineEnd (when the source does not
    /// already end with one) and the EndOfSequence sentinel, so every
    /// logical line, including the last, has an end-of-line token.
    fn finish(mut self) -> TokenSequence {
        let has_line_end = matches!(
            self.tokens.last(),
            Some(token) if token.kind == TokenKind::LineEnd
        );
        if !has_line_end {
            let here = Position::new(self.row, self.col);
            self.tokens.push(MK_TOKEN!(TokenKind::LineEnd, String::new(), here, here));
            self.row += 1;
            self.col = 0;
        }

        let here = Position::new(self.row, self.col);
        self.tokens.push(MK_TOKEN!(TokenKind::EndOfSequence, String::new(), here, here));
        TokenSequence::new(self.tokens)
    }
}

fn line_end_handler(tokenizer: &mut Tokenizer, regex: Regex) {
    let matched = regex.find(tokenizer.remainder()).unwrap().as_str().to_string();
    let (start, end) = tokenizer.span_for(&matched);

    tokenizer.push(MK_TOKEN!(TokenKind::LineEnd, matched.clone(), start, end));
    tokenizer.pos += matched.len();
    tokenizer.row += 1;
    tokenizer.col = 0;
}

fn whitespace_handler(tokenizer: &mut Tokenizer, regex: Regex) {
    let matched = regex.find(tokenizer.remainder()).unwrap().as_str().to_string();
    let (start, end) = tokenizer.span_for(&matched);

    tokenizer.push(MK_TOKEN!(TokenKind::Whitespace, matched.clone(), start, end));
    tokenizer.advance(&matched);
}

fn comment_handler(tokenizer: &mut Tokenizer, regex: Regex) {
    let matched = regex.find(tokenizer.remainder()).unwrap().as_str().to_string();
    let (start, end) = tokenizer.span_for(&matched);

    tokenizer.push(MK_TOKEN!(TokenKind::Comment, matched.clone(), start, end));
    tokenizer.advance(&matched);
}

fn word_handler(tokenizer: &mut Tokenizer, regex: Regex) {
    let matched = regex.find(tokenizer.remainder()).unwrap().as_str().to_string();
    let (start, end) = tokenizer.span_for(&matched);

    let kind = match RESERVED_LOOKUP.get(matched.as_str()) {
        Some(kind) => *kind,
        None => TokenKind::Word,
    };

    tokenizer.push(MK_TOKEN!(kind, matched.clone(), start, end));
    tokenizer.advance(&matched);
}

fn number_handler(tokenizer: &mut Tokenizer, regex: Regex) {
    let matched = regex.find(tokenizer.remainder()).unwrap().as_str().to_string();
    let (start, end) = tokenizer.span_for(&matched);

    let digits_end = matched
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(matched.len());
    let suffix = &matched[digits_end..];
    let has_point = matched[..digits_end].contains('.');

    // An unrecognized suffix still lexes as a single literal token; the
    // value conversion reports it when the node is built.
    let kind = match SUFFIX_LOOKUP.get(suffix) {
        Some(kind) => *kind,
        None if has_point => LiteralKind::Double,
        None => LiteralKind::Int,
    };

    tokenizer.push(MK_TOKEN!(TokenKind::Literal(kind), matched.clone(), start, end));
    tokenizer.advance(&matched);
}

fn string_handler(tokenizer: &mut Tokenizer, regex: Regex) {
    let matched = regex.find(tokenizer.remainder()).unwrap().as_str().to_string();
    let (start, end) = tokenizer.span_for(&matched);

    // Escapes stay raw here and are decoded when the literal node is
    // built, so the token text mirrors the source exactly.
    tokenizer.push(MK_TOKEN!(TokenKind::Literal(LiteralKind::Str), matched.clone(), start, end));
    tokenizer.advance(&matched);
}

fn char_handler(tokenizer: &mut Tokenizer, regex: Regex) {
    let matched = regex.find(tokenizer.remainder()).unwrap().as_str().to_string();
    let (start, end) = tokenizer.span_for(&matched);

    tokenizer.push(MK_TOKEN!(TokenKind::Literal(LiteralKind::Char), matched.clone(), start, end));
    tokenizer.advance(&matched);
}

/// Tokenizes `source` completely. Never fails: characters no pattern
/// recognizes become Unknown tokens, and the sequence always ends with a
/// LineEnd followed by the EndOfSequence sentinel.
pub fn tokenize(source: &str) -> TokenSequence {
    let mut tokenizer = Tokenizer::new(source);
    let patterns = tokenizer.patterns.clone();

    while !tokenizer.at_eof() {
        let mut matched = false;

        for pattern in patterns.iter() {
            let match_here = pattern.regex.find(tokenizer.remainder());

            if matches!(match_here, Some(found) if found.start() == 0) {
                (pattern.handler)(&mut tokenizer, pattern.regex.clone());
                matched = true;
                break;
            }
        }

        if !matched {
            tokenizer.push_unknown();
        }
    }

    tokenizer.finish()
}
