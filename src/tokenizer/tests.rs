//! Unit tests for the tokenizer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, words, and literals
//! - Numeric suffixes and value width inference
//! - Operators and punctuation
//! - Whitespace, comments, and line ends as tokens
//! - Unknown characters and the never-fail guarantee
//! - Cursor behavior of the token sequence

use crate::Position;

use super::tokenizer::tokenize;
use super::tokens::{Keyword, LiteralKind, OperatorKind, Token, TokenKind};

/// The tokens of `source` with whitespace and comments dropped, for
/// grids that only care about significant tokens.
fn significant(source: &str) -> Vec<Token> {
    tokenize(source)
        .tokens()
        .iter()
        .filter(|token| !token.is_trivia())
        .cloned()
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = significant("if elif else while for break continue return def use var new in");

    assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::If));
    assert_eq!(tokens[1].kind, TokenKind::Keyword(Keyword::Elif));
    assert_eq!(tokens[2].kind, TokenKind::Keyword(Keyword::Else));
    assert_eq!(tokens[3].kind, TokenKind::Keyword(Keyword::While));
    assert_eq!(tokens[4].kind, TokenKind::Keyword(Keyword::For));
    assert_eq!(tokens[5].kind, TokenKind::Keyword(Keyword::Break));
    assert_eq!(tokens[6].kind, TokenKind::Keyword(Keyword::Continue));
    assert_eq!(tokens[7].kind, TokenKind::Keyword(Keyword::Return));
    assert_eq!(tokens[8].kind, TokenKind::Keyword(Keyword::Def));
    assert_eq!(tokens[9].kind, TokenKind::Keyword(Keyword::Use));
    assert_eq!(tokens[10].kind, TokenKind::Keyword(Keyword::Var));
    assert_eq!(tokens[11].kind, TokenKind::Keyword(Keyword::New));
    assert_eq!(tokens[12].kind, TokenKind::Keyword(Keyword::In));
    assert_eq!(tokens[13].kind, TokenKind::LineEnd);
    assert_eq!(tokens[14].kind, TokenKind::EndOfSequence);
}

#[test]
fn test_tokenize_words() {
    let tokens = significant("foo bar baz_123 _underscore CamelCase");

    assert_eq!(tokens[0].kind, TokenKind::Word);
    assert_eq!(tokens[0].text, "foo");
    assert_eq!(tokens[1].kind, TokenKind::Word);
    assert_eq!(tokens[1].text, "bar");
    assert_eq!(tokens[2].kind, TokenKind::Word);
    assert_eq!(tokens[2].text, "baz_123");
    assert_eq!(tokens[3].kind, TokenKind::Word);
    assert_eq!(tokens[3].text, "_underscore");
    assert_eq!(tokens[4].kind, TokenKind::Word);
    assert_eq!(tokens[4].text, "CamelCase");
}

#[test]
fn test_tokenize_numbers() {
    let tokens = significant("42 3.14 0 100.5");

    assert_eq!(tokens[0].kind, TokenKind::Literal(LiteralKind::Int));
    assert_eq!(tokens[0].text, "42");
    assert_eq!(tokens[1].kind, TokenKind::Literal(LiteralKind::Double));
    assert_eq!(tokens[1].text, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Literal(LiteralKind::Int));
    assert_eq!(tokens[2].text, "0");
    assert_eq!(tokens[3].kind, TokenKind::Literal(LiteralKind::Double));
    assert_eq!(tokens[3].text, "100.5");
}

#[test]
fn test_tokenize_number_suffixes() {
    let tokens = significant("5b 6s 7us 8u 9l 10ul 2.5f 1d");

    assert_eq!(tokens[0].kind, TokenKind::Literal(LiteralKind::Byte));
    assert_eq!(tokens[1].kind, TokenKind::Literal(LiteralKind::Short));
    assert_eq!(tokens[2].kind, TokenKind::Literal(LiteralKind::UShort));
    assert_eq!(tokens[3].kind, TokenKind::Literal(LiteralKind::UInt));
    assert_eq!(tokens[4].kind, TokenKind::Literal(LiteralKind::Long));
    assert_eq!(tokens[5].kind, TokenKind::Literal(LiteralKind::ULong));
    assert_eq!(tokens[6].kind, TokenKind::Literal(LiteralKind::Float));
    assert_eq!(tokens[7].kind, TokenKind::Literal(LiteralKind::Double));
}

#[test]
fn test_tokenize_unknown_suffix_stays_one_token() {
    let tokens = significant("10z");

    // The token survives with its source text; the value conversion
    // reports the bad suffix when the literal node is built.
    assert_eq!(tokens[0].kind, TokenKind::Literal(LiteralKind::Int));
    assert_eq!(tokens[0].text, "10z");
    assert_eq!(tokens[1].kind, TokenKind::LineEnd);
}

#[test]
fn test_tokenize_strings_keep_source_text() {
    let tokens = significant(r#""hello" "a\nb" """#);

    assert_eq!(tokens[0].kind, TokenKind::Literal(LiteralKind::Str));
    assert_eq!(tokens[0].text, r#""hello""#);
    assert_eq!(tokens[1].kind, TokenKind::Literal(LiteralKind::Str));
    assert_eq!(tokens[1].text, r#""a\nb""#);
    assert_eq!(tokens[2].kind, TokenKind::Literal(LiteralKind::Str));
    assert_eq!(tokens[2].text, r#""""#);
}

#[test]
fn test_tokenize_escaped_quote_in_string() {
    let tokens = significant(r#""quote\"test""#);

    assert_eq!(tokens[0].kind, TokenKind::Literal(LiteralKind::Str));
    assert_eq!(tokens[0].text, r#""quote\"test""#);
    assert_eq!(tokens[1].kind, TokenKind::LineEnd);
}

#[test]
fn test_tokenize_char_literals() {
    let tokens = significant(r"'a' '\n' '\''");

    assert_eq!(tokens[0].kind, TokenKind::Literal(LiteralKind::Char));
    assert_eq!(tokens[0].text, "'a'");
    assert_eq!(tokens[1].kind, TokenKind::Literal(LiteralKind::Char));
    assert_eq!(tokens[1].text, r"'\n'");
    assert_eq!(tokens[2].kind, TokenKind::Literal(LiteralKind::Char));
    assert_eq!(tokens[2].text, r"'\''");
}

#[test]
fn test_tokenize_bool_and_null_literals() {
    let tokens = significant("true false null");

    assert_eq!(tokens[0].kind, TokenKind::Literal(LiteralKind::Bool));
    assert_eq!(tokens[0].text, "true");
    assert_eq!(tokens[1].kind, TokenKind::Literal(LiteralKind::Bool));
    assert_eq!(tokens[1].text, "false");
    assert_eq!(tokens[2].kind, TokenKind::Literal(LiteralKind::Null));
    assert_eq!(tokens[2].text, "null");
}

#[test]
fn test_tokenize_operators() {
    let tokens = significant("+ - * / % == != <= >= = ! && || ^^ & | ^");

    assert_eq!(tokens[0].kind, TokenKind::Operator(OperatorKind::Plus));
    assert_eq!(tokens[1].kind, TokenKind::Operator(OperatorKind::Dash));
    assert_eq!(tokens[2].kind, TokenKind::Operator(OperatorKind::Star));
    assert_eq!(tokens[3].kind, TokenKind::Operator(OperatorKind::Slash));
    assert_eq!(tokens[4].kind, TokenKind::Operator(OperatorKind::Percent));
    assert_eq!(tokens[5].kind, TokenKind::Operator(OperatorKind::Equals));
    assert_eq!(tokens[6].kind, TokenKind::Operator(OperatorKind::NotEquals));
    assert_eq!(tokens[7].kind, TokenKind::Operator(OperatorKind::LessEquals));
    assert_eq!(tokens[8].kind, TokenKind::Operator(OperatorKind::GreaterEquals));
    assert_eq!(tokens[9].kind, TokenKind::Operator(OperatorKind::Assign));
    assert_eq!(tokens[10].kind, TokenKind::Operator(OperatorKind::Not));
    assert_eq!(tokens[11].kind, TokenKind::Operator(OperatorKind::And));
    assert_eq!(tokens[12].kind, TokenKind::Operator(OperatorKind::Or));
    assert_eq!(tokens[13].kind, TokenKind::Operator(OperatorKind::Xor));
    assert_eq!(tokens[14].kind, TokenKind::Operator(OperatorKind::BitAnd));
    assert_eq!(tokens[15].kind, TokenKind::Operator(OperatorKind::BitOr));
    assert_eq!(tokens[16].kind, TokenKind::Operator(OperatorKind::BitXor));
}

#[test]
fn test_tokenize_compound_assignment_and_steps() {
    let tokens = significant("++ -- += -= *= /= %=");

    assert_eq!(tokens[0].kind, TokenKind::Operator(OperatorKind::PlusPlus));
    assert_eq!(tokens[1].kind, TokenKind::Operator(OperatorKind::MinusMinus));
    assert_eq!(tokens[2].kind, TokenKind::Operator(OperatorKind::PlusEquals));
    assert_eq!(tokens[3].kind, TokenKind::Operator(OperatorKind::MinusEquals));
    assert_eq!(tokens[4].kind, TokenKind::Operator(OperatorKind::StarEquals));
    assert_eq!(tokens[5].kind, TokenKind::Operator(OperatorKind::SlashEquals));
    assert_eq!(tokens[6].kind, TokenKind::Operator(OperatorKind::PercentEquals));
}

#[test]
fn test_tokenize_punctuation() {
    let tokens = significant("( ) < > , [ ] .");

    assert_eq!(tokens[0].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].kind, TokenKind::CloseParen);
    assert_eq!(tokens[2].kind, TokenKind::OpenAngle);
    assert_eq!(tokens[3].kind, TokenKind::CloseAngle);
    assert_eq!(tokens[4].kind, TokenKind::Comma);
    assert_eq!(tokens[5].kind, TokenKind::Operator(OperatorKind::OpenSquare));
    assert_eq!(tokens[6].kind, TokenKind::Operator(OperatorKind::CloseSquare));
    assert_eq!(tokens[7].kind, TokenKind::Operator(OperatorKind::Dot));
}

#[test]
fn test_tokenize_comments_are_tokens() {
    let sequence = tokenize("x = 1 // note\ny");
    let tokens = sequence.tokens();

    assert_eq!(tokens[0].kind, TokenKind::Word);
    assert_eq!(tokens[6].kind, TokenKind::Comment);
    assert_eq!(tokens[6].text, "// note");
    assert_eq!(tokens[7].kind, TokenKind::LineEnd);
    assert_eq!(tokens[8].kind, TokenKind::Word);
    assert_eq!(tokens[8].text, "y");
}

#[test]
fn test_tokenize_whitespace_is_preserved() {
    let sequence = tokenize("a  \tb");
    let tokens = sequence.tokens();

    assert_eq!(tokens[0].kind, TokenKind::Word);
    assert_eq!(tokens[1].kind, TokenKind::Whitespace);
    assert_eq!(tokens[1].text, "  \t");
    assert_eq!(tokens[2].kind, TokenKind::Word);
    assert_eq!(tokens[3].kind, TokenKind::LineEnd);
    assert_eq!(tokens[4].kind, TokenKind::EndOfSequence);
    assert_eq!(tokens.len(), 5);
}

#[test]
fn test_tokenize_line_end_flavors() {
    let sequence = tokenize("a\nb\r\nc");
    let tokens = sequence.tokens();

    assert_eq!(tokens[1].kind, TokenKind::LineEnd);
    assert_eq!(tokens[1].text, "\n");
    assert_eq!(tokens[3].kind, TokenKind::LineEnd);
    assert_eq!(tokens[3].text, "\r\n");
    assert_eq!(tokens[4].kind, TokenKind::Word);
    assert_eq!(tokens[4].start, Position::new(2, 0));
}

#[test]
fn test_tokenize_positions() {
    let sequence = tokenize("ab cd\nef");
    let tokens = sequence.tokens();

    assert_eq!(tokens[0].start, Position::new(0, 0));
    assert_eq!(tokens[0].end, Position::new(0, 1));
    assert_eq!(tokens[1].start, Position::new(0, 2));
    assert_eq!(tokens[2].start, Position::new(0, 3));
    assert_eq!(tokens[2].end, Position::new(0, 4));
    assert_eq!(tokens[3].kind, TokenKind::LineEnd);
    assert_eq!(tokens[3].start, Position::new(0, 5));
    assert_eq!(tokens[4].start, Position::new(1, 0));
    assert_eq!(tokens[4].end, Position::new(1, 1));
}

#[test]
fn test_tokenize_appends_line_end_and_sentinel() {
    let sequence = tokenize("x");
    let tokens = sequence.tokens();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].kind, TokenKind::LineEnd);
    assert_eq!(tokens[1].text, "");
    assert_eq!(tokens[1].start, Position::new(0, 1));
    assert_eq!(tokens[2].kind, TokenKind::EndOfSequence);
}

#[test]
fn test_tokenize_no_double_line_end() {
    let sequence = tokenize("x\n");
    let tokens = sequence.tokens();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].kind, TokenKind::LineEnd);
    assert_eq!(tokens[1].text, "\n");
    assert_eq!(tokens[2].kind, TokenKind::EndOfSequence);
}

#[test]
fn test_tokenize_empty_source() {
    let sequence = tokenize("");
    let tokens = sequence.tokens();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::LineEnd);
    assert_eq!(tokens[1].kind, TokenKind::EndOfSequence);
}

#[test]
fn test_tokenize_unrecognized_characters() {
    let tokens = significant("a @ # b");

    // Never fails: each stray character becomes an Unknown token.
    assert_eq!(tokens[0].kind, TokenKind::Word);
    assert_eq!(tokens[1].kind, TokenKind::Unknown);
    assert_eq!(tokens[1].text, "@");
    assert_eq!(tokens[2].kind, TokenKind::Unknown);
    assert_eq!(tokens[2].text, "#");
    assert_eq!(tokens[3].kind, TokenKind::Word);
}

#[test]
fn test_tokenize_unterminated_string() {
    let tokens = significant("\"abc");

    // The lone quote has no pattern, so it degrades to Unknown and the
    // rest of the line lexes normally.
    assert_eq!(tokens[0].kind, TokenKind::Unknown);
    assert_eq!(tokens[0].text, "\"");
    assert_eq!(tokens[1].kind, TokenKind::Word);
    assert_eq!(tokens[1].text, "abc");
}

#[test]
fn test_sequence_cursor_starts_before_first_token() {
    let sequence = tokenize("a b");

    assert_eq!(sequence.position(), -1);
    assert!(sequence.current().is_none());
    assert_eq!(sequence.peek(1).kind, TokenKind::Word);
}

#[test]
fn test_sequence_advance_and_peek() {
    let mut sequence = tokenize("a b");

    assert_eq!(sequence.advance().text, "a");
    assert_eq!(sequence.position(), 0);
    assert_eq!(sequence.peek(1).kind, TokenKind::Whitespace);
    assert_eq!(sequence.peek(2).text, "b");
}

#[test]
fn test_sequence_advance_stops_at_sentinel() {
    let mut sequence = tokenize("a");

    for _ in 0..10 {
        sequence.advance();
    }

    assert_eq!(sequence.position(), sequence.len() as i32 - 1);
    assert_eq!(sequence.peek(1).kind, TokenKind::EndOfSequence);
    assert_eq!(sequence.peek(100).kind, TokenKind::EndOfSequence);
}

#[test]
fn test_sequence_seek_rewinds() {
    let mut sequence = tokenize("a b c");

    sequence.advance();
    sequence.advance();
    sequence.advance();
    assert_eq!(sequence.position(), 2);

    sequence.seek(-1);
    assert_eq!(sequence.position(), -1);
    assert_eq!(sequence.advance().text, "a");
}
