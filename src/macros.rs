//! Utility macros for the front end.
//!
//! This module defines helper macros used throughout the front end:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_FIXED_HANDLER!` - Creates a tokenizer handler for fixed-text tokens
//!
//! These macros reduce boilerplate in the tokenizer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$text` - The token's source text
/// * `$start` - Position of the first character
/// * `$end` - Position of the last character (inclusive)
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Comma, ",".to_string(), start, end);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $text:expr, $start:expr, $end:expr) => {
        Token {
            kind: $kind,
            text: $text,
            start: $start,
            end: $end,
        }
    };
}

/// Creates a tokenizer handler for fixed-text patterns such as operators
/// and punctuation.
///
/// Generates a handler function that emits a token with the given kind
/// and advances the tokenizer past the matched text.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
/// * `$text` - The literal source text (also used for length)
///
/// # Example
///
/// ```ignore
/// SourcePattern {
///     regex: Regex::new("\\+").unwrap(),
///     handler: MK_FIXED_HANDLER!(TokenKind::Operator(OperatorKind::Plus), "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_FIXED_HANDLER {
    ($kind:expr, $text:literal) => {
        |tokenizer: &mut Tokenizer, _regex: Regex| {
            let (start, end) = tokenizer.span_for($text);
            tokenizer.push(MK_TOKEN!($kind, String::from($text), start, end));
            tokenizer.advance($text);
        }
    };
}
