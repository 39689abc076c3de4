use super::tokens::{Token, TokenKind};

/// A fully tokenized source, plus the cursor the parser moves through it.
///
/// The cursor holds the index of the last consumed token and starts at -1,
/// before the first token. Reads past either end clamp to the nearest
/// token, so the trailing EndOfSequence sentinel absorbs all overruns.
#[derive(Debug, Clone)]
pub struct TokenSequence {
    tokens: Vec<Token>,
    position: i32,
}

impl TokenSequence {
    /// The sequence must be non-empty; `tokenize` always appends the
    /// EndOfSequence sentinel, so this holds for every produced sequence.
    pub fn new(tokens: Vec<Token>) -> TokenSequence {
        assert!(!tokens.is_empty());
        TokenSequence { tokens, position: -1 }
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn seek(&mut self, position: i32) {
        self.position = position;
    }

    pub fn get(&self, index: i32) -> Option<&Token> {
        if index < 0 {
            return None;
        }
        self.tokens.get(index as usize)
    }

    /// The last consumed token, or None when nothing has been consumed.
    pub fn current(&self) -> Option<&Token> {
        self.get(self.position)
    }

    /// The token `offset` places ahead of the cursor, clamped to the
    /// sequence. `peek(1)` is the next unconsumed token.
    pub fn peek(&self, offset: i32) -> &Token {
        let index = (self.position + offset).clamp(0, self.tokens.len() as i32 - 1);
        &self.tokens[index as usize]
    }

    /// Consumes and returns the next token. Once the cursor reaches the
    /// EndOfSequence sentinel it stays there.
    pub fn advance(&mut self) -> &Token {
        self.position = (self.position + 1).min(self.tokens.len() as i32 - 1);
        &self.tokens[self.position as usize]
    }

    pub fn at_end(&self) -> bool {
        self.peek(1).kind == TokenKind::EndOfSequence
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
