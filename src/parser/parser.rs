use std::rc::Rc;

use crate::ast::arena::{NodeArena, NodeId};
use crate::ast::node::Node;
use crate::errors::errors::{Diagnostic, DiagnosticKind};
use crate::tokenizer::sequence::TokenSequence;
use crate::tokenizer::tokens::{Keyword, Token, TokenKind};
use crate::Position;

use super::expr::parse_expr;
use super::lookups::{
    create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
    StmtHandler, StmtLookup,
};
use super::stmt::parse_stmt;
use super::symbols::{SymbolEntry, SymbolTable};
use super::transaction::{Transaction, TransactionSource};
use super::types::parse_type;

/// How a failed parse attempt wants its enclosing transaction resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// Nothing usable here. Roll the transaction back; the cursor returns
    /// to where the attempt began and no diagnostics survive.
    NeedRollback,
    /// The production committed to its position (a keyword was consumed)
    /// but cannot produce a node. Its diagnostics must survive, so the
    /// transaction commits and the cursor stands where the attempt died.
    NeedCommit,
    /// The tokens belong to an enclosing production (a lone `else` or
    /// `elif`). Nothing was consumed and nothing was diagnosed.
    NeedPass,
}

pub type ParseResult<T> = Result<T, ParseFailure>;

/// Everything a whole-file parse produces. The parser itself never fails;
/// malformed input surfaces as diagnostics next to whatever nodes could
/// still be built.
#[derive(Debug)]
pub struct ParseOutput {
    pub roots: Vec<NodeId>,
    pub arena: NodeArena,
    pub diagnostics: Vec<Diagnostic>,
    pub symbols: SymbolTable,
}

pub struct Parser {
    tokens: TokenSequence,
    arena: NodeArena,
    transactions: TransactionSource,
    file: Rc<String>,
    module: Rc<String>,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a parser over a token sequence with all handler lookups
    /// registered.
    ///
    /// # Arguments
    ///
    /// * `tokens` - The sequence to parse; its cursor is used as-is
    /// * `file` - File name attached to every diagnostic
    /// * `module` - Module name attached to every diagnostic
    pub fn new(tokens: TokenSequence, file: Rc<String>, module: Rc<String>) -> Parser {
        let mut parser = Parser {
            tokens,
            arena: NodeArena::new(),
            transactions: TransactionSource::new(),
            file,
            module,
            stmt_lookup: StmtLookup::new(),
            nud_lookup: NUDLookup::new(),
            led_lookup: LEDLookup::new(),
            binding_power_lookup: BPLookup::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Index of the last consumed token, -1 before the first.
    pub fn position(&self) -> i32 {
        self.tokens.position()
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Committed diagnostics, in the order they were staged.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.transactions.diagnostics()
    }

    /// Committed node-to-source records.
    pub fn symbols(&self) -> &SymbolTable {
        self.transactions.symbols()
    }

    pub fn tokens(&self) -> &TokenSequence {
        &self.tokens
    }

    /// True when only the EndOfSequence sentinel remains.
    pub fn at_end(&self) -> bool {
        self.tokens.at_end()
    }

    /// The next unconsumed token that is not whitespace or a comment.
    /// Line ends are significant and are returned.
    pub fn peek_significant(&self) -> &Token {
        let mut offset = 1;
        while self.tokens.peek(offset).is_trivia() {
            offset += 1;
        }
        self.tokens.peek(offset)
    }

    pub fn peek_significant_kind(&self) -> TokenKind {
        self.peek_significant().kind
    }

    /// The `n`th significant token ahead of the cursor, 1-based. Clamps to
    /// the EndOfSequence sentinel.
    pub fn peek_nth_significant(&self, n: usize) -> &Token {
        let mut remaining = n;
        let mut offset = 1;
        loop {
            let token = self.tokens.peek(offset);
            if !token.is_trivia() {
                remaining -= 1;
                if remaining == 0 {
                    return self.tokens.peek(offset);
                }
                if token.kind == TokenKind::EndOfSequence {
                    return self.tokens.peek(offset);
                }
            }
            offset += 1;
        }
    }

    /// Consumes through the next significant token and returns it.
    pub fn next_significant(&mut self) -> Token {
        loop {
            let token = self.tokens.advance().clone();
            if !token.is_trivia() {
                return token;
            }
        }
    }

    /// Consumes whitespace, comments, and line ends until the next
    /// unconsumed token is something else.
    pub fn skip_blank_lines(&mut self) {
        loop {
            let next = self.tokens.peek(1);
            if next.is_trivia() || next.kind == TokenKind::LineEnd {
                self.tokens.advance();
            } else {
                return;
            }
        }
    }

    /// Consumes the rest of the current line, including its LineEnd, and
    /// returns the terminator reached. At the end of the sequence the
    /// sentinel is returned without being consumed.
    pub fn skip_to_line_end(&mut self) -> Token {
        loop {
            let next = self.tokens.peek(1).clone();
            match next.kind {
                TokenKind::EndOfSequence => return next,
                TokenKind::LineEnd => {
                    self.tokens.advance();
                    return next;
                }
                _ => {
                    self.tokens.advance();
                }
            }
        }
    }

    /// Column of the first significant token on the given row. This is the
    /// indentation a block under a header on that row must exceed.
    pub fn line_first_col(&self, row: u32) -> u32 {
        for token in self.tokens.tokens() {
            if token.start.row == row && !token.is_trivia() {
                return token.start.col;
            }
        }
        0
    }

    /// Allocates a node and stages its symbol record in the current
    /// transaction. `tokens` are the tokens the node itself owns; child
    /// links come from the node structure.
    pub fn add_node(&mut self, node: Node, tokens: Vec<Token>) -> NodeId {
        let children = node.child_ids();
        let id = self.arena.alloc(node);
        self.transactions.stage_symbol(id, SymbolEntry { tokens, children });
        id
    }

    /// Stages a diagnostic in the current transaction.
    pub fn stage_diagnostic(&mut self, kind: DiagnosticKind, start: Position, end: Position) {
        let diagnostic =
            Diagnostic::new(kind, start, end, Rc::clone(&self.file), Rc::clone(&self.module));
        self.transactions.stage_diagnostic(diagnostic);
    }

    /// Opens a transaction over the cursor and the arena.
    pub fn begin(&mut self) -> Transaction {
        self.transactions.begin(self.tokens.position(), self.arena.len())
    }

    /// Commits a transaction; consumed tokens, staged diagnostics, and
    /// staged symbol records all stand.
    pub fn commit(&mut self, transaction: Transaction) {
        self.transactions.commit(transaction);
    }

    /// Rolls a transaction back: the cursor returns to where `begin` left
    /// it, speculative nodes are truncated away, and staged diagnostics
    /// and symbol records are discarded.
    pub fn rollback(&mut self, transaction: Transaction) {
        let snapshot = self.transactions.rollback(transaction);
        self.tokens.seek(snapshot.position);
        self.arena.truncate(snapshot.nodes);
    }

    /// Attempts one statement inside its own transaction.
    ///
    /// # Returns
    ///
    /// Ok with the statement's node on success. On failure the transaction
    /// is resolved the way the `ParseFailure` demands: `NeedCommit` keeps
    /// its diagnostics and cursor progress, the other two leave no trace.
    pub fn try_statement(&mut self) -> ParseResult<NodeId> {
        let transaction = self.begin();
        match parse_stmt(self) {
            Ok(id) => {
                self.commit(transaction);
                Ok(id)
            }
            Err(ParseFailure::NeedCommit) => {
                self.commit(transaction);
                Err(ParseFailure::NeedCommit)
            }
            Err(failure) => {
                self.rollback(transaction);
                Err(failure)
            }
        }
    }

    /// Attempts one expression inside its own transaction. Expressions
    /// never consume line ends; the terminator is the caller's problem.
    pub fn try_expression(&mut self) -> ParseResult<NodeId> {
        let transaction = self.begin();
        match parse_expr(self, BindingPower::Default) {
            Ok(id) => {
                self.commit(transaction);
                Ok(id)
            }
            Err(failure) => {
                self.rollback(transaction);
                Err(failure)
            }
        }
    }

    /// Attempts one type reference inside its own transaction.
    pub fn try_type(&mut self) -> ParseResult<NodeId> {
        let transaction = self.begin();
        match parse_type(self) {
            Ok(id) => {
                self.commit(transaction);
                Ok(id)
            }
            Err(failure) => {
                self.rollback(transaction);
                Err(failure)
            }
        }
    }

    /// Registers an infix/postfix handler with its binding power.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a prefix handler. The binding power slot is only filled
    /// when no infix registration claimed it first, so `-` keeps its
    /// additive power while still starting a prefix expression.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.binding_power_lookup.entry(kind).or_insert(BindingPower::Primary);
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a leading token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.binding_power_lookup.entry(kind).or_insert(BindingPower::Default);
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Binding power of a token kind; unregistered kinds bind at Default
    /// and therefore never continue an expression.
    pub fn binding_power_of(&self, kind: TokenKind) -> BindingPower {
        *self.binding_power_lookup.get(&kind).unwrap_or(&BindingPower::Default)
    }

    /// Consumes lines until one starts with a token that can open a
    /// top-level statement, or the sequence ends.
    fn skip_to_top_level(&mut self) {
        loop {
            self.skip_to_line_end();
            self.skip_blank_lines();
            match self.tokens.peek(1).kind {
                TokenKind::EndOfSequence
                | TokenKind::Keyword(Keyword::Use)
                | TokenKind::Keyword(Keyword::Def) => return,
                _ => {}
            }
        }
    }
}

/// Renders a token for a diagnostic message. Line boundaries get a
/// readable name instead of their raw text.
pub fn describe_token(token: &Token) -> String {
    match token.kind {
        TokenKind::LineEnd => String::from("end of line"),
        TokenKind::EndOfSequence => String::from("end of input"),
        _ => token.text.clone(),
    }
}

/// Parses a whole file. Only `use` and `def` may open a top-level
/// statement; anything else gets one diagnostic and the driver resumes at
/// the next line that starts with a top-level keyword. Never fails and
/// never panics on any input.
///
/// # Arguments
///
/// * `tokens` - Output of `tokenize`
/// * `file` - File name attached to diagnostics
/// * `module` - Module name attached to diagnostics
pub fn parse(tokens: TokenSequence, file: Rc<String>, module: Rc<String>) -> ParseOutput {
    let mut parser = Parser::new(tokens, file, module);
    let mut roots = Vec::new();

    loop {
        parser.skip_blank_lines();
        if parser.at_end() {
            break;
        }

        let next = parser.peek_significant().clone();
        match next.kind {
            TokenKind::Keyword(Keyword::Use) | TokenKind::Keyword(Keyword::Def) => {
                match parser.try_statement() {
                    Ok(root) => roots.push(root),
                    Err(ParseFailure::NeedCommit) => parser.skip_to_top_level(),
                    Err(_) => {
                        parser.stage_diagnostic(
                            DiagnosticKind::UnexpectedToken { token: next.text.clone() },
                            next.start,
                            next.end,
                        );
                        parser.skip_to_top_level();
                    }
                }
            }
            _ => {
                parser.stage_diagnostic(
                    DiagnosticKind::UnexpectedToken { token: next.text.clone() },
                    next.start,
                    next.end,
                );
                parser.skip_to_top_level();
            }
        }
    }

    let Parser { arena, transactions, .. } = parser;
    let (diagnostics, symbols) = transactions.into_parts();
    ParseOutput { roots, arena, diagnostics, symbols }
}
