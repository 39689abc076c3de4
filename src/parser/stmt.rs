use crate::ast::arena::NodeId;
use crate::ast::node::Node;
use crate::errors::errors::DiagnosticKind;
use crate::tokenizer::tokens::{Keyword, Token, TokenKind};

use super::expr::{expr_or_empty, parse_expr};
use super::lookups::BindingPower;
use super::parser::{describe_token, ParseFailure, ParseResult, Parser};
use super::types::{parse_dotted_name, parse_type};

/// How a parenthesized header ended: cleanly closed, or recovered by
/// skipping the rest of the line (in which case the body is empty and
/// already accounted for).
enum HeaderEnd {
    Closed,
    Skipped,
}

pub fn parse_stmt(parser: &mut Parser) -> ParseResult<NodeId> {
    let kind = parser.peek_significant_kind();
    if parser.get_stmt_lookup().contains_key(&kind) {
        return parser.get_stmt_lookup().get(&kind).unwrap()(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;
    finish_statement(parser);
    Ok(expr)
}

/// Consumes the statement's line end. Junk before it gets one warning and
/// the rest of the line is dropped. `else`/`elif` are left alone; an
/// enclosing chain may claim them on the same line.
fn finish_statement(parser: &mut Parser) {
    let next = parser.peek_significant().clone();
    match next.kind {
        TokenKind::LineEnd => {
            parser.next_significant();
        }
        TokenKind::EndOfSequence => {}
        TokenKind::Keyword(Keyword::Else) | TokenKind::Keyword(Keyword::Elif) => {}
        _ => {
            parser.stage_diagnostic(
                DiagnosticKind::TrailingContent { token: next.text.clone() },
                next.start,
                next.end,
            );
            parser.skip_to_line_end();
        }
    }
}

pub fn parse_if_stmt(parser: &mut Parser) -> ParseResult<NodeId> {
    let if_clause = parse_clause(parser)?;

    let mut elif_clauses = Vec::new();
    let mut else_body = None;

    loop {
        // Probe for a continuation across blank lines in a child
        // transaction; when none follows, the rollback un-consumes the
        // skipped lines.
        let transaction = parser.begin();
        parser.skip_blank_lines();
        match parser.peek_significant_kind() {
            TokenKind::Keyword(Keyword::Elif) => match parse_clause(parser) {
                Ok(clause) => {
                    parser.commit(transaction);
                    elif_clauses.push(clause);
                }
                Err(ParseFailure::NeedCommit) => {
                    parser.commit(transaction);
                    break;
                }
                Err(_) => {
                    parser.rollback(transaction);
                    break;
                }
            },
            TokenKind::Keyword(Keyword::Else) => {
                let else_token = parser.next_significant();
                let header_col = parser.line_first_col(else_token.start.row);
                else_body = Some(parse_body(parser, header_col));
                parser.commit(transaction);
                break;
            }
            _ => {
                parser.rollback(transaction);
                break;
            }
        }
    }

    Ok(parser.add_node(Node::Condition { if_clause, elif_clauses, else_body }, Vec::new()))
}

/// One `if` or `elif` arm: keyword, parenthesized predicate, body.
fn parse_clause(parser: &mut Parser) -> ParseResult<NodeId> {
    let keyword = parser.next_significant();
    let header_col = parser.line_first_col(keyword.start.row);

    let (predicate, header) = parse_condition_parens(parser)?;
    let body = match header {
        HeaderEnd::Closed => parse_body(parser, header_col),
        HeaderEnd::Skipped => empty_body(parser),
    };

    Ok(parser.add_node(Node::Clause { predicate, body }, vec![keyword]))
}

/// `( predicate )` after a header keyword. No open paren at all makes the
/// whole header unusable: one diagnostic, then NeedCommit. A missing
/// predicate or a missing close paren recovers in place.
fn parse_condition_parens(parser: &mut Parser) -> ParseResult<(NodeId, HeaderEnd)> {
    let next = parser.peek_significant().clone();
    if next.kind != TokenKind::OpenParen {
        parser.stage_diagnostic(
            DiagnosticKind::ExpectedCondition { found: describe_token(&next) },
            next.start,
            next.end,
        );
        return Err(ParseFailure::NeedCommit);
    }

    let open = parser.next_significant();
    let predicate = expr_or_empty(parser, BindingPower::Default)?;
    let header = finish_header(parser, &open);
    Ok((predicate, header))
}

/// Expects the closing paren of a header. Anything else drops the rest of
/// the line with one diagnostic spanning the opener through end of line.
fn finish_header(parser: &mut Parser, open: &Token) -> HeaderEnd {
    if parser.peek_significant_kind() == TokenKind::CloseParen {
        parser.next_significant();
        return HeaderEnd::Closed;
    }

    let terminator = parser.skip_to_line_end();
    parser.stage_diagnostic(DiagnosticKind::MissingCloseParen, open.start, terminator.start);
    HeaderEnd::Skipped
}

fn empty_body(parser: &mut Parser) -> NodeId {
    parser.add_node(Node::Body { statements: Vec::new() }, Vec::new())
}

/// A header's body: either a single statement on the same line, or an
/// indented block on the following lines. Always produces a Body node.
fn parse_body(parser: &mut Parser, header_col: u32) -> NodeId {
    let next = parser.peek_significant().clone();
    if !next.is_line_boundary() {
        return match parse_stmt(parser) {
            Ok(stmt) => parser.add_node(Node::Body { statements: vec![stmt] }, Vec::new()),
            Err(ParseFailure::NeedPass) => {
                // A lone else/elif here belongs to the enclosing chain;
                // leave it for the chain to claim.
                parser.stage_diagnostic(
                    DiagnosticKind::ExpectedBody { found: describe_token(&next) },
                    next.start,
                    next.end,
                );
                empty_body(parser)
            }
            Err(ParseFailure::NeedCommit) => {
                parser.skip_to_line_end();
                empty_body(parser)
            }
            Err(ParseFailure::NeedRollback) => {
                parser.stage_diagnostic(
                    DiagnosticKind::ExpectedBody { found: describe_token(&next) },
                    next.start,
                    next.end,
                );
                parser.skip_to_line_end();
                empty_body(parser)
            }
        };
    }

    parse_block(parser, header_col)
}

/// Statements on the lines after a header, at any column deeper than the
/// header's first token. Blank and comment-only lines never end a block;
/// each candidate line is probed in a child transaction so skipped blanks
/// do not leak past the block's end.
fn parse_block(parser: &mut Parser, header_col: u32) -> NodeId {
    let mut statements = Vec::new();

    loop {
        let transaction = parser.begin();
        parser.skip_blank_lines();
        let next = parser.peek_significant().clone();
        if next.kind == TokenKind::EndOfSequence || next.start.col <= header_col {
            parser.rollback(transaction);
            break;
        }

        match parse_stmt(parser) {
            Ok(stmt) => {
                parser.commit(transaction);
                statements.push(stmt);
            }
            Err(ParseFailure::NeedPass) => {
                // A dangling else/elif ends the block and bubbles up to
                // whatever chain can claim it.
                parser.rollback(transaction);
                break;
            }
            Err(ParseFailure::NeedCommit) => {
                parser.commit(transaction);
                parser.skip_to_line_end();
            }
            Err(ParseFailure::NeedRollback) => {
                parser.commit(transaction);
                parser.stage_diagnostic(
                    DiagnosticKind::ExpectedStatement { found: describe_token(&next) },
                    next.start,
                    next.end,
                );
                parser.skip_to_line_end();
            }
        }
    }

    if statements.is_empty() {
        let found = parser.peek_significant().clone();
        parser.stage_diagnostic(
            DiagnosticKind::ExpectedBody { found: describe_token(&found) },
            found.start,
            found.end,
        );
    }

    parser.add_node(Node::Body { statements }, Vec::new())
}

pub fn parse_while_stmt(parser: &mut Parser) -> ParseResult<NodeId> {
    let keyword = parser.next_significant();
    let header_col = parser.line_first_col(keyword.start.row);

    let (predicate, header) = parse_condition_parens(parser)?;
    let body = match header {
        HeaderEnd::Closed => parse_body(parser, header_col),
        HeaderEnd::Skipped => empty_body(parser),
    };

    Ok(parser.add_node(Node::While { predicate, body }, vec![keyword]))
}

pub fn parse_for_stmt(parser: &mut Parser) -> ParseResult<NodeId> {
    let keyword = parser.next_significant();
    let header_col = parser.line_first_col(keyword.start.row);

    let next = parser.peek_significant().clone();
    if next.kind != TokenKind::OpenParen {
        parser.stage_diagnostic(
            DiagnosticKind::ExpectedCondition { found: describe_token(&next) },
            next.start,
            next.end,
        );
        return Err(ParseFailure::NeedCommit);
    }
    let open = parser.next_significant();

    // `for(item in iterable)` is probed first; the three-part header is
    // the fallback.
    let transaction = parser.begin();
    match parse_foreach_header(parser) {
        Ok((item, iterable)) => {
            parser.commit(transaction);
            let header = finish_header(parser, &open);
            let body = match header {
                HeaderEnd::Closed => parse_body(parser, header_col),
                HeaderEnd::Skipped => empty_body(parser),
            };
            return Ok(parser.add_node(Node::Foreach { item, iterable, body }, vec![keyword]));
        }
        Err(_) => parser.rollback(transaction),
    }

    let (parts, header) = parse_for_parts(parser, &keyword, &open)?;
    let body = match header {
        HeaderEnd::Closed => parse_body(parser, header_col),
        HeaderEnd::Skipped => empty_body(parser),
    };
    let [init, condition, increment] = parts;
    Ok(parser.add_node(Node::For { init, condition, increment, body }, vec![keyword]))
}

fn parse_foreach_header(parser: &mut Parser) -> ParseResult<(NodeId, NodeId)> {
    let item = parse_expr(parser, BindingPower::Comma)?;
    if parser.peek_significant_kind() != TokenKind::Keyword(Keyword::In) {
        return Err(ParseFailure::NeedRollback);
    }
    parser.next_significant();
    let iterable = expr_or_empty(parser, BindingPower::Comma)?;
    Ok((item, iterable))
}

/// The comma-separated slots of a three-part for header. Empty slots are
/// legal and become Empty nodes; a closed header with a slot count other
/// than three gets one diagnostic and is padded or truncated to fit.
fn parse_for_parts(
    parser: &mut Parser,
    keyword: &Token,
    open: &Token,
) -> ParseResult<([NodeId; 3], HeaderEnd)> {
    let mut parts = Vec::new();

    loop {
        let part = loop {
            let next = parser.peek_significant().clone();
            if next.kind == TokenKind::Comma
                || next.kind == TokenKind::CloseParen
                || next.is_line_boundary()
            {
                break parser.add_node(Node::Empty, Vec::new());
            }
            match parse_expr(parser, BindingPower::Comma) {
                Ok(id) => break id,
                Err(ParseFailure::NeedRollback) => {
                    parser.stage_diagnostic(
                        DiagnosticKind::ExpectedExpression { found: describe_token(&next) },
                        next.start,
                        next.end,
                    );
                    parser.next_significant();
                }
                Err(failure) => return Err(failure),
            }
        };
        parts.push(part);

        if parser.peek_significant_kind() == TokenKind::Comma {
            parser.next_significant();
        } else {
            break;
        }
    }

    let close = parser.peek_significant().clone();
    let header = finish_header(parser, open);
    if matches!(header, HeaderEnd::Closed) && parts.len() != 3 {
        parser.stage_diagnostic(DiagnosticKind::MalformedForHeader, keyword.start, close.end);
    }

    while parts.len() < 3 {
        parts.push(parser.add_node(Node::Empty, Vec::new()));
    }
    parts.truncate(3);
    Ok(([parts[0], parts[1], parts[2]], header))
}

pub fn parse_break_stmt(parser: &mut Parser) -> ParseResult<NodeId> {
    let keyword = parser.next_significant();
    let id = parser.add_node(Node::Break, vec![keyword]);
    finish_statement(parser);
    Ok(id)
}

pub fn parse_continue_stmt(parser: &mut Parser) -> ParseResult<NodeId> {
    let keyword = parser.next_significant();
    let id = parser.add_node(Node::Continue, vec![keyword]);
    finish_statement(parser);
    Ok(id)
}

pub fn parse_return_stmt(parser: &mut Parser) -> ParseResult<NodeId> {
    let keyword = parser.next_significant();

    let next = parser.peek_significant().clone();
    let value = if next.is_line_boundary()
        || next.kind == TokenKind::Keyword(Keyword::Else)
        || next.kind == TokenKind::Keyword(Keyword::Elif)
    {
        None
    } else {
        match parse_expr(parser, BindingPower::Default) {
            Ok(id) => Some(id),
            Err(ParseFailure::NeedRollback) => None,
            Err(failure) => return Err(failure),
        }
    };

    let id = parser.add_node(Node::Return { value }, vec![keyword]);
    finish_statement(parser);
    Ok(id)
}

pub fn parse_use_stmt(parser: &mut Parser) -> ParseResult<NodeId> {
    let keyword = parser.next_significant();

    if parser.peek_significant_kind() != TokenKind::Word {
        let found = parser.peek_significant().clone();
        parser.stage_diagnostic(
            DiagnosticKind::ExpectedPath { found: describe_token(&found) },
            found.start,
            found.end,
        );
        return Err(ParseFailure::NeedCommit);
    }

    let path = parse_dotted_name(parser);
    let id = parser.add_node(Node::Use { path }, vec![keyword]);
    finish_statement(parser);
    Ok(id)
}

pub fn parse_def_stmt(parser: &mut Parser) -> ParseResult<NodeId> {
    let keyword = parser.next_significant();
    let header_col = parser.line_first_col(keyword.start.row);

    // `def int add(` declares a return type, `def add(` does not. The
    // typed reading must reach the open paren to win the probe.
    let transaction = parser.begin();
    let probed = match parse_typed_signature(parser) {
        Ok(signature) => {
            parser.commit(transaction);
            Some(signature)
        }
        Err(_) => {
            parser.rollback(transaction);
            None
        }
    };

    let (return_type, name) = match probed {
        Some(pair) => pair,
        None => {
            if parser.peek_significant_kind() != TokenKind::Word {
                let found = parser.peek_significant().clone();
                parser.stage_diagnostic(
                    DiagnosticKind::ExpectedSignature { found: describe_token(&found) },
                    found.start,
                    found.end,
                );
                return Err(ParseFailure::NeedCommit);
            }
            let word = parser.next_significant();
            let name = parser.add_node(Node::Member { name: word.text.clone() }, vec![word]);
            (None, name)
        }
    };

    if parser.peek_significant_kind() != TokenKind::OpenParen {
        let found = parser.peek_significant().clone();
        parser.stage_diagnostic(
            DiagnosticKind::ExpectedSignature { found: describe_token(&found) },
            found.start,
            found.end,
        );
        return Err(ParseFailure::NeedCommit);
    }
    let open = parser.next_significant();

    let (parameters, header) = parse_parameter_list(parser, &open)?;
    let body = match header {
        HeaderEnd::Closed => parse_body(parser, header_col),
        HeaderEnd::Skipped => empty_body(parser),
    };

    Ok(parser.add_node(Node::Def { return_type, name, parameters, body }, vec![keyword]))
}

fn parse_typed_signature(parser: &mut Parser) -> ParseResult<(Option<NodeId>, NodeId)> {
    let return_type = parse_type(parser)?;
    if parser.peek_significant_kind() != TokenKind::Word {
        return Err(ParseFailure::NeedRollback);
    }
    let word = parser.next_significant();
    if parser.peek_significant_kind() != TokenKind::OpenParen {
        return Err(ParseFailure::NeedRollback);
    }
    let name = parser.add_node(Node::Member { name: word.text.clone() }, vec![word]);
    Ok((Some(return_type), name))
}

/// `type name` pairs up to the closing paren, recovering per parameter.
fn parse_parameter_list(
    parser: &mut Parser,
    open: &Token,
) -> ParseResult<(Vec<NodeId>, HeaderEnd)> {
    let mut parameters = Vec::new();

    loop {
        let next = parser.peek_significant().clone();
        match next.kind {
            TokenKind::CloseParen => {
                parser.next_significant();
                return Ok((parameters, HeaderEnd::Closed));
            }
            _ if next.is_line_boundary() => {
                parser.stage_diagnostic(DiagnosticKind::MissingCloseParen, open.start, next.start);
                parser.skip_to_line_end();
                return Ok((parameters, HeaderEnd::Skipped));
            }
            TokenKind::Comma => {
                // empty parameter slot
                parser.stage_diagnostic(
                    DiagnosticKind::ExpectedParameter { found: describe_token(&next) },
                    next.start,
                    next.end,
                );
                parser.next_significant();
            }
            _ => match parse_parameter(parser) {
                Ok(parameter) => {
                    parameters.push(parameter);
                    let sep = parser.peek_significant().clone();
                    match sep.kind {
                        TokenKind::Comma => {
                            parser.next_significant();
                        }
                        TokenKind::CloseParen => {
                            parser.next_significant();
                            return Ok((parameters, HeaderEnd::Closed));
                        }
                        _ if sep.is_line_boundary() => {
                            parser.stage_diagnostic(
                                DiagnosticKind::MissingCloseParen,
                                open.start,
                                sep.start,
                            );
                            parser.skip_to_line_end();
                            return Ok((parameters, HeaderEnd::Skipped));
                        }
                        _ => {
                            parser.stage_diagnostic(
                                DiagnosticKind::UnexpectedToken { token: sep.text.clone() },
                                sep.start,
                                sep.end,
                            );
                            parser.next_significant();
                        }
                    }
                }
                Err(ParseFailure::NeedRollback) => {
                    parser.stage_diagnostic(
                        DiagnosticKind::ExpectedParameter { found: describe_token(&next) },
                        next.start,
                        next.end,
                    );
                    parser.next_significant();
                }
                Err(failure) => return Err(failure),
            },
        }
    }
}

fn parse_parameter(parser: &mut Parser) -> ParseResult<NodeId> {
    let param_type = parse_type(parser)?;
    let name = if parser.peek_significant_kind() == TokenKind::Word {
        let word = parser.next_significant();
        parser.add_node(Node::Member { name: word.text.clone() }, vec![word])
    } else {
        let found = parser.peek_significant().clone();
        parser.stage_diagnostic(
            DiagnosticKind::ExpectedParameter { found: describe_token(&found) },
            found.start,
            found.end,
        );
        parser.add_node(Node::Empty, Vec::new())
    };
    Ok(parser.add_node(Node::Parameter { param_type, name }, Vec::new()))
}

/// A lone `else`/`elif` is never a statement of its own; it belongs to an
/// enclosing chain, so the attempt passes without consuming anything.
pub fn parse_dangling_clause_stmt(_parser: &mut Parser) -> ParseResult<NodeId> {
    Err(ParseFailure::NeedPass)
}
