//! Type reference parsing.
//!
//! A type is a dotted name chain followed by an optional generic argument
//! list:
//!
//! - `int`
//! - `System.Collections.List`
//! - `Map<string, List<int>>`
//!
//! Generic lists recover positionally: an argument missing between two
//! commas becomes a None placeholder with no diagnostic, a trailing comma
//! before `>` gets one diagnostic and no placeholder, and a list that
//! never closes gets one diagnostic spanning the `<` to the point where
//! the close was expected.

use crate::ast::arena::NodeId;
use crate::ast::node::Node;
use crate::errors::errors::DiagnosticKind;
use crate::tokenizer::tokens::{OperatorKind, Token, TokenKind};

use super::parser::{describe_token, ParseFailure, ParseResult, Parser};

/// Parses one type reference. Fails with `NeedRollback` when the next
/// significant token cannot start a type, which is how speculative callers
/// (cast probes, typed-variable probes) discover the type reading does
/// not apply.
pub fn parse_type(parser: &mut Parser) -> ParseResult<NodeId> {
    if parser.peek_significant_kind() != TokenKind::Word {
        return Err(ParseFailure::NeedRollback);
    }
    let name = parse_dotted_name(parser);

    let arguments = if parser.peek_significant_kind() == TokenKind::OpenAngle {
        parse_generic_arguments(parser)?
    } else {
        Vec::new()
    };

    Ok(parser.add_node(Node::TypeRef { name, arguments }, Vec::new()))
}

/// Parses `word (.word)*` into a Member / MemberAccess chain. A dot not
/// followed by a word is left unconsumed; it belongs to whatever comes
/// after the name. The caller must have checked that a Word is next.
pub fn parse_dotted_name(parser: &mut Parser) -> NodeId {
    let token = parser.next_significant();
    let mut name = parser.add_node(Node::Member { name: token.text.clone() }, vec![token]);

    loop {
        if parser.peek_significant_kind() != TokenKind::Operator(OperatorKind::Dot) {
            break;
        }
        if parser.peek_nth_significant(2).kind != TokenKind::Word {
            break;
        }
        let dot = parser.next_significant();
        let word = parser.next_significant();
        let member = parser.add_node(Node::Member { name: word.text.clone() }, vec![word]);
        name = parser.add_node(Node::MemberAccess { target: name, member }, vec![dot]);
    }

    name
}

fn parse_generic_arguments(parser: &mut Parser) -> ParseResult<Vec<Option<NodeId>>> {
    let open = parser.next_significant();
    let mut arguments: Vec<Option<NodeId>> = Vec::new();
    let mut trailing_comma: Option<Token> = None;

    loop {
        let next = parser.peek_significant().clone();
        match next.kind {
            TokenKind::CloseAngle => {
                if let Some(comma) = &trailing_comma {
                    parser.stage_diagnostic(
                        DiagnosticKind::MissingTypeArgument,
                        comma.start,
                        comma.end,
                    );
                }
                parser.next_significant();
                return Ok(arguments);
            }
            TokenKind::Comma => {
                // The slot before this comma is empty. Hole positions
                // matter to consumers, so it stays as a placeholder.
                arguments.push(None);
                trailing_comma = Some(next);
                parser.next_significant();
            }
            _ if next.is_line_boundary() => {
                parser.stage_diagnostic(DiagnosticKind::MissingCloseAngle, open.start, next.start);
                return Ok(arguments);
            }
            TokenKind::Word => {
                let argument = parse_type(parser)?;
                arguments.push(Some(argument));
                trailing_comma = None;

                let sep = parser.peek_significant().clone();
                match sep.kind {
                    TokenKind::Comma => {
                        trailing_comma = Some(sep);
                        parser.next_significant();
                    }
                    TokenKind::CloseAngle => {
                        parser.next_significant();
                        return Ok(arguments);
                    }
                    _ => {
                        // Junk or a line boundary where `,` or `>` was
                        // expected: close the list implicitly and leave
                        // the token for the caller.
                        parser.stage_diagnostic(
                            DiagnosticKind::MissingCloseAngle,
                            open.start,
                            sep.start,
                        );
                        return Ok(arguments);
                    }
                }
            }
            _ => {
                // A token that cannot start a type. Diagnose, drop it, and
                // keep scanning the list.
                parser.stage_diagnostic(
                    DiagnosticKind::ExpectedType { found: describe_token(&next) },
                    next.start,
                    next.end,
                );
                parser.next_significant();
            }
        }
    }
}
