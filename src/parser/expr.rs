use crate::ast::arena::NodeId;
use crate::ast::node::{AssignOp, BinaryOp, LiteralValue, Node, UnaryOp};
use crate::errors::errors::DiagnosticKind;
use crate::tokenizer::tokens::{LiteralKind, OperatorKind, Token, TokenKind, SUFFIX_LOOKUP};

use super::lookups::BindingPower;
use super::parser::{describe_token, ParseFailure, ParseResult, Parser};
use super::types::parse_type;

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> ParseResult<NodeId> {
    // First parse NUD
    let token_kind = parser.peek_significant_kind();
    if !parser.get_nud_lookup().contains_key(&token_kind) {
        return Err(ParseFailure::NeedRollback);
    }

    let mut left = parser.get_nud_lookup().get(&token_kind).unwrap()(parser)?;

    // While a tighter-binding infix token follows, fold it into lhs
    while parser.binding_power_of(parser.peek_significant_kind()) > bp {
        let token_kind = parser.peek_significant_kind();
        if !parser.get_led_lookup().contains_key(&token_kind) {
            break;
        }

        let power = parser.binding_power_of(token_kind);
        left = parser.get_led_lookup().get(&token_kind).unwrap()(parser, left, power)?;
    }

    Ok(left)
}

/// Parses a sub-expression whose position is already committed: a missing
/// operand gets one diagnostic and an Empty placeholder instead of
/// failing the enclosing production.
pub fn expr_or_empty(parser: &mut Parser, bp: BindingPower) -> ParseResult<NodeId> {
    match parse_expr(parser, bp) {
        Ok(id) => Ok(id),
        Err(ParseFailure::NeedRollback) => {
            let found = parser.peek_significant().clone();
            parser.stage_diagnostic(
                DiagnosticKind::ExpectedExpression { found: describe_token(&found) },
                found.start,
                found.end,
            );
            Ok(parser.add_node(Node::Empty, Vec::new()))
        }
        Err(failure) => Err(failure),
    }
}

pub fn parse_literal_expr(parser: &mut Parser) -> ParseResult<NodeId> {
    let token = parser.next_significant();
    let kind = match token.kind {
        TokenKind::Literal(kind) => kind,
        _ => return Err(ParseFailure::NeedRollback),
    };

    let value = match literal_value(kind, &token.text) {
        Ok(value) => value,
        Err(diagnostic) => {
            parser.stage_diagnostic(diagnostic, token.start, token.end);
            default_literal(kind)
        }
    };

    Ok(parser.add_node(Node::Literal { value }, vec![token]))
}

/// `List<int> x` declares a variable; a bare word is a member read. The
/// declaration reading is probed in a child transaction so a failed probe
/// leaves nothing behind.
pub fn parse_word_expr(parser: &mut Parser) -> ParseResult<NodeId> {
    let transaction = parser.begin();
    match parse_typed_var_def(parser) {
        Ok(id) => {
            parser.commit(transaction);
            return Ok(id);
        }
        Err(_) => parser.rollback(transaction),
    }

    let token = parser.next_significant();
    Ok(parser.add_node(Node::Member { name: token.text.clone() }, vec![token]))
}

fn parse_typed_var_def(parser: &mut Parser) -> ParseResult<NodeId> {
    let var_type = parse_type(parser)?;
    if parser.peek_significant_kind() != TokenKind::Word {
        return Err(ParseFailure::NeedRollback);
    }
    let word = parser.next_significant();
    let name = parser.add_node(Node::Member { name: word.text.clone() }, vec![word]);
    Ok(parser.add_node(Node::VariableDef { var_type: Some(var_type), name }, Vec::new()))
}

pub fn parse_var_def_expr(parser: &mut Parser) -> ParseResult<NodeId> {
    let var_token = parser.next_significant();

    let name = if parser.peek_significant_kind() == TokenKind::Word {
        let word = parser.next_significant();
        parser.add_node(Node::Member { name: word.text.clone() }, vec![word])
    } else {
        let found = parser.peek_significant().clone();
        parser.stage_diagnostic(
            DiagnosticKind::UnexpectedToken { token: describe_token(&found) },
            found.start,
            found.end,
        );
        parser.add_node(Node::Empty, Vec::new())
    };

    Ok(parser.add_node(Node::VariableDef { var_type: None, name }, vec![var_token]))
}

pub fn parse_constructor_expr(parser: &mut Parser) -> ParseResult<NodeId> {
    let new_token = parser.next_significant();

    let type_ref = match parse_type(parser) {
        Ok(id) => id,
        Err(ParseFailure::NeedRollback) => {
            let found = parser.peek_significant().clone();
            parser.stage_diagnostic(
                DiagnosticKind::ExpectedType { found: describe_token(&found) },
                found.start,
                found.end,
            );
            parser.add_node(Node::Empty, Vec::new())
        }
        Err(failure) => return Err(failure),
    };

    let arguments = if parser.peek_significant_kind() == TokenKind::OpenParen {
        let open = parser.next_significant();
        parse_argument_list(parser, &open, TokenKind::CloseParen)?
    } else {
        let found = parser.peek_significant().clone();
        parser.stage_diagnostic(
            DiagnosticKind::UnexpectedToken { token: describe_token(&found) },
            found.start,
            found.end,
        );
        Vec::new()
    };

    Ok(parser.add_node(Node::ConstructorCall { type_ref, arguments }, vec![new_token]))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> ParseResult<NodeId> {
    let token = parser.next_significant();
    let op = match token.kind {
        TokenKind::Operator(OperatorKind::Not) => UnaryOp::Not,
        TokenKind::Operator(OperatorKind::Dash) => UnaryOp::Negate,
        TokenKind::Operator(OperatorKind::PlusPlus) => UnaryOp::PreIncrement,
        TokenKind::Operator(OperatorKind::MinusMinus) => UnaryOp::PreDecrement,
        _ => return Err(ParseFailure::NeedRollback),
    };

    let operand = expr_or_empty(parser, BindingPower::Unary)?;
    Ok(parser.add_node(Node::Unary { op, operand }, vec![token]))
}

/// `(T)operand` casts when `T` reads as a type, the paren closes, and an
/// operand follows; any miss falls back to a grouping. The cast reading
/// runs in a child transaction.
pub fn parse_paren_expr(parser: &mut Parser) -> ParseResult<NodeId> {
    let transaction = parser.begin();
    match parse_cast_expr(parser) {
        Ok(id) => {
            parser.commit(transaction);
            return Ok(id);
        }
        Err(_) => parser.rollback(transaction),
    }

    let open = parser.next_significant();
    let inner = expr_or_empty(parser, BindingPower::Default)?;
    match parser.peek_significant_kind() {
        TokenKind::CloseParen => {
            parser.next_significant();
        }
        _ => {
            let at = parser.peek_significant().start;
            parser.stage_diagnostic(DiagnosticKind::MissingCloseParen, open.start, at);
        }
    }

    // Groupings are transparent; the parens leave no node behind.
    Ok(inner)
}

fn parse_cast_expr(parser: &mut Parser) -> ParseResult<NodeId> {
    let open = parser.next_significant();
    let type_ref = parse_type(parser)?;
    if parser.peek_significant_kind() != TokenKind::CloseParen {
        return Err(ParseFailure::NeedRollback);
    }
    parser.next_significant();

    let operand = parse_expr(parser, BindingPower::Unary)?;
    Ok(parser.add_node(Node::Cast { type_ref, operand }, vec![open]))
}

pub fn parse_assignment_expr(parser: &mut Parser, left: NodeId, _bp: BindingPower) -> ParseResult<NodeId> {
    let token = parser.next_significant();
    let op = match token.kind {
        TokenKind::Operator(OperatorKind::Assign) => AssignOp::Plain,
        TokenKind::Operator(OperatorKind::PlusEquals) => AssignOp::Add,
        TokenKind::Operator(OperatorKind::MinusEquals) => AssignOp::Sub,
        TokenKind::Operator(OperatorKind::StarEquals) => AssignOp::Mul,
        TokenKind::Operator(OperatorKind::SlashEquals) => AssignOp::Div,
        TokenKind::Operator(OperatorKind::PercentEquals) => AssignOp::Mod,
        _ => return Err(ParseFailure::NeedRollback),
    };

    // Right-associative: the value re-enters at the bottom of the ladder.
    let value = expr_or_empty(parser, BindingPower::Default)?;
    Ok(parser.add_node(Node::Assign { op, target: left, value }, vec![token]))
}

pub fn parse_binary_expr(parser: &mut Parser, left: NodeId, bp: BindingPower) -> ParseResult<NodeId> {
    let token = parser.next_significant();
    let op = match binary_op_of(token.kind) {
        Some(op) => op,
        None => return Err(ParseFailure::NeedRollback),
    };

    // Left-associative: the right operand parses at the operator's own
    // power, so an equal-power operator ends it.
    let right = expr_or_empty(parser, bp)?;
    Ok(parser.add_node(Node::Binary { op, left, right }, vec![token]))
}

pub fn parse_postfix_expr(parser: &mut Parser, left: NodeId, _bp: BindingPower) -> ParseResult<NodeId> {
    let token = parser.next_significant();
    let op = match token.kind {
        TokenKind::Operator(OperatorKind::PlusPlus) => UnaryOp::PostIncrement,
        TokenKind::Operator(OperatorKind::MinusMinus) => UnaryOp::PostDecrement,
        _ => return Err(ParseFailure::NeedRollback),
    };
    Ok(parser.add_node(Node::Unary { op, operand: left }, vec![token]))
}

pub fn parse_member_expr(parser: &mut Parser, left: NodeId, _bp: BindingPower) -> ParseResult<NodeId> {
    let dot = parser.next_significant();

    let member = if parser.peek_significant_kind() == TokenKind::Word {
        let word = parser.next_significant();
        parser.add_node(Node::Member { name: word.text.clone() }, vec![word])
    } else {
        let found = parser.peek_significant().clone();
        parser.stage_diagnostic(
            DiagnosticKind::ExpectedExpression { found: describe_token(&found) },
            found.start,
            found.end,
        );
        parser.add_node(Node::Empty, Vec::new())
    };

    Ok(parser.add_node(Node::MemberAccess { target: left, member }, vec![dot]))
}

pub fn parse_call_expr(parser: &mut Parser, left: NodeId, _bp: BindingPower) -> ParseResult<NodeId> {
    let open = parser.next_significant();
    let arguments = parse_argument_list(parser, &open, TokenKind::CloseParen)?;
    Ok(parser.add_node(Node::Call { callee: left, arguments }, vec![open]))
}

pub fn parse_indexer_expr(parser: &mut Parser, left: NodeId, _bp: BindingPower) -> ParseResult<NodeId> {
    let open = parser.next_significant();
    let arguments =
        parse_argument_list(parser, &open, TokenKind::Operator(OperatorKind::CloseSquare))?;
    Ok(parser.add_node(Node::Indexer { target: left, arguments }, vec![open]))
}

/// Comma-separated expressions up to `closer`, recovering per argument: an
/// empty slot gets one diagnostic and is skipped, junk is diagnosed and
/// dropped, and a list still open at end of line closes implicitly with
/// one diagnostic spanning the opener to the boundary.
fn parse_argument_list(
    parser: &mut Parser,
    opener: &Token,
    closer: TokenKind,
) -> ParseResult<Vec<NodeId>> {
    let mut arguments = Vec::new();

    loop {
        let next = parser.peek_significant().clone();
        if next.kind == closer {
            parser.next_significant();
            return Ok(arguments);
        }
        if next.is_line_boundary() {
            parser.stage_diagnostic(missing_close(closer), opener.start, next.start);
            return Ok(arguments);
        }
        if next.kind == TokenKind::Comma {
            parser.stage_diagnostic(
                DiagnosticKind::ExpectedExpression { found: describe_token(&next) },
                next.start,
                next.end,
            );
            parser.next_significant();
            continue;
        }

        match parse_expr(parser, BindingPower::Comma) {
            Ok(id) => {
                arguments.push(id);
                let sep = parser.peek_significant().clone();
                if sep.kind == TokenKind::Comma {
                    parser.next_significant();
                } else if sep.kind == closer {
                    parser.next_significant();
                    return Ok(arguments);
                } else if sep.is_line_boundary() {
                    parser.stage_diagnostic(missing_close(closer), opener.start, sep.start);
                    return Ok(arguments);
                } else {
                    parser.stage_diagnostic(
                        DiagnosticKind::UnexpectedToken { token: sep.text.clone() },
                        sep.start,
                        sep.end,
                    );
                    parser.next_significant();
                }
            }
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
    }
}

fn missing_close(closer: TokenKind) -> DiagnosticKind {
    if closer == TokenKind::Operator(OperatorKind::CloseSquare) {
        DiagnosticKind::MissingCloseSquare
    } else {
        DiagnosticKind::MissingCloseParen
    }
}

fn binary_op_of(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Operator(OperatorKind::Plus) => Some(BinaryOp::Add),
        TokenKind::Operator(OperatorKind::Dash) => Some(BinaryOp::Sub),
        TokenKind::Operator(OperatorKind::Star) => Some(BinaryOp::Mul),
        TokenKind::Operator(OperatorKind::Slash) => Some(BinaryOp::Div),
        TokenKind::Operator(OperatorKind::Percent) => Some(BinaryOp::Mod),
        TokenKind::Operator(OperatorKind::Equals) => Some(BinaryOp::Eq),
        TokenKind::Operator(OperatorKind::NotEquals) => Some(BinaryOp::NotEq),
        TokenKind::OpenAngle => Some(BinaryOp::Less),
        TokenKind::CloseAngle => Some(BinaryOp::Greater),
        TokenKind::Operator(OperatorKind::LessEquals) => Some(BinaryOp::LessEq),
        TokenKind::Operator(OperatorKind::GreaterEquals) => Some(BinaryOp::GreaterEq),
        TokenKind::Operator(OperatorKind::And) => Some(BinaryOp::And),
        TokenKind::Operator(OperatorKind::Or) => Some(BinaryOp::Or),
        TokenKind::Operator(OperatorKind::Xor) => Some(BinaryOp::Xor),
        TokenKind::Operator(OperatorKind::BitAnd) => Some(BinaryOp::BitAnd),
        TokenKind::Operator(OperatorKind::BitOr) => Some(BinaryOp::BitOr),
        TokenKind::Operator(OperatorKind::BitXor) => Some(BinaryOp::BitXor),
        _ => None,
    }
}

/// Converts a literal token's text into its value. The tokenizer only
/// guarantees the shape; range and suffix checks happen here, at node
/// build time.
fn literal_value(kind: LiteralKind, text: &str) -> Result<LiteralValue, DiagnosticKind> {
    let malformed = || DiagnosticKind::MalformedLiteral { text: text.to_string() };

    match kind {
        LiteralKind::Byte => {
            number_body(text)?.parse().map(LiteralValue::Byte).map_err(|_| malformed())
        }
        LiteralKind::Short => {
            number_body(text)?.parse().map(LiteralValue::Short).map_err(|_| malformed())
        }
        LiteralKind::UShort => {
            number_body(text)?.parse().map(LiteralValue::UShort).map_err(|_| malformed())
        }
        LiteralKind::Int => {
            number_body(text)?.parse().map(LiteralValue::Int).map_err(|_| malformed())
        }
        LiteralKind::UInt => {
            number_body(text)?.parse().map(LiteralValue::UInt).map_err(|_| malformed())
        }
        LiteralKind::Long => {
            number_body(text)?.parse().map(LiteralValue::Long).map_err(|_| malformed())
        }
        LiteralKind::ULong => {
            number_body(text)?.parse().map(LiteralValue::ULong).map_err(|_| malformed())
        }
        LiteralKind::Float => {
            number_body(text)?.parse().map(LiteralValue::Float).map_err(|_| malformed())
        }
        LiteralKind::Double => {
            number_body(text)?.parse().map(LiteralValue::Double).map_err(|_| malformed())
        }
        LiteralKind::Bool => match text {
            "true" => Ok(LiteralValue::Bool(true)),
            "false" => Ok(LiteralValue::Bool(false)),
            _ => Err(malformed()),
        },
        LiteralKind::Char => {
            let decoded = unescape(&text[1..text.len() - 1]);
            match decoded.chars().next() {
                Some(c) => Ok(LiteralValue::Char(c)),
                None => Err(malformed()),
            }
        }
        LiteralKind::Str => Ok(LiteralValue::Str(unescape(&text[1..text.len() - 1]))),
        LiteralKind::Null => Ok(LiteralValue::Null),
    }
}

/// Strips a recognized suffix off a numeric literal. An unrecognized
/// suffix is malformed; the tokenizer keeps it attached so the whole
/// literal can be reported as one token.
fn number_body(text: &str) -> Result<&str, DiagnosticKind> {
    let body = text.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = &text[body.len()..];
    if !suffix.is_empty() && !SUFFIX_LOOKUP.contains_key(suffix) {
        return Err(DiagnosticKind::MalformedLiteral { text: text.to_string() });
    }
    Ok(body)
}

/// The placeholder value a malformed literal falls back to, so the node
/// still carries a value of the right flavor.
fn default_literal(kind: LiteralKind) -> LiteralValue {
    match kind {
        LiteralKind::Byte => LiteralValue::Byte(0),
        LiteralKind::Short => LiteralValue::Short(0),
        LiteralKind::UShort => LiteralValue::UShort(0),
        LiteralKind::Int => LiteralValue::Int(0),
        LiteralKind::UInt => LiteralValue::UInt(0),
        LiteralKind::Long => LiteralValue::Long(0),
        LiteralKind::ULong => LiteralValue::ULong(0),
        LiteralKind::Float => LiteralValue::Float(0.0),
        LiteralKind::Double => LiteralValue::Double(0.0),
        LiteralKind::Bool => LiteralValue::Bool(false),
        LiteralKind::Char => LiteralValue::Char('\0'),
        LiteralKind::Str => LiteralValue::Str(String::new()),
        LiteralKind::Null => LiteralValue::Null,
    }
}

/// Decodes the escape sequences the language defines; anything else
/// passes through with its backslash intact. `\xNN` takes up to two hex
/// digits and maps the byte value straight to a char.
fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            Some('x') => {
                let mut value = 0u32;
                let mut digits = 0;
                while digits < 2 {
                    match chars.peek() {
                        Some(&d) if d.is_ascii_hexdigit() => {
                            value = value * 16 + d.to_digit(16).unwrap();
                            chars.next();
                            digits += 1;
                        }
                        _ => break,
                    }
                }
                if digits == 0 {
                    result.push('\\');
                    result.push('x');
                } else {
                    result.push(char::from(value as u8));
                }
            }
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}
