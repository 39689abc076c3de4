use std::collections::HashMap;

use crate::ast::arena::NodeId;
use crate::tokenizer::tokens::{Keyword, LiteralKind, OperatorKind, TokenKind};

use super::{expr::*, parser::ParseResult, parser::Parser, stmt::*};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Comma,
    Assignment,
    LogicalOr,
    LogicalXor,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Postfix,
    Call,
    Member,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> ParseResult<NodeId>;
pub type NUDHandler = fn(&mut Parser) -> ParseResult<NodeId>;
pub type LEDHandler = fn(&mut Parser, NodeId, BindingPower) -> ParseResult<NodeId>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Assignment (right-associative, handled in the LED)
    parser.led(TokenKind::Operator(OperatorKind::Assign), BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::Operator(OperatorKind::PlusEquals), BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::Operator(OperatorKind::MinusEquals), BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::Operator(OperatorKind::StarEquals), BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::Operator(OperatorKind::SlashEquals), BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::Operator(OperatorKind::PercentEquals), BindingPower::Assignment, parse_assignment_expr);

    // Logical
    parser.led(TokenKind::Operator(OperatorKind::Or), BindingPower::LogicalOr, parse_binary_expr);
    parser.led(TokenKind::Operator(OperatorKind::Xor), BindingPower::LogicalXor, parse_binary_expr);
    parser.led(TokenKind::Operator(OperatorKind::And), BindingPower::LogicalAnd, parse_binary_expr);

    // Bitwise
    parser.led(TokenKind::Operator(OperatorKind::BitOr), BindingPower::BitwiseOr, parse_binary_expr);
    parser.led(TokenKind::Operator(OperatorKind::BitXor), BindingPower::BitwiseXor, parse_binary_expr);
    parser.led(TokenKind::Operator(OperatorKind::BitAnd), BindingPower::BitwiseAnd, parse_binary_expr);

    // Equality and relational
    parser.led(TokenKind::Operator(OperatorKind::Equals), BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::Operator(OperatorKind::NotEquals), BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::OpenAngle, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::CloseAngle, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Operator(OperatorKind::LessEquals), BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Operator(OperatorKind::GreaterEquals), BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Operator(OperatorKind::Plus), BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Operator(OperatorKind::Dash), BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Operator(OperatorKind::Star), BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Operator(OperatorKind::Slash), BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Operator(OperatorKind::Percent), BindingPower::Multiplicative, parse_binary_expr);

    // Postfix
    parser.led(TokenKind::Operator(OperatorKind::PlusPlus), BindingPower::Postfix, parse_postfix_expr);
    parser.led(TokenKind::Operator(OperatorKind::MinusMinus), BindingPower::Postfix, parse_postfix_expr);
    parser.led(TokenKind::Operator(OperatorKind::OpenSquare), BindingPower::Postfix, parse_indexer_expr);

    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);

    // Member
    parser.led(TokenKind::Operator(OperatorKind::Dot), BindingPower::Member, parse_member_expr);

    // Literals and names
    for kind in [
        LiteralKind::Byte,
        LiteralKind::Short,
        LiteralKind::UShort,
        LiteralKind::Int,
        LiteralKind::UInt,
        LiteralKind::Long,
        LiteralKind::ULong,
        LiteralKind::Float,
        LiteralKind::Double,
        LiteralKind::Bool,
        LiteralKind::Char,
        LiteralKind::Str,
        LiteralKind::Null,
    ] {
        parser.nud(TokenKind::Literal(kind), parse_literal_expr);
    }
    parser.nud(TokenKind::Word, parse_word_expr);
    parser.nud(TokenKind::Keyword(Keyword::Var), parse_var_def_expr);
    parser.nud(TokenKind::Keyword(Keyword::New), parse_constructor_expr);

    // Prefix operators
    parser.nud(TokenKind::Operator(OperatorKind::Not), parse_prefix_expr);
    parser.nud(TokenKind::Operator(OperatorKind::Dash), parse_prefix_expr);
    parser.nud(TokenKind::Operator(OperatorKind::PlusPlus), parse_prefix_expr);
    parser.nud(TokenKind::Operator(OperatorKind::MinusMinus), parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_paren_expr);

    // Statements
    parser.stmt(TokenKind::Keyword(Keyword::If), parse_if_stmt);
    parser.stmt(TokenKind::Keyword(Keyword::While), parse_while_stmt);
    parser.stmt(TokenKind::Keyword(Keyword::For), parse_for_stmt);
    parser.stmt(TokenKind::Keyword(Keyword::Break), parse_break_stmt);
    parser.stmt(TokenKind::Keyword(Keyword::Continue), parse_continue_stmt);
    parser.stmt(TokenKind::Keyword(Keyword::Return), parse_return_stmt);
    parser.stmt(TokenKind::Keyword(Keyword::Use), parse_use_stmt);
    parser.stmt(TokenKind::Keyword(Keyword::Def), parse_def_stmt);
    parser.stmt(TokenKind::Keyword(Keyword::Else), parse_dangling_clause_stmt);
    parser.stmt(TokenKind::Keyword(Keyword::Elif), parse_dangling_clause_stmt);
}

// Lookup tables live inside the parser struct, keyed by token kind
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
