//! Unit tests for diagnostics.
//!
//! This module contains tests for diagnostic construction, severity
//! classification, info codes, and display formatting.

use crate::errors::errors::{Diagnostic, DiagnosticKind, Severity};
use crate::Position;
use std::rc::Rc;

fn diagnostic(kind: DiagnosticKind, start: Position, end: Position) -> Diagnostic {
    Diagnostic::new(
        kind,
        start,
        end,
        Rc::new("test.rill".to_string()),
        Rc::new("test".to_string()),
    )
}

#[test]
fn test_diagnostic_creation() {
    let diag = diagnostic(
        DiagnosticKind::UnexpectedToken { token: "@".to_string() },
        Position::new(0, 4),
        Position::new(0, 4),
    );

    assert_eq!(diag.code(), 1001);
    assert_eq!(diag.severity(), Severity::Error);
    assert_eq!(diag.start(), Position::new(0, 4));
    assert_eq!(diag.end(), Position::new(0, 4));
}

#[test]
fn test_diagnostic_range_spans_tokens() {
    let diag = diagnostic(
        DiagnosticKind::MissingCloseParen,
        Position::new(0, 5),
        Position::new(0, 17),
    );

    assert_eq!(diag.start(), Position::new(0, 5));
    assert_eq!(diag.end(), Position::new(0, 17));
}

#[test]
#[should_panic]
fn test_diagnostic_rejects_inverted_range() {
    diagnostic(
        DiagnosticKind::MissingCloseParen,
        Position::new(1, 0),
        Position::new(0, 9),
    );
}

#[test]
fn test_trailing_content_is_a_warning() {
    let diag = diagnostic(
        DiagnosticKind::TrailingContent { token: "fun".to_string() },
        Position::new(2, 10),
        Position::new(2, 12),
    );

    assert_eq!(diag.severity(), Severity::Warning);
}

#[test]
fn test_everything_else_is_an_error() {
    let kinds = [
        DiagnosticKind::UnexpectedToken { token: "@".to_string() },
        DiagnosticKind::ExpectedExpression { found: ")".to_string() },
        DiagnosticKind::ExpectedStatement { found: "else".to_string() },
        DiagnosticKind::ExpectedBody { found: "".to_string() },
        DiagnosticKind::ExpectedCondition { found: "x".to_string() },
        DiagnosticKind::ExpectedSignature { found: "(".to_string() },
        DiagnosticKind::ExpectedParameter { found: ",".to_string() },
        DiagnosticKind::ExpectedPath { found: "\n".to_string() },
        DiagnosticKind::ExpectedType { found: "3".to_string() },
        DiagnosticKind::MissingCloseParen,
        DiagnosticKind::MissingCloseSquare,
        DiagnosticKind::MissingCloseAngle,
        DiagnosticKind::MissingTypeArgument,
        DiagnosticKind::MalformedLiteral { text: "10z".to_string() },
        DiagnosticKind::MalformedForHeader,
    ];

    for kind in kinds {
        assert_eq!(kind.severity(), Severity::Error, "{:?}", kind);
    }
}

#[test]
fn test_codes_are_stable_and_distinct() {
    let kinds = [
        DiagnosticKind::UnexpectedToken { token: String::new() },
        DiagnosticKind::ExpectedExpression { found: String::new() },
        DiagnosticKind::ExpectedStatement { found: String::new() },
        DiagnosticKind::ExpectedBody { found: String::new() },
        DiagnosticKind::ExpectedCondition { found: String::new() },
        DiagnosticKind::ExpectedSignature { found: String::new() },
        DiagnosticKind::ExpectedParameter { found: String::new() },
        DiagnosticKind::ExpectedPath { found: String::new() },
        DiagnosticKind::ExpectedType { found: String::new() },
        DiagnosticKind::MissingCloseParen,
        DiagnosticKind::MissingCloseSquare,
        DiagnosticKind::MissingCloseAngle,
        DiagnosticKind::MissingTypeArgument,
        DiagnosticKind::MalformedLiteral { text: String::new() },
        DiagnosticKind::MalformedForHeader,
        DiagnosticKind::TrailingContent { token: String::new() },
    ];

    let mut codes: Vec<u16> = kinds.iter().map(|kind| kind.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), kinds.len());
    assert_eq!(codes[0], 1001);
}

#[test]
fn test_help_for_selected_kinds() {
    assert!(DiagnosticKind::MissingCloseParen.help().is_some());
    assert!(DiagnosticKind::MalformedForHeader.help().is_some());
    assert!(DiagnosticKind::UnexpectedToken { token: "@".to_string() }.help().is_none());
}

#[test]
fn test_diagnostic_display() {
    let diag = diagnostic(
        DiagnosticKind::MissingCloseParen,
        Position::new(0, 5),
        Position::new(0, 17),
    );
    let rendered = diag.to_string();

    assert!(rendered.contains("error[RL1010]"), "{}", rendered);
    assert!(rendered.contains("0:5-0:17"), "{}", rendered);
    assert!(rendered.contains("missing closing parenthesis"), "{}", rendered);
    assert!(rendered.contains("test.rill"), "{}", rendered);
}
