use std::fmt::Display;
use std::rc::Rc;

use thiserror::Error;

use crate::Position;

/// How bad a diagnostic is. Warnings mean a node was still produced and
/// the surrounding parse carried on as if the source were well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A positioned diagnostic. The range covers `start` through `end`
/// inclusive; zero-width ranges (start == end) point at a single spot,
/// such as the place a missing token was expected.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    severity: Severity,
    start: Position,
    end: Position,
    file: Rc<String>,
    module: Rc<String>,
}

impl Diagnostic {
    /// An inverted range is a caller bug, not a user error, so it
    /// panics rather than producing a diagnostic about a diagnostic.
    pub fn new(
        kind: DiagnosticKind,
        start: Position,
        end: Position,
        file: Rc<String>,
        module: Rc<String>,
    ) -> Self {
        assert!(start <= end, "diagnostic range is inverted: {} > {}", start, end);
        let severity = kind.severity();
        Diagnostic { kind, severity, start, end, file, module }
    }

    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn file(&self) -> &Rc<String> {
        &self.file
    }

    pub fn module(&self) -> &Rc<String> {
        &self.module
    }

    pub fn code(&self) -> u16 {
        self.kind.code()
    }

    pub fn help(&self) -> Option<&'static str> {
        self.kind.help()
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[RL{:04}] {}-{}: {} ({})",
            self.severity, self.kind.code(), self.start, self.end, self.kind, self.file
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("expected an expression, found {found:?}")]
    ExpectedExpression { found: String },
    #[error("expected a statement, found {found:?}")]
    ExpectedStatement { found: String },
    #[error("expected a body, found {found:?}")]
    ExpectedBody { found: String },
    #[error("expected a parenthesized condition, found {found:?}")]
    ExpectedCondition { found: String },
    #[error("expected a function signature, found {found:?}")]
    ExpectedSignature { found: String },
    #[error("expected a parameter, found {found:?}")]
    ExpectedParameter { found: String },
    #[error("expected an import path, found {found:?}")]
    ExpectedPath { found: String },
    #[error("expected a type, found {found:?}")]
    ExpectedType { found: String },
    #[error("missing closing parenthesis")]
    MissingCloseParen,
    #[error("missing closing square bracket")]
    MissingCloseSquare,
    #[error("missing closing angle bracket")]
    MissingCloseAngle,
    #[error("missing type argument")]
    MissingTypeArgument,
    #[error("malformed literal: {text:?}")]
    MalformedLiteral { text: String },
    #[error("malformed loop header")]
    MalformedForHeader,
    #[error("unexpected content after statement: {token:?}")]
    TrailingContent { token: String },
}

impl DiagnosticKind {
    /// Stable info code, rendered as `RL####`.
    pub fn code(&self) -> u16 {
        match self {
            DiagnosticKind::UnexpectedToken { .. } => 1001,
            DiagnosticKind::ExpectedExpression { .. } => 1002,
            DiagnosticKind::ExpectedStatement { .. } => 1003,
            DiagnosticKind::ExpectedBody { .. } => 1004,
            DiagnosticKind::ExpectedCondition { .. } => 1005,
            DiagnosticKind::ExpectedSignature { .. } => 1006,
            DiagnosticKind::ExpectedParameter { .. } => 1007,
            DiagnosticKind::ExpectedPath { .. } => 1008,
            DiagnosticKind::ExpectedType { .. } => 1009,
            DiagnosticKind::MissingCloseParen => 1010,
            DiagnosticKind::MissingCloseSquare => 1011,
            DiagnosticKind::MissingCloseAngle => 1012,
            DiagnosticKind::MissingTypeArgument => 1013,
            DiagnosticKind::MalformedLiteral { .. } => 1014,
            DiagnosticKind::MalformedForHeader => 1015,
            DiagnosticKind::TrailingContent { .. } => 1016,
        }
    }

    /// Trailing content leaves the already-built statement intact, so it
    /// alone is a warning.
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::TrailingContent { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn help(&self) -> Option<&'static str> {
        match self {
            DiagnosticKind::UnexpectedToken { .. } => None,
            DiagnosticKind::ExpectedExpression { .. } => {
                Some("an operand is needed here")
            }
            DiagnosticKind::ExpectedStatement { .. } => None,
            DiagnosticKind::ExpectedBody { .. } => {
                Some("put a statement on the same line or an indented block below")
            }
            DiagnosticKind::ExpectedCondition { .. } => {
                Some("wrap the condition in parentheses")
            }
            DiagnosticKind::ExpectedSignature { .. } => {
                Some("a definition needs a name and a parameter list")
            }
            DiagnosticKind::ExpectedParameter { .. } => {
                Some("parameters are written as a type followed by a name")
            }
            DiagnosticKind::ExpectedPath { .. } => None,
            DiagnosticKind::ExpectedType { .. } => Some("a type name is needed here"),
            DiagnosticKind::MissingCloseParen => Some("add a closing parenthesis"),
            DiagnosticKind::MissingCloseSquare => Some("add a closing square bracket"),
            DiagnosticKind::MissingCloseAngle => {
                Some("add a closing angle bracket to end the type argument list")
            }
            DiagnosticKind::MissingTypeArgument => {
                Some("remove the extra comma or add a type argument")
            }
            DiagnosticKind::MalformedLiteral { .. } => {
                Some("check the literal's value and suffix")
            }
            DiagnosticKind::MalformedForHeader => {
                Some("use for(init, condition, increment) or for(item in iterable)")
            }
            DiagnosticKind::TrailingContent { .. } => {
                Some("each statement ends at the line end")
            }
        }
    }
}
