//! Diagnostic errors for the class-expression sub-language.
//!
//! Positions are byte offsets into the expression text after placeholder
//! substitution.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ExpressionError {
    #[error("expected {expected} but found \"{found}\" at position {position}")]
    #[diagnostic(
        code(termsheet::expr::unexpected_token),
        help("Check the keywords (some, only, value, min, max, exactly, and, or, not) and parentheses.")
    )]
    UnexpectedToken {
        expected: String,
        found: String,
        position: usize,
    },

    #[error("expected {expected} but the expression ended")]
    #[diagnostic(
        code(termsheet::expr::unexpected_end),
        help("The expression is incomplete. A restriction needs a filler after its keyword.")
    )]
    UnexpectedEnd { expected: String },

    #[error("unknown {kind} name \"{name}\" at position {position}")]
    #[diagnostic(
        code(termsheet::expr::unknown_name),
        help(
            "Names must be declared in one of the tables or in the base ontology. Quote \
             labels that contain spaces, e.g. 'part of'."
        )
    )]
    UnknownName {
        kind: &'static str,
        name: String,
        position: usize,
    },

    #[error("unterminated {delimiter} starting at position {position}")]
    #[diagnostic(
        code(termsheet::expr::unterminated),
        help("Close the quoted name or the <IRI>.")
    )]
    Unterminated { delimiter: &'static str, position: usize },

    #[error("invalid cardinality \"{value}\" at position {position}")]
    #[diagnostic(
        code(termsheet::expr::cardinality),
        help("min, max, and exactly take a non-negative integer.")
    )]
    InvalidCardinality { value: String, position: usize },
}

pub type ExpressionResult<T> = std::result::Result<T, ExpressionError>;
