//! Class-expression sub-language used by `C` template columns.
//!
//! The compiler treats the parser as a pluggable collaborator: anything that
//! implements [`ExpressionParser`] can turn substituted template text into a
//! [`ClassExpression`], resolving names through a [`NameResolver`]. The
//! built-in [`ManchesterParser`] covers the common Manchester-syntax forms.

pub mod error;
pub mod lexer;
pub mod parser;

use crate::graph::ClassExpression;
use crate::registry::NameResolver;

pub use error::{ExpressionError, ExpressionResult};

/// The placeholder a `C` template replaces with the cell value.
pub const PLACEHOLDER: char = '%';

/// Parses class-expression text against a symbol table.
pub trait ExpressionParser {
    fn parse(&self, text: &str, resolver: &dyn NameResolver) -> ExpressionResult<ClassExpression>;
}

/// Manchester-syntax subset parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManchesterParser;

impl ExpressionParser for ManchesterParser {
    fn parse(&self, text: &str, resolver: &dyn NameResolver) -> ExpressionResult<ClassExpression> {
        parser::parse_expression(text, resolver)
    }
}

/// Make a cell value safe to splice into an expression as a single name.
///
/// Values that already lex as one bare name, one quoted name, or one `<IRI>`
/// are returned unchanged; anything else is wrapped in single quotes, with
/// apostrophes doubled.
pub fn quote_name(value: &str) -> String {
    let value = value.trim();
    let already_quoted = value.len() >= 2
        && ((value.starts_with('\'') && value.ends_with('\''))
            || (value.starts_with('<') && value.ends_with('>')));
    let bare = !value.is_empty()
        && value.chars().all(lexer::is_bare_char)
        && !lexer::Keyword::is_reserved(value);
    if already_quoted || bare {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "''"))
    }
}

/// Replace every placeholder in `template` with the quoted cell value.
pub fn substitute(template: &str, value: &str) -> String {
    template.replace(PLACEHOLDER, &quote_name(value))
}
