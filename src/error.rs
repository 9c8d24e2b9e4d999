//! Rich diagnostic error types for the termsheet compiler.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so a spreadsheet author knows exactly
//! which table, row, and column to fix.
//!
//! Row and column numbers are always 1-based. Row numbers count spreadsheet
//! lines: the header row is row 1 and the directive row is row 2.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for termsheet.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain through to the caller. Every variant is fatal: a compilation that
/// produces one of these returns no ontology at all.
#[derive(Debug, Error, Diagnostic)]
pub enum SheetError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),
}

// ---------------------------------------------------------------------------
// Template errors (table shape and directive grammar)
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    #[error(
        "the number of header columns ({headers}) must match the number of \
         template columns ({templates}) in table \"{table}\""
    )]
    #[diagnostic(
        code(termsheet::template::column_mismatch),
        help(
            "Row 1 holds one header per column and row 2 one directive per column. \
             Add empty directive cells for columns that carry no directive."
        )
    )]
    StructuralMismatch {
        table: String,
        headers: usize,
        templates: usize,
    },

    #[error("table \"{table}\" has {rows} row(s); a header row and a template row are required")]
    #[diagnostic(
        code(termsheet::template::empty_table),
        help("The first row must hold column headers and the second row template directives.")
    )]
    EmptyTable { table: String, rows: usize },

    #[error("template row must include exactly one \"ID\" column in table \"{table}\" (found {found})")]
    #[diagnostic(
        code(termsheet::template::missing_id),
        help("Mark the column holding each row's identifier with the directive `ID`, and only that column.")
    )]
    MissingIdentifierColumn { table: String, found: usize },

    #[error(
        "could not interpret template string \"{template}\" for column {column} \
         (\"{header}\") in table \"{table}\""
    )]
    #[diagnostic(
        code(termsheet::template::unknown),
        help(
            "Recognized directives are ID, TYPE, CLASS_TYPE, CI, \"A <property>\", \
             \"AT <property>^^<datatype>\", \"AL <property>@<lang>\", \"AI <property>\" \
             and \"C <expression with %>\", optionally followed by SPLIT=<delimiter>."
        )
    )]
    UnknownTemplate {
        table: String,
        column: usize,
        header: String,
        template: String,
    },
}

// ---------------------------------------------------------------------------
// Resolution errors (names and identifiers)
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    #[error("could not find {kind}: {name}")]
    #[diagnostic(
        code(termsheet::resolve::name),
        help(
            "The name matched no label, short form, or IRI in the symbol table, and it \
             could not be expanded into an IRI. Use a known label, a CURIE with a \
             configured prefix, or a full <IRI>."
        )
    )]
    NameResolution { kind: &'static str, name: String },

    #[error("could not create IRI for ID \"{id}\" at row {row} in table \"{table}\"")]
    #[diagnostic(
        code(termsheet::resolve::identifier),
        help(
            "Identifiers must be full IRIs, CURIEs with a configured prefix, or bare \
             names without whitespace."
        )
    )]
    Identifier { table: String, row: usize, id: String },

    #[error(
        "could not create IRI for \"{value}\" at row {row} (\"{id}\"), column {column} \
         (\"{header}\") in table \"{table}\""
    )]
    #[diagnostic(
        code(termsheet::resolve::reference),
        help("This column expects an IRI or a CURIE with a configured prefix.")
    )]
    CellReference {
        table: String,
        row: usize,
        id: String,
        column: usize,
        header: String,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Compile errors (row-level failures during the two passes)
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CompileError {
    #[error(
        "error while parsing \"{text}\" at row {row} (\"{id}\"), column {column} \
         (\"{header}\") in table \"{table}\": {message}"
    )]
    #[diagnostic(
        code(termsheet::compile::parse),
        help(
            "The substituted class expression is not valid. Quote names that contain \
             spaces with single quotes, and check that every name is declared in some \
             table or in the base ontology."
        )
    )]
    ExpressionParse {
        table: String,
        row: usize,
        id: String,
        column: usize,
        header: String,
        text: String,
        message: String,
    },

    #[error(
        "no class type found for row {row} (\"{id}\"), column {column} (\"{header}\") \
         in table \"{table}\""
    )]
    #[diagnostic(
        code(termsheet::compile::missing_class_type),
        help("Fill the CLASS_TYPE column with \"subclass\" or \"equivalent\" for this row.")
    )]
    MissingClassType {
        table: String,
        row: usize,
        id: String,
        column: usize,
        header: String,
    },

    #[error(
        "unknown class type \"{value}\" for row {row} (\"{id}\"), column {column} \
         (\"{header}\") in table \"{table}\""
    )]
    #[diagnostic(
        code(termsheet::compile::unknown_class_type),
        help("CLASS_TYPE accepts \"subclass\" or \"equivalent\" (case-insensitive).")
    )]
    UnknownClassType {
        table: String,
        row: usize,
        id: String,
        column: usize,
        header: String,
        value: String,
    },

    #[error("equivalent class type without any class expression for row {row} (\"{id}\") in table \"{table}\"")]
    #[diagnostic(
        code(termsheet::compile::empty_equivalence),
        help(
            "An equivalent-classes axiom needs at least one class expression. Fill a \
             C or CI column, or set `empty_equivalent = \"skip\"` in the config."
        )
    )]
    EmptyEquivalence { table: String, row: usize, id: String },

    #[error("at row {row} (\"{id}\"), column {column} (\"{header}\") in table \"{table}\": {source}")]
    #[diagnostic(
        code(termsheet::compile::unresolved),
        help("The directive of this column names a property or datatype that cannot be resolved.")
    )]
    Unresolved {
        table: String,
        row: usize,
        id: String,
        column: usize,
        header: String,
        #[source]
        source: ResolveError,
    },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to parse compile config: {message}")]
    #[diagnostic(
        code(termsheet::config::parse),
        help("Check the TOML syntax and the field names of the compile config.")
    )]
    Parse { message: String },

    #[error("invalid expansion \"{expansion}\" for prefix \"{prefix}\"")]
    #[diagnostic(
        code(termsheet::config::invalid_prefix),
        help("Prefix expansions must be non-empty IRIs without whitespace.")
    )]
    InvalidPrefix { prefix: String, expansion: String },
}

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("SPARQL query error: {message}")]
    #[diagnostic(
        code(termsheet::graph::sparql),
        help(
            "Reading the base graph from the RDF store failed. Check that the store \
             is open and readable."
        )
    )]
    Sparql { message: String },
}

/// Convenience alias for functions returning termsheet results.
pub type SheetResult<T> = std::result::Result<T, SheetError>;
