// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # termsheet
//!
//! A template compiler that turns spreadsheet tables into OWL ontologies.
//!
//! Each table carries a header row, a row of per-column directives (`ID`,
//! `TYPE`, `A rdfs:label`, `C 'part of' some %`, ...) and data rows. The
//! compiler declares one entity per row, attaches its annotations, and then,
//! once every table's entities and labels are known, builds subclass and
//! equivalence axioms from the class-expression columns.
//!
//! ## Architecture
//!
//! - **Directives** (`template`): table shape validation and directive classification
//! - **Symbol table** (`registry`): label, short-form and CURIE resolution
//! - **Expressions** (`grammar`): Manchester-syntax class-expression parser
//! - **Passes** (`compile`): declaration pass, symbol absorption, logic pass
//! - **Output** (`graph`): axioms and the append-only [`Ontology`]
//!
//! ## Library usage
//!
//! ```
//! use termsheet::template::Table;
//!
//! let text = "Id\tLabel\tParent\nID\tA rdfs:label\tC %\nY1\tWidget\t\nX1\tSprocket\tWidget\n";
//! let table = Table::from_delimited("parts", text, '\t').unwrap();
//! let ontology = termsheet::compile(&[table]).unwrap();
//! assert_eq!(ontology.len(), 5);
//! ```

pub mod compile;
pub mod config;
pub mod error;
pub mod grammar;
pub mod graph;
pub mod iri;
pub mod registry;
pub mod symbol;
pub mod template;

pub use compile::{compile, Compiler};
pub use config::CompileConfig;
pub use error::{SheetError, SheetResult};
pub use graph::Ontology;
pub use registry::SymbolTable;
pub use template::Table;
