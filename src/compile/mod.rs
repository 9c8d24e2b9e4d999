//! Compiler facade: tables in, ontology out.
//!
//! A compilation runs in three phases, each total before the next begins:
//!
//! 1. every table's layout is validated and its directives classified;
//! 2. the declaration pass runs over every table, and its output is absorbed
//!    into the symbol table;
//! 3. the logic pass runs over every table against the grown symbol table.
//!
//! Any error aborts the whole compilation; no partial ontology escapes.

pub mod declare;
pub mod logic;

use crate::config::CompileConfig;
use crate::error::{CompileError, ResolveError, SheetResult};
use crate::grammar::{ExpressionParser, ManchesterParser};
use crate::graph::Ontology;
use crate::iri::{IriResolver, PrefixResolver};
use crate::registry::SymbolTable;
use crate::symbol::Iri;
use crate::template::{Column, Row, Table, TableLayout};

/// Compiles template tables into an [`Ontology`].
pub struct Compiler {
    config: CompileConfig,
    resolver: Box<dyn IriResolver>,
    parser: Box<dyn ExpressionParser>,
}

impl Compiler {
    /// Create a compiler with the prefix resolver and the Manchester parser.
    pub fn new(config: CompileConfig) -> SheetResult<Self> {
        config.validate()?;
        let resolver = PrefixResolver::new(&config);
        Ok(Self {
            config,
            resolver: Box::new(resolver),
            parser: Box::new(ManchesterParser),
        })
    }

    /// Replace the identifier-to-IRI resolver.
    pub fn with_resolver(mut self, resolver: impl IriResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Replace the class-expression parser.
    pub fn with_parser(mut self, parser: impl ExpressionParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Compile `tables` in order.
    ///
    /// `symbols` continues an existing symbol table; otherwise a fresh one is
    /// built from the config. `base` is absorbed into it before anything else,
    /// so its entities and labels are visible to class expressions. The
    /// returned ontology holds only the axioms compiled from `tables`.
    pub fn compile(
        &self,
        tables: &[Table],
        base: Option<&Ontology>,
        symbols: Option<SymbolTable>,
    ) -> SheetResult<Ontology> {
        tracing::info!(tables = tables.len(), "compiling template tables");

        let mut symbols = symbols.unwrap_or_else(|| SymbolTable::new(&self.config));
        if let Some(base) = base {
            let added = symbols.absorb(base);
            tracing::debug!(added, base_axioms = base.len(), "absorbed base ontology");
        }

        let layouts = tables
            .iter()
            .map(Table::layout)
            .collect::<Result<Vec<_>, _>>()?;

        let mut ontology = Ontology::new();
        for (table, layout) in tables.iter().zip(&layouts) {
            let added = declare::declare_table(
                table,
                layout,
                self.resolver.as_ref(),
                &symbols,
                &mut ontology,
            )?;
            tracing::debug!(table = table.name(), added, "declaration pass");
        }

        symbols.absorb(&ontology);

        for (table, layout) in tables.iter().zip(&layouts) {
            let added = logic::logic_table(
                table,
                layout,
                &LogicContext {
                    config: &self.config,
                    resolver: self.resolver.as_ref(),
                    names: &symbols,
                    parser: self.parser.as_ref(),
                },
                &mut ontology,
            )?;
            tracing::debug!(table = table.name(), added, "logic pass");
        }

        tracing::info!(
            tables = tables.len(),
            axioms = ontology.len(),
            symbols = symbols.len(),
            "compilation complete"
        );
        Ok(ontology)
    }

    /// Every resolvable identifier in `tables`, in table and row order.
    ///
    /// Blank identifiers and identifiers the resolver rejects are skipped.
    /// Nothing is compiled and no state is kept between calls.
    pub fn list_identifiers(&self, tables: &[Table]) -> SheetResult<Vec<Iri>> {
        let mut iris = Vec::new();
        for table in tables {
            let layout = table.layout()?;
            iris.extend(
                table
                    .rows()
                    .filter_map(|row| row.value(layout.id_column))
                    .filter_map(|id| self.resolver.resolve(id)),
            );
        }
        Ok(iris)
    }
}

impl std::fmt::Debug for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Compile `tables` with the default config, no base ontology and a fresh
/// symbol table.
pub fn compile(tables: &[Table]) -> SheetResult<Ontology> {
    Compiler::new(CompileConfig::default())?.compile(tables, None, None)
}

/// Collaborators the logic pass reads from.
pub struct LogicContext<'a> {
    pub config: &'a CompileConfig,
    pub resolver: &'a dyn IriResolver,
    pub names: &'a SymbolTable,
    pub parser: &'a dyn ExpressionParser,
}

/// The row being compiled, for error reporting.
pub(crate) struct Subject<'t> {
    pub table: &'t str,
    pub row: usize,
    pub id: &'t str,
    pub iri: Iri,
}

impl<'t> Subject<'t> {
    /// Resolve a row's identifier. `Ok(None)` means the row is skipped.
    pub(crate) fn of(
        table: &'t Table,
        layout: &TableLayout,
        row: Row<'t>,
        resolver: &dyn IriResolver,
    ) -> Result<Option<Self>, ResolveError> {
        let Some(id) = row.value(layout.id_column) else {
            return Ok(None);
        };
        let iri = resolver.resolve(id).ok_or_else(|| ResolveError::Identifier {
            table: table.name().to_string(),
            row: row.number,
            id: id.to_string(),
        })?;
        Ok(Some(Self {
            table: table.name(),
            row: row.number,
            id,
            iri,
        }))
    }

    /// A cell value in `column` that should have been a reference.
    pub(crate) fn bad_reference(&self, column: &Column, value: &str) -> ResolveError {
        ResolveError::CellReference {
            table: self.table.to_string(),
            row: self.row,
            id: self.id.to_string(),
            column: column.number(),
            header: column.header.clone(),
            value: value.to_string(),
        }
    }

    /// A name in `column`'s directive that could not be resolved.
    pub(crate) fn unresolved(&self, column: &Column, source: ResolveError) -> CompileError {
        CompileError::Unresolved {
            table: self.table.to_string(),
            row: self.row,
            id: self.id.to_string(),
            column: column.number(),
            header: column.header.clone(),
            source,
        }
    }
}
