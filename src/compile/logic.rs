//! Logic pass: subclass and equivalence axioms from `C` and `CI` columns.

use crate::config::EmptyEquivalentPolicy;
use crate::error::{CompileError, SheetResult};
use crate::grammar;
use crate::graph::{Axiom, ClassExpression, Ontology};
use crate::template::{Directive, Table, TableLayout};

use super::{LogicContext, Subject};

/// How a row's class expressions relate to the row's class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassType {
    Subclass,
    Equivalent,
}

impl ClassType {
    /// Case-insensitive match on `subclass` / `equivalent`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "subclass" => Some(ClassType::Subclass),
            "equivalent" => Some(ClassType::Equivalent),
            _ => None,
        }
    }
}

/// Run the logic pass over one table. Returns the number of axioms added to
/// `out`.
pub fn logic_table(
    table: &Table,
    layout: &TableLayout,
    ctx: &LogicContext<'_>,
    out: &mut Ontology,
) -> SheetResult<usize> {
    let mut added = 0;
    for row in table.rows() {
        let Some(subject) = Subject::of(table, layout, row, ctx.resolver)? else {
            continue;
        };

        let mut class_type = None;
        let mut expressions = Vec::new();
        for column in layout.logical() {
            let Some(cell) = row.value(column.index) else {
                continue;
            };
            match &column.template.directive {
                Directive::ClassTypeSelector => {
                    let parsed =
                        ClassType::parse(cell).ok_or_else(|| CompileError::UnknownClassType {
                            table: table.name().to_string(),
                            row: row.number,
                            id: subject.id.to_string(),
                            column: column.number(),
                            header: column.header.clone(),
                            value: cell.to_string(),
                        })?;
                    class_type = Some(parsed);
                }
                Directive::ClassExpression { template } => {
                    for value in column.template.values(cell) {
                        let text = grammar::substitute(template, value);
                        let expr = ctx.parser.parse(&text, ctx.names).map_err(|e| {
                            CompileError::ExpressionParse {
                                table: table.name().to_string(),
                                row: row.number,
                                id: subject.id.to_string(),
                                column: column.number(),
                                header: column.header.clone(),
                                text: text.clone(),
                                message: e.to_string(),
                            }
                        })?;
                        expressions.push(expr);
                    }
                }
                Directive::ClassReference => {
                    for value in column.template.values(cell) {
                        let iri = ctx
                            .resolver
                            .resolve(value)
                            .ok_or_else(|| subject.bad_reference(column, value))?;
                        expressions.push(ClassExpression::Class(iri));
                    }
                }
                _ => {}
            }
        }

        let class_type = match class_type {
            Some(t) => t,
            None if ctx.config.require_class_type && !expressions.is_empty() => {
                let (column, header) = class_type_column(layout);
                return Err(CompileError::MissingClassType {
                    table: table.name().to_string(),
                    row: row.number,
                    id: subject.id.to_string(),
                    column,
                    header,
                }
                .into());
            }
            None => ClassType::Subclass,
        };

        let sub = ClassExpression::Class(subject.iri.clone());
        match class_type {
            ClassType::Subclass => {
                for sup in expressions {
                    if out.add(Axiom::SubClassOf {
                        sub: sub.clone(),
                        sup,
                    }) {
                        added += 1;
                    }
                }
            }
            ClassType::Equivalent if expressions.is_empty() => match ctx.config.empty_equivalent {
                EmptyEquivalentPolicy::Skip => {
                    tracing::warn!(
                        table = table.name(),
                        row = row.number,
                        id = subject.id,
                        "equivalent class type without class expressions, row skipped"
                    );
                }
                EmptyEquivalentPolicy::Error => {
                    return Err(CompileError::EmptyEquivalence {
                        table: table.name().to_string(),
                        row: row.number,
                        id: subject.id.to_string(),
                    }
                    .into());
                }
            },
            ClassType::Equivalent => {
                let mut operands: Vec<ClassExpression> = Vec::with_capacity(expressions.len());
                for expr in expressions {
                    if !operands.contains(&expr) {
                        operands.push(expr);
                    }
                }
                let conjunction = ClassExpression::intersection(operands);
                if out.add(Axiom::EquivalentClasses(vec![sub, conjunction])) {
                    added += 1;
                }
            }
        }
    }
    Ok(added)
}

/// Number and header of the column a missing class type is reported against:
/// the first `CLASS_TYPE` column, else the `ID` column.
fn class_type_column(layout: &TableLayout) -> (usize, String) {
    layout
        .logical()
        .find(|c| matches!(c.template.directive, Directive::ClassTypeSelector))
        .or_else(|| layout.columns.iter().find(|c| c.index == layout.id_column))
        .map(|c| (c.number(), c.header.clone()))
        .unwrap_or((layout.id_column + 1, String::new()))
}
