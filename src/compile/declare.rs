//! Declaration pass: one declaration plus its annotations per data row.
//!
//! The pass reads the symbol table but never writes it; the orchestrator
//! absorbs the pass's output once every table has been declared.

use crate::error::SheetResult;
use crate::graph::{Annotation, AnnotationValue, Axiom, Literal, Ontology};
use crate::iri::IriResolver;
use crate::registry::NameResolver;
use crate::symbol::{Entity, EntityKind};
use crate::template::{Column, Directive, Table, TableLayout};

use super::Subject;

/// The property tagging an explicit `TYPE` value.
const TYPE_PROPERTY: &str = "rdf:type";

/// Run the declaration pass over one table. Returns the number of axioms
/// added to `out`.
pub fn declare_table(
    table: &Table,
    layout: &TableLayout,
    resolver: &dyn IriResolver,
    names: &dyn NameResolver,
    out: &mut Ontology,
) -> SheetResult<usize> {
    let mut added = 0;
    for row in table.rows() {
        let Some(subject) = Subject::of(table, layout, row, resolver)? else {
            continue;
        };

        let mut kind = EntityKind::Class;
        let mut annotations = Vec::new();
        for column in layout.declarative() {
            let Some(cell) = row.value(column.index) else {
                continue;
            };
            for value in column.template.values(cell) {
                if let Directive::TypeSelector = column.template.directive {
                    let type_iri = resolver
                        .resolve(value)
                        .ok_or_else(|| subject.bad_reference(column, value))?;
                    kind = EntityKind::from_type_iri(type_iri.as_str());
                    let property = names
                        .resolve_property(TYPE_PROPERTY)
                        .map_err(|e| subject.unresolved(column, e))?;
                    annotations.push(Annotation::new(property, AnnotationValue::Iri(type_iri)));
                } else if let Some(a) = annotation(&subject, column, value, resolver, names)? {
                    annotations.push(a);
                }
            }
        }

        if out.add(Axiom::Declaration(Entity::new(kind, subject.iri.clone()))) {
            added += 1;
        }
        for annotation in annotations {
            let axiom = Axiom::AnnotationAssertion {
                subject: subject.iri.clone(),
                annotation,
            };
            if out.add(axiom) {
                added += 1;
            }
        }
    }
    Ok(added)
}

fn annotation(
    subject: &Subject<'_>,
    column: &Column,
    value: &str,
    resolver: &dyn IriResolver,
    names: &dyn NameResolver,
) -> SheetResult<Option<Annotation>> {
    let property = |name: &str| {
        names
            .resolve_property(name)
            .map_err(|e| subject.unresolved(column, e))
    };
    let annotation = match &column.template.directive {
        Directive::StringAnnotation { property: p } => Annotation::plain(property(p)?, value),
        Directive::TypedAnnotation {
            property: p,
            datatype,
        } => {
            let datatype = names
                .resolve_datatype(datatype)
                .map_err(|e| subject.unresolved(column, e))?;
            Annotation::new(
                property(p)?,
                AnnotationValue::Literal(Literal::Typed {
                    value: value.to_string(),
                    datatype,
                }),
            )
        }
        Directive::LanguageAnnotation { property: p, lang } => Annotation::new(
            property(p)?,
            AnnotationValue::Literal(Literal::Lang {
                value: value.to_string(),
                lang: lang.clone(),
            }),
        ),
        Directive::IriAnnotation { property: p } => {
            let iri = resolver
                .resolve(value)
                .ok_or_else(|| subject.bad_reference(column, value))?;
            Annotation::new(property(p)?, AnnotationValue::Iri(iri))
        }
        Directive::Identifier
        | Directive::TypeSelector
        | Directive::ClassTypeSelector
        | Directive::ClassExpression { .. }
        | Directive::ClassReference => return Ok(None),
    };
    Ok(Some(annotation))
}
