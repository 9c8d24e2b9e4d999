//! Base graphs held in an oxigraph RDF store.
//!
//! A base graph is usually an existing ontology loaded into a store by the
//! caller. Only its typed OWL entities and their label-property values matter
//! to the compiler; everything else in the store is ignored.

use oxigraph::model::Term;
use oxigraph::sparql::{QueryResults, QuerySolution};
use oxigraph::store::Store;

use crate::error::{GraphError, SheetResult};
use crate::registry::SymbolTable;
use crate::symbol::{Entity, EntityKind, Iri};

use super::{Annotation, AnnotationValue, Axiom, Literal, Ontology};

/// Read the declarations and labels of `store` as an ontology.
///
/// Labels are read for every property in `label_properties`. Results are
/// ordered by entity IRI so that name conflicts resolve the same way on every
/// run.
pub fn ontology_from_store(store: &Store, label_properties: &[Iri]) -> SheetResult<Ontology> {
    let mut ontology = Ontology::new();

    let kinds = EntityKind::ALL
        .iter()
        .map(|k| format!("<{}>", k.type_iri()))
        .collect::<Vec<_>>()
        .join(", ");
    let declarations = format!(
        "SELECT ?entity ?type WHERE {{ ?entity a ?type . \
         FILTER(isIRI(?entity) && ?type IN ({kinds})) }} ORDER BY ?entity ?type"
    );
    for solution in select(store, &declarations)? {
        if let (Some(Term::NamedNode(entity)), Some(Term::NamedNode(ty))) =
            (solution.get("entity"), solution.get("type"))
        {
            let kind = EntityKind::from_type_iri(ty.as_str());
            ontology.add(Axiom::Declaration(Entity::new(kind, Iri::new(entity.as_str()))));
        }
    }

    for property in label_properties {
        let labels = format!(
            "SELECT ?entity ?label WHERE {{ ?entity <{property}> ?label . \
             FILTER(isIRI(?entity) && isLiteral(?label)) }} ORDER BY ?entity ?label"
        );
        for solution in select(store, &labels)? {
            if let (Some(Term::NamedNode(entity)), Some(Term::Literal(label))) =
                (solution.get("entity"), solution.get("label"))
            {
                let literal = match label.language() {
                    Some(lang) => Literal::Lang {
                        value: label.value().to_string(),
                        lang: lang.to_string(),
                    },
                    None => Literal::Plain(label.value().to_string()),
                };
                ontology.add(Axiom::AnnotationAssertion {
                    subject: Iri::new(entity.as_str()),
                    annotation: Annotation::new(property.clone(), AnnotationValue::Literal(literal)),
                });
            }
        }
    }

    Ok(ontology)
}

/// Seed `symbols` with the entities and labels of `store`.
///
/// Returns the number of entities that were new to the table.
pub fn absorb_store(symbols: &mut SymbolTable, store: &Store) -> SheetResult<usize> {
    let ontology = ontology_from_store(store, symbols.label_properties())?;
    let added = symbols.absorb(&ontology);
    tracing::info!(added, axioms = ontology.len(), "seeded symbol table from RDF store");
    Ok(added)
}

fn select(store: &Store, sparql: &str) -> Result<Vec<QuerySolution>, GraphError> {
    let results = store.query(sparql).map_err(|e| GraphError::Sparql {
        message: format!("SPARQL query failed: {e}"),
    })?;
    match results {
        QueryResults::Solutions(solutions) => solutions
            .map(|s| {
                s.map_err(|e| GraphError::Sparql {
                    message: format!("solution error: {e}"),
                })
            })
            .collect(),
        _ => Err(GraphError::Sparql {
            message: "expected solutions from SELECT query".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::vocab::{rdf, rdfs};
    use oxigraph::model::{GraphNameRef, Literal as RdfLiteral, NamedNode, Quad};

    use crate::registry::NameResolver;

    fn node(iri: &str) -> NamedNode {
        NamedNode::new(iri).unwrap()
    }

    fn store_with_widget() -> Store {
        let store = Store::new().unwrap();
        let y1 = node("http://example.com/Y1");
        let part_of = node("http://example.com/part_of");
        for quad in [
            Quad::new(
                y1.clone(),
                rdf::TYPE,
                node(EntityKind::Class.type_iri()),
                GraphNameRef::DefaultGraph,
            ),
            Quad::new(
                y1.clone(),
                rdfs::LABEL,
                RdfLiteral::new_simple_literal("Widget"),
                GraphNameRef::DefaultGraph,
            ),
            Quad::new(
                part_of.clone(),
                rdf::TYPE,
                node(EntityKind::ObjectProperty.type_iri()),
                GraphNameRef::DefaultGraph,
            ),
            Quad::new(
                part_of,
                rdfs::LABEL,
                RdfLiteral::new_language_tagged_literal("part of", "en").unwrap(),
                GraphNameRef::DefaultGraph,
            ),
            Quad::new(
                y1,
                rdfs::COMMENT,
                RdfLiteral::new_simple_literal("not a label"),
                GraphNameRef::DefaultGraph,
            ),
        ] {
            store.insert(&quad).unwrap();
        }
        store
    }

    #[test]
    fn reads_declarations_and_labels() {
        let store = store_with_widget();
        let ont = ontology_from_store(&store, &[Iri::new(rdfs::LABEL.as_str())]).unwrap();
        assert!(ont.contains(&Axiom::Declaration(Entity::class(Iri::new(
            "http://example.com/Y1"
        )))));
        assert!(ont.contains(&Axiom::Declaration(Entity::new(
            EntityKind::ObjectProperty,
            Iri::new("http://example.com/part_of")
        ))));
        assert_eq!(ont.declarations().count(), 2);
        assert_eq!(ont.len(), 4);
    }

    #[test]
    fn absorbed_labels_resolve_in_expressions() {
        let store = store_with_widget();
        let mut symbols = SymbolTable::default();
        assert_eq!(absorb_store(&mut symbols, &store).unwrap(), 2);
        let class = symbols
            .resolve_in_expression("Widget", EntityKind::Class)
            .unwrap();
        assert_eq!(class.iri.as_str(), "http://example.com/Y1");
        assert!(symbols
            .resolve_in_expression("'part of'", EntityKind::ObjectProperty)
            .is_some());
        assert!(symbols
            .resolve_in_expression("'not a label'", EntityKind::Class)
            .is_none());
    }

    #[test]
    fn empty_store_adds_nothing() {
        let store = Store::new().unwrap();
        let mut symbols = SymbolTable::default();
        assert_eq!(absorb_store(&mut symbols, &store).unwrap(), 0);
    }
}
