//! End-to-end integration tests for the termsheet compiler.
//!
//! These tests drive the public API only: config loading, table construction,
//! multi-table compilation, symbol-table continuation, RDF store seeding and
//! diagnostics.

use miette::Diagnostic;
use oxigraph::model::vocab::{rdf, rdfs};
use oxigraph::model::{GraphNameRef, Literal as RdfLiteral, NamedNode, Quad};
use oxigraph::store::Store;

use termsheet::graph::sparql::absorb_store;
use termsheet::graph::{
    Annotation, AnnotationValue, Axiom, ClassExpression, Literal, ObjectPropertyExpression,
};
use termsheet::symbol::{vocab, Entity, EntityKind, Iri};
use termsheet::{CompileConfig, Compiler, Ontology, SheetError, SymbolTable, Table};

const NS: &str = "http://example.com/anatomy/";

const CONFIG: &str = r#"
default_namespace = "http://example.com/anatomy/"

[prefixes]
ex = "http://example.com/anatomy/"
oboInOwl = "http://www.geneontology.org/formats/oboInOwl#"
"#;

fn ex(local: &str) -> Iri {
    Iri::new(format!("{NS}{local}"))
}

fn table(name: &str, rows: &[&[&str]]) -> Table {
    let rows = rows
        .iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect();
    Table::new(name, rows).unwrap()
}

fn anatomy_compiler() -> Compiler {
    Compiler::new(CompileConfig::from_toml_str(CONFIG).unwrap()).unwrap()
}

fn properties() -> Table {
    table(
        "properties",
        &[
            &["Id", "Type", "Label"],
            &["ID", "TYPE", "A rdfs:label"],
            &["ex:part_of", "owl:ObjectProperty", "part of"],
            &["oboInOwl:hasExactSynonym", "owl:AnnotationProperty", "has exact synonym"],
        ],
    )
}

fn classes() -> Table {
    table(
        "classes",
        &[
            &["Id", "Label", "French", "Synonyms", "Kind", "Part of", "Parent"],
            &[
                "ID",
                "A rdfs:label",
                "AL rdfs:label@fr",
                "A oboInOwl:hasExactSynonym SPLIT=|",
                "CLASS_TYPE",
                "C 'part of' some %",
                "CI",
            ],
            &["hand", "hand", "main", "manus|paw", "", "arm", "ex:limb_part"],
            &["arm", "arm", "bras", "", "subclass", "", "ex:limb_part"],
            &["", "orphan row"],
            &["finger", "finger", "doigt", "", "Equivalent", "hand", "ex:limb_part"],
        ],
    )
}

#[test]
fn end_to_end_multi_table_compile() {
    let compiler = anatomy_compiler();
    // Logic in the first table refers to a property declared in the second.
    let ont = compiler.compile(&[classes(), properties()], None, None).unwrap();

    assert_eq!(ont.len(), 21);
    assert_eq!(ont.declarations().count(), 5);
    assert!(ont.contains(&Axiom::Declaration(Entity::new(
        EntityKind::ObjectProperty,
        ex("part_of")
    ))));

    let hand_annotations: Vec<&Annotation> = ont.annotations_of(&ex("hand")).collect();
    assert_eq!(hand_annotations.len(), 4);
    assert_eq!(
        hand_annotations[1].value,
        AnnotationValue::Literal(Literal::Lang {
            value: "main".into(),
            lang: "fr".into(),
        })
    );
    assert_eq!(
        hand_annotations[3].property.as_str(),
        "http://www.geneontology.org/formats/oboInOwl#hasExactSynonym"
    );

    let part_of_arm = ClassExpression::ObjectSomeValuesFrom {
        property: ObjectPropertyExpression::Named(ex("part_of")),
        filler: Box::new(ClassExpression::Class(ex("arm"))),
    };
    let hand_parents: Vec<&ClassExpression> = ont.superclasses_of(&ex("hand")).collect();
    assert_eq!(
        hand_parents,
        vec![&part_of_arm, &ClassExpression::Class(ex("limb_part"))]
    );

    assert!(ont.contains(&Axiom::EquivalentClasses(vec![
        ClassExpression::Class(ex("finger")),
        ClassExpression::ObjectIntersectionOf(vec![
            ClassExpression::ObjectSomeValuesFrom {
                property: ObjectPropertyExpression::Named(ex("part_of")),
                filler: Box::new(ClassExpression::Class(ex("hand"))),
            },
            ClassExpression::Class(ex("limb_part")),
        ]),
    ])));
}

#[test]
fn labels_with_apostrophes_resolve_in_expressions() {
    let diseases = table(
        "diseases",
        &[
            &["Id", "Label"],
            &["ID", "A rdfs:label"],
            &["crohns", "Crohn's disease"],
        ],
    );
    let findings = table(
        "findings",
        &[
            &["Id", "Parent", "Located in"],
            &["ID", "C %", "C 'part of' some 'Crohn''s disease'"],
            &["ileitis", "Crohn's disease", "x"],
        ],
    );
    let ont = anatomy_compiler()
        .compile(&[properties(), diseases, findings], None, None)
        .unwrap();
    let parents: Vec<&ClassExpression> = ont.superclasses_of(&ex("ileitis")).collect();
    assert_eq!(
        parents,
        vec![
            &ClassExpression::Class(ex("crohns")),
            &ClassExpression::ObjectSomeValuesFrom {
                property: ObjectPropertyExpression::Named(ex("part_of")),
                filler: Box::new(ClassExpression::Class(ex("crohns"))),
            },
        ]
    );
}

#[test]
fn compiled_ontology_serializes() {
    let ont = anatomy_compiler()
        .compile(&[properties(), classes()], None, None)
        .unwrap();
    let json = serde_json::to_string(&ont).unwrap();
    let back: Ontology = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ont);
}

#[test]
fn failure_anywhere_returns_no_ontology() {
    let broken = table(
        "broken",
        &[
            &["Id", "Kind"],
            &["ID", "CLASS_TYPE"],
            &["nail", "overlaps"],
        ],
    );
    let err = anatomy_compiler()
        .compile(&[properties(), classes(), broken], None, None)
        .unwrap_err();
    assert!(matches!(err, SheetError::Compile(_)));
    assert_eq!(
        err.code().map(|c| c.to_string()).as_deref(),
        Some("termsheet::compile::unknown_class_type")
    );
    let message = err.to_string();
    assert!(message.contains("row 3"), "{message}");
    assert!(message.contains("\"nail\""), "{message}");
    assert!(message.contains("\"broken\""), "{message}");
    assert!(message.contains("column 2 (\"Kind\")"), "{message}");
}

#[test]
fn identifier_column_errors_carry_diagnostic_codes() {
    let no_id = table("no_id", &[&["Label"], &["A rdfs:label"], &["x"]]);
    let err = termsheet::compile(&[no_id]).unwrap_err();
    assert_eq!(
        err.code().map(|c| c.to_string()).as_deref(),
        Some("termsheet::template::missing_id")
    );
    assert!(err.help().is_some());
}

#[test]
fn symbol_table_carries_over_between_compilations() {
    let compiler = anatomy_compiler();
    let first = compiler.compile(&[properties()], None, None).unwrap();

    let mut symbols = SymbolTable::new(compiler.config());
    symbols.absorb(&first);

    let later = table(
        "later",
        &[
            &["Id", "Part of"],
            &["ID", "C 'part of' some %"],
            &["wrist", "hand"],
            &["hand", ""],
        ],
    );
    let second = compiler.compile(&[later], None, Some(symbols)).unwrap();
    assert!(second.contains(&Axiom::SubClassOf {
        sub: ClassExpression::Class(ex("wrist")),
        sup: ClassExpression::ObjectSomeValuesFrom {
            property: ObjectPropertyExpression::Named(ex("part_of")),
            filler: Box::new(ClassExpression::Class(ex("hand"))),
        },
    }));
    // Properties came from the earlier run and are not declared again.
    assert_eq!(second.declarations().count(), 2);
}

#[test]
fn rdf_store_seeds_the_symbol_table() {
    let store = Store::new().unwrap();
    let limb = NamedNode::new(format!("{NS}limb")).unwrap();
    let part_of = NamedNode::new(format!("{NS}part_of")).unwrap();
    for quad in [
        Quad::new(
            limb.clone(),
            rdf::TYPE,
            NamedNode::new(EntityKind::Class.type_iri()).unwrap(),
            GraphNameRef::DefaultGraph,
        ),
        Quad::new(
            limb,
            rdfs::LABEL,
            RdfLiteral::new_simple_literal("upper limb"),
            GraphNameRef::DefaultGraph,
        ),
        Quad::new(
            part_of.clone(),
            rdf::TYPE,
            NamedNode::new(EntityKind::ObjectProperty.type_iri()).unwrap(),
            GraphNameRef::DefaultGraph,
        ),
        Quad::new(
            part_of,
            rdfs::LABEL,
            RdfLiteral::new_simple_literal("part of"),
            GraphNameRef::DefaultGraph,
        ),
    ] {
        store.insert(&quad).unwrap();
    }

    let compiler = anatomy_compiler();
    let mut symbols = SymbolTable::new(compiler.config());
    assert_eq!(absorb_store(&mut symbols, &store).unwrap(), 2);

    let text = "Id,Label,Part of\nID,A rdfs:label,C 'part of' some %\nshoulder,shoulder,upper limb\n";
    let sheet = Table::from_delimited("joints", text, ',').unwrap();
    let ont = compiler.compile(&[sheet], None, Some(symbols)).unwrap();
    assert!(ont.contains(&Axiom::SubClassOf {
        sub: ClassExpression::Class(ex("shoulder")),
        sup: ClassExpression::ObjectSomeValuesFrom {
            property: ObjectPropertyExpression::Named(ex("part_of")),
            filler: Box::new(ClassExpression::Class(ex("limb"))),
        },
    }));
    assert!(ont.contains(&Axiom::AnnotationAssertion {
        subject: ex("shoulder"),
        annotation: Annotation::plain(Iri::new(vocab::RDFS_LABEL), "shoulder"),
    }));
}

#[test]
fn list_identifiers_leaves_compilation_unchanged() {
    let compiler = anatomy_compiler();
    let tables = [properties(), classes()];
    let before = compiler.compile(&tables, None, None).unwrap();
    let ids = compiler.list_identifiers(&tables).unwrap();
    assert_eq!(ids, compiler.list_identifiers(&tables).unwrap());
    assert_eq!(
        ids,
        vec![
            ex("part_of"),
            Iri::new("http://www.geneontology.org/formats/oboInOwl#hasExactSynonym"),
            ex("hand"),
            ex("arm"),
            ex("finger"),
        ]
    );
    assert_eq!(compiler.compile(&tables, None, None).unwrap(), before);
}
