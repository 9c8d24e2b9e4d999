//! Output graph: the axioms a template compilation produces.
//!
//! - **Values** ([`Literal`], [`AnnotationValue`], [`Annotation`]): attribute data
//! - **Logic** ([`ClassExpression`]): composite class descriptions
//! - **Facts** ([`Axiom`]): the four axiom forms the compiler emits
//! - **Container** ([`Ontology`]): an append-only, insertion-ordered axiom set
//!
//! [`sparql`] reads an RDF base graph into the symbol table.

pub mod expr;
pub mod ontology;
pub mod sparql;

use serde::{Deserialize, Serialize};

use crate::symbol::{Entity, Iri};

pub use expr::{ClassExpression, ObjectPropertyExpression};
pub use ontology::Ontology;

/// A literal annotation value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    /// Plain text.
    Plain(String),
    /// Text with a datatype IRI.
    Typed { value: String, datatype: Iri },
    /// Text with a language tag.
    Lang { value: String, lang: String },
}

impl Literal {
    /// The lexical form, regardless of datatype or language.
    pub fn value(&self) -> &str {
        match self {
            Literal::Plain(v) => v,
            Literal::Typed { value, .. } | Literal::Lang { value, .. } => value,
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Plain(v) => write!(f, "{v:?}"),
            Literal::Typed { value, datatype } => write!(f, "{value:?}^^<{datatype}>"),
            Literal::Lang { value, lang } => write!(f, "{value:?}@{lang}"),
        }
    }
}

/// The object of an annotation: a literal or a reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationValue {
    Literal(Literal),
    Iri(Iri),
}

/// A property/value pair attached to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    pub property: Iri,
    pub value: AnnotationValue,
}

impl Annotation {
    pub fn new(property: Iri, value: AnnotationValue) -> Self {
        Self { property, value }
    }

    pub fn plain(property: Iri, value: impl Into<String>) -> Self {
        Self::new(property, AnnotationValue::Literal(Literal::Plain(value.into())))
    }
}

/// An immutable fact in the output graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axiom {
    /// The entity exists with the given kind.
    Declaration(Entity),
    /// The subject carries the annotation.
    AnnotationAssertion { subject: Iri, annotation: Annotation },
    /// Every instance of `sub` satisfies `sup`.
    SubClassOf { sub: ClassExpression, sup: ClassExpression },
    /// All listed expressions denote the same set.
    EquivalentClasses(Vec<ClassExpression>),
}

impl std::fmt::Display for Axiom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axiom::Declaration(entity) => write!(f, "Declaration({entity})"),
            Axiom::AnnotationAssertion { subject, annotation } => {
                let value = match &annotation.value {
                    AnnotationValue::Literal(lit) => lit.to_string(),
                    AnnotationValue::Iri(iri) => format!("<{iri}>"),
                };
                write!(f, "AnnotationAssertion(<{}> <{subject}> {value})", annotation.property)
            }
            Axiom::SubClassOf { sub, sup } => write!(f, "SubClassOf({sub} {sup})"),
            Axiom::EquivalentClasses(exprs) => {
                write!(f, "EquivalentClasses(")?;
                for (i, e) in exprs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{e}")?;
                }
                write!(f, ")")
            }
        }
    }
}
