//! Class expressions: the logical descriptions carried by SubClassOf and
//! EquivalentClasses axioms.

use serde::{Deserialize, Serialize};

use crate::symbol::Iri;

/// A named object property, or the inverse of one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectPropertyExpression {
    Named(Iri),
    Inverse(Iri),
}

impl std::fmt::Display for ObjectPropertyExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectPropertyExpression::Named(p) => write!(f, "<{p}>"),
            ObjectPropertyExpression::Inverse(p) => write!(f, "ObjectInverseOf(<{p}>)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassExpression {
    Class(Iri),
    ObjectIntersectionOf(Vec<ClassExpression>),
    ObjectUnionOf(Vec<ClassExpression>),
    ObjectComplementOf(Box<ClassExpression>),
    ObjectOneOf(Vec<Iri>),
    ObjectSomeValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },
    ObjectAllValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },
    ObjectHasValue {
        property: ObjectPropertyExpression,
        individual: Iri,
    },
    ObjectMinCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    ObjectMaxCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    ObjectExactCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    DataSomeValuesFrom { property: Iri, datatype: Iri },
    DataAllValuesFrom { property: Iri, datatype: Iri },
}

impl ClassExpression {
    pub fn class(iri: impl Into<Iri>) -> Self {
        ClassExpression::Class(iri.into())
    }

    /// The named class, if this expression is atomic.
    pub fn as_class(&self) -> Option<&Iri> {
        match self {
            ClassExpression::Class(iri) => Some(iri),
            _ => None,
        }
    }

    /// Conjunction of `operands`; a single operand is returned unwrapped.
    pub fn intersection(mut operands: Vec<ClassExpression>) -> Self {
        if operands.len() == 1 {
            return operands.remove(0);
        }
        ClassExpression::ObjectIntersectionOf(operands)
    }
}

fn write_list(f: &mut std::fmt::Formatter<'_>, name: &str, items: &[ClassExpression]) -> std::fmt::Result {
    write!(f, "{name}(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, ")")
}

fn write_cardinality(
    f: &mut std::fmt::Formatter<'_>,
    name: &str,
    n: u32,
    property: &ObjectPropertyExpression,
    filler: &Option<Box<ClassExpression>>,
) -> std::fmt::Result {
    match filler {
        Some(c) => write!(f, "{name}({n} {property} {c})"),
        None => write!(f, "{name}({n} {property})"),
    }
}

impl std::fmt::Display for ClassExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassExpression::Class(iri) => write!(f, "<{iri}>"),
            ClassExpression::ObjectIntersectionOf(ops) => write_list(f, "ObjectIntersectionOf", ops),
            ClassExpression::ObjectUnionOf(ops) => write_list(f, "ObjectUnionOf", ops),
            ClassExpression::ObjectComplementOf(inner) => write!(f, "ObjectComplementOf({inner})"),
            ClassExpression::ObjectOneOf(individuals) => {
                write!(f, "ObjectOneOf(")?;
                for (i, ind) in individuals.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "<{ind}>")?;
                }
                write!(f, ")")
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler } => {
                write!(f, "ObjectSomeValuesFrom({property} {filler})")
            }
            ClassExpression::ObjectAllValuesFrom { property, filler } => {
                write!(f, "ObjectAllValuesFrom({property} {filler})")
            }
            ClassExpression::ObjectHasValue { property, individual } => {
                write!(f, "ObjectHasValue({property} <{individual}>)")
            }
            ClassExpression::ObjectMinCardinality { cardinality, property, filler } => {
                write_cardinality(f, "ObjectMinCardinality", *cardinality, property, filler)
            }
            ClassExpression::ObjectMaxCardinality { cardinality, property, filler } => {
                write_cardinality(f, "ObjectMaxCardinality", *cardinality, property, filler)
            }
            ClassExpression::ObjectExactCardinality { cardinality, property, filler } => {
                write_cardinality(f, "ObjectExactCardinality", *cardinality, property, filler)
            }
            ClassExpression::DataSomeValuesFrom { property, datatype } => {
                write!(f, "DataSomeValuesFrom(<{property}> <{datatype}>)")
            }
            ClassExpression::DataAllValuesFrom { property, datatype } => {
                write!(f, "DataAllValuesFrom(<{property}> <{datatype}>)")
            }
        }
    }
}
