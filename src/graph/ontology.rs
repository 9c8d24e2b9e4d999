//! The axiom container returned by a compilation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Annotation, Axiom, ClassExpression};
use crate::symbol::{Entity, Iri};

/// An append-only, insertion-ordered set of axioms.
///
/// Adding an axiom that is already present is a no-op, so an entity declared
/// by several rows is declared once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Axiom>", into = "Vec<Axiom>")]
pub struct Ontology {
    axioms: Vec<Axiom>,
    index: HashSet<Axiom>,
}

impl Ontology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an axiom. Returns `false` if it was already present.
    pub fn add(&mut self, axiom: Axiom) -> bool {
        if self.index.contains(&axiom) {
            return false;
        }
        self.index.insert(axiom.clone());
        self.axioms.push(axiom);
        true
    }

    /// Append every axiom of an iterator, returning how many were new.
    pub fn extend(&mut self, axioms: impl IntoIterator<Item = Axiom>) -> usize {
        let mut added = 0;
        for axiom in axioms {
            if self.add(axiom) {
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, axiom: &Axiom) -> bool {
        self.index.contains(axiom)
    }

    /// All axioms in insertion order.
    pub fn axioms(&self) -> &[Axiom] {
        &self.axioms
    }

    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    /// Declared entities in declaration order.
    pub fn declarations(&self) -> impl Iterator<Item = &Entity> {
        self.axioms.iter().filter_map(|ax| match ax {
            Axiom::Declaration(e) => Some(e),
            _ => None,
        })
    }

    /// Alias for [`declarations`](Self::declarations) collected into a set.
    pub fn signature(&self) -> HashSet<&Entity> {
        self.declarations().collect()
    }

    /// Annotations asserted on `subject`, in insertion order.
    pub fn annotations_of<'a, 's>(
        &'a self,
        subject: &'s Iri,
    ) -> impl Iterator<Item = &'a Annotation> + use<'a, 's> {
        self.axioms.iter().filter_map(move |ax| match ax {
            Axiom::AnnotationAssertion { subject: s, annotation } if s == subject => Some(annotation),
            _ => None,
        })
    }

    /// Superclass expressions asserted for the named class `sub`.
    pub fn superclasses_of<'a, 's>(
        &'a self,
        sub: &'s Iri,
    ) -> impl Iterator<Item = &'a ClassExpression> + use<'a, 's> {
        self.axioms.iter().filter_map(move |ax| match ax {
            Axiom::SubClassOf { sub: s, sup } if s.as_class() == Some(sub) => Some(sup),
            _ => None,
        })
    }

    /// Logical axioms only (SubClassOf and EquivalentClasses).
    pub fn logical_axioms(&self) -> impl Iterator<Item = &Axiom> {
        self.axioms
            .iter()
            .filter(|ax| matches!(ax, Axiom::SubClassOf { .. } | Axiom::EquivalentClasses(_)))
    }
}

impl From<Vec<Axiom>> for Ontology {
    fn from(axioms: Vec<Axiom>) -> Self {
        let mut ontology = Ontology::new();
        ontology.extend(axioms);
        ontology
    }
}

impl From<Ontology> for Vec<Axiom> {
    fn from(ontology: Ontology) -> Self {
        ontology.axioms
    }
}

impl PartialEq for Ontology {
    fn eq(&self, other: &Self) -> bool {
        self.axioms == other.axioms
    }
}

impl Eq for Ontology {}
