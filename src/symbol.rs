//! Core symbol types for the termsheet compiler.
//!
//! Every entity in a compiled ontology is identified by an [`Iri`] and has an
//! [`EntityKind`]. An [`Entity`] is the pair of the two; it is what the symbol
//! table hands back when a name is resolved.

use serde::{Deserialize, Serialize};

/// Well-known vocabulary IRIs.
pub mod vocab {
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const OBO: &str = "http://purl.obolibrary.org/obo/";

    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
    pub const OWL_NOTHING: &str = "http://www.w3.org/2002/07/owl#Nothing";
}

/// A globally unique reference to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    /// Wrap an already-resolved IRI string.
    ///
    /// No validation happens here; use an [`IriResolver`](crate::iri::IriResolver)
    /// to turn author input into IRIs.
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the last `#` or `/`, or the whole IRI if neither occurs.
    pub fn short_form(&self) -> &str {
        match self.0.rfind(['#', '/']) {
            Some(pos) if pos + 1 < self.0.len() => &self.0[pos + 1..],
            _ => &self.0,
        }
    }
}

impl std::fmt::Display for Iri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The six kinds of entity a template row can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Class,
    AnnotationProperty,
    ObjectProperty,
    DataProperty,
    Datatype,
    NamedIndividual,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Class,
        EntityKind::AnnotationProperty,
        EntityKind::ObjectProperty,
        EntityKind::DataProperty,
        EntityKind::Datatype,
        EntityKind::NamedIndividual,
    ];

    /// The OWL vocabulary IRI naming this kind (`owl:Class`, ...).
    pub fn type_iri(self) -> &'static str {
        match self {
            EntityKind::Class => "http://www.w3.org/2002/07/owl#Class",
            EntityKind::AnnotationProperty => "http://www.w3.org/2002/07/owl#AnnotationProperty",
            EntityKind::ObjectProperty => "http://www.w3.org/2002/07/owl#ObjectProperty",
            EntityKind::DataProperty => "http://www.w3.org/2002/07/owl#DatatypeProperty",
            EntityKind::Datatype => "http://www.w3.org/2000/01/rdf-schema#Datatype",
            EntityKind::NamedIndividual => "http://www.w3.org/2002/07/owl#NamedIndividual",
        }
    }

    /// Map an explicit type IRI onto a declarable kind.
    ///
    /// Matching is exact. Any IRI that is not one of the OWL kind IRIs is
    /// treated as the class of an individual, so the result is
    /// [`EntityKind::NamedIndividual`].
    pub fn from_type_iri(iri: &str) -> Self {
        // Sheets written against older tooling say owl:Datatype.
        if iri == "http://www.w3.org/2002/07/owl#Datatype" {
            return EntityKind::Datatype;
        }
        Self::ALL
            .into_iter()
            .find(|k| k.type_iri() == iri)
            .unwrap_or(EntityKind::NamedIndividual)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Class => "Class",
            EntityKind::AnnotationProperty => "AnnotationProperty",
            EntityKind::ObjectProperty => "ObjectProperty",
            EntityKind::DataProperty => "DataProperty",
            EntityKind::Datatype => "Datatype",
            EntityKind::NamedIndividual => "NamedIndividual",
        };
        f.write_str(name)
    }
}

/// A typed node of the output graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub iri: Iri,
}

impl Entity {
    pub fn new(kind: EntityKind, iri: Iri) -> Self {
        Self { kind, iri }
    }

    pub fn class(iri: Iri) -> Self {
        Self::new(EntityKind::Class, iri)
    }

    pub fn annotation_property(iri: Iri) -> Self {
        Self::new(EntityKind::AnnotationProperty, iri)
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(<{}>)", self.kind, self.iri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_form_after_hash_or_slash() {
        assert_eq!(Iri::new(vocab::RDFS_LABEL).short_form(), "label");
        assert_eq!(
            Iri::new("http://purl.obolibrary.org/obo/UBERON_0000001").short_form(),
            "UBERON_0000001"
        );
        assert_eq!(Iri::new("X1").short_form(), "X1");
        assert_eq!(Iri::new("http://example.com/").short_form(), "http://example.com/");
    }

    #[test]
    fn kind_roundtrips_through_type_iri() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_type_iri(kind.type_iri()), kind);
        }
    }

    #[test]
    fn unknown_type_iri_is_individual() {
        assert_eq!(
            EntityKind::from_type_iri("http://example.com/Widget"),
            EntityKind::NamedIndividual
        );
        // Matching is case-sensitive.
        assert_eq!(
            EntityKind::from_type_iri("http://www.w3.org/2002/07/owl#class"),
            EntityKind::NamedIndividual
        );
    }
}
