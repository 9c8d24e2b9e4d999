//! Symbol table: human-readable name → entity resolution.
//!
//! The [`SymbolTable`] indexes every known entity under its full IRI, its
//! CURIE, its short form, and each of its labels. It only ever grows: names
//! are added by [`SymbolTable::absorb`] between compilation passes and are
//! never rewritten. When two entities of the same kind claim a name, the first
//! one keeps it.
//!
//! The compiler and the expression parser see the table only through the
//! [`NameResolver`] capability.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use crate::config::CompileConfig;
use crate::error::ResolveError;
use crate::graph::{AnnotationValue, Axiom, Ontology};
use crate::iri::{IriResolver, PrefixResolver};
use crate::symbol::{vocab, Entity, EntityKind, Iri};

/// Name resolution as needed by the compiler passes and the expression parser.
pub trait NameResolver {
    /// Find an annotation property by name, creating one from the name when it
    /// expands to an IRI.
    fn resolve_property(&self, name: &str) -> Result<Iri, ResolveError>;

    /// Find a datatype by name, creating one from the name when it expands to
    /// an IRI.
    fn resolve_datatype(&self, name: &str) -> Result<Iri, ResolveError>;

    /// Find an entity of `kind` named inside a class expression.
    fn resolve_in_expression(&self, name: &str, kind: EntityKind) -> Option<Entity>;
}

/// Strip one level of single quotes, as in `'part of'`. Inside the quotes a
/// doubled `''` stands for one apostrophe.
pub fn unquote(name: &str) -> Cow<'_, str> {
    let name = name.trim();
    if name.len() >= 2 && name.starts_with('\'') && name.ends_with('\'') {
        let inner = &name[1..name.len() - 1];
        if inner.contains("''") {
            Cow::Owned(inner.replace("''", "'"))
        } else {
            Cow::Borrowed(inner)
        }
    } else {
        Cow::Borrowed(name)
    }
}

/// Grow-only mapping from names to entities.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    prefixes: PrefixResolver,
    label_properties: Vec<Iri>,
    names: HashMap<String, Vec<Entity>>,
    by_iri: HashMap<Iri, Vec<Entity>>,
    entities: HashSet<Entity>,
}

impl SymbolTable {
    /// Create a table seeded with `owl:Thing`, `owl:Nothing`, and `rdfs:label`.
    pub fn new(config: &CompileConfig) -> Self {
        let prefixes = PrefixResolver::new(config);
        let label_properties = config
            .label_properties
            .iter()
            .filter_map(|name| prefixes.resolve(&unquote(name)))
            .collect();

        let mut table = Self {
            prefixes,
            label_properties,
            names: HashMap::new(),
            by_iri: HashMap::new(),
            entities: HashSet::new(),
        };
        table.register(Entity::class(Iri::new(vocab::OWL_THING)));
        table.register(Entity::class(Iri::new(vocab::OWL_NOTHING)));
        table.register(Entity::annotation_property(Iri::new(vocab::RDFS_LABEL)));
        table
    }

    /// Number of distinct entities known to the table.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, entity: &Entity) -> bool {
        self.entities.contains(entity)
    }

    /// The annotation properties whose values are indexed as names.
    pub fn label_properties(&self) -> &[Iri] {
        &self.label_properties
    }

    /// Add an entity under its IRI, CURIE, and short form.
    ///
    /// Returns `false` if the entity was already registered.
    pub fn register(&mut self, entity: Entity) -> bool {
        if !self.entities.insert(entity.clone()) {
            return false;
        }
        self.by_iri
            .entry(entity.iri.clone())
            .or_default()
            .push(entity.clone());

        self.add_name(entity.iri.as_str(), &entity);
        if let Some(curie) = self.prefixes.compact(&entity.iri) {
            self.add_name(&curie, &entity);
        }
        let short = entity.iri.short_form().to_string();
        self.add_name(&short, &entity);
        true
    }

    /// Add `label` as a name for every registered entity with this IRI.
    pub fn add_label(&mut self, iri: &Iri, label: &str) {
        let label = label.trim();
        if label.is_empty() {
            return;
        }
        let entities = self.by_iri.get(iri).cloned().unwrap_or_default();
        for entity in &entities {
            self.add_name(label, entity);
        }
    }

    fn add_name(&mut self, name: &str, entity: &Entity) {
        let slot = self.names.entry(name.to_string()).or_default();
        match slot.iter().find(|e| e.kind == entity.kind) {
            Some(existing) if existing.iri != entity.iri => {
                tracing::debug!(
                    name,
                    kept = %existing.iri,
                    ignored = %entity.iri,
                    "name already bound for this kind"
                );
            }
            Some(_) => {}
            None => slot.push(entity.clone()),
        }
    }

    /// Merge every declared entity of `ontology`, then index its labels.
    ///
    /// Re-absorbing the same ontology changes nothing. Returns the number of
    /// entities that were new to the table.
    pub fn absorb(&mut self, ontology: &Ontology) -> usize {
        let mut added = 0;
        for entity in ontology.declarations() {
            if self.register(entity.clone()) {
                added += 1;
            }
        }
        for axiom in ontology.axioms() {
            if let Axiom::AnnotationAssertion { subject, annotation } = axiom {
                if !self.label_properties.contains(&annotation.property) {
                    continue;
                }
                if let AnnotationValue::Literal(lit) = &annotation.value {
                    self.add_label(subject, lit.value());
                }
            }
        }
        tracing::debug!(added, total = self.len(), "absorbed ontology into symbol table");
        added
    }

    /// Entity of `kind` bound to `name`, after unquoting.
    pub fn lookup(&self, name: &str, kind: EntityKind) -> Option<&Entity> {
        self.names
            .get(&*unquote(name))?
            .iter()
            .find(|e| e.kind == kind)
    }

    /// Every entity bound to `name`, of any kind.
    pub fn lookup_any(&self, name: &str) -> &[Entity] {
        self.names
            .get(&*unquote(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn resolve_or_create(
        &self,
        name: &str,
        kind: EntityKind,
        kind_name: &'static str,
    ) -> Result<Iri, ResolveError> {
        if let Some(entity) = self.lookup(name, kind) {
            return Ok(entity.iri.clone());
        }
        self.prefixes
            .resolve(&unquote(name))
            .ok_or_else(|| ResolveError::NameResolution {
                kind: kind_name,
                name: name.trim().to_string(),
            })
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new(&CompileConfig::default())
    }
}

impl NameResolver for SymbolTable {
    fn resolve_property(&self, name: &str) -> Result<Iri, ResolveError> {
        self.resolve_or_create(name, EntityKind::AnnotationProperty, "annotation property")
    }

    fn resolve_datatype(&self, name: &str) -> Result<Iri, ResolveError> {
        self.resolve_or_create(name, EntityKind::Datatype, "datatype")
    }

    fn resolve_in_expression(&self, name: &str, kind: EntityKind) -> Option<Entity> {
        if let Some(entity) = self.lookup(name, kind) {
            return Some(entity.clone());
        }
        let name = unquote(name);
        if self.prefixes.is_explicit(&name) {
            return self
                .prefixes
                .resolve(&name)
                .map(|iri| Entity::new(kind, iri));
        }
        None
    }
}
