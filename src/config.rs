//! Compile configuration, loadable from TOML.
//!
//! ```toml
//! default_namespace = "http://example.com/"
//! label_properties = ["rdfs:label", "skos:prefLabel"]
//! require_class_type = false
//! empty_equivalent = "skip"
//!
//! [prefixes]
//! skos = "http://www.w3.org/2004/02/skos/core#"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SheetResult};
use crate::symbol::vocab;

/// What to do with an `equivalent` row that collected no class expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyEquivalentPolicy {
    /// Emit nothing for the row and log a warning.
    #[default]
    Skip,
    /// Abort the compilation with `CompileError::EmptyEquivalence`.
    Error,
}

/// Configuration for a template compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// Extra CURIE prefixes, merged over the built-in ones.
    pub prefixes: BTreeMap<String, String>,
    /// Namespace prepended to bare identifiers (no colon).
    pub default_namespace: Option<String>,
    /// Annotation properties whose values are usable as names in class expressions.
    pub label_properties: Vec<String>,
    /// Fail logic rows that carry class expressions but no CLASS_TYPE value.
    pub require_class_type: bool,
    /// Handling of `equivalent` rows without class expressions.
    pub empty_equivalent: EmptyEquivalentPolicy,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            prefixes: BTreeMap::new(),
            default_namespace: None,
            label_properties: vec!["rdfs:label".into()],
            require_class_type: false,
            empty_equivalent: EmptyEquivalentPolicy::Skip,
        }
    }
}

impl CompileConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(content: &str) -> SheetResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check prefix expansions and the default namespace.
    pub fn validate(&self) -> SheetResult<()> {
        for (prefix, expansion) in &self.prefixes {
            if !is_valid_namespace(expansion) || prefix.contains(':') {
                return Err(ConfigError::InvalidPrefix {
                    prefix: prefix.clone(),
                    expansion: expansion.clone(),
                }
                .into());
            }
        }
        if let Some(ns) = &self.default_namespace {
            if !is_valid_namespace(ns) {
                return Err(ConfigError::InvalidPrefix {
                    prefix: String::new(),
                    expansion: ns.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Built-in prefixes overlaid with the configured ones.
    pub fn all_prefixes(&self) -> BTreeMap<String, String> {
        let mut all: BTreeMap<String, String> = [
            ("rdf", vocab::RDF),
            ("rdfs", vocab::RDFS),
            ("owl", vocab::OWL),
            ("xsd", vocab::XSD),
            ("obo", vocab::OBO),
        ]
        .into_iter()
        .map(|(p, e)| (p.to_string(), e.to_string()))
        .collect();
        all.extend(self.prefixes.clone());
        all
    }
}

fn is_valid_namespace(ns: &str) -> bool {
    !ns.is_empty() && !ns.chars().any(char::is_whitespace)
}
