//! Turning author-written identifiers into IRIs.
//!
//! The compiler never builds IRIs itself; it asks an [`IriResolver`]. The
//! default [`PrefixResolver`] expands CURIEs against the configured prefixes,
//! passes absolute IRIs through, and places bare names in the default
//! namespace when one is configured.

use std::collections::BTreeMap;

use crate::config::CompileConfig;
use crate::symbol::Iri;

/// Maps identifier text to an IRI. `None` means the text is not a usable identifier.
pub trait IriResolver {
    fn resolve(&self, text: &str) -> Option<Iri>;
}

impl<F> IriResolver for F
where
    F: Fn(&str) -> Option<Iri>,
{
    fn resolve(&self, text: &str) -> Option<Iri> {
        self(text)
    }
}

const SCHEMES: [&str; 6] = ["http:", "https:", "urn:", "file:", "mailto:", "ftp:"];
const FORBIDDEN: [char; 8] = ['<', '>', '"', '{', '}', '|', '^', '\\'];

/// CURIE-expanding resolver built from a [`CompileConfig`].
#[derive(Debug, Clone)]
pub struct PrefixResolver {
    prefixes: BTreeMap<String, String>,
    default_namespace: Option<String>,
}

impl PrefixResolver {
    pub fn new(config: &CompileConfig) -> Self {
        Self {
            prefixes: config.all_prefixes(),
            default_namespace: config.default_namespace.clone(),
        }
    }

    /// Shortest CURIE for an IRI, if any prefix covers it.
    pub fn compact(&self, iri: &Iri) -> Option<String> {
        self.prefixes
            .iter()
            .filter_map(|(prefix, ns)| {
                let local = iri.as_str().strip_prefix(ns.as_str())?;
                (!local.is_empty()).then(|| format!("{prefix}:{local}"))
            })
            .min_by_key(String::len)
    }

    /// Whether `text` is written as an explicit reference (a known CURIE, an
    /// absolute IRI, or `<...>`) rather than a bare name.
    pub fn is_explicit(&self, text: &str) -> bool {
        let text = text.trim();
        if text.starts_with('<') && text.ends_with('>') {
            return true;
        }
        if SCHEMES.iter().any(|s| text.starts_with(s)) {
            return true;
        }
        match text.split_once(':') {
            Some((prefix, _)) => self.prefixes.contains_key(prefix),
            None => false,
        }
    }
}

impl Default for PrefixResolver {
    fn default() -> Self {
        Self::new(&CompileConfig::default())
    }
}

impl IriResolver for PrefixResolver {
    fn resolve(&self, text: &str) -> Option<Iri> {
        let text = text.trim();
        if let Some(inner) = text.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            return is_well_formed(inner).then(|| Iri::new(inner));
        }
        if !is_well_formed(text) {
            return None;
        }
        if SCHEMES.iter().any(|s| text.starts_with(s)) {
            return Some(Iri::new(text));
        }
        match text.split_once(':') {
            Some((prefix, local)) => {
                let ns = self.prefixes.get(prefix)?;
                Some(Iri::new(format!("{ns}{local}")))
            }
            None => match &self.default_namespace {
                Some(ns) => Some(Iri::new(format!("{ns}{text}"))),
                None => Some(Iri::new(text)),
            },
        }
    }
}

fn is_well_formed(text: &str) -> bool {
    !text.is_empty()
        && !text.chars().any(|c| c.is_whitespace() || FORBIDDEN.contains(&c))
}
