//! Template directive grammar.
//!
//! Each column's directive string is classified exactly once, when the table
//! is loaded. Row processing then matches over [`Directive`] and never looks
//! at the raw string again.

use std::sync::LazyLock;

use regex::Regex;

static SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"SPLIT=(\S+)").unwrap());

static PREFIXED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(A|AT|AL|AI|C) (.*)$").unwrap());

/// What a column contributes to each row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `ID`: the row's identifier.
    Identifier,
    /// `TYPE`: the row's entity kind (as a type IRI).
    TypeSelector,
    /// `CLASS_TYPE`: `subclass` or `equivalent`.
    ClassTypeSelector,
    /// `A <property>`: plain literal annotation.
    StringAnnotation { property: String },
    /// `AT <property>^^<datatype>`: typed literal annotation.
    TypedAnnotation { property: String, datatype: String },
    /// `AL <property>@<lang>`: language-tagged literal annotation.
    LanguageAnnotation { property: String, lang: String },
    /// `AI <property>`: IRI-valued annotation.
    IriAnnotation { property: String },
    /// `C <expression>`: class expression with `%` placeholders.
    ClassExpression { template: String },
    /// `CI`: the cell names a class directly.
    ClassReference,
}

/// A classified directive plus its optional `SPLIT=` delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub directive: Directive,
    pub split: Option<String>,
}

impl Template {
    /// Classify a non-empty directive string. Returns `None` when the string
    /// is not a recognized directive.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (body, split) = match SPLIT.captures(raw) {
            Some(caps) => {
                let delimiter = caps[1].to_string();
                (SPLIT.replace_all(raw, "").trim().to_string(), Some(delimiter))
            }
            None => (raw.to_string(), None),
        };

        let directive = match body.as_str() {
            "ID" => Directive::Identifier,
            "TYPE" => Directive::TypeSelector,
            "CLASS_TYPE" => Directive::ClassTypeSelector,
            "CI" => Directive::ClassReference,
            _ => {
                let caps = PREFIXED.captures(&body)?;
                let rest = caps[2].trim();
                if rest.is_empty() {
                    return None;
                }
                match &caps[1] {
                    "A" => Directive::StringAnnotation {
                        property: rest.to_string(),
                    },
                    "AT" => {
                        let (property, datatype) = split_pair(rest, "^^")?;
                        Directive::TypedAnnotation { property, datatype }
                    }
                    "AL" => {
                        let (property, lang) = split_pair(rest, "@")?;
                        Directive::LanguageAnnotation { property, lang }
                    }
                    "AI" => Directive::IriAnnotation {
                        property: rest.to_string(),
                    },
                    _ => Directive::ClassExpression {
                        template: rest.to_string(),
                    },
                }
            }
        };

        // One identifier and one class type per row; splitting them is meaningless.
        if split.is_some()
            && matches!(directive, Directive::Identifier | Directive::ClassTypeSelector)
        {
            return None;
        }
        Some(Self { directive, split })
    }

    /// The values a cell contributes: the split pieces, or the whole cell.
    ///
    /// Blank pieces are dropped.
    pub fn values<'c>(&self, cell: &'c str) -> Vec<&'c str> {
        match &self.split {
            Some(delimiter) => cell
                .split(delimiter.as_str())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .collect(),
            None => vec![cell.trim()],
        }
    }

    /// Whether the column is read by the declaration pass.
    pub fn is_declarative(&self) -> bool {
        matches!(
            self.directive,
            Directive::TypeSelector
                | Directive::StringAnnotation { .. }
                | Directive::TypedAnnotation { .. }
                | Directive::LanguageAnnotation { .. }
                | Directive::IriAnnotation { .. }
        )
    }

    /// Whether the column is read by the logic pass.
    pub fn is_logical(&self) -> bool {
        matches!(
            self.directive,
            Directive::ClassTypeSelector
                | Directive::ClassExpression { .. }
                | Directive::ClassReference
        )
    }
}

fn split_pair(text: &str, separator: &str) -> Option<(String, String)> {
    let at = text.rfind(separator)?;
    let left = text[..at].trim();
    let right = text[at + separator.len()..].trim();
    if left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left.to_string(), right.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(raw: &str) -> Directive {
        Template::parse(raw).unwrap().directive
    }

    #[test]
    fn literal_directives() {
        assert_eq!(directive("ID"), Directive::Identifier);
        assert_eq!(directive(" TYPE "), Directive::TypeSelector);
        assert_eq!(directive("CLASS_TYPE"), Directive::ClassTypeSelector);
        assert_eq!(directive("CI"), Directive::ClassReference);
    }

    #[test]
    fn annotation_directives() {
        assert_eq!(
            directive("A rdfs:label"),
            Directive::StringAnnotation {
                property: "rdfs:label".into()
            }
        );
        assert_eq!(
            directive("AT obo:IAO_0000115^^xsd:string"),
            Directive::TypedAnnotation {
                property: "obo:IAO_0000115".into(),
                datatype: "xsd:string".into(),
            }
        );
        assert_eq!(
            directive("AL rdfs:label@fr"),
            Directive::LanguageAnnotation {
                property: "rdfs:label".into(),
                lang: "fr".into(),
            }
        );
        assert_eq!(
            directive("AI rdfs:seeAlso"),
            Directive::IriAnnotation {
                property: "rdfs:seeAlso".into()
            }
        );
    }

    #[test]
    fn class_expression_keeps_template_text() {
        assert_eq!(
            directive("C 'part of' some %"),
            Directive::ClassExpression {
                template: "'part of' some %".into()
            }
        );
    }

    #[test]
    fn split_modifier_is_extracted() {
        let t = Template::parse("A oboInOwl:hasExactSynonym SPLIT=|").unwrap();
        assert_eq!(t.split.as_deref(), Some("|"));
        assert_eq!(
            t.directive,
            Directive::StringAnnotation {
                property: "oboInOwl:hasExactSynonym".into()
            }
        );
        assert_eq!(t.values("foo| bar |"), vec!["foo", "bar"]);

        let c = Template::parse("C % SPLIT=,").unwrap();
        assert_eq!(c.values("A,B"), vec!["A", "B"]);
    }

    #[test]
    fn unknown_directives_are_rejected() {
        for raw in [
            "LABEL",
            "id",
            "A",
            "A ",
            "AX foo",
            "AT rdfs:label",
            "AL rdfs:label",
            "AL @en",
            "ID SPLIT=|",
            "CLASS_TYPE SPLIT=,",
        ] {
            assert!(Template::parse(raw).is_none(), "accepted {raw:?}");
        }
    }

    #[test]
    fn pass_membership_is_exclusive() {
        for raw in ["TYPE", "A x", "AT x^^y", "AL x@en", "AI x"] {
            let t = Template::parse(raw).unwrap();
            assert!(t.is_declarative() && !t.is_logical(), "{raw}");
        }
        for raw in ["CLASS_TYPE", "C %", "CI"] {
            let t = Template::parse(raw).unwrap();
            assert!(t.is_logical() && !t.is_declarative(), "{raw}");
        }
        let id = Template::parse("ID").unwrap();
        assert!(!id.is_logical() && !id.is_declarative());
    }

    #[test]
    fn unsplit_values_are_trimmed_whole() {
        let t = Template::parse("A rdfs:comment").unwrap();
        assert_eq!(t.values("  a, b  "), vec!["a, b"]);
    }
}
