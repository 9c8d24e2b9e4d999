//! Recursive descent parser: Manchester-style text → [`ClassExpression`].
//!
//! ```text
//! description := conjunction ("or" conjunction)*
//! conjunction := primary (("and" | "that") primary)*
//! primary     := "not" primary
//!              | "(" description ")"
//!              | "{" name ("," name)* "}"
//!              | property restriction
//!              | name
//! property    := "inverse" name | name
//! restriction := ("some" | "only") primary
//!              | "value" name
//!              | ("min" | "max" | "exactly") INT primary?
//! ```
//!
//! A name followed by a restriction keyword is a property; any other name is a
//! class. Names are resolved as they are read, so an unknown name fails at its
//! own position.

use super::error::{ExpressionError, ExpressionResult};
use super::lexer::{self, Keyword, Token, TokenKind};
use crate::graph::{ClassExpression, ObjectPropertyExpression};
use crate::registry::NameResolver;
use crate::symbol::{EntityKind, Iri};

/// Parse a complete class expression.
pub fn parse_expression(text: &str, resolver: &dyn NameResolver) -> ExpressionResult<ClassExpression> {
    let tokens = lexer::tokenize(text)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        resolver,
    };
    let expr = parser.description()?;
    if let Some(tok) = parser.peek() {
        return Err(ExpressionError::UnexpectedToken {
            expected: "end of expression".into(),
            found: tok.describe(),
            position: tok.span.start,
        });
    }
    Ok(expr)
}

enum PropertyRef {
    Object(ObjectPropertyExpression),
    Data(Iri),
}

struct Parser<'r> {
    tokens: Vec<Token>,
    pos: usize,
    resolver: &'r dyn NameResolver,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind_at(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn next(&mut self, expected: &str) -> ExpressionResult<Token> {
        let tok = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| ExpressionError::UnexpectedEnd {
                expected: expected.to_string(),
            })?;
        self.pos += 1;
        Ok(tok)
    }

    fn eat_keyword(&mut self, kw: Keyword) -> bool {
        if self.peek_kind_at(0) == Some(&TokenKind::Keyword(kw)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> ExpressionResult<()> {
        let tok = self.next(expected)?;
        if tok.kind == kind {
            Ok(())
        } else {
            Err(unexpected(expected, &tok))
        }
    }

    fn description(&mut self) -> ExpressionResult<ClassExpression> {
        let mut operands = vec![self.conjunction()?];
        while self.eat_keyword(Keyword::Or) {
            operands.push(self.conjunction()?);
        }
        Ok(if operands.len() == 1 {
            operands.remove(0)
        } else {
            ClassExpression::ObjectUnionOf(operands)
        })
    }

    fn conjunction(&mut self) -> ExpressionResult<ClassExpression> {
        let mut operands = vec![self.primary()?];
        while self.eat_keyword(Keyword::And) || self.eat_keyword(Keyword::That) {
            operands.push(self.primary()?);
        }
        Ok(ClassExpression::intersection(operands))
    }

    fn primary(&mut self) -> ExpressionResult<ClassExpression> {
        const EXPECTED: &str = "a class expression";
        let is_restriction = match self.peek_kind_at(0) {
            Some(TokenKind::Keyword(Keyword::Inverse)) => true,
            Some(TokenKind::Name(_)) => matches!(
                self.peek_kind_at(1),
                Some(TokenKind::Keyword(kw)) if kw.starts_restriction()
            ),
            _ => false,
        };
        if is_restriction {
            return self.restriction();
        }

        let tok = self.next(EXPECTED)?;
        match tok.kind {
            TokenKind::Keyword(Keyword::Not) => {
                Ok(ClassExpression::ObjectComplementOf(Box::new(self.primary()?)))
            }
            TokenKind::LParen => {
                let inner = self.description()?;
                self.expect(TokenKind::RParen, "\")\"")?;
                Ok(inner)
            }
            TokenKind::LBrace => {
                let mut individuals = vec![self.individual()?];
                while self.peek_kind_at(0) == Some(&TokenKind::Comma) {
                    self.pos += 1;
                    individuals.push(self.individual()?);
                }
                self.expect(TokenKind::RBrace, "\"}\"")?;
                Ok(ClassExpression::ObjectOneOf(individuals))
            }
            TokenKind::Name(ref name) => {
                let entity = self
                    .resolver
                    .resolve_in_expression(name, EntityKind::Class)
                    .ok_or_else(|| unknown("class", name, &tok))?;
                Ok(ClassExpression::Class(entity.iri))
            }
            _ => Err(unexpected(EXPECTED, &tok)),
        }
    }

    fn individual(&mut self) -> ExpressionResult<Iri> {
        let tok = self.next("an individual")?;
        match tok.kind {
            TokenKind::Name(ref name) => self
                .resolver
                .resolve_in_expression(name, EntityKind::NamedIndividual)
                .map(|e| e.iri)
                .ok_or_else(|| unknown("individual", name, &tok)),
            _ => Err(unexpected("an individual", &tok)),
        }
    }

    fn property(&mut self) -> ExpressionResult<PropertyRef> {
        let inverse = self.eat_keyword(Keyword::Inverse);
        let parenthesized = inverse && self.peek_kind_at(0) == Some(&TokenKind::LParen);
        if parenthesized {
            self.pos += 1;
        }
        let tok = self.next("a property")?;
        let TokenKind::Name(ref name) = tok.kind else {
            return Err(unexpected("a property", &tok));
        };
        if parenthesized {
            self.expect(TokenKind::RParen, "\")\"")?;
        }

        if let Some(p) = self.resolver.resolve_in_expression(name, EntityKind::ObjectProperty) {
            return Ok(PropertyRef::Object(if inverse {
                ObjectPropertyExpression::Inverse(p.iri)
            } else {
                ObjectPropertyExpression::Named(p.iri)
            }));
        }
        if !inverse {
            if let Some(p) = self.resolver.resolve_in_expression(name, EntityKind::DataProperty) {
                return Ok(PropertyRef::Data(p.iri));
            }
        }
        Err(unknown("object property", name, &tok))
    }

    fn restriction(&mut self) -> ExpressionResult<ClassExpression> {
        let property = self.property()?;
        let tok = self.next("a restriction keyword")?;
        let TokenKind::Keyword(kw) = tok.kind else {
            return Err(unexpected("a restriction keyword", &tok));
        };

        let property = match property {
            PropertyRef::Data(data) => return self.data_restriction(data, kw, &tok),
            PropertyRef::Object(p) => p,
        };

        match kw {
            Keyword::Some => Ok(ClassExpression::ObjectSomeValuesFrom {
                property,
                filler: Box::new(self.primary()?),
            }),
            Keyword::Only => Ok(ClassExpression::ObjectAllValuesFrom {
                property,
                filler: Box::new(self.primary()?),
            }),
            Keyword::Value => Ok(ClassExpression::ObjectHasValue {
                property,
                individual: self.individual()?,
            }),
            Keyword::Min | Keyword::Max | Keyword::Exactly => {
                let cardinality = self.cardinality()?;
                let filler = if self.starts_primary() {
                    Some(Box::new(self.primary()?))
                } else {
                    None
                };
                Ok(match kw {
                    Keyword::Min => ClassExpression::ObjectMinCardinality { cardinality, property, filler },
                    Keyword::Max => ClassExpression::ObjectMaxCardinality { cardinality, property, filler },
                    _ => ClassExpression::ObjectExactCardinality { cardinality, property, filler },
                })
            }
            _ => Err(unexpected("a restriction keyword", &tok)),
        }
    }

    fn data_restriction(&mut self, property: Iri, kw: Keyword, kw_tok: &Token) -> ExpressionResult<ClassExpression> {
        if !matches!(kw, Keyword::Some | Keyword::Only) {
            return Err(unexpected("\"some\" or \"only\" after a data property", kw_tok));
        }
        let tok = self.next("a datatype")?;
        let TokenKind::Name(ref name) = tok.kind else {
            return Err(unexpected("a datatype", &tok));
        };
        let datatype = self
            .resolver
            .resolve_datatype(name)
            .map_err(|_| unknown("datatype", name, &tok))?;
        Ok(if kw == Keyword::Some {
            ClassExpression::DataSomeValuesFrom { property, datatype }
        } else {
            ClassExpression::DataAllValuesFrom { property, datatype }
        })
    }

    fn cardinality(&mut self) -> ExpressionResult<u32> {
        let tok = self.next("a cardinality")?;
        match tok.kind {
            TokenKind::Name(ref n) => n.parse().map_err(|_| ExpressionError::InvalidCardinality {
                value: n.clone(),
                position: tok.span.start,
            }),
            _ => Err(unexpected("a cardinality", &tok)),
        }
    }

    fn starts_primary(&self) -> bool {
        matches!(
            self.peek_kind_at(0),
            Some(TokenKind::Name(_))
                | Some(TokenKind::LParen)
                | Some(TokenKind::LBrace)
                | Some(TokenKind::Keyword(Keyword::Not))
                | Some(TokenKind::Keyword(Keyword::Inverse))
        )
    }
}

fn unexpected(expected: &str, tok: &Token) -> ExpressionError {
    ExpressionError::UnexpectedToken {
        expected: expected.to_string(),
        found: tok.describe(),
        position: tok.span.start,
    }
}

fn unknown(kind: &'static str, name: &str, tok: &Token) -> ExpressionError {
    ExpressionError::UnknownName {
        kind,
        name: name.to_string(),
        position: tok.span.start,
    }
}
