//! Lexer: class-expression text → tokens with byte spans.
//!
//! Three name forms are recognized: bare words, single-quoted names (which may
//! contain spaces and punctuation, with `''` standing for an apostrophe), and
//! `<IRI>`s. Keywords are bare words
//! only, so quoting a name always escapes a keyword.

use super::error::{ExpressionError, ExpressionResult};

/// Byte-level source span for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Reserved words of the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    And,
    Or,
    Not,
    That,
    Some,
    Only,
    Value,
    Min,
    Max,
    Exactly,
    Inverse,
}

impl Keyword {
    fn from_word(word: &str) -> Option<Self> {
        let kw = match word.to_ascii_lowercase().as_str() {
            "and" => Keyword::And,
            "or" => Keyword::Or,
            "not" => Keyword::Not,
            "that" => Keyword::That,
            "some" => Keyword::Some,
            "only" => Keyword::Only,
            "value" => Keyword::Value,
            "min" => Keyword::Min,
            "max" => Keyword::Max,
            "exactly" => Keyword::Exactly,
            "inverse" => Keyword::Inverse,
            _ => return None,
        };
        Some(kw)
    }

    /// Whether `word` would lex as a keyword.
    pub fn is_reserved(word: &str) -> bool {
        Self::from_word(word).is_some()
    }

    /// Keywords that turn the preceding name into a property.
    pub fn starts_restriction(self) -> bool {
        matches!(
            self,
            Keyword::Some
                | Keyword::Only
                | Keyword::Value
                | Keyword::Min
                | Keyword::Max
                | Keyword::Exactly
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    /// Bare word, single-quoted name, or `<IRI>` (brackets kept).
    Name(String),
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Source-like rendering for error messages.
    pub fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Keyword(k) => format!("{k:?}").to_lowercase(),
            TokenKind::Name(n) => n.clone(),
            TokenKind::LParen => "(".into(),
            TokenKind::RParen => ")".into(),
            TokenKind::LBrace => "{".into(),
            TokenKind::RBrace => "}".into(),
            TokenKind::Comma => ",".into(),
        }
    }
}

/// Characters that end a bare word.
pub const RESERVED: [char; 8] = ['(', ')', '{', '}', ',', '\'', '<', '>'];

pub fn is_bare_char(c: char) -> bool {
    !c.is_whitespace() && !RESERVED.contains(&c)
}

/// Split expression text into tokens.
pub fn tokenize(input: &str) -> ExpressionResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let punct = match c {
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            ',' => Some(TokenKind::Comma),
            _ => None,
        };
        if let Some(kind) = punct {
            chars.next();
            tokens.push(Token {
                kind,
                span: Span { start, end: start + 1 },
            });
            continue;
        }

        match c {
            '\'' | '<' => {
                let (close, delimiter) = if c == '\'' { ('\'', "quote") } else { ('>', "IRI") };
                chars.next();
                let mut end = None;
                while let Some((i, ch)) = chars.next() {
                    if ch != close {
                        continue;
                    }
                    // `''` inside a quoted name is a literal apostrophe.
                    if close == '\'' && matches!(chars.peek(), Some(&(_, '\''))) {
                        chars.next();
                        continue;
                    }
                    end = Some(i + ch.len_utf8());
                    break;
                }
                let end = end.ok_or(ExpressionError::Unterminated {
                    delimiter,
                    position: start,
                })?;
                tokens.push(Token {
                    kind: TokenKind::Name(input[start..end].to_string()),
                    span: Span { start, end },
                });
            }
            '>' => {
                return Err(ExpressionError::UnexpectedToken {
                    expected: "a name".into(),
                    found: ">".into(),
                    position: start,
                });
            }
            _ => {
                let mut end = start;
                while let Some(&(i, ch)) = chars.peek() {
                    if !is_bare_char(ch) {
                        break;
                    }
                    end = i + ch.len_utf8();
                    chars.next();
                }
                let word = &input[start..end];
                let kind = match Keyword::from_word(word) {
                    Some(kw) => TokenKind::Keyword(kw),
                    None => TokenKind::Name(word.to_string()),
                };
                tokens.push(Token {
                    kind,
                    span: Span { start, end },
                });
            }
        }
    }

    Ok(tokens)
}
