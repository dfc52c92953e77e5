//! Parser for the policy engine's reference syntax.
//!
//! ```text
//! path  := ident ( '.' ident | '[' index ']' )*
//! index := '_' | ident | number | "string"
//! ```
//!
//! A protected field is addressed as `<root>.<relation>[<index>]?.<field>(.<field>)*`,
//! e.g. `data.posts[_].department`.

use crate::error::PathError;
use model::FieldReference;
use std::{fmt, iter::Peekable, str::CharIndices};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Index {
    Wildcard,
    Var(String),
    Number(String),
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Ident(String),
    Index(Index),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Result<Self, PathError> {
        Parser::new(path).parse()
    }

    /// Decomposes the path into the relation and field it addresses.
    ///
    /// The first segment must be `root` and the second `relation`, optionally
    /// followed by one index element. Every remaining segment must be a field
    /// name; trailing wildcard indexes (array membership) are dropped.
    pub fn field_reference(
        &self,
        root: &str,
        relation: &str,
    ) -> Result<FieldReference, PathError> {
        let mut segments = self.segments.iter().peekable();

        match segments.next() {
            Some(Segment::Ident(name)) if name == root => {}
            _ => {
                return Err(PathError::WrongRoot {
                    path: self.raw.clone(),
                    expected: root.to_string(),
                });
            }
        }

        match segments.next() {
            Some(Segment::Ident(name)) if name == relation => {}
            Some(Segment::Ident(_)) => {
                return Err(PathError::WrongRelation {
                    path: self.raw.clone(),
                    expected: relation.to_string(),
                });
            }
            _ => return Err(PathError::MissingRelation(self.raw.clone())),
        }

        if let Some(Segment::Index(_)) = segments.peek() {
            segments.next();
        }

        let mut fields = Vec::new();
        for segment in segments {
            match segment {
                Segment::Ident(name) => fields.push(name.as_str()),
                Segment::Index(Index::Wildcard) if !fields.is_empty() => {}
                Segment::Index(_) => return Err(PathError::NestedIndex(self.raw.clone())),
            }
        }

        if fields.is_empty() {
            return Err(PathError::MissingField(self.raw.clone()));
        }

        Ok(FieldReference::new(relation, fields.join(".")))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

struct Parser<'a> {
    path: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(path: &'a str) -> Self {
        Self {
            path,
            chars: path.char_indices().peekable(),
        }
    }

    fn parse(mut self) -> Result<FieldPath, PathError> {
        if self.path.trim().is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = vec![Segment::Ident(self.ident()?)];

        while let Some((offset, ch)) = self.chars.next() {
            match ch {
                '.' => segments.push(Segment::Ident(self.ident()?)),
                '[' => segments.push(Segment::Index(self.index()?)),
                _ => return Err(self.unexpected(ch, offset)),
            }
        }

        Ok(FieldPath {
            raw: self.path.to_string(),
            segments,
        })
    }

    fn ident(&mut self) -> Result<String, PathError> {
        let mut name = String::new();
        while let Some(&(offset, ch)) = self.chars.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' {
                name.push(ch);
                self.chars.next();
            } else if name.is_empty() {
                return Err(self.unexpected(ch, offset));
            } else {
                break;
            }
        }

        if name.is_empty() {
            // Path ended right after a '.'
            return Err(PathError::MissingField(self.path.to_string()));
        }
        Ok(name)
    }

    fn index(&mut self) -> Result<Index, PathError> {
        if let Some(&(_, '"')) = self.chars.peek() {
            self.chars.next();
            let value = self.quoted()?;
            return match self.chars.next() {
                Some((_, ']')) => Ok(Index::Str(value)),
                Some((offset, ch)) => Err(self.unexpected(ch, offset)),
                None => Err(PathError::UnterminatedIndex(self.path.to_string())),
            };
        }

        let mut key = String::new();
        loop {
            match self.chars.next() {
                Some((offset, ']')) if key.is_empty() => return Err(self.unexpected(']', offset)),
                Some((_, ']')) => break,
                Some((_, ch)) if ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' => {
                    key.push(ch)
                }
                Some((offset, ch)) => return Err(self.unexpected(ch, offset)),
                None => return Err(PathError::UnterminatedIndex(self.path.to_string())),
            }
        }

        Ok(if key == "_" {
            Index::Wildcard
        } else if key.chars().all(|c| c.is_ascii_digit()) {
            Index::Number(key)
        } else {
            Index::Var(key)
        })
    }

    fn quoted(&mut self) -> Result<String, PathError> {
        let mut value = String::new();
        while let Some((_, ch)) = self.chars.next() {
            match ch {
                '"' => return Ok(value),
                '\\' => match self.chars.next() {
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                },
                _ => value.push(ch),
            }
        }
        Err(PathError::UnterminatedString(self.path.to_string()))
    }

    fn unexpected(&self, ch: char, offset: usize) -> PathError {
        PathError::UnexpectedChar {
            path: self.path.to_string(),
            ch,
            offset,
        }
    }
}
