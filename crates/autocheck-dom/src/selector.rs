//! Selector subset and CSS identifier escaping.
//!
//! Supported grammar, enough for label and checkbox lookups:
//!
//! ```text
//! list     := compound ( "," compound )*
//! compound := ( ident | "*" )? ( "#" ident | "." ident | "[" ident ( "=" value )? "]" )*
//! value    := ident | '"' string '"' | "'" string "'"
//! ```
//!
//! Combinators and pseudo-classes are rejected.

use std::iter::Peekable;
use std::str::{Chars, FromStr};

use crate::error::DomError;
use crate::node::ElementData;

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Condition {
    Id(String),
    Class(String),
    HasAttr(String),
    AttrEquals(String, String),
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(input: &str) -> Result<Self, DomError> {
        SelectorParser::new(input).parse()
    }

    /// Whether `element` matches any alternative of the list.
    pub fn matches(&self, element: &ElementData) -> bool {
        self.alternatives.iter().any(|compound| compound.matches(element))
    }
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

impl Compound {
    fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag_name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        self.conditions.iter().all(|condition| match condition {
            Condition::Id(id) => element.id() == Some(id.as_str()),
            Condition::Class(class) => element.has_class(class),
            Condition::HasAttr(name) => element.attr(name).is_some(),
            Condition::AttrEquals(name, expected) => match element.attr(name) {
                // HTML matches `type` values case-insensitively.
                Some(actual) if name == "type" => actual.eq_ignore_ascii_case(expected),
                Some(actual) => actual == expected,
                None => false,
            },
        })
    }
}

struct SelectorParser<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
}

impl<'a> SelectorParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
        }
    }

    fn error(&self, reason: impl Into<String>) -> DomError {
        DomError::InvalidSelector {
            selector: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn parse(mut self) -> Result<Selector, DomError> {
        let mut alternatives = Vec::new();
        loop {
            self.skip_whitespace();
            alternatives.push(self.parse_compound()?);
            self.skip_whitespace();
            match self.chars.next() {
                None => break,
                Some(',') => continue,
                Some(c) => {
                    return Err(self.error(format!("unsupported syntax at '{}'", c)));
                }
            }
        }
        Ok(Selector { alternatives })
    }

    fn parse_compound(&mut self) -> Result<Compound, DomError> {
        let mut compound = Compound {
            tag: None,
            conditions: Vec::new(),
        };

        let mut universal = false;
        match self.chars.peek().copied() {
            Some('*') => {
                self.chars.next();
                universal = true;
            }
            Some(c) if starts_ident(c) => {
                compound.tag = Some(self.parse_ident()?.to_ascii_lowercase());
            }
            _ => {}
        }

        loop {
            match self.chars.peek().copied() {
                Some('#') => {
                    self.chars.next();
                    let id = self.parse_ident()?;
                    compound.conditions.push(Condition::Id(id));
                }
                Some('.') => {
                    self.chars.next();
                    let class = self.parse_ident()?;
                    compound.conditions.push(Condition::Class(class));
                }
                Some('[') => {
                    self.chars.next();
                    let condition = self.parse_attribute()?;
                    compound.conditions.push(condition);
                }
                _ => break,
            }
        }

        if compound.tag.is_none() && compound.conditions.is_empty() && !universal {
            return Err(self.error("empty compound selector"));
        }
        Ok(compound)
    }

    fn parse_attribute(&mut self) -> Result<Condition, DomError> {
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();
        match self.chars.next() {
            Some(']') => Ok(Condition::HasAttr(name)),
            Some('=') => {
                self.skip_whitespace();
                let value = match self.chars.peek().copied() {
                    Some('"') | Some('\'') => self.parse_string()?,
                    _ => self.parse_ident()?,
                };
                self.skip_whitespace();
                match self.chars.next() {
                    Some(']') => Ok(Condition::AttrEquals(name, value)),
                    _ => Err(self.error("expected ']'")),
                }
            }
            _ => Err(self.error("unsupported attribute operator")),
        }
    }

    fn parse_ident(&mut self) -> Result<String, DomError> {
        let mut ident = String::new();
        while let Some(&c) = self.chars.peek() {
            if c == '\\' {
                self.chars.next();
                if let Some(escaped) = self.consume_escape() {
                    ident.push(escaped);
                }
            } else if is_ident_char(c) {
                ident.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        if ident.is_empty() {
            return Err(self.error("expected identifier"));
        }
        Ok(ident)
    }

    fn parse_string(&mut self) -> Result<String, DomError> {
        let Some(quote) = self.chars.next() else {
            return Err(self.error("expected string"));
        };
        let mut value = String::new();
        loop {
            match self.chars.next() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(value),
                Some('\\') => {
                    if let Some(escaped) = self.consume_escape() {
                        value.push(escaped);
                    }
                }
                Some('\n') => return Err(self.error("newline in string")),
                Some(c) => value.push(c),
            }
        }
    }

    /// Consume the remainder of an escape after its backslash.
    ///
    /// Hex escapes take up to six digits and one trailing whitespace; a null,
    /// surrogate or out-of-range code point becomes U+FFFD. An escaped newline
    /// is a line continuation and yields nothing.
    fn consume_escape(&mut self) -> Option<char> {
        let first = *self.chars.peek()?;
        if first.is_ascii_hexdigit() {
            let mut code = 0u32;
            let mut digits = 0;
            while digits < 6 {
                match self.chars.peek().and_then(|c| c.to_digit(16)) {
                    Some(digit) => {
                        code = code * 16 + digit;
                        digits += 1;
                        self.chars.next();
                    }
                    None => break,
                }
            }
            if self.chars.peek().is_some_and(|c| c.is_ascii_whitespace()) {
                self.chars.next();
            }
            if code == 0 {
                return Some('\u{FFFD}');
            }
            return Some(char::from_u32(code).unwrap_or('\u{FFFD}'));
        }
        self.chars.next();
        if first == '\n' {
            return None;
        }
        Some(first)
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.chars.next();
        }
    }
}

fn starts_ident(c: char) -> bool {
    is_ident_char(c) || c == '\\'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

/// Escape `ident` for use inside a selector, following `CSS.escape`.
///
/// The result is valid both as an identifier and inside a quoted attribute
/// value, so `label[for="{escaped}"]` finds the label for any id.
pub fn css_escape(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let first = chars.first().copied();
    let mut escaped = String::with_capacity(ident.len());

    for (index, &c) in chars.iter().enumerate() {
        if c == '\0' {
            escaped.push('\u{FFFD}');
        } else if ('\u{1}'..='\u{1f}').contains(&c)
            || c == '\u{7f}'
            || (index == 0 && c.is_ascii_digit())
            || (index == 1 && c.is_ascii_digit() && first == Some('-'))
        {
            escaped.push_str(&format!("\\{:x} ", c as u32));
        } else if index == 0 && c == '-' && chars.len() == 1 {
            escaped.push_str("\\-");
        } else if !c.is_ascii() || c == '-' || c == '_' || c.is_ascii_alphanumeric() {
            escaped.push(c);
        } else {
            escaped.push('\\');
            escaped.push(c);
        }
    }

    escaped
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
