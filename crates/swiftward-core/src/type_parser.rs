//! Textual parser for Swift type signatures.
//!
//! A single pure entry point, [`parse_swift_type`], over the grammar:
//!
//! ```text
//! type       := primary ('?' | '!' | '.Type' | '.Protocol')*
//! primary    := nominal | tupleOrBlock | array | dictionary
//! nominal    := IDENT genericClause? ('.' nominal)?
//! genericClause := '<' type (',' type)* '>'
//! tupleOrBlock  := '(' [elem (',' elem)* ['...']] ')' ['->' type]
//! elem       := [IDENT [IDENT] ':'] attr* ['inout'] type
//! attr       := '@' IDENT ['(' ... ')']
//! array      := '[' type ']'
//! dictionary := '[' type ':' type ']'
//! protoComp  := nominal ('&' nominal)+
//! ```
//!
//! Decisions the grammar leaves open:
//! - a parenthesized single element is not a tuple; it unwraps to the element
//! - element labels and `@attribute`s are recognized and skipped; they never
//!   affect the produced parameter type
//! - `...` after the last element turns it into `array(T)` and requires a
//!   following `->`
//! - `Void` parses as the empty tuple
//!
//! Errors carry the column (character index) where parsing stopped.

use crate::swift_type::{CompositionMember, SwiftType};

/// Failure to parse a Swift type string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("column {column}: {message}")]
pub struct TypeParseError {
    pub column: usize,
    pub message: String,
}

/// Parses a Swift type from its textual form.
pub fn parse_swift_type(source: &str) -> Result<SwiftType, TypeParseError> {
    let mut cursor = Cursor::new(source);
    let ty = cursor.parse_type()?;
    cursor.skip_ws();
    if !cursor.at_end() {
        return Err(cursor.err("unexpected input after type"));
    }
    Ok(ty)
}

struct Cursor<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> Cursor<'src> {
    fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char, message: &str) -> Result<(), TypeParseError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.err(message))
        }
    }

    fn ident(&mut self) -> Option<&'src str> {
        self.skip_ws();
        let rest = self.rest();
        let mut end = 0;
        for (i, c) in rest.char_indices() {
            let valid = if i == 0 {
                c.is_alphabetic() || c == '_'
            } else {
                c.is_alphanumeric() || c == '_'
            };
            if !valid {
                break;
            }
            end = i + c.len_utf8();
        }
        if end == 0 {
            return None;
        }
        let ident = &rest[..end];
        self.pos += end;
        Some(ident)
    }

    fn err(&self, message: impl Into<String>) -> TypeParseError {
        TypeParseError {
            column: self.source[..self.pos].chars().count(),
            message: message.into(),
        }
    }

    fn parse_type(&mut self) -> Result<SwiftType, TypeParseError> {
        let mut ty = self.parse_primary()?;
        ty = self.parse_postfix(ty)?;

        self.skip_ws();
        if self.peek() == Some('&') {
            let mut members = vec![self.composition_member(ty)?];
            while self.eat('&') {
                let next = self.parse_primary()?;
                members.push(self.composition_member(next)?);
                self.skip_ws();
            }
            ty = self.parse_postfix(SwiftType::ProtocolComposition(members))?;
        }

        Ok(ty)
    }

    fn composition_member(&self, ty: SwiftType) -> Result<CompositionMember, TypeParseError> {
        match ty {
            SwiftType::Nominal(nominal) => Ok(CompositionMember::Nominal(nominal)),
            SwiftType::Nested(path) => Ok(CompositionMember::Nested(path)),
            _ => Err(self.err("expected nominal type in protocol composition")),
        }
    }

    /// Applies trailing `?` / `!` / `.Type` / `.Protocol` left-to-right.
    fn parse_postfix(&mut self, mut ty: SwiftType) -> Result<SwiftType, TypeParseError> {
        loop {
            // Postfix operators attach without intervening whitespace.
            match self.peek() {
                Some('?') => {
                    self.bump();
                    ty = SwiftType::optional(ty);
                }
                Some('!') => {
                    self.bump();
                    ty = SwiftType::implicitly_unwrapped_optional(ty);
                }
                Some('.') => {
                    let checkpoint = self.pos;
                    self.bump();
                    match self.ident() {
                        Some("Type") | Some("Protocol") => {
                            ty = SwiftType::metatype(ty);
                        }
                        _ => {
                            self.pos = checkpoint;
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(ty)
    }

    fn parse_primary(&mut self) -> Result<SwiftType, TypeParseError> {
        self.skip_ws();
        match self.peek() {
            Some('(') => self.parse_tuple_or_block(),
            Some('[') => self.parse_array_or_dictionary(),
            Some(c) if c.is_alphabetic() || c == '_' => self.parse_nominal_chain(),
            _ => Err(self.err("expected type")),
        }
    }

    fn parse_nominal_chain(&mut self) -> Result<SwiftType, TypeParseError> {
        let mut components = Vec::new();
        loop {
            let Some(name) = self.ident() else {
                return Err(self.err("expected type name"));
            };
            let component = if self.peek() == Some('<') {
                self.bump();
                let mut args = vec![self.parse_type()?];
                while self.eat(',') {
                    args.push(self.parse_type()?);
                }
                self.expect('>', "expected '>'")?;
                crate::swift_type::NominalType::Generic(name.to_string(), args)
            } else {
                crate::swift_type::NominalType::TypeName(name.to_string())
            };
            components.push(component);

            // A dot continues the chain unless it introduces a metatype suffix.
            if self.peek() == Some('.') {
                let checkpoint = self.pos;
                self.bump();
                match self.ident() {
                    Some("Type") | Some("Protocol") | None => {
                        self.pos = checkpoint;
                        break;
                    }
                    Some(_) => {
                        // Re-parse the component from just after the dot.
                        self.pos = checkpoint + 1;
                        continue;
                    }
                }
            }
            break;
        }

        if components.len() == 1 {
            let single = components.into_iter().next().expect("len checked");
            if let crate::swift_type::NominalType::TypeName(name) = &single {
                if name == "Void" {
                    return Ok(SwiftType::VOID);
                }
            }
            Ok(SwiftType::Nominal(single))
        } else {
            Ok(SwiftType::Nested(components))
        }
    }

    fn parse_tuple_or_block(&mut self) -> Result<SwiftType, TypeParseError> {
        self.expect('(', "expected '('")?;
        let mut elements = Vec::new();
        let mut variadic = false;

        if !self.eat(')') {
            loop {
                elements.push(self.parse_element()?);
                if self.eat_str("...") {
                    variadic = true;
                    self.expect(')', "expected ')'")?;
                    break;
                }
                if self.eat(',') {
                    continue;
                }
                self.expect(')', "expected ')'")?;
                break;
            }
        }

        if self.eat_str("->") {
            let return_type = self.parse_type()?;
            if variadic {
                let last = elements.pop().expect("variadic requires an element");
                elements.push(SwiftType::array(last));
            }
            return Ok(SwiftType::block(return_type, elements));
        }

        if variadic {
            return Err(self.err("expected block type"));
        }
        Ok(SwiftType::tuple(elements))
    }

    /// Parses one tuple/block element, skipping labels, attributes, and
    /// `inout` without letting them affect the element type.
    fn parse_element(&mut self) -> Result<SwiftType, TypeParseError> {
        let checkpoint = self.pos;
        if self.ident().is_some() {
            if self.eat(':') {
                // `(label: T)`
            } else if self.ident().is_some() && self.eat(':') {
                // `(outer inner: T)`
            } else {
                self.pos = checkpoint;
            }
        }

        while self.eat('@') {
            if self.ident().is_none() {
                return Err(self.err("expected attribute name"));
            }
            // Attribute arguments attach without whitespace; `@autoclosure ()
            // -> Bool` leaves the parens to the element type.
            if self.peek() == Some('(') {
                self.bump();
                let mut depth = 1usize;
                while depth > 0 {
                    match self.bump() {
                        Some('(') => depth += 1,
                        Some(')') => depth -= 1,
                        Some(_) => {}
                        None => return Err(self.err("unterminated attribute arguments")),
                    }
                }
            }
        }

        let checkpoint = self.pos;
        if let Some(word) = self.ident() {
            if word != "inout" {
                self.pos = checkpoint;
            }
        }

        self.parse_type()
    }

    fn parse_array_or_dictionary(&mut self) -> Result<SwiftType, TypeParseError> {
        self.expect('[', "expected '['")?;
        let first = self.parse_type()?;
        if self.eat(':') {
            let value = self.parse_type()?;
            self.expect(']', "expected ']'")?;
            Ok(SwiftType::dictionary(first, value))
        } else {
            self.expect(']', "expected ']'")?;
            Ok(SwiftType::array(first))
        }
    }
}
