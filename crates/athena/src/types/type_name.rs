// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

//! Athena/Glue catalog type names.
//!
//! The catalog describes columns with Hive DDL type strings such as
//! `int`, `decimal(18,2)` or `array<struct<id:bigint,tags:array<string>>>`.
//! These map onto logical types; `struct<...>` goes through the struct
//! builder and so follows the configured duplicate policy.

use super::builder::StructTypeBuilder;
use super::error::{Result, TypeError};
use super::logical_type::{LogicalType, MAX_NESTING_DEPTH};
use crate::config::{ExtensionConfig, UnknownTypePolicy};

/// Precision used when `decimal` carries no parameters.
const DEFAULT_DECIMAL: (u8, u8) = (10, 0);

/// Map a catalog type name to a logical type.
///
/// Keywords are case-insensitive and whitespace between tokens is ignored.
pub fn parse_type_name(input: &str, config: &ExtensionConfig) -> Result<LogicalType> {
    let mut parser = Parser {
        input,
        pos: 0,
        config,
    };
    let ty = parser.parse_type(0)?;
    parser.skip_ws();
    if parser.pos != input.len() {
        return Err(parser.malformed("unexpected trailing input"));
    }
    Ok(ty)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    config: &'a ExtensionConfig,
}

impl<'a> Parser<'a> {
    fn malformed(&self, reason: &'static str) -> TypeError {
        TypeError::MalformedTypeName {
            input: self.input.to_string(),
            position: self.pos,
            reason,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: u8) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: u8, reason: &'static str) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.malformed(reason))
        }
    }

    fn ident(&mut self) -> &'a str {
        self.skip_ws();
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    fn number(&mut self) -> Result<u32> {
        self.skip_ws();
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.malformed("expected a number"));
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| self.malformed("number out of range"))
    }

    fn parse_type(&mut self, depth: usize) -> Result<LogicalType> {
        if depth > MAX_NESTING_DEPTH {
            return Err(self.malformed("type nested too deeply"));
        }
        let name = self.ident();
        if name.is_empty() {
            return Err(self.malformed("expected a type name"));
        }

        let ty = match name.to_ascii_lowercase().as_str() {
            "boolean" | "bool" => LogicalType::Boolean,
            "tinyint" => LogicalType::TinyInt,
            "smallint" => LogicalType::SmallInt,
            "int" | "integer" => LogicalType::Integer,
            "bigint" => LogicalType::BigInt,
            "float" | "real" => LogicalType::Float,
            "double" => LogicalType::Double,
            "decimal" | "numeric" => self.decimal()?,
            "string" => LogicalType::Varchar,
            "varchar" | "char" => {
                // Length limits are not tracked.
                if self.eat(b'(') {
                    self.number()?;
                    self.expect(b')', "expected ')' after length")?;
                }
                LogicalType::Varchar
            }
            "binary" | "varbinary" => LogicalType::Blob,
            "date" => LogicalType::Date,
            "timestamp" => LogicalType::Timestamp,
            "array" => {
                self.expect(b'<', "expected '<' after array")?;
                let child = self.parse_type(depth + 1)?;
                self.expect(b'>', "expected '>' to close array")?;
                LogicalType::list(child)?
            }
            "map" => {
                self.expect(b'<', "expected '<' after map")?;
                let key = self.parse_type(depth + 1)?;
                self.expect(b',', "expected ',' between map key and value")?;
                let value = self.parse_type(depth + 1)?;
                self.expect(b'>', "expected '>' to close map")?;
                LogicalType::map(key, value)?
            }
            "struct" => self.struct_type(depth)?,
            _ => self.unknown(name)?,
        };
        Ok(ty)
    }

    fn decimal(&mut self) -> Result<LogicalType> {
        let (width, scale) = if self.eat(b'(') {
            let width = self.number()?;
            let scale = if self.eat(b',') { self.number()? } else { 0 };
            self.expect(b')', "expected ')' to close decimal")?;
            (width, scale)
        } else {
            (u32::from(DEFAULT_DECIMAL.0), u32::from(DEFAULT_DECIMAL.1))
        };
        LogicalType::decimal(
            u8::try_from(width).unwrap_or(u8::MAX),
            u8::try_from(scale).unwrap_or(u8::MAX),
        )
    }

    fn struct_type(&mut self, depth: usize) -> Result<LogicalType> {
        self.expect(b'<', "expected '<' after struct")?;
        let mut builder = StructTypeBuilder::new().duplicate_policy(self.config.duplicate_policy);
        if self.eat(b'>') {
            return builder.build();
        }
        loop {
            let name = self.member_name()?;
            self.expect(b':', "expected ':' after member name")?;
            let ty = self.parse_type(depth + 1)?;
            builder = builder.member(name, ty);
            if !self.eat(b',') {
                break;
            }
        }
        self.expect(b'>', "expected '>' to close struct")?;
        builder.build()
    }

    fn member_name(&mut self) -> Result<String> {
        self.skip_ws();
        if self.peek() != Some(b'`') {
            let name = self.ident();
            if name.is_empty() {
                return Err(self.malformed("expected a member name"));
            }
            return Ok(name.to_string());
        }

        // `quoted`, with `` as an escaped backtick
        self.pos += 1;
        let mut name = String::new();
        loop {
            let rest = &self.input[self.pos..];
            let Some(end) = rest.find('`') else {
                return Err(self.malformed("unterminated quoted member name"));
            };
            name.push_str(&rest[..end]);
            self.pos += end + 1;
            if self.peek() == Some(b'`') {
                name.push('`');
                self.pos += 1;
            } else {
                break;
            }
        }
        if name.is_empty() {
            return Err(self.malformed("expected a member name"));
        }
        Ok(name)
    }

    fn unknown(&mut self, name: &str) -> Result<LogicalType> {
        match self.config.unknown_type_policy {
            UnknownTypePolicy::Error => Err(TypeError::UnknownTypeName(name.to_string())),
            UnknownTypePolicy::Varchar => {
                self.skip_parameters()?;
                log::warn!("unknown catalog type '{}' mapped to VARCHAR", name);
                Ok(LogicalType::Varchar)
            }
        }
    }

    /// Skip a balanced `(...)` or `<...>` group following an unknown name.
    fn skip_parameters(&mut self) -> Result<()> {
        self.skip_ws();
        if !matches!(self.peek(), Some(b'(' | b'<')) {
            return Ok(());
        }
        // Closers still expected, innermost last.
        let mut closers = Vec::new();
        while let Some(b) = self.peek() {
            match b {
                b'(' => closers.push(b')'),
                b'<' => closers.push(b'>'),
                b')' | b'>' => {
                    if closers.pop() != Some(b) {
                        return Err(self.malformed("mismatched bracket in type parameters"));
                    }
                    if closers.is_empty() {
                        self.pos += 1;
                        return Ok(());
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
        Err(self.malformed("unbalanced type parameters"))
    }
}
