//! Compact protobuf text format, e.g. `id:"a" ul_rate:10 ul_rate_policy:MARK`.
//!
//! Fields holding their zero value are left out, like they are on the wire.

use std::fmt::{self, Write};

use crate::api::rate_policy::name_of;
use crate::wire::UnknownFields;

pub(crate) struct TextWriter<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    first: bool,
}

impl<'a, 'b> TextWriter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self { f, first: true }
    }

    fn separate(&mut self) -> fmt::Result {
        if !self.first {
            self.f.write_char(' ')?;
        }
        self.first = false;
        Ok(())
    }

    fn key(&mut self, name: &str) -> fmt::Result {
        self.separate()?;
        write!(self.f, "{}:", name)
    }

    pub fn string(&mut self, name: &str, value: &str) -> fmt::Result {
        self.bytes(name, value.as_bytes())
    }

    pub fn bytes(&mut self, name: &str, value: &[u8]) -> fmt::Result {
        if value.is_empty() {
            return Ok(());
        }
        self.key(name)?;
        write_quoted(self.f, value)
    }

    pub fn uint32(&mut self, name: &str, value: u32) -> fmt::Result {
        if value == 0 {
            return Ok(());
        }
        self.key(name)?;
        write!(self.f, "{}", value)
    }

    pub fn int64(&mut self, name: &str, value: i64) -> fmt::Result {
        if value == 0 {
            return Ok(());
        }
        self.key(name)?;
        write!(self.f, "{}", value)
    }

    pub fn bool(&mut self, name: &str, value: bool) -> fmt::Result {
        if !value {
            return Ok(());
        }
        self.key(name)?;
        self.f.write_str("true")
    }

    pub fn rate_policy(&mut self, name: &str, value: i32) -> fmt::Result {
        if value == 0 {
            return Ok(());
        }
        self.key(name)?;
        match name_of(value) {
            Some(symbol) => self.f.write_str(symbol),
            None => write!(self.f, "{}", value),
        }
    }

    pub fn repeated_uint32(&mut self, name: &str, values: &[u32]) -> fmt::Result {
        for value in values {
            self.key(name)?;
            write!(self.f, "{}", value)?;
        }
        Ok(())
    }

    /// Marks preserved unknown fields by their size, their content is not shown.
    pub fn unknown(&mut self, fields: &UnknownFields) -> fmt::Result {
        if fields.is_empty() {
            return Ok(());
        }
        self.separate()?;
        write!(self.f, "/* {} unknown bytes */", fields.len())
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, value: &[u8]) -> fmt::Result {
    f.write_char('"')?;
    for &b in value {
        match b {
            b'\n' => f.write_str("\\n")?,
            b'\r' => f.write_str("\\r")?,
            b'\t' => f.write_str("\\t")?,
            b'"' => f.write_str("\\\"")?,
            b'\\' => f.write_str("\\\\")?,
            0x20..=0x7e => f.write_char(b as char)?,
            _ => write!(f, "\\{:03o}", b)?,
        }
    }
    f.write_char('"')
}
