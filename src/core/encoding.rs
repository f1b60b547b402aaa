//! JSON writers for the request body and the saved reply.
//!
//! The modelling server historically received ASCII-only bodies, so by default every
//! non-ASCII character is written as a `\uXXXX` escape (UTF-16 surrogate pairs above
//! the BMP). Passing `ascii_only = false` writes plain UTF-8.

use crate::utils::error::Result;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use std::io;

const INDENT: &[u8] = b"    ";

/// Wraps another formatter and escapes everything outside ASCII.
struct AsciiFormatter<F> {
    inner: F,
}

impl<F: Formatter> Formatter for AsciiFormatter<F> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }

        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

fn write_with<T, F>(value: &T, formatter: F, ascii_only: bool) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
    F: Formatter,
{
    let mut buffer = Vec::new();
    if ascii_only {
        let mut ser = serde_json::Serializer::with_formatter(
            &mut buffer,
            AsciiFormatter { inner: formatter },
        );
        value.serialize(&mut ser)?;
    } else {
        let mut ser = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        value.serialize(&mut ser)?;
    }
    Ok(buffer)
}

/// Compact body for the outgoing request.
pub fn to_request_bytes<T: Serialize + ?Sized>(value: &T, ascii_only: bool) -> Result<Vec<u8>> {
    write_with(value, CompactFormatter, ascii_only)
}

/// Four-space indented document for the saved reply.
pub fn to_pretty_bytes<T: Serialize + ?Sized>(value: &T, ascii_only: bool) -> Result<Vec<u8>> {
    write_with(value, PrettyFormatter::with_indent(INDENT), ascii_only)
}
