//! PDF object model and serialization.
//!
//! The small subset of PDF object syntax the writer emits: numbers, names,
//! strings, arrays, dictionaries, streams, and indirect references,
//! serialized per ISO 32000-1 syntax rules.

use std::collections::HashMap;
use std::io::Write;

use bytes::Bytes;

/// Reference to an indirect object (`id gen R`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

/// A PDF object.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Integer number
    Integer(i64),
    /// Real number
    Real(f64),
    /// String (literal or hex on output, depending on content)
    String(Vec<u8>),
    /// Name (`/Name`)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary
    Dictionary(HashMap<String, Object>),
    /// Stream with dictionary and data
    Stream {
        /// Stream dictionary (`Length` is filled in on write)
        dict: HashMap<String, Object>,
        /// Stream payload
        data: Bytes,
    },
    /// Indirect reference
    Reference(ObjectRef),
}

impl Object {
    /// Create a Name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// Create a String object from text.
    pub fn string(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec())
    }

    /// Create a Dictionary object from entries.
    pub fn dict(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    /// Create a Reference object.
    pub fn reference(id: u32, gen: u16) -> Object {
        Object::Reference(ObjectRef::new(id, gen))
    }

    /// Create a `[llx lly urx ury]` rectangle array.
    pub fn rect(llx: f64, lly: f64, urx: f64, ury: f64) -> Object {
        Object::Array(vec![
            Object::Real(llx),
            Object::Real(lly),
            Object::Real(urx),
            Object::Real(ury),
        ])
    }

    /// Serialize this object to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail.
        write_object(&mut buf, self).unwrap();
        buf
    }

    /// Serialize as an indirect object definition:
    /// `{id} {gen} obj\n{object}\nendobj\n`.
    pub fn to_indirect_bytes(&self, id: u32, gen: u16) -> Vec<u8> {
        let mut buf = Vec::new();
        writeln!(buf, "{} {} obj", id, gen).unwrap();
        write_object(&mut buf, self).unwrap();
        write!(buf, "\nendobj\n").unwrap();
        buf
    }
}

fn write_object<W: Write>(w: &mut W, obj: &Object) -> std::io::Result<()> {
    match obj {
        Object::Integer(i) => write!(w, "{}", i),
        Object::Real(r) => write_real(w, *r),
        Object::String(s) => write_string(w, s),
        Object::Name(n) => write_name(w, n),
        Object::Array(arr) => {
            write!(w, "[")?;
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    write!(w, " ")?;
                }
                write_object(w, item)?;
            }
            write!(w, "]")
        },
        Object::Dictionary(dict) => write_dictionary(w, dict),
        Object::Stream { dict, data } => {
            let mut dict = dict.clone();
            dict.insert("Length".to_string(), Object::Integer(data.len() as i64));
            write_dictionary(w, &dict)?;
            write!(w, "\nstream\n")?;
            w.write_all(data)?;
            write!(w, "\nendstream")
        },
        Object::Reference(r) => write!(w, "{} {} R", r.id, r.gen),
    }
}

/// Write a real number, trimming trailing zeros for compact output.
fn write_real<W: Write>(w: &mut W, value: f64) -> std::io::Result<()> {
    if value.fract() == 0.0 {
        write!(w, "{}", value as i64)
    } else {
        let formatted = format!("{:.5}", value);
        write!(w, "{}", formatted.trim_end_matches('0').trim_end_matches('.'))
    }
}

/// Write a string as `(...)` with escaping, or `<hex>` for binary content.
fn write_string<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    let printable = data
        .iter()
        .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..=0x7E).contains(&b));

    if printable {
        write!(w, "(")?;
        for &byte in data {
            match byte {
                b'(' => write!(w, "\\(")?,
                b')' => write!(w, "\\)")?,
                b'\\' => write!(w, "\\\\")?,
                b'\n' => write!(w, "\\n")?,
                b'\r' => write!(w, "\\r")?,
                b'\t' => write!(w, "\\t")?,
                _ => w.write_all(&[byte])?,
            }
        }
        write!(w, ")")
    } else {
        write!(w, "<")?;
        for byte in data {
            write!(w, "{:02X}", byte)?;
        }
        write!(w, ">")
    }
}

/// Write a name, escaping delimiter and non-regular bytes as `#xx`.
fn write_name<W: Write>(w: &mut W, name: &str) -> std::io::Result<()> {
    write!(w, "/")?;
    for byte in name.bytes() {
        match byte {
            b'\x21'..=b'\x7E'
                if !matches!(byte, b'#' | b'/' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'%') =>
            {
                w.write_all(&[byte])?;
            },
            _ => write!(w, "#{:02X}", byte)?,
        }
    }
    Ok(())
}

/// Write a dictionary with sorted keys for deterministic output.
fn write_dictionary<W: Write>(w: &mut W, dict: &HashMap<String, Object>) -> std::io::Result<()> {
    write!(w, "<<")?;
    let mut keys: Vec<_> = dict.keys().collect();
    keys.sort();
    for key in keys {
        if let Some(value) = dict.get(key) {
            write_name(w, key)?;
            write!(w, " ")?;
            write_object(w, value)?;
        }
    }
    write!(w, ">>")
}
