//! The PDF object store: append-only indirect objects with in-place patching.
//!
//! Ids are dense and monotonic from 1 in creation order; an id is never
//! reused or removed. Forward references are handled arena-style: a slot is
//! reserved with [`PdfObjectStore::add_placeholder`] and its body written
//! later with [`PdfObjectStore::update`], the only mutation the store
//! permits, and only before [`PdfObjectStore::build`]. One store serves
//! exactly one build call and is then discarded.

use std::io::Write;

use crate::error::{Error, Result};

/// PDF file header line. The first nine bytes of every built document.
const HEADER: &[u8] = b"%PDF-1.4\n";

/// A single indirect object: its id and raw body bytes.
#[derive(Debug, Clone)]
pub struct PdfObject {
    /// Object number (generation is always 0).
    pub id: u32,
    /// Raw body bytes, exactly as they will appear between `obj`/`endobj`.
    pub data: Vec<u8>,
}

/// An object body: UTF-8 text normalized to exactly one trailing newline,
/// or raw bytes taken verbatim.
#[derive(Debug, Clone)]
pub struct ObjectBody(Vec<u8>);

impl ObjectBody {
    fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<&str> for ObjectBody {
    fn from(body: &str) -> Self {
        let mut data = body.as_bytes().to_vec();
        if !data.ends_with(b"\n") {
            data.push(b'\n');
        }
        ObjectBody(data)
    }
}

impl From<String> for ObjectBody {
    fn from(body: String) -> Self {
        ObjectBody::from(body.as_str())
    }
}

impl From<Vec<u8>> for ObjectBody {
    fn from(data: Vec<u8>) -> Self {
        ObjectBody(data)
    }
}

/// Append-only table of indirect objects for one build.
#[derive(Debug, Default)]
pub struct PdfObjectStore {
    objects: Vec<PdfObject>,
}

impl PdfObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects allocated so far.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no objects have been allocated yet.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Append a new object with the next sequential id and return that id.
    pub fn add_raw(&mut self, body: impl Into<ObjectBody>) -> u32 {
        let id = self.objects.len() as u32 + 1;
        self.objects.push(PdfObject {
            id,
            data: body.into().into_bytes(),
        });
        id
    }

    /// Reserve an id with an empty body, to be filled in via [`update`].
    ///
    /// [`update`]: PdfObjectStore::update
    pub fn add_placeholder(&mut self) -> u32 {
        self.add_raw(Vec::new())
    }

    /// Overwrite the body of an existing object in place.
    ///
    /// The only mutation the store permits. Targeting an id that was never
    /// allocated is an error, never an append.
    pub fn update(&mut self, id: u32, body: impl Into<ObjectBody>) -> Result<()> {
        let slot = self
            .objects
            .get_mut(id.checked_sub(1).ok_or(Error::ObjectNotFound(id))? as usize)
            .ok_or(Error::ObjectNotFound(id))?;
        slot.data = body.into().into_bytes();
        Ok(())
    }

    /// Append a stream object: `<dict>\nstream\n<bytes>\nendstream\n`.
    pub fn add_stream(&mut self, dictionary: &str, stream: &[u8]) -> u32 {
        let mut data = Vec::with_capacity(dictionary.len() + stream.len() + 20);
        data.extend_from_slice(dictionary.as_bytes());
        data.extend_from_slice(b"\nstream\n");
        data.extend_from_slice(stream);
        data.extend_from_slice(b"\nendstream\n");
        self.add_raw(data)
    }

    /// Serialize the complete file: header, objects in id order, the
    /// cross-reference table, and the trailer naming `root_id`.
    ///
    /// Every offset recorded in the xref table equals the byte position of
    /// the first byte of that object's `<id> 0 obj` line in the returned
    /// buffer.
    pub fn build(&self, root_id: u32) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.extend_from_slice(HEADER);

        let mut offsets = Vec::with_capacity(self.objects.len());
        for object in &self.objects {
            offsets.push(out.len());
            writeln!(out, "{} 0 obj", object.id)?;
            out.extend_from_slice(&object.data);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_start = out.len();
        writeln!(out, "xref")?;
        writeln!(out, "0 {}", self.objects.len() + 1)?;
        writeln!(out, "0000000000 65535 f ")?;
        for offset in &offsets {
            writeln!(out, "{:010} 00000 n ", offset)?;
        }

        writeln!(out, "trailer << /Size {} /Root {} 0 R >>", self.objects.len() + 1, root_id)?;
        writeln!(out, "startxref")?;
        writeln!(out, "{}", xref_start)?;
        write!(out, "%%EOF")?;

        Ok(out)
    }
}
