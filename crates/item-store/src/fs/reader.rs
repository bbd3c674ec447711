use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::graph::GraphDocument;

pub fn read_document(path: &Path) -> io::Result<GraphDocument> {
    read_and_decode(path)
}

/// Reads and merges several documents in order.
pub fn read_merged(paths: &[impl AsRef<Path>]) -> io::Result<GraphDocument> {
    let mut merged = GraphDocument::with_default_prefixes();
    for path in paths {
        merged.merge(read_document(path.as_ref())?);
    }
    Ok(merged)
}

fn read_and_decode<T>(path: &Path) -> io::Result<T>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    serde_json::from_slice(&buf).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}
