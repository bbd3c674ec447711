use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::graph::GraphDocument;

pub fn write_document(path: &Path, doc: &GraphDocument) -> io::Result<PathBuf> {
    let data = serde_json::to_vec_pretty(doc)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
    write_atomic(path.to_path_buf(), &data)
}

pub fn write_ntriples(path: &Path, doc: &GraphDocument) -> io::Result<PathBuf> {
    write_atomic(path.to_path_buf(), doc.to_ntriples().as_bytes())
}

pub fn remove_file(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

fn write_atomic(path: PathBuf, data: &[u8]) -> io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("tmp");
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&tmp)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(tmp, &path)?;
    Ok(path)
}
