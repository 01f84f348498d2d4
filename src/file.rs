// src/file.rs

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::config::consts::JSON_INDENT;
use crate::error::Result;

/// Create `dir` and its parents if missing.
pub fn ensure_directory(dir: &Path) -> std::io::Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir)
}

/// Write `value` as pretty JSON (4-space indent), replacing the whole file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }
    let file = File::create(path)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(JSON_INDENT));
    value.serialize(&mut ser)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Read a JSON file. A missing file surfaces as `Error::Io` with `NotFound`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn json_is_indented_with_four_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        let mut m: IndexMap<String, Vec<u8>> = IndexMap::new();
        m.insert(s!("b"), vec![1]);
        m.insert(s!("a"), vec![]);
        write_json(&path, &m).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n    \"b\": [\n        1\n    ],\n    \"a\": []\n}\n");
        let back: IndexMap<String, Vec<u8>> = read_json(&path).unwrap();
        assert_eq!(back, m);
    }
}
