//! JSON Export
//!
//! Writes cards or schedules as pretty-printed JSON.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

/// Serialize any export payload to `path`
pub fn write_json<T: Serialize>(path: &Path, payload: &T) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(payload)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}
