use crate::error::OutputError;
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// True when the payload carries a non-empty `data` field.
pub fn has_data(data: Option<&Value>) -> bool {
    match data.and_then(|d| d.get("data")) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(Value::Bool(true)) => true,
    }
}

/// Writes `data` as pretty JSON to `folder/filename`, creating the folder first.
///
/// Responses without usable `data` are skipped with a warning and yield `Ok(None)`.
pub fn save_response(
    data: Option<&Value>,
    filename: &str,
    folder: impl AsRef<Path>,
) -> Result<Option<PathBuf>, OutputError> {
    let folder = folder.as_ref();
    fs::create_dir_all(folder).map_err(|source| OutputError::Io {
        path: folder.display().to_string(),
        source,
    })?;

    let Some(data) = data.filter(|d| has_data(Some(*d))) else {
        warn!("No data returned for {}. Skipping file save.", filename);
        return Ok(None);
    };

    let path = folder.join(filename);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)?;
    fs::write(&path, buf).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!("Response saved to {}", path.display());
    Ok(Some(path))
}
