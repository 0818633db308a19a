//! Inbound payload normalization: strip data-URI prefixes from embedded
//! assets and enforce the decoded size cap before the pipeline runs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;
use thiserror::Error;

/// Decoded size cap for an embedded asset.
pub const MAX_ASSET_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("{0} size exceeds limit of 5MB")]
    TooLarge(&'static str),
    #[error("Invalid file data")]
    Invalid,
}

struct AssetField {
    key: &'static str,
    label: &'static str,
    prefix: &'static str,
}

/// Embedded asset slots and the data-URI prefixes they arrive with.
const ASSET_FIELDS: [AssetField; 2] = [
    AssetField {
        key: "profileImage",
        label: "Profile image",
        prefix: r"^data:image/\w+;base64,",
    },
    AssetField {
        key: "cv",
        label: "CV file",
        prefix: r"^data:application/\w+;base64,",
    },
];

/// Validate and normalize `data.files` in place.
///
/// Each known asset has its data-URI prefix removed and its decoded size
/// checked against [`MAX_ASSET_BYTES`]. Absent `files` or absent slots are
/// fine; a non-string slot or undecodable base64 is not.
pub fn sanitize_embedded_assets(data: &mut serde_json::Value) -> Result<(), PayloadError> {
    let files = match data.get_mut("files").and_then(|f| f.as_object_mut()) {
        Some(files) => files,
        None => return Ok(()),
    };

    for field in &ASSET_FIELDS {
        let value = match files.get_mut(field.key) {
            Some(value) => value,
            None => continue,
        };
        let raw = value.as_str().ok_or(PayloadError::Invalid)?;

        let prefix = Regex::new(field.prefix).unwrap();
        let stripped = prefix.replace(raw, "").into_owned();

        let decoded = STANDARD
            .decode(stripped.trim())
            .map_err(|_| PayloadError::Invalid)?;
        if decoded.len() > MAX_ASSET_BYTES {
            return Err(PayloadError::TooLarge(field.label));
        }

        *value = serde_json::Value::String(stripped);
    }

    Ok(())
}
