//! Object descriptor decoding
//!
//! Notification messages carry object keys in URL form-encoding: spaces
//! arrive as `+` and everything else outside the unreserved set as
//! `%XX`. Keys must be decoded before they are logged or compared with
//! what the storage backend holds.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use super::S3Entity;
use crate::{Error, Result};

/// Canonical form of the storage reference in a notification record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    pub bucket_name: String,
    pub bucket_arn: Option<String>,
    /// Unescaped object key
    pub key: String,
    pub size: Option<u64>,
    pub etag: Option<String>,
    pub version_id: Option<String>,
    pub sequencer: Option<String>,
}

impl ObjectDescriptor {
    /// Decode the raw S3 entity of a record
    pub fn decode(entity: &S3Entity) -> Result<Self> {
        Ok(Self {
            bucket_name: entity.bucket.name.clone(),
            bucket_arn: entity.bucket.arn.clone(),
            key: decode_object_key(&entity.object.key)?,
            size: entity.object.size,
            etag: entity.object.e_tag.clone(),
            version_id: entity.object.version_id.clone(),
            sequencer: entity.object.sequencer.clone(),
        })
    }
}

/// Reverse form-encoding of an object key.
///
/// Fails when a `%` is not followed by two hex digits, or when the
/// escaped bytes are not valid UTF-8.
pub fn decode_object_key(raw: &str) -> Result<String> {
    check_escapes(raw)?;

    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|key| key.into_owned())
        .map_err(|e| Error::MalformedKey(format!("{:?}: {}", raw, e)))
}

fn check_escapes(raw: &str) -> Result<()> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let well_formed = bytes
            .get(i + 1..i + 3)
            .map(|hex| hex.iter().all(u8::is_ascii_hexdigit))
            .unwrap_or(false);
        if !well_formed {
            return Err(Error::MalformedKey(format!(
                "{:?}: invalid percent escape at byte {}",
                raw, i
            )));
        }
        i += 3;
    }
    Ok(())
}
