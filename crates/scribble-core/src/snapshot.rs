//! Encoded bitmap snapshots.

use base64::{Engine, engine::general_purpose::STANDARD};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Prefix of a PNG data URI.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Snapshot conversion errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Not a PNG data URI")]
    NotPngDataUri,
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// A PNG-encoded copy of the whole bitmap at one point in time.
///
/// Snapshots are immutable; clones share the same bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Arc<[u8]>,
}

impl Snapshot {
    /// Wrap already encoded PNG bytes.
    pub fn from_png(png: Vec<u8>) -> Self {
        Self { png: png.into() }
    }

    /// The encoded PNG bytes.
    pub fn as_png(&self) -> &[u8] {
        &self.png
    }

    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.png.len()
    }

    pub fn is_empty(&self) -> bool {
        self.png.is_empty()
    }

    /// Encode as a `data:image/png;base64,...` URI.
    pub fn to_data_uri(&self) -> String {
        format!("{}{}", PNG_DATA_URI_PREFIX, STANDARD.encode(&self.png))
    }

    /// Parse a `data:image/png;base64,...` URI.
    pub fn from_data_uri(uri: &str) -> Result<Self, SnapshotError> {
        let payload = uri
            .trim()
            .strip_prefix(PNG_DATA_URI_PREFIX)
            .ok_or(SnapshotError::NotPngDataUri)?;
        Ok(Self::from_png(STANDARD.decode(payload)?))
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot").field("bytes", &self.png.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_prefix() {
        let snapshot = Snapshot::from_png(vec![0x89, b'P', b'N', b'G']);
        let uri = snapshot.to_data_uri();
        assert!(uri.starts_with(PNG_DATA_URI_PREFIX));
        assert_eq!(Snapshot::from_data_uri(&uri).unwrap(), snapshot);
    }

    #[test]
    fn test_rejects_other_media_types() {
        let result = Snapshot::from_data_uri("data:image/jpeg;base64,AAAA");
        assert!(matches!(result, Err(SnapshotError::NotPngDataUri)));
    }

    #[test]
    fn test_rejects_bad_payload() {
        let result = Snapshot::from_data_uri("data:image/png;base64,@@@");
        assert!(matches!(result, Err(SnapshotError::Base64(_))));
    }

    #[test]
    fn test_clones_share_bytes() {
        let snapshot = Snapshot::from_png(vec![1, 2, 3]);
        let copy = snapshot.clone();
        assert!(std::ptr::eq(snapshot.as_png().as_ptr(), copy.as_png().as_ptr()));
    }
}
