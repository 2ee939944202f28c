// src/domain/article/attachments.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A file referenced by an article. The JSON field names match what the
/// upload service writes into the stored blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    pub file_url: String,
}

#[derive(Debug, Error)]
pub enum AttachmentCodecError {
    #[error("failed to encode attachments: {0}")]
    Encode(String),
    #[error("failed to decode attachments: {0}")]
    Decode(String),
}

/// Opaque stored form of an article's attachment list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttachmentBlob(Vec<u8>);

impl AttachmentBlob {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// An empty list is stored as an empty blob.
    pub fn encode(attachments: &[Attachment]) -> Result<Self, AttachmentCodecError> {
        if attachments.is_empty() {
            return Ok(Self::default());
        }
        serde_json::to_vec(attachments)
            .map(Self)
            .map_err(|err| AttachmentCodecError::Encode(err.to_string()))
    }

    pub fn decode(&self) -> Result<Vec<Attachment>, AttachmentCodecError> {
        if self.0.is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&self.0).map_err(|err| AttachmentCodecError::Decode(err.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}
