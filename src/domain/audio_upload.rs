use bytes::Bytes;

pub const DEFAULT_ACCEPTED_CONTENT_TYPE: &str = "audio/wav";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("audio file is empty")]
    EmptyFile,
    #[error("unsupported audio content type: {0}")]
    UnsupportedContentType(String),
}

/// An uploaded audio file that passed structural validation.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl AudioUpload {
    /// Validates the upload against the accepted content type prefixes.
    ///
    /// Prefix matching keeps parameters such as `audio/wav; codecs=1` valid.
    pub fn new<S: AsRef<str>>(
        filename: String,
        content_type: String,
        data: Bytes,
        accepted_content_types: &[S],
    ) -> Result<Self, UploadError> {
        let normalized = content_type.trim().to_lowercase();
        let accepted = accepted_content_types
            .iter()
            .any(|prefix| normalized.starts_with(&prefix.as_ref().to_lowercase()));

        if !accepted {
            return Err(UploadError::UnsupportedContentType(content_type));
        }

        if data.is_empty() {
            return Err(UploadError::EmptyFile);
        }

        Ok(Self {
            filename,
            content_type,
            data,
        })
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
