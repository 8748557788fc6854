//! Store file format detection.
//!
//! Classifies raw store file bytes as plaintext JSON or ciphertext. The
//! format carries no header, so detection is a heuristic: a ciphertext whose
//! first byte happens to be `{` is misclassified as plaintext and will then
//! fail to parse. The check sits behind [`FormatDetector`] so an explicit
//! format tag can replace it without touching the codec or the store.

/// Detected store file encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    /// UTF-8 JSON object.
    Plaintext,
    /// Raw RSA-OAEP ciphertext.
    Encrypted,
}

impl StoreFormat {
    /// Classify store bytes with the default detector.
    pub fn detect(bytes: &[u8]) -> Self {
        LeadingBrace.classify(bytes)
    }

    /// Display name for user-facing messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Plaintext => "plaintext",
            Self::Encrypted => "encrypted",
        }
    }
}

/// Strategy for classifying store file contents.
///
/// Implementations must be pure functions of the bytes; the file name or
/// extension never matters.
pub trait FormatDetector {
    fn classify(&self, bytes: &[u8]) -> StoreFormat;
}

/// Treats content starting with `{` as plaintext and everything else as
/// ciphertext.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingBrace;

impl FormatDetector for LeadingBrace {
    fn classify(&self, bytes: &[u8]) -> StoreFormat {
        match bytes.first() {
            Some(b'{') => StoreFormat::Plaintext,
            _ => StoreFormat::Encrypted,
        }
    }
}
