//! Attachment record types.
//!
//! Three record kinds cross the bridge: file references, inline text, and
//! Wi-Fi credentials. All string fields are owned — the marshalling layer
//! copies caller memory before any record is constructed.

use serde::{Deserialize, Serialize};

use super::tags::TagCode;

/// A file-based attachment, referenced by path.
///
/// The file content itself never crosses the bridge; the receiving side
/// resolves `file_path` in its own filesystem namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAttachment {
    /// Display filename (e.g. `"report.pdf"`).
    pub file_name: String,
    /// MIME content type (e.g. `"application/pdf"`).
    pub mime_type: String,
    /// Application-defined attachment type tag.
    pub type_code: TagCode,
    /// Absolute path to the file on the sending side.
    pub file_path: String,
    /// Folder the file was shared from.
    pub parent_folder: String,
    /// Application-defined source tag (which surface produced the share).
    pub source_type: TagCode,
    /// Groups this record with others from the same submission.
    pub batch_id: i32,
}

/// An inline text attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAttachment {
    /// Application-defined attachment type tag.
    pub type_code: TagCode,
    /// Title shown for the snippet (may be empty).
    pub text_title: String,
    /// The text payload itself.
    pub text_body: String,
    /// MIME content type (usually `"text/plain"`).
    pub mime_type: String,
    /// Application-defined source tag.
    pub source_type: TagCode,
    /// Groups this record with others from the same submission.
    pub batch_id: i32,
}

/// A Wi-Fi network credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WifiCredentialsAttachment {
    /// Network SSID.
    pub ssid: String,
    /// Application-defined security type tag (open, WPA2, ...).
    pub security_type: TagCode,
    /// Pre-shared key. May be empty for open networks.
    pub password: String,
    /// Whether the network does not broadcast its SSID.
    pub is_hidden: bool,
    /// Application-defined source tag.
    pub source_type: TagCode,
    /// Groups this record with others from the same submission.
    pub batch_id: i32,
}

/// Borrowed, tagged view over any attachment record in a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttachmentRef<'a> {
    File(&'a FileAttachment),
    Text(&'a TextAttachment),
    Wifi(&'a WifiCredentialsAttachment),
}

impl AttachmentRef<'_> {
    /// The submission group this record belongs to.
    pub fn batch_id(&self) -> i32 {
        match self {
            Self::File(a) => a.batch_id,
            Self::Text(a) => a.batch_id,
            Self::Wifi(a) => a.batch_id,
        }
    }

    /// Short kind label used in logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Text(_) => "text",
            Self::Wifi(_) => "wifi",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_text(batch_id: i32) -> TextAttachment {
        TextAttachment {
            type_code: TagCode(1),
            text_title: "note".into(),
            text_body: "hello".into(),
            mime_type: "text/plain".into(),
            source_type: TagCode(0),
            batch_id,
        }
    }

    #[test]
    fn test_attachment_ref_batch_id() {
        let text = sample_text(9);
        let r = AttachmentRef::Text(&text);
        assert_eq!(r.batch_id(), 9);
        assert_eq!(r.kind(), "text");
    }

    #[test]
    fn test_serde_roundtrip_keeps_tags_raw() {
        let text = sample_text(3);
        let json = serde_json::to_string(&text).expect("serialize");
        assert!(json.contains("\"type_code\":1"));
        let back: TextAttachment = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, text);
    }
}
