//! The attachment batch: one submission's worth of records.
//!
//! The C contract ships three parallel pointer arrays with separate length
//! fields, which makes a length/array mismatch expressible. Here the three
//! collections are `Vec`s behind push-only accessors, so the reported counts
//! are true by construction and insertion order is the iteration order.

use serde::{Deserialize, Serialize};

use super::attachment::{
    AttachmentRef, FileAttachment, TextAttachment, WifiCredentialsAttachment,
};

/// A heterogeneous batch of attachments submitted in one bridge call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentBatch {
    files: Vec<FileAttachment>,
    texts: Vec<TextAttachment>,
    wifi_credentials: Vec<WifiCredentialsAttachment>,
}

impl AttachmentBatch {
    /// An empty batch. Empty batches are valid and delivered as-is.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file attachment, preserving insertion order.
    pub fn push_file(&mut self, attachment: FileAttachment) {
        self.files.push(attachment);
    }

    /// Append a text attachment, preserving insertion order.
    pub fn push_text(&mut self, attachment: TextAttachment) {
        self.texts.push(attachment);
    }

    /// Append a Wi-Fi credential attachment, preserving insertion order.
    pub fn push_wifi(&mut self, attachment: WifiCredentialsAttachment) {
        self.wifi_credentials.push(attachment);
    }

    /// File attachments in insertion order.
    pub fn files(&self) -> &[FileAttachment] {
        &self.files
    }

    /// Text attachments in insertion order.
    pub fn texts(&self) -> &[TextAttachment] {
        &self.texts
    }

    /// Wi-Fi credential attachments in insertion order.
    pub fn wifi_credentials(&self) -> &[WifiCredentialsAttachment] {
        &self.wifi_credentials
    }

    /// Number of file attachments.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of text attachments.
    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    /// Number of Wi-Fi credential attachments.
    pub fn wifi_count(&self) -> usize {
        self.wifi_credentials.len()
    }

    /// Total number of records across all three collections.
    pub fn len(&self) -> usize {
        self.files.len() + self.texts.len() + self.wifi_credentials.len()
    }

    /// `true` if no records are present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate every record as a tagged reference: files first, then texts,
    /// then Wi-Fi credentials, each collection in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = AttachmentRef<'_>> {
        self.files
            .iter()
            .map(AttachmentRef::File)
            .chain(self.texts.iter().map(AttachmentRef::Text))
            .chain(self.wifi_credentials.iter().map(AttachmentRef::Wifi))
    }

    /// Distinct `batch_id` values present, sorted ascending.
    ///
    /// Downstream consumers reconstruct submissions by grouping on these.
    pub fn batch_ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.iter().map(|r| r.batch_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// All records carrying the given `batch_id`, in iteration order.
    pub fn with_batch_id(&self, batch_id: i32) -> Vec<AttachmentRef<'_>> {
        self.iter().filter(|r| r.batch_id() == batch_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tags::TagCode;

    fn file(name: &str, batch_id: i32) -> FileAttachment {
        FileAttachment {
            file_name: name.into(),
            mime_type: "application/octet-stream".into(),
            type_code: TagCode(0),
            file_path: format!("/tmp/{name}"),
            parent_folder: "/tmp".into(),
            source_type: TagCode(0),
            batch_id,
        }
    }

    fn text(title: &str, batch_id: i32) -> TextAttachment {
        TextAttachment {
            type_code: TagCode(1),
            text_title: title.into(),
            text_body: "body".into(),
            mime_type: "text/plain".into(),
            source_type: TagCode(0),
            batch_id,
        }
    }

    fn wifi(ssid: &str, batch_id: i32) -> WifiCredentialsAttachment {
        WifiCredentialsAttachment {
            ssid: ssid.into(),
            security_type: TagCode(2),
            password: "secret".into(),
            is_hidden: false,
            source_type: TagCode(0),
            batch_id,
        }
    }

    #[test]
    fn test_counts_match_entries() {
        let mut batch = AttachmentBatch::new();
        batch.push_file(file("a.txt", 1));
        batch.push_file(file("b.txt", 1));
        batch.push_text(text("t", 1));
        batch.push_wifi(wifi("net", 1));
        batch.push_wifi(wifi("net2", 1));
        batch.push_wifi(wifi("net3", 1));

        assert_eq!(batch.file_count(), 2);
        assert_eq!(batch.text_count(), 1);
        assert_eq!(batch.wifi_count(), 3);
        assert_eq!(batch.len(), 6);
        assert!(!batch.is_empty());
    }

    #[test]
    fn test_empty_batch() {
        let batch = AttachmentBatch::new();
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
        assert!(batch.batch_ids().is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut batch = AttachmentBatch::new();
        batch.push_text(text("first", 10));
        batch.push_text(text("second", 11));
        batch.push_text(text("third", 12));

        let ids: Vec<i32> = batch.texts().iter().map(|t| t.batch_id).collect();
        assert_eq!(ids, vec![10, 11, 12]);

        // Tagged iteration follows the same per-collection order.
        let iter_ids: Vec<i32> = batch.iter().map(|r| r.batch_id()).collect();
        assert_eq!(iter_ids, vec![10, 11, 12]);
    }

    #[test]
    fn test_batch_ids_grouping() {
        let mut batch = AttachmentBatch::new();
        batch.push_file(file("a", 2));
        batch.push_text(text("t", 1));
        batch.push_wifi(wifi("w", 2));

        assert_eq!(batch.batch_ids(), vec![1, 2]);
        assert_eq!(batch.with_batch_id(2).len(), 2);
        assert_eq!(batch.with_batch_id(1).len(), 1);
        assert!(batch.with_batch_id(99).is_empty());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut batch = AttachmentBatch::new();
        batch.push_file(file("a.pdf", 1));
        batch.push_text(text("note", 1));

        let json = serde_json::to_string(&batch).expect("serialize");
        let back: AttachmentBatch = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, batch);
    }

    #[test]
    fn test_missing_collections_default_empty() {
        let batch: AttachmentBatch = serde_json::from_str(r#"{"texts": []}"#).expect("parse");
        assert!(batch.is_empty());
    }
}
