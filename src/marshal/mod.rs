//! Batch validation and delivery.
//!
//! The transfer operation of the C boundary contract is a void call with no
//! error channel. Here submission is explicit: a batch is checked against
//! the configured limits, stamped with a receive time, handed to the
//! installed [`AttachmentSink`], and acknowledged with a [`Receipt`] — or
//! rejected with a categorized [`BridgeError`](crate::error::BridgeError).

pub mod sink;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ValidationConfig;
use crate::error::{BridgeError, Result};
use crate::model::attachment::{FileAttachment, TextAttachment, WifiCredentialsAttachment};
use crate::model::batch::AttachmentBatch;

use self::sink::{AttachmentSink, ReceivedBatch};

/// Acknowledgement returned for an accepted batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Number of file attachments accepted.
    pub files: usize,
    /// Number of text attachments accepted.
    pub texts: usize,
    /// Number of Wi-Fi credential attachments accepted.
    pub wifi_credentials: usize,
    /// Distinct submission groups present in the batch, sorted.
    pub batch_ids: Vec<i32>,
    /// When the bridge took ownership of the batch.
    pub received_at: DateTime<Utc>,
}

/// Check a batch against the given limits without delivering it.
///
/// Empty batches are valid. Tag values are never interpreted.
pub fn validate_batch(batch: &AttachmentBatch, limits: &ValidationConfig) -> Result<()> {
    check_collection_len("file", batch.file_count(), limits)?;
    check_collection_len("text", batch.text_count(), limits)?;
    check_collection_len("wifi_credentials", batch.wifi_count(), limits)?;

    for file in batch.files() {
        validate_file(file, limits)?;
    }
    for text in batch.texts() {
        validate_text(text, limits)?;
    }
    for wifi in batch.wifi_credentials() {
        validate_wifi(wifi, limits)?;
    }
    Ok(())
}

/// Validate and deliver a batch to the globally installed sink.
///
/// Uses the limits registered via [`set_limits`] (library defaults until
/// then). This is the safe-Rust equivalent of `send_attachments_dart`.
pub fn submit(batch: AttachmentBatch) -> Result<Receipt> {
    let limits = current_limits();
    validate_batch(&batch, &limits)?;

    let receipt = receipt_for(&batch);
    tracing::debug!(
        files = receipt.files,
        texts = receipt.texts,
        wifi = receipt.wifi_credentials,
        batch_ids = ?receipt.batch_ids,
        "Batch accepted"
    );

    sink::deliver(ReceivedBatch {
        received_at: receipt.received_at,
        batch,
    })?;
    Ok(receipt)
}

/// Validate and deliver a batch to a caller-provided sink.
pub fn submit_with(
    batch: AttachmentBatch,
    limits: &ValidationConfig,
    sink: &mut dyn AttachmentSink,
) -> Result<Receipt> {
    validate_batch(&batch, limits)?;
    let receipt = receipt_for(&batch);
    sink.receive(ReceivedBatch {
        received_at: receipt.received_at,
        batch,
    })?;
    Ok(receipt)
}

/// Replace the limits used by [`submit`] and the FFI transfer path.
pub fn set_limits(limits: ValidationConfig) {
    *LIMITS.lock().expect("limits lock poisoned") = Some(limits);
}

/// The limits currently in force (library defaults if none were set).
pub fn current_limits() -> ValidationConfig {
    LIMITS
        .lock()
        .expect("limits lock poisoned")
        .clone()
        .unwrap_or_default()
}

static LIMITS: std::sync::Mutex<Option<ValidationConfig>> = std::sync::Mutex::new(None);

fn receipt_for(batch: &AttachmentBatch) -> Receipt {
    Receipt {
        files: batch.file_count(),
        texts: batch.text_count(),
        wifi_credentials: batch.wifi_count(),
        batch_ids: batch.batch_ids(),
        received_at: Utc::now(),
    }
}

fn check_collection_len(
    collection: &'static str,
    count: usize,
    limits: &ValidationConfig,
) -> Result<()> {
    if count > limits.max_collection_entries {
        return Err(BridgeError::TooManyEntries {
            collection,
            count,
            limit: limits.max_collection_entries,
        });
    }
    Ok(())
}

fn check_required(field: &'static str, value: &str, limits: &ValidationConfig) -> Result<()> {
    if value.is_empty() {
        return Err(BridgeError::EmptyField { field });
    }
    check_optional(field, value, limits)
}

fn check_optional(field: &'static str, value: &str, limits: &ValidationConfig) -> Result<()> {
    if value.len() > limits.max_string_bytes {
        return Err(BridgeError::FieldTooLarge {
            field,
            size: value.len(),
            limit: limits.max_string_bytes,
        });
    }
    Ok(())
}

fn validate_file(file: &FileAttachment, limits: &ValidationConfig) -> Result<()> {
    check_required("file_name", &file.file_name, limits)?;
    check_required("file_path", &file.file_path, limits)?;
    check_optional("mime_type", &file.mime_type, limits)?;
    check_optional("parent_folder", &file.parent_folder, limits)?;
    Ok(())
}

fn validate_text(text: &TextAttachment, limits: &ValidationConfig) -> Result<()> {
    check_optional("text_title", &text.text_title, limits)?;
    check_optional("mime_type", &text.mime_type, limits)?;
    if text.text_body.len() > limits.max_text_body_bytes {
        return Err(BridgeError::FieldTooLarge {
            field: "text_body",
            size: text.text_body.len(),
            limit: limits.max_text_body_bytes,
        });
    }
    Ok(())
}

fn validate_wifi(wifi: &WifiCredentialsAttachment, limits: &ValidationConfig) -> Result<()> {
    check_required("ssid", &wifi.ssid, limits)?;
    // Open networks legitimately have no password.
    check_optional("password", &wifi.password, limits)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::sink::MemorySink;
    use super::*;
    use crate::model::tags::TagCode;

    fn file(name: &str, batch_id: i32) -> FileAttachment {
        FileAttachment {
            file_name: name.into(),
            mime_type: "text/plain".into(),
            type_code: TagCode(0),
            file_path: format!("/share/{name}"),
            parent_folder: "/share".into(),
            source_type: TagCode(0),
            batch_id,
        }
    }

    fn wifi(ssid: &str) -> WifiCredentialsAttachment {
        WifiCredentialsAttachment {
            ssid: ssid.into(),
            security_type: TagCode(2),
            password: String::new(),
            is_hidden: true,
            source_type: TagCode(0),
            batch_id: 1,
        }
    }

    #[test]
    fn test_empty_batch_is_valid() {
        let limits = ValidationConfig::default();
        validate_batch(&AttachmentBatch::new(), &limits).expect("empty batch must pass");
    }

    #[test]
    fn test_empty_file_name_rejected() {
        let limits = ValidationConfig::default();
        let mut batch = AttachmentBatch::new();
        batch.push_file(file("", 1));
        let err = validate_batch(&batch, &limits).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::EmptyField { field: "file_name" }
        ));
    }

    #[test]
    fn test_open_network_password_may_be_empty() {
        let limits = ValidationConfig::default();
        let mut batch = AttachmentBatch::new();
        batch.push_wifi(wifi("cafe-guest"));
        validate_batch(&batch, &limits).expect("open network must pass");
    }

    #[test]
    fn test_empty_ssid_rejected() {
        let limits = ValidationConfig::default();
        let mut batch = AttachmentBatch::new();
        batch.push_wifi(wifi(""));
        let err = validate_batch(&batch, &limits).unwrap_err();
        assert!(matches!(err, BridgeError::EmptyField { field: "ssid" }));
    }

    #[test]
    fn test_collection_limit_enforced() {
        let limits = ValidationConfig {
            max_collection_entries: 2,
            ..Default::default()
        };
        let mut batch = AttachmentBatch::new();
        for i in 0..3 {
            batch.push_file(file(&format!("f{i}"), 1));
        }
        let err = validate_batch(&batch, &limits).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::TooManyEntries {
                collection: "file",
                count: 3,
                limit: 2,
            }
        ));
    }

    #[test]
    fn test_oversized_text_body_rejected() {
        let limits = ValidationConfig {
            max_text_body_bytes: 8,
            ..Default::default()
        };
        let mut batch = AttachmentBatch::new();
        batch.push_text(TextAttachment {
            type_code: TagCode(1),
            text_title: "t".into(),
            text_body: "exceeds the limit".into(),
            mime_type: "text/plain".into(),
            source_type: TagCode(0),
            batch_id: 1,
        });
        let err = validate_batch(&batch, &limits).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::FieldTooLarge {
                field: "text_body",
                ..
            }
        ));
    }

    #[test]
    fn test_submit_with_delivers_and_acknowledges() {
        let limits = ValidationConfig::default();
        let mut sink = MemorySink::new();
        let handle = sink.handle();

        let mut batch = AttachmentBatch::new();
        batch.push_file(file("a.txt", 7));
        batch.push_file(file("b.txt", 8));

        let receipt = submit_with(batch, &limits, &mut sink).expect("submit");
        assert_eq!(receipt.files, 2);
        assert_eq!(receipt.texts, 0);
        assert_eq!(receipt.batch_ids, vec![7, 8]);

        let received = handle.received();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].batch.file_count(), 2);
        assert_eq!(received[0].batch.files()[0].file_name, "a.txt");
        assert_eq!(received[0].batch.files()[1].file_name, "b.txt");
    }

    #[test]
    fn test_submit_with_rejects_before_delivery() {
        let limits = ValidationConfig::default();
        let mut sink = MemorySink::new();
        let handle = sink.handle();

        let mut batch = AttachmentBatch::new();
        batch.push_file(file("", 1));

        submit_with(batch, &limits, &mut sink).unwrap_err();
        assert!(handle.received().is_empty(), "rejected batch must not reach the sink");
    }
}
