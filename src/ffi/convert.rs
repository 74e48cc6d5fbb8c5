//! Copy-on-receive conversion from raw C records to owned model records.
//!
//! Every string is copied into an owned `String` here; once a conversion
//! function returns, the result holds no pointer into caller memory.
//! Malformed input (negative lengths, null arrays with nonzero lengths,
//! null entries or fields, invalid UTF-8) is rejected with a categorized
//! error instead of the undefined behavior the C contract implies.

use std::ffi::CStr;
use std::os::raw::c_char;

use crate::error::{BridgeError, Result};
use crate::model::attachment::{FileAttachment, TextAttachment, WifiCredentialsAttachment};
use crate::model::batch::AttachmentBatch;
use crate::model::geo::Place;
use crate::model::tags::TagCode;

use super::raw::{
    RawAttachmentBatch, RawFileAttachment, RawPlace, RawTextAttachment,
    RawWifiCredentialsAttachment,
};

/// Copy a whole raw batch into an owned [`AttachmentBatch`].
///
/// Entry order within each array is preserved.
///
/// # Safety
///
/// For each array with a positive length field, the pointer must reference
/// that many consecutive, readable entry pointers, and every non-null entry
/// and string field must point to a valid NUL-terminated buffer. This is
/// the caller side of the C boundary contract; nothing here can verify it.
pub unsafe fn batch_from_raw(raw: &RawAttachmentBatch) -> Result<AttachmentBatch> {
    let mut batch = AttachmentBatch::new();

    for (index, entry) in raw_entries("file", raw.file_array, raw.file_length)?
        .iter()
        .enumerate()
    {
        let entry = non_null_entry("file", index, *entry)?;
        batch.push_file(file_from_raw(&*entry)?);
    }

    for (index, entry) in raw_entries("text", raw.text_array, raw.text_length)?
        .iter()
        .enumerate()
    {
        let entry = non_null_entry("text", index, *entry)?;
        batch.push_text(text_from_raw(&*entry)?);
    }

    for (index, entry) in raw_entries(
        "wifi_credentials",
        raw.wifi_credentials_array,
        raw.wifi_credentials_length,
    )?
    .iter()
    .enumerate()
    {
        let entry = non_null_entry("wifi_credentials", index, *entry)?;
        batch.push_wifi(wifi_from_raw(&*entry)?);
    }

    Ok(batch)
}

/// Copy a raw place into an owned [`Place`].
///
/// After this returns, the caller's `name` buffer is no longer referenced.
///
/// # Safety
///
/// `raw.name` must be null or point to a valid NUL-terminated buffer.
pub unsafe fn place_from_raw(raw: &RawPlace) -> Result<Place> {
    Ok(Place {
        name: owned_string("name", raw.name)?,
        coordinate: raw.coordinate,
    })
}

/// Copy one raw file record.
///
/// # Safety
///
/// All five string fields must be null or point to valid NUL-terminated
/// buffers.
pub unsafe fn file_from_raw(raw: &RawFileAttachment) -> Result<FileAttachment> {
    Ok(FileAttachment {
        file_name: owned_string("file_name", raw.file_name)?,
        mime_type: owned_string("mime_type", raw.mime_type)?,
        type_code: TagCode(raw.type_),
        file_path: owned_string("file_path", raw.file_path)?,
        parent_folder: owned_string("parent_folder", raw.parent_folder)?,
        source_type: TagCode(raw.attachment_source_type),
        batch_id: raw.batch_id,
    })
}

/// Copy one raw text record.
///
/// # Safety
///
/// String fields must be null or point to valid NUL-terminated buffers.
pub unsafe fn text_from_raw(raw: &RawTextAttachment) -> Result<TextAttachment> {
    Ok(TextAttachment {
        type_code: TagCode(raw.type_),
        text_title: owned_string("text_title", raw.text_title)?,
        text_body: owned_string("text_body", raw.text_body)?,
        mime_type: owned_string("mime_type", raw.mime_type)?,
        source_type: TagCode(raw.attachment_source_type),
        batch_id: raw.batch_id,
    })
}

/// Copy one raw Wi-Fi credential record.
///
/// # Safety
///
/// String fields must be null or point to valid NUL-terminated buffers.
pub unsafe fn wifi_from_raw(raw: &RawWifiCredentialsAttachment) -> Result<WifiCredentialsAttachment> {
    Ok(WifiCredentialsAttachment {
        ssid: owned_string("ssid", raw.ssid)?,
        security_type: TagCode(raw.security_type),
        password: owned_string("password", raw.password)?,
        is_hidden: raw.is_hidden != 0,
        source_type: TagCode(raw.attachment_source_type),
        batch_id: raw.batch_id,
    })
}

/// View a length-prefixed pointer array as a slice of entry pointers.
///
/// A zero length is always valid and yields an empty slice, regardless of
/// the array pointer.
unsafe fn raw_entries<'a, T>(
    collection: &'static str,
    array: *mut *mut T,
    declared: i64,
) -> Result<&'a [*mut T]> {
    if declared < 0 {
        return Err(BridgeError::NegativeLength {
            collection,
            declared,
        });
    }
    if declared == 0 {
        return Ok(&[]);
    }
    if array.is_null() {
        return Err(BridgeError::NullSequence {
            collection,
            declared,
        });
    }
    Ok(std::slice::from_raw_parts(
        array as *const *mut T,
        declared as usize,
    ))
}

fn non_null_entry<T>(collection: &'static str, index: usize, entry: *mut T) -> Result<*mut T> {
    if entry.is_null() {
        return Err(BridgeError::NullEntry { collection, index });
    }
    Ok(entry)
}

/// Copy a NUL-terminated C string into an owned `String`.
///
/// Null pointers and invalid UTF-8 are rejected; the boundary contract
/// treats every string field as required.
unsafe fn owned_string(field: &'static str, ptr: *const c_char) -> Result<String> {
    if ptr.is_null() {
        return Err(BridgeError::NullField { field });
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(str::to_owned)
        .map_err(|source| BridgeError::InvalidUtf8 { field, source })
}
