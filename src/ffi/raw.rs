//! C-layout mirrors of the boundary structs.
//!
//! Field order and types match the legacy boundary header exactly; these
//! layouts are the wire contract with the managed side and must not be
//! reordered. `Coordinate` needs no mirror — the model type is `#[repr(C)]`
//! and crosses the boundary as-is.
//!
//! All `*mut c_char` fields point into caller-owned memory. The bridge
//! never frees them and never keeps them past the call that received them
//! (see the copy-on-receive policy in [`crate::ffi`]).

use std::os::raw::c_char;

use crate::model::geo::Coordinate;

/// C layout of a named place. `name` is borrowed from the caller.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawPlace {
    pub name: *mut c_char,
    pub coordinate: Coordinate,
}

/// C layout of a file attachment record.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawFileAttachment {
    pub file_name: *mut c_char,
    pub mime_type: *mut c_char,
    /// Application-defined attachment type tag (`type` in the C header).
    pub type_: i64,
    pub file_path: *mut c_char,
    pub parent_folder: *mut c_char,
    pub attachment_source_type: i64,
    pub batch_id: i32,
}

/// C layout of a text attachment record.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawTextAttachment {
    /// Application-defined attachment type tag (`type` in the C header).
    pub type_: i64,
    pub text_title: *mut c_char,
    pub text_body: *mut c_char,
    pub mime_type: *mut c_char,
    pub attachment_source_type: i64,
    pub batch_id: i32,
}

/// C layout of a Wi-Fi credential record.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawWifiCredentialsAttachment {
    pub ssid: *mut c_char,
    pub security_type: i64,
    pub password: *mut c_char,
    /// Boolean flag: zero is false, anything else is true.
    pub is_hidden: u8,
    pub attachment_source_type: i64,
    pub batch_id: i32,
}

/// C layout of a whole submission: three pointer arrays with explicit
/// length fields.
///
/// Each length field must equal the number of valid, non-null entries in
/// the corresponding array; the conversion layer rejects negative lengths,
/// null arrays with nonzero lengths, and null entries.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawAttachmentBatch {
    pub file_length: i64,
    pub text_length: i64,
    pub wifi_credentials_length: i64,
    pub file_array: *mut *mut RawFileAttachment,
    pub text_array: *mut *mut RawTextAttachment,
    pub wifi_credentials_array: *mut *mut RawWifiCredentialsAttachment,
}

impl RawAttachmentBatch {
    /// A batch with all three lengths zero and null arrays.
    ///
    /// Valid input for the transfer functions: an empty submission.
    pub fn empty() -> Self {
        Self {
            file_length: 0,
            text_length: 0,
            wifi_credentials_length: 0,
            file_array: std::ptr::null_mut(),
            text_array: std::ptr::null_mut(),
            wifi_credentials_array: std::ptr::null_mut(),
        }
    }
}
