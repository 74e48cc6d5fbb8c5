//! Exported string utilities.
//!
//! Ownership rules:
//! - [`hello_world`] returns a pointer to static storage; the caller must
//!   not free it.
//! - [`reverse`] returns a newly allocated string; the caller must release
//!   it with [`string_free`] and nothing else.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};

/// Static greeting used by binding smoke tests on the managed side.
///
/// The returned pointer is valid for the lifetime of the process.
#[no_mangle]
pub extern "C" fn hello_world() -> *const c_char {
    static GREETING: &[u8] = b"Hello World\0";
    GREETING.as_ptr() as *const c_char
}

/// Return a newly allocated copy of `input` with its characters reversed.
///
/// `length` is the caller-declared byte length and is used as an upper
/// bound; the string is still terminated at its first NUL. Reversal is
/// character-wise, so multi-byte UTF-8 sequences stay intact. Returns null
/// if `input` is null or `length` is negative.
///
/// # Safety
///
/// `input`, if non-null, must point to a valid NUL-terminated buffer.
#[no_mangle]
pub unsafe extern "C" fn reverse(input: *const c_char, length: c_int) -> *mut c_char {
    if input.is_null() || length < 0 {
        return std::ptr::null_mut();
    }

    let bytes = CStr::from_ptr(input).to_bytes();
    let bytes = &bytes[..bytes.len().min(length as usize)];
    let reversed: String = String::from_utf8_lossy(bytes).chars().rev().collect();

    match CString::new(reversed) {
        Ok(s) => s.into_raw(),
        // Unreachable: the source had no interior NUL.
        Err(_) => std::ptr::null_mut(),
    }
}

/// Release a string previously returned by [`reverse`].
///
/// Passing null is a no-op.
///
/// # Safety
///
/// `ptr` must be null or a pointer obtained from this library's allocating
/// string functions, and must not be used after this call.
#[no_mangle]
pub unsafe extern "C" fn string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
