//! C ABI surface of the bridge.
//!
//! This is the public `extern` API the managed runtime binds against. The
//! exported symbols, struct layouts, and call semantics match the legacy
//! boundary header; `send_attachments_checked`, `string_free` and
//! `sharebridge_init` are additive.
//!
//! ## Memory management
//!
//! Copy-on-receive: every pointer handed to a transfer function is read
//! (and its strings copied) before the call returns, and never retained.
//! The bridge frees nothing it did not allocate; strings it does allocate
//! are released only through [`string_free`](strings::string_free).
//! [`create_place`] is the one deliberate exception — it packages the
//! caller's `name` pointer verbatim, per the legacy header's semantics.

pub mod convert;
pub mod raw;
pub mod strings;

use std::os::raw::c_char;
use std::sync::Once;

use crate::config;
use crate::marshal;
use crate::model::geo::Coordinate;

use self::raw::{RawAttachmentBatch, RawPlace};

/// Build a coordinate with the fields set verbatim.
#[no_mangle]
pub extern "C" fn create_coordinate(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate::new(latitude, longitude)
}

/// Combine a label with a coordinate.
///
/// The returned struct borrows `name` — the caller keeps ownership and must
/// keep the buffer alive for as long as the place is used.
#[no_mangle]
pub extern "C" fn create_place(name: *mut c_char, latitude: f64, longitude: f64) -> RawPlace {
    RawPlace {
        name,
        coordinate: Coordinate::new(latitude, longitude),
    }
}

/// Great-circle distance between two coordinates in meters (haversine).
#[no_mangle]
pub extern "C" fn distance(from: Coordinate, to: Coordinate) -> f64 {
    from.distance_m(&to)
}

/// Legacy transfer entry point: receive one batch, no result.
///
/// Kept signature-compatible with the legacy header, which gives this
/// symbol no error channel. The batch is copied, validated and delivered;
/// rejections are logged and otherwise silent. New callers should use
/// [`send_attachments_checked`].
///
/// # Safety
///
/// See [`convert::batch_from_raw`] for the pointer validity requirements.
#[no_mangle]
pub unsafe extern "C" fn send_attachments_dart(batch: RawAttachmentBatch) {
    let status = send_attachments_checked(batch);
    if status != 0 {
        tracing::error!(status, "send_attachments_dart: batch rejected");
    }
}

/// Transfer entry point with an explicit result.
///
/// Returns `0` when the batch was accepted and delivered, or the negative
/// category code of the rejection (see `BridgeError::status_code`).
///
/// # Safety
///
/// See [`convert::batch_from_raw`] for the pointer validity requirements.
#[no_mangle]
pub unsafe extern "C" fn send_attachments_checked(batch: RawAttachmentBatch) -> i32 {
    match convert::batch_from_raw(&batch).and_then(marshal::submit) {
        Ok(receipt) => {
            tracing::debug!(
                files = receipt.files,
                texts = receipt.texts,
                wifi = receipt.wifi_credentials,
                "Batch delivered"
            );
            0
        }
        Err(err) => {
            tracing::warn!(error = %err, "Batch rejected");
            err.status_code()
        }
    }
}

/// One-time library initialization for embedders.
///
/// Loads the configuration file, registers its validation limits, and sets
/// up logging (stderr plus a file in the cache directory). Idempotent;
/// always returns `0`. Transfer functions work without this call, using
/// default limits and whatever logging the host process configured.
#[no_mangle]
pub extern "C" fn sharebridge_init() -> i32 {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let cfg = config::load_config();
        setup_logging(&cfg);
        marshal::set_limits(cfg.validation.clone());
        tracing::info!(
            max_collection_entries = cfg.validation.max_collection_entries,
            "sharebridge initialized"
        );
    });
    0
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(cfg: &config::Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cfg.general.log_level.clone()));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Try to set up file logging; the host may already own the global
    // subscriber, so a failed init is not an error.
    let log_dir = config::cache_dir(cfg);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "sharebridge.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .try_init();
    } else {
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .try_init();
    }
}
