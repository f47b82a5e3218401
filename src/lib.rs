//! Mentions Core Library
//!
//! Resolves `@mentions` in comments, task descriptions and chat messages for
//! the admin console UI:
//! - Scanning text into text/mention segments
//! - Matching names against the task or organization roster
//! - JSON-over-C-ABI entry points for the UI host
//!
//! Rust callers use [`resolve`] or [`MentionResolver`] directly.

use serde::{Deserialize, Serialize};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use tracing::warn;

pub mod config;
pub mod error;
pub mod logging;
pub mod matching;
pub mod mentions;
pub mod segment;
pub mod user;

pub use config::{MatchPolicy, ResolverConfig};
pub use error::{MentionsError, Result};
pub use matching::{MatchStrategy, Roster};
pub use mentions::{resolve, resolve_with, MentionResolver, Segments};
pub use segment::{concat, mentioned_user_ids, Rendering, Segment};
pub use user::{MentionBias, User, UserId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Host request for one body of text
#[derive(Debug, Deserialize)]
struct ResolveRequest {
    text: String,
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    bias: Option<MentionBias>,
    #[serde(default)]
    config: Option<ResolverConfig>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ResolveResponse<'a> {
    #[serde(rename_all = "camelCase")]
    Resolved {
        segments: Vec<Segment<'a>>,
        mentioned_user_ids: Vec<UserId>,
    },
    Failed {
        error: String,
    },
}

/// Resolve a JSON request and return the JSON response.
///
/// Request: `{"text": "...", "users": [...], "bias": [ids], "config": {...}}`
/// where everything but `text` is optional.
pub fn resolve_json(request: &str) -> Result<String> {
    let request: ResolveRequest =
        serde_json::from_str(request).map_err(MentionsError::InvalidRequest)?;
    let config = request.config.unwrap_or_default();

    let segments = resolve_with(
        &request.text,
        &request.users,
        request.bias.as_ref(),
        &config,
    );
    let response = ResolveResponse::Resolved {
        mentioned_user_ids: mentioned_user_ids(&segments),
        segments,
    };
    serde_json::to_string(&response).map_err(MentionsError::Encode)
}

fn error_json(error: &MentionsError) -> String {
    let response = ResolveResponse::Failed {
        error: error.to_string(),
    };
    serde_json::to_string(&response).unwrap_or_default()
}

fn into_c_string(s: String) -> *mut c_char {
    CString::new(s)
        .map(CString::into_raw)
        .unwrap_or(ptr::null_mut())
}

/// Resolve mentions for the UI host.
///
/// Takes a NUL-terminated JSON request and returns a JSON response, either
/// `{"segments": [...], "mentionedUserIds": [...]}` or `{"error": "..."}`.
/// Release the result with [`free_string`].
#[no_mangle]
pub extern "C" fn mentions_resolve(request_json: *const c_char) -> *mut c_char {
    let result = if request_json.is_null() {
        Err(MentionsError::NullPointer("request_json"))
    } else {
        let request = unsafe { CStr::from_ptr(request_json) };
        request
            .to_str()
            .map_err(MentionsError::from)
            .and_then(resolve_json)
    };

    let response = result.unwrap_or_else(|e| {
        warn!(error = %e, "rejected mention resolve request");
        error_json(&e)
    });
    into_c_string(response)
}

/// Library version, lets the host confirm the library is linked.
#[no_mangle]
pub extern "C" fn mentions_version() -> *mut c_char {
    into_c_string(VERSION.to_string())
}

/// Install the log subscriber (filter from `RUST_LOG`).
#[no_mangle]
pub extern "C" fn mentions_init_logging() {
    logging::init();
}

/// Free a CString allocated by Rust
///
/// Call this from the host after reading any string returned above
#[no_mangle]
pub extern "C" fn free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
