//! FFI use-case API for host-facing calls (app shell and widget host).
//!
//! # Responsibility
//! - Expose stable, use-case-level functions over the core crate.
//! - Keep error semantics simple for the rendering side: envelopes with
//!   `ok` + `message`, no exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Return values are UTF-8 strings with stable meaning.

use eduwidget_core::{
    build_widget_snapshot, core_version as core_version_inner, init_logging as init_logging_inner,
    open_store, ping as ping_inner, Moment, PrefsRepository, SqliteKeyValueStore, StateRepository,
    WidgetLayout, WidgetPrefs,
};
use log::warn;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;

const STORE_DB_FILE_NAME: &str = "eduwidget_store.sqlite3";
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for bridge smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same config (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the directory the document store lives in, once per process.
///
/// # FFI contract
/// - First call wins; later calls with the same directory are idempotent,
///   conflicting calls return an error message.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_storage(app_dir: String) -> String {
    let path = PathBuf::from(app_dir.trim()).join(STORE_DB_FILE_NAME);
    let active = STORE_DB_PATH.get_or_init(|| path.clone());
    if *active != path {
        return format!(
            "storage already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            path.display()
        );
    }
    String::new()
}

/// Widget render payload handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSnapshotResponse {
    /// Whether the snapshot was built from a live store.
    pub ok: bool,
    pub headline: String,
    pub subline: String,
    /// Tap target (`eduwidget://lesson/<id>` or `eduwidget://home`).
    pub deep_link: String,
    /// One of `compact|large|vertical`.
    pub layout: String,
    /// Human-readable diagnostics when `ok` is false.
    pub message: String,
}

/// Generic action response envelope for host-triggered mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostActionResponse {
    pub ok: bool,
    pub message: String,
}

impl HostActionResponse {
    fn success() -> Self {
        Self {
            ok: true,
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Builds the widget snapshot for the host's render pass.
///
/// # FFI contract
/// - Never panics; a storage failure yields a fallback snapshot with
///   `ok = false` and a diagnostic message the host may display.
#[flutter_rust_bridge::frb(sync)]
pub fn widget_snapshot() -> WidgetSnapshotResponse {
    let conn = match open_configured_store() {
        Ok(conn) => conn,
        Err(message) => {
            warn!("event=widget_snapshot module=ffi status=error error={message}");
            return WidgetSnapshotResponse {
                ok: false,
                headline: String::new(),
                subline: String::new(),
                deep_link: eduwidget_core::home_deep_link(),
                layout: WidgetLayout::default().as_str().to_string(),
                message,
            };
        }
    };

    let state = StateRepository::new(SqliteKeyValueStore::new(&conn)).get_state();
    let prefs = PrefsRepository::new(SqliteKeyValueStore::new(&conn)).get_prefs();
    let snapshot = build_widget_snapshot(&state, &prefs, &Moment::now());

    WidgetSnapshotResponse {
        ok: true,
        headline: snapshot.headline,
        subline: snapshot.subline,
        deep_link: snapshot.deep_link,
        layout: snapshot.layout.as_str().to_string(),
        message: String::new(),
    }
}

/// Stores the widget layout preference (`compact|large|vertical`).
#[flutter_rust_bridge::frb(sync)]
pub fn set_widget_layout(layout: String) -> HostActionResponse {
    let Some(layout) = WidgetLayout::parse(layout.as_str()) else {
        return HostActionResponse::failure(format!("unknown widget layout `{layout}`"));
    };

    let conn = match open_configured_store() {
        Ok(conn) => conn,
        Err(message) => return HostActionResponse::failure(message),
    };

    let repo = PrefsRepository::new(SqliteKeyValueStore::new(&conn));
    match repo.set_prefs(WidgetPrefs { layout }) {
        Ok(()) => HostActionResponse::success(),
        Err(err) => HostActionResponse::failure(err.to_string()),
    }
}

fn open_configured_store() -> Result<Connection, String> {
    let path = STORE_DB_PATH
        .get()
        .ok_or_else(|| "storage not configured; call configure_storage first".to_string())?;
    open_store(path).map_err(|err| err.to_string())
}
