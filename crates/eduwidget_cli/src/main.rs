//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `eduwidget_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use eduwidget_core::{
    open_store_in_memory, widget_summary, Moment, SqliteKeyValueStore, StateRepository,
};

fn main() {
    println!("eduwidget_core ping={}", eduwidget_core::ping());
    println!("eduwidget_core version={}", eduwidget_core::core_version());

    // Exercise the full read path against a throwaway store: bootstrap,
    // normalization, selectors.
    match open_store_in_memory() {
        Ok(conn) => {
            let repo = StateRepository::new(SqliteKeyValueStore::new(&conn));
            let state = repo.get_state();
            let summary = widget_summary(&state, &Moment::now());
            println!("widget headline={}", summary.headline);
            println!("widget subline={}", summary.subline);
        }
        Err(err) => {
            eprintln!("store bootstrap failed: {err}");
            std::process::exit(1);
        }
    }
}
