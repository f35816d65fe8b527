//! Quill command-line driver.
//!
//! The `quill` binary exposes the tokenizer, the recovering parser and the
//! two cursor-context queries for inspection from a terminal.

use std::sync::Once;

pub mod commands;

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical tracing subscriber on stderr.
///
/// Does nothing unless `RUST_LOG` is set, so normal output stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
