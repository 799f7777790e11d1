//! Command handlers for the `fixc` CLI.
//!
//! Each handler prints its report to stdout and returns `false` when the
//! file could not be read or turned out to be malformed.

use std::sync::Once;

use fix_tokens::Tokens;

mod inspect;

pub use inspect::{check_round_trip, dump_file, list_blocks, list_kinds};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber once, and only if `RUST_LOG` is set.
///
/// `FIXC_LOG_TREE` swaps the flat formatter for an indented span tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let tree = std::env::var_os("FIXC_LOG_TREE")
            .map(|_| HierarchicalLayer::new(2).with_targets(true));
        let flat = tree
            .is_none()
            .then(|| fmt::layer().with_target(true).with_level(true));
        tracing_subscriber::registry()
            .with(flat)
            .with(tree)
            .with(EnvFilter::from_default_env())
            .init();
    });
}

/// Read `path` as UTF-8, with a message fit for the terminal on failure.
fn read_source(path: &str) -> Result<String, String> {
    use std::io::ErrorKind;

    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => format!("cannot find file '{path}'"),
        ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        ErrorKind::InvalidData => format!("'{path}' is not valid UTF-8"),
        _ => format!("cannot read '{path}': {e}"),
    })
}

/// Read and lex `path`, returning the source next to its collection.
///
/// Read failures are reported here; callers only need to fail.
fn load(path: &str) -> Option<(String, Tokens)> {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("error: {msg}");
            return None;
        }
    };
    let tokens = Tokens::from_code(&source);
    tracing::debug!(path, slots = tokens.len(), "loaded");
    Some((source, tokens))
}
