//! Folio CLI Library
//!
//! Command implementations for the `folio` binary. The binary entry point
//! lives in `main.rs`.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use folio::cmd;
//!
//! cmd::build::run(Path::new("folio.toml"), Path::new("public"), false).unwrap();
//! ```

pub mod cmd;

pub use folio_core::Config;
pub use folio_pipeline::{ContentPipeline, FsContentStore, PageBatch};

/// Initialize tracing with the specified verbosity level.
///
/// `verbose` maps 0 to WARN, 1 to INFO, 2 to DEBUG and anything above to
/// TRACE. `RUST_LOG` directives are honoured as well.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
