//! Library side of the `stencil` binary: argument handling and console output.
#![cfg_attr(
    test,
    allow(
        dead_code,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::print_stdout,
        clippy::print_stderr,
        reason = "Allow for tests"
    )
)]

/// Command-line arguments
pub mod cli;
/// End-of-run console summary
pub mod summary;

pub use cli::Cli;
pub use summary::render_summary;
