//! Tessera Match - structural pattern matching over runtime values.
//!
//! This crate provides:
//! - The pattern model (`Pattern`, `ObjectPattern`, `ArrayPattern`, `Literal`)
//! - The matching engine (`match_pattern` and the per-shape matchers)
//! - The match-scoped `Cache` that memoizes property reads and iterator steps
//! - Arm combinators (`when`, `whether`, `otherwise`) and the `match_value` driver
//!
//! # Architecture
//!
//! The engine is a recursive-descent walk over the pattern. It never fails
//! on a mismatch: results are `Option<Bindings>`, and the only error path is
//! a custom matcher that reports one. A single `Cache` is threaded through
//! every arm of one match so getters and iterators are observed once.
//!
//! # Tracing
//!
//! The crate logs through `tracing`: arm selection at `debug`, per-pattern
//! dispatch and cache misses at `trace`. Call [`init_tracing`] to install a
//! subscriber driven by `RUST_LOG`.

mod arm;
mod bindings;
mod cache;
mod driver;
mod engine;
mod errors;
mod pattern;
mod result;

use std::sync::Once;

pub use arm::{instance_of, otherwise, when, whether, Arm, InstanceOf, Otherwise, When, Whether};
pub use bindings::Bindings;
pub use cache::Cache;
pub use driver::{match_value, Match};
pub use engine::{match_array, match_identifier, match_literal, match_object, match_pattern, match_regex};
pub use errors::{
    capability_fault, misplaced_rest, non_exhaustive_match, MatchError, MatchErrorKind,
    MatchOutcome,
};
pub use pattern::{
    capture, custom, identifier, rest, ArrayPattern, CustomMatcher, Literal, ObjectPattern,
    Pattern, PatternKind, RestMarker,
};
pub use result::MatchResult;

pub use regex::Regex;
pub use tessera_value::{Key, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once, and a no-op when another global subscriber
/// is already installed. Enable with `RUST_LOG=tessera_match=debug` or
/// `RUST_LOG=tessera_match=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(EnvFilter::from_default_env())
            .try_init();
        if installed.is_err() {
            tracing::debug!("global subscriber already set");
        }
    });
}
