//! Logging setup.
//!
//! The library emits `tracing` events under the `u_deadlock` target:
//!
//! - `info`: run start (population, generation cap, convergence interval,
//!   initial best) and run end (best makespan, generations, terminal state)
//! - `debug`: one event per generation (best and average fitness) and one
//!   per convergence check
//! - `trace`: every delay the resolver queues
//!
//! Installing a subscriber is left to the host; [`init_tracing`] covers
//! benchmarks and tests.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "u_deadlock=info";

/// Installs a `fmt` subscriber unless one is already set.
///
/// `RUST_LOG` overrides [`DEFAULT_FILTER`]; `RUST_LOG=u_deadlock=debug`
/// shows per-generation progress.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
