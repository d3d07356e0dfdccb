//! Service adapters and persistence for the nearstop route planner.
//!
//! Responsibilities:
//! - Implement [`nearstop_core::DistanceOracle`] over HTTP routing services.
//! - Fetch per-leg directions for a sequenced route.
//! - Persist the pending stop list between invocations.
//!
//! Boundaries:
//! - Do not encode sequencing rules (live in `nearstop-core`).
//! - Keep blocking I/O off async executors; prefer async-capable clients.
//!
//! Invariants:
//! - Adapters are `Send + Sync` and hold no global mutable state.

pub mod routing;
pub mod store;
