//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide `tracing` subscriber. Log levels come from
//! `RUST_LOG`; the output is the compact format with module paths hidden, since every
//! actor line already carries an `entity_type` field.
//!
//! ```bash
//! # Sweep summaries, creates, deletes, status changes
//! RUST_LOG=info cargo run
//!
//! # Full payloads and every store request
//! RUST_LOG=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actors**: startup and shutdown with the final store size, every create, update,
//!   delete and action with the entity id.
//! - **Clients**: one span per call (`#[instrument]`), so store requests made from inside
//!   a hook nest under the call that caused them.
//! - **Sweeps**: one summary line per run (`examined`, `transitioned`, `skipped`,
//!   `failed`) and one `warn` per item that could not be written.
//! - **Scheduler**: retries, exhausted runs and shutdown of each job.
//!
//! A sweep that expires one order looks like this at `info`:
//!
//! ```text
//! INFO sweep_expired: Updated entity_type="Order" id=order_3
//! INFO sweep_expired: Order sweep finished report=examined=2 transitioned=1 skipped=0 failed=0
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type and span names identify the source
        .compact()
        .init();
}
