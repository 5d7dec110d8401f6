//! Domain models for Nebula Tasks.
//!
//! The whole system revolves around one entity, [`Task`], plus the wire
//! shapes the JSON API exchanges:
//!
//! - [`AddTaskInput`], [`UpdateTaskInput`], [`DeleteTaskInput`]: request
//!   bodies as clients send them. Handlers validate the raw JSON field by
//!   field rather than deserializing these, so a missing or wrong-typed
//!   value reports the same validation message either way.
//! - [`TaskListResponse`]: the `{ "tasks": [...] }` envelope for reads.
//! - [`MessageResponse`]: the `{ "message": "..." }` envelope used by
//!   successful mutations and by validation / not-found failures.

mod task;

pub use task::*;
