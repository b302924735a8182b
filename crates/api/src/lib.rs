//! HTTP API: computed inventory fields (statuses, reports, dashboard) over
//! snapshots posted by the caller.

pub mod app;
pub mod config;
