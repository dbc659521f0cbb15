//! Background Tasks Module
//!
//! Contains background tasks that run periodically for the lifetime of a cache.
//!
//! # Tasks
//! - TTL Sweep: Removes expired cache entries at a fixed interval

mod sweep;

pub(crate) use sweep::{spawn_sweep_task, SweepTask};
