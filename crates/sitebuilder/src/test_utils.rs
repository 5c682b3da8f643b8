//! Fixtures for tests: an in-memory API with predictable ids and time.

use crate::api::SiteApi;
use crate::clock::FixedClock;
use crate::config::SiteConfig;
use crate::ids::SequentialIds;
use crate::store::mem_backend::MemBackend;
use chrono::{TimeZone, Utc};

/// 2024-05-01T12:00:00Z.
pub const FIXED_MILLIS: i64 = 1_714_564_800_000;

pub fn fixed_clock() -> FixedClock {
    FixedClock(Utc.timestamp_millis_opt(FIXED_MILLIS).single().unwrap_or_default())
}

/// Opens an API over `backend` with [`SequentialIds`] and [`fixed_clock`].
pub fn mem_api_with(backend: MemBackend) -> SiteApi<MemBackend> {
    SiteApi::with_collaborators(
        backend,
        SiteConfig::default(),
        Box::new(SequentialIds::new()),
        Box::new(fixed_clock()),
    )
}

pub fn mem_api() -> SiteApi<MemBackend> {
    mem_api_with(MemBackend::new())
}
