//! Effect engine: per-family frame schedules, their rendering, and the closed effect catalog.

pub(crate) mod appear;
pub(crate) mod catalog;
pub(crate) mod disappear;
pub(crate) mod emphasis;
pub(crate) mod schedule;
