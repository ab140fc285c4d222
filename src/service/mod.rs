//! Request orchestration: catalog lookup, frame generation, encoding.

pub(crate) mod animation;
