//! Use-case services layered on top of repository contracts.
//!
//! # Responsibility
//! - Apply use-case rules (owner existence, duplicate tag names) that sit
//!   above single-aggregate validation.
//! - Emit metadata-only write events.

pub mod experience_service;
pub mod strong_point_service;
pub mod tag_service;
