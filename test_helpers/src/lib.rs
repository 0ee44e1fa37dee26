//! Test helpers shared across the `mamlgen` workspace.
//!
//! [`figment`] wraps `figment::Jail` for configuration tests and [`text`]
//! normalises rendered output and behavioural step arguments.

pub mod figment;
pub mod text;
