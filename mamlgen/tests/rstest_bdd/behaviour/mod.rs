//! Behavioural tests for `mamlgen gen-help` using `rstest-bdd`.
//!
//! Step implementations live under [`steps`], while [`scenarios`] binds the
//! `.feature` files to the shared fixture.

mod scenarios;
pub mod steps;
