//! `rstest-bdd` entrypoint for `mamlgen`.
#![allow(
    unfulfilled_lint_expectations,
    reason = "clippy::expect_used is denied globally; tests may not hit those branches"
)]
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface fixture mistakes"
)]

#[path = "../common/mod.rs"]
#[expect(dead_code, reason = "each test target uses a subset of the shared helpers")]
mod common;

mod behaviour;
