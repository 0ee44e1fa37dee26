//! Binds the `gen-help` feature file to the step registry.

use rstest_bdd_macros::scenarios;

use super::steps::{GenHelpContext, gen_help_context};

scenarios!(
    "tests/features/gen_help.feature",
    fixtures = [gen_help_context: GenHelpContext]
);
