//! Partitioning of parameters into per-set syntax items.

use std::collections::BTreeMap;

use crate::maml::{Parameter, SyntaxItem};

/// Parameters of one command, both as a flat list and grouped by set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedParameters {
    /// One syntax item per distinct set name, ordered by set name.
    pub syntax: Vec<SyntaxItem>,
    /// Every parameter, in declaration order.
    pub parameters: Vec<Parameter>,
}

/// Groups `parameters` by their parameter-set name.
///
/// Each entry pairs a set name (empty for the default set) with its
/// normalised parameter. Input order is preserved inside each syntax item
/// and in the flat list; syntax items are emitted in ordinal set-name order,
/// so the default set comes first.
pub fn group_parameters<I, S>(command_name: &str, parameters: I) -> GroupedParameters
where
    I: IntoIterator<Item = (S, Parameter)>,
    S: Into<String>,
{
    let mut sets: BTreeMap<String, SyntaxItem> = BTreeMap::new();
    let mut all = Vec::new();
    for (set_name, parameter) in parameters {
        sets.entry(set_name.into())
            .or_insert_with(|| SyntaxItem {
                command_name: command_name.to_owned(),
                parameters: Vec::new(),
            })
            .parameters
            .push(parameter.clone());
        all.push(parameter);
    }
    GroupedParameters {
        syntax: sets.into_values().collect(),
        parameters: all,
    }
}
