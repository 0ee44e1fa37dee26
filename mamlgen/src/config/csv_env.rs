//! Environment provider that reads comma-separated values as lists.
//!
//! Only keys registered with [`CsvEnv::lists`] are split, so
//! `MAMLGEN_EXTRACTORS=xml-comments,inline` deserialises as a two-element
//! list while `MAMLGEN_LOG_LEVEL=info,mamlgen=debug` stays one string.
//! List values starting with `[`, `{`, or a quote are left to figment's own
//! value parser.

use figment::providers::Env;
use figment::value::{Dict, Map, Value};
use figment::{Error, Metadata, Profile, Provider, util::nest};

/// Prefixed environment provider with CSV list support.
#[derive(Clone)]
pub struct CsvEnv {
    inner: Env,
    list_keys: Vec<String>,
}

impl CsvEnv {
    /// Creates a provider reading variables that start with `prefix`.
    #[must_use]
    pub fn prefixed(prefix: &str) -> Self {
        Self {
            inner: Env::prefixed(prefix),
            list_keys: Vec::new(),
        }
    }

    /// Splits comma-separated values of `keys` (without the prefix,
    /// case-insensitive) into lists.
    #[must_use]
    pub fn lists(mut self, keys: &[&str]) -> Self {
        self.list_keys.extend(keys.iter().map(|key| (*key).to_owned()));
        self
    }

    fn is_list_key(&self, key: &str) -> bool {
        self.list_keys
            .iter()
            .any(|list_key| list_key.eq_ignore_ascii_case(key))
    }

    fn should_parse_as_csv(value: &str) -> bool {
        value.contains(',') && !matches!(value.chars().next(), Some('[' | '{' | '"' | '\''))
    }

    fn parse_value(raw: &str, as_list: bool) -> Value {
        let trimmed = raw.trim();
        if as_list && Self::should_parse_as_csv(trimmed) {
            trimmed
                .split(',')
                .map(|item| Value::from(item.trim().to_owned()))
                .collect::<Vec<_>>()
                .into()
        } else {
            trimmed
                .parse()
                .unwrap_or_else(|_| Value::from(trimmed.to_owned()))
        }
    }
}

impl Provider for CsvEnv {
    fn metadata(&self) -> Metadata {
        self.inner.metadata()
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        for (key, raw) in self.inner.iter() {
            let value = Self::parse_value(&raw, self.is_list_key(key.as_str()));
            let Some(nested) = nest(key.as_str(), value).into_dict() else {
                return Err(Error::from(format!(
                    "environment key `{key}` produced a non-object value"
                )));
            };
            dict.extend(nested);
        }
        Ok(self.inner.profile.collect(dict))
    }
}
