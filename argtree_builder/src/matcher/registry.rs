use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::constant::TERMINATOR;
use crate::matcher::api::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum RegistryError {
    #[error("option declares no names.")]
    NoNames,

    #[error("'{0}' is not a valid option name.")]
    InvalidName(String),

    #[error("duplicate option name '{0}'.")]
    DuplicateName(String),

    #[error("secondary names given to '{0}', which takes values.")]
    SecondaryNameOnValueOption(String),

    #[error("'{second}' accepts bare numbers, but '{first}' already does.")]
    MultipleNumberOptions { first: String, second: String },

    #[error("'{0}' accepts bare numbers, so it must take exactly 1 value.")]
    NumberOptionArity(String),
}

/// The options of a single command level, indexed by every name they may be invoked by.
#[derive(Debug, Default)]
pub(crate) struct OptionRegistry {
    options: Vec<OptionConfig>,
    by_name: HashMap<String, OptionId>,
    prefixes: HashSet<String>,
    long_names: HashSet<String>,
    number_option: Option<OptionId>,
}

impl OptionRegistry {
    pub(crate) fn register(&mut self, option: OptionConfig) -> Result<OptionId, RegistryError> {
        if option.names().is_empty() {
            return Err(RegistryError::NoNames);
        }

        if !option.secondary_names().is_empty() && !option.bound().is_flag() {
            return Err(RegistryError::SecondaryNameOnValueOption(
                option.display_name().to_string(),
            ));
        }

        let mut seen = HashSet::new();

        for name in option.all_names() {
            let (prefix, body) = split_option_prefix(name);

            if prefix.is_empty()
                || body.is_empty()
                || name == TERMINATOR
                || name.contains('=')
                || name.chars().any(char::is_whitespace)
            {
                return Err(RegistryError::InvalidName(name.clone()));
            }

            if self.by_name.contains_key(name) || !seen.insert(name.as_str()) {
                return Err(RegistryError::DuplicateName(name.clone()));
            }
        }

        if option.accepts_number_value_without_name() {
            if let Some(first) = self.number_option {
                return Err(RegistryError::MultipleNumberOptions {
                    first: self.options[first].display_name().to_string(),
                    second: option.display_name().to_string(),
                });
            }

            if option.bound() != Bound::Range(1, 1) {
                return Err(RegistryError::NumberOptionArity(
                    option.display_name().to_string(),
                ));
            }
        }

        let id = self.options.len();

        for name in option.all_names() {
            let (prefix, _) = split_option_prefix(name);
            self.prefixes.insert(prefix.to_string());

            if name.chars().count() > 2 {
                self.long_names.insert(name.clone());
            }

            self.by_name.insert(name.clone(), id);
        }

        if option.accepts_number_value_without_name() {
            self.number_option = Some(id);
        }

        self.options.push(option);
        Ok(id)
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<(OptionId, &OptionConfig)> {
        self.by_name
            .get(name)
            .map(|id| (*id, &self.options[*id]))
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub(crate) fn is_prefix(&self, prefix: &str) -> bool {
        self.prefixes.contains(prefix)
    }

    pub(crate) fn is_long_name(&self, name: &str) -> bool {
        self.long_names.contains(name)
    }

    pub(crate) fn number_option(&self) -> Option<OptionId> {
        self.number_option
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .flat_map(|option| option.all_names().map(String::as_str))
    }
}
