use std::sync::Arc;

#[cfg(test)]
use rand::{distributions::Standard, prelude::Distribution, Rng};

use crate::model::Nargs;

pub(crate) type OffsetValue = (usize, String);
pub(crate) type OptionId = usize;
pub(crate) type TokenTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Bound {
    Range(u8, u8),
    Lower(u8),
}

impl Bound {
    pub(crate) fn lower(&self) -> u8 {
        match self {
            Bound::Range(n, _) | Bound::Lower(n) => *n,
        }
    }

    pub(crate) fn upper(&self) -> Option<u8> {
        match self {
            Bound::Range(_, n) => Some(*n),
            Bound::Lower(_) => None,
        }
    }

    pub(crate) fn is_flag(&self) -> bool {
        *self == Bound::Range(0, 0)
    }
}

impl From<Nargs> for Bound {
    fn from(value: Nargs) -> Self {
        match value {
            Nargs::Precisely(n) => Bound::Range(n, n),
            Nargs::Any => Bound::Lower(0),
            Nargs::AtLeastOne => Bound::Lower(1),
            Nargs::Between(i, j) => Bound::Range(i, j),
        }
    }
}

impl From<Bound> for Nargs {
    fn from(value: Bound) -> Self {
        match value {
            Bound::Range(i, j) if i == j => Nargs::Precisely(i),
            Bound::Range(i, j) => Nargs::Between(i, j),
            Bound::Lower(0) => Nargs::Any,
            Bound::Lower(_) => Nargs::AtLeastOne,
        }
    }
}

#[cfg(test)]
impl Distribution<Bound> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Bound {
        match rng.gen_range(0..2) {
            0 => {
                let upper: u8 = rng.gen();

                if upper == 0 {
                    Bound::Range(0, upper)
                } else {
                    Bound::Range(rng.gen_range(0..upper), upper)
                }
            }
            1 => Bound::Lower(rng.gen_range(0..2)),
            _ => unreachable!("internal error - impossible gen_range()"),
        }
    }
}

/// Split an option name into its prefix and body.
///
/// A name starting with a non-alphanumeric character has a one character prefix (`-x`),
/// or a two character prefix when that character repeats and more follows (`--xx`).
pub(crate) fn split_option_prefix(name: &str) -> (&str, &str) {
    let mut characters = name.chars();
    let first = match characters.next() {
        Some(c) if !c.is_alphanumeric() => c,
        _ => return ("", name),
    };

    match characters.next() {
        None => ("", name),
        Some(second) if second == first && characters.next().is_some() => {
            name.split_at(first.len_utf8() * 2)
        }
        Some(_) => name.split_at(first.len_utf8()),
    }
}

pub(crate) fn split_equals_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((n, v)) => (n, Some(v)),
        None => (token, None),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ArgumentConfig {
    name: String,
    bound: Bound,
    required: bool,
}

impl ArgumentConfig {
    pub(crate) fn new(name: impl Into<String>, bound: Bound, required: bool) -> Self {
        Self {
            name: name.into(),
            bound,
            required,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn bound(&self) -> Bound {
        self.bound
    }

    pub(crate) fn required(&self) -> bool {
        self.required
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionConfig {
    names: Vec<String>,
    secondary_names: Vec<String>,
    bound: Bound,
    accepts_unattached_value: bool,
    accepts_number_value_without_name: bool,
}

impl OptionConfig {
    pub(crate) fn new(names: Vec<String>, bound: Bound) -> Self {
        Self {
            names,
            secondary_names: Vec::default(),
            bound,
            accepts_unattached_value: true,
            accepts_number_value_without_name: false,
        }
    }

    pub(crate) fn with_secondary_names(mut self, secondary_names: Vec<String>) -> Self {
        self.secondary_names = secondary_names;
        self
    }

    pub(crate) fn with_unattached_value(mut self, accepts: bool) -> Self {
        self.accepts_unattached_value = accepts;
        self
    }

    pub(crate) fn with_number_value(mut self, accepts: bool) -> Self {
        self.accepts_number_value_without_name = accepts;
        self
    }

    /// The longest primary name, with its prefix removed.
    pub(crate) fn key(&self) -> &str {
        split_option_prefix(self.display_name()).1
    }

    /// The longest primary name.
    pub(crate) fn display_name(&self) -> &str {
        self.names
            .iter()
            .fold("", |longest, name| {
                if name.len() > longest.len() {
                    name.as_str()
                } else {
                    longest
                }
            })
    }

    pub(crate) fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn secondary_names(&self) -> &[String] {
        &self.secondary_names
    }

    pub(crate) fn all_names(&self) -> impl Iterator<Item = &String> {
        self.names.iter().chain(self.secondary_names.iter())
    }

    pub(crate) fn is_secondary(&self, name: &str) -> bool {
        self.secondary_names.iter().any(|secondary| secondary == name)
    }

    pub(crate) fn bound(&self) -> Bound {
        self.bound
    }

    pub(crate) fn accepts_unattached_value(&self) -> bool {
        self.accepts_unattached_value
    }

    pub(crate) fn accepts_number_value_without_name(&self) -> bool {
        self.accepts_number_value_without_name
    }
}

#[derive(Clone)]
pub(crate) struct MatcherSettings {
    pub(crate) allow_interspersed_args: bool,
    pub(crate) treat_unknown_options_as_args: bool,
    pub(crate) allow_grouped_short_options: bool,
    pub(crate) token_transform: Option<TokenTransform>,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            allow_interspersed_args: true,
            treat_unknown_options_as_args: false,
            allow_grouped_short_options: true,
            token_transform: None,
        }
    }
}

impl std::fmt::Debug for MatcherSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatcherSettings")
            .field("allow_interspersed_args", &self.allow_interspersed_args)
            .field(
                "treat_unknown_options_as_args",
                &self.treat_unknown_options_as_args,
            )
            .field(
                "allow_grouped_short_options",
                &self.allow_grouped_short_options,
            )
            .field("token_transform", &self.token_transform.is_some())
            .finish()
    }
}
