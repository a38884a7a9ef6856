use std::borrow::Cow;
use std::collections::HashMap;
use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::constant::TERMINATOR;
use crate::matcher::api::*;
use crate::matcher::model::*;
use crate::matcher::option::*;
use crate::matcher::registry::OptionRegistry;
use crate::matcher::suggest::suggest;
use crate::model::Invocation;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("no such option '{name}'.")]
    InvalidOption {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("option '{name}' expects {expected:?} values, but {provided} were provided.")]
    IncorrectValueCount {
        option: String,
        name: String,
        expected: Bound,
        provided: usize,
    },

    #[error("option '{0}' does not take a value.")]
    UnexpectedValue(String),

    #[error("missing argument '{0}'.")]
    MissingArgument(String),

    #[error("argument '{argument}' expects {expected:?} values, but {provided} were provided.")]
    IncorrectArgumentValueCount {
        argument: String,
        expected: Bound,
        provided: usize,
    },

    #[error("unexpected argument(s) {0:?}.")]
    UnexpectedArguments(Vec<String>),

    #[error("no such sub-command '{name}'.")]
    InvalidSubcommand {
        name: String,
        suggestions: Vec<String>,
    },
}

/// Everything found while scanning the tokens of a single command level.
#[derive(Debug, Default)]
pub(crate) struct Scan {
    pub(crate) invocations: InvocationRecorder,
    pub(crate) positionals: Vec<OffsetValue>,
    pub(crate) subcommand: Option<(usize, String)>,
    pub(crate) errors: Vec<(Option<usize>, MatchError)>,
}

/// The token classifier of a single command level.
pub(crate) struct CommandMatcher<'c> {
    registry: &'c OptionRegistry,
    subcommands: &'c HashMap<String, usize>,
    aliases: &'c HashMap<String, Vec<String>>,
    settings: &'c MatcherSettings,
}

impl<'c> CommandMatcher<'c> {
    pub(crate) fn new(
        registry: &'c OptionRegistry,
        subcommands: &'c HashMap<String, usize>,
        aliases: &'c HashMap<String, Vec<String>>,
        settings: &'c MatcherSettings,
    ) -> Self {
        Self {
            registry,
            subcommands,
            aliases,
            settings,
        }
    }

    fn normalize<'t>(&self, token: &'t str) -> Cow<'t, str> {
        match &self.settings.token_transform {
            Some(transform) => Cow::Owned(transform(token)),
            None => Cow::Borrowed(token),
        }
    }

    /// Scan `tokens` from `start` until they run out, or a sub-command name is found.
    ///
    /// Alias expansions are spliced into `tokens` in place.
    /// Usage errors are accumulated, and scanning continues past them.
    pub(crate) fn scan(&self, tokens: &mut Vec<String>, start: usize) -> Scan {
        let mut scan = Scan::default();
        let mut index = start;
        let mut parsing_options = true;
        let mut min_alias_index = start;

        while index < tokens.len() {
            let token = tokens[index].clone();
            let normalized = self.normalize(&token).into_owned();
            let (prefix, _) = split_option_prefix(&token);

            if parsing_options && token == TERMINATOR {
                parsing_options = false;
                index += 1;
                continue;
            }

            if parsing_options && index >= min_alias_index {
                if let Some(expansion) = self.aliases.get(&normalized) {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Expanding alias '{token}' into {expansion:?}.");
                    }

                    tokens.splice(index..index + 1, expansion.iter().cloned());
                    min_alias_index = index + expansion.len();
                    continue;
                }
            }

            if parsing_options {
                if let Some((id, value)) = self.number_value(&token) {
                    scan.invocations.record(
                        id,
                        Invocation::new(token.clone(), index, vec![(index, value.to_string())]),
                    );
                    index += 1;
                    continue;
                }
            }

            if parsing_options && self.is_long_option(prefix, &token, &normalized) {
                index += self.match_long(tokens, index, &mut scan);
                continue;
            }

            if parsing_options && self.is_short_option(prefix, &token) {
                index += self.match_short(tokens, index, &mut scan);
                continue;
            }

            if parsing_options && self.subcommands.contains_key(&normalized) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Found sub-command '{normalized}' at {index}.");
                }

                scan.subcommand = Some((index, normalized));
                break;
            }

            if parsing_options && !self.settings.allow_interspersed_args {
                scan.positionals
                    .extend(tokens.iter().cloned().enumerate().skip(index));
                break;
            }

            scan.positionals.push((index, token));
            index += 1;
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Scanned {} invocations, {} positionals, {} errors.",
                scan.invocations.history().len(),
                scan.positionals.len(),
                scan.errors.len()
            );
        }

        scan
    }

    /// The number option and its value, when `token` is a bare `-` prefixed number (ex: `-5`).
    fn number_value<'t>(&self, token: &'t str) -> Option<(OptionId, &'t str)> {
        let id = self.registry.number_option()?;
        let body = token.strip_prefix('-')?;
        (!body.starts_with('-') && is_number(body)).then_some((id, body))
    }

    fn is_long_option(&self, prefix: &str, token: &str, normalized: &str) -> bool {
        if prefix.is_empty() {
            return false;
        }

        let (name, _) = split_equals_delimiter(normalized);
        self.registry.is_long_name(normalized)
            || self.registry.is_long_name(name)
            || (prefix.chars().count() > 1 && self.registry.is_prefix(prefix))
            || (!self.settings.allow_grouped_short_options
                && self.registry.is_prefix(prefix)
                && token.chars().count() > 1)
    }

    fn is_short_option(&self, prefix: &str, token: &str) -> bool {
        token.chars().count() >= 2
            && prefix.chars().count() == 1
            && self.registry.is_prefix(prefix)
    }

    fn match_long(&self, tokens: &[String], index: usize, scan: &mut Scan) -> usize {
        let token = &tokens[index];
        let (name, explicit_value) = split_equals_delimiter(token);
        let name = self.normalize(name);

        match self.registry.lookup(&name) {
            Some((id, option)) => {
                let OptionMatch { consumed, result } =
                    parse_long_opt(option, &name, tokens, index, explicit_value, self);
                self.record(id, index, result, scan);
                consumed
            }
            None if self.settings.treat_unknown_options_as_args => {
                scan.positionals.push((index, token.clone()));
                1
            }
            None => {
                scan.errors.push((
                    Some(index),
                    MatchError::InvalidOption {
                        suggestions: suggest(&name, self.registry.names()),
                        name: name.into_owned(),
                    },
                ));
                1
            }
        }
    }

    fn match_short(&self, tokens: &[String], index: usize, scan: &mut Scan) -> usize {
        let token = &tokens[index];
        let prefix_length = token.chars().next().map(char::len_utf8).unwrap_or(0);
        let (prefix, body) = token.split_at(prefix_length);

        // Invocations of a bundle are held back, since an unknown character may turn the whole token positional.
        let mut bundle: Vec<(OptionId, Invocation)> = Vec::default();
        let mut previous: Option<String> = None;

        for (offset, character) in body.char_indices() {
            let offset = prefix_length + offset;

            if character == '=' {
                if let Some(name) = previous.take() {
                    scan.invocations.extend(bundle);
                    scan.errors
                        .push((Some(index), MatchError::UnexpectedValue(name)));
                    return 1;
                }
            }

            let name = self.normalize(&format!("{prefix}{character}")).into_owned();

            match self.registry.lookup(&name) {
                Some((id, option)) => {
                    let OptionMatch { consumed, result } =
                        parse_short_opt(option, &name, tokens, index, offset, self);

                    match result {
                        Ok(invocation) => bundle.push((id, invocation)),
                        Err(error) => {
                            scan.invocations.extend(bundle);
                            scan.errors.push((Some(index), error));
                            return consumed.max(1);
                        }
                    }

                    if consumed > 0 {
                        scan.invocations.extend(bundle);
                        return consumed;
                    }

                    previous = Some(name);
                }
                None if self.settings.treat_unknown_options_as_args => {
                    scan.positionals.push((index, token.clone()));
                    return 1;
                }
                None => {
                    scan.invocations.extend(bundle);
                    scan.errors.push((
                        Some(index),
                        MatchError::InvalidOption {
                            suggestions: suggest(&name, self.registry.names()),
                            name,
                        },
                    ));
                    return 1;
                }
            }
        }

        scan.invocations.extend(bundle);
        1
    }

    fn record(
        &self,
        id: OptionId,
        index: usize,
        result: Result<Invocation, MatchError>,
        scan: &mut Scan,
    ) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Matched option {id} at {index}: {result:?}.");
        }

        match result {
            Ok(invocation) => scan.invocations.record(id, invocation),
            Err(error) => scan.errors.push((Some(index), error)),
        }
    }
}

impl<'c> Lookahead for CommandMatcher<'c> {
    fn terminates(&self, token: &str) -> bool {
        if token == TERMINATOR {
            return true;
        }

        let normalized = self.normalize(token);
        let (name, _) = split_equals_delimiter(&normalized);

        if self.registry.contains(name) || self.subcommands.contains_key(&*normalized) {
            return true;
        }

        let (prefix, _) = split_option_prefix(token);
        !self.settings.treat_unknown_options_as_args
            && !prefix.is_empty()
            && self.registry.is_prefix(prefix)
    }
}

fn is_number(body: &str) -> bool {
    let digits = body
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(body);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
