use crate::matcher::api::*;
use crate::matcher::core::MatchError;
use crate::matcher::model::*;
use crate::model::Invocation;

/// Decides whether a token ends the value scan of an option that has met its minimum.
pub(crate) trait Lookahead {
    fn terminates(&self, token: &str) -> bool;
}

/// The outcome of parsing a single option occurrence.
/// `consumed` is always reported, so the caller may keep scanning after an error.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct OptionMatch {
    pub(crate) consumed: usize,
    pub(crate) result: Result<Invocation, MatchError>,
}

/// Parse the option named `name` found at `tokens[index]`.
///
/// The `explicit_value` (from `--name=value`, or attached to a short name) counts first.
/// When the option accepts unattached values, following tokens are consumed while the bound is open.
/// Once the minimum is met, the scan stops early at any token the `lookahead` rejects.
pub(crate) fn parse_long_opt(
    option: &OptionConfig,
    name: &str,
    tokens: &[String],
    index: usize,
    explicit_value: Option<&str>,
    lookahead: &impl Lookahead,
) -> OptionMatch {
    let bound = option.bound();

    if bound.is_flag() {
        return OptionMatch {
            consumed: 1,
            result: match explicit_value {
                Some(_) => Err(MatchError::UnexpectedValue(name.to_string())),
                None => Ok(Invocation::new(name, index, Vec::default())),
            },
        };
    }

    let mut buffer = MatchBuffer::new(name, bound);
    let mut consumed = 1;

    if let Some(value) = explicit_value {
        buffer.push(index, value.to_string());
    }

    if option.accepts_unattached_value() {
        while buffer.is_open() {
            let token = match tokens.get(index + consumed) {
                Some(token) => token,
                None => break,
            };

            if buffer.can_close() && lookahead.terminates(token) {
                break;
            }

            buffer.push(index + consumed, token.clone());
            consumed += 1;
        }
    }

    let result = match buffer.close() {
        Ok(values) => Ok(Invocation::new(name, index, values)),
        Err(error) => Err(MatchError::IncorrectValueCount {
            option: option.key().to_string(),
            name: name.to_string(),
            expected: bound,
            provided: error.provided(),
        }),
    };

    OptionMatch { consumed, result }
}

/// Parse the short option named `name`, whose character sits at byte `offset` of `tokens[index]`.
///
/// A flag reports `consumed == 0` when more characters follow, so the caller continues the bundle.
/// Any other option takes the rest of the token as its value (a leading `=` is dropped).
pub(crate) fn parse_short_opt(
    option: &OptionConfig,
    name: &str,
    tokens: &[String],
    index: usize,
    offset: usize,
    lookahead: &impl Lookahead,
) -> OptionMatch {
    let token = &tokens[index];
    let remainder = token[offset..]
        .chars()
        .next()
        .map(|character| &token[offset + character.len_utf8()..])
        .unwrap_or_default();

    if option.bound().is_flag() {
        return OptionMatch {
            consumed: if remainder.is_empty() { 1 } else { 0 },
            result: Ok(Invocation::new(name, index, Vec::default())),
        };
    }

    let attached = if remainder.is_empty() {
        None
    } else {
        Some(remainder.strip_prefix('=').unwrap_or(remainder))
    };

    parse_long_opt(option, name, tokens, index, attached, lookahead)
}
