use crate::matcher::api::*;
use crate::matcher::core::MatchError;
use crate::matcher::suggest::suggest;

pub(crate) type Distribution = Vec<Vec<OffsetValue>>;

/// Distribute the positional tokens across the arguments, in declaration order.
///
/// Fixed arguments take exactly their size, except an optional one with nothing left takes none.
/// The variable argument takes whatever is not reserved for the fixed arguments after it,
/// and at least one token when it is required.
/// Leftover tokens are an error; a lone leftover resembling a sub-command name is reported as one.
pub(crate) fn distribute(
    arguments: &[ArgumentConfig],
    positionals: &[OffsetValue],
    subcommands: &[&str],
) -> Result<Distribution, (Option<usize>, MatchError)> {
    let mut distribution = Vec::with_capacity(arguments.len());
    let mut position = 0;

    for (i, argument) in arguments.iter().enumerate() {
        let remaining = positionals.len() - position;
        let take = match argument.bound() {
            Bound::Lower(n) => {
                let end_size: usize = arguments[i + 1..]
                    .iter()
                    .map(|after| after.bound().lower() as usize)
                    .sum();
                let minimum = if argument.required() {
                    usize::max(n as usize, 1)
                } else {
                    0
                };
                usize::max(minimum, remaining.saturating_sub(end_size))
            }
            Bound::Range(..) if remaining == 0 && !argument.required() => 0,
            Bound::Range(n, _) => n as usize,
        };

        if take > remaining {
            return Err(if remaining == 0 {
                (None, MatchError::MissingArgument(argument.name().to_string()))
            } else {
                (
                    Some(positionals[position].0),
                    MatchError::IncorrectArgumentValueCount {
                        argument: argument.name().to_string(),
                        expected: argument.bound(),
                        provided: remaining,
                    },
                )
            });
        }

        distribution.push(positionals[position..position + take].to_vec());
        position += take;
    }

    match &positionals[position..] {
        [] => Ok(distribution),
        [(offset, token)] if !subcommands.is_empty() => {
            let suggestions = suggest(token, subcommands.iter().copied());

            if suggestions.is_empty() {
                Err((Some(*offset), MatchError::UnexpectedArguments(vec![token.clone()])))
            } else {
                Err((
                    Some(*offset),
                    MatchError::InvalidSubcommand {
                        name: token.clone(),
                        suggestions,
                    },
                ))
            }
        }
        excess => Err((
            Some(excess[0].0),
            MatchError::UnexpectedArguments(excess.iter().map(|(_, token)| token.clone()).collect()),
        )),
    }
}
