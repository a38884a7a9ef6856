use strsim::jaro_winkler;

use crate::constant::SUGGESTION_THRESHOLD;

/// The candidates that `given` is plausibly a typo of, most similar first.
///
/// A candidate matches when it starts with `given` or is similar enough by Jaro-Winkler.
pub(crate) fn suggest<'a>(given: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let score = jaro_winkler(given, candidate);

            if score > SUGGESTION_THRESHOLD || (!given.is_empty() && candidate.starts_with(given)) {
                Some((score, candidate))
            } else {
                None
            }
        })
        .collect();

    scored.sort_by(|(a, a_name), (b, b_name)| b.total_cmp(a).then_with(|| a_name.cmp(b_name)));
    let mut suggestions: Vec<String> = scored
        .into_iter()
        .map(|(_, candidate)| candidate.to_string())
        .collect();
    suggestions.dedup();
    suggestions
}
