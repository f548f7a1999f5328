use crate::fuzzy_matcher::tiered::MAX_LEN;

/// Case fold `text` into `buf`, keeping at most [`MAX_LEN`] characters.
///
/// Returns false when `text` did not fit.
pub(crate) fn fold_into(text: &str, buf: &mut Vec<char>) -> bool {
    buf.clear();
    let mut folded = text.chars().flat_map(char::to_lowercase);
    buf.extend(folded.by_ref().take(MAX_LEN));
    folded.next().is_none()
}

#[cfg(test)]
pub(crate) fn assert_order(matcher: &dyn crate::fuzzy_matcher::FuzzyMatcher, pattern: &str, choices: &[&'static str]) {
    let result = filter_and_sort(matcher, pattern, choices);

    if result != choices {
        // debug print
        println!("pattern: {pattern}");
        for &choice in choices.iter() {
            if let Some(score) = matcher.fuzzy_match(choice, pattern) {
                println!("{score}: {choice}");
            } else {
                println!("NO MATCH for {choice}");
            }
        }
    }

    assert_eq!(result, choices);
}

#[cfg(test)]
fn filter_and_sort(
    matcher: &dyn crate::fuzzy_matcher::FuzzyMatcher,
    pattern: &str,
    lines: &[&'static str],
) -> Vec<&'static str> {
    let mut lines_with_score: Vec<(i64, &'static str)> = lines
        .iter()
        .filter_map(|&s| matcher.fuzzy_match(s, pattern).map(|score| (score, s)))
        .collect();
    lines_with_score.sort_by_key(|(score, _)| -score);
    lines_with_score.into_iter().map(|(_, string)| string).collect()
}
