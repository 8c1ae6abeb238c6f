use std::collections::HashMap;

/// Selects the `limit` most frequent words
///
/// Words are ordered by count, highest first; words with equal counts are
/// ordered alphabetically so the result is deterministic.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use word_ripple::output::top_words;
///
/// let counts = HashMap::from([
///     ("fox".to_string(), 2),
///     ("the".to_string(), 9),
///     ("dog".to_string(), 2),
/// ]);
/// assert_eq!(
///     top_words(&counts, 2),
///     vec![("the".to_string(), 9), ("dog".to_string(), 2)]
/// );
/// ```
pub fn top_words(counts: &HashMap<String, u64>, limit: usize) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = counts
        .iter()
        .map(|(word, count)| (word.clone(), *count))
        .collect();

    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}
