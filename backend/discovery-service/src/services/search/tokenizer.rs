/// Normalize a raw query into search terms.
///
/// Splits on runs of non-alphanumeric characters, lower-cases, and drops
/// terms of length <= 2. Order is preserved for highlight construction and
/// duplicates are kept. Empty or whitespace-only input yields an empty
/// list, which callers must treat as "no search".
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|term| term.chars().count() > 2)
        .map(str::to_string)
        .collect()
}
