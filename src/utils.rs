/// Turn a multi-line text box into list entries:
/// - one entry per line (`\n` or `\r\n`)
/// - surrounding whitespace trimmed
/// - blank lines dropped
pub fn split_entries(s: &str) -> Vec<String> {
    s.lines()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
