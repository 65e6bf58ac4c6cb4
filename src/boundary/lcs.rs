// Longest-common-substring reduction used to find text repeated on every page

/// Longest common substring of every string in `strings`
///
/// Returns `None` for an empty sequence. A single string is its own LCS.
/// Longer sequences are folded left to right: the running result is combined
/// pairwise with the next string, so ties are settled by the earliest pair.
pub fn longest_common_substring<S: AsRef<str>>(strings: &[S]) -> Option<String> {
    let (first, rest) = strings.split_first()?;
    let reduced = rest.iter().fold(first.as_ref().to_string(), |acc, next| {
        common_substring(&acc, next.as_ref())
    });
    Some(reduced)
}

/// Longest contiguous substring shared by `s` and `t`
///
/// Works on Unicode scalar values, not bytes. Among equally long candidates
/// the one ending earliest in `s` wins; no shared character yields `""`.
pub fn common_substring(s: &str, t: &str) -> String {
    let s_chars: Vec<char> = s.chars().collect();
    let t_chars: Vec<char> = t.chars().collect();
    if s_chars.is_empty() || t_chars.is_empty() {
        return String::new();
    }

    // Two DP rows are enough: row i+1 only reads row i
    let mut previous = vec![0usize; t_chars.len() + 1];
    let mut current = vec![0usize; t_chars.len() + 1];
    let mut best_len = 0usize;
    let mut best_end = 0usize;

    for (i, &sc) in s_chars.iter().enumerate() {
        for (j, &tc) in t_chars.iter().enumerate() {
            if sc == tc {
                current[j + 1] = previous[j] + 1;
                if current[j + 1] > best_len {
                    best_len = current[j + 1];
                    best_end = i + 1;
                }
            } else {
                current[j + 1] = 0;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    s_chars[best_end - best_len..best_end].iter().collect()
}
