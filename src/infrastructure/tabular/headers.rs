// ============================================================
// HEADER HYGIENE
// ============================================================

use std::collections::HashSet;

/// Make raw header cells usable as column names.
///
/// Blank headers become `Unnamed: {index}`; repeated names get `.1`, `.2`, ...
/// suffixes so every name is unique while first occurrences keep their name.
pub fn unique_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let raw: Vec<String> = raw
        .into_iter()
        .enumerate()
        .map(|(idx, h)| {
            let name = h.as_ref().trim();
            if name.is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut taken: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut out = Vec::with_capacity(raw.len());

    for name in raw {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while taken.contains(&candidate) {
            candidate = format!("{}.{}", name, suffix);
            suffix += 1;
        }
        taken.insert(candidate.clone());
        out.push(candidate);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_headers() {
        assert_eq!(
            unique_headers(["id", "", " "]),
            vec!["id", "Unnamed: 1", "Unnamed: 2"]
        );
    }

    #[test]
    fn test_duplicate_headers() {
        assert_eq!(
            unique_headers(["a", "b", "a", "a"]),
            vec!["a", "b", "a.1", "a.2"]
        );
    }

    #[test]
    fn test_suffix_collision() {
        assert_eq!(unique_headers(["a", "a.1", "a"]), vec!["a", "a.1", "a.2"]);
    }
}
