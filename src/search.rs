use crate::favorites::FavoriteEntry;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Folds text for matching: decomposes to NFD, strips combining marks,
/// and lowercases. "Résumé" and "resume" normalize to the same string.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns the entries whose display name contains `query`, ignoring
/// case and diacritics. An empty query returns everything. The input is
/// never mutated, so callers can keep the unfiltered list around and
/// re-filter it as the query changes.
pub fn filter_entries(entries: &[FavoriteEntry], query: &str) -> Vec<FavoriteEntry> {
    if query.is_empty() {
        return entries.to_vec();
    }
    let needle = normalize(query);
    entries
        .iter()
        .filter(|entry| normalize(&entry.name).contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local};
    use proptest::prelude::*;
    use std::path::PathBuf;
    use std::time::UNIX_EPOCH;

    fn entry(name: &str) -> FavoriteEntry {
        FavoriteEntry {
            path: PathBuf::from("/favorites").join(name),
            name: name.to_string(),
            is_dir: false,
            children: 0,
            size: 0,
            modified: DateTime::<Local>::from(UNIX_EPOCH),
        }
    }

    fn names(entries: &[FavoriteEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let entries = vec![entry("docs"), entry("photos"), entry("music")];
        assert_eq!(filter_entries(&entries, ""), entries);
    }

    #[test]
    fn matches_are_case_insensitive() {
        let entries = vec![entry("Photos"), entry("notes.txt"), entry("PHOTO.jpg")];
        let hits = filter_entries(&entries, "photo");
        assert_eq!(names(&hits), vec!["Photos", "PHOTO.jpg"]);
    }

    #[test]
    fn matches_ignore_diacritics_in_names() {
        let entries = vec![entry("résumé.pdf"), entry("notes.txt"), entry("report.pdf")];
        let hits = filter_entries(&entries, "res");
        assert_eq!(names(&hits), vec!["résumé.pdf"]);
    }

    #[test]
    fn matches_ignore_diacritics_in_the_query() {
        let entries = vec![entry("resume.pdf")];
        let hits = filter_entries(&entries, "résu");
        assert_eq!(names(&hits), vec!["resume.pdf"]);
    }

    #[test]
    fn substring_matches_anywhere_in_the_name() {
        let entries = vec![entry("summer-photos"), entry("photography"), entry("music")];
        let hits = filter_entries(&entries, "photo");
        assert_eq!(names(&hits), vec!["summer-photos", "photography"]);
    }

    #[test]
    fn no_match_yields_an_empty_list() {
        let entries = vec![entry("docs"), entry("music")];
        assert!(filter_entries(&entries, "zzz").is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let entries = vec![entry("alpha"), entry("beta"), entry("alphabet")];
        let once = filter_entries(&entries, "alpha");
        let twice = filter_entries(&once, "alpha");
        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_folds_precomposed_and_decomposed_forms_alike() {
        // U+00E9 (precomposed) and U+0065 U+0301 (decomposed) both fold to "e".
        assert_eq!(normalize("caf\u{e9}"), "cafe");
        assert_eq!(normalize("cafe\u{301}"), "cafe");
        assert_eq!(normalize("ZÜRICH"), "zurich");
    }

    proptest! {
        #[test]
        fn empty_query_is_the_identity(raw in proptest::collection::vec("[a-zA-Z0-9 ._-]{1,12}", 0..10)) {
            let entries: Vec<_> = raw.iter().map(|n| entry(n)).collect();
            prop_assert_eq!(filter_entries(&entries, ""), entries);
        }

        #[test]
        fn every_hit_contains_the_query(
            raw in proptest::collection::vec("[a-zA-Z]{1,12}", 0..10),
            query in "[a-zA-Z]{1,4}",
        ) {
            let entries: Vec<_> = raw.iter().map(|n| entry(n)).collect();
            let needle = normalize(&query);
            for hit in filter_entries(&entries, &query) {
                prop_assert!(normalize(&hit.name).contains(&needle));
            }
        }

        #[test]
        fn hits_keep_their_relative_order(
            raw in proptest::collection::vec("[a-z]{1,8}", 0..10),
            query in "[a-z]{1,3}",
        ) {
            let entries: Vec<_> = raw.iter().map(|n| entry(n)).collect();
            let hits = filter_entries(&entries, &query);
            let mut last_index = 0;
            for hit in &hits {
                let index = entries
                    .iter()
                    .enumerate()
                    .skip(last_index)
                    .find(|(_, e)| *e == hit)
                    .map(|(i, _)| i);
                prop_assert!(index.is_some());
                last_index = index.unwrap() + 1;
            }
        }
    }
}
