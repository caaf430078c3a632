use crate::dataset::SimilarityIndex;

/// Catalog titles for the selection list
///
/// Sorted and de-duplicated. A non-blank `query` keeps only titles containing
/// it, compared case-insensitively.
pub fn search_titles(index: &SimilarityIndex, query: Option<&str>) -> Vec<String> {
    let needle = query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    index
        .titles()
        .into_iter()
        .filter(|title| match &needle {
            Some(needle) => title.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .map(str::to_string)
        .collect()
}
