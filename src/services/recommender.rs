use std::{cmp::Ordering, sync::Arc};

use serde::Deserialize;

use crate::dataset::SimilarityIndex;

/// Number of recommendations returned for a matched title
pub const RECOMMENDATION_COUNT: usize = 5;

/// How the queried movie is kept out of its own recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfExclusion {
    /// Remove the queried position from the ranking
    #[default]
    Position,
    /// Drop the top-ranked entry, assuming it is the queried movie.
    /// Wrong whenever another movie scores at least as high as the query's
    /// self-similarity and sits earlier in the catalog.
    RankZero,
}

/// A ranked neighbour of the queried movie
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    pub score: f32,
}

/// Nearest-neighbour lookup over a loaded [`SimilarityIndex`]
#[derive(Debug, Clone)]
pub struct Recommender {
    index: Arc<SimilarityIndex>,
    exclusion: SelfExclusion,
}

impl Recommender {
    pub fn new(index: Arc<SimilarityIndex>, exclusion: SelfExclusion) -> Self {
        Self { index, exclusion }
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// Titles of the movies most similar to `title`, best first
    ///
    /// Returns an empty list when the title is not in the catalog.
    pub fn recommend(&self, title: &str) -> Vec<String> {
        self.rank(title)
            .into_iter()
            .map(|neighbor| self.index.title_at(neighbor.position).to_string())
            .collect()
    }

    /// Same selection as [`Recommender::recommend`], with positions and scores
    pub fn rank(&self, title: &str) -> Vec<Neighbor> {
        let query = match self.index.resolve_index(title) {
            Ok(position) => position,
            Err(e) => {
                tracing::debug!(error = %e, "No recommendations for unknown title");
                return Vec::new();
            }
        };

        let mut row: Vec<Neighbor> = self
            .index
            .row_for(query)
            .map(|(position, score)| Neighbor { position, score })
            .collect();

        // sort_by is stable: equal scores keep catalog order
        row.sort_by(|a, b| descending(a.score, b.score));

        let skip = match self.exclusion {
            SelfExclusion::Position => {
                row.retain(|neighbor| neighbor.position != query);
                0
            }
            SelfExclusion::RankZero => 1,
        };

        row.into_iter()
            .skip(skip)
            .take(RECOMMENDATION_COUNT)
            .collect()
    }
}

/// Descending score order with NaN ranked below every number
fn descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Movie;

    /// Builds an index where only the first row matters: every other row is
    /// a plain identity row.
    fn index_with_first_row(titles: &[&str], first_row: &[f32]) -> Arc<SimilarityIndex> {
        let n = titles.len();
        let catalog = titles.iter().map(|t| Movie::new(*t)).collect();
        let mut matrix: Vec<Vec<f32>> = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        matrix[0] = first_row.to_vec();
        Arc::new(SimilarityIndex::new(catalog, matrix).unwrap())
    }

    fn recommender(index: Arc<SimilarityIndex>) -> Recommender {
        Recommender::new(index, SelfExclusion::Position)
    }

    #[test]
    fn test_end_to_end_top_five() {
        let index = index_with_first_row(
            &["Self", "A", "B", "C", "D", "E", "F"],
            &[1.0, 0.8, 0.6, 0.4, 0.2, 0.1, 0.05],
        );

        assert_eq!(
            recommender(index).recommend("Self"),
            vec!["A", "B", "C", "D", "E"]
        );
    }

    #[test]
    fn test_unknown_title_returns_empty() {
        let index = index_with_first_row(&["Self", "A"], &[1.0, 0.5]);
        assert!(recommender(index).recommend("__does_not_exist__").is_empty());
    }

    #[test]
    fn test_tie_break_keeps_catalog_order() {
        let index = index_with_first_row(
            &["Self", "A", "B", "C", "D", "E"],
            &[0.9, 0.5, 0.5, 0.5, 0.1, 0.1],
        );

        for exclusion in [SelfExclusion::Position, SelfExclusion::RankZero] {
            let recommender = Recommender::new(index.clone(), exclusion);
            assert_eq!(
                recommender.recommend("Self"),
                vec!["A", "B", "C", "D", "E"],
                "exclusion = {:?}",
                exclusion
            );
        }
    }

    #[test]
    fn test_ties_are_not_sorted_by_title() {
        let index = index_with_first_row(
            &["Self", "Zodiac", "Alien", "Memento"],
            &[1.0, 0.5, 0.5, 0.5],
        );

        assert_eq!(
            recommender(index).recommend("Self"),
            vec!["Zodiac", "Alien", "Memento"]
        );
    }

    #[test]
    fn test_result_is_deterministic() {
        let index = index_with_first_row(
            &["Self", "A", "B", "C", "D", "E", "F", "G"],
            &[1.0, 0.3, 0.3, 0.7, 0.3, 0.9, 0.3, 0.3],
        );
        let recommender = recommender(index);

        let first = recommender.recommend("Self");
        let second = recommender.recommend("Self");
        assert_eq!(first, second);
        assert_eq!(first, vec!["E", "C", "A", "B", "D"]);
    }

    #[test]
    fn test_small_catalog_returns_fewer() {
        let index = index_with_first_row(&["Self", "A", "B", "C"], &[1.0, 0.2, 0.9, 0.5]);
        assert_eq!(recommender(index).recommend("Self"), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_single_movie_catalog_returns_empty() {
        let index = index_with_first_row(&["Self"], &[1.0]);
        assert!(recommender(index).recommend("Self").is_empty());
    }

    #[test]
    fn test_size_bound_for_large_catalog() {
        let titles: Vec<String> = (0..50).map(|i| format!("Movie {i}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let row: Vec<f32> = (0..50).map(|i| 1.0 - i as f32 / 100.0).collect();
        let index = index_with_first_row(&refs, &row);

        let result = recommender(index).recommend("Movie 0");
        assert_eq!(result.len(), RECOMMENDATION_COUNT);
        assert_eq!(result[0], "Movie 1");
        assert!(!result.contains(&"Movie 0".to_string()));
    }

    #[test]
    fn test_self_excluded_when_self_is_maximal() {
        let index = index_with_first_row(
            &["Self", "A", "B", "C", "D", "E", "F"],
            &[1.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
        );

        for exclusion in [SelfExclusion::Position, SelfExclusion::RankZero] {
            let result = Recommender::new(index.clone(), exclusion).recommend("Self");
            assert!(!result.contains(&"Self".to_string()));
        }
    }

    #[test]
    fn test_position_exclusion_when_self_is_not_maximal() {
        // "A" scores above the query's own self-similarity
        let index = index_with_first_row(
            &["Self", "A", "B", "C", "D", "E", "F"],
            &[0.7, 0.9, 0.6, 0.5, 0.4, 0.3, 0.2],
        );

        assert_eq!(
            Recommender::new(index, SelfExclusion::Position).recommend("Self"),
            vec!["A", "B", "C", "D", "E"]
        );
    }

    #[test]
    fn test_rank_zero_exclusion_when_self_is_not_maximal() {
        let index = index_with_first_row(
            &["Self", "A", "B", "C", "D", "E", "F"],
            &[0.7, 0.9, 0.6, 0.5, 0.4, 0.3, 0.2],
        );

        // The top entry "A" is dropped and the query leaks into the output
        assert_eq!(
            Recommender::new(index, SelfExclusion::RankZero).recommend("Self"),
            vec!["Self", "B", "C", "D", "E"]
        );
    }

    #[test]
    fn test_duplicate_title_uses_first_occurrence_row() {
        let catalog = ["Heat", "A", "B", "Heat"]
            .iter()
            .map(|t| Movie::new(*t))
            .collect();
        let matrix = vec![
            vec![1.0, 0.9, 0.1, 0.2],
            vec![0.9, 1.0, 0.3, 0.4],
            vec![0.1, 0.3, 1.0, 0.8],
            vec![0.2, 0.4, 0.8, 1.0],
        ];
        let index = Arc::new(SimilarityIndex::new(catalog, matrix).unwrap());

        assert_eq!(recommender(index).recommend("Heat"), vec!["A", "Heat", "B"]);
    }

    #[test]
    fn test_nan_scores_rank_last() {
        let index = index_with_first_row(
            &["Self", "A", "B", "C"],
            &[1.0, f32::NAN, 0.2, 0.4],
        );

        assert_eq!(recommender(index).recommend("Self"), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_rank_reports_scores() {
        let index = index_with_first_row(&["Self", "A", "B"], &[1.0, 0.25, 0.75]);

        assert_eq!(
            recommender(index).rank("Self"),
            vec![
                Neighbor { position: 2, score: 0.75 },
                Neighbor { position: 1, score: 0.25 },
            ]
        );
    }

    #[test]
    fn test_self_exclusion_deserializes_from_snake_case() {
        let exclusion: SelfExclusion = serde_json::from_str("\"rank_zero\"").unwrap();
        assert_eq!(exclusion, SelfExclusion::RankZero);
        assert_eq!(SelfExclusion::default(), SelfExclusion::Position);
    }
}
