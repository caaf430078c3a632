use crate::{
    models::{RecommendationResponse, RecommendedMovie},
    services::{PosterService, Recommender},
};

/// Recommendations for a title, each paired with its poster
///
/// Ranking is done first and independently of poster resolution, so a slow or
/// failing poster provider only ever degrades posters to the placeholder.
pub async fn get_recommendations(
    recommender: &Recommender,
    posters: &PosterService,
    title: &str,
) -> RecommendationResponse {
    let neighbors = recommender.rank(title);
    let titles: Vec<String> = neighbors
        .iter()
        .map(|n| recommender.index().title_at(n.position).to_string())
        .collect();

    let poster_urls = posters.posters_for(&titles).await;

    let recommendations = neighbors
        .iter()
        .zip(titles)
        .zip(poster_urls)
        .map(|((neighbor, title), poster_url)| RecommendedMovie {
            title,
            score: neighbor.score,
            poster_url,
            details: recommender
                .index()
                .movie_at(neighbor.position)
                .map(|movie| movie.fields.clone())
                .unwrap_or_default(),
        })
        .collect::<Vec<_>>();

    tracing::info!(
        query = %title,
        results = recommendations.len(),
        "Recommendations computed"
    );

    RecommendationResponse {
        query: title.to_string(),
        recommendations,
    }
}
