pub mod poster_lookup;
pub mod posters;
pub mod recommendations;
pub mod recommender;
pub mod title_search;

pub use poster_lookup::{PosterService, PLACEHOLDER_POSTER_URL};
pub use recommender::{Neighbor, Recommender, SelfExclusion, RECOMMENDATION_COUNT};
