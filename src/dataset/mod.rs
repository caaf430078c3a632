pub mod index;
pub mod loader;

pub use index::{IndexError, SimilarityIndex};
pub use loader::{load_dataset, DatasetPaths, DuplicateTitlePolicy};
