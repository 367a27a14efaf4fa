pub mod metadata;
pub mod providers;
pub mod recommendations;

pub use metadata::MetadataEnricher;
pub use providers::{MetadataProvider, TmdbProvider};
pub use recommendations::{Recommender, DEFAULT_TOP_N};
