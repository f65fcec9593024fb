pub mod alphabeta;
pub mod background;
pub mod eval;
pub mod noise;

pub use alphabeta::{SearchLimits, SearchResult, Searcher};
pub use background::BackgroundSearch;
