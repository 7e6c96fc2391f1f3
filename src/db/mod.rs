pub mod score;
pub mod store;

pub use score::{compute_all, compute_score, ScoreBreakdown};
pub use store::SerpStore;
