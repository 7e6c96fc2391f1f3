pub mod analyze;
pub mod calculate_scores;
pub mod changes;
pub mod fetch;
pub mod new_entrants;
pub mod scores;
pub mod volatility;
