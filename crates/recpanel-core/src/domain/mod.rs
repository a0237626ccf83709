pub mod ids;
pub mod recommendation;

pub use ids::{ProductId, RecordId};
pub use recommendation::{Recommendation, RecommendationDraft, RecommendationType, TypeCode};
