//! Request-scoped orchestration behind each endpoint. Every pipeline runs
//! its outbound calls sequentially and holds no state between requests.

pub mod assistant;
pub mod fallback;
pub mod featured;
pub mod search;

pub use assistant::answer_question;
pub use fallback::FallbackPipeline;
pub use featured::featured_recipes;
pub use search::search_recipes;
