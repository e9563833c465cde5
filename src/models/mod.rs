pub mod corpus;
pub mod difficulty;
pub mod game;
pub mod quiz;

pub use corpus::{CorpusIds, IdentifierCorpus};
pub use difficulty::Difficulty;
pub use game::{GameRecord, NameVariant, RatingKey, Ratings, Statistics};
pub use quiz::QuizPayload;
