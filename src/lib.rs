pub mod app;
pub mod database;
pub mod export;
pub mod models;

pub use models::{
    ChallengeProgress, Difficulty, Grade, Mode, Question, make_question,
};
