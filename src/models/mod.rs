pub mod calendar;
pub mod challenge;
pub mod coach;
pub mod difficulty;
pub mod explain;
pub mod factory;
pub mod fraction;
pub mod mode;
pub mod question;

pub use challenge::{Challenge, ChallengeKind, ChallengeProgress, ChallengeStats};
pub use coach::PerfStat;
pub use difficulty::{Difficulty, DifficultyProfile, Grade};
pub use mode::Mode;
pub use question::{Question, Row, make_question};
