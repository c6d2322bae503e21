//! Question model: the kind-specific operand row, the rendered prompt and
//! choice set, and the structural signature used to avoid repeats.

use super::{Difficulty, Grade, Mode, explain, factory};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Kind-specific operands of one question.
///
/// `FracCmp` and `FracEq` always store operands in lowest terms; `FracOp` and
/// `FracSimp` may store unreduced operands but their *answer* is reduced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Row {
    Op { a: i64, op: char, b: i64 },
    FracCmp { a_n: i64, a_d: i64, b_n: i64, b_d: i64 },
    FracEq { a_n: i64, a_d: i64, b_n: i64, b_d: i64 },
    FracOp { a_n: i64, a_d: i64, b_n: i64, b_d: i64, op: char },
    FracSimp { n: i64, d: i64 },
    FracVsNum { a_n: i64, a_d: i64, num_label: String },
}

impl Row {
    /// Structural fragment of the question signature: kind tag plus the
    /// defining operands.
    fn signature_part(&self) -> String {
        match self {
            Row::Op { a, op, b } => format!("op:{a}{op}{b}"),
            Row::FracCmp { a_n, a_d, b_n, b_d } => format!("cmp:{a_n}/{a_d}:{b_n}/{b_d}"),
            Row::FracEq { a_n, a_d, b_n, b_d } => format!("eq:{a_n}/{a_d}:{b_n}/{b_d}"),
            Row::FracOp { a_n, a_d, b_n, b_d, op } => {
                format!("fop:{a_n}/{a_d}{op}{b_n}/{b_d}")
            }
            Row::FracSimp { n, d } => format!("simp:{n}/{d}"),
            Row::FracVsNum { a_n, a_d, num_label } => format!("vs:{a_n}/{a_d}:{num_label}"),
        }
    }
}

/// One generated practice question.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    pub mode: Mode,
    pub grade: Grade,
    pub difficulty: Difficulty,
    pub prompt: String,
    pub row: Row,
    pub correct: String,
    pub choices: Vec<String>,
}

impl Question {
    pub fn is_correct(&self, picked: &str) -> bool {
        picked == self.correct
    }

    /// Success or corrective sentence for the picked answer.
    pub fn explain(&self, picked: &str) -> String {
        explain::explanation(self, picked)
    }

    /// Three hints of increasing specificity; the last one states the answer.
    pub fn hints(&self) -> Vec<String> {
        explain::hints(self)
    }

    /// Three-step worked method; the last step states the result.
    pub fn method_steps(&self) -> Vec<String> {
        explain::method_steps(self)
    }

    /// Structural fingerprint used for session-level deduplication.
    pub fn signature(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            self.mode.id(),
            self.grade.id(),
            self.difficulty.id(),
            self.row.signature_part(),
            self.correct
        )
    }
}

/// Number of generation attempts before a repeat is accepted.
const DEDUP_ATTEMPTS: usize = 20;

/// Generates a question whose signature is not in `history`.
///
/// The caller owns the history set and is responsible for inserting the
/// returned question's signature into it. After 20 colliding candidates the
/// last one is returned anyway; a repeat is a degraded outcome, not an error.
pub fn make_question<R: Rng>(
    mode: Mode,
    grade: Grade,
    difficulty: Difficulty,
    history: &HashSet<String>,
    rng: &mut R,
) -> Question {
    let mut candidate = factory::generate(mode, grade, difficulty, rng);
    for _ in 1..DEDUP_ATTEMPTS {
        if !history.contains(&candidate.signature()) {
            return candidate;
        }
        candidate = factory::generate(mode, grade, difficulty, rng);
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_signature_depends_on_operands() {
        let q1 = Question {
            mode: Mode::Addition,
            grade: Grade::Ce1,
            difficulty: Difficulty::Moyen,
            prompt: String::new(),
            row: Row::Op { a: 3, op: '+', b: 4 },
            correct: "7".to_string(),
            choices: vec![],
        };
        let mut q2 = q1.clone();
        q2.row = Row::Op { a: 4, op: '+', b: 3 };
        assert_ne!(q1.signature(), q2.signature());
        assert_eq!(q1.signature(), q1.clone().signature());
    }

    #[test]
    fn test_make_question_avoids_recent_signatures() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut history = HashSet::new();
        // Fill history with a few generated questions, then demand fresh ones.
        for _ in 0..5 {
            let q = make_question(Mode::Addition, Grade::Cp, Difficulty::Facile, &history, &mut rng);
            history.insert(q.signature());
        }
        for _ in 0..10 {
            let q = make_question(Mode::Addition, Grade::Cp, Difficulty::Facile, &history, &mut rng);
            // CP facile has a small operand space but far more than 15 pairs,
            // so 20 attempts find a fresh question.
            assert!(!history.contains(&q.signature()));
            history.insert(q.signature());
        }
    }

    #[test]
    fn test_make_question_degrades_to_repeat_when_space_exhausted() {
        // A history that contains every possible signature forces the
        // degraded path: the last candidate is returned, not a panic.
        let mut rng = StdRng::seed_from_u64(1);
        let mut history = HashSet::new();
        for _ in 0..5000 {
            let q = factory::generate(Mode::Division, Grade::Cp, Difficulty::Facile, &mut rng);
            history.insert(q.signature());
        }
        let q = make_question(Mode::Division, Grade::Cp, Difficulty::Facile, &history, &mut rng);
        assert!(history.contains(&q.signature()));
    }
}
