//! Practice session state: the signature history, per-mode performance,
//! challenge progress and the reward wallet, with persistence behind each
//! mutation. The engine under `models` stays stateless; everything mutable
//! lives here and belongs to the caller.

use crate::database::db::{self, Wallet};
use crate::models::{
    ChallengeProgress, Difficulty, Grade, Mode, PerfStat, Question, coach, make_question,
};
use chrono::Utc;
use rand::rngs::ThreadRng;
use rusqlite::Connection;
use std::collections::{HashMap, HashSet};

/// Outcome of one submitted answer.
pub struct AnswerFeedback {
    pub correct: bool,
    pub explanation: String,
}

/// One learner's practice session.
pub struct TrainerSession {
    conn: Connection,
    pub grade: Grade,
    pub difficulty: Difficulty,
    history: HashSet<String>,
    pub current: Option<Question>,
    pub perf: HashMap<Mode, PerfStat>,
    pub progress: ChallengeProgress,
    pub wallet: Wallet,
    rng: ThreadRng,
}

impl TrainerSession {
    /// Builds a session from persisted state, rolling challenge progress
    /// over to the current day/week.
    pub fn new(conn: Connection, grade: Grade, difficulty: Difficulty) -> Self {
        let progress = ChallengeProgress::current(db::load_progress(&conn), Utc::now());
        let perf = db::load_perf(&conn);
        let wallet = db::load_wallet(&conn);
        Self {
            conn,
            grade,
            difficulty,
            history: HashSet::new(),
            current: None,
            perf,
            progress,
            wallet,
            rng: rand::thread_rng(),
        }
    }

    /// Re-checks the calendar; called when a session spans midnight.
    pub fn refresh(&mut self) {
        self.progress = ChallengeProgress::current(Some(self.progress.clone()), Utc::now());
    }

    /// Generates the next question for `mode`, avoiding recent repeats, and
    /// records its signature in the session history.
    pub fn next_question(&mut self, mode: Mode) -> &Question {
        let question = make_question(mode, self.grade, self.difficulty, &self.history, &mut self.rng);
        self.history.insert(question.signature());
        self.current.insert(question)
    }

    /// Submits an answer for the current question. Updates performance and
    /// both challenge halves, persists them, and returns the feedback
    /// sentence. `None` when no question is pending.
    pub fn submit_answer(&mut self, picked: &str) -> Option<AnswerFeedback> {
        let question = self.current.take()?;
        let correct = question.is_correct(picked);

        self.perf.entry(question.mode).or_default().record(correct);
        self.progress.apply_answer(question.mode, correct);
        db::save_perf(&self.conn, &self.perf);
        db::save_progress(&self.conn, &self.progress);

        Some(AnswerFeedback {
            correct,
            explanation: question.explain(picked),
        })
    }

    /// Claims the daily challenge reward into the wallet, if completed.
    pub fn claim_daily(&mut self) -> Option<(u32, u32)> {
        let reward = self.progress.claim_daily();
        self.credit(reward);
        reward
    }

    /// Claims the weekly challenge reward into the wallet, if completed.
    pub fn claim_weekly(&mut self) -> Option<(u32, u32)> {
        let reward = self.progress.claim_weekly();
        self.credit(reward);
        reward
    }

    fn credit(&mut self, reward: Option<(u32, u32)>) {
        if let Some((coins, xp)) = reward {
            self.wallet.coins += coins;
            self.wallet.xp += xp;
            db::save_wallet(&self.conn, &self.wallet);
            db::save_progress(&self.conn, &self.progress);
        }
    }

    /// Steps the session one difficulty tier up, clamped at `difficile`.
    pub fn harder(&mut self) {
        self.difficulty = self.difficulty.step(true);
    }

    /// Steps the session one difficulty tier down, clamped at `facile`.
    pub fn easier(&mut self) {
        self.difficulty = self.difficulty.step(false);
    }

    pub fn coach_summary(&self) -> String {
        coach::coach_summary(&self.perf)
    }

    pub fn weakest_mode(&self) -> Option<Mode> {
        coach::weakest_mode(&self.perf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> TrainerSession {
        let conn = db::open_in_memory().unwrap();
        TrainerSession::new(conn, Grade::Ce2, Difficulty::Moyen)
    }

    #[test]
    fn test_next_question_records_signature() {
        let mut s = session();
        let sig = s.next_question(Mode::Addition).signature();
        assert!(s.history.contains(&sig));
    }

    #[test]
    fn test_submit_without_question_is_none() {
        let mut s = session();
        assert!(s.submit_answer("42").is_none());
    }

    #[test]
    fn test_submit_correct_answer_updates_stats() {
        let mut s = session();
        let correct = s.next_question(Mode::Multiplication).correct.clone();
        let feedback = s.submit_answer(&correct).unwrap();
        assert!(feedback.correct);
        assert_eq!(s.perf.get(&Mode::Multiplication).unwrap().right, 1);
        assert_eq!(s.progress.daily_stats.right(Mode::Multiplication), 1);
        assert_eq!(s.progress.weekly_stats.run(Mode::Multiplication), 1);
        // Question consumed
        assert!(s.current.is_none());
    }

    #[test]
    fn test_submit_wrong_answer_resets_run() {
        let mut s = session();
        let correct = s.next_question(Mode::Division).correct.clone();
        s.submit_answer(&correct).unwrap();
        s.next_question(Mode::Division);
        let feedback = s.submit_answer("not-a-number").unwrap();
        assert!(!feedback.correct);
        assert_eq!(s.progress.daily_stats.run(Mode::Division), 0);
        assert_eq!(s.progress.daily_stats.best_run(Mode::Division), 1);
    }

    #[test]
    fn test_stats_survive_reload() {
        let conn = db::open_in_memory().unwrap();
        let mut s = TrainerSession::new(conn, Grade::Cm1, Difficulty::Facile);
        let correct = s.next_question(Mode::Addition).correct.clone();
        s.submit_answer(&correct).unwrap();
        let conn = s.conn;

        let reloaded = TrainerSession::new(conn, Grade::Cm1, Difficulty::Facile);
        assert_eq!(reloaded.perf.get(&Mode::Addition).unwrap().total, 1);
        assert_eq!(reloaded.progress.daily_stats.right(Mode::Addition), 1);
    }

    #[test]
    fn test_difficulty_stepping_clamps() {
        let mut s = session();
        s.harder();
        assert_eq!(s.difficulty, Difficulty::Difficile);
        s.harder();
        assert_eq!(s.difficulty, Difficulty::Difficile);
        s.easier();
        s.easier();
        s.easier();
        assert_eq!(s.difficulty, Difficulty::Facile);
    }

    #[test]
    fn test_claim_requires_completed_challenge() {
        let mut s = session();
        assert_eq!(s.claim_daily(), None);
        assert_eq!(s.wallet.coins, 0);
    }
}
