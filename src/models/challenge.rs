//! Time-boxed challenges: fixed daily/weekly catalogs, deterministic
//! assignment from the calendar key, and per-period streak/count statistics.

use super::calendar::{day_key, hash_key, week_key};
use super::mode::Mode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a challenge measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChallengeKind {
    /// Sum of correct answers across the challenge's modes.
    ModeRightCount,
    /// Best streak reached in any of the challenge's modes.
    ModeBestStreak,
    /// Best streak reached in any tracked mode, whatever the challenge lists.
    AnyBestStreak,
}

/// Immutable catalog entry.
pub struct Challenge {
    pub id: &'static str,
    pub title: &'static str,
    pub desc: &'static str,
    pub kind: ChallengeKind,
    pub modes: &'static [Mode],
    pub target: u32,
    pub reward_coins: u32,
    pub reward_xp: u32,
    pub icon: &'static str,
}

pub const DAILY_POOL: &[Challenge] = &[
    Challenge {
        id: "daily_add_10",
        title: "Marathon des additions",
        desc: "Réussis 10 additions aujourd'hui",
        kind: ChallengeKind::ModeRightCount,
        modes: &[Mode::Addition],
        target: 10,
        reward_coins: 20,
        reward_xp: 30,
        icon: "➕",
    },
    Challenge {
        id: "daily_sub_10",
        title: "As de la soustraction",
        desc: "Réussis 10 soustractions aujourd'hui",
        kind: ChallengeKind::ModeRightCount,
        modes: &[Mode::Subtraction],
        target: 10,
        reward_coins: 20,
        reward_xp: 30,
        icon: "➖",
    },
    Challenge {
        id: "daily_mul_streak_5",
        title: "Tables en feu",
        desc: "Enchaîne 5 multiplications sans erreur",
        kind: ChallengeKind::ModeBestStreak,
        modes: &[Mode::Multiplication],
        target: 5,
        reward_coins: 25,
        reward_xp: 35,
        icon: "✖️",
    },
    Challenge {
        id: "daily_frac_8",
        title: "Chasseur de fractions",
        desc: "Réussis 8 questions de fractions aujourd'hui",
        kind: ChallengeKind::ModeRightCount,
        modes: &[
            Mode::CompareFractions,
            Mode::EquivalentFractions,
            Mode::FractionOperation,
            Mode::SimplifyFraction,
            Mode::FractionVsNumber,
        ],
        target: 8,
        reward_coins: 30,
        reward_xp: 40,
        icon: "🍰",
    },
    Challenge {
        id: "daily_any_streak_7",
        title: "Sans faute",
        desc: "Enchaîne 7 bonnes réponses d'affilée",
        kind: ChallengeKind::AnyBestStreak,
        modes: &[],
        target: 7,
        reward_coins: 30,
        reward_xp: 40,
        icon: "🔥",
    },
    Challenge {
        id: "daily_div_6",
        title: "Partage parfait",
        desc: "Réussis 6 divisions aujourd'hui",
        kind: ChallengeKind::ModeRightCount,
        modes: &[Mode::Division],
        target: 6,
        reward_coins: 25,
        reward_xp: 35,
        icon: "➗",
    },
];

pub const WEEKLY_POOL: &[Challenge] = &[
    Challenge {
        id: "weekly_add_50",
        title: "Semaine des additions",
        desc: "Réussis 50 additions cette semaine",
        kind: ChallengeKind::ModeRightCount,
        modes: &[Mode::Addition],
        target: 50,
        reward_coins: 80,
        reward_xp: 120,
        icon: "🏆",
    },
    Challenge {
        id: "weekly_calc_100",
        title: "Grand calculateur",
        desc: "Réussis 100 calculs cette semaine",
        kind: ChallengeKind::ModeRightCount,
        modes: &[Mode::Addition, Mode::Subtraction, Mode::Multiplication, Mode::Division],
        target: 100,
        reward_coins: 120,
        reward_xp: 180,
        icon: "🧮",
    },
    Challenge {
        id: "weekly_frac_40",
        title: "Maître des fractions",
        desc: "Réussis 40 questions de fractions cette semaine",
        kind: ChallengeKind::ModeRightCount,
        modes: &[
            Mode::CompareFractions,
            Mode::EquivalentFractions,
            Mode::FractionOperation,
            Mode::SimplifyFraction,
            Mode::FractionVsNumber,
        ],
        target: 40,
        reward_coins: 120,
        reward_xp: 180,
        icon: "🥧",
    },
    Challenge {
        id: "weekly_any_streak_15",
        title: "Série de champion",
        desc: "Enchaîne 15 bonnes réponses d'affilée cette semaine",
        kind: ChallengeKind::AnyBestStreak,
        modes: &[],
        target: 15,
        reward_coins: 100,
        reward_xp: 150,
        icon: "⚡",
    },
    Challenge {
        id: "weekly_mul_streak_10",
        title: "Tables d'or",
        desc: "Enchaîne 10 multiplications sans erreur cette semaine",
        kind: ChallengeKind::ModeBestStreak,
        modes: &[Mode::Multiplication],
        target: 10,
        reward_coins: 90,
        reward_xp: 140,
        icon: "🥇",
    },
];

/// Picks a challenge id for a calendar key: `hash(key) mod pool size`.
/// Identical keys always pick the same id for a given pool ordering.
pub fn pick(pool: &'static [Challenge], key: &str) -> Option<&'static str> {
    if pool.is_empty() {
        return None;
    }
    Some(pool[hash_key(key) as usize % pool.len()].id)
}

/// Looks up a challenge by id; a stale id is re-derived from `fallback_key`,
/// and an unresolvable pick lands on the catalog's first entry. Returns
/// `None` only for an empty pool.
pub fn resolve(
    pool: &'static [Challenge],
    id: &str,
    fallback_key: &str,
) -> Option<&'static Challenge> {
    pool.iter()
        .find(|c| c.id == id)
        .or_else(|| {
            pick(pool, fallback_key).and_then(|picked| pool.iter().find(|c| c.id == picked))
        })
        .or_else(|| pool.first())
}

/// Per-period answer statistics, keyed by mode id. Missing entries read as 0
/// so a malformed persisted blob degrades to zeroed counters.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChallengeStats {
    #[serde(default)]
    pub mode_right: HashMap<String, u32>,
    #[serde(default)]
    pub mode_run: HashMap<String, u32>,
    #[serde(default)]
    pub mode_best_run: HashMap<String, u32>,
}

impl ChallengeStats {
    pub fn right(&self, mode: Mode) -> u32 {
        self.mode_right.get(mode.id()).copied().unwrap_or(0)
    }

    pub fn run(&self, mode: Mode) -> u32 {
        self.mode_run.get(mode.id()).copied().unwrap_or(0)
    }

    pub fn best_run(&self, mode: Mode) -> u32 {
        self.mode_best_run.get(mode.id()).copied().unwrap_or(0)
    }

    /// Records one answered question: correct answers extend the streak,
    /// wrong ones reset it. The best run never decreases.
    pub fn apply_answer(&mut self, mode: Mode, is_correct: bool) {
        let id = mode.id().to_string();
        if is_correct {
            *self.mode_right.entry(id.clone()).or_insert(0) += 1;
            *self.mode_run.entry(id.clone()).or_insert(0) += 1;
        } else {
            self.mode_run.insert(id.clone(), 0);
        }
        let run = self.mode_run.get(&id).copied().unwrap_or(0);
        let best = self.mode_best_run.entry(id).or_insert(0);
        *best = (*best).max(run);
    }
}

/// Current progress value of `challenge` against `stats`.
pub fn progress_value(challenge: &Challenge, stats: &ChallengeStats) -> u32 {
    match challenge.kind {
        ChallengeKind::ModeRightCount => challenge.modes.iter().map(|m| stats.right(*m)).sum(),
        ChallengeKind::ModeBestStreak => challenge
            .modes
            .iter()
            .map(|m| stats.best_run(*m))
            .max()
            .unwrap_or(0),
        ChallengeKind::AnyBestStreak => stats.mode_best_run.values().copied().max().unwrap_or(0),
    }
}

/// Daily and weekly challenge state for one learner.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChallengeProgress {
    #[serde(default)]
    pub day_key: String,
    #[serde(default)]
    pub week_key: String,
    #[serde(default)]
    pub daily_id: String,
    #[serde(default)]
    pub weekly_id: String,
    #[serde(default)]
    pub daily_stats: ChallengeStats,
    #[serde(default)]
    pub weekly_stats: ChallengeStats,
    #[serde(default)]
    pub claimed_daily: bool,
    #[serde(default)]
    pub claimed_weekly: bool,
}

impl ChallengeProgress {
    /// Brings persisted progress up to `now`, rolling the daily and weekly
    /// halves independently: a half whose calendar key changed gets a fresh
    /// challenge id, zeroed stats and a cleared claim flag, the other half is
    /// left untouched. `None` builds a fresh progress for both halves.
    pub fn current(prev: Option<ChallengeProgress>, now: DateTime<Utc>) -> ChallengeProgress {
        let today = day_key(now);
        let this_week = week_key(now);
        let mut progress = prev.unwrap_or_default();

        if progress.day_key != today {
            progress.day_key = today.clone();
            progress.daily_id = pick(DAILY_POOL, &today).unwrap_or_default().to_string();
            progress.daily_stats = ChallengeStats::default();
            progress.claimed_daily = false;
        }
        if progress.week_key != this_week {
            progress.week_key = this_week.clone();
            progress.weekly_id = pick(WEEKLY_POOL, &this_week).unwrap_or_default().to_string();
            progress.weekly_stats = ChallengeStats::default();
            progress.claimed_weekly = false;
        }
        progress
    }

    pub fn daily_challenge(&self) -> Option<&'static Challenge> {
        resolve(DAILY_POOL, &self.daily_id, &self.day_key)
    }

    pub fn weekly_challenge(&self) -> Option<&'static Challenge> {
        resolve(WEEKLY_POOL, &self.weekly_id, &self.week_key)
    }

    /// Records one answered question in both period halves.
    pub fn apply_answer(&mut self, mode: Mode, is_correct: bool) {
        self.daily_stats.apply_answer(mode, is_correct);
        self.weekly_stats.apply_answer(mode, is_correct);
    }

    pub fn daily_done(&self) -> bool {
        self.daily_challenge()
            .map(|c| progress_value(c, &self.daily_stats) >= c.target)
            .unwrap_or(false)
    }

    pub fn weekly_done(&self) -> bool {
        self.weekly_challenge()
            .map(|c| progress_value(c, &self.weekly_stats) >= c.target)
            .unwrap_or(false)
    }

    /// Claims the daily reward once the target is reached. Returns the
    /// (coins, xp) reward on the first successful claim, `None` afterwards
    /// or while the challenge is unfinished. Claim flags are one-way.
    pub fn claim_daily(&mut self) -> Option<(u32, u32)> {
        if self.claimed_daily || !self.daily_done() {
            return None;
        }
        self.claimed_daily = true;
        self.daily_challenge().map(|c| (c.reward_coins, c.reward_xp))
    }

    pub fn claim_weekly(&mut self) -> Option<(u32, u32)> {
        if self.claimed_weekly || !self.weekly_done() {
            return None;
        }
        self.claimed_weekly = true;
        self.weekly_challenge().map(|c| (c.reward_coins, c.reward_xp))
    }
}
