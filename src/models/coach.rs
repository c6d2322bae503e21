//! Accuracy bookkeeping across practice modes and the short coaching summary
//! built from it.

use super::mode::Mode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attempts required before a mode's accuracy is considered meaningful.
const MIN_ATTEMPTS: u32 = 3;

/// Lifetime right/total counters for one mode.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PerfStat {
    #[serde(default)]
    pub right: u32,
    #[serde(default)]
    pub total: u32,
}

impl PerfStat {
    pub fn record(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.right += 1;
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.right as f64 / self.total as f64
        }
    }
}

/// Modes with enough attempts to rank, in stable `Mode::ALL` order.
fn qualified(perf: &HashMap<Mode, PerfStat>) -> Vec<(Mode, PerfStat)> {
    Mode::ALL
        .into_iter()
        .filter_map(|m| perf.get(&m).map(|s| (m, *s)))
        .filter(|(_, s)| s.total >= MIN_ATTEMPTS)
        .collect()
}

/// Ranks `candidates` by accuracy; `best` flips the direction. Ties go to
/// the mode with more attempts, then to catalog order.
fn rank(candidates: &[(Mode, PerfStat)], best: bool) -> Option<Mode> {
    let mut chosen: Option<(Mode, PerfStat)> = None;
    for &(mode, stat) in candidates {
        let replace = match chosen {
            None => true,
            Some((_, current)) => {
                let (a, b) = (stat.accuracy(), current.accuracy());
                if a != b {
                    if best { a > b } else { a < b }
                } else {
                    stat.total > current.total
                }
            }
        };
        if replace {
            chosen = Some((mode, stat));
        }
    }
    chosen.map(|(m, _)| m)
}

/// The practiced mode with the lowest accuracy among those with at least
/// 3 attempts; `None` when no mode qualifies.
pub fn weakest_mode(perf: &HashMap<Mode, PerfStat>) -> Option<Mode> {
    rank(&qualified(perf), false)
}

/// The practiced mode with the highest accuracy among those with at least
/// 3 attempts.
pub fn strongest_mode(perf: &HashMap<Mode, PerfStat>) -> Option<Mode> {
    rank(&qualified(perf), true)
}

/// Short coaching summary: best and worst modes by accuracy, plus a tip for
/// the weak one. Falls back to all attempted modes when none has 3 attempts,
/// and to a plain encouragement when nothing was attempted at all.
pub fn coach_summary(perf: &HashMap<Mode, PerfStat>) -> String {
    let attempted: Vec<(Mode, PerfStat)> = Mode::ALL
        .into_iter()
        .filter_map(|m| perf.get(&m).map(|s| (m, *s)))
        .filter(|(_, s)| s.total > 0)
        .collect();
    if attempted.is_empty() {
        return "Lance-toi : réponds à quelques questions et je te dirai où tu brilles !"
            .to_string();
    }

    let pool = {
        let q = qualified(perf);
        if q.is_empty() { attempted } else { q }
    };
    let best = rank(&pool, true).unwrap_or(Mode::Addition);
    let worst = rank(&pool, false).unwrap_or(best);
    let best_stat = perf.get(&best).copied().unwrap_or_default();

    let mut summary = format!(
        "Ton point fort : {} ({:.0}% de réussite).",
        best.label(),
        best_stat.accuracy() * 100.0
    );
    if best != worst {
        let worst_stat = perf.get(&worst).copied().unwrap_or_default();
        summary.push_str(&format!(
            " À travailler : {} ({:.0}%). {}",
            worst.label(),
            worst_stat.accuracy() * 100.0,
            worst.coach_hint()
        ));
    }
    summary
}
