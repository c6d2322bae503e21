//! Grade levels, difficulty tiers and the resolved operand bounds used by the
//! question factory.
//!
//! A profile is `round(grade base × tier factor)` per field, with floors so
//! scaling never produces a trivial or undefined range (a divisor of 1, an
//! empty denominator range, ...).

use serde::{Deserialize, Serialize};

/// French school years, earliest to latest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "cp")]
    Cp,
    #[serde(rename = "ce1")]
    Ce1,
    #[serde(rename = "ce2")]
    Ce2,
    #[serde(rename = "cm1")]
    Cm1,
    #[serde(rename = "cm2")]
    Cm2,
    #[serde(rename = "6e")]
    Sixieme,
    #[serde(rename = "5e")]
    Cinquieme,
    #[serde(rename = "4e")]
    Quatrieme,
    #[serde(rename = "3e")]
    Troisieme,
}

impl Grade {
    pub const ALL: [Grade; 9] = [
        Grade::Cp,
        Grade::Ce1,
        Grade::Ce2,
        Grade::Cm1,
        Grade::Cm2,
        Grade::Sixieme,
        Grade::Cinquieme,
        Grade::Quatrieme,
        Grade::Troisieme,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Grade::Cp => "cp",
            Grade::Ce1 => "ce1",
            Grade::Ce2 => "ce2",
            Grade::Cm1 => "cm1",
            Grade::Cm2 => "cm2",
            Grade::Sixieme => "6e",
            Grade::Cinquieme => "5e",
            Grade::Quatrieme => "4e",
            Grade::Troisieme => "3e",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Cp => "CP",
            Grade::Ce1 => "CE1",
            Grade::Ce2 => "CE2",
            Grade::Cm1 => "CM1",
            Grade::Cm2 => "CM2",
            Grade::Sixieme => "6ème",
            Grade::Cinquieme => "5ème",
            Grade::Quatrieme => "4ème",
            Grade::Troisieme => "3ème",
        }
    }

    /// The four most advanced grades. Explanations for comparison and
    /// equivalence questions switch to cross-multiplication phrasing here;
    /// earlier grades get common-denominator phrasing.
    pub fn is_middle_school(self) -> bool {
        matches!(
            self,
            Grade::Sixieme | Grade::Cinquieme | Grade::Quatrieme | Grade::Troisieme
        )
    }

    /// Resolves a persisted id; unknown ids fall back to the mid-tier grade.
    pub fn from_id(id: &str) -> Grade {
        Grade::ALL
            .into_iter()
            .find(|g| g.id() == id)
            .unwrap_or(Grade::Cm1)
    }

    fn base(self) -> GradeBase {
        match self {
            Grade::Cp => GradeBase::new(10, 10, 3, 3, 2, 4),
            Grade::Ce1 => GradeBase::new(20, 20, 5, 5, 3, 6),
            Grade::Ce2 => GradeBase::new(50, 50, 7, 7, 5, 8),
            Grade::Cm1 => GradeBase::new(100, 100, 9, 9, 7, 10),
            Grade::Cm2 => GradeBase::new(200, 200, 12, 10, 9, 12),
            Grade::Sixieme => GradeBase::new(500, 500, 15, 12, 10, 12),
            Grade::Cinquieme => GradeBase::new(1000, 1000, 20, 15, 12, 15),
            Grade::Quatrieme => GradeBase::new(2000, 2000, 30, 20, 15, 18),
            Grade::Troisieme => GradeBase::new(5000, 5000, 50, 30, 20, 20),
        }
    }
}

/// Raw per-grade operand bounds before tier scaling.
#[derive(Clone, Copy, Debug)]
struct GradeBase {
    add_max: i64,
    sub_max: i64,
    mul_a: i64,
    mul_b: i64,
    div_b: i64,
    frac_den: i64,
}

impl GradeBase {
    const fn new(add_max: i64, sub_max: i64, mul_a: i64, mul_b: i64, div_b: i64, frac_den: i64) -> Self {
        Self { add_max, sub_max, mul_a, mul_b, div_b, frac_den }
    }
}

/// Difficulty tiers chosen by the learner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "facile")]
    Facile,
    #[serde(rename = "moyen")]
    Moyen,
    #[serde(rename = "difficile")]
    Difficile,
}

impl Difficulty {
    pub fn id(self) -> &'static str {
        match self {
            Difficulty::Facile => "facile",
            Difficulty::Moyen => "moyen",
            Difficulty::Difficile => "difficile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Facile => "Facile",
            Difficulty::Moyen => "Moyen",
            Difficulty::Difficile => "Difficile",
        }
    }

    fn factor(self) -> f64 {
        match self {
            Difficulty::Facile => 0.7,
            Difficulty::Moyen => 1.0,
            Difficulty::Difficile => 1.35,
        }
    }

    /// Resolves a persisted id. Unknown tiers are treated as `moyen`, not as
    /// the hardest tier.
    pub fn from_id(id: &str) -> Difficulty {
        match id {
            "facile" => Difficulty::Facile,
            "moyen" => Difficulty::Moyen,
            "difficile" => Difficulty::Difficile,
            _ => Difficulty::Moyen,
        }
    }

    /// Steps one tier up or down, clamped at the ends.
    pub fn step(self, up: bool) -> Difficulty {
        match (self, up) {
            (Difficulty::Facile, true) => Difficulty::Moyen,
            (Difficulty::Moyen, true) => Difficulty::Difficile,
            (Difficulty::Difficile, true) => Difficulty::Difficile,
            (Difficulty::Facile, false) => Difficulty::Facile,
            (Difficulty::Moyen, false) => Difficulty::Facile,
            (Difficulty::Difficile, false) => Difficulty::Moyen,
        }
    }
}

/// Resolved operand bounds for one (grade, tier) pair.
#[derive(Clone, Copy, Debug)]
pub struct DifficultyProfile {
    pub add_max: i64,
    pub sub_max: i64,
    pub mul_a: i64,
    pub mul_b: i64,
    pub div_b: i64,
    pub frac_den: i64,
}

fn scaled(base: i64, factor: f64, floor: i64) -> i64 {
    ((base as f64 * factor).round() as i64).max(floor)
}

impl DifficultyProfile {
    pub fn resolve(grade: Grade, difficulty: Difficulty) -> Self {
        let base = grade.base();
        let f = difficulty.factor();
        Self {
            add_max: scaled(base.add_max, f, 5),
            sub_max: scaled(base.sub_max, f, 5),
            mul_a: scaled(base.mul_a, f, 3),
            mul_b: scaled(base.mul_b, f, 2),
            div_b: scaled(base.div_b, f, 2),
            frac_den: scaled(base.frac_den, f, 3),
        }
    }
}
