//! Practice modes: the nine question families the trainer can serve.

use serde::{Deserialize, Serialize};

/// One question family. Stored and persisted by its stable string id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "add")]
    Addition,
    #[serde(rename = "sub")]
    Subtraction,
    #[serde(rename = "mul")]
    Multiplication,
    #[serde(rename = "div")]
    Division,
    #[serde(rename = "cmpfrac")]
    CompareFractions,
    #[serde(rename = "eqfrac")]
    EquivalentFractions,
    #[serde(rename = "fracop")]
    FractionOperation,
    #[serde(rename = "fracsimp")]
    SimplifyFraction,
    #[serde(rename = "fracvsnum")]
    FractionVsNumber,
}

impl Mode {
    pub const ALL: [Mode; 9] = [
        Mode::Addition,
        Mode::Subtraction,
        Mode::Multiplication,
        Mode::Division,
        Mode::CompareFractions,
        Mode::EquivalentFractions,
        Mode::FractionOperation,
        Mode::SimplifyFraction,
        Mode::FractionVsNumber,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Mode::Addition => "add",
            Mode::Subtraction => "sub",
            Mode::Multiplication => "mul",
            Mode::Division => "div",
            Mode::CompareFractions => "cmpfrac",
            Mode::EquivalentFractions => "eqfrac",
            Mode::FractionOperation => "fracop",
            Mode::SimplifyFraction => "fracsimp",
            Mode::FractionVsNumber => "fracvsnum",
        }
    }

    /// Display label shown in menus.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Addition => "Additions",
            Mode::Subtraction => "Soustractions",
            Mode::Multiplication => "Multiplications",
            Mode::Division => "Divisions",
            Mode::CompareFractions => "Comparer des fractions",
            Mode::EquivalentFractions => "Fractions équivalentes",
            Mode::FractionOperation => "Additionner et soustraire des fractions",
            Mode::SimplifyFraction => "Simplifier des fractions",
            Mode::FractionVsNumber => "Fractions et nombres",
        }
    }

    /// One-line coaching tip used when this mode is a learner's weak spot.
    pub fn coach_hint(self) -> &'static str {
        match self {
            Mode::Addition => "Pense à compter de 10 en 10 puis à ajuster les unités.",
            Mode::Subtraction => "Vérifie ta réponse en refaisant l'addition dans l'autre sens.",
            Mode::Multiplication => "Revois tes tables : deux minutes par jour suffisent.",
            Mode::Division => "Cherche combien de fois le diviseur rentre dans le nombre.",
            Mode::CompareFractions => "Mets les fractions au même dénominateur avant de comparer.",
            Mode::EquivalentFractions => {
                "Deux fractions sont équivalentes si on multiplie le haut et le bas par le même nombre."
            }
            Mode::FractionOperation => {
                "On ne peut additionner des fractions qu'avec le même dénominateur."
            }
            Mode::SimplifyFraction => {
                "Cherche le plus grand nombre qui divise le haut et le bas à la fois."
            }
            Mode::FractionVsNumber => "Transforme le nombre en fraction pour comparer facilement.",
        }
    }

    /// Resolves a persisted id; unknown ids fall back to addition.
    pub fn from_id(id: &str) -> Mode {
        Mode::ALL
            .into_iter()
            .find(|m| m.id() == id)
            .unwrap_or(Mode::Addition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_id(mode.id()), mode);
        }
    }

    #[test]
    fn test_unknown_id_falls_back_to_addition() {
        assert_eq!(Mode::from_id("telepathy"), Mode::Addition);
        assert_eq!(Mode::from_id(""), Mode::Addition);
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&Mode::CompareFractions).unwrap();
        assert_eq!(json, "\"cmpfrac\"");
        let back: Mode = serde_json::from_str("\"fracsimp\"").unwrap();
        assert_eq!(back, Mode::SimplifyFraction);
    }
}
