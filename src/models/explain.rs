//! Grade-aware explanations: a feedback sentence for the picked answer, a
//! three-hint ladder and a three-step worked method for every question kind.
//!
//! Comparison and equivalence questions branch on the grade band: middle
//! school grades (6e..3e) get cross-multiplication phrasing, earlier grades
//! common-denominator phrasing. The branch never looks at the difficulty tier.

use super::Question;
use super::factory::num_label_as_fraction;
use super::fraction::{cmp_fractions, lcm, simplify};
use super::question::Row;
use std::cmp::Ordering;

fn op_verb(op: char) -> &'static str {
    match op {
        '+' => "additionne",
        '-' => "soustrais",
        '×' => "multiplie",
        _ => "divise",
    }
}

/// Feedback sentence for the learner's pick: praise on the correct answer,
/// a corrective sentence naming the operands otherwise.
pub fn explanation(q: &Question, picked: &str) -> String {
    let good = picked == q.correct;
    match &q.row {
        Row::Op { a, op, b } => {
            if good {
                format!("Bravo ! {a} {op} {b} = {}.", q.correct)
            } else if *op == '÷' {
                format!(
                    "Pas tout à fait. {a} ÷ {b} = {}, car {b} × {} = {a}.",
                    q.correct, q.correct
                )
            } else {
                format!(
                    "Pas tout à fait. Si on {} {b} et {a}, on trouve {}.",
                    op_verb(*op),
                    q.correct
                )
            }
        }
        Row::FracCmp { a_n, a_d, b_n, b_d } => {
            let strategy = if q.grade.is_middle_school() {
                format!(
                    "en croisant : {a_n}×{b_d} = {} et {b_n}×{a_d} = {}",
                    a_n * b_d,
                    b_n * a_d
                )
            } else {
                let common = lcm(*a_d, *b_d);
                format!(
                    "au dénominateur {common} : {}/{common} et {}/{common}",
                    a_n * (common / a_d),
                    b_n * (common / b_d)
                )
            };
            if good {
                format!("Bravo ! On voit {strategy}, donc {a_n}/{a_d} {} {b_n}/{b_d}.", q.correct)
            } else {
                format!(
                    "Pas tout à fait. En comparant {strategy}, on trouve {a_n}/{a_d} {} {b_n}/{b_d}.",
                    q.correct
                )
            }
        }
        Row::FracEq { a_n, a_d, b_n, b_d } => {
            let equivalent = cmp_fractions(*a_n, *a_d, *b_n, *b_d) == Ordering::Equal;
            let strategy = if q.grade.is_middle_school() {
                format!(
                    "{a_n}×{b_d} = {} et {b_n}×{a_d} = {}",
                    a_n * b_d,
                    b_n * a_d
                )
            } else {
                let (r_n, r_d) = simplify(*b_n, *b_d);
                format!("{b_n}/{b_d} simplifiée donne {r_n}/{r_d}")
            };
            let verdict = if equivalent {
                "les fractions sont équivalentes"
            } else {
                "les fractions ne sont pas équivalentes"
            };
            if good {
                format!("Bravo ! {strategy}, donc {verdict}.")
            } else {
                format!("Pas tout à fait. {strategy}, donc {verdict}.")
            }
        }
        Row::FracOp { a_n, a_d, b_n, b_d, op } => {
            let common = lcm(*a_d, *b_d);
            if good {
                format!(
                    "Bravo ! Avec le dénominateur commun {common}, {a_n}/{a_d} {op} {b_n}/{b_d} = {}.",
                    q.correct
                )
            } else {
                format!(
                    "Pas tout à fait. Il faut d'abord mettre {a_n}/{a_d} et {b_n}/{b_d} au dénominateur {common}, puis calculer : on trouve {}.",
                    q.correct
                )
            }
        }
        Row::FracSimp { n, d } => {
            let g = super::fraction::gcd(*n, *d);
            if good {
                format!("Bravo ! On divise {n} et {d} par {g} et on obtient {}.", q.correct)
            } else {
                format!(
                    "Pas tout à fait. Le plus grand diviseur commun de {n} et {d} est {g} : {n}/{d} = {}.",
                    q.correct
                )
            }
        }
        Row::FracVsNum { a_n, a_d, num_label } => {
            let (n_n, n_d) = num_label_as_fraction(num_label);
            let strategy = if q.grade.is_middle_school() {
                format!(
                    "en croisant : {a_n}×{n_d} = {} et {n_n}×{a_d} = {}",
                    a_n * n_d,
                    n_n * a_d
                )
            } else {
                format!("en écrivant {num_label} sous forme de fraction ({n_n}/{n_d})")
            };
            if good {
                format!("Bravo ! {strategy}, donc {a_n}/{a_d} {} {num_label}.", q.correct)
            } else {
                format!(
                    "Pas tout à fait. En comparant {strategy}, on trouve {a_n}/{a_d} {} {num_label}.",
                    q.correct
                )
            }
        }
    }
}

/// Three hints of increasing specificity. The last hint states the answer.
pub fn hints(q: &Question) -> Vec<String> {
    let final_hint = format!("La réponse est {}.", q.correct);
    match &q.row {
        Row::Op { a, op, b } => {
            let first = match op {
                '+' => format!("Pars de {a} et avance de {b}."),
                '-' => format!("Pars de {a} et recule de {b}."),
                '×' => format!("Pense à la table de {b}."),
                _ => format!("Cherche combien de fois {b} rentre dans {a}."),
            };
            let second = match op {
                '+' | '-' => format!("Décompose {b} en dizaines et unités pour aller plus vite."),
                '×' => format!("{a} × {b}, c'est {b} paquets de {a}."),
                _ => format!("Essaie {b} × 2, {b} × 3, ... jusqu'à atteindre {a}."),
            };
            vec![first, second, final_hint]
        }
        Row::FracCmp { a_n, a_d, b_n, b_d } => {
            if q.grade.is_middle_school() {
                vec![
                    "Compare les produits en croix.".to_string(),
                    format!("Calcule {a_n}×{b_d} et {b_n}×{a_d}, puis compare-les."),
                    final_hint,
                ]
            } else {
                let common = lcm(*a_d, *b_d);
                vec![
                    "Mets les deux fractions au même dénominateur.".to_string(),
                    format!("Le dénominateur commun est {common} : compare les numérateurs."),
                    final_hint,
                ]
            }
        }
        Row::FracEq { a_n, a_d, b_n, b_d } => {
            if q.grade.is_middle_school() {
                vec![
                    "Deux fractions sont équivalentes si les produits en croix sont égaux.".to_string(),
                    format!("Compare {a_n}×{b_d} avec {b_n}×{a_d}."),
                    final_hint,
                ]
            } else {
                vec![
                    format!("Simplifie {b_n}/{b_d} au maximum."),
                    format!("Compare le résultat avec {a_n}/{a_d}."),
                    final_hint,
                ]
            }
        }
        Row::FracOp { a_d, b_d, .. } => {
            let common = lcm(*a_d, *b_d);
            vec![
                "On ne peut pas additionner des fractions de dénominateurs différents.".to_string(),
                format!("Mets les deux fractions au dénominateur {common}, puis n'oublie pas de simplifier."),
                final_hint,
            ]
        }
        Row::FracSimp { n, d } => {
            let g = super::fraction::gcd(*n, *d);
            vec![
                format!("Cherche un nombre qui divise à la fois {n} et {d}."),
                format!("Le plus grand diviseur commun est {g}."),
                final_hint,
            ]
        }
        Row::FracVsNum { num_label, .. } => {
            let (n_n, n_d) = num_label_as_fraction(num_label);
            let first = if q.grade.is_middle_school() {
                format!("Écris {num_label} comme {n_n}/{n_d} et compare en croix.")
            } else {
                format!("Écris {num_label} sous forme de fraction : {n_n}/{n_d}.")
            };
            vec![
                first,
                "Compare ensuite les deux fractions comme d'habitude.".to_string(),
                final_hint,
            ]
        }
    }
}

/// Three-step worked method. The last step states the result.
pub fn method_steps(q: &Question) -> Vec<String> {
    let conclusion = format!("Résultat : {}.", q.correct);
    match &q.row {
        Row::Op { a, op, b } => match op {
            '+' => vec![
                format!("On part de {a}."),
                format!("On ajoute {b}."),
                format!("{a} + {b} = {}.", q.correct),
            ],
            '-' => vec![
                format!("On part de {a}."),
                format!("On enlève {b}."),
                format!("{a} - {b} = {}.", q.correct),
            ],
            '×' => vec![
                format!("On prend {b} paquets de {a}."),
                format!("On utilise la table de {b}."),
                format!("{a} × {b} = {}.", q.correct),
            ],
            _ => vec![
                format!("On cherche combien de fois {b} rentre dans {a}."),
                format!("{b} × {} = {a}.", q.correct),
                format!("{a} ÷ {b} = {}.", q.correct),
            ],
        },
        Row::FracCmp { a_n, a_d, b_n, b_d } => {
            if q.grade.is_middle_school() {
                vec![
                    format!("On calcule les produits en croix : {a_n}×{b_d} = {}.", a_n * b_d),
                    format!("Puis {b_n}×{a_d} = {}.", b_n * a_d),
                    format!("Donc {a_n}/{a_d} {} {b_n}/{b_d}.", q.correct),
                ]
            } else {
                let common = lcm(*a_d, *b_d);
                vec![
                    format!("On met les fractions au dénominateur commun {common}."),
                    format!(
                        "{a_n}/{a_d} = {}/{common} et {b_n}/{b_d} = {}/{common}.",
                        a_n * (common / a_d),
                        b_n * (common / b_d)
                    ),
                    format!("Donc {a_n}/{a_d} {} {b_n}/{b_d}.", q.correct),
                ]
            }
        }
        Row::FracEq { a_n, a_d, b_n, b_d } => {
            if q.grade.is_middle_school() {
                vec![
                    format!("On calcule {a_n}×{b_d} = {}.", a_n * b_d),
                    format!("On calcule {b_n}×{a_d} = {}.", b_n * a_d),
                    conclusion,
                ]
            } else {
                let (r_n, r_d) = simplify(*b_n, *b_d);
                vec![
                    format!("On simplifie {b_n}/{b_d} : on obtient {r_n}/{r_d}."),
                    format!("On compare {r_n}/{r_d} avec {a_n}/{a_d}."),
                    conclusion,
                ]
            }
        }
        Row::FracOp { a_n, a_d, b_n, b_d, op } => {
            let common = lcm(*a_d, *b_d);
            let scaled_a = a_n * (common / a_d);
            let scaled_b = b_n * (common / b_d);
            let raw = if *op == '+' { scaled_a + scaled_b } else { scaled_a - scaled_b };
            vec![
                format!(
                    "On met tout au dénominateur {common} : {scaled_a}/{common} {op} {scaled_b}/{common}."
                ),
                format!("On calcule les numérateurs : {raw}/{common}."),
                format!("On simplifie : {}.", q.correct),
            ]
        }
        Row::FracSimp { n, d } => {
            let g = super::fraction::gcd(*n, *d);
            vec![
                format!("On cherche le plus grand diviseur commun de {n} et {d} : c'est {g}."),
                format!("On divise le numérateur et le dénominateur par {g}."),
                format!("{n}/{d} = {}.", q.correct),
            ]
        }
        Row::FracVsNum { a_n, a_d, num_label } => {
            let (n_n, n_d) = num_label_as_fraction(num_label);
            if q.grade.is_middle_school() {
                vec![
                    format!("On écrit {num_label} comme la fraction {n_n}/{n_d}."),
                    format!(
                        "On croise : {a_n}×{n_d} = {} et {n_n}×{a_d} = {}.",
                        a_n * n_d,
                        n_n * a_d
                    ),
                    format!("Donc {a_n}/{a_d} {} {num_label}.", q.correct),
                ]
            } else {
                let common = lcm(*a_d, n_d);
                vec![
                    format!("On écrit {num_label} comme la fraction {n_n}/{n_d}."),
                    format!(
                        "Au dénominateur {common} : {}/{common} et {}/{common}.",
                        a_n * (common / a_d),
                        n_n * (common / n_d)
                    ),
                    format!("Donc {a_n}/{a_d} {} {num_label}.", q.correct),
                ]
            }
        }
    }
}
