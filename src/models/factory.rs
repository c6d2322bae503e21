//! Kind-specific question generators and choice-set construction.
//!
//! Every generator is total: it always returns a well-formed question for any
//! (grade, difficulty) pair. Choice sets for numeric and fraction kinds carry
//! exactly 4 distinct entries including the correct answer; comparison and
//! equivalence kinds use their fixed symbol sets.

use super::fraction::{cmp_fractions, lcm, ordering_symbol, simplify};
use super::{Difficulty, DifficultyProfile, Grade, Mode, Question, Row};
use rand::Rng;
use rand::seq::SliceRandom;
use std::cmp::Ordering;

/// Renders a fraction choice label.
pub fn frac_label(n: i64, d: i64) -> String {
    format!("{n}/{d}")
}

/// Parses a `FracVsNum` number label back to an exact fraction:
/// `"1,5"` → 15/10, `"2"` → 2/1.
pub fn num_label_as_fraction(label: &str) -> (i64, i64) {
    if let Some((whole, tenth)) = label.split_once(',') {
        let whole: i64 = whole.parse().unwrap_or(0);
        let tenth: i64 = tenth.parse().unwrap_or(0);
        (whole * 10 + tenth, 10)
    } else {
        (label.parse().unwrap_or(0), 1)
    }
}

/// Dispatches to the generator for `mode`.
pub fn generate<R: Rng>(mode: Mode, grade: Grade, difficulty: Difficulty, rng: &mut R) -> Question {
    let profile = DifficultyProfile::resolve(grade, difficulty);
    match mode {
        Mode::Addition => gen_addition(mode, grade, difficulty, &profile, rng),
        Mode::Subtraction => gen_subtraction(mode, grade, difficulty, &profile, rng),
        Mode::Multiplication => gen_multiplication(mode, grade, difficulty, &profile, rng),
        Mode::Division => gen_division(mode, grade, difficulty, &profile, rng),
        Mode::CompareFractions => gen_compare(mode, grade, difficulty, &profile, rng),
        Mode::EquivalentFractions => gen_equivalent(mode, grade, difficulty, &profile, rng),
        Mode::FractionOperation => gen_frac_op(mode, grade, difficulty, &profile, rng),
        Mode::SimplifyFraction => gen_simplify(mode, grade, difficulty, &profile, rng),
        Mode::FractionVsNumber => gen_frac_vs_num(mode, grade, difficulty, &profile, rng),
    }
}

/// Budget for rejection sampling while filling a choice set.
const CHOICE_SAMPLING_BUDGET: usize = 100;

/// Builds 4 distinct non-negative numeric choices around `correct`, drawn
/// within `±spread` by rejection sampling, shuffled. Falls back to counting
/// upward from `correct` if the sampling budget runs out, so the set always
/// reaches 4 entries.
fn numeric_choices<R: Rng>(correct: i64, spread: i64, rng: &mut R) -> Vec<String> {
    let spread = spread.max(3);
    let mut values = vec![correct];
    for _ in 0..CHOICE_SAMPLING_BUDGET {
        if values.len() == 4 {
            break;
        }
        let cand = correct + rng.gen_range(-spread..=spread);
        if cand >= 0 && !values.contains(&cand) {
            values.push(cand);
        }
    }
    let mut next = correct + 1;
    while values.len() < 4 {
        if !values.contains(&next) {
            values.push(next);
        }
        next += 1;
    }
    let mut labels: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
    labels.shuffle(rng);
    labels
}

/// Completes a fraction choice set to 4 distinct labels, starting from the
/// correct answer and the prepared distractors, topping up with random
/// plausible fractions when distractors collide.
fn fraction_choices<R: Rng>(
    correct: String,
    distractors: Vec<String>,
    den_max: i64,
    rng: &mut R,
) -> Vec<String> {
    let mut labels = vec![correct];
    for d in distractors {
        if labels.len() < 4 && !labels.contains(&d) {
            labels.push(d);
        }
    }
    for _ in 0..CHOICE_SAMPLING_BUDGET {
        if labels.len() == 4 {
            break;
        }
        let d = rng.gen_range(2..=den_max.max(2));
        let n = rng.gen_range(1..=d * 2);
        let cand = frac_label(n, d);
        if !labels.contains(&cand) {
            labels.push(cand);
        }
    }
    // Sampling exhausted: derive fresh labels from the correct answer.
    let mut bump = 1;
    while labels.len() < 4 {
        let cand = frac_label(bump * 7 + 1, bump * 7 + 2);
        if !labels.contains(&cand) {
            labels.push(cand);
        }
        bump += 1;
    }
    labels.shuffle(rng);
    labels
}

fn op_question<R: Rng>(
    mode: Mode,
    grade: Grade,
    difficulty: Difficulty,
    a: i64,
    op: char,
    b: i64,
    result: i64,
    spread_floor: i64,
    rng: &mut R,
) -> Question {
    let spread = spread_floor.max(result / 4);
    Question {
        mode,
        grade,
        difficulty,
        prompt: format!("Combien font {a} {op} {b} ?"),
        row: Row::Op { a, op, b },
        correct: result.to_string(),
        choices: numeric_choices(result, spread, rng),
    }
}

fn gen_addition<R: Rng>(
    mode: Mode,
    grade: Grade,
    difficulty: Difficulty,
    p: &DifficultyProfile,
    rng: &mut R,
) -> Question {
    let a = rng.gen_range(0..=p.add_max);
    let b = rng.gen_range(0..=p.add_max);
    op_question(mode, grade, difficulty, a, '+', b, a + b, 5, rng)
}

fn gen_subtraction<R: Rng>(
    mode: Mode,
    grade: Grade,
    difficulty: Difficulty,
    p: &DifficultyProfile,
    rng: &mut R,
) -> Question {
    let x = rng.gen_range(0..=p.sub_max);
    let y = rng.gen_range(0..=p.sub_max);
    let (a, b) = if x >= y { (x, y) } else { (y, x) };
    op_question(mode, grade, difficulty, a, '-', b, a - b, 5, rng)
}

fn gen_multiplication<R: Rng>(
    mode: Mode,
    grade: Grade,
    difficulty: Difficulty,
    p: &DifficultyProfile,
    rng: &mut R,
) -> Question {
    let a = rng.gen_range(0..=p.mul_a);
    let b = rng.gen_range(0..=p.mul_b);
    op_question(mode, grade, difficulty, a, '×', b, a * b, 8, rng)
}

fn gen_division<R: Rng>(
    mode: Mode,
    grade: Grade,
    difficulty: Difficulty,
    p: &DifficultyProfile,
    rng: &mut R,
) -> Question {
    let b = rng.gen_range(2..=p.div_b);
    let q_max = ((p.div_b as f64 * 1.35).round() as i64).max(9);
    let q = rng.gen_range(2..=q_max);
    let a = b * q;
    op_question(mode, grade, difficulty, a, '÷', b, q, 3, rng)
}

/// Draws a proper fraction (numerator strictly below denominator) with a
/// denominator in `[2, den_max]`.
fn proper_fraction<R: Rng>(den_max: i64, rng: &mut R) -> (i64, i64) {
    let d = rng.gen_range(2..=den_max.max(2));
    let n = rng.gen_range(1..d);
    (n, d)
}

fn gen_compare<R: Rng>(
    mode: Mode,
    grade: Grade,
    difficulty: Difficulty,
    p: &DifficultyProfile,
    rng: &mut R,
) -> Question {
    let (a_n, a_d) = {
        let (n, d) = proper_fraction(p.frac_den, rng);
        simplify(n, d)
    };
    let (b_n, b_d) = {
        let (n, d) = proper_fraction(p.frac_den, rng);
        simplify(n, d)
    };
    let correct = ordering_symbol(cmp_fractions(a_n, a_d, b_n, b_d));
    Question {
        mode,
        grade,
        difficulty,
        prompt: format!("Compare les fractions {a_n}/{a_d} et {b_n}/{b_d}."),
        row: Row::FracCmp { a_n, a_d, b_n, b_d },
        correct: correct.to_string(),
        choices: vec!["<".to_string(), "=".to_string(), ">".to_string()],
    }
}

fn gen_equivalent<R: Rng>(
    mode: Mode,
    grade: Grade,
    difficulty: Difficulty,
    p: &DifficultyProfile,
    rng: &mut R,
) -> Question {
    let (a_n, a_d) = {
        let (n, d) = proper_fraction(p.frac_den, rng);
        simplify(n, d)
    };
    let k = rng.gen_range(2..=(p.frac_den / 4).max(2));
    let equivalent = rng.gen_bool(0.5);
    let (b_n, b_d) = if equivalent {
        (a_n * k, a_d * k)
    } else {
        // Perturb the numerator before scaling so the pair is close but
        // not equivalent.
        ((a_n + rng.gen_range(1..=2)) * k, a_d * k)
    };
    let correct = if equivalent { "Oui" } else { "Non" };
    Question {
        mode,
        grade,
        difficulty,
        prompt: format!("Les fractions {a_n}/{a_d} et {b_n}/{b_d} sont-elles équivalentes ?"),
        row: Row::FracEq { a_n, a_d, b_n, b_d },
        correct: correct.to_string(),
        choices: vec!["Oui".to_string(), "Non".to_string()],
    }
}

fn gen_frac_op<R: Rng>(
    mode: Mode,
    grade: Grade,
    difficulty: Difficulty,
    p: &DifficultyProfile,
    rng: &mut R,
) -> Question {
    let (mut a_n, mut a_d) = proper_fraction(p.frac_den, rng);
    let (mut b_n, mut b_d) = proper_fraction(p.frac_den, rng);
    let op = if rng.gen_bool(0.5) { '+' } else { '-' };
    if op == '-' && cmp_fractions(a_n, a_d, b_n, b_d) == Ordering::Less {
        // Keep the result non-negative.
        std::mem::swap(&mut a_n, &mut b_n);
        std::mem::swap(&mut a_d, &mut b_d);
    }
    let common = lcm(a_d, b_d);
    let scaled_a = a_n * (common / a_d);
    let scaled_b = b_n * (common / b_d);
    let raw = if op == '+' { scaled_a + scaled_b } else { scaled_a - scaled_b };
    let (c_n, c_d) = simplify(raw, common);

    // Classic student errors as distractors: the unreduced result, the
    // "combine numerators, add denominators" slip, and that slip unreduced.
    let naive_n = if op == '+' { a_n + b_n } else { a_n - b_n };
    let naive_d = a_d + b_d;
    let (naive_rn, naive_rd) = simplify(naive_n, naive_d);
    let distractors = vec![
        frac_label(raw, common),
        frac_label(naive_rn, naive_rd),
        frac_label(naive_n, naive_d),
    ];
    let correct = frac_label(c_n, c_d);
    let choices = fraction_choices(correct.clone(), distractors, p.frac_den, rng);
    Question {
        mode,
        grade,
        difficulty,
        prompt: format!("Calcule {a_n}/{a_d} {op} {b_n}/{b_d} et donne le résultat simplifié."),
        row: Row::FracOp { a_n, a_d, b_n, b_d, op },
        correct,
        choices,
    }
}

fn gen_simplify<R: Rng>(
    mode: Mode,
    grade: Grade,
    difficulty: Difficulty,
    p: &DifficultyProfile,
    rng: &mut R,
) -> Question {
    let (base_n, base_d) = {
        let (n, d) = proper_fraction(p.frac_den, rng);
        simplify(n, d)
    };
    let k = rng.gen_range(2..=9);
    let (n, d) = (base_n * k, base_d * k);
    // The base is coprime, so reducing the inflated fraction lands back on it.
    let (c_n, c_d) = simplify(n, d);

    // Partially-reduced distractor: divide by a proper divisor of k when one
    // exists, otherwise just double the reduced form.
    let partial = (2..k)
        .find(|j| k % j == 0)
        .map(|j| frac_label(n / j, d / j))
        .unwrap_or_else(|| frac_label(c_n * 2, c_d * 2));
    let distractors = vec![frac_label(n, d), partial, frac_label(c_n * 3, c_d * 3)];
    let correct = frac_label(c_n, c_d);
    let choices = fraction_choices(correct.clone(), distractors, p.frac_den, rng);
    Question {
        mode,
        grade,
        difficulty,
        prompt: format!("Simplifie la fraction {n}/{d}."),
        row: Row::FracSimp { n, d },
        correct,
        choices,
    }
}

/// Probability that the compared number is a one-decimal value rather than a
/// small integer.
const DECIMAL_PROBABILITY: f64 = 0.55;

fn gen_frac_vs_num<R: Rng>(
    mode: Mode,
    grade: Grade,
    difficulty: Difficulty,
    p: &DifficultyProfile,
    rng: &mut R,
) -> Question {
    let (a_n, a_d) = proper_fraction(p.frac_den, rng);
    let num_label = if rng.gen_bool(DECIMAL_PROBABILITY) {
        let tenths = rng.gen_range(1..=19i64);
        format!("{},{}", tenths / 10, tenths % 10)
    } else {
        rng.gen_range(0..=2i64).to_string()
    };
    let (num_n, num_d) = num_label_as_fraction(&num_label);
    let correct = ordering_symbol(cmp_fractions(a_n, a_d, num_n, num_d));
    Question {
        mode,
        grade,
        difficulty,
        prompt: format!("Compare {a_n}/{a_d} et {num_label}."),
        row: Row::FracVsNum { a_n, a_d, num_label },
        correct: correct.to_string(),
        choices: vec!["<".to_string(), "=".to_string(), ">".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn label_to_frac(label: &str) -> (i64, i64) {
        let (n, d) = label.split_once('/').expect("fraction label");
        (n.parse().unwrap(), d.parse().unwrap())
    }

    #[test]
    fn test_numeric_kinds_have_four_distinct_choices_with_correct() {
        let mut rng = StdRng::seed_from_u64(42);
        for mode in [Mode::Addition, Mode::Subtraction, Mode::Multiplication, Mode::Division] {
            for grade in Grade::ALL {
                for _ in 0..25 {
                    let q = generate(mode, grade, Difficulty::Difficile, &mut rng);
                    assert_eq!(q.choices.len(), 4);
                    let unique: HashSet<&String> = q.choices.iter().collect();
                    assert_eq!(unique.len(), 4, "choices must be distinct: {:?}", q.choices);
                    assert!(q.choices.contains(&q.correct));
                }
            }
        }
    }

    #[test]
    fn test_fraction_kinds_have_four_distinct_choices_with_correct() {
        let mut rng = StdRng::seed_from_u64(43);
        for mode in [Mode::FractionOperation, Mode::SimplifyFraction] {
            for grade in Grade::ALL {
                for _ in 0..25 {
                    let q = generate(mode, grade, Difficulty::Moyen, &mut rng);
                    assert_eq!(q.choices.len(), 4);
                    let unique: HashSet<&String> = q.choices.iter().collect();
                    assert_eq!(unique.len(), 4, "choices must be distinct: {:?}", q.choices);
                    assert!(q.choices.contains(&q.correct));
                }
            }
        }
    }

    #[test]
    fn test_subtraction_never_negative() {
        let mut rng = StdRng::seed_from_u64(44);
        for _ in 0..200 {
            let q = generate(Mode::Subtraction, Grade::Ce2, Difficulty::Moyen, &mut rng);
            let Row::Op { a, b, .. } = q.row else { panic!("expected Op row") };
            assert!(a >= b);
            assert_eq!(q.correct, (a - b).to_string());
        }
    }

    #[test]
    fn test_division_is_always_exact() {
        let mut rng = StdRng::seed_from_u64(45);
        for _ in 0..200 {
            let q = generate(Mode::Division, Grade::Ce1, Difficulty::Moyen, &mut rng);
            let Row::Op { a, b, .. } = q.row else { panic!("expected Op row") };
            let quotient: i64 = q.correct.parse().unwrap();
            assert_eq!(a, b * quotient);
            assert!(b >= 2);
            assert!(quotient >= 2);
        }
    }

    #[test]
    fn test_compare_operands_are_reduced_and_answer_matches() {
        let mut rng = StdRng::seed_from_u64(46);
        for _ in 0..200 {
            let q = generate(Mode::CompareFractions, Grade::Cm2, Difficulty::Difficile, &mut rng);
            let Row::FracCmp { a_n, a_d, b_n, b_d } = q.row else { panic!("expected FracCmp") };
            assert_eq!(crate::models::fraction::gcd(a_n, a_d), 1);
            assert_eq!(crate::models::fraction::gcd(b_n, b_d), 1);
            assert_eq!(q.correct, ordering_symbol(cmp_fractions(a_n, a_d, b_n, b_d)));
            assert_eq!(q.choices, vec!["<", "=", ">"]);
        }
    }

    #[test]
    fn test_equivalent_answer_matches_cross_multiplication() {
        let mut rng = StdRng::seed_from_u64(47);
        for _ in 0..200 {
            let q = generate(Mode::EquivalentFractions, Grade::Cm2, Difficulty::Difficile, &mut rng);
            let Row::FracEq { a_n, a_d, b_n, b_d } = q.row else { panic!("expected FracEq") };
            let equivalent = cmp_fractions(a_n, a_d, b_n, b_d) == Ordering::Equal;
            assert_eq!(q.correct, if equivalent { "Oui" } else { "Non" });
        }
    }

    #[test]
    fn test_frac_op_result_is_reduced_and_non_negative() {
        let mut rng = StdRng::seed_from_u64(48);
        for _ in 0..300 {
            let q = generate(Mode::FractionOperation, Grade::Cinquieme, Difficulty::Moyen, &mut rng);
            let (c_n, c_d) = label_to_frac(&q.correct);
            assert!(c_n >= 0);
            assert!(c_d >= 1);
            assert_eq!(crate::models::fraction::gcd(c_n, c_d), 1);
            // The reduced answer must equal the exact sum/difference.
            let Row::FracOp { a_n, a_d, b_n, b_d, op } = q.row else { panic!("expected FracOp") };
            let common = lcm(a_d, b_d);
            let raw = if op == '+' {
                a_n * (common / a_d) + b_n * (common / b_d)
            } else {
                a_n * (common / a_d) - b_n * (common / b_d)
            };
            assert_eq!(cmp_fractions(c_n, c_d, raw, common), Ordering::Equal);
        }
    }

    #[test]
    fn test_simplify_round_trips_to_reduced_base() {
        let mut rng = StdRng::seed_from_u64(49);
        for _ in 0..300 {
            let q = generate(Mode::SimplifyFraction, Grade::Cm1, Difficulty::Moyen, &mut rng);
            let Row::FracSimp { n, d } = q.row else { panic!("expected FracSimp") };
            let (c_n, c_d) = label_to_frac(&q.correct);
            assert_eq!((c_n, c_d), simplify(n, d));
            assert_eq!(crate::models::fraction::gcd(c_n, c_d), 1);
            // The shown fraction is genuinely unreduced.
            assert!(crate::models::fraction::gcd(n, d) >= 2);
        }
    }

    #[test]
    fn test_frac_vs_num_label_and_answer_agree() {
        let mut rng = StdRng::seed_from_u64(50);
        for _ in 0..300 {
            let q = generate(Mode::FractionVsNumber, Grade::Sixieme, Difficulty::Moyen, &mut rng);
            let Row::FracVsNum { a_n, a_d, num_label } = q.row else { panic!("expected FracVsNum") };
            let (n_n, n_d) = num_label_as_fraction(&num_label);
            assert_eq!(q.correct, ordering_symbol(cmp_fractions(a_n, a_d, n_n, n_d)));
        }
    }

    #[test]
    fn test_num_label_parsing() {
        assert_eq!(num_label_as_fraction("1,5"), (15, 10));
        assert_eq!(num_label_as_fraction("0,7"), (7, 10));
        assert_eq!(num_label_as_fraction("2"), (2, 1));
    }

    #[test]
    fn test_numeric_choices_survive_tiny_spread() {
        // correct = 0 with the minimum spread still yields 4 distinct
        // non-negative values.
        let mut rng = StdRng::seed_from_u64(51);
        for _ in 0..50 {
            let choices = numeric_choices(0, 1, &mut rng);
            assert_eq!(choices.len(), 4);
            let unique: HashSet<&String> = choices.iter().collect();
            assert_eq!(unique.len(), 4);
            for c in &choices {
                assert!(c.parse::<i64>().unwrap() >= 0);
            }
        }
    }
}
