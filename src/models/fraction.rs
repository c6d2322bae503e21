//! Exact fraction primitives: gcd, lcm, reduction and sign comparison.
//! Everything is integer arithmetic; answers are checked for exact equality
//! downstream, so no floating point is allowed here.

use std::cmp::Ordering;

/// Greatest common divisor on absolute values (Euclid).
/// Returns 1 when both inputs are 0 so callers can always divide by it.
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    if a == 0 { 1 } else { a }
}

/// Least common multiple via gcd.
pub fn lcm(a: i64, b: i64) -> i64 {
    (a * b).abs() / gcd(a, b)
}

/// Reduces n/d to lowest terms.
pub fn simplify(n: i64, d: i64) -> (i64, i64) {
    let g = gcd(n, d);
    (n / g, d / g)
}

/// Compares a_n/a_d with b_n/b_d by cross-multiplication.
/// Denominators must be positive.
pub fn cmp_fractions(a_n: i64, a_d: i64, b_n: i64, b_d: i64) -> Ordering {
    (a_n * b_d).cmp(&(b_n * a_d))
}

/// Renders an ordering as the symbol shown to the learner.
pub fn ordering_symbol(ord: Ordering) -> &'static str {
    match ord {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd_basic() {
        assert_eq!(gcd(8, 12), 4);
        assert_eq!(gcd(12, 8), 4);
        assert_eq!(gcd(7, 13), 1);
    }

    #[test]
    fn test_gcd_zero_inputs() {
        // Both zero must give 1 so division stays safe
        assert_eq!(gcd(0, 0), 1);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(5, 0), 5);
    }

    #[test]
    fn test_gcd_negative_inputs() {
        assert_eq!(gcd(-8, 12), 4);
        assert_eq!(gcd(8, -12), 4);
    }

    #[test]
    fn test_lcm() {
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(3, 5), 15);
        assert_eq!(lcm(6, 6), 6);
    }

    #[test]
    fn test_simplify() {
        assert_eq!(simplify(8, 12), (2, 3));
        assert_eq!(simplify(3, 7), (3, 7));
        assert_eq!(simplify(10, 5), (2, 1));
    }

    #[test]
    fn test_simplify_is_fully_reduced() {
        for n in 1..=30i64 {
            for d in 1..=30i64 {
                let (rn, rd) = simplify(n, d);
                assert_eq!(gcd(rn, rd), 1);
                // Same ratio: n*rd == rn*d
                assert_eq!(n * rd, rn * d);
            }
        }
    }

    #[test]
    fn test_cmp_fractions() {
        assert_eq!(cmp_fractions(1, 2, 2, 4), Ordering::Equal);
        assert_eq!(cmp_fractions(1, 3, 1, 2), Ordering::Less);
        assert_eq!(cmp_fractions(3, 4, 2, 3), Ordering::Greater);
    }

    #[test]
    fn test_ordering_symbol() {
        assert_eq!(ordering_symbol(Ordering::Less), "<");
        assert_eq!(ordering_symbol(Ordering::Equal), "=");
        assert_eq!(ordering_symbol(Ordering::Greater), ">");
    }
}
