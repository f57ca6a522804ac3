/// Greatest common divisor by the Euclidean algorithm
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let rem = a % b;
        a = b;
        b = rem;
    }
    a
}

/// Least common multiple, `None` if it does not fit in a `u64`
pub fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Left fold of [`lcm`] over `values`; the empty fold is 1
pub fn lcm_all<I: IntoIterator<Item = u64>>(values: I) -> Option<u64> {
    values
        .into_iter()
        .try_fold(1u64, |acc, value| lcm(acc, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 11), 1);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(5, 0), 5);
    }

    #[test]
    fn test_lcm() {
        assert_eq!(lcm(7, 11), Some(77));
        assert_eq!(lcm(4, 6), Some(12));
        assert_eq!(lcm(0, 6), Some(0));
        assert_eq!(lcm(u64::MAX, u64::MAX - 1), None);
    }

    #[test]
    fn test_lcm_all_of_realistic_periods() {
        // Four 12-bit counter periods, the product exceeds 32 bits
        let periods = [3739u64, 3761, 3797, 3889];
        assert_eq!(lcm_all(periods), Some(3739 * 3761 * 3797 * 3889));
        assert_eq!(lcm_all(std::iter::empty()), Some(1));
    }

    #[test]
    fn test_lcm_all_is_order_independent() {
        let mut rng = StdRng::seed_from_u64(20);
        let mut periods = vec![4u64, 6, 7, 9, 10, 11, 15];
        let expected = lcm_all(periods.iter().copied());

        for _ in 0..20 {
            periods.shuffle(&mut rng);
            assert_eq!(lcm_all(periods.iter().copied()), expected);
        }
        assert_eq!(expected, Some(13860));
    }
}
