/// Xorshift32 random number generator
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Uniform-ish integer in `0..n` (n = 0 returns 0)
#[inline]
pub fn random_below(state: &mut u32, n: u32) -> u32 {
    if n == 0 {
        return 0;
    }
    xorshift32(state) % n
}

/// Random unit step in {-1, 0, 1} per axis, never (0, 0)
pub fn random_direction(state: &mut u32) -> (i32, i32) {
    const DIRS: [(i32, i32); 8] = [
        (-1, -1), (0, -1), (1, -1),
        (-1, 0),           (1, 0),
        (-1, 1),  (0, 1),  (1, 1),
    ];
    DIRS[random_below(state, DIRS.len() as u32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xorshift_is_deterministic_and_nonzero() {
        let mut a = 12345;
        let mut b = 12345;
        for _ in 0..100 {
            let va = xorshift32(&mut a);
            assert_eq!(va, xorshift32(&mut b));
            assert_ne!(va, 0);
        }
    }

    #[test]
    fn random_below_stays_in_range() {
        let mut s = 7;
        for _ in 0..1000 {
            assert!(random_below(&mut s, 6) < 6);
        }
        assert_eq!(random_below(&mut s, 0), 0);
    }

    #[test]
    fn random_direction_never_zero() {
        let mut s = 99;
        for _ in 0..500 {
            assert_ne!(random_direction(&mut s), (0, 0));
        }
    }
}
