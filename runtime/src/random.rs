/*!
Random Numbers - process-wide PRNG service

The generator is seeded from the system clock the first time either builtin
asks for a number, and is never reseeded afterwards.
*/

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

/// Largest raw draw, matching the C library's `RAND_MAX` on glibc
pub const RAND_MAX: u32 = i32::MAX as u32;

/// A seeded generator with the `rand()`-style draw interface the builtins
/// are defined in terms of.
pub struct Prng {
    rng: StdRng,
}

impl Prng {
    pub fn from_seed(seed: u64) -> Self {
        Prng {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed from the current time
    pub fn from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::from_seed(seed)
    }

    /// One raw draw in `[0, RAND_MAX]`
    pub fn draw(&mut self) -> u32 {
        self.rng.next_u32() >> 1
    }

    /// Value in `[min, max]`; the bounds are swapped when `min > max`.
    ///
    /// Maps a raw draw with `%`, so ranges whose size does not divide
    /// `RAND_MAX + 1` are slightly biased toward their low end, and ranges
    /// wider than `RAND_MAX + 1` never reach their upper part.
    pub fn integer_in(&mut self, min: i32, max: i32) -> i32 {
        let (low, high) = if min > max { (max, min) } else { (min, max) };
        let span = i64::from(high) - i64::from(low) + 1;
        let offset = i64::from(self.draw()) % span;
        (i64::from(low) + offset) as i32
    }

    /// Value in `[0.0, 1.0)`
    pub fn real(&mut self) -> f64 {
        f64::from(self.draw()) / (f64::from(RAND_MAX) + 1.0)
    }
}

static SERVICE: Lazy<Mutex<Prng>> = Lazy::new(|| Mutex::new(Prng::from_clock()));

fn with_service<T>(f: impl FnOnce(&mut Prng) -> T) -> T {
    let mut prng = SERVICE.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut prng)
}

pub fn random_integer(min: i32, max: i32) -> i32 {
    with_service(|prng| prng.integer_in(min, max))
}

pub fn random_real() -> f64 {
    with_service(Prng::real)
}

#[unsafe(export_name = "Random_Integer")]
pub extern "C" fn ada_random_integer(min: i32, max: i32) -> i32 {
    random_integer(min, max)
}

#[unsafe(export_name = "Random_Real")]
pub extern "C" fn ada_random_real() -> f64 {
    random_real()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_within_bounds() {
        let mut prng = Prng::from_seed(7);
        for _ in 0..10_000 {
            let v = prng.integer_in(1, 6);
            assert!((1..=6).contains(&v));
        }
    }

    #[test]
    fn test_swapped_bounds_match() {
        let mut a = Prng::from_seed(99);
        let mut b = Prng::from_seed(99);
        for _ in 0..1_000 {
            assert_eq!(a.integer_in(5, 1), b.integer_in(1, 5));
        }
    }

    #[test]
    fn test_single_value_range() {
        let mut prng = Prng::from_seed(3);
        assert_eq!(prng.integer_in(4, 4), 4);
        assert_eq!(prng.integer_in(-9, -9), -9);
    }

    #[test]
    fn test_full_range_does_not_overflow() {
        let mut prng = Prng::from_seed(11);
        // The modulo mapping only covers the low half of a full-width range
        for _ in 0..1_000 {
            let v = prng.integer_in(i32::MIN, i32::MAX);
            assert!(v < 0);
        }
        for _ in 0..1_000 {
            let v = prng.integer_in(i32::MAX, -1);
            assert!(v >= -1);
        }
    }

    #[test]
    fn test_every_value_is_reachable() {
        let mut prng = Prng::from_seed(5);
        let mut seen = [false; 10];
        for _ in 0..10_000 {
            seen[prng.integer_in(0, 9) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_real_in_unit_interval() {
        let mut prng = Prng::from_seed(1234);
        for _ in 0..10_000 {
            let v = prng.real();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_draw_never_exceeds_rand_max() {
        let mut prng = Prng::from_seed(42);
        for _ in 0..10_000 {
            assert!(prng.draw() <= RAND_MAX);
        }
    }

    #[test]
    fn test_service_builtins() {
        for _ in 0..1_000 {
            let v = ada_random_integer(10, -10);
            assert!((-10..=10).contains(&v));
            let r = ada_random_real();
            assert!((0.0..1.0).contains(&r));
        }
    }
}
