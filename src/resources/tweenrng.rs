//! Random source for per-cell animation parameters.
//!
//! Explosion requests carry ranges; every cell draws its own speed and angle
//! from them when the request is applied. Seeding the generator (`--seed`)
//! makes an explosion reproducible.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone)]
pub struct TweenRng(pub fastrand::Rng);

impl Default for TweenRng {
    fn default() -> Self {
        Self(fastrand::Rng::new())
    }
}

impl TweenRng {
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }

    /// Uniform value in `[range.0, range.1]`. Reversed ranges are accepted.
    pub fn in_range(&mut self, range: (f32, f32)) -> f32 {
        let (lo, hi) = if range.0 <= range.1 {
            range
        } else {
            (range.1, range.0)
        };
        lo + (hi - lo) * self.0.f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_stays_in_bounds() {
        let mut rng = TweenRng::with_seed(7);
        for _ in 0..1000 {
            let v = rng.in_range((400.0, 1000.0));
            assert!((400.0..=1000.0).contains(&v));
        }
    }

    #[test]
    fn test_reversed_range() {
        let mut rng = TweenRng::with_seed(7);
        for _ in 0..100 {
            let v = rng.in_range((290.0, 250.0));
            assert!((250.0..=290.0).contains(&v));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = TweenRng::with_seed(99);
        let mut b = TweenRng::with_seed(99);
        for _ in 0..10 {
            assert_eq!(a.in_range((0.0, 1.0)), b.in_range((0.0, 1.0)));
        }
    }
}
