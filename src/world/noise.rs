//! Seeded value noise over the integer lattice
//!
//! Everything here is fixed-width integer mixing followed by a single
//! conversion to `f64`, so a given seed produces the same field on every
//! platform. Chunk regeneration after eviction relies on that.

/// Deterministic value-noise generator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoiseGenerator {
    seed: u64,
    /// Seed folded down to the 32-bit mixing width
    mixed_seed: u32,
}

impl NoiseGenerator {
    pub fn new(seed: u64) -> Self {
        let folded = (seed ^ (seed >> 32)) as u32;
        Self {
            seed,
            mixed_seed: folded.wrapping_mul(0x9e37_79b9),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Hash a lattice point to a value in `[0, 1)`
    #[inline]
    pub fn hash(&self, x: i64, y: i64) -> f64 {
        // Truncating casts keep the mix in 32 bits for any input
        let mut h = self.mixed_seed
            ^ (x as u32).wrapping_mul(0x27d4_eb2d)
            ^ (y as u32).wrapping_mul(0x1656_67b1);
        h = (h ^ (h >> 15)).wrapping_mul(0x85eb_ca6b);
        h = (h ^ (h >> 13)).wrapping_mul(0xc2b2_ae35);
        h ^= h >> 16;
        f64::from(h) / 4_294_967_296.0
    }

    /// Smoothed 1D noise in `[0, 1)`
    pub fn noise1d(&self, x: f64) -> f64 {
        let x0 = x.floor();
        let t = smoothstep(x - x0);
        let i = x0 as i64;
        lerp(self.hash(i, 0), self.hash(i.wrapping_add(1), 0), t)
    }

    /// Smoothed 2D noise in `[0, 1)`, bilinear over the four lattice corners
    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor();
        let y0 = y.floor();
        let tx = smoothstep(x - x0);
        let ty = smoothstep(y - y0);
        let (ix, iy) = (x0 as i64, y0 as i64);
        let (ix1, iy1) = (ix.wrapping_add(1), iy.wrapping_add(1));

        let top = lerp(self.hash(ix, iy), self.hash(ix1, iy), tx);
        let bottom = lerp(self.hash(ix, iy1), self.hash(ix1, iy1), tx);
        lerp(top, bottom, ty)
    }
}

#[inline]
fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_pinned() {
        // Pinned outputs: any change here silently reshapes every saved world
        let noise = NoiseGenerator::new(1337);
        assert_eq!(noise.hash(0, 0), PINNED_HASH_0_0);
        assert_eq!(noise.hash(-1, 5), PINNED_HASH_NEG1_5);
        assert_eq!(noise.hash(123_456, -789), PINNED_HASH_BIG);
    }

    const PINNED_HASH_0_0: f64 = 0.8134363158605993;
    const PINNED_HASH_NEG1_5: f64 = 0.36567694041877985;
    const PINNED_HASH_BIG: f64 = 0.437752973055467;

    #[test]
    fn test_hash_range() {
        let noise = NoiseGenerator::new(42);
        for x in -200..200 {
            for y in -3..3 {
                let v = noise.hash(x, y);
                assert!((0.0..1.0).contains(&v), "hash({}, {}) = {}", x, y, v);
            }
        }
    }

    #[test]
    fn test_seed_changes_field() {
        let a = NoiseGenerator::new(1);
        let b = NoiseGenerator::new(2);
        let differing = (0..64).filter(|&x| a.hash(x, 0) != b.hash(x, 0)).count();
        assert!(differing > 60);
    }

    #[test]
    fn test_noise1d_matches_lattice_and_stays_in_range() {
        let noise = NoiseGenerator::new(7);
        for i in -20..20 {
            assert_eq!(noise.noise1d(i as f64), noise.hash(i, 0));
        }
        for step in -1000..1000 {
            let v = noise.noise1d(step as f64 * 0.037);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_noise1d_is_continuous() {
        let noise = NoiseGenerator::new(7);
        let eps = 1e-6;
        for i in -10..10 {
            let x = i as f64;
            assert!((noise.noise1d(x - eps) - noise.noise1d(x)).abs() < 1e-4);
        }
    }

    #[test]
    fn test_noise2d_matches_corners_and_stays_in_range() {
        let noise = NoiseGenerator::new(99);
        assert_eq!(noise.noise2d(3.0, -4.0), noise.hash(3, -4));
        for x in -40..40 {
            for y in -5..5 {
                let v = noise.noise2d(x as f64 * 0.31, y as f64 * 0.17);
                assert!((0.0..1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_pure_function_of_inputs() {
        let a = NoiseGenerator::new(5);
        let b = NoiseGenerator::new(5);
        for x in -50..50 {
            let fx = x as f64 * 0.123;
            assert_eq!(a.noise1d(fx), b.noise1d(fx));
            assert_eq!(a.noise2d(fx, -fx), b.noise2d(fx, -fx));
        }
    }
}
