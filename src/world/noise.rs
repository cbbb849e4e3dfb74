//! Seeded 2D height noise built on FastNoiseLite

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use crate::core::params::NoiseConfig;

/// Anything the lattice builder can read heights from.
pub trait HeightSampler {
    /// Height sample in [-1, 1] at world coordinates (x, z).
    fn sample(&self, x: f32, z: f32) -> f32;
}

/// Fractal OpenSimplex2 noise with a fixed octave count and a replaceable seed.
pub struct NoiseField {
    config: NoiseConfig,
    seed: i32,
    noise: FastNoiseLite,
}

impl NoiseField {
    /// Starts from the configured seed, or 0 until the first reseed.
    pub fn new(config: NoiseConfig) -> Self {
        let seed = config.seed.unwrap_or_default();
        let noise = Self::create_fbm_noise(&config, seed);
        NoiseField {
            config,
            seed,
            noise,
        }
    }

    fn create_fbm_noise(config: &NoiseConfig, seed: i32) -> FastNoiseLite {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_fractal_type(Some(FractalType::FBm));
        noise.set_fractal_octaves(Some(config.octaves));
        noise.set_fractal_lacunarity(Some(config.lacunarity));
        noise.set_fractal_gain(Some(config.persistence));
        noise.set_frequency(Some(1.0 / config.period));
        noise
    }

    /// Replaces the seed. The generator is rebuilt so nothing from the old seed survives.
    pub fn reseed(&mut self, seed: i32) {
        self.seed = seed;
        self.noise = Self::create_fbm_noise(&self.config, seed);
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }
}

impl HeightSampler for NoiseField {
    fn sample(&self, x: f32, z: f32) -> f32 {
        // FBm bounding keeps this near [-1, 1]; clamp the rare overshoot
        self.noise.get_noise_2d(x, z).clamp(-1.0, 1.0)
    }
}

/// Constant-height sampler, mostly useful for checking lattice geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatNoise(pub f32);

impl HeightSampler for FlatNoise {
    fn sample(&self, _x: f32, _z: f32) -> f32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_POINTS: [(f32, f32); 6] = [
        (0.0, 0.0),
        (13.5, -7.25),
        (-40.0, 22.0),
        (101.0, 3.0),
        (-3.3, -99.9),
        (57.0, 57.0),
    ];

    fn sample_points(field: &NoiseField) -> Vec<f32> {
        SAMPLE_POINTS.iter().map(|&(x, z)| field.sample(x, z)).collect()
    }

    #[test]
    fn test_samples_stay_in_range() {
        let field = NoiseField::new(NoiseConfig::with_seed(1234));
        for x in -50..50 {
            for z in -50..50 {
                let value = field.sample(x as f32 * 1.7, z as f32 * 0.9);
                assert!((-1.0..=1.0).contains(&value), "sample {} out of range", value);
            }
        }
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let a = NoiseField::new(NoiseConfig::with_seed(42));
        let b = NoiseField::new(NoiseConfig::with_seed(42));
        assert_eq!(sample_points(&a), sample_points(&b));
    }

    #[test]
    fn test_reseed_matches_fresh_field() {
        let mut field = NoiseField::new(NoiseConfig::with_seed(7));
        let before = sample_points(&field);
        field.reseed(99);
        assert_eq!(field.seed(), 99);
        assert_eq!(field.config().octaves, 9);

        let fresh = NoiseField::new(NoiseConfig::with_seed(99));
        assert_eq!(sample_points(&field), sample_points(&fresh));
        assert_ne!(sample_points(&field), before);
    }

    #[test]
    fn test_flat_noise() {
        assert_eq!(FlatNoise(0.0).sample(12.0, -3.0), 0.0);
        assert_eq!(FlatNoise::default().sample(1.0, 1.0), 0.0);
    }
}
