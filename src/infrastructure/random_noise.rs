// rand-backed jitter sources
use crate::application::noise_source::NoiseSource;
use crate::infrastructure::config::NoiseSettings;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};

/// Unseeded: every draw comes from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadNoise;

impl NoiseSource for ThreadNoise {
    fn below(&self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        rand::rng().random_range(0..bound)
    }

    fn fraction(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Reproducible sequence from a fixed seed.
#[derive(Debug)]
pub struct SeededNoise {
    rng: Mutex<StdRng>,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn below(&self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..bound)
    }

    fn fraction(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random::<f64>()
    }
}

pub fn noise_from_settings(settings: &NoiseSettings) -> Arc<dyn NoiseSource> {
    match settings.seed {
        Some(seed) => {
            tracing::info!("Using seeded noise source (seed {})", seed);
            Arc::new(SeededNoise::new(seed))
        }
        None => Arc::new(ThreadNoise),
    }
}
