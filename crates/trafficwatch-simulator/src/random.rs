//! Random analysis backend used by the running dashboard

use crate::backend::{AnalysisBackend, Reading};
use crate::error::SimulatorResult;
use async_trait::async_trait;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng, rngs::StdRng};
use trafficwatch_core::{ImageFile, VehicleCounts};

/// Probability that a frame contains an ambulance
const AMBULANCE_PROBABILITY: f64 = 0.2;

/// Backend that makes up a plausible reading for every image
#[derive(Debug)]
pub struct RandomAnalysisBackend {
    rng: Mutex<StdRng>,
}

impl RandomAnalysisBackend {
    /// Backend seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Backend with a fixed seed, for reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draw one reading
    ///
    /// The ambulance count and the ambulance flag are drawn independently.
    pub fn sample(&self) -> Reading {
        let mut rng = self.rng.lock();
        let counts = VehicleCounts::new(
            rng.gen_range(5..=24),
            rng.gen_range(0..=4),
            rng.gen_range(0..=2),
            rng.gen_range(0..=9),
            u32::from(rng.gen_bool(AMBULANCE_PROBABILITY)),
        );

        Reading {
            vehicle_counts: counts,
            congestion_score: rng.gen_range(0.2..1.0),
            clearance_time_minutes: rng.gen_range(5..=24),
            ambulance_detected: rng.gen_bool(AMBULANCE_PROBABILITY),
        }
    }
}

impl Default for RandomAnalysisBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisBackend for RandomAnalysisBackend {
    async fn analyze(&self, location: &str, image: &ImageFile) -> SimulatorResult<Reading> {
        let reading = self.sample();
        tracing::debug!(
            location,
            filename = %image.filename,
            bytes = image.len(),
            vehicles = reading.vehicle_counts.total(),
            congestion = reading.congestion_score,
            "Generated random reading"
        );
        Ok(reading)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
