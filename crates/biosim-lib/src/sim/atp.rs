use log::debug;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::SimError;

/// Parameters of the ATP production model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtpConfig {
    /// ATP molecules per mitochondrion per second under ideal conditions
    pub atp_per_cycle: f64,
    /// Efficiency multiplier per glucose availability level
    pub glucose_factor: BTreeMap<String, f64>,
    /// Efficiency multiplier per oxygen availability level
    pub oxygen_factor: BTreeMap<String, f64>,
    pub noise: NoiseSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSpec {
    pub mean: f64,
    pub std_dev: f64,
}

impl Default for NoiseSpec {
    fn default() -> Self {
        Self {
            mean: 1.0,
            std_dev: 0.1,
        }
    }
}

impl Default for AtpConfig {
    fn default() -> Self {
        let glucose_factor = [("low", 0.3), ("medium", 0.6), ("high", 1.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let oxygen_factor = [("low", 0.5), ("normal", 1.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Self {
            atp_per_cycle: 30.0,
            glucose_factor,
            oxygen_factor,
            noise: NoiseSpec::default(),
        }
    }
}

impl AtpConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, SimError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Combined glucose × oxygen multiplier for the given levels.
    pub fn efficiency(&self, glucose: &str, oxygen: &str) -> Result<f64, SimError> {
        let g = self.glucose_factor.get(&glucose.to_lowercase());
        let o = self.oxygen_factor.get(&oxygen.to_lowercase());
        match (g, o) {
            (Some(g), Some(o)) => Ok(g * o),
            _ => Err(SimError::UnknownLevel {
                glucose: glucose.to_string(),
                oxygen: oxygen.to_string(),
            }),
        }
    }
}

/// Source of the per-second multiplicative variability.
pub trait NoiseSource {
    fn sample(&mut self) -> f64;
}

/// Gaussian noise over a seeded generator; equal seeds give equal sequences.
pub struct GaussianNoise {
    dist: Normal<f64>,
    rng: StdRng,
}

impl GaussianNoise {
    pub fn new(spec: NoiseSpec, rng: StdRng) -> Result<Self, SimError> {
        let dist = Normal::new(spec.mean, spec.std_dev).map_err(|_| SimError::InvalidNoise {
            mean: spec.mean,
            std_dev: spec.std_dev,
        })?;
        Ok(Self { dist, rng })
    }

    pub fn seeded(spec: NoiseSpec, seed: u64) -> Result<Self, SimError> {
        Self::new(spec, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(spec: NoiseSpec) -> Result<Self, SimError> {
        Self::new(spec, StdRng::from_entropy())
    }
}

impl NoiseSource for GaussianNoise {
    fn sample(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }
}

/// Fixed multiplier, mainly for tests and noise-free runs.
#[derive(Debug, Clone, Copy)]
pub struct ConstantNoise(pub f64);

impl NoiseSource for ConstantNoise {
    fn sample(&mut self) -> f64 {
        self.0
    }
}

/// ATP produced in each simulated second.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtpRun {
    pub glucose: String,
    pub oxygen: String,
    pub mitochondria: u32,
    pub per_second: Vec<f64>,
}

impl AtpRun {
    pub fn total(&self) -> f64 {
        self.per_second.iter().sum()
    }

    /// Total truncated toward zero, as whole molecules.
    pub fn total_molecules(&self) -> i64 {
        self.total().trunc() as i64
    }

    pub fn points(&self) -> Vec<[f64; 2]> {
        self.per_second
            .iter()
            .enumerate()
            .map(|(t, v)| [t as f64, *v])
            .collect()
    }
}

pub fn simulate_atp(
    config: &AtpConfig,
    glucose: &str,
    oxygen: &str,
    mitochondria: u32,
    seconds: usize,
    noise: &mut dyn NoiseSource,
) -> Result<AtpRun, SimError> {
    let efficiency = config.efficiency(glucose, oxygen)?;
    let base = mitochondria as f64 * config.atp_per_cycle * efficiency;
    debug!("atp base rate {base} molecules/s over {seconds} s");
    let per_second = (0..seconds).map(|_| base * noise.sample()).collect();
    Ok(AtpRun {
        glucose: glucose.to_lowercase(),
        oxygen: oxygen.to_lowercase(),
        mitochondria,
        per_second,
    })
}
