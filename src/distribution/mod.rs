//! A tool to generate and clamp noise.

use rand_distr::{Normal, Distribution};
use crate::error::ConfigurationError;


/// Calculates the normal distribution at the given mean and standard deviation and clamps
/// the output value between the given minimum and maximum, if standard deviation is `0.` 
/// (or the distribution cannot be constructed) the mean is always returned
pub fn limited_distr(mean: f64, std: f64, minimum: f64, maximum: f64) -> f64 {
    if std == 0.0 {
        return mean;
    }

    match Normal::new(mean, std) {
        Ok(normal) => {
            let output: f64 = normal.sample(&mut rand::thread_rng());

            output.max(minimum).min(maximum)
        },
        Err(_) => mean,
    }
}

/// Parameters used to scale inputs with clamped normally distributed noise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianParameters {
    /// Mean of distribution
    pub mean: f64,
    /// Standard deviation of distribution
    pub std: f64,
    /// Maximum cutoff value
    pub max: f64,
    /// Minimum cutoff value
    pub min: f64,
}

impl Default for GaussianParameters {
    fn default() -> Self {
        GaussianParameters { 
            mean: 1.0, // center of norm distr
            std: 0.0, // std of norm distr
            max: 2.0, // maximum cutoff for norm distr
            min: 0.0, // minimum cutoff for norm distr
        }
    }
}

impl GaussianParameters {
    /// Checks that the standard deviation is non-negative and all values are finite
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.mean.is_finite() && self.std.is_finite() && self.max.is_finite() && self.min.is_finite()) {
            return Err(ConfigurationError::NonFiniteParameter("gaussian_params"));
        }
        if self.std < 0. {
            return Err(ConfigurationError::NegativeStandardDeviation(self.std));
        }

        Ok(())
    }

    /// Samples a scaling factor from the clamped distribution
    pub fn get_gaussian_factor(&self) -> f64 {
        limited_distr(self.mean, self.std, self.min, self.max)
    }
}
