//! Stimulus generators producing an external input current as a function of
//! simulation time. All generators except [`NoisyStimulus`] are deterministic
//! and can be evaluated at any time, including points off the simulation grid.

use crate::distribution::GaussianParameters;
use crate::error::ConfigurationError;


/// Handles generation of an input current (or voltage) at a given time (ms)
pub trait Stimulus {
    /// Returns the magnitude of the stimulus at time `t`
    fn current(&self, t: f64) -> f64;
}

impl<F: Fn(f64) -> f64> Stimulus for F {
    fn current(&self, t: f64) -> f64 {
        self(t)
    }
}

/// A stimulus that is the same at every point in time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConstantStimulus(pub f64);

impl Stimulus for ConstantStimulus {
    fn current(&self, _t: f64) -> f64 {
        self.0
    }
}

/// A signed change in stimulus magnitude that applies strictly after `threshold`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepChange {
    /// Time after which the change applies (ms)
    pub threshold: f64,
    /// Signed magnitude added once `t > threshold`
    pub amplitude: f64,
}

/// Piecewise constant stimulus built as a sum of signed step functions,
/// `sum(amplitude_i * [t > threshold_i])`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepStimulus {
    pub steps: Vec<StepChange>,
}

impl StepStimulus {
    /// Creates a stimulus from `(threshold, amplitude)` pairs
    pub fn new(steps: &[(f64, f64)]) -> Result<Self, ConfigurationError> {
        let steps = steps.iter()
            .map(|(threshold, amplitude)| {
                if !threshold.is_finite() || !amplitude.is_finite() {
                    return Err(ConfigurationError::NonFiniteParameter("stimulus"));
                }

                Ok(StepChange { threshold: *threshold, amplitude: *amplitude })
            })
            .collect::<Result<Vec<StepChange>, ConfigurationError>>()?;

        Ok(StepStimulus { steps })
    }

    /// Adds a pulse of `amplitude` that switches on after `start` and off after `end`
    pub fn with_pulse(mut self, start: f64, end: f64, amplitude: f64) -> Result<Self, ConfigurationError> {
        if start > end {
            return Err(ConfigurationError::StimulusWindowReversed { start, end });
        }

        self.steps.push(StepChange { threshold: start, amplitude });
        self.steps.push(StepChange { threshold: end, amplitude: -amplitude });

        Ok(self)
    }

    /// Stimulus used by the classic Hodgkin Huxley demonstration, 
    /// `10 * [t > 100] - 10 * [t > 200] + 35 * [t > 300] - 35 * [t > 400]`
    pub fn hodgkin_huxley_default() -> Self {
        StepStimulus {
            steps: vec![
                StepChange { threshold: 100., amplitude: 10. },
                StepChange { threshold: 200., amplitude: -10. },
                StepChange { threshold: 300., amplitude: 35. },
                StepChange { threshold: 400., amplitude: -35. },
            ]
        }
    }
}

impl Stimulus for StepStimulus {
    fn current(&self, t: f64) -> f64 {
        self.steps.iter()
            .filter(|step| t > step.threshold)
            .map(|step| step.amplitude)
            .sum()
    }
}

/// Rectangular pulse of `magnitude` applied while `start <= t <= end`,
/// both window boundaries receive the input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseStimulus {
    magnitude: f64,
    start: f64,
    end: f64,
}

impl PulseStimulus {
    /// Creates a pulse, returns an error if `start > end` or any value is not finite
    pub fn new(magnitude: f64, start: f64, end: f64) -> Result<Self, ConfigurationError> {
        if !magnitude.is_finite() || !start.is_finite() || !end.is_finite() {
            return Err(ConfigurationError::NonFiniteParameter("pulse"));
        }
        if start > end {
            return Err(ConfigurationError::StimulusWindowReversed { start, end });
        }

        Ok(PulseStimulus { magnitude, start, end })
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }
}

impl Stimulus for PulseStimulus {
    fn current(&self, t: f64) -> f64 {
        if self.start <= t && t <= self.end {
            self.magnitude
        } else {
            0.
        }
    }
}

/// Scales another stimulus by a clamped normally distributed factor each time it is sampled
#[derive(Debug, Clone)]
pub struct NoisyStimulus<S: Stimulus> {
    pub stimulus: S,
    pub gaussian_params: GaussianParameters,
}

impl<S: Stimulus> NoisyStimulus<S> {
    pub fn new(stimulus: S, gaussian_params: GaussianParameters) -> Result<Self, ConfigurationError> {
        gaussian_params.validate()?;

        Ok(NoisyStimulus { stimulus, gaussian_params })
    }
}

impl<S: Stimulus> Stimulus for NoisyStimulus<S> {
    fn current(&self, t: f64) -> f64 {
        self.stimulus.current(t) * self.gaussian_params.get_gaussian_factor()
    }
}
