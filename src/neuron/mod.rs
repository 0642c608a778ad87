//! Single neuron models and the traits shared between them.
//!
//! The discrete time models ([`izhikevich::IzhikevichNeuron`] and
//! [`integrate_and_fire::LeakyIntegrateAndFireNeuron`]) implement [`IterateAndSpike`]
//! so they can be driven by the same generic routines, while the
//! [`hodgkin_huxley`] model is integrated through an [`OdeSolver`](crate::solver::OdeSolver).

pub mod hodgkin_huxley;
pub mod izhikevich;
pub mod integrate_and_fire;
/// Derive macros for the accessor traits
pub mod neuron_model_traits {
    pub use neuron_model_traits::*;
}

use crate::distribution::GaussianParameters;
use crate::error::ConfigurationError;


/// Largest number of timesteps a single simulation may take
pub const MAX_STEPS: usize = 10_000_000;

/// Number of whole timesteps of size `dt` in `duration`, a duration that is a multiple
/// of `dt` is not shortened by rounding, returns an error if the count exceeds [`MAX_STEPS`]
pub fn step_count(duration: f64, dt: f64) -> Result<usize, ConfigurationError> {
    if !(dt > 0.) || !dt.is_finite() {
        return Err(ConfigurationError::NonPositiveTimestep(dt));
    }
    if !(duration >= 0.) || !duration.is_finite() {
        return Err(ConfigurationError::InvalidDuration(duration));
    }

    let steps = (duration / dt + 1e-9).floor();
    if !steps.is_finite() || steps > MAX_STEPS as f64 {
        return Err(ConfigurationError::TooManySamples { duration, dt });
    }

    Ok(steps as usize)
}

/// Gets the current membrane potential of the neuron
pub trait CurrentVoltage {
    fn get_current_voltage(&self) -> f64;
}

/// Gets and sets the integration timestep of the neuron (ms)
pub trait Timestep {
    fn get_dt(&self) -> f64;
    fn set_dt(&mut self, dt: f64);
}

/// Whether the neuron spiked on its last iteration
pub trait IsSpiking {
    fn is_spiking(&self) -> bool;
}

/// Handles dynamics of a neuron that advances in fixed timesteps and can spike
pub trait IterateAndSpike: CurrentVoltage + Timestep + IsSpiking {
    /// Takes in an input and advances the neuron by one timestep, returns whether the
    /// neuron has spiked, any spike reset is applied before returning
    fn iterate_and_spike(&mut self, input_current: f64) -> bool;
}

/// Takes in a static current as an input and iterates the given
/// neuron for a given duration, pass `gaussian` parameters to scale the input
/// with normally distributed noise as it iterates, returns the voltages
/// from the neuron over time
pub fn run_static_input<T: IterateAndSpike>(
    cell: &mut T,
    input: f64,
    gaussian: Option<&GaussianParameters>,
    iterations: usize,
) -> Vec<f64> {
    let mut voltages: Vec<f64> = Vec::with_capacity(iterations);

    for _ in 0..iterations {
        let _is_spiking = match gaussian {
            Some(params) => cell.iterate_and_spike(input * params.get_gaussian_factor()),
            None => cell.iterate_and_spike(input),
        };

        voltages.push(cell.get_current_voltage());
    }

    voltages
}

/// Counts the number of spikes in a spike indicator sequence
pub fn count_spikes(spikes: &[bool]) -> usize {
    spikes.iter().filter(|is_spiking| **is_spiking).count()
}

/// Returns indices where `values` crosses `threshold` from below
pub fn upward_crossings(values: &[f64], threshold: f64) -> Vec<usize> {
    (1..values.len())
        .filter(|&i| values[i - 1] < threshold && values[i] >= threshold)
        .collect()
}
