//! A leaky integrate and fire neuron that accumulates its input minus a proportional
//! leak until the potential exceeds its capacitance, at which point it spikes and resets.
//! Simulation history is kept across calls to [`LeakyIntegrateAndFireNeuron::run`] so
//! different input regimes can be chained back to back.

use serde::Serialize;
use neuron_model_traits::NeuronModelBase;
use crate::error::ConfigurationError;
use super::{step_count, IterateAndSpike};


/// Length of each simulation in a rate curve (ms)
pub const RATE_CURVE_DURATION: f64 = 1000.;

/// Calculates the potential after one timestep, the leak is proportional to the 
/// potential and never removes more than the potential currently holds
pub fn step(potential: f64, input_current: f64, resistance: f64, time_step: f64) -> f64 {
    let leak = (potential / (resistance / time_step))
        .max(0.)
        .min(potential.max(0.));

    potential + input_current / time_step - leak
}

/// Returns the potential after checking for a spike and whether a spike occurred,
/// the potential is reset to `0` if it is greater than the threshold
pub fn check_spike(potential: f64, capacitance_threshold: f64) -> (f64, bool) {
    if potential > capacitance_threshold {
        (0., true)
    } else {
        (potential, false)
    }
}

/// Input, potential, and spike output recorded at every timestep
#[derive(Debug, Clone, PartialEq)]
pub struct LIFHistory {
    pub input: Vec<f64>,
    pub potential: Vec<f64>,
    pub output: Vec<bool>,
}

impl Default for LIFHistory {
    fn default() -> Self {
        LIFHistory {
            input: vec![0.],
            potential: vec![0.],
            output: vec![false],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LIFRow {
    pub step: usize,
    pub time: f64,
    pub input: f64,
    pub potential: f64,
    pub output: u8,
}

impl LIFHistory {
    pub fn len(&self) -> usize {
        self.potential.len()
    }

    pub fn is_empty(&self) -> bool {
        self.potential.is_empty()
    }

    fn push(&mut self, input: f64, potential: f64, output: bool) {
        self.input.push(input);
        self.potential.push(potential);
        self.output.push(output);
    }

    pub fn spike_count(&self) -> usize {
        super::count_spikes(&self.output)
    }

    /// Rows of the history, `time` is the step index scaled by `dt` (ms)
    pub fn rows(&self, dt: f64) -> impl Iterator<Item = LIFRow> + '_ {
        (0..self.len()).map(move |i| LIFRow {
            step: i,
            time: i as f64 * dt,
            input: self.input[i],
            potential: self.potential[i],
            output: self.output[i] as u8,
        })
    }
}

/// A leaky integrate and fire neuron
#[derive(Debug, Clone, NeuronModelBase)]
pub struct LeakyIntegrateAndFireNeuron {
    /// Accumulated potential (arbitrary units)
    pub current_voltage: f64,
    /// Potential above which the neuron spikes
    pub capacitance: f64,
    /// Resistance, larger values leak more slowly (kOhm)
    pub resistance: f64,
    /// Time between integrations (ms)
    pub dt: f64,
    /// Factor applied to inputs before integration
    pub input_scale: f64,
    /// Whether to log every step
    pub debug: bool,
    /// Whether the neuron spiked on the last step
    pub is_spiking: bool,
    /// Activity over every step simulated so far
    pub history: LIFHistory,
}

impl Default for LeakyIntegrateAndFireNeuron {
    fn default() -> Self {
        LeakyIntegrateAndFireNeuron {
            current_voltage: 0.,
            capacitance: 10000.,
            resistance: 1.,
            dt: 1.,
            input_scale: 1.,
            debug: false,
            is_spiking: false,
            history: LIFHistory::default(),
        }
    }
}

impl LeakyIntegrateAndFireNeuron {
    /// Neuron that reads its input in millivolts and integrates it in volts,
    /// paired with a threshold of `10`
    pub fn millivolt_input() -> Self {
        LeakyIntegrateAndFireNeuron {
            capacitance: 10.,
            input_scale: 1. / 1000.,
            ..LeakyIntegrateAndFireNeuron::default()
        }
    }

    /// Checks that capacitance, resistance, and timestep are positive and finite
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.capacitance > 0.) || !self.capacitance.is_finite() {
            return Err(ConfigurationError::NonPositiveCapacitance(self.capacitance));
        }
        if !(self.resistance > 0.) || !self.resistance.is_finite() {
            return Err(ConfigurationError::NonPositiveResistance(self.resistance));
        }
        if !(self.dt > 0.) || !self.dt.is_finite() {
            return Err(ConfigurationError::NonPositiveTimestep(self.dt));
        }
        if !self.input_scale.is_finite() {
            return Err(ConfigurationError::NonFiniteParameter("input_scale"));
        }

        Ok(())
    }

    /// Simulates the neuron with a constant input for `duration` ms, appending
    /// `floor(duration / dt)` samples to the history, returns the number of spikes
    pub fn run(&mut self, input: f64, duration: f64) -> Result<usize, ConfigurationError> {
        self.validate()?;
        if !input.is_finite() {
            return Err(ConfigurationError::NonFiniteParameter("input"));
        }

        let n_steps = step_count(duration, self.dt)?;
        if n_steps == 0 {
            log::warn!("leaky integrate and fire: {} ms is shorter than one timestep", duration);
        }
        self.history.input.reserve(n_steps);
        self.history.potential.reserve(n_steps);
        self.history.output.reserve(n_steps);

        let spikes = (0..n_steps)
            .filter(|_| self.iterate_and_spike(input))
            .count();

        Ok(spikes)
    }

    /// Clears the history back to its initial sample and resets the potential
    pub fn reset(&mut self) {
        self.current_voltage = 0.;
        self.is_spiking = false;
        self.history = LIFHistory::default();
    }

    /// Number of spikes in a [`RATE_CURVE_DURATION`] ms window for every integer input 
    /// from `0` to `max_current - 1`, the history is cleared before each run and holds
    /// the last run afterwards
    pub fn rate_curve(&mut self, max_current: usize) -> Result<Vec<usize>, ConfigurationError> {
        self.validate()?;

        let mut rates = Vec::with_capacity(max_current);
        for current in 0..max_current {
            self.reset();
            rates.push(self.run(current as f64, RATE_CURVE_DURATION)?);
        }

        log::info!("leaky integrate and fire: rate curve {:?}", rates);

        Ok(rates)
    }
}

impl IterateAndSpike for LeakyIntegrateAndFireNeuron {
    fn iterate_and_spike(&mut self, input_current: f64) -> bool {
        let index = self.history.len();
        if self.debug {
            log::debug!("Input is {} at {} ms.", input_current, index as f64 * self.dt);
        }

        let potential = step(
            self.current_voltage, 
            input_current * self.input_scale, 
            self.resistance, 
            self.dt,
        );
        let (potential, is_spiking) = check_spike(potential, self.capacitance);

        if self.debug {
            if is_spiking {
                log::debug!("Spike at {} ms.", index as f64 * self.dt);
            }
            log::debug!("Potential is {} at {} ms.", potential, index as f64 * self.dt);
        }

        self.current_voltage = potential;
        self.is_spiking = is_spiking;
        self.history.push(input_current, potential, is_spiking);

        is_spiking
    }
}
