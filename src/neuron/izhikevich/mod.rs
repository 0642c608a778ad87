//! The Izhikevich model integrated with explicit Euler steps and a
//! discontinuous spike reset. By changing `a`, `b`, `c`, and `d` different
//! spiking behavior can be produced, see 
//! <https://courses.cs.washington.edu/courses/cse528/07sp/izhi1.pdf>.

use serde::Serialize;
use neuron_model_traits::NeuronModelBase;
use crate::error::{ConfigurationError, NeuronSimulationError};
use crate::stimulus::{PulseStimulus, Stimulus};
use super::{step_count, IterateAndSpike};


/// Default integration timestep (ms)
pub const DEFAULT_DT: f64 = 0.5;

/// Shape parameters and initial voltage of the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IzhikevichParameters {
    /// Time scale of the recovery variable
    pub a: f64,
    /// Sensitivity of the recovery variable to subthreshold voltage
    pub b: f64,
    /// Voltage reset value after a spike (mV)
    pub c: f64,
    /// Recovery variable increment after a spike
    pub d: f64,
    /// Spike cutoff (mV)
    pub v_th: f64,
    /// Voltage initialization value (mV)
    pub v_init: f64,
}

impl Default for IzhikevichParameters {
    fn default() -> Self {
        IzhikevichParameters {
            a: 0.02,
            b: 0.2,
            c: -65.,
            d: 2.,
            v_th: 30.,
            v_init: -65.,
        }
    }
}

impl IzhikevichParameters {
    pub fn chattering() -> Self {
        IzhikevichParameters { c: -50., d: 2., ..IzhikevichParameters::default() }
    }

    pub fn regular_spiking() -> Self {
        IzhikevichParameters { d: 8., ..IzhikevichParameters::default() }
    }

    pub fn fast_spiking() -> Self {
        IzhikevichParameters { a: 0.1, d: 2., ..IzhikevichParameters::default() }
    }

    pub fn intrinsically_bursting() -> Self {
        IzhikevichParameters { c: -55., d: 4., ..IzhikevichParameters::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let values = [
            ("a", self.a), ("b", self.b), ("c", self.c), ("d", self.d),
            ("v_th", self.v_th), ("v_init", self.v_init),
        ];
        if let Some((name, _)) = values.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigurationError::NonFiniteParameter(*name));
        }

        Ok(())
    }
}

/// An Izhikevich neuron
#[derive(Debug, Clone, NeuronModelBase)]
pub struct IzhikevichNeuron {
    /// Membrane potential (mV)
    pub current_voltage: f64,
    /// Recovery variable
    pub recovery: f64,
    /// Timestep (ms)
    pub dt: f64,
    /// Model parameters
    pub params: IzhikevichParameters,
    /// Whether the neuron spiked on the last step
    pub is_spiking: bool,
}

impl Default for IzhikevichNeuron {
    fn default() -> Self {
        IzhikevichNeuron::from_params(IzhikevichParameters::default(), DEFAULT_DT)
    }
}

impl IzhikevichNeuron {
    fn from_params(params: IzhikevichParameters, dt: f64) -> Self {
        IzhikevichNeuron {
            current_voltage: params.v_init,
            recovery: params.b * params.v_init,
            dt,
            params,
            is_spiking: false,
        }
    }

    /// Creates a neuron at its initial condition, `v = v_init` and `u = b * v_init`,
    /// stepping with [`DEFAULT_DT`]
    pub fn new(params: IzhikevichParameters) -> Result<Self, ConfigurationError> {
        IzhikevichNeuron::with_dt(params, DEFAULT_DT)
    }

    /// Creates a neuron at its initial condition with the given timestep (ms)
    pub fn with_dt(params: IzhikevichParameters, dt: f64) -> Result<Self, ConfigurationError> {
        let neuron = IzhikevichNeuron::from_params(params, dt);
        neuron.validate()?;

        Ok(neuron)
    }

    /// Checks the shape parameters and that the timestep is positive and finite
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.params.validate()?;
        if !(self.dt > 0.) || !self.dt.is_finite() {
            return Err(ConfigurationError::NonPositiveTimestep(self.dt));
        }

        Ok(())
    }

    /// Returns the neuron to its initial condition
    pub fn reset_state(&mut self) {
        self.current_voltage = self.params.v_init;
        self.recovery = self.params.b * self.params.v_init;
        self.is_spiking = false;
    }

    /// Advances voltage and recovery by one explicit Euler step, both
    /// updates are calculated from the values before the step
    pub fn step(&mut self, input: f64) {
        let v = self.current_voltage;
        let u = self.recovery;

        let dv = 0.04 * v.powi(2) + 5. * v + 140. - u + input;
        let du = self.params.a * (self.params.b * v - u);

        self.current_voltage = v + self.dt * dv;
        self.recovery = u + self.dt * du;
    }

    /// Resets voltage and increments recovery if voltage has reached the cutoff,
    /// returns whether a spike occurred
    pub fn apply_reset(&mut self) -> bool {
        let is_spiking = self.current_voltage >= self.params.v_th;

        if is_spiking {
            self.current_voltage = self.params.c;
            self.recovery += self.params.d;
        }

        self.is_spiking = is_spiking;

        is_spiking
    }

    /// Simulates the neuron from its current state over `[0, horizon]` (ms),
    /// where step `i` receives `stimulus.current(i * dt)`
    pub fn simulate<S: Stimulus>(
        &mut self, 
        stimulus: &S, 
        horizon: f64,
    ) -> Result<IzhikevichTrajectory, ConfigurationError> {
        self.validate()?;

        let samples = step_count(horizon, self.dt)?
            .checked_add(1)
            .ok_or(ConfigurationError::TooManySamples { duration: horizon, dt: self.dt })?;
        let mut trajectory = IzhikevichTrajectory::with_capacity(samples);
        trajectory.push(0., self.current_voltage, self.recovery, 0., false);

        for i in 1..samples {
            let t = i as f64 * self.dt;
            let input = stimulus.current(t);
            let is_spiking = self.iterate_and_spike(input);

            trajectory.push(t, self.current_voltage, self.recovery, input, is_spiking);
        }

        log::info!(
            "izhikevich: a: {}, b: {}, c: {}, d: {}, {} spikes over {} ms",
            self.params.a, self.params.b, self.params.c, self.params.d,
            trajectory.spike_count(), horizon,
        );

        Ok(trajectory)
    }

    /// Runs the neuron from its initial condition with a pulse of `magnitude` applied
    /// from `start` to `end` (inclusive) over `max(1000, end)` ms, the samples at 
    /// `start` and `end` are recorded as stimulus markers
    pub fn run_pulse(
        &mut self, 
        magnitude: f64, 
        start: f64, 
        end: f64,
    ) -> Result<IzhikevichTrajectory, NeuronSimulationError> {
        let stimulus = PulseStimulus::new(magnitude, start, end)?;
        if stimulus.start() < 0. {
            log::warn!(
                "izhikevich: pulse of {} starts at {} ms, before the first sample",
                stimulus.magnitude(), stimulus.start(),
            );
        }

        self.reset_state();
        let mut trajectory = self.simulate(&stimulus, stimulus.end().max(1000.))?;

        let on_boundary = |t: f64| {
            (t - stimulus.start()).abs() < 1e-9 || (t - stimulus.end()).abs() < 1e-9
        };
        trajectory.stimulus_markers = trajectory.time.iter()
            .enumerate()
            .filter(|(_, t)| on_boundary(**t))
            .map(|(i, _)| i)
            .collect();

        Ok(trajectory)
    }
}

impl IterateAndSpike for IzhikevichNeuron {
    fn iterate_and_spike(&mut self, input_current: f64) -> bool {
        self.step(input_current);

        self.apply_reset()
    }
}

/// Voltage, recovery, input, and spikes of a simulated neuron
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IzhikevichTrajectory {
    pub time: Vec<f64>,
    pub voltage: Vec<f64>,
    pub recovery: Vec<f64>,
    pub input: Vec<f64>,
    pub spikes: Vec<bool>,
    /// Sample indices that fall exactly on the stimulus onset or offset
    pub stimulus_markers: Vec<usize>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IzhikevichRow {
    pub time: f64,
    pub voltage: f64,
    pub recovery: f64,
    pub input: f64,
    pub spike: u8,
    pub marker: u8,
}

impl IzhikevichTrajectory {
    fn with_capacity(capacity: usize) -> Self {
        IzhikevichTrajectory {
            time: Vec::with_capacity(capacity),
            voltage: Vec::with_capacity(capacity),
            recovery: Vec::with_capacity(capacity),
            input: Vec::with_capacity(capacity),
            spikes: Vec::with_capacity(capacity),
            stimulus_markers: Vec::new(),
        }
    }

    fn push(&mut self, t: f64, voltage: f64, recovery: f64, input: f64, is_spiking: bool) {
        self.time.push(t);
        self.voltage.push(voltage);
        self.recovery.push(recovery);
        self.input.push(input);
        self.spikes.push(is_spiking);
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn spike_count(&self) -> usize {
        super::count_spikes(&self.spikes)
    }

    pub fn rows(&self) -> impl Iterator<Item = IzhikevichRow> + '_ {
        (0..self.len()).map(move |i| IzhikevichRow {
            time: self.time[i],
            voltage: self.voltage[i],
            recovery: self.recovery[i],
            input: self.input[i],
            spike: self.spikes[i] as u8,
            marker: self.stimulus_markers.contains(&i) as u8,
        })
    }
}
