//! An implementation of the Hodgkin Huxley model with sodium, potassium, and leak
//! currents, integrated through any [`OdeSolver`] on a uniform time grid

use ndarray::{Array1, array};
use serde::Serialize;
use crate::error::{ConfigurationError, NeuronSimulationError};
use crate::solver::{OdeSolver, OdeSystem};
use crate::stimulus::Stimulus;
use super::{step_count, upward_crossings};


/// Distance from a removable singularity (mV) within which the limit value is used
pub const SINGULARITY_EPSILON: f64 = 1e-7;

/// Calculates `scale * x / (1 - exp(-x / slope))`, using the limit `scale * slope`
/// as `x` approaches `0`
fn linear_exponential_rate(scale: f64, x: f64, slope: f64) -> f64 {
    if x.abs() < SINGULARITY_EPSILON {
        return scale * slope;
    }

    // 1 - exp(-x / slope) == -expm1(-x / slope)
    scale * x / -(-x / slope).exp_m1()
}

/// Opening and closing rates of the sodium activation (`m`), sodium inactivation (`h`),
/// and potassium activation (`n`) gates (ms^-1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatingRates {
    pub alpha_m: f64,
    pub beta_m: f64,
    pub alpha_h: f64,
    pub beta_h: f64,
    pub alpha_n: f64,
    pub beta_n: f64,
}

/// Calculates the rate constants of every gate at the given membrane potential (mV)
pub fn rate_constants(voltage: f64) -> GatingRates {
    GatingRates {
        alpha_m: linear_exponential_rate(0.1, voltage + 40., 10.),
        beta_m: 4. * (-(voltage + 65.) / 18.).exp(),
        alpha_h: 0.07 * (-(voltage + 65.) / 20.).exp(),
        beta_h: 1. / (1. + (-(voltage + 35.) / 10.).exp()),
        alpha_n: linear_exponential_rate(0.01, voltage + 55., 10.),
        beta_n: 0.125 * (-(voltage + 65.) / 80.).exp(),
    }
}

/// A gating variable with first order kinetics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicGatingVariable {
    /// Opening rate
    pub alpha: f64,
    /// Closing rate
    pub beta: f64,
    /// Fraction of open channels
    pub state: f64,
}

impl Default for BasicGatingVariable {
    fn default() -> Self {
        BasicGatingVariable { alpha: 0., beta: 0., state: 0. }
    }
}

impl BasicGatingVariable {
    /// Sets the state to the steady state value for the current rates
    pub fn init_state(&mut self) {
        self.state = self.alpha / (self.alpha + self.beta);
    }

    /// Rate of change of the state given the current rates
    pub fn derivative(&self) -> f64 {
        self.alpha * (1. - self.state) - self.beta * self.state
    }

    /// Updates the state with an explicit step of size `dt`
    pub fn update(&mut self, dt: f64) {
        self.state += dt * self.derivative();
    }
}

/// Physical constants of the membrane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HodgkinHuxleyParameters {
    /// Membrane capacitance (uF/cm^2)
    pub c_m: f64,
    /// Maximal sodium conductance (mS/cm^2)
    pub g_na: f64,
    /// Maximal potassium conductance (mS/cm^2)
    pub g_k: f64,
    /// Leak conductance (mS/cm^2)
    pub g_l: f64,
    /// Sodium reversal potential (mV)
    pub e_na: f64,
    /// Potassium reversal potential (mV)
    pub e_k: f64,
    /// Leak reversal potential (mV)
    pub e_l: f64,
}

impl Default for HodgkinHuxleyParameters {
    fn default() -> Self {
        HodgkinHuxleyParameters {
            c_m: 1.,
            g_na: 120.,
            g_k: 36.,
            g_l: 0.3,
            e_na: 50.,
            e_k: -77.,
            e_l: -54.387,
        }
    }
}

impl HodgkinHuxleyParameters {
    /// Checks that capacitance is positive, conductances are non-negative,
    /// and every value is finite
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let values = [
            ("c_m", self.c_m), ("g_na", self.g_na), ("g_k", self.g_k), ("g_l", self.g_l),
            ("e_na", self.e_na), ("e_k", self.e_k), ("e_l", self.e_l),
        ];
        if let Some((name, _)) = values.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigurationError::NonFiniteParameter(*name));
        }

        if self.c_m <= 0. {
            return Err(ConfigurationError::NonPositiveCapacitance(self.c_m));
        }

        for (name, value) in [("g_na", self.g_na), ("g_k", self.g_k), ("g_l", self.g_l)] {
            if value < 0. {
                return Err(ConfigurationError::NegativeConductance { name, value });
            }
        }

        Ok(())
    }
}

/// Membrane potential (mV) and gate occupancies of the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HodgkinHuxleyState {
    pub voltage: f64,
    pub m: f64,
    pub h: f64,
    pub n: f64,
}

impl HodgkinHuxleyState {
    /// Resting initial condition
    pub fn resting() -> Self {
        HodgkinHuxleyState { voltage: -65., m: 0.05, h: 0.6, n: 0.32 }
    }

    /// State with every gate at its steady state value for the given voltage
    pub fn steady_state(voltage: f64) -> Self {
        let rates = rate_constants(voltage);
        let mut m = BasicGatingVariable { alpha: rates.alpha_m, beta: rates.beta_m, state: 0. };
        let mut h = BasicGatingVariable { alpha: rates.alpha_h, beta: rates.beta_h, state: 0. };
        let mut n = BasicGatingVariable { alpha: rates.alpha_n, beta: rates.beta_n, state: 0. };
        m.init_state();
        h.init_state();
        n.init_state();

        HodgkinHuxleyState { voltage, m: m.state, h: h.state, n: n.state }
    }

    fn to_array(self) -> Array1<f64> {
        array![self.voltage, self.m, self.h, self.n]
    }

    fn from_array(state: &Array1<f64>) -> Self {
        HodgkinHuxleyState { voltage: state[0], m: state[1], h: state[2], n: state[3] }
    }
}

impl Default for HodgkinHuxleyState {
    fn default() -> Self {
        HodgkinHuxleyState::resting()
    }
}

/// Ionic current densities (uA/cm^2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IonicCurrents {
    pub i_na: f64,
    pub i_k: f64,
    pub i_leak: f64,
}

/// Calculates the sodium, potassium, and leak currents for a given state
pub fn ionic_currents(params: &HodgkinHuxleyParameters, state: &HodgkinHuxleyState) -> IonicCurrents {
    IonicCurrents {
        i_na: params.g_na * state.m.powi(3) * state.h * (state.voltage - params.e_na),
        i_k: params.g_k * state.n.powi(4) * (state.voltage - params.e_k),
        i_leak: params.g_l * (state.voltage - params.e_l),
    }
}

/// Builds a uniform time grid over `[0, total_time]` with spacing `dt` (ms), at most
/// [`MAX_STEPS`](super::MAX_STEPS) intervals long
pub fn time_grid(total_time: f64, dt: f64) -> Result<Vec<f64>, ConfigurationError> {
    let samples = step_count(total_time, dt)?
        .checked_add(1)
        .ok_or(ConfigurationError::TooManySamples { duration: total_time, dt })?;

    Ok((0..samples).map(|i| i as f64 * dt).collect())
}

/// A Hodgkin Huxley membrane driven by an external stimulus
#[derive(Debug, Clone)]
pub struct HodgkinHuxleyModel<S: Stimulus> {
    pub params: HodgkinHuxleyParameters,
    pub stimulus: S,
}

impl<S: Stimulus> HodgkinHuxleyModel<S> {
    /// Creates a model, returns an error if the parameters are not physically meaningful
    pub fn new(params: HodgkinHuxleyParameters, stimulus: S) -> Result<Self, ConfigurationError> {
        params.validate()?;

        Ok(HodgkinHuxleyModel { params, stimulus })
    }

    /// Calculates the rate of change of every state variable at time `t`
    pub fn derivatives(&self, state: &HodgkinHuxleyState, t: f64) -> HodgkinHuxleyState {
        let currents = ionic_currents(&self.params, state);
        let rates = rate_constants(state.voltage);

        let i_sum = self.stimulus.current(t) - currents.i_na - currents.i_k - currents.i_leak;

        HodgkinHuxleyState {
            voltage: i_sum / self.params.c_m,
            m: rates.alpha_m * (1. - state.m) - rates.beta_m * state.m,
            h: rates.alpha_h * (1. - state.h) - rates.beta_h * state.h,
            n: rates.alpha_n * (1. - state.n) - rates.beta_n * state.n,
        }
    }

    /// Integrates the model from `initial` and samples it at every point of `time_grid`
    pub fn integrate<O: OdeSolver>(
        &self,
        solver: &O,
        initial: HodgkinHuxleyState,
        time_grid: &[f64],
    ) -> Result<HodgkinHuxleyTrajectory, NeuronSimulationError> {
        if time_grid.is_empty() {
            return Err(ConfigurationError::EmptyTimeGrid.into());
        }
        if time_grid.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(ConfigurationError::TimeGridNotIncreasing.into());
        }

        let states = solver.solve(self, initial.to_array(), time_grid)?;

        let mut trajectory = HodgkinHuxleyTrajectory::with_capacity(time_grid.len());
        for (t, state) in time_grid.iter().zip(states.iter()) {
            let state = HodgkinHuxleyState::from_array(state);
            trajectory.push(*t, &state, ionic_currents(&self.params, &state), self.stimulus.current(*t));
        }

        log::info!(
            "hodgkin huxley: integrated {} samples over {} ms", 
            trajectory.len(), 
            time_grid[time_grid.len() - 1] - time_grid[0],
        );

        Ok(trajectory)
    }
}

impl<S: Stimulus> OdeSystem for HodgkinHuxleyModel<S> {
    fn dimension(&self) -> usize {
        4
    }

    fn derivatives(&self, t: f64, state: &Array1<f64>) -> Array1<f64> {
        HodgkinHuxleyModel::derivatives(self, &HodgkinHuxleyState::from_array(state), t).to_array()
    }
}

/// Sampled state variables, currents, and stimulus of an integrated model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HodgkinHuxleyTrajectory {
    pub time: Vec<f64>,
    pub voltage: Vec<f64>,
    pub m: Vec<f64>,
    pub h: Vec<f64>,
    pub n: Vec<f64>,
    pub i_na: Vec<f64>,
    pub i_k: Vec<f64>,
    pub i_leak: Vec<f64>,
    pub stimulus: Vec<f64>,
}

/// A single sample of a [`HodgkinHuxleyTrajectory`]
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HodgkinHuxleyRow {
    pub time: f64,
    pub voltage: f64,
    pub m: f64,
    pub h: f64,
    pub n: f64,
    pub i_na: f64,
    pub i_k: f64,
    pub i_leak: f64,
    pub stimulus: f64,
}

impl HodgkinHuxleyTrajectory {
    fn with_capacity(capacity: usize) -> Self {
        HodgkinHuxleyTrajectory {
            time: Vec::with_capacity(capacity),
            voltage: Vec::with_capacity(capacity),
            m: Vec::with_capacity(capacity),
            h: Vec::with_capacity(capacity),
            n: Vec::with_capacity(capacity),
            i_na: Vec::with_capacity(capacity),
            i_k: Vec::with_capacity(capacity),
            i_leak: Vec::with_capacity(capacity),
            stimulus: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, t: f64, state: &HodgkinHuxleyState, currents: IonicCurrents, stimulus: f64) {
        self.time.push(t);
        self.voltage.push(state.voltage);
        self.m.push(state.m);
        self.h.push(state.h);
        self.n.push(state.n);
        self.i_na.push(currents.i_na);
        self.i_k.push(currents.i_k);
        self.i_leak.push(currents.i_leak);
        self.stimulus.push(stimulus);
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// State at sample `index`
    pub fn state(&self, index: usize) -> Option<HodgkinHuxleyState> {
        if index >= self.len() {
            return None;
        }

        Some(HodgkinHuxleyState { 
            voltage: self.voltage[index], 
            m: self.m[index], 
            h: self.h[index], 
            n: self.n[index],
        })
    }

    /// Times at which the membrane potential crosses `threshold` (mV) from below
    pub fn spike_times(&self, threshold: f64) -> Vec<f64> {
        upward_crossings(&self.voltage, threshold).into_iter()
            .map(|i| self.time[i])
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = HodgkinHuxleyRow> + '_ {
        (0..self.len()).map(move |i| HodgkinHuxleyRow {
            time: self.time[i],
            voltage: self.voltage[i],
            m: self.m[i],
            h: self.h[i],
            n: self.n[i],
            i_na: self.i_na[i],
            i_k: self.i_k[i],
            i_leak: self.i_leak[i],
            stimulus: self.stimulus[i],
        })
    }
}
