//! Numerical integration of systems of ordinary differential equations onto
//! a fixed output grid. Any [`OdeSolver`] can be handed to a model, the
//! adaptive [`DormandPrince`] solver is the default while [`ForwardEuler`]
//! reproduces the fixed step updates used by the discrete models.

use ndarray::Array1;
use crate::error::SolverError;


/// Right hand side of a system of ordinary differential equations, `dy/dt = f(t, y)`
pub trait OdeSystem {
    /// Number of state variables
    fn dimension(&self) -> usize;
    /// Calculates the instantaneous rate of change of `state` at time `t`
    fn derivatives(&self, t: f64, state: &Array1<f64>) -> Array1<f64>;
}

/// Integrates an [`OdeSystem`] and samples it at every point of `time_grid`,
/// the first sample is always `initial`
pub trait OdeSolver {
    fn solve(
        &self, 
        system: &dyn OdeSystem, 
        initial: Array1<f64>, 
        time_grid: &[f64],
    ) -> Result<Vec<Array1<f64>>, SolverError>;
}

fn check_inputs(system: &dyn OdeSystem, initial: &Array1<f64>, time_grid: &[f64]) -> Result<(), SolverError> {
    if time_grid.is_empty() || time_grid.iter().any(|t| !t.is_finite()) {
        return Err(SolverError::InvalidTimeGrid);
    }
    if time_grid.windows(2).any(|pair| pair[1] <= pair[0]) {
        return Err(SolverError::InvalidTimeGrid);
    }
    if initial.len() != system.dimension() {
        return Err(SolverError::DimensionMismatch { expected: system.dimension(), found: initial.len() });
    }
    if initial.iter().any(|x| !x.is_finite()) {
        return Err(SolverError::NonFiniteState { time: time_grid[0] });
    }

    Ok(())
}

/// Tolerances and step limits for adaptive integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverTolerances {
    /// Relative tolerance
    pub rtol: f64,
    /// Absolute tolerance
    pub atol: f64,
    /// Maximum number of attempted steps over the whole grid
    pub max_steps: usize,
    /// Smallest step allowed before integration is abandoned
    pub min_step: f64,
    /// Largest step allowed
    pub max_step: f64,
}

impl Default for SolverTolerances {
    fn default() -> Self {
        SolverTolerances {
            rtol: 1e-6,
            atol: 1e-8,
            max_steps: 5_000_000,
            min_step: 1e-12,
            max_step: 1.0,
        }
    }
}

/// Dormand-Prince 5(4) adaptive step Runge-Kutta solver, steps are clipped
/// so that every grid point is hit exactly
#[derive(Debug, Clone, Default)]
pub struct DormandPrince {
    pub tolerances: SolverTolerances,
}

// Dormand-Prince tableau
const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// 5th order weights
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// difference between 5th and 4th order weights
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;

impl DormandPrince {
    pub fn new(tolerances: SolverTolerances) -> Self {
        DormandPrince { tolerances }
    }

    /// Creates a solver with the given relative and absolute tolerances
    pub fn with_tolerances(rtol: f64, atol: f64) -> Self {
        DormandPrince {
            tolerances: SolverTolerances { rtol, atol, ..SolverTolerances::default() }
        }
    }

    /// Performs a single step, returning the 5th order solution and the error estimate
    fn step_with_error(
        &self,
        system: &dyn OdeSystem,
        y: &Array1<f64>,
        t: f64,
        h: f64,
    ) -> (Array1<f64>, Array1<f64>) {
        let k1 = system.derivatives(t, y);

        let y2 = y + &(&k1 * (h * A21));
        let k2 = system.derivatives(t + C2 * h, &y2);

        let y3 = y + &(&k1 * (h * A31)) + &(&k2 * (h * A32));
        let k3 = system.derivatives(t + C3 * h, &y3);

        let y4 = y + &(&k1 * (h * A41)) + &(&k2 * (h * A42)) + &(&k3 * (h * A43));
        let k4 = system.derivatives(t + C4 * h, &y4);

        let y5 = y + &(&k1 * (h * A51)) + &(&k2 * (h * A52)) + &(&k3 * (h * A53)) 
            + &(&k4 * (h * A54));
        let k5 = system.derivatives(t + C5 * h, &y5);

        let y6 = y + &(&k1 * (h * A61)) + &(&k2 * (h * A62)) + &(&k3 * (h * A63))
            + &(&k4 * (h * A64)) + &(&k5 * (h * A65));
        let k6 = system.derivatives(t + h, &y6);

        let y_new = y + &(&k1 * (h * B1)) + &(&k3 * (h * B3)) + &(&k4 * (h * B4))
            + &(&k5 * (h * B5)) + &(&k6 * (h * B6));

        let k7 = system.derivatives(t + h, &y_new);

        let y_err = &(&k1 * (h * E1)) + &(&k3 * (h * E3)) + &(&k4 * (h * E4))
            + &(&k5 * (h * E5)) + &(&k6 * (h * E6)) + &(&k7 * (h * E7));

        (y_new, y_err)
    }

    /// Root mean square of the error scaled by the mixed tolerance
    fn error_norm(&self, y_err: &Array1<f64>, y: &Array1<f64>, y_new: &Array1<f64>) -> f64 {
        let n = y_err.len().max(1);

        let err_sum: f64 = y_err.iter()
            .zip(y.iter().zip(y_new.iter()))
            .map(|(err, (old, new))| {
                let scale = self.tolerances.atol + self.tolerances.rtol * old.abs().max(new.abs());
                (err / scale).powi(2)
            })
            .sum();

        (err_sum / n as f64).sqrt()
    }

    fn optimal_step(&self, h: f64, err: f64) -> f64 {
        let factor = if err == 0. {
            MAX_FACTOR
        } else {
            (SAFETY * err.powf(-0.2)).max(MIN_FACTOR).min(MAX_FACTOR)
        };

        (h * factor).min(self.tolerances.max_step)
    }
}

impl OdeSolver for DormandPrince {
    fn solve(
        &self, 
        system: &dyn OdeSystem, 
        initial: Array1<f64>, 
        time_grid: &[f64],
    ) -> Result<Vec<Array1<f64>>, SolverError> {
        check_inputs(system, &initial, time_grid)?;

        let mut states = Vec::with_capacity(time_grid.len());
        states.push(initial.clone());

        let mut t = time_grid[0];
        let mut y = initial;
        let span = time_grid[time_grid.len() - 1] - t;
        let mut h = (span / 100.).min(self.tolerances.max_step).max(self.tolerances.min_step);
        let mut step_count: usize = 0;

        for &target in &time_grid[1..] {
            while t < target {
                let remaining = target - t;
                let lands = h >= remaining;
                let step = if lands { remaining } else { h };

                let (y_new, y_err) = self.step_with_error(system, &y, t, step);
                let err = self.error_norm(&y_err, &y, &y_new);
                step_count += 1;

                // a NaN error is treated as a rejection so the step shrinks
                let accepted = err <= 1.0;
                let proposed = self.optimal_step(step, if err.is_nan() { f64::INFINITY } else { err });

                if accepted {
                    if y_new.iter().any(|x| !x.is_finite()) {
                        return Err(SolverError::NonFiniteState { time: t + step });
                    }

                    t = if lands { target } else { t + step };
                    y = y_new;
                    h = if lands { proposed.max(h).min(self.tolerances.max_step) } else { proposed };
                } else {
                    h = proposed;
                    if h < self.tolerances.min_step {
                        return Err(SolverError::StepSizeUnderflow { time: t, step: h });
                    }
                }

                if step_count >= self.tolerances.max_steps && t < target {
                    return Err(SolverError::MaximumStepsExceeded { time: t });
                }
            }

            states.push(y.clone());
        }

        Ok(states)
    }
}

/// Explicit fixed step Euler integration, each grid interval is split into
/// equally sized substeps no larger than `dt`
#[derive(Debug, Clone)]
pub struct ForwardEuler {
    pub dt: f64,
}

impl Default for ForwardEuler {
    fn default() -> Self {
        ForwardEuler { dt: 0.01 }
    }
}

impl OdeSolver for ForwardEuler {
    fn solve(
        &self, 
        system: &dyn OdeSystem, 
        initial: Array1<f64>, 
        time_grid: &[f64],
    ) -> Result<Vec<Array1<f64>>, SolverError> {
        check_inputs(system, &initial, time_grid)?;
        if !(self.dt > 0.) || !self.dt.is_finite() {
            return Err(SolverError::StepSizeUnderflow { time: time_grid[0], step: self.dt });
        }

        let mut states = Vec::with_capacity(time_grid.len());
        states.push(initial.clone());

        let mut y = initial;

        for pair in time_grid.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let substeps = ((end - start) / self.dt).ceil().max(1.) as usize;
            let h = (end - start) / substeps as f64;

            for i in 0..substeps {
                let t = start + i as f64 * h;
                let dy = system.derivatives(t, &y);
                y = &y + &(&dy * h);
            }

            if y.iter().any(|x| !x.is_finite()) {
                return Err(SolverError::NonFiniteState { time: end });
            }

            states.push(y.clone());
        }

        Ok(states)
    }
}
