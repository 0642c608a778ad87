//! # Neuron Models
//!
//! `neuron_models` simulates single neurons with three families of models,
//! a Hodgkin Huxley membrane integrated with an adaptive ODE solver, an
//! Izhikevich neuron and a leaky integrate and fire neuron that both advance
//! in fixed explicit Euler steps and reset discontinuously when they spike.
//! Each simulation produces a complete trajectory that can be written to a
//! `.csv` file for plotting.
//!
//! ## Example Code
//!
//! See the [`demos folder`](https://docs.rs/crate/neuron_models/latest/source/demos/) for more examples.
//!
//! ### Hodgkin Huxley model with a step stimulus
//!
//! ```rust
//! use neuron_models::{
//!     error::NeuronSimulationError,
//!     neuron::hodgkin_huxley::{
//!         HodgkinHuxleyModel, HodgkinHuxleyParameters, HodgkinHuxleyState, time_grid,
//!     },
//!     solver::DormandPrince,
//!     stimulus::StepStimulus,
//! };
//!
//! fn main() -> Result<(), NeuronSimulationError> {
//!     let model = HodgkinHuxleyModel::new(
//!         HodgkinHuxleyParameters::default(),
//!         StepStimulus::hodgkin_huxley_default(),
//!     )?;
//!
//!     let grid = time_grid(150., 0.05)?;
//!     let trajectory = model.integrate(&DormandPrince::default(), HodgkinHuxleyState::resting(), &grid)?;
//!
//!     // the stimulus switches on after 100 ms
//!     assert!(!trajectory.spike_times(0.).is_empty());
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Izhikevich neuron with a current pulse
//!
//! ```rust
//! use neuron_models::neuron::izhikevich::{IzhikevichNeuron, IzhikevichParameters};
//!
//! let mut neuron = IzhikevichNeuron::new(IzhikevichParameters::chattering()).unwrap();
//! let trajectory = neuron.run_pulse(5., 300., 800.).unwrap();
//!
//! println!("{} spikes", trajectory.spike_count());
//! ```
//!
//! ### Chaining leaky integrate and fire inputs
//!
//! ```rust
//! use neuron_models::neuron::integrate_and_fire::LeakyIntegrateAndFireNeuron;
//!
//! let mut neuron = LeakyIntegrateAndFireNeuron {
//!     resistance: 500.,
//!     ..LeakyIntegrateAndFireNeuron::default()
//! };
//!
//! neuron.run(20., 2000.).unwrap();
//! neuron.run(100., 1000.).unwrap();
//! neuron.run(0., 1000.).unwrap();
//!
//! assert_eq!(neuron.history.len(), 4001);
//! ```

pub mod error;
pub mod distribution;
pub mod stimulus;
pub mod solver;
pub mod neuron;
pub mod config;
pub mod output;
