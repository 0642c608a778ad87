//! Reads simulation settings from `.toml` files. Every key is optional and 
//! defaults to the values of the classic demonstrations, so an empty table
//! reproduces them. Recognized tables are `[hodgkin_huxley]`, `[izhikevich]`, 
//! and `[leaky_integrate_and_fire]`.
//!
//! ```toml
//! [izhikevich]
//! a = 0.02
//! b = 0.2
//! c = -50.0
//! d = 2.0
//! input = 5.0
//! start = 300.0
//! end = 800.0
//! filename = "chattering.csv"
//! ```

use toml::Value;
use crate::distribution::GaussianParameters;
use crate::error::{ConfigurationError, NeuronSimulationError};
use crate::neuron::hodgkin_huxley::{HodgkinHuxleyParameters, HodgkinHuxleyState};
use crate::neuron::integrate_and_fire::LeakyIntegrateAndFireNeuron;
use crate::neuron::izhikevich::{IzhikevichParameters, DEFAULT_DT};
use crate::solver::{DormandPrince, ForwardEuler, SolverTolerances};
use crate::stimulus::StepStimulus;


fn invalid_field(field_name: &str, expected: &'static str) -> ConfigurationError {
    ConfigurationError::InvalidField { field: field_name.to_string(), expected }
}

pub fn parse_bool(value: &Value, field_name: &str) -> Result<bool, ConfigurationError> {
    value
        .as_bool()
        .ok_or_else(|| invalid_field(field_name, "boolean"))
}

pub fn parse_usize(value: &Value, field_name: &str) -> Result<usize, ConfigurationError> {
    value
        .as_integer()
        .filter(|v| *v >= 0)
        .ok_or_else(|| invalid_field(field_name, "unsigned integer"))
        .map(|v| v as usize)
}

/// Parses floats as well as integers so `end = 800` is accepted
pub fn parse_f64(value: &Value, field_name: &str) -> Result<f64, ConfigurationError> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|v| v as f64))
        .ok_or_else(|| invalid_field(field_name, "float"))
}

pub fn parse_string(value: &Value, field_name: &str) -> Result<String, ConfigurationError> {
    value
        .as_str()
        .ok_or_else(|| invalid_field(field_name, "string"))
        .map(String::from)
}

/// Parses an array of `[x, y]` number pairs
pub fn parse_pairs(value: &Value, field_name: &str) -> Result<Vec<(f64, f64)>, ConfigurationError> {
    let array = value.as_array().ok_or_else(|| invalid_field(field_name, "array of pairs"))?;

    array.iter()
        .map(|pair| {
            match pair.as_array().map(|i| i.as_slice()) {
                Some([x, y]) => Ok((parse_f64(x, field_name)?, parse_f64(y, field_name)?)),
                _ => Err(invalid_field(field_name, "array of pairs")),
            }
        })
        .collect()
}

pub fn parse_value_with_default<T>(
    table: &Value,
    key: &str,
    parser: impl Fn(&Value, &str) -> Result<T, ConfigurationError>,
    default: T,
) -> Result<T, ConfigurationError> {
    table
        .get(key)
        .map_or(Ok(default), |value| parser(value, key))
}

/// Solver used to integrate the Hodgkin Huxley model
#[derive(Debug, Clone)]
pub enum SolverChoice {
    DormandPrince(DormandPrince),
    ForwardEuler(ForwardEuler),
}

impl SolverChoice {
    fn from_table(table: &Value) -> Result<SolverChoice, ConfigurationError> {
        let solver: String = parse_value_with_default(table, "solver", parse_string, String::from("dormand prince"))?;

        let output = match solver.to_ascii_lowercase().as_str() {
            "dormand prince" | "dormand-prince" | "dopri5" | "adaptive" => {
                let defaults = SolverTolerances::default();
                let tolerances = SolverTolerances {
                    rtol: parse_value_with_default(table, "rtol", parse_f64, defaults.rtol)?,
                    atol: parse_value_with_default(table, "atol", parse_f64, defaults.atol)?,
                    max_step: parse_value_with_default(table, "max_step", parse_f64, defaults.max_step)?,
                    ..defaults
                };

                SolverChoice::DormandPrince(DormandPrince::new(tolerances))
            },
            "euler" | "forward euler" => {
                let dt = parse_value_with_default(table, "solver_dt", parse_f64, ForwardEuler::default().dt)?;
                if !(dt > 0.) || !dt.is_finite() {
                    return Err(ConfigurationError::NonPositiveTimestep(dt));
                }

                SolverChoice::ForwardEuler(ForwardEuler { dt })
            },
            _ => { return Err(invalid_field("solver", "one of the valid solvers")); },
        };

        Ok(output)
    }
}

/// Settings for a Hodgkin Huxley simulation
#[derive(Debug, Clone)]
pub struct HodgkinHuxleyConfig {
    pub params: HodgkinHuxleyParameters,
    pub initial_state: HodgkinHuxleyState,
    pub stimulus: StepStimulus,
    /// Total simulated time (ms)
    pub total_time: f64,
    /// Spacing of output samples (ms)
    pub dt: f64,
    pub solver: SolverChoice,
    pub filename: String,
}

impl Default for HodgkinHuxleyConfig {
    fn default() -> Self {
        HodgkinHuxleyConfig {
            params: HodgkinHuxleyParameters::default(),
            initial_state: HodgkinHuxleyState::resting(),
            stimulus: StepStimulus::hodgkin_huxley_default(),
            total_time: 450.,
            dt: 0.01,
            solver: SolverChoice::DormandPrince(DormandPrince::default()),
            filename: String::from("hodgkin_huxley.csv"),
        }
    }
}

impl HodgkinHuxleyConfig {
    pub fn from_table(table: &Value) -> Result<Self, ConfigurationError> {
        let defaults = HodgkinHuxleyConfig::default();
        let default_params = defaults.params;
        let default_state = defaults.initial_state;

        let params = HodgkinHuxleyParameters {
            c_m: parse_value_with_default(table, "c_m", parse_f64, default_params.c_m)?,
            g_na: parse_value_with_default(table, "g_na", parse_f64, default_params.g_na)?,
            g_k: parse_value_with_default(table, "g_k", parse_f64, default_params.g_k)?,
            g_l: parse_value_with_default(table, "g_l", parse_f64, default_params.g_l)?,
            e_na: parse_value_with_default(table, "e_na", parse_f64, default_params.e_na)?,
            e_k: parse_value_with_default(table, "e_k", parse_f64, default_params.e_k)?,
            e_l: parse_value_with_default(table, "e_l", parse_f64, default_params.e_l)?,
        };
        params.validate()?;

        let initial_state = HodgkinHuxleyState {
            voltage: parse_value_with_default(table, "v_init", parse_f64, default_state.voltage)?,
            m: parse_value_with_default(table, "m_init", parse_f64, default_state.m)?,
            h: parse_value_with_default(table, "h_init", parse_f64, default_state.h)?,
            n: parse_value_with_default(table, "n_init", parse_f64, default_state.n)?,
        };

        let stimulus = match table.get("stimulus") {
            Some(value) => StepStimulus::new(&parse_pairs(value, "stimulus")?)?,
            None => defaults.stimulus,
        };

        let total_time = parse_value_with_default(table, "total_time", parse_f64, defaults.total_time)?;
        if !(total_time >= 0.) || !total_time.is_finite() {
            return Err(ConfigurationError::InvalidDuration(total_time));
        }
        let dt = parse_value_with_default(table, "dt", parse_f64, defaults.dt)?;
        if !(dt > 0.) || !dt.is_finite() {
            return Err(ConfigurationError::NonPositiveTimestep(dt));
        }

        Ok(HodgkinHuxleyConfig {
            params,
            initial_state,
            stimulus,
            total_time,
            dt,
            solver: SolverChoice::from_table(table)?,
            filename: parse_value_with_default(table, "filename", parse_string, defaults.filename)?,
        })
    }
}

/// Settings for an Izhikevich simulation with a rectangular input pulse
#[derive(Debug, Clone)]
pub struct IzhikevichConfig {
    pub params: IzhikevichParameters,
    /// Timestep (ms)
    pub dt: f64,
    /// Input magnitude
    pub input: f64,
    /// Onset of input (ms)
    pub start: f64,
    /// Offset of input (ms)
    pub end: f64,
    /// Noise applied to the input, `None` when the input is exact
    pub gaussian_params: Option<GaussianParameters>,
    pub filename: String,
}

impl Default for IzhikevichConfig {
    fn default() -> Self {
        IzhikevichConfig {
            params: IzhikevichParameters::default(),
            dt: DEFAULT_DT,
            input: 5.,
            start: 300.,
            end: 800.,
            gaussian_params: None,
            filename: String::from("izhikevich.csv"),
        }
    }
}

fn parse_gaussian(table: &Value) -> Result<Option<GaussianParameters>, ConfigurationError> {
    if !parse_value_with_default(table, "gaussian", parse_bool, false)? {
        return Ok(None);
    }

    let defaults = GaussianParameters::default();
    let params = GaussianParameters {
        mean: parse_value_with_default(table, "gaussian_mean", parse_f64, defaults.mean)?,
        std: parse_value_with_default(table, "gaussian_std", parse_f64, defaults.std)?,
        max: parse_value_with_default(table, "gaussian_max", parse_f64, defaults.max)?,
        min: parse_value_with_default(table, "gaussian_min", parse_f64, defaults.min)?,
    };
    params.validate()?;

    Ok(Some(params))
}

impl IzhikevichConfig {
    pub fn from_table(table: &Value) -> Result<Self, ConfigurationError> {
        let defaults = IzhikevichConfig::default();

        let preset: String = parse_value_with_default(table, "preset", parse_string, String::from("default"))?;
        let preset_params = match preset.to_ascii_lowercase().as_str() {
            "default" => IzhikevichParameters::default(),
            "chattering" => IzhikevichParameters::chattering(),
            "regular spiking" => IzhikevichParameters::regular_spiking(),
            "fast spiking" => IzhikevichParameters::fast_spiking(),
            "intrinsically bursting" => IzhikevichParameters::intrinsically_bursting(),
            _ => { return Err(invalid_field("preset", "one of the valid presets")); },
        };

        let params = IzhikevichParameters {
            a: parse_value_with_default(table, "a", parse_f64, preset_params.a)?,
            b: parse_value_with_default(table, "b", parse_f64, preset_params.b)?,
            c: parse_value_with_default(table, "c", parse_f64, preset_params.c)?,
            d: parse_value_with_default(table, "d", parse_f64, preset_params.d)?,
            v_th: parse_value_with_default(table, "v_th", parse_f64, preset_params.v_th)?,
            v_init: parse_value_with_default(table, "v_init", parse_f64, preset_params.v_init)?,
        };
        params.validate()?;

        let dt = parse_value_with_default(table, "dt", parse_f64, defaults.dt)?;
        if !(dt > 0.) || !dt.is_finite() {
            return Err(ConfigurationError::NonPositiveTimestep(dt));
        }

        let input = parse_value_with_default(table, "input", parse_f64, defaults.input)?;
        let start = parse_value_with_default(table, "start", parse_f64, defaults.start)?;
        let end = parse_value_with_default(table, "end", parse_f64, defaults.end)?;
        if start > end {
            return Err(ConfigurationError::StimulusWindowReversed { start, end });
        }

        Ok(IzhikevichConfig {
            params,
            dt,
            input,
            start,
            end,
            gaussian_params: parse_gaussian(table)?,
            filename: parse_value_with_default(table, "filename", parse_string, defaults.filename)?,
        })
    }
}

/// Settings for chained leaky integrate and fire runs followed by an optional rate curve
#[derive(Debug, Clone)]
pub struct LIFConfig {
    pub neuron: LeakyIntegrateAndFireNeuron,
    /// `(input, duration)` pairs simulated in order
    pub runs: Vec<(f64, f64)>,
    /// Number of input levels in the rate curve, `None` to skip it
    pub rate_curve_max_current: Option<usize>,
    pub filename: String,
    pub rate_curve_filename: String,
}

impl Default for LIFConfig {
    fn default() -> Self {
        LIFConfig {
            neuron: LeakyIntegrateAndFireNeuron {
                resistance: 500.,
                ..LeakyIntegrateAndFireNeuron::default()
            },
            runs: vec![(20., 2000.), (100., 1000.), (0., 1000.)],
            rate_curve_max_current: Some(100),
            filename: String::from("lif.csv"),
            rate_curve_filename: String::from("lif_rate_curve.csv"),
        }
    }
}

impl LIFConfig {
    pub fn from_table(table: &Value) -> Result<Self, ConfigurationError> {
        let defaults = LIFConfig::default();

        let mut neuron = if parse_value_with_default(table, "millivolt_input", parse_bool, false)? {
            LeakyIntegrateAndFireNeuron::millivolt_input()
        } else {
            defaults.neuron.clone()
        };
        neuron.capacitance = parse_value_with_default(table, "capacitance", parse_f64, neuron.capacitance)?;
        neuron.resistance = parse_value_with_default(table, "resistance", parse_f64, neuron.resistance)?;
        neuron.dt = parse_value_with_default(table, "dt", parse_f64, neuron.dt)?;
        neuron.input_scale = parse_value_with_default(table, "input_scale", parse_f64, neuron.input_scale)?;
        neuron.debug = parse_value_with_default(table, "debug", parse_bool, neuron.debug)?;
        neuron.validate()?;

        let runs = match table.get("runs") {
            Some(value) => parse_pairs(value, "runs")?,
            None => defaults.runs,
        };
        if let Some((_, duration)) = runs.iter().find(|(_, duration)| !(*duration >= 0.) || !duration.is_finite()) {
            return Err(ConfigurationError::InvalidDuration(*duration));
        }

        let rate_curve_max_current = match table.get("rate_curve_max_current") {
            Some(value) => Some(parse_usize(value, "rate_curve_max_current")?),
            None => defaults.rate_curve_max_current,
        };

        Ok(LIFConfig {
            neuron,
            runs,
            rate_curve_max_current,
            filename: parse_value_with_default(table, "filename", parse_string, defaults.filename)?,
            rate_curve_filename: parse_value_with_default(
                table, "rate_curve_filename", parse_string, defaults.rate_curve_filename
            )?,
        })
    }
}

/// Every simulation requested by a configuration file
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub hodgkin_huxley: Option<HodgkinHuxleyConfig>,
    pub izhikevich: Option<IzhikevichConfig>,
    pub leaky_integrate_and_fire: Option<LIFConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            hodgkin_huxley: Some(HodgkinHuxleyConfig::default()),
            izhikevich: Some(IzhikevichConfig::default()),
            leaky_integrate_and_fire: Some(LIFConfig::default()),
        }
    }
}

/// Parses the contents of a `.toml` configuration, at least one simulation table is required
pub fn parse_config(content: &str) -> Result<SimulationConfig, NeuronSimulationError> {
    let config: Value = toml::from_str(content)?;

    let hodgkin_huxley = config.get("hodgkin_huxley")
        .map(HodgkinHuxleyConfig::from_table)
        .transpose()?;
    let izhikevich = config.get("izhikevich")
        .map(IzhikevichConfig::from_table)
        .transpose()?;
    let leaky_integrate_and_fire = config.get("leaky_integrate_and_fire")
        .map(LIFConfig::from_table)
        .transpose()?;

    if hodgkin_huxley.is_none() && izhikevich.is_none() && leaky_integrate_and_fire.is_none() {
        return Err(ConfigurationError::NoSimulationFound.into());
    }

    Ok(SimulationConfig { hodgkin_huxley, izhikevich, leaky_integrate_and_fire })
}
