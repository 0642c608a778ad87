use std::fmt::{Display, Debug, Formatter, Result};


/// Error set for invalid model or stimulus configuration, these are
/// always reported before a simulation begins
pub enum ConfigurationError {
    /// Stimulus onset occurs after its offset
    StimulusWindowReversed { start: f64, end: f64 },
    /// Timestep must be positive and finite
    NonPositiveTimestep(f64),
    /// Capacitance must be positive and finite
    NonPositiveCapacitance(f64),
    /// Resistance must be positive and finite
    NonPositiveResistance(f64),
    /// Conductances cannot be negative
    NegativeConductance { name: &'static str, value: f64 },
    /// A parameter is `NaN` or infinite
    NonFiniteParameter(&'static str),
    /// Simulation duration must be non-negative and finite
    InvalidDuration(f64),
    /// Duration divided by timestep gives more samples than can be simulated
    TooManySamples { duration: f64, dt: f64 },
    /// Time grid has no samples
    EmptyTimeGrid,
    /// Time grid must be strictly increasing
    TimeGridNotIncreasing,
    /// Standard deviation of noise cannot be negative
    NegativeStandardDeviation(f64),
    /// Configuration field could not be parsed
    InvalidField { field: String, expected: &'static str },
    /// No known simulation table was found in the configuration
    NoSimulationFound,
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ConfigurationError::StimulusWindowReversed { start, end } => write!(
                f, "Start time must be before end time (start: {}, end: {})", start, end
            ),
            ConfigurationError::NonPositiveTimestep(dt) => write!(f, "Timestep must be positive, got {}", dt),
            ConfigurationError::NonPositiveCapacitance(c) => write!(f, "Capacitance must be positive, got {}", c),
            ConfigurationError::NonPositiveResistance(r) => write!(f, "Resistance must be positive, got {}", r),
            ConfigurationError::NegativeConductance { name, value } => write!(
                f, "Conductance '{}' cannot be negative, got {}", name, value
            ),
            ConfigurationError::NonFiniteParameter(name) => write!(f, "Parameter '{}' must be finite", name),
            ConfigurationError::InvalidDuration(duration) => write!(
                f, "Duration must be non-negative and finite, got {}", duration
            ),
            ConfigurationError::TooManySamples { duration, dt } => write!(
                f, "Duration of {} with timestep {} exceeds the maximum number of samples", duration, dt
            ),
            ConfigurationError::EmptyTimeGrid => write!(f, "Time grid must contain at least one sample"),
            ConfigurationError::TimeGridNotIncreasing => write!(f, "Time grid must be strictly increasing"),
            ConfigurationError::NegativeStandardDeviation(std) => write!(
                f, "Standard deviation cannot be negative, got {}", std
            ),
            ConfigurationError::InvalidField { field, expected } => write!(
                f, "Cannot parse {} as {}", field, expected
            ),
            ConfigurationError::NoSimulationFound => write!(f, "Simulation config not found"),
        }
    }
}

impl Debug for ConfigurationError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for failures while numerically integrating a system
pub enum SolverError {
    /// Time grid is empty, unsorted, or not finite
    InvalidTimeGrid,
    /// Initial state does not match the dimension of the system
    DimensionMismatch { expected: usize, found: usize },
    /// Adaptive step size fell below the minimum allowed step
    StepSizeUnderflow { time: f64, step: f64 },
    /// Integration used its entire step budget before reaching the end of the grid
    MaximumStepsExceeded { time: f64 },
    /// State contains `NaN` or infinite values
    NonFiniteState { time: f64 },
}

impl Display for SolverError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            SolverError::InvalidTimeGrid => write!(f, "Time grid must be finite and strictly increasing"),
            SolverError::DimensionMismatch { expected, found } => write!(
                f, "Initial state has dimension {} but system expects {}", found, expected
            ),
            SolverError::StepSizeUnderflow { time, step } => write!(
                f, "Step size {} fell below minimum at t = {}", step, time
            ),
            SolverError::MaximumStepsExceeded { time } => write!(
                f, "Maximum number of steps exceeded at t = {}", time
            ),
            SolverError::NonFiniteState { time } => write!(f, "State became non-finite at t = {}", time),
        }
    }
}

impl Debug for SolverError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// A set of errors that may occur when using the library
pub enum NeuronSimulationError {
    /// Errors related to model, stimulus, or configuration file values
    ConfigurationRelatedError(ConfigurationError),
    /// Errors related to numerical integration
    SolverRelatedError(SolverError),
    /// Errors related to reading or writing files
    IoRelatedError(std::io::Error),
    /// Errors related to writing trajectories
    CsvRelatedError(csv::Error),
    /// Errors related to parsing configuration files
    TomlRelatedError(toml::de::Error),
}

impl Display for NeuronSimulationError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            NeuronSimulationError::ConfigurationRelatedError(err) => write!(f, "{}", err),
            NeuronSimulationError::SolverRelatedError(err) => write!(f, "{}", err),
            NeuronSimulationError::IoRelatedError(err) => write!(f, "{}", err),
            NeuronSimulationError::CsvRelatedError(err) => write!(f, "{}", err),
            NeuronSimulationError::TomlRelatedError(err) => write!(f, "{}", err),
        }
    }
}

impl Debug for NeuronSimulationError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

impl std::error::Error for NeuronSimulationError {}

impl From<ConfigurationError> for NeuronSimulationError {
    fn from(err: ConfigurationError) -> NeuronSimulationError {
        NeuronSimulationError::ConfigurationRelatedError(err)
    }
}

impl From<SolverError> for NeuronSimulationError {
    fn from(err: SolverError) -> NeuronSimulationError {
        NeuronSimulationError::SolverRelatedError(err)
    }
}

impl From<std::io::Error> for NeuronSimulationError {
    fn from(err: std::io::Error) -> NeuronSimulationError {
        NeuronSimulationError::IoRelatedError(err)
    }
}

impl From<csv::Error> for NeuronSimulationError {
    fn from(err: csv::Error) -> NeuronSimulationError {
        NeuronSimulationError::CsvRelatedError(err)
    }
}

impl From<toml::de::Error> for NeuronSimulationError {
    fn from(err: toml::de::Error) -> NeuronSimulationError {
        NeuronSimulationError::TomlRelatedError(err)
    }
}
