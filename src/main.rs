use std::{env, fs::read_to_string};
use neuron_models::{
    config::{
        parse_config, HodgkinHuxleyConfig, IzhikevichConfig, LIFConfig,
        SimulationConfig, SolverChoice,
    },
    error::NeuronSimulationError,
    neuron::{
        hodgkin_huxley::{time_grid, HodgkinHuxleyModel, HodgkinHuxleyTrajectory},
        izhikevich::IzhikevichNeuron,
    },
    output::{rate_rows, write_csv},
    stimulus::{NoisyStimulus, PulseStimulus},
};


fn run_hodgkin_huxley(config: &HodgkinHuxleyConfig) -> Result<(), NeuronSimulationError> {
    log::info!("hodgkin huxley: {:#?}", config.params);

    let model = HodgkinHuxleyModel::new(config.params, config.stimulus.clone())?;
    let grid = time_grid(config.total_time, config.dt)?;

    let trajectory: HodgkinHuxleyTrajectory = match &config.solver {
        SolverChoice::DormandPrince(solver) => model.integrate(solver, config.initial_state, &grid)?,
        SolverChoice::ForwardEuler(solver) => model.integrate(solver, config.initial_state, &grid)?,
    };

    log::info!("hodgkin huxley: {} spikes", trajectory.spike_times(0.).len());

    write_csv(&config.filename, trajectory.rows())?;

    Ok(())
}

fn run_izhikevich(config: &IzhikevichConfig) -> Result<(), NeuronSimulationError> {
    log::info!("izhikevich: {:#?}, dt: {}", config.params, config.dt);

    let mut neuron = IzhikevichNeuron::with_dt(config.params, config.dt)?;

    let trajectory = match config.gaussian_params {
        Some(gaussian_params) => {
            let stimulus = NoisyStimulus::new(
                PulseStimulus::new(config.input, config.start, config.end)?,
                gaussian_params,
            )?;

            neuron.simulate(&stimulus, config.end.max(1000.))?
        },
        None => neuron.run_pulse(config.input, config.start, config.end)?,
    };

    write_csv(&config.filename, trajectory.rows())?;

    Ok(())
}

fn run_leaky_integrate_and_fire(config: &LIFConfig) -> Result<(), NeuronSimulationError> {
    let mut neuron = config.neuron.clone();
    log::info!(
        "leaky integrate and fire: capacitance: {}, resistance: {}, dt: {}",
        neuron.capacitance, neuron.resistance, neuron.dt,
    );

    for (input, duration) in &config.runs {
        let spikes = neuron.run(*input, *duration)?;
        log::info!("leaky integrate and fire: input {} for {} ms, {} spikes", input, duration, spikes);
    }

    write_csv(&config.filename, neuron.history.rows(neuron.dt))?;

    if let Some(max_current) = config.rate_curve_max_current {
        let mut rate_neuron = config.neuron.clone();
        rate_neuron.debug = false;

        let rates = rate_neuron.rate_curve(max_current)?;
        write_csv(&config.rate_curve_filename, rate_rows(&rates))?;
    }

    Ok(())
}

fn main() -> Result<(), NeuronSimulationError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();

    let config = match args.get(1) {
        Some(filename) => {
            log::info!("reading config from {}", filename);
            parse_config(&read_to_string(filename)?)?
        },
        None => {
            log::info!("no config given, running default simulations");
            SimulationConfig::default()
        },
    };

    if let Some(hodgkin_huxley) = &config.hodgkin_huxley {
        run_hodgkin_huxley(hodgkin_huxley)?;
    }
    if let Some(izhikevich) = &config.izhikevich {
        run_izhikevich(izhikevich)?;
    }
    if let Some(leaky_integrate_and_fire) = &config.leaky_integrate_and_fire {
        run_leaky_integrate_and_fire(leaky_integrate_and_fire)?;
    }

    log::info!("finished simulations");

    Ok(())
}
