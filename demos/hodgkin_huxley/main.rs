extern crate neuron_models;
use neuron_models::{
    neuron::hodgkin_huxley::{
        HodgkinHuxleyModel, HodgkinHuxleyParameters, HodgkinHuxleyState, time_grid,
    },
    output::write_csv,
    solver::DormandPrince,
    stimulus::StepStimulus,
};


// Drives a Hodgkin Huxley membrane with two current steps and writes the voltage,
// gating variables, and ionic currents to a .csv file at the working directory
fn main() {
    env_logger::init();

    let model = HodgkinHuxleyModel::new(
        HodgkinHuxleyParameters::default(), 
        StepStimulus::hodgkin_huxley_default(),
    ).expect("Invalid parameters");

    let grid = time_grid(450., 0.01).expect("Invalid time grid");
    let trajectory = model.integrate(&DormandPrince::default(), HodgkinHuxleyState::resting(), &grid)
        .expect("Could not integrate model");

    println!("spikes at: {:?}", trajectory.spike_times(0.));

    write_csv("hodgkin_huxley.csv", trajectory.rows())
        .expect("Could not write to file");
}
