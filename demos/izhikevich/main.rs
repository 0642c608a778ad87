extern crate neuron_models;
use neuron_models::{
    neuron::izhikevich::{IzhikevichNeuron, IzhikevichParameters},
    output::write_csv,
};


// Runs a default and a chattering Izhikevich neuron with the same input pulse
// and writes each trajectory to a .csv file at the working directory
fn main() {
    env_logger::init();

    let presets = [
        ("default", IzhikevichParameters::default()),
        ("chattering", IzhikevichParameters::chattering()),
    ];

    for (name, params) in presets {
        let mut neuron = IzhikevichNeuron::new(params).expect("Invalid parameters");
        let trajectory = neuron.run_pulse(5., 300., 800.).expect("Could not run neuron");

        println!("{} spikes: {}", name, trajectory.spike_count());

        write_csv(format!("izhikevich_{}.csv", name), trajectory.rows())
            .expect("Could not write to file");
    }
}
