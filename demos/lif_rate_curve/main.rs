extern crate neuron_models;
use neuron_models::{
    neuron::integrate_and_fire::LeakyIntegrateAndFireNeuron,
    output::{rate_rows, write_csv},
};


// Chains three input regimes through a leaky integrate and fire neuron, then
// measures its firing rate across input levels, both are written as .csv files
fn main() {
    env_logger::init();

    let mut neuron = LeakyIntegrateAndFireNeuron {
        resistance: 500.,
        dt: 1.,
        ..LeakyIntegrateAndFireNeuron::default()
    };

    for (input, duration) in [(20., 2000.), (100., 1000.), (0., 1000.)] {
        let spikes = neuron.run(input, duration).expect("Could not run neuron");
        println!("input: {}, duration: {} ms, spikes: {}", input, duration, spikes);
    }

    write_csv("lif_activity.csv", neuron.history.rows(neuron.dt))
        .expect("Could not write to file");

    let rates = neuron.rate_curve(100).expect("Could not calculate rate curve");
    write_csv("lif_rate_curve.csv", rate_rows(&rates))
        .expect("Could not write to file");
}
