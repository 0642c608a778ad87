#[cfg(test)]
mod test {
    use std::{env, fs};
    use neuron_models::{
        error::NeuronSimulationError,
        neuron::{
            integrate_and_fire::LeakyIntegrateAndFireNeuron,
            izhikevich::{IzhikevichNeuron, IzhikevichParameters},
        },
        output::{rate_rows, write_csv},
    };


    #[test]
    fn test_izhikevich_rows() -> Result<(), NeuronSimulationError> {
        let mut neuron = IzhikevichNeuron::new(IzhikevichParameters::default())?;
        let trajectory = neuron.run_pulse(5., 300., 800.)?;

        let path = env::temp_dir().join("neuron_models_izhikevich_rows.csv");
        let written = write_csv(&path, trajectory.rows())?;
        assert_eq!(written, trajectory.len());

        let content = fs::read_to_string(&path)?;
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("time,voltage,recovery,input,spike,marker"));
        assert_eq!(content.lines().count(), trajectory.len() + 1);

        let markers = content.lines()
            .skip(1)
            .filter(|line| line.ends_with(",1"))
            .count();
        assert_eq!(markers, 2);

        fs::remove_file(&path)?;

        Ok(())
    }

    #[test]
    fn test_rate_curve_rows() -> Result<(), NeuronSimulationError> {
        let mut neuron = LeakyIntegrateAndFireNeuron {
            capacitance: 100.,
            resistance: 50.,
            ..LeakyIntegrateAndFireNeuron::default()
        };
        let rates = neuron.rate_curve(5)?;

        let path = env::temp_dir().join("neuron_models_rate_curve.csv");
        assert_eq!(write_csv(&path, rate_rows(&rates))?, 5);

        let content = fs::read_to_string(&path)?;
        assert!(content.starts_with("current,spikes\n0,0\n"));

        fs::remove_file(&path)?;

        Ok(())
    }

    #[test]
    fn test_unwritable_path() {
        let path = env::temp_dir().join("neuron_models_missing_directory").join("rows.csv");

        assert!(write_csv(&path, rate_rows(&[1, 2])).is_err());
    }
}
