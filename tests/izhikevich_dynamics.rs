#[cfg(test)]
mod test {
    use neuron_models::{
        error::{ConfigurationError, NeuronSimulationError},
        neuron::{
            izhikevich::{IzhikevichNeuron, IzhikevichParameters},
            run_static_input, CurrentVoltage, IterateAndSpike, IsSpiking, Timestep,
        },
        stimulus::{ConstantStimulus, PulseStimulus},
    };


    #[test]
    fn test_initial_condition() -> Result<(), ConfigurationError> {
        let neuron = IzhikevichNeuron::new(IzhikevichParameters::chattering())?;

        assert_eq!(neuron.get_current_voltage(), -65.);
        assert_eq!(neuron.recovery, 0.2 * -65.);
        assert_eq!(neuron.get_dt(), 0.5);

        Ok(())
    }

    #[test]
    fn test_step_uses_previous_voltage_for_recovery() -> Result<(), ConfigurationError> {
        let mut neuron = IzhikevichNeuron::new(IzhikevichParameters::default())?;
        neuron.current_voltage = -60.;
        neuron.recovery = -10.;

        neuron.step(10.);

        // dv = 0.04 * 3600 - 300 + 140 + 10 + 10 = 4
        assert!((neuron.current_voltage - -58.).abs() < 1e-12);
        // du = 0.02 * (0.2 * -60 + 10) = -0.04, using -58 would give -0.032
        assert!((neuron.recovery - -10.02).abs() < 1e-12);

        Ok(())
    }

    #[test]
    fn test_apply_reset() -> Result<(), ConfigurationError> {
        let params = IzhikevichParameters::default();
        let mut neuron = IzhikevichNeuron::new(params)?;

        neuron.current_voltage = 29.9;
        assert!(!neuron.apply_reset());
        assert_eq!(neuron.current_voltage, 29.9);

        neuron.current_voltage = 30.;
        neuron.recovery = -5.;
        assert!(neuron.apply_reset());
        assert!(neuron.is_spiking());
        assert_eq!(neuron.current_voltage, params.c);
        assert_eq!(neuron.recovery, -5. + params.d);

        Ok(())
    }

    #[test]
    fn test_rest_without_input() -> Result<(), ConfigurationError> {
        let mut neuron = IzhikevichNeuron::new(IzhikevichParameters::default())?;
        let trajectory = neuron.simulate(&ConstantStimulus(0.), 1000.)?;

        for i in 0..300 {
            assert!(trajectory.voltage[i] < 30.);
            assert!(!trajectory.spikes[i]);
        }
        assert_eq!(trajectory.spike_count(), 0);

        Ok(())
    }

    #[test]
    fn test_pulse_causes_spikes_inside_window() -> Result<(), NeuronSimulationError> {
        let params = IzhikevichParameters::default();
        let mut neuron = IzhikevichNeuron::new(params)?;

        let trajectory = neuron.run_pulse(5., 300., 800.)?;

        assert_eq!(trajectory.len(), 2001);
        assert_eq!(trajectory.stimulus_markers, vec![600, 1600]);

        let spike_indices: Vec<usize> = (0..trajectory.len())
            .filter(|i| trajectory.spikes[*i])
            .collect();

        assert!(!spike_indices.is_empty());
        assert!(spike_indices.iter().all(|i| trajectory.time[*i] >= 300.));
        assert!(spike_indices.iter().any(|i| trajectory.time[*i] <= 800.));
        for i in spike_indices {
            assert_eq!(trajectory.voltage[i], params.c);
        }

        Ok(())
    }

    #[test]
    fn test_pulse_window_is_inclusive() -> Result<(), NeuronSimulationError> {
        let mut neuron = IzhikevichNeuron::new(IzhikevichParameters::default())?;
        let trajectory = neuron.run_pulse(5., 300., 800.)?;

        assert_eq!(trajectory.input[599], 0.);
        assert_eq!(trajectory.input[600], 5.);
        assert_eq!(trajectory.input[1600], 5.);
        assert_eq!(trajectory.input[1601], 0.);

        Ok(())
    }

    #[test]
    fn test_horizon_extends_past_late_pulse() -> Result<(), NeuronSimulationError> {
        let mut neuron = IzhikevichNeuron::new(IzhikevichParameters::default())?;
        let trajectory = neuron.run_pulse(5., 900., 1200.)?;

        assert_eq!(trajectory.len(), 2401);
        assert_eq!(trajectory.time[trajectory.len() - 1], 1200.);

        Ok(())
    }

    #[test]
    fn test_reversed_window() -> Result<(), ConfigurationError> {
        let mut neuron = IzhikevichNeuron::new(IzhikevichParameters::default())?;

        assert!(matches!(
            neuron.run_pulse(5., 800., 300.),
            Err(NeuronSimulationError::ConfigurationRelatedError(
                ConfigurationError::StimulusWindowReversed { .. }
            ))
        ));
        assert!(PulseStimulus::new(5., 800., 300.).is_err());

        Ok(())
    }

    #[test]
    fn test_invalid_timestep() {
        assert!(matches!(
            IzhikevichNeuron::with_dt(IzhikevichParameters::default(), 0.),
            Err(ConfigurationError::NonPositiveTimestep(_))
        ));
    }

    #[test]
    fn test_set_dt_changes_integration_step() -> Result<(), ConfigurationError> {
        let mut neuron = IzhikevichNeuron::new(IzhikevichParameters::default())?;

        neuron.set_dt(0.25);
        assert_eq!(neuron.get_dt(), 0.25);
        assert_eq!(neuron.simulate(&ConstantStimulus(0.), 1000.)?.len(), 4001);

        neuron.set_dt(-1.);
        assert!(matches!(
            neuron.simulate(&ConstantStimulus(0.), 1000.),
            Err(ConfigurationError::NonPositiveTimestep(_))
        ));

        Ok(())
    }

    #[test]
    fn test_sample_count_is_bounded() -> Result<(), ConfigurationError> {
        let mut neuron = IzhikevichNeuron::with_dt(IzhikevichParameters::default(), 1e-310)?;

        assert!(matches!(
            neuron.simulate(&ConstantStimulus(0.), 1.),
            Err(ConfigurationError::TooManySamples { .. })
        ));

        let mut neuron = IzhikevichNeuron::new(IzhikevichParameters::default())?;
        assert!(matches!(
            neuron.simulate(&ConstantStimulus(0.), 1e300),
            Err(ConfigurationError::TooManySamples { .. })
        ));
        assert!(matches!(
            neuron.run_pulse(5., 300., 1e12),
            Err(NeuronSimulationError::ConfigurationRelatedError(ConfigurationError::TooManySamples { .. }))
        ));

        Ok(())
    }

    #[test]
    fn test_static_input_matches_simulation() -> Result<(), ConfigurationError> {
        let mut simulated = IzhikevichNeuron::new(IzhikevichParameters::regular_spiking())?;
        let trajectory = simulated.simulate(&ConstantStimulus(10.), 500.)?;

        let mut iterated = IzhikevichNeuron::new(IzhikevichParameters::regular_spiking())?;
        let voltages = run_static_input(&mut iterated, 10., None, 1000);

        assert_eq!(voltages.len(), 1000);
        assert_eq!(&voltages[..], &trajectory.voltage[1..]);

        let mut spikes = 0;
        let mut neuron = IzhikevichNeuron::new(IzhikevichParameters::regular_spiking())?;
        for _ in 0..1000 {
            if neuron.iterate_and_spike(10.) {
                spikes += 1;
            }
        }
        assert_eq!(spikes, trajectory.spike_count());
        assert!(spikes > 0);

        Ok(())
    }
}
