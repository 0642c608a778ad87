#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use neuron_models::{
        distribution::GaussianParameters,
        error::ConfigurationError,
        neuron::{
            integrate_and_fire::{check_spike, step, LeakyIntegrateAndFireNeuron},
            run_static_input,
        },
    };


    proptest! {
        #[test]
        fn test_leak_never_increases_potential(
            potential in 0.0f64..1e6,
            resistance in 1e-3f64..1e4,
            dt in 1e-3f64..10.,
        ) {
            let next = step(potential, 0., resistance, dt);

            prop_assert!(next <= potential);
            prop_assert!(next >= 0.);
        }
    }

    #[test]
    fn test_check_spike() {
        assert_eq!(check_spike(10., 10.), (10., false));
        assert_eq!(check_spike(10.5, 10.), (0., true));
        assert_eq!(check_spike(-1., 10.), (-1., false));
    }

    #[test]
    fn test_step() {
        // 100 + 20 - 100 / 500
        assert!((step(100., 20., 500., 1.) - 119.8).abs() < 1e-12);
        // leak is capped at the potential itself
        assert_eq!(step(5., 0., 0.5, 1.), 0.);
    }

    #[test]
    fn test_chained_runs() -> Result<(), ConfigurationError> {
        let mut neuron = LeakyIntegrateAndFireNeuron {
            resistance: 500.,
            ..LeakyIntegrateAndFireNeuron::default()
        };

        // equilibrium of 20 * 500 never exceeds the threshold
        assert_eq!(neuron.run(20., 2000.)?, 0);
        assert_eq!(neuron.history.len(), 2001);

        let spikes = neuron.run(100., 1000.)?;
        assert!(spikes > 0);
        assert_eq!(neuron.history.len(), 3001);

        assert_eq!(neuron.run(0., 1000.)?, 0);
        assert_eq!(neuron.history.len(), 4001);
        assert_eq!(neuron.history.spike_count(), spikes);

        let tail = &neuron.history.potential[3000..];
        assert!(tail.windows(2).all(|pair| pair[1] <= pair[0]));
        assert!(tail.iter().all(|potential| *potential >= 0.));

        assert_eq!(neuron.history.input[2000], 20.);
        assert_eq!(neuron.history.input[2001], 100.);
        assert_eq!(neuron.history.input[3001], 0.);

        Ok(())
    }

    #[test]
    fn test_rate_curve_is_monotonic() -> Result<(), ConfigurationError> {
        let mut neuron = LeakyIntegrateAndFireNeuron {
            capacitance: 100.,
            resistance: 50.,
            ..LeakyIntegrateAndFireNeuron::default()
        };

        let rates = neuron.rate_curve(10)?;

        assert_eq!(rates.len(), 10);
        assert_eq!(rates[0], 0);
        assert_eq!(rates[1], 0);
        assert!(rates[9] > 0);
        assert!(rates.windows(2).all(|pair| pair[0] <= pair[1]));

        // history holds only the last level
        assert_eq!(neuron.history.len(), 1001);
        assert_eq!(neuron.history.spike_count(), rates[9]);

        Ok(())
    }

    #[test]
    fn test_reset() -> Result<(), ConfigurationError> {
        let mut neuron = LeakyIntegrateAndFireNeuron::default();
        neuron.run(500., 100.)?;
        neuron.reset();

        assert_eq!(neuron.history.len(), 1);
        assert_eq!(neuron.current_voltage, 0.);
        assert!(!neuron.is_spiking);

        Ok(())
    }

    #[test]
    fn test_invalid_configuration() {
        let mut neuron = LeakyIntegrateAndFireNeuron {
            resistance: 0.,
            ..LeakyIntegrateAndFireNeuron::default()
        };
        assert!(matches!(
            neuron.run(20., 100.),
            Err(ConfigurationError::NonPositiveResistance(_))
        ));
        assert_eq!(neuron.history.len(), 1);

        let mut neuron = LeakyIntegrateAndFireNeuron::default();
        assert!(matches!(
            neuron.run(20., -1.),
            Err(ConfigurationError::InvalidDuration(_))
        ));

        let mut neuron = LeakyIntegrateAndFireNeuron {
            capacitance: -1.,
            ..LeakyIntegrateAndFireNeuron::default()
        };
        assert!(neuron.rate_curve(5).is_err());
    }

    #[test]
    fn test_step_count_is_bounded() {
        let mut neuron = LeakyIntegrateAndFireNeuron { dt: 1e-310, ..LeakyIntegrateAndFireNeuron::default() };
        assert!(matches!(
            neuron.run(20., 1.),
            Err(ConfigurationError::TooManySamples { .. })
        ));

        let mut neuron = LeakyIntegrateAndFireNeuron::default();
        assert!(matches!(
            neuron.run(20., 1e300),
            Err(ConfigurationError::TooManySamples { .. })
        ));
        assert_eq!(neuron.history.len(), 1);
    }

    #[test]
    fn test_millivolt_input() -> Result<(), ConfigurationError> {
        let mut neuron = LeakyIntegrateAndFireNeuron {
            resistance: 1000.,
            ..LeakyIntegrateAndFireNeuron::millivolt_input()
        };

        assert!(neuron.run(650., 1000.)? > 0);
        // recorded input is unscaled
        assert_eq!(neuron.history.input[1], 650.);

        Ok(())
    }

    #[test]
    fn test_debug_does_not_change_results() -> Result<(), ConfigurationError> {
        let mut quiet = LeakyIntegrateAndFireNeuron { resistance: 500., ..LeakyIntegrateAndFireNeuron::default() };
        let mut verbose = LeakyIntegrateAndFireNeuron { debug: true, ..quiet.clone() };

        for (input, duration) in [(20., 200.), (100., 300.), (0., 100.)] {
            assert_eq!(quiet.run(input, duration)?, verbose.run(input, duration)?);
        }
        assert_eq!(quiet.history, verbose.history);

        Ok(())
    }

    #[test]
    fn test_static_input_without_noise() {
        let mut plain = LeakyIntegrateAndFireNeuron { resistance: 500., ..LeakyIntegrateAndFireNeuron::default() };
        let mut noisy = plain.clone();

        let gaussian = GaussianParameters::default();

        assert_eq!(
            run_static_input(&mut plain, 100., None, 500),
            run_static_input(&mut noisy, 100., Some(&gaussian), 500),
        );
    }
}
