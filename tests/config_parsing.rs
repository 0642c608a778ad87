#[cfg(test)]
mod test {
    use neuron_models::{
        config::{parse_config, LIFConfig, SolverChoice},
        error::{ConfigurationError, NeuronSimulationError},
        neuron::hodgkin_huxley::HodgkinHuxleyParameters,
        neuron::izhikevich::IzhikevichParameters,
        stimulus::{Stimulus, StepStimulus},
    };


    #[test]
    fn test_empty_tables_use_defaults() -> Result<(), NeuronSimulationError> {
        let config = parse_config("[hodgkin_huxley]\n[izhikevich]\n[leaky_integrate_and_fire]\n")?;

        let hodgkin_huxley = config.hodgkin_huxley.expect("hodgkin huxley table");
        assert_eq!(hodgkin_huxley.params, HodgkinHuxleyParameters::default());
        assert_eq!(hodgkin_huxley.stimulus, StepStimulus::hodgkin_huxley_default());
        assert_eq!(hodgkin_huxley.total_time, 450.);
        assert_eq!(hodgkin_huxley.dt, 0.01);
        assert!(matches!(hodgkin_huxley.solver, SolverChoice::DormandPrince(_)));

        let izhikevich = config.izhikevich.expect("izhikevich table");
        assert_eq!(izhikevich.params, IzhikevichParameters::default());
        assert_eq!((izhikevich.input, izhikevich.start, izhikevich.end), (5., 300., 800.));
        assert_eq!(izhikevich.dt, 0.5);
        assert!(izhikevich.gaussian_params.is_none());

        let lif = config.leaky_integrate_and_fire.expect("leaky integrate and fire table");
        let defaults = LIFConfig::default();
        assert_eq!(lif.neuron.resistance, 500.);
        assert_eq!(lif.neuron.capacitance, 10000.);
        assert_eq!(lif.runs, defaults.runs);
        assert_eq!(lif.rate_curve_max_current, Some(100));

        Ok(())
    }

    #[test]
    fn test_missing_tables() -> Result<(), NeuronSimulationError> {
        let config = parse_config("[izhikevich]\npreset = \"chattering\"\n")?;

        assert!(config.hodgkin_huxley.is_none());
        assert!(config.leaky_integrate_and_fire.is_none());
        assert_eq!(config.izhikevich.expect("izhikevich table").params, IzhikevichParameters::chattering());

        assert!(matches!(
            parse_config(""),
            Err(NeuronSimulationError::ConfigurationRelatedError(ConfigurationError::NoSimulationFound))
        ));

        Ok(())
    }

    #[test]
    fn test_integers_are_read_as_floats() -> Result<(), NeuronSimulationError> {
        let config = parse_config("[izhikevich]\nc = -50\nend = 900\n")?;
        let izhikevich = config.izhikevich.expect("izhikevich table");

        assert_eq!(izhikevich.params.c, -50.);
        assert_eq!(izhikevich.end, 900.);

        Ok(())
    }

    #[test]
    fn test_hodgkin_huxley_table() -> Result<(), NeuronSimulationError> {
        let content = r#"
            [hodgkin_huxley]
            g_na = 100.0
            total_time = 50
            stimulus = [[5.0, 20.0], [10, -20]]
            solver = "euler"
            solver_dt = 0.001
            filename = "short.csv"
        "#;
        let hodgkin_huxley = parse_config(content)?.hodgkin_huxley.expect("hodgkin huxley table");

        assert_eq!(hodgkin_huxley.params.g_na, 100.);
        assert_eq!(hodgkin_huxley.total_time, 50.);
        assert_eq!(hodgkin_huxley.stimulus.current(7.), 20.);
        assert_eq!(hodgkin_huxley.stimulus.current(11.), 0.);
        assert!(matches!(hodgkin_huxley.solver, SolverChoice::ForwardEuler(ref solver) if solver.dt == 0.001));
        assert_eq!(hodgkin_huxley.filename, "short.csv");

        Ok(())
    }

    #[test]
    fn test_leaky_integrate_and_fire_table() -> Result<(), NeuronSimulationError> {
        let content = r#"
            [leaky_integrate_and_fire]
            millivolt_input = true
            resistance = 1000
            runs = [[650, 500]]
            rate_curve_max_current = 20
        "#;
        let lif = parse_config(content)?.leaky_integrate_and_fire.expect("leaky integrate and fire table");

        assert_eq!(lif.neuron.capacitance, 10.);
        assert_eq!(lif.neuron.input_scale, 1. / 1000.);
        assert_eq!(lif.neuron.resistance, 1000.);
        assert_eq!(lif.runs, vec![(650., 500.)]);
        assert_eq!(lif.rate_curve_max_current, Some(20));

        Ok(())
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            "[izhikevich]\nstart = 800.0\nend = 300.0\n",
            "[izhikevich]\npreset = \"unknown\"\n",
            "[izhikevich]\na = \"fast\"\n",
            "[izhikevich]\ngaussian = true\ngaussian_std = -1.0\n",
            "[izhikevich]\ndt = 0.0\n",
            "[hodgkin_huxley]\nsolver = \"leapfrog\"\n",
            "[hodgkin_huxley]\nc_m = 0.0\n",
            "[hodgkin_huxley]\ndt = -0.01\n",
            "[hodgkin_huxley]\nstimulus = [[1.0, 2.0, 3.0]]\n",
            "[leaky_integrate_and_fire]\nresistance = 0.0\n",
            "[leaky_integrate_and_fire]\nruns = [[20.0, -5.0]]\n",
            "[leaky_integrate_and_fire]\nrate_curve_max_current = -1\n",
        ];

        for content in cases {
            assert!(
                matches!(parse_config(content), Err(NeuronSimulationError::ConfigurationRelatedError(_))),
                "accepted: {}", content,
            );
        }

        assert!(matches!(
            parse_config("[izhikevich\n"),
            Err(NeuronSimulationError::TomlRelatedError(_))
        ));
    }
}
