use eosgrid::ndarray::Array2;
use eosgrid::prelude::*;
use eosgrid::{AxisKind, Error, GridMerger};

fn pressure(d: f64, t: f64) -> f64 {
    d * t + 0.5 * d * d
}

fn energy(d: f64, t: f64) -> f64 {
    1.5 * t + 0.1 * d.ln()
}

fn species_grid(density: Vec<f64>, temperature: Vec<f64>, scale: f64) -> Grid {
    let shape = (density.len(), temperature.len());
    let pres = Array2::from_shape_fn(shape, |(i, j)| scale * pressure(density[i], temperature[j]));
    let eint = Array2::from_shape_fn(shape, |(i, j)| scale * energy(density[i], temperature[j]));

    Grid::from_vecs(density, temperature)
        .unwrap()
        .with_field("pres", pres)
        .unwrap()
        .with_field("eint", eint)
        .unwrap()
}

fn setup_collection() -> SpeciesCollection {
    let ele = species_grid(
        vec![1e-3, 1e-2, 0.1, 1.0, 10.0],
        vec![1.0, 10.0, 100.0, 1000.0],
        1.0,
    );
    let ioncc = species_grid(
        vec![5e-3, 0.05, 0.1, 2.0, 20.0],
        vec![0.5, 5.0, 10.0, 50.0, 500.0],
        2.0,
    );
    let total = species_grid(vec![1e-4, 1.0, 100.0], vec![0.1, 1e4], 3.0);

    SpeciesCollection::new()
        .with_species("ele", ele)
        .with_species("ioncc", ioncc)
        .with_species("total", total)
}

mod shared_axes {
    use super::*;

    #[test]
    fn merged_species_share_axes() {
        let collection = setup_collection();
        assert_ne!(
            collection.get("ele").unwrap().density(),
            collection.get("ioncc").unwrap().density()
        );

        let merged = eosgrid::merge(&collection, &["ele", "ioncc"], &MergeConfig::default()).unwrap();

        let ele = merged.get("ele").unwrap();
        let ioncc = merged.get("ioncc").unwrap();

        assert_eq!(ele.density(), ioncc.density());
        assert_eq!(ele.temperature(), ioncc.temperature());

        assert_eq!(
            ele.density().as_slice(),
            &[5e-3, 1e-2, 0.05, 0.1, 1.0, 2.0, 10.0]
        );
        assert_eq!(
            ele.temperature().as_slice(),
            &[1.0, 5.0, 10.0, 50.0, 100.0, 500.0]
        );
    }

    #[test]
    fn every_field_is_resampled() {
        let collection = setup_collection();
        let merged = eosgrid::merge(&collection, &["ele", "ioncc"], &MergeConfig::default()).unwrap();

        for name in ["ele", "ioncc"] {
            let grid = merged.get(name).unwrap();
            let names: Vec<&str> = grid.field_names().collect();
            assert_eq!(names, vec!["eint", "pres"]);

            for (_, table) in grid.fields() {
                assert_eq!(table.dim(), grid.shape());
            }
        }
    }

    #[test]
    fn values_at_original_samples_are_kept() {
        let collection = setup_collection();
        let merged = eosgrid::merge(&collection, &["ele", "ioncc"], &MergeConfig::default()).unwrap();

        let before = collection.get("ele").unwrap();
        let after = merged.get("ele").unwrap();

        // (0.1, 10.0) and (1.0, 100.0) are samples of the original electron grid
        for (d, t) in [(0.1, 10.0), (1.0, 100.0)] {
            let i0 = before.density().iter().position(|x| *x == d).unwrap();
            let j0 = before.temperature().iter().position(|x| *x == t).unwrap();
            let i1 = after.density().iter().position(|x| *x == d).unwrap();
            let j1 = after.temperature().iter().position(|x| *x == t).unwrap();

            for field in ["pres", "eint"] {
                assert_eq!(
                    after.field(field).unwrap()[[i1, j1]],
                    before.field(field).unwrap()[[i0, j0]]
                );
            }
        }
    }

    #[test]
    fn resampled_values_match_the_interpolator() {
        let collection = setup_collection();
        let merged = eosgrid::merge(&collection, &["ele", "ioncc"], &MergeConfig::default()).unwrap();

        let before = collection.get("ioncc").unwrap();
        let after = merged.get("ioncc").unwrap();

        let eval = BoundaryInterpolator::default()
            .build(
                before.field("pres").unwrap(),
                before.density(),
                before.temperature(),
            )
            .unwrap();

        let expected = eval.evaluate_grid(after.density(), after.temperature());
        assert_eq!(after.field("pres").unwrap(), &expected);
    }

    #[test]
    fn single_species_is_a_resample_onto_itself() {
        let collection = setup_collection();
        let merged = eosgrid::merge(&collection, &["ele"], &MergeConfig::default()).unwrap();

        assert_eq!(merged.get("ele"), collection.get("ele"));
    }
}

mod pass_through {
    use super::*;

    #[test]
    fn other_species_are_unchanged() {
        let collection = setup_collection();
        let merged = eosgrid::merge(&collection, &["ele", "ioncc"], &MergeConfig::default()).unwrap();

        let keys: Vec<&str> = merged.species().collect();
        assert_eq!(keys, vec!["ele", "ioncc", "total"]);
        assert_eq!(merged.get("total"), collection.get("total"));
    }

    #[test]
    fn input_collection_is_not_modified() {
        let collection = setup_collection();
        let snapshot = collection.clone();

        let _ = eosgrid::merge(&collection, &["ele", "ioncc", "total"], &MergeConfig::default())
            .unwrap();

        assert_eq!(collection, snapshot);
    }
}

mod filters {
    use super::*;

    #[test]
    fn filters_restrict_the_common_axes() {
        let collection = setup_collection();
        let config = MergeConfig::default()
            .with_density_filter(AxisFilter::range(0.01, 5.0))
            .with_temperature_filter(AxisFilter::new("T < 60", |t| t < 60.0));

        let merged = eosgrid::merge(&collection, &["ele", "ioncc"], &config).unwrap();
        let ele = merged.get("ele").unwrap();

        // the filtered electron axis starts at 0.01 and ends at 1.0, the ion axis
        // starts at 0.05
        assert_eq!(ele.density().as_slice(), &[0.05, 0.1, 1.0]);
        assert_eq!(ele.temperature().as_slice(), &[1.0, 5.0, 10.0]);
    }

    #[test]
    fn default_filter_drops_non_positive_points() {
        let cold = Grid::from_vecs(vec![-1.0, 0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 2.0]).unwrap();
        let collection = SpeciesCollection::new().with_species("cold", cold);

        let (density, temperature) =
            eosgrid::common_axes(&collection, &["cold"], &MergeConfig::default()).unwrap();
        assert_eq!(density.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(temperature.as_slice(), &[1.0, 2.0]);

        let config = MergeConfig::default()
            .with_density_filter(AxisFilter::keep_all())
            .with_temperature_filter(AxisFilter::keep_all());
        let (density, _) = eosgrid::common_axes(&collection, &["cold"], &config).unwrap();
        assert_eq!(density.len(), 5);
    }

    #[test]
    fn filtered_samples_still_shape_the_surface() {
        // the filter only narrows the output axes, the surfaces are fitted on the
        // full original grids
        let collection = setup_collection();
        let config = MergeConfig::default().with_density_filter(AxisFilter::range(0.05, 20.0));

        let merged = eosgrid::merge(&collection, &["ioncc"], &config).unwrap();
        let ioncc = merged.get("ioncc").unwrap();
        let original = collection.get("ioncc").unwrap();

        assert_eq!(ioncc.density().as_slice(), &[0.05, 0.1, 2.0, 20.0]);
        assert_eq!(
            ioncc.field("pres").unwrap().row(0),
            original.field("pres").unwrap().row(1)
        );
    }
}

mod threshold {
    use super::*;

    fn noisy_collection() -> SpeciesCollection {
        let density = vec![0.1, 0.2, 0.4, 0.8];
        let temperature = vec![1.0, 2.0, 3.0];

        let ion_density = vec![0.15, 0.3, 0.6, 0.9];
        let ion_temperature = vec![1.5, 2.5, 3.5];

        // a field that is zero over most of the table with a spike on one corner,
        // the spline rings around the spike and leaves tiny residuals nearby
        let spike = |n: usize, m: usize| {
            let mut table = Array2::<f64>::zeros((n, m));
            table[[n - 1, m - 1]] = 1e-14;
            table[[0, 0]] = 1e-17;
            table
        };

        let ele = Grid::from_vecs(density, temperature)
            .unwrap()
            .with_field("zbar", spike(4, 3))
            .unwrap()
            .with_field("pres", spike(4, 3))
            .unwrap();
        let ion = Grid::from_vecs(ion_density, ion_temperature)
            .unwrap()
            .with_field("zbar", spike(4, 3))
            .unwrap();

        SpeciesCollection::new()
            .with_species("ele", ele)
            .with_species("ion", ion)
    }

    #[test]
    fn threshold_fields_have_no_tiny_values() {
        let collection = noisy_collection();
        let epsilon = 1e-15;
        let config = MergeConfig::default()
            .with_threshold_fields(["zbar"])
            .with_threshold_epsilon(epsilon);

        let merged = eosgrid::merge(&collection, &["ele", "ion"], &config).unwrap();

        for name in ["ele", "ion"] {
            let zbar = merged.get(name).unwrap().field("zbar").unwrap();
            assert!(zbar
                .iter()
                .all(|v| *v == 0.0 || v.abs() > epsilon), "{zbar:?}");
        }
    }

    #[test]
    fn other_fields_are_left_alone() {
        let collection = noisy_collection();
        let config = MergeConfig::default()
            .with_threshold_fields(["zbar"])
            .with_threshold_epsilon(1.0);

        let merged = eosgrid::merge(&collection, &["ele", "ion"], &config).unwrap();
        let ele = merged.get("ele").unwrap();

        assert!(ele.field("zbar").unwrap().iter().all(|v| *v == 0.0));
        assert!(ele.field("pres").unwrap().iter().any(|v| *v != 0.0));
    }

    #[test]
    fn absent_threshold_field_is_not_an_error() {
        let collection = noisy_collection();
        let config = MergeConfig::default().with_threshold_fields(["opacity"]);

        assert!(eosgrid::merge(&collection, &["ele", "ion"], &config).is_ok());
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_species() {
        let collection = setup_collection();
        let err = eosgrid::merge(&collection, &["ele", "ion"], &MergeConfig::default()).unwrap_err();

        match err {
            Error::UnknownSpecies(missing) => assert_eq!(missing.name, "ion"),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn disjoint_density() {
        let low = species_grid(vec![1.0, 2.0, 3.0], vec![1.0, 2.0], 1.0);
        let high = species_grid(vec![10.0, 11.0, 12.0], vec![1.0, 2.0], 1.0);
        let collection = SpeciesCollection::new()
            .with_species("low", low)
            .with_species("high", high);

        let err = eosgrid::merge(&collection, &["low", "high"], &MergeConfig::default()).unwrap_err();

        match err {
            Error::DisjointGrids(disjoint) => {
                assert_eq!(disjoint.axis, AxisKind::Density);
                assert_eq!(disjoint.len, 0);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn single_point_overlap_is_disjoint() {
        let a = species_grid(vec![1.0, 2.0], vec![1.0, 2.0, 3.0], 1.0);
        let b = species_grid(vec![1.0, 2.0], vec![3.0, 4.0], 1.0);
        let collection = SpeciesCollection::new()
            .with_species("a", a)
            .with_species("b", b);

        let err = eosgrid::merge(&collection, &["a", "b"], &MergeConfig::default()).unwrap_err();

        match err {
            Error::DisjointGrids(disjoint) => {
                assert_eq!(disjoint.axis, AxisKind::Temperature);
                assert_eq!(disjoint.len, 1);
                assert_eq!(disjoint.species, vec!["a", "b"]);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn empty_species_list() {
        let collection = setup_collection();
        let none: [&str; 0] = [];
        let err = eosgrid::merge(&collection, &none, &MergeConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidGrid(_)));
    }
}

mod merger {
    use super::*;

    #[test]
    fn reusable_across_collections() {
        let merger = GridMerger::new(["ele", "ioncc"])
            .with_config(MergeConfig::default().with_threshold_fields(["pres"]));

        let first = setup_collection();
        let mut second = setup_collection();
        second.insert(
            "ioncc",
            species_grid(vec![1e-3, 1.0, 5.0], vec![2.0, 20.0, 200.0], 1.0),
        );

        let (density, temperature) = merger.common_axes(&second).unwrap();
        assert_eq!(density.as_slice(), &[1e-3, 1e-2, 0.1, 1.0, 5.0]);
        assert_eq!(temperature.as_slice(), &[2.0, 10.0, 20.0, 100.0, 200.0]);

        let a = merger.merge(&first).unwrap();
        let b = merger.merge(&second).unwrap();

        assert_ne!(a.get("ele").unwrap().density(), b.get("ele").unwrap().density());
        assert_eq!(b.get("ele").unwrap().density(), &density);
        assert_eq!(merger.species(), &["ele".to_string(), "ioncc".to_string()]);
    }
}
