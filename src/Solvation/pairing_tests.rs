#[cfg(test)]
mod tests {
    use crate::Solvation::pairing::Pairing;
    use crate::Solvation::solvation_data::{SolvationData, SolvationRecord};
    use crate::Solvation::solvation_errors::SolvationError;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn solvation_data() -> SolvationData {
        SolvationData::new(vec![
            // frame 0
            SolvationRecord::new(0, 1, 50, 5, "BN", 2.0),
            SolvationRecord::new(0, 1, 51, 5, "BN", 2.4),
            SolvationRecord::new(0, 1, 70, 7, "PF6", 2.2),
            SolvationRecord::new(0, 2, 60, 6, "BN", 2.1),
            // frame 1
            SolvationRecord::new(1, 1, 50, 5, "BN", 2.0),
            SolvationRecord::new(1, 2, 80, 8, "BN", 2.3),
            SolvationRecord::new(1, 2, 70, 7, "PF6", 2.5),
            SolvationRecord::new(1, 2, 71, 7, "PF6", 2.9),
        ])
        .unwrap()
    }

    fn solvent_counts() -> HashMap<String, usize> {
        HashMap::from([
            ("BN".to_string(), 4),
            ("PF6".to_string(), 2),
            ("FEC".to_string(), 3),
        ])
    }

    #[test]
    fn test_pairing_fractions() {
        let pairing = Pairing::new(&solvation_data(), 2, 2, &solvent_counts()).unwrap();
        assert_relative_eq!(pairing.pairing_dict["BN"], 1.0);
        assert_relative_eq!(pairing.pairing_dict["PF6"], 0.5);
        assert_relative_eq!(pairing.pairing_by_frame.get(0, "PF6").unwrap(), 0.5);
        assert_relative_eq!(pairing.pairing_by_frame.get(1, "PF6").unwrap(), 0.5);
        // FEC never coordinates and never appears in the pairing tables
        assert!(!pairing.pairing_dict.contains_key("FEC"));
        for value in pairing.pairing_dict.values() {
            assert!((0.0..=1.0).contains(value));
        }
    }

    #[test]
    fn test_pairing_counts_each_solute_once() {
        // three PF6 atoms around one solute still pair a single solute
        let data = SolvationData::new(vec![
            SolvationRecord::new(0, 1, 70, 7, "PF6", 2.0),
            SolvationRecord::new(0, 1, 71, 7, "PF6", 2.1),
            SolvationRecord::new(0, 1, 72, 9, "PF6", 2.2),
        ])
        .unwrap();
        let pairing = Pairing::new(&data, 1, 4, &solvent_counts()).unwrap();
        assert_relative_eq!(pairing.pairing_dict["PF6"], 0.25);
    }

    #[test]
    fn test_fraction_free_solvents() {
        let pairing = Pairing::new(&solvation_data(), 2, 2, &solvent_counts()).unwrap();
        // 2 distinct BN residues per frame out of 4
        assert_relative_eq!(pairing.fraction_free_solvents["BN"], 0.5);
        // 1 distinct PF6 residue per frame out of 2
        assert_relative_eq!(pairing.fraction_free_solvents["PF6"], 0.5);
        assert_relative_eq!(pairing.fraction_free_solvents["FEC"], 1.0);
        let coordinated = pairing.fraction_coordinated_solvents();
        for (solvent, free) in &pairing.fraction_free_solvents {
            assert_relative_eq!(free + coordinated[solvent], 1.0);
        }
    }

    #[test]
    fn test_diluent_composition() {
        let pairing = Pairing::new(&solvation_data(), 2, 2, &solvent_counts()).unwrap();
        // free residues per frame: BN 2, FEC 3, PF6 1
        assert_eq!(pairing.diluent_counts.get(0, "BN"), Some(2));
        assert_eq!(pairing.diluent_counts.get(1, "FEC"), Some(3));
        assert_eq!(pairing.diluent_counts.get(1, "PF6"), Some(1));
        assert_relative_eq!(pairing.diluent_dict["BN"], 1.0 / 3.0);
        assert_relative_eq!(pairing.diluent_dict["FEC"], 0.5);
        assert_relative_eq!(pairing.diluent_dict["PF6"], 1.0 / 6.0);
        for frame in &pairing.diluent_by_frame.frames {
            let total: f64 = pairing.diluent_by_frame.row(*frame).unwrap().values().sum();
            assert_relative_eq!(total, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_population_solvent() {
        let mut counts = solvent_counts();
        counts.insert("EC".to_string(), 0);
        let pairing = Pairing::new(&solvation_data(), 2, 2, &counts).unwrap();
        assert_eq!(pairing.fraction_free_solvents["EC"], 0.0);
        assert_eq!(pairing.diluent_dict["EC"], 0.0);
        assert!(!pairing.fraction_coordinated_solvents().contains_key("EC"));
    }

    #[test]
    fn test_frame_without_diluent_excluded_from_average() {
        let data = SolvationData::new(vec![
            SolvationRecord::new(0, 0, 10, 1, "A", 2.0),
            SolvationRecord::new(1, 0, 11, 2, "A", 2.0),
            SolvationRecord::new(1, 1, 10, 1, "A", 2.0),
        ])
        .unwrap();
        let counts = HashMap::from([("A".to_string(), 2), ("B".to_string(), 0)]);
        let pairing = Pairing::new(&data, 2, 2, &counts).unwrap();
        // frame 0: one free A; frame 1: every A coordinated, nothing left
        assert_eq!(pairing.diluent_counts.get(0, "A"), Some(1));
        assert_eq!(pairing.diluent_counts.get(1, "A"), Some(0));
        assert_eq!(pairing.diluent_by_frame.get(1, "A"), Some(0.0));
        assert_relative_eq!(pairing.diluent_dict["A"], 1.0);
    }

    #[test]
    fn test_unknown_solvent_is_an_error() {
        let counts = HashMap::from([("BN".to_string(), 4)]);
        let err = Pairing::new(&solvation_data(), 2, 2, &counts).unwrap_err();
        assert_eq!(err, SolvationError::UnknownSolvent("PF6".to_string()));
    }

    #[test]
    fn test_population_smaller_than_coordinated() {
        let mut counts = solvent_counts();
        counts.insert("BN".to_string(), 1);
        let err = Pairing::new(&solvation_data(), 2, 2, &counts).unwrap_err();
        assert!(matches!(err, SolvationError::PopulationExceeded { .. }));
    }

    #[test]
    fn test_empty_data() {
        let pairing = Pairing::new(&SolvationData::empty(), 1, 1, &solvent_counts()).unwrap();
        assert!(pairing.pairing_dict.is_empty());
        assert!(pairing.diluent_dict.is_empty());
        assert_relative_eq!(pairing.fraction_free_solvents["BN"], 1.0);
    }
}
