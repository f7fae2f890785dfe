#[cfg(test)]
mod tests {
    use crate::Solvation::solvation_data::{FrameTable, SolvationData, SolvationRecord};
    use crate::Solvation::solvation_errors::SolvationError;
    use std::collections::{BTreeSet, HashMap};

    fn two_frame_data() -> SolvationData {
        SolvationData::new(vec![
            // frame 0: solute 1 sees two atoms of BN residue 5 and one PF6
            SolvationRecord::new(0, 1, 50, 5, "BN", 2.0),
            SolvationRecord::new(0, 1, 51, 5, "BN", 2.4),
            SolvationRecord::new(0, 1, 70, 7, "PF6", 2.2),
            SolvationRecord::new(0, 2, 60, 6, "BN", 2.1),
            // frame 3: solute 2 shares residue 5 with nobody
            SolvationRecord::new(3, 2, 50, 5, "BN", 2.3),
        ])
        .unwrap()
    }

    #[test]
    fn test_rows_kept_in_insertion_order() {
        let data = two_frame_data();
        assert_eq!(data.len(), 5);
        assert!(!data.is_empty());
        assert_eq!(data.records()[2].solvent_name, "PF6");
        assert_eq!(data.records()[4].frame, 3);
    }

    #[test]
    fn test_frames_and_solvents() {
        let data = two_frame_data();
        assert_eq!(data.frames(), vec![0, 3]);
        assert_eq!(data.solvent_names(), vec!["BN".to_string(), "PF6".to_string()]);
        assert!(SolvationData::empty().frames().is_empty());
    }

    #[test]
    fn test_negative_distance_rejected() {
        let err = SolvationData::new(vec![SolvationRecord::new(0, 1, 50, 5, "BN", -0.1)]).unwrap_err();
        assert!(matches!(err, SolvationError::InvalidDistance { atom_ix: 50, .. }));
        let err =
            SolvationData::new(vec![SolvationRecord::new(0, 1, 50, 5, "BN", f64::NAN)]).unwrap_err();
        assert!(matches!(err, SolvationError::InvalidDistance { .. }));
    }

    #[test]
    fn test_duplicate_event_rejected() {
        let err = SolvationData::new(vec![
            SolvationRecord::new(0, 1, 50, 5, "BN", 2.0),
            SolvationRecord::new(0, 1, 50, 5, "BN", 2.1),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            SolvationError::DuplicateEvent {
                frame: 0,
                solvated_atom: 1,
                atom_ix: 50
            }
        );
        // the same solvent atom near another solute or in another frame is fine
        assert!(
            SolvationData::new(vec![
                SolvationRecord::new(0, 1, 50, 5, "BN", 2.0),
                SolvationRecord::new(0, 2, 50, 5, "BN", 2.0),
                SolvationRecord::new(1, 1, 50, 5, "BN", 2.0),
            ])
            .is_ok()
        );
    }

    #[test]
    fn test_inconsistent_residue_rejected() {
        let err = SolvationData::new(vec![
            SolvationRecord::new(0, 1, 50, 5, "BN", 2.0),
            SolvationRecord::new(1, 1, 51, 5, "FEC", 2.0),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            SolvationError::InconsistentResidue {
                res_ix: 5,
                first: "BN".to_string(),
                second: "FEC".to_string()
            }
        );
    }

    #[test]
    fn test_events_and_residues_per_shell() {
        let data = two_frame_data();
        let events = data.events_per_shell();
        // two atoms of one residue are two events ...
        assert_eq!(events[&(0, 1, "BN")], 2);
        assert_eq!(events[&(0, 1, "PF6")], 1);
        assert_eq!(events.len(), 4);
        // ... but one residue
        let residues = data.residues_per_shell();
        assert_eq!(residues[&(0, 1, "BN")], BTreeSet::from([5]));
        assert_eq!(residues[&(3, 2, "BN")], BTreeSet::from([5]));
    }

    #[test]
    fn test_residues_and_solutes_per_frame() {
        let data = two_frame_data();
        let residues = data.residues_per_frame();
        assert_eq!(residues[&(0, "BN")], BTreeSet::from([5, 6]));
        assert_eq!(residues[&(0, "PF6")], BTreeSet::from([7]));
        let solutes = data.solutes_per_frame();
        assert_eq!(solutes[&0], BTreeSet::from([1, 2]));
        assert_eq!(solutes[&3], BTreeSet::from([2]));
    }

    #[test]
    fn test_filter_solvents() {
        let data = two_frame_data();
        let pf6 = data.filter_solvents(&["PF6".to_string()]);
        assert_eq!(pf6.len(), 1);
        assert_eq!(pf6.records()[0].res_ix, 7);
        assert!(data.filter_solvents(&[]).is_empty());
    }

    #[test]
    fn test_check_universe() {
        let data = two_frame_data();
        assert!(data.check_universe(2, 2).is_ok());
        assert_eq!(data.check_universe(0, 2), Err(SolvationError::NoFrames));
        assert_eq!(data.check_universe(2, 0), Err(SolvationError::NoSolutes));
        assert_eq!(
            data.check_universe(1, 2),
            Err(SolvationError::FrameCountMismatch {
                found: 2,
                n_frames: 1
            })
        );
        assert_eq!(
            data.check_universe(2, 1),
            Err(SolvationError::SoluteCountMismatch {
                frame: 0,
                found: 2,
                n_solutes: 1
            })
        );
        assert!(SolvationData::empty().check_universe(1, 1).is_ok());
    }

    #[test]
    fn test_check_populations() {
        let data = two_frame_data();
        let counts = HashMap::from([("BN".to_string(), 2), ("PF6".to_string(), 1)]);
        assert!(data.check_populations(&counts).is_ok());
        let counts = HashMap::from([("BN".to_string(), 1), ("PF6".to_string(), 1)]);
        assert_eq!(
            data.check_populations(&counts),
            Err(SolvationError::PopulationExceeded {
                frame: 0,
                solvent: "BN".to_string(),
                coordinated: 2,
                population: 1
            })
        );
        let counts = HashMap::from([("BN".to_string(), 2)]);
        assert_eq!(
            data.check_populations(&counts),
            Err(SolvationError::UnknownSolvent("PF6".to_string()))
        );
    }

    #[test]
    fn test_frame_table() {
        let mut table: FrameTable<f64> =
            FrameTable::zeros(vec![0, 3, 7], vec!["BN".to_string(), "PF6".to_string()]);
        assert!(!table.is_empty());
        table.set(3, "PF6", 0.5);
        table.set(7, "PF6", 0.25);
        // unknown keys are ignored
        table.set(4, "PF6", 9.0);
        assert_eq!(table.get(3, "PF6"), Some(0.5));
        assert_eq!(table.get(0, "BN"), Some(0.0));
        assert_eq!(table.get(4, "BN"), None);
        assert_eq!(table.get(0, "FEC"), None);
        assert_eq!(table.column("PF6"), Some(vec![0.0, 0.5, 0.25]));
        assert_eq!(table.row(7).unwrap()["PF6"], 0.25);
        assert_eq!(table.column_sums()["PF6"], 0.75);
        let empty: FrameTable<usize> = FrameTable::zeros(vec![], vec!["BN".to_string()]);
        assert!(empty.is_empty());
    }
}
