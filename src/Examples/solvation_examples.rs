use crate::Solvation::comparison::{SolventProperty, compare_solutes};
use crate::Solvation::solute::{Solute, SolventSystem};
use crate::Solvation::solvation_data::{SolvationData, SolvationRecord};
use crate::Utils::load_from_file::{load_solvation_data_json, save_solvation_data_json};
use crate::settings::{AnalysisClass, AnalysisConfig};
use std::collections::HashMap;

const N_FRAMES: usize = 6;
const N_SOLUTES: usize = 4;

/// Li+ in EC / FEC with PF6- anions: every solute keeps three EC, solute pairs share
/// one PF6 in even frames and each solute holds its own FEC in odd frames
fn synthetic_electrolyte() -> (SolvationData, HashMap<usize, String>) {
    let mut records = Vec::new();
    let mut atom_types = HashMap::new();
    for frame in 0..N_FRAMES {
        for solute in 0..N_SOLUTES {
            for k in 0..3 {
                let res_ix = (solute * 3 + k + frame) % 20;
                let atom_ix = res_ix * 10 + k % 2;
                atom_types.insert(atom_ix, if k % 2 == 0 { "O" } else { "C" }.to_string());
                let distance = 1.9 + 0.1 * k as f64;
                records.push(SolvationRecord::new(frame, solute, atom_ix, res_ix, "EC", distance));
            }
            if frame % 2 == 0 {
                let res_ix = 100 + (solute / 2 + frame) % 4;
                let atom_ix = res_ix * 10 + solute % 2;
                atom_types.insert(atom_ix, "F".to_string());
                records.push(SolvationRecord::new(frame, solute, atom_ix, res_ix, "PF6", 2.2));
            } else {
                let res_ix = 200 + solute;
                let atom_ix = res_ix * 10;
                atom_types.insert(atom_ix, "O".to_string());
                records.push(SolvationRecord::new(frame, solute, atom_ix, res_ix, "FEC", 2.4));
            }
        }
    }
    let data = SolvationData::new(records).expect("synthetic table is consistent");
    (data, atom_types)
}

fn system() -> SolventSystem {
    SolventSystem::new(
        N_FRAMES,
        N_SOLUTES,
        HashMap::from([
            ("EC".to_string(), 20),
            ("FEC".to_string(), 8),
            ("PF6".to_string(), 4),
        ]),
    )
    .expect("valid system")
}

pub fn solvation_examples(task: usize) {
    match task {
        // full analysis of one solute
        0 => {
            let (data, atom_types) = synthetic_electrolyte();
            let mut li = Solute::new("Li", system(), Box::new(atom_types), AnalysisConfig::default())
                .unwrap();
            li.run(data).unwrap();
            li.pretty_print();
        }
        // networks through the anion only
        1 => {
            let (data, atom_types) = synthetic_electrolyte();
            let config = AnalysisConfig {
                network_solvents: Some(vec!["PF6".to_string()]),
                analysis_classes: vec![AnalysisClass::Networking],
                ..AnalysisConfig::default()
            };
            let mut li = Solute::new("Li", system(), Box::new(atom_types), config).unwrap();
            li.run(data).unwrap();
            let networking = li.get_networking().unwrap();
            networking.pretty_print();
            for (frame, networks) in &networking.networks {
                for network in networks {
                    println!(
                        "frame {}, network {}: solutes {:?}, residues {:?}",
                        frame, network.id, network.solutes, network.residues
                    );
                }
            }
        }
        // shells and co-occurrence
        2 => {
            let (data, atom_types) = synthetic_electrolyte();
            let config = AnalysisConfig {
                analysis_classes: vec![AnalysisClass::Speciation],
                ..AnalysisConfig::default()
            };
            let mut li = Solute::new("Li", system(), Box::new(atom_types), config).unwrap();
            li.run(data).unwrap();
            let speciation = li.get_speciation().unwrap();
            speciation.pretty_print(10);
            let three_ec = HashMap::from([("EC".to_string(), 3)]);
            println!(
                "fraction of shells with exactly 3 EC: {}",
                speciation.shell_fraction(&three_ec)
            );
            println!("shell size histogram: {:?}", speciation.shell_size_histogram());
            println!("composition by size: {:?}", speciation.shell_composition_by_size());
        }
        // table written to JSON and read back, then two solutions compared
        3 => {
            let (data, atom_types) = synthetic_electrolyte();
            let path = std::env::temp_dir().join("solvation_data_example.json");
            let path = path.to_str().unwrap();
            save_solvation_data_json(&data, path).unwrap();
            let loaded = load_solvation_data_json(path).unwrap();
            assert_eq!(loaded, data);

            let mut li = Solute::new(
                "Li",
                system(),
                Box::new(atom_types.clone()),
                AnalysisConfig::default(),
            )
            .unwrap();
            li.run(loaded).unwrap();
            // the second solution has no anion in the first shell
            let fewer = SolvationData::new(
                data.records()
                    .iter()
                    .filter(|r| r.solvent_name != "PF6")
                    .cloned()
                    .collect(),
            )
            .unwrap();
            let mut li_no_anion =
                Solute::new("Li_no_anion", system(), Box::new(atom_types), AnalysisConfig::default())
                    .unwrap();
            li_no_anion.run(fewer).unwrap();
            let compared = compare_solutes(
                &[&li, &li_no_anion],
                SolventProperty::CoordinationNumber,
                &HashMap::new(),
                &["EC".to_string(), "FEC".to_string()],
            )
            .unwrap();
            println!("coordination numbers: {:?}", compared);
        }
        _ => println!("no such example: {}", task),
    }
}
