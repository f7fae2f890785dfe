use super::coordination::Coordination;
use super::networking::Networking;
use super::pairing::Pairing;
use super::solute::Solute;
use super::solvation_data::FrameTable;
use super::speciation::Speciation;
use nalgebra::Scalar;
use prettytable::{Cell, Row, Table, row};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

////////////////////////INPUT/OUTPUT////////////////////////////////////////////////////////

fn dict_table(header: &str, dict: &HashMap<String, f64>) -> Table {
    let mut table = Table::new();
    table.add_row(row!["solvent", header]);
    let sorted: BTreeMap<&String, &f64> = dict.iter().collect();
    for (solvent, value) in sorted {
        table.add_row(row![solvent, format!("{:.4}", value)]);
    }
    table
}

/// frames as rows, solvents as columns
pub fn frame_table<T: Scalar + Copy + Default + Display>(table: &FrameTable<T>) -> Table {
    let mut out = Table::new();
    let mut header = vec![Cell::new("frame")];
    header.extend(table.solvents.iter().map(|s| Cell::new(s)));
    out.add_row(Row::new(header));
    for (i, frame) in table.frames.iter().enumerate() {
        let mut cells = vec![Cell::new(&frame.to_string())];
        for j in 0..table.solvents.len() {
            cells.push(Cell::new(&format!("{:.4}", table.values[(i, j)])));
        }
        out.add_row(Row::new(cells));
    }
    out
}

impl Coordination {
    pub fn cn_table(&self) -> Table {
        dict_table("coordination number", &self.cn_dict)
    }

    pub fn coordinating_atoms_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["atom type", "solvent", "fraction"]);
        for (atom_type, solvents) in &self.coordinating_atoms {
            for (solvent, fraction) in solvents {
                table.add_row(row![atom_type, solvent, format!("{:.4}", fraction)]);
            }
        }
        table
    }

    /// Prints the coordination numbers and coordinating atom types to the console
    pub fn pretty_print(&self) {
        println!("__________COORDINATION NUMBERS__________");
        self.cn_table().printstd();
        println!("__________COORDINATING ATOM TYPES (> {})__________", self.tolerance);
        self.coordinating_atoms_table().printstd();
    }
}

impl Pairing {
    pub fn pairing_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["solvent", "pairing", "free", "diluent"]);
        let solvents: std::collections::BTreeSet<&String> = self
            .pairing_dict
            .keys()
            .chain(self.fraction_free_solvents.keys())
            .collect();
        let fmt = |value: Option<&f64>| value.map(|v| format!("{:.4}", v)).unwrap_or("-".into());
        for solvent in solvents {
            table.add_row(row![
                solvent,
                fmt(self.pairing_dict.get(solvent)),
                fmt(self.fraction_free_solvents.get(solvent)),
                fmt(self.diluent_dict.get(solvent))
            ]);
        }
        table
    }

    /// Prints pairing, free solvent and diluent fractions to the console
    pub fn pretty_print(&self) {
        println!("__________PAIRING__________");
        self.pairing_table().printstd();
        println!("__________DILUENT COMPOSITION BY FRAME__________");
        frame_table(&self.diluent_by_frame).printstd();
    }
}

impl Speciation {
    /// the `n_shells` most frequent shells
    pub fn speciation_table(&self, n_shells: usize) -> Table {
        let mut table = Table::new();
        let mut header: Vec<Cell> = self.solvents.iter().map(|s| Cell::new(s)).collect();
        header.push(Cell::new("fraction"));
        table.add_row(Row::new(header));
        for shell in self.speciation_fraction.iter().take(n_shells) {
            let mut cells: Vec<Cell> = shell
                .counts
                .iter()
                .map(|c| Cell::new(&c.to_string()))
                .collect();
            cells.push(Cell::new(&format!("{:.4}", shell.fraction)));
            table.add_row(Row::new(cells));
        }
        table
    }

    pub fn co_occurrence_table(&self) -> Table {
        let mut table = Table::new();
        let mut header = vec![Cell::new("")];
        header.extend(self.solvents.iter().map(|s| Cell::new(s)));
        table.add_row(Row::new(header));
        for (i, solvent) in self.solvents.iter().enumerate() {
            let mut cells = vec![Cell::new(solvent)];
            for j in 0..self.solvents.len() {
                cells.push(Cell::new(&format!(
                    "{:.2}",
                    self.solvent_co_occurrence[(i, j)]
                )));
            }
            table.add_row(Row::new(cells));
        }
        table
    }

    /// Prints the most frequent shells and the co-occurrence matrix to the console
    pub fn pretty_print(&self, n_shells: usize) {
        println!("__________SHELL SPECIATION__________");
        self.speciation_table(n_shells).printstd();
        println!("__________SOLVENT CO-OCCURRENCE__________");
        self.co_occurrence_table().printstd();
    }
}

impl Networking {
    pub fn status_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["frame", "alone", "paired", "in_network"]);
        for (frame, counts) in &self.solute_status_by_frame {
            table.add_row(row![frame, counts.alone, counts.paired, counts.networked]);
        }
        let s = &self.solute_status;
        table.add_row(row![
            "all",
            format!("{:.4}", s.alone),
            format!("{:.4}", s.paired),
            format!("{:.4}", s.networked)
        ]);
        table
    }

    pub fn network_size_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["network size", "count", "fraction"]);
        let fractions = self.network_size_fractions();
        for (size, count) in self.network_size_totals() {
            table.add_row(row![size, count, format!("{:.4}", fractions[&size])]);
        }
        table
    }

    /// Prints solute states and network sizes to the console
    pub fn pretty_print(&self) {
        println!("__________SOLUTE STATUS__________");
        self.status_table().printstd();
        println!("__________NETWORK SIZES__________");
        self.network_size_table().printstd();
    }
}

impl Solute {
    /// Prints every computed analysis of the solute
    pub fn pretty_print(&self) {
        println!("\n_________SOLUTE {}_________", self.name);
        if let Some(coordination) = &self.coordination {
            coordination.pretty_print();
        }
        if let Some(pairing) = &self.pairing {
            pairing.pretty_print();
        }
        if let Some(speciation) = &self.speciation {
            speciation.pretty_print(10);
        }
        if let Some(networking) = &self.networking {
            networking.pretty_print();
        }
        println!("_____________________________________________________________");
    }
}
