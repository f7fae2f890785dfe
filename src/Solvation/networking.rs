//! # Networking Module
//!
//! ## Purpose
//! Groups solutes into networks: two solutes are linked when they share a coordinating
//! solvent residue in the same frame, and a network is a connected component of that
//! solute-solute graph with at least two solutes. Each solute in each frame is then:
//! - **alone**: no coordinating residue of a networking solvent
//! - **paired**: coordinated, but shares no residue with another solute
//! - **networked**: member of a network
//!
//! Every frame is an independent graph, built with union-find over the solute nodes.
//! Networking may be restricted to a subset of solvents (typically the anions), in which
//! case residues of other solvents neither pair nor link solutes.

use crate::Solvation::solute::Solute;
use crate::Solvation::solvation_data::SolvationData;
use crate::Solvation::solvation_errors::SolvationError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SoluteState {
    Alone,
    Paired,
    Networked,
}

impl SoluteState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoluteState::Alone => "alone",
            SoluteState::Paired => "paired",
            SoluteState::Networked => "in_network",
        }
    }
}

/// number of solutes in each state within one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub alone: usize,
    pub paired: usize,
    pub networked: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.alone + self.paired + self.networked
    }

    pub fn fractions(&self) -> StatusFractions {
        let total = self.total();
        if total == 0 {
            return StatusFractions::default();
        }
        StatusFractions {
            alone: self.alone as f64 / total as f64,
            paired: self.paired as f64 / total as f64,
            networked: self.networked as f64 / total as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatusFractions {
    pub alone: f64,
    pub paired: f64,
    pub networked: f64,
}

/// connected component of >= 2 solutes in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub frame: usize,
    pub id: usize,
    pub solutes: Vec<usize>,
    pub residues: Vec<usize>,
}

impl Network {
    /// number of solutes in the network
    pub fn size(&self) -> usize {
        self.solutes.len()
    }
}

#[derive(Debug, Clone)]
pub struct Networking {
    pub n_frames: usize,
    pub n_solutes: usize,
    pub network_solvents: Vec<String>,
    /// frame -> networks of that frame, ids counted from 0 in each frame
    pub networks: BTreeMap<usize, Vec<Network>>,
    /// frame -> network size -> number of networks
    pub network_sizes: BTreeMap<usize, BTreeMap<usize, usize>>,
    /// (frame, solvated_atom) -> state, for solutes with at least one networking residue
    pub solute_states: BTreeMap<(usize, usize), SoluteState>,
    /// frame -> state counts, for the frames present in the solvation data only; a frame
    /// counted in `n_frames` without any event has every solute alone and appears
    /// only through `solute_status`
    pub solute_status_by_frame: BTreeMap<usize, StatusCounts>,
    /// state fractions over all n_frames x n_solutes observations
    pub solute_status: StatusFractions,
}

impl Networking {
    /// # Arguments
    /// * `network_solvents` - solvents able to link solutes, `None` for all of them
    ///
    /// # Errors
    /// `UnknownSolvent` if a requested network solvent never appears in the data
    pub fn new(
        solvation_data: &SolvationData,
        n_frames: usize,
        n_solutes: usize,
        network_solvents: Option<&[String]>,
    ) -> Result<Self, SolvationError> {
        let known: BTreeSet<String> = solvation_data.solvent_names().into_iter().collect();
        Self::with_known_solvents(solvation_data, n_frames, n_solutes, network_solvents, &known)
    }

    /// Same as `new`, with the solvents a network solvent may be chosen from given explicitly,
    /// so that a species of the system that is never coordinated is still accepted.
    pub fn with_known_solvents(
        solvation_data: &SolvationData,
        n_frames: usize,
        n_solutes: usize,
        network_solvents: Option<&[String]>,
        known_solvents: &BTreeSet<String>,
    ) -> Result<Self, SolvationError> {
        solvation_data.check_universe(n_frames, n_solutes)?;
        if let Some(unknown) = network_solvents
            .unwrap_or_default()
            .iter()
            .find(|solvent| !known_solvents.contains(*solvent))
        {
            return Err(SolvationError::UnknownSolvent(unknown.clone()));
        }
        let filtered;
        let (networking_data, network_solvents) = match network_solvents {
            Some(solvents) => {
                filtered = solvation_data.filter_solvents(solvents);
                (&filtered, solvents.to_vec())
            }
            None => (solvation_data, solvation_data.solvent_names()),
        };

        let mut residues_by_frame: BTreeMap<usize, BTreeMap<usize, BTreeSet<usize>>> =
            BTreeMap::new();
        for record in networking_data.records() {
            residues_by_frame
                .entry(record.frame)
                .or_default()
                .entry(record.solvated_atom)
                .or_default()
                .insert(record.res_ix);
        }

        let mut networks = BTreeMap::new();
        let mut network_sizes = BTreeMap::new();
        let mut solute_states = BTreeMap::new();
        let mut solute_status_by_frame = BTreeMap::new();
        // frames without networking residues still get an all-alone row
        for frame in solvation_data.frames() {
            let Some(residues_of_solute) = residues_by_frame.get(&frame) else {
                solute_status_by_frame.insert(
                    frame,
                    StatusCounts {
                        alone: n_solutes,
                        ..StatusCounts::default()
                    },
                );
                continue;
            };
            let frame_networks = frame_networks(frame, residues_of_solute);
            let mut counts = StatusCounts::default();
            let mut sizes: BTreeMap<usize, usize> = BTreeMap::new();
            let mut networked: BTreeSet<usize> = BTreeSet::new();
            for network in &frame_networks {
                *sizes.entry(network.size()).or_insert(0) += 1;
                networked.extend(network.solutes.iter().copied());
            }
            for solute in residues_of_solute.keys() {
                let state = if networked.contains(solute) {
                    counts.networked += 1;
                    SoluteState::Networked
                } else {
                    counts.paired += 1;
                    SoluteState::Paired
                };
                solute_states.insert((frame, *solute), state);
            }
            // check_universe bounds the coordinated solutes by n_solutes
            counts.alone = n_solutes - counts.paired - counts.networked;
            debug!(
                "frame {}: {} networks, {} paired, {} alone",
                frame,
                frame_networks.len(),
                counts.paired,
                counts.alone
            );
            solute_status_by_frame.insert(frame, counts);
            if !frame_networks.is_empty() {
                network_sizes.insert(frame, sizes);
                networks.insert(frame, frame_networks);
            }
        }

        let n_observations = (n_frames * n_solutes) as f64;
        let paired = solute_status_by_frame.values().map(|c| c.paired).sum::<usize>() as f64;
        let networked = solute_status_by_frame.values().map(|c| c.networked).sum::<usize>() as f64;
        let solute_status = StatusFractions {
            alone: (n_observations - paired - networked) / n_observations,
            paired: paired / n_observations,
            networked: networked / n_observations,
        };
        info!(
            "networking through {:?}: {} networks in {} frames",
            network_solvents,
            networks.values().map(|n: &Vec<Network>| n.len()).sum::<usize>(),
            networks.len()
        );
        Ok(Self {
            n_frames,
            n_solutes,
            network_solvents,
            networks,
            network_sizes,
            solute_states,
            solute_status_by_frame,
            solute_status,
        })
    }

    pub fn from_solute(solute: &Solute) -> Result<Self, SolvationError> {
        let solvation_data = solute.solvation_data()?;
        let mut known: BTreeSet<String> = solute.system.solvent_counts.keys().cloned().collect();
        known.extend(solvation_data.solvent_names());
        Self::with_known_solvents(
            solvation_data,
            solute.system.n_frames,
            solute.system.n_solutes,
            solute.config.network_solvents.as_deref(),
            &known,
        )
    }

    /// state of a solute in a frame, solutes without any networking residue are alone
    pub fn state_of(&self, frame: usize, solvated_atom: usize) -> SoluteState {
        self.solute_states
            .get(&(frame, solvated_atom))
            .copied()
            .unwrap_or(SoluteState::Alone)
    }

    /// residues forming a network
    pub fn network_residues(&self, frame: usize, network_id: usize) -> Option<&[usize]> {
        self.networks
            .get(&frame)?
            .iter()
            .find(|network| network.id == network_id)
            .map(|network| network.residues.as_slice())
    }

    /// network size -> number of networks, over all frames
    pub fn network_size_totals(&self) -> BTreeMap<usize, usize> {
        let mut totals = BTreeMap::new();
        for sizes in self.network_sizes.values() {
            for (size, count) in sizes {
                *totals.entry(*size).or_insert(0) += count;
            }
        }
        totals
    }

    /// network size -> fraction of all networks
    pub fn network_size_fractions(&self) -> BTreeMap<usize, f64> {
        let totals = self.network_size_totals();
        let n_networks: usize = totals.values().sum();
        totals
            .into_iter()
            .map(|(size, count)| (size, count as f64 / n_networks as f64))
            .collect()
    }
}

/// connected components of >= 2 solutes linked through shared residues
fn frame_networks(
    frame: usize,
    residues_of_solute: &BTreeMap<usize, BTreeSet<usize>>,
) -> Vec<Network> {
    fn find(parent: &mut [usize], i: usize) -> usize {
        if parent[i] != i {
            parent[i] = find(parent, parent[i]);
        }
        parent[i]
    }

    fn union(parent: &mut [usize], rank: &mut [usize], x: usize, y: usize) {
        let rx = find(parent, x);
        let ry = find(parent, y);
        if rx != ry {
            if rank[rx] < rank[ry] {
                parent[rx] = ry;
            } else if rank[rx] > rank[ry] {
                parent[ry] = rx;
            } else {
                parent[ry] = rx;
                rank[rx] += 1;
            }
        }
    }

    let solutes: Vec<usize> = residues_of_solute.keys().copied().collect();
    let n = solutes.len();
    let mut parent: Vec<usize> = (0..n).collect();
    let mut rank = vec![0usize; n];
    let mut owner_of_residue: HashMap<usize, usize> = HashMap::new();
    for (i, residues) in residues_of_solute.values().enumerate() {
        for res_ix in residues {
            match owner_of_residue.get(res_ix) {
                Some(&owner) => union(&mut parent, &mut rank, owner, i),
                None => {
                    owner_of_residue.insert(*res_ix, i);
                }
            }
        }
    }

    // BTreeMap keyed by root keeps members sorted; components are ordered by their first solute
    let mut components: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for i in 0..n {
        let root = find(&mut parent, i);
        components.entry(root).or_default().push(i);
    }
    let mut members: Vec<Vec<usize>> = components
        .into_values()
        .filter(|component| component.len() >= 2)
        .collect();
    members.sort_by_key(|component| component[0]);

    members
        .into_iter()
        .enumerate()
        .map(|(id, component)| {
            let mut residues: BTreeSet<usize> = BTreeSet::new();
            for &i in &component {
                residues.extend(residues_of_solute[&solutes[i]].iter().copied());
            }
            Network {
                frame,
                id,
                solutes: component.iter().map(|&i| solutes[i]).collect(),
                residues: residues.into_iter().collect(),
            }
        })
        .collect()
}
