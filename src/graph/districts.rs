/*
districts.rs

Copyright 2025 Hervé Quatremain

This file is part of Jilla.

Jilla is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Jilla is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Jilla. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Internal representation of the district adjacency graph.

use log::{Level, debug, log_enabled, warn};
use serde::ser::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::io::Read;

use super::normalize::canonical_key;
use super::table::DistrictTable;

/// Index of a district in the [`DistrictGraph`].
pub type DistrictId = usize;

/// A district as exchanged with the rendering layer.
///
/// The identifier is internal. Only the display name is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct District {
    /// Index of the district in the graph.
    pub id: DistrictId,

    /// Display name.
    pub name: String,
}

/// Serialize a [`District`] object as its display name.
impl Serialize for District {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.name)
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Problems found in a district table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphDefect {
    #[error("district #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("district \"{name}\" is declared more than once")]
    DuplicateDistrict { name: String },

    #[error("district \"{district}\" lists the unknown neighbor \"{neighbor}\"")]
    UnknownNeighbor { district: String, neighbor: String },

    #[error("alias \"{alias}\" refers to the unknown district \"{target}\"")]
    UnknownAliasTarget { alias: String, target: String },

    #[error("alias \"{alias}\" has the same name as a district")]
    AliasShadowsDistrict { alias: String },

    #[error("sample route #{sample} refers to the unknown district \"{name}\"")]
    UnknownSampleDistrict { sample: usize, name: String },

    #[error("\"{district}\" lists \"{neighbor}\" as a neighbor, but \"{neighbor}\" does not list \"{district}\"")]
    Asymmetric { district: String, neighbor: String },

    #[error("district \"{district}\" has no neighbors")]
    Isolated { district: String },

    #[error("district \"{district}\" lists itself as a neighbor")]
    SelfLoop { district: String },

    #[error("district \"{district}\" lists \"{neighbor}\" more than once")]
    RepeatedNeighbor { district: String, neighbor: String },
}

/// Errors while loading a district table.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// All the defects found in the table.
    #[error("{} defect(s) in the district table", .0.len())]
    Defects(Vec<GraphDefect>),

    #[error("cannot read the district table: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse the district table: {0}")]
    Json(#[from] serde_json::Error),
}

/// District adjacency graph.
///
/// The graph is immutable once built.
#[derive(Debug, Clone)]
pub struct DistrictGraph {
    /// Display names, indexed by [`DistrictId`].
    names: Vec<String>,

    /// Canonical keys (see [`canonical_key`]), indexed by [`DistrictId`].
    keys: Vec<String>,

    /// Ordered list of the adjacent districts for each district.
    neighbors: Vec<Vec<DistrictId>>,

    /// Canonical key to district.
    index: HashMap<String, DistrictId>,

    /// Canonical key of an alternate name to district.
    aliases: HashMap<String, DistrictId>,

    /// Hand-verified routes used as fallback puzzles.
    samples: Vec<Vec<DistrictId>>,
}

impl DistrictGraph {
    /// Build the graph from the given table.
    ///
    /// The table is not validated for symmetry: use [`DistrictGraph::validate`] or
    /// [`DistrictGraph::load`] for that.
    ///
    /// # Errors
    ///
    /// The method returns all the names in the table that cannot be resolved, such as neighbors
    /// or aliases that refer to unknown districts, or districts declared twice.
    pub fn from_table(table: &DistrictTable) -> Result<Self, GraphError> {
        let mut defects: Vec<GraphDefect> = Vec::new();
        let num_districts: usize = table.districts.len();
        let mut graph: Self = Self {
            names: Vec::with_capacity(num_districts),
            keys: Vec::with_capacity(num_districts),
            neighbors: Vec::with_capacity(num_districts),
            index: HashMap::with_capacity(num_districts),
            aliases: HashMap::with_capacity(table.aliases.len()),
            samples: Vec::with_capacity(table.samples.len()),
        };

        // First pass: assign the identifiers
        for (i, entry) in table.districts.iter().enumerate() {
            let key: String = canonical_key(&entry.name);
            if key.is_empty() {
                defects.push(GraphDefect::EmptyName { index: i });
                continue;
            }
            if graph.index.contains_key(&key) {
                defects.push(GraphDefect::DuplicateDistrict {
                    name: entry.name.clone(),
                });
                continue;
            }
            graph.index.insert(key.clone(), graph.names.len());
            graph.names.push(entry.name.trim().to_string());
            graph.keys.push(key);
        }

        // Second pass: resolve the neighbors, keeping their order
        for entry in &table.districts {
            let key: String = canonical_key(&entry.name);
            match graph.index.get(&key) {
                // Skip the entries already reported as defects
                Some(&id) if graph.neighbors.len() == id => (),
                _ => continue,
            }
            let mut adjacent: Vec<DistrictId> = Vec::with_capacity(entry.neighbors.len());
            for neighbor in &entry.neighbors {
                match graph.index.get(&canonical_key(neighbor)) {
                    Some(&n) => adjacent.push(n),
                    None => defects.push(GraphDefect::UnknownNeighbor {
                        district: entry.name.clone(),
                        neighbor: neighbor.clone(),
                    }),
                }
            }
            graph.neighbors.push(adjacent);
        }

        for (alias, target) in &table.aliases {
            let key: String = canonical_key(alias);
            if graph.index.contains_key(&key) {
                defects.push(GraphDefect::AliasShadowsDistrict {
                    alias: alias.clone(),
                });
                continue;
            }
            match graph.index.get(&canonical_key(target)) {
                Some(&id) => {
                    graph.aliases.insert(key, id);
                }
                None => defects.push(GraphDefect::UnknownAliasTarget {
                    alias: alias.clone(),
                    target: target.clone(),
                }),
            }
        }

        for (i, route) in table.samples.iter().enumerate() {
            let mut ids: Vec<DistrictId> = Vec::with_capacity(route.len());
            for name in route {
                match graph.index.get(&canonical_key(name)) {
                    Some(&id) => ids.push(id),
                    None => defects.push(GraphDefect::UnknownSampleDistrict {
                        sample: i,
                        name: name.clone(),
                    }),
                }
            }
            graph.samples.push(ids);
        }

        if !defects.is_empty() {
            for d in &defects {
                warn!("District table: {d}");
            }
            return Err(GraphError::Defects(defects));
        }

        debug!(
            "District graph: {} districts, {} aliases, {} sample routes",
            graph.names.len(),
            graph.aliases.len(),
            graph.samples.len()
        );
        if log_enabled!(Level::Trace) {
            graph.debug();
        }
        Ok(graph)
    }

    /// Build the graph from the given table and validate it.
    ///
    /// # Errors
    ///
    /// The method returns every defect found by [`DistrictGraph::from_table`] or, if the table
    /// could be resolved, every defect found by [`DistrictGraph::validate`].
    pub fn load(table: &DistrictTable) -> Result<Self, GraphError> {
        let graph: Self = Self::from_table(table)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Read a JSON district table and build a validated graph.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, GraphError> {
        Self::load(&DistrictTable::from_json_reader(reader)?)
    }

    /// Return every configuration defect of the graph.
    ///
    /// The graph is undirected: if a district lists a neighbor, the neighbor must list the
    /// district back. Missing reverse edges are reported, never added.
    pub fn defects(&self) -> Vec<GraphDefect> {
        let mut defects: Vec<GraphDefect> = Vec::new();

        for (id, adjacent) in self.neighbors.iter().enumerate() {
            if adjacent.is_empty() {
                defects.push(GraphDefect::Isolated {
                    district: self.names[id].clone(),
                });
                continue;
            }
            for (i, &n) in adjacent.iter().enumerate() {
                if n == id {
                    defects.push(GraphDefect::SelfLoop {
                        district: self.names[id].clone(),
                    });
                    continue;
                }
                if adjacent[..i].contains(&n) {
                    defects.push(GraphDefect::RepeatedNeighbor {
                        district: self.names[id].clone(),
                        neighbor: self.names[n].clone(),
                    });
                    continue;
                }
                if !self.neighbors[n].contains(&id) {
                    defects.push(GraphDefect::Asymmetric {
                        district: self.names[id].clone(),
                        neighbor: self.names[n].clone(),
                    });
                }
            }
        }
        defects
    }

    /// Verify the graph.
    ///
    /// # Errors
    ///
    /// The method returns all the defects found, not only the first one.
    pub fn validate(&self) -> Result<(), GraphError> {
        let defects: Vec<GraphDefect> = self.defects();
        if defects.is_empty() {
            return Ok(());
        }
        for d in &defects {
            warn!("District graph: {d}");
        }
        Err(GraphError::Defects(defects))
    }

    /// Number of districts.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the graph has no district.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether the identifier refers to a district of the graph.
    pub fn contains(&self, id: DistrictId) -> bool {
        id < self.names.len()
    }

    /// All the district identifiers, in table order.
    pub fn ids(&self) -> std::ops::Range<DistrictId> {
        0..self.names.len()
    }

    /// Ordered list of the districts adjacent to the given district.
    ///
    /// Return an empty list for an unknown district.
    pub fn neighbors(&self, id: DistrictId) -> &[DistrictId] {
        match self.neighbors.get(id) {
            Some(a) => a,
            None => &[],
        }
    }

    /// Whether `id2` is listed as a neighbor of `id1`.
    pub fn is_adjacent(&self, id1: DistrictId, id2: DistrictId) -> bool {
        self.neighbors(id1).contains(&id2)
    }

    /// Display name of the district.
    ///
    /// # Panics
    ///
    /// The method panics if `id` is not a district of the graph.
    pub fn name(&self, id: DistrictId) -> &str {
        &self.names[id]
    }

    /// Canonical key of the district.
    ///
    /// # Panics
    ///
    /// The method panics if `id` is not a district of the graph.
    pub fn key(&self, id: DistrictId) -> &str {
        &self.keys[id]
    }

    /// Return the [`District`] object for the given identifier.
    ///
    /// # Panics
    ///
    /// The method panics if `id` is not a district of the graph.
    pub fn district(&self, id: DistrictId) -> District {
        District {
            id,
            name: self.names[id].clone(),
        }
    }

    /// Map a name typed by the player to a district.
    ///
    /// The name is canonicalized, and then looked up in the district names first and in the
    /// aliases second. Return None for an unknown name.
    pub fn normalize(&self, raw: &str) -> Option<DistrictId> {
        let key: String = canonical_key(raw);
        if key.is_empty() {
            return None;
        }
        self.index
            .get(&key)
            .or_else(|| self.aliases.get(&key))
            .copied()
    }

    /// Hand-verified routes from the table.
    pub fn sample_routes(&self) -> &[Vec<DistrictId>] {
        &self.samples
    }

    /// Print the adjacency lists.
    pub fn debug(&self) {
        for (id, adjacent) in self.neighbors.iter().enumerate() {
            let list: Vec<&str> = adjacent.iter().map(|n| self.names[*n].as_str()).collect();
            debug!("{:>3} {} --> {}", id, self.names[id], list.join(", "));
        }
    }
}
