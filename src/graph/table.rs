/*
table.rs

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

//! Source representation of a district adjacency table.
//!
//! This is the static asset the engine depends on.
//! It is either built in (see [`super::nepal`]) or read from a JSON file such as:
//!
//! ```json
//! {
//!   "districts": [
//!     { "name": "Kathmandu", "neighbors": ["Lalitpur", "Bhaktapur"] },
//!     { "name": "Lalitpur", "neighbors": ["Kathmandu", "Bhaktapur"] },
//!     { "name": "Bhaktapur", "neighbors": ["Kathmandu", "Lalitpur"] }
//!   ],
//!   "aliases": { "Patan": "Lalitpur" },
//!   "samples": [["Kathmandu", "Lalitpur"]]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};

use super::districts::GraphError;

/// A district and its neighbors, as written in the table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DistrictEntry {
    /// Display name of the district.
    pub name: String,

    /// Display names of the adjacent districts.
    ///
    /// The order is significant: when several shortest routes exist, the route finder prefers
    /// the neighbors listed first.
    pub neighbors: Vec<String>,
}

/// District adjacency table.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DistrictTable {
    /// Ordered list of the districts.
    pub districts: Vec<DistrictEntry>,

    /// Alternate names (historical names, other romanizations) and the display name of the
    /// district they refer to.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Hand-verified routes, as lists of display names from the starting district to the
    /// ending district.
    /// They are used as puzzles when generating a random puzzle fails.
    #[serde(default)]
    pub samples: Vec<Vec<String>>,
}

impl DistrictTable {
    /// Build a table from static arrays.
    pub fn from_static(
        districts: &[(&str, &[&str])],
        aliases: &[(&str, &str)],
        samples: &[&[&str]],
    ) -> Self {
        Self {
            districts: districts
                .iter()
                .map(|(name, neighbors)| DistrictEntry {
                    name: String::from(*name),
                    neighbors: neighbors.iter().map(|n| String::from(*n)).collect(),
                })
                .collect(),
            aliases: aliases
                .iter()
                .map(|(alias, name)| (String::from(*alias), String::from(*name)))
                .collect(),
            samples: samples
                .iter()
                .map(|route| route.iter().map(|n| String::from(*n)).collect())
                .collect(),
        }
    }

    /// Read a JSON district table.
    ///
    /// The table is not checked. See [`super::DistrictGraph::load`].
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, GraphError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read a JSON district table from a file.
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, GraphError> {
        let file: File = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }
}
