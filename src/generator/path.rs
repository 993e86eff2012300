/*
path.rs

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

//! Route between two districts.

use serde::Serialize;
use std::collections::HashSet;

use crate::graph::DistrictId;

/// Path object.
#[derive(Serialize, Debug, Default, Clone)]
pub struct Path {
    /// Path as an ordered list of districts.
    path: Vec<DistrictId>,

    /// Stores the visited status of the districts.
    /// Instead of looking for the district in the [`Path::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    #[serde(skip)]
    visited: HashSet<DistrictId>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Path {}

impl Path {
    /// Create a [`Path`] object.
    pub fn new(capacity: usize) -> Self {
        Self {
            path: Vec::with_capacity(capacity),
            visited: HashSet::with_capacity(capacity),
        }
    }

    /// Create a [`Path`] object from a slice.
    pub fn from_slice(path: &[DistrictId]) -> Self {
        Self {
            path: path.to_vec(),
            visited: path.iter().copied().collect(),
        }
    }

    /// Add a district to the path.
    pub fn push(&mut self, district: DistrictId) {
        self.path.push(district);
        self.visited.insert(district);
    }

    /// Get the number of districts in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path has no district.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the district is in the path or not.
    pub fn contains(&self, district: DistrictId) -> bool {
        self.visited.contains(&district)
    }

    /// Return a reference to the path vector.
    pub fn get(&self) -> &Vec<DistrictId> {
        &self.path
    }

    /// Return the first district in the path.
    pub fn get_first(&self) -> Option<DistrictId> {
        self.path.first().copied()
    }

    /// Return the last district in the path.
    pub fn get_last(&self) -> Option<DistrictId> {
        self.path.last().copied()
    }

    /// Return the districts strictly between the first and the last districts.
    pub fn intermediates(&self) -> &[DistrictId] {
        if self.path.len() < 3 {
            &[]
        } else {
            &self.path[1..self.path.len() - 1]
        }
    }

    /// Number of districts strictly between the first and the last districts.
    pub fn intermediate_count(&self) -> usize {
        self.intermediates().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_contains() {
        let mut path: Path = Path::new(4);
        assert!(path.is_empty());
        assert_eq!(path.get_last(), None);
        path.push(3);
        path.push(7);
        path.push(1);
        assert_eq!(path.len(), 3);
        assert!(path.contains(7));
        assert!(!path.contains(4));
        assert_eq!(path.get_first(), Some(3));
        assert_eq!(path.get_last(), Some(1));
        assert_eq!(path.get(), &vec![3, 7, 1]);
        assert_eq!(path, Path::from_slice(&[3, 7, 1]));
    }

    #[test]
    fn intermediates() {
        assert_eq!(Path::from_slice(&[4]).intermediate_count(), 0);
        assert_eq!(Path::from_slice(&[4, 5]).intermediates(), &[] as &[DistrictId]);
        assert_eq!(Path::from_slice(&[4, 5, 6, 7]).intermediates(), &[5, 6]);
    }

    #[test]
    fn serialize_as_object() {
        let json: String = serde_json::to_string(&Path::from_slice(&[1, 2])).unwrap();
        assert_eq!(json, r#"{"path":[1,2]}"#);
    }
}
