/*
puzzles.rs

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

//! Puzzle representation

use clap::ValueEnum;
use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use strum_macros::FromRepr;

use super::path::Path;
use crate::graph::{District, DistrictGraph, DistrictId};

/// Puzzle difficulty level.
///
/// The difficulty is the number of districts the player must find between the starting and
/// the ending districts.
///
/// Easy starts at one intermediate district, not zero. A route between two adjacent districts
/// has nothing to find and is won before the first guess, so it only exists as
/// [`Difficulty::Any`].
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    /// Caller-provided bounds.
    Any,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
            Difficulty::Any => write!(f, "Any"),
        }
    }
}

impl Difficulty {
    /// Range of intermediate districts for the difficulty level, or None for
    /// [`Difficulty::Any`].
    pub fn intermediate_range(&self) -> Option<RangeInclusive<usize>> {
        match self {
            Difficulty::Easy => Some(1..=2),
            Difficulty::Medium => Some(3..=5),
            Difficulty::Hard => Some(6..=10),
            Difficulty::Any => None,
        }
    }

    /// Return the difficulty level that covers the given number of intermediate districts.
    pub fn from_intermediate_count(count: usize) -> Difficulty {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            .into_iter()
            .find(|d| d.intermediate_range().is_some_and(|r| r.contains(&count)))
            .unwrap_or(Difficulty::Any)
    }
}

/// Errors when building a [`Puzzle`] object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error("a puzzle route needs at least two districts")]
    TooShort,

    #[error("unknown district \"{0}\"")]
    UnknownDistrict(String),

    #[error("the starting and the ending districts are the same")]
    SameEndpoints,

    #[error("district \"{0}\" appears more than once in the route")]
    RepeatedDistrict(String),

    #[error("\"{0}\" and \"{1}\" are not adjacent")]
    NotAdjacent(String, String),
}

/// Puzzle parameters.
///
/// A [`Puzzle`] object is immutable. It can only be built from a route that starts and ends
/// with its endpoints, visits each district once, and follows edges of the graph.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Puzzle {
    /// Puzzle identifier.
    id: String,

    /// Difficulty level derived from the number of intermediate districts.
    difficulty: Difficulty,

    /// Starting district.
    start: District,

    /// Ending district.
    end: District,

    /// Canonical route, from `start` to `end`.
    shortest_path: Vec<District>,

    /// Same route, as district identifiers.
    #[serde(skip)]
    path: Path,
}

impl Puzzle {
    /// Create a puzzle from a route.
    ///
    /// # Errors
    ///
    /// The method returns an error if the route does not describe a valid puzzle.
    pub fn new(graph: &DistrictGraph, id: &str, path: &Path) -> Result<Self, PuzzleError> {
        let route: &Vec<DistrictId> = path.get();
        if route.len() < 2 {
            return Err(PuzzleError::TooShort);
        }
        if let Some(&v) = route.iter().find(|v| !graph.contains(**v)) {
            return Err(PuzzleError::UnknownDistrict(format!("#{v}")));
        }
        let start: DistrictId = route[0];
        let end: DistrictId = route[route.len() - 1];
        if start == end {
            return Err(PuzzleError::SameEndpoints);
        }
        for (i, v) in route.iter().enumerate() {
            if route[..i].contains(v) {
                return Err(PuzzleError::RepeatedDistrict(graph.name(*v).to_string()));
            }
        }
        for pair in route.windows(2) {
            if !graph.is_adjacent(pair[0], pair[1]) {
                return Err(PuzzleError::NotAdjacent(
                    graph.name(pair[0]).to_string(),
                    graph.name(pair[1]).to_string(),
                ));
            }
        }

        Ok(Self {
            id: String::from(id),
            difficulty: Difficulty::from_intermediate_count(path.intermediate_count()),
            start: graph.district(start),
            end: graph.district(end),
            shortest_path: route.iter().map(|v| graph.district(*v)).collect(),
            path: Path::from_slice(route),
        })
    }

    /// Create a puzzle from a route given as district names.
    pub fn from_names(
        graph: &DistrictGraph,
        id: &str,
        names: &[&str],
    ) -> Result<Self, PuzzleError> {
        let mut path: Path = Path::new(names.len());
        for name in names {
            match graph.normalize(name) {
                Some(v) => path.push(v),
                None => return Err(PuzzleError::UnknownDistrict(name.to_string())),
            }
        }
        Self::new(graph, id, &path)
    }

    /// Return the same puzzle under another identifier.
    pub fn with_id(self, id: &str) -> Self {
        Self {
            id: String::from(id),
            ..self
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Starting district.
    pub fn start(&self) -> &District {
        &self.start
    }

    /// Ending district.
    pub fn end(&self) -> &District {
        &self.end
    }

    /// Canonical route, endpoints included.
    pub fn shortest_path(&self) -> &[District] {
        &self.shortest_path
    }

    /// Canonical route as district identifiers.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Districts the player must find on the canonical route.
    pub fn intermediates(&self) -> &[District] {
        let l: usize = self.shortest_path.len();
        &self.shortest_path[1..l - 1]
    }

    /// Number of districts the player must find.
    pub fn intermediate_count(&self) -> usize {
        self.path.intermediate_count()
    }
}

/// Return the puzzles built from the sample routes of the graph whose number of intermediate
/// districts is in the given range.
///
/// Sample routes that do not form a valid puzzle are skipped.
pub fn sample_puzzles(graph: &DistrictGraph, range: &RangeInclusive<usize>) -> Vec<Puzzle> {
    let mut puzzles: Vec<Puzzle> = Vec::new();

    for (i, route) in graph.sample_routes().iter().enumerate() {
        let path: Path = Path::from_slice(route);
        if !range.contains(&path.intermediate_count()) {
            continue;
        }
        let id: String = match (path.get_first(), path.get_last()) {
            (Some(s), Some(e)) => format!("sample:{}:{}", graph.key(s), graph.key(e)),
            _ => format!("sample:{i}"),
        };
        match Puzzle::new(graph, &id, &path) {
            Ok(p) => puzzles.push(p),
            Err(e) => warn!("Sample route #{i} skipped: {e}"),
        }
    }
    puzzles
}

/// Return a random puzzle from the sample routes, or None if no sample route is in the range.
pub fn random_sample_puzzle<R: Rng>(
    graph: &DistrictGraph,
    range: &RangeInclusive<usize>,
    rng: &mut R,
) -> Option<Puzzle> {
    let mut puzzles: Vec<Puzzle> = sample_puzzles(graph, range);
    if puzzles.is_empty() {
        return None;
    }
    let i: usize = rng.random_range(0..puzzles.len());
    Some(puzzles.swap_remove(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::nepal;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    #[rstest]
    #[case(Difficulty::Easy, 1, 2)]
    #[case(Difficulty::Medium, 3, 5)]
    #[case(Difficulty::Hard, 6, 10)]
    fn policy_table(#[case] difficulty: Difficulty, #[case] min: usize, #[case] max: usize) {
        assert_eq!(difficulty.intermediate_range(), Some(min..=max));
        assert_eq!(Difficulty::from_intermediate_count(min), difficulty);
        assert_eq!(Difficulty::from_intermediate_count(max), difficulty);
    }

    #[test]
    fn difficulty_outside_policy() {
        assert_eq!(Difficulty::Any.intermediate_range(), None);
        assert_eq!(Difficulty::from_intermediate_count(0), Difficulty::Any);
        assert_eq!(Difficulty::from_intermediate_count(11), Difficulty::Any);
        assert_eq!(Difficulty::from_repr(2), Some(Difficulty::Hard));
    }

    #[test]
    fn build_from_names() {
        let graph: DistrictGraph = nepal::graph().unwrap();
        let puzzle: Puzzle =
            Puzzle::from_names(&graph, "p1", &["kathmandu", "Makwanpur", "CHITWAN"]).unwrap();
        assert_eq!(puzzle.id(), "p1");
        assert_eq!(puzzle.start().name, "Kathmandu");
        assert_eq!(puzzle.end().name, "Chitwan");
        assert_eq!(puzzle.intermediate_count(), 1);
        assert_eq!(puzzle.intermediates()[0].name, "Makwanpur");
        assert_eq!(puzzle.difficulty(), Difficulty::Easy);
        assert_eq!(puzzle.path().get_first(), Some(puzzle.start().id));
        assert_eq!(puzzle.path().get_last(), Some(puzzle.end().id));
        assert_eq!(puzzle.shortest_path().len(), 3);
    }

    #[test]
    fn adjacent_endpoints() {
        let graph: DistrictGraph = nepal::graph().unwrap();
        let puzzle: Puzzle = Puzzle::from_names(&graph, "p", &["Jhapa", "Ilam"]).unwrap();
        assert!(puzzle.intermediates().is_empty());
        assert_eq!(puzzle.difficulty(), Difficulty::Any);
    }

    #[test]
    fn renamed_puzzle_keeps_its_route() {
        let graph: DistrictGraph = nepal::graph().unwrap();
        let puzzle: Puzzle =
            Puzzle::from_names(&graph, "p1", &["Jhapa", "Morang", "Sunsari"]).unwrap();
        let renamed: Puzzle = puzzle.clone().with_id("2025-03-14");

        assert_eq!(renamed.id(), "2025-03-14");
        assert_eq!(renamed.start(), puzzle.start());
        assert_eq!(renamed.end(), puzzle.end());
        assert_eq!(renamed.shortest_path(), puzzle.shortest_path());
        assert_eq!(renamed.path(), puzzle.path());
        assert_eq!(renamed.difficulty(), puzzle.difficulty());
        assert_eq!(renamed.intermediates()[0].name, "Morang");
        assert_ne!(renamed, puzzle);
    }

    #[test]
    fn invalid_routes_are_rejected() {
        let graph: DistrictGraph = nepal::graph().unwrap();
        assert_eq!(
            Puzzle::from_names(&graph, "p", &["Jhapa"]),
            Err(PuzzleError::TooShort)
        );
        assert_eq!(
            Puzzle::from_names(&graph, "p", &["Jhapa", "Pokhara"]),
            Err(PuzzleError::UnknownDistrict(String::from("Pokhara")))
        );
        assert_eq!(
            Puzzle::from_names(&graph, "p", &["Jhapa", "Ilam", "Jhapa"]),
            Err(PuzzleError::SameEndpoints)
        );
        assert_eq!(
            Puzzle::from_names(&graph, "p", &["Jhapa", "Ilam", "Morang", "Ilam", "Panchthar"]),
            Err(PuzzleError::RepeatedDistrict(String::from("Ilam")))
        );
        assert_eq!(
            Puzzle::from_names(&graph, "p", &["Jhapa", "Kathmandu"]),
            Err(PuzzleError::NotAdjacent(
                String::from("Jhapa"),
                String::from("Kathmandu")
            ))
        );
        assert_eq!(
            Puzzle::new(&graph, "p", &Path::from_slice(&[0, 500])),
            Err(PuzzleError::UnknownDistrict(String::from("#500")))
        );
    }

    #[test]
    fn serialized_with_display_names() {
        let graph: DistrictGraph = nepal::graph().unwrap();
        let puzzle: Puzzle =
            Puzzle::from_names(&graph, "p1", &["Jhapa", "Morang", "Sunsari"]).unwrap();
        let json: serde_json::Value = serde_json::to_value(&puzzle).unwrap();
        assert_eq!(json["start"], "Jhapa");
        assert_eq!(json["shortest_path"][1], "Morang");
        assert_eq!(json["difficulty"], "easy");
        assert!(json.get("path").is_none());
    }

    #[rstest]
    #[case(Difficulty::Easy)]
    #[case(Difficulty::Medium)]
    #[case(Difficulty::Hard)]
    fn samples_cover_every_difficulty(#[case] difficulty: Difficulty) {
        let graph: DistrictGraph = nepal::graph().unwrap();
        let range: RangeInclusive<usize> = difficulty.intermediate_range().unwrap();
        let puzzles: Vec<Puzzle> = sample_puzzles(&graph, &range);
        assert!(!puzzles.is_empty());
        for p in &puzzles {
            assert_eq!(p.difficulty(), difficulty);
            assert_eq!(p.shortest_path().first(), Some(p.start()));
            assert_eq!(p.shortest_path().last(), Some(p.end()));
        }

        let mut rng: StdRng = StdRng::seed_from_u64(7);
        let p: Puzzle = random_sample_puzzle(&graph, &range, &mut rng).unwrap();
        assert!(range.contains(&p.intermediate_count()));
    }

    #[test]
    fn no_sample_in_range() {
        let graph: DistrictGraph = nepal::graph().unwrap();
        let mut rng: StdRng = StdRng::seed_from_u64(7);
        assert!(random_sample_puzzle(&graph, &(40..=50), &mut rng).is_none());
    }
}
