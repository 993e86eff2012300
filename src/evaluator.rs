/*
evaluator.rs

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

//! Classify the guesses of the player.
//!
//! A guess is classified into a [`Tier`]. The checks run in the following order, and the first
//! one that matches gives the tier:
//!
//! 1. The text is not a district name: [`Tier::Invalid`].
//! 2. The district was already guessed: [`Tier::Duplicate`].
//! 3. The district is the starting or the ending district: [`Tier::Invalid`].
//! 4. The district is between the endpoints on one of the shortest routes: [`Tier::Exact`].
//! 5. Otherwise, the number of steps to the closest district on a shortest route gives
//!    [`Tier::Near`] (one step), [`Tier::Medium`] (two steps), or [`Tier::Far`].
//!
//! The evaluator only returns the tier and the distance. Building the message for the player
//! is the job of the caller.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::generator::path::Path;
use crate::generator::path_finder::PathFinder;
use crate::generator::puzzles::Puzzle;
use crate::graph::{District, DistrictGraph, DistrictId};

/// Maximum number of steps that the evaluator searches around a guess.
pub const FEEDBACK_DEPTH: usize = 4;

/// Classification of a guess.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// The district is on a shortest route.
    Exact,
    /// One step away from a shortest route.
    Near,
    /// Two steps away.
    Medium,
    /// Farther.
    Far,
    /// Not a district, or one of the endpoints.
    Invalid,
    /// Already guessed.
    Duplicate,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tier::Exact => write!(f, "exact"),
            Tier::Near => write!(f, "near"),
            Tier::Medium => write!(f, "medium"),
            Tier::Far => write!(f, "far"),
            Tier::Invalid => write!(f, "invalid"),
            Tier::Duplicate => write!(f, "duplicate"),
        }
    }
}

impl Tier {
    /// Tier for a district that is `steps` steps away from the closest route.
    fn from_steps(steps: usize) -> Tier {
        match steps {
            0 => Tier::Exact,
            1 => Tier::Near,
            2 => Tier::Medium,
            _ => Tier::Far,
        }
    }
}

/// Distance between a guess and the closest shortest route.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    Steps(usize),
    Infinite,
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Distance::Steps(n) => write!(f, "{n}"),
            Distance::Infinite => write!(f, "∞"),
        }
    }
}

/// Result of the evaluation of a guess.
///
/// A [`Guess`] object is never modified after its creation.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Guess {
    /// Text that the player entered.
    pub input: String,

    /// Matching district, or None when the text is not a district name.
    pub district: Option<District>,

    /// Whether the district is on a shortest route.
    pub is_correct: bool,

    /// Classification.
    pub tier: Tier,

    /// Number of steps to the closest shortest route.
    pub distance: Distance,

    /// When the guess was evaluated.
    pub timestamp: DateTime<Utc>,
}

impl Guess {
    fn new(input: &str, district: Option<District>, tier: Tier, distance: Distance) -> Self {
        Self {
            input: String::from(input),
            district,
            is_correct: tier == Tier::Exact,
            tier,
            distance,
            timestamp: Utc::now(),
        }
    }

    /// Identifier of the guessed district, if any.
    pub fn district_id(&self) -> Option<DistrictId> {
        self.district.as_ref().map(|d| d.id)
    }
}

/// Shortest routes of a puzzle.
///
/// The routes do not change for the lifetime of the puzzle, so they are computed once when
/// the puzzle is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleRoutes {
    /// Every shortest route. The first one is the canonical route of the puzzle.
    paths: Vec<Path>,

    /// Intermediate districts of each route.
    per_path: Vec<HashSet<DistrictId>>,

    /// Union of the intermediate districts of all the routes.
    required: HashSet<DistrictId>,

    /// Every district of every route, endpoints included.
    nodes: HashSet<DistrictId>,
}

impl PuzzleRoutes {
    /// Compute the shortest routes between the endpoints of the puzzle.
    pub fn new(finder: &PathFinder, puzzle: &Puzzle) -> Self {
        let mut paths: Vec<Path> = finder.all_shortest_paths(puzzle.start().id, puzzle.end().id);

        // Hand-written puzzles are not always built from a shortest route
        if !paths.contains(puzzle.path()) {
            warn!(
                "The route of puzzle {} is not a shortest route ({} shorter route(s))",
                puzzle.id(),
                paths.len()
            );
            paths.insert(0, puzzle.path().clone());
        }

        let per_path: Vec<HashSet<DistrictId>> = paths
            .iter()
            .map(|p| p.intermediates().iter().copied().collect())
            .collect();
        let required: HashSet<DistrictId> = per_path.iter().flatten().copied().collect();
        let nodes: HashSet<DistrictId> = paths.iter().flat_map(|p| p.get()).copied().collect();

        Self {
            paths,
            per_path,
            required,
            nodes,
        }
    }

    /// Return the shortest routes.
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Return the intermediate districts of all the routes.
    pub fn required(&self) -> &HashSet<DistrictId> {
        &self.required
    }

    /// Return the districts of all the routes, endpoints included.
    pub fn nodes(&self) -> &HashSet<DistrictId> {
        &self.nodes
    }

    /// Whether the district is between the endpoints on at least one route.
    pub fn is_intermediate(&self, district: DistrictId) -> bool {
        self.required.contains(&district)
    }

    /// Whether all the intermediate districts of at least one route are in `found`.
    pub fn is_complete(&self, found: &HashSet<DistrictId>) -> bool {
        self.per_path.iter().any(|p| p.is_subset(found))
    }

    /// Return the number of districts in `found` and the number of intermediate districts for
    /// the route that is the closest to completion.
    pub fn progress(&self, found: &HashSet<DistrictId>) -> (usize, usize) {
        self.per_path
            .iter()
            .map(|p| (p.intersection(found).count(), p.len()))
            .min_by_key(|(f, n)| (n - f, *n))
            .unwrap_or((0, 0))
    }
}

/// [`GuessEvaluator`] object.
#[derive(Debug, Clone)]
pub struct GuessEvaluator {
    finder: Rc<PathFinder>,

    /// Maximum number of steps to search around a guess.
    depth: usize,
}

impl GuessEvaluator {
    /// Create a [`GuessEvaluator`] object that searches [`FEEDBACK_DEPTH`] steps around a
    /// guess.
    pub fn new(finder: Rc<PathFinder>) -> Self {
        Self {
            finder,
            depth: FEEDBACK_DEPTH,
        }
    }

    /// Change the maximum number of steps to search around a guess.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Return the [`PathFinder`] object used by the evaluator.
    pub fn finder(&self) -> &Rc<PathFinder> {
        &self.finder
    }

    /// Classify a guess.
    ///
    /// `prior` contains the districts already guessed.
    /// The shortest routes of the puzzle are computed for the occasion. Use
    /// [`GuessEvaluator::evaluate_with_routes`] to evaluate several guesses for the same puzzle.
    pub fn evaluate(&self, raw: &str, puzzle: &Puzzle, prior: &HashSet<DistrictId>) -> Guess {
        let routes: PuzzleRoutes = PuzzleRoutes::new(&self.finder, puzzle);
        self.evaluate_with_routes(raw, puzzle, &routes, prior)
    }

    /// Classify a guess by using the shortest routes already computed for the puzzle.
    pub fn evaluate_with_routes(
        &self,
        raw: &str,
        puzzle: &Puzzle,
        routes: &PuzzleRoutes,
        prior: &HashSet<DistrictId>,
    ) -> Guess {
        let guess: Guess = self.classify(raw, puzzle, routes, prior);
        debug!(
            "Guess \"{}\" for puzzle {}: {} (distance {})",
            raw, puzzle.id(), guess.tier, guess.distance
        );
        guess
    }

    fn classify(
        &self,
        raw: &str,
        puzzle: &Puzzle,
        routes: &PuzzleRoutes,
        prior: &HashSet<DistrictId>,
    ) -> Guess {
        let graph: &DistrictGraph = self.finder.graph();
        let id: DistrictId = match graph.normalize(raw) {
            Some(id) => id,
            None => return Guess::new(raw, None, Tier::Invalid, Distance::Infinite),
        };
        let district: District = graph.district(id);

        if prior.contains(&id) {
            return Guess::new(raw, Some(district), Tier::Duplicate, Distance::Infinite);
        }
        if id == puzzle.start().id || id == puzzle.end().id {
            return Guess::new(raw, Some(district), Tier::Invalid, Distance::Infinite);
        }
        if routes.is_intermediate(id) {
            return Guess::new(raw, Some(district), Tier::Exact, Distance::Steps(0));
        }

        let steps: usize = self
            .finder
            .bounded_distance_to_any(id, routes.nodes(), self.depth);
        // Not an intermediate and not an endpoint, so at least one step away
        let steps: usize = steps.max(1);
        let tier: Tier = if steps > self.depth {
            Tier::Far
        } else {
            Tier::from_steps(steps)
        };
        Guess::new(raw, Some(district), tier, Distance::Steps(steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DistrictTable, nepal};
    use rstest::rstest;

    /// Graph from the puzzle rules example.
    fn small_finder() -> Rc<PathFinder> {
        let table: DistrictTable = DistrictTable::from_static(
            &[
                ("Kathmandu", &["Lalitpur", "Bhaktapur"]),
                ("Lalitpur", &["Kathmandu", "Bhaktapur", "Makwanpur"]),
                ("Bhaktapur", &["Kathmandu", "Lalitpur"]),
                ("Makwanpur", &["Lalitpur", "Chitwan"]),
                ("Chitwan", &["Makwanpur"]),
            ],
            &[],
            &[],
        );
        Rc::new(PathFinder::new(DistrictGraph::load(&table).unwrap()))
    }

    fn small_puzzle(finder: &PathFinder) -> Puzzle {
        Puzzle::from_names(
            finder.graph(),
            "small",
            &["Kathmandu", "Lalitpur", "Makwanpur", "Chitwan"],
        )
        .unwrap()
    }

    #[test]
    fn rules_example() {
        let finder: Rc<PathFinder> = small_finder();
        let puzzle: Puzzle = small_puzzle(&finder);
        let evaluator: GuessEvaluator = GuessEvaluator::new(finder.clone());
        let mut prior: HashSet<DistrictId> = HashSet::new();

        let guess: Guess = evaluator.evaluate("bhaktapur", &puzzle, &prior);
        assert_eq!(guess.tier, Tier::Near);
        assert_eq!(guess.distance, Distance::Steps(1));
        assert!(!guess.is_correct);
        assert_eq!(guess.district.unwrap().name, "Bhaktapur");

        let guess: Guess = evaluator.evaluate("lalitpur", &puzzle, &prior);
        assert_eq!(guess.tier, Tier::Exact);
        assert_eq!(guess.distance, Distance::Steps(0));
        assert!(guess.is_correct);
        prior.insert(guess.district_id().unwrap());

        let guess: Guess = evaluator.evaluate("Lalitpur", &puzzle, &prior);
        assert_eq!(guess.tier, Tier::Duplicate);
        assert_eq!(guess.distance, Distance::Infinite);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("Pokhara")]
    #[case("Kathmandu Lalitpur")]
    fn unknown_text_is_invalid(#[case] raw: &str) {
        let finder: Rc<PathFinder> = small_finder();
        let puzzle: Puzzle = small_puzzle(&finder);
        let guess: Guess = GuessEvaluator::new(finder).evaluate(raw, &puzzle, &HashSet::new());
        assert_eq!(guess.tier, Tier::Invalid);
        assert_eq!(guess.distance, Distance::Infinite);
        assert_eq!(guess.district, None);
        assert_eq!(guess.input, raw);
    }

    #[rstest]
    #[case("Kathmandu")]
    #[case(" CHITWAN district ")]
    fn endpoints_are_invalid(#[case] raw: &str) {
        let finder: Rc<PathFinder> = small_finder();
        let puzzle: Puzzle = small_puzzle(&finder);
        let evaluator: GuessEvaluator = GuessEvaluator::new(finder);

        // Whatever the history
        let found: HashSet<DistrictId> = HashSet::from([1, 3]);
        for prior in [HashSet::new(), found] {
            let guess: Guess = evaluator.evaluate(raw, &puzzle, &prior);
            assert_eq!(guess.tier, Tier::Invalid);
            assert!(guess.district.is_some());
        }
    }

    #[test]
    fn duplicate_is_checked_before_endpoints() {
        let finder: Rc<PathFinder> = small_finder();
        let puzzle: Puzzle = small_puzzle(&finder);
        let prior: HashSet<DistrictId> = HashSet::from([puzzle.start().id]);
        let guess: Guess = GuessEvaluator::new(finder).evaluate("kathmandu", &puzzle, &prior);
        assert_eq!(guess.tier, Tier::Duplicate);
    }

    #[test]
    fn second_guess_is_duplicate() {
        let finder: Rc<PathFinder> = nepal_finder();
        let puzzle: Puzzle = nepal_puzzle(&finder, &["Jhapa", "Morang", "Sunsari"]);
        let evaluator: GuessEvaluator = GuessEvaluator::new(finder.clone());
        let routes: PuzzleRoutes = PuzzleRoutes::new(&finder, &puzzle);
        let mut prior: HashSet<DistrictId> = HashSet::new();

        for raw in ["Ilam", "Morang", "Kathmandu", "Panchthar"] {
            let first: Guess = evaluator.evaluate_with_routes(raw, &puzzle, &routes, &prior);
            assert_ne!(first.tier, Tier::Duplicate);
            prior.insert(first.district_id().unwrap());
            let second: Guess = evaluator.evaluate_with_routes(raw, &puzzle, &routes, &prior);
            assert_eq!(second.tier, Tier::Duplicate);
        }
    }

    fn nepal_finder() -> Rc<PathFinder> {
        Rc::new(PathFinder::new(nepal::graph().unwrap()))
    }

    fn nepal_puzzle(finder: &PathFinder, names: &[&str]) -> Puzzle {
        Puzzle::from_names(finder.graph(), "nepal", names).unwrap()
    }

    #[rstest]
    #[case("Ilam", Tier::Near, Distance::Steps(1))]
    #[case("Udayapur", Tier::Near, Distance::Steps(1))]
    #[case("Panchthar", Tier::Medium, Distance::Steps(2))]
    #[case("Bhojpur", Tier::Medium, Distance::Steps(2))]
    #[case("Taplejung", Tier::Far, Distance::Steps(3))]
    #[case("Kathmandu", Tier::Far, Distance::Steps(4))]
    #[case("Darchula", Tier::Far, Distance::Steps(5))]
    fn tiers_around_the_route(
        #[case] raw: &str,
        #[case] tier: Tier,
        #[case] distance: Distance,
    ) {
        let finder: Rc<PathFinder> = nepal_finder();
        let puzzle: Puzzle = nepal_puzzle(&finder, &["Jhapa", "Morang", "Sunsari"]);
        let guess: Guess = GuessEvaluator::new(finder).evaluate(raw, &puzzle, &HashSet::new());
        assert_eq!(guess.tier, tier);
        assert_eq!(guess.distance, distance);
    }

    #[test]
    fn depth_bounds_the_search() {
        let finder: Rc<PathFinder> = nepal_finder();
        let puzzle: Puzzle = nepal_puzzle(&finder, &["Jhapa", "Morang", "Sunsari"]);
        let evaluator: GuessEvaluator = GuessEvaluator::new(finder).with_depth(1);
        let guess: Guess = evaluator.evaluate("Ilam", &puzzle, &HashSet::new());
        assert_eq!(guess.tier, Tier::Near);
        let guess: Guess = evaluator.evaluate("Panchthar", &puzzle, &HashSet::new());
        assert_eq!(guess.tier, Tier::Far);
        assert_eq!(guess.distance, Distance::Steps(2));
        let guess: Guess = evaluator.evaluate("Kathmandu", &puzzle, &HashSet::new());
        assert_eq!(guess.distance, Distance::Steps(2));
    }

    #[test]
    fn alternate_route_is_exact() {
        let finder: Rc<PathFinder> = nepal_finder();
        let puzzle: Puzzle = nepal_puzzle(&finder, &["Kathmandu", "Makwanpur", "Chitwan"]);
        let guess: Guess =
            GuessEvaluator::new(finder).evaluate("dhading", &puzzle, &HashSet::new());
        assert_eq!(guess.tier, Tier::Exact);
    }

    #[test]
    fn routes_of_a_puzzle() {
        let finder: Rc<PathFinder> = nepal_finder();
        let graph: &DistrictGraph = finder.graph();
        let puzzle: Puzzle = nepal_puzzle(&finder, &["Kathmandu", "Makwanpur", "Chitwan"]);
        let routes: PuzzleRoutes = PuzzleRoutes::new(&finder, &puzzle);
        let makwanpur: DistrictId = graph.normalize("Makwanpur").unwrap();
        let dhading: DistrictId = graph.normalize("Dhading").unwrap();

        assert_eq!(routes.paths().len(), 2);
        assert_eq!(&routes.paths()[0], puzzle.path());
        assert_eq!(routes.required(), &HashSet::from([makwanpur, dhading]));
        assert_eq!(routes.nodes().len(), 4);
        assert!(!routes.is_complete(&HashSet::new()));
        assert!(routes.is_complete(&HashSet::from([dhading])));
        assert_eq!(routes.progress(&HashSet::new()), (0, 1));
        assert_eq!(routes.progress(&HashSet::from([makwanpur])), (1, 1));
    }

    #[test]
    fn longer_route_is_kept() {
        let finder: Rc<PathFinder> = nepal_finder();
        let puzzle: Puzzle =
            nepal_puzzle(&finder, &["Kathmandu", "Lalitpur", "Makwanpur", "Chitwan"]);
        let routes: PuzzleRoutes = PuzzleRoutes::new(&finder, &puzzle);
        assert_eq!(routes.paths().len(), 3);
        assert_eq!(&routes.paths()[0], puzzle.path());
        let lalitpur: DistrictId = finder.graph().normalize("Lalitpur").unwrap();
        assert!(routes.is_intermediate(lalitpur));
    }

    #[test]
    fn serialized_guess() {
        let finder: Rc<PathFinder> = small_finder();
        let puzzle: Puzzle = small_puzzle(&finder);
        let guess: Guess =
            GuessEvaluator::new(finder).evaluate("Bhaktapur", &puzzle, &HashSet::new());
        let json: serde_json::Value = serde_json::to_value(&guess).unwrap();
        assert_eq!(json["tier"], "near");
        assert_eq!(json["district"], "Bhaktapur");
        assert_eq!(json["distance"]["steps"], 1);
        assert_eq!(json["is_correct"], false);
    }
}
