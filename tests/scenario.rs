/*
scenario.rs

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


use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::rc::Rc;

use jilla::evaluator::{Distance, Guess, GuessEvaluator, Tier};
use jilla::game::{GameSession, Status};
use jilla::generator::path::Path;
use jilla::generator::path_finder::PathFinder;
use jilla::generator::puzzles::{Difficulty, Puzzle};
use jilla::generator::random_puzzle::{PuzzleGenerator, daily_puzzle};
use jilla::graph::{DistrictGraph, DistrictId, nepal};

const RULES_TABLE: &str = r#"{
  "districts": [
    { "name": "Kathmandu", "neighbors": ["Lalitpur", "Bhaktapur"] },
    { "name": "Lalitpur", "neighbors": ["Kathmandu", "Bhaktapur", "Makwanpur"] },
    { "name": "Bhaktapur", "neighbors": ["Kathmandu", "Lalitpur"] },
    { "name": "Makwanpur", "neighbors": ["Lalitpur", "Chitwan"] },
    { "name": "Chitwan", "neighbors": ["Makwanpur"] }
  ],
  "aliases": { "Patan": "Lalitpur" }
}"#;

fn rules_finder() -> Rc<PathFinder> {
    let graph: DistrictGraph = DistrictGraph::from_json_reader(RULES_TABLE.as_bytes()).unwrap();
    Rc::new(PathFinder::new(graph))
}

fn rules_puzzle(finder: &PathFinder) -> Puzzle {
    let path: Path = finder.shortest_path(0, 4).unwrap();
    Puzzle::new(finder.graph(), "rules", &path).unwrap()
}

#[test]
fn rules_example() {
    let finder: Rc<PathFinder> = rules_finder();
    let puzzle: Puzzle = rules_puzzle(&finder);
    let names: Vec<&str> = puzzle.shortest_path().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Kathmandu", "Lalitpur", "Makwanpur", "Chitwan"]);

    let mut game: GameSession = GameSession::new(finder, puzzle);
    let guess: Guess = game.submit_guess("bhaktapur");
    assert_eq!(guess.tier, Tier::Near);
    assert_eq!(guess.distance, Distance::Steps(1));

    assert_eq!(game.submit_guess("patan").tier, Tier::Exact);
    assert_eq!(game.submit_guess("lalitpur").tier, Tier::Duplicate);
    assert_eq!(game.status(), Status::Playing);
    assert_eq!(game.submit_guess("makwanpur").tier, Tier::Exact);
    assert_eq!(game.status(), Status::Won);
    assert_eq!(game.history().len(), 4);

    // Undo the winning guess, then the duplicate
    assert!(game.undo());
    assert_eq!(game.status(), Status::Playing);
    assert!(game.undo());
    assert_eq!(game.submit_guess("Lalitpur").tier, Tier::Duplicate);
}

#[test]
fn endpoints_are_always_invalid() {
    let finder: Rc<PathFinder> = rules_finder();
    let puzzle: Puzzle = rules_puzzle(&finder);
    let evaluator: GuessEvaluator = GuessEvaluator::new(finder.clone());
    let everything: HashSet<DistrictId> = finder.graph().ids().collect();

    for raw in ["Kathmandu", "chitwan"] {
        assert_eq!(evaluator.evaluate(raw, &puzzle, &HashSet::new()).tier, Tier::Invalid);
    }
    // A district already guessed is reported as duplicate first
    assert_eq!(evaluator.evaluate("Kathmandu", &puzzle, &everything).tier, Tier::Duplicate);
}

#[test]
fn generated_puzzles_can_be_solved() {
    let finder: Rc<PathFinder> = Rc::new(PathFinder::new(nepal::graph().unwrap()));
    let mut generator: PuzzleGenerator<StdRng> =
        PuzzleGenerator::with_rng(finder.clone(), StdRng::seed_from_u64(2025));
    let puzzles: Vec<Puzzle> = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
        .into_iter()
        .map(|d| generator.generate_or_fallback(d, None).unwrap())
        .collect();
    let mut session: GameSession = GameSession::new(finder, puzzles[0].clone());

    for (n, puzzle) in puzzles.iter().enumerate() {
        if n > 0 {
            session.new_game(puzzle.clone());
        }
        assert!(session.history().is_empty());
        assert_eq!(session.puzzle(), puzzle);

        for (i, district) in puzzle.intermediates().iter().enumerate() {
            assert!(!session.is_won());
            let name: String = district.name.to_uppercase();
            assert_eq!(session.submit_guess(&name).tier, Tier::Exact);
            assert_eq!(session.progress().0, i + 1);
        }
        assert!(session.is_won());
        assert_eq!(session.mistakes(), 0);
        assert_eq!(session.hint(), None);
    }
}

#[test]
fn every_player_gets_the_same_daily_puzzle() {
    let date: NaiveDate = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();
    let first: Puzzle =
        daily_puzzle(Rc::new(PathFinder::new(nepal::graph().unwrap())), date).unwrap();
    let second: Puzzle =
        daily_puzzle(Rc::new(PathFinder::without_cache(nepal::graph().unwrap())), date).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.id(), "2025-11-02");
}
