/*
game.rs

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

//! Manage the status of a game in progress.
//!
//! The player wins when every district between the endpoints of at least one shortest route
//! has been guessed. The route does not have to be the canonical route of the puzzle.

use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;
use std::rc::Rc;

use crate::evaluator::{Guess, GuessEvaluator, PuzzleRoutes};
use crate::generator::path_finder::PathFinder;
use crate::generator::puzzles::Puzzle;
use crate::graph::{District, DistrictId};
use crate::player_input::PlayerInput;

/// Status of the game.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Playing,
    Won,
}

/// Manage the status of the game in progress.
#[derive(Debug)]
pub struct GameSession {
    /// Classify the guesses.
    evaluator: GuessEvaluator,

    /// Puzzle details.
    puzzle: Puzzle,

    /// Shortest routes of the puzzle, computed when the game starts.
    routes: PuzzleRoutes,

    /// List of the guesses that the player submitted.
    player_input: PlayerInput,

    /// Whether the puzzle is solved.
    status: Status,

    /// Time when the game started. Used to compute game duration.
    start_time: DateTime<Utc>,

    /// Time when the player won.
    end_time: Option<DateTime<Utc>>,
}

impl GameSession {
    /// Create a [`GameSession`] object for the given puzzle.
    pub fn new(finder: Rc<PathFinder>, puzzle: Puzzle) -> Self {
        Self::with_evaluator(GuessEvaluator::new(finder), puzzle)
    }

    /// Create a [`GameSession`] object that classifies the guesses with the given evaluator.
    ///
    /// A puzzle between two adjacent districts has nothing to find, so its game starts won.
    pub fn with_evaluator(evaluator: GuessEvaluator, puzzle: Puzzle) -> Self {
        let routes: PuzzleRoutes = PuzzleRoutes::new(evaluator.finder(), &puzzle);
        info!(
            "New game {}: {} to {} ({}, {} shortest route(s))",
            puzzle.id(),
            puzzle.start(),
            puzzle.end(),
            puzzle.difficulty(),
            routes.paths().len()
        );
        let mut game: Self = Self {
            evaluator,
            puzzle,
            routes,
            player_input: PlayerInput::new(),
            status: Status::Playing,
            start_time: Utc::now(),
            end_time: None,
        };
        game.update_status();
        game
    }

    /// Replace the game in progress with a new game for the given puzzle.
    pub fn new_game(&mut self, puzzle: Puzzle) {
        *self = Self::with_evaluator(self.evaluator.clone(), puzzle);
    }

    /// Evaluate a guess and add it to the history.
    ///
    /// The guess is always recorded, even when it is invalid or duplicate.
    /// Once the game is won, more guesses are accepted, but the game stays won.
    pub fn submit_guess(&mut self, raw: &str) -> Guess {
        let guess: Guess = self.evaluator.evaluate_with_routes(
            raw,
            &self.puzzle,
            &self.routes,
            self.player_input.guessed_districts(),
        );
        self.player_input.add(guess.clone());
        if self.status == Status::Playing {
            self.update_status();
        }
        guess
    }

    /// Remove the last guess. Return false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.player_input.undo() {
            debug!("Nothing to undo");
            return false;
        }
        self.update_status();
        true
    }

    /// Submit again the last guess that [`GameSession::undo`] removed. Return false if there
    /// is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.player_input.redo() {
            debug!("Nothing to redo");
            return false;
        }
        self.update_status();
        true
    }

    /// Recompute the status from the exact guesses.
    fn update_status(&mut self) {
        let won: bool = self.routes.is_complete(self.player_input.correct_districts());
        match (self.status, won) {
            (Status::Playing, true) => {
                self.status = Status::Won;
                self.end_time = Some(Utc::now());
                let (h, m, s) = self.duration_hms();
                info!(
                    "Puzzle {} solved in {} guess(es), {h:02}:{m:02}:{s:02}",
                    self.puzzle.id(),
                    self.attempts()
                );
            }
            (Status::Won, false) => {
                debug!("Puzzle {} not solved anymore", self.puzzle.id());
                self.status = Status::Playing;
                self.end_time = None;
            }
            _ => (),
        }
    }

    /// Return the first district of the canonical route that the player has not found yet.
    ///
    /// The method does not change the game.
    pub fn hint(&self) -> Option<&District> {
        let found: &HashSet<DistrictId> = self.player_input.correct_districts();
        self.puzzle
            .intermediates()
            .iter()
            .find(|d| !found.contains(&d.id))
    }

    /// Return the status of the game.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the puzzle is solved.
    pub fn is_won(&self) -> bool {
        self.status == Status::Won
    }

    /// Return the guesses in the order the player submitted them.
    pub fn history(&self) -> &[Guess] {
        self.player_input.guesses()
    }

    /// Return the last guess.
    pub fn last_feedback(&self) -> Option<&Guess> {
        self.player_input.last()
    }

    /// Return the puzzle being played.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Return the shortest routes of the puzzle.
    pub fn routes(&self) -> &PuzzleRoutes {
        &self.routes
    }

    /// Return the number of districts found and the number of districts to find, for the route
    /// the closest to completion.
    pub fn progress(&self) -> (usize, usize) {
        self.routes.progress(self.player_input.correct_districts())
    }

    /// Return the number of guesses, including invalid and duplicate guesses.
    pub fn attempts(&self) -> usize {
        self.player_input.len()
    }

    /// Return the number of guesses that are not on a shortest route.
    /// Duplicate guesses are not counted.
    pub fn mistakes(&self) -> usize {
        self.player_input.mistakes()
    }

    /// Return the canonical route of the puzzle.
    pub fn reveal(&self) -> &[District] {
        self.puzzle.shortest_path()
    }

    /// Return the game duration.
    /// The duration stops when the player wins.
    pub fn duration(&self) -> TimeDelta {
        self.end_time.unwrap_or_else(Utc::now) - self.start_time
    }

    /// Return the game duration in hours, minutes, and seconds
    pub fn duration_hms(&self) -> (u64, u64, u64) {
        let duration: u64 = self.duration().num_seconds().max(0) as u64;
        (
            duration / 3600,
            (duration % 3600) / 60,
            (duration % 3600) % 60,
        )
    }
}
