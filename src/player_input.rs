/*
player_input.rs

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

//! Manage the player's guesses.
//!
//! The module manages the guesses that the player submitted, as well as the undo and redo lists.
//! Every guess is recorded, including invalid and duplicate guesses, so that the length of the
//! history is the number of attempts.

use serde::Serialize;
use std::collections::HashSet;

use crate::evaluator::{Guess, Tier};
use crate::graph::DistrictId;

/// Manage the guesses that the player submitted.
#[derive(Serialize, Debug, Clone, Default)]
pub struct PlayerInput {
    /// Guesses, in the order the player submitted them. The last guess is the first one to
    /// undo.
    guesses: Vec<Guess>,

    /// Districts that the player already tried. Invalid guesses are not included so that
    /// guessing an endpoint twice stays invalid.
    #[serde(skip)]
    guessed: HashSet<DistrictId>,

    /// Districts on a shortest route that the player found.
    #[serde(skip)]
    correct: HashSet<DistrictId>,

    /// List of redo operations.
    redo_op: Vec<Guess>,
}

impl PlayerInput {
    /// Create a [`PlayerInput`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the guesses in the order the player submitted them.
    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    /// Return the last guess.
    pub fn last(&self) -> Option<&Guess> {
        self.guesses.last()
    }

    /// Return the number of guesses.
    pub fn len(&self) -> usize {
        self.guesses.len()
    }

    /// Whether the player has not submitted any guess yet.
    pub fn is_empty(&self) -> bool {
        self.guesses.is_empty()
    }

    /// Districts of the guesses that were not invalid.
    pub fn guessed_districts(&self) -> &HashSet<DistrictId> {
        &self.guessed
    }

    /// Districts of the exact guesses.
    pub fn correct_districts(&self) -> &HashSet<DistrictId> {
        &self.correct
    }

    /// Number of guesses that are neither exact nor duplicate.
    pub fn mistakes(&self) -> usize {
        self.guesses
            .iter()
            .filter(|g| !matches!(g.tier, Tier::Exact | Tier::Duplicate))
            .count()
    }

    /// Add a guess, but do not clear the redo list.
    fn add_no_undo(&mut self, guess: Guess) {
        // A duplicate guess refers to a district that an earlier guess already recorded
        if !matches!(guess.tier, Tier::Invalid | Tier::Duplicate)
            && let Some(id) = guess.district_id()
        {
            self.guessed.insert(id);
            if guess.tier == Tier::Exact {
                self.correct.insert(id);
            }
        }
        self.guesses.push(guess);
    }

    /// Remove the last guess, but do not update the redo list.
    fn remove_no_undo(&mut self) -> Option<Guess> {
        let guess: Guess = self.guesses.pop()?;
        if !matches!(guess.tier, Tier::Invalid | Tier::Duplicate)
            && let Some(id) = guess.district_id()
        {
            self.guessed.remove(&id);
            self.correct.remove(&id);
        }
        Some(guess)
    }

    /// Add a guess to the history.
    pub fn add(&mut self, guess: Guess) {
        self.add_no_undo(guess);
        self.redo_op.clear();
    }

    /// Undo the last guess. Return false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.remove_no_undo() {
            Some(guess) => {
                self.redo_op.push(guess);
                true
            }
            None => false,
        }
    }

    /// Redo the last undo operation. Return false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo_op.pop() {
            Some(guess) => {
                self.add_no_undo(guess);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::GuessEvaluator;
    use crate::generator::path_finder::PathFinder;
    use crate::generator::puzzles::Puzzle;
    use crate::graph::nepal;
    use std::rc::Rc;

    /// Evaluate the guesses in order and record them.
    fn play(guesses: &[&str]) -> PlayerInput {
        let finder: Rc<PathFinder> = Rc::new(PathFinder::new(nepal::graph().unwrap()));
        let puzzle: Puzzle =
            Puzzle::from_names(finder.graph(), "p", &["Jhapa", "Morang", "Sunsari"]).unwrap();
        let evaluator: GuessEvaluator = GuessEvaluator::new(finder);

        let mut input: PlayerInput = PlayerInput::new();
        for raw in guesses {
            let guess: Guess = evaluator.evaluate(raw, &puzzle, input.guessed_districts());
            input.add(guess);
        }
        input
    }

    #[test]
    fn every_guess_is_recorded() {
        let input: PlayerInput = play(&["Ilam", "nowhere", "Jhapa", "Morang", "morang"]);
        let tiers: Vec<Tier> = input.guesses().iter().map(|g| g.tier).collect();
        assert_eq!(
            tiers,
            vec![
                Tier::Near,
                Tier::Invalid,
                Tier::Invalid,
                Tier::Exact,
                Tier::Duplicate
            ]
        );
        assert_eq!(input.len(), 5);
        assert_eq!(input.guessed_districts().len(), 2);
        assert_eq!(input.correct_districts().len(), 1);
        assert_eq!(input.mistakes(), 3);
        assert_eq!(input.last().unwrap().tier, Tier::Duplicate);
    }

    #[test]
    fn undo_and_redo() {
        let mut input: PlayerInput = play(&["Morang", "Morang"]);
        assert_eq!(input.len(), 2);

        // Undoing the duplicate keeps the district
        assert!(input.undo());
        assert_eq!(input.correct_districts().len(), 1);
        assert!(input.undo());
        assert!(input.correct_districts().is_empty());
        assert!(input.guessed_districts().is_empty());
        assert!(!input.undo());
        assert!(input.is_empty());

        assert!(input.redo());
        assert_eq!(input.correct_districts().len(), 1);
        assert_eq!(input.last().unwrap().tier, Tier::Exact);
        assert!(input.redo());
        assert!(!input.redo());
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn new_guess_clears_redo() {
        let mut input: PlayerInput = play(&["Ilam", "Morang"]);
        assert!(input.undo());
        let guess: Guess = input.guesses()[0].clone();
        input.add(guess);
        assert!(!input.redo());
        assert_eq!(input.len(), 2);
        assert!(input.correct_districts().is_empty());
    }
}
