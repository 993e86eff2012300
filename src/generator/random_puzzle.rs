/*
random_puzzle.rs

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

//! Generate a random puzzle.

use chrono::{Datelike, NaiveDate};
use log::{debug, info};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::rc::Rc;
use std::time::Instant;

use super::path::Path;
use super::path_finder::PathFinder;
use super::puzzles::{self, Difficulty, Puzzle};
use crate::graph::{DistrictGraph, DistrictId};

/// Max number of random district pairs to try before giving up. Over a sparse graph, some
/// difficulty levels are rare. In that case a sample puzzle is used.
pub const MAX_ATTEMPTS: usize = 1000;

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// [`Difficulty::Any`] requires bounds.
    #[error("the bounds are required for this difficulty level")]
    MissingBounds,

    /// The range of intermediate districts is empty.
    #[error("the range {min}..={max} is empty")]
    EmptyRange { min: usize, max: usize },

    /// The graph has fewer than two districts.
    #[error("the graph does not have enough districts")]
    NotEnoughDistricts,

    /// No puzzle found before the maximum number of attempts.
    #[error("no puzzle with {min} to {max} intermediate districts after {attempts} attempts")]
    Exhausted {
        min: usize,
        max: usize,
        attempts: usize,
    },

    /// No sample route in the range.
    #[error("no sample puzzle with {min} to {max} intermediate districts")]
    NoFallback { min: usize, max: usize },
}

/// Return the range of intermediate districts for the difficulty.
///
/// The caller-provided bounds are only used with [`Difficulty::Any`].
pub fn target_range(
    difficulty: Difficulty,
    bounds: Option<RangeInclusive<usize>>,
) -> Result<RangeInclusive<usize>, GenerationError> {
    let range: RangeInclusive<usize> = match difficulty.intermediate_range() {
        Some(r) => r,
        None => bounds.ok_or(GenerationError::MissingBounds)?,
    };
    if range.is_empty() {
        return Err(GenerationError::EmptyRange {
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(range)
}

/// [`PuzzleGenerator`] object.
pub struct PuzzleGenerator<R: Rng = ThreadRng> {
    /// Route finder over the district graph.
    finder: Rc<PathFinder>,

    /// Random number generator.
    rng: R,

    /// Max number of district pairs to try.
    max_attempts: usize,

    /// Number of attempts it took to generate the last puzzle.
    pub attempts: usize,

    /// Duration in seconds it took to generate the last puzzle.
    pub duration: f32,
}

impl PuzzleGenerator<ThreadRng> {
    /// Create the object, using the thread random number generator.
    pub fn new(finder: Rc<PathFinder>) -> Self {
        Self::with_rng(finder, rand::rng())
    }
}

impl<R: Rng> PuzzleGenerator<R> {
    /// Create the object with the given random number generator.
    pub fn with_rng(finder: Rc<PathFinder>, rng: R) -> Self {
        Self {
            finder,
            rng,
            max_attempts: MAX_ATTEMPTS,
            attempts: 0,
            duration: 0.0,
        }
    }

    /// Change the maximum number of attempts.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Generate and return a random puzzle.
    ///
    /// The method picks two different districts at random, and accepts them if the number of
    /// districts on the canonical route between them is in the range of the difficulty level.
    /// For [`Difficulty::Any`], the range is provided in `bounds`.
    ///
    /// # Errors
    ///
    /// The method returns an error if the parameters are invalid, or if no puzzle is found
    /// after the maximum number of attempts. In that later case, the caller can use
    /// [`PuzzleGenerator::fallback`].
    pub fn generate(
        &mut self,
        difficulty: Difficulty,
        bounds: Option<RangeInclusive<usize>>,
    ) -> Result<Puzzle, GenerationError> {
        self.attempts = 0;
        self.duration = 0.0;
        let start: Instant = Instant::now();

        let range: RangeInclusive<usize> = target_range(difficulty, bounds)?;
        let graph: &DistrictGraph = self.finder.graph();
        let num_districts: usize = graph.len();
        if num_districts < 2 {
            return Err(GenerationError::NotEnoughDistricts);
        }

        debug!(
            "Generating a {difficulty} puzzle with {} to {} intermediate districts",
            range.start(),
            range.end()
        );

        while self.attempts < self.max_attempts {
            self.attempts += 1;

            // Two different districts, uniformly
            let d1: DistrictId = self.rng.random_range(0..num_districts);
            let mut d2: DistrictId = self.rng.random_range(0..num_districts - 1);
            if d2 >= d1 {
                d2 += 1;
            }

            let path: Path = match self.finder.shortest_path(d1, d2) {
                Some(p) => p,
                None => continue,
            };
            if !range.contains(&path.intermediate_count()) {
                continue;
            }

            let id: String = format!("{}:{}", graph.key(d1), graph.key(d2));
            match Puzzle::new(graph, &id, &path) {
                Ok(puzzle) => {
                    self.duration = start.elapsed().as_secs_f32();
                    debug!(
                        "Attempts = {}  Duration = {}  Puzzle = {}",
                        self.attempts, self.duration, puzzle.id()
                    );
                    return Ok(puzzle);
                }
                Err(e) => debug!("    Route rejected: {e}"),
            }
        }

        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Giving up after {} attempts ({}s)",
            self.attempts, self.duration
        );
        Err(GenerationError::Exhausted {
            min: *range.start(),
            max: *range.end(),
            attempts: self.attempts,
        })
    }

    /// Return a random sample puzzle for the difficulty level.
    ///
    /// # Errors
    ///
    /// The method returns an error if the parameters are invalid, or if the graph has no sample
    /// route in the range.
    pub fn fallback(
        &mut self,
        difficulty: Difficulty,
        bounds: Option<RangeInclusive<usize>>,
    ) -> Result<Puzzle, GenerationError> {
        let range: RangeInclusive<usize> = target_range(difficulty, bounds)?;
        puzzles::random_sample_puzzle(self.finder.graph(), &range, &mut self.rng).ok_or(
            GenerationError::NoFallback {
                min: *range.start(),
                max: *range.end(),
            },
        )
    }

    /// Generate a random puzzle, or use a sample puzzle if it takes too many attempts.
    pub fn generate_or_fallback(
        &mut self,
        difficulty: Difficulty,
        bounds: Option<RangeInclusive<usize>>,
    ) -> Result<Puzzle, GenerationError> {
        match self.generate(difficulty, bounds.clone()) {
            Err(GenerationError::Exhausted { attempts, .. }) => {
                info!("No random puzzle after {attempts} attempts: using a sample puzzle");
                self.fallback(difficulty, bounds)
            }
            ret => ret,
        }
    }
}

/// Return the puzzle of the day.
///
/// Every player gets the same puzzle for a given date: the random number generator is seeded
/// with the date. The difficulty level changes with the day of the week.
pub fn daily_puzzle(finder: Rc<PathFinder>, date: NaiveDate) -> Result<Puzzle, GenerationError> {
    let days: u64 = date.num_days_from_ce().unsigned_abs().into();
    let weekday: u8 = date.weekday().num_days_from_monday() as u8;
    let difficulty: Difficulty = Difficulty::from_repr(weekday % 3).unwrap_or_default();

    let mut generator: PuzzleGenerator<StdRng> =
        PuzzleGenerator::with_rng(finder, StdRng::seed_from_u64(days));
    let puzzle: Puzzle = generator
        .generate_or_fallback(difficulty, None)?
        .with_id(&date.format("%Y-%m-%d").to_string());
    info!("Daily puzzle {}: {difficulty}", puzzle.id());
    Ok(puzzle)
}
