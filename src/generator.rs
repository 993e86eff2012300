/*
generator.rs

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

//! Find routes and generate random puzzles.
//!
//! A [`path_finder::PathFinder`] object owns the district graph and answers the route queries:
//! the canonical shortest route between two districts, every shortest route, and distances
//! limited to a maximum number of steps.
//! Routes are represented by [`path::Path`] objects.
//!
//! [`puzzles::Puzzle`] objects represents a puzzle: the starting and ending districts and the
//! canonical route between them.
//! The number of districts on that route, endpoints excluded, gives the
//! [`puzzles::Difficulty`] of the puzzle.
//!
//! To play, a random puzzle must be created.
//! You create the puzzle by creating a [`random_puzzle::PuzzleGenerator`] object and by using its
//! [`random_puzzle::PuzzleGenerator::generate`] method.
//! If it takes too many attempts to find a puzzle for the difficulty level, then the method
//! returns an error.
//! In that case the district table comes with a list of sample routes that can be used, through
//! [`random_puzzle::PuzzleGenerator::fallback`].
//!
//! [`random_puzzle::daily_puzzle`] returns the same puzzle to every player for a given date.

pub mod path;
pub mod path_finder;
pub mod puzzles;
pub mod random_puzzle;
