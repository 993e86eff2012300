/*
lib.rs

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

//! Jilla is a daily puzzle about the districts of Nepal.
//!
//! The player gets a starting and an ending district, and must find the districts in between
//! on the shortest route. Each guess gets a feedback that tells how close the district is to a
//! shortest route.
//!
//! The modules, from the bottom up:
//!
//! - [`graph`] loads and validates the district adjacency table.
//! - [`generator`] finds the shortest routes and builds random puzzles.
//! - [`evaluator`] classifies a guess against a puzzle.
//! - [`player_input`] and [`game`] record the guesses and decide when the puzzle is solved.

pub mod evaluator;
pub mod game;
pub mod generator;
pub mod graph;
pub mod player_input;
