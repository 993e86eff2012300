/*
graph.rs

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

//! District adjacency graph.
//!
//! The graph is described by a [`table::DistrictTable`]: an ordered list of districts, each
//! with its ordered list of neighbors, an alias table for alternate spellings, and a list of
//! hand-verified sample routes.
//! The built-in table for Nepal is provided by [`nepal::table`].
//!
//! Before the table can be used, its internal representation must be built with
//! [`districts::DistrictGraph::from_table`], which resolves all the names to
//! [`districts::DistrictId`] indexes.
//! The [`districts::DistrictGraph::validate`] method then verifies that every edge exists in
//! both directions.
//! All the problems found in the table are reported at once so that they can be fixed in a
//! single pass.
//!
//! Player input is mapped to districts with [`districts::DistrictGraph::normalize`], which relies
//! on [`normalize::canonical_key`].

pub mod districts;
pub mod nepal;
pub mod normalize;
pub mod table;

pub use districts::{District, DistrictGraph, DistrictId, GraphDefect, GraphError};
pub use table::{DistrictEntry, DistrictTable};
