/*
path_finder.rs

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

//! Find shortest routes in the district graph.
//!
//! All the searches are breadth-first searches that expand the neighbors in the order of the
//! adjacency table. That order decides which route [`PathFinder::shortest_path`] returns when
//! several routes have the same length: the canonical route.
//!
//! Because the graph never changes, the results of [`PathFinder::shortest_path`] and
//! [`PathFinder::all_shortest_paths`] are memoized in a [`PathCache`] owned by the finder.
//! The cache can be cleared at any time with [`PathFinder::clear_cache`].

use log::{debug, trace};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};

use super::path::Path;
use crate::graph::{DistrictGraph, DistrictId};

/// Memoized search results, indexed by `(start, end)`.
#[derive(Debug, Default)]
pub struct PathCache {
    shortest: HashMap<(DistrictId, DistrictId), Option<Path>>,
    all: HashMap<(DistrictId, DistrictId), Vec<Path>>,
}

impl PathCache {
    /// Create an empty [`PathCache`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all the results.
    pub fn clear(&mut self) {
        self.shortest.clear();
        self.all.clear();
    }

    /// Number of memoized results.
    pub fn len(&self) -> usize {
        self.shortest.len() + self.all.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`PathFinder`] object.
#[derive(Debug)]
pub struct PathFinder {
    /// District graph.
    graph: DistrictGraph,

    /// For each district, the districts that list it as a neighbor.
    /// Same as the neighbors when the graph is symmetric.
    incoming: Vec<Vec<DistrictId>>,

    /// Memoized results, if enabled.
    cache: Option<RefCell<PathCache>>,
}

impl PathFinder {
    /// Create a [`PathFinder`] object that memoizes its results.
    pub fn new(graph: DistrictGraph) -> Self {
        let mut finder: Self = Self::without_cache(graph);
        finder.cache = Some(RefCell::new(PathCache::new()));
        finder
    }

    /// Create a [`PathFinder`] object that computes every result.
    pub fn without_cache(graph: DistrictGraph) -> Self {
        let mut incoming: Vec<Vec<DistrictId>> = vec![Vec::new(); graph.len()];
        for id in graph.ids() {
            for &n in graph.neighbors(id) {
                incoming[n].push(id);
            }
        }
        Self {
            graph,
            incoming,
            cache: None,
        }
    }

    /// Return the district graph.
    pub fn graph(&self) -> &DistrictGraph {
        &self.graph
    }

    /// Forget all the memoized results.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.borrow_mut().clear();
        }
    }

    /// Number of memoized results.
    pub fn cache_len(&self) -> usize {
        match &self.cache {
            Some(cache) => cache.borrow().len(),
            None => 0,
        }
    }

    /// Return the canonical shortest route from `start` to `end`.
    ///
    /// The route starts with `start` and ends with `end`. If both are the same district, then
    /// the route only contains that district.
    /// Return None if one of the districts is unknown or if `end` cannot be reached.
    pub fn shortest_path(&self, start: DistrictId, end: DistrictId) -> Option<Path> {
        if !self.graph.contains(start) || !self.graph.contains(end) {
            return None;
        }
        if let Some(cache) = &self.cache
            && let Some(p) = cache.borrow().shortest.get(&(start, end))
        {
            trace!("Cache hit for the shortest path {start} -> {end}");
            return p.clone();
        }

        let path: Option<Path> = self.find_shortest_path(start, end);
        if let Some(cache) = &self.cache {
            cache
                .borrow_mut()
                .shortest
                .insert((start, end), path.clone());
        }
        path
    }

    /// Breadth-first search, keeping the first district that discovered each district.
    fn find_shortest_path(&self, start: DistrictId, end: DistrictId) -> Option<Path> {
        let mut parent: Vec<Option<DistrictId>> = vec![None; self.graph.len()];
        let mut visited: Vec<bool> = vec![false; self.graph.len()];
        let mut queue: VecDeque<DistrictId> = VecDeque::new();

        visited[start] = true;
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            if current == end {
                break;
            }
            for &n in self.graph.neighbors(current) {
                if !visited[n] {
                    visited[n] = true;
                    parent[n] = Some(current);
                    queue.push_back(n);
                }
            }
        }
        if !visited[end] {
            return None;
        }

        // Walk back from the end
        let mut reversed: Vec<DistrictId> = vec![end];
        let mut current: DistrictId = end;
        while let Some(p) = parent[current] {
            reversed.push(p);
            current = p;
        }
        reversed.reverse();
        Some(Path::from_slice(&reversed))
    }

    /// Return every shortest route from `start` to `end`.
    ///
    /// The routes are returned in the order the breadth-first search finds them, so the first
    /// one is the route that [`PathFinder::shortest_path`] returns.
    /// A route never visits a district twice, but different routes can share districts.
    /// Return an empty list if one of the districts is unknown or if `end` cannot be reached.
    pub fn all_shortest_paths(&self, start: DistrictId, end: DistrictId) -> Vec<Path> {
        if !self.graph.contains(start) || !self.graph.contains(end) {
            return Vec::new();
        }
        if let Some(cache) = &self.cache
            && let Some(p) = cache.borrow().all.get(&(start, end))
        {
            trace!("Cache hit for all the shortest paths {start} -> {end}");
            return p.clone();
        }

        let paths: Vec<Path> = self.find_all_shortest_paths(start, end);
        debug!(
            "{} shortest path(s) between {} and {}",
            paths.len(),
            self.graph.name(start),
            self.graph.name(end)
        );
        if let Some(cache) = &self.cache {
            cache.borrow_mut().all.insert((start, end), paths.clone());
        }
        paths
    }

    /// Breadth-first search over partial routes.
    ///
    /// Each partial route keeps its own visited districts. A route is only extended with a
    /// neighbor from which `end` can still be reached within the minimum length, so that the
    /// search never expands a route that cannot be a shortest route.
    fn find_all_shortest_paths(&self, start: DistrictId, end: DistrictId) -> Vec<Path> {
        let to_end: Vec<Option<usize>> = self.distances_to(end);
        let length: usize = match to_end[start] {
            Some(l) => l,
            None => return Vec::new(),
        };

        let mut paths: Vec<Path> = Vec::new();
        let mut queue: VecDeque<Path> = VecDeque::new();
        let mut first: Path = Path::new(length + 1);
        first.push(start);
        queue.push_back(first);

        while let Some(path) = queue.pop_front() {
            // Paths are dequeued by increasing length: stop after the minimum length
            if path.len() > length + 1 {
                break;
            }
            let last: DistrictId = match path.get_last() {
                Some(v) => v,
                None => continue,
            };
            if last == end {
                paths.push(path);
                continue;
            }
            for &n in self.graph.neighbors(last) {
                if path.contains(n) {
                    continue;
                }
                if let Some(d) = to_end[n]
                    && path.len() + d == length
                {
                    let mut next: Path = path.clone();
                    next.push(n);
                    queue.push_back(next);
                }
            }
        }
        paths
    }

    /// Number of steps from every district to `end`, following the neighbor lists.
    fn distances_to(&self, end: DistrictId) -> Vec<Option<usize>> {
        let mut distances: Vec<Option<usize>> = vec![None; self.graph.len()];
        let mut queue: VecDeque<DistrictId> = VecDeque::new();

        distances[end] = Some(0);
        queue.push_back(end);
        while let Some(current) = queue.pop_front() {
            let d: usize = distances[current].unwrap_or_default();
            for &n in &self.incoming[current] {
                if distances[n].is_none() {
                    distances[n] = Some(d + 1);
                    queue.push_back(n);
                }
            }
        }
        distances
    }

    /// Number of steps between two districts, or None if `end` cannot be reached.
    pub fn distance(&self, start: DistrictId, end: DistrictId) -> Option<usize> {
        self.shortest_path(start, end).map(|p| p.len() - 1)
    }

    /// Number of steps between two districts, searching at most `max_depth` steps away.
    ///
    /// Return `max_depth + 1` if `end` is farther away, cannot be reached, or is unknown.
    pub fn bounded_distance(&self, start: DistrictId, end: DistrictId, max_depth: usize) -> usize {
        self.bounded_search(start, max_depth, |v| v == end)
    }

    /// Number of steps between `start` and the closest district in `targets`, searching at
    /// most `max_depth` steps away.
    ///
    /// Return `max_depth + 1` if no district in `targets` is close enough.
    pub fn bounded_distance_to_any(
        &self,
        start: DistrictId,
        targets: &HashSet<DistrictId>,
        max_depth: usize,
    ) -> usize {
        self.bounded_search(start, max_depth, |v| targets.contains(&v))
    }

    /// Breadth-first search limited to `max_depth` levels.
    fn bounded_search<F>(&self, start: DistrictId, max_depth: usize, is_target: F) -> usize
    where
        F: Fn(DistrictId) -> bool,
    {
        let far: usize = max_depth.saturating_add(1);
        if !self.graph.contains(start) {
            return far;
        }
        if is_target(start) {
            return 0;
        }

        let mut depth: Vec<Option<usize>> = vec![None; self.graph.len()];
        let mut queue: VecDeque<DistrictId> = VecDeque::new();
        depth[start] = Some(0);
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            let d: usize = depth[current].unwrap_or_default();
            if d >= max_depth {
                continue;
            }
            for &n in self.graph.neighbors(current) {
                if depth[n].is_some() {
                    continue;
                }
                if is_target(n) {
                    return d + 1;
                }
                depth[n] = Some(d + 1);
                queue.push_back(n);
            }
        }
        far
    }
}
