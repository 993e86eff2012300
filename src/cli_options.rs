/*
cli_options.rs

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


//! Process command-line options.
//!
//! These options are intended for developers curating the district table.
//! In command-line mode, Jilla can verify the table, print routes, and generate random puzzles
//! that developers can copy to complete the sample routes in `src/graph/nepal.rs`.
//! Without any of these options, Jilla starts a game in the terminal.
//!
//! # Examples
//!
//! Print the shortest routes between two districts:
//!
//! ```
//! $ jilla --route kathmandu chitwan
//! Kathmandu - Makwanpur - Chitwan
//! Kathmandu - Dhading - Chitwan
//! ```
//!
//! Generate two hard puzzles:
//!
//! ```
//! $ jilla -g -c 2 -f hard
//!
//! const SAMPLE_ROUTES: &[&[&str]] = &[
//!     // Hard
//!     &["Rolpa", "Baglung", "Myagdi", "Mustang", "Manang", "Gorkha", "Dhading", "Nuwakot"],
//!     &["Saptari", "Udayapur", "Sindhuli", "Makwanpur", "Chitwan", "Tanahun", "Kaski", "Parbat"],
//! ];
//! ```

use chrono::{Local, NaiveDate};
use clap::Parser;
use log::debug;
use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::rc::Rc;

use jilla::generator::path::Path;
use jilla::generator::path_finder::PathFinder;
use jilla::generator::puzzles::{Difficulty, Puzzle};
use jilla::generator::random_puzzle::{self, GenerationError, PuzzleGenerator};
use jilla::graph::{DistrictGraph, DistrictId, DistrictTable, GraphDefect, GraphError, nepal};

use crate::application::JillaApplication;
use crate::config::COPYRIGHT_NOTICE;

/// Play Jilla, or curate the Jilla district table.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the districts
    #[arg(long, default_value_t = false)]
    ls: bool,

    /// Verify the district table and report every defect
    #[arg(long, default_value_t = false)]
    validate: bool,

    /// Print the shortest routes between two districts
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
    route: Option<Vec<String>>,

    /// Generate random puzzles
    #[arg(short, long, default_value_t = false)]
    generate: bool,

    /// Difficulty level for the puzzles
    #[arg(value_enum, short = 'f', long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Minimum number of districts between the endpoints, for the "any" difficulty level
    #[arg(long, requires = "generate")]
    min: Option<usize>,

    /// Maximum number of districts between the endpoints, for the "any" difficulty level
    #[arg(long, requires = "generate")]
    max: Option<usize>,

    /// Number of puzzles to generate
    #[arg(short, long, default_value_t = 1, requires = "generate")]
    count: usize,

    /// Print some statistics after generating the puzzles
    #[arg(short, long, default_value_t = false, requires = "generate")]
    summary: bool,

    /// Print the puzzle of the day as JSON (today by default)
    #[arg(long, value_name = "YYYY-MM-DD")]
    daily: Option<Option<NaiveDate>>,

    /// Print the district table as JSON
    #[arg(long, default_value_t = false)]
    export: bool,

    /// Read the district table from a JSON file instead of using the built-in table
    #[arg(long, value_name = "FILE")]
    graph: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// What to do after processing the command-line options.
pub enum Launch {
    /// Exit with the given status.
    Exit(u8),

    /// Start a game in the terminal.
    Play(Box<JillaApplication>),
}

/// Parse and process command-line options.
pub fn parse() -> Launch {
    let args: Args = Args::parse();

    if args.debug {
        println!("DEBUG");
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let table: DistrictTable = match read_table(args.graph.as_ref()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {e}");
            return Launch::Exit(1);
        }
    };

    //
    // Commands that work on the table, even when it has defects
    //
    if args.export {
        return export(&table);
    }
    if args.validate {
        return validate(&table);
    }

    let finder: Rc<PathFinder> = match DistrictGraph::load(&table) {
        Ok(g) => Rc::new(PathFinder::new(g)),
        Err(e) => {
            print_graph_error(&e);
            eprintln!("Use --validate to list the defects.");
            return Launch::Exit(1);
        }
    };

    //
    // List the districts
    //
    if args.ls {
        let graph: &DistrictGraph = finder.graph();
        for id in graph.ids() {
            println!("{}", graph.name(id));
        }
        return Launch::Exit(0);
    }

    if let Some(names) = &args.route {
        return route(&finder, &names[0], &names[1]);
    }

    if let Some(date) = args.daily {
        let date: NaiveDate = date.unwrap_or_else(|| Local::now().date_naive());
        return daily(finder, date);
    }

    if args.generate {
        let bounds: Option<RangeInclusive<usize>> = match (args.min, args.max) {
            (None, None) => None,
            (min, max) => Some(min.unwrap_or(0)..=max.unwrap_or(usize::MAX)),
        };
        return generate(finder, args.difficulty, bounds, args.count, args.summary);
    }

    //
    // No developer option: play the puzzle of the day
    //
    let today: NaiveDate = Local::now().date_naive();
    match random_puzzle::daily_puzzle(finder.clone(), today) {
        Ok(puzzle) => Launch::Play(Box::new(JillaApplication::new(
            finder,
            args.difficulty,
            puzzle,
        ))),
        Err(e) => {
            eprintln!("Error: cannot build the puzzle of the day: {e}");
            Launch::Exit(1)
        }
    }
}

/// Return the district table from the given JSON file, or the built-in table.
fn read_table(path: Option<&PathBuf>) -> Result<DistrictTable, GraphError> {
    match path {
        Some(p) => {
            debug!("Reading the district table from {}", p.display());
            DistrictTable::from_json_file(p)
        }
        None => Ok(nepal::table()),
    }
}

fn print_graph_error(error: &GraphError) {
    eprintln!("Error: {error}");
    if let GraphError::Defects(defects) = error {
        for d in defects {
            eprintln!("    {d}");
        }
    }
}

fn export(table: &DistrictTable) -> Launch {
    match serde_json::to_string_pretty(table) {
        Ok(json) => {
            println!("{json}");
            Launch::Exit(0)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Launch::Exit(1)
        }
    }
}

/// Report all the defects of the table, not only the first one.
fn validate(table: &DistrictTable) -> Launch {
    let defects: Vec<GraphDefect> = match DistrictGraph::from_table(table) {
        Ok(graph) => graph.defects(),
        Err(GraphError::Defects(d)) => d,
        Err(e) => {
            eprintln!("Error: {e}");
            return Launch::Exit(1);
        }
    };
    if defects.is_empty() {
        println!(
            "No defect found: {} districts, {} aliases, {} sample routes",
            table.districts.len(),
            table.aliases.len(),
            table.samples.len()
        );
        return Launch::Exit(0);
    }
    for d in &defects {
        println!("{d}");
    }
    println!("{} defect(s) found", defects.len());
    Launch::Exit(1)
}

fn route_names(finder: &PathFinder, path: &Path) -> Vec<String> {
    path.get()
        .iter()
        .map(|v| finder.graph().name(*v).to_string())
        .collect()
}

/// Print the canonical route first, and then the alternate routes.
fn route(finder: &PathFinder, from: &str, to: &str) -> Launch {
    let graph: &DistrictGraph = finder.graph();
    let mut ids: Vec<DistrictId> = Vec::with_capacity(2);
    for name in [from, to] {
        match graph.normalize(name) {
            Some(id) => ids.push(id),
            None => {
                eprintln!("Unknown district \"{name}\". Use --ls to list the districts.");
                return Launch::Exit(1);
            }
        }
    }

    let paths: Vec<Path> = finder.all_shortest_paths(ids[0], ids[1]);
    if paths.is_empty() {
        eprintln!("No route between {} and {}", graph.name(ids[0]), graph.name(ids[1]));
        return Launch::Exit(1);
    }
    for p in &paths {
        println!("{}", route_names(finder, p).join(" - "));
    }
    Launch::Exit(0)
}

fn daily(finder: Rc<PathFinder>, date: NaiveDate) -> Launch {
    let puzzle: Puzzle = match random_puzzle::daily_puzzle(finder, date) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            return Launch::Exit(1);
        }
    };
    match serde_json::to_string_pretty(&puzzle) {
        Ok(json) => {
            println!("{json}");
            Launch::Exit(0)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Launch::Exit(1)
        }
    }
}

/// Generate random puzzles and print them as sample routes that can be added to the table,
/// as fallback in case generating a random puzzle takes too long.
fn generate(
    finder: Rc<PathFinder>,
    difficulty: Difficulty,
    bounds: Option<RangeInclusive<usize>>,
    count: usize,
    summary: bool,
) -> Launch {
    let mut generator: PuzzleGenerator = PuzzleGenerator::new(finder.clone());
    let mut route_list: Vec<String> = Vec::new();
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut errors: usize = 0;
    let mut attempts: usize = 0;

    for i in 0..count {
        debug!("Iteration {i}");

        match generator.generate(difficulty, bounds.clone()) {
            Ok(puzzle) => {
                total += generator.duration;
                if generator.duration > max {
                    max = generator.duration;
                }
                attempts += generator.attempts;

                let names: Vec<String> = route_names(&finder, puzzle.path())
                    .iter()
                    .map(|n| format!("\"{n}\""))
                    .collect();
                route_list.push(format!("&[{}]", names.join(", ")));
            }
            Err(GenerationError::Exhausted { attempts: a, .. }) => {
                // It took too long, the generating algorithm gave up
                errors += 1;
                attempts += a;
                debug!("ERROR generating random puzzle");
            }
            Err(e) => {
                eprintln!("Error: {e}");
                return Launch::Exit(1);
            }
        }
    }

    //
    // Print the Rust code that can be added to the sample routes of the table.
    //
    println!(
        "
const SAMPLE_ROUTES: &[&[&str]] = &[
    // {difficulty}"
    );
    for r in &route_list {
        println!("    {r},");
    }
    println!("];");

    // Print some stats
    if summary {
        println!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
  average attempts = {}
            errors = {}",
            total,
            total / count.max(1) as f32,
            max,
            attempts / count.max(1),
            errors
        );
    }
    Launch::Exit(0)
}
