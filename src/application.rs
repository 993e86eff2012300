/*
application.rs

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


//! Play the game in a terminal.
//!
//! The application reads one action per line. A line that does not start with a colon is a
//! guess. The other actions are:
//!
//! ```text
//! :undo           remove the last guess
//! :redo           submit again the guess removed by :undo
//! :hint           show a district of the route
//! :progress       show the number of districts found
//! :history        list the guesses
//! :reveal         show the route
//! :new [LEVEL]    start a random puzzle (easy, medium, or hard)
//! :help           list the actions
//! :quit           leave the game
//! ```

use clap::ValueEnum;
use log::{debug, warn};
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use jilla::evaluator::{Distance, FEEDBACK_DEPTH, Guess, Tier};
use jilla::game::GameSession;
use jilla::generator::path_finder::PathFinder;
use jilla::generator::puzzles::{Difficulty, Puzzle};
use jilla::generator::random_puzzle::PuzzleGenerator;

use crate::config::VERSION;

const HELP: &str = "Enter a district name, or one of the following actions:
  :undo           remove the last guess
  :redo           submit again the guess removed by :undo
  :hint           show a district of the route
  :progress       show the number of districts found
  :history        list the guesses
  :reveal         show the route
  :new [LEVEL]    start a random puzzle (easy, medium, or hard)
  :help           list the actions
  :quit           leave the game";

/// Action entered by the player.
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Guess(&'a str),
    Undo,
    Redo,
    Hint,
    Progress,
    History,
    Reveal,
    New(Option<Difficulty>),
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    /// Parse a line of input.
    fn parse(line: &'a str) -> Command<'a> {
        let line: &str = line.trim();
        let Some(action) = line.strip_prefix(':') else {
            return Command::Guess(line);
        };
        let mut words = action.split_whitespace();
        match words.next().unwrap_or_default() {
            "undo" | "u" => Command::Undo,
            "redo" | "r" => Command::Redo,
            "hint" => Command::Hint,
            "progress" | "p" => Command::Progress,
            "history" => Command::History,
            "reveal" => Command::Reveal,
            "new" | "n" => match words.next() {
                None => Command::New(None),
                Some(w) => match <Difficulty as ValueEnum>::from_str(w, true) {
                    Ok(Difficulty::Any) | Err(_) => Command::Unknown(line),
                    Ok(d) => Command::New(Some(d)),
                },
            },
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" => Command::Quit,
            _ => Command::Unknown(line),
        }
    }
}

/// Return the message for the player about the guess.
pub fn feedback(guess: &Guess) -> String {
    let name: &str = match &guess.district {
        Some(d) => &d.name,
        None => return format!("\"{}\" is not a district", guess.input),
    };
    match (guess.tier, guess.distance) {
        (Tier::Exact, _) => format!("{name} is on a shortest route!"),
        (Tier::Near, _) => format!("{name} is next to a shortest route"),
        (Tier::Medium, _) => format!("{name} is two districts away from a shortest route"),
        (Tier::Far, Distance::Steps(n)) if n <= FEEDBACK_DEPTH => {
            format!("{name} is {n} districts away from a shortest route")
        }
        (Tier::Far, _) => format!("{name} is far away from a shortest route"),
        (Tier::Invalid, _) => format!("{name} is the starting or the ending district"),
        (Tier::Duplicate, _) => format!("You already tried {name}"),
    }
}

/// Terminal application.
pub struct JillaApplication {
    /// Generate the random puzzles for the `:new` action.
    generator: PuzzleGenerator,

    /// Difficulty level for the `:new` action.
    difficulty: Difficulty,

    /// The [`GameSession`] object stores the parameters of the currently played game.
    game: GameSession,
}

impl JillaApplication {
    /// Create a [`JillaApplication`] object that starts with the given puzzle.
    pub fn new(finder: Rc<PathFinder>, difficulty: Difficulty, puzzle: Puzzle) -> Self {
        Self {
            generator: PuzzleGenerator::new(finder.clone()),
            difficulty,
            game: GameSession::new(finder, puzzle),
        }
    }

    /// Read the actions of the player until the end of the input or the `:quit` action.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        writeln!(output, "Jilla {VERSION}. Enter :help for the list of actions.")?;
        self.print_puzzle(output)?;

        for line in input.lines() {
            let line: String = line?;
            let command: Command = Command::parse(&line);
            debug!("Command: {command:?}");
            if !self.execute(command, output)? {
                break;
            }
        }
        output.flush()
    }

    /// Run an action. Return false when the player leaves.
    fn execute<W: Write>(&mut self, command: Command, output: &mut W) -> io::Result<bool> {
        match command {
            Command::Guess("") => (),
            Command::Guess(raw) => {
                let solved: bool = self.game.is_won();
                let guess: Guess = self.game.submit_guess(raw);
                writeln!(output, "{}", feedback(&guess))?;
                if !solved && self.game.is_won() {
                    self.print_won(output)?;
                }
            }
            Command::Undo => {
                if self.game.undo() {
                    match self.game.last_feedback() {
                        Some(g) => writeln!(output, "Back to your guess \"{}\"", g.input)?,
                        None => writeln!(output, "Back to the start")?,
                    }
                } else {
                    writeln!(output, "Nothing to undo")?;
                }
            }
            Command::Redo => {
                if self.game.redo() {
                    if let Some(g) = self.game.last_feedback() {
                        writeln!(output, "{}", feedback(g))?;
                    }
                } else {
                    writeln!(output, "Nothing to redo")?;
                }
            }
            Command::Hint => match self.game.hint() {
                Some(d) => writeln!(output, "Try {}", d.name)?,
                None => writeln!(output, "You found every district of the route")?,
            },
            Command::Progress => {
                let (found, needed) = self.game.progress();
                writeln!(output, "Found {found} of {needed} district(s)")?;
            }
            Command::History => {
                for (i, g) in self.game.history().iter().enumerate() {
                    writeln!(
                        output,
                        "{:3}. {} ({}, {})",
                        i + 1,
                        g.input,
                        g.tier,
                        g.distance
                    )?;
                }
            }
            Command::Reveal => {
                let route: Vec<&str> = self.game.reveal().iter().map(|d| d.name.as_str()).collect();
                writeln!(output, "{}", route.join(" - "))?;
            }
            Command::New(difficulty) => {
                if let Some(d) = difficulty {
                    self.difficulty = d;
                }
                match self.generator.generate_or_fallback(self.difficulty, None) {
                    Ok(puzzle) => {
                        self.game.new_game(puzzle);
                        self.print_puzzle(output)?;
                    }
                    Err(e) => {
                        warn!("Cannot generate a {} puzzle: {e}", self.difficulty);
                        writeln!(output, "Cannot generate a new puzzle: {e}")?;
                    }
                }
            }
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Quit => return Ok(false),
            Command::Unknown(line) => writeln!(output, "Unknown action {line}. Try :help")?,
        }
        Ok(true)
    }

    fn print_puzzle<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let puzzle: &Puzzle = self.game.puzzle();
        writeln!(
            output,
            "Puzzle {} ({}): find the {} district(s) between {} and {}",
            puzzle.id(),
            puzzle.difficulty(),
            puzzle.intermediate_count(),
            puzzle.start().name,
            puzzle.end().name
        )
    }

    fn print_won<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let (h, m, s) = self.game.duration_hms();
        writeln!(
            output,
            "Solved in {} guess(es) with {} mistake(s), {h:02}:{m:02}:{s:02}",
            self.game.attempts(),
            self.game.mistakes()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jilla::graph::nepal;
    use rstest::rstest;

    fn play(input: &str) -> String {
        let finder: Rc<PathFinder> = Rc::new(PathFinder::new(nepal::graph().unwrap()));
        let puzzle: Puzzle =
            Puzzle::from_names(finder.graph(), "test", &["Kathmandu", "Makwanpur", "Chitwan"])
                .unwrap();
        let mut app: JillaApplication = JillaApplication::new(finder, Difficulty::Easy, puzzle);
        let mut output: Vec<u8> = Vec::new();
        app.run(input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[rstest]
    #[case("  Kaski ", Command::Guess("Kaski"))]
    #[case(":undo", Command::Undo)]
    #[case(":r", Command::Redo)]
    #[case(":new", Command::New(None))]
    #[case(":new HARD", Command::New(Some(Difficulty::Hard)))]
    #[case(":new any", Command::Unknown(":new any"))]
    #[case(":fly", Command::Unknown(":fly"))]
    #[case(":q", Command::Quit)]
    fn parse_commands(#[case] line: &str, #[case] command: Command) {
        assert_eq!(Command::parse(line), command);
    }

    #[test]
    fn play_a_game() {
        let output: String = play("Lalitpur\n:hint\nkathmandu\nmars\nDhading\n:history\n");
        assert!(output.contains("find the 1 district(s) between Kathmandu and Chitwan"));
        assert!(output.contains("Lalitpur is next to a shortest route"));
        assert!(output.contains("Try Makwanpur"));
        assert!(output.contains("Kathmandu is the starting or the ending district"));
        assert!(output.contains("\"mars\" is not a district"));
        assert!(output.contains("Dhading is on a shortest route!"));
        assert!(output.contains("Solved in 4 guess(es) with 3 mistake(s)"));
        assert!(output.contains("  4. Dhading (exact, 0)"));
    }

    #[test]
    fn undo_redo_and_quit() {
        let output: String = play(":undo\nMakwanpur\n:undo\n:progress\n:redo\n:quit\nDhading\n");
        assert!(output.contains("Nothing to undo"));
        assert!(output.contains("Back to the start"));
        assert!(output.contains("Found 0 of 1 district(s)"));
        assert!(output.contains("Makwanpur is on a shortest route!"));
        assert!(!output.contains("Dhading"));
    }

    #[test]
    fn new_puzzle() {
        let output: String = play(":new medium\n:reveal\n");
        assert_eq!(output.matches("Puzzle ").count(), 2);
        assert!(output.contains("(Medium)"));
    }
}
