/*
main.rs

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


mod application;
mod cli_options;
mod config;

use std::io;
use std::process::ExitCode;

use self::application::JillaApplication;
use self::cli_options::Launch;

fn main() -> ExitCode {
    let mut app: Box<JillaApplication> = match cli_options::parse() {
        Launch::Exit(ret) => return ExitCode::from(ret),
        Launch::Play(app) => app,
    };

    let stdin: io::Stdin = io::stdin();
    let mut stdout: io::Stdout = io::stdout();
    match app.run(stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
