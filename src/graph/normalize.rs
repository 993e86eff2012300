/*
normalize.rs

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

//! Canonicalize district names.

/// Trailing word that players often type after the district name.
const DISTRICT_SUFFIX: &str = "district";

/// Return the canonical key for a district name.
///
/// The key is lowercase, with hyphens, underscores, slashes, dots, and commas turned into
/// spaces, other punctuation removed, and whitespace collapsed.
/// A trailing "district" word is dropped, so that "Kathmandu District" and "kathmandu" give the
/// same key.
///
/// The function is total: any input gives a key, possibly empty.
pub fn canonical_key(raw: &str) -> String {
    let mut cleaned: String = String::with_capacity(raw.len());

    for c in raw.chars() {
        if c.is_alphanumeric() {
            cleaned.extend(c.to_lowercase());
        } else if c.is_whitespace() || matches!(c, '-' | '_' | '/' | '.' | ',') {
            cleaned.push(' ');
        }
        // Apostrophes, parentheses and other punctuation are dropped
    }

    let mut words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.len() > 1 && words.last() == Some(&DISTRICT_SUFFIX) {
        words.pop();
    }
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Kathmandu", "kathmandu")]
    #[case("  KATHMANDU  ", "kathmandu")]
    #[case("Rukum-East", "rukum east")]
    #[case("rukum_east", "rukum east")]
    #[case("Rukum   East", "rukum east")]
    #[case("Nawalparasi (Bardaghat Susta East)", "nawalparasi bardaghat susta east")]
    #[case("Kathmandu District", "kathmandu")]
    #[case("Sindhupalchok.", "sindhupalchok")]
    #[case("Ilam's", "ilams")]
    fn canonical_keys(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(canonical_key(raw), expected);
    }

    #[test]
    fn empty_and_punctuation_only() {
        assert_eq!(canonical_key(""), "");
        assert_eq!(canonical_key("  -- !! "), "");
    }

    #[test]
    fn district_alone_is_kept() {
        assert_eq!(canonical_key("District"), "district");
    }

    #[test]
    fn deterministic() {
        let raw: &str = "Kavre-Palanchok District";
        assert_eq!(canonical_key(raw), canonical_key(raw));
    }
}
