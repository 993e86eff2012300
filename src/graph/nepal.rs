/*
nepal.rs

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

//! Built-in adjacency table for the 77 districts of Nepal.
//!
//! Districts are grouped by province.
//! Within a neighbor list, the first districts are preferred when several shortest routes
//! exist.

use super::districts::{DistrictGraph, GraphError};
use super::table::DistrictTable;

/// Districts and their neighbors.
const DISTRICTS: &[(&str, &[&str])] = &[
    // Koshi
    ("Taplejung", &["Panchthar", "Terhathum", "Sankhuwasabha"]),
    ("Panchthar", &["Taplejung", "Terhathum", "Ilam"]),
    ("Ilam", &["Panchthar", "Dhankuta", "Morang", "Jhapa"]),
    ("Jhapa", &["Ilam", "Morang"]),
    ("Morang", &["Jhapa", "Ilam", "Dhankuta", "Sunsari"]),
    ("Sunsari", &["Morang", "Dhankuta", "Udayapur", "Saptari"]),
    ("Dhankuta", &["Terhathum", "Sankhuwasabha", "Bhojpur", "Sunsari", "Morang", "Ilam"]),
    ("Terhathum", &["Taplejung", "Panchthar", "Dhankuta", "Sankhuwasabha"]),
    ("Sankhuwasabha", &["Taplejung", "Terhathum", "Dhankuta", "Bhojpur", "Solukhumbu"]),
    ("Bhojpur", &["Sankhuwasabha", "Dhankuta", "Udayapur", "Khotang", "Solukhumbu"]),
    (
        "Solukhumbu",
        &[
            "Sankhuwasabha", "Bhojpur", "Khotang", "Okhaldhunga", "Ramechhap", "Dolakha",
        ],
    ),
    ("Okhaldhunga", &["Solukhumbu", "Khotang", "Udayapur", "Sindhuli", "Ramechhap"]),
    ("Khotang", &["Solukhumbu", "Bhojpur", "Udayapur", "Okhaldhunga"]),
    (
        "Udayapur",
        &[
            "Khotang", "Bhojpur", "Sunsari", "Saptari", "Siraha", "Sindhuli", "Okhaldhunga",
        ],
    ),
    // Madhesh
    ("Saptari", &["Udayapur", "Sunsari", "Siraha"]),
    ("Siraha", &["Saptari", "Udayapur", "Dhanusha"]),
    ("Dhanusha", &["Siraha", "Sindhuli", "Mahottari"]),
    ("Mahottari", &["Dhanusha", "Sindhuli", "Sarlahi"]),
    ("Sarlahi", &["Mahottari", "Sindhuli", "Rautahat"]),
    ("Rautahat", &["Sarlahi", "Makwanpur", "Bara"]),
    ("Bara", &["Rautahat", "Makwanpur", "Parsa"]),
    ("Parsa", &["Bara", "Makwanpur", "Chitwan"]),
    // Bagmati
    ("Dolakha", &["Sindhupalchok", "Ramechhap", "Solukhumbu"]),
    ("Sindhupalchok", &["Rasuwa", "Nuwakot", "Kathmandu", "Kavrepalanchok", "Dolakha"]),
    ("Rasuwa", &["Nuwakot", "Sindhupalchok", "Dhading"]),
    ("Nuwakot", &["Rasuwa", "Sindhupalchok", "Kathmandu", "Dhading"]),
    ("Dhading", &["Rasuwa", "Nuwakot", "Kathmandu", "Makwanpur", "Chitwan", "Gorkha"]),
    (
        "Kathmandu",
        &[
            "Nuwakot", "Sindhupalchok", "Kavrepalanchok", "Bhaktapur", "Lalitpur", "Makwanpur",
            "Dhading",
        ],
    ),
    ("Lalitpur", &["Kathmandu", "Bhaktapur", "Kavrepalanchok", "Makwanpur"]),
    ("Bhaktapur", &["Kathmandu", "Lalitpur", "Kavrepalanchok"]),
    (
        "Kavrepalanchok",
        &[
            "Sindhupalchok", "Kathmandu", "Bhaktapur", "Lalitpur", "Makwanpur", "Sindhuli",
            "Ramechhap",
        ],
    ),
    ("Ramechhap", &["Dolakha", "Solukhumbu", "Okhaldhunga", "Sindhuli", "Kavrepalanchok"]),
    (
        "Sindhuli",
        &[
            "Makwanpur", "Kavrepalanchok", "Ramechhap", "Okhaldhunga", "Udayapur", "Dhanusha",
            "Mahottari", "Sarlahi",
        ],
    ),
    (
        "Makwanpur",
        &[
            "Dhading", "Kathmandu", "Lalitpur", "Kavrepalanchok", "Sindhuli", "Rautahat", "Bara",
            "Parsa", "Chitwan",
        ],
    ),
    ("Chitwan", &["Parsa", "Makwanpur", "Dhading", "Tanahun", "Nawalpur"]),
    // Gandaki
    ("Gorkha", &["Dhading", "Tanahun", "Lamjung", "Manang"]),
    ("Lamjung", &["Gorkha", "Manang", "Kaski", "Tanahun"]),
    ("Tanahun", &["Gorkha", "Lamjung", "Kaski", "Syangja", "Palpa", "Nawalpur", "Chitwan"]),
    ("Syangja", &["Kaski", "Tanahun", "Palpa", "Gulmi", "Parbat"]),
    ("Kaski", &["Manang", "Lamjung", "Tanahun", "Syangja", "Parbat", "Myagdi"]),
    ("Manang", &["Mustang", "Kaski", "Lamjung", "Gorkha"]),
    ("Mustang", &["Manang", "Myagdi", "Dolpa"]),
    ("Myagdi", &["Mustang", "Dolpa", "Kaski", "Parbat", "Baglung"]),
    ("Parbat", &["Myagdi", "Kaski", "Syangja", "Gulmi", "Baglung"]),
    ("Baglung", &["Myagdi", "Parbat", "Gulmi", "Rukum East", "Rolpa"]),
    ("Nawalpur", &["Chitwan", "Tanahun", "Palpa", "Parasi"]),
    // Lumbini
    ("Parasi", &["Nawalpur", "Palpa", "Rupandehi"]),
    ("Rupandehi", &["Parasi", "Palpa", "Arghakhanchi", "Kapilvastu"]),
    ("Kapilvastu", &["Rupandehi", "Arghakhanchi", "Dang"]),
    ("Palpa", &["Syangja", "Tanahun", "Nawalpur", "Parasi", "Rupandehi", "Arghakhanchi", "Gulmi"]),
    ("Arghakhanchi", &["Gulmi", "Palpa", "Rupandehi", "Kapilvastu", "Dang", "Pyuthan"]),
    ("Gulmi", &["Parbat", "Syangja", "Palpa", "Arghakhanchi", "Pyuthan", "Baglung"]),
    ("Pyuthan", &["Gulmi", "Arghakhanchi", "Dang", "Rolpa"]),
    ("Rolpa", &["Baglung", "Rukum East", "Rukum West", "Salyan", "Dang", "Pyuthan"]),
    ("Rukum East", &["Dolpa", "Baglung", "Rolpa", "Rukum West"]),
    ("Dang", &["Salyan", "Rolpa", "Pyuthan", "Arghakhanchi", "Kapilvastu", "Banke"]),
    ("Banke", &["Dang", "Salyan", "Surkhet", "Bardiya"]),
    ("Bardiya", &["Banke", "Surkhet", "Kailali"]),
    // Karnali
    ("Rukum West", &["Rukum East", "Dolpa", "Jajarkot", "Salyan", "Rolpa"]),
    ("Salyan", &["Rukum West", "Jajarkot", "Surkhet", "Banke", "Dang", "Rolpa"]),
    ("Dolpa", &["Mustang", "Myagdi", "Rukum East", "Rukum West", "Jajarkot", "Jumla", "Mugu"]),
    ("Humla", &["Mugu", "Bajura"]),
    ("Jumla", &["Dolpa", "Mugu", "Kalikot", "Jajarkot"]),
    ("Kalikot", &["Jumla", "Bajura", "Achham", "Dailekh", "Jajarkot"]),
    ("Mugu", &["Humla", "Bajura", "Jumla", "Dolpa"]),
    ("Surkhet", &["Salyan", "Jajarkot", "Dailekh", "Achham", "Kailali", "Bardiya", "Banke"]),
    ("Dailekh", &["Jajarkot", "Kalikot", "Achham", "Surkhet"]),
    ("Jajarkot", &["Rukum West", "Dolpa", "Jumla", "Kalikot", "Dailekh", "Surkhet", "Salyan"]),
    // Sudurpashchim
    ("Bajura", &["Humla", "Mugu", "Kalikot", "Achham", "Bajhang"]),
    ("Bajhang", &["Bajura", "Achham", "Doti", "Baitadi", "Darchula"]),
    ("Achham", &["Bajura", "Bajhang", "Doti", "Kailali", "Surkhet", "Dailekh", "Kalikot"]),
    ("Doti", &["Bajhang", "Achham", "Kailali", "Dadeldhura"]),
    ("Kailali", &["Doti", "Achham", "Surkhet", "Bardiya", "Kanchanpur", "Dadeldhura"]),
    ("Kanchanpur", &["Kailali", "Dadeldhura"]),
    ("Dadeldhura", &["Baitadi", "Doti", "Kailali", "Kanchanpur"]),
    ("Baitadi", &["Darchula", "Bajhang", "Dadeldhura"]),
    ("Darchula", &["Bajhang", "Baitadi"]),
];

/// Historical names, split units, and other romanizations.
const ALIASES: &[(&str, &str)] = &[
    ("Chitawan", "Chitwan"),
    ("Dadeldura", "Dadeldhura"),
    ("Dang Deukhuri", "Dang"),
    ("Dhanusa", "Dhanusha"),
    ("Eastern Rukum", "Rukum East"),
    ("Kabhre", "Kavrepalanchok"),
    ("Kabhrepalanchok", "Kavrepalanchok"),
    ("Kapilbastu", "Kapilvastu"),
    ("Kavre", "Kavrepalanchok"),
    ("Makawanpur", "Makwanpur"),
    ("Nawalparasi", "Parasi"),
    ("Nawalparasi East", "Nawalpur"),
    ("Nawalparasi (Bardaghat Susta East)", "Nawalpur"),
    ("Nawalparasi West", "Parasi"),
    ("Nawalparasi (Bardaghat Susta West)", "Parasi"),
    ("Okhaldunga", "Okhaldhunga"),
    ("Patan", "Lalitpur"),
    ("Rukum", "Rukum West"),
    ("Rukum Paschim", "Rukum West"),
    ("Rukum Purba", "Rukum East"),
    ("Sindhupalchowk", "Sindhupalchok"),
    ("Solu Khumbu", "Solukhumbu"),
    ("Tehrathum", "Terhathum"),
    ("Udaypur", "Udayapur"),
    ("Western Rukum", "Rukum West"),
];

/// Hand-verified shortest routes, used when generating a random puzzle takes too long.
const SAMPLE_ROUTES: &[&[&str]] = &[
    // Easy
    &["Jhapa", "Morang", "Sunsari"],
    &["Kathmandu", "Makwanpur", "Chitwan"],
    &["Kaski", "Tanahun", "Palpa"],
    &["Dang", "Salyan", "Surkhet"],
    // Medium
    &["Kathmandu", "Makwanpur", "Chitwan", "Tanahun", "Kaski"],
    &["Ilam", "Dhankuta", "Sankhuwasabha", "Solukhumbu", "Okhaldhunga"],
    &["Rupandehi", "Parasi", "Nawalpur", "Chitwan", "Dhading"],
    &["Darchula", "Bajhang", "Achham", "Surkhet", "Salyan", "Dang"],
    &["Jhapa", "Morang", "Sunsari", "Udayapur", "Sindhuli", "Makwanpur", "Kathmandu"],
    // Hard
    &["Kanchanpur", "Kailali", "Surkhet", "Jajarkot", "Dolpa", "Mustang", "Manang", "Gorkha"],
    &[
        "Taplejung", "Sankhuwasabha", "Bhojpur", "Udayapur", "Sindhuli", "Makwanpur", "Chitwan",
        "Tanahun", "Kaski",
    ],
    &[
        "Jhapa", "Morang", "Sunsari", "Udayapur", "Sindhuli", "Makwanpur", "Dhading", "Gorkha",
        "Manang", "Mustang",
    ],
    &[
        "Ilam", "Dhankuta", "Bhojpur", "Udayapur", "Sindhuli", "Makwanpur", "Chitwan", "Tanahun",
        "Palpa", "Rupandehi",
    ],
];

/// Return the built-in table.
pub fn table() -> DistrictTable {
    DistrictTable::from_static(DISTRICTS, ALIASES, SAMPLE_ROUTES)
}

/// Return the built-in graph, validated.
pub fn graph() -> Result<DistrictGraph, GraphError> {
    DistrictGraph::load(&table())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DistrictId;

    #[test]
    fn table_is_valid() {
        let graph: DistrictGraph = graph().unwrap();
        assert_eq!(graph.len(), 77);
        assert!(graph.defects().is_empty());
    }

    #[test]
    fn aliases_resolve() {
        let graph: DistrictGraph = graph().unwrap();
        let kavre: Option<DistrictId> = graph.normalize("Kavrepalanchok");
        assert!(kavre.is_some());
        assert_eq!(graph.normalize("kabhre"), kavre);
        assert_eq!(graph.normalize("Kavre District"), kavre);
        assert_eq!(graph.normalize("rukum-east"), graph.normalize("Rukum Purba"));
        assert_eq!(
            graph.normalize("Nawalparasi (Bardaghat Susta East)"),
            graph.normalize("nawalpur")
        );
        assert_eq!(graph.normalize("nawalparasi"), graph.normalize("Parasi"));
    }

    #[test]
    fn samples_follow_edges() {
        let graph: DistrictGraph = graph().unwrap();
        assert_eq!(graph.sample_routes().len(), SAMPLE_ROUTES.len());
        for route in graph.sample_routes() {
            for pair in route.windows(2) {
                assert!(graph.is_adjacent(pair[0], pair[1]));
            }
        }
    }
}
