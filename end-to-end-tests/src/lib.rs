// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end tests for a Stratus deployment
//!
//! The tests in `tests/` run against the simulated deployment from
//! `stratus_test_utils::sim` by default; pointing `$STRATUS_HOST` at a real
//! deployment reuses the same helpers against live services.

pub mod helpers;
