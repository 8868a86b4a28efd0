// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facilities shared by the Stratus integration tests
//!
//! This crate carries everything the tests lean on that isn't a service
//! client: status polling, fixture helpers and teardown, response shape
//! checks, and a simulated deployment to run hermetic tests against.

pub mod cleanup;
pub mod dev;
pub mod resource_helpers;
pub mod schema;
pub mod sim;
pub mod wait;
