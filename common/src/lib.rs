// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Types shared by the Stratus API clients and the test harness built on
//! them.  Nothing here is specific to any one service; per-service request
//! and response types live in the individual client crates.

pub mod api;
pub mod http_client;
