// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A simulated Stratus deployment for hermetic tests
//!
//! The sim is an [`httptest::Server`] preloaded with the identity endpoints
//! every test needs (login, liveness); tests add expectations for the
//! service endpoints they exercise, including scripted status progressions
//! (an instance that answers `creating`, then `starting`, then `running`
//! across successive polls).  All catalog entries point back at the sim
//! itself, so one server plays every service.

use httptest::matchers::request;
use httptest::responders::json_encoded;
use httptest::Expectation;
use httptest::Server;
use stratus_config::FeatureConfig;
use stratus_config::HarnessConfig;
use stratus_config::IdentityConfig;
use stratus_config::TimeoutConfig;

pub const SIM_USERNAME: &str = "qa";
pub const SIM_PASSWORD: &str = "correct-horse";
pub const SIM_PROJECT: &str = "sim-project";
pub const SIM_TOKEN: &str = "st-sim-3b82";
pub const SIM_PROJECT_ID: &str = "b91c5e61-87cc-4a2e-b6f5-ba0e0f1c42be";

/// Name the sim assigns to every scratch project it's asked to create
///
/// Returning a fixed name keeps the sim's expectations static; callers are
/// expected to use the name from the create response, not the one they
/// requested.
pub const SIM_SCRATCH_PROJECT: &str = "proj-sim-scratch";
pub const SIM_SCRATCH_PROJECT_ID: &str =
    "53b1a6e1-5b60-4d0e-8e13-b25e60cf8c17";

/// One simulated deployment
pub struct StratusSim {
    pub server: Server,
}

impl StratusSim {
    /// Start a sim that answers logins with a catalog of every service,
    /// all pointing back at the sim.
    pub fn start() -> StratusSim {
        let server = Server::run();
        let base = format!("http://{}", server.addr());

        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/v1/tokens",
            ))
            .times(1..)
            .respond_with(json_encoded(serde_json::json!({
                "token": SIM_TOKEN,
                "expires_at": "2030-01-01T00:00:00Z",
                "project_id": SIM_PROJECT_ID,
                "catalog": [
                    { "service": "identity", "url": base },
                    { "service": "compute", "url": base },
                    { "service": "images", "url": base },
                    { "service": "volumes", "url": base },
                    { "service": "networks", "url": base },
                    { "service": "objects", "url": base },
                    { "service": "telemetry", "url": base },
                    { "service": "messaging", "url": base },
                ],
            }))),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/v1/ping"))
                .times(0..)
                .respond_with(json_encoded(serde_json::json!({
                    "status": "ok",
                    "version": "1.0",
                }))),
        );
        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/v1/projects",
            ))
            .times(0..)
            .respond_with(json_encoded(serde_json::json!({
                "id": SIM_SCRATCH_PROJECT_ID,
                "name": SIM_SCRATCH_PROJECT,
                "description": "",
                "time_created": "2025-03-01T00:00:00Z",
                "time_modified": "2025-03-01T00:00:00Z",
            }))),
        );
        server.expect(
            Expectation::matching(request::method_path(
                "DELETE",
                "/v1/projects/proj-sim-scratch",
            ))
            .times(0..)
            .respond_with(httptest::responders::status_code(204)),
        );

        StratusSim { server }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.server.addr())
    }

    /// Add an expectation to the sim.
    pub fn expect(&self, expectation: Expectation) {
        self.server.expect(expectation);
    }

    /// A harness configuration pointing at this sim, with polling tightened
    /// up so tests finish quickly.
    pub fn config(&self) -> HarnessConfig {
        HarnessConfig {
            identity: IdentityConfig {
                endpoint: self.base_url(),
                username: String::from(SIM_USERNAME),
                password: String::from(SIM_PASSWORD),
                project: SIM_PROJECT.parse().expect("invalid sim project"),
            },
            endpoints: Default::default(),
            timeouts: TimeoutConfig {
                poll_interval_ms: 10,
                instance_build_timeout_secs: 5,
                volume_build_timeout_secs: 5,
                image_build_timeout_secs: 5,
                network_build_timeout_secs: 5,
                deletion_timeout_secs: 5,
            },
            features: FeatureConfig::default(),
            log: dropshot::ConfigLogging::StderrTerminal {
                level: dropshot::ConfigLoggingLevel::Error,
            },
        }
    }
}
