// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod ctx;

use anyhow::Result;
use rand::Rng;
use stratus_common::api::Name;

/// Generate a unique name for a throwaway fixture.
pub fn generate_name(prefix: &str) -> Result<Name> {
    format!(
        "{}-{:x}",
        prefix,
        rand::rng().random_range(0..0xfff_ffff_ffffu64)
    )
    .try_into()
    .map_err(anyhow::Error::msg)
}

#[cfg(test)]
mod test {
    use super::generate_name;

    #[test]
    fn test_generate_name() {
        let name = generate_name("proj").unwrap();
        assert!(name.as_str().starts_with("proj-"));
        // Collisions here would make fixture names collide across tests.
        let other = generate_name("proj").unwrap();
        assert_ne!(name, other);
    }
}
