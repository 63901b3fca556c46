/*
 * This file is part of boardmon.
 *
 * Copyright (C) 2025 boardmon contributors
 *
 * boardmon is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * boardmon is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with boardmon. If not, see <https://www.gnu.org/licenses/>.
 */

//! Logging setup
//!
//! Diagnostics go to stderr through `tracing-subscriber` so report output on
//! stdout can be piped or redirected untouched.

use tracing_subscriber::EnvFilter;

/// Level used when neither `--log-level` nor `BOARDMON_LOG` is given
pub const DEFAULT_LEVEL: &str = "warn";

/// Filter directive for a requested level; blank input means the default
pub fn filter_directive(requested: Option<&str>) -> String {
    requested
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LEVEL)
        .to_string()
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(requested: Option<&str>) {
    let directive = filter_directive(requested);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Invalid log level {:?} ({}), using {}", directive, e, DEFAULT_LEVEL);
        EnvFilter::new(DEFAULT_LEVEL)
    });

    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_defaults() {
        assert_eq!(filter_directive(None), "warn");
        assert_eq!(filter_directive(Some("  ")), "warn");
        assert_eq!(filter_directive(Some("debug")), "debug");
        assert_eq!(filter_directive(Some("bm_core=trace")), "bm_core=trace");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(Some("error"));
        init(Some("not a level!!"));
    }
}
