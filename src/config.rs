// config.rs — Environment-variable tuning layer
//
// Reads THREADS and REPORT_PERIOD_MS through the EnvironmentProvider
// abstraction so the parsing rules can be unit-tested without mutating the
// real process environment. Numeric values accept decimal, octal (leading
// 0) and hex (leading 0x/0X), matching the C runtime's strtoul(str, NULL,
// 0) behavior the original tool relied on for its env knobs. Anything that
// fails to parse, overflows u32, or falls outside a sane range silently
// falls back to the default — these are tuning knobs, not required input.

use crate::environment_provider::EnvironmentProvider;

pub const DEFAULT_THREADS: u32 = 64;
pub const DEFAULT_REPORT_PERIOD_MS: u32 = 1000;

/// Upper bound past which a THREADS override is treated as "oversized" and
/// rejected in favor of the default, guarding against a typo spawning an
/// unreasonable number of OS threads.
pub const MAX_THREADS: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub threads: u32,
    pub report_period_ms: u32,
}

////////////////////////////////////////////////////////////////////////////////
//
//  impl Config
//
//  Resolves tuning knobs from an EnvironmentProvider.
//
////////////////////////////////////////////////////////////////////////////////

impl Config {
    ////////////////////////////////////////////////////////////////////////////
    //
    //  from_env
    //
    //  Build a Config by reading THREADS and REPORT_PERIOD_MS through the
    //  given provider, falling back to defaults on anything unparsable.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn from_env(provider: &dyn EnvironmentProvider) -> Self {
        let threads = provider
            .get_env_var("THREADS")
            .and_then(|s| parse_u32_opt(&s))
            .filter(|&v| v > 0 && v <= MAX_THREADS)
            .unwrap_or(DEFAULT_THREADS);

        let report_period_ms = provider
            .get_env_var("REPORT_PERIOD_MS")
            .and_then(|s| parse_u32_opt(&s))
            .filter(|&v| v > 0)
            .unwrap_or(DEFAULT_REPORT_PERIOD_MS);

        Config { threads, report_period_ms }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            threads: DEFAULT_THREADS,
            report_period_ms: DEFAULT_REPORT_PERIOD_MS,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
//
//  parse_u32_opt
//
//  Parse a decimal, octal (leading 0), or hex (leading 0x/0X) unsigned
//  32-bit integer. Returns None on any parse or overflow failure.
//
////////////////////////////////////////////////////////////////////////////////

fn parse_u32_opt(raw: &str) -> Option<u32> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u32::from_str_radix(hex, 16).ok();
    }

    if s.len() > 1 && s.starts_with('0') {
        return u32::from_str_radix(&s[1..], 8).ok();
    }

    s.parse::<u32>().ok()
}
