//! Fuzz target for config parsing and registry assembly.
//!
//! Run with: cargo +nightly fuzz run fuzz_config_parser
//!
//! Any string that parses and validates must also assemble into a registry
//! without panicking, and dispatching through it must not panic either.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = aeos_config::AppConfig::parse(s) else {
        return;
    };
    if let Ok(registry) = aeos_core::build_registry(&config) {
        let _ = registry.router().dispatch(s);
    }
});
