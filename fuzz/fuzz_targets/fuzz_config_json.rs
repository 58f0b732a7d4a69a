//! Fuzz target: `ControllerConfig::from_json`
//!
//! Feeds arbitrary bytes to the config parser and verifies:
//! - No panics on malformed or hostile JSON
//! - Anything accepted also passes `validate()`
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use rcc::config::ControllerConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(cfg) = ControllerConfig::from_json(text) else {
        return;
    };
    assert!(cfg.validate().is_ok(), "from_json returned an invalid config");
    assert!(cfg.loop_poll_interval_ms > 0);
});
