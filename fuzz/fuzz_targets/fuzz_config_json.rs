//! Fuzz target: `SystemConfig::from_json`
//!
//! Feeds arbitrary bytes to the config override parser and checks:
//! - No panics under any byte sequence
//! - Anything accepted passes `validate()`
//! - Derived values of an accepted config are usable (non-zero session
//!   interval, ordered thresholds)
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use plantcare::config::SystemConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(cfg) = SystemConfig::from_json(json) {
        assert!(cfg.validate().is_ok(), "accepted config must validate");
        assert!(!cfg.session_interval().is_zero());
        let t = cfg.thresholds();
        assert!(t.moderate < t.dry);
    }
});
