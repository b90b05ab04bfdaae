//! Fuzz target: persisted config decode + validation
//!
//! Feeds arbitrary bytes through the same decode path the NVS adapter
//! uses on boot and verifies:
//! - No panics under any byte sequence
//! - A config that passes validation yields finite percentages and a
//!   service that starts cleanly
//!
//! cargo fuzz run fuzz_config_blob

#![no_main]

use libfuzzer_sys::fuzz_target;
use soilguard::adapters::nvs::validate_config;
use soilguard::app::events::AppEvent;
use soilguard::app::ports::EventSink;
use soilguard::app::service::AppService;
use soilguard::config::SystemConfig;
use soilguard::control::Calibration;

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(cfg) = postcard::from_bytes::<SystemConfig>(data) else {
        return;
    };
    if validate_config(&cfg).is_err() {
        return;
    }

    let cal = Calibration::from_config(&cfg);
    for raw in [cfg.low_raw, cfg.high_raw, cfg.dry_threshold_raw, 0, 4095] {
        assert!(cal.percent(raw).is_finite(), "raw {raw} gave non-finite percent");
    }

    let mut app = AppService::new(cfg);
    app.start(&mut Discard);
});
