//! Shutdown path: the termination hook blanks the display exactly once.

use crate::mock_hw::{ManualClock, MockGateway, RecordingSink};

use soilguard::app::service::AppService;
use soilguard::config::SystemConfig;
use soilguard::lifecycle::{ShutdownSignal, TerminationHook};

#[test]
fn hook_fires_once_after_loop_exit() {
    let shutdown = ShutdownSignal::new();
    let clock = ManualClock::at(0);
    let mut sink = RecordingSink::new();
    let mut app = AppService::new(SystemConfig::default());
    app.start(&mut sink);
    let mut hook = TerminationHook::register(MockGateway::with_readings(&[600, 610, 620]));

    // Request shutdown after the second cycle; the loop checks between cycles.
    let mut cycles = 0;
    while !shutdown.is_requested() {
        app.run_cycle(hook.gateway_mut(), &clock, &mut sink).unwrap();
        cycles += 1;
        if cycles == 2 {
            shutdown.request();
        }
    }

    hook.fire();
    hook.fire();
    assert!(hook.has_fired());
    assert_eq!(hook.gateway().shutdowns(), 1);
    assert_eq!(app.monitor().series_len(), 2);
}
