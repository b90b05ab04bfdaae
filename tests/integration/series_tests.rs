//! The series as seen from another thread while the loop is writing it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crate::mock_hw::{ManualClock, MockGateway, RecordingSink};

use soilguard::app::service::AppService;
use soilguard::config::SystemConfig;

const CYCLES: usize = 500;

#[test]
fn concurrent_reader_sees_growing_prefixes() {
    let raws: Vec<i32> = (0..CYCLES).map(|i| 560 + (i as i32 % 170)).collect();
    let mut app = AppService::new(SystemConfig::default());
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    let monitor = app.monitor();
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let monitor = monitor.clone();
        let done = done.clone();
        thread::spawn(move || {
            let mut last = Vec::new();
            let mut reads = 0u32;
            loop {
                let finished = done.load(Ordering::Acquire);
                let snapshot = monitor.series_snapshot();
                // Snapshot first, counter second: the counter leads the series.
                let completed = monitor.completed_cycles();
                assert!(snapshot.len() as u64 <= completed);
                assert!(snapshot.len() >= last.len());
                assert_eq!(&snapshot[..last.len()], &last[..], "history rewritten");
                last = snapshot;
                reads += 1;
                if finished {
                    return (last, reads);
                }
            }
        })
    };

    let clock = ManualClock::at(0);
    let mut hw = MockGateway::with_readings(&raws);
    hw.attach_clock(&clock);
    for _ in 0..CYCLES {
        app.run_cycle(&mut hw, &clock, &mut sink).unwrap();
        clock.advance(2000);
    }
    done.store(true, Ordering::Release);

    let (last, reads) = reader.join().unwrap();
    assert!(reads > 0);
    assert_eq!(last.len(), CYCLES);
    assert_eq!(last, monitor.series_snapshot());
}

#[test]
fn summary_matches_recorded_cycles() {
    let mut app = AppService::new(SystemConfig::default());
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    let clock = ManualClock::at(0);
    // 735 → 0 %, 550 → 100 %, 642.5 → 50 %.
    let mut hw = MockGateway::with_readings(&[735, 550]);
    hw.attach_clock(&clock);
    for _ in 0..2 {
        app.run_cycle(&mut hw, &clock, &mut sink).unwrap();
        clock.advance(10_000);
    }

    let summary = app.monitor().series().summary().unwrap();
    assert_eq!(summary.count, 2);
    assert!(summary.min.abs() < 1e-9);
    assert!((summary.max - 100.0).abs() < 1e-9);
    assert!((summary.mean - 50.0).abs() < 1e-9);
    assert!((summary.last - 100.0).abs() < 1e-9);

    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"count\":2"));
}
