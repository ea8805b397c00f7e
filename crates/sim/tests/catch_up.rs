use physics::{Observation, PendulumEnv};
use sim::{AdvanceReport, Scheduler, SchedulerConfig, MAX_TICKS_PER_ADVANCE};

const DT: f64 = 1.0 / 120.0;

fn zero_policy(_obs: &Observation, _p: &mut dyn FnMut(&str) -> f32) -> f32 {
    0.0
}

fn scheduler() -> Scheduler<PendulumEnv> {
    let config = SchedulerConfig {
        pool_size: 1,
        ..SchedulerConfig::default()
    };
    Scheduler::new_with(zero_policy, config, PendulumEnv::new)
}

#[test]
fn first_call_runs_exactly_one_tick() {
    let mut s = scheduler();
    // Arbitrary clock origin; the first call anchors the physics clock.
    let report = s.advance(123.0);
    assert_eq!(
        report,
        AdvanceReport {
            ticks_run: 1,
            fell_behind: false
        }
    );
    assert_eq!(s.runs()[0].episode.tick, 1.0);

    let report = s.advance(123.0 + 0.5 * DT);
    assert_eq!(report.ticks_run, 0);
}

#[test]
fn distant_clock_is_capped_and_reported() {
    let mut s = scheduler();
    s.advance(0.0);

    let report = s.advance(1000.0);
    assert_eq!(report.ticks_run, MAX_TICKS_PER_ADVANCE);
    assert!(report.fell_behind);
    assert_eq!(s.fell_behind_count(), 1);
}

#[test]
fn clock_snaps_forward_after_falling_behind() {
    let mut s = scheduler();
    s.advance(0.0);
    s.advance(1000.0);

    // Simulated time now sits at 1000.0, not at 11 * DT.
    let report = s.advance(1000.0 + 0.5 * DT);
    assert_eq!(
        report,
        AdvanceReport {
            ticks_run: 0,
            fell_behind: false
        }
    );
    let report = s.advance(1000.0 + 1.5 * DT);
    assert_eq!(report.ticks_run, 1);
    assert_eq!(s.fell_behind_count(), 1);
}

#[test]
fn steady_frames_tick_at_the_fixed_rate() {
    // A 60 fps host over a 120 Hz physics clock: two ticks per frame.
    let mut s = scheduler();
    let mut ticks = s.advance(0.0).ticks_run;
    for frame in 1..=30 {
        let now = f64::from(frame) / 60.0 + 0.25 * DT;
        let report = s.advance(now);
        assert!(!report.fell_behind);
        ticks += report.ticks_run;
    }
    assert_eq!(ticks, 61);
}
