use criterion::{criterion_group, criterion_main, Criterion};
use physics::{clip, Observation, PendulumEnv};
use sim::{Scheduler, SchedulerConfig};

const DT: f64 = 1.0 / 120.0;

fn balance_policy(obs: &Observation, p: &mut dyn FnMut(&str) -> f32) -> f32 {
    let torque = p("theta_weight") * obs.theta + p("theta_dot_weight") * obs.theta_dot;
    clip(torque, -2.0, 2.0)
}

fn bench_advance(c: &mut Criterion) {
    c.bench_function("advance_60_runs_one_tick", |b| {
        let config = SchedulerConfig {
            pool_size: 60,
            ..SchedulerConfig::default()
        };
        let mut scheduler = Scheduler::new_with(balance_policy, config, PendulumEnv::new);
        let mut now = 0.0;
        scheduler.advance(now);
        b.iter(|| {
            now += DT;
            scheduler.advance(now + 0.5 * DT)
        });
    });
}

criterion_group!(benches, bench_advance);
criterion_main!(benches);
