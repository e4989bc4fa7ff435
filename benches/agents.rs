//! Benchmark `QAgent::act` and `QAgent::update` for the Q-learning agents.
use criterion::{
    criterion_group, criterion_main, measurement::Measurement, BenchmarkGroup, Criterion,
};
use qlearn::envs::{Chain, Move};
use qlearn::{Environment, FeatureVector, IndicatorFeatures, Prng, QAgent, QLearningConfig};
use rand::SeedableRng;

const CONFIG: QLearningConfig = QLearningConfig::new(0.95, 0.1, 0.2);

/// Features of a chain state-action pair: a bias and the state index for each move.
fn chain_features(state: &u64, action: &Move) -> FeatureVector<&'static str> {
    #[allow(clippy::cast_precision_loss)]
    let position = *state as f64;
    let name = match action {
        Move::Left => "left",
        Move::Right => "right",
    };
    [("bias", 1.0), (name, position)].into_iter().collect()
}

/// Benchmark an agent acting and learning online on the chain environment.
fn benchmark_agent_step<M, T>(group: &mut BenchmarkGroup<M>, name: &str, mut agent: T)
where
    M: Measurement,
    T: QAgent<u64, Move>,
{
    let env = Chain::default();
    let mut rng = Prng::seed_from_u64(0);
    let mut state = env.initial_state();
    group.bench_function(name, |b| {
        b.iter(|| {
            // Chain states are never terminal so there is always an action
            if let Some(action) = agent.act(&state) {
                let (next_state, reward) = env.step(&state, &action, &mut rng);
                agent.update(&state, &action, &next_state, reward);
                state = next_state;
            }
        })
    });
}

fn bench_agents_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("agents_step");
    benchmark_agent_step(
        &mut group,
        "tabular_q_learning",
        CONFIG.build_tabular(Chain::default(), 0).unwrap(),
    );
    benchmark_agent_step(
        &mut group,
        "linear_q_indicator",
        CONFIG
            .build_linear(Chain::default(), IndicatorFeatures, 0)
            .unwrap(),
    );
    benchmark_agent_step(
        &mut group,
        "linear_q_chain_features",
        CONFIG
            .build_linear(Chain::default(), chain_features, 0)
            .unwrap(),
    );
}

criterion_group!(benches, bench_agents_step);
criterion_main!(benches);
