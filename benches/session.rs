use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_uno::cards::{split_tokens, CardArena, Color};
use rust_uno::core::{GameRng, Ruleset, SessionConfig};
use rust_uno::rules::GameState;
use rust_uno::session::{Player, Session};

/// A seated table with `n_players`, started.
fn setup_table(seed: u64, n_players: usize, ruleset: Ruleset) -> Session {
    let mut session = Session::new(SessionConfig::new(ruleset).with_seed(seed));
    for i in 0..n_players {
        session.add_player(&format!("player{i}"));
    }
    session.start().unwrap();
    session
}

/// Play random legal moves until someone wins or `max_steps` is reached.
fn play_out(session: &mut Session, rng: &mut GameRng, max_steps: usize) -> usize {
    for step in 0..max_steps {
        if session.state() == GameState::Ended {
            return step;
        }
        let Some(name) = session.current_player().map(|p| p.name().to_string()) else {
            return step;
        };

        if session.state().is_color_pending() {
            let color = Color::ALL[rng.gen_range_usize(0..Color::ALL.len())];
            session.setcolor(&name, &color.letter().to_string()).unwrap();
            continue;
        }
        let playable = session.playable_cards(&name);
        if !playable.is_empty() {
            let code = playable[rng.gen_range_usize(0..playable.len())].card.shorthand();
            session.play(&name, &code, None).unwrap();
        } else if session.player(&name).is_some_and(Player::has_drawn)
            || session.state() == GameState::WaitingAnswerToDraw
        {
            session.skip(&name).unwrap();
        } else {
            session.pick(&name).unwrap();
        }
    }
    max_steps
}

/// Benchmark dealing a fresh table
fn bench_start(c: &mut Criterion) {
    let mut group = c.benchmark_group("start");
    for n_players in [2, 4, 10] {
        group.bench_with_input(
            BenchmarkId::from_parameter(n_players),
            &n_players,
            |b, &n| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    black_box(setup_table(seed, n, Ruleset::Classic))
                });
            },
        );
    }
    group.finish();
}

/// Benchmark whole random games under both rulesets
fn bench_full_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_game");
    for ruleset in [Ruleset::Classic, Ruleset::NoSkip] {
        group.bench_with_input(
            BenchmarkId::from_parameter(ruleset),
            &ruleset,
            |b, &ruleset| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    let mut session = setup_table(seed, 4, ruleset);
                    let mut rng = GameRng::new(seed);
                    black_box(play_out(&mut session, &mut rng, 2000))
                });
            },
        );
    }
    group.finish();
}

/// Benchmark the playable-card scan a bot runs every turn
fn bench_playable_cards(c: &mut Criterion) {
    let session = setup_table(7, 4, Ruleset::Classic);
    let name = session
        .current_player()
        .map(|p| p.name().to_string())
        .unwrap();

    c.bench_function("playable_cards", |b| {
        b.iter(|| black_box(session.playable_cards(black_box(&name))));
    });
}

/// Benchmark command parsing and deck construction
fn bench_parsing(c: &mut Criterion) {
    c.bench_function("split_tokens", |b| {
        b.iter(|| black_box(split_tokens(black_box("r5r5"))));
    });
    c.bench_function("populate_deck", |b| {
        b.iter(|| black_box(CardArena::populate(Ruleset::NoSkip)));
    });
}

criterion_group!(
    benches,
    bench_start,
    bench_full_game,
    bench_playable_cards,
    bench_parsing
);
criterion_main!(benches);
