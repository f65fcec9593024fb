use criterion::{black_box, criterion_group, criterion_main, Criterion};
use piecoach::search::Searcher;
use piecoach::{Difficulty, Engine, Position};

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    let mut start = Position::startpos();
    group.bench_function("medium_startpos", |ben| {
        ben.iter(|| {
            let r = Searcher::default().search_depth(black_box(&mut start), 3).unwrap();
            black_box(r.nodes)
        })
    });

    let mut italian = Position::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3").unwrap();
    let mut engine = Engine::new(Difficulty::Medium);
    group.bench_function("medium_engine_italian", |ben| {
        ben.iter(|| black_box(engine.best_move(black_box(&mut italian))))
    });
    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
