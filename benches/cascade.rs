use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jewel_cascade::core::{Cell, Color, DeterministicRng, Palette};
use jewel_cascade::game::{find_match, find_productive_swap, generate, resolve, try_swap};

fn bench_generate(c: &mut Criterion) {
    let palette = Palette::standard();
    let mut rng = DeterministicRng::new(12345);

    c.bench_function("generate_9x9", |b| {
        b.iter(|| generate(black_box(9), &palette, &mut rng))
    });
}

fn bench_scan_stable(c: &mut Criterion) {
    let board = generate(9, &Palette::standard(), &mut DeterministicRng::new(12345)).unwrap();

    c.bench_function("find_match_stable_9x9", |b| {
        b.iter(|| find_match(black_box(&board)))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let palette = Palette::standard();
    let mut board = generate(9, &palette, &mut DeterministicRng::new(12345)).unwrap();
    // Bottom row run forces every column above it to fall
    for col in 0..5 {
        board.set(Cell::new(8, col), Color::Red);
    }

    c.bench_function("resolve_bottom_run", |b| {
        let mut rng = DeterministicRng::new(99);
        b.iter(|| resolve(black_box(board.clone()), &palette, &mut rng))
    });
}

fn bench_swap_and_resolve(c: &mut Criterion) {
    let palette = Palette::standard();
    let board = generate(9, &palette, &mut DeterministicRng::new(777)).unwrap();
    let Some((a, b)) = find_productive_swap(&board) else {
        return;
    };

    c.bench_function("swap_and_resolve", |bench| {
        let mut rng = DeterministicRng::new(5);
        bench.iter(|| {
            let swapped = try_swap(&board, a, b).unwrap();
            resolve(swapped, &palette, &mut rng)
        })
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_scan_stable,
    bench_resolve,
    bench_swap_and_resolve
);
criterion_main!(benches);
