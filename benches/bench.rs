use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sudoku_solver::board::Board;
use sudoku_solver::solver::{EXAMPLE, Solver};

/// A valid puzzle constructed to punish row-major, digit-ascending brute
/// force: the top rows stay empty while the low digits are pinned far down
/// the grid, so the search commits early and backtracks massively.
const BACKTRACK_HEAVY: [[u8; 9]; 9] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 3, 0, 8, 5],
    [0, 0, 1, 0, 2, 0, 0, 0, 0],
    [0, 0, 0, 5, 0, 7, 0, 0, 0],
    [0, 0, 4, 0, 0, 0, 1, 0, 0],
    [0, 9, 0, 0, 0, 0, 0, 0, 0],
    [5, 0, 0, 0, 0, 0, 0, 7, 3],
    [0, 0, 2, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 0, 4, 0, 0, 0, 9],
];

fn solve(grid: [[u8; 9]; 9]) -> Board {
    let mut solver = Solver::from(grid);
    solver.solve().expect("benchmark puzzle is solvable");
    solver.into_board()
}

fn bench_wikipedia_example(c: &mut Criterion) {
    c.bench_function("solve_wikipedia_example", |b| {
        b.iter(|| solve(black_box(EXAMPLE)));
    });
}

fn bench_empty_grid(c: &mut Criterion) {
    c.bench_function("solve_empty_grid", |b| {
        b.iter(|| solve(black_box([[0; 9]; 9])));
    });
}

fn bench_backtrack_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("backtrack_heavy");
    group.sample_size(10);
    group.bench_function("solve_backtrack_heavy", |b| {
        b.iter(|| solve(black_box(BACKTRACK_HEAVY)));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_wikipedia_example,
    bench_empty_grid,
    bench_backtrack_heavy
);
criterion_main!(benches);
