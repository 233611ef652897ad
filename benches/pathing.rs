use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use maze_steppers::{
    cells::GridCoordinate,
    generators::{new_generator, GeneratorKind},
    grid::Grid,
    pathing::{new_solver, SolverKind},
    stepper::run_to_completion,
    units::{ColumnsCount, RowsCount},
};

fn large_maze() -> Grid {
    let mut g = Grid::new(ColumnsCount(200), RowsCount(200)).unwrap();
    let rng = XorShiftRng::seed_from_u64(11);
    let mut generator =
        new_generator(GeneratorKind::RecursiveBacktracker, &mut g, GridCoordinate::new(0, 0), rng).unwrap();
    let _ = run_to_completion(&mut *generator, &mut g).unwrap();
    g
}

fn solve(kind: SolverKind, grid: &mut Grid) -> usize {
    let rng = XorShiftRng::seed_from_u64(3);
    let mut solver = new_solver(kind, grid, GridCoordinate::new(0, 0), rng).unwrap();
    let _ = run_to_completion(&mut *solver, grid).unwrap();
    solver.path().len()
}

fn bench_depth_first(c: &mut Criterion) {
    c.bench_function("depth_first_200", |b| {
        let mut g = large_maze();
        b.iter(|| solve(SolverKind::DepthFirst, &mut g))
    });
}

fn bench_breadth_first(c: &mut Criterion) {
    c.bench_function("breadth_first_200", |b| {
        let mut g = large_maze();
        b.iter(|| solve(SolverKind::BreadthFirst, &mut g))
    });
}

fn bench_dijkstra(c: &mut Criterion) {
    c.bench_function("dijkstra_200", |b| {
        let mut g = large_maze();
        b.iter(|| solve(SolverKind::Dijkstra, &mut g))
    });
}

fn bench_a_star(c: &mut Criterion) {
    c.bench_function("a_star_200", |b| {
        let mut g = large_maze();
        b.iter(|| solve(SolverKind::AStar, &mut g))
    });
}

criterion_group!(benches,
    bench_depth_first,
    bench_breadth_first,
    bench_dijkstra,
    bench_a_star
);
criterion_main!(benches);
