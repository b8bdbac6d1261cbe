use std::collections::VecDeque;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use rustc_hash::FxHashSet;

use mazesearch::generators::maze_2d::GeneratorError;
use mazesearch::generators::maze_2d::Maze2DGenerator;
use mazesearch::problems::maze_2d::Maze2DSpace;
use mazesearch::problems::maze_2d::Maze2DState;
use mazesearch::space::Space;

fn reachable(space: &Maze2DSpace, from: Maze2DState) -> FxHashSet<Maze2DState> {
    let mut seen = FxHashSet::from_iter([from]);
    let mut queue = VecDeque::from([from]);
    while let Some(s) = queue.pop_front() {
        for n in space.neighbours(&s) {
            if seen.insert(n) {
                queue.push_back(n);
            }
        }
    }
    seen
}

#[test]
fn generated_mazes_are_connected_and_symmetric() {
    for (rows, cols) in [(1, 2), (2, 1), (5, 5), (7, 13), (20, 20)] {
        for seed in 0..10u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let instance = Maze2DGenerator::new()
                .with_dimensions(rows, cols)
                .generate(&mut rng)
                .unwrap();

            assert!(instance.space.walls_are_symmetric());
            assert_eq!(
                reachable(&instance.space, instance.start).len(),
                rows * cols,
                "{rows}x{cols} seed {seed}"
            );
            assert_ne!(instance.start, instance.goal);
            assert!(instance.space.valid(&instance.start));
            assert!(instance.space.valid(&instance.goal));
        }
    }
}

#[test]
fn without_loops_the_maze_is_a_tree() {
    for seed in 0..10u64 {
        let instance = Maze2DGenerator::new()
            .with_dimensions(9, 11)
            .with_loop_probability(0.0)
            .generate_seeded(seed)
            .unwrap();

        assert_eq!(instance.space.passages(), 9 * 11 - 1);
        assert_eq!(reachable(&instance.space, instance.goal).len(), 9 * 11);
    }
}

#[test]
fn loops_only_add_passages() {
    let tree = Maze2DGenerator::new()
        .with_dimensions(15, 15)
        .with_loop_probability(0.0)
        .generate_seeded(7)
        .unwrap();
    let default = Maze2DGenerator::new()
        .with_dimensions(15, 15)
        .generate_seeded(7)
        .unwrap();

    // Twice as many inner walls as cells, minus the borders.
    let inner_walls = 2 * 15 * 15 - 2 * 15;
    assert!(default.space.passages() >= tree.space.passages());
    assert!(default.space.passages() <= inner_walls);
}

#[test]
fn same_seed_same_maze() {
    let generator = Maze2DGenerator::new().with_dimensions(12, 8);
    assert_eq!(
        generator.generate_seeded(1234).unwrap(),
        generator.generate_seeded(1234).unwrap()
    );
}

#[test]
fn rejects_degenerate_sizes() {
    assert!(matches!(
        Maze2DGenerator::new().with_dimensions(0, 4).generate_seeded(0),
        Err(GeneratorError::InvalidSize { .. })
    ));
    assert!(matches!(
        Maze2DGenerator::new().with_dimensions(1, 1).generate_seeded(0),
        Err(GeneratorError::TooFewCells { .. })
    ));
}
