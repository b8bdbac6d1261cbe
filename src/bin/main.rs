use anstream::println;
use clap::Parser;
use hrsw::Stopwatch;
use human_duration::human_duration;
use owo_colors::OwoColorize;
use thousands::Separable;

use mazesearch::algorithms::Algorithm;
use mazesearch::algorithms::run_search;
use mazesearch::generators::maze_2d::DEFAULT_LOOP_PROBABILITY;
use mazesearch::generators::maze_2d::Maze2DGenerator;
use mazesearch::logging;
use mazesearch::problems::maze_2d::DEFAULT_COLS;
use mazesearch::problems::maze_2d::DEFAULT_ROWS;
use mazesearch::problems::maze_2d::Maze2DFrame;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Generates a maze and searches it from start to goal.
#[derive(Parser, Debug)]
#[clap(long_version = mazesearch::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, env = "MAZE_ROWS", default_value_t = DEFAULT_ROWS)]
    pub rows: usize,
    #[arg(long, env = "MAZE_COLS", default_value_t = DEFAULT_COLS)]
    pub cols: usize,
    /// Chance of knocking down each remaining inner wall after carving.
    #[arg(long, default_value_t = DEFAULT_LOOP_PROBABILITY)]
    pub loop_probability: f64,
    /// Seed for a reproducible maze. Random when missing.
    #[arg(long, env = "MAZE_SEED")]
    pub seed: Option<u64>,

    /// Algorithms to run, in order. Defaults to all of them.
    #[arg(short, long = "algorithm", value_enum)]
    pub algorithms: Vec<Algorithm>,

    /// Print the maze after every step.
    #[arg(long)]
    pub frames: bool,
    /// Print memory stats of every search.
    #[arg(long)]
    pub stats: bool,
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.color.write_global();
    logging::init(logging::level_for_verbosity(args.verbose))?;

    let generator = Maze2DGenerator::new()
        .with_dimensions(args.rows, args.cols)
        .with_loop_probability(args.loop_probability);
    let instance = match args.seed {
        Some(seed) => generator.generate_seeded(seed)?,
        None => generator.generate(&mut rand::rng())?,
    };
    println!(
        "{} {}x{} from {} to {}",
        "Maze".bold(),
        args.rows,
        args.cols,
        instance.start.yellow(),
        instance.goal.yellow()
    );
    println!("{instance}");

    let algorithms = if args.algorithms.is_empty() {
        Algorithm::ALL.to_vec()
    } else {
        args.algorithms.clone()
    };

    for algorithm in algorithms {
        let mut search = run_search(algorithm, &instance.space, instance.start, instance.goal)?;

        let mut steps = 0usize;
        let mut path = None;
        let mut stopwatch = Stopwatch::new_started();
        while let Some(snapshot) = search.step() {
            steps += 1;
            if args.frames {
                stopwatch.stop();
                println!("{} step {steps}", algorithm.cyan());
                println!(
                    "{}",
                    Maze2DFrame::new(&instance.space)
                        .with_endpoints(instance.start, instance.goal)
                        .with_explored(snapshot.explored)
                        .with_path(snapshot.path.as_ref())
                );
                stopwatch.start();
            }
            if snapshot.path.is_some() {
                path = snapshot.path;
            }
        }
        stopwatch.stop();

        println!(
            "{}",
            Maze2DFrame::new(&instance.space)
                .with_endpoints(instance.start, instance.goal)
                .with_explored(search.explored())
                .with_path(path.as_ref())
        );
        let explored = search.explored().len().separate_with_commas();
        let elapsed = human_duration(&stopwatch.elapsed());
        match &path {
            Some(path) => println!(
                "{}: {path} in {steps} steps, {explored} explored ({elapsed})",
                algorithm.green().bold()
            ),
            None => println!(
                "{}: no path after {steps} steps, {explored} explored ({elapsed})",
                algorithm.red().bold()
            ),
        }
        if args.stats {
            search.write_memory_stats(&mut anstream::stdout())?;
        }
    }

    Ok(())
}
