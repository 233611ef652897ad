use std::{
    fs::File,
    io::{BufReader, BufWriter},
    thread,
    time::Duration,
};

use docopt::Docopt;
use itertools::Itertools;
use log::{info, LevelFilter};
use serde_derive::Deserialize;

use maze_steppers::{
    cells::GridCoordinate,
    generators::GeneratorKind,
    pathing::{MazeSolver, SolverKind},
    session::{MazeSession, RunPhase},
    settings::Settings,
    units::{CellSize, ColumnsCount, Height, RowsCount, Width},
    wall_matrix::WallMatrix,
};

const USAGE: &str = "Maze steppers

Generates a maze one step per tick, then solves it one step per tick, printing text frames.

Usage:
    maze_driver -h | --help
    maze_driver [--cols=<n> --rows=<n>] [options]
    maze_driver --load=<path> [options]

Options:
    -h --help              Show this screen.
    --cols=<n>             Number of maze columns, overrides the canvas width.
    --rows=<n>             Number of maze rows, overrides the canvas height.
    --width=<px>           Canvas width in pixels [default: 800].
    --height=<px>          Canvas height in pixels [default: 800].
    --cell-size=<px>       Side of one cell in pixels [default: 20].
    --generator=<name>     dfs (recursive-backtracker), kruskal, prim or wilson [default: dfs].
    --solver=<name>        dfs, bfs, dijkstra, a_star or random [default: a_star].
    --seed=<n>             Seed for repeatable mazes. Random if not given.
    --start-x=<x>          Column of the start cell [default: 0].
    --start-y=<y>          Row of the start cell [default: 0].
    --fps=<n>              Ticks per second, 0 runs flat out [default: 60].
    --frames=<n>           Print a frame every n ticks, 0 prints only the finished maze [default: 0].
    --preload              Generate the whole maze before the first frame.
    --no-solve             Stop once the maze is generated.
    --save=<path>          Save the generated maze walls as JSON.
    --load=<path>          Solve a maze saved with --save instead of generating one.
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    flag_cols: Option<usize>,
    flag_rows: Option<usize>,
    flag_width: usize,
    flag_height: usize,
    flag_cell_size: usize,
    flag_generator: String,
    flag_solver: String,
    flag_seed: Option<u64>,
    flag_start_x: u32,
    flag_start_y: u32,
    flag_fps: u32,
    flag_frames: usize,
    flag_preload: bool,
    flag_no_solve: bool,
    flag_save: String,
    flag_load: String,
}

mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types.
    // Library errors are linked so `?` works on them directly.
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_steppers::errors::Error, ::maze_steppers::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(ref e) = run() {
        eprintln!("error: {}", e.iter().join("\n  caused by: "));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: DriverArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    let settings = settings_from_args(&args)?;

    let mut session = if args.flag_load.is_empty() {
        MazeSession::new(settings.clone())?
    } else {
        let matrix = load_wall_matrix(&args.flag_load)?;
        info!("loaded a {}x{} maze from {}", matrix.cols, matrix.rows, args.flag_load);
        MazeSession::from_wall_matrix(settings.clone(), &matrix)?
    };
    let tick_delay = settings.tick_delay();

    if args.flag_load.is_empty() {
        session.start_generation(settings.generator)?;
        if args.flag_preload {
            let ticks = session.run_to_completion()?;
            info!("preloaded {} maze in {} ticks", settings.generator, ticks);
        } else {
            animate(&mut session, args.flag_frames, tick_delay)?;
        }

        if !args.flag_save.is_empty() {
            save_wall_matrix(&session.export(), &args.flag_save)?;
            info!("saved maze to {}", args.flag_save);
        }
    }

    if !args.flag_no_solve {
        session.start_solving(settings.solver)?;
        animate(&mut session, args.flag_frames, tick_delay)?;
    }

    println!("{}", session.render());
    print_summary(&session);
    Ok(())
}

fn settings_from_args(args: &DriverArgs) -> Result<Settings> {
    let generator = args.flag_generator.parse::<GeneratorKind>()?;
    let solver = args.flag_solver.parse::<SolverKind>()?;

    let settings = Settings {
        width: Width(args.flag_width),
        height: Height(args.flag_height),
        cell_size: CellSize(args.flag_cell_size),
        frames_per_second: args.flag_fps,
        generator,
        solver,
        seed: args.flag_seed,
        start: GridCoordinate::new(args.flag_start_x, args.flag_start_y),
    };

    // Explicit cell counts win over the canvas, keeping whichever one was not given.
    let (default_columns, default_rows) = settings.grid_dimensions()?;
    let columns = args.flag_cols.map_or(default_columns, ColumnsCount);
    let rows = args.flag_rows.map_or(default_rows, RowsCount);
    Ok(settings.with_grid_dimensions(columns, rows))
}

/// Tick the session until the running algorithm stops, printing every `frame_every` ticks and
/// pausing `tick_delay` after each tick.
fn animate(session: &mut MazeSession, frame_every: usize, tick_delay: Option<Duration>) -> Result<()> {
    while let RunPhase::Generating | RunPhase::Solving = session.tick()? {
        if frame_every > 0 && session.ticks() % frame_every == 0 {
            println!("tick {}\n{}", session.ticks(), session.render());
        }
        if let Some(delay) = tick_delay {
            thread::sleep(delay);
        }
    }
    Ok(())
}

fn print_summary(session: &MazeSession) {
    let (cols, rows) = session.grid().shape();
    println!("{}x{} maze, {} passages, {} ticks", cols, rows, session.grid().links_count(), session.ticks());
    match session.solver() {
        Some(solver) if solver.is_solved() => {
            println!("{} found a path of {} cells after exploring {}",
                     solver.kind(),
                     solver.path().len(),
                     solver.visited().len())
        }
        Some(solver) => println!("{} found no path to {}", solver.kind(), solver.goal()),
        None => println!("maze generated with {}", session.settings().generator),
    }
}

fn load_wall_matrix(file_path: &str) -> Result<WallMatrix> {
    let file = File::open(file_path).chain_err(|| format!("Failed to open maze file {}", file_path))?;
    let matrix = WallMatrix::read_from(BufReader::new(file))
        .chain_err(|| format!("Failed to read maze from {}", file_path))?;
    Ok(matrix)
}

fn save_wall_matrix(matrix: &WallMatrix, file_path: &str) -> Result<()> {
    let file = File::create(file_path).chain_err(|| format!("Failed to create maze file {}", file_path))?;
    matrix.write_to(BufWriter::new(file))
        .chain_err(|| format!("Failed to write maze to {}", file_path))?;
    Ok(())
}
