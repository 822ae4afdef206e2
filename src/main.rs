use docopt::Docopt;
use error_chain::bail;
use kruskal_mazes::{
    cells::CompassPrimary,
    logging::init_logging,
    manual::MoveOutcome,
    pathing::StepStatus,
    units::{Height, Seed, Width},
    MazeSession, SolveMode, SolveState,
};
use serde::Deserialize;
use tracing::{info, warn};

const USAGE: &str = "Kruskal Mazes

Usage:
    kruskal_mazes_driver -h | --help
    kruskal_mazes_driver [(--size=<n>|[--width=<w> --height=<h>])] [--seed=<s>] [--solve=<mode>] [--wavefront] [--max-steps=<n>] [--moves=<dirs>] [--quiet]

Options:
    -h --help          Show this screen.
    --size=<n>         The grid size is n * n.
    --width=<w>        The grid width in a w*h grid [default: 20].
    --height=<h>       The grid height in a w*h grid [default: 20].
    --seed=<s>         Seed for the maze generator. Random when not given.
    --solve=<mode>     How to solve the maze: manual, dfs or bfs (or 1, 2, 3) [default: bfs].
    --wavefront        Breadth-first only: expand a whole frontier layer per step.
    --max-steps=<n>    Stop an automatic solve after n steps.
    --moves=<dirs>     Manual mode only: player moves as a string of n, s, e and w characters.
    --quiet            Only print the summary, not the maze.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_size: Option<usize>,
    flag_width: usize,
    flag_height: usize,
    flag_seed: Option<u64>,
    flag_solve: String,
    flag_wavefront: bool,
    flag_max_steps: Option<usize>,
    flag_moves: String,
    flag_quiet: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {
        links {
            Maze(::kruskal_mazes::errors::Error, ::kruskal_mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    init_logging(args.flag_quiet)?;

    let (width, height) = if let Some(square_grid_size) = args.flag_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_width, args.flag_height)
    };
    let seed = args.flag_seed.unwrap_or_else(rand::random);
    let mode = args.flag_solve.parse::<SolveMode>()?;

    let mut session = MazeSession::<u32>::generate(Width(width), Height(height), Seed(seed))
        .chain_err(|| format!("Failed to generate a {}x{} maze", width, height))?;
    info!(width, height, seed, "maze generated");

    session.reset_solve(mode, args.flag_wavefront)?;
    if args.flag_wavefront && !session.is_wavefront() {
        warn!(?mode, "--wavefront only applies to breadth-first solving, ignored");
    }

    let steps = match mode {
        SolveMode::Manual => play_moves(&mut session, &args.flag_moves)?,
        _ => run_solver(&mut session, args.flag_max_steps)?,
    };

    if !args.flag_quiet {
        println!("{}", session.graph());
    }

    match (session.state(), session.solution()) {
        (SolveState::Solved, Some(path)) => {
            println!("seed {}: solved after {} steps, path length {}", seed, steps, path.len())
        }
        _ => println!("seed {}: not solved after {} steps", seed, steps),
    }

    Ok(())
}

fn run_solver(session: &mut MazeSession<u32>, max_steps: Option<usize>) -> Result<usize> {
    let limit = max_steps.unwrap_or(usize::MAX);
    let mut steps = 0;
    while steps < limit {
        steps += 1;
        if session.step()? == StepStatus::Solved {
            break;
        }
    }
    Ok(steps)
}

fn play_moves(session: &mut MazeSession<u32>, moves: &str) -> Result<usize> {
    let mut steps = 0;
    for c in moves.chars().filter(|c| !c.is_whitespace()) {
        let direction = match c.to_ascii_lowercase() {
            'n' => CompassPrimary::North,
            's' => CompassPrimary::South,
            'e' => CompassPrimary::East,
            'w' => CompassPrimary::West,
            other => bail!("Unknown move '{}', expected one of n, s, e, w", other),
        };
        steps += 1;
        match session.move_player(direction)? {
            MoveOutcome::Blocked => info!(?direction, "move blocked"),
            MoveOutcome::ReachedGoal => break,
            _ => {}
        }
    }
    Ok(steps)
}
