//! One maze and one solve at a time, driven from outside.
//!
//! This is the surface a renderer or event loop talks to: generate a maze, pick how to solve it,
//! then call `step` (or `move_player` in manual mode) once per tick or key press and redraw from
//! `graph()` in between.

use std::fmt;
use std::str::FromStr;

use petgraph::graph::NodeIndex;
use tracing::{debug, warn};

use crate::cells::CompassPrimary;
use crate::errors::*;
use crate::generators;
use crate::grid::{IndexType, MazeGraph};
use crate::manual::{ManualWalk, MoveOutcome};
use crate::pathing::{Search, SearchOrder, StepStatus};
use crate::units::{Height, Seed, Width};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SolveMode {
    /// The caller moves the player with `move_player`.
    Manual,
    DepthFirst,
    BreadthFirst,
}

impl FromStr for SolveMode {
    type Err = Error;

    /// Accepts the mode names, short or long, and the numbers 1 to 3.
    fn from_str(s: &str) -> Result<SolveMode> {
        match s.trim().to_lowercase().as_str() {
            "manual" | "1" => Ok(SolveMode::Manual),
            "dfs" | "depth-first" | "2" => Ok(SolveMode::DepthFirst),
            "bfs" | "breadth-first" | "3" => Ok(SolveMode::BreadthFirst),
            _ => Err(ErrorKind::UnknownSolveMode(s.to_string()).into()),
        }
    }
}

impl SolveMode {
    fn search_order(self) -> Option<SearchOrder> {
        match self {
            SolveMode::Manual => None,
            SolveMode::DepthFirst => Some(SearchOrder::DepthFirst),
            SolveMode::BreadthFirst => Some(SearchOrder::BreadthFirst),
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SolveState {
    Idle,
    Running,
    Solved,
}

#[derive(Debug)]
enum Solver<GridIndexType: IndexType> {
    Manual(ManualWalk<GridIndexType>),
    Automatic(Search<GridIndexType>),
}

pub struct MazeSession<GridIndexType: IndexType = u32> {
    graph: MazeGraph<GridIndexType>,
    mode: SolveMode,
    wavefront: bool,
    solver: Option<Solver<GridIndexType>>,
}

impl<GridIndexType: IndexType> fmt::Debug for MazeSession<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MazeSession :: {:?}, mode: {:?}, wavefront: {}, state: {:?}",
               self.graph, self.mode, self.wavefront, self.state())
    }
}

impl<GridIndexType: IndexType> MazeSession<GridIndexType> {
    /// Generate a new maze. Nothing is being solved yet, call `reset_solve` to start.
    pub fn generate(width: Width, height: Height, seed: Seed) -> Result<MazeSession<GridIndexType>> {
        let graph = generators::generate(width, height, seed)?;
        Ok(MazeSession {
            graph,
            mode: SolveMode::Manual,
            wavefront: false,
            solver: None,
        })
    }

    /// Read only view of the maze and the status of every cell.
    #[inline]
    pub fn graph(&self) -> &MazeGraph<GridIndexType> {
        &self.graph
    }

    #[inline]
    pub fn mode(&self) -> SolveMode {
        self.mode
    }

    #[inline]
    pub fn is_wavefront(&self) -> bool {
        self.wavefront
    }

    pub fn state(&self) -> SolveState {
        match self.solver {
            None => SolveState::Idle,
            Some(Solver::Manual(ref walk)) if walk.is_finished() => SolveState::Solved,
            Some(Solver::Automatic(ref search)) if search.is_solved() => SolveState::Solved,
            Some(_) => SolveState::Running,
        }
    }

    /// Start solving from scratch: every cell goes back to unvisited, then the solve starts at
    /// the top left cell with the bottom right cell as the goal.
    ///
    /// `wavefront` only has an effect in breadth-first mode.
    pub fn reset_solve(&mut self, mode: SolveMode, wavefront: bool) -> Result<()> {
        let wavefront = wavefront && mode == SolveMode::BreadthFirst;
        self.graph.reset_statuses();

        let built = match mode.search_order() {
            Some(order) => Search::new(&mut self.graph, order, wavefront).map(Solver::Automatic),
            None => ManualWalk::new(&mut self.graph).map(Solver::Manual),
        };
        let solver = match built {
            Ok(solver) => solver,
            Err(e) => {
                // Back to a clean idle board, the old solver does not match it any more.
                self.graph.reset_statuses();
                self.solver = None;
                return Err(e);
            }
        };

        self.mode = mode;
        self.wavefront = wavefront;
        self.solver = Some(solver);
        debug!(?mode, wavefront, "solve reset");
        Ok(())
    }

    /// Advance an automated solve by one step.
    pub fn step(&mut self) -> Result<StepStatus> {
        match self.solver {
            Some(Solver::Automatic(ref mut search)) => search.step(&mut self.graph),
            Some(Solver::Manual(_)) => {
                warn!("step() called in manual mode");
                Err(ErrorKind::ManualModeStep.into())
            }
            None => Err(ErrorKind::SolveNotStarted.into()),
        }
    }

    /// Move the player one cell in manual mode.
    pub fn move_player(&mut self, direction: CompassPrimary) -> Result<MoveOutcome> {
        match self.solver {
            Some(Solver::Manual(ref mut walk)) => walk.try_move(&mut self.graph, direction),
            Some(Solver::Automatic(_)) => Err(ErrorKind::NotManualMode.into()),
            None => Err(ErrorKind::SolveNotStarted.into()),
        }
    }

    /// Where the player stands, in manual mode.
    pub fn player(&self) -> Option<NodeIndex<GridIndexType>> {
        match self.solver {
            Some(Solver::Manual(ref walk)) => Some(walk.current()),
            _ => None,
        }
    }

    /// The route from start to goal once solved.
    pub fn solution(&self) -> Option<Vec<NodeIndex<GridIndexType>>> {
        match self.solver {
            Some(Solver::Manual(ref walk)) => walk.solution(),
            Some(Solver::Automatic(ref search)) => search.solution().map(|path| path.to_vec()),
            None => None,
        }
    }

    /// Is there a passage between the two cells?
    #[inline]
    pub fn is_connected(&self, a: NodeIndex<GridIndexType>, b: NodeIndex<GridIndexType>) -> bool {
        self.graph.is_connected(a, b)
    }

    /// Flip between single node and whole layer steps. Only possible in breadth-first mode,
    /// otherwise nothing changes. Progress so far is kept. Returns the new setting.
    pub fn toggle_wavefront(&mut self) -> bool {
        if self.mode != SolveMode::BreadthFirst {
            return self.wavefront;
        }

        self.wavefront = !self.wavefront;
        if let Some(Solver::Automatic(ref mut search)) = self.solver {
            let _ = search.set_wavefront(self.wavefront);
        }
        self.wavefront
    }

    /// Replace the maze with a new one of the same size. A solve in progress restarts on the new
    /// maze with the same mode.
    pub fn regenerate(&mut self, seed: Seed) -> Result<()> {
        self.graph = generators::generate(self.graph.width(), self.graph.height(), seed)?;
        if self.solver.is_some() {
            let (mode, wavefront) = (self.mode, self.wavefront);
            self.reset_solve(mode, wavefront)?;
        }
        Ok(())
    }
}
