// Create the Error, ErrorKind, ResultExt, and Result types
// Result is a typedef of std `Result` with the error type our own `Error`.
// Other modules `use crate::errors::*;` to get access to everything `error_chain!` creates.
use error_chain::*;

error_chain! {

    foreign_links {
        LoggingInit(::tracing_subscriber::util::TryInitError);
    }

    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}, width and height must be at least 1", width, height)
        }

        GridTooLarge(nodes: usize, edges: usize) {
            description("grid too large for the index type")
            display("{} cells with {} candidate edges do not fit the grid index type", nodes, edges)
        }

        UnknownSolveMode(mode: String) {
            description("unrecognised solve mode")
            display("unrecognised solve mode '{}', expected manual, dfs or bfs", mode)
        }

        EmptyCollection {
            description("cannot remove from an empty collection")
            display("cannot remove from an empty collection")
        }

        NodeNotInPartition(node: usize) {
            description("node has no entry in the partition")
            display("node {} has no entry in the partition", node)
        }

        InvalidEdge(edge: usize) {
            description("edge index is not in the maze graph")
            display("edge {} is not in the maze graph", edge)
        }

        DisconnectedGrid(accepted: usize, needed: usize) {
            description("candidate edges ran out before the spanning tree was complete")
            display("spanning tree has {} of {} edges and no candidates are left", accepted, needed)
        }

        StaleRepresentative(node: usize) {
            description("representative is no longer a partition root")
            display("node {} is no longer the root of its partition", node)
        }

        BrokenPredecessorChain(node: usize) {
            description("predecessor chain broken before reaching the start")
            display("no predecessor edge recorded for node {}", node)
        }

        EdgeNotIncident(edge: usize, node: usize) {
            description("edge does not touch the node")
            display("edge {} is not incident on node {}", edge, node)
        }

        InvalidNode(node: usize) {
            description("node index is not in the maze graph")
            display("node {} is not in the maze graph", node)
        }

        ManualModeStep {
            description("cannot step an automated search in manual mode")
            display("step() is only available in depth-first or breadth-first mode")
        }

        NotManualMode {
            description("player moves need manual mode")
            display("move_player() is only available in manual mode")
        }

        SolveNotStarted {
            description("no solve is running")
            display("no solve is running, call reset_solve first")
        }
    }
}
