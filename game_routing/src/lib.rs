use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// A trait for graphs that can be searched.
///
/// `Node`: The type of node identifiers (e.g., CityId).
/// `Ctx`: A context object passed to passability checks (e.g., the set of
/// owners a route is allowed to cross).
pub trait Graph<Node, Ctx> {
    /// Return the neighbors of a node, in adjacency-list order.
    ///
    /// Order matters: the breadth-first search visits neighbors in exactly
    /// this order, which makes tie-breaking between equal-length routes
    /// deterministic.
    fn neighbors(&self, node: Node, context: &Ctx) -> Vec<Node>;

    /// Whether a node may appear on a route (other than as its start).
    /// Defaults to fully passable.
    fn passable(&self, node: Node, context: &Ctx) -> bool {
        let _ = (node, context);
        true
    }
}

/// A generic unweighted breadth-first searcher.
pub struct Bfs;

impl Bfs {
    /// Shortest hop count from `start` to `goal`, or `None` if unreachable.
    ///
    /// The start node is exempt from the passability check (the traveller is
    /// already there); every other node on the route, including the goal,
    /// must be passable. Because all edges are unweighted, the first time a
    /// node is dequeued its recorded depth is its true shortest distance.
    pub fn distance<Node, Ctx, G>(graph: &G, start: Node, goal: Node, context: &Ctx) -> Option<u32>
    where
        Node: Copy + Eq + Hash,
        G: Graph<Node, Ctx>,
    {
        if start == goal {
            return Some(0);
        }

        let mut visited: HashSet<Node> = HashSet::new();
        let mut queue: VecDeque<(Node, u32)> = VecDeque::new();

        visited.insert(start);
        queue.push_back((start, 0));

        while let Some((current, depth)) = queue.pop_front() {
            for neighbor in graph.neighbors(current, context) {
                if visited.contains(&neighbor) {
                    continue;
                }
                if !graph.passable(neighbor, context) {
                    continue;
                }
                if neighbor == goal {
                    return Some(depth + 1);
                }
                visited.insert(neighbor);
                queue.push_back((neighbor, depth + 1));
            }
        }

        None
    }
}
