//! Bounded enumeration of elementary cycles.
//!
//! Vertices are numbered by their position in the graph. Only vertices of a
//! strongly connected component that contains a cycle can lie on one, so
//! acyclic regions are discarded up front. A search rooted at `s` then
//! extends paths through higher-numbered vertices of the component of `s`
//! only: every elementary cycle is found exactly once, from its
//! lowest-numbered member, in the direction of its edges.
//!
//! Unbounded searches block a vertex once it failed to lead back to the root
//! and keep it blocked until a cycle through one of its successors is found
//! (Johnson, 1975), so work stays proportional to the cycles reported. A depth
//! bound disables blocking: a vertex that failed deep in a path may still
//! close a shorter one.

use std::collections::VecDeque;
use std::ops::ControlFlow;

use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;
use rustc_hash::FxHashSet;

use crate::graph::ModuleGraph;

impl ModuleGraph {
    /// Every elementary cycle of at most `max_depth` nodes (`None` is unbounded).
    ///
    /// Each cycle lists node ids such that consecutive ids, including the
    /// wrap-around from last to first, are joined by an edge. A self-import is
    /// a cycle of one. Output order is deterministic for a given graph.
    pub fn find_cycles(&self, max_depth: Option<usize>) -> Vec<Vec<String>> {
        let ids: Vec<&str> = self.ids().collect();
        let mut cycles = Vec::new();
        self.for_each_cycle(max_depth, |path| {
            cycles.push(path.iter().map(|&i| ids[i].to_string()).collect());
            ControlFlow::Continue(())
        });
        cycles
    }

    /// Whether [`find_cycles`](Self::find_cycles) would report anything.
    ///
    /// Linear in the size of the graph when unbounded. With a bound, each
    /// vertex on a cycle runs one breadth-first search for its shortest cycle.
    pub fn has_cycles(&self, max_depth: Option<usize>) -> bool {
        let adjacency = self.index_adjacency();
        let cyclic = cyclic_vertices(&adjacency);
        match max_depth {
            None => cyclic.contains(&true),
            Some(limit) => (0..adjacency.len())
                .filter(|&v| cyclic[v])
                .any(|v| shortest_cycle(&adjacency, &cyclic, v).is_some_and(|len| len <= limit)),
        }
    }

    fn index_adjacency(&self) -> Vec<Vec<usize>> {
        self.nodes()
            .map(|node| {
                node.adjacent_to
                    .iter()
                    .filter_map(|to| self.index_of(to))
                    .collect()
            })
            .collect()
    }

    fn for_each_cycle<F>(&self, max_depth: Option<usize>, mut visit: F)
    where
        F: FnMut(&[usize]) -> ControlFlow<()>,
    {
        let adjacency = self.index_adjacency();
        let reverse = reverse_adjacency(&adjacency);
        let cyclic = cyclic_vertices(&adjacency);
        let limit = max_depth.unwrap_or(usize::MAX);
        let bounded = max_depth.is_some();

        let mut blocked = vec![false; adjacency.len()];
        let mut blocked_by: Vec<FxHashSet<usize>> = vec![FxHashSet::default(); adjacency.len()];

        for start in (0..adjacency.len()).filter(|&v| cyclic[v]) {
            let component = component_of(&adjacency, &reverse, &cyclic, start);
            blocked.fill(false);
            blocked_by.iter_mut().for_each(|set| set.clear());

            let mut path = vec![start];
            let mut frames = vec![Frame::new(start)];
            blocked[start] = true;

            while let Some(frame) = frames.last_mut() {
                let vertex = frame.vertex;

                if let Some(&next) = adjacency[vertex].get(frame.cursor) {
                    frame.cursor += 1;
                    if next == start {
                        if path.len() <= limit {
                            frame.closed = true;
                            if visit(&path).is_break() {
                                return;
                            }
                        }
                    } else if component[next] && !blocked[next] && path.len() < limit {
                        blocked[next] = true;
                        path.push(next);
                        frames.push(Frame::new(next));
                    }
                    continue;
                }

                let closed = frame.closed;
                frames.pop();
                path.pop();

                if closed || bounded {
                    unblock(vertex, &mut blocked, &mut blocked_by);
                } else {
                    for &next in &adjacency[vertex] {
                        if component[next] {
                            blocked_by[next].insert(vertex);
                        }
                    }
                }
                if let Some(parent) = frames.last_mut() {
                    parent.closed |= closed;
                }
            }
        }
    }
}

/// One vertex of the current search path.
struct Frame {
    vertex: usize,
    /// Next edge to try out of `vertex`.
    cursor: usize,
    /// Whether some path through `vertex` led back to the root.
    closed: bool,
}

impl Frame {
    fn new(vertex: usize) -> Self {
        Self {
            vertex,
            cursor: 0,
            closed: false,
        }
    }
}

fn unblock(vertex: usize, blocked: &mut [bool], blocked_by: &mut [FxHashSet<usize>]) {
    let mut pending = vec![vertex];
    while let Some(v) = pending.pop() {
        if !blocked[v] {
            continue;
        }
        blocked[v] = false;
        pending.extend(blocked_by[v].drain());
    }
}

/// Vertices lying on at least one cycle: members of a strongly connected
/// component with more than one vertex, or with a self-edge.
fn cyclic_vertices(adjacency: &[Vec<usize>]) -> Vec<bool> {
    let edge_count = adjacency.iter().map(Vec::len).sum();
    let mut graph = DiGraph::<(), ()>::with_capacity(adjacency.len(), edge_count);
    let nodes: Vec<_> = adjacency.iter().map(|_| graph.add_node(())).collect();
    for (from, targets) in adjacency.iter().enumerate() {
        for &to in targets {
            graph.add_edge(nodes[from], nodes[to], ());
        }
    }

    let mut cyclic = vec![false; adjacency.len()];
    for component in tarjan_scc(&graph) {
        let looped = match component.as_slice() {
            [single] => adjacency[single.index()].contains(&single.index()),
            _ => true,
        };
        if looped {
            for node in component {
                cyclic[node.index()] = true;
            }
        }
    }
    cyclic
}

fn reverse_adjacency(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut reverse = vec![Vec::new(); adjacency.len()];
    for (from, targets) in adjacency.iter().enumerate() {
        for &to in targets {
            reverse[to].push(from);
        }
    }
    reverse
}

/// Cyclic vertices numbered `start` or above that reach `start` and are
/// reachable from it without leaving that range.
fn component_of(
    adjacency: &[Vec<usize>],
    reverse: &[Vec<usize>],
    cyclic: &[bool],
    start: usize,
) -> Vec<bool> {
    let allowed = |v: usize| v >= start && cyclic[v];
    let forward = reachable(adjacency, start, allowed);
    let backward = reachable(reverse, start, allowed);
    forward
        .iter()
        .zip(&backward)
        .map(|(&f, &b)| f && b)
        .collect()
}

fn reachable(edges: &[Vec<usize>], start: usize, allowed: impl Fn(usize) -> bool) -> Vec<bool> {
    let mut seen = vec![false; edges.len()];
    seen[start] = true;
    let mut stack = vec![start];
    while let Some(v) = stack.pop() {
        for &next in &edges[v] {
            if allowed(next) && !seen[next] {
                seen[next] = true;
                stack.push(next);
            }
        }
    }
    seen
}

/// Number of vertices on the shortest cycle through `start`, if any.
fn shortest_cycle(adjacency: &[Vec<usize>], cyclic: &[bool], start: usize) -> Option<usize> {
    let mut distance = vec![usize::MAX; adjacency.len()];
    distance[start] = 0;
    let mut queue = VecDeque::from([start]);

    while let Some(v) = queue.pop_front() {
        for &next in &adjacency[v] {
            if next == start {
                return Some(distance[v] + 1);
            }
            if cyclic[next] && distance[next] == usize::MAX {
                distance[next] = distance[v] + 1;
                queue.push_back(next);
            }
        }
    }
    None
}
