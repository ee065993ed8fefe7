//! Sugiyama layered graph layout.
//!
//! Phases:
//!   1. Cycle removal (greedy-FAS)
//!   2. Rank assignment (longest path)
//!   3. Dummy node insertion
//!   4. Crossing minimisation (barycenter)
//!   5. Coordinate assignment in rank space
//!   6. Direction mapping and margin translation
//!
//! Rank space has two axes: *breadth* runs along a rank, *depth* runs from
//! one rank to the next. For TB/BT breadth is x; for LR/RL it is y.

use tracing::{debug, trace};

use super::graph::LayoutGraph;
use super::types::{Direction, PositionedNode};
use crate::config::LayoutConfig;

/// Upper bound on barycenter sweeps during crossing minimisation.
pub const MAX_SWEEPS: usize = 24;
/// Alignment passes run after initial packing.
pub const REFINE_PASSES: usize = 4;

// ─── Mini-graph helpers ───────────────────────────────────────────────────────

/// Index-based adjacency graph used inside the layout phases.
///
/// Vertices `0..real_count` are the input nodes in input order; any vertex
/// past that is a dummy bend point added for a long edge.
#[derive(Debug, Clone)]
pub struct AdjGraph {
    /// (breadth, depth) of each vertex in rank space.
    sizes: Vec<(f64, f64)>,
    real_count: usize,
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
}

impl AdjGraph {
    fn with_vertices(sizes: Vec<(f64, f64)>) -> Self {
        let n = sizes.len();
        Self {
            sizes,
            real_count: n,
            successors: vec![Vec::new(); n],
            predecessors: vec![Vec::new(); n],
            edges: Vec::new(),
        }
    }

    fn add_dummy(&mut self) -> usize {
        self.sizes.push((0.0, 0.0));
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        self.sizes.len() - 1
    }

    fn add_edge(&mut self, src: usize, tgt: usize) {
        self.successors[src].push(tgt);
        self.predecessors[tgt].push(src);
        self.edges.push((src, tgt));
    }

    pub fn vertex_count(&self) -> usize {
        self.sizes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_dummy(&self, v: usize) -> bool {
        v >= self.real_count
    }

    pub fn successors_of(&self, v: usize) -> &[usize] {
        &self.successors[v]
    }

    pub fn predecessors_of(&self, v: usize) -> &[usize] {
        &self.predecessors[v]
    }
}

/// Build the rank-space adjacency graph.
pub fn adj_from_layout_graph(graph: &LayoutGraph, direction: Direction) -> AdjGraph {
    let sizes = graph
        .nodes()
        .map(|n| {
            if direction.is_horizontal() {
                (n.height, n.width)
            } else {
                (n.width, n.height)
            }
        })
        .collect();
    let mut ag = AdjGraph::with_vertices(sizes);
    for (src, tgt) in graph.edge_pairs() {
        ag.add_edge(src, tgt);
    }
    ag
}

// ─── Cycle Removal (Greedy-FAS) ─────────────────────────────────────────────

/// Compute a vertex ordering using the greedy-FAS heuristic.
///
/// Ties are broken by vertex index so the ordering is deterministic.
pub fn greedy_fas_ordering(ag: &AdjGraph) -> Vec<usize> {
    let n = ag.vertex_count();
    let mut active = vec![true; n];
    let mut remaining = n;
    let mut out_deg: Vec<i64> = (0..n).map(|v| ag.successors_of(v).len() as i64).collect();
    let mut in_deg: Vec<i64> = (0..n).map(|v| ag.predecessors_of(v).len() as i64).collect();

    let mut s1: Vec<usize> = Vec::new();
    let mut s2: Vec<usize> = Vec::new();

    while remaining > 0 {
        loop {
            let sinks: Vec<usize> = (0..n).filter(|&v| active[v] && out_deg[v] == 0).collect();
            if sinks.is_empty() {
                break;
            }
            for sink in sinks {
                active[sink] = false;
                remaining -= 1;
                s2.push(sink);
                for &pred in ag.predecessors_of(sink) {
                    if active[pred] {
                        out_deg[pred] -= 1;
                    }
                }
            }
        }

        loop {
            let sources: Vec<usize> = (0..n).filter(|&v| active[v] && in_deg[v] == 0).collect();
            if sources.is_empty() {
                break;
            }
            for source in sources {
                active[source] = false;
                remaining -= 1;
                s1.push(source);
                for &succ in ag.successors_of(source) {
                    if active[succ] {
                        in_deg[succ] -= 1;
                    }
                }
            }
        }

        let best = (0..n)
            .filter(|&v| active[v])
            .max_by_key(|&v| (out_deg[v] - in_deg[v], std::cmp::Reverse(v)));
        if let Some(best) = best {
            active[best] = false;
            remaining -= 1;
            s1.push(best);
            for &succ in ag.successors_of(best) {
                if active[succ] {
                    in_deg[succ] -= 1;
                }
            }
            for &pred in ag.predecessors_of(best) {
                if active[pred] {
                    out_deg[pred] -= 1;
                }
            }
        }
    }

    s2.reverse();
    s1.extend(s2);
    s1
}

/// Reverse every edge that points backwards in the greedy-FAS ordering.
/// Returns the acyclic graph and the number of edges reversed.
pub fn remove_cycles(ag: &AdjGraph) -> (AdjGraph, usize) {
    let ordering = greedy_fas_ordering(ag);
    let mut position = vec![0usize; ag.vertex_count()];
    for (i, &v) in ordering.iter().enumerate() {
        position[v] = i;
    }

    let mut dag = AdjGraph::with_vertices(ag.sizes.clone());
    dag.real_count = ag.real_count;
    let mut reversed = 0;
    for &(src, tgt) in &ag.edges {
        if position[src] > position[tgt] {
            // a reversed edge may duplicate an existing forward one
            if !dag.successors[tgt].contains(&src) {
                dag.add_edge(tgt, src);
            }
            reversed += 1;
        } else if !dag.successors[src].contains(&tgt) {
            dag.add_edge(src, tgt);
        }
    }

    (dag, reversed)
}

// ─── Rank Assignment ─────────────────────────────────────────────────────────

pub struct RankAssignment {
    /// Rank of each vertex, indexed by vertex.
    pub ranks: Vec<usize>,
    pub rank_count: usize,
}

impl RankAssignment {
    /// Longest-path ranking: every edge goes from a lower to a higher rank
    /// and sources sit on rank 0. `dag` must be acyclic.
    pub fn assign(dag: &AdjGraph) -> Self {
        let mut ranks = vec![0usize; dag.vertex_count()];

        let mut changed = true;
        while changed {
            changed = false;
            for &(src, tgt) in &dag.edges {
                if ranks[tgt] < ranks[src] + 1 {
                    ranks[tgt] = ranks[src] + 1;
                    changed = true;
                }
            }
        }

        let rank_count = ranks.iter().copied().max().map_or(1, |m| m + 1);
        Self { ranks, rank_count }
    }
}

// ─── Dummy Node Insertion ────────────────────────────────────────────────────

pub struct AugmentedGraph {
    pub ag: AdjGraph,
    pub ranks: Vec<usize>,
    pub rank_count: usize,
}

/// Split every edge spanning more than one rank so that each edge of the
/// result joins adjacent ranks.
pub fn insert_dummy_nodes(dag: &AdjGraph, ra: &RankAssignment) -> AugmentedGraph {
    let mut ag = AdjGraph::with_vertices(dag.sizes.clone());
    ag.real_count = dag.real_count;
    let mut ranks = ra.ranks.clone();

    for &(src, tgt) in &dag.edges {
        let span = ranks[tgt] - ranks[src];
        if span <= 1 {
            ag.add_edge(src, tgt);
            continue;
        }

        let mut chain_prev = src;
        for step in 1..span {
            let dummy = ag.add_dummy();
            ranks.push(ranks[src] + step);
            ag.add_edge(chain_prev, dummy);
            chain_prev = dummy;
        }
        ag.add_edge(chain_prev, tgt);
    }

    AugmentedGraph {
        ag,
        ranks,
        rank_count: ra.rank_count,
    }
}

// ─── Crossing Minimisation ───────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum Sweep {
    Down,
    Up,
}

/// Mean position of a vertex's neighbours on the fixed rank, or `None`
/// when it has no neighbours there.
fn barycenter(v: usize, ag: &AdjGraph, fixed_pos: &[Option<usize>], sweep: Sweep) -> Option<f64> {
    let neighbors = match sweep {
        Sweep::Down => ag.predecessors_of(v),
        Sweep::Up => ag.successors_of(v),
    };
    let positions: Vec<f64> = neighbors
        .iter()
        .filter_map(|&nb| fixed_pos[nb].map(|p| p as f64))
        .collect();
    if positions.is_empty() {
        None
    } else {
        Some(positions.iter().sum::<f64>() / positions.len() as f64)
    }
}

fn positions_in(rank: &[usize], vertex_count: usize) -> Vec<Option<usize>> {
    let mut pos = vec![None; vertex_count];
    for (i, &v) in rank.iter().enumerate() {
        pos[v] = Some(i);
    }
    pos
}

/// Count edge crossings between every pair of adjacent ranks.
pub fn count_crossings(ordering: &[Vec<usize>], ag: &AdjGraph) -> usize {
    let mut total = 0usize;
    for r in 0..ordering.len().saturating_sub(1) {
        let tgt_pos = positions_in(&ordering[r + 1], ag.vertex_count());
        let mut edges: Vec<(usize, usize)> = Vec::new();
        for (sp, &src) in ordering[r].iter().enumerate() {
            for &nb in ag.successors_of(src) {
                if let Some(tp) = tgt_pos[nb] {
                    edges.push((sp, tp));
                }
            }
        }
        for i in 0..edges.len() {
            for j in (i + 1)..edges.len() {
                let (ei0, ei1) = edges[i];
                let (ej0, ej1) = edges[j];
                if (ei0 < ej0 && ei1 > ej1) || (ei0 > ej0 && ei1 < ej1) {
                    total += 1;
                }
            }
        }
    }
    total
}

/// Reorder one rank by barycenter. Vertices with no neighbours on the
/// fixed rank keep their current slot as their key.
fn sort_rank(ordering: &mut [Vec<usize>], rank: usize, fixed: usize, ag: &AdjGraph, sweep: Sweep) {
    let fixed_pos = positions_in(&ordering[fixed], ag.vertex_count());
    let mut keyed: Vec<(f64, usize)> = ordering[rank]
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let key = barycenter(v, ag, &fixed_pos, sweep).unwrap_or(i as f64);
            (key, v)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    ordering[rank] = keyed.into_iter().map(|(_, v)| v).collect();
}

/// Order vertices within each rank to reduce crossings. The initial order
/// is vertex order, so input order decides among equivalent layouts.
pub fn minimise_crossings(aug: &AugmentedGraph) -> Vec<Vec<usize>> {
    let rank_count = aug.rank_count;
    let mut ordering: Vec<Vec<usize>> = vec![Vec::new(); rank_count];
    for v in 0..aug.ag.vertex_count() {
        ordering[aug.ranks[v]].push(v);
    }

    let mut best = ordering.clone();
    let mut best_crossings = count_crossings(&ordering, &aug.ag);

    for sweep in 0..MAX_SWEEPS {
        if best_crossings == 0 {
            break;
        }
        for r in 1..rank_count {
            sort_rank(&mut ordering, r, r - 1, &aug.ag, Sweep::Down);
        }
        for r in (0..rank_count.saturating_sub(1)).rev() {
            sort_rank(&mut ordering, r, r + 1, &aug.ag, Sweep::Up);
        }

        let crossings = count_crossings(&ordering, &aug.ag);
        trace!(sweep, crossings, "barycenter sweep");
        if crossings >= best_crossings {
            break;
        }
        best_crossings = crossings;
        best = ordering.clone();
    }

    best
}

// ─── Coordinate Assignment ───────────────────────────────────────────────────

/// Half the gap a vertex contributes to its neighbour on the same rank.
fn half_sep(ag: &AdjGraph, v: usize, config: &LayoutConfig) -> f64 {
    if ag.is_dummy(v) {
        config.edge_sep / 2.0
    } else {
        config.node_sep / 2.0
    }
}

/// Minimum centre-to-centre distance between two neighbours on a rank.
fn min_distance(ag: &AdjGraph, a: usize, b: usize, config: &LayoutConfig) -> f64 {
    ag.sizes[a].0 / 2.0 + half_sep(ag, a, config) + half_sep(ag, b, config) + ag.sizes[b].0 / 2.0
}

/// Place a rank as close to the desired centres as order and separation
/// allow: pack left to right, then shift the whole rank so its mean
/// matches the desired mean.
fn settle_rank(
    rank: &[usize],
    desired: &[f64],
    breadth: &mut [f64],
    ag: &AdjGraph,
    config: &LayoutConfig,
) {
    if rank.is_empty() {
        return;
    }
    let mut placed: Vec<f64> = Vec::with_capacity(rank.len());
    for (i, &v) in rank.iter().enumerate() {
        let c = if i == 0 {
            desired[0]
        } else {
            let floor = placed[i - 1] + min_distance(ag, rank[i - 1], v, config);
            desired[i].max(floor)
        };
        placed.push(c);
    }
    let n = rank.len() as f64;
    let shift = desired.iter().sum::<f64>() / n - placed.iter().sum::<f64>() / n;
    for (&v, c) in rank.iter().zip(placed) {
        breadth[v] = c + shift;
    }
}

/// Assign rank-space centres `(breadth, depth)` to every vertex.
pub fn assign_coordinates(
    ordering: &[Vec<usize>],
    aug: &AugmentedGraph,
    config: &LayoutConfig,
) -> Vec<(f64, f64)> {
    let ag = &aug.ag;
    let mut breadth = vec![0.0f64; ag.vertex_count()];
    let mut depth = vec![0.0f64; ag.vertex_count()];

    // Depth: ranks stacked with rank_sep between their deepest extents.
    let mut cursor = 0.0f64;
    for rank in ordering {
        let rank_depth = rank
            .iter()
            .map(|&v| ag.sizes[v].1)
            .fold(0.0f64, f64::max);
        for &v in rank {
            depth[v] = cursor + rank_depth / 2.0;
        }
        cursor += rank_depth + config.rank_sep;
    }

    // Breadth: pack each rank, centre all ranks on the widest one.
    let mut totals: Vec<f64> = Vec::with_capacity(ordering.len());
    for rank in ordering {
        let mut x = 0.0f64;
        for (i, &v) in rank.iter().enumerate() {
            if i > 0 {
                x += min_distance(ag, rank[i - 1], v, config);
            }
            breadth[v] = x;
        }
        let span = match (rank.first(), rank.last()) {
            (Some(&first), Some(&last)) => {
                x + ag.sizes[first].0 / 2.0 + ag.sizes[last].0 / 2.0
            }
            _ => 0.0,
        };
        totals.push(span);
    }
    let widest = totals.iter().copied().fold(0.0f64, f64::max);
    for (rank, total) in ordering.iter().zip(&totals) {
        let Some(&first) = rank.first() else { continue };
        let offset = (widest - total) / 2.0 + ag.sizes[first].0 / 2.0;
        for &v in rank {
            breadth[v] += offset;
        }
    }

    // Refinement: pull each rank towards the mean of its neighbours, down
    // then up, keeping order and separation.
    for _ in 0..REFINE_PASSES {
        for (r, rank) in ordering.iter().enumerate().skip(1) {
            let desired = desired_centres(rank, ag, &breadth, Sweep::Down);
            settle_rank(rank, &desired, &mut breadth, ag, config);
            trace!(rank = r, "aligned to predecessors");
        }
        for rank in ordering.iter().rev().skip(1) {
            let desired = desired_centres(rank, ag, &breadth, Sweep::Up);
            settle_rank(rank, &desired, &mut breadth, ag, config);
        }
    }

    breadth.into_iter().zip(depth).collect()
}

fn desired_centres(rank: &[usize], ag: &AdjGraph, breadth: &[f64], sweep: Sweep) -> Vec<f64> {
    rank.iter()
        .map(|&v| {
            let neighbors = match sweep {
                Sweep::Down => ag.predecessors_of(v),
                Sweep::Up => ag.successors_of(v),
            };
            if neighbors.is_empty() {
                breadth[v]
            } else {
                neighbors.iter().map(|&nb| breadth[nb]).sum::<f64>() / neighbors.len() as f64
            }
        })
        .collect()
}

// ─── Direction Mapping ───────────────────────────────────────────────────────

/// Map a rank-space centre onto the canvas for `direction`.
pub fn to_canvas(centre: (f64, f64), direction: Direction) -> (f64, f64) {
    let (b, d) = centre;
    let d = if direction.is_reversed() { -d } else { d };
    if direction.is_horizontal() { (d, b) } else { (b, d) }
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

/// Run every phase and return the input nodes positioned, in input order.
pub fn layout(graph: &LayoutGraph, direction: Direction, config: &LayoutConfig) -> Vec<PositionedNode> {
    if graph.node_count() == 0 {
        return Vec::new();
    }

    let ag = adj_from_layout_graph(graph, direction);
    let (dag, reversed) = if graph.is_dag() {
        (ag, 0)
    } else {
        remove_cycles(&ag)
    };
    let ra = RankAssignment::assign(&dag);
    let aug = insert_dummy_nodes(&dag, &ra);
    let ordering = minimise_crossings(&aug);
    let centres = assign_coordinates(&ordering, &aug, config);
    debug!(
        edges = graph.edge_count(),
        segments = aug.ag.edge_count(),
        ranks = aug.rank_count,
        reversed,
        dummies = aug.ag.vertex_count() - aug.ag.real_count,
        crossings = count_crossings(&ordering, &aug.ag),
        "layered layout computed"
    );

    // Canvas centres of the real vertices, then translate so the top-left
    // extent sits on the margin.
    let placed: Vec<(f64, f64)> = graph
        .nodes()
        .enumerate()
        .map(|(v, n)| {
            let (cx, cy) = to_canvas(centres[v], direction);
            (cx - n.width / 2.0, cy - n.height / 2.0)
        })
        .collect();
    let min_left = placed.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let min_top = placed.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let dx = config.margin_x - min_left;
    let dy = config.margin_y - min_top;

    graph
        .nodes()
        .zip(placed)
        .map(|(n, (left, top))| PositionedNode::new(n.clone(), left + dx, top + dy, direction))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_sugiyama.rs"]
mod tests;
