//! Neighbor-joining trees over row distances
//!
//! The tree is stored as a directed petgraph graph: edges point from parent
//! to child and carry the branch length. The binary [`GuideTree`] view drives
//! progressive alignment.

use crate::distance::DistanceMatrix;
use patterna_core::{PatternaError, PatternaResult};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::fmt;
use tracing::debug;

/// Q-values closer than this are treated as equal
const TIE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeNode {
    Leaf(usize),
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branch {
    pub length: f64,
    /// 0 for the left child, 1 for the right
    slot: u8,
}

/// Binary merge order for progressive alignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuideTree {
    Leaf(usize),
    Pair(Box<GuideTree>, Box<GuideTree>),
}

impl GuideTree {
    pub fn pair(left: GuideTree, right: GuideTree) -> Self {
        GuideTree::Pair(Box::new(left), Box::new(right))
    }

    /// Leaves from left to right
    pub fn leaves(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<usize>) {
        match self {
            GuideTree::Leaf(row) => out.push(*row),
            GuideTree::Pair(left, right) => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            GuideTree::Leaf(_) => 1,
            GuideTree::Pair(left, right) => left.leaf_count() + right.leaf_count(),
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            GuideTree::Leaf(_) => 0,
            GuideTree::Pair(left, right) => 1 + left.depth().max(right.depth()),
        }
    }

    /// Same shape with every leaf renamed by `f`
    pub fn map_leaves<F: Fn(usize) -> usize>(&self, f: &F) -> GuideTree {
        match self {
            GuideTree::Leaf(row) => GuideTree::Leaf(f(*row)),
            GuideTree::Pair(left, right) => GuideTree::pair(left.map_leaves(f), right.map_leaves(f)),
        }
    }
}

impl fmt::Display for GuideTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuideTree::Leaf(row) => write!(f, "{}", row),
            GuideTree::Pair(left, right) => write!(f, "({},{})", left, right),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NjTree {
    graph: DiGraph<TreeNode, Branch>,
    root: NodeIndex,
}

impl NjTree {
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn node(&self, index: NodeIndex) -> Option<TreeNode> {
        self.graph.node_weight(index).copied()
    }

    pub fn leaf_count(&self) -> usize {
        self.graph
            .node_weights()
            .filter(|n| matches!(n, TreeNode::Leaf(_)))
            .count()
    }

    /// Children of `index` with their branch lengths, left child first
    pub fn children(&self, index: NodeIndex) -> Vec<(NodeIndex, f64)> {
        let mut edges: Vec<(u8, NodeIndex, f64)> = self
            .graph
            .edges(index)
            .map(|e| (e.weight().slot, e.target(), e.weight().length))
            .collect();
        edges.sort_by_key(|(slot, _, _)| *slot);
        edges.into_iter().map(|(_, node, length)| (node, length)).collect()
    }

    /// Length of the branch above the leaf for `row`
    pub fn branch_length(&self, row: usize) -> Option<f64> {
        let leaf = self
            .graph
            .node_indices()
            .find(|&i| self.graph[i] == TreeNode::Leaf(row))?;
        self.graph
            .edges_directed(leaf, Direction::Incoming)
            .next()
            .map(|e| e.weight().length)
    }

    pub fn to_guide_tree(&self) -> GuideTree {
        self.guide_subtree(self.root)
    }

    fn guide_subtree(&self, index: NodeIndex) -> GuideTree {
        match self.graph[index] {
            TreeNode::Leaf(row) => GuideTree::Leaf(row),
            TreeNode::Internal => {
                let children = self.children(index);
                let mut subtrees = children.iter().map(|(child, _)| self.guide_subtree(*child));
                match (subtrees.next(), subtrees.next()) {
                    (Some(left), Some(right)) => GuideTree::pair(left, right),
                    (Some(only), None) => only,
                    // internal nodes are only created with two children
                    _ => unreachable!("internal tree node without children"),
                }
            }
        }
    }

    /// Leaf rows in left-to-right order
    pub fn leaf_order(&self) -> Vec<usize> {
        self.to_guide_tree().leaves()
    }

    /// Newick rendering, leaves named by row index
    pub fn to_newick(&self, with_lengths: bool) -> String {
        let mut out = String::new();
        self.write_newick(self.root, None, with_lengths, &mut out);
        out.push(';');
        out
    }

    fn write_newick(&self, index: NodeIndex, length: Option<f64>, with_lengths: bool, out: &mut String) {
        match self.graph[index] {
            TreeNode::Leaf(row) => out.push_str(&row.to_string()),
            TreeNode::Internal => {
                out.push('(');
                for (k, (child, child_length)) in self.children(index).into_iter().enumerate() {
                    if k > 0 {
                        out.push(',');
                    }
                    self.write_newick(child, Some(child_length), with_lengths, out);
                }
                out.push(')');
            }
        }
        if let (true, Some(length)) = (with_lengths, length) {
            out.push_str(&format!(":{:.3}", length));
        }
    }
}

/// Pick the pair minimizing Q. Near-equal Q values fall back to the smaller
/// raw distance, then to the lowest index pair.
fn closest_pair(d: &[Vec<f64>], row_sums: &[f64]) -> (usize, usize) {
    let m = d.len();
    let scale = m as f64 - 2.0;
    let mut best: Option<(f64, f64, usize, usize)> = None;

    for i in 0..m {
        for j in (i + 1)..m {
            let q = scale * d[i][j] - row_sums[i] - row_sums[j];
            let better = match best {
                None => true,
                Some((best_q, best_d, _, _)) => {
                    q < best_q - TIE_EPSILON
                        || ((q - best_q).abs() <= TIE_EPSILON && d[i][j] < best_d - TIE_EPSILON)
                }
            };
            if better {
                best = Some((q, d[i][j], i, j));
            }
        }
    }

    best.map_or((0, 1), |(_, _, i, j)| (i, j))
}

/// Build a neighbor-joining tree. The joined node takes the place of the
/// lower index of the pair; once two nodes remain they become the root's
/// children. Negative branch lengths are clamped to zero.
pub fn neighbor_join(matrix: &DistanceMatrix) -> PatternaResult<NjTree> {
    let n = matrix.size();
    if n == 0 {
        return Err(PatternaError::degenerate("cannot build a tree over zero rows"));
    }

    let mut graph = DiGraph::new();
    let mut active: Vec<NodeIndex> = (0..n).map(|row| graph.add_node(TreeNode::Leaf(row))).collect();
    if n == 1 {
        return Ok(NjTree {
            root: active[0],
            graph,
        });
    }

    let mut d: Vec<Vec<f64>> = (0..n).map(|i| matrix.row(i).to_vec()).collect();

    while active.len() > 2 {
        let m = active.len();
        let row_sums: Vec<f64> = d.iter().map(|row| row.iter().sum()).collect();
        let (i, j) = closest_pair(&d, &row_sums);
        let dij = d[i][j];

        let raw_i = 0.5 * dij + (row_sums[i] - row_sums[j]) / (2.0 * (m as f64 - 2.0));
        let length_i = raw_i.max(0.0);
        let length_j = (dij - raw_i).max(0.0);

        let parent = graph.add_node(TreeNode::Internal);
        graph.add_edge(parent, active[i], Branch { length: length_i, slot: 0 });
        graph.add_edge(parent, active[j], Branch { length: length_j, slot: 1 });

        let joined: Vec<f64> = (0..m).map(|k| 0.5 * (d[i][k] + d[j][k] - dij)).collect();
        for k in 0..m {
            d[i][k] = joined[k];
            d[k][i] = joined[k];
        }
        d[i][i] = 0.0;

        d.remove(j);
        for row in &mut d {
            row.remove(j);
        }
        active[i] = parent;
        active.remove(j);
    }

    let half = (0.5 * d[0][1]).max(0.0);
    let root = graph.add_node(TreeNode::Internal);
    graph.add_edge(root, active[0], Branch { length: half, slot: 0 });
    graph.add_edge(root, active[1], Branch { length: half, slot: 1 });

    debug!("Neighbor joining built a tree over {} rows", n);
    Ok(NjTree { graph, root })
}
