use std::collections::{BTreeMap, BTreeSet};

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};

use msf_protocol::{NodeId, Sentence};
use tracing::trace;

use crate::error::{Link, TreeError};

/// A head and its direct dependents, sorted by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadChildren {
    pub head: NodeId,
    pub children: Vec<NodeId>,
}

/// Traversal plan over one sentence.
///
/// `pairs` lists every node that has dependents, ancestors first. Rules are
/// applied over [`TreeIndex::bottom_up`], so a head is only processed once all
/// of its dependents have been.
#[derive(Debug, Clone)]
pub struct TreeIndex {
    root: NodeId,
    pairs: Vec<HeadChildren>,
    positions: BTreeMap<NodeId, usize>,
}

impl TreeIndex {
    pub fn build(sentence: &Sentence) -> Result<Self, TreeError> {
        // 1. Ids must be unique
        let mut seen = BTreeSet::new();
        let mut duplicated = BTreeSet::new();
        for id in sentence.ids() {
            if !seen.insert(id) {
                duplicated.insert(id);
            }
        }
        if !duplicated.is_empty() {
            return Err(TreeError::DuplicateId(duplicated.into_iter().collect()));
        }

        // 2. Heads must exist
        let mut dangling: Vec<Link> = sentence
            .nodes
            .iter()
            .filter(|node| !node.head.is_root() && !seen.contains(&node.head))
            .map(|node| Link {
                id: node.id,
                head: node.head,
            })
            .collect();
        if !dangling.is_empty() {
            dangling.sort();
            return Err(TreeError::DanglingHead(dangling));
        }

        // 3. Exactly one root
        let mut roots: Vec<NodeId> = sentence
            .nodes
            .iter()
            .filter(|node| node.head.is_root())
            .map(|node| node.id)
            .collect();
        let root = match roots.len() {
            0 => return Err(TreeError::NoRoot),
            1 => roots[0],
            _ => {
                roots.sort();
                return Err(TreeError::MultipleRoots(roots));
            }
        };

        // 4. Head -> dependent graph, ordered ancestors first
        let mut graph: DiGraph<NodeId, ()> = DiGraph::with_capacity(sentence.len(), sentence.len());
        let handles: BTreeMap<NodeId, NodeIndex> = sentence
            .ids()
            .map(|id| (id, graph.add_node(id)))
            .collect();
        for node in sentence.nodes.iter().filter(|node| !node.head.is_root()) {
            graph.add_edge(handles[&node.head], handles[&node.id], ());
        }

        let order = toposort(&graph, None).map_err(|_| TreeError::Cycle(cycle_members(&graph)))?;

        let mut pairs = Vec::new();
        for handle in order {
            let mut children: Vec<NodeId> = graph.neighbors(handle).map(|c| graph[c]).collect();
            if children.is_empty() {
                continue;
            }
            children.sort();
            pairs.push(HeadChildren {
                head: graph[handle],
                children,
            });
        }

        verify_order(root, &pairs)?;
        trace!(root = %root, heads = pairs.len(), "indexed tree");

        let positions = pairs
            .iter()
            .enumerate()
            .map(|(i, pair)| (pair.head, i))
            .collect();
        Ok(Self {
            root,
            pairs,
            positions,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Pairs in ancestor-first order.
    pub fn pairs(&self) -> &[HeadChildren] {
        &self.pairs
    }

    /// Pairs leaves-first, the order rules are applied in.
    pub fn bottom_up(&self) -> impl Iterator<Item = &HeadChildren> + '_ {
        self.pairs.iter().rev()
    }

    /// Direct dependents of `head`, sorted by id.
    pub fn children(&self, head: NodeId) -> &[NodeId] {
        self.positions
            .get(&head)
            .map(|&i| self.pairs[i].children.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_children(&self, head: NodeId) -> bool {
        self.positions.contains_key(&head)
    }
}

/// Every node on a cycle, sorted.
fn cycle_members(graph: &DiGraph<NodeId, ()>) -> Vec<NodeId> {
    let mut ids: Vec<NodeId> = tarjan_scc(graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .flatten()
        .map(|handle| graph[handle])
        .collect();
    ids.sort();
    ids
}

/// Checks that the first pair is headed by the root and that every later
/// head was reached as a child of an earlier pair.
pub fn verify_order(root: NodeId, pairs: &[HeadChildren]) -> Result<(), TreeError> {
    let mut reached = BTreeSet::from([root]);
    for pair in pairs {
        if !reached.contains(&pair.head) {
            return Err(TreeError::OrderViolation(pair.head));
        }
        reached.extend(pair.children.iter().copied());
    }
    Ok(())
}

/// Builds the traversal plan for a sentence.
pub fn index(sentence: &Sentence) -> Result<TreeIndex, TreeError> {
    TreeIndex::build(sentence)
}
