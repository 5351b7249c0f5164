//! Flow-direction walks over a frozen graph.

use hs_core::NodeId;

use crate::graph::Graph;

impl Graph {
    /// Nodes one component downstream of `node`.
    pub fn successors(&self, node: NodeId) -> Vec<NodeId> {
        self.components_leaving(node)
            .filter_map(|comp| self.comp_outlet_node(comp))
            .collect()
    }

    /// Nodes one component upstream of `node`.
    pub fn predecessors(&self, node: NodeId) -> Vec<NodeId> {
        self.components_entering(node)
            .filter_map(|comp| self.comp_inlet_node(comp))
            .collect()
    }

    /// Every node flow leaving `from` can reach, `from` included.
    pub fn downstream(&self, from: NodeId) -> Vec<NodeId> {
        let mut seen = vec![false; self.nodes.len()];
        let mut order = Vec::new();
        let mut stack = vec![from];
        while let Some(node) = stack.pop() {
            let Some(slot) = seen.get_mut(node.index() as usize) else {
                continue;
            };
            if std::mem::replace(slot, true) {
                continue;
            }
            order.push(node);
            stack.extend(self.successors(node));
        }
        order
    }

    /// True when flow entering `from` can reach `to` following inlet to outlet.
    pub fn reachable(&self, from: NodeId, to: NodeId) -> bool {
        from == to || self.downstream(from).contains(&to)
    }

    /// Number of components drawing from `node`; above one marks a splitter.
    pub fn fan_out(&self, node: NodeId) -> usize {
        self.components_leaving(node).count()
    }

    /// Number of components feeding `node`; above one marks a mixer.
    pub fn fan_in(&self, node: NodeId) -> usize {
        self.components_entering(node).count()
    }
}
