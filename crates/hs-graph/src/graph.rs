//! Frozen topology: nodes, two-port components and the ports joining them.

use hs_core::{CompId, NodeId, PortId};

/// What flows through a node. Plant, condenser and ground loops carry water;
/// air loops, zones and outdoor-air streams carry air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Medium {
    Water,
    Air,
}

impl Medium {
    /// Lowercase label used in error messages and summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            Medium::Water => "water",
            Medium::Air => "air",
        }
    }
}

impl std::fmt::Display for Medium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a port relative to its component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    /// Flow enters the component here.
    Inlet,
    /// Flow leaves the component here.
    Outlet,
}

/// A named connection point: loop inlet/outlet, splitter, mixer, zone air
/// node or the node between two pieces of equipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub medium: Medium,
}

/// Joins one side of a component to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub id: PortId,
    pub comp: CompId,
    pub node: NodeId,
    pub kind: PortKind,
}

/// One placement of a piece of equipment, or a connecting pipe or duct.
/// A coil on both a plant loop and an air loop is two components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub id: CompId,
    pub name: String,
    pub inlet: PortId,
    pub outlet: PortId,
}

/// Validated snapshot of a model's topology.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) components: Vec<Component>,
    pub(crate) ports: Vec<Port>,
    /// Ports touching each node, ascending, indexed by node.
    pub(crate) incident: Vec<Vec<PortId>>,
}

impl Graph {
    /// Return all nodes, in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all components, in placement order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Return all ports.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Get a node by ID (None if out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index() as usize)
    }

    /// Get a component by ID (None if out of bounds).
    pub fn component(&self, id: CompId) -> Option<&Component> {
        self.components.get(id.index() as usize)
    }

    /// Get a port by ID (None if out of bounds).
    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.ports.get(id.index() as usize)
    }

    /// First node carrying `name`. Model names are unique, so there is at
    /// most one.
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Ports attached to `node`; empty for an unknown node.
    pub fn node_ports(&self, node: NodeId) -> &[PortId] {
        self.incident
            .get(node.index() as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Node feeding a component.
    pub fn comp_inlet_node(&self, comp: CompId) -> Option<NodeId> {
        let comp = self.component(comp)?;
        Some(self.port(comp.inlet)?.node)
    }

    /// Node a component discharges into.
    pub fn comp_outlet_node(&self, comp: CompId) -> Option<NodeId> {
        let comp = self.component(comp)?;
        Some(self.port(comp.outlet)?.node)
    }

    fn attached(&self, node: NodeId, kind: PortKind) -> impl Iterator<Item = CompId> + '_ {
        self.node_ports(node)
            .iter()
            .filter_map(move |&pid| self.port(pid).filter(|p| p.kind == kind).map(|p| p.comp))
    }

    /// Components drawing flow from `node`.
    pub fn components_leaving(&self, node: NodeId) -> impl Iterator<Item = CompId> + '_ {
        self.attached(node, PortKind::Inlet)
    }

    /// Components delivering flow into `node`.
    pub fn components_entering(&self, node: NodeId) -> impl Iterator<Item = CompId> + '_ {
        self.attached(node, PortKind::Outlet)
    }

    /// Nodes of one medium, in id order.
    pub fn nodes_carrying(&self, medium: Medium) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(move |n| n.medium == medium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphBuilder;

    #[test]
    fn entering_and_leaving_split_by_port_kind() {
        let mut b = GraphBuilder::new();
        let inlet = b.add_node("Supply Inlet Node", Medium::Water);
        let mid = b.add_node("Pump Outlet Node", Medium::Water);
        let outlet = b.add_node("Supply Outlet Node", Medium::Water);
        let pump = b.add_component("Pump", inlet, mid);
        let boiler = b.add_component("Boiler", mid, outlet);
        let graph = b.build().unwrap();

        assert_eq!(graph.components_entering(mid).collect::<Vec<_>>(), vec![pump]);
        assert_eq!(graph.components_leaving(mid).collect::<Vec<_>>(), vec![boiler]);
        assert_eq!(graph.components_entering(inlet).count(), 0);
    }

    #[test]
    fn nodes_filter_by_medium() {
        let mut b = GraphBuilder::new();
        b.add_node("Zone Air Node", Medium::Air);
        b.add_node("Hot Water Loop Supply Inlet Node", Medium::Water);
        b.add_node("Hot Water Loop Supply Outlet Node", Medium::Water);
        let graph = b.build().unwrap();
        assert_eq!(graph.nodes_carrying(Medium::Water).count(), 2);
        assert_eq!(Medium::Air.to_string(), "air");
    }
}
