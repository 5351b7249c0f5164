//! Mutable topology under construction.

use hs_core::{CompId, HsResult, NodeId, PortId};

use crate::error::GraphError;
use crate::graph::{Component, Graph, Medium, Node, Port, PortKind};
use crate::validate;

/// Topology that equipment can still be spliced into.
///
/// Builders insert a piece of equipment into a chain by adding a node and
/// moving a neighbour's port onto it, so ports stay rewirable until
/// [`GraphBuilder::build`] freezes them.
#[derive(Debug, Default, Clone)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    components: Vec<Component>,
    ports: Vec<Port>,
}

impl GraphBuilder {
    /// Empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its ID. IDs follow insertion order.
    pub fn add_node(&mut self, name: impl Into<String>, medium: Medium) -> NodeId {
        let id = NodeId::next_for(self.nodes.len());
        self.nodes.push(Node {
            id,
            name: name.into(),
            medium,
        });
        id
    }

    /// Ports are numbered in the order they are created.
    fn add_port(&mut self, comp: CompId, node: NodeId, kind: PortKind) -> PortId {
        let id = PortId::next_for(self.ports.len());
        self.ports.push(Port { id, comp, node, kind });
        id
    }

    /// Place a two-port component from `inlet` to `outlet`.
    pub fn add_component(&mut self, name: impl Into<String>, inlet: NodeId, outlet: NodeId) -> CompId {
        let id = CompId::next_for(self.components.len());
        let inlet = self.add_port(id, inlet, PortKind::Inlet);
        let outlet = self.add_port(id, outlet, PortKind::Outlet);
        self.components.push(Component {
            id,
            name: name.into(),
            inlet,
            outlet,
        });
        id
    }

    /// Number of nodes added so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of components placed so far.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Name of a node (None if out of bounds).
    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.index() as usize).map(|n| n.name.as_str())
    }

    /// Medium of a node; an unknown ID is an error.
    pub fn node_medium(&self, node: NodeId) -> HsResult<Medium> {
        self.nodes
            .get(node.index() as usize)
            .map(|n| n.medium)
            .ok_or_else(|| GraphError::IdNotFound { what: "NodeId" }.into())
    }

    fn component(&self, comp: CompId) -> HsResult<&Component> {
        self.components
            .get(comp.index() as usize)
            .ok_or_else(|| GraphError::IdNotFound { what: "CompId" }.into())
    }

    fn port_node(&self, port: PortId) -> NodeId {
        self.ports[port.index() as usize].node
    }

    /// Node a component's inlet port is currently attached to.
    pub fn inlet_node(&self, comp: CompId) -> HsResult<NodeId> {
        Ok(self.port_node(self.component(comp)?.inlet))
    }

    /// Node a component's outlet port is currently attached to.
    pub fn outlet_node(&self, comp: CompId) -> HsResult<NodeId> {
        Ok(self.port_node(self.component(comp)?.outlet))
    }

    /// Medium agreement is checked at build time, not here.
    fn move_port(&mut self, port: PortId, node: NodeId) -> HsResult<()> {
        self.node_medium(node)?;
        self.ports[port.index() as usize].node = node;
        Ok(())
    }

    /// Reattach a component's inlet to another node.
    ///
    /// ```
    /// use hs_graph::{GraphBuilder, Medium};
    ///
    /// let mut b = GraphBuilder::new();
    /// let inlet = b.add_node("Supply Inlet Node", Medium::Water);
    /// let outlet = b.add_node("Supply Outlet Node", Medium::Water);
    /// let boiler = b.add_component("Boiler", inlet, outlet);
    ///
    /// let mid = b.add_node("Boiler Inlet Node", Medium::Water);
    /// b.set_inlet_node(boiler, mid)?;
    /// b.add_component("Pump", inlet, mid);
    /// assert_eq!(b.inlet_node(boiler)?, mid);
    /// # Ok::<(), hs_core::HsError>(())
    /// ```
    pub fn set_inlet_node(&mut self, comp: CompId, node: NodeId) -> HsResult<()> {
        let port = self.component(comp)?.inlet;
        self.move_port(port, node)
    }

    /// Reattach a component's outlet to another node.
    pub fn set_outlet_node(&mut self, comp: CompId, node: NodeId) -> HsResult<()> {
        let port = self.component(comp)?.outlet;
        self.move_port(port, node)
    }

    /// Validate and snapshot the current topology.
    pub fn build(&self) -> HsResult<Graph> {
        validate::check_ports(&self.nodes, &self.components, &self.ports)?;
        validate::check_components(&self.nodes, &self.components, &self.ports)?;

        let mut incident = vec![Vec::new(); self.nodes.len()];
        for port in &self.ports {
            incident[port.node.index() as usize].push(port.id);
        }

        Ok(Graph {
            nodes: self.nodes.clone(),
            components: self.components.clone(),
            ports: self.ports.clone(),
            incident,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ports_are_numbered_in_placement_order() {
        let mut b = GraphBuilder::new();
        let inlet = b.add_node("Inlet", Medium::Water);
        let outlet = b.add_node("Outlet", Medium::Water);
        let pipe = b.add_component("Bypass Pipe", inlet, outlet);

        assert_eq!(b.node_count(), 2);
        assert_eq!(b.component_count(), 1);
        let comp = &b.components[pipe.index() as usize];
        assert_eq!((comp.inlet.index(), comp.outlet.index()), (0, 1));
    }

    #[test]
    fn splicing_a_pump_ahead_of_a_chiller() {
        let mut b = GraphBuilder::new();
        let inlet = b.add_node("Supply Inlet Node", Medium::Water);
        let outlet = b.add_node("Supply Outlet Node", Medium::Water);
        let chiller = b.add_component("Chiller", inlet, outlet);

        let mid = b.add_node("Chiller Inlet Node", Medium::Water);
        b.set_inlet_node(chiller, mid).unwrap();
        b.add_component("Pump", inlet, mid);

        assert_eq!(b.inlet_node(chiller).unwrap(), mid);
        assert_eq!(b.outlet_node(chiller).unwrap(), outlet);
        assert!(b.build().unwrap().reachable(inlet, outlet));
    }

    #[test]
    fn rewiring_to_an_unknown_node_fails() {
        let mut b = GraphBuilder::new();
        let a = b.add_node("A", Medium::Air);
        let c = b.add_node("B", Medium::Air);
        let fan = b.add_component("Fan", a, c);
        assert!(b.set_outlet_node(fan, NodeId::from_index(42)).is_err());
        assert!(b.inlet_node(CompId::from_index(7)).is_err());
        assert_eq!(b.node_medium(a).unwrap(), Medium::Air);
    }
}
