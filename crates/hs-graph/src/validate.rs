//! Structural checks run when a builder is frozen.

use hs_core::HsResult;

use crate::error::GraphError;
use crate::graph::{Component, Node, Port, PortKind};

/// Every port sits at its own index and refers to a node and component that
/// exist.
pub(crate) fn check_ports(nodes: &[Node], components: &[Component], ports: &[Port]) -> HsResult<()> {
    for (i, port) in ports.iter().enumerate() {
        if port.id.index() as usize != i {
            return Err(GraphError::PortOutOfOrder { port: port.id }.into());
        }
        if port.node.index() as usize >= nodes.len() {
            return Err(GraphError::InvalidNodeRef {
                port: port.id,
                node: port.node,
            }
            .into());
        }
        if port.comp.index() as usize >= components.len() {
            return Err(GraphError::InvalidCompRef {
                port: port.id,
                comp: port.comp,
            }
            .into());
        }
    }
    Ok(())
}

/// Each component owns one inlet and one outlet port on two distinct nodes
/// of the same medium.
pub(crate) fn check_components(nodes: &[Node], components: &[Component], ports: &[Port]) -> HsResult<()> {
    for comp in components {
        if comp.inlet == comp.outlet {
            return Err(GraphError::DuplicatePorts { comp: comp.id }.into());
        }
        let mut ends = [None; 2];
        for (slot, (port_id, kind)) in [(comp.inlet, PortKind::Inlet), (comp.outlet, PortKind::Outlet)]
            .into_iter()
            .enumerate()
        {
            let Some(port) = ports.get(port_id.index() as usize) else {
                return Err(GraphError::InvalidCompRef {
                    port: port_id,
                    comp: comp.id,
                }
                .into());
            };
            if port.comp != comp.id || port.kind != kind {
                return Err(GraphError::PortCompMismatch {
                    port: port_id,
                    expected: comp.id,
                    actual: port.comp,
                }
                .into());
            }
            ends[slot] = Some(&nodes[port.node.index() as usize]);
        }
        let [Some(inlet), Some(outlet)] = ends else {
            continue;
        };
        if inlet.id == outlet.id {
            return Err(GraphError::SelfLoop {
                comp: comp.id,
                node: inlet.id,
            }
            .into());
        }
        if inlet.medium != outlet.medium {
            return Err(GraphError::MixedMedium {
                comp: comp.id,
                inlet: inlet.medium,
                outlet: outlet.medium,
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Medium;
    use hs_core::{HsError, Id};

    fn node(i: u32, medium: Medium) -> Node {
        Node {
            id: Id::from_index(i),
            name: format!("Node {i}"),
            medium,
        }
    }

    fn port(i: u32, comp: u32, node: u32, kind: PortKind) -> Port {
        Port {
            id: Id::from_index(i),
            comp: Id::from_index(comp),
            node: Id::from_index(node),
            kind,
        }
    }

    fn pipe(inlet: u32, outlet: u32) -> Component {
        Component {
            id: Id::from_index(0),
            name: "Pipe".into(),
            inlet: Id::from_index(inlet),
            outlet: Id::from_index(outlet),
        }
    }

    #[test]
    fn empty_topology_is_valid() {
        assert!(check_ports(&[], &[], &[]).is_ok());
        assert!(check_components(&[], &[], &[]).is_ok());
    }

    #[test]
    fn dangling_node_reference() {
        let nodes = [node(0, Medium::Water)];
        let ports = [port(0, 0, 99, PortKind::Inlet)];
        let err = check_ports(&nodes, &[pipe(0, 0)], &ports).unwrap_err();
        assert!(matches!(err, HsError::Invariant { .. }));
    }

    #[test]
    fn component_on_one_node() {
        let nodes = [node(0, Medium::Water)];
        let ports = [port(0, 0, 0, PortKind::Inlet), port(1, 0, 0, PortKind::Outlet)];
        let err = check_components(&nodes, &[pipe(0, 1)], &ports).unwrap_err();
        assert!(err.to_string().contains("to itself"));
    }

    #[test]
    fn water_to_air_component_is_rejected() {
        let nodes = [node(0, Medium::Water), node(1, Medium::Air)];
        let ports = [port(0, 0, 0, PortKind::Inlet), port(1, 0, 1, PortKind::Outlet)];
        let err = check_components(&nodes, &[pipe(0, 1)], &ports).unwrap_err();
        assert!(err.to_string().contains("water") && err.to_string().contains("air"));
    }

    #[test]
    fn swapped_port_kinds_are_rejected() {
        let nodes = [node(0, Medium::Air), node(1, Medium::Air)];
        let ports = [port(0, 0, 0, PortKind::Outlet), port(1, 0, 1, PortKind::Inlet)];
        assert!(check_components(&nodes, &[pipe(0, 1)], &ports).is_err());
    }
}
