//! Graph-specific error types.

use hs_core::{CompId, HsError, NodeId, PortId};
use thiserror::Error;

use crate::graph::Medium;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Port {port} refers to non-existent node {node}")]
    InvalidNodeRef { port: PortId, node: NodeId },

    #[error("Port {port} refers to non-existent component {comp}")]
    InvalidCompRef { port: PortId, comp: CompId },

    #[error("Port {port} is stored out of order")]
    PortOutOfOrder { port: PortId },

    #[error("Component {comp} uses one port for inlet and outlet")]
    DuplicatePorts { comp: CompId },

    #[error("Port {port} should belong to component {expected} but references {actual}")]
    PortCompMismatch {
        port: PortId,
        expected: CompId,
        actual: CompId,
    },

    #[error("Component {comp} connects node {node} to itself")]
    SelfLoop { comp: CompId, node: NodeId },

    #[error("Component {comp} joins a {inlet} node to a {outlet} node")]
    MixedMedium {
        comp: CompId,
        inlet: Medium,
        outlet: Medium,
    },

    #[error("{what} not found in graph")]
    IdNotFound { what: &'static str },
}

impl From<GraphError> for HsError {
    fn from(err: GraphError) -> Self {
        HsError::Invariant {
            what: err.to_string(),
        }
    }
}
