//! Control objects attached to plant and air loops.
//!
//! This crate holds the control domain that sits alongside the equipment
//! graph: setpoint managers anchored to nodes, the outdoor-air controller of
//! an air loop's outdoor-air subsystem, and the small linear control program
//! that drives the synthetic ground heat source.
//!
//! # Design Principles
//!
//! - **Separation of Concerns**: controls reference nodes, zones and schedules
//!   by handle and never own equipment
//! - **Validated construction**: setpoint ranges are checked when built

pub mod error;
pub mod outdoor_air;
pub mod program;
pub mod setpoint;

pub use error::{ControlError, ControlResult};
pub use outdoor_air::{
    EconomizerLockout, EconomizerType, HeatRecoveryBypass, MinimumLimitType,
    OutdoorAirController,
};
pub use program::{ControlProgram, LinearOutletProgram, ProgramActuator, ProgramSensor, program_ident};
pub use setpoint::{ControlVariable, OutdoorAirReference, SetpointKind, SetpointManager};
