//! hs-model: the target model the synthesizer writes into.
//!
//! The model is an arena of zones, schedules, design days, plant loops, air
//! loops, equipment, terminals and zone-level units, all addressed by compact
//! [`hs_core::Id`] handles. Placed equipment is mirrored into an
//! [`hs_graph::GraphBuilder`] so that the finished model can be frozen into a
//! validated node graph with [`Model::topology`].
//!
//! Object names are unique across the model. Adding an object whose name is
//! taken appends ` 1`, ` 2`, ... to the requested name.
//!
//! Shared plant loops are additionally registered under `(role, canonical
//! name)` in a [`LoopRegistry`], which is what the loop resolver consults
//! before building a new loop.

pub mod air_loop;
pub mod curve;
pub mod design_day;
pub mod equipment;
pub mod model;
pub mod naming;
pub mod plant_loop;
pub mod registry;
pub mod schedule;
pub mod segment;
pub mod summary;
pub mod terminal;
pub mod zone;
pub mod zone_hvac;

pub use air_loop::{AirLoop, AirLoopSizing, AirSlot, NightCycle, OutdoorAirSystem, SizingLoad, SupplyEnd};
pub use curve::{Curve, CurveForm};
pub use design_day::{DayType, DesignDay, HumidityCondition};
pub use equipment::*;
pub use model::{Model, SchemaVersion, SpmOwner};
pub use naming::NameRegistry;
pub use plant_loop::{
    CommonPipe, LoadDistribution, LoopRole, LoopSide, LoopType, PlantLoop, PlantSizing,
    SizingOption,
};
pub use registry::{LoopKey, LoopRegistry};
pub use schedule::{Schedule, ScheduleTypeLimits, ScheduleValues};
pub use segment::{Segment, SegmentItem};
pub use summary::{AirLoopSummary, ModelSummary, PlantLoopSummary, TerminalSummary, ZoneHvacSummary};
pub use terminal::{DamperHeatingAction, Terminal, TerminalKind, TerminalSpec, VAV_MIN_FLOW_FRACTION};
pub use zone::{DoasControlStrategy, Zone, ZoneEquipmentRef, ZoneSizing, ZoneSpec};
pub use zone_hvac::{FanCoilCapacityControl, ZoneHvac, ZoneHvacKind, ZoneHvacSpec};
