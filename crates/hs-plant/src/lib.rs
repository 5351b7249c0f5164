//! hs-plant: plant loop builders and the shared-loop resolver.
//!
//! One builder per loop archetype assembles a closed hydraulic loop on the
//! model: sizing block, pumps, the heat source or sink chosen by the
//! configuration, bypass and header pipes, and a setpoint manager on the
//! supply outlet. Each builder takes a `*Config` struct whose `Default` is
//! the prototype-building archetype.
//!
//! Callers normally go through the `get_or_add_*` functions in [`resolver`],
//! which return the registered loop for a role when there is a compatible
//! one and build it otherwise.

pub mod ambient;
pub mod chilled_water;
mod common;
pub mod condenser_water;
pub mod ground;
pub mod heat_pump;
pub mod hot_water;
pub mod resolver;
pub mod sources;

pub use ambient::{AmbientLoopConfig, add_ambient_loop};
pub use chilled_water::{
    ChilledWaterCooling, ChilledWaterLoopConfig, ChilledWaterPlant, ChilledWaterPumping,
    WatersideEconomizer, add_chilled_water_loop,
};
pub use condenser_water::{
    CondenserWaterLoopConfig, TowerDesign, add_condenser_water_loop, design_wet_bulb_f,
};
pub use ground::{GroundLoopConfig, add_ground_loop};
pub use heat_pump::{HeatPumpLoopConfig, HeatPumpLoopCooling, add_heat_pump_loop};
pub use hot_water::{HotWaterLoopConfig, HotWaterTier, OutdoorAirReset, add_hot_water_loop};
pub use resolver::{
    get_or_add_ambient_loop, get_or_add_chilled_water_loop, get_or_add_condenser_water_loop,
    get_or_add_ground_loop, get_or_add_heat_pump_loop, get_or_add_hot_water_loop,
};
pub use sources::{CoolingSource, HeatSource};
