//! hs-air: air system builders and zone-level equipment.
//!
//! Central builders ([`add_vav`], [`add_pvav`], [`add_doas`]) create one air
//! loop for a list of zones; single-zone builders ([`add_psz`],
//! [`add_residential_systems`], [`add_evaporative_coolers`]) create one loop
//! per zone. Every supply path is wired the same way: supply fan, heating
//! coil, cooling coil and outdoor-air system, each inserted at the supply
//! inlet, followed by a setpoint manager on the supply outlet and one
//! terminal per zone.
//!
//! Zone-level builders ([`add_fan_coils`], [`add_ptacs`], [`add_baseboards`],
//! ...) add one unit per zone without an air loop.
//!
//! Builders take plant loops as handles. Resolving or building those loops
//! is the caller's job (see `hs_plant::resolver`).

pub mod common;
pub mod doas;
pub mod fan_coil;
pub mod psz;
pub mod residential;
pub mod vav;
pub mod zone_equipment;

pub use common::{
    AirCooling, AirHeating, SupplyEquipment, SupplyTrain, add_humidifier, attach_heat_recovery,
    total_outdoor_air,
};
pub use doas::{DoasConfig, DoasSupply, add_doas};
pub use fan_coil::{FanCoilConfig, add_fan_coils};
pub use psz::{PszConfig, add_psz};
pub use residential::{
    EvaporativeCoolerConfig, ResidentialConfig, ResidentialSystem, add_evaporative_coolers,
    add_residential_systems,
};
pub use vav::{PvavConfig, VavConfig, VavTerminal, add_pvav, add_vav};
pub use zone_equipment::{
    BaseboardHeating, ErvConfig, PtacConfig, PthpConfig, UnitHeaterConfig, WaterToAirHeatPumpConfig,
    WindowAcConfig, add_baseboards, add_ervs, add_ptacs, add_pthps, add_unit_heaters,
    add_water_to_air_heat_pumps, add_window_acs,
};
