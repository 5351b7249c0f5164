//! Heat-pump (water-source) loop builder.
//!
//! The loop floats between a low and a high limit. Heat rejection holds the
//! upper limit, the supplemental heat source the lower one.

use std::fmt;
use std::str::FromStr;

use hs_components::{EquipmentFactory, HeatRejectionParams, PumpParams, Vintage};
use hs_core::{HsError, HsResult, LoopId, delta_r_to_k, f_to_c};
use hs_model::{HeatRejectionKind, LoopRole, LoopType, Model, PlantSizing};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::{add_closure_pipes, add_dual_setpoint, add_supply_pump};
use crate::sources::HeatSource;

/// Heat rejection equipment of a heat-pump loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeatPumpLoopCooling {
    CoolingTower,
    CoolingTowerSingleSpeed,
    #[default]
    CoolingTowerTwoSpeed,
    CoolingTowerVariableSpeed,
    FluidCooler,
    FluidCoolerSingleSpeed,
    FluidCoolerTwoSpeed,
    EvaporativeFluidCoolerSingleSpeed,
    EvaporativeFluidCoolerTwoSpeed,
}

impl HeatPumpLoopCooling {
    pub const ALL: [HeatPumpLoopCooling; 9] = [
        HeatPumpLoopCooling::CoolingTower,
        HeatPumpLoopCooling::CoolingTowerSingleSpeed,
        HeatPumpLoopCooling::CoolingTowerTwoSpeed,
        HeatPumpLoopCooling::CoolingTowerVariableSpeed,
        HeatPumpLoopCooling::FluidCooler,
        HeatPumpLoopCooling::FluidCoolerSingleSpeed,
        HeatPumpLoopCooling::FluidCoolerTwoSpeed,
        HeatPumpLoopCooling::EvaporativeFluidCoolerSingleSpeed,
        HeatPumpLoopCooling::EvaporativeFluidCoolerTwoSpeed,
    ];

    /// Generic tags resolve to single-speed equipment.
    pub fn kind(self) -> HeatRejectionKind {
        match self {
            HeatPumpLoopCooling::CoolingTower | HeatPumpLoopCooling::CoolingTowerSingleSpeed => {
                HeatRejectionKind::CoolingTowerSingleSpeed
            }
            HeatPumpLoopCooling::CoolingTowerTwoSpeed => HeatRejectionKind::CoolingTowerTwoSpeed,
            HeatPumpLoopCooling::CoolingTowerVariableSpeed => HeatRejectionKind::CoolingTowerVariableSpeed,
            HeatPumpLoopCooling::FluidCooler | HeatPumpLoopCooling::FluidCoolerSingleSpeed => {
                HeatRejectionKind::FluidCoolerSingleSpeed
            }
            HeatPumpLoopCooling::FluidCoolerTwoSpeed => HeatRejectionKind::FluidCoolerTwoSpeed,
            HeatPumpLoopCooling::EvaporativeFluidCoolerSingleSpeed => {
                HeatRejectionKind::EvaporativeFluidCoolerSingleSpeed
            }
            HeatPumpLoopCooling::EvaporativeFluidCoolerTwoSpeed => {
                HeatRejectionKind::EvaporativeFluidCoolerTwoSpeed
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeatPumpLoopCooling::CoolingTower => "CoolingTower",
            HeatPumpLoopCooling::CoolingTowerSingleSpeed => "CoolingTowerSingleSpeed",
            HeatPumpLoopCooling::CoolingTowerTwoSpeed => "CoolingTowerTwoSpeed",
            HeatPumpLoopCooling::CoolingTowerVariableSpeed => "CoolingTowerVariableSpeed",
            HeatPumpLoopCooling::FluidCooler => "FluidCooler",
            HeatPumpLoopCooling::FluidCoolerSingleSpeed => "FluidCoolerSingleSpeed",
            HeatPumpLoopCooling::FluidCoolerTwoSpeed => "FluidCoolerTwoSpeed",
            HeatPumpLoopCooling::EvaporativeFluidCoolerSingleSpeed => "EvaporativeFluidCoolerSingleSpeed",
            HeatPumpLoopCooling::EvaporativeFluidCoolerTwoSpeed => "EvaporativeFluidCoolerTwoSpeed",
        }
    }
}

impl fmt::Display for HeatPumpLoopCooling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeatPumpLoopCooling {
    type Err = HsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeatPumpLoopCooling::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| HsError::unknown_tag("heat pump loop cooling type", s))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatPumpLoopConfig {
    pub cooling: HeatPumpLoopCooling,
    pub heating: HeatSource,
    pub low_f: f64,
    pub high_f: f64,
    pub pump_head_inh2o: f64,
    pub vintage: Vintage,
}

impl Default for HeatPumpLoopConfig {
    fn default() -> Self {
        Self {
            cooling: HeatPumpLoopCooling::default(),
            heating: HeatSource::default(),
            low_f: 60.0,
            high_f: 80.0,
            pump_head_inh2o: 720.0,
            vintage: Vintage::default(),
        }
    }
}

pub fn add_heat_pump_loop(model: &mut Model, name: &str, config: &HeatPumpLoopConfig) -> HsResult<LoopId> {
    if config.low_f >= config.high_f {
        return Err(HsError::InvalidArg {
            what: "heat pump loop low limit must be below the high limit",
        });
    }
    let (low_c, high_c) = (f_to_c(config.low_f), f_to_c(config.high_f));
    let sizing = PlantSizing::new(LoopType::Heating, high_c, delta_r_to_k(10.0));
    let id = model.add_plant_loop(name, LoopRole::HeatPump, sizing);
    let loop_name = {
        let plant = model.plant_loop_mut(id)?;
        plant.min_temp_c = 5.0;
        plant.max_temp_c = 80.0;
        plant.name.clone()
    };

    add_supply_pump(model, id, &PumpParams::variable(config.pump_head_inh2o), "Pump")?;
    let rejection = HeatRejectionParams::new(config.cooling.kind())
        .add(model, &format!("{loop_name} {}", config.cooling))?;
    model.add_supply_branch(id, &[rejection])?;
    let heater = config.heating.add(model, &loop_name, config.vintage, low_c)?;
    model.add_supply_branch(id, &[heater])?;
    add_closure_pipes(model, id)?;
    add_dual_setpoint(model, id, LoopRole::HeatPump.canonical_name(), low_c, high_c)?;

    info!(
        plant_loop = %loop_name,
        cooling = %config.cooling,
        heating = config.heating.label(),
        "built heat pump loop"
    );
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_cooling_tags_round_trip() {
        for c in HeatPumpLoopCooling::ALL {
            assert_eq!(c.to_string().parse::<HeatPumpLoopCooling>().unwrap(), c);
        }
        assert_eq!(
            HeatPumpLoopCooling::CoolingTower.kind(),
            HeatRejectionKind::CoolingTowerSingleSpeed
        );
        assert!("DistrictCooling".parse::<HeatPumpLoopCooling>().is_err());
    }

    #[test]
    fn loop_has_dual_setpoint_and_two_sources() {
        let mut model = Model::new();
        let id = add_heat_pump_loop(&mut model, "Heat Pump Loop", &HeatPumpLoopConfig::default()).unwrap();
        let plant = model.plant_loop(id).unwrap();
        // rejection, heater, bypass
        assert_eq!(plant.supply.branches.len(), 3);
        assert!(model.schedule_by_name("Heat Pump Loop High Temp - 80F").is_some());
        assert!(model.schedule_by_name("Heat Pump Loop Low Temp - 60F").is_some());
        let tower = model.equipment_by_name("Heat Pump Loop CoolingTowerTwoSpeed").unwrap();
        assert_eq!(model.equipment(tower).unwrap().class(), "CoolingTower:TwoSpeed");
    }
}
