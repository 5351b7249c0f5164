//! Hot-water loop builder.

use std::fmt;
use std::str::FromStr;

use hs_components::{PumpParams, Vintage};
use hs_controls::SetpointManager;
use hs_core::{HsError, HsResult, LoopId, delta_r_to_k, f_to_c};
use hs_model::{LoopRole, LoopType, Model, PlantSizing, SpmOwner};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::{add_closure_pipes, add_scheduled_setpoint, add_supply_pump};
use crate::sources::HeatSource;

/// Supply temperatures at or below this belong to the low-temperature tier.
pub const TIER_THRESHOLD_F: f64 = 130.0;

/// Hot-water loop temperature tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HotWaterTier {
    /// 180 °F supply, 20 °F ΔT.
    #[default]
    HighTemperature,
    /// 120 °F supply, 10 °F ΔT; what heat pumps and condensing boilers need.
    LowTemperature,
}

impl HotWaterTier {
    pub fn supply_f(self) -> f64 {
        match self {
            HotWaterTier::HighTemperature => 180.0,
            HotWaterTier::LowTemperature => 120.0,
        }
    }

    pub fn delta_f(self) -> f64 {
        match self {
            HotWaterTier::HighTemperature => 20.0,
            HotWaterTier::LowTemperature => 10.0,
        }
    }

    /// Tier a loop with the given design supply temperature falls in.
    pub fn of_supply_c(supply_c: f64) -> Self {
        if supply_c > f_to_c(TIER_THRESHOLD_F) {
            HotWaterTier::HighTemperature
        } else {
            HotWaterTier::LowTemperature
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HotWaterTier::HighTemperature => "HighTemperature",
            HotWaterTier::LowTemperature => "LowTemperature",
        }
    }
}

impl fmt::Display for HotWaterTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HotWaterTier {
    type Err = HsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HighTemperature" => Ok(HotWaterTier::HighTemperature),
            "LowTemperature" => Ok(HotWaterTier::LowTemperature),
            _ => Err(HsError::unknown_tag("hot water loop tier", s)),
        }
    }
}

/// Outdoor-air reset: 180 °F at 20 °F outdoors, 150 °F at 50 °F outdoors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutdoorAirReset {
    pub supply_at_low_oat_f: f64,
    pub low_oat_f: f64,
    pub supply_at_high_oat_f: f64,
    pub high_oat_f: f64,
}

impl Default for OutdoorAirReset {
    fn default() -> Self {
        Self {
            supply_at_low_oat_f: 180.0,
            low_oat_f: 20.0,
            supply_at_high_oat_f: 150.0,
            high_oat_f: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotWaterLoopConfig {
    pub source: HeatSource,
    pub tier: HotWaterTier,
    /// Replace the constant supply setpoint with an outdoor-air reset.
    pub outdoor_air_reset: Option<OutdoorAirReset>,
    pub pump_head_inh2o: f64,
    pub vintage: Vintage,
}

impl Default for HotWaterLoopConfig {
    fn default() -> Self {
        Self {
            source: HeatSource::default(),
            tier: HotWaterTier::default(),
            outdoor_air_reset: None,
            pump_head_inh2o: 720.0,
            vintage: Vintage::default(),
        }
    }
}

/// Lowest supply temperature the loop is allowed to reach.
const MIN_LOOP_TEMP_C: f64 = 10.0;

/// Build a hot-water loop named `name`. The loop is not registered; the
/// resolver does that.
pub fn add_hot_water_loop(model: &mut Model, name: &str, config: &HotWaterLoopConfig) -> HsResult<LoopId> {
    let supply_c = f_to_c(config.tier.supply_f());
    let sizing = PlantSizing::new(LoopType::Heating, supply_c, delta_r_to_k(config.tier.delta_f()));
    let id = model.add_plant_loop(name, LoopRole::HotWater, sizing);
    let loop_name = {
        let plant = model.plant_loop_mut(id)?;
        plant.min_temp_c = MIN_LOOP_TEMP_C;
        plant.max_temp_c = 100.0;
        plant.name.clone()
    };

    add_supply_pump(model, id, &PumpParams::variable(config.pump_head_inh2o), "Pump")?;
    let source = config.source.add(model, &loop_name, config.vintage, supply_c)?;
    model.add_supply_branch(id, &[source])?;
    add_closure_pipes(model, id)?;

    match config.outdoor_air_reset {
        Some(reset) => {
            let outlet = model.plant_loop(id)?.supply.outlet;
            let spm = SetpointManager::outdoor_air_reset(
                format!("{loop_name} Setpoint Manager"),
                outlet,
                (f_to_c(reset.supply_at_low_oat_f), f_to_c(reset.low_oat_f)),
                (f_to_c(reset.supply_at_high_oat_f), f_to_c(reset.high_oat_f)),
            )?;
            model.add_setpoint_manager(SpmOwner::PlantLoop(id), spm)?;
        }
        None => {
            add_scheduled_setpoint(model, id, LoopRole::HotWater.canonical_name(), supply_c)?;
        }
    }

    info!(
        plant_loop = %loop_name,
        tier = %config.tier,
        source = config.source.label(),
        "built hot water loop"
    );
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_model::EquipmentKind;

    #[test]
    fn tier_threshold_splits_at_130f() {
        assert_eq!(HotWaterTier::of_supply_c(f_to_c(180.0)), HotWaterTier::HighTemperature);
        assert_eq!(HotWaterTier::of_supply_c(f_to_c(130.0)), HotWaterTier::LowTemperature);
        assert_eq!(HotWaterTier::of_supply_c(f_to_c(120.0)), HotWaterTier::LowTemperature);
        assert_eq!("LowTemperature".parse::<HotWaterTier>().unwrap(), HotWaterTier::LowTemperature);
        assert!("Medium".parse::<HotWaterTier>().is_err());
    }

    #[test]
    fn boiler_loop_has_pump_boiler_and_setpoint() {
        let mut model = Model::new();
        let id = add_hot_water_loop(&mut model, "Hot Water Loop", &HotWaterLoopConfig::default()).unwrap();
        let plant = model.plant_loop(id).unwrap();
        assert_eq!(plant.min_temp_c, 10.0);
        assert_eq!(plant.setpoint_managers.len(), 1);
        assert_eq!(model.loop_pumps(id).unwrap().len(), 1);
        let boilers = plant
            .supply_equipment()
            .filter(|&e| matches!(model.equipment(e).unwrap().kind, EquipmentKind::Boiler(_)))
            .count();
        assert_eq!(boilers, 1);
        assert!(model.schedule_by_name("Hot Water Loop Temp - 180F").is_some());
        model.topology().unwrap();
    }

    #[test]
    fn outdoor_air_reset_replaces_constant_setpoint() {
        let mut model = Model::new();
        let config = HotWaterLoopConfig {
            outdoor_air_reset: Some(OutdoorAirReset::default()),
            ..Default::default()
        };
        let id = add_hot_water_loop(&mut model, "Hot Water Loop", &config).unwrap();
        let spm_id = model.plant_loop(id).unwrap().setpoint_managers[0];
        let spm = model.setpoint_manager(spm_id).unwrap();
        let mid = spm.setpoint_for_outdoor(f_to_c(35.0)).unwrap();
        assert!((mid - f_to_c(165.0)).abs() < 1e-9);
        assert!(model.schedule_by_name("Hot Water Loop Temp - 180F").is_none());
    }
}
