//! Archetype options shared by every dispatcher call.

use std::fmt;
use std::str::FromStr;

use hs_components::Vintage;
use hs_core::HsError;
use hs_model::FanCoilCapacityControl;
use hs_plant::{ChilledWaterCooling, HeatPumpLoopCooling, HotWaterTier};
use serde::{Deserialize, Serialize};

/// Heating or cooling medium of an air loop's main coils.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AirMedium {
    Gas,
    #[serde(rename = "DX")]
    Dx,
    #[default]
    Water,
}

impl fmt::Display for AirMedium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AirMedium::Gas => "Gas",
            AirMedium::Dx => "DX",
            AirMedium::Water => "Water",
        })
    }
}

impl FromStr for AirMedium {
    type Err = HsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Gas" => Ok(AirMedium::Gas),
            "DX" => Ok(AirMedium::Dx),
            "Water" => Ok(AirMedium::Water),
            _ => Err(HsError::unknown_tag("air loop medium", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeOptions {
    pub hot_water_tier: HotWaterTier,
    pub chilled_water_cooling: ChilledWaterCooling,
    pub heat_pump_loop_cooling: HeatPumpLoopCooling,
    pub air_heating: AirMedium,
    pub air_cooling: AirMedium,
    /// Let zone-level equipment and air loops bring in outdoor air. Turned
    /// off when a DOAS or ERVs do it instead.
    pub zone_ventilation: bool,
    pub fan_coil_control: FanCoilCapacityControl,
    pub vintage: Vintage,
}

impl Default for ArchetypeOptions {
    fn default() -> Self {
        Self {
            hot_water_tier: HotWaterTier::HighTemperature,
            chilled_water_cooling: ChilledWaterCooling::WaterCooled,
            heat_pump_loop_cooling: HeatPumpLoopCooling::CoolingTowerTwoSpeed,
            air_heating: AirMedium::Water,
            air_cooling: AirMedium::Water,
            zone_ventilation: true,
            fan_coil_control: FanCoilCapacityControl::CyclingFan,
            vintage: Vintage::default(),
        }
    }
}

impl ArchetypeOptions {
    pub(crate) fn without_zone_ventilation(&self) -> Self {
        Self {
            zone_ventilation: false,
            ..self.clone()
        }
    }
}
