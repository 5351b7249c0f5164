//! Fuel tags accepted by the dispatcher.

use std::fmt;
use std::str::FromStr;

use hs_core::HsError;
use hs_model::FuelType;
use hs_plant::{HeatSource, HotWaterTier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fuel {
    NaturalGas,
    Propane,
    FuelOil,
    Electricity,
    DistrictHeating,
    DistrictCooling,
    /// Hot water from a central air-source heat pump plant.
    AirSourceHeatPump,
}

impl Fuel {
    pub const ALL: [Fuel; 7] = [
        Fuel::NaturalGas,
        Fuel::Propane,
        Fuel::FuelOil,
        Fuel::Electricity,
        Fuel::DistrictHeating,
        Fuel::DistrictCooling,
        Fuel::AirSourceHeatPump,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Fuel::NaturalGas => "NaturalGas",
            Fuel::Propane => "Propane",
            Fuel::FuelOil => "FuelOil",
            Fuel::Electricity => "Electricity",
            Fuel::DistrictHeating => "DistrictHeating",
            Fuel::DistrictCooling => "DistrictCooling",
            Fuel::AirSourceHeatPump => "AirSourceHeatPump",
        }
    }

    /// Plant equipment that makes hot water from this fuel.
    pub fn heat_source(self) -> Option<HeatSource> {
        match self {
            Fuel::NaturalGas => Some(HeatSource::Boiler(FuelType::NaturalGas)),
            Fuel::Propane => Some(HeatSource::Boiler(FuelType::Propane)),
            Fuel::FuelOil => Some(HeatSource::Boiler(FuelType::FuelOilNo2)),
            Fuel::Electricity => Some(HeatSource::Boiler(FuelType::Electricity)),
            Fuel::DistrictHeating => Some(HeatSource::District),
            Fuel::AirSourceHeatPump => Some(HeatSource::AirSourceHeatPump),
            Fuel::DistrictCooling => None,
        }
    }

    /// Hot-water tier this fuel forces, if any. Heat pumps cannot make
    /// 180 °F water.
    pub fn forced_tier(self) -> Option<HotWaterTier> {
        match self {
            Fuel::AirSourceHeatPump => Some(HotWaterTier::LowTemperature),
            _ => None,
        }
    }
}

impl fmt::Display for Fuel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Fuel {
    type Err = HsError;

    /// Accepts the canonical tags plus the names newer and older model
    /// schemas use for the same fuels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FuelOilNo2" => Ok(Fuel::FuelOil),
            "DistrictHeatingWater" | "DistrictHeatingSteam" => Ok(Fuel::DistrictHeating),
            "DistrictCoolingWater" => Ok(Fuel::DistrictCooling),
            _ => Fuel::ALL
                .into_iter()
                .find(|f| f.as_str() == s)
                .ok_or_else(|| HsError::unknown_tag("fuel", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn district_heating_names_normalize() {
        for tag in ["DistrictHeating", "DistrictHeatingWater", "DistrictHeatingSteam"] {
            assert_eq!(tag.parse::<Fuel>().unwrap(), Fuel::DistrictHeating);
        }
    }

    #[test]
    fn heat_pump_forces_low_temperature_water() {
        assert_eq!(Fuel::AirSourceHeatPump.forced_tier(), Some(HotWaterTier::LowTemperature));
        assert_eq!(Fuel::AirSourceHeatPump.heat_source(), Some(HeatSource::AirSourceHeatPump));
        assert_eq!(Fuel::NaturalGas.forced_tier(), None);
    }

    #[test]
    fn district_cooling_makes_no_hot_water() {
        assert!(Fuel::DistrictCooling.heat_source().is_none());
        assert!("Coal".parse::<Fuel>().is_err());
    }
}
