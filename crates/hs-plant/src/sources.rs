//! Heat sources and sinks a loop builder can put on its supply side.

use hs_components::{
    BoilerParams, DistrictParams, EquipmentFactory, PlantHeatPumpParams, Vintage,
};
use hs_core::{EquipId, HsResult};
use hs_model::{CondenserType, FuelType, Model};
use serde::{Deserialize, Serialize};

/// Primary heating equipment of a hot-water or heat-pump loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatSource {
    Boiler(FuelType),
    District,
    AirSourceHeatPump,
}

impl Default for HeatSource {
    fn default() -> Self {
        HeatSource::Boiler(FuelType::NaturalGas)
    }
}

impl HeatSource {
    pub fn label(self) -> &'static str {
        match self {
            HeatSource::Boiler(_) => "Boiler",
            HeatSource::District => "District Heating",
            HeatSource::AirSourceHeatPump => "Air Source Heat Pump",
        }
    }

    /// Add the source equipment, rated for water leaving at `supply_c`.
    pub(crate) fn add(
        self,
        model: &mut Model,
        loop_name: &str,
        vintage: Vintage,
        supply_c: f64,
    ) -> HsResult<EquipId> {
        let name = format!("{loop_name} {}", self.label());
        match self {
            HeatSource::Boiler(fuel) => BoilerParams::new(fuel, vintage, supply_c).add(model, &name),
            HeatSource::District => DistrictParams::heating().add(model, &name),
            HeatSource::AirSourceHeatPump => PlantHeatPumpParams::air_source_heating().add(model, &name),
        }
    }
}

/// Primary cooling equipment of a chilled-water loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoolingSource {
    Chillers { condenser: CondenserType, count: u8 },
    District,
}

impl Default for CoolingSource {
    fn default() -> Self {
        CoolingSource::Chillers {
            condenser: CondenserType::WaterCooled,
            count: 1,
        }
    }
}

impl CoolingSource {
    pub fn needs_condenser_loop(self) -> bool {
        matches!(
            self,
            CoolingSource::Chillers {
                condenser: CondenserType::WaterCooled,
                ..
            }
        )
    }
}
