//! Small single-zone forced-air systems: gas furnaces, split AC with a
//! furnace, air-source heat pumps and direct evaporative coolers. Each zone
//! gets its own air loop.

use hs_components::{
    DesignTemperatureTable, EquipmentFactory, EvaporativeCoolerParams, FanArchetype, FanParams,
    Vintage,
};
use hs_controls::OutdoorAirController;
use hs_core::{AirLoopId, HsResult, ZoneId};
use hs_model::{AirSlot, Model, SupplyEnd, TerminalKind};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::{AirCooling, AirHeating, SupplyTrain, add_single_zone_loop, air_loop_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResidentialSystem {
    #[default]
    Furnace,
    AirConditioner,
    HeatPump,
}

impl ResidentialSystem {
    pub fn label(self) -> &'static str {
        match self {
            ResidentialSystem::Furnace => "Furnace",
            ResidentialSystem::AirConditioner => "Residential AC",
            ResidentialSystem::HeatPump => "Residential ASHP",
        }
    }

    fn heating(self) -> AirHeating {
        match self {
            ResidentialSystem::Furnace | ResidentialSystem::AirConditioner => AirHeating::Gas,
            ResidentialSystem::HeatPump => AirHeating::HeatPump,
        }
    }

    fn cooling(self) -> Option<AirCooling> {
        match self {
            ResidentialSystem::Furnace => None,
            ResidentialSystem::AirConditioner | ResidentialSystem::HeatPump => Some(AirCooling::Dx),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResidentialConfig {
    pub system: ResidentialSystem,
    pub outdoor_air: bool,
    pub vintage: Vintage,
}

impl Default for ResidentialConfig {
    fn default() -> Self {
        Self {
            system: ResidentialSystem::Furnace,
            outdoor_air: true,
            vintage: Vintage::default(),
        }
    }
}

pub fn add_residential_systems(
    model: &mut Model,
    zones: &[ZoneId],
    config: &ResidentialConfig,
) -> HsResult<Vec<AirLoopId>> {
    let temps = DesignTemperatureTable::single_zone_packaged();
    let train = SupplyTrain {
        fan: FanParams::new(FanArchetype::Residential, config.vintage),
        heating: Some(config.system.heating()),
        cooling: config.system.cooling(),
        outdoor_air: config.outdoor_air,
        economizer: Default::default(),
    };
    let loops = zones
        .iter()
        .map(|&zone| {
            add_single_zone_loop(model, zone, config.system.label(), &train, TerminalKind::Uncontrolled, &temps)
        })
        .collect::<HsResult<Vec<_>>>()?;
    info!(system = config.system.label(), air_loops = loops.len(), "built residential systems");
    Ok(loops)
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaporativeCoolerConfig {
    pub cooler: EvaporativeCoolerParams,
    /// Optional heating coil for climates that need winter heat.
    pub heating: Option<AirHeating>,
    pub vintage: Vintage,
}

impl Default for EvaporativeCoolerConfig {
    fn default() -> Self {
        Self {
            cooler: EvaporativeCoolerParams::default(),
            heating: None,
            vintage: Vintage::default(),
        }
    }
}

/// Direct evaporative coolers on 100 % outdoor air, one loop per zone.
pub fn add_evaporative_coolers(
    model: &mut Model,
    zones: &[ZoneId],
    config: &EvaporativeCoolerConfig,
) -> HsResult<Vec<AirLoopId>> {
    let temps = DesignTemperatureTable::standard();
    let train = SupplyTrain {
        fan: FanParams::new(FanArchetype::EvaporativeCooler, config.vintage),
        heating: config.heating,
        cooling: None,
        outdoor_air: false,
        economizer: Default::default(),
    };
    let mut loops = Vec::with_capacity(zones.len());
    for &zone in zones {
        let air = add_single_zone_loop(model, zone, "Evaporative Cooler", &train, TerminalKind::Uncontrolled, &temps)?;
        let name = air_loop_name(model, air)?;
        let cooler = config.cooler.add(model, &format!("{name} Direct Evaporative Cooler"))?;
        model.add_air_supply_equipment(air, cooler, AirSlot::EvaporativeCooler, SupplyEnd::Inlet)?;
        let mut controller = OutdoorAirController::new(format!("{name} OA Controller"));
        controller.minimum_fraction_schedule = Some(model.always_on());
        model.add_outdoor_air_system(air, controller)?;
        let sizing = &mut model.air_loop_mut(air)?.sizing;
        sizing.all_outdoor_air_cooling = true;
        sizing.all_outdoor_air_heating = true;
        loops.push(air);
    }
    info!(air_loops = loops.len(), "built evaporative coolers");
    Ok(loops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_model::ZoneSpec;

    #[test]
    fn furnace_has_no_cooling_coil() {
        let mut model = Model::new();
        let z = model.add_zone(ZoneSpec::new("Living")).unwrap();
        let loops = add_residential_systems(&mut model, &[z], &ResidentialConfig::default()).unwrap();
        let air_loop = model.air_loop(loops[0]).unwrap();
        assert_eq!(air_loop.name, "Living Furnace");
        assert!(air_loop.cooling_coil.is_none());
        assert!(air_loop.heating_coil.is_some());
    }

    #[test]
    fn heat_pump_carries_supplemental_heat() {
        let mut model = Model::new();
        let z = model.add_zone(ZoneSpec::new("Living")).unwrap();
        let config = ResidentialConfig {
            system: ResidentialSystem::HeatPump,
            ..ResidentialConfig::default()
        };
        let loops = add_residential_systems(&mut model, &[z], &config).unwrap();
        assert!(model.air_loop(loops[0]).unwrap().supplemental_heating_coil.is_some());
    }

    #[test]
    fn evaporative_cooler_sits_first_after_mixer() {
        let mut model = Model::new();
        let z = model.add_zone(ZoneSpec::new("Warehouse")).unwrap();
        let loops = add_evaporative_coolers(&mut model, &[z], &EvaporativeCoolerConfig::default()).unwrap();
        let air_loop = model.air_loop(loops[0]).unwrap();
        let order: Vec<_> = air_loop.supply.equipment().collect();
        assert_eq!(order.len(), 3);
        assert_eq!(order[0], air_loop.outdoor_air.as_ref().unwrap().mixer);
        assert_eq!(order[1], air_loop.evaporative_cooler.unwrap());
        assert_eq!(order[2], air_loop.supply_fan.unwrap());
    }
}
