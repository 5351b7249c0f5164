//! Zone-level packaged and radiant equipment: PTAC, PTHP, water-to-air heat
//! pumps, baseboards, unit heaters, window air conditioners and ERVs.
//!
//! Every builder adds one unit per zone and returns the units in zone order.

use hs_components::{
    CoolingCoilParams, DesignTemperatureTable, EquipmentFactory, FanArchetype, FanParams,
    HeatRecoveryParams, HeatingCoilParams, Vintage,
};
use hs_core::{HsResult, LoopId, ScheduleId, ZoneHvacId, ZoneId};
use hs_model::{Model, ZoneHvacKind, ZoneHvacSpec};
use tracing::info;

use crate::common::{AirHeating, apply_zone_sizing};

fn zone_name(model: &Model, zone: ZoneId) -> HsResult<String> {
    Ok(model.zone(zone)?.name.clone())
}

fn finish(
    model: &mut Model,
    zone: ZoneId,
    name: &str,
    spec: ZoneHvacSpec,
    temps: &DesignTemperatureTable,
) -> HsResult<ZoneHvacId> {
    let unit = model.add_zone_hvac(zone, name, spec)?;
    apply_zone_sizing(model, zone, temps)?;
    Ok(unit)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PtacConfig {
    /// Heating coil inside the unit; `None` builds a cooling-only PTAC.
    pub heating: Option<AirHeating>,
    pub outdoor_air: bool,
    pub availability: Option<ScheduleId>,
    pub vintage: Vintage,
}

impl Default for PtacConfig {
    fn default() -> Self {
        Self {
            heating: Some(AirHeating::Electric),
            outdoor_air: true,
            availability: None,
            vintage: Vintage::default(),
        }
    }
}

pub fn add_ptacs(model: &mut Model, zones: &[ZoneId], config: &PtacConfig) -> HsResult<Vec<ZoneHvacId>> {
    let temps = DesignTemperatureTable::standard();
    let fan = FanParams::new(FanArchetype::PackagedTerminal, config.vintage);
    let mut units = Vec::with_capacity(zones.len());
    for &zone in zones {
        let name = zone_name(model, zone)?;
        let mut spec = ZoneHvacSpec::new(ZoneHvacKind::PackagedTerminalAirConditioner)
            .with_fan(fan.add(model, &format!("{name} PTAC Fan"))?)
            .with_cooling_coil(CoolingCoilParams::dx().add(model, &format!("{name} PTAC Cooling Coil"))?)
            .with_outdoor_air(config.outdoor_air);
        if let Some(heating) = config.heating {
            let coil = heating.reheat_coil(&temps).add(model, &format!("{name} PTAC Heating Coil"))?;
            spec = spec.with_heating_coil(coil);
        }
        if let Some(schedule) = config.availability {
            spec = spec.with_availability(schedule);
        }
        units.push(finish(model, zone, &format!("{name} PTAC"), spec, &temps)?);
    }
    info!(units = units.len(), "built PTACs");
    Ok(units)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PthpConfig {
    pub outdoor_air: bool,
    pub availability: Option<ScheduleId>,
    pub vintage: Vintage,
}

impl Default for PthpConfig {
    fn default() -> Self {
        Self {
            outdoor_air: true,
            availability: None,
            vintage: Vintage::default(),
        }
    }
}

/// Packaged terminal heat pumps with electric supplemental heat.
pub fn add_pthps(model: &mut Model, zones: &[ZoneId], config: &PthpConfig) -> HsResult<Vec<ZoneHvacId>> {
    let temps = DesignTemperatureTable::standard();
    let fan = FanParams::new(FanArchetype::PackagedTerminal, config.vintage);
    let mut units = Vec::with_capacity(zones.len());
    for &zone in zones {
        let name = zone_name(model, zone)?;
        let mut spec = ZoneHvacSpec::new(ZoneHvacKind::PackagedTerminalHeatPump)
            .with_fan(fan.add(model, &format!("{name} PTHP Fan"))?)
            .with_heating_coil(HeatingCoilParams::dx_heat_pump().add(model, &format!("{name} PTHP Heating Coil"))?)
            .with_cooling_coil(CoolingCoilParams::dx().add(model, &format!("{name} PTHP Cooling Coil"))?)
            .with_supplemental_heating_coil(
                HeatingCoilParams::Electric.add(model, &format!("{name} PTHP Supplemental Heating Coil"))?,
            )
            .with_outdoor_air(config.outdoor_air);
        if let Some(schedule) = config.availability {
            spec = spec.with_availability(schedule);
        }
        units.push(finish(model, zone, &format!("{name} PTHP"), spec, &temps)?);
    }
    info!(units = units.len(), "built PTHPs");
    Ok(units)
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaterToAirHeatPumpConfig {
    pub outdoor_air: bool,
    pub vintage: Vintage,
}

impl Default for WaterToAirHeatPumpConfig {
    fn default() -> Self {
        Self {
            outdoor_air: true,
            vintage: Vintage::default(),
        }
    }
}

/// Water-to-air heat pumps drawing from `source_loop`: a heat-pump loop for
/// water-source systems, a ground loop for ground-source systems.
pub fn add_water_to_air_heat_pumps(
    model: &mut Model,
    zones: &[ZoneId],
    source_loop: LoopId,
    config: &WaterToAirHeatPumpConfig,
) -> HsResult<Vec<ZoneHvacId>> {
    let temps = DesignTemperatureTable::standard();
    let fan = FanParams::new(FanArchetype::PackagedTerminal, config.vintage);
    let mut units = Vec::with_capacity(zones.len());
    for &zone in zones {
        let name = zone_name(model, zone)?;
        let heating = HeatingCoilParams::water_to_air(Some(source_loop));
        let cooling = CoolingCoilParams::water_to_air(Some(source_loop));
        let spec = ZoneHvacSpec::new(ZoneHvacKind::WaterToAirHeatPump)
            .with_fan(fan.add(model, &format!("{name} WSHP Fan"))?)
            .with_heating_coil(heating.add(model, &format!("{name} WSHP Heating Coil"))?)
            .with_cooling_coil(cooling.add(model, &format!("{name} WSHP Cooling Coil"))?)
            .with_supplemental_heating_coil(
                HeatingCoilParams::Electric.add(model, &format!("{name} WSHP Supplemental Heating Coil"))?,
            )
            .with_outdoor_air(config.outdoor_air);
        units.push(finish(model, zone, &format!("{name} WSHP"), spec, &temps)?);
    }
    info!(units = units.len(), "built water-to-air heat pumps");
    Ok(units)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaseboardHeating {
    #[default]
    Electric,
    HotWater(LoopId),
}

pub fn add_baseboards(model: &mut Model, zones: &[ZoneId], heating: BaseboardHeating) -> HsResult<Vec<ZoneHvacId>> {
    let temps = DesignTemperatureTable::standard();
    let mut units = Vec::with_capacity(zones.len());
    for &zone in zones {
        let name = zone_name(model, zone)?;
        let spec = match heating {
            BaseboardHeating::Electric => ZoneHvacSpec::new(ZoneHvacKind::BaseboardElectric),
            BaseboardHeating::HotWater(id) => {
                let coil = HeatingCoilParams::Baseboard { plant_loop: Some(id) }
                    .add(model, &format!("{name} Baseboard Coil"))?;
                ZoneHvacSpec::new(ZoneHvacKind::BaseboardWater).with_heating_coil(coil)
            }
        };
        units.push(finish(model, zone, &format!("{name} Baseboard"), spec, &temps)?);
    }
    info!(units = units.len(), "built baseboards");
    Ok(units)
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitHeaterConfig {
    pub heating: AirHeating,
    pub vintage: Vintage,
}

impl Default for UnitHeaterConfig {
    fn default() -> Self {
        Self {
            heating: AirHeating::Gas,
            vintage: Vintage::default(),
        }
    }
}

pub fn add_unit_heaters(model: &mut Model, zones: &[ZoneId], config: &UnitHeaterConfig) -> HsResult<Vec<ZoneHvacId>> {
    let temps = DesignTemperatureTable::standard();
    let fan = FanParams::new(FanArchetype::UnitHeater, config.vintage);
    let mut units = Vec::with_capacity(zones.len());
    for &zone in zones {
        let name = zone_name(model, zone)?;
        let coil = config
            .heating
            .reheat_coil(&temps)
            .add(model, &format!("{name} Unit Heater Coil"))?;
        let spec = ZoneHvacSpec::new(ZoneHvacKind::UnitHeater)
            .with_fan(fan.add(model, &format!("{name} Unit Heater Fan"))?)
            .with_heating_coil(coil);
        units.push(finish(model, zone, &format!("{name} Unit Heater"), spec, &temps)?);
    }
    info!(units = units.len(), "built unit heaters");
    Ok(units)
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowAcConfig {
    pub outdoor_air: bool,
    pub vintage: Vintage,
}

impl Default for WindowAcConfig {
    fn default() -> Self {
        Self {
            outdoor_air: true,
            vintage: Vintage::default(),
        }
    }
}

pub fn add_window_acs(model: &mut Model, zones: &[ZoneId], config: &WindowAcConfig) -> HsResult<Vec<ZoneHvacId>> {
    let temps = DesignTemperatureTable::standard();
    let fan = FanParams::new(FanArchetype::PackagedTerminal, config.vintage);
    let mut units = Vec::with_capacity(zones.len());
    for &zone in zones {
        let name = zone_name(model, zone)?;
        let spec = ZoneHvacSpec::new(ZoneHvacKind::WindowAirConditioner)
            .with_fan(fan.add(model, &format!("{name} Window AC Fan"))?)
            .with_cooling_coil(CoolingCoilParams::dx().add(model, &format!("{name} Window AC Cooling Coil"))?)
            .with_outdoor_air(config.outdoor_air);
        units.push(finish(model, zone, &format!("{name} Window AC"), spec, &temps)?);
    }
    info!(units = units.len(), "built window air conditioners");
    Ok(units)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErvConfig {
    pub heat_recovery: HeatRecoveryParams,
    pub availability: Option<ScheduleId>,
    pub vintage: Vintage,
}

impl Default for ErvConfig {
    fn default() -> Self {
        Self {
            heat_recovery: HeatRecoveryParams::default(),
            availability: None,
            vintage: Vintage::default(),
        }
    }
}

/// Zone energy recovery ventilators. They carry the zone's ventilation load,
/// so the zone's other equipment should be built with outdoor air off.
pub fn add_ervs(model: &mut Model, zones: &[ZoneId], config: &ErvConfig) -> HsResult<Vec<ZoneHvacId>> {
    let temps = DesignTemperatureTable::standard();
    let fan = FanParams::new(FanArchetype::EnergyRecoveryVentilator, config.vintage);
    let mut units = Vec::with_capacity(zones.len());
    for &zone in zones {
        let name = zone_name(model, zone)?;
        let mut spec = ZoneHvacSpec::new(ZoneHvacKind::EnergyRecoveryVentilator)
            .with_fan(fan.add(model, &format!("{name} ERV Fan"))?)
            .with_heat_recovery(config.heat_recovery.add(model, &format!("{name} ERV Heat Recovery"))?)
            .with_outdoor_air(true);
        if let Some(schedule) = config.availability {
            spec = spec.with_availability(schedule);
        }
        units.push(finish(model, zone, &format!("{name} ERV"), spec, &temps)?);
    }
    info!(units = units.len(), "built ERVs");
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_model::ZoneSpec;

    #[test]
    fn ptac_has_fan_and_both_coils() {
        let mut model = Model::new();
        let z = model.add_zone(ZoneSpec::new("Guest Room")).unwrap();
        let units = add_ptacs(&mut model, &[z], &PtacConfig::default()).unwrap();
        let unit = model.zone_hvac(units[0]).unwrap();
        assert_eq!(unit.name, "Guest Room PTAC");
        assert!(unit.fan.is_some() && unit.cooling_coil.is_some() && unit.heating_coil.is_some());
        assert!(model.plant_loops().is_empty());
        let coil = model.equipment(unit.heating_coil.unwrap()).unwrap();
        assert_eq!(coil.container, Some(units[0]));
    }

    #[test]
    fn electric_baseboards_have_no_components() {
        let mut model = Model::new();
        let z = model.add_zone(ZoneSpec::new("Stair")).unwrap();
        let units = add_baseboards(&mut model, &[z], BaseboardHeating::Electric).unwrap();
        let unit = model.zone_hvac(units[0]).unwrap();
        assert_eq!(unit.kind, ZoneHvacKind::BaseboardElectric);
        assert!(model.all_equipment().is_empty());
    }

    #[test]
    fn erv_brings_outdoor_air() {
        let mut model = Model::new();
        let z = model.add_zone(ZoneSpec::new("Office").with_outdoor_air(0.1)).unwrap();
        let units = add_ervs(&mut model, &[z], &ErvConfig::default()).unwrap();
        let unit = model.zone_hvac(units[0]).unwrap();
        assert!(unit.outdoor_air);
        assert!(unit.heat_recovery.is_some());
    }
}
