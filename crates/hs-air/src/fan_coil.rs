//! Four-pipe fan coil units.

use hs_components::{
    CoolingCoilParams, DesignTemperatureTable, EquipmentFactory, FanArchetype, FanParams,
    HeatingCoilParams, Vintage,
};
use hs_core::{HsResult, LoopId, ZoneHvacId, ZoneId};
use hs_model::{FanCoilCapacityControl, FanKind, Model, ZoneHvacKind, ZoneHvacSpec};
use tracing::info;

use crate::common::apply_zone_sizing;

#[derive(Debug, Clone, PartialEq)]
pub struct FanCoilConfig {
    /// Hot-water loop for the heating coil; electric heat without one.
    pub hot_water_loop: Option<LoopId>,
    pub capacity_control: FanCoilCapacityControl,
    pub outdoor_air: bool,
    pub vintage: Vintage,
}

impl Default for FanCoilConfig {
    fn default() -> Self {
        Self {
            hot_water_loop: None,
            capacity_control: FanCoilCapacityControl::CyclingFan,
            outdoor_air: true,
            vintage: Vintage::default(),
        }
    }
}

fn fan_kind(control: FanCoilCapacityControl) -> FanKind {
    if control.has_variable_fan() {
        FanKind::VariableVolume
    } else if control == FanCoilCapacityControl::CyclingFan {
        FanKind::OnOff
    } else {
        FanKind::ConstantVolume
    }
}

/// Add a fan coil to each zone, cooling from `chilled_water_loop`.
pub fn add_fan_coils(
    model: &mut Model,
    zones: &[ZoneId],
    chilled_water_loop: LoopId,
    config: &FanCoilConfig,
) -> HsResult<Vec<ZoneHvacId>> {
    let temps = DesignTemperatureTable::standard();
    let fan = FanParams::new(FanArchetype::FanCoil, config.vintage).with_kind(fan_kind(config.capacity_control));
    let heating = match config.hot_water_loop {
        Some(id) => HeatingCoilParams::water(Some(id), &temps),
        None => HeatingCoilParams::Electric,
    };
    let cooling = CoolingCoilParams::water(Some(chilled_water_loop), &temps);

    let mut units = Vec::with_capacity(zones.len());
    for &zone in zones {
        let zone_name = model.zone(zone)?.name.clone();
        let spec = ZoneHvacSpec::new(ZoneHvacKind::FourPipeFanCoil)
            .with_fan(fan.add(model, &format!("{zone_name} FCU Fan"))?)
            .with_heating_coil(heating.add(model, &format!("{zone_name} FCU Heating Coil"))?)
            .with_cooling_coil(cooling.add(model, &format!("{zone_name} FCU Cooling Coil"))?)
            .with_capacity_control(config.capacity_control)
            .with_outdoor_air(config.outdoor_air);
        units.push(model.add_zone_hvac(zone, &format!("{zone_name} FCU"), spec)?);
        apply_zone_sizing(model, zone, &temps)?;
    }
    info!(
        units = units.len(),
        capacity_control = %config.capacity_control,
        "built fan coil units"
    );
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_core::{delta_r_to_k, f_to_c};
    use hs_model::{LoopRole, LoopType, PlantSizing, ZoneSpec};

    #[test]
    fn coils_land_on_their_loops() {
        let mut model = Model::new();
        let chw = model.add_plant_loop(
            "Chilled Water Loop",
            LoopRole::ChilledWater,
            PlantSizing::new(LoopType::Cooling, f_to_c(44.0), delta_r_to_k(10.1)),
        );
        let hw = model.add_plant_loop(
            "Hot Water Loop",
            LoopRole::HotWater,
            PlantSizing::new(LoopType::Heating, f_to_c(180.0), delta_r_to_k(20.0)),
        );
        let a = model.add_zone(ZoneSpec::new("A")).unwrap();
        let b = model.add_zone(ZoneSpec::new("B")).unwrap();
        let config = FanCoilConfig {
            hot_water_loop: Some(hw),
            ..FanCoilConfig::default()
        };
        let units = add_fan_coils(&mut model, &[a, b], chw, &config).unwrap();

        assert_eq!(units.len(), 2);
        assert_eq!(model.plant_loop(chw).unwrap().demand.branches.len(), 2);
        assert_eq!(model.plant_loop(hw).unwrap().demand.branches.len(), 2);
        let unit = model.zone_hvac(units[0]).unwrap();
        assert_eq!(unit.capacity_control, Some(FanCoilCapacityControl::CyclingFan));
        assert_eq!(model.equipment(unit.fan.unwrap()).unwrap().class(), "Fan:OnOff");
    }

    #[test]
    fn variable_fan_modes_get_variable_fans() {
        assert_eq!(fan_kind(FanCoilCapacityControl::VariableFanVariableFlow), FanKind::VariableVolume);
        assert_eq!(fan_kind(FanCoilCapacityControl::VariableFanConstantFlow), FanKind::VariableVolume);
        assert_eq!(fan_kind(FanCoilCapacityControl::ConstantFanVariableFlow), FanKind::ConstantVolume);
    }
}
