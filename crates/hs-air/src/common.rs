//! Supply-path assembly and zone bookkeeping shared by the air system
//! builders.

use hs_components::{
    CoolingCoilParams, DesignTemperature, DesignTemperatureTable, EquipmentFactory, FanParams,
    HeatRecoveryParams, HeatingCoilParams, HumidifierParams, set_effectiveness,
};
use hs_controls::{EconomizerType, OutdoorAirController, SetpointManager};
use hs_core::{AirLoopId, EquipId, HsResult, LoopId, ZoneId, c_to_f};
use hs_model::{
    AirSlot, Attachment, EquipmentKind, Model, ScheduleTypeLimits, SpmOwner, SupplyEnd,
    TerminalKind, TerminalSpec,
};
use tracing::debug;

/// Humidity-ratio limits of the multizone minimum-humidity setpoint.
const MIN_HUMIDITY_RATIO: f64 = 0.005;
const MAX_HUMIDITY_RATIO: f64 = 0.012;

/// What heats an air stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirHeating {
    HotWater(LoopId),
    Gas,
    Electric,
    /// DX heat pump with electric supplemental heat downstream of the fan.
    HeatPump,
}

impl AirHeating {
    /// Coil rated for a central system.
    pub fn coil(self, temps: &DesignTemperatureTable) -> HeatingCoilParams {
        match self {
            AirHeating::HotWater(id) => HeatingCoilParams::water(Some(id), temps),
            AirHeating::Gas => HeatingCoilParams::gas(),
            AirHeating::Electric => HeatingCoilParams::Electric,
            AirHeating::HeatPump => HeatingCoilParams::dx_heat_pump(),
        }
    }

    /// Coil rated as terminal reheat.
    pub fn reheat_coil(self, temps: &DesignTemperatureTable) -> HeatingCoilParams {
        match self {
            AirHeating::HotWater(id) => HeatingCoilParams::water_reheat(Some(id), temps),
            other => other.coil(temps),
        }
    }

    pub fn needs_supplemental(self) -> bool {
        self == AirHeating::HeatPump
    }
}

/// What cools an air stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirCooling {
    ChilledWater(LoopId),
    Dx,
    DxTwoSpeed,
}

impl AirCooling {
    pub fn coil(self, temps: &DesignTemperatureTable) -> CoolingCoilParams {
        match self {
            AirCooling::ChilledWater(id) => CoolingCoilParams::water(Some(id), temps),
            AirCooling::Dx => CoolingCoilParams::dx(),
            AirCooling::DxTwoSpeed => CoolingCoilParams::dx_two_speed(),
        }
    }
}

/// Equipment on an air loop's supply path.
#[derive(Debug, Clone)]
pub struct SupplyTrain {
    pub fan: FanParams,
    pub heating: Option<AirHeating>,
    pub cooling: Option<AirCooling>,
    pub outdoor_air: bool,
    pub economizer: EconomizerType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplyEquipment {
    pub fan: EquipId,
    pub heating_coil: Option<EquipId>,
    pub cooling_coil: Option<EquipId>,
    pub supplemental_heating_coil: Option<EquipId>,
    pub mixer: Option<EquipId>,
}

pub(crate) fn air_loop_name(model: &Model, air: AirLoopId) -> HsResult<String> {
    Ok(model.air_loop(air)?.name.clone())
}

/// Build the supply path. Every piece goes in at the supply inlet, so the
/// finished order is outdoor-air mixer, cooling coil, heating coil, fan,
/// then any supplemental heating coil at the outlet.
pub(crate) fn add_supply_train(
    model: &mut Model,
    air: AirLoopId,
    train: &SupplyTrain,
    temps: &DesignTemperatureTable,
) -> HsResult<SupplyEquipment> {
    let name = air_loop_name(model, air)?;

    let fan = train.fan.add(model, &format!("{name} Fan"))?;
    model.add_air_supply_equipment(air, fan, AirSlot::SupplyFan, SupplyEnd::Inlet)?;

    let heating_coil = match train.heating {
        Some(heating) => {
            let coil = heating.coil(temps).add(model, &format!("{name} Heating Coil"))?;
            model.add_air_supply_equipment(air, coil, AirSlot::HeatingCoil, SupplyEnd::Inlet)?;
            Some(coil)
        }
        None => None,
    };

    let cooling_coil = match train.cooling {
        Some(cooling) => {
            let coil = cooling.coil(temps).add(model, &format!("{name} Cooling Coil"))?;
            model.add_air_supply_equipment(air, coil, AirSlot::CoolingCoil, SupplyEnd::Inlet)?;
            Some(coil)
        }
        None => None,
    };

    let supplemental_heating_coil = if train.heating.is_some_and(AirHeating::needs_supplemental) {
        let coil = HeatingCoilParams::Electric.add(model, &format!("{name} Supplemental Heating Coil"))?;
        model.add_air_supply_equipment(air, coil, AirSlot::SupplementalHeatingCoil, SupplyEnd::Outlet)?;
        Some(coil)
    } else {
        None
    };

    let mixer = if train.outdoor_air {
        let mut controller = OutdoorAirController::new(format!("{name} OA Controller"));
        controller.set_economizer(train.economizer);
        Some(model.add_outdoor_air_system(air, controller)?)
    } else {
        None
    };

    debug!(air_loop = %name, outdoor_air = train.outdoor_air, "assembled supply path");
    Ok(SupplyEquipment {
        fan,
        heating_coil,
        cooling_coil,
        supplemental_heating_coil,
        mixer,
    })
}

/// Central sizing temperatures from the design table.
pub(crate) fn apply_air_loop_sizing(model: &mut Model, air: AirLoopId, temps: &DesignTemperatureTable) -> HsResult<()> {
    let sizing = &mut model.air_loop_mut(air)?.sizing;
    sizing.preheat_c = temps.celsius(DesignTemperature::Preheat);
    sizing.precool_c = temps.celsius(DesignTemperature::Precool);
    sizing.central_heating_supply_c = temps.celsius(DesignTemperature::Heating);
    sizing.central_cooling_supply_c = temps.celsius(DesignTemperature::Cooling);
    Ok(())
}

/// Zone supply-air temperatures from the design table. Without these the
/// zone heating design temperature defaults low enough for autosizing to
/// size heating capacity to zero.
pub(crate) fn apply_zone_sizing(model: &mut Model, zone: ZoneId, temps: &DesignTemperatureTable) -> HsResult<()> {
    let sizing = &mut model.zone_mut(zone)?.sizing;
    sizing.cooling_design_supply_air_c = temps.celsius(DesignTemperature::ZoneCooling);
    sizing.heating_design_supply_air_c = temps.celsius(DesignTemperature::ZoneHeating);
    Ok(())
}

/// Constant supply-air temperature setpoint on the supply outlet.
pub(crate) fn add_scheduled_supply_setpoint(model: &mut Model, air: AirLoopId, temp_c: f64) -> HsResult<()> {
    let name = air_loop_name(model, air)?;
    let schedule = model.get_or_add_constant_schedule(
        &format!("Supply Air Temp - {:.0}F", c_to_f(temp_c)),
        ScheduleTypeLimits::Temperature,
        temp_c,
    );
    let node = model.air_loop(air)?.supply_outlet;
    model.add_setpoint_manager(
        SpmOwner::AirLoop(air),
        SetpointManager::scheduled(format!("{name} SAT Setpoint Manager"), schedule, node),
    )?;
    Ok(())
}

/// One air loop dedicated to `zone`, named `"{zone} {label}"`, with a
/// single-zone reheat setpoint that tracks the zone's load.
pub(crate) fn add_single_zone_loop(
    model: &mut Model,
    zone: ZoneId,
    label: &str,
    train: &SupplyTrain,
    terminal: TerminalKind,
    temps: &DesignTemperatureTable,
) -> HsResult<AirLoopId> {
    let zone_name = model.zone(zone)?.name.clone();
    let air = model.add_air_loop(&format!("{zone_name} {label}"));
    apply_air_loop_sizing(model, air, temps)?;
    add_supply_train(model, air, train, temps)?;

    let name = air_loop_name(model, air)?;
    let node = model.air_loop(air)?.supply_outlet;
    let spm = SetpointManager::single_zone_reheat(
        format!("{name} SZ Reheat Setpoint Manager"),
        node,
        zone,
        temps.celsius(DesignTemperature::Cooling),
        temps.celsius(DesignTemperature::ZoneHeating),
    )?;
    model.add_setpoint_manager(SpmOwner::AirLoop(air), spm)?;
    model.add_terminal(air, zone, TerminalSpec::new(terminal))?;
    apply_zone_sizing(model, zone, temps)?;
    Ok(air)
}

/// Sum of the design outdoor-air requirement over `zones`.
pub fn total_outdoor_air(model: &Model, zones: &[ZoneId]) -> HsResult<f64> {
    zones
        .iter()
        .map(|&z| model.zone(z).map(|zone| zone.outdoor_air_m3ps))
        .sum()
}

/// Put a sensible and latent exchanger on the outdoor-air stream, or retune
/// the one already there. A new exchanger gets a mixed-air setpoint on its
/// outlet so it can be modulated against the supply outlet setpoint.
pub fn attach_heat_recovery(model: &mut Model, air: AirLoopId, params: &HeatRecoveryParams) -> HsResult<EquipId> {
    if let Some(hx) = model.air_loop(air)?.heat_recovery() {
        if let EquipmentKind::AirHeatRecovery(spec) = &mut model.equipment_mut(hx)?.kind {
            set_effectiveness(spec, params.sensible_effectiveness, params.latent_effectiveness)?;
        }
        debug!(air_loop = %air_loop_name(model, air)?, "retuned heat recovery");
        return Ok(hx);
    }

    let name = format!("{} Heat Recovery", air_loop_name(model, air)?);
    let hx = params.add(model, &name)?;
    model.add_heat_recovery(air, hx)?;
    let (_, outlet) = model.equipment_nodes(hx, Attachment::OutdoorAirStream(air))?;
    let reference = model.air_loop(air)?.supply_outlet;
    model.add_setpoint_manager(
        SpmOwner::AirLoop(air),
        SetpointManager::mixed_air(format!("{name} Setpoint Manager"), outlet, reference),
    )?;
    Ok(hx)
}

/// Electric steam humidifier at the supply outlet with a multizone
/// minimum-humidity setpoint. Returns the existing humidifier if present.
pub fn add_humidifier(model: &mut Model, air: AirLoopId) -> HsResult<EquipId> {
    if let Some(existing) = model.air_loop(air)?.humidifier {
        return Ok(existing);
    }
    let name = air_loop_name(model, air)?;
    let humidifier = HumidifierParams.add(model, &format!("{name} Humidifier"))?;
    model.add_air_supply_equipment(air, humidifier, AirSlot::Humidifier, SupplyEnd::Outlet)?;
    let node = model.air_loop(air)?.supply_outlet;
    let spm = SetpointManager::multizone_humidity_minimum(
        format!("{name} Humidity Setpoint Manager"),
        node,
        MIN_HUMIDITY_RATIO,
        MAX_HUMIDITY_RATIO,
    )?;
    model.add_setpoint_manager(SpmOwner::AirLoop(air), spm)?;
    Ok(humidifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_components::{FanArchetype, Vintage};
    use hs_model::ZoneSpec;

    fn train(outdoor_air: bool) -> SupplyTrain {
        SupplyTrain {
            fan: FanParams::new(FanArchetype::VavSupply, Vintage::Ashrae2019),
            heating: Some(AirHeating::Gas),
            cooling: Some(AirCooling::Dx),
            outdoor_air,
            economizer: EconomizerType::NoEconomizer,
        }
    }

    #[test]
    fn supply_path_runs_mixer_cooling_heating_fan() {
        let mut model = Model::new();
        let air = model.add_air_loop("AHU");
        let temps = DesignTemperatureTable::standard();
        let parts = add_supply_train(&mut model, air, &train(true), &temps).unwrap();

        let order: Vec<_> = model.air_loop(air).unwrap().supply.equipment().collect();
        assert_eq!(
            order,
            vec![
                parts.mixer.unwrap(),
                parts.cooling_coil.unwrap(),
                parts.heating_coil.unwrap(),
                parts.fan
            ]
        );
    }

    #[test]
    fn heat_pump_gets_supplemental_coil_after_fan() {
        let mut model = Model::new();
        let air = model.add_air_loop("PSZ-HP");
        let mut hp = train(false);
        hp.heating = Some(AirHeating::HeatPump);
        let parts = add_supply_train(&mut model, air, &hp, &DesignTemperatureTable::standard()).unwrap();

        let order: Vec<_> = model.air_loop(air).unwrap().supply.equipment().collect();
        assert_eq!(order.last().copied(), parts.supplemental_heating_coil);
        assert!(parts.mixer.is_none());
    }

    #[test]
    fn heat_recovery_is_reused_and_retuned() {
        let mut model = Model::new();
        let air = model.add_air_loop("DOAS");
        add_supply_train(&mut model, air, &train(true), &DesignTemperatureTable::standard()).unwrap();

        let first = attach_heat_recovery(&mut model, air, &HeatRecoveryParams::default()).unwrap();
        let second =
            attach_heat_recovery(&mut model, air, &HeatRecoveryParams::default().with_effectiveness(0.8, 0.0))
                .unwrap();
        assert_eq!(first, second);
        let EquipmentKind::AirHeatRecovery(spec) = &model.equipment(first).unwrap().kind else {
            panic!("expected heat recovery");
        };
        assert_eq!(spec.sensible_cooling_75, 0.8);
        assert_eq!(spec.latent_heating_100, 0.0);
        assert_eq!(model.air_loop(air).unwrap().setpoint_managers.len(), 1);
    }

    #[test]
    fn heat_recovery_without_outdoor_air_is_an_error() {
        let mut model = Model::new();
        let air = model.add_air_loop("AHU");
        add_supply_train(&mut model, air, &train(false), &DesignTemperatureTable::standard()).unwrap();
        assert!(attach_heat_recovery(&mut model, air, &HeatRecoveryParams::default()).is_err());
    }

    #[test]
    fn outdoor_air_sums_over_zones() {
        let mut model = Model::new();
        let a = model.add_zone(ZoneSpec::new("A").with_outdoor_air(0.1)).unwrap();
        let b = model.add_zone(ZoneSpec::new("B").with_outdoor_air(0.25)).unwrap();
        assert!((total_outdoor_air(&model, &[a, b]).unwrap() - 0.35).abs() < 1e-12);
        assert_eq!(total_outdoor_air(&model, &[]).unwrap(), 0.0);
    }
}
