//! Dedicated outdoor-air systems.
//!
//! A DOAS is sized on the zones' ventilation requirement alone and runs on
//! 100 % outdoor air, so it is refused outright when the zones ask for none.

use hs_components::{
    DesignTemperature, DesignTemperatureTable, FanArchetype, FanParams, HeatRecoveryParams, Vintage,
};
use hs_controls::{EconomizerType, SetpointManager};
use hs_core::{AirLoopId, HsResult, ScheduleId, ZoneId, f_to_c};
use hs_model::{DoasControlStrategy, Model, SizingLoad, SpmOwner, TerminalKind, TerminalSpec};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::common::{
    AirCooling, AirHeating, SupplyTrain, add_scheduled_supply_setpoint, add_supply_train,
    air_loop_name, apply_air_loop_sizing, apply_zone_sizing, attach_heat_recovery, total_outdoor_air,
};

/// Supply air condition delivered to the zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DoasSupply {
    /// Near room-neutral air, reset against outdoor temperature.
    #[default]
    Neutral,
    /// Cold, dehumidified air at the cooling design temperature.
    Cold,
}

impl DoasSupply {
    fn strategy(self) -> DoasControlStrategy {
        match self {
            DoasSupply::Neutral => DoasControlStrategy::NeutralSupplyAir,
            DoasSupply::Cold => DoasControlStrategy::ColdSupplyAir,
        }
    }

    /// Low and high zone-sizing setpoints, °F.
    fn zone_setpoints_f(self) -> (f64, f64) {
        match self {
            DoasSupply::Neutral => (70.0, 75.0),
            DoasSupply::Cold => (55.0, 58.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoasConfig {
    pub name: String,
    pub heating: Option<AirHeating>,
    pub cooling: Option<AirCooling>,
    pub heat_recovery: Option<HeatRecoveryParams>,
    pub supply: DoasSupply,
    pub economizer: EconomizerType,
    pub availability: Option<ScheduleId>,
    pub vintage: Vintage,
}

impl Default for DoasConfig {
    fn default() -> Self {
        Self {
            name: "DOAS".to_string(),
            heating: Some(AirHeating::Gas),
            cooling: Some(AirCooling::Dx),
            heat_recovery: Some(HeatRecoveryParams::default()),
            supply: DoasSupply::Neutral,
            economizer: EconomizerType::NoEconomizer,
            availability: None,
            vintage: Vintage::default(),
        }
    }
}

/// Build a DOAS serving `zones`. Returns `None` without touching the model
/// when the zones' combined outdoor-air requirement is zero.
pub fn add_doas(model: &mut Model, zones: &[ZoneId], config: &DoasConfig) -> HsResult<Option<AirLoopId>> {
    let outdoor_air = total_outdoor_air(model, zones)?;
    if outdoor_air <= 0.0 {
        warn!(
            system = %config.name,
            zones = zones.len(),
            "zones have no outdoor air requirement, DOAS not added"
        );
        return Ok(None);
    }

    let temps = DesignTemperatureTable::standard();
    let air = model.add_air_loop(&config.name);
    apply_air_loop_sizing(model, air, &temps)?;
    {
        let air_loop = model.air_loop_mut(air)?;
        air_loop.dedicated_outdoor_air = true;
        air_loop.availability = config.availability;
        let sizing = &mut air_loop.sizing;
        sizing.load_to_size_on = SizingLoad::VentilationRequirement;
        sizing.all_outdoor_air_cooling = true;
        sizing.all_outdoor_air_heating = true;
        sizing.min_system_air_flow_ratio = 1.0;
    }

    let train = SupplyTrain {
        fan: FanParams::new(FanArchetype::DedicatedOutdoorAir, config.vintage),
        heating: config.heating,
        cooling: config.cooling,
        outdoor_air: true,
        economizer: config.economizer,
    };
    add_supply_train(model, air, &train, &temps)?;
    let always_on = model.always_on();
    {
        let controller = model.outdoor_air_controller_mut(air)?;
        controller.minimum_fraction_schedule = Some(always_on);
        controller.maximum_fraction_schedule = Some(always_on);
    }

    match config.supply {
        DoasSupply::Neutral => {
            let name = air_loop_name(model, air)?;
            let node = model.air_loop(air)?.supply_outlet;
            let spm = SetpointManager::outdoor_air_reset(
                format!("{name} SAT Reset"),
                node,
                (f_to_c(70.0), f_to_c(60.0)),
                (f_to_c(60.0), f_to_c(70.0)),
            )?;
            model.add_setpoint_manager(SpmOwner::AirLoop(air), spm)?;
        }
        DoasSupply::Cold => {
            add_scheduled_supply_setpoint(model, air, temps.celsius(DesignTemperature::Cooling))?;
        }
    }

    if let Some(hx) = &config.heat_recovery {
        attach_heat_recovery(model, air, hx)?;
    }

    let (low_f, high_f) = config.supply.zone_setpoints_f();
    for &zone in zones {
        model.add_terminal(air, zone, TerminalSpec::new(TerminalKind::DoasSingleDuct))?;
        apply_zone_sizing(model, zone, &temps)?;
        let sizing = &mut model.zone_mut(zone)?.sizing;
        sizing.account_for_doas = true;
        sizing.doas_control_strategy = config.supply.strategy();
        sizing.doas_low_setpoint_c = f_to_c(low_f);
        sizing.doas_high_setpoint_c = f_to_c(high_f);
    }

    info!(
        air_loop = %air_loop_name(model, air)?,
        zones = zones.len(),
        outdoor_air_m3ps = outdoor_air,
        "built DOAS"
    );
    Ok(Some(air))
}
