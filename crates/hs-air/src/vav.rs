//! Multizone variable-air-volume systems, central (VAV) and packaged (PVAV).
//!
//! Both build one air loop serving every zone passed in, with a VAV supply
//! fan and one terminal per zone. They differ in the default cooling coil
//! and in what the caller usually hands them for heating.

use hs_components::{
    DesignTemperature, DesignTemperatureTable, EquipmentFactory, FanArchetype, FanParams,
    HeatRecoveryParams, Vintage,
};
use hs_controls::{EconomizerType, SetpointManager};
use hs_core::{AirLoopId, HsResult, ScheduleId, ZoneId, f_to_c};
use hs_model::{
    DamperHeatingAction, Model, NightCycle, SpmOwner, TerminalKind, TerminalSpec,
    VAV_MIN_FLOW_FRACTION,
};
use tracing::info;

use crate::common::{
    AirCooling, AirHeating, SupplyTrain, add_scheduled_supply_setpoint, add_supply_train,
    air_loop_name, apply_air_loop_sizing, apply_zone_sizing, attach_heat_recovery,
};

/// Upper limit of the warmest-zone supply air reset.
const RESET_MAX_SUPPLY_F: f64 = 60.0;

/// Terminal placed in each zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VavTerminal {
    Reheat(AirHeating),
    NoReheat,
    ParallelFanPowered(AirHeating),
}

impl VavTerminal {
    fn kind(self) -> TerminalKind {
        match self {
            VavTerminal::Reheat(_) => TerminalKind::VavReheat,
            VavTerminal::NoReheat => TerminalKind::VavNoReheat,
            VavTerminal::ParallelFanPowered(_) => TerminalKind::ParallelFanPoweredReheat,
        }
    }

    fn reheat(self) -> Option<AirHeating> {
        match self {
            VavTerminal::Reheat(h) | VavTerminal::ParallelFanPowered(h) => Some(h),
            VavTerminal::NoReheat => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VavConfig {
    pub name: String,
    pub heating: Option<AirHeating>,
    pub cooling: AirCooling,
    pub terminal: VavTerminal,
    /// Terminal minimum airflow as a fraction of design flow.
    pub min_flow_fraction: f64,
    /// Reset the supply air temperature to the warmest zone instead of
    /// holding it constant.
    pub supply_air_reset: bool,
    pub outdoor_air: bool,
    pub economizer: EconomizerType,
    pub heat_recovery: Option<HeatRecoveryParams>,
    pub night_cycle: NightCycle,
    pub availability: Option<ScheduleId>,
    pub vintage: Vintage,
}

impl Default for VavConfig {
    fn default() -> Self {
        Self {
            name: "VAV System".to_string(),
            heating: Some(AirHeating::Gas),
            cooling: AirCooling::Dx,
            terminal: VavTerminal::Reheat(AirHeating::Electric),
            min_flow_fraction: VAV_MIN_FLOW_FRACTION,
            supply_air_reset: false,
            outdoor_air: true,
            economizer: EconomizerType::NoEconomizer,
            heat_recovery: None,
            night_cycle: NightCycle::CycleOnAny,
            availability: None,
            vintage: Vintage::default(),
        }
    }
}

/// Packaged VAV: two-speed DX cooling and a VAV fan in one rooftop unit.
#[derive(Debug, Clone, PartialEq)]
pub struct PvavConfig {
    pub name: String,
    pub heating: Option<AirHeating>,
    pub cooling: AirCooling,
    pub terminal: VavTerminal,
    pub min_flow_fraction: f64,
    pub outdoor_air: bool,
    pub economizer: EconomizerType,
    pub night_cycle: NightCycle,
    pub availability: Option<ScheduleId>,
    pub vintage: Vintage,
}

impl Default for PvavConfig {
    fn default() -> Self {
        Self {
            name: "PVAV System".to_string(),
            heating: Some(AirHeating::Gas),
            cooling: AirCooling::DxTwoSpeed,
            terminal: VavTerminal::Reheat(AirHeating::Electric),
            min_flow_fraction: VAV_MIN_FLOW_FRACTION,
            outdoor_air: true,
            economizer: EconomizerType::NoEconomizer,
            night_cycle: NightCycle::CycleOnAny,
            availability: None,
            vintage: Vintage::default(),
        }
    }
}

impl From<&PvavConfig> for VavConfig {
    fn from(p: &PvavConfig) -> Self {
        VavConfig {
            name: p.name.clone(),
            heating: p.heating,
            cooling: p.cooling,
            terminal: p.terminal,
            min_flow_fraction: p.min_flow_fraction,
            supply_air_reset: false,
            outdoor_air: p.outdoor_air,
            economizer: p.economizer,
            heat_recovery: None,
            night_cycle: p.night_cycle,
            availability: p.availability,
            vintage: p.vintage,
        }
    }
}

/// Build a central VAV system serving `zones`.
pub fn add_vav(model: &mut Model, zones: &[ZoneId], config: &VavConfig) -> HsResult<AirLoopId> {
    let air = build_multizone(model, zones, config)?;
    info!(air_loop = %air_loop_name(model, air)?, zones = zones.len(), "built VAV system");
    Ok(air)
}

/// Build a packaged VAV system serving `zones`.
pub fn add_pvav(model: &mut Model, zones: &[ZoneId], config: &PvavConfig) -> HsResult<AirLoopId> {
    let air = build_multizone(model, zones, &VavConfig::from(config))?;
    info!(air_loop = %air_loop_name(model, air)?, zones = zones.len(), "built PVAV system");
    Ok(air)
}

fn build_multizone(model: &mut Model, zones: &[ZoneId], config: &VavConfig) -> HsResult<AirLoopId> {
    let temps = DesignTemperatureTable::standard();
    let air = model.add_air_loop(&config.name);
    apply_air_loop_sizing(model, air, &temps)?;
    {
        let air_loop = model.air_loop_mut(air)?;
        air_loop.night_cycle = config.night_cycle;
        air_loop.availability = config.availability;
        air_loop.sizing.min_system_air_flow_ratio = config.min_flow_fraction;
    }

    let train = SupplyTrain {
        fan: FanParams::new(FanArchetype::VavSupply, config.vintage),
        heating: config.heating,
        cooling: Some(config.cooling),
        outdoor_air: config.outdoor_air,
        economizer: config.economizer,
    };
    add_supply_train(model, air, &train, &temps)?;

    let cooling_c = temps.celsius(DesignTemperature::Cooling);
    if config.supply_air_reset {
        let name = air_loop_name(model, air)?;
        let node = model.air_loop(air)?.supply_outlet;
        let spm = SetpointManager::warmest(
            format!("{name} SAT Warmest Reset"),
            node,
            cooling_c,
            f_to_c(RESET_MAX_SUPPLY_F),
        )?;
        model.add_setpoint_manager(SpmOwner::AirLoop(air), spm)?;
    } else {
        add_scheduled_supply_setpoint(model, air, cooling_c)?;
    }

    if let (true, Some(hx)) = (config.outdoor_air, &config.heat_recovery) {
        attach_heat_recovery(model, air, hx)?;
    }

    for &zone in zones {
        add_vav_terminal(model, air, zone, config, &temps)?;
    }
    Ok(air)
}

fn add_vav_terminal(
    model: &mut Model,
    air: AirLoopId,
    zone: ZoneId,
    config: &VavConfig,
    temps: &DesignTemperatureTable,
) -> HsResult<()> {
    let zone_name = model.zone(zone)?.name.clone();
    let mut spec = TerminalSpec::new(config.terminal.kind()).with_min_flow_fraction(config.min_flow_fraction);

    if let Some(reheat) = config.terminal.reheat() {
        let coil = reheat
            .reheat_coil(temps)
            .add(model, &format!("{zone_name} Reheat Coil"))?;
        spec = spec
            .with_reheat_coil(coil)
            .with_max_reheat_air(temps.celsius(DesignTemperature::ZoneHeating));
    }
    match config.terminal {
        VavTerminal::Reheat(_) => {
            spec = spec.with_damper_action(DamperHeatingAction::SingleMaximum);
        }
        VavTerminal::ParallelFanPowered(_) => {
            let fan = FanParams::new(FanArchetype::FanPoweredBox, config.vintage)
                .add(model, &format!("{zone_name} PFP Fan"))?;
            spec = spec.with_fan(fan);
        }
        VavTerminal::NoReheat => {}
    }
    model.add_terminal(air, zone, spec)?;

    apply_zone_sizing(model, zone, temps)?;
    model.zone_mut(zone)?.sizing.cooling_min_air_flow_fraction = config.min_flow_fraction;
    Ok(())
}
