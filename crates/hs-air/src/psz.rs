//! Packaged single-zone rooftop units: PSZ-AC, PSZ-HP and PSZ-VAV.
//!
//! One air loop is built per zone. Packaged equipment is reheat limited, so
//! these loops use the single-zone packaged design table (122 °F zone
//! heating supply air) for both the setpoint manager and zone sizing.

use hs_components::{DesignTemperatureTable, FanArchetype, FanParams, HeatRecoveryParams, Vintage};
use hs_controls::EconomizerType;
use hs_core::{AirLoopId, HsResult, ScheduleId, ZoneId};
use hs_model::{FanKind, Model, NightCycle, TerminalKind};
use tracing::info;

use crate::common::{AirCooling, AirHeating, SupplyTrain, add_single_zone_loop, attach_heat_recovery};

#[derive(Debug, Clone, PartialEq)]
pub struct PszConfig {
    pub heating: Option<AirHeating>,
    pub cooling: Option<AirCooling>,
    /// `VariableVolume` makes the unit a PSZ-VAV.
    pub fan: FanKind,
    pub outdoor_air: bool,
    pub economizer: EconomizerType,
    pub heat_recovery: Option<HeatRecoveryParams>,
    pub night_cycle: NightCycle,
    pub availability: Option<ScheduleId>,
    pub vintage: Vintage,
}

impl Default for PszConfig {
    fn default() -> Self {
        Self {
            heating: Some(AirHeating::Gas),
            cooling: Some(AirCooling::Dx),
            fan: FanKind::OnOff,
            outdoor_air: true,
            economizer: EconomizerType::NoEconomizer,
            heat_recovery: None,
            night_cycle: NightCycle::CycleOnAny,
            availability: None,
            vintage: Vintage::default(),
        }
    }
}

impl PszConfig {
    /// Label appended to the zone name to name each loop.
    pub fn label(&self) -> &'static str {
        match (self.heating, self.fan) {
            (Some(AirHeating::HeatPump), _) => "PSZ-HP",
            (_, FanKind::VariableVolume) => "PSZ-VAV",
            _ => "PSZ-AC",
        }
    }
}

/// Build one packaged single-zone loop per zone, in zone order.
pub fn add_psz(model: &mut Model, zones: &[ZoneId], config: &PszConfig) -> HsResult<Vec<AirLoopId>> {
    let temps = DesignTemperatureTable::single_zone_packaged();
    let train = SupplyTrain {
        fan: FanParams::new(FanArchetype::PackagedSingleZone, config.vintage).with_kind(config.fan),
        heating: config.heating,
        cooling: config.cooling,
        outdoor_air: config.outdoor_air,
        economizer: config.economizer,
    };
    let terminal = match config.fan {
        FanKind::VariableVolume => TerminalKind::VavNoReheat,
        _ => TerminalKind::Uncontrolled,
    };

    let mut loops = Vec::with_capacity(zones.len());
    for &zone in zones {
        let air = add_single_zone_loop(model, zone, config.label(), &train, terminal, &temps)?;
        {
            let air_loop = model.air_loop_mut(air)?;
            air_loop.night_cycle = config.night_cycle;
            air_loop.availability = config.availability;
        }
        if let (true, Some(hx)) = (config.outdoor_air, &config.heat_recovery) {
            attach_heat_recovery(model, air, hx)?;
        }
        loops.push(air);
    }
    info!(system = config.label(), air_loops = loops.len(), "built packaged single-zone systems");
    Ok(loops)
}
