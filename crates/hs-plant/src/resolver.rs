//! Get-or-add resolution of shared plant loops.
//!
//! Each loop role has one canonical name. A loop is looked up in the model's
//! loop registry under `(role, canonical name)` before a builder runs, and
//! registered there after it does, so repeated requests share one loop.

use hs_core::{HsResult, LoopId};
use hs_model::{LoopRole, Model};
use tracing::debug;

use crate::ambient::{AmbientLoopConfig, add_ambient_loop};
use crate::chilled_water::{ChilledWaterLoopConfig, add_chilled_water_loop};
use crate::condenser_water::{CondenserWaterLoopConfig, add_condenser_water_loop};
use crate::ground::{GroundLoopConfig, add_ground_loop};
use crate::heat_pump::{HeatPumpLoopConfig, add_heat_pump_loop};
use crate::hot_water::{HotWaterLoopConfig, HotWaterTier, add_hot_water_loop};

fn first_registered(model: &Model, role: LoopRole) -> Option<LoopId> {
    let found = model
        .registered_loops(role, role.canonical_name())
        .first()
        .copied();
    if let Some(id) = found {
        debug!(role = %role, loop_id = %id, "reusing registered loop");
    }
    found
}

fn register(model: &mut Model, role: LoopRole, id: LoopId) -> HsResult<LoopId> {
    model.register_loop(role, role.canonical_name(), id)?;
    Ok(id)
}

/// A registered hot-water loop is reused only if its supply temperature is
/// in the requested tier. Otherwise a second loop is built; the name
/// registry gives it a numeric suffix and it is registered under the same
/// key.
pub fn get_or_add_hot_water_loop(model: &mut Model, config: &HotWaterLoopConfig) -> HsResult<LoopId> {
    let role = LoopRole::HotWater;
    for &id in model.registered_loops(role, role.canonical_name()) {
        let supply_c = model.plant_loop(id)?.sizing.design_exit_temp_c;
        if HotWaterTier::of_supply_c(supply_c) == config.tier {
            debug!(loop_id = %id, tier = %config.tier, "reusing hot water loop");
            return Ok(id);
        }
    }
    let id = add_hot_water_loop(model, role.canonical_name(), config)?;
    register(model, role, id)
}

/// Returns the loop cooling coils connect to, or `None` when the plant
/// cannot be built.
pub fn get_or_add_chilled_water_loop(
    model: &mut Model,
    config: &ChilledWaterLoopConfig,
) -> HsResult<Option<LoopId>> {
    let role = LoopRole::ChilledWater;
    if let Some(id) = first_registered(model, role) {
        return Ok(Some(id));
    }
    let Some(plant) = add_chilled_water_loop(model, role.canonical_name(), config)? else {
        return Ok(None);
    };
    register(model, role, plant.coil_loop).map(Some)
}

pub fn get_or_add_condenser_water_loop(
    model: &mut Model,
    config: &CondenserWaterLoopConfig,
) -> HsResult<LoopId> {
    let role = LoopRole::CondenserWater;
    if let Some(id) = first_registered(model, role) {
        return Ok(id);
    }
    let id = add_condenser_water_loop(model, role.canonical_name(), config)?;
    register(model, role, id)
}

pub fn get_or_add_heat_pump_loop(model: &mut Model, config: &HeatPumpLoopConfig) -> HsResult<LoopId> {
    let role = LoopRole::HeatPump;
    if let Some(id) = first_registered(model, role) {
        return Ok(id);
    }
    let id = add_heat_pump_loop(model, role.canonical_name(), config)?;
    register(model, role, id)
}

pub fn get_or_add_ground_loop(model: &mut Model, config: &GroundLoopConfig) -> HsResult<LoopId> {
    let role = LoopRole::GroundHeatExchanger;
    if let Some(id) = first_registered(model, role) {
        return Ok(id);
    }
    let id = add_ground_loop(model, role.canonical_name(), config)?;
    register(model, role, id)
}

pub fn get_or_add_ambient_loop(model: &mut Model, config: &AmbientLoopConfig) -> HsResult<LoopId> {
    let role = LoopRole::Ambient;
    if let Some(id) = first_registered(model, role) {
        return Ok(id);
    }
    let id = add_ambient_loop(model, role.canonical_name(), config)?;
    register(model, role, id)
}
