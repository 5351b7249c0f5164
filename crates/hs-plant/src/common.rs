//! Pieces every loop builder shares: pumps, closure pipes and the supply
//! outlet setpoint.

use hs_components::{EquipmentFactory, PipeParams, PumpParams};
use hs_controls::SetpointManager;
use hs_core::{EquipId, HsResult, LoopId, SpmId, c_to_f};
use hs_model::{Model, ScheduleTypeLimits, SpmOwner};

pub(crate) fn loop_name(model: &Model, id: LoopId) -> HsResult<String> {
    Ok(model.plant_loop(id)?.name.clone())
}

/// Add a pump to the supply inlet header.
pub(crate) fn add_supply_pump(model: &mut Model, id: LoopId, params: &PumpParams, label: &str) -> HsResult<EquipId> {
    let name = loop_name(model, id)?;
    let pump = params.add(model, &format!("{name} {label}"))?;
    model.add_supply_inlet_equipment(id, pump)?;
    Ok(pump)
}

fn pipe(model: &mut Model, name: String) -> HsResult<EquipId> {
    PipeParams.add(model, &name)
}

/// Bypass branches on both sides plus the header pipes a closed loop needs.
/// Headers that already hold equipment are left as they are.
pub(crate) fn add_closure_pipes(model: &mut Model, id: LoopId) -> HsResult<()> {
    let name = loop_name(model, id)?;

    let bypass = pipe(model, format!("{name} Supply Bypass"))?;
    model.add_supply_branch(id, &[bypass])?;
    if model.plant_loop(id)?.supply.outlet_series.is_empty() {
        let outlet = pipe(model, format!("{name} Supply Outlet"))?;
        model.add_supply_outlet_equipment(id, outlet)?;
    }

    if model.plant_loop(id)?.demand.inlet_series.is_empty() {
        let inlet = pipe(model, format!("{name} Demand Inlet"))?;
        model.add_demand_inlet_equipment(id, inlet)?;
    }
    let bypass = pipe(model, format!("{name} Demand Bypass"))?;
    model.add_demand_branch(id, &[bypass])?;
    let outlet = pipe(model, format!("{name} Demand Outlet"))?;
    model.add_demand_outlet_equipment(id, outlet)?;
    Ok(())
}

/// Name of a constant loop temperature schedule, e.g.
/// `Hot Water Loop Temp - 180F`.
pub(crate) fn temperature_schedule_name(canonical: &str, temp_c: f64) -> String {
    format!("{canonical} Temp - {:.0}F", c_to_f(temp_c))
}

/// Constant-temperature setpoint on the supply outlet node.
pub(crate) fn add_scheduled_setpoint(
    model: &mut Model,
    id: LoopId,
    canonical: &str,
    temp_c: f64,
) -> HsResult<SpmId> {
    let schedule = model.get_or_add_constant_schedule(
        &temperature_schedule_name(canonical, temp_c),
        ScheduleTypeLimits::Temperature,
        temp_c,
    );
    let plant = model.plant_loop(id)?;
    let spm = SetpointManager::scheduled(
        format!("{} Setpoint Manager", plant.name),
        schedule,
        plant.supply.outlet,
    );
    model.add_setpoint_manager(SpmOwner::PlantLoop(id), spm)
}

/// Dual setpoint on the supply outlet node, for loops that float between a
/// heating and a cooling limit.
pub(crate) fn add_dual_setpoint(
    model: &mut Model,
    id: LoopId,
    canonical: &str,
    low_c: f64,
    high_c: f64,
) -> HsResult<SpmId> {
    let high = model.get_or_add_constant_schedule(
        &format!("{canonical} High Temp - {:.0}F", c_to_f(high_c)),
        ScheduleTypeLimits::Temperature,
        high_c,
    );
    let low = model.get_or_add_constant_schedule(
        &format!("{canonical} Low Temp - {:.0}F", c_to_f(low_c)),
        ScheduleTypeLimits::Temperature,
        low_c,
    );
    let plant = model.plant_loop(id)?;
    let spm = SetpointManager::scheduled_dual(
        format!("{} Setpoint Manager", plant.name),
        high,
        low,
        plant.supply.outlet,
    );
    model.add_setpoint_manager(SpmOwner::PlantLoop(id), spm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_core::f_to_c;

    #[test]
    fn schedule_names_carry_fahrenheit() {
        assert_eq!(
            temperature_schedule_name("Hot Water Loop", f_to_c(180.0)),
            "Hot Water Loop Temp - 180F"
        );
        assert_eq!(
            temperature_schedule_name("Chilled Water Loop", f_to_c(44.0)),
            "Chilled Water Loop Temp - 44F"
        );
    }
}
