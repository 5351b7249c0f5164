//! Ground heat-exchanger loop builder.
//!
//! There is no ground model. A temperature source stands in for the borefield,
//! its outlet written each timestep by a two-line program as a linear function
//! of its inlet temperature.

use hs_components::{EquipmentFactory, PumpParams, TemperatureSourceParams};
use hs_controls::{LinearOutletProgram, ProgramActuator, ProgramSensor};
use hs_core::{HsResult, LoopId, delta_r_to_k, f_to_c};
use hs_model::{Attachment, LoopRole, LoopType, Model, PlantSizing, ScheduleTypeLimits, ScheduleValues};
use tracing::info;

use crate::common::{add_closure_pipes, add_scheduled_setpoint, add_supply_pump};

#[derive(Debug, Clone, PartialEq)]
pub struct GroundLoopConfig {
    /// Entering temperature and outlet-minus-inlet delta in cooling, °F.
    pub high_entering: (f64, f64),
    /// Entering temperature and outlet-minus-inlet delta in heating, °F.
    pub low_entering: (f64, f64),
    pub loop_temp_f: f64,
    pub pump_head_inh2o: f64,
}

impl Default for GroundLoopConfig {
    fn default() -> Self {
        Self {
            high_entering: (95.0, -10.0),
            low_entering: (40.0, 5.0),
            loop_temp_f: 75.0,
            pump_head_inh2o: 720.0,
        }
    }
}

impl GroundLoopConfig {
    pub fn outlet_program(&self) -> HsResult<LinearOutletProgram> {
        let (hi_t, hi_d) = self.high_entering;
        let (lo_t, lo_d) = self.low_entering;
        Ok(LinearOutletProgram::from_entering_conditions(
            (f_to_c(hi_t), delta_r_to_k(hi_d)),
            (f_to_c(lo_t), delta_r_to_k(lo_d)),
        )?)
    }
}

pub fn add_ground_loop(model: &mut Model, name: &str, config: &GroundLoopConfig) -> HsResult<LoopId> {
    let program = config.outlet_program()?;
    let loop_c = f_to_c(config.loop_temp_f);
    let sizing = PlantSizing::new(LoopType::Condenser, loop_c, delta_r_to_k(10.0));
    let id = model.add_plant_loop(name, LoopRole::GroundHeatExchanger, sizing);
    let loop_name = {
        let plant = model.plant_loop_mut(id)?;
        plant.min_temp_c = 5.0;
        plant.max_temp_c = 80.0;
        plant.name.clone()
    };

    add_supply_pump(model, id, &PumpParams::variable(config.pump_head_inh2o), "Pump")?;
    let source_schedule = model.add_schedule(
        &format!("{loop_name} Source Outlet Temp"),
        ScheduleTypeLimits::Temperature,
        ScheduleValues::Constant(loop_c),
    );
    let source = TemperatureSourceParams {
        schedule: source_schedule,
    }
    .add(model, &format!("{loop_name} Ground Source"))?;
    model.add_supply_branch(id, &[source])?;
    add_closure_pipes(model, id)?;
    add_scheduled_setpoint(model, id, LoopRole::GroundHeatExchanger.canonical_name(), loop_c)?;

    let (source_inlet, _) = model.equipment_nodes(source, Attachment::PlantSupply(id))?;
    let sensor = ProgramSensor {
        name: format!("{loop_name} Source Inlet Temp"),
        node: source_inlet,
        variable: "System Node Temperature",
    };
    let actuator = ProgramActuator {
        name: format!("{loop_name} Source Outlet Setpoint"),
        schedule: source_schedule,
        control: "Schedule Value",
    };
    model.add_program(program.into_program(format!("{loop_name} Ground Temperature Program"), sensor, actuator));

    info!(
        plant_loop = %loop_name,
        slope = program.slope,
        intercept_c = program.intercept,
        "built ground heat exchanger loop"
    );
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_passes_through_both_entering_conditions() {
        let prog = GroundLoopConfig::default().outlet_program().unwrap();
        assert!((prog.evaluate(f_to_c(95.0)) - f_to_c(85.0)).abs() < 1e-9);
        assert!((prog.evaluate(f_to_c(40.0)) - f_to_c(45.0)).abs() < 1e-9);
    }

    #[test]
    fn program_reads_the_source_inlet_and_writes_its_schedule() {
        let mut model = Model::new();
        let id = add_ground_loop(&mut model, "Ground HX Loop", &GroundLoopConfig::default()).unwrap();
        let source = model.equipment_by_name("Ground HX Loop Ground Source").unwrap();
        let (inlet, _) = model.equipment_nodes(source, Attachment::PlantSupply(id)).unwrap();

        let program = &model.programs()[0];
        assert_eq!(program.sensor.node, inlet);
        assert_eq!(program.lines.len(), 2);
        assert_eq!(
            model.schedule(program.actuator.schedule).unwrap().name,
            "Ground HX Loop Source Outlet Temp"
        );
        model.topology().unwrap();
    }
}
