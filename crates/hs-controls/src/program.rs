//! Minimal embedded control programs.
//!
//! A program reads one node sensor and writes one schedule actuator. The only
//! program the synthesizer emits is the linear outlet-temperature block that
//! stands in for a ground-coupling model.

use hs_core::{NodeId, ScheduleId};

use crate::error::{ControlError, ControlResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramSensor {
    pub name: String,
    pub node: NodeId,
    pub variable: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramActuator {
    pub name: String,
    pub schedule: ScheduleId,
    pub control: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlProgram {
    pub name: String,
    pub sensor: ProgramSensor,
    pub actuator: ProgramActuator,
    pub lines: Vec<String>,
}

/// Outlet temperature as `slope * inlet + intercept` (°C).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearOutletProgram {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearOutletProgram {
    /// Fit the line through two entering conditions, each given as an inlet
    /// temperature and the outlet-minus-inlet delta at that inlet.
    pub fn from_entering_conditions(
        (high_inlet_c, high_delta_k): (f64, f64),
        (low_inlet_c, low_delta_k): (f64, f64),
    ) -> ControlResult<Self> {
        let span = high_inlet_c - low_inlet_c;
        if !span.is_finite() || span <= 0.0 {
            return Err(ControlError::InvalidRange {
                what: "entering temperature",
                low: low_inlet_c,
                high: high_inlet_c,
            });
        }
        let high_outlet = high_inlet_c + high_delta_k;
        let low_outlet = low_inlet_c + low_delta_k;
        let slope = (high_outlet - low_outlet) / span;
        let intercept = high_outlet - slope * high_inlet_c;
        Ok(Self { slope, intercept })
    }

    pub fn evaluate(&self, inlet_c: f64) -> f64 {
        self.slope * inlet_c + self.intercept
    }

    /// Emit the two-line program body reading `sensor` and writing `actuator`.
    pub fn into_program(
        self,
        name: impl Into<String>,
        sensor: ProgramSensor,
        actuator: ProgramActuator,
    ) -> ControlProgram {
        let tin = "Tin";
        let lines = vec![
            format!("SET {tin} = {}", program_ident(&sensor.name)),
            format!(
                "SET {} = {:.6} * {tin} + {:.6}",
                program_ident(&actuator.name),
                self.slope,
                self.intercept
            ),
        ];
        ControlProgram {
            name: name.into(),
            sensor,
            actuator,
            lines,
        }
    }
}

/// Program identifiers cannot contain spaces or dashes.
pub fn program_ident(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_core::Id;

    #[test]
    fn line_passes_through_both_conditions() {
        let prog = LinearOutletProgram::from_entering_conditions((35.0, -5.6), (4.4, 2.8)).unwrap();
        assert!((prog.evaluate(35.0) - 29.4).abs() < 1e-9);
        assert!((prog.evaluate(4.4) - 7.2).abs() < 1e-9);
    }

    #[test]
    fn rejects_inverted_conditions() {
        assert!(LinearOutletProgram::from_entering_conditions((4.0, 1.0), (30.0, -1.0)).is_err());
    }

    #[test]
    fn program_has_two_lines() {
        let prog = LinearOutletProgram {
            slope: 0.5,
            intercept: 10.0,
        }
        .into_program(
            "Ground HX Program",
            ProgramSensor {
                name: "Ground HX Inlet Temp".into(),
                node: Id::from_index(0),
                variable: "System Node Temperature",
            },
            ProgramActuator {
                name: "Ground HX Temp Sch Actuator".into(),
                schedule: Id::from_index(0),
                control: "Schedule Value",
            },
        );
        assert_eq!(prog.lines.len(), 2);
        assert_eq!(prog.lines[0], "SET Tin = Ground_HX_Inlet_Temp");
        assert!(prog.lines[1].starts_with("SET Ground_HX_Temp_Sch_Actuator = 0.500000 * Tin"));
    }
}
