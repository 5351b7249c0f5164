//! Schedules referenced by setpoint managers, controllers and availability.

use hs_core::{HsError, HsResult, ScheduleId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleTypeLimits {
    Temperature,
    Fraction,
    OnOff,
    Dimensionless,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleValues {
    Constant(f64),
    /// One value per hour of the day, hour 0 first.
    Hourly(Vec<f64>),
}

impl ScheduleValues {
    pub fn hourly(values: Vec<f64>) -> HsResult<Self> {
        if values.len() != 24 {
            return Err(HsError::InvalidArg {
                what: "hourly schedule needs 24 values",
            });
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(HsError::NonFinite {
                what: "hourly schedule value",
                value: *bad,
            });
        }
        Ok(ScheduleValues::Hourly(values))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub id: ScheduleId,
    pub name: String,
    pub limits: ScheduleTypeLimits,
    pub values: ScheduleValues,
}

impl Schedule {
    pub fn value_at_hour(&self, hour: usize) -> f64 {
        match &self.values {
            ScheduleValues::Constant(v) => *v,
            ScheduleValues::Hourly(values) => values[hour % values.len()],
        }
    }

    pub fn constant_value(&self) -> Option<f64> {
        match self.values {
            ScheduleValues::Constant(v) => Some(v),
            ScheduleValues::Hourly(_) => None,
        }
    }

    /// Largest value the schedule takes.
    pub fn max_value(&self) -> f64 {
        match &self.values {
            ScheduleValues::Constant(v) => *v,
            ScheduleValues::Hourly(values) => values.iter().copied().fold(f64::MIN, f64::max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_core::Id;

    #[test]
    fn hourly_requires_full_day() {
        assert!(ScheduleValues::hourly(vec![1.0; 23]).is_err());
        assert!(ScheduleValues::hourly(vec![f64::NAN; 24]).is_err());

        let mut values = vec![0.0; 24];
        values[8] = 1.0;
        let sched = Schedule {
            id: Id::from_index(0),
            name: "Occupancy".into(),
            limits: ScheduleTypeLimits::Fraction,
            values: ScheduleValues::hourly(values).unwrap(),
        };
        assert_eq!(sched.value_at_hour(8), 1.0);
        assert_eq!(sched.value_at_hour(32), 1.0);
        assert_eq!(sched.max_value(), 1.0);
        assert_eq!(sched.constant_value(), None);
    }
}
