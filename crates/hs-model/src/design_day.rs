//! Sizing design days.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayType {
    SummerDesignDay,
    WinterDesignDay,
}

/// Humidity indicating condition of a design day, in °C or kg/kg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HumidityCondition {
    WetBulb(f64),
    DewPoint(f64),
    HumidityRatio(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDay {
    pub name: String,
    pub day_type: DayType,
    pub max_dry_bulb_c: f64,
    #[serde(default)]
    pub daily_range_k: f64,
    pub humidity: HumidityCondition,
}

impl DesignDay {
    /// Wet-bulb temperature, when the day is specified by wet bulb.
    pub fn wet_bulb_c(&self) -> Option<f64> {
        match self.humidity {
            HumidityCondition::WetBulb(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_summer(&self) -> bool {
        self.day_type == DayType::SummerDesignDay
    }
}
