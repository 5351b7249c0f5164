//! Project schema definitions.

use hs_components::Vintage;
use hs_controls::EconomizerType;
use hs_model::{DesignDay, ScheduleTypeLimits};
use hs_synth::{ArchetypeOptions, EquipmentType, HvacTemplate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    /// Target model schema, e.g. `"3.7.0"`. Defaults to the newest supported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_schema: Option<String>,
    #[serde(default)]
    pub schedules: Vec<ScheduleDef>,
    #[serde(default)]
    pub zones: Vec<ZoneDef>,
    #[serde(default)]
    pub design_days: Vec<DesignDay>,
    #[serde(default)]
    pub systems: Vec<SystemRequestDef>,
    #[serde(default)]
    pub templates: Vec<TemplateDef>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: name.into(),
            target_schema: None,
            schedules: vec![],
            zones: vec![],
            design_days: vec![],
            systems: vec![],
            templates: vec![],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleDef {
    pub name: String,
    pub limits: ScheduleTypeLimits,
    pub values: ScheduleValuesDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ScheduleValuesDef {
    Constant { value: f64 },
    /// 24 values, hour 0 first.
    Hourly { values: Vec<f64> },
}

/// A thermal zone.
///
/// A zone is heated when it has a heating setpoint and cooled when it has a
/// cooling setpoint. Write `null` to drop one:
/// ```yaml
/// - name: Storage
///   cooling_setpoint_c: null
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneDef {
    pub name: String,
    #[serde(default)]
    pub floor_area_m2: f64,
    #[serde(default)]
    pub outdoor_air_m3ps: f64,
    #[serde(default)]
    pub humidistat: bool,
    #[serde(default = "default_heating_setpoint")]
    pub heating_setpoint_c: Option<f64>,
    #[serde(default = "default_cooling_setpoint")]
    pub cooling_setpoint_c: Option<f64>,
    /// Minimum outdoor air fraction schedule, by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ventilation_schedule: Option<String>,
}

impl ZoneDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            floor_area_m2: 0.0,
            outdoor_air_m3ps: 0.0,
            humidistat: false,
            heating_setpoint_c: default_heating_setpoint(),
            cooling_setpoint_c: default_cooling_setpoint(),
            ventilation_schedule: None,
        }
    }
}

fn default_heating_setpoint() -> Option<f64> {
    Some(21.0)
}

fn default_cooling_setpoint() -> Option<f64> {
    Some(24.0)
}

/// A direct request to the system-type dispatcher.
///
/// Tags are kept as strings so that validation can report the offending
/// value; see `hs_synth::SystemType` and `hs_synth::Fuel` for the accepted
/// spellings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemRequestDef {
    pub system_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_heat_fuel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_heat_fuel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cool_fuel: Option<String>,
    pub zones: Vec<String>,
    #[serde(default)]
    pub options: ArchetypeOptions,
}

/// An HVAC template applied to a group of zones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateDef {
    pub name: String,
    pub equipment_type: EquipmentType,
    #[serde(default)]
    pub vintage: Vintage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economizer: Option<EconomizerType>,
    #[serde(default)]
    pub demand_controlled_ventilation: bool,
    #[serde(default)]
    pub sensible_heat_recovery: f64,
    #[serde(default)]
    pub latent_heat_recovery: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doas_availability_schedule: Option<String>,
    pub zones: Vec<String>,
}

impl TemplateDef {
    pub fn to_template(&self) -> HvacTemplate {
        HvacTemplate {
            name: self.name.clone(),
            equipment_type: self.equipment_type,
            vintage: self.vintage,
            economizer: self.economizer,
            demand_controlled_ventilation: self.demand_controlled_ventilation,
            sensible_heat_recovery: self.sensible_heat_recovery,
            latent_heat_recovery: self.latent_heat_recovery,
            doas_availability_schedule: self.doas_availability_schedule.clone(),
        }
    }
}
