//! Project validation logic.

use std::collections::HashSet;

use hs_model::{DesignDay, HumidityCondition, ScheduleTypeLimits, SchemaVersion};
use hs_synth::{Fuel, SystemType};

use crate::schema::{Project, ScheduleDef, ScheduleValuesDef, SystemRequestDef, TemplateDef, ZoneDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate name: {name} in {context}")]
    DuplicateName { name: String, context: String },

    #[error("Missing reference: {name} in {context}")]
    MissingReference { name: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown {field}: {value}")]
    UnknownTag { field: String, value: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn unique<'a>(names: impl Iterator<Item = &'a str>, context: &str) -> Result<HashSet<&'a str>, ValidationError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateName {
                name: name.to_string(),
                context: context.to_string(),
            });
        }
    }
    Ok(seen)
}

fn reference(names: &HashSet<&str>, name: &str, context: &str) -> Result<(), ValidationError> {
    if names.contains(name) {
        Ok(())
    } else {
        Err(ValidationError::MissingReference {
            name: name.to_string(),
            context: context.to_string(),
        })
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }
    if let Some(target) = &project.target_schema {
        target
            .parse::<SchemaVersion>()
            .map_err(|_| invalid("target_schema", target, "expected major.minor[.patch]"))?;
    }

    let schedules = unique(project.schedules.iter().map(|s| s.name.as_str()), "schedules")?;
    for schedule in &project.schedules {
        validate_schedule(schedule)?;
    }

    let zones = unique(project.zones.iter().map(|z| z.name.as_str()), "zones")?;
    for zone in &project.zones {
        validate_zone(zone, &schedules)?;
    }

    unique(project.design_days.iter().map(|d| d.name.as_str()), "design days")?;
    for day in &project.design_days {
        validate_design_day(day)?;
    }

    for (index, request) in project.systems.iter().enumerate() {
        validate_request(request, index, &zones)?;
    }

    unique(project.templates.iter().map(|t| t.name.as_str()), "templates")?;
    for template in &project.templates {
        validate_template(template, &zones, &schedules)?;
    }

    Ok(())
}

fn validate_schedule(schedule: &ScheduleDef) -> Result<(), ValidationError> {
    let field = format!("schedule '{}'", schedule.name);
    let values: &[f64] = match &schedule.values {
        ScheduleValuesDef::Constant { value } => std::slice::from_ref(value),
        ScheduleValuesDef::Hourly { values } => {
            if values.len() != 24 {
                return Err(invalid(field, values.len(), "hourly schedules need 24 values"));
            }
            values
        }
    };
    for &v in values {
        if !v.is_finite() {
            return Err(invalid(&field, v, "must be finite"));
        }
        match schedule.limits {
            ScheduleTypeLimits::Fraction if !(0.0..=1.0).contains(&v) => {
                return Err(invalid(&field, v, "fraction schedules stay within [0, 1]"));
            }
            ScheduleTypeLimits::OnOff if v != 0.0 && v != 1.0 => {
                return Err(invalid(&field, v, "on/off schedules are 0 or 1"));
            }
            _ => {}
        }
    }
    Ok(())
}

fn validate_zone(zone: &ZoneDef, schedules: &HashSet<&str>) -> Result<(), ValidationError> {
    let field = |what: &str| format!("zone '{}' {what}", zone.name);
    for (what, v) in [("floor_area_m2", zone.floor_area_m2), ("outdoor_air_m3ps", zone.outdoor_air_m3ps)] {
        if !v.is_finite() || v < 0.0 {
            return Err(invalid(field(what), v, "must be finite and non-negative"));
        }
    }
    for (what, v) in [
        ("heating_setpoint_c", zone.heating_setpoint_c),
        ("cooling_setpoint_c", zone.cooling_setpoint_c),
    ] {
        if let Some(v) = v
            && !v.is_finite()
        {
            return Err(invalid(field(what), v, "must be finite"));
        }
    }
    if let (Some(heat), Some(cool)) = (zone.heating_setpoint_c, zone.cooling_setpoint_c)
        && heat > cool
    {
        return Err(invalid(field("heating_setpoint_c"), heat, "above the cooling setpoint"));
    }
    if let Some(schedule) = &zone.ventilation_schedule {
        reference(schedules, schedule, &field("ventilation_schedule"))?;
    }
    Ok(())
}

fn validate_design_day(day: &DesignDay) -> Result<(), ValidationError> {
    let humidity = match day.humidity {
        HumidityCondition::WetBulb(v) | HumidityCondition::DewPoint(v) | HumidityCondition::HumidityRatio(v) => v,
    };
    for (what, v) in [
        ("max_dry_bulb_c", day.max_dry_bulb_c),
        ("daily_range_k", day.daily_range_k),
        ("humidity", humidity),
    ] {
        if !v.is_finite() {
            return Err(invalid(format!("design day '{}' {what}", day.name), v, "must be finite"));
        }
    }
    if day.daily_range_k < 0.0 {
        return Err(invalid(
            format!("design day '{}' daily_range_k", day.name),
            day.daily_range_k,
            "must be non-negative",
        ));
    }
    Ok(())
}

fn validate_request(request: &SystemRequestDef, index: usize, zones: &HashSet<&str>) -> Result<(), ValidationError> {
    let context = format!("systems[{index}]");
    request
        .system_type
        .parse::<SystemType>()
        .map_err(|_| ValidationError::UnknownTag {
            field: format!("{context} system_type"),
            value: request.system_type.clone(),
        })?;
    for (what, fuel) in [
        ("main_heat_fuel", &request.main_heat_fuel),
        ("zone_heat_fuel", &request.zone_heat_fuel),
        ("cool_fuel", &request.cool_fuel),
    ] {
        if let Some(tag) = fuel {
            tag.parse::<Fuel>().map_err(|_| ValidationError::UnknownTag {
                field: format!("{context} {what}"),
                value: tag.clone(),
            })?;
        }
    }
    for zone in &request.zones {
        reference(zones, zone, &format!("{context} zones"))?;
    }
    Ok(())
}

fn validate_template(
    template: &TemplateDef,
    zones: &HashSet<&str>,
    schedules: &HashSet<&str>,
) -> Result<(), ValidationError> {
    let context = format!("template '{}'", template.name);
    for (what, v) in [
        ("sensible_heat_recovery", template.sensible_heat_recovery),
        ("latent_heat_recovery", template.latent_heat_recovery),
    ] {
        if !(0.0..=1.0).contains(&v) {
            return Err(invalid(format!("{context} {what}"), v, "effectiveness is a fraction"));
        }
    }
    if let Some(schedule) = &template.doas_availability_schedule {
        reference(schedules, schedule, &format!("{context} doas_availability_schedule"))?;
    }
    for zone in &template.zones {
        reference(zones, zone, &format!("{context} zones"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ZoneDef;

    fn project() -> Project {
        let mut project = Project::new("Test");
        project.zones = vec![ZoneDef::new("Z1"), ZoneDef::new("Z2")];
        project
    }

    #[test]
    fn duplicate_zone_names_are_rejected() {
        let mut p = project();
        p.zones.push(ZoneDef::new("Z1"));
        assert!(matches!(validate_project(&p), Err(ValidationError::DuplicateName { .. })));
    }

    #[test]
    fn hourly_schedule_needs_a_full_day() {
        let mut p = project();
        p.schedules.push(ScheduleDef {
            name: "Short".into(),
            limits: ScheduleTypeLimits::Fraction,
            values: ScheduleValuesDef::Hourly { values: vec![1.0; 12] },
        });
        assert!(matches!(validate_project(&p), Err(ValidationError::InvalidValue { .. })));
    }

    #[test]
    fn fraction_schedules_are_bounded() {
        let mut p = project();
        p.schedules.push(ScheduleDef {
            name: "Over".into(),
            limits: ScheduleTypeLimits::Fraction,
            values: ScheduleValuesDef::Constant { value: 1.5 },
        });
        assert!(validate_project(&p).is_err());
    }

    #[test]
    fn unknown_fuel_names_the_field() {
        let mut p = project();
        p.systems.push(SystemRequestDef {
            system_type: "PTAC".into(),
            main_heat_fuel: Some("Coal".into()),
            zone_heat_fuel: None,
            cool_fuel: Some("Electricity".into()),
            zones: vec!["Z1".into()],
            options: Default::default(),
        });
        match validate_project(&p) {
            Err(ValidationError::UnknownTag { field, value }) => {
                assert_eq!(field, "systems[0] main_heat_fuel");
                assert_eq!(value, "Coal");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn inverted_setpoints_are_rejected() {
        let mut p = project();
        p.zones[0].heating_setpoint_c = Some(26.0);
        assert!(validate_project(&p).is_err());
        p.zones[0].cooling_setpoint_c = None;
        validate_project(&p).unwrap();
    }

    #[test]
    fn future_versions_are_rejected() {
        let mut p = project();
        p.version = crate::migrate::LATEST_VERSION + 1;
        assert!(matches!(validate_project(&p), Err(ValidationError::UnsupportedVersion { .. })));
    }

    proptest::proptest! {
        #[test]
        fn hourly_fraction_validity_tracks_the_unit_interval(
            values in proptest::collection::vec(-0.5_f64..1.5, 24),
        ) {
            let mut p = project();
            p.schedules.push(ScheduleDef {
                name: "Occupancy".into(),
                limits: ScheduleTypeLimits::Fraction,
                values: ScheduleValuesDef::Hourly { values: values.clone() },
            });
            let in_range = values.iter().all(|v| (0.0..=1.0).contains(v));
            proptest::prop_assert_eq!(validate_project(&p).is_ok(), in_range);
        }
    }
}
