//! Populate a model from a project and run every synthesis request on it.

use std::collections::HashMap;

use hs_core::ZoneId;
use hs_model::{Model, ModelSummary, ScheduleValues, SchemaVersion, ZoneSpec};
use hs_synth::{Fuel, SystemType, apply_template, synthesize};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::ProjectResult;
use crate::hash::project_hash;
use crate::schema::{Project, ScheduleValuesDef};
use crate::validate::validate_project;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequestKind {
    System,
    Template,
}

/// What one system request or template produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestOutcome {
    pub kind: RequestKind,
    pub label: String,
    pub zones: usize,
    pub built: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisReport {
    pub project: String,
    pub project_hash: String,
    pub generated_at: String,
    pub requests: Vec<RequestOutcome>,
    pub summary: ModelSummary,
}

impl SynthesisReport {
    pub fn all_built(&self) -> bool {
        self.requests.iter().all(|r| r.built)
    }
}

/// A model holding the project's schedules, zones and design days, with no
/// HVAC yet.
pub fn build_model(project: &Project) -> ProjectResult<Model> {
    populate(project).map(|(model, _)| model)
}

/// Model names are unique across kinds, so a zone may be stored under a
/// suffixed name. Requests find zones through the project name instead.
fn populate(project: &Project) -> ProjectResult<(Model, HashMap<String, ZoneId>)> {
    validate_project(project)?;
    let schema = match &project.target_schema {
        Some(v) => v.parse::<SchemaVersion>()?,
        None => SchemaVersion::default(),
    };
    let mut model = Model::with_schema_version(schema);

    let mut schedules = HashMap::with_capacity(project.schedules.len());
    for schedule in &project.schedules {
        let values = match &schedule.values {
            ScheduleValuesDef::Constant { value } => ScheduleValues::Constant(*value),
            ScheduleValuesDef::Hourly { values } => ScheduleValues::hourly(values.clone())?,
        };
        let id = model.add_schedule(&schedule.name, schedule.limits, values);
        schedules.insert(schedule.name.as_str(), id);
    }

    let mut zones = HashMap::with_capacity(project.zones.len());
    for zone in &project.zones {
        let mut spec = ZoneSpec::new(&zone.name)
            .with_floor_area(zone.floor_area_m2)
            .with_outdoor_air(zone.outdoor_air_m3ps);
        spec.heating_setpoint_c = zone.heating_setpoint_c;
        spec.cooling_setpoint_c = zone.cooling_setpoint_c;
        if zone.humidistat {
            spec = spec.with_humidistat();
        }
        if let Some(name) = &zone.ventilation_schedule {
            let schedule = match schedules.get(name.as_str()) {
                Some(&id) => id,
                None => model.schedule_named(name)?,
            };
            spec = spec.with_ventilation_schedule(schedule);
        }
        let id = model.add_zone(spec)?;
        if model.zone(id)?.name != zone.name {
            debug!(zone = %zone.name, stored = %model.zone(id)?.name, "zone name already taken");
        }
        zones.insert(zone.name.clone(), id);
    }

    for day in &project.design_days {
        model.add_design_day(day.clone());
    }
    Ok((model, zones))
}

fn parse_fuel(tag: Option<&str>) -> ProjectResult<Option<Fuel>> {
    Ok(tag.map(str::parse::<Fuel>).transpose()?)
}

/// Build the model and run system requests in order, then templates.
pub fn synthesize_project(project: &Project) -> ProjectResult<(Model, SynthesisReport)> {
    let (mut model, zone_ids) = populate(project)?;
    let lookup = |names: &[String]| -> Vec<ZoneId> {
        names.iter().filter_map(|n| zone_ids.get(n).copied()).collect()
    };

    let mut requests = Vec::with_capacity(project.systems.len() + project.templates.len());
    for request in &project.systems {
        let system: SystemType = request.system_type.parse()?;
        let zones = lookup(&request.zones);
        let built = synthesize(
            &mut model,
            &system,
            parse_fuel(request.main_heat_fuel.as_deref())?,
            parse_fuel(request.zone_heat_fuel.as_deref())?,
            parse_fuel(request.cool_fuel.as_deref())?,
            &zones,
            &request.options,
        )?;
        requests.push(RequestOutcome {
            kind: RequestKind::System,
            label: system.to_string(),
            zones: zones.len(),
            built,
        });
    }

    for def in &project.templates {
        let zones = lookup(&def.zones);
        let outcome = apply_template(&mut model, &def.to_template(), &zones)?;
        requests.push(RequestOutcome {
            kind: RequestKind::Template,
            label: format!("{} ({})", def.name, def.equipment_type),
            zones: zones.len(),
            built: outcome.built,
        });
    }

    let report = SynthesisReport {
        project: project.name.clone(),
        project_hash: project_hash(project),
        generated_at: chrono::Utc::now().to_rfc3339(),
        requests,
        summary: model.summary(),
    };
    if report.all_built() {
        info!(
            project = %project.name,
            plant_loops = report.summary.plant_loops.len(),
            air_loops = report.summary.air_loops.len(),
            "synthesized project"
        );
    } else {
        warn!(project = %project.name, "some requests built nothing");
    }
    Ok((model, report))
}
