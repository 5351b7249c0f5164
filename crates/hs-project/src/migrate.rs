//! Schema migration framework.

use hs_synth::Fuel;

use crate::ProjectError;
use crate::schema::Project;

pub const LATEST_VERSION: u32 = 2;

pub fn migrate_to_latest(mut project: Project) -> Result<Project, ProjectError> {
    while project.version < LATEST_VERSION {
        project = migrate_one_version(project)?;
    }
    Ok(project)
}

fn migrate_one_version(project: Project) -> Result<Project, ProjectError> {
    match project.version {
        0 => migrate_v0_to_v1(project),
        1 => migrate_v1_to_v2(project),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

fn migrate_v0_to_v1(mut project: Project) -> Result<Project, ProjectError> {
    project.version = 1;
    Ok(project)
}

/// Version 1 files carried the fuel names of whichever model schema they were
/// written against. Rewrite them to the canonical tags; unknown tags are left
/// for validation to report.
fn migrate_v1_to_v2(mut project: Project) -> Result<Project, ProjectError> {
    for request in &mut project.systems {
        for fuel in [
            &mut request.main_heat_fuel,
            &mut request.zone_heat_fuel,
            &mut request.cool_fuel,
        ]
        .into_iter()
        .flatten()
        {
            if let Ok(parsed) = fuel.parse::<Fuel>() {
                *fuel = parsed.as_str().to_string();
            }
        }
    }
    project.version = 2;
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SystemRequestDef;

    #[test]
    fn migrate_latest_is_noop() {
        let project = Project::new("test");
        let migrated = migrate_to_latest(project.clone()).unwrap();
        assert_eq!(migrated, project);
    }

    #[test]
    fn legacy_fuel_names_are_canonicalized() {
        let mut project = Project::new("Legacy");
        project.version = 0;
        project.systems.push(SystemRequestDef {
            system_type: "VAV Reheat".into(),
            main_heat_fuel: Some("DistrictHeatingSteam".into()),
            zone_heat_fuel: Some("FuelOilNo2".into()),
            cool_fuel: Some("Plasma".into()),
            zones: vec![],
            options: Default::default(),
        });

        let migrated = migrate_to_latest(project).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION);
        let request = &migrated.systems[0];
        assert_eq!(request.main_heat_fuel.as_deref(), Some("DistrictHeating"));
        assert_eq!(request.zone_heat_fuel.as_deref(), Some("FuelOil"));
        assert_eq!(request.cool_fuel.as_deref(), Some("Plasma"));
    }
}
