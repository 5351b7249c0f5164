use std::path::Path;

use hs_model::LoopRole;

fn demo(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos").join(name)
}

#[test]
fn demos_load_and_validate() {
    let project = hs_project::load(&demo("office.yaml")).unwrap_or_else(|e| panic!("Failed to load office.yaml: {e}"));
    hs_project::validate_project(&project).unwrap();
    assert_eq!(project.zones.len(), 5);
    assert_eq!(project.design_days.len(), 2);
}

#[test]
fn office_demo_synthesizes() {
    let project = hs_project::load(&demo("office.yaml")).unwrap();
    let (model, report) = hs_project::synthesize_project(&project).unwrap();

    assert!(report.all_built(), "{:?}", report.requests);
    assert_eq!(report.requests.len(), 3);
    assert_eq!(report.project_hash, hs_project::project_hash(&project));
    assert_eq!(report.summary.schema_version, "3.7.0");

    // the fan coils reuse the VAV plant
    for role in [LoopRole::HotWater, LoopRole::ChilledWater, LoopRole::CondenserWater] {
        assert_eq!(model.plant_loops().iter().filter(|l| l.role == role).count(), 1, "{role:?}");
    }
    assert_eq!(model.air_loops().len(), 2);
    assert_eq!(model.zone_hvac_units().len(), 2);

    let doas = model.air_loops().iter().find(|l| l.dedicated_outdoor_air).unwrap();
    assert!(doas.humidifier.is_some());
    assert!(doas.heat_recovery().is_some());
    assert_eq!(doas.availability, model.schedule_by_name("DOAS Hours"));

    let vav = model.air_loops().iter().find(|l| !l.dedicated_outdoor_air).unwrap();
    let occupancy = model.schedule_by_name("Office Occupancy").unwrap();
    assert_eq!(model.zone(model.zone_named("Conference").unwrap()).unwrap().ventilation_schedule, Some(occupancy));
    assert_eq!(vav.terminals.len(), 3);
    model.topology().unwrap();
}

#[test]
fn report_serializes_to_json() {
    let project = hs_project::load(&demo("office.yaml")).unwrap();
    let (_, report) = hs_project::synthesize_project(&project).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["project"], "Small Office");
    assert!(json["summary"]["plant_loops"].as_array().unwrap().len() >= 3);
}
