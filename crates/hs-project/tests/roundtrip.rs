use hs_model::{DayType, DesignDay, HumidityCondition, ScheduleTypeLimits};
use hs_project::*;

fn office() -> Project {
    let mut project = Project::new("Roundtrip Office");
    project.schedules.push(ScheduleDef {
        name: "Occupancy".to_string(),
        limits: ScheduleTypeLimits::Fraction,
        values: ScheduleValuesDef::Hourly {
            values: (0..24).map(|h| if (8..18).contains(&h) { 1.0 } else { 0.0 }).collect(),
        },
    });
    let mut zone = ZoneDef::new("Core");
    zone.outdoor_air_m3ps = 0.1;
    zone.ventilation_schedule = Some("Occupancy".to_string());
    project.zones.push(zone);
    project.design_days.push(DesignDay {
        name: "Cooling".to_string(),
        day_type: DayType::SummerDesignDay,
        max_dry_bulb_c: 32.0,
        daily_range_k: 9.0,
        humidity: HumidityCondition::WetBulb(22.5),
    });
    project.systems.push(SystemRequestDef {
        system_type: "PSZ-AC".to_string(),
        main_heat_fuel: Some("NaturalGas".to_string()),
        zone_heat_fuel: None,
        cool_fuel: Some("Electricity".to_string()),
        zones: vec!["Core".to_string()],
        options: Default::default(),
    });
    project.templates.push(TemplateDef {
        name: "Perimeter".to_string(),
        equipment_type: "PTAC_ElectricCoil".parse().unwrap(),
        vintage: Default::default(),
        economizer: None,
        demand_controlled_ventilation: false,
        sensible_heat_recovery: 0.0,
        latent_heat_recovery: 0.0,
        doas_availability_schedule: None,
        zones: vec![],
    });
    project
}

#[test]
fn roundtrip_yaml_empty_project() {
    let project = Project::new("Empty Project");
    validate_project(&project).unwrap();

    let path = std::env::temp_dir().join("hs_project_roundtrip_empty.yaml");
    save(&path, &project).unwrap();
    let loaded = load(&path).unwrap();
    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_yaml_office() {
    let project = office();
    let path = std::env::temp_dir().join("hs_project_roundtrip_office.yaml");
    save(&path, &project).unwrap();
    assert_eq!(load(&path).unwrap(), project);
}

#[test]
fn roundtrip_json_office() {
    let project = office();
    let path = std::env::temp_dir().join("hs_project_roundtrip_office.json");
    save(&path, &project).unwrap();
    assert_eq!(load(&path).unwrap(), project);
}

#[test]
fn invalid_projects_are_not_saved() {
    let mut project = office();
    project.systems[0].zones.push("Attic".to_string());
    let path = std::env::temp_dir().join("hs_project_invalid.yaml");
    assert!(matches!(
        save(&path, &project),
        Err(ProjectError::Validation(ValidationError::MissingReference { .. }))
    ));
}

#[test]
fn omitted_fields_take_defaults() {
    let project = parse(
        "version: 2\nname: Minimal\nzones:\n  - name: Z1\nsystems:\n  - system_type: PTAC\n    cool_fuel: Electricity\n    zones: [Z1]\n",
        Format::Yaml,
    )
    .unwrap();
    let zone = &project.zones[0];
    assert_eq!(zone.heating_setpoint_c, Some(21.0));
    assert_eq!(zone.cooling_setpoint_c, Some(24.0));
    assert!(project.systems[0].options.zone_ventilation);
}

#[test]
fn unknown_system_type_fails_to_parse() {
    let json = r#"{"version": 2, "name": "Bad", "systems": [{"system_type": "Heat Wheel", "zones": []}]}"#;
    let err = parse(json, Format::Json).unwrap_err();
    assert!(matches!(err, ProjectError::Validation(ValidationError::UnknownTag { .. })));
}

#[test]
fn format_follows_the_extension() {
    assert_eq!(Format::from_path(std::path::Path::new("office.json")), Format::Json);
    assert_eq!(Format::from_path(std::path::Path::new("office.yml")), Format::Yaml);
    let yaml = render(&office(), Format::Yaml).unwrap();
    assert!(yaml.contains("system_type"));
}
