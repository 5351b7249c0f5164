//! The model arena and the mutations builders perform on it.

use std::fmt;
use std::str::FromStr;

use hs_controls::{ControlProgram, OutdoorAirController, SetpointManager};
use hs_core::{
    AirLoopId, EquipId, HsError, HsResult, Id, LoopId, NodeId, ProgramId, ScheduleId, SpmId,
    TerminalId, ZoneHvacId, ZoneId, ensure_fraction, ensure_non_negative,
};
use hs_graph::{Graph, GraphBuilder, Medium};
use tracing::debug;

use crate::air_loop::{AirLoop, AirLoopSizing, AirSlot, NightCycle, OutdoorAirSystem, SupplyEnd};
use crate::design_day::DesignDay;
use crate::equipment::{Attachment, Equipment, EquipmentKind, Placement};
use crate::naming::NameRegistry;
use crate::plant_loop::{
    CommonPipe, LoadDistribution, LoopRole, LoopSide, PlantLoop, PlantSizing,
};
use crate::registry::{LoopKey, LoopRegistry};
use crate::schedule::{Schedule, ScheduleTypeLimits, ScheduleValues};
use crate::segment::Segment;
use crate::terminal::{Terminal, TerminalKind, TerminalSpec};
use crate::zone::{Zone, ZoneEquipmentRef, ZoneSizing, ZoneSpec};
use crate::zone_hvac::{ZoneHvac, ZoneHvacSpec};

/// Version of the target model schema. Some object classes were renamed
/// between versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SchemaVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// First version that names district heating `DistrictHeatingWater`.
    pub const DISTRICT_HEATING_WATER: SchemaVersion = SchemaVersion::new(3, 7, 0);

    pub fn district_heating_class(self) -> &'static str {
        if self >= Self::DISTRICT_HEATING_WATER {
            "DistrictHeatingWater"
        } else {
            "DistrictHeating"
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        SchemaVersion::new(3, 8, 0)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SchemaVersion {
    type Err = HsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || HsError::unknown_tag("schema version", s);
        let mut parts = s.trim().split('.');
        let mut next = |required: bool| -> Result<u32, HsError> {
            match parts.next() {
                Some(p) => p.parse().map_err(|_| bad()),
                None if required => Err(bad()),
                None => Ok(0),
            }
        };
        let major = next(true)?;
        let minor = next(true)?;
        let patch = next(false)?;
        if parts.next().is_some() {
            return Err(bad());
        }
        Ok(SchemaVersion::new(major, minor, patch))
    }
}

/// Loop a setpoint manager is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpmOwner {
    PlantLoop(LoopId),
    AirLoop(AirLoopId),
}

fn slot<'a, T>(arena: &'a [T], id: Id, what: &'static str) -> HsResult<&'a T> {
    arena.get(id.index() as usize).ok_or(HsError::IndexOob {
        what,
        index: id.index() as usize,
        len: arena.len(),
    })
}

fn slot_mut<'a, T>(arena: &'a mut [T], id: Id, what: &'static str) -> HsResult<&'a mut T> {
    let len = arena.len();
    arena.get_mut(id.index() as usize).ok_or(HsError::IndexOob {
        what,
        index: id.index() as usize,
        len,
    })
}

/// Header of a plant loop side.
#[derive(Debug, Clone, Copy)]
enum Header {
    Inlet,
    Outlet,
}

#[derive(Debug, Clone, Default)]
pub struct Model {
    schema_version: SchemaVersion,
    graph: GraphBuilder,
    names: NameRegistry,
    loop_registry: LoopRegistry,
    zones: Vec<Zone>,
    schedules: Vec<Schedule>,
    design_days: Vec<DesignDay>,
    plant_loops: Vec<PlantLoop>,
    air_loops: Vec<AirLoop>,
    equipment: Vec<Equipment>,
    terminals: Vec<Terminal>,
    zone_hvac: Vec<ZoneHvac>,
    setpoint_managers: Vec<SetpointManager>,
    programs: Vec<ControlProgram>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema_version(schema_version: SchemaVersion) -> Self {
        Self {
            schema_version,
            ..Self::default()
        }
    }

    pub fn schema_version(&self) -> SchemaVersion {
        self.schema_version
    }

    pub fn names(&self) -> &NameRegistry {
        &self.names
    }

    pub fn graph(&self) -> &GraphBuilder {
        &self.graph
    }

    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        self.graph.node_name(node)
    }

    /// Freeze and validate the node graph of everything placed so far.
    pub fn topology(&self) -> HsResult<Graph> {
        self.graph.build()
    }

    // ---- zones ----

    pub fn add_zone(&mut self, spec: ZoneSpec) -> HsResult<ZoneId> {
        let outdoor_air = ensure_non_negative(spec.outdoor_air_m3ps, "zone outdoor air")?;
        if let Some(schedule) = spec.ventilation_schedule {
            slot(&self.schedules, schedule, "schedule")?;
        }
        let id = ZoneId::next_for(self.zones.len());
        let name = self.names.claim(&spec.name);
        let air_node = self.graph.add_node(format!("{name} Air Node"), Medium::Air);
        debug!(zone = %name, "added zone");
        self.zones.push(Zone {
            id,
            name,
            floor_area_m2: spec.floor_area_m2,
            outdoor_air_m3ps: outdoor_air,
            has_humidistat: spec.has_humidistat,
            heating_setpoint_c: spec.heating_setpoint_c,
            cooling_setpoint_c: spec.cooling_setpoint_c,
            ventilation_schedule: spec.ventilation_schedule,
            air_node,
            sizing: ZoneSizing::default(),
            equipment: Vec::new(),
        });
        Ok(id)
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone(&self, id: ZoneId) -> HsResult<&Zone> {
        slot(&self.zones, id, "zone")
    }

    pub fn zone_mut(&mut self, id: ZoneId) -> HsResult<&mut Zone> {
        slot_mut(&mut self.zones, id, "zone")
    }

    pub fn zone_by_name(&self, name: &str) -> Option<ZoneId> {
        self.zones.iter().find(|z| z.name == name).map(|z| z.id)
    }

    pub fn zone_named(&self, name: &str) -> HsResult<ZoneId> {
        self.zone_by_name(name)
            .ok_or_else(|| HsError::not_found("Zone", name))
    }

    // ---- schedules and design days ----

    pub fn add_schedule(
        &mut self,
        name: &str,
        limits: ScheduleTypeLimits,
        values: ScheduleValues,
    ) -> ScheduleId {
        let id = ScheduleId::next_for(self.schedules.len());
        let name = self.names.claim(name);
        debug!(schedule = %name, "added schedule");
        self.schedules.push(Schedule {
            id,
            name,
            limits,
            values,
        });
        id
    }

    /// Return the schedule called `name`, creating a constant one if absent.
    pub fn get_or_add_constant_schedule(
        &mut self,
        name: &str,
        limits: ScheduleTypeLimits,
        value: f64,
    ) -> ScheduleId {
        match self.schedule_by_name(name) {
            Some(id) => id,
            None => self.add_schedule(name, limits, ScheduleValues::Constant(value)),
        }
    }

    pub fn always_on(&mut self) -> ScheduleId {
        self.get_or_add_constant_schedule("Always On Discrete", ScheduleTypeLimits::OnOff, 1.0)
    }

    pub fn always_off(&mut self) -> ScheduleId {
        self.get_or_add_constant_schedule("Always Off Discrete", ScheduleTypeLimits::OnOff, 0.0)
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn schedule(&self, id: ScheduleId) -> HsResult<&Schedule> {
        slot(&self.schedules, id, "schedule")
    }

    pub fn schedule_by_name(&self, name: &str) -> Option<ScheduleId> {
        self.schedules.iter().find(|s| s.name == name).map(|s| s.id)
    }

    pub fn schedule_named(&self, name: &str) -> HsResult<ScheduleId> {
        self.schedule_by_name(name)
            .ok_or_else(|| HsError::not_found("Schedule", name))
    }

    pub fn add_design_day(&mut self, day: DesignDay) {
        self.design_days.push(day);
    }

    pub fn design_days(&self) -> &[DesignDay] {
        &self.design_days
    }

    // ---- equipment ----

    pub fn add_equipment(&mut self, name: &str, kind: EquipmentKind) -> EquipId {
        let id = EquipId::next_for(self.equipment.len());
        let name = self.names.claim(name);
        debug!(equipment = %name, class = kind.class(), "added equipment");
        self.equipment.push(Equipment {
            id,
            name,
            kind,
            placements: Vec::new(),
            availability: None,
            container: None,
        });
        id
    }

    pub fn all_equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    pub fn equipment(&self, id: EquipId) -> HsResult<&Equipment> {
        slot(&self.equipment, id, "equipment")
    }

    pub fn equipment_mut(&mut self, id: EquipId) -> HsResult<&mut Equipment> {
        slot_mut(&mut self.equipment, id, "equipment")
    }

    pub fn equipment_by_name(&self, name: &str) -> Option<EquipId> {
        self.equipment.iter().find(|e| e.name == name).map(|e| e.id)
    }

    /// Inlet and outlet node of `equip` where it is placed at `at`.
    pub fn equipment_nodes(&self, equip: EquipId, at: Attachment) -> HsResult<(NodeId, NodeId)> {
        let eq = self.equipment(equip)?;
        let comp = eq
            .placement(at)
            .ok_or_else(|| HsError::not_found("Equipment placement", eq.name.clone()))?;
        Ok((self.graph.inlet_node(comp)?, self.graph.outlet_node(comp)?))
    }

    fn record_placement(&mut self, equip: EquipId, placement: Placement) -> HsResult<()> {
        self.equipment_mut(equip)?.placements.push(placement);
        Ok(())
    }

    fn equipment_name(&self, equip: EquipId) -> HsResult<String> {
        Ok(self.equipment(equip)?.name.clone())
    }

    // ---- plant loops ----

    pub fn add_plant_loop(&mut self, name: &str, role: LoopRole, sizing: PlantSizing) -> LoopId {
        let id = LoopId::next_for(self.plant_loops.len());
        let name = self.names.claim(name);
        let mut side = |label: &str| {
            LoopSide::new(
                self.graph.add_node(format!("{name} {label} Inlet Node"), Medium::Water),
                self.graph.add_node(format!("{name} {label} Splitter"), Medium::Water),
                self.graph.add_node(format!("{name} {label} Mixer"), Medium::Water),
                self.graph.add_node(format!("{name} {label} Outlet Node"), Medium::Water),
            )
        };
        let supply = side("Supply");
        let demand = side("Demand");
        self.graph.add_component(
            format!("{name} Supply to Demand"),
            supply.outlet,
            demand.inlet,
        );
        self.graph.add_component(
            format!("{name} Demand to Supply"),
            demand.outlet,
            supply.inlet,
        );
        debug!(plant_loop = %name, role = ?role, "added plant loop");
        self.plant_loops.push(PlantLoop {
            id,
            name,
            role,
            sizing,
            min_temp_c: 0.0,
            max_temp_c: 100.0,
            supply,
            demand,
            setpoint_managers: Vec::new(),
            common_pipe: CommonPipe::None,
            load_distribution: LoadDistribution::Optimal,
            properties: Default::default(),
        });
        id
    }

    pub fn plant_loops(&self) -> &[PlantLoop] {
        &self.plant_loops
    }

    pub fn plant_loop(&self, id: LoopId) -> HsResult<&PlantLoop> {
        slot(&self.plant_loops, id, "plant loop")
    }

    pub fn plant_loop_mut(&mut self, id: LoopId) -> HsResult<&mut PlantLoop> {
        slot_mut(&mut self.plant_loops, id, "plant loop")
    }

    pub fn plant_loop_by_name(&self, name: &str) -> Option<LoopId> {
        self.plant_loops.iter().find(|l| l.name == name).map(|l| l.id)
    }

    pub fn plant_loop_named(&self, name: &str) -> HsResult<LoopId> {
        self.plant_loop_by_name(name)
            .ok_or_else(|| HsError::not_found("PlantLoop", name))
    }

    /// Register a loop as the shared loop for `(role, canonical_name)`.
    pub fn register_loop(&mut self, role: LoopRole, canonical_name: &str, id: LoopId) -> HsResult<()> {
        slot(&self.plant_loops, id, "plant loop")?;
        self.loop_registry.register(LoopKey::new(role, canonical_name), id);
        Ok(())
    }

    pub fn registered_loops(&self, role: LoopRole, canonical_name: &str) -> &[LoopId] {
        self.loop_registry.lookup(role, canonical_name)
    }

    pub fn loop_registry(&self) -> &LoopRegistry {
        &self.loop_registry
    }

    fn place_on_header(
        &mut self,
        id: LoopId,
        equip: EquipId,
        demand: bool,
        header: Header,
    ) -> HsResult<()> {
        let name = self.equipment_name(equip)?;
        let plant = slot_mut(&mut self.plant_loops, id, "plant loop")?;
        let side = if demand {
            &mut plant.demand
        } else {
            &mut plant.supply
        };
        let segment = match header {
            Header::Inlet => &mut side.inlet_series,
            Header::Outlet => &mut side.outlet_series,
        };
        let comp = segment.push_back(&mut self.graph, equip, &name)?;
        let at = if demand {
            Attachment::PlantDemand(id)
        } else {
            Attachment::PlantSupply(id)
        };
        self.record_placement(equip, Placement { comp, at })
    }

    /// Append to the supply header upstream of the splitter.
    pub fn add_supply_inlet_equipment(&mut self, id: LoopId, equip: EquipId) -> HsResult<()> {
        self.place_on_header(id, equip, false, Header::Inlet)
    }

    /// Append to the supply header downstream of the mixer.
    pub fn add_supply_outlet_equipment(&mut self, id: LoopId, equip: EquipId) -> HsResult<()> {
        self.place_on_header(id, equip, false, Header::Outlet)
    }

    pub fn add_demand_inlet_equipment(&mut self, id: LoopId, equip: EquipId) -> HsResult<()> {
        self.place_on_header(id, equip, true, Header::Inlet)
    }

    pub fn add_demand_outlet_equipment(&mut self, id: LoopId, equip: EquipId) -> HsResult<()> {
        self.place_on_header(id, equip, true, Header::Outlet)
    }

    fn add_branch(&mut self, id: LoopId, demand: bool, equipment: &[EquipId]) -> HsResult<usize> {
        if equipment.is_empty() {
            return Err(HsError::InvalidArg {
                what: "a loop branch needs at least one piece of equipment",
            });
        }
        let names = equipment
            .iter()
            .map(|&e| self.equipment_name(e))
            .collect::<HsResult<Vec<_>>>()?;
        let plant = slot_mut(&mut self.plant_loops, id, "plant loop")?;
        let (label, side) = if demand {
            ("Demand", &mut plant.demand)
        } else {
            ("Supply", &mut plant.supply)
        };
        let index = side.branches.len();
        let branch_outlet = self.graph.add_node(
            format!("{} {label} Branch {} Outlet Node", plant.name, index + 1),
            Medium::Water,
        );
        self.graph.add_component(
            format!("{} {label} Branch {} Mixer Connection", plant.name, index + 1),
            branch_outlet,
            side.mixer,
        );
        let mut segment = Segment::new(side.splitter, branch_outlet);
        let mut placed = Vec::with_capacity(equipment.len());
        for (&equip, name) in equipment.iter().zip(&names) {
            placed.push((equip, segment.push_back(&mut self.graph, equip, name)?));
        }
        side.branches.push(segment);

        let at = if demand {
            Attachment::PlantDemand(id)
        } else {
            Attachment::PlantSupply(id)
        };
        for (equip, comp) in placed {
            self.record_placement(equip, Placement { comp, at })?;
        }
        Ok(index)
    }

    /// Add a parallel supply branch holding `equipment` in flow order.
    pub fn add_supply_branch(&mut self, id: LoopId, equipment: &[EquipId]) -> HsResult<usize> {
        self.add_branch(id, false, equipment)
    }

    /// Add a parallel demand branch holding `equipment` in flow order.
    pub fn add_demand_branch(&mut self, id: LoopId, equipment: &[EquipId]) -> HsResult<usize> {
        self.add_branch(id, true, equipment)
    }

    /// Move `equip` from its supply branch to the end of the supply inlet
    /// header. Returns `false` if it was not on a supply branch.
    pub fn relocate_to_supply_inlet(&mut self, id: LoopId, equip: EquipId) -> HsResult<bool> {
        let name = self.equipment_name(equip)?;
        let plant = slot_mut(&mut self.plant_loops, id, "plant loop")?;
        let Some(branch) = plant.supply.branch_containing(equip) else {
            return Ok(false);
        };
        let Some(item) = plant.supply.branches[branch].detach(&mut self.graph, equip)? else {
            return Ok(false);
        };
        plant
            .supply
            .inlet_series
            .link_back(&mut self.graph, item, &name)?;
        debug!(equipment = %name, plant_loop = %plant.name, "moved equipment to supply inlet");
        Ok(true)
    }

    /// Pumps on the supply side, in flow order.
    pub fn loop_pumps(&self, id: LoopId) -> HsResult<Vec<EquipId>> {
        let plant = self.plant_loop(id)?;
        Ok(plant
            .supply_equipment()
            .filter(|&e| {
                self.equipment(e)
                    .is_ok_and(|eq| matches!(eq.kind, EquipmentKind::Pump(_)))
            })
            .collect())
    }

    // ---- air loops ----

    pub fn add_air_loop(&mut self, name: &str) -> AirLoopId {
        let id = AirLoopId::next_for(self.air_loops.len());
        let name = self.names.claim(name);
        let supply_inlet = self.graph.add_node(format!("{name} Supply Inlet Node"), Medium::Air);
        let supply_outlet = self.graph.add_node(format!("{name} Supply Outlet Node"), Medium::Air);
        let demand_inlet = self.graph.add_node(format!("{name} Demand Inlet Node"), Medium::Air);
        let demand_outlet = self.graph.add_node(format!("{name} Demand Outlet Node"), Medium::Air);
        self.graph
            .add_component(format!("{name} Supply Duct"), supply_outlet, demand_inlet);
        self.graph
            .add_component(format!("{name} Return Duct"), demand_outlet, supply_inlet);
        debug!(air_loop = %name, "added air loop");
        self.air_loops.push(AirLoop {
            id,
            name,
            supply_inlet,
            supply_outlet,
            demand_inlet,
            demand_outlet,
            supply: Segment::new(supply_inlet, supply_outlet),
            supply_fan: None,
            heating_coil: None,
            cooling_coil: None,
            supplemental_heating_coil: None,
            humidifier: None,
            evaporative_cooler: None,
            outdoor_air: None,
            setpoint_managers: Vec::new(),
            terminals: Vec::new(),
            sizing: AirLoopSizing::default(),
            availability: None,
            night_cycle: NightCycle::StayOff,
            dedicated_outdoor_air: false,
        });
        id
    }

    pub fn air_loops(&self) -> &[AirLoop] {
        &self.air_loops
    }

    pub fn air_loop(&self, id: AirLoopId) -> HsResult<&AirLoop> {
        slot(&self.air_loops, id, "air loop")
    }

    pub fn air_loop_mut(&mut self, id: AirLoopId) -> HsResult<&mut AirLoop> {
        slot_mut(&mut self.air_loops, id, "air loop")
    }

    pub fn air_loop_by_name(&self, name: &str) -> Option<AirLoopId> {
        self.air_loops.iter().find(|a| a.name == name).map(|a| a.id)
    }

    /// Place `equip` on the supply path and bind it to `slot`.
    pub fn add_air_supply_equipment(
        &mut self,
        id: AirLoopId,
        equip: EquipId,
        slot_kind: AirSlot,
        end: SupplyEnd,
    ) -> HsResult<()> {
        let name = self.equipment_name(equip)?;
        let air = slot_mut(&mut self.air_loops, id, "air loop")?;
        if air.slot(slot_kind).is_some() {
            return Err(HsError::Invariant {
                what: format!("air loop '{}' already has a {slot_kind:?}", air.name),
            });
        }
        let comp = match end {
            SupplyEnd::Inlet => air.supply.push_front(&mut self.graph, equip, &name)?,
            SupplyEnd::Outlet => air.supply.push_back(&mut self.graph, equip, &name)?,
        };
        *air.slot_mut(slot_kind) = Some(equip);
        self.record_placement(
            equip,
            Placement {
                comp,
                at: Attachment::AirSupply(id),
            },
        )
    }

    /// Attach an outdoor-air mixer at the supply inlet together with its
    /// controller and side streams.
    pub fn add_outdoor_air_system(
        &mut self,
        id: AirLoopId,
        controller: OutdoorAirController,
    ) -> HsResult<EquipId> {
        let air_name = self.air_loop(id)?.name.clone();
        if self.air_loop(id)?.outdoor_air.is_some() {
            return Err(HsError::Invariant {
                what: format!("air loop '{air_name}' already has an outdoor air system"),
            });
        }
        let mixer = self.add_equipment(&format!("{air_name} OA Mixer"), EquipmentKind::OutdoorAirMixer);
        let mixer_name = self.equipment_name(mixer)?;
        let outdoor_air_node = self.graph
            .add_node(format!("{air_name} Outdoor Air Node"), Medium::Air);
        let mixer_oa_inlet = self.graph
            .add_node(format!("{mixer_name} Outdoor Air Inlet Node"), Medium::Air);
        let mixer_relief_outlet = self.graph
            .add_node(format!("{mixer_name} Relief Outlet Node"), Medium::Air);
        let relief_node = self.graph.add_node(format!("{air_name} Relief Air Node"), Medium::Air);

        let air = slot_mut(&mut self.air_loops, id, "air loop")?;
        let comp = air.supply.push_front(&mut self.graph, mixer, &mixer_name)?;
        air.outdoor_air = Some(OutdoorAirSystem {
            mixer,
            controller,
            outdoor_air_node,
            relief_node,
            oa_stream: Segment::new(outdoor_air_node, mixer_oa_inlet),
            relief_stream: Segment::new(mixer_relief_outlet, relief_node),
            heat_recovery: None,
        });
        self.record_placement(
            mixer,
            Placement {
                comp,
                at: Attachment::AirSupply(id),
            },
        )?;
        Ok(mixer)
    }

    /// Place an air-to-air exchanger across the outdoor-air and relief
    /// streams. The outdoor-air system must already exist.
    pub fn add_heat_recovery(&mut self, id: AirLoopId, equip: EquipId) -> HsResult<()> {
        let name = self.equipment_name(equip)?;
        let air = slot_mut(&mut self.air_loops, id, "air loop")?;
        let air_name = air.name.clone();
        let oas = air
            .outdoor_air
            .as_mut()
            .ok_or_else(|| HsError::not_found("OutdoorAirSystem", air_name.clone()))?;
        if oas.heat_recovery.is_some() {
            return Err(HsError::Invariant {
                what: format!("air loop '{air_name}' already has heat recovery"),
            });
        }
        let primary = oas.oa_stream.push_back(&mut self.graph, equip, &name)?;
        let secondary = oas
            .relief_stream
            .push_front(&mut self.graph, equip, &format!("{name} Secondary"))?;
        oas.heat_recovery = Some(equip);
        self.record_placement(
            equip,
            Placement {
                comp: primary,
                at: Attachment::OutdoorAirStream(id),
            },
        )?;
        self.record_placement(
            equip,
            Placement {
                comp: secondary,
                at: Attachment::ReliefStream(id),
            },
        )
    }

    pub fn outdoor_air_controller_mut(&mut self, id: AirLoopId) -> HsResult<&mut OutdoorAirController> {
        let air = slot_mut(&mut self.air_loops, id, "air loop")?;
        let air_name = air.name.clone();
        air.controller_mut()
            .ok_or_else(|| HsError::not_found("OutdoorAirSystem", air_name))
    }

    // ---- terminals and zone equipment ----

    /// Connect `zone` to the demand side of an air loop through a terminal.
    pub fn add_terminal(
        &mut self,
        air_id: AirLoopId,
        zone_id: ZoneId,
        spec: TerminalSpec,
    ) -> HsResult<TerminalId> {
        let min_flow_fraction =
            ensure_fraction(spec.min_flow_fraction, "terminal minimum flow fraction")?;
        for equip in [spec.reheat_coil, spec.fan].into_iter().flatten() {
            self.equipment(equip)?;
        }
        let zone = self.zone(zone_id)?;
        let (zone_name, zone_node) = (zone.name.clone(), zone.air_node);
        let air = self.air_loop(air_id)?;
        let (air_name, demand_inlet, demand_outlet) =
            (air.name.clone(), air.demand_inlet, air.demand_outlet);

        let id = TerminalId::next_for(self.terminals.len());
        let name = self
            .names
            .claim(&format!("{zone_name} {} Terminal", terminal_label(spec.kind)));
        let comp = self.graph.add_component(&name, demand_inlet, zone_node);
        self.graph
            .add_component(format!("{zone_name} Return to {air_name}"), zone_node, demand_outlet);

        debug!(terminal = %name, zone = %zone_name, air_loop = %air_name, "added terminal");
        self.terminals.push(Terminal {
            id,
            name,
            kind: spec.kind,
            air_loop: air_id,
            zone: zone_id,
            reheat_coil: spec.reheat_coil,
            fan: spec.fan,
            min_flow_fraction,
            damper_action: spec.damper_action,
            max_reheat_air_c: spec.max_reheat_air_c,
            comp,
        });
        slot_mut(&mut self.air_loops, air_id, "air loop")?
            .terminals
            .push(id);
        slot_mut(&mut self.zones, zone_id, "zone")?
            .equipment
            .push(ZoneEquipmentRef::Terminal(id));
        Ok(id)
    }

    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    pub fn terminal(&self, id: TerminalId) -> HsResult<&Terminal> {
        slot(&self.terminals, id, "terminal")
    }

    pub fn terminal_mut(&mut self, id: TerminalId) -> HsResult<&mut Terminal> {
        slot_mut(&mut self.terminals, id, "terminal")
    }

    pub fn add_zone_hvac(
        &mut self,
        zone_id: ZoneId,
        name: &str,
        spec: ZoneHvacSpec,
    ) -> HsResult<ZoneHvacId> {
        self.zone(zone_id)?;
        if let Some(schedule) = spec.availability {
            self.schedule(schedule)?;
        }
        let id = ZoneHvacId::next_for(self.zone_hvac.len());
        for equip in spec.components() {
            self.equipment_mut(equip)?.container = Some(id);
        }
        let name = self.names.claim(name);
        debug!(zone_hvac = %name, class = spec.kind.class(), "added zone equipment");
        self.zone_hvac.push(ZoneHvac {
            id,
            name,
            zone: zone_id,
            kind: spec.kind,
            fan: spec.fan,
            heating_coil: spec.heating_coil,
            cooling_coil: spec.cooling_coil,
            supplemental_heating_coil: spec.supplemental_heating_coil,
            heat_recovery: spec.heat_recovery,
            capacity_control: spec.capacity_control,
            outdoor_air: spec.outdoor_air,
            availability: spec.availability,
        });
        slot_mut(&mut self.zones, zone_id, "zone")?
            .equipment
            .push(ZoneEquipmentRef::ZoneHvac(id));
        Ok(id)
    }

    pub fn zone_hvac_units(&self) -> &[ZoneHvac] {
        &self.zone_hvac
    }

    pub fn zone_hvac(&self, id: ZoneHvacId) -> HsResult<&ZoneHvac> {
        slot(&self.zone_hvac, id, "zone hvac")
    }

    // ---- controls ----

    pub fn add_setpoint_manager(
        &mut self,
        owner: SpmOwner,
        mut spm: SetpointManager,
    ) -> HsResult<SpmId> {
        match owner {
            SpmOwner::PlantLoop(id) => {
                self.plant_loop(id)?;
            }
            SpmOwner::AirLoop(id) => {
                self.air_loop(id)?;
            }
        }
        let id = SpmId::next_for(self.setpoint_managers.len());
        spm.name = self.names.claim(&spm.name);
        debug!(setpoint_manager = %spm.name, node = %spm.node, "added setpoint manager");
        self.setpoint_managers.push(spm);
        match owner {
            SpmOwner::PlantLoop(lp) => self.plant_loop_mut(lp)?.setpoint_managers.push(id),
            SpmOwner::AirLoop(air) => self.air_loop_mut(air)?.setpoint_managers.push(id),
        }
        Ok(id)
    }

    pub fn setpoint_managers(&self) -> &[SetpointManager] {
        &self.setpoint_managers
    }

    pub fn setpoint_manager(&self, id: SpmId) -> HsResult<&SetpointManager> {
        slot(&self.setpoint_managers, id, "setpoint manager")
    }

    /// Setpoint managers writing onto `node`.
    pub fn setpoint_managers_on(&self, node: NodeId) -> impl Iterator<Item = &SetpointManager> {
        self.setpoint_managers.iter().filter(move |s| s.node == node)
    }

    pub fn add_program(&mut self, mut program: ControlProgram) -> ProgramId {
        let id = ProgramId::next_for(self.programs.len());
        program.name = self.names.claim(&program.name);
        debug!(program = %program.name, "added control program");
        self.programs.push(program);
        id
    }

    pub fn programs(&self) -> &[ControlProgram] {
        &self.programs
    }
}

fn terminal_label(kind: TerminalKind) -> &'static str {
    match kind {
        TerminalKind::Uncontrolled => "Diffuser",
        TerminalKind::VavReheat => "VAV Reheat",
        TerminalKind::VavNoReheat => "VAV",
        TerminalKind::ParallelFanPoweredReheat => "PFP",
        TerminalKind::DoasSingleDuct => "DOAS",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::{PumpControl, PumpSpec, PumpSpeed};
    use crate::plant_loop::LoopType;

    fn pump() -> EquipmentKind {
        EquipmentKind::Pump(PumpSpec {
            speed: PumpSpeed::Constant,
            rated_head_pa: 1000.0,
            motor_efficiency: 0.9,
            control: PumpControl::Intermittent,
            part_load_coefficients: None,
        })
    }

    #[test]
    fn schema_version_selects_district_heating_class() {
        assert_eq!(
            "3.6.1".parse::<SchemaVersion>().unwrap().district_heating_class(),
            "DistrictHeating"
        );
        assert_eq!(
            "3.7".parse::<SchemaVersion>().unwrap().district_heating_class(),
            "DistrictHeatingWater"
        );
        assert!("3.x".parse::<SchemaVersion>().is_err());
        assert!("3".parse::<SchemaVersion>().is_err());
        assert_eq!(SchemaVersion::new(3, 8, 0).to_string(), "3.8.0");
    }

    #[test]
    fn duplicate_loop_names_are_suffixed() {
        let mut model = Model::new();
        let sizing = PlantSizing::new(LoopType::Heating, 82.2, 11.1);
        let a = model.add_plant_loop("Hot Water Loop", LoopRole::HotWater, sizing.clone());
        let b = model.add_plant_loop("Hot Water Loop", LoopRole::HotWater, sizing);
        assert_eq!(model.plant_loop(a).unwrap().name, "Hot Water Loop");
        assert_eq!(model.plant_loop(b).unwrap().name, "Hot Water Loop 1");
    }

    #[test]
    fn relocating_a_branch_pump_moves_it_upstream_of_the_splitter() {
        let mut model = Model::new();
        let lp = model.add_plant_loop(
            "Chilled Water Loop",
            LoopRole::ChilledWater,
            PlantSizing::new(LoopType::Cooling, 6.7, 5.6),
        );
        let p = model.add_equipment("Chiller Pump", pump());
        let c = model.add_equipment("Chiller", EquipmentKind::Pipe);
        model.add_supply_branch(lp, &[p, c]).unwrap();

        assert!(model.relocate_to_supply_inlet(lp, p).unwrap());
        let plant = model.plant_loop(lp).unwrap();
        assert!(plant.supply.inlet_series.contains(p));
        assert!(!plant.supply.branches[0].contains(p));

        let (_, pump_outlet) = model.equipment_nodes(p, Attachment::PlantSupply(lp)).unwrap();
        assert_eq!(pump_outlet, plant.supply.splitter);
        assert!(!model.relocate_to_supply_inlet(lp, p).unwrap());
        assert_eq!(model.loop_pumps(lp).unwrap(), vec![p]);
    }

    #[test]
    fn heat_recovery_requires_outdoor_air_system() {
        let mut model = Model::new();
        let air = model.add_air_loop("VAV System");
        let hx = model.add_equipment("ERV", EquipmentKind::Pipe);
        let err = model.add_heat_recovery(air, hx).unwrap_err();
        assert!(matches!(err, HsError::NotFound { .. }));

        model
            .add_outdoor_air_system(air, OutdoorAirController::new("VAV System OA Controller"))
            .unwrap();
        model.add_heat_recovery(air, hx).unwrap();
        assert_eq!(model.air_loop(air).unwrap().heat_recovery(), Some(hx));
        assert_eq!(model.equipment(hx).unwrap().placements.len(), 2);
    }

    #[test]
    fn air_slots_hold_one_component() {
        let mut model = Model::new();
        let air = model.add_air_loop("PSZ");
        let fan = model.add_equipment("Fan", EquipmentKind::Pipe);
        let fan2 = model.add_equipment("Fan", EquipmentKind::Pipe);
        model
            .add_air_supply_equipment(air, fan, AirSlot::SupplyFan, SupplyEnd::Inlet)
            .unwrap();
        let err = model
            .add_air_supply_equipment(air, fan2, AirSlot::SupplyFan, SupplyEnd::Inlet)
            .unwrap_err();
        assert!(matches!(err, HsError::Invariant { .. }));
    }

    #[test]
    fn unknown_handles_are_reported() {
        let model = Model::new();
        assert!(matches!(
            model.zone(Id::from_index(4)),
            Err(HsError::IndexOob { what: "zone", .. })
        ));
        assert!(matches!(
            model.schedule_named("Occupancy"),
            Err(HsError::NotFound { .. })
        ));
    }
}
