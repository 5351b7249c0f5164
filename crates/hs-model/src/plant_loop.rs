//! Plant loops: two loop sides, each an inlet header, parallel branches and
//! an outlet header.
//!
//! ```text
//! inlet --[inlet series]--> splitter --[branch]--> branch outlet --> mixer --[outlet series]--> outlet
//!                                    \-[branch]--> branch outlet -/
//! ```

use std::collections::BTreeMap;
use std::fmt;

use hs_core::{EquipId, LoopId, NodeId, SpmId};
use serde::{Deserialize, Serialize};

use crate::segment::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoopRole {
    HotWater,
    ChilledWater,
    CondenserWater,
    HeatPump,
    GroundHeatExchanger,
    Ambient,
}

impl LoopRole {
    pub const ALL: [LoopRole; 6] = [
        LoopRole::HotWater,
        LoopRole::ChilledWater,
        LoopRole::CondenserWater,
        LoopRole::HeatPump,
        LoopRole::GroundHeatExchanger,
        LoopRole::Ambient,
    ];

    /// Name a loop of this role is created and registered under.
    pub fn canonical_name(self) -> &'static str {
        match self {
            LoopRole::HotWater => "Hot Water Loop",
            LoopRole::ChilledWater => "Chilled Water Loop",
            LoopRole::CondenserWater => "Condenser Water Loop",
            LoopRole::HeatPump => "Heat Pump Loop",
            LoopRole::GroundHeatExchanger => "Ground HX Loop",
            LoopRole::Ambient => "Ambient Loop",
        }
    }
}

impl fmt::Display for LoopRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopType {
    Heating,
    Cooling,
    Condenser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizingOption {
    Coincident,
    NonCoincident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantSizing {
    pub loop_type: LoopType,
    pub design_exit_temp_c: f64,
    pub design_delta_t_k: f64,
    pub sizing_option: SizingOption,
}

impl PlantSizing {
    pub fn new(loop_type: LoopType, design_exit_temp_c: f64, design_delta_t_k: f64) -> Self {
        Self {
            loop_type,
            design_exit_temp_c,
            design_delta_t_k,
            sizing_option: SizingOption::NonCoincident,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CommonPipe {
    #[default]
    None,
    CommonPipe,
    TwoWayCommonPipe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadDistribution {
    #[default]
    Optimal,
    SequentialLoad,
    UniformLoad,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopSide {
    pub inlet: NodeId,
    pub splitter: NodeId,
    pub mixer: NodeId,
    pub outlet: NodeId,
    pub inlet_series: Segment,
    pub branches: Vec<Segment>,
    pub outlet_series: Segment,
}

impl LoopSide {
    pub(crate) fn new(inlet: NodeId, splitter: NodeId, mixer: NodeId, outlet: NodeId) -> Self {
        Self {
            inlet,
            splitter,
            mixer,
            outlet,
            inlet_series: Segment::new(inlet, splitter),
            branches: Vec::new(),
            outlet_series: Segment::new(mixer, outlet),
        }
    }

    /// All equipment on this side: inlet header, branches in order, outlet
    /// header.
    pub fn equipment(&self) -> impl Iterator<Item = EquipId> + '_ {
        self.inlet_series
            .equipment()
            .chain(self.branches.iter().flat_map(Segment::equipment))
            .chain(self.outlet_series.equipment())
    }

    pub fn branch_containing(&self, equip: EquipId) -> Option<usize> {
        self.branches.iter().position(|b| b.contains(equip))
    }

    /// Node at the end of each branch, before the mixer.
    pub fn branch_outlet_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.branches.iter().map(Segment::to_node)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantLoop {
    pub id: LoopId,
    pub name: String,
    pub role: LoopRole,
    pub sizing: PlantSizing,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub supply: LoopSide,
    pub demand: LoopSide,
    pub setpoint_managers: Vec<SpmId>,
    pub common_pipe: CommonPipe,
    pub load_distribution: LoadDistribution,
    /// Free-form properties, e.g. the primary/secondary relationship.
    pub properties: BTreeMap<String, String>,
}

impl PlantLoop {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn supply_equipment(&self) -> impl Iterator<Item = EquipId> + '_ {
        self.supply.equipment()
    }

    pub fn demand_equipment(&self) -> impl Iterator<Item = EquipId> + '_ {
        self.demand.equipment()
    }
}
