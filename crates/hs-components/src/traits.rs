//! Core trait for equipment factories.

use hs_core::{EquipId, HsResult, LoopId};
use hs_model::{EquipmentKind, Model};

use crate::error::ComponentResult;

/// Parameter set that can produce one piece of equipment.
///
/// Factories are pure functions of their parameters and of read-only model
/// state (schema version, loop sizing). Air-side placement is the caller's
/// job; water-side placement happens in [`EquipmentFactory::add`] when the
/// factory names a demand loop.
pub trait EquipmentFactory {
    /// Derive the equipment kind, validating parameters.
    fn kind(&self, model: &Model) -> ComponentResult<EquipmentKind>;

    /// Plant loop whose demand side this equipment draws water from.
    fn demand_loop(&self) -> Option<LoopId> {
        None
    }

    /// Add the equipment to the model under `name` (suffixed if taken) and,
    /// for water-side equipment, on its own demand branch.
    fn add(&self, model: &mut Model, name: &str) -> HsResult<EquipId> {
        let kind = self.kind(model)?;
        let id = model.add_equipment(name, kind);
        if let Some(plant) = self.demand_loop() {
            model.add_demand_branch(plant, &[id])?;
        }
        Ok(id)
    }
}
