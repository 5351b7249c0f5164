//! Arena handles.
//!
//! Every model object lives in a `Vec` owned by the model and is addressed
//! by its position. The aliases below only document which arena a handle
//! points into; they are interchangeable at the type level.

use core::fmt;
use core::num::NonZeroU32;

/// Position in a model arena, stored one-based so `Option<Id>` costs nothing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Id(NonZeroU32);

impl Id {
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Handle for the element about to be pushed onto an arena of `len`.
    pub fn next_for(len: usize) -> Self {
        Self::from_index(u32::try_from(len).unwrap_or(u32::MAX))
    }

    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

// topology
pub type NodeId = Id;
pub type CompId = Id;
pub type PortId = Id;

// model objects
pub type ZoneId = Id;
pub type ScheduleId = Id;
pub type LoopId = Id;
pub type AirLoopId = Id;
pub type EquipId = Id;
pub type TerminalId = Id;
pub type ZoneHvacId = Id;
pub type SpmId = Id;
pub type ProgramId = Id;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_sort_by_arena_position() {
        let mut ids = vec![Id::from_index(7), Id::from_index(0), Id::from_index(3)];
        ids.sort();
        assert_eq!(ids.iter().map(|id| id.index()).collect::<Vec<_>>(), vec![0, 3, 7]);
    }

    #[test]
    fn next_for_is_one_past_the_end() {
        let zones = ["Office", "Lobby", "Corridor"];
        assert_eq!(Id::next_for(zones.len()).index(), 3);
        assert_eq!(format!("{:?}", Id::next_for(0)), "#0");
    }

    #[test]
    fn optional_handle_has_no_overhead() {
        assert_eq!(size_of::<Option<Id>>(), size_of::<u32>());
    }
}
