//! Setpoint managers anchored to plant or air nodes.

use hs_core::{NodeId, ScheduleId, ZoneId};
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// Quantity a setpoint manager writes onto its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlVariable {
    Temperature,
    MinimumHumidityRatio,
    MaximumHumidityRatio,
}

/// Outdoor condition tracked by a follow-outdoor-air manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutdoorAirReference {
    WetBulb,
    DryBulb,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetpointKind {
    /// Setpoint follows a schedule.
    Scheduled {
        schedule: ScheduleId,
        variable: ControlVariable,
    },
    /// Separate high and low setpoints, both scheduled.
    ScheduledDualSetpoint { high: ScheduleId, low: ScheduleId },
    /// Linear reset between two outdoor dry-bulb temperatures.
    OutdoorAirReset {
        setpoint_at_low_oat_c: f64,
        low_oat_c: f64,
        setpoint_at_high_oat_c: f64,
        high_oat_c: f64,
    },
    /// Outdoor temperature plus an offset, clamped to `[min_c, max_c]`.
    FollowOutdoorAirTemperature {
        reference: OutdoorAirReference,
        offset_k: f64,
        min_c: f64,
        max_c: f64,
    },
    /// Supply temperature that meets the load of one control zone.
    SingleZoneReheat {
        control_zone: ZoneId,
        min_c: f64,
        max_c: f64,
    },
    /// Supply temperature reset to the warmest zone's cooling demand.
    Warmest { min_c: f64, max_c: f64 },
    /// Minimum humidity ratio over all zones with a humidistat.
    MultiZoneHumidityMinimum {
        min_ratio: f64,
        max_ratio: f64,
    },
    /// Copies the setpoint of `reference`, e.g. onto a heat recovery outlet.
    MixedAir { reference: NodeId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetpointManager {
    pub name: String,
    pub kind: SetpointKind,
    /// Node the setpoint is written onto.
    pub node: NodeId,
}

fn ordered(what: &'static str, low: f64, high: f64) -> ControlResult<()> {
    if !low.is_finite() || !high.is_finite() {
        return Err(ControlError::InvalidArg { what });
    }
    if low > high {
        return Err(ControlError::InvalidRange { what, low, high });
    }
    Ok(())
}

impl SetpointManager {
    pub fn scheduled(name: impl Into<String>, schedule: ScheduleId, node: NodeId) -> Self {
        Self {
            name: name.into(),
            kind: SetpointKind::Scheduled {
                schedule,
                variable: ControlVariable::Temperature,
            },
            node,
        }
    }

    pub fn scheduled_dual(
        name: impl Into<String>,
        high: ScheduleId,
        low: ScheduleId,
        node: NodeId,
    ) -> Self {
        Self {
            name: name.into(),
            kind: SetpointKind::ScheduledDualSetpoint { high, low },
            node,
        }
    }

    pub fn outdoor_air_reset(
        name: impl Into<String>,
        node: NodeId,
        (setpoint_at_low_oat_c, low_oat_c): (f64, f64),
        (setpoint_at_high_oat_c, high_oat_c): (f64, f64),
    ) -> ControlResult<Self> {
        ordered("outdoor air reset range", low_oat_c, high_oat_c)?;
        Ok(Self {
            name: name.into(),
            kind: SetpointKind::OutdoorAirReset {
                setpoint_at_low_oat_c,
                low_oat_c,
                setpoint_at_high_oat_c,
                high_oat_c,
            },
            node,
        })
    }

    pub fn follow_outdoor_air(
        name: impl Into<String>,
        node: NodeId,
        reference: OutdoorAirReference,
        offset_k: f64,
        min_c: f64,
        max_c: f64,
    ) -> ControlResult<Self> {
        ordered("follow outdoor air limits", min_c, max_c)?;
        Ok(Self {
            name: name.into(),
            kind: SetpointKind::FollowOutdoorAirTemperature {
                reference,
                offset_k,
                min_c,
                max_c,
            },
            node,
        })
    }

    pub fn single_zone_reheat(
        name: impl Into<String>,
        node: NodeId,
        control_zone: ZoneId,
        min_c: f64,
        max_c: f64,
    ) -> ControlResult<Self> {
        ordered("single zone reheat supply air temperature", min_c, max_c)?;
        Ok(Self {
            name: name.into(),
            kind: SetpointKind::SingleZoneReheat {
                control_zone,
                min_c,
                max_c,
            },
            node,
        })
    }

    pub fn warmest(
        name: impl Into<String>,
        node: NodeId,
        min_c: f64,
        max_c: f64,
    ) -> ControlResult<Self> {
        ordered("warmest supply air temperature", min_c, max_c)?;
        Ok(Self {
            name: name.into(),
            kind: SetpointKind::Warmest { min_c, max_c },
            node,
        })
    }

    pub fn multizone_humidity_minimum(
        name: impl Into<String>,
        node: NodeId,
        min_ratio: f64,
        max_ratio: f64,
    ) -> ControlResult<Self> {
        ordered("humidity ratio", min_ratio, max_ratio)?;
        if min_ratio < 0.0 {
            return Err(ControlError::InvalidArg {
                what: "humidity ratio must be non-negative",
            });
        }
        Ok(Self {
            name: name.into(),
            kind: SetpointKind::MultiZoneHumidityMinimum {
                min_ratio,
                max_ratio,
            },
            node,
        })
    }

    pub fn mixed_air(name: impl Into<String>, node: NodeId, reference: NodeId) -> Self {
        Self {
            name: name.into(),
            kind: SetpointKind::MixedAir { reference },
            node,
        }
    }

    /// Same control, anchored to a different node.
    pub fn clone_to(&self, name: impl Into<String>, node: NodeId) -> Self {
        Self {
            name: name.into(),
            kind: self.kind.clone(),
            node,
        }
    }

    /// Setpoint produced for an outdoor temperature, when the kind depends
    /// only on outdoor conditions.
    pub fn setpoint_for_outdoor(&self, oat_c: f64) -> Option<f64> {
        match self.kind {
            SetpointKind::OutdoorAirReset {
                setpoint_at_low_oat_c,
                low_oat_c,
                setpoint_at_high_oat_c,
                high_oat_c,
            } => {
                if oat_c <= low_oat_c {
                    Some(setpoint_at_low_oat_c)
                } else if oat_c >= high_oat_c {
                    Some(setpoint_at_high_oat_c)
                } else {
                    let frac = (oat_c - low_oat_c) / (high_oat_c - low_oat_c);
                    Some(
                        setpoint_at_low_oat_c
                            + frac * (setpoint_at_high_oat_c - setpoint_at_low_oat_c),
                    )
                }
            }
            SetpointKind::FollowOutdoorAirTemperature {
                offset_k,
                min_c,
                max_c,
                ..
            } => Some((oat_c + offset_k).clamp(min_c, max_c)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_core::Id;

    #[test]
    fn outdoor_reset_interpolates_and_clamps() {
        let spm = SetpointManager::outdoor_air_reset(
            "HW Reset",
            Id::from_index(0),
            (82.2, -6.7),
            (65.6, 10.0),
        )
        .unwrap();
        assert_eq!(spm.setpoint_for_outdoor(-20.0), Some(82.2));
        assert_eq!(spm.setpoint_for_outdoor(30.0), Some(65.6));
        let mid = spm.setpoint_for_outdoor(1.65).unwrap();
        assert!((mid - 73.9).abs() < 1e-9);
    }

    #[test]
    fn follow_outdoor_air_clamps_to_limits() {
        let spm = SetpointManager::follow_outdoor_air(
            "CW Temp",
            Id::from_index(3),
            OutdoorAirReference::WetBulb,
            3.0,
            21.1,
            29.4,
        )
        .unwrap();
        assert_eq!(spm.setpoint_for_outdoor(10.0), Some(21.1));
        assert_eq!(spm.setpoint_for_outdoor(40.0), Some(29.4));
        assert_eq!(spm.setpoint_for_outdoor(22.0), Some(25.0));
    }

    #[test]
    fn inverted_limits_are_rejected() {
        let err = SetpointManager::single_zone_reheat(
            "SZ Reheat",
            Id::from_index(0),
            Id::from_index(0),
            50.0,
            12.8,
        )
        .unwrap_err();
        assert!(matches!(err, ControlError::InvalidRange { .. }));
    }

    #[test]
    fn clone_keeps_kind() {
        let spm = SetpointManager::scheduled("CHW Temp", Id::from_index(1), Id::from_index(2));
        let copy = spm.clone_to("CHW Temp Branch", Id::from_index(9));
        assert_eq!(copy.kind, spm.kind);
        assert_eq!(copy.node, Id::from_index(9));
        assert_eq!(spm.setpoint_for_outdoor(10.0), None);
    }

    proptest::proptest! {
        #[test]
        fn reset_stays_between_its_endpoints(oat in -40.0_f64..50.0) {
            let spm = SetpointManager::outdoor_air_reset(
                "HW Reset",
                Id::from_index(0),
                (82.2, -6.7),
                (65.6, 10.0),
            )
            .unwrap();
            let sp = spm.setpoint_for_outdoor(oat).unwrap();
            proptest::prop_assert!((65.6..=82.2).contains(&sp));
        }
    }
}
