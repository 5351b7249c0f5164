//! Outdoor-air controller of an air loop's outdoor-air subsystem.

use std::fmt;
use std::str::FromStr;

use hs_core::ScheduleId;
use serde::{Deserialize, Serialize};

use crate::error::ControlError;

/// Economizer control logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EconomizerType {
    #[default]
    NoEconomizer,
    FixedDryBulb,
    FixedEnthalpy,
    DifferentialDryBulb,
    DifferentialEnthalpy,
    DifferentialDryBulbAndEnthalpy,
    FixedDewPointAndDryBulb,
    ElectronicEnthalpy,
}

impl EconomizerType {
    pub const ALL: [EconomizerType; 8] = [
        EconomizerType::NoEconomizer,
        EconomizerType::FixedDryBulb,
        EconomizerType::FixedEnthalpy,
        EconomizerType::DifferentialDryBulb,
        EconomizerType::DifferentialEnthalpy,
        EconomizerType::DifferentialDryBulbAndEnthalpy,
        EconomizerType::FixedDewPointAndDryBulb,
        EconomizerType::ElectronicEnthalpy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EconomizerType::NoEconomizer => "NoEconomizer",
            EconomizerType::FixedDryBulb => "FixedDryBulb",
            EconomizerType::FixedEnthalpy => "FixedEnthalpy",
            EconomizerType::DifferentialDryBulb => "DifferentialDryBulb",
            EconomizerType::DifferentialEnthalpy => "DifferentialEnthalpy",
            EconomizerType::DifferentialDryBulbAndEnthalpy => "DifferentialDryBulbAndEnthalpy",
            EconomizerType::FixedDewPointAndDryBulb => "FixedDewPointAndDryBulb",
            EconomizerType::ElectronicEnthalpy => "ElectronicEnthalpy",
        }
    }

    pub fn is_active(self) -> bool {
        self != EconomizerType::NoEconomizer
    }
}

impl fmt::Display for EconomizerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EconomizerType {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "Inferred" templates leave the decision to the system defaults.
        if s == "Inferred" {
            return Ok(EconomizerType::NoEconomizer);
        }
        EconomizerType::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| ControlError::UnknownTag {
                what: "economizer type",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EconomizerLockout {
    #[default]
    NoLockout,
    LockoutWithHeating,
    LockoutWithCompressor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MinimumLimitType {
    #[default]
    FixedMinimum,
    ProportionalMinimum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeatRecoveryBypass {
    #[default]
    BypassWhenWithinEconomizerLimits,
    BypassWhenOAFlowGreaterThanMinimum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutdoorAirController {
    pub name: String,
    pub economizer: EconomizerType,
    pub lockout: EconomizerLockout,
    pub minimum_limit: MinimumLimitType,
    /// Multiplies the minimum outdoor air flow; `None` means always 1.
    pub minimum_fraction_schedule: Option<ScheduleId>,
    pub maximum_fraction_schedule: Option<ScheduleId>,
    pub demand_controlled_ventilation: bool,
    pub heat_recovery_bypass: HeatRecoveryBypass,
    /// Upper dry-bulb limit for economizing, when the type uses one.
    pub economizer_max_dry_bulb_c: Option<f64>,
}

impl OutdoorAirController {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            economizer: EconomizerType::NoEconomizer,
            lockout: EconomizerLockout::NoLockout,
            minimum_limit: MinimumLimitType::FixedMinimum,
            minimum_fraction_schedule: None,
            maximum_fraction_schedule: None,
            demand_controlled_ventilation: false,
            heat_recovery_bypass: HeatRecoveryBypass::default(),
            economizer_max_dry_bulb_c: None,
        }
    }

    /// Switch the economizer logic, resetting the lockout and high limit to
    /// what that logic expects.
    pub fn set_economizer(&mut self, economizer: EconomizerType) {
        self.economizer = economizer;
        match economizer {
            EconomizerType::NoEconomizer => {
                self.lockout = EconomizerLockout::NoLockout;
                self.economizer_max_dry_bulb_c = None;
            }
            EconomizerType::FixedDryBulb | EconomizerType::FixedDewPointAndDryBulb => {
                self.lockout = EconomizerLockout::LockoutWithHeating;
                self.economizer_max_dry_bulb_c = Some(21.1);
            }
            _ => {
                self.lockout = EconomizerLockout::LockoutWithHeating;
                self.economizer_max_dry_bulb_c = None;
            }
        }
    }
}
