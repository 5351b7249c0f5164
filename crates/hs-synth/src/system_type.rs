//! System type tags understood by the dispatcher.

use std::fmt;
use std::str::FromStr;

use hs_core::HsError;

const WITH_DOAS: &str = " with DOAS";
const WITH_ERVS: &str = " with ERVs";

/// One prototype HVAC system archetype. The compound variants pair a
/// ventilation system with a zone-conditioning system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SystemType {
    Ptac,
    Pthp,
    PszAc,
    PszHp,
    PszVav,
    PvavReheat,
    PvavPfpBoxes,
    VavReheat,
    VavNoReheat,
    VavPfpBoxes,
    VavGasReheat,
    Doas,
    DoasColdSupply,
    Ervs,
    FanCoil,
    WaterSourceHeatPumps,
    GroundSourceHeatPumps,
    Baseboards,
    UnitHeaters,
    WindowAc,
    ResidentialAc,
    ForcedAirFurnace,
    ResidentialAirSourceHeatPump,
    EvaporativeCooler,
    WithDoas(Box<SystemType>),
    WithErvs(Box<SystemType>),
}

impl SystemType {
    /// Every non-compound system type.
    pub const SIMPLE: [SystemType; 24] = [
        SystemType::Ptac,
        SystemType::Pthp,
        SystemType::PszAc,
        SystemType::PszHp,
        SystemType::PszVav,
        SystemType::PvavReheat,
        SystemType::PvavPfpBoxes,
        SystemType::VavReheat,
        SystemType::VavNoReheat,
        SystemType::VavPfpBoxes,
        SystemType::VavGasReheat,
        SystemType::Doas,
        SystemType::DoasColdSupply,
        SystemType::Ervs,
        SystemType::FanCoil,
        SystemType::WaterSourceHeatPumps,
        SystemType::GroundSourceHeatPumps,
        SystemType::Baseboards,
        SystemType::UnitHeaters,
        SystemType::WindowAc,
        SystemType::ResidentialAc,
        SystemType::ForcedAirFurnace,
        SystemType::ResidentialAirSourceHeatPump,
        SystemType::EvaporativeCooler,
    ];

    fn simple_tag(&self) -> Option<&'static str> {
        Some(match self {
            SystemType::Ptac => "PTAC",
            SystemType::Pthp => "PTHP",
            SystemType::PszAc => "PSZ-AC",
            SystemType::PszHp => "PSZ-HP",
            SystemType::PszVav => "PSZ-VAV",
            SystemType::PvavReheat => "PVAV Reheat",
            SystemType::PvavPfpBoxes => "PVAV PFP Boxes",
            SystemType::VavReheat => "VAV Reheat",
            SystemType::VavNoReheat => "VAV No Reheat",
            SystemType::VavPfpBoxes => "VAV PFP Boxes",
            SystemType::VavGasReheat => "VAV Gas Reheat",
            SystemType::Doas => "DOAS",
            SystemType::DoasColdSupply => "DOAS Cold Supply",
            SystemType::Ervs => "ERVs",
            SystemType::FanCoil => "Fan Coil",
            SystemType::WaterSourceHeatPumps => "Water Source Heat Pumps",
            SystemType::GroundSourceHeatPumps => "Ground Source Heat Pumps",
            SystemType::Baseboards => "Baseboards",
            SystemType::UnitHeaters => "Unit Heaters",
            SystemType::WindowAc => "Window AC",
            SystemType::ResidentialAc => "Residential AC",
            SystemType::ForcedAirFurnace => "Forced Air Furnace",
            SystemType::ResidentialAirSourceHeatPump => "Residential Air Source Heat Pump",
            SystemType::EvaporativeCooler => "Evaporative Cooler",
            SystemType::WithDoas(_) | SystemType::WithErvs(_) => return None,
        })
    }

    /// True for systems whose job is ventilation; those cannot be paired
    /// with another ventilation system.
    pub fn is_ventilation(&self) -> bool {
        matches!(self, SystemType::Doas | SystemType::DoasColdSupply | SystemType::Ervs)
    }

    pub fn with_doas(self) -> SystemType {
        SystemType::WithDoas(Box::new(self))
    }

    pub fn with_ervs(self) -> SystemType {
        SystemType::WithErvs(Box::new(self))
    }

    /// Every tag the dispatcher accepts, simple ones first.
    pub fn all() -> Vec<SystemType> {
        let simple = SystemType::SIMPLE.to_vec();
        let paired: Vec<_> = simple.iter().filter(|s| !s.is_ventilation()).cloned().collect();
        simple
            .into_iter()
            .chain(paired.clone().into_iter().map(SystemType::with_doas))
            .chain(paired.into_iter().map(SystemType::with_ervs))
            .collect()
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemType::WithDoas(inner) => write!(f, "{inner}{WITH_DOAS}"),
            SystemType::WithErvs(inner) => write!(f, "{inner}{WITH_ERVS}"),
            simple => f.write_str(simple.simple_tag().unwrap_or_default()),
        }
    }
}

fn parse_simple(s: &str) -> Option<SystemType> {
    SystemType::SIMPLE.into_iter().find(|t| t.simple_tag() == Some(s))
}

impl FromStr for SystemType {
    type Err = HsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || HsError::unknown_tag("system type", s);
        let s = s.trim();
        let (inner, wrap): (&str, fn(SystemType) -> SystemType) = if let Some(inner) = s.strip_suffix(WITH_DOAS) {
            (inner, SystemType::with_doas)
        } else if let Some(inner) = s.strip_suffix(WITH_ERVS) {
            (inner, SystemType::with_ervs)
        } else {
            return parse_simple(s).ok_or_else(bad);
        };
        match parse_simple(inner) {
            Some(t) if !t.is_ventilation() => Ok(wrap(t)),
            _ => Err(bad()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_tags_parse() {
        assert_eq!(
            "Fan Coil with DOAS".parse::<SystemType>().unwrap(),
            SystemType::FanCoil.with_doas()
        );
        assert_eq!(
            "PTAC with ERVs".parse::<SystemType>().unwrap(),
            SystemType::Ptac.with_ervs()
        );
    }

    #[test]
    fn ventilation_cannot_pair_with_ventilation() {
        assert!("DOAS with DOAS".parse::<SystemType>().is_err());
        assert!("ERVs with DOAS".parse::<SystemType>().is_err());
        assert!("VAV Reheat with DOAS with ERVs".parse::<SystemType>().is_err());
    }

    #[test]
    fn every_tag_displays_back_to_itself() {
        for t in SystemType::all() {
            assert_eq!(t.to_string().parse::<SystemType>().unwrap(), t);
        }
    }

    #[test]
    fn all_lists_both_compound_forms_of_every_conditioning_system() {
        let all = SystemType::all();
        let conditioning: Vec<_> = SystemType::SIMPLE.into_iter().filter(|s| !s.is_ventilation()).collect();
        assert_eq!(all.len(), SystemType::SIMPLE.len() + 2 * conditioning.len());
        for s in conditioning {
            assert!(all.contains(&s.clone().with_doas()), "{s} with DOAS missing");
            assert!(all.contains(&s.with_ervs()));
        }
        assert!(!all.contains(&SystemType::Doas.with_ervs()));
    }

    #[test]
    fn unknown_tag_is_an_error() {
        assert!("Radiant Slab".parse::<SystemType>().is_err());
    }
}
