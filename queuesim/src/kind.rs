//! Simulation kinds, their display labels and parameter schemas
//!
//! The kind only selects labels and the parameter table. All queueing kinds
//! run on the same engine, and so do all sampling kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use queuesim_components::ValidationError;

/// The engine a kind runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationFamily {
    /// Entities contend for a pool of servers.
    Queueing,
    /// Independent uniform draws, no scheduler.
    Sampling,
}

impl fmt::Display for SimulationFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationFamily::Queueing => f.write_str("queueing"),
            SimulationFamily::Sampling => f.write_str("sampling"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationKind {
    Hairdresser,
    Restaurant,
    NetworkServers,
    ChemicalReaction,
    NuclearReactor,
}

/// Text a front end shows for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindLabels {
    pub title: &'static str,
    /// What arrives (or is sampled), singular
    pub entity: &'static str,
    /// What serves it; `None` for sampling kinds
    pub server: Option<&'static str>,
    /// Caption for the headline figure of a run
    pub result: &'static str,
}

/// How a raw parameter value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParameterKind {
    /// Non-negative integer
    Count,
    /// Integer, at least one
    ServerCount,
    /// Finite real number of time units
    Time,
}

impl ParameterKind {
    fn expected(self) -> &'static str {
        match self {
            ParameterKind::Count => "a non-negative integer",
            ParameterKind::ServerCount => "a positive integer",
            ParameterKind::Time => "a number",
        }
    }
}

/// One entry of a kind's parameter table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    /// Field name, as used in validation errors
    pub name: &'static str,
    pub label: &'static str,
    pub kind: ParameterKind,
}

const fn param(name: &'static str, label: &'static str, kind: ParameterKind) -> ParameterSpec {
    ParameterSpec { name, label, kind }
}

static QUEUEING_SCHEMA: [ParameterSpec; 5] = [
    param("count", "Number of arrivals", ParameterKind::Count),
    param("min_service", "Minimum service time", ParameterKind::Time),
    param("max_service", "Maximum service time", ParameterKind::Time),
    param("mean_interarrival", "Mean time between arrivals", ParameterKind::Time),
    param("server_count", "Number of servers", ParameterKind::ServerCount),
];

static SAMPLING_SCHEMA: [ParameterSpec; 3] = [
    param("count", "Number of samples", ParameterKind::Count),
    param("min_value", "Minimum reaction time", ParameterKind::Time),
    param("max_value", "Maximum reaction time", ParameterKind::Time),
];

impl SimulationKind {
    pub const ALL: [SimulationKind; 5] = [
        SimulationKind::Hairdresser,
        SimulationKind::Restaurant,
        SimulationKind::NetworkServers,
        SimulationKind::ChemicalReaction,
        SimulationKind::NuclearReactor,
    ];

    pub fn family(self) -> SimulationFamily {
        match self {
            SimulationKind::Hairdresser
            | SimulationKind::Restaurant
            | SimulationKind::NetworkServers => SimulationFamily::Queueing,
            SimulationKind::ChemicalReaction | SimulationKind::NuclearReactor => {
                SimulationFamily::Sampling
            }
        }
    }

    pub fn labels(self) -> KindLabels {
        match self {
            SimulationKind::Hairdresser => KindLabels {
                title: "Hairdresser",
                entity: "customer",
                server: Some("hairdresser"),
                result: "Average waiting time",
            },
            SimulationKind::Restaurant => KindLabels {
                title: "Restaurant",
                entity: "customer",
                server: Some("cook"),
                result: "Average waiting time",
            },
            SimulationKind::NetworkServers => KindLabels {
                title: "Network Servers",
                entity: "packet",
                server: Some("server"),
                result: "Average waiting time",
            },
            SimulationKind::ChemicalReaction => KindLabels {
                title: "Chemical Reaction",
                entity: "molecule",
                server: None,
                result: "Average reaction time",
            },
            SimulationKind::NuclearReactor => KindLabels {
                title: "Nuclear Reactor",
                entity: "reaction",
                server: None,
                result: "Average reaction time",
            },
        }
    }

    /// Ordered parameter table; raw input is read positionally against it.
    pub fn schema(self) -> &'static [ParameterSpec] {
        match self.family() {
            SimulationFamily::Queueing => &QUEUEING_SCHEMA,
            SimulationFamily::Sampling => &SAMPLING_SCHEMA,
        }
    }

    /// Stable machine name (`network_servers`).
    pub fn name(self) -> &'static str {
        match self {
            SimulationKind::Hairdresser => "hairdresser",
            SimulationKind::Restaurant => "restaurant",
            SimulationKind::NetworkServers => "network_servers",
            SimulationKind::ChemicalReaction => "chemical_reaction",
            SimulationKind::NuclearReactor => "nuclear_reactor",
        }
    }

    /// Fails with [`ValidationError::WrongFamily`] unless this kind runs on `family`.
    pub fn expect_family(self, family: SimulationFamily) -> Result<(), ValidationError> {
        if self.family() == family {
            Ok(())
        } else {
            Err(ValidationError::WrongFamily {
                kind: self.to_string(),
                family: self.family().to_string(),
                requested: family.to_string(),
            })
        }
    }
}

impl fmt::Display for SimulationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.labels().title)
    }
}

/// Error returned when a kind name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown simulation kind '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for SimulationKind {
    type Err = UnknownKind;

    /// Accepts machine names in any case, with `_`, `-` or spaces as separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        SimulationKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

impl ParameterSpec {
    pub(crate) fn parse_count(&self, raw: &str) -> Result<usize, ValidationError> {
        raw.trim().parse::<usize>().map_err(|_| self.not_a_number(raw))
    }

    pub(crate) fn parse_time(&self, raw: &str) -> Result<f64, ValidationError> {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.not_a_number(raw))
    }

    fn not_a_number(&self, raw: &str) -> ValidationError {
        ValidationError::NotANumber {
            field: self.name.to_string(),
            expected: self.kind.expected().to_string(),
            input: raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families() {
        let queueing: Vec<_> = SimulationKind::ALL
            .into_iter()
            .filter(|k| k.family() == SimulationFamily::Queueing)
            .collect();
        assert_eq!(
            queueing,
            vec![
                SimulationKind::Hairdresser,
                SimulationKind::Restaurant,
                SimulationKind::NetworkServers
            ]
        );
        assert_eq!(
            SimulationKind::NuclearReactor.family(),
            SimulationFamily::Sampling
        );
    }

    #[test]
    fn test_schema_shape() {
        let names: Vec<_> = SimulationKind::Restaurant
            .schema()
            .iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            ["count", "min_service", "max_service", "mean_interarrival", "server_count"]
        );
        assert_eq!(SimulationKind::ChemicalReaction.schema().len(), 3);
        assert_eq!(
            SimulationKind::NetworkServers.schema()[4].kind,
            ParameterKind::ServerCount
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(SimulationKind::Restaurant.labels().server, Some("cook"));
        assert_eq!(SimulationKind::NuclearReactor.labels().server, None);
        assert_eq!(SimulationKind::NetworkServers.to_string(), "Network Servers");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "network-servers".parse::<SimulationKind>(),
            Ok(SimulationKind::NetworkServers)
        );
        assert_eq!(
            " Chemical_Reaction ".parse::<SimulationKind>(),
            Ok(SimulationKind::ChemicalReaction)
        );
        assert_eq!(
            "Nuclear Reactor".parse::<SimulationKind>(),
            Ok(SimulationKind::NuclearReactor)
        );
        assert!("barbershop".parse::<SimulationKind>().is_err());
        for kind in SimulationKind::ALL {
            assert_eq!(kind.name().parse::<SimulationKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_expect_family() {
        assert!(SimulationKind::Hairdresser
            .expect_family(SimulationFamily::Queueing)
            .is_ok());
        let err = SimulationKind::Hairdresser
            .expect_family(SimulationFamily::Sampling)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Hairdresser is a queueing simulation, not a sampling one"
        );
    }

    #[test]
    fn test_parse_helpers() {
        let spec = &QUEUEING_SCHEMA[0];
        assert_eq!(spec.parse_count(" 12 "), Ok(12));
        assert!(matches!(
            spec.parse_count("-1"),
            Err(ValidationError::NotANumber { ref field, .. }) if field == "count"
        ));
        let time = &QUEUEING_SCHEMA[1];
        assert_eq!(time.parse_time("2.5"), Ok(2.5));
        assert!(time.parse_time("NaN").is_err());
        assert!(time.parse_time("abc").is_err());
    }
}
