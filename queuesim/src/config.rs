//! Run parameters for both simulation families
//!
//! Parameters can be built directly, deserialized from any serde format, or
//! parsed from raw text against a kind's schema with [`parse_parameters`].
//! Every path ends in [`Validate::validate`].

use serde::{Deserialize, Serialize};

use crate::kind::{ParameterKind, SimulationFamily, SimulationKind};
use queuesim_components::{
    validate_at_least, validate_finite, validate_finite_span, validate_invertible,
    validate_non_negative, validate_ordered, Validate, ValidationError, ValidationResult,
};

/// Parameters of a queueing run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueingParams {
    /// Number of entities that arrive
    pub count: usize,
    pub min_service: f64,
    pub max_service: f64,
    /// Mean of the exponential gap between consecutive arrivals
    pub mean_interarrival: f64,
    pub server_count: usize,
}

impl Validate for QueueingParams {
    fn validate(&self) -> ValidationResult<()> {
        validate_at_least("server_count", self.server_count, 1)?;
        validate_non_negative("min_service", self.min_service)?;
        validate_finite("max_service", self.max_service)?;
        validate_ordered("min_service", self.min_service, "max_service", self.max_service)?;
        validate_finite_span("min_service", self.min_service, "max_service", self.max_service)?;
        // The arrival rate is the reciprocal of the mean.
        validate_invertible("mean_interarrival", self.mean_interarrival)?;
        Ok(())
    }
}

/// Parameters of a sampling run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub count: usize,
    pub min_value: f64,
    pub max_value: f64,
}

impl Validate for SamplingParams {
    fn validate(&self) -> ValidationResult<()> {
        validate_finite("min_value", self.min_value)?;
        validate_finite("max_value", self.max_value)?;
        validate_ordered("min_value", self.min_value, "max_value", self.max_value)?;
        validate_finite_span("min_value", self.min_value, "max_value", self.max_value)?;
        Ok(())
    }
}

/// Parameters for either family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum SimulationParams {
    Queueing(QueueingParams),
    Sampling(SamplingParams),
}

impl SimulationParams {
    pub fn family(&self) -> SimulationFamily {
        match self {
            SimulationParams::Queueing(_) => SimulationFamily::Queueing,
            SimulationParams::Sampling(_) => SimulationFamily::Sampling,
        }
    }
}

impl Validate for SimulationParams {
    fn validate(&self) -> ValidationResult<()> {
        match self {
            SimulationParams::Queueing(params) => params.validate(),
            SimulationParams::Sampling(params) => params.validate(),
        }
    }
}

/// Read raw text values positionally against `kind`'s schema.
///
/// # Errors
///
/// - [`ValidationError::WrongArity`] if `raw` does not have one value per schema entry
/// - [`ValidationError::NotANumber`] naming the first value that does not parse
/// - any range error from [`Validate::validate`]
pub fn parse_parameters(
    kind: SimulationKind,
    raw: &[&str],
) -> Result<SimulationParams, ValidationError> {
    let schema = kind.schema();
    if raw.len() != schema.len() {
        return Err(ValidationError::WrongArity {
            kind: kind.to_string(),
            expected: schema.len(),
            actual: raw.len(),
        });
    }

    let mut counts = Vec::new();
    let mut times = Vec::new();
    for (spec, value) in schema.iter().zip(raw) {
        match spec.kind {
            ParameterKind::Count | ParameterKind::ServerCount => {
                counts.push(spec.parse_count(value)?)
            }
            ParameterKind::Time => times.push(spec.parse_time(value)?),
        }
    }

    let params = match (kind.family(), counts.as_slice(), times.as_slice()) {
        (SimulationFamily::Queueing, &[count, server_count], &[min_service, max_service, mean_interarrival]) => {
            SimulationParams::Queueing(QueueingParams {
                count,
                min_service,
                max_service,
                mean_interarrival,
                server_count,
            })
        }
        (SimulationFamily::Sampling, &[count], &[min_value, max_value]) => {
            SimulationParams::Sampling(SamplingParams {
                count,
                min_value,
                max_value,
            })
        }
        _ => {
            return Err(ValidationError::WrongArity {
                kind: kind.to_string(),
                expected: schema.len(),
                actual: raw.len(),
            })
        }
    };
    params.validate()?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queueing(server_count: usize, min: f64, max: f64, mean: f64) -> QueueingParams {
        QueueingParams {
            count: 5,
            min_service: min,
            max_service: max,
            mean_interarrival: mean,
            server_count,
        }
    }

    #[test]
    fn test_queueing_validation_names_field() {
        assert!(queueing(1, 2.0, 4.0, 3.0).validate().is_ok());
        assert!(queueing(1, 0.0, 0.0, 3.0).validate().is_ok());

        let cases = [
            (queueing(0, 2.0, 4.0, 3.0), "server_count"),
            (queueing(1, -1.0, 4.0, 3.0), "min_service"),
            (queueing(1, 5.0, 4.0, 3.0), "max_service"),
            (queueing(1, 2.0, f64::INFINITY, 3.0), "max_service"),
            (queueing(1, 2.0, 4.0, 0.0), "mean_interarrival"),
            (queueing(1, 2.0, 4.0, f64::NAN), "mean_interarrival"),
            (queueing(1, 0.0, f64::MAX, 1.0), "max_service"),
            (queueing(1, 2.0, 4.0, 5e-324), "mean_interarrival"),
        ];
        for (params, field) in cases {
            assert_eq!(params.validate().unwrap_err().field(), Some(field));
        }
    }

    #[test]
    fn test_sampling_validation() {
        let ok = SamplingParams {
            count: 0,
            min_value: -2.0,
            max_value: 2.0,
        };
        assert!(ok.validate().is_ok());
        let bad = SamplingParams {
            count: 10,
            min_value: 3.0,
            max_value: 1.0,
        };
        assert_eq!(bad.validate().unwrap_err().field(), Some("max_value"));

        let wide = SamplingParams {
            count: 3,
            min_value: -1e308,
            max_value: 1e308,
        };
        assert_eq!(wide.validate().unwrap_err().field(), Some("max_value"));
    }

    #[test]
    fn test_parse_queueing() {
        let params =
            parse_parameters(SimulationKind::Hairdresser, &["5", "2", "4", "3", "1"]).unwrap();
        assert_eq!(
            params,
            SimulationParams::Queueing(QueueingParams {
                count: 5,
                min_service: 2.0,
                max_service: 4.0,
                mean_interarrival: 3.0,
                server_count: 1,
            })
        );
        assert_eq!(params.family(), SimulationFamily::Queueing);
    }

    #[test]
    fn test_parse_sampling() {
        let params = parse_parameters(SimulationKind::NuclearReactor, &["100", "1", "5.5"]).unwrap();
        assert_eq!(
            params,
            SimulationParams::Sampling(SamplingParams {
                count: 100,
                min_value: 1.0,
                max_value: 5.5,
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_parameters(SimulationKind::Restaurant, &["5", "2"]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongArity {
                kind: "Restaurant".to_string(),
                expected: 5,
                actual: 2,
            }
        );

        let err =
            parse_parameters(SimulationKind::Restaurant, &["five", "2", "4", "3", "1"]).unwrap_err();
        assert_eq!(err.field(), Some("count"));

        let err =
            parse_parameters(SimulationKind::Restaurant, &["5", "2", "4", "3", "1.5"]).unwrap_err();
        assert_eq!(err.field(), Some("server_count"));

        let err =
            parse_parameters(SimulationKind::Restaurant, &["5", "2", "4", "3", "0"]).unwrap_err();
        assert!(matches!(err, ValidationError::ConstraintViolation { ref field, .. } if field == "server_count"));

        let err =
            parse_parameters(SimulationKind::ChemicalReaction, &["5", "x", "4"]).unwrap_err();
        assert_eq!(err.field(), Some("min_value"));
    }

    #[test]
    fn test_deserialize_tagged_params() {
        let params = SimulationParams::Sampling(SamplingParams {
            count: 3,
            min_value: 1.0,
            max_value: 2.0,
        });
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"family\":\"sampling\""));
        let back: SimulationParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
