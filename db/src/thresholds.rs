//! Severity threshold evaluation for pollutant readings.
//!
//! A fixed table defines warning/alert/emergency bounds for PM2.5, PM10
//! and the Air Quality Index. Readings for any other pollutant never
//! produce exceedances.

use serde::Serialize;
use strum::Display;

use crate::models::measurement::PollutantReading;
use crate::models::measurement_reading::Pollutant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Warning,
    Alert,
    Emergency,
}

/// A derived fact that a reading's value crossed a severity threshold.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Exceedance {
    pub pollutant: Pollutant,
    pub value: f64,
    pub threshold: f64,
    pub severity: Severity,
    /// value/threshold, formatted to two decimal places.
    pub ratio: String,
}

struct ThresholdSet {
    warning: f64,
    alert: f64,
    emergency: f64,
}

fn thresholds_for(pollutant: &Pollutant) -> Option<ThresholdSet> {
    match pollutant {
        Pollutant::Pm25 => Some(ThresholdSet {
            warning: 25.0,
            alert: 35.0,
            emergency: 75.0,
        }),
        Pollutant::Pm10 => Some(ThresholdSet {
            warning: 50.0,
            alert: 75.0,
            emergency: 150.0,
        }),
        Pollutant::AirQualityIndex => Some(ThresholdSet {
            warning: 50.0,
            alert: 100.0,
            emergency: 150.0,
        }),
        _ => None,
    }
}

/// Evaluates each reading against the threshold table and returns one
/// exceedance per reading whose value strictly exceeds a bound. The
/// highest exceeded tier wins; output order follows input order.
pub fn evaluate(pollutants: &[PollutantReading]) -> Vec<Exceedance> {
    let mut exceedances = Vec::new();

    for reading in pollutants {
        let Some(set) = thresholds_for(&reading.pollutant) else {
            continue;
        };

        let tier = if reading.value > set.emergency {
            Some((Severity::Emergency, set.emergency))
        } else if reading.value > set.alert {
            Some((Severity::Alert, set.alert))
        } else if reading.value > set.warning {
            Some((Severity::Warning, set.warning))
        } else {
            None
        };

        if let Some((severity, threshold)) = tier {
            exceedances.push(Exceedance {
                pollutant: reading.pollutant.clone(),
                value: reading.value,
                threshold,
                severity,
                ratio: format!("{:.2}", reading.value / threshold),
            });
        }
    }

    exceedances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::measurement_reading::{AveragingPeriod, QualityFlag, Unit};

    fn reading(pollutant: Pollutant, value: f64) -> PollutantReading {
        PollutantReading {
            pollutant,
            value,
            unit: Unit::MicrogramsPerCubicMeter,
            averaging_period: AveragingPeriod::default(),
            quality_flag: QualityFlag::default(),
        }
    }

    #[test]
    fn pm25_above_emergency_is_emergency_only() {
        let out = evaluate(&[reading(Pollutant::Pm25, 80.0)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].severity, Severity::Emergency);
        assert_eq!(out[0].threshold, 75.0);
        assert_eq!(out[0].ratio, "1.07");
    }

    #[test]
    fn pm25_above_warning_only() {
        let out = evaluate(&[reading(Pollutant::Pm25, 30.0)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].severity, Severity::Warning);
        assert_eq!(out[0].threshold, 25.0);
        assert_eq!(out[0].ratio, "1.20");
    }

    #[test]
    fn bounds_are_strict() {
        // Exactly on a bound does not exceed it.
        assert!(evaluate(&[reading(Pollutant::Pm25, 25.0)]).is_empty());

        let out = evaluate(&[reading(Pollutant::Pm10, 75.0)]);
        assert_eq!(out[0].severity, Severity::Warning);
    }

    #[test]
    fn unlisted_pollutants_never_exceed() {
        let out = evaluate(&[reading(Pollutant::Co, 9999.0)]);
        assert!(out.is_empty());
    }

    #[test]
    fn output_order_follows_input_order() {
        let out = evaluate(&[
            reading(Pollutant::AirQualityIndex, 120.0),
            reading(Pollutant::Temperature, 40.0),
            reading(Pollutant::Pm10, 60.0),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].pollutant, Pollutant::AirQualityIndex);
        assert_eq!(out[0].severity, Severity::Alert);
        assert_eq!(out[1].pollutant, Pollutant::Pm10);
        assert_eq!(out[1].severity, Severity::Warning);
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Emergency).unwrap();
        assert_eq!(json, "\"emergency\"");
    }
}
