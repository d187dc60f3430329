//! Display facts for the info panel.

use std::fmt;

use super::{BodyClass, BodyDescriptor};

/// A numeric fact that may not apply to every body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fact {
    Known(f64),
    /// The fact has no meaning for this body (e.g. the Sun's distance).
    NotApplicable,
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fact::Known(value) => f.write_str(&format_grouped(*value)),
            Fact::NotApplicable => f.write_str("N/A (star)"),
        }
    }
}

/// Rotation period shown as an absolute value plus direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotationFact {
    Known { period: f64, retrograde: bool },
    Unknown,
}

impl fmt::Display for RotationFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationFact::Known { period, retrograde } => {
                f.write_str(&format_grouped(*period))?;
                if *retrograde {
                    f.write_str(" (retrograde)")?;
                }
                Ok(())
            }
            RotationFact::Unknown => f.write_str("Unknown"),
        }
    }
}

/// What the info panel shows for a selected body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyFacts {
    pub name: String,
    /// Kilometers.
    pub radius: f64,
    /// Millions of kilometers from the Sun (or from the host for satellites).
    pub distance: Fact,
    /// Years.
    pub orbital_period: Fact,
    /// Days.
    pub rotation: RotationFact,
}

impl From<&BodyDescriptor> for BodyFacts {
    fn from(body: &BodyDescriptor) -> Self {
        let star = body.class() == BodyClass::Star;
        let known = |value: Option<f64>| match value {
            Some(v) if !star => Fact::Known(v),
            _ => Fact::NotApplicable,
        };

        Self {
            name: body.name.clone(),
            radius: body.radius,
            distance: known(body.real_distance),
            orbital_period: known(body.orbital_period),
            rotation: match body.rotation_period {
                Some(period) => RotationFact::Known {
                    period: period.abs(),
                    retrograde: period < 0.0,
                },
                None => RotationFact::Unknown,
            },
        }
    }
}

/// Format a number with thousands separators and up to three decimals,
/// trailing zeros trimmed: `696340.0` → `"696,340"`, `2439.7` → `"2,439.7"`.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        "-"
    } else {
        ""
    };

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}
