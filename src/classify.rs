//! Classifier/scaler stage: decide how one parameter is rendered and compute
//! its display-scaled control values.
//!
//! Classification is evaluated in order, first match wins: ranged control,
//! enumerated control, skip. Every decision is explicit — a parameter that
//! produces no control comes back as [`Classification::Skipped`] with a
//! reason, so the outcome is inspectable rather than silently swallowed. A
//! failure while classifying one parameter never aborts the rest of the set.

use tracing::{debug, warn};

use crate::descriptor::{
    ControlKind, EnumEntry, EnumeratedControl, ParameterDescriptor, RangedControl,
};
use crate::error::PanelResult;
use crate::metadata::{MetadataCatalogue, MetadataKey};
use crate::validation::{format_value, parse_bounds, parse_or_zero};

/// Unit classes whose controls get a display scale: catalogue label,
/// scale divisor for the increment, human-readable relabel.
const SCALED_UNITS: [(&str, f64, &str); 2] = [
    ("centi-degrees", 100.0, "Degrees (Scaled)"),
    ("centimeters", 100.0, "Meters (Scaled)"),
];

/// Outcome of classifying a single parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum Classification {
    /// The parameter is renderable.
    Control(ParameterDescriptor),
    /// The parameter produced no control; the reason is kept for inspection.
    Skipped {
        name: String,
        reason: SkipReason,
    },
}

/// Why a parameter was left out of the presentation model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The store holds no current value for this name.
    MissingValue,
    /// Neither a ranged nor an enumerated control applies — e.g. a free-form
    /// value with no declared range or enumeration.
    NoRenderableControl,
    /// A catalogue lookup failed; the message is the underlying error.
    Metadata(String),
}

/// Classifies one parameter into a descriptor, or a recorded skip.
///
/// Idempotent: identical inputs always produce identical outcomes.
pub fn classify(
    name: &str,
    display_name: &str,
    catalogue: &dyn MetadataCatalogue,
    value: Option<f64>,
) -> Classification {
    let Some(raw_value) = value else {
        warn!(parameter = name, "no current value in store, skipping");
        return Classification::Skipped {
            name: name.to_string(),
            reason: SkipReason::MissingValue,
        };
    };

    match build_descriptor(name, display_name, catalogue, raw_value) {
        Ok(Some(descriptor)) => Classification::Control(descriptor),
        Ok(None) => {
            debug!(parameter = name, "no renderable control declared");
            Classification::Skipped {
                name: name.to_string(),
                reason: SkipReason::NoRenderableControl,
            }
        }
        Err(err) => {
            warn!(parameter = name, error = %err, "metadata lookup failed, skipping");
            Classification::Skipped {
                name: name.to_string(),
                reason: SkipReason::Metadata(err.to_string()),
            }
        }
    }
}

fn build_descriptor(
    name: &str,
    display_name: &str,
    catalogue: &dyn MetadataCatalogue,
    raw_value: f64,
) -> PanelResult<Option<ParameterDescriptor>> {
    let label = format!("{display_name} ({name})");
    let units = catalogue.lookup(name, MetadataKey::Units)?;
    let description = catalogue.lookup(name, MetadataKey::Description)?;

    if let Some(control) = ranged_control(name, catalogue, raw_value, units.as_deref())? {
        // The relabelled unit string is the one shown in the description.
        let description_text = fit_description_text(control.units.as_deref(), description.as_deref());
        return Ok(Some(ParameterDescriptor {
            name: name.to_string(),
            label,
            description_text,
            control: ControlKind::Ranged(control),
        }));
    }

    if let Some(control) = enumerated_control(name, catalogue, raw_value)? {
        let description_text = fit_description_text(units.as_deref(), description.as_deref());
        return Ok(Some(ParameterDescriptor {
            name: name.to_string(),
            label,
            description_text,
            control: ControlKind::Enumerated(control),
        }));
    }

    Ok(None)
}

/// Builds a ranged control when the catalogue declares a usable range and
/// step: both attributes present, the range splitting into exactly two
/// bounds, and the increment parsing to a positive number. Anything less
/// falls through to the enumerated check.
fn ranged_control(
    name: &str,
    catalogue: &dyn MetadataCatalogue,
    raw_value: f64,
    units: Option<&str>,
) -> PanelResult<Option<RangedControl>> {
    let range_raw = catalogue.lookup(name, MetadataKey::Range)?;
    let increment_raw = catalogue.lookup(name, MetadataKey::Increment)?;
    let (Some(range_raw), Some(increment_raw)) = (range_raw, increment_raw) else {
        return Ok(None);
    };

    let mut increment = parse_or_zero(&increment_raw);
    let Some((lower, upper)) = parse_bounds(&range_raw) else {
        return Ok(None);
    };
    if increment <= 0.0 {
        return Ok(None);
    }

    let mut display_scale = 1.0;
    let mut unit_label = units.map(str::to_string);
    if let Some(unit) = units {
        for (class, scale, relabel) in SCALED_UNITS {
            if unit.eq_ignore_ascii_case(class) {
                debug!(parameter = name, units = class, scale, "applying display scale");
                display_scale = scale;
                // Bounds and current value stay in catalogue units; only the
                // step is brought into the displayed scale.
                increment /= scale;
                unit_label = Some(relabel.to_string());
                break;
            }
        }
    }

    Ok(Some(RangedControl {
        lower,
        upper,
        increment,
        value: raw_value,
        display_scale,
        units: unit_label,
        out_of_range: raw_value < lower || raw_value > upper,
    }))
}

/// Builds an enumerated control from the comma-separated `raw[:label]`
/// values attribute. A missing colon makes the label default to the raw
/// value; an attribute with no usable entries disqualifies the path.
fn enumerated_control(
    name: &str,
    catalogue: &dyn MetadataCatalogue,
    raw_value: f64,
) -> PanelResult<Option<EnumeratedControl>> {
    let Some(values_raw) = catalogue.lookup(name, MetadataKey::Values)? else {
        return Ok(None);
    };

    let entries: Vec<EnumEntry> = values_raw
        .split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            let (value, entry_label) = match entry.split_once(':') {
                Some((value, entry_label)) => (value.trim(), entry_label.trim()),
                None => (entry.trim(), entry.trim()),
            };
            EnumEntry {
                value: value.to_string(),
                label: entry_label.to_string(),
            }
        })
        .collect();
    if entries.is_empty() {
        return Ok(None);
    }

    let current = format_value(raw_value);
    let selected = entries
        .iter()
        .find(|entry| entry.value == current)
        .map(|entry| entry.value.clone());

    Ok(Some(EnumeratedControl { entries, selected }))
}

/// Builds the description block: a units line when units are present, then
/// the description with a line break inserted after every twelfth word
/// (never immediately after the first), single spaces otherwise.
pub fn fit_description_text(units: Option<&str>, description: Option<&str>) -> String {
    let mut text = String::new();

    if let Some(units) = units.filter(|units| !units.is_empty()) {
        text.push_str("Units: ");
        text.push_str(units);
        text.push('\n');
    }

    if let Some(description) = description.filter(|description| !description.is_empty()) {
        text.push_str("Description: ");
        for (index, word) in description.split_whitespace().enumerate() {
            if index > 0 {
                let previous = index - 1;
                if previous != 0 && previous % 12 == 0 {
                    text.push('\n');
                } else {
                    text.push(' ');
                }
            }
            text.push_str(word);
        }
    }

    text
}
