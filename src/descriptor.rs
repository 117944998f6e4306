//! The presentation model: one descriptor per renderable parameter.
//!
//! Descriptors are plain serde-friendly values the rendering surface
//! consumes; the engine rebuilds the whole list on every refresh and hands it
//! out by reference — nothing here is mutated in place.

use serde::Serialize;

/// One renderable parameter, ready for the rendering surface.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    /// Store key.
    pub name: String,
    /// `"Display Name (NAME)"`.
    pub label: String,
    /// Units line plus the word-wrapped description.
    pub description_text: String,
    /// How this parameter is edited.
    pub control: ControlKind,
}

/// How a parameter is rendered.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlKind {
    /// Bounded slider/stepper.
    Ranged(RangedControl),
    /// Fixed choice list.
    Enumerated(EnumeratedControl),
}

/// Control data for a bounded numeric parameter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RangedControl {
    /// Lower bound, in the units the catalogue supplied.
    pub lower: f64,
    /// Upper bound, in the units the catalogue supplied.
    pub upper: f64,
    /// Step size after display scaling.
    pub increment: f64,
    /// Current raw value (store units, unscaled).
    pub value: f64,
    /// 1 for pass-through units, 100 for the scaled unit classes.
    pub display_scale: f64,
    /// Unit label, rewritten to the human-readable form for scaled classes.
    pub units: Option<String>,
    /// The raw value lies strictly outside `[lower, upper]`.
    pub out_of_range: bool,
}

/// Control data for an enumerated parameter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnumeratedControl {
    /// Choices in catalogue order.
    pub entries: Vec<EnumEntry>,
    /// Raw value of the entry matching the current value, when one does.
    pub selected: Option<String>,
}

/// One named value of an enumerated parameter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnumEntry {
    /// Raw value as written to the store.
    pub value: String,
    /// Human-readable label.
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_kind_serializes_with_a_kind_tag() {
        let descriptor = ParameterDescriptor {
            name: "ARMING_CHECK".into(),
            label: "Arming check (ARMING_CHECK)".into(),
            description_text: String::new(),
            control: ControlKind::Enumerated(EnumeratedControl {
                entries: vec![EnumEntry {
                    value: "1".into(),
                    label: "Enabled".into(),
                }],
                selected: Some("1".into()),
            }),
        };

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["control"]["kind"], "enumerated");
        assert_eq!(json["control"]["entries"][0]["label"], "Enabled");
    }
}
