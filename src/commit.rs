//! Commit stage: parse edited display values and write them back to the
//! store with per-field error isolation.

use std::collections::HashMap;

use tracing::warn;

use crate::descriptor::ParameterDescriptor;
use crate::error::{PanelError, PanelResult};
use crate::store::ParameterStore;
use crate::validation::parse_edit;

/// Batch result of a commit: how many writes landed and which parameters
/// failed, in descriptor order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitOutcome {
    pub succeeded: usize,
    pub failures: Vec<String>,
}

impl CommitOutcome {
    /// True when every attempted write landed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Converts a failed batch into an error naming the casualties.
    pub fn into_result(self) -> PanelResult<usize> {
        if self.failures.is_empty() {
            Ok(self.succeeded)
        } else {
            Err(PanelError::CommitFailed(self.failures))
        }
    }
}

/// Writes each edited value back to the store.
///
/// Descriptors are visited in presentation order; a descriptor with no entry
/// in `edits` is left untouched. A parse failure or store rejection is
/// recorded by name and never aborts the remaining writes — the store may
/// end up partially updated, and the caller learns exactly which names need
/// remediation. Edited values are taken as store-native units; no inverse
/// display scaling is applied.
pub fn apply_edits(
    descriptors: &[ParameterDescriptor],
    edits: &HashMap<String, String>,
    store: &dyn ParameterStore,
) -> CommitOutcome {
    let mut outcome = CommitOutcome::default();

    for descriptor in descriptors {
        let Some(edited) = edits.get(&descriptor.name) else {
            continue;
        };
        match parse_edit(edited) {
            Some(value) => match store.set(&descriptor.name, value) {
                Ok(()) => outcome.succeeded += 1,
                Err(err) => {
                    warn!(parameter = %descriptor.name, error = %err, "store rejected write");
                    outcome.failures.push(descriptor.name.clone());
                }
            },
            None => {
                warn!(parameter = %descriptor.name, value = %edited, "edited value is not numeric");
                outcome.failures.push(descriptor.name.clone());
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ControlKind, RangedControl};
    use crate::store::MemoryStore;

    fn ranged(name: &str) -> ParameterDescriptor {
        ParameterDescriptor {
            name: name.to_string(),
            label: format!("{name} ({name})"),
            description_text: String::new(),
            control: ControlKind::Ranged(RangedControl {
                lower: 0.0,
                upper: 100.0,
                increment: 1.0,
                value: 0.0,
                display_scale: 1.0,
                units: None,
                out_of_range: false,
            }),
        }
    }

    fn edits(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn one_bad_edit_among_five_fails_alone() {
        let names = ["P1", "P2", "P3", "P4", "P5"];
        let store =
            MemoryStore::with_values(names.iter().map(|name| (name.to_string(), 0.0)));
        let descriptors: Vec<_> = names.iter().map(|name| ranged(name)).collect();

        let outcome = apply_edits(
            &descriptors,
            &edits(&[
                ("P1", "1"),
                ("P2", "2"),
                ("P3", "not-a-number"),
                ("P4", "4"),
                ("P5", "5"),
            ]),
            &store,
        );

        assert_eq!(outcome.succeeded, 4);
        assert_eq!(outcome.failures, vec!["P3".to_string()]);
        assert!(!outcome.is_success());
        // The good writes landed despite the failure in the middle.
        assert_eq!(store.get("P4"), Some(4.0));
        assert_eq!(store.get("P3"), Some(0.0));
    }

    #[test]
    fn failures_report_in_descriptor_order() {
        let store = MemoryStore::with_values([("B".to_string(), 0.0), ("A".to_string(), 0.0)]);
        let descriptors = vec![ranged("B"), ranged("A")];

        let outcome = apply_edits(&descriptors, &edits(&[("A", "x"), ("B", "y")]), &store);
        assert_eq!(outcome.failures, vec!["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn store_rejection_is_a_named_failure() {
        // Descriptor left over from before the store shrank.
        let store = MemoryStore::new();
        let descriptors = vec![ranged("GONE")];

        let outcome = apply_edits(&descriptors, &edits(&[("GONE", "1")]), &store);
        assert_eq!(outcome.succeeded, 0);
        assert_eq!(outcome.failures, vec!["GONE".to_string()]);
    }

    #[test]
    fn descriptors_without_edits_are_untouched() {
        let store = MemoryStore::with_values([("P1".to_string(), 7.0)]);
        let descriptors = vec![ranged("P1")];

        let outcome = apply_edits(&descriptors, &HashMap::new(), &store);
        assert_eq!(outcome, CommitOutcome::default());
        assert!(outcome.is_success());
        assert_eq!(store.get("P1"), Some(7.0));
    }

    #[test]
    fn into_result_surfaces_the_failure_names() {
        let outcome = CommitOutcome {
            succeeded: 1,
            failures: vec!["P3".to_string()],
        };
        let err = outcome.into_result().unwrap_err();
        assert!(matches!(err, PanelError::CommitFailed(names) if names == vec!["P3".to_string()]));
    }
}
