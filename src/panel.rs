//! The parameter panel engine: owns the descriptor list and drives the
//! refresh/activation flow.
//!
//! The panel moves through `Empty → Loading → Populated`; refresh failures
//! are recorded in `last_refresh_error` without halting the flow, and a
//! refresh that finds no data leaves the previously built descriptors in
//! place. The descriptor list is exclusively owned and rebuilt wholesale on
//! every refresh — never patched incrementally.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::classify::{classify, Classification, SkipReason};
use crate::commit::{apply_edits, CommitOutcome};
use crate::descriptor::ParameterDescriptor;
use crate::link::ParameterLink;
use crate::metadata::MetadataCatalogue;
use crate::select::select;
use crate::store::ParameterStore;

/// Lifecycle of the descriptor list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelState {
    /// No descriptors built yet, or the store has been cleared.
    Empty,
    /// A rebuild is in progress.
    Loading,
    /// Descriptors are available for rendering.
    Populated,
}

/// A parameter that produced no control during the last rebuild.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedParameter {
    pub name: String,
    pub reason: SkipReason,
}

/// Engine producing the editable presentation model for one operating mode.
pub struct ParameterPanel {
    mode: String,
    store: Arc<dyn ParameterStore>,
    catalogue: Arc<dyn MetadataCatalogue>,
    link: Arc<dyn ParameterLink>,
    descriptors: Vec<ParameterDescriptor>,
    skipped: Vec<SkippedParameter>,
    state: PanelState,
    last_refresh_error: Option<String>,
}

impl ParameterPanel {
    /// Creates a panel for `mode`; no descriptors are built until
    /// [`ParameterPanel::activate`] or a refresh trigger.
    pub fn new(
        store: Arc<dyn ParameterStore>,
        catalogue: Arc<dyn MetadataCatalogue>,
        link: Arc<dyn ParameterLink>,
        mode: impl Into<String>,
    ) -> Self {
        Self {
            mode: mode.into(),
            store,
            catalogue,
            link,
            descriptors: Vec::new(),
            skipped: Vec::new(),
            state: PanelState::Empty,
            last_refresh_error: None,
        }
    }

    /// (Re)activation entry point: rebuilds the descriptor list.
    pub fn activate(&mut self) {
        self.refresh();
    }

    /// Store change notification entry point. Delivery is synchronous on the
    /// thread that owns the panel; wire the store's listener to call this.
    pub fn handle_store_change(&mut self) {
        self.refresh();
    }

    /// Switches the requested operating mode and rebuilds.
    pub fn set_mode(&mut self, mode: impl Into<String>) {
        self.mode = mode.into();
        self.refresh();
    }

    /// Rebuilds the descriptor list from the store and catalogue.
    ///
    /// When the store is empty the link is first asked to re-fetch the
    /// authoritative parameter list and the catalogue to reload; failures
    /// are logged and recorded, and the flow continues with whatever data is
    /// available.
    pub fn refresh(&mut self) {
        self.state = PanelState::Loading;
        self.last_refresh_error = None;

        if self.store.is_empty() {
            if let Err(err) = self.link.request_parameter_list_refresh() {
                warn!(error = %err, "parameter list refresh unavailable");
                self.last_refresh_error = Some(err.to_string());
            }
            if let Err(err) = self.catalogue.reload() {
                warn!(error = %err, "catalogue reload failed");
                self.last_refresh_error = Some(err.to_string());
            }
        }

        let names = self.store.names();
        if names.is_empty() {
            // Nothing to build from; keep whatever the last rebuild produced.
            self.state = if self.descriptors.is_empty() {
                PanelState::Empty
            } else {
                PanelState::Populated
            };
            return;
        }

        let chosen = select(&names, self.catalogue.as_ref(), &self.mode);
        let mut descriptors = Vec::with_capacity(chosen.len());
        let mut skipped = Vec::new();
        for entry in chosen {
            let value = self.store.get(&entry.name);
            match classify(&entry.name, &entry.display_name, self.catalogue.as_ref(), value) {
                Classification::Control(descriptor) => descriptors.push(descriptor),
                Classification::Skipped { name, reason } => {
                    skipped.push(SkippedParameter { name, reason });
                }
            }
        }

        info!(
            mode = %self.mode,
            controls = descriptors.len(),
            skipped = skipped.len(),
            "panel rebuilt"
        );
        self.descriptors = descriptors;
        self.skipped = skipped;
        self.state = PanelState::Populated;
    }

    /// Writes edited display values back to the store over the current
    /// descriptor set; see the commit stage for the isolation contract.
    pub fn commit(&self, edits: &HashMap<String, String>) -> CommitOutcome {
        apply_edits(&self.descriptors, edits, self.store.as_ref())
    }

    /// The current presentation model, in display order.
    pub fn descriptors(&self) -> &[ParameterDescriptor] {
        &self.descriptors
    }

    /// Parameters the last rebuild declined to render, with reasons.
    pub fn skipped(&self) -> &[SkippedParameter] {
        &self.skipped
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// The operating mode this panel renders.
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// The failure recorded by the last refresh, if any.
    pub fn last_refresh_error(&self) -> Option<&str> {
        self.last_refresh_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::NullLink;
    use crate::metadata::{MemoryCatalogue, ParameterMeta};
    use crate::store::MemoryStore;

    fn catalogue() -> Arc<MemoryCatalogue> {
        let catalogue = MemoryCatalogue::new();
        catalogue.insert(
            "NAVL1_PERIOD",
            ParameterMeta::new()
                .display_name("Navigation period")
                .mode("Standard")
                .units("seconds")
                .range("1 60")
                .increment("1"),
        );
        catalogue.insert(
            "ARMING_CHECK",
            ParameterMeta::new()
                .display_name("Arming check")
                .mode("Standard")
                .values("0:Disabled, 1:Enabled"),
        );
        // Renders nothing: no range, no enumeration.
        catalogue.insert(
            "LOG_BITMASK",
            ParameterMeta::new().display_name("Log bitmask").mode("Standard"),
        );
        catalogue.insert(
            "DEBUG_LVL",
            ParameterMeta::new()
                .display_name("Debug level")
                .range("0 4")
                .increment("1"),
        );
        Arc::new(catalogue)
    }

    fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::with_values([
            ("NAVL1_PERIOD".to_string(), 20.0),
            ("ARMING_CHECK".to_string(), 1.0),
            ("LOG_BITMASK".to_string(), 830.0),
            ("DEBUG_LVL".to_string(), 2.0),
        ]))
    }

    fn panel(mode: &str) -> ParameterPanel {
        ParameterPanel::new(store(), catalogue(), Arc::new(NullLink), mode)
    }

    #[test]
    fn activation_builds_the_descriptor_list() {
        let mut panel = panel("Standard");
        assert_eq!(panel.state(), PanelState::Empty);

        panel.activate();

        assert_eq!(panel.state(), PanelState::Populated);
        let labels: Vec<&str> = panel
            .descriptors()
            .iter()
            .map(|d| d.label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Arming check (ARMING_CHECK)",
                "Navigation period (NAVL1_PERIOD)"
            ]
        );
    }

    #[test]
    fn unrenderable_parameters_are_reported_as_skipped() {
        let mut panel = panel("Standard");
        panel.activate();

        assert_eq!(panel.skipped().len(), 1);
        assert_eq!(panel.skipped()[0].name, "LOG_BITMASK");
        assert_eq!(panel.skipped()[0].reason, SkipReason::NoRenderableControl);
    }

    #[test]
    fn mode_change_rebuilds_the_eligible_set() {
        let mut panel = panel("Standard");
        panel.activate();
        assert_eq!(panel.descriptors().len(), 2);

        panel.set_mode("Advanced");
        let names: Vec<&str> = panel
            .descriptors()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["DEBUG_LVL"]);
        assert_eq!(panel.mode(), "Advanced");
    }

    #[test]
    fn unavailable_link_keeps_previous_descriptors() {
        let store = store();
        let mut panel =
            ParameterPanel::new(store.clone(), catalogue(), Arc::new(NullLink), "Standard");
        panel.activate();
        let before = panel.descriptors().to_vec();
        assert!(!before.is_empty());

        // The device connection drops and the store empties out.
        store.replace_all(HashMap::new()).unwrap();
        panel.refresh();

        assert_eq!(panel.descriptors(), before.as_slice());
        assert_eq!(panel.state(), PanelState::Populated);
        assert!(panel.last_refresh_error().is_some());
    }

    #[test]
    fn empty_store_with_no_link_stays_empty() {
        let mut panel = ParameterPanel::new(
            Arc::new(MemoryStore::new()),
            catalogue(),
            Arc::new(NullLink),
            "Standard",
        );
        panel.activate();

        assert_eq!(panel.state(), PanelState::Empty);
        assert!(panel.descriptors().is_empty());
        assert!(panel.last_refresh_error().is_some());
    }

    #[test]
    fn store_change_notification_triggers_a_rebuild() {
        let store = store();
        let mut panel =
            ParameterPanel::new(store.clone(), catalogue(), Arc::new(NullLink), "Standard");
        panel.activate();

        store.set("NAVL1_PERIOD", 45.0).unwrap();
        panel.handle_store_change();

        let period = panel
            .descriptors()
            .iter()
            .find(|d| d.name == "NAVL1_PERIOD")
            .unwrap();
        match &period.control {
            crate::descriptor::ControlKind::Ranged(control) => assert_eq!(control.value, 45.0),
            other => panic!("unexpected control: {other:?}"),
        }
    }

    #[test]
    fn commit_routes_through_the_current_descriptor_set() {
        let store = store();
        let mut panel =
            ParameterPanel::new(store.clone(), catalogue(), Arc::new(NullLink), "Standard");
        panel.activate();

        let edits = HashMap::from([
            ("NAVL1_PERIOD".to_string(), "25".to_string()),
            ("ARMING_CHECK".to_string(), "0".to_string()),
        ]);
        let outcome = panel.commit(&edits);

        assert!(outcome.is_success());
        assert_eq!(outcome.succeeded, 2);
        assert_eq!(store.get("NAVL1_PERIOD"), Some(25.0));
        assert_eq!(store.get("ARMING_CHECK"), Some(0.0));
    }
}
