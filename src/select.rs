//! Filter/sort stage: choose the parameters the requested mode shows and
//! order them for display.

use crate::metadata::{MetadataCatalogue, MetadataKey, ADVANCED_MODE};

/// A parameter chosen for display, paired with its display name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selected {
    pub name: String,
    pub display_name: String,
}

/// Applies the mode eligibility rule and orders the survivors.
///
/// A parameter is shown iff it has a non-empty display name and either its
/// mode attribute equals `requested_mode`, or it carries no mode attribute
/// and `requested_mode` is the distinguished advanced view. Catalogue misses
/// make a parameter ineligible, never an error. Output is ordered by display
/// name ascending with the parameter name as a deterministic tie-break.
///
/// Pure: no side effects, fully determined by its inputs.
pub fn select(
    names: &[String],
    catalogue: &dyn MetadataCatalogue,
    requested_mode: &str,
) -> Vec<Selected> {
    let mut chosen: Vec<Selected> = names
        .iter()
        .filter_map(|name| {
            let display_name = catalogue
                .lookup(name, MetadataKey::DisplayName)
                .ok()
                .flatten()?;
            let mode = catalogue.lookup(name, MetadataKey::Mode).ok().flatten();
            let eligible = match mode {
                Some(mode) => mode == requested_mode,
                None => requested_mode == ADVANCED_MODE,
            };
            eligible.then(|| Selected {
                name: name.clone(),
                display_name,
            })
        })
        .collect();

    chosen.sort_by(|a, b| {
        a.display_name
            .cmp(&b.display_name)
            .then_with(|| a.name.cmp(&b.name))
    });
    chosen
}
