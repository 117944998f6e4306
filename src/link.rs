//! External link collaborator that repopulates the parameter store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::error::{PanelError, PanelResult};
use crate::store::MemoryStore;

/// Connection-side collaborator the panel asks to re-fetch the authoritative
/// parameter list.
///
/// The link may be unavailable (no active connection); that is reported as a
/// failure the caller logs and works around, never a fatal condition.
pub trait ParameterLink: Send + Sync {
    /// Triggers the store to repopulate from the device.
    fn request_parameter_list_refresh(&self) -> PanelResult<()>;
}

/// Link with no active connection; every refresh request reports unavailable.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLink;

impl ParameterLink for NullLink {
    fn request_parameter_list_refresh(&self) -> PanelResult<()> {
        Err(PanelError::LinkUnavailable("no active connection".to_string()))
    }
}

/// Link that loads parameter values from a TOML file into a [`MemoryStore`],
/// standing in for a device connection in the CLI and in tests.
///
/// The file is a flat name → value table:
///
/// ```toml
/// NAVL1_PERIOD = 20.0
/// ARMING_CHECK = 1.0
/// ```
pub struct FileLink {
    path: PathBuf,
    store: Arc<MemoryStore>,
}

impl FileLink {
    /// Creates a link that will read `path` into `store` on each refresh
    /// request.
    pub fn new(path: impl AsRef<Path>, store: Arc<MemoryStore>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            store,
        }
    }
}

impl ParameterLink for FileLink {
    fn request_parameter_list_refresh(&self) -> PanelResult<()> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|err| PanelError::LinkUnavailable(err.to_string()))?;
        let values: HashMap<String, f64> =
            toml::from_str(&raw).map_err(|err| PanelError::LinkUnavailable(err.to_string()))?;
        info!(count = values.len(), path = %self.path.display(), "parameter list fetched");
        self.store.replace_all(values)
    }
}
