pub mod config;
pub mod data;
pub mod insights;
pub mod intervene;
pub mod log;
pub mod risk;
pub mod stats;

use exhale_core::{AppCore, EventLog, NullNotifier, Store};

/// Open the application core over the on-disk store.
///
/// The CLI has no notification back end, so scheduling goes to the no-op
/// notifier.
pub(crate) fn open_core() -> Result<AppCore, Box<dyn std::error::Error>> {
    let store = Store::open()?;
    Ok(AppCore::new(EventLog::new(store), Box::new(NullNotifier)))
}
