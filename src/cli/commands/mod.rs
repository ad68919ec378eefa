pub mod analytics;
pub mod config;
pub mod device;
pub mod history;
pub mod reading;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let definitions = reading::definitions()
        .into_iter()
        .chain(history::definitions())
        .chain(analytics::definitions())
        .chain(device::definitions())
        .chain(config::definitions())
        .chain(system::definitions());
    for entry in definitions {
        registry.register(entry);
    }
}
