use std::{path::PathBuf, sync::Arc};

use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::{
        time::{Clock, SystemClock},
        utils::PathResolver,
        DeviceRegistry, Ledger,
    },
    storage::JsonStorage,
};

use super::commands;
use super::core::CliError;
use super::output::{self, MessageKind};
use super::registry::CommandRegistry;

const STORE_LEFT_UNTOUCHED: &str =
    "The file is left as it is until you save a change; fix or move it to keep its data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// State shared by every command handler for the lifetime of the shell.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub ledger: Ledger,
    pub devices: DeviceRegistry,
    pub config_manager: ConfigManager,
    pub config: Config,
    /// Load problems found while opening the stores, shown once the shell starts.
    pub startup_notices: Vec<(MessageKind, String)>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, PathResolver::base_dir(), Arc::new(SystemClock))
    }

    /// Opens every store under `base`. Unreadable history or device files are noted in
    /// `startup_notices` and replaced by empty in-memory collections; they are only
    /// overwritten on the next successful change.
    pub fn with_base_dir(
        mode: CliMode,
        base: PathBuf,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let storage = JsonStorage::new(Some(base.clone()))?;
        let config_manager = ConfigManager::with_base_dir(base)?;
        let mut notices = Vec::new();
        let config = config_manager.load().unwrap_or_else(|err| {
            notices.push((
                MessageKind::Warning,
                format!("{}. Using default settings.", err),
            ));
            Config::default()
        });
        if !config.color_enabled {
            output::set_color_enabled(false);
        }

        let ledger = Ledger::open(
            Box::new(storage.clone()),
            Arc::clone(&clock),
            config.unit_cost,
        )
        .unwrap_or_else(|err| {
            notices.push((
                MessageKind::Error,
                format!("Reading history unavailable: {}", err),
            ));
            notices.push((MessageKind::Hint, STORE_LEFT_UNTOUCHED.to_string()));
            Ledger::empty(Box::new(storage.clone()), Arc::clone(&clock), config.unit_cost)
        });
        let devices = DeviceRegistry::open(Box::new(storage.clone())).unwrap_or_else(|err| {
            notices.push((
                MessageKind::Error,
                format!("Device list unavailable: {}", err),
            ));
            notices.push((MessageKind::Hint, STORE_LEFT_UNTOUCHED.to_string()));
            DeviceRegistry::empty(Box::new(storage.clone()))
        });

        Ok(ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            ledger,
            devices,
            config_manager,
            config,
            startup_notices: notices,
        })
    }

    pub fn prompt(&self) -> String {
        "ebill> ".to_string()
    }

    /// Prints and forgets the notices gathered while opening the stores.
    pub fn report_startup_notices(&mut self) {
        for (kind, message) in self.startup_notices.drain(..) {
            output::print(kind, message);
        }
    }
}
