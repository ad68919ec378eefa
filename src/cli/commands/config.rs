use crate::cli::core::{parse_number_arg, usage_error, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const CONFIG_USAGE: &str = "config [set <unit-cost|currency|color> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change preferences",
        CONFIG_USAGE,
        cmd_config,
    )
    .with_keywords(&["set"])]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_config(context),
        ["set", key, value] => set_config(context, key, value),
        _ => Err(usage_error(CONFIG_USAGE)),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let config = &context.config;
    output::section("Configuration");
    output::info(format!("unit-cost : {:.2}", config.unit_cost));
    output::info(format!("currency  : {}", config.currency_symbol));
    output::info(format!(
        "color     : {}",
        if config.color_enabled { "on" } else { "off" }
    ));
    output::info(format!(
        "file      : {}",
        context.config_manager.path().display()
    ));
    Ok(())
}

fn set_config(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    match key.to_ascii_lowercase().as_str() {
        "unit-cost" => {
            let cost = parse_number_arg(value, "unit cost")?;
            updated.set_unit_cost(cost).map_err(|_| {
                CommandError::InvalidArguments("unit cost must be a non-negative number".into())
            })?;
        }
        "currency" => {
            let symbol = value.trim();
            if symbol.is_empty() {
                return Err(CommandError::InvalidArguments(
                    "currency symbol cannot be empty".into(),
                ));
            }
            updated.currency_symbol = symbol.to_string();
        }
        "color" => {
            updated.color_enabled = parse_switch(value)?;
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown setting `{}` (use unit-cost, currency or color)",
                other
            )))
        }
    }

    context.config_manager.save(&updated)?;
    context.ledger.set_unit_cost(updated.unit_cost);
    output::set_color_enabled(updated.color_enabled);
    context.config = updated;
    output::success(format!("Updated {}.", key));
    Ok(())
}

fn parse_switch(value: &str) -> Result<bool, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` is not a valid switch (use on or off)",
            value
        ))),
    }
}
