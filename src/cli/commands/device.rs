use crate::cli::core::{usage_error, CommandResult, ShellContext};
use crate::cli::output::{self, block};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::ComparisonBand;

const DEVICE_USAGE: &str = "device <add <name> <watts> <hours>|remove <name>|list>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "device",
            "Manage household devices used for estimates",
            DEVICE_USAGE,
            cmd_device,
        )
        .with_keywords(&["add", "remove", "list"]),
        CommandEntry::new(
            "estimate",
            "Compare estimated device usage with this month's readings",
            "estimate",
            cmd_estimate,
        ),
    ]
}

fn cmd_device(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["list"] => list_devices(context),
        ["add", name, watts, hours] => {
            let device = context.devices.add_raw(name, watts, hours)?;
            output::success(format!(
                "Added {}: {:.2} kWh per day, {:.2} kWh per month.",
                device.name, device.daily_kwh, device.monthly_kwh
            ));
            Ok(())
        }
        ["remove", name] => {
            let removed = context.devices.remove(name)?;
            if removed == 0 {
                output::warning(format!("No device named `{}`.", name));
            } else {
                output::success(format!("Removed {} device(s) named `{}`.", removed, name));
            }
            Ok(())
        }
        _ => Err(usage_error(DEVICE_USAGE)),
    }
}

fn list_devices(context: &ShellContext) -> CommandResult {
    output::section("Devices");
    let devices = context.devices.devices();
    if devices.is_empty() {
        output::info("No devices added yet. Use `device add <name> <watts> <hours>`.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Name"),
        TableColumn::right("Watts"),
        TableColumn::right("Hours/day"),
        TableColumn::right("kWh/day"),
        TableColumn::right("kWh/month"),
    ]);
    for device in devices {
        table.push_row(vec![
            device.name.clone(),
            format!("{:.0}", device.power_watts),
            format!("{:.1}", device.hours_per_day),
            format!("{:.2}", device.daily_kwh),
            format!("{:.2}", device.monthly_kwh),
        ]);
    }
    block(&table.render());
    Ok(())
}

fn cmd_estimate(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let unit_cost = context.ledger.unit_cost();
    let devices = &context.devices;
    output::section("Monthly estimate");
    output::info(format!(
        "Estimated usage : {:.2} kWh",
        devices.estimated_monthly_total()
    ));
    output::info(format!(
        "Estimated cost  : {}",
        context.config.money(devices.estimated_monthly_cost(unit_cost))
    ));

    match devices.compare_to_actual(&context.ledger) {
        None => output::info("No readings recorded this month yet."),
        Some(comparison) => {
            output::info(format!(
                "Actual usage    : {:.2} kWh",
                comparison.actual
            ));
            match comparison.band {
                ComparisonBand::Close => {
                    output::success("Actual usage is close to the estimate.")
                }
                ComparisonBand::ActualHigher => output::warning(format!(
                    "Actual usage is {:.2} kWh higher than estimated.",
                    comparison.difference
                )),
                ComparisonBand::ActualLower => output::info(format!(
                    "Actual usage is {:.2} kWh lower than estimated.",
                    comparison.difference.abs()
                )),
            }
        }
    }
    Ok(())
}
