use crate::cli::core::{
    parse_date_arg, parse_number_arg, usage_error, CliMode, CommandError, CommandResult,
    ShellContext,
};
use crate::cli::output;
use crate::cli::prompt;
use crate::cli::registry::CommandEntry;
use crate::core::services::{parse_reading, BillingService};
use crate::domain::format_storage_date;

const RESET_PHRASE: &str = "RESET";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "status",
            "Show the current meter reading",
            "status",
            cmd_status,
        ),
        CommandEntry::new(
            "initial",
            "Set the meter reading used before any history exists",
            "initial <reading>",
            cmd_initial,
        ),
        CommandEntry::new(
            "preview",
            "Calculate consumption and cost without saving",
            "preview <reading>",
            cmd_preview,
        ),
        CommandEntry::new(
            "record",
            "Save a new meter reading (date defaults to today)",
            "record <reading> [date]",
            cmd_record,
        ),
        CommandEntry::new(
            "reset",
            "Delete all readings and the initial reading",
            "reset [--yes]",
            cmd_reset,
        )
        .with_keywords(&["--yes"]),
    ]
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = &context.ledger;
    output::section("Meter status");
    output::info(format!(
        "Current reading : {:.2}",
        ledger.current_reading()
    ));
    match ledger.latest_entry() {
        Some(entry) => output::info(format!(
            "Last reading    : {}",
            format_storage_date(entry.date)
        )),
        None if ledger.initial_reading().is_some() => {
            output::info("Last reading    : initial reading")
        }
        None => output::hint("No readings yet. Set a starting value with `initial <reading>`."),
    }
    output::info(format!(
        "Unit cost       : {} per unit",
        context.config.money(ledger.unit_cost())
    ));
    output::info(format!("Entries         : {}", ledger.len()));
    Ok(())
}

fn cmd_initial(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage_error("initial <reading>"));
    };
    let value = parse_number_arg(raw, "reading")?;
    context.ledger.set_initial_reading(value)?;
    output::success(format!("Initial reading set to {:.2}.", value));
    if !context.ledger.is_empty() {
        output::warning(
            "History already exists, so the current reading still comes from the latest entry.",
        );
    }
    Ok(())
}

fn cmd_preview(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage_error("preview <reading>"));
    };
    let ledger = &context.ledger;
    let previous = ledger.current_reading();
    let bill = BillingService::preview(previous, raw, ledger.unit_cost())?;
    output::info(format!("Previous reading: {:.2}", previous));
    output::info(format!("Consumption     : {:.2} units", bill.units));
    output::info(format!(
        "Total bill      : {}",
        context.config.money(bill.total_cost)
    ));
    Ok(())
}

fn cmd_record(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (raw, date) = match args {
        [raw] => (*raw, None),
        [raw, date] => (*raw, Some(parse_date_arg(date)?)),
        _ => return Err(usage_error("record <reading> [date]")),
    };
    let reading = parse_reading(raw)?;
    let date = date.unwrap_or_else(|| context.ledger.today());
    let entry = context.ledger.record(date, reading)?;
    output::success(format!(
        "Saved reading for {}: {:.2} units, {}.",
        format_storage_date(entry.date),
        entry.units,
        context.config.money(entry.total_cost)
    ));
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let confirmed = match args {
        [] => false,
        ["--yes"] => true,
        _ => return Err(usage_error("reset [--yes]")),
    };

    if !confirmed {
        if context.mode != CliMode::Interactive {
            return Err(CommandError::InvalidArguments(
                "reset needs confirmation; run `reset --yes`".into(),
            ));
        }
        output::warning("This permanently deletes every reading and the initial reading.");
        let confirmed = prompt::typed_confirmation(&context.theme, RESET_PHRASE)?
            && prompt::confirm(&context.theme, "Delete all history?", false)?;
        if !confirmed {
            output::info("Reset cancelled.");
            return Ok(());
        }
    }

    context.ledger.reset()?;
    output::success("History cleared.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::core::test_support::{context_in, run_lines};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    #[test]
    fn record_defaults_to_today_and_chains_readings() {
        let temp = TempDir::new().unwrap();
        let mut context = context_in(&temp, today());
        run_lines(
            &mut context,
            &["initial 1000", "record 1040 2024-05-01", "record 1100"],
        );
        let entries = context.ledger.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].date, today());
        assert_eq!(entries[1].previous_reading, 1040.0);
        assert_eq!(entries[1].units, 60.0);
        assert_eq!(entries[1].total_cost, 720.0);
    }

    #[test]
    fn invalid_input_leaves_history_untouched() {
        let temp = TempDir::new().unwrap();
        let mut context = context_in(&temp, today());
        run_lines(
            &mut context,
            &[
                "record 50 01-05-2024",
                "record 40",
                "record abc",
                "record 60 31-02-2024",
                "record",
            ],
        );
        assert_eq!(context.ledger.len(), 1);
    }

    #[test]
    fn reset_requires_flag_in_script_mode() {
        let temp = TempDir::new().unwrap();
        let mut context = context_in(&temp, today());
        run_lines(&mut context, &["record 10", "reset"]);
        assert_eq!(context.ledger.len(), 1);
        run_lines(&mut context, &["reset --yes"]);
        assert!(context.ledger.is_empty());
    }
}
