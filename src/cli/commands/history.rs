use crate::cli::core::{parse_date_arg, usage_error, CommandError, CommandResult, ShellContext};
use crate::cli::output::{self, block};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::domain::{format_storage_date, FilterMode};

const HISTORY_USAGE: &str = "history [all|month|year|range <start> <end>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "history",
            "List readings, newest first",
            HISTORY_USAGE,
            cmd_history,
        )
        .with_keywords(&["all", "month", "year", "range"]),
        CommandEntry::new(
            "summary",
            "Show total and current-month consumption",
            "summary",
            cmd_summary,
        ),
    ]
}

fn parse_filter(args: &[&str]) -> Result<FilterMode, CommandError> {
    let keyword = args.first().map(|value| value.to_ascii_lowercase());
    match (keyword.as_deref(), args.len()) {
        (None, _) | (Some("all"), 1) => Ok(FilterMode::All),
        (Some("month"), 1) => Ok(FilterMode::ThisMonth),
        (Some("year"), 1) => Ok(FilterMode::ThisYear),
        (Some("range"), 3) => Ok(FilterMode::CustomRange {
            start: parse_date_arg(args[1])?,
            end: parse_date_arg(args[2])?,
        }),
        _ => Err(usage_error(HISTORY_USAGE)),
    }
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mode = parse_filter(args)?;
    let entries = context.ledger.filter(mode);
    output::section(format!("History ({})", mode));

    if entries.is_empty() {
        output::info("No readings match this view.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::right("Previous"),
        TableColumn::right("New"),
        TableColumn::right("Units"),
        TableColumn::right("Unit cost"),
        TableColumn::right("Total"),
    ]);
    let config = &context.config;
    for entry in &entries {
        table.push_row(vec![
            format_storage_date(entry.date),
            format!("{:.2}", entry.previous_reading),
            format!("{:.2}", entry.new_reading),
            format!("{:.2}", entry.units),
            config.money(entry.unit_cost),
            config.money(entry.total_cost),
        ]);
    }
    block(&table.render());
    output::info(format!("{} entries shown.", entries.len()));
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.ledger.summary();
    let config = &context.config;
    output::section("Summary");
    output::info(format!("Total units      : {:.2}", summary.total_units));
    output::info(format!(
        "Total cost       : {}",
        config.money(summary.total_cost)
    ));
    output::info(format!(
        "This month units : {:.2}",
        summary.this_month_units
    ));
    output::info(format!(
        "This month cost  : {}",
        config.money(summary.this_month_cost)
    ));
    output::info(format!(
        "Unit cost        : {}",
        config.money(summary.unit_cost)
    ));
    output::info(format!("Entries          : {}", summary.entry_count));
    Ok(())
}
