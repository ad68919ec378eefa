use chrono::Datelike;

use crate::cli::chart;
use crate::cli::core::{usage_error, CommandError, CommandResult, ShellContext};
use crate::cli::output::{self, block};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::AggregationService;
use crate::domain::Granularity;

const ANALYTICS_USAGE: &str = "analytics [daily|weekly|monthly|yearly] [year]";
const CHART_WIDTH: usize = 40;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "analytics",
        "Show consumption grouped by day, week, month or year",
        ANALYTICS_USAGE,
        cmd_analytics,
    )
    .with_keywords(&["daily", "weekly", "monthly", "yearly"])]
}

fn cmd_analytics(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let granularity = match args.first() {
        Some(raw) => Granularity::parse(raw).ok_or_else(|| {
            let options: Vec<String> = Granularity::ALL
                .iter()
                .map(|option| option.to_string().to_lowercase())
                .collect();
            CommandError::InvalidArguments(format!(
                "unknown view `{}` (choose one of: {})",
                raw,
                options.join(", ")
            ))
        })?,
        None => Granularity::Monthly,
    };

    let today = context.ledger.today();
    let year = match args.get(1) {
        Some(raw) => raw.parse::<i32>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{}` is not a valid year", raw))
        })?,
        None => today.year(),
    };
    if args.len() > 2 {
        return Err(usage_error(ANALYTICS_USAGE));
    }
    if granularity.uses_year() && !AggregationService::year_options(today).contains(&year) {
        output::warning(format!(
            "{} is outside the usual range of the last few years.",
            year
        ));
    }

    let buckets = AggregationService::aggregate(context.ledger.entries(), granularity, year);
    if granularity.uses_year() {
        output::section(format!("{} usage {}", granularity, year));
    } else {
        output::section(format!("{} usage", granularity));
    }

    if !buckets.is_empty() {
        let mut table = Table::new(vec![
            TableColumn::left("Period"),
            TableColumn::right("Units"),
            TableColumn::right("Cost"),
        ]);
        for bucket in &buckets {
            table.push_row(vec![
                bucket.label.clone(),
                format!("{:.2}", bucket.units),
                context.config.money(bucket.cost),
            ]);
        }
        block(&table.render());
        println!();
    }
    block(&chart::render(&buckets, CHART_WIDTH));
    Ok(())
}
