use crate::cli::output::{self, block};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::table::{Table, TableColumn};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    block(&overview_table(registry).render());
    output::hint("Use `help <command>` for details. Press Tab or ? to complete commands.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::info(format!("Usage   : {}", entry.usage));
    output::info(format!("About   : {}", entry.description));
    if !entry.keywords.is_empty() {
        output::info(format!("Options : {}", entry.keywords.join(", ")));
    }
}

fn overview_table(registry: &CommandRegistry) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Command"),
        TableColumn::left("Usage"),
        TableColumn::left("Description"),
    ]);
    for entry in registry.iter() {
        table.push_row(vec![
            entry.name.to_string(),
            entry.usage.to_string(),
            entry.description.to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::register_all;

    #[test]
    fn overview_lists_every_command_with_usage() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        let rendered = overview_table(&registry).render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].starts_with(" Command"));
        assert_eq!(lines.len(), registry.iter().count() + 2);
        assert!(rendered.contains("record <reading> [date]"));
        assert!(rendered.contains("help [command]"));
    }
}
