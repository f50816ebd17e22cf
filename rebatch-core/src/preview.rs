use crate::planner::RenamePlan;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use nu_ansi_term::Color::{DarkGray, Green};
use std::fmt::Write;
use std::io::{self, IsTerminal};

/// Preview format for a rename plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    /// One `old -> new` line per entry.
    List,
    Table,
    Summary,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "list" => Ok(Self::List),
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color(use_color: Option<bool>) -> bool {
    use_color.unwrap_or_else(|| io::stdout().is_terminal())
}

/// Render the plan in the specified format
pub fn render_plan(plan: &RenamePlan, format: Preview, use_color: Option<bool>) -> String {
    let use_color = should_use_color(use_color);

    match format {
        Preview::List => render_list(plan, use_color),
        Preview::Table => render_table(plan, use_color),
        Preview::Summary => render_summary(plan),
        Preview::None => String::new(),
    }
}

fn render_list(plan: &RenamePlan, use_color: bool) -> String {
    let mut out = String::new();
    for entry in &plan.entries {
        if use_color {
            let _ = writeln!(
                out,
                "{} {} {}",
                entry.old_name,
                DarkGray.paint("->"),
                Green.paint(&entry.new_name)
            );
        } else {
            let _ = writeln!(out, "{} -> {}", entry.old_name, entry.new_name);
        }
    }
    out
}

fn render_table(plan: &RenamePlan, use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("From").fg(Color::Cyan),
            Cell::new("To").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["From", "To"]);
    }

    for entry in &plan.entries {
        if use_color {
            table.add_row(vec![
                Cell::new(&entry.old_name),
                Cell::new(&entry.new_name).fg(Color::Green),
            ]);
        } else {
            table.add_row(vec![&entry.old_name, &entry.new_name]);
        }
    }

    format!("{table}\n")
}

fn render_summary(plan: &RenamePlan) -> String {
    format!(
        "{} file(s) to rename in {} ({})\n",
        plan.len(),
        plan.directory.display(),
        plan.mode
    )
}
