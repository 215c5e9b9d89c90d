use serde::Serialize;
use taskdeck_core::entry::TaskEntry;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

const TASK_COLUMNS: [&str; 6] = ["ID", "PRI", "STATUS", "TYPE", "OWNER", "TITLE"];

/// Render tasks as an aligned table, one row per task.
pub fn print_task_table(tasks: &[TaskEntry]) {
    print!("{}", render_task_table(tasks));
}

fn render_task_table(tasks: &[TaskEntry]) -> String {
    let rows: Vec<[String; 6]> = tasks.iter().map(task_row).collect();

    let mut widths: [usize; 6] = TASK_COLUMNS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = TASK_COLUMNS
        .iter()
        .zip(widths)
        .map(|(h, w)| format!("{h:<w$}"))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

fn task_row(task: &TaskEntry) -> [String; 6] {
    [
        task.id.clone(),
        task.priority.to_string(),
        task.status.to_string(),
        task.task_type.to_string(),
        task.owner.clone().unwrap_or_default(),
        task.title.clone(),
    ]
}
