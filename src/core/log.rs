use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

const MAX_OP_WIDTH: usize = 60;

static ANSI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI pattern")
});

fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

/// ANSI color of an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "export" => Colour::Green,
        "update entry" => Colour::Yellow,
        "upload payroll" => Colour::Cyan,
        "reset" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51), // orange
        _ => Colour::White,
    }
}

/// `op (target)` cut to `MAX_OP_WIDTH` visible characters, only the
/// operation colored.
fn render_op_target(operation: &str, target: &str) -> String {
    let color = color_for_operation(operation);
    let plain = if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    };

    let visible = if plain.chars().count() > MAX_OP_WIDTH {
        let mut s: String = plain.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    // ascii operation names keep the split on a char boundary
    let op_len = operation.len().min(visible.len());
    match (visible.get(..op_len), visible.get(op_len..)) {
        (Some(op), Some(rest)) => format!("{}{}", color.paint(op), rest),
        _ => visible,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let rows = load_log(&pool.conn)?;
        if rows.is_empty() {
            info("Audit log is empty.");
            return Ok(());
        }

        let entries: Vec<(i64, String, String, String)> = rows
            .into_iter()
            .map(|r| {
                let date = chrono::DateTime::parse_from_rfc3339(&r.date)
                    .map(|dt| dt.format("%F %T").to_string())
                    .unwrap_or(r.date);
                let op_target = render_op_target(&r.operation, &r.target);
                (r.id, date, op_target, r.message)
            })
            .collect();

        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, ..)| date.len())
            .max()
            .unwrap_or(10);
        let op_w = entries
            .iter()
            .map(|(_, _, op, _)| visible_width(op))
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);

        println!("📜 Audit log:\n");

        for (id, date, op_target, message) in entries {
            // padding computed on the visible text, without ANSI
            let padding = " ".repeat(op_w.saturating_sub(visible_width(&op_target)));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                op_target,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
