use crate::config::Config;
use crate::errors::AppResult;
use crate::matrix::parse_template;
use crate::models::{Roster, TeamLabel};
use crate::sheet::read_xlsx;
use crate::ui::messages::{header, warning};
use crate::utils::path::expand_tilde;
use crate::utils::table::{Column, Table};

pub struct TeamsLogic;

impl TeamsLogic {
    pub fn load(cfg: &Config) -> AppResult<Roster> {
        let sheet = read_xlsx(&expand_tilde(&cfg.template))?;
        Ok(parse_template(&sheet, &cfg.default_team))
    }

    /// Print teams and employees with their sheet rows (1-based).
    pub fn print(cfg: &Config) -> AppResult<()> {
        let roster = Self::load(cfg)?;
        if roster.is_empty() {
            warning(format!("No employees found in template {}", cfg.template));
            return Ok(());
        }

        for team in &roster.teams {
            let title = match (&team.label, team.anchor_row) {
                (TeamLabel::Named(_), Some(row)) => {
                    format!("{} (row {})", roster.team_name(team), row + 1)
                }
                _ => roster.team_name(team).to_string(),
            };
            header(title);

            let mut table = Table::new(vec![
                Column::new("row"),
                Column::new("name"),
                Column::new("id"),
            ]);
            for e in &team.employees {
                table.add_row(vec![(e.row + 1).to_string(), e.name.clone(), e.external_id.clone()]);
            }
            println!("{}", table.render());
        }
        Ok(())
    }
}
