use crate::sheet::RowNum;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TeamLabel {
    /// Employees listed before the first team header.
    Ungrouped,
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub name: String,
    pub external_id: String,
    pub row: RowNum,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub label: TeamLabel,
    /// Row of the merged team header; `None` for the ungrouped team.
    pub anchor_row: Option<RowNum>,
    pub employees: Vec<Employee>,
}

/// Teams and employees of a roster template, in sheet order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    pub teams: Vec<Team>,
    /// Display name of the ungrouped team.
    pub default_team: String,
}

impl Roster {
    pub fn new(default_team: &str) -> Self {
        Self {
            teams: Vec::new(),
            default_team: default_team.to_string(),
        }
    }

    pub fn open_team(&mut self, name: &str, anchor_row: RowNum) {
        self.teams.push(Team {
            label: TeamLabel::Named(name.to_string()),
            anchor_row: Some(anchor_row),
            employees: Vec::new(),
        });
    }

    /// Attach an employee to the most recently opened team, or to the
    /// ungrouped team when no header has been seen yet.
    pub fn push_employee(&mut self, employee: Employee) {
        if self.teams.is_empty() {
            self.teams.push(Team {
                label: TeamLabel::Ungrouped,
                anchor_row: None,
                employees: Vec::new(),
            });
        }
        if let Some(team) = self.teams.last_mut() {
            team.employees.push(employee);
        }
    }

    pub fn team_name<'a>(&'a self, team: &'a Team) -> &'a str {
        match &team.label {
            TeamLabel::Ungrouped => &self.default_team,
            TeamLabel::Named(name) => name,
        }
    }

    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.teams.iter().flat_map(|t| t.employees.iter())
    }

    pub fn employee_count(&self) -> usize {
        self.employees().count()
    }

    pub fn is_empty(&self) -> bool {
        self.employee_count() == 0
    }

    /// Name → row. A name listed twice resolves to its last row.
    pub fn row_index(&self) -> HashMap<&str, RowNum> {
        self.employees().map(|e| (e.name.as_str(), e.row)).collect()
    }

    /// `(team name, header row)` for every named team.
    pub fn anchors(&self) -> impl Iterator<Item = (&str, RowNum)> {
        self.teams.iter().filter_map(|t| match (&t.label, t.anchor_row) {
            (TeamLabel::Named(name), Some(row)) => Some((name.as_str(), row)),
            _ => None,
        })
    }
}
