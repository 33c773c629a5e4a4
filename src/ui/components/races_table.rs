//! Races tab.

use super::entity_table::{EntityTable, TableRecord};
use crate::constants::{PLACEHOLDER_EMPTY, PLACEHOLDER_UNTITLED_RACE};
use crate::models::{EntityId, EntityKind, Page, Race};
use crate::ui::core::actions::{EditTarget, TablePage};
use ratatui::layout::Constraint;

pub type RacesTable = EntityTable<Race>;

fn join_or_placeholder(items: Vec<String>) -> String {
    if items.is_empty() {
        PLACEHOLDER_EMPTY.to_string()
    } else {
        items.join(", ")
    }
}

impl TableRecord for Race {
    const KIND: EntityKind = EntityKind::Race;

    fn id(&self) -> EntityId {
        self.id
    }

    fn columns() -> Vec<(&'static str, Constraint)> {
        vec![
            ("Name", Constraint::Percentage(25)),
            ("Year", Constraint::Length(6)),
            ("Pilots", Constraint::Percentage(35)),
            ("Cars", Constraint::Min(20)),
        ]
    }

    fn cells(&self) -> Vec<String> {
        let year = if self.year > 0 {
            self.year.to_string()
        } else {
            PLACEHOLDER_EMPTY.to_string()
        };
        vec![
            self.label(),
            year,
            join_or_placeholder(self.pilots.iter().map(|pilot| pilot.name.clone()).collect()),
            join_or_placeholder(self.cars.iter().map(|car| car.label()).collect()),
        ]
    }

    fn label(&self) -> String {
        if self.name.trim().is_empty() {
            PLACEHOLDER_UNTITLED_RACE.to_string()
        } else {
            self.name.clone()
        }
    }

    fn edit_target(&self) -> EditTarget {
        EditTarget::Race(self.clone())
    }

    fn from_page(page: TablePage) -> Option<Page<Self>> {
        match page {
            TablePage::Races(page) => Some(page),
            _ => None,
        }
    }
}
