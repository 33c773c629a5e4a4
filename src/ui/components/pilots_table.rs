//! Pilots tab.

use super::entity_table::{EntityTable, TableRecord};
use crate::constants::PLACEHOLDER_EMPTY;
use crate::models::{EntityId, EntityKind, Page, Pilot};
use crate::ui::core::actions::{EditTarget, TablePage};
use ratatui::layout::Constraint;

pub type PilotsTable = EntityTable<Pilot>;

impl TableRecord for Pilot {
    const KIND: EntityKind = EntityKind::Pilot;

    fn id(&self) -> EntityId {
        self.id
    }

    fn columns() -> Vec<(&'static str, Constraint)> {
        vec![
            ("Name", Constraint::Percentage(30)),
            ("Age", Constraint::Length(5)),
            ("Experience", Constraint::Length(12)),
            ("Cars", Constraint::Min(20)),
        ]
    }

    fn cells(&self) -> Vec<String> {
        let cars = if self.cars.is_empty() {
            PLACEHOLDER_EMPTY.to_string()
        } else {
            self.cars.iter().map(|car| car.label()).collect::<Vec<_>>().join(", ")
        };

        vec![
            self.name.clone(),
            self.age.to_string(),
            format!("{} yrs", self.experience),
            cars,
        ]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn edit_target(&self) -> EditTarget {
        EditTarget::Pilot(self.clone())
    }

    fn from_page(page: TablePage) -> Option<Page<Self>> {
        match page {
            TablePage::Pilots(page) => Some(page),
            _ => None,
        }
    }
}
