//! Cars tab.

use super::entity_table::{EntityTable, TableRecord};
use crate::constants::PLACEHOLDER_EMPTY;
use crate::models::{Car, EntityId, EntityKind, Page};
use crate::ui::core::actions::{EditTarget, TablePage};
use ratatui::layout::Constraint;

pub type CarsTable = EntityTable<Car>;

impl TableRecord for Car {
    const KIND: EntityKind = EntityKind::Car;

    fn id(&self) -> EntityId {
        self.id
    }

    fn columns() -> Vec<(&'static str, Constraint)> {
        vec![
            ("Car", Constraint::Percentage(40)),
            ("Power", Constraint::Length(10)),
            ("Owner", Constraint::Min(20)),
        ]
    }

    fn cells(&self) -> Vec<String> {
        let owner = match &self.owner {
            Some(owner) if !owner.name.trim().is_empty() => owner.name.clone(),
            _ => PLACEHOLDER_EMPTY.to_string(),
        };
        vec![self.label(), format!("{} hp", self.power), owner]
    }

    fn label(&self) -> String {
        Car::label(self)
    }

    fn edit_target(&self) -> EditTarget {
        EditTarget::Car(self.clone())
    }

    fn from_page(page: TablePage) -> Option<Page<Self>> {
        match page {
            TablePage::Cars(page) => Some(page),
            _ => None,
        }
    }
}
