//! Reusable UI components

pub mod dialog_component;
pub mod dialogs;
pub mod entity_table;
pub mod status_bar;

// Tabs
pub mod cars_table;
pub mod pilots_table;
pub mod races_table;

// Component exports
pub use cars_table::CarsTable;
pub use dialog_component::DialogComponent;
pub use entity_table::{EntityTable, Pager, TableRecord};
pub use pilots_table::PilotsTable;
pub use races_table::RacesTable;
pub use status_bar::{Severity, StatusBar};
