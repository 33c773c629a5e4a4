//! Records mirrored from the race server.
//!
//! These types are plain data: the server owns validation and referential
//! integrity, so every incoming field is lenient and falls back to its
//! default when the server leaves it out.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-side identifier of any record.
pub type EntityId = i64;

/// The three resources managed by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntityKind {
    #[default]
    Pilot,
    Car,
    Race,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Pilot, EntityKind::Car, EntityKind::Race];

    /// Collection path segment under `/api`.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Pilot => "pilots",
            EntityKind::Car => "cars",
            EntityKind::Race => "races",
        }
    }

    /// Singular, lowercase noun used in messages.
    pub fn noun(&self) -> &'static str {
        match self {
            EntityKind::Pilot => "pilot",
            EntityKind::Car => "car",
            EntityKind::Race => "race",
        }
    }

    /// Tab title.
    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Pilot => "Pilots",
            EntityKind::Car => "Cars",
            EntityKind::Race => "Races",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            EntityKind::Pilot => 0,
            EntityKind::Car => 1,
            EntityKind::Race => 2,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn next(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Self {
        Self::from_index(self.index() + Self::ALL.len() - 1)
    }

    /// Parse a collection name or noun ("pilots", "car", ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pilot" | "pilots" => Some(EntityKind::Pilot),
            "car" | "cars" => Some(EntityKind::Car),
            "race" | "races" => Some(EntityKind::Race),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Car reference embedded in a pilot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarSummary {
    pub id: EntityId,
    pub brand: String,
    pub model: String,
    pub power: i32,
}

impl CarSummary {
    pub fn label(&self) -> String {
        car_label(&self.brand, &self.model)
    }
}

/// Pilot reference embedded in a car.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PilotSummary {
    pub id: EntityId,
    pub name: String,
    pub experience: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pilot {
    pub id: EntityId,
    pub name: String,
    pub age: i32,
    pub experience: i32,
    pub cars: Vec<CarSummary>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Car {
    pub id: EntityId,
    pub brand: String,
    pub model: String,
    pub power: i32,
    pub owner: Option<PilotSummary>,
}

impl Car {
    pub fn label(&self) -> String {
        car_label(&self.brand, &self.model)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Race {
    pub id: EntityId,
    pub name: String,
    pub year: i32,
    pub pilots: Vec<Pilot>,
    pub cars: Vec<Car>,
}

/// Body of `POST/PUT /api/pilots`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PilotPayload {
    pub name: String,
    pub age: i32,
    pub experience: i32,
}

/// Body of `POST/PUT /api/cars`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarPayload {
    pub brand: String,
    pub model: String,
    pub power: i32,
    pub owner_id: EntityId,
}

/// Body of `POST/PUT /api/races`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RacePayload {
    pub name: String,
    pub year: i32,
    pub pilot_ids: Vec<EntityId>,
    pub car_ids: Vec<EntityId>,
}

/// Pagination metadata of a list response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageMeta {
    pub size: u32,
    pub number: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

/// `{content, page}` envelope returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: PageMeta,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            page: PageMeta::default(),
        }
    }
}

/// Query of a list endpoint. `page` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    pub fn first(size: u32) -> Self {
        Self { page: 0, size }
    }

    pub fn query(&self) -> [(&'static str, String); 2] {
        [("page", self.page.to_string()), ("size", self.size.to_string())]
    }
}

/// Pilot and car lists cached by the app for the dialog pickers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relations {
    pub pilots: Vec<Pilot>,
    pub cars: Vec<Car>,
}

fn car_label(brand: &str, model: &str) -> String {
    let label = format!("{} {}", brand, model).trim().to_string();
    if label.is_empty() {
        "Unknown car".to_string()
    } else {
        label
    }
}
