//! Form state and client-side validation for the entity dialogs.
//!
//! Numeric inputs are kept as the raw text the user typed; they are parsed
//! only when validating or building a payload.

use std::collections::BTreeMap;
use std::fmt;

use crate::constants::{
    MIN_PILOT_AGE, MIN_PILOT_EXPERIENCE, MIN_RACE_YEAR, VALIDATION_AGE_MIN, VALIDATION_BRAND_REQUIRED,
    VALIDATION_CARS_REQUIRED, VALIDATION_EXPERIENCE_NEGATIVE, VALIDATION_MODEL_REQUIRED, VALIDATION_NAME_REQUIRED,
    VALIDATION_OWNER_REQUIRED, VALIDATION_PILOTS_REQUIRED, VALIDATION_POWER_POSITIVE, VALIDATION_RACE_NAME_REQUIRED,
    VALIDATION_YEAR_MIN,
};
use crate::models::{Car, CarPayload, EntityId, EntityKind, Pilot, PilotPayload, Race, RacePayload};

/// Every input a dialog can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Age,
    Experience,
    Brand,
    Model,
    Power,
    Owner,
    Year,
    Pilots,
    Cars,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Age => "Age",
            FormField::Experience => "Experience (years)",
            FormField::Brand => "Brand",
            FormField::Model => "Model",
            FormField::Power => "Power (hp)",
            FormField::Owner => "Owner",
            FormField::Year => "Year",
            FormField::Pilots => "Pilots",
            FormField::Cars => "Cars",
        }
    }

    /// Free-text inputs, as opposed to pickers.
    pub fn is_text(&self) -> bool {
        !matches!(self, FormField::Owner | FormField::Pilots | FormField::Cars)
    }

    /// Inputs restricted to digits and a leading minus sign.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FormField::Age | FormField::Experience | FormField::Power | FormField::Year
        )
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Field-level error map returned by `validate()`.
pub type FieldErrors = BTreeMap<FormField, String>;

fn parse_int(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok()
}

fn require_text(errors: &mut FieldErrors, field: FormField, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message.to_string());
    }
}

fn require_int(errors: &mut FieldErrors, field: FormField, value: &str, valid: impl Fn(i32) -> bool, message: &str) {
    match parse_int(value) {
        Some(number) if valid(number) => {}
        _ => {
            errors.insert(field, message.to_string());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PilotForm {
    pub name: String,
    pub age: String,
    pub experience: String,
}

impl PilotForm {
    pub const FIELDS: [FormField; 3] = [FormField::Name, FormField::Age, FormField::Experience];

    pub fn from_pilot(pilot: &Pilot) -> Self {
        Self {
            name: pilot.name.clone(),
            age: pilot.age.to_string(),
            experience: pilot.experience.to_string(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, FormField::Name, &self.name, VALIDATION_NAME_REQUIRED);
        require_int(&mut errors, FormField::Age, &self.age, |age| age >= MIN_PILOT_AGE, VALIDATION_AGE_MIN);
        require_int(
            &mut errors,
            FormField::Experience,
            &self.experience,
            |experience| experience >= MIN_PILOT_EXPERIENCE,
            VALIDATION_EXPERIENCE_NEGATIVE,
        );
        errors
    }

    pub fn to_payload(&self) -> Result<PilotPayload, FieldErrors> {
        let errors = self.validate();
        match (parse_int(&self.age), parse_int(&self.experience)) {
            (Some(age), Some(experience)) if errors.is_empty() => Ok(PilotPayload {
                name: self.name.trim().to_string(),
                age,
                experience,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CarForm {
    pub brand: String,
    pub model: String,
    pub power: String,
    pub owner_id: Option<EntityId>,
}

impl CarForm {
    pub const FIELDS: [FormField; 4] = [FormField::Brand, FormField::Model, FormField::Power, FormField::Owner];

    pub fn from_car(car: &Car) -> Self {
        Self {
            brand: car.brand.clone(),
            model: car.model.clone(),
            power: if car.power > 0 { car.power.to_string() } else { String::new() },
            owner_id: car.owner.as_ref().map(|owner| owner.id),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, FormField::Brand, &self.brand, VALIDATION_BRAND_REQUIRED);
        require_text(&mut errors, FormField::Model, &self.model, VALIDATION_MODEL_REQUIRED);
        require_int(&mut errors, FormField::Power, &self.power, |power| power > 0, VALIDATION_POWER_POSITIVE);
        if self.owner_id.is_none() {
            errors.insert(FormField::Owner, VALIDATION_OWNER_REQUIRED.to_string());
        }
        errors
    }

    pub fn to_payload(&self) -> Result<CarPayload, FieldErrors> {
        let errors = self.validate();
        match (parse_int(&self.power), self.owner_id) {
            (Some(power), Some(owner_id)) if errors.is_empty() => Ok(CarPayload {
                brand: self.brand.trim().to_string(),
                model: self.model.trim().to_string(),
                power,
                owner_id,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RaceForm {
    pub name: String,
    pub year: String,
    pub pilot_ids: Vec<EntityId>,
    pub car_ids: Vec<EntityId>,
}

impl RaceForm {
    pub const FIELDS: [FormField; 4] = [FormField::Name, FormField::Year, FormField::Pilots, FormField::Cars];

    pub fn from_race(race: &Race) -> Self {
        Self {
            name: race.name.clone(),
            year: if race.year > 0 { race.year.to_string() } else { String::new() },
            pilot_ids: race.pilots.iter().map(|p| p.id).filter(|id| *id != 0).collect(),
            car_ids: race.cars.iter().map(|c| c.id).filter(|id| *id != 0).collect(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, FormField::Name, &self.name, VALIDATION_RACE_NAME_REQUIRED);
        require_int(&mut errors, FormField::Year, &self.year, |year| year >= MIN_RACE_YEAR, VALIDATION_YEAR_MIN);
        if self.pilot_ids.is_empty() {
            errors.insert(FormField::Pilots, VALIDATION_PILOTS_REQUIRED.to_string());
        }
        if self.car_ids.is_empty() {
            errors.insert(FormField::Cars, VALIDATION_CARS_REQUIRED.to_string());
        }
        errors
    }

    pub fn to_payload(&self) -> Result<RacePayload, FieldErrors> {
        let errors = self.validate();
        match parse_int(&self.year) {
            Some(year) if errors.is_empty() => Ok(RacePayload {
                name: self.name.trim().to_string(),
                year,
                pilot_ids: self.pilot_ids.clone(),
                car_ids: self.car_ids.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// Form of whichever entity a dialog edits.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityForm {
    Pilot(PilotForm),
    Car(CarForm),
    Race(RaceForm),
}

/// Validated request body ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitPayload {
    Pilot(PilotPayload),
    Car(CarPayload),
    Race(RacePayload),
}

impl SubmitPayload {
    pub fn kind(&self) -> EntityKind {
        match self {
            SubmitPayload::Pilot(_) => EntityKind::Pilot,
            SubmitPayload::Car(_) => EntityKind::Car,
            SubmitPayload::Race(_) => EntityKind::Race,
        }
    }
}

impl EntityForm {
    pub fn empty(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Pilot => EntityForm::Pilot(PilotForm::default()),
            EntityKind::Car => EntityForm::Car(CarForm::default()),
            EntityKind::Race => EntityForm::Race(RaceForm::default()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityForm::Pilot(_) => EntityKind::Pilot,
            EntityForm::Car(_) => EntityKind::Car,
            EntityForm::Race(_) => EntityKind::Race,
        }
    }

    /// Inputs in display and focus order
    pub fn fields(&self) -> &'static [FormField] {
        match self {
            EntityForm::Pilot(_) => &PilotForm::FIELDS,
            EntityForm::Car(_) => &CarForm::FIELDS,
            EntityForm::Race(_) => &RaceForm::FIELDS,
        }
    }

    pub fn validate(&self) -> FieldErrors {
        match self {
            EntityForm::Pilot(form) => form.validate(),
            EntityForm::Car(form) => form.validate(),
            EntityForm::Race(form) => form.validate(),
        }
    }

    pub fn to_payload(&self) -> Result<SubmitPayload, FieldErrors> {
        match self {
            EntityForm::Pilot(form) => form.to_payload().map(SubmitPayload::Pilot),
            EntityForm::Car(form) => form.to_payload().map(SubmitPayload::Car),
            EntityForm::Race(form) => form.to_payload().map(SubmitPayload::Race),
        }
    }

    pub fn text(&self, field: FormField) -> Option<&str> {
        match (self, field) {
            (EntityForm::Pilot(form), FormField::Name) => Some(&form.name),
            (EntityForm::Pilot(form), FormField::Age) => Some(&form.age),
            (EntityForm::Pilot(form), FormField::Experience) => Some(&form.experience),
            (EntityForm::Car(form), FormField::Brand) => Some(&form.brand),
            (EntityForm::Car(form), FormField::Model) => Some(&form.model),
            (EntityForm::Car(form), FormField::Power) => Some(&form.power),
            (EntityForm::Race(form), FormField::Name) => Some(&form.name),
            (EntityForm::Race(form), FormField::Year) => Some(&form.year),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match (self, field) {
            (EntityForm::Pilot(form), FormField::Name) => Some(&mut form.name),
            (EntityForm::Pilot(form), FormField::Age) => Some(&mut form.age),
            (EntityForm::Pilot(form), FormField::Experience) => Some(&mut form.experience),
            (EntityForm::Car(form), FormField::Brand) => Some(&mut form.brand),
            (EntityForm::Car(form), FormField::Model) => Some(&mut form.model),
            (EntityForm::Car(form), FormField::Power) => Some(&mut form.power),
            (EntityForm::Race(form), FormField::Name) => Some(&mut form.name),
            (EntityForm::Race(form), FormField::Year) => Some(&mut form.year),
            _ => None,
        }
    }

    /// Ids chosen in a picker field
    pub fn selected_ids(&self, field: FormField) -> Vec<EntityId> {
        match (self, field) {
            (EntityForm::Car(form), FormField::Owner) => form.owner_id.into_iter().collect(),
            (EntityForm::Race(form), FormField::Pilots) => form.pilot_ids.clone(),
            (EntityForm::Race(form), FormField::Cars) => form.car_ids.clone(),
            _ => Vec::new(),
        }
    }

    /// Toggle `id` in a picker; the owner picker holds at most one id.
    pub fn toggle_selection(&mut self, field: FormField, id: EntityId) {
        match (self, field) {
            (EntityForm::Car(form), FormField::Owner) => {
                form.owner_id = if form.owner_id == Some(id) { None } else { Some(id) };
            }
            (EntityForm::Race(form), FormField::Pilots) => toggle(&mut form.pilot_ids, id),
            (EntityForm::Race(form), FormField::Cars) => toggle(&mut form.car_ids, id),
            _ => {}
        }
    }
}

fn toggle(ids: &mut Vec<EntityId>, id: EntityId) {
    if let Some(position) = ids.iter().position(|existing| *existing == id) {
        ids.remove(position);
    } else {
        ids.push(id);
    }
}
