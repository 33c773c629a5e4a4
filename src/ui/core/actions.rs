use crate::forms::SubmitPayload;
use crate::models::{Car, EntityId, EntityKind, Page, PageRequest, Pilot, Race, Relations};

/// Identity of one opened form, so late submit results reach only that form.
pub type FormToken = u64;

/// A page of rows for one of the tables.
#[derive(Debug, Clone)]
pub enum TablePage {
    Pilots(Page<Pilot>),
    Cars(Page<Car>),
    Races(Page<Race>),
}

impl TablePage {
    pub fn kind(&self) -> EntityKind {
        match self {
            TablePage::Pilots(_) => EntityKind::Pilot,
            TablePage::Cars(_) => EntityKind::Car,
            TablePage::Races(_) => EntityKind::Race,
        }
    }
}

/// Record opened in an edit dialog.
#[derive(Debug, Clone)]
pub enum EditTarget {
    Pilot(Pilot),
    Car(Car),
    Race(Race),
}

impl EditTarget {
    pub fn id(&self) -> EntityId {
        match self {
            EditTarget::Pilot(pilot) => pilot.id,
            EditTarget::Car(car) => car.id,
            EditTarget::Race(race) => race.id,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SwitchTab(EntityKind),

    // Table data
    LoadPage {
        kind: EntityKind,
        request: PageRequest,
    },
    PageLoaded {
        request: PageRequest,
        page: TablePage,
    },
    PageFailed {
        kind: EntityKind,
        message: String,
    },
    /// Re-fetch the active table and the relation lists
    Refresh,

    // Relation lists for dialog pickers
    LoadRelations,
    RelationsLoaded(Relations),
    RelationsFailed(String),

    // Record operations
    OpenCreate(EntityKind),
    ViewRecord {
        kind: EntityKind,
        id: EntityId,
    },
    /// Single record fetched for the view dialog
    RecordLoaded {
        title: String,
        message: String,
    },
    /// `token` identifies the form that sent the request
    Submit {
        token: FormToken,
        id: Option<EntityId>,
        payload: SubmitPayload,
    },
    SubmitSucceeded {
        token: FormToken,
        kind: EntityKind,
        message: String,
    },
    SubmitFailed {
        token: FormToken,
        kind: EntityKind,
        message: String,
    },
    Delete {
        kind: EntityKind,
        id: EntityId,
    },
    DeleteSucceeded {
        kind: EntityKind,
        message: String,
    },
    DeleteFailed {
        kind: EntityKind,
        message: String,
    },

    // UI operations
    ShowDialog(DialogType),
    HideDialog,
    ShowError(String),

    // App control
    Quit,
    None,
}

#[derive(Debug, Clone)]
pub enum DialogType {
    Create(EntityKind),
    Edit(EditTarget),
    DeleteConfirmation {
        kind: EntityKind,
        id: EntityId,
        label: String,
    },
    Info {
        title: String,
        message: String,
    },
    Help,
    Logs,
}
