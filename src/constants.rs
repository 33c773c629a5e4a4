//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

// Success Messages
pub const SUCCESS_PILOT_CREATED: &str = "✅ Pilot created";
pub const SUCCESS_PILOT_UPDATED: &str = "✅ Pilot updated";
pub const SUCCESS_PILOT_DELETED: &str = "✅ Pilot deleted";
pub const SUCCESS_CAR_CREATED: &str = "✅ Car created";
pub const SUCCESS_CAR_UPDATED: &str = "✅ Car updated";
pub const SUCCESS_CAR_DELETED: &str = "✅ Car deleted";
pub const SUCCESS_RACE_CREATED: &str = "✅ Race created";
pub const SUCCESS_RACE_UPDATED: &str = "✅ Race updated";
pub const SUCCESS_RACE_DELETED: &str = "✅ Race deleted";

// Error Messages
pub const ERROR_GENERIC_OPERATION: &str = "Operation failed";
pub const ERROR_LOAD_PILOTS: &str = "❌ Failed to load pilots";
pub const ERROR_LOAD_CARS: &str = "❌ Failed to load cars";
pub const ERROR_LOAD_RACES: &str = "❌ Failed to load races";
pub const ERROR_LOAD_RELATIONS: &str = "❌ Failed to load pilots and cars";
pub const ERROR_DELETE_PILOT: &str = "❌ Failed to delete pilot";
pub const ERROR_DELETE_CAR: &str = "❌ Failed to delete car";
pub const ERROR_DELETE_RACE: &str = "❌ Failed to delete race";

// Validation Error Messages
pub const VALIDATION_NAME_REQUIRED: &str = "Enter a name";
pub const VALIDATION_AGE_MIN: &str = "Minimum age is 18";
pub const VALIDATION_EXPERIENCE_NEGATIVE: &str = "Experience cannot be negative";
pub const VALIDATION_BRAND_REQUIRED: &str = "Enter a brand";
pub const VALIDATION_MODEL_REQUIRED: &str = "Enter a model";
pub const VALIDATION_POWER_POSITIVE: &str = "Power must be positive";
pub const VALIDATION_OWNER_REQUIRED: &str = "Select an owner";
pub const VALIDATION_RACE_NAME_REQUIRED: &str = "Enter a race name";
pub const VALIDATION_YEAR_MIN: &str = "Year must be 1900 or later";
pub const VALIDATION_PILOTS_REQUIRED: &str = "Select pilots";
pub const VALIDATION_CARS_REQUIRED: &str = "Select cars";

// Field bounds
pub const MIN_PILOT_AGE: i32 = 18;
pub const MIN_PILOT_EXPERIENCE: i32 = 0;
pub const MIN_RACE_YEAR: i32 = 1900;

// Pagination
/// Page sizes offered by the tables
pub const DEFAULT_PAGE_SIZE_OPTIONS: [u32; 3] = [5, 10, 20];
/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: u32 = 5;
/// Size of the relation lists fetched for dialog pickers
pub const DEFAULT_RELATIONS_PAGE_SIZE: u32 = 1000;

// Placeholders
pub const PLACEHOLDER_EMPTY: &str = "—";
pub const PLACEHOLDER_UNTITLED_RACE: &str = "Untitled";
pub const PLACEHOLDER_UNNAMED_PILOT: &str = "Unnamed";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const DIALOG_TITLE_DEBUG_LOGS: &str = "🔍 Logs - Press 'Esc', 'L' or 'q' to close";
pub const ENV_API_URL: &str = "PITWALL_API_URL";

/// Longest message kept in the status line before it is truncated
pub const STATUS_MAX_WIDTH: usize = 120;
/// Maximum number of in-memory log entries
pub const LOG_BUFFER_CAPACITY: usize = 2000;
