/// Shared constants used across the pledge page
///
/// Form field names, amount presets and storage keys live here so the
/// view and the submit handler agree on them.

// ============================================================================
// Amounts
// ============================================================================

/// Preset amounts offered by the amount button group (display units)
pub const PRESET_AMOUNTS: [u32; 7] = [5, 10, 15, 20, 50, 100, 250];

/// Amount selected when the page opens
pub const DEFAULT_AMOUNT: u32 = 20;

/// Display units to minor currency units (cents)
pub const MINOR_UNITS_PER_UNIT: i64 = 100;

// ============================================================================
// Public message
// ============================================================================

/// Character budget shown next to the public message textarea
pub const PUBLIC_MESSAGE_LIMIT: i64 = 140;

// ============================================================================
// Form field names
// ============================================================================

pub const FIELD_NAME: &str = "name";
pub const FIELD_SLUG: &str = "slug";
pub const FIELD_TOTAL_AMOUNT: &str = "totalAmount";
pub const FIELD_FROM_COLLECTIVE: &str = "fromCollective";
pub const FIELD_WEBSITE: &str = "website";
pub const FIELD_PUBLIC_MESSAGE: &str = "publicMessage";
pub const FIELD_INTERVAL: &str = "interval";

// ============================================================================
// Storage keys
// ============================================================================

/// Local storage key of the persisted app settings
pub const SETTINGS_STORAGE_KEY: &str = "pledge-app.settings";

/// Local storage key of the platform access token written at login
pub const ACCESS_TOKEN_STORAGE_KEY: &str = "accessToken";
