/// Category used when a transaction has no category.
pub const DEFAULT_CATEGORY: &str = "Outros";

/// Filter sentinel meaning "any category".
pub const ALL_CATEGORIES: &str = "all";

/// Categories offered by the transaction forms.
pub const SUGGESTED_CATEGORIES: [&str; 9] = [
    "Alimentação",
    "Transporte",
    "Lazer",
    "Moradia",
    "Saúde",
    "Educação",
    "Salário",
    "Investimentos",
    "Outros",
];

/// Decimal places used when rendering money
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Currency symbol prefixed to rendered amounts
pub const CURRENCY_SYMBOL: &str = "R$";

/// Largest amount accepted from user input, in whole currency units.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

/// Minimum accepted password length for sign-up and sign-in.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Settings key holding the daily reminder preferences (JSON).
pub const REMINDER_SETTINGS_KEY: &str = "daily_reminder_settings";

/// Settings key recording that the permission notice was already shown.
pub const REMINDER_PERMISSION_NOTICE_KEY: &str = "daily_reminder_permission_notice_shown";

/// Identifier of the scheduled daily reminder notification.
pub const DAILY_REMINDER_NOTIFICATION_ID: &str = "daily-transaction-reminder";

/// Default reminder time (hour, minute).
pub const DEFAULT_REMINDER_TIME: (u32, u32) = (19, 0);
