//! Defaults shared across dayname.

/// Page the events are scraped from.
pub const DEFAULT_URL: &str = "http://www.itsyourday.com/dayname.php";

pub const DEFAULT_CALENDAR_NAME: &str = "Flying Pie - IYD";

/// Maximum distance in days between a scraped date and today.
pub const DEFAULT_TOLERANCE_DAYS: i64 = 45;

/// The page's local time zone; decides which date "today" is.
pub const DEFAULT_TIMEZONE: &str = "America/Denver";

pub const DEFAULT_ROOT_SELECTOR: &str = "#dayname";

/// Heading element placed above the event list.
pub const DEFAULT_EXCLUDE_SELECTOR: &str = ".titreday";
