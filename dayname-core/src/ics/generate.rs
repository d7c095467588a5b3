//! ICS file generation.

use chrono::Duration;
use icalendar::{Calendar, Component, Property, ValueType};

use super::DayEntry;

/// Generate .ics content for an all-day entry
pub fn generate_ics(entry: &DayEntry) -> String {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&entry.uid);
    ics_event.summary(&entry.summary);

    // DTSTAMP - required by RFC 5545
    let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    // All-day: DTEND is the (exclusive) next day
    add_date_property(&mut ics_event, "DTSTART", entry.date);
    add_date_property(&mut ics_event, "DTEND", entry.date + Duration::days(1));

    if let Some(ref desc) = entry.description {
        ics_event.description(desc);
    }

    // Free time: these are announcements, not appointments
    ics_event.add_property("TRANSP", "TRANSPARENT");

    let ics_event = ics_event.done();
    cal.push(ics_event);
    let cal = cal.done();

    strip_ics_bloat(&cal.to_string())
}

/// Replace PRODID and drop CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:DAYNAME\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: chrono::NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}
