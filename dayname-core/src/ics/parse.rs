//! ICS file parsing using the icalendar crate's parser.

use icalendar::{
    DatePerhapsTime,
    parser::{read_calendar, unfold},
};

use super::DayEntry;

/// Parse ICS content into a DayEntry. Returns None unless the first VEVENT
/// is an all-day event with a UID.
pub fn parse_entry(content: &str) -> Option<DayEntry> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).ok()?;
    let vevent = calendar.components.iter().find(|c| c.name == "VEVENT")?;

    let uid = vevent.find_prop("UID")?.val.to_string();
    let date = match DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()? {
        DatePerhapsTime::Date(date) => date,
        DatePerhapsTime::DateTime(_) => return None,
    };
    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| unescape(p.val.as_ref()))
        .unwrap_or_default();
    let description = vevent
        .find_prop("DESCRIPTION")
        .map(|p| unescape(p.val.as_ref()));

    Some(DayEntry {
        uid,
        date,
        summary,
        description,
    })
}

/// Undo RFC 5545 TEXT escaping
fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => result.push('\n'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ics::generate_ics;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_generated_entry() {
        let entry = DayEntry {
            uid: "20240314@flying-pie-iyd".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            summary: "IYD: Pi, Pie; and Cake Day".to_string(),
            description: Some("'IYD: Pi Day' created: 2024-03-10 08:00:00".to_string()),
        };

        let ics = generate_ics(&entry);
        let parsed = parse_entry(&ics).expect("Should parse generated ICS");

        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_parse_rejects_timed_event() {
        let ics = r#"BEGIN:VCALENDAR
VERSION:2.0
PRODID:TEST
BEGIN:VEVENT
UID:test-123
SUMMARY:Meeting
DTSTART:20240101T100000Z
DTEND:20240101T110000Z
END:VEVENT
END:VCALENDAR"#;

        assert!(parse_entry(ics).is_none());
    }

    #[test]
    fn test_parse_line_folding_and_escapes() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VEVENT\r\n\
UID:20240314@cal\r\n\
SUMMARY:IYD: Pi\\, Day\r\n\
DTSTART;VALUE=DATE:20240314\r\n\
DTEND;VALUE=DATE:20240315\r\n\
DESCRIPTION:first \r\n line\\nsecond line\r\n\
END:VEVENT\r\n\
END:VCALENDAR";

        let entry = parse_entry(ics).expect("Should parse");

        assert_eq!(entry.summary, "IYD: Pi, Day");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
        assert_eq!(
            entry.description.as_deref(),
            Some("first line\nsecond line")
        );
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"a\;b\,c\\d\ne"), "a;b,c\\d\ne");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }
}
