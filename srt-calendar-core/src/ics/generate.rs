//! ICS file generation.

use chrono::Utc;
use icalendar::{Calendar, Component, EventLike};

use super::{CalendarDocument, CalendarEvent};

const PRODID: &str = "-//srt-calendar//EN";

/// Render the whole document as one VCALENDAR
pub fn generate_ics(doc: &CalendarDocument) -> String {
    let mut cal = Calendar::new();

    if let Some(ref name) = doc.name {
        cal.name(name);
    }

    for event in &doc.events {
        cal.push(to_ics_event(event));
    }

    strip_ics_bloat(&cal.done().to_string())
}

fn to_ics_event(event: &CalendarEvent) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();

    if let Some(ref uid) = event.uid {
        ics_event.uid(uid);
    }
    ics_event.summary(&event.summary);

    // Instants are written in UTC; the +09:00 offset is preserved by the conversion
    ics_event.starts(event.start.with_timezone(&Utc));
    ics_event.ends(event.end.with_timezone(&Utc));

    if let Some(ref desc) = event.description {
        ics_event.description(desc);
    }

    ics_event.done()
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with our own
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
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
