use crate::models::Appointment;

const ICS_STAMP: &str = "%Y%m%dT%H%M%S";

pub fn generate_ics(appointment: &Appointment, stamped_at: chrono::NaiveDateTime) -> String {
    let dtstart = appointment.starts_at().format(ICS_STAMP).to_string();
    let dtend = appointment.ends_at().format(ICS_STAMP).to_string();
    let dtstamp = stamped_at.format(ICS_STAMP).to_string();
    let uid = format!("{}@dentbook", appointment.id);

    let summary = escape_text(&format!(
        "{} - {}",
        appointment.treatment, appointment.patient_name
    ));
    let description = escape_text(&format!(
        "{}h dental appointment for {}",
        appointment.duration, appointment.patient_name
    ));

    format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//Dentbook//Appointment Manager//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         DTSTART:{dtstart}\r\n\
         DTEND:{dtend}\r\n\
         SUMMARY:{summary}\r\n\
         DESCRIPTION:{description}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n"
    )
}

// RFC 5545 TEXT escaping.
fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Hours;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    fn appointment(time: &str, minutes: i64, treatment: &str) -> Appointment {
        Appointment {
            id: "test-123".to_string(),
            patient_id: "p-1".to_string(),
            patient_name: "Alice Johnson".to_string(),
            date: NaiveDate::parse_from_str("2025-03-15", "%Y-%m-%d").unwrap(),
            time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            duration: Hours::from_minutes(minutes),
            treatment: treatment.to_string(),
        }
    }

    fn stamp() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2025-03-10 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_generate_ics() {
        let ics = generate_ics(&appointment("14:00", 90, "Root Canal"), stamp());
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("BEGIN:VEVENT"));
        assert!(ics.contains("DTSTAMP:20250310T100000"));
        assert!(ics.contains("DTSTART:20250315T140000"));
        assert!(ics.contains("DTEND:20250315T153000"));
        assert!(ics.contains("SUMMARY:Root Canal - Alice Johnson"));
        assert!(ics.contains("DESCRIPTION:1.5h dental appointment for Alice Johnson"));
        assert!(ics.contains("UID:test-123@dentbook"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn test_generate_ics_escapes_text() {
        let ics = generate_ics(&appointment("09:30", 30, "Cleaning, Polish; X-ray"), stamp());
        assert!(ics.contains("DTEND:20250315T100000"));
        assert!(ics.contains("SUMMARY:Cleaning\\, Polish\\; X-ray - Alice Johnson"));
    }
}
