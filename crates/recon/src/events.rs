//! Birthday and service-anniversary celebrant selection.
//!
//! Selects who is due a greeting on a given date; composing and delivering
//! the greeting belongs to external collaborators. Only people with a
//! contact email are selected, since the selection exists to feed the
//! notification pipeline.

use chrono::{Datelike, NaiveDate};

use crate::dates;
use crate::model::{Celebrant, DayEvents, PersonRecord};

/// People whose date of birth or service-start date falls on `on`'s
/// day-and-month. `years` is completed years as of `on`.
pub fn day_events<'a, I>(people: I, on: NaiveDate) -> DayEvents
where
    I: IntoIterator<Item = &'a PersonRecord>,
{
    let mut events = DayEvents::default();

    for person in people {
        if person.email.is_empty() {
            continue;
        }
        if let Some(dob) = dates::parse_flexible(&person.dob) {
            if dob.day() == on.day() && dob.month() == on.month() {
                events.birthdays.push(celebrant(person, dates::years_between(dob, on)));
            }
        }
        if let Some(joined) = dates::parse_flexible(&person.joined) {
            if joined.day() == on.day() && joined.month() == on.month() {
                events
                    .anniversaries
                    .push(celebrant(person, dates::years_between(joined, on)));
            }
        }
    }

    events
}

fn celebrant(person: &PersonRecord, years: u32) -> Celebrant {
    Celebrant {
        id: person.id.clone(),
        name: person.name.clone(),
        email: person.email.clone(),
        years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str, dob: &str, joined: &str, email: &str) -> PersonRecord {
        PersonRecord {
            id: id.into(),
            name: format!("Person {id}"),
            dob: dob.into(),
            joined: joined.into(),
            email: email.into(),
            ..PersonRecord::default()
        }
    }

    fn on(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn selects_matching_day_and_month() {
        let people = vec![
            person("1", "15/Jun/1990", "01/Jul/2015", "a@example.org"),
            person("2", "15/Jun/1985", "15/Jun/2010", "b@example.org"),
            person("3", "16/Jun/1990", "", "c@example.org"),
        ];
        let events = day_events(&people, on(2026, 6, 15));

        let birthday_ids: Vec<&str> = events.birthdays.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(birthday_ids, vec!["1", "2"]);
        assert_eq!(events.birthdays[0].years, 36);

        assert_eq!(events.anniversaries.len(), 1);
        assert_eq!(events.anniversaries[0].id, "2");
        assert_eq!(events.anniversaries[0].years, 16);
    }

    #[test]
    fn no_email_means_no_selection() {
        let people = vec![person("1", "15/Jun/1990", "", "")];
        let events = day_events(&people, on(2026, 6, 15));
        assert!(events.birthdays.is_empty());
    }

    #[test]
    fn unparsable_dates_never_match() {
        let people = vec![person("1", "mid-june", "n/a", "a@example.org")];
        let events = day_events(&people, on(2026, 6, 15));
        assert!(events.birthdays.is_empty());
        assert!(events.anniversaries.is_empty());
    }
}
