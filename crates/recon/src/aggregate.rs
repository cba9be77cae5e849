//! Multi-dimensional demographic count tables.
//!
//! Cells are keyed (zone, role) and subdivided by the category and
//! attribute values actually observed; nothing is pre-enumerated. A record
//! qualifies when both its zone and role are non-empty. Unclassified sex
//! counts toward `total` but toward neither sex counter, so
//! `total == total_male + total_female` holds exactly among classified-sex
//! records.

use std::collections::BTreeMap;

use crate::model::{DemoCell, Demographics, PersonRecord, SexCount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
    Unclassified,
}

/// Case-insensitive token match: "M"/"MALE" and "F"/"FEMALE"; anything else
/// is unclassified.
pub fn classify_sex(raw: &str) -> Sex {
    match raw.trim().to_uppercase().as_str() {
        "M" | "MALE" => Sex::Male,
        "F" | "FEMALE" => Sex::Female,
        _ => Sex::Unclassified,
    }
}

/// Build the zone/role cell table, its overall per-role rollup, and the
/// flat category and sex totals from finalized person records.
pub fn aggregate<'a, I>(people: I) -> Demographics
where
    I: IntoIterator<Item = &'a PersonRecord>,
{
    let mut demo = Demographics::default();

    for person in people {
        if person.zone.is_empty() || person.role.is_empty() {
            continue;
        }
        let sex = classify_sex(&person.sex);

        let cell = demo
            .zones
            .entry(person.zone.clone())
            .or_default()
            .entry(person.role.clone())
            .or_insert_with(DemoCell::default);
        bump(cell, &person.category, &person.attribute, sex);

        *demo
            .category_totals
            .entry(person.category.clone())
            .or_insert(0) += 1;
        match sex {
            Sex::Male => demo.sex_totals.male += 1,
            Sex::Female => demo.sex_totals.female += 1,
            Sex::Unclassified => {}
        }
    }

    // Roll cells up across zones to per-role overall stats.
    for roles in demo.zones.values() {
        for (role, cell) in roles {
            merge_into(demo.overall.entry(role.clone()).or_default(), cell);
        }
    }

    demo
}

fn bump(cell: &mut DemoCell, category: &str, attribute: &str, sex: Sex) {
    bump_keyed(&mut cell.categories, category, sex);
    bump_keyed(&mut cell.attributes, attribute, sex);
    match sex {
        Sex::Male => cell.total_male += 1,
        Sex::Female => cell.total_female += 1,
        Sex::Unclassified => {}
    }
    cell.total += 1;
}

fn bump_keyed(keyed: &mut BTreeMap<String, SexCount>, key: &str, sex: Sex) {
    let counter = keyed.entry(key.to_string()).or_default();
    match sex {
        Sex::Male => counter.male += 1,
        Sex::Female => counter.female += 1,
        Sex::Unclassified => {}
    }
}

fn merge_into(dst: &mut DemoCell, src: &DemoCell) {
    for (key, count) in &src.categories {
        let c = dst.categories.entry(key.clone()).or_default();
        c.male += count.male;
        c.female += count.female;
    }
    for (key, count) in &src.attributes {
        let c = dst.attributes.entry(key.clone()).or_default();
        c.male += count.male;
        c.female += count.female;
    }
    dst.total_male += src.total_male;
    dst.total_female += src.total_female;
    dst.total += src.total;
}
