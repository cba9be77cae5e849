//! Cross-source join: roster + history + summary → unified records.
//!
//! The roster is authoritative for who exists; history rows enrich existing
//! people and never create them. Rows whose person or unit id cannot be
//! resolved are skipped and counted, never fatal. Field precedence: a roster
//! value is never overwritten by a history value.

use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::columns;
use crate::config::PolicyConfig;
use crate::dates;
use crate::identity::{person_id, unit_id};
use crate::model::{Diagnostics, PersonRecord, UnitRecord};
use crate::normalize::{parse_count, strip_trailing_dot_zero};
use crate::table::SourceTable;

pub struct JoinOutput {
    pub people: BTreeMap<String, PersonRecord>,
    pub units: BTreeMap<String, UnitRecord>,
    pub diagnostics: Diagnostics,
}

/// Per-person enrichment gathered from the history ledger before the
/// roster pass runs.
struct HistoryLookups {
    category: HashMap<String, String>,
    attribute: HashMap<String, String>,
    marital: HashMap<String, String>,
}

/// Merge the three sources into finalized person and unit records.
///
/// `service_dates` is the cached id → service-start mapping derived from
/// the history source. `today` drives age derivation only.
pub fn reconcile(
    roster: &SourceTable,
    history: &SourceTable,
    summary: &SourceTable,
    service_dates: &BTreeMap<String, String>,
    policy: &PolicyConfig,
    today: NaiveDate,
) -> JoinOutput {
    let mut diagnostics = Diagnostics::default();

    let lookups = scan_history(history, policy, &mut diagnostics);
    let people = build_people(
        roster,
        &lookups,
        service_dates,
        policy,
        today,
        &mut diagnostics,
    );
    let units = build_units(summary, policy, &mut diagnostics);

    JoinOutput {
        people,
        units,
        diagnostics,
    }
}

/// History pass: category (with its alias precedence chain), secondary
/// attribute, and marital-status fallback, all keyed by resolved person id.
fn scan_history(
    history: &SourceTable,
    policy: &PolicyConfig,
    diagnostics: &mut Diagnostics,
) -> HistoryLookups {
    let mut lookups = HistoryLookups {
        category: HashMap::new(),
        attribute: HashMap::new(),
        marital: HashMap::new(),
    };

    for row in history.rows() {
        let id = person_id(history.get(row, columns::PERSON_ID));
        if id.is_empty() {
            diagnostics.history_rows_skipped += 1;
            continue;
        }

        // Precedence chain over the category aliases: an empty value under
        // the preferred header falls through to the next alias.
        let raw_category = columns::CATEGORY
            .iter()
            .copied()
            .map(|name| history.get(row, &[name]))
            .find(|v| !v.is_empty())
            .unwrap_or("");
        let category = canonical_category(raw_category, policy);
        if !category.is_empty() {
            lookups.category.insert(id.clone(), category);
        }

        let attribute = history.get(row, columns::ATTRIBUTE).to_uppercase();
        if !attribute.is_empty() {
            lookups.attribute.insert(id.clone(), attribute);
        }

        let marital = history.get(row, columns::MARITAL_STATUS);
        if !marital.is_empty() {
            lookups.marital.entry(id).or_insert_with(|| marital.to_string());
        }
    }

    lookups
}

/// Upper-case, trim, and fold configured alias spellings ("UR", "GEN", …)
/// into the default category token so every table agrees on one bucket.
fn canonical_category(raw: &str, policy: &PolicyConfig) -> String {
    let category = raw.to_uppercase();
    if policy.category_aliases.iter().any(|a| a == &category) {
        return policy.default_category.clone();
    }
    category
}

/// Roster pass: one finalized person per resolvable row, enriched from the
/// history lookups and the service-date cache. Later duplicate roster rows
/// supersede earlier ones.
fn build_people(
    roster: &SourceTable,
    lookups: &HistoryLookups,
    service_dates: &BTreeMap<String, String>,
    policy: &PolicyConfig,
    today: NaiveDate,
    diagnostics: &mut Diagnostics,
) -> BTreeMap<String, PersonRecord> {
    let mut people = BTreeMap::new();

    for row in roster.rows() {
        let id = person_id(roster.get(row, columns::PERSON_ID));
        if id.is_empty() {
            diagnostics.roster_rows_skipped += 1;
            continue;
        }

        let unit_composite = roster.get(row, columns::UNIT_COMPOSITE);

        let mut zone = roster.get(row, columns::ZONE).to_uppercase();
        if zone.is_empty() {
            zone = policy.unknown_label.clone();
        }

        let dob = roster.get(row, columns::DATE_OF_BIRTH).to_string();
        let age = match dates::parse_flexible(&dob) {
            Some(d) => dates::years_between(d, today),
            None => {
                if !dob.is_empty() {
                    diagnostics.unparsable_dates += 1;
                }
                0
            }
        };

        let category = match lookups.category.get(&id) {
            Some(c) => c.clone(),
            None => {
                diagnostics.defaulted_categories += 1;
                policy.default_category.clone()
            }
        };
        let attribute = match lookups.attribute.get(&id) {
            Some(a) => a.clone(),
            None => {
                diagnostics.defaulted_attributes += 1;
                policy.default_attribute.clone()
            }
        };

        let mut marital = roster.get(row, columns::MARITAL_STATUS).to_string();
        if marital.is_empty() {
            if let Some(m) = lookups.marital.get(&id) {
                marital = m.clone();
            }
        }

        let record = PersonRecord {
            name: roster.get(row, columns::PERSON_NAME).to_string(),
            role: roster.get(row, columns::ROLE).to_string(),
            sex: roster.get(row, columns::SEX).to_string(),
            age,
            dob,
            zone,
            unit_id: unit_id(unit_composite),
            unit_name: unit_composite.to_string(),
            status: roster.get(row, columns::STATUS).to_string(),
            category,
            attribute,
            marital_status: marital,
            mobile: strip_trailing_dot_zero(roster.get(row, columns::MOBILE)),
            email: roster.get(row, columns::EMAIL).to_string(),
            joined: service_dates.get(&id).cloned().unwrap_or_default(),
            id: id.clone(),
        };
        people.insert(id, record);
    }

    people
}

/// Summary pass: one unit per resolvable composite field, counters parsed
/// tolerantly.
fn build_units(
    summary: &SourceTable,
    policy: &PolicyConfig,
    diagnostics: &mut Diagnostics,
) -> BTreeMap<String, UnitRecord> {
    let mut units = BTreeMap::new();

    for row in summary.rows() {
        let composite = summary.get(row, columns::UNIT_COMPOSITE);
        let id = unit_id(composite);
        if id.is_empty() {
            diagnostics.summary_rows_skipped += 1;
            continue;
        }

        let mut zone = summary.get(row, columns::ZONE).to_uppercase();
        if zone.is_empty() {
            zone = policy.unknown_label.clone();
        }

        let count = |cands: &[&str]| parse_count(summary.get(row, cands));
        let record = UnitRecord {
            name: composite.to_string(),
            zone,
            inspector: summary.get(row, columns::INSPECTOR).to_string(),
            enrolled: count(columns::ENROLLED),
            present: count(columns::PRESENT),
            with_account: count(columns::WITH_ACCOUNT),
            without_account: count(columns::WITHOUT_ACCOUNT),
            with_id: count(columns::WITH_ID),
            without_id: count(columns::WITHOUT_ID),
            id_linked_account: count(columns::ID_LINKED_ACCOUNT),
            new_this_month: count(columns::NEW_THIS_MONTH),
            new_this_session: count(columns::NEW_THIS_SESSION),
            grant_student: count(columns::GRANT_STUDENT),
            grant_parent: count(columns::GRANT_PARENT),
            grant_total: count(columns::GRANT_TOTAL),
            id: id.clone(),
        };
        units.insert(id, record);
    }

    units
}
