//! Pass orchestration: sources → cache → join → aggregates → result.
//!
//! One reconciliation pass is single-threaded and single-shot: every
//! in-memory table is rebuilt wholesale, and a pass either runs to
//! completion or fails fatally. Row-level trouble is absorbed into
//! diagnostics counters along the way.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::path::Path;
use std::time::SystemTime;

use chrono::NaiveDate;

use crate::aggregate::aggregate;
use crate::cache;
use crate::config::RosterConfig;
use crate::error::MusterError;
use crate::events::day_events;
use crate::join::reconcile;
use crate::model::{PassMeta, PassResult, Rankings, RosterTotals};
use crate::ranked::top_n;
use crate::staffing::derive_staffing;
use crate::table::SourceTable;

/// Pre-loaded text of the three extracts, plus the history extract's
/// modification time for cache staleness (`None` when unavailable).
pub struct SourceSet {
    pub roster: String,
    pub history: String,
    pub summary: String,
    pub history_modified: Option<SystemTime>,
}

/// Run one reconciliation pass. `today` drives ages, event selection, and
/// the result's run date; passing it explicitly keeps the pass reproducible.
pub fn run(
    config: &RosterConfig,
    sources: &SourceSet,
    today: NaiveDate,
) -> Result<PassResult, MusterError> {
    let roster = SourceTable::parse("roster", &sources.roster)?;
    let history = SourceTable::parse("history", &sources.history)?;
    let summary = SourceTable::parse("summary", &sources.summary)?;

    let service_dates = cache::load_or_rebuild(
        Path::new(&config.cache.file),
        sources.history_modified,
        &history,
        config.cache.rebuild,
    )?;

    let joined = reconcile(
        &roster,
        &history,
        &summary,
        &service_dates,
        &config.policy,
        today,
    );

    let demographics = aggregate(joined.people.values());
    let staffing = derive_staffing(&joined.units, &joined.people, &config.policy);
    let events = day_events(joined.people.values(), today);

    let mut zone_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut role_counts: BTreeMap<String, usize> = BTreeMap::new();
    for person in joined.people.values() {
        *zone_counts.entry(person.zone.clone()).or_insert(0) += 1;
        let role = if person.role.is_empty() {
            config.policy.unknown_label.as_str()
        } else {
            person.role.as_str()
        };
        *role_counts.entry(role.to_string()).or_insert(0) += 1;
    }
    let rankings = Rankings {
        zones: top_n(&zone_counts, config.policy.top_n),
        roles: top_n(&role_counts, config.policy.top_n),
    };

    let totals = compute_totals(&joined);

    Ok(PassResult {
        meta: PassMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_date: today.to_string(),
        },
        people: joined.people,
        units: joined.units,
        demographics,
        staffing,
        rankings,
        events,
        totals,
        diagnostics: joined.diagnostics,
    })
}

/// Headline counters. Units referenced by people but absent from the
/// summary sheet still count as units.
fn compute_totals(joined: &crate::join::JoinOutput) -> RosterTotals {
    let mut unit_ids: HashSet<&str> = joined.units.keys().map(String::as_str).collect();
    let mut zones: HashSet<&str> = joined.units.values().map(|u| u.zone.as_str()).collect();
    let mut roles: HashSet<&str> = HashSet::new();

    for person in joined.people.values() {
        if !person.unit_id.is_empty() {
            unit_ids.insert(person.unit_id.as_str());
        }
        zones.insert(person.zone.as_str());
        if !person.role.is_empty() {
            roles.insert(person.role.as_str());
        }
    }

    RosterTotals {
        people: joined.people.len(),
        units: unit_ids.len(),
        zones: zones.len(),
        roles: roles.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CacheConfig, PolicyConfig, SourcesConfig};

    const ROSTER: &str = "\
Employee ID,Employee Name,Gender,Date of Birth,Designation,School Name & ID,Zone ID,Email
101,Asha Rao,F,15/Jun/1990,Primary Teacher,Riverside School - 000123456,North,asha@example.org
102,Vikram Singh,M,02/Mar/1985,Principal,Riverside School - 000123456,North,vikram@example.org
103,Meena Kumari,F,20/Jan/1992,Primary Teacher,Hilltop Academy - 98765,South,
";

    const HISTORY: &str = "\
Employee ID,Date of Joining,Selection Category,Religion
101,01/Jul/2015,UR,Hindu
102,15/Aug/2010,SC,Sikh
103,03/Nov/2018,OBC,
";

    const SUMMARY: &str = "\
School Name & ID,Zone ID,Max Enrolment,Max Present
Riverside School - 000123456,North,812,640
Hilltop Academy - 98765,South,420,395
";

    fn config(dir: &std::path::Path) -> RosterConfig {
        RosterConfig {
            name: "engine test".into(),
            sources: SourcesConfig {
                roster: "roster.csv".into(),
                history: "history.csv".into(),
                summary: "summary.csv".into(),
            },
            cache: CacheConfig {
                file: dir.join("service_dates.json").display().to_string(),
                rebuild: false,
            },
            policy: PolicyConfig::default(),
        }
    }

    fn sources() -> SourceSet {
        SourceSet {
            roster: ROSTER.into(),
            history: HISTORY.into(),
            summary: SUMMARY.into(),
            history_modified: None,
        }
    }

    #[test]
    fn full_pass() {
        let dir = tempfile::tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let result = run(&config(dir.path()), &sources(), today).unwrap();

        assert_eq!(result.totals.people, 3);
        assert_eq!(result.totals.units, 2);
        assert_eq!(result.totals.zones, 2);
        assert_eq!(result.totals.roles, 2);

        // Cache was rebuilt and threaded into records.
        assert_eq!(result.people["101"].joined, "01/Jul/2015");
        assert!(dir.path().join("service_dates.json").exists());

        // Aggregates line up with the roster.
        let teachers = &result.demographics.overall["Primary Teacher"];
        assert_eq!(teachers.total, 2);
        assert_eq!(teachers.total_female, 2);
        assert_eq!(result.demographics.sex_totals.male, 1);

        // Staffing: ceil(640/40) = 16 needed, 1 teacher at Riverside.
        let riverside = result
            .staffing
            .iter()
            .find(|s| s.unit_id == "000123456")
            .unwrap();
        assert_eq!(riverside.needed, 16);
        assert_eq!(riverside.actual, 1);
        assert_eq!(riverside.surplus, -15);
        assert!(riverside.has_head);

        assert_eq!(result.rankings.zones[0].count, 2);
        assert_eq!(result.diagnostics.roster_rows_skipped, 0);
    }

    #[test]
    fn result_serializes() {
        let dir = tempfile::tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let result = run(&config(dir.path()), &sources(), today).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("\"000123456\""));
        assert!(json.contains("\"total_male\""));
    }

    #[test]
    fn missing_header_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let mut sources = sources();
        sources.roster = String::new();
        let err = run(&config(dir.path()), &sources, today).unwrap_err();
        assert!(matches!(err, MusterError::MissingHeader { .. }));
    }
}
