use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Person + Unit
// ---------------------------------------------------------------------------

/// One resolved person, keyed by canonical digits-only id. Built once per
/// pass from the roster source, enriched from the history source, immutable
/// afterwards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonRecord {
    pub id: String,
    pub name: String,
    pub role: String,
    pub sex: String,
    pub dob: String,
    pub age: u32,
    pub zone: String,
    pub unit_id: String,
    pub unit_name: String,
    pub status: String,
    pub category: String,
    pub attribute: String,
    pub marital_status: String,
    pub mobile: String,
    pub email: String,
    /// Service-start date, string form as sourced (optionally via cache).
    pub joined: String,
}

/// One organizational unit from the summary sheet, with capacity counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnitRecord {
    pub id: String,
    pub name: String,
    pub zone: String,
    pub inspector: String,
    pub enrolled: i64,
    pub present: i64,
    pub with_account: i64,
    pub without_account: i64,
    pub with_id: i64,
    pub without_id: i64,
    pub id_linked_account: i64,
    pub new_this_month: i64,
    pub new_this_session: i64,
    pub grant_student: i64,
    pub grant_parent: i64,
    pub grant_total: i64,
}

// ---------------------------------------------------------------------------
// Demographics
// ---------------------------------------------------------------------------

/// Male/female counters for one category or attribute key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SexCount {
    pub male: usize,
    pub female: usize,
}

/// Counts for one (zone, role) pair. Category and attribute key sets are
/// exactly the values observed in the underlying records, nothing
/// pre-enumerated; BTreeMap keeps presentation order stable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DemoCell {
    pub categories: BTreeMap<String, SexCount>,
    pub attributes: BTreeMap<String, SexCount>,
    pub total_male: usize,
    pub total_female: usize,
    /// Every qualifying record, unclassified sex included.
    pub total: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SexTotals {
    pub male: usize,
    pub female: usize,
}

/// All demographic tables for one pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Demographics {
    /// zone → role → cell.
    pub zones: BTreeMap<String, BTreeMap<String, DemoCell>>,
    /// role → cell summed across zones.
    pub overall: BTreeMap<String, DemoCell>,
    /// Flat category → count across all qualifying records.
    pub category_totals: BTreeMap<String, usize>,
    /// Flat male/female counts across all qualifying records.
    pub sex_totals: SexTotals,
}

// ---------------------------------------------------------------------------
// Staffing
// ---------------------------------------------------------------------------

/// Per-unit staffing position derived from roster counts and unit capacity.
#[derive(Debug, Clone, Serialize)]
pub struct StaffingRecord {
    pub unit_id: String,
    pub unit_name: String,
    pub zone: String,
    pub needed: i64,
    pub actual: i64,
    /// actual − needed; negative means vacancy.
    pub surplus: i64,
    pub has_head: bool,
    pub has_special_educator: bool,
    pub total_staff: usize,
    /// present ÷ actual; 0.0 when no counted staff are assigned.
    pub load_ratio: f64,
}

// ---------------------------------------------------------------------------
// Rankings + Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Rankings {
    pub zones: Vec<RankedEntry>,
    pub roles: Vec<RankedEntry>,
}

/// One person due a birthday or service-anniversary greeting on the run
/// date. Delivery is an external collaborator's concern.
#[derive(Debug, Clone, Serialize)]
pub struct Celebrant {
    pub id: String,
    pub name: String,
    pub email: String,
    pub years: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DayEvents {
    pub birthdays: Vec<Celebrant>,
    pub anniversaries: Vec<Celebrant>,
}

// ---------------------------------------------------------------------------
// Diagnostics + Summary
// ---------------------------------------------------------------------------

/// Row-level conditions absorbed during the pass. Never errors: a skipped
/// row is excluded from every table, a defaulted field is substituted, and
/// the pass runs to completion either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub roster_rows_skipped: usize,
    pub history_rows_skipped: usize,
    pub summary_rows_skipped: usize,
    pub unparsable_dates: usize,
    pub defaulted_categories: usize,
    pub defaulted_attributes: usize,
}

/// Headline counters for the pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RosterTotals {
    pub people: usize,
    /// Units from the summary sheet plus units only referenced by people.
    pub units: usize,
    pub zones: usize,
    pub roles: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PassMeta {
    pub config_name: String,
    pub engine_version: String,
    /// Evaluation date for ages, events, and staleness-independent derivations.
    pub run_date: String,
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Everything a pass exposes to external collaborators: plain serializable
/// maps and sequences, no behavior.
#[derive(Debug, Clone, Serialize)]
pub struct PassResult {
    pub meta: PassMeta,
    pub people: BTreeMap<String, PersonRecord>,
    pub units: BTreeMap<String, UnitRecord>,
    pub demographics: Demographics,
    pub staffing: Vec<StaffingRecord>,
    pub rankings: Rankings,
    pub events: DayEvents,
    pub totals: RosterTotals,
    pub diagnostics: Diagnostics,
}
