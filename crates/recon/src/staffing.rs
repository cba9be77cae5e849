//! Per-unit staffing position: needed vs. actual, singleton-role presence,
//! and load ratio.

use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::config::PolicyConfig;
use crate::model::{PersonRecord, StaffingRecord, UnitRecord};

/// Derive one staffing record per unit present in `units`.
///
/// Needed count is the ceiling of the present-count over the configured
/// persons-per-staff ratio, floored at zero. Actual count matches the staff
/// keyword as a case-insensitive substring of the role text; the head and
/// special-educator keywords only set presence flags. Load ratio is
/// present ÷ actual, defined as 0 when no counted staff are assigned.
pub fn derive_staffing(
    units: &BTreeMap<String, UnitRecord>,
    people: &BTreeMap<String, PersonRecord>,
    policy: &PolicyConfig,
) -> Vec<StaffingRecord> {
    let mut by_unit: HashMap<&str, Vec<&PersonRecord>> = HashMap::new();
    for person in people.values() {
        if !person.unit_id.is_empty() {
            by_unit.entry(person.unit_id.as_str()).or_default().push(person);
        }
    }

    let staff_kw = policy.staff_keyword.to_lowercase();
    let head_kw = policy.head_keyword.to_lowercase();
    let special_kw = policy.special_keyword.to_lowercase();

    let mut records = Vec::with_capacity(units.len());
    for unit in units.values() {
        let roster: &[&PersonRecord] = by_unit
            .get(unit.id.as_str())
            .map(|v| v.as_slice())
            .unwrap_or(&[]);

        let mut actual: i64 = 0;
        let mut has_head = false;
        let mut has_special = false;
        for person in roster {
            let role = person.role.to_lowercase();
            if role.contains(&staff_kw) {
                actual += 1;
            } else if role.contains(&head_kw) {
                has_head = true;
            } else if role.contains(&special_kw) {
                has_special = true;
            }
        }

        let needed = (unit.present.max(0) as u64).div_ceil(u64::from(policy.persons_per_staff)) as i64;
        let load_ratio = if actual > 0 {
            unit.present as f64 / actual as f64
        } else {
            0.0
        };

        records.push(StaffingRecord {
            unit_id: unit.id.clone(),
            unit_name: unit.name.clone(),
            zone: unit.zone.clone(),
            needed,
            actual,
            surplus: actual - needed,
            has_head,
            has_special_educator: has_special,
            total_staff: roster.len(),
            load_ratio,
        });
    }

    records.sort_by(|a, b| a.unit_name.cmp(&b.unit_name).then_with(|| a.unit_id.cmp(&b.unit_id)));
    records
}
