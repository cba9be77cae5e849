//! Column-name candidate lists for the three source extracts.
//!
//! Each constant is an ordered candidate list: the first entry is the
//! preferred header name, the rest are aliases seen across extract
//! revisions. Lookup is case-insensitive after cleanup, so entries here are
//! the human-readable forms.

/// Person identifier (roster + history).
pub const PERSON_ID: &[&str] = &["Employee ID", "Emp ID"];
/// Display name (roster).
pub const PERSON_NAME: &[&str] = &["Employee Name", "Name of the Employee", "Name"];
/// Sex (roster).
pub const SEX: &[&str] = &["Gender", "Sex"];
/// Date of birth (roster).
pub const DATE_OF_BIRTH: &[&str] = &["Date of Birth", "DOB", "Birth Date", "D.O.B", "Date-of-Birth"];
/// Marital status (roster preferred, history fallback).
pub const MARITAL_STATUS: &[&str] = &["Marital Status", "Marital"];
/// Contact email (roster).
pub const EMAIL: &[&str] = &["Email", "Email ID", "Employee Email"];
/// Contact mobile (roster).
pub const MOBILE: &[&str] = &["Mobile No.", "Mobile", "Contact No."];
/// Role / designation (roster).
pub const ROLE: &[&str] = &["Designation", "Post", "Role"];
/// Employment status (roster).
pub const STATUS: &[&str] = &["Status", "Employment Status"];
/// Composite "unit name & id" field (roster + summary).
pub const UNIT_COMPOSITE: &[&str] = &["School Name & ID", "School Name and ID", "School Name"];
/// Zone / region label (roster + summary).
pub const ZONE: &[&str] = &["Zone ID", "Zone Name", "Zone"];
/// Demographic category (history); candidate order is the join precedence.
pub const CATEGORY: &[&str] = &["Selection Category", "SelectionCategory", "Applied Category"];
/// Secondary classification attribute (history).
pub const ATTRIBUTE: &[&str] = &["Religion", "Community"];
/// Service-start date (history).
pub const SERVICE_DATE: &[&str] = &["Date of Joining", "DOJ", "Joining Date"];

/// Unit inspector name (summary).
pub const INSPECTOR: &[&str] = &["School Inspector's Name", "SI Name"];
/// Total enrolment counter (summary).
pub const ENROLLED: &[&str] = &["Max Enrolment", "Total Enrolment (Last)", "Total Students"];
/// Present-count counter (summary).
pub const PRESENT: &[&str] = &["Max Present", "Present Enrolment"];
/// Account-linkage counters (summary).
pub const WITH_ACCOUNT: &[&str] = &["With Account"];
pub const WITHOUT_ACCOUNT: &[&str] = &["Without Account"];
pub const WITH_ID: &[&str] = &["With ID"];
pub const WITHOUT_ID: &[&str] = &["Without ID"];
pub const ID_LINKED_ACCOUNT: &[&str] = &["ID Linked Account"];
/// Admission counters (summary).
pub const NEW_THIS_MONTH: &[&str] = &["New Admission (This month)"];
pub const NEW_THIS_SESSION: &[&str] = &["New Admission (This session)"];
/// Grant-disbursal counters (summary).
pub const GRANT_STUDENT: &[&str] = &["Grant Received (Student)"];
pub const GRANT_PARENT: &[&str] = &["Grant Received (Parent)"];
pub const GRANT_TOTAL: &[&str] = &["Received By (Student + Parent)"];
