//! Roster reports built from collection pipelines.

use collectables::eager::{EagerCollection, KeySelector};
use collectables::error::CollectionError;
use collectables::lazy::LazyCollection;

use crate::roster::Employee;

/// Department summary line.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentSummary {
    pub department: String,
    pub headcount: usize,
    pub payroll: u64,
    pub average_salary: f64,
}

/// Headcount, payroll and average salary per department, in the order
/// departments first appear in the roster.
///
/// # Errors
///
/// Propagates [`CollectionError`] from the aggregates; never raised for a
/// roster produced by `group_by`, whose groups are non-empty.
pub fn department_summaries(
    roster: &EagerCollection<Employee>,
) -> Result<EagerCollection<DepartmentSummary>, CollectionError> {
    let groups = roster.group_by(KeySelector::field("department"));
    let mut summaries = EagerCollection::with_capacity(groups.len());

    for (department, members) in &groups {
        let salaries = members.map(|employee, _| employee.salary);
        summaries.push(DepartmentSummary {
            department: department.to_string(),
            headcount: members.len(),
            payroll: salaries.sum(),
            average_salary: salaries.avg()?,
        });
    }
    Ok(summaries)
}

/// The `count` best-paid employees, highest first.
pub fn top_earners(roster: &EagerCollection<Employee>, count: usize) -> Vec<String> {
    roster
        .sort_by(|left, right| right.salary.cmp(&left.salary))
        .take(count)
        .map(|employee, _| employee.name.clone())
        .to_vec()
}

/// Every distinct skill in first-seen order.
pub fn distinct_skills(roster: &EagerCollection<Employee>) -> Vec<String> {
    roster
        .flat_map(|employee, _| employee.skills.clone())
        .unique()
        .to_vec()
}

/// Assigns badge numbers from `first_badge` upward, lazily.
pub fn badges(roster: &EagerCollection<Employee>, first_badge: i64) -> Vec<(i64, String)> {
    LazyCollection::from_start(first_badge)
        .zip(&roster.lazy())
        .map(|(badge, employee), _| (badge, employee.name))
        .to_vec()
}

/// Splits the roster at `threshold`: those earning at least it, and the
/// rest.
pub fn salary_bands(
    roster: &EagerCollection<Employee>,
    threshold: u64,
) -> (Vec<String>, Vec<String>) {
    let (high, low) = roster.partition(|employee, _| employee.salary >= threshold);
    let names = |band: EagerCollection<Employee>| band.map(|employee, _| employee.name.clone()).to_vec();
    (names(high), names(low))
}
