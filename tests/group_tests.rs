#![cfg(feature = "eager")]
//! Tests for grouping, counting and partitioning.

use collectables::collect;
use collectables::eager::{EagerCollection, Fields, GroupResult, KeySelector};
use collectables::key::Key;
use rstest::{fixture, rstest};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
struct Employee {
    name: &'static str,
    department: &'static str,
}

impl Fields for Employee {
    fn field(&self, name: &str) -> Option<Key> {
        match name {
            "name" => Some(Key::from(self.name)),
            "department" => Some(Key::from(self.department)),
            _ => None,
        }
    }
}

#[fixture]
fn staff() -> EagerCollection<EagerCollection<&'static str>> {
    collect![
        collect!["name" => "Azdy", "department" => "IT"],
        collect!["name" => "Fahmi", "department" => "IT"],
        collect!["name" => "Azkan", "department" => "HR"],
    ]
}

#[fixture]
fn employees() -> EagerCollection<Employee> {
    collect![
        Employee { name: "Azdy", department: "IT" },
        Employee { name: "Fahmi", department: "IT" },
        Employee { name: "Azkan", department: "HR" },
    ]
}

// =============================================================================
// group_by
// =============================================================================

#[rstest]
fn group_by_field(staff: EagerCollection<EagerCollection<&'static str>>) {
    let result = staff.group_by(KeySelector::field("department"));

    let expected: GroupResult<EagerCollection<&str>> = collect![
        "IT" => collect![
            collect!["name" => "Azdy", "department" => "IT"],
            collect!["name" => "Fahmi", "department" => "IT"],
        ],
        "HR" => collect![collect!["name" => "Azkan", "department" => "HR"]],
    ];
    assert_eq!(result, expected);
}

#[rstest]
fn group_by_function_lowercases(staff: EagerCollection<EagerCollection<&'static str>>) {
    let result = staff.group_by(KeySelector::function(
        |person: &EagerCollection<&str>, _: &Key| {
            person
                .get("department")
                .map(|department| department.to_lowercase())
                .unwrap_or_default()
        },
    ));

    assert_eq!(result.keys().to_vec(), vec![Key::from("it"), Key::from("hr")]);
    assert_eq!(result.get("it").map(EagerCollection::len), Some(2));
    assert_eq!(result.get("hr").map(EagerCollection::len), Some(1));
}

#[rstest]
fn group_by_custom_fields(employees: EagerCollection<Employee>) {
    let result = employees.group_by(KeySelector::field("department"));

    let it = result.get("IT").unwrap();
    assert_eq!(
        it.to_vec().iter().map(|employee| employee.name).collect::<Vec<_>>(),
        vec!["Azdy", "Fahmi"]
    );
}

#[rstest]
fn group_members_are_reindexed(employees: EagerCollection<Employee>) {
    let result = employees.group_by(KeySelector::field("department"));
    let hr = result.get("HR").unwrap();

    assert_eq!(hr.keys().to_vec(), vec![Key::Index(0)]);
}

#[rstest]
fn group_by_missing_field_uses_empty_label(employees: EagerCollection<Employee>) {
    let result = employees.group_by(KeySelector::field("salary"));

    assert_eq!(result.len(), 1);
    assert_eq!(result.get(Key::empty_label()).map(EagerCollection::len), Some(3));
}

#[rstest]
fn group_by_hash_map_records() {
    let records: EagerCollection<HashMap<&str, &str>> = collect![
        HashMap::from([("name", "Azdy"), ("team", "core")]),
        HashMap::from([("name", "Fahmi"), ("team", "web")]),
        HashMap::from([("name", "Hasyim"), ("team", "core")]),
    ];

    let result = records.group_by(KeySelector::field("team"));

    assert_eq!(result.keys().to_vec(), vec![Key::from("core"), Key::from("web")]);
}

#[rstest]
fn group_by_then_flatten_reproduces_elements(employees: EagerCollection<Employee>) {
    let groups = employees.group_by(KeySelector::field("department"));
    let mut flattened: Vec<&str> = groups
        .collapse()
        .to_vec()
        .iter()
        .map(|employee| employee.name)
        .collect();
    let mut original: Vec<&str> = employees.to_vec().iter().map(|employee| employee.name).collect();

    flattened.sort_unstable();
    original.sort_unstable();
    assert_eq!(flattened, original);
}

#[rstest]
fn group_by_empty_collection() {
    let empty: EagerCollection<Employee> = collect![];
    assert!(empty.group_by(KeySelector::field("department")).is_empty());
}

// =============================================================================
// count_by and partition
// =============================================================================

#[rstest]
fn count_by_department(employees: EagerCollection<Employee>) {
    let counts = employees.count_by(KeySelector::field("department"));
    assert_eq!(counts, collect!["IT" => 2, "HR" => 1]);
}

#[rstest]
fn count_by_function() {
    let words = collect!["apple", "avocado", "banana", "blueberry", "cherry"];
    let counts = words.count_by(KeySelector::function(|word: &&str, _: &Key| {
        word.chars().next().unwrap_or_default().to_string()
    }));

    assert_eq!(counts, collect!["a" => 2, "b" => 2, "c" => 1]);
}

#[rstest]
#[case(0, 3)]
#[case(90, 2)]
#[case(101, 0)]
fn partition_is_exhaustive(#[case] threshold: i32, #[case] expected_passed: usize) {
    let scores = collect!["Azdy" => 100, "Gibran" => 80, "Azkan" => 90];
    let (passed, failed) = scores.partition(|value, _| *value >= threshold);

    assert_eq!(passed.len(), expected_passed);
    assert_eq!(passed.len() + failed.len(), scores.len());
    assert!(passed.iter().all(|(key, _)| !failed.has(key)));
}
