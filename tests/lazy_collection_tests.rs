#![cfg(feature = "lazy")]
//! Behavioural tests for LazyCollection.
//!
//! Tests cover:
//! - Bounding infinite producers
//! - Restartability and cursor independence
//! - Pull counting (nothing runs before a terminal, nothing extra after)
//! - Memoization with remember
//! - Lazily surfaced errors with try_map / try_all
//! - Conversion to and from eager collections

use collectables::collect;
use collectables::eager::EagerCollection;
use collectables::key::Key;
use collectables::lazy::{CursorPhase, LazyCollection};
use rstest::{fixture, rstest};
use std::cell::Cell;
use std::rc::Rc;

#[fixture]
fn pulls() -> Rc<Cell<usize>> {
    Rc::new(Cell::new(0))
}

/// `0, 1, 2, ..` from a hand-written producer, counting every produced
/// element.
fn counting_naturals(pulls: &Rc<Cell<usize>>) -> LazyCollection<u64> {
    let pulls = Rc::clone(pulls);
    LazyCollection::make(move || {
        let pulls = Rc::clone(&pulls);
        let mut value = 0;
        std::iter::from_fn(move || {
            pulls.set(pulls.get() + 1);
            let current = value;
            value += 1;
            Some(current)
        })
    })
}

// =============================================================================
// Infinite producers
// =============================================================================

#[rstest]
fn take_ten_from_infinite_producer(pulls: Rc<Cell<usize>>) {
    let collection = counting_naturals(&pulls);
    let result = collection.take(10);

    assert_eq!(result.to_vec(), (0..10).collect::<Vec<_>>());
    assert_eq!(pulls.get(), 10);
}

#[rstest]
fn building_a_pipeline_pulls_nothing(pulls: Rc<Cell<usize>>) {
    let _pipeline = counting_naturals(&pulls)
        .map(|value, _| value * 3)
        .filter(|value, _| value % 2 == 0)
        .skip(4)
        .take(2);

    assert_eq!(pulls.get(), 0);
}

#[rstest]
fn filter_pulls_only_until_satisfied(pulls: Rc<Cell<usize>>) {
    let first_big = counting_naturals(&pulls).first_where(|value, _| *value > 5);

    assert_eq!(first_big, Some(6));
    assert_eq!(pulls.get(), 7);
}

#[rstest]
fn take_while_on_infinite_producer_stops(pulls: Rc<Cell<usize>>) {
    let small = counting_naturals(&pulls).take_while(|value, _| *value < 4);

    assert_eq!(small.to_vec(), vec![0, 1, 2, 3]);
    assert_eq!(pulls.get(), 5);
}

#[rstest]
fn chunking_an_infinite_producer() {
    let chunks = LazyCollection::from_start(1).chunk(3).unwrap().take(2);
    let values: Vec<Vec<i64>> = chunks.to_vec().iter().map(EagerCollection::to_vec).collect();

    assert_eq!(values, vec![vec![1, 2, 3], vec![4, 5, 6]]);
}

#[rstest]
fn zip_with_an_infinite_side() {
    let names = LazyCollection::make(|| vec!["Azdy", "Fahmi", "Hasyim"]);
    let numbered = LazyCollection::from_start(1).zip(&names);

    assert_eq!(numbered.to_vec(), vec![(1, "Azdy"), (2, "Fahmi"), (3, "Hasyim")]);
}

#[rstest]
fn concat_after_a_bounded_prefix() {
    let prefix = LazyCollection::range(1, 3);
    let rest = LazyCollection::from_start(100);

    assert_eq!(prefix.concat(&rest).take(5).to_vec(), vec![1, 2, 3, 100, 101]);
}

// =============================================================================
// Restartability
// =============================================================================

#[rstest]
fn every_pass_restarts_the_producer(pulls: Rc<Cell<usize>>) {
    let collection = counting_naturals(&pulls).take(3);

    assert_eq!(collection.to_vec(), vec![0, 1, 2]);
    assert_eq!(collection.to_vec(), vec![0, 1, 2]);
    assert_eq!(pulls.get(), 6);
}

#[rstest]
fn cursors_progress_independently() {
    let collection = LazyCollection::range(1, 3);
    let mut first = collection.cursor();
    let mut second = collection.cursor();

    assert_eq!(first.next(), Some((Key::Index(0), 1)));
    assert_eq!(first.next(), Some((Key::Index(1), 2)));
    assert_eq!(second.next(), Some((Key::Index(0), 1)));
    assert_eq!(first.next(), Some((Key::Index(2), 3)));
    assert_eq!(first.next(), None);
    assert_eq!(first.phase(), CursorPhase::Done);
    assert_eq!(second.phase(), CursorPhase::Yielding);
}

#[rstest]
fn exhausted_cursor_never_pulls_again(pulls: Rc<Cell<usize>>) {
    let mut cursor = counting_naturals(&pulls).take(2).cursor();

    assert_eq!(cursor.by_ref().count(), 2);
    assert_eq!(cursor.next(), None);
    assert_eq!(cursor.next(), None);
    assert_eq!(pulls.get(), 2);
}

// =============================================================================
// Memoization
// =============================================================================

#[rstest]
fn remember_computes_each_element_once(pulls: Rc<Cell<usize>>) {
    let remembered = counting_naturals(&pulls).remember();

    assert_eq!(remembered.take(4).to_vec(), vec![0, 1, 2, 3]);
    assert_eq!(remembered.take(6).to_vec(), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(remembered.take(2).to_vec(), vec![0, 1]);
    assert_eq!(pulls.get(), 6);
}

// =============================================================================
// Errors
// =============================================================================

#[rstest]
fn try_all_stops_before_later_transforms() {
    let later_transforms = Rc::new(Cell::new(0));
    let counter = Rc::clone(&later_transforms);

    let pipeline = LazyCollection::make(|| vec!["4", "8", "fifteen", "16"])
        .try_map(|text, _| text.parse::<u32>())
        .tap_each(move |_, _| counter.set(counter.get() + 1));

    let error = pipeline.try_all().unwrap_err();

    assert_eq!(error.to_string(), "invalid digit found in string");
    assert_eq!(later_transforms.get(), 3);
}

#[rstest]
fn invalid_chunk_size_is_reported_eagerly(pulls: Rc<Cell<usize>>) {
    assert!(counting_naturals(&pulls).chunk(0).is_err());
    assert_eq!(pulls.get(), 0);
}

// =============================================================================
// Eager interplay
// =============================================================================

#[rstest]
fn eager_to_lazy_and_back_preserves_keys() {
    let scores = collect!["Azdy" => 100, "Gibran" => 80, "Azkan" => 90];
    let passed = scores.lazy().filter(|value, _| *value >= 90).eager();

    assert_eq!(passed, collect!["Azdy" => 100, "Azkan" => 90]);
}

#[rstest]
fn from_eager_collection() {
    let lazy = LazyCollection::from(collect![1, 2, 3]);
    assert_eq!(lazy.map(|value, _| value * 2).sum(), 12);
}

#[rstest]
fn flat_map_flattens_lazily() {
    let people = LazyCollection::make(|| {
        vec![
            ("Fahmi", vec!["Coding", "Reading"]),
            ("Azdy", vec!["Writing", "Gaming"]),
        ]
    });

    let hobbies = people.flat_map(|(_, hobbies), _| hobbies);

    assert_eq!(hobbies.eager(), collect!["Coding", "Reading", "Writing", "Gaming"]);
}

#[rstest]
fn generate_fibonacci() {
    let fibonacci = LazyCollection::generate((0u64, 1u64), |state| {
        let (current, next) = *state;
        *state = (next, current + next);
        Some(current)
    });

    assert_eq!(
        fibonacci.skip(10).take(3).to_vec(),
        vec![55, 89, 144]
    );
}
