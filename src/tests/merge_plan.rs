use super::{natural_cmp, MergePlanner, NoteHandle};
use crate::error::MergeError;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

fn handle(name: &str) -> NoteHandle {
    NoteHandle::new(PathBuf::from(format!("/vault/{name}.md")))
}

fn names(planner: &MergePlanner) -> Vec<String> {
    planner
        .entries()
        .iter()
        .map(|entry| entry.handle.name.clone())
        .collect()
}

#[test]
fn handle_name_is_the_file_stem() {
    let handle = NoteHandle::new(PathBuf::from("/vault/Weekly notes.md"));
    assert_eq!(handle.name, "Weekly notes");
}

#[test]
fn natural_cmp_orders_digit_runs_by_value() {
    assert_eq!(natural_cmp("note2", "note10"), Ordering::Less);
    assert_eq!(natural_cmp("note10", "note10"), Ordering::Equal);
    assert_eq!(natural_cmp("note3", "note21"), Ordering::Less);
    assert_eq!(natural_cmp("a2b", "a2a"), Ordering::Greater);
}

#[test]
fn natural_cmp_is_case_insensitive() {
    assert_eq!(natural_cmp("Alpha2", "alpha10"), Ordering::Less);
    assert_eq!(natural_cmp("b", "A"), Ordering::Greater);
}

#[test]
fn new_sorts_candidates_naturally_and_includes_all() {
    let planner = MergePlanner::new(vec![handle("note10"), handle("Note1"), handle("note2")]);

    assert_eq!(names(&planner), vec!["Note1", "note2", "note10"]);
    assert!(planner.entries().iter().all(|entry| entry.included));
}

#[test]
fn toggle_flips_and_double_toggle_restores() {
    let mut planner = MergePlanner::new(vec![handle("a"), handle("b")]);
    let path = planner.entries()[0].handle.path.clone();

    assert!(planner.toggle_included(&path));
    assert!(!planner.entries()[0].included);
    assert!(planner.toggle_included(&path));
    assert!(planner.entries()[0].included);
}

#[test]
fn toggle_unknown_handle_is_a_noop() {
    let mut planner = MergePlanner::new(vec![handle("a")]);

    assert!(!planner.toggle_included(Path::new("/vault/other.md")));
    assert!(planner.entries()[0].included);
}

#[test]
fn move_to_reorders_without_losing_members_or_flags() {
    let mut planner = MergePlanner::new(vec![handle("a"), handle("b"), handle("c"), handle("d")]);
    let b = planner.entries()[1].handle.path.clone();
    let d = planner.entries()[3].handle.path.clone();
    planner.toggle_included(&d);

    assert!(planner.move_to(&b, 3));
    assert!(planner.move_to(&d, 0));
    assert_eq!(names(&planner), vec!["d", "a", "c", "b"]);

    // Membership and inclusion flags survive any move sequence.
    assert_eq!(planner.len(), 4);
    let included: Vec<bool> = planner
        .entries()
        .iter()
        .map(|entry| entry.included)
        .collect();
    assert_eq!(included, vec![false, true, true, true]);
}

#[test]
fn move_to_same_index_is_a_noop() {
    let mut planner = MergePlanner::new(vec![handle("a"), handle("b"), handle("c")]);
    let b = planner.entries()[1].handle.path.clone();

    assert!(planner.move_to(&b, 1));
    assert_eq!(names(&planner), vec!["a", "b", "c"]);
}

#[test]
fn move_to_clamps_past_the_end() {
    let mut planner = MergePlanner::new(vec![handle("a"), handle("b"), handle("c")]);
    let a = planner.entries()[0].handle.path.clone();

    assert!(planner.move_to(&a, 99));
    assert_eq!(names(&planner), vec!["b", "c", "a"]);
}

#[test]
fn move_to_front_boundary() {
    let mut planner = MergePlanner::new(vec![handle("a"), handle("b"), handle("c")]);
    let c = planner.entries()[2].handle.path.clone();

    assert!(planner.move_to(&c, 0));
    assert_eq!(names(&planner), vec!["c", "a", "b"]);
}

#[test]
fn move_unknown_handle_is_a_noop() {
    let mut planner = MergePlanner::new(vec![handle("a"), handle("b")]);

    assert!(!planner.move_to(Path::new("/vault/other.md"), 0));
    assert_eq!(names(&planner), vec!["a", "b"]);
}

#[test]
fn finalize_returns_included_in_current_order() {
    let mut planner = MergePlanner::new(vec![handle("a"), handle("b"), handle("c")]);
    let b = planner.entries()[1].handle.path.clone();
    let c = planner.entries()[2].handle.path.clone();
    planner.toggle_included(&b);
    planner.move_to(&c, 0);

    let sources = planner.finalize().unwrap();
    let names: Vec<&str> = sources.iter().map(|handle| handle.name.as_str()).collect();
    assert_eq!(names, vec!["c", "a"]);
}

#[test]
fn finalize_with_nothing_included_is_an_error() {
    let mut planner = MergePlanner::new(vec![handle("a"), handle("b")]);
    for path in [
        planner.entries()[0].handle.path.clone(),
        planner.entries()[1].handle.path.clone(),
    ] {
        planner.toggle_included(&path);
    }

    assert!(matches!(
        planner.finalize(),
        Err(MergeError::EmptySelection)
    ));
}
