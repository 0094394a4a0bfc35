//! Integration tests for pickr
//!
//! These tests drive the public library API end to end: items through the
//! engine and mapper, the picker state machine with callbacks, config
//! loading and filter output.

use pickr::cli::{Cli, parse_items};
use pickr::config::PickrConfig;
use pickr::item::Item;
use pickr::matching::{FuzzyEngine, MatchOptions, NucleoEngine, Segment, map_raw};
use pickr::picker::{Callbacks, Direction, Picker, PickerEvent, PickerOptions};
use pickr::ui::output;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use clap::Parser;

fn fruits() -> Vec<Item> {
    vec![
        Item::new("1", "apple"),
        Item::new("2", "banana"),
        Item::new("3", "grape"),
    ]
}

#[test]
fn test_query_highlights_matched_prefix() {
    let mut picker = Picker::with_default_engine(fruits());
    picker.mount();
    picker.set_query("ap");

    let top = &picker.results()[0];
    assert_eq!(top.item.id, "1");
    assert_eq!(
        top.segments,
        vec![Segment::matched("ap"), Segment::plain("ple")]
    );
    assert!(top.confidence > 0.9);
    assert!(picker.results().iter().all(|r| r.item.id != "2"));
    assert_eq!(picker.highlighted_id(), Some("1"));
}

#[test]
fn test_empty_query_shows_everything() {
    let mut engine = NucleoEngine::default();
    assert!(engine.search(&fruits(), "").is_empty());

    let mut picker = Picker::with_default_engine(fruits());
    picker.mount();
    let ids: Vec<&str> = picker.results().iter().map(|r| r.item.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(picker.highlighted_id(), Some("1"));
}

#[test]
fn test_navigation_wraps() {
    let mut picker = Picker::with_default_engine(fruits());
    picker.mount();
    assert!(picker.set_highlighted("2"));

    picker.navigate(Direction::Next);
    assert_eq!(picker.highlighted_id(), Some("3"));
    picker.navigate(Direction::Next);
    assert_eq!(picker.highlighted_id(), Some("1"));
    picker.navigate(Direction::Previous);
    assert_eq!(picker.highlighted_id(), Some("3"));
}

#[test]
fn test_commit_chooses_then_escapes() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let on_choose = Rc::clone(&calls);
    let on_escape = Rc::clone(&calls);

    let mut picker = Picker::with_default_engine(fruits())
        .with_options(PickerOptions {
            close_on_choose: true,
        })
        .with_callbacks(
            Callbacks::new()
                .on_choose(move |item| on_choose.borrow_mut().push(format!("choose:{}", item.id)))
                .on_escape(move || on_escape.borrow_mut().push("escape".to_string())),
        );
    picker.mount();
    picker.set_query("gra");
    picker.commit();

    assert_eq!(*calls.borrow(), vec!["choose:3", "escape"]);
}

#[test]
fn test_listeners_see_choice_before_dismissal() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);

    let mut picker = Picker::with_default_engine(fruits()).with_options(PickerOptions {
        close_on_choose: true,
    });
    picker.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    picker.mount();
    events.borrow_mut().clear();

    picker.choose("2");

    let events = events.borrow();
    let chosen = events
        .iter()
        .position(|e| *e == PickerEvent::Chosen("2".to_string()));
    let dismissed = events.iter().position(|e| *e == PickerEvent::Dismissed);
    assert!(chosen.is_some() && dismissed.is_some());
    assert!(chosen < dismissed);
}

#[test]
fn test_empty_list_is_inert() {
    let chosen = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&chosen);
    let mut picker = Picker::with_default_engine(Vec::new())
        .with_callbacks(Callbacks::new().on_choose(move |_| *counter.borrow_mut() += 1));

    picker.mount();
    picker.navigate(Direction::Next);
    picker.commit();
    picker.set_query("anything");
    picker.commit();

    assert_eq!(picker.highlighted_id(), None);
    assert_eq!(*chosen.borrow(), 0);
}

#[test]
fn test_keyword_match_fails_open() {
    let items = vec![
        Item::new("open", "Open File").with_keywords(vec!["load".into()]),
        Item::new("save", "Save File"),
    ];
    let mut engine = NucleoEngine::default();
    let raw = engine.search(&items, "load");
    assert_eq!(raw.len(), 1);

    let result = map_raw(&items, &raw[0]).unwrap();
    assert_eq!(result.item.id, "open");
    assert_eq!(result.segments, vec![Segment::plain("Open File")]);
}

#[test]
fn test_config_file_drives_matching() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(b"[matching]\nsearch_keywords = false\n\n[picker]\nclose_on_choose = false\n")
        .unwrap();

    let path = file.path().to_string_lossy().into_owned();
    let cli = Cli::parse_from(["pickr", "--config", path.as_str(), "--prompt", "go>"]);
    let mut config = cli.load_config().unwrap();
    cli.apply_to(&mut config);

    assert!(!config.matching.search_keywords);
    assert!(!config.picker.close_on_choose);
    assert_eq!(config.picker.prompt, "go>");

    let items = vec![Item::new("open", "Open File").with_keywords(vec!["load".into()])];
    let mut engine = NucleoEngine::new(config.matching.clone());
    assert!(engine.search(&items, "load").is_empty());
}

#[test]
fn test_filter_output_from_parsed_lines() {
    let items = parse_items("o\tOpen File\ns\tSave File\nc\tClose Window\n", false).unwrap();
    let mut picker = Picker::with_default_engine(items);
    picker.set_query("save");

    let mut out = Vec::new();
    output::write_text(&mut out, picker.results(), false).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("s\tSave File\t"));
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn test_threshold_filters_weak_matches() {
    let items = fruits();
    let strict = MatchOptions {
        threshold: 0.3,
        ..MatchOptions::default()
    };
    let mut engine = NucleoEngine::new(strict);
    let raw = engine.search(&items, "ap");
    assert!(raw.iter().all(|m| m.raw_score <= 0.3));
    assert!(raw.len() <= 2);

    let default = PickrConfig::default();
    let mut engine = NucleoEngine::new(default.matching);
    assert_eq!(engine.search(&items, "ap").len(), 2);
}
