#![forbid(unsafe_code)]

//! Integration tests for `StringMap` insertion, lookup and change events.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use rtmodel_collections::{CollectionChange, StringMap};
use rtmodel_foundation::RtError;
use tracing::Level;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::TRACE)
        .try_init();
}

#[test]
fn stringmap_basic_contract() {
    init_tracing();
    let m = StringMap::new();
    m.insert("hello", "world").unwrap();

    assert!(m.has_key("hello"));
    assert!(!m.has_key("world"));
    assert_eq!(m.size(), 1);
    assert_eq!(m.lookup("hello").as_deref(), Ok("world"));
}

#[test]
fn stringmap_changed_event() {
    init_tracing();
    let called: Rc<RefCell<HashMap<String, bool>>> = Rc::default();

    let m = StringMap::new();
    m.insert("hello", "world").unwrap();

    let called_in_handler = Rc::clone(&called);
    let token = m.add_map_changed(move |sender, args| {
        assert_eq!(args.collection_change().code(), 1);
        assert_eq!(args.collection_change(), CollectionChange::ItemInserted);
        assert_eq!(args.key().map(String::as_str), Some("dr"));

        assert_eq!(sender.size(), 2);
        assert!(sender.has_key("dr"));
        assert!(sender.has_key("hello"));

        if let Some(key) = args.key() {
            called_in_handler.borrow_mut().insert(key.clone(), true);
        }
    });
    m.insert("dr", "who").unwrap();
    assert!(m.remove_map_changed(token));
    m.insert("king", "arthur").unwrap();

    let called = called.borrow();
    assert_eq!(called.get("dr"), Some(&true));
    assert_eq!(called.get("hello"), None);
    assert_eq!(called.get("king"), None);
}

#[test]
fn removing_unknown_token_is_harmless() {
    let m = StringMap::new();
    let token = m.add_map_changed(|_, _| {});
    assert!(m.remove_map_changed(token));
    assert!(!m.remove_map_changed(token));
    assert_eq!(m.listener_count(), 0);
}

#[test]
fn lookup_missing_key_is_key_not_found() {
    let m = StringMap::new();
    m.insert("hello", "world").unwrap();
    assert_eq!(
        m.lookup("world"),
        Err(RtError::KeyNotFound {
            key: "\"world\"".into()
        })
    );
}

#[test]
fn listeners_fire_in_registration_order() {
    let m = StringMap::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let tokens: Vec<_> = ['A', 'B', 'C']
        .into_iter()
        .map(|tag| {
            let log = Rc::clone(&log);
            m.add_map_changed(move |_, _| log.borrow_mut().push(tag))
        })
        .collect();
    m.insert("k", "v").unwrap();
    assert_eq!(*log.borrow(), vec!['A', 'B', 'C']);
    assert!(tokens.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn full_mutation_sequence_reports_each_change() {
    let m = StringMap::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let log_clone = Rc::clone(&log);
    let _revoker = m.subscribe(move |sender, args| {
        log_clone.borrow_mut().push((
            args.collection_change(),
            args.key().cloned(),
            sender.size(),
        ));
    });

    m.insert("a", "1").unwrap();
    m.insert("a", "2").unwrap();
    m.insert("b", "3").unwrap();
    m.remove("a").unwrap();
    m.clear().unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            (CollectionChange::ItemInserted, Some("a".to_string()), 1),
            (CollectionChange::ItemChanged, Some("a".to_string()), 1),
            (CollectionChange::ItemInserted, Some("b".to_string()), 2),
            (CollectionChange::ItemRemoved, Some("a".to_string()), 1),
            (CollectionChange::Reset, None, 0),
        ]
    );
    assert_eq!(m.version(), 5);
}

#[test]
fn listeners_owning_revokers_can_be_removed() {
    init_tracing();
    let m = StringMap::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let seen_inner = Rc::clone(&seen);
    let inner = m.subscribe(move |_, args| {
        seen_inner.borrow_mut().push(("inner", args.key().cloned()));
    });
    let seen_outer = Rc::clone(&seen);
    let outer = m.subscribe(move |_, args| {
        let _ = inner.token();
        seen_outer.borrow_mut().push(("outer", args.key().cloned()));
    });
    let seen_owner = Rc::clone(&seen);
    let owner = m.add_map_changed(move |_, args| {
        let _ = outer.token();
        seen_owner.borrow_mut().push(("owner", args.key().cloned()));
    });

    m.insert("dr", "king").unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![
            ("inner", Some("dr".to_string())),
            ("outer", Some("dr".to_string())),
            ("owner", Some("dr".to_string())),
        ]
    );

    // Removing the owner drops `outer`, which drops `inner`.
    assert!(m.remove_map_changed(owner));
    assert_eq!(m.listener_count(), 0);
    assert!(!m.remove_map_changed(owner));

    seen.borrow_mut().clear();
    m.insert("hello", "world").unwrap();
    assert!(seen.borrow().is_empty());
}
