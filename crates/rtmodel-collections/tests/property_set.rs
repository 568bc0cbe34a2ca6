#![forbid(unsafe_code)]

//! A `PropertySet` maps names to boxed property values.

use std::cell::Cell;
use std::rc::Rc;

use rtmodel_collections::{CollectionChange, PropertySet};
use rtmodel_foundation::{PropertyType, PropertyValue, Rect};

#[test]
fn stores_heterogeneous_values() {
    let set = PropertySet::new();
    set.insert("count", 5u8).unwrap();
    set.insert("title", "Ni!").unwrap();
    set.insert("bounds", Rect::new(2.0, 4.0, 6.0, 8.0)).unwrap();

    assert_eq!(set.size(), 3);
    assert_eq!(set.lookup("count").unwrap().get_uint8(), Ok(5));
    assert_eq!(
        set.lookup("title").unwrap().property_type(),
        PropertyType::String
    );
    assert_eq!(
        set.lookup("bounds").unwrap().get_rect(),
        Ok(Rect::new(2.0, 4.0, 6.0, 8.0))
    );
}

#[test]
fn retyping_a_key_is_item_changed() {
    let set = PropertySet::new();
    set.insert("v", PropertyValue::create_int32(1)).unwrap();
    let changed = Rc::new(Cell::new(false));
    let changed_clone = Rc::clone(&changed);
    let _revoker = set.subscribe(move |sender, args| {
        assert_eq!(args.collection_change(), CollectionChange::ItemChanged);
        let v = sender.lookup("v").unwrap();
        assert_eq!(v.property_type(), PropertyType::Double);
        changed_clone.set(true);
    });
    assert_eq!(set.insert("v", 2.5f64), Ok(true));
    assert!(changed.get());
}
