use std::collections::{BTreeMap, HashMap};

use bitfield_attribute::{
    bit_field::BitField,
    errors::{DefineError, ViewError},
    host::Host,
    shape::{Shape, ShapeSlot},
    value::{FlagValue, Update},
};

bitfield_attribute::bit_field! {
    /// Flags of a database user.
    pub struct UserFlags {
        first,
        second,
        last,
    }
}

bitfield_attribute::bit_field! {
    struct Wide: 64 {
        low,
        high,
    }
}

/// A record with one integer column, like a database row.
#[derive(Debug, Default)]
struct DatabaseUser {
    name: String,
    bitfield: i64,
    writes: usize,
}

impl Host for DatabaseUser {
    fn read_field(&self, field: &str) -> i64 {
        match field {
            "bitfield" => self.bitfield,
            _ => 0,
        }
    }

    fn write_field(&mut self, field: &str, value: i64) {
        if field == "bitfield" {
            self.bitfield = value;
            self.writes += 1;
        }
    }
}

#[test]
fn test_end_to_end() {
    let mut user = DatabaseUser {
        name: "Artem".to_string(),
        bitfield: 5,
        ..Default::default()
    };

    {
        let mut flags = UserFlags::new(&mut user, "bitfield").unwrap();
        assert!(flags.first());
        assert!(!flags.second());
        assert!(flags.last());
        assert_eq!(flags.active_names(), vec!["first", "last"]);
        assert_eq!(flags.value(), 5);

        flags.set_second(true);
        assert!(flags.is_second());
    }

    assert_eq!(user.bitfield, 7);
    assert_eq!(user.writes, 1);
    assert_eq!(user.name, "Artem");

    let flags = UserFlags::new(&mut user, "bitfield").unwrap();
    assert!(flags.first() && flags.second() && flags.last());
}

#[test]
fn test_create_from_attributes_then_reload() {
    let mut user = DatabaseUser::default();

    {
        let mut flags = UserFlags::new(&mut user, "bitfield").unwrap();
        flags
            .replace(Update::from([
                ("first", true),
                ("second", false),
                ("last", true),
            ]))
            .unwrap();
    }

    let attributes: Vec<(String, bool)> = {
        let flags = UserFlags::new(&mut user, "bitfield").unwrap();
        flags
            .attributes()
            .iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    };

    {
        let mut flags = UserFlags::new(&mut user, "bitfield").unwrap();
        flags.update(attributes).unwrap();
    }

    let flags = UserFlags::new(&mut user, "bitfield").unwrap();
    assert!(flags.first());
    assert!(!flags.second());
    assert!(flags.last());
}

#[test]
fn test_macro_shape() {
    let shape = UserFlags::<DatabaseUser>::shape();
    assert_eq!(shape.names(), &["first", "second", "last"]);
    assert_eq!(shape.width(), 32);
    assert_eq!(UserFlags::<DatabaseUser>::NAMES, &["first", "second", "last"]);

    assert!(std::ptr::eq(shape, UserFlags::<HashMap<String, i64>>::shape()));
}

#[test]
fn test_macro_wide_shape() {
    let mut record = BTreeMap::from([("flags".to_string(), 0_i64)]);
    let mut flags = Wide::new(&mut record, "flags").unwrap();

    flags.set_high(true);
    assert_eq!(flags.value(), 2);
    assert_eq!(Wide::<BTreeMap<String, i64>>::WIDTH, 64);
    assert_eq!(format!("{:?}", flags), r#"Wide(BitField { field: "flags", attributes: {"low": false, "high": true} })"#);
}

#[test]
fn test_partial_update_and_full_replace() {
    let shape = Shape::new(["a", "b", "c"]).unwrap();
    let mut record = HashMap::from([("bits".to_string(), 0b101_i64)]);

    {
        let mut view = BitField::new(&shape, &mut record, "bits").unwrap();
        view.update([("b", true)]).unwrap();
        assert_eq!(view.active_names(), vec!["a", "b", "c"]);
    }

    record.insert("bits".to_string(), 0b101);

    let mut view = BitField::new(&shape, &mut record, "bits").unwrap();
    view.replace([("b", true)]).unwrap();
    assert_eq!(view.active_names(), vec!["b"]);
}

#[test]
fn test_update_with_mixed_values() {
    let shape = Shape::new(["a", "b", "c"]).unwrap();
    let mut record = HashMap::from([("bits".to_string(), 0_i64)]);
    let mut view = BitField::new(&shape, &mut record, "bits").unwrap();

    view.update(Update::Flags(vec![
        ("a".to_string(), FlagValue::from("t")),
        ("b".to_string(), FlagValue::from(0)),
        ("c".to_string(), FlagValue::from(Some(true))),
        ("d".to_string(), FlagValue::from(true)),
    ]))
    .unwrap();

    assert_eq!(view.value(), 0b101);
}

#[test]
fn test_independent_views_do_not_share_cache() {
    let shape = Shape::new(["a", "b"]).unwrap();
    let mut record = HashMap::from([("bits".to_string(), 0_i64)]);

    let mut first = BitField::new(&shape, &mut record, "bits").unwrap();
    first.set("a", true).unwrap();
    drop(first);

    let mut second = BitField::new(&shape, &mut record, "bits").unwrap();
    assert_eq!(second.get("a"), Some(true));
    second.set("b", true).unwrap();
    assert_eq!(second.value(), 0b11);
}

#[test]
fn test_definition_errors() {
    static SHAPE: ShapeSlot = ShapeSlot::new();

    assert!(SHAPE.define(["first", "second", "last"]).is_ok());
    assert_eq!(SHAPE.define(["first"]).unwrap_err(), DefineError::AlreadyDefined);

    assert_eq!(
        Shape::new(["first", "first"]).unwrap_err(),
        DefineError::DuplicateName("first".to_string())
    );

    let too_many: Vec<String> = (0..33).map(|i| format!("bit{}", i)).collect();
    assert!(matches!(
        Shape::new(too_many).unwrap_err(),
        DefineError::TooManyNames { count: 33, width: 32 }
    ));
}

#[test]
fn test_strict_shape() {
    let shape = Shape::with_width(["a", "b"], 8).unwrap().strict();
    let mut record = HashMap::from([("bits".to_string(), 0b100_i64)]);

    assert_eq!(
        BitField::new(&shape, &mut record, "bits").unwrap_err(),
        ViewError::OutOfRange(0b100)
    );
    assert_eq!(record["bits"], 0b100);
}
