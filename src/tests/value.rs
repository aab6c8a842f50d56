use crate::value::{Value, ValueInner};

#[test]
fn test_conversions() {
    assert_eq!(Value::from(4).as_number(), Some(4.0));
    assert_eq!(Value::from(0.5).as_number(), Some(0.5));
    assert_eq!(Value::from("title").as_str(), Some("title"));
    assert_eq!(Value::from(String::from("title")).as_str(), Some("title"));
    assert!(matches!(&*Value::from(true), ValueInner::Bool(true)));
    assert!(Value::from(None::<f64>).is_nil());
    assert_eq!(Value::from(Some(3)).as_number(), Some(3.0));
    assert!(matches!(&*Value::from(vec![1, 2]), ValueInner::List(items) if items.len() == 2));
}

#[test]
fn test_display() {
    assert_eq!(Value::from(6).to_string(), "6");
    assert_eq!(Value::from(0.5).to_string(), "0.5");
    assert_eq!(Value::from("addition").to_string(), "addition");
    assert_eq!(Value::new_nil().to_string(), "nil");
    assert_eq!(Value::from(vec![1, 2]).to_string(), "[ 1, 2 ]");
}

#[test]
fn test_describe_quotes_strings_and_sorts_keys() {
    assert_eq!(Value::from("abc").describe(), "'abc'");
    assert_eq!(Value::new_list(vec![]).describe(), "[]");
    assert_eq!(
        Value::object([("b", Value::from("x")), ("a", Value::from(vec![1]))]).describe(),
        "Object({ a: [ 1 ], b: 'x' })"
    );
}

#[test]
fn test_clones_share_identity() {
    let object = Value::object([("key1", 1)]);
    let copy = object.clone();
    assert!(object.ptr_eq(&copy));
    assert!(!object.ptr_eq(&Value::object([("key1", 1)])));
    assert!(object.is_composite());
    assert!(!Value::from(1).is_composite());
}
