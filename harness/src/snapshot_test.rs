use serde_json::json;

use super::*;

#[test]
fn parses_and_ignores_render_attributes() {
    let snapshot = StateSnapshot::from_value(json!({
        "shapes": [
            { "x": 100.0, "y": 150.0, "radius": 10.0, "color": "#e63946" },
            { "x": 250, "y": 200 }
        ]
    }))
    .unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.shapes[1], ShapePoint { x: 250.0, y: 200.0 });
}

#[test]
fn empty_shapes() {
    let snapshot = StateSnapshot::from_value(json!({ "shapes": [] })).unwrap();
    assert!(snapshot.is_empty());
}

#[test]
fn missing_shapes_is_an_error() {
    let err = StateSnapshot::from_value(json!({})).unwrap_err();
    assert!(matches!(err, HarnessError::Snapshot(_)));
}

#[test]
fn null_is_an_error() {
    assert!(StateSnapshot::from_value(serde_json::Value::Null).is_err());
}

#[test]
fn near_is_strict() {
    let p = ShapePoint { x: 100.4, y: 149.6 };
    assert!(p.is_near(100.0, 150.0, 1.0));
    assert!(!ShapePoint { x: 101.0, y: 150.0 }.is_near(100.0, 150.0, 1.0));
    assert!(!ShapePoint { x: 100.0, y: 148.9 }.is_near(100.0, 150.0, 1.0));
}
