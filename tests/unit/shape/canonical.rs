use super::*;

fn rec(pairs: &[(&str, Value)]) -> Value {
    Value::Map(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect(),
    )
}

#[test]
fn type_codes_map_to_tags() {
    assert_eq!(ShapeKind::from_code(0.0), ShapeKind::Shape);
    assert_eq!(ShapeKind::from_code(1.0), ShapeKind::Rect);
    assert_eq!(ShapeKind::from_code(2.0), ShapeKind::Ellipse);
    assert_eq!(ShapeKind::from_code(3.0), ShapeKind::Keep);
    assert_eq!(ShapeKind::from_code(9.0), ShapeKind::Unrecognized(9.0));
}

#[test]
fn shape_type_takes_path_from_shape_record() {
    let raw = rec(&[
        ("type", Value::Int(0)),
        ("shape", rec(&[("d", Value::String("M0 0 L1 1".into()))])),
    ]);
    let s = canonicalize_shape(&raw, "shape").unwrap();
    assert_eq!(s.kind, ShapeKind::Shape);
    assert_eq!(
        serde_json::to_string(&s).unwrap(),
        r#"{"type":"shape","pathArgs":{"d":"M0 0 L1 1"}}"#
    );
}

#[test]
fn absent_type_reads_as_shape() {
    let s = canonicalize_shape(&rec(&[]), "shape").unwrap();
    assert_eq!(s.kind, ShapeKind::Shape);
    assert!(s.path_args.is_none());
}

#[test]
fn keep_has_no_path_args() {
    let raw = rec(&[
        ("type", Value::Int(3)),
        ("args", rec(&[("d", Value::String("ignored".into()))])),
    ]);
    let s = canonicalize_shape(&raw, "shape").unwrap();
    assert_eq!(serde_json::to_string(&s).unwrap(), r#"{"type":"keep"}"#);
}

#[test]
fn rect_and_ellipse_default_missing_fields() {
    let raw = rec(&[
        ("type", Value::Int(1)),
        (
            "rect",
            rec(&[("width", Value::Float(4.0)), ("cornerRadius", Value::Float(1.5))]),
        ),
    ]);
    let s = canonicalize_shape(&raw, "shape").unwrap();
    assert_eq!(
        s.path_args,
        Some(PathArgs::Rect(RectArgs {
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 0.0,
            corner_radius: 1.5,
        }))
    );

    let raw = rec(&[
        ("type", Value::Int(2)),
        ("ellipse", rec(&[("radiusX", Value::Float(3.0))])),
    ]);
    let json = serde_json::to_value(canonicalize_shape(&raw, "shape").unwrap()).unwrap();
    assert_eq!(json["type"], "ellipse");
    assert_eq!(json["pathArgs"]["radiusX"], 3.0);
    assert_eq!(json["pathArgs"]["radiusY"], 0.0);
}

#[test]
fn unrecognized_type_keeps_raw_code_and_generic_args() {
    let raw = rec(&[
        ("type", Value::Int(7)),
        ("args", rec(&[("k", Value::Int(1))])),
    ]);
    let s = canonicalize_shape(&raw, "shape").unwrap();
    assert_eq!(s.kind, ShapeKind::Unrecognized(7.0));
    assert_eq!(
        serde_json::to_string(&s).unwrap(),
        r#"{"type":7,"pathArgs":{"k":1}}"#
    );
}

#[test]
fn shape_transform_defaults_scale_to_one() {
    let raw = rec(&[("transform", rec(&[("tx", Value::Float(2.0))]))]);
    let s = canonicalize_shape(&raw, "shape").unwrap();
    let t = s.transform.unwrap();
    assert_eq!((t.a, t.d, t.tx), (1.0, 1.0, 2.0));
}

#[test]
fn malformed_entries_name_their_position() {
    let list = vec![rec(&[]), Value::Int(4)];
    let err = canonicalize_shapes(&list, "frame.shapes").unwrap_err();
    assert!(err.to_string().contains("frame.shapes[1]"));
}
