use super::*;

fn rec(pairs: &[(&str, Value)]) -> Fields {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

#[test]
fn missing_transform_is_identity() {
    let t = Transform::from_record(None);
    assert_eq!(
        (t.a, t.b, t.c, t.d, t.tx, t.ty),
        (1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    );
    assert_eq!(t.to_affine(), Affine::IDENTITY);
}

#[test]
fn transform_fields_default_independently() {
    let r = rec(&[
        ("a", Value::Float(0.0)),
        ("b", Value::Float(0.5)),
        ("tx", Value::Float(12.0)),
    ]);
    let t = Transform::from_record(Some(&r));
    assert_eq!(t.a, 1.0);
    assert_eq!(t.b, 0.5);
    assert_eq!(t.c, 0.0);
    assert_eq!(t.d, 1.0);
    assert_eq!(t.tx, 12.0);
    assert_eq!(t.ty, 0.0);
}

#[test]
fn layout_fields_default_independently() {
    let r = rec(&[("width", Value::Float(10.0)), ("y", Value::Null)]);
    let l = Layout::from_record(Some(&r));
    assert_eq!(l, Layout {
        x: 0.0,
        y: 0.0,
        width: 10.0,
        height: 0.0
    });
    assert_eq!(Layout::from_record(None), Layout::default());
}

#[test]
fn layout_rect_spans_extent() {
    let l = Layout {
        x: 1.0,
        y: 2.0,
        width: 3.0,
        height: 4.0,
    };
    assert_eq!(l.to_rect(), Rect::new(1.0, 2.0, 4.0, 6.0));
}

#[test]
fn mask_path_serializes_with_black_fill() {
    let m = MaskPath::from_clip_path("M0 0 L10 0 Z".to_string());
    assert_eq!(
        serde_json::to_string(&m).unwrap(),
        r##"{"_d":"M0 0 L10 0 Z","_styles":{"fill":"#000000"}}"##
    );
}

#[test]
fn video_entity_omits_unset_params() {
    let v = VideoEntity {
        version: None,
        images: BTreeMap::new(),
        video_size: VideoSize::default(),
        fps: None,
        frames: None,
        audios: None,
        sprites: Vec::new(),
    };
    assert_eq!(
        serde_json::to_string(&v).unwrap(),
        r#"{"images":{},"videoSize":{},"sprites":[]}"#
    );
}

#[test]
fn video_entity_uses_host_field_names() {
    let v = VideoEntity {
        version: Some(Value::String("2.0".into())),
        images: BTreeMap::new(),
        video_size: VideoSize {
            width: Some(375.0),
            height: Some(0.0),
        },
        fps: Some(20),
        frames: Some(0),
        audios: None,
        sprites: vec![SpriteEntity {
            matte_key: None,
            image_key: Some("img".into()),
            frames: Vec::new(),
        }],
    };
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json["FPS"], 20);
    assert_eq!(json["videoSize"]["width"], 375.0);
    assert_eq!(json["sprites"][0]["imageKey"], "img");
    assert!(json["sprites"][0].get("matteKey").is_none());
}
