use super::*;
use crate::schema::svga_schema;

fn varint(mut v: u64, out: &mut Vec<u8>) {
    while v >= 0x80 {
        out.push((v as u8) | 0x80);
        v >>= 7;
    }
    out.push(v as u8);
}

fn key(field: u32, wire: u8, out: &mut Vec<u8>) {
    varint(u64::from(field) << 3 | u64::from(wire), out);
}

fn len_field(field: u32, payload: &[u8], out: &mut Vec<u8>) {
    key(field, 2, out);
    varint(payload.len() as u64, out);
    out.extend_from_slice(payload);
}

fn float_field(field: u32, v: f32, out: &mut Vec<u8>) {
    key(field, 5, out);
    out.extend_from_slice(&v.to_le_bytes());
}

fn varint_field(field: u32, v: u64, out: &mut Vec<u8>) {
    key(field, 0, out);
    varint(v, out);
}

const MOVIE: &str = "com.opensource.svga.MovieEntity";

#[test]
fn decodes_params_and_version() {
    let mut params = Vec::new();
    float_field(1, 375.0, &mut params);
    float_field(2, 667.0, &mut params);
    varint_field(3, 30, &mut params);
    varint_field(4, 60, &mut params);

    let mut movie = Vec::new();
    len_field(1, b"2.0", &mut movie);
    len_field(2, &params, &mut movie);

    let v = decode_message(svga_schema().unwrap(), MOVIE, &movie).unwrap();
    assert_eq!(v.get("version"), Some(&Value::String("2.0".into())));
    let p = v.get("params").unwrap();
    assert_eq!(p.get("viewBoxWidth"), Some(&Value::Float(375.0)));
    assert_eq!(p.get("fps"), Some(&Value::Int(30)));
    assert_eq!(p.get("frames"), Some(&Value::Int(60)));
}

#[test]
fn absent_singular_fields_stay_absent() {
    let v = decode_message(svga_schema().unwrap(), MOVIE, &[]).unwrap();
    assert_eq!(v.get("version"), None);
    assert_eq!(v.get("params"), None);
}

#[test]
fn absent_repeated_and_map_fields_decode_empty() {
    let v = decode_message(svga_schema().unwrap(), MOVIE, &[]).unwrap();
    assert_eq!(v.get("sprites"), Some(&Value::List(Vec::new())));
    assert_eq!(v.get("audios"), Some(&Value::List(Vec::new())));
    assert_eq!(v.get("images"), Some(&Value::Map(BTreeMap::new())));

    // Nested messages get the same treatment.
    let mut sprite = Vec::new();
    len_field(1, b"img", &mut sprite);
    let mut frame = Vec::new();
    float_field(1, 1.0, &mut frame);
    len_field(2, &frame, &mut sprite);
    let mut movie = Vec::new();
    len_field(4, &sprite, &mut movie);

    let v = decode_message(svga_schema().unwrap(), MOVIE, &movie).unwrap();
    let sprites = v.get("sprites").and_then(Value::as_list).unwrap();
    let frames = sprites[0].get("frames").and_then(Value::as_list).unwrap();
    assert_eq!(frames[0].get("shapes"), Some(&Value::List(Vec::new())));
    assert_eq!(frames[0].get("clipPath"), None);
}

#[test]
fn decodes_image_map_entries() {
    let mut entry_a = Vec::new();
    len_field(1, b"img_a", &mut entry_a);
    len_field(2, &[0x89, b'P', b'N', b'G'], &mut entry_a);
    let mut entry_b = Vec::new();
    len_field(1, b"img_b", &mut entry_b);

    let mut movie = Vec::new();
    len_field(3, &entry_a, &mut movie);
    len_field(3, &entry_b, &mut movie);

    let v = decode_message(svga_schema().unwrap(), MOVIE, &movie).unwrap();
    let images = v.get("images").and_then(Value::as_map).unwrap();
    assert_eq!(
        images.get("img_a"),
        Some(&Value::Bytes(vec![0x89, b'P', b'N', b'G']))
    );
    assert_eq!(images.get("img_b"), Some(&Value::Bytes(Vec::new())));
}

#[test]
fn repeated_messages_keep_order() {
    let mut s1 = Vec::new();
    len_field(1, b"first", &mut s1);
    let mut s2 = Vec::new();
    len_field(1, b"second", &mut s2);

    let mut movie = Vec::new();
    len_field(4, &s1, &mut movie);
    len_field(4, &s2, &mut movie);

    let v = decode_message(svga_schema().unwrap(), MOVIE, &movie).unwrap();
    let sprites = v.get("sprites").and_then(Value::as_list).unwrap();
    assert_eq!(sprites.len(), 2);
    assert_eq!(
        sprites[1].get("imageKey").and_then(Value::as_str),
        Some("second")
    );
}

#[test]
fn negative_int32_is_sign_extended() {
    let mut audio = Vec::new();
    varint_field(2, u64::MAX, &mut audio);
    let mut movie = Vec::new();
    len_field(5, &audio, &mut movie);

    let v = decode_message(svga_schema().unwrap(), MOVIE, &movie).unwrap();
    let audios = v.get("audios").and_then(Value::as_list).unwrap();
    assert_eq!(audios[0].get("startFrame"), Some(&Value::Int(-1)));
}

#[test]
fn unknown_fields_are_skipped() {
    let mut movie = Vec::new();
    varint_field(99, 12345, &mut movie);
    len_field(98, b"junk", &mut movie);
    len_field(1, b"2.0", &mut movie);

    let v = decode_message(svga_schema().unwrap(), MOVIE, &movie).unwrap();
    assert_eq!(v.get("version").and_then(Value::as_str), Some("2.0"));
    assert_eq!(v.as_map().unwrap().len(), 1);
}

#[test]
fn last_singular_occurrence_wins() {
    let mut movie = Vec::new();
    len_field(1, b"1.0", &mut movie);
    len_field(1, b"2.0", &mut movie);
    let v = decode_message(svga_schema().unwrap(), MOVIE, &movie).unwrap();
    assert_eq!(v.get("version").and_then(Value::as_str), Some("2.0"));
}

#[test]
fn wire_type_mismatch_is_decode_error() {
    let mut movie = Vec::new();
    varint_field(1, 7, &mut movie); // version is a string
    let err = decode_message(svga_schema().unwrap(), MOVIE, &movie).unwrap_err();
    assert!(matches!(err, SvgaError::Decode(_)));
    assert!(err.to_string().contains("version"));
}

#[test]
fn truncated_buffer_is_decode_error() {
    let mut movie = Vec::new();
    len_field(1, b"2.0.0", &mut movie);
    movie.truncate(movie.len() - 2);
    let err = decode_message(svga_schema().unwrap(), MOVIE, &movie).unwrap_err();
    assert!(matches!(err, SvgaError::Decode(_)));
}

#[test]
fn invalid_utf8_is_decode_error() {
    let mut movie = Vec::new();
    len_field(1, &[0xff, 0xfe], &mut movie);
    let err = decode_message(svga_schema().unwrap(), MOVIE, &movie).unwrap_err();
    assert!(err.to_string().contains("UTF-8"));
}

const PACKED: &str = r#"{"nested":{"Dash":{"fields":{
    "lengths":{"rule":"repeated","type":"float","id":1},
    "codes":{"rule":"repeated","type":"sint32","id":2}
}}}}"#;

#[test]
fn packed_and_unpacked_repeated_scalars_agree() {
    let schema = Schema::from_json(PACKED).unwrap();

    let mut unpacked = Vec::new();
    float_field(1, 4.0, &mut unpacked);
    float_field(1, 2.0, &mut unpacked);
    varint_field(2, 3, &mut unpacked); // zigzag(-2)
    varint_field(2, 4, &mut unpacked); // zigzag(2)

    let mut run = Vec::new();
    run.extend_from_slice(&4.0f32.to_le_bytes());
    run.extend_from_slice(&2.0f32.to_le_bytes());
    let mut codes = Vec::new();
    varint(3, &mut codes);
    varint(4, &mut codes);
    let mut packed = Vec::new();
    len_field(1, &run, &mut packed);
    len_field(2, &codes, &mut packed);

    let a = decode_message(&schema, "Dash", &unpacked).unwrap();
    let b = decode_message(&schema, "Dash", &packed).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        a.get("codes"),
        Some(&Value::List(vec![Value::Int(-2), Value::Int(2)]))
    );
}

#[test]
fn nesting_depth_is_capped() {
    let schema = Schema::from_json(
        r#"{"nested":{"Node":{"fields":{"child":{"type":"Node","id":1}}}}}"#,
    )
    .unwrap();

    let mut bytes = Vec::new();
    for _ in 0..(MAX_DEPTH + 1) {
        let mut outer = Vec::new();
        len_field(1, &bytes, &mut outer);
        bytes = outer;
    }
    let err = decode_message(&schema, "Node", &bytes).unwrap_err();
    assert!(err.to_string().contains("nesting"));
}
