use super::*;

fn square() -> Layout {
    Layout {
        x: 0.0,
        y: 0.0,
        width: 10.0,
        height: 10.0,
    }
}

fn matrix(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Transform {
    Transform { a, b, c, d, tx, ty }
}

#[test]
fn identity_keeps_layout_origin() {
    assert_eq!(frame_origin(square(), Transform::default()), (0.0, 0.0));
}

#[test]
fn translation_shifts_origin() {
    assert_eq!(
        frame_origin(square(), matrix(1.0, 0.0, 0.0, 1.0, 5.0, 5.0)),
        (5.0, 5.0)
    );
}

#[test]
fn quarter_turn_moves_min_x_to_far_corner() {
    // Corners land on (0,0), (0,10), (-10,0), (-10,10).
    assert_eq!(
        frame_origin(square(), matrix(0.0, 1.0, -1.0, 0.0, 0.0, 0.0)),
        (-10.0, 0.0)
    );
}

#[test]
fn negative_extent_is_covered() {
    let layout = Layout {
        x: 4.0,
        y: 4.0,
        width: -6.0,
        height: 2.0,
    };
    assert_eq!(frame_origin(layout, Transform::default()), (-2.0, 4.0));
}

#[test]
fn scale_applies_before_translation() {
    let layout = Layout {
        x: 1.0,
        y: 2.0,
        width: 3.0,
        height: 4.0,
    };
    assert_eq!(
        frame_origin(layout, matrix(2.0, 0.0, 0.0, 0.5, -1.0, 3.0)),
        (1.0, 4.0)
    );
}
