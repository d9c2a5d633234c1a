//! Browser-side smoke tests for the wasm facade.
//!
//! Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use circulant_layout_wasm::CirculantLayoutWasm;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn facade_frame_loop() {
    let mut layout = CirculantLayoutWasm::new(14, &[1, 2], 0.6 * 0.6 * 0.6).unwrap();
    assert_eq!(layout.order(), 14);
    assert_eq!(layout.edge_count(), 84);
    assert!(layout.is_adjacent(0, 2));
    assert!(!layout.is_adjacent(0, 7));

    layout.place_on_circle(0.3, 1.0, -0.5);
    layout.begin_grab(0, 4);
    for frame in 0..10 {
        layout.move_grabbed(0, 0.0, 1.0 + frame as f32 * 0.01, -0.4);
        if layout.is_running() {
            layout.step();
        }
    }
    layout.end_grab(0);

    let xs = layout.get_positions_x_view();
    assert_eq!(xs.length(), 14);
    assert_eq!(layout.edge_pairs().len(), 84 * 2);
    assert!(!layout.edge_placements().unwrap().is_null());
}

#[wasm_bindgen_test]
fn facade_rejects_bad_configuration() {
    assert!(CirculantLayoutWasm::new(0, &[1], 0.216).is_err());
    assert!(CirculantLayoutWasm::new(14, &[], 0.216).is_err());
    assert!(CirculantLayoutWasm::new(14, &[15], 0.216).is_err());
    assert!(CirculantLayoutWasm::new(14, &[1, 2], 0.0).is_err());
}
