//! Browser-side smoke tests for the JavaScript bindings.

#![cfg(target_arch = "wasm32")]

use artifact_graph_layout::{ForceSimulationWasm, compute_hierarchical_layout};
use js_sys::{JSON, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn json(text: &str) -> JsValue {
    JSON::parse(text).unwrap()
}

fn field(object: &JsValue, key: &str) -> JsValue {
    Reflect::get(object, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn test_simulation_round_trip() {
    let mut sim = ForceSimulationWasm::new(json(r#"{"dimensions": "2d"}"#)).unwrap();
    sim.set_nodes(json(r#"[{"id": "1", "x": 0, "y": 0}, {"id": "2", "x": 10, "y": 0}]"#))
        .unwrap();
    sim.set_edges(json(r#"[{"source": "1", "target": "2"}]"#)).unwrap();
    sim.start();

    for _ in 0..5 {
        assert!(sim.tick());
    }

    let positions = sim.get_positions().unwrap();
    let two = field(&positions, "2");
    assert!(field(&two, "x").as_f64().unwrap().is_finite());
    assert_eq!(field(&two, "z").as_f64(), Some(0.0));

    assert_eq!(sim.positions_buffer().length(), 6);
    assert_eq!(sim.node_ids().len(), 2);
    assert!(sim.find_nearest_node(0.0, 0.0, None).is_some());
}

#[wasm_bindgen_test]
fn test_invalid_input_is_rejected() {
    let mut sim = ForceSimulationWasm::new(JsValue::UNDEFINED).unwrap();
    assert!(sim.set_nodes(json(r#"[{"x": 1}]"#)).is_err(), "id is required");
    assert!(ForceSimulationWasm::new(json(r#"{"dimensions": "4d"}"#)).is_err());
}

#[wasm_bindgen_test]
fn test_hierarchical_layout_object() {
    let positions = compute_hierarchical_layout(
        json(r#"[{"id": "a"}, {"id": "b"}]"#),
        json(r#"[{"source": "a", "target": "b"}]"#),
        JsValue::NULL,
    )
    .unwrap();

    let b = field(&positions, "b");
    assert_eq!(field(&b, "y").as_f64(), Some(100.0));
}
