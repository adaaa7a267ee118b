use super::*;
use serde_json::json;

#[test]
fn object_accepts_producer_json() {
    let obj: VisualObject = serde_json::from_value(json!({
        "id": "a",
        "type": "block",
        "label": "A",
        "position": [50, 440],
        "properties": {"color": "#FF6B6B", "clear": true}
    }))
    .unwrap();
    assert_eq!(obj.kind, "block");
    assert_eq!(obj.position, Some(Point::new(50.0, 440.0)));
    assert!(obj.props().flag("clear"));
}

#[test]
fn position_accepts_xyz_and_object_forms() {
    let obj: VisualObject =
        serde_json::from_value(json!({"id": "a", "type": "t", "position": [1, 2, 3]})).unwrap();
    assert_eq!(obj.position, Some(Point::new(1.0, 2.0)));

    let obj: VisualObject =
        serde_json::from_value(json!({"id": "a", "type": "t", "position": {"x": 4, "y": 5}}))
            .unwrap();
    assert_eq!(obj.position, Some(Point::new(4.0, 5.0)));
}

#[test]
fn malformed_position_is_treated_as_absent() {
    for bad in [json!("left"), json!([1]), json!(null), json!({"x": 1})] {
        let obj: VisualObject =
            serde_json::from_value(json!({"id": "a", "type": "t", "position": bad})).unwrap();
        assert_eq!(obj.position, None);
    }
}

#[test]
fn missing_label_falls_back_to_id() {
    let obj: VisualObject = serde_json::from_value(json!({"id": "ball1", "type": "ball"})).unwrap();
    assert_eq!(obj.display_label(), "ball1");
}

#[test]
fn metadata_accessors_read_action_and_step() {
    let state: RenderedState = serde_json::from_value(json!({
        "domain": "rovers",
        "objects": [],
        "relations": [],
        "metadata": {"step": 3, "action": "(navigate rover0 w1 w2)"}
    }))
    .unwrap();
    assert_eq!(state.step(), Some(3));
    assert_eq!(state.action(), Some("(navigate rover0 w1 w2)"));
}

#[test]
fn trace_parses_bare_array() {
    let trace = PlanTrace::from_json_str(r#"[{"domain": "hanoi"}, {"domain": "hanoi"}]"#).unwrap();
    assert_eq!(trace.len(), 2);
    assert_eq!(trace.domain, None);
}

#[test]
fn trace_envelope_fills_missing_domains() {
    let trace = PlanTrace::from_json_str(
        r#"{
            "success": true,
            "domain": "gripper",
            "problem": "p01",
            "plan": ["(pick ball1 rooma left)"],
            "num_states": 2,
            "states": [{"objects": []}, {"domain": "other", "objects": []}]
        }"#,
    )
    .unwrap();
    assert_eq!(trace.states[0].domain, "gripper");
    assert_eq!(trace.states[1].domain, "other");
    assert_eq!(trace.plan.len(), 1);
    assert_eq!(trace.problem.as_deref(), Some("p01"));
}

#[test]
fn out_of_range_index_is_a_validation_error() {
    let trace = PlanTrace::from_states(vec![RenderedState::new("x")]);
    assert!(trace.get(0).is_ok());
    let err = trace.get(1).unwrap_err();
    assert!(matches!(err, PlanvizError::Validation(_)));
}

#[test]
fn malformed_trace_is_a_serde_error() {
    let err = PlanTrace::from_json_str("{\"states\": 3}").unwrap_err();
    assert!(matches!(err, PlanvizError::Serde(_)));
}
