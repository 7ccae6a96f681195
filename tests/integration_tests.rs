//! Integration tests for the rule pipeline
//!
//! These tests drive rule strings end to end: parse, combine, serialize, and
//! evaluate against attribute records.

use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use rule_ast::rules::document;
use rule_ast::{
    combine, evaluate, parse, tokenize, AttributeRecord, ConfigLoader, EvaluationError, Node,
    Rule, RuleEngine, RuleError,
};
use serde_json::json;

// ============================================================================
// Fixtures
// ============================================================================

const SCENARIO_C: &str = "((age > 30 and department = 'Sales') or (age < 25 and department = 'Marketing')) and (salary > 50000 or experience > 5)";

static SCENARIO_C_TREE: Lazy<Node> = Lazy::new(|| parse(SCENARIO_C).unwrap());

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn record(value: serde_json::Value) -> AttributeRecord {
    AttributeRecord::from_json(&value).unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_scenario_a_matching_record() {
    init_logging();
    let tree = parse("age > 30 and department = 'Sales'").unwrap();
    let data = record(json!({"age": 35, "department": "Sales"}));
    assert!(evaluate(&tree, &data).unwrap());
}

#[test]
fn test_scenario_b_disqualifying_record() {
    let tree = parse("age > 30 and department = 'Sales'").unwrap();
    let data = record(json!({"age": 20, "department": "Sales"}));
    assert!(!evaluate(&tree, &data).unwrap());
}

#[test]
fn test_scenario_c_nested_rule() {
    init_logging();
    let data = record(json!({
        "age": 35,
        "department": "Sales",
        "salary": 60000,
        "experience": 3,
    }));
    assert!(evaluate(&SCENARIO_C_TREE, &data).unwrap());
}

#[test]
fn test_scenario_c_marketing_branch() {
    let data = record(json!({
        "age": 22,
        "department": "Marketing",
        "salary": 20000,
        "experience": 6,
    }));
    assert!(evaluate(&SCENARIO_C_TREE, &data).unwrap());
}

#[test]
fn test_scenario_c_disqualified() {
    let data = record(json!({
        "age": 35,
        "department": "Marketing",
        "salary": 60000,
        "experience": 3,
    }));
    assert!(!evaluate(&SCENARIO_C_TREE, &data).unwrap());
}

#[test]
fn test_scenario_d_combined_rules() {
    let trees = vec![parse("age > 30").unwrap(), parse("salary > 50000").unwrap()];
    let combined = combine(trees).unwrap();
    let data = record(json!({"age": 40, "salary": 10000}));
    assert!(!evaluate(&combined, &data).unwrap());
}

#[test]
fn test_equality_on_numeric_looking_literal() {
    let tree = parse("age = 30").unwrap();
    assert!(evaluate(&tree, &record(json!({"age": 30}))).unwrap());
}

#[test]
fn test_uppercase_keywords() {
    let upper = parse("(AGE > 30 AND DEPARTMENT = 'Sales') OR SALARY > 50000").unwrap();
    let data = record(json!({"AGE": 31, "DEPARTMENT": "Sales", "SALARY": 0}));
    assert!(evaluate(&upper, &data).unwrap());
    assert_eq!(tokenize("a > 1 AND b > 2"), tokenize("a > 1 and b > 2"));
}

// ============================================================================
// Combination
// ============================================================================

#[test]
fn test_combine_single_is_identity() {
    assert_eq!(combine(vec![(*SCENARIO_C_TREE).clone()]).unwrap(), *SCENARIO_C_TREE);
}

#[test]
fn test_combine_is_left_fold() {
    let combined = combine(vec![
        parse("a > 1").unwrap(),
        parse("b > 2").unwrap(),
        parse("c > 3").unwrap(),
    ])
    .unwrap();
    assert_eq!(
        combined,
        Node::and(
            Node::and(Node::operand("a > 1"), Node::operand("b > 2")),
            Node::operand("c > 3"),
        )
    );
}

#[test]
fn test_combine_empty_is_error() {
    assert!(matches!(
        combine(Vec::<Node>::new()),
        Err(RuleError::EmptyCombination)
    ));
}

// ============================================================================
// Interchange form
// ============================================================================

#[test]
fn test_tree_document_round_trip() {
    let json = document::to_json(&SCENARIO_C_TREE).unwrap();
    let back = document::from_json(&json).unwrap();
    assert_eq!(back, *SCENARIO_C_TREE);
}

#[test]
fn test_tree_document_shape() {
    let tree = parse("age > 30 and department = 'Sales'").unwrap();
    let value = serde_json::to_value(&tree).unwrap();
    assert_eq!(
        value,
        json!({
            "kind": "operator",
            "value": "and",
            "left": {"kind": "operand", "value": "age > 30", "left": null, "right": null},
            "right": {"kind": "operand", "value": "department = 'Sales'", "left": null, "right": null},
        })
    );
}

#[test]
fn test_stored_document_evaluates() {
    let stored = r#"{
        "kind": "operator",
        "value": "or",
        "left": {"kind": "operand", "value": "age < 25"},
        "right": {"kind": "operand", "value": "department = 'Marketing'"}
    }"#;
    let tree = document::from_json(stored).unwrap();
    let data = record(json!({"age": 40, "department": "Marketing"}));
    assert!(evaluate(&tree, &data).unwrap());
}

#[test]
fn test_rule_record_round_trip() {
    let rule = Rule::new(SCENARIO_C).unwrap();
    let back = Rule::from_json(&rule.to_json().unwrap()).unwrap();
    assert_eq!(back.id, rule.id);
    assert_eq!(back.created_at, rule.created_at);
    assert_eq!(back.tree, *SCENARIO_C_TREE);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_parse_error_produces_no_rule() {
    for bad in ["(age > 30", "age > 30)", "age > 30 salary", "()", ""] {
        assert!(
            matches!(Rule::new(bad), Err(RuleError::Parse(_))),
            "expected parse error for {:?}",
            bad
        );
    }
}

#[test]
fn test_evaluation_error_names_field_and_operand() {
    let tree = parse("age > 30 and salary > 50000").unwrap();
    let err = evaluate(&tree, &record(json!({"age": 35}))).unwrap_err();
    assert_eq!(err.field(), Some("salary"));
    assert_eq!(err.operand(), Some("salary > 50000"));
}

#[test]
fn test_batch_evaluation_continues_past_failures() {
    init_logging();
    let engine = RuleEngine::default();
    let rule = engine.create_rule("age > 30 and department = 'Sales'").unwrap();
    let records = vec![
        record(json!({"age": 35, "department": "Sales"})),
        record(json!({"age": "old", "department": "Sales"})),
        record(json!({"age": 20, "department": "Sales"})),
    ];

    let results = engine.evaluate_batch(&rule.tree, &records);
    assert_eq!(results[0], Ok(true));
    assert_eq!(
        results[1],
        Err(EvaluationError::NonNumericValue {
            field: "age".to_string(),
            operand: "age > 30".to_string(),
        })
    );
    assert_eq!(results[2], Ok(false));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_engine_from_yaml_config() {
    let config = ConfigLoader::parse_yaml("strict_tokens: true\nmax_depth: 4\n").unwrap();
    let engine = RuleEngine::new(config);

    assert!(matches!(
        engine.parse("age > 30 @ salary > 5"),
        Err(RuleError::Tokenize(_))
    ));
    assert!(engine.parse(SCENARIO_C).is_ok());
    assert!(matches!(
        engine.parse("(((a > 1 or b > 2) and c > 3) or d > 4) and e > 5"),
        Err(RuleError::Parse(_))
    ));
}

#[test]
fn test_shared_tree_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let data = record(json!({
                    "age": 30 + i,
                    "department": "Sales",
                    "salary": 60000,
                    "experience": 0,
                }));
                evaluate(&SCENARIO_C_TREE, &data).unwrap()
            })
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![false, true, true, true]);
}
