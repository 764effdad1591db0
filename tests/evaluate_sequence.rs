use seqrule::{
    evaluate_condition, evaluate_expression, evaluate_sequence, parse_rule, property, Condition,
    Element, Expression, Position, Properties, RelationalOp, Rule, Sequence, Value,
};

fn item<V: Into<Value> + Clone>(pairs: &[(&str, V)]) -> Properties {
    pairs
        .iter()
        .map(|(k, v)| (*k, v.clone().into()))
        .collect::<Properties>()
}

// -- Expressions --------------------------------------------------------------

#[test]
fn numeric_comparisons() {
    let expr = property("rank").eq(7_i64);
    assert!(evaluate_expression(&expr, &item(&[("rank", 7_i64)]), None, 0));
    assert!(evaluate_expression(&expr, &item(&[("rank", 7.0)]), None, 0));
    assert!(!evaluate_expression(&expr, &item(&[("rank", 8_i64)]), None, 0));
    assert!(evaluate_expression(&expr, &item(&[("rank", "7")]), None, 0));
    assert!(!evaluate_expression(&expr, &item(&[("rank", "seven")]), None, 0));
    assert!(!evaluate_expression(&expr, &item(&[("rank", Value::Null)]), None, 0));
    assert!(!evaluate_expression(&expr, &item(&[("rank", true)]), None, 0));
}

#[test]
fn string_comparisons() {
    let expr = property("suit").eq("heart");
    assert!(evaluate_expression(&expr, &item(&[("suit", "heart")]), None, 0));
    assert!(!evaluate_expression(&expr, &item(&[("suit", "spade")]), None, 0));
    assert!(!evaluate_expression(&expr, &item(&[("suit", 42_i64)]), None, 0));
}

#[test]
fn boolean_comparisons() {
    let expr = property("is_face").eq(true);
    assert!(evaluate_expression(&expr, &item(&[("is_face", true)]), None, 0));
    assert!(!evaluate_expression(&expr, &item(&[("is_face", false)]), None, 0));
    assert!(!evaluate_expression(&expr, &item(&[("is_face", "true")]), None, 0));
    assert!(!evaluate_expression(&expr, &item(&[("is_face", 1_i64)]), None, 0));
}

#[test]
fn missing_properties() {
    let expr = property("rank").eq(7_i64);
    assert!(!evaluate_expression(&expr, &Properties::new(), None, 0));
    assert!(!evaluate_expression(&expr, &item(&[("suit", "heart")]), None, 0));
}

#[test]
fn all_operators() {
    let obj = item(&[("value", 7_i64)]);
    let cases = [
        property("value").eq(7_i64),
        property("value").neq(8_i64),
        property("value").lt(8_i64),
        property("value").gt(6_i64),
        property("value").lte(7_i64),
        property("value").gte(7_i64),
    ];
    for expr in cases {
        assert!(evaluate_expression(&expr, &obj, None, 0), "{expr}");
    }
}

#[test]
fn property_reference_comparisons() {
    let expr = property("rank").eq(property("rank").at(0));
    let sequence = vec![item(&[("rank", 7_i64)]), item(&[("rank", 8_i64)])];
    assert!(!evaluate_expression(&expr, &sequence[1], Some(sequence.as_slice()), 1));
    assert!(evaluate_expression(&expr, &sequence[0], Some(sequence.as_slice()), 0));

    let expr = property("rank").eq(property("rank"));
    assert!(evaluate_expression(&expr, &item(&[("rank", 7_i64)]), None, 0));
}

#[test]
fn property_reference_edge_cases() {
    let seven = item(&[("rank", 7_i64)]);
    let sequence = vec![seven.clone(), item(&[("rank", 8_i64)])];

    // positioned reference without a sequence
    let expr = property("rank").eq(property("rank").at(0));
    assert!(!evaluate_expression(&expr, &seven, None, 0));

    // out-of-range reference
    let expr = property("rank").eq(property("rank").at(99));
    assert!(!evaluate_expression(&expr, &sequence[0], Some(sequence.as_slice()), 0));

    // missing referenced property
    let expr = property("rank").eq(property("missing"));
    assert!(!evaluate_expression(&expr, &seven, None, 0));
    let expr = property("rank").eq(property("missing").at(0));
    assert!(!evaluate_expression(&expr, &seven, Some(sequence.as_slice()), 0));
}

#[test]
fn property_reference_type_conversion() {
    let same = property("rank").eq(property("rank"));
    assert!(evaluate_expression(&same, &item(&[("rank", "ace")]), None, 0));
    assert!(evaluate_expression(&same, &item(&[("rank", "7")]), None, 0));

    // text fallback: "ace" against 7
    let expr = property("rank").eq(property("value"));
    let sequence = vec![item(&[("value", 7_i64)])];
    assert!(!evaluate_expression(
        &expr,
        &item(&[("rank", "ace")]),
        Some(sequence.as_slice()),
        0
    ));

    let gt = property("rank").gt(property("rank"));
    assert!(!evaluate_expression(&gt, &item(&[("rank", "ace")]), None, 0));
}

#[test]
fn relative_positions_never_resolve() {
    let expr = Expression::new("rank", Some(Position::Relative(0)), RelationalOp::Eq, 7_i64);
    let sequence = vec![item(&[("rank", 7_i64)])];
    assert!(!evaluate_expression(&expr, &sequence[0], Some(sequence.as_slice()), 0));
}

// -- Conditions ---------------------------------------------------------------

#[test]
fn simple_and_or_conditions() {
    let rank7 = || Condition::from(property("rank").eq(7_i64));
    let heart = || Condition::from(property("suit").eq("heart"));

    let single = rank7();
    assert!(evaluate_condition(Some(&single), &item(&[("rank", 7_i64)]), None, 0));
    assert!(!evaluate_condition(Some(&single), &item(&[("rank", 8_i64)]), None, 0));

    let both = rank7().and(heart());
    let props = |rank: i64, suit: &str| Properties::new().set("rank", rank).set("suit", suit);
    assert!(evaluate_condition(Some(&both), &props(7, "heart"), None, 0));
    assert!(!evaluate_condition(Some(&both), &props(7, "spade"), None, 0));
    assert!(!evaluate_condition(Some(&both), &props(8, "heart"), None, 0));

    let either = rank7().or(heart());
    assert!(evaluate_condition(Some(&either), &props(7, "spade"), None, 0));
    assert!(evaluate_condition(Some(&either), &props(8, "heart"), None, 0));
    assert!(!evaluate_condition(Some(&either), &props(8, "spade"), None, 0));
}

#[test]
fn nested_conditions() {
    // (rank = 7 and suit = "heart") or value = "ace"
    let cond = Condition::from(property("rank").eq(7_i64))
        .and(property("suit").eq("heart"))
        .group()
        .or(property("value").eq("ace"));

    let p = Properties::new();
    assert!(evaluate_condition(
        Some(&cond),
        &p.clone().set("rank", 7_i64).set("suit", "heart"),
        None,
        0
    ));
    assert!(evaluate_condition(
        Some(&cond),
        &p.clone().set("rank", 1_i64).set("value", "ace"),
        None,
        0
    ));
    assert!(!evaluate_condition(
        Some(&cond),
        &p.set("rank", 7_i64).set("suit", "spade"),
        None,
        0
    ));
}

#[test]
fn absent_condition_is_vacuously_true() {
    assert!(evaluate_condition(None, &Properties::new(), None, 0));
}

// -- Sequences ----------------------------------------------------------------

#[test]
fn absolute_positions() {
    let rule = parse_rule("ace@0 king@2 queen@3").unwrap();
    let value = |v: &str| Properties::new().set("value", v);
    assert!(evaluate_sequence(
        &rule,
        &[value("ace"), value("jack"), value("king"), value("queen")]
    ));
    assert!(!evaluate_sequence(
        &rule,
        &[value("ace"), value("king"), value("queen")]
    ));
}

#[test]
fn invalid_positions() {
    let rule = parse_rule("ace@99").unwrap();
    assert!(!evaluate_sequence(&rule, &[Properties::new().set("value", "ace")]));

    let rule = parse_rule("ace@0").unwrap();
    assert!(!evaluate_sequence(&rule, &[Properties::new().set("value", "king")]));
    assert!(!evaluate_sequence(&rule, &[Properties::new().set("rank", 7_i64)]));
}

#[test]
fn sequential_search_failure() {
    let suit = |s: &str| Properties::new().set("suit", s);

    let rule = parse_rule("heart spade").unwrap();
    assert!(!evaluate_sequence(&rule, &[suit("diamond"), suit("club")]));

    let rule = parse_rule("heart(rank = 7) spade").unwrap();
    assert!(!evaluate_sequence(
        &rule,
        &[suit("heart").set("rank", 6_i64), suit("spade")]
    ));
}

#[test]
fn conditional_edge_cases() {
    let rule = parse_rule("if rank = 7 then heart else spade").unwrap();
    assert!(!evaluate_sequence(&rule, &[]));
    assert!(!evaluate_sequence(
        &rule,
        &[Properties::new().set("rank", 8_i64).set("suit", "club")]
    ));

    let rule = parse_rule("if rank = 7 then heart").unwrap();
    assert!(!evaluate_sequence(&rule, &[Properties::new().set("rank", 8_i64)]));

    let rule = parse_rule("if rank = 7 then heart spade").unwrap();
    assert!(!evaluate_sequence(
        &rule,
        &[Properties::new().set("rank", 7_i64).set("suit", "diamond")]
    ));
}

#[test]
fn positional_element_constraint_failure() {
    let rule = Rule::Simple(Sequence::new(vec![Element::named("ace")
        .at(0)
        .constrained(property("rank").eq(7_i64))]));
    let items = [Properties::new().set("value", "ace").set("rank", 6_i64)];
    assert!(!evaluate_sequence(&rule, &items));
}

#[test]
fn membership_is_by_value_not_key() {
    let rule = parse_rule("heart").unwrap();
    assert!(!evaluate_sequence(
        &rule,
        &[Properties::new().set("heart", "red")]
    ));
    assert!(evaluate_sequence(
        &rule,
        &[Properties::new().set("suit", "heart")]
    ));
}

#[test]
fn evaluation_is_repeatable() {
    let rule = parse_rule("if rank@0 > rank@1 then ace").unwrap();
    let items = [
        Properties::new().set("rank", 8_i64),
        Properties::new().set("rank", 7_i64),
        Properties::new().set("value", "ace"),
    ];
    let first = evaluate_sequence(&rule, &items);
    for _ in 0..10 {
        assert_eq!(evaluate_sequence(&rule, &items), first);
    }
}
