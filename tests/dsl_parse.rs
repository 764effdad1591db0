use seqrule::{
    evaluate_sequence, parse_rule, Condition, Element, LogicalOp, Operand, Position, Properties,
    Rule, ValidatedRule,
};

fn suit(s: &str) -> Properties {
    Properties::new().set("suit", s)
}

#[test]
fn arrow_rule_matches_in_order() {
    let rule = ValidatedRule::parse("heart -> spade").unwrap();
    assert!(rule.matches(&[suit("heart"), suit("spade")]));
    assert!(!rule.matches(&[suit("heart"), suit("heart")]));
}

#[test]
fn constrained_arrow_rule() {
    let rule = ValidatedRule::parse("heart(rank = 7) -> spade(rank > 7)").unwrap();
    let good = vec![
        suit("heart").set("rank", 7_i64),
        suit("spade").set("rank", 8_i64),
    ];
    let bad = vec![
        suit("heart").set("rank", 7_i64),
        suit("spade").set("rank", 6_i64),
    ];
    assert!(rule.matches(&good));
    assert!(!rule.matches(&bad));
}

#[test]
fn positional_rule() {
    let rule = ValidatedRule::parse("ace@0 king@2").unwrap();
    let value = |v: &str| Properties::new().set("value", v);

    assert!(rule.matches(&[value("ace"), value("jack"), value("king")]));
    assert!(!rule.matches(&[value("ace"), value("king")]));
    assert!(!rule.matches(&[value("ace"), value("jack"), value("queen")]));
}

#[test]
fn conditional_rule_with_cross_item_reference() {
    let rule = ValidatedRule::parse("if rank@0 > rank@1 then ace").unwrap();
    let rank = |r: i64| Properties::new().set("rank", r);
    let ace = Properties::new().set("value", "ace");

    assert!(rule.matches(&[rank(8), rank(7), ace.clone()]));
    assert!(!rule.matches(&[rank(7), rank(8), ace]));
}

#[test]
fn conditional_rule_branches() {
    let rule = ValidatedRule::parse("if rank = 7 then heart -> spade else diamond -> club").unwrap();

    assert!(rule.matches(&[suit("heart").set("rank", 7_i64), suit("spade")]));
    assert!(rule.matches(&[suit("diamond").set("rank", 8_i64), suit("club")]));
    assert!(!rule.matches(&[suit("heart").set("rank", 8_i64), suit("spade")]));
    assert!(!rule.matches(&[]));
}

#[test]
fn parsed_tree_shape() {
    let rule = parse_rule("if rank = 7 and suit = \"heart\" then ace -> king").unwrap();
    let Rule::Conditional {
        condition,
        then_sequence,
        else_sequence,
    } = rule
    else {
        panic!("expected Conditional");
    };
    assert!(matches!(
        condition,
        Condition::Binary {
            op: LogicalOp::And,
            ..
        }
    ));
    assert_eq!(
        then_sequence.elements,
        vec![Element::named("ace"), Element::named("king")]
    );
    assert!(else_sequence.is_none());
}

#[test]
fn position_literals_parse_to_absolute() {
    for n in [0_i64, 1, 7, 42, 1000] {
        let Rule::Simple(seq) = parse_rule(&format!("ace@{n}")).unwrap() else {
            panic!("expected Simple");
        };
        assert_eq!(seq.elements[0].position, Some(Position::Absolute(n)));
    }
}

#[test]
fn string_literals_keep_backslashes() {
    let Rule::Simple(seq) = parse_rule(r#"x(path = "a\n")"#).unwrap() else {
        panic!("expected Simple");
    };
    let Some(Condition::Leaf(expr)) = &seq.elements[0].constraint else {
        panic!("expected a leaf constraint");
    };
    assert_eq!(expr.value, Operand::Str("a\\n".into()));
}

#[test]
fn keywords_are_case_sensitive() {
    // `IF` is an identifier, so this is a plain space-separated sequence.
    let rule = parse_rule("IF then_card").unwrap();
    let Rule::Simple(seq) = rule else {
        panic!("expected Simple");
    };
    assert_eq!(seq.len(), 2);
}

#[test]
fn display_output_reparses_to_same_rule() {
    let texts = [
        "heart -> spade",
        "ace@0 king@2 queen@3",
        "heart(rank = 7 and suit = \"heart\"), spade(rank > 7)",
        "if (a = 1 or b = 2) and c != false then x else y@1",
        "if rank@0 > rank@1 then ace",
    ];
    for text in texts {
        let rule = parse_rule(text).unwrap();
        let reparsed = parse_rule(&rule.to_string()).unwrap();
        assert_eq!(rule, reparsed, "{text}");
    }
}

#[test]
fn from_str_matches_parse_rule() {
    let a: Rule = "heart -> spade".parse().unwrap();
    let b = parse_rule("heart -> spade").unwrap();
    assert_eq!(a, b);
    assert!(evaluate_sequence(&a, &[suit("heart"), suit("spade")]));
}

#[test]
fn rule_from_file() {
    let path = std::env::temp_dir().join(format!("seqrule-{}.rule", std::process::id()));
    std::fs::write(&path, "heart(rank >= 5) -> spade\n").unwrap();

    let rule = ValidatedRule::from_file(&path).unwrap();
    assert!(rule.matches(&[suit("heart").set("rank", 9_i64), suit("spade")]));

    std::fs::write(&path, "heart -> -> spade").unwrap();
    let err = ValidatedRule::from_file(&path).unwrap_err();
    assert!(matches!(err, seqrule::SeqRuleError::Parse(_)));

    std::fs::remove_file(&path).unwrap();
}
