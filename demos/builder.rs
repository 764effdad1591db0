use seqrule::{ConditionOp, ConditionValue, Item, PredicateError, RuleBuilder};

fn main() {
    let rule = RuleBuilder::new()
        .add_condition("rank", ConditionOp::Gte, 1_i64)
        .add_condition("suit", ConditionOp::In, vec!["hearts", "spades"])
        .add_condition("wild", ConditionOp::NotExists, ConditionValue::none())
        .add_predicate("descending", |item, ctx| {
            let Some(prev) = ctx.prev() else {
                return Ok(true);
            };
            match (prev.get("rank"), item.get("rank")) {
                (Some(a), Some(b)) => Ok(a.as_number() > b.as_number()),
                _ => Err(PredicateError::new("rank missing")),
            }
        })
        .set_sequence(["ace", "king", "queen"])
        .build()
        .expect("failed to build rule");

    println!("{rule}");

    let good = vec![
        Item::new("ace").with("rank", 14_i64).with("suit", "hearts"),
        Item::new("king").with("rank", 13_i64).with("suit", "spades"),
        Item::new("queen").with("rank", 12_i64).with("suit", "hearts"),
    ];
    println!("Good hand: {}", rule.evaluate(&good));

    let bad = vec![
        Item::new("ace").with("rank", 14_i64).with("suit", "clubs"),
        Item::new("king").with("rank", 13_i64).with("suit", "spades"),
        Item::new("queen").with("rank", 15_i64).with("suit", "hearts").with("wild", true),
    ];
    let report = rule.evaluate_detailed(&bad);
    println!("Bad hand: {report}");
    for reason in report.failures() {
        println!("  - {reason}");
    }

    match RuleBuilder::new()
        .add_condition("suit", ConditionOp::In, "hearts")
        .build()
    {
        Ok(_) => println!("unexpectedly compiled"),
        Err(err) => println!("Rejected: {err}"),
    }
}
