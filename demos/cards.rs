use seqrule::{Properties, ValidatedRule};

fn card(rank: i64, suit: &str) -> Properties {
    Properties::new().set("rank", rank).set("suit", suit)
}

fn main() {
    let rules = [
        "heart -> spade",
        "heart(rank = 7), spade(rank > 7)",
        "if rank@0 > rank@1 then heart else club",
    ];
    let hand = vec![card(9, "heart"), card(7, "heart"), card(11, "spade")];

    for text in rules {
        let rule = ValidatedRule::parse(text).expect("failed to parse rule");
        println!("{rule}: {}", rule.matches(&hand));
    }

    match ValidatedRule::parse("heart -> -> spade") {
        Ok(rule) => println!("unexpectedly parsed {rule}"),
        Err(err) => println!("Rejected: {err}"),
    }

    let rule = ValidatedRule::from_file("demos/hand.rule").expect("failed to load rule");
    println!("{rule}");
    println!("  hand 1: {}", rule.matches(&[card(12, "heart"), card(3, "spade")]));
    println!("  hand 2: {}", rule.matches(&[card(2, "club"), card(5, "diamond")]));
}
