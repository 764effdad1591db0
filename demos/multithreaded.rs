use std::sync::Arc;
use std::thread;

use seqrule::{Properties, ValidatedRule};

fn main() {
    let rule = Arc::new(
        ValidatedRule::parse("if rank@0 < rank@1 then heart -> spade else club")
            .expect("failed to parse rule"),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rule = Arc::clone(&rule);
            thread::spawn(move || {
                let first = 5_i64 + i64::from(i);
                let hand = vec![
                    Properties::new().set("rank", first).set("suit", "heart"),
                    Properties::new().set("rank", 7_i64).set("suit", "spade"),
                ];
                let result = rule.matches(&hand);
                println!("Thread {i}: {result}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
