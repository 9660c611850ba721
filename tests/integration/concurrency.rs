//! One parser shared across threads

use std::thread;

use fixgram::debug::{Tracer, TracerConfig};
use fixgram::engine::{Grammar, Parser};
use fixgram::foundation::Value;

fn sum_parser() -> Parser {
    let mut grammar = Grammar::new("Expr");
    grammar
        .define_rule("Expr", "(Expr) '+' (Expr)", |args| {
            Ok(Value::Int(args[0].expect_int()? + args[1].expect_int()?))
        })
        .unwrap();
    grammar
        .define_rule("Expr", "('[0-9]'+)", |args| Ok(Value::Int(args[0].parse_int()?)))
        .unwrap();
    Parser::new(grammar).unwrap()
}

#[test]
fn parser_is_shared_by_reference() {
    let parser = sum_parser();

    let results: Vec<Option<Value>> = thread::scope(|scope| {
        let handles: Vec<_> = (1..=8i64)
            .map(|n| {
                let parser = &parser;
                scope.spawn(move || {
                    let input = vec!["1"; usize::try_from(n).unwrap()].join("+");
                    parser.parse(&input).unwrap().into_value()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let expected: Vec<Option<Value>> = (1..=8).map(|n| Some(Value::Int(n))).collect();
    assert_eq!(results, expected);
}

#[test]
fn each_thread_traces_independently() {
    let parser = sum_parser();

    let counts: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = ["1", "1+2", "1+2+3"]
            .into_iter()
            .map(|input| {
                let parser = &parser;
                scope.spawn(move || {
                    let mut tracer = Tracer::new(TracerConfig::new().enabled());
                    parser.parse_observed(input, &mut tracer).unwrap();
                    tracer.buffer().by_event_type("reduction").len()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(counts, vec![1, 3, 5]);
}
