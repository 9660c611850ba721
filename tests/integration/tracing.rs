//! Tracing parses through the reduction observer

use fixgram::debug::{HumanFormatter, TraceEvent, TraceFormatter, Tracer, TracerConfig};
use fixgram::engine::{Grammar, Parser, ParserConfig};
use fixgram::foundation::Value;

fn sum_grammar() -> Grammar {
    let mut grammar = Grammar::new("Expr");
    grammar
        .define_rule("Expr", "(Expr) '+' (Expr)", |args| {
            Ok(Value::Int(args[0].expect_int()? + args[1].expect_int()?))
        })
        .unwrap();
    grammar
        .define_rule("Expr", "('[0-9]'+)", |args| Ok(Value::Int(args[0].parse_int()?)))
        .unwrap();
    grammar
}

fn render(tracer: &Tracer) -> Vec<String> {
    let formatter = HumanFormatter::new();
    tracer.buffer().iter().map(|r| formatter.format(r)).collect()
}

#[test]
fn accepted_parse_transcript() {
    let parser = Parser::new(sum_grammar()).unwrap();
    let mut tracer = Tracer::new(TracerConfig::new().enabled());
    parser.parse_observed("1+2", &mut tracer).unwrap();

    assert_eq!(
        render(&tracer),
        vec![
            "P0001 === PARSE 1 START \"1+2\" ===",
            "P0001   >> pass 1 ['1' '+' '2']",
            "P0001     REDUCE #2 Expr [0..1] (\"1\") -> 1",
            "P0001   >> pass 2 [Expr(1) '+' '2']",
            "P0001     REDUCE #2 Expr [2..3] (\"2\") -> 2",
            "P0001   >> pass 3 [Expr(1) '+' Expr(2)]",
            "P0001     REDUCE #1 Expr [0..3] (1, 2) -> 3",
            "P0001   >> pass 4 [Expr(3)]",
            "P0001 === PARSE 1 END (ACCEPTED 3) ===",
        ]
    );
}

#[test]
fn stuck_parse_records_residue() {
    let parser = Parser::new(sum_grammar()).unwrap();
    let mut tracer = Tracer::new(TracerConfig::new().enabled());
    parser.parse_observed("1+", &mut tracer).unwrap();

    let last = tracer.buffer().last().unwrap();
    assert_eq!(
        last.event,
        TraceEvent::ParseEnd {
            value: None,
            unmatched: Some(1..2),
            buffer: "[Expr(1) '+']".to_string(),
        }
    );
    assert_eq!(
        HumanFormatter::new().format(last),
        "P0001 === PARSE 1 END (STUCK at 1..2) [Expr(1) '+'] ==="
    );
}

#[test]
fn aborted_parse_records_the_error() {
    let config = ParserConfig::new().with_max_reductions(1);
    let parser = Parser::with_config(sum_grammar(), config).unwrap();
    let mut tracer = Tracer::new(TracerConfig::new().enabled());
    assert!(parser.parse_observed("1+2", &mut tracer).is_err());

    let types: Vec<&str> = tracer.buffer().iter().map(|r| r.event_type()).collect();
    assert_eq!(
        types,
        vec!["parse-start", "pass-start", "reduction", "pass-start", "parse-abort"]
    );
    assert_eq!(
        tracer.buffer().last().map(|r| r.event.clone()),
        Some(TraceEvent::ParseAbort {
            message: "limit exceeded: max reductions (1) exceeded".to_string(),
        })
    );
}

#[test]
fn parses_are_numbered() {
    let parser = Parser::new(sum_grammar()).unwrap();
    let mut tracer = Tracer::new(TracerConfig::new().enabled());
    parser.parse_observed("1", &mut tracer).unwrap();
    parser.parse_observed("2+3", &mut tracer).unwrap();

    assert_eq!(tracer.current_parse(), 2);
    assert_eq!(tracer.buffer().parses(), vec![1, 2]);
    assert_eq!(tracer.buffer().records_for_parse(1).len(), 5);
    assert_eq!(tracer.stats().parse_count, 2);
}

#[test]
fn event_filter_keeps_only_reductions() {
    let parser = Parser::new(sum_grammar()).unwrap();
    let config = TracerConfig::new()
        .enabled()
        .filter_events(vec!["reduction".to_string()]);
    let mut tracer = Tracer::new(config);
    parser.parse_observed("1+20+300", &mut tracer).unwrap();

    assert_eq!(tracer.buffer().len(), 5);
    assert!(tracer.buffer().iter().all(|r| r.event_type() == "reduction"));
}

#[test]
fn json_output_carries_reduction_fields() {
    let parser = Parser::new(sum_grammar()).unwrap();
    let mut tracer = Tracer::new(TracerConfig::new().enabled().json());
    parser.parse_observed("1+2", &mut tracer).unwrap();

    let first = tracer.buffer().by_event_type("reduction")[0];
    let json = tracer.format_record(first);
    assert!(json.contains("\"pass\":1,\"rule\":2,\"lhs\":\"Expr\",\"span\":[0,1],\"captures\":[\"1\"],\"value\":1"));
}

#[test]
fn disabled_tracer_records_nothing() {
    let parser = Parser::new(sum_grammar()).unwrap();
    let mut tracer = Tracer::disabled();
    let outcome = parser.parse_observed("1+2", &mut tracer).unwrap();

    assert_eq!(outcome.into_value(), Some(Value::Int(3)));
    assert!(tracer.buffer().is_empty());
    assert_eq!(tracer.current_parse(), 1);
}
