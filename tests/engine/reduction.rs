//! Reduction loop integration tests

use fixgram_engine::{
    Buffer, DEFAULT_MAX_BUFFER_GROWTH, Grammar, ParseOutcome, Parser, ParserConfig, ReductionEvent, ReductionObserver,
    RulePriority,
};
use fixgram_foundation::{ErrorKind, Result, SemanticLimit, Value};

fn pass(args: &[Value]) -> Result<Value> {
    Ok(args[0].clone())
}

fn number(args: &[Value]) -> Result<Value> {
    Ok(Value::Int(args[0].parse_int()?))
}

fn sum(args: &[Value]) -> Result<Value> {
    Ok(Value::Int(args[0].expect_int()? + args[1].expect_int()?))
}

fn product(args: &[Value]) -> Result<Value> {
    Ok(Value::Int(args[0].expect_int()? * args[1].expect_int()?))
}

/// The five-rule arithmetic grammar, `+` declared before `*` unless flipped.
fn arithmetic(product_first: bool) -> Grammar {
    let mut grammar = Grammar::new("Expr");
    if product_first {
        grammar.define_rule("Expr", "(Expr) '*' (Expr)", product).unwrap();
        grammar.define_rule("Expr", "(Expr) '+' (Expr)", sum).unwrap();
    } else {
        grammar.define_rule("Expr", "(Expr) '+' (Expr)", sum).unwrap();
        grammar.define_rule("Expr", "(Expr) '*' (Expr)", product).unwrap();
    }
    grammar.define_rule("Expr", "'(' (Expr) ')'", pass).unwrap();
    grammar.define_rule("Expr", "(Num)", pass).unwrap();
    grammar.define_rule("Num", "('[0-9]'+)", number).unwrap();
    grammar
}

fn eval(grammar: Grammar, input: &str) -> Option<Value> {
    Parser::new(grammar).unwrap().parse(input).unwrap().into_value()
}

#[derive(Default)]
struct Counter {
    passes: usize,
    rules: Vec<u32>,
    spans: Vec<std::ops::Range<usize>>,
}

impl ReductionObserver for Counter {
    fn on_pass_start(&mut self, _pass: usize, _buffer: &Buffer) {
        self.passes += 1;
    }

    fn on_reduction(&mut self, event: &ReductionEvent<'_>) {
        self.rules.push(event.rule);
        self.spans.push(event.span.clone());
    }
}

// =============================================================================
// Pinned evaluation order
// =============================================================================

#[test]
fn later_rules_are_tried_first() {
    assert_eq!(eval(arithmetic(false), "2*5+2*6"), Some(Value::Int(22)));
}

#[test]
fn flipping_declaration_order_changes_the_result() {
    assert_eq!(eval(arithmetic(true), "2*5+2*6"), Some(Value::Int(84)));
}

#[test]
fn parenthesized_expression() {
    assert_eq!(eval(arithmetic(false), "(1+2)*3"), Some(Value::Int(9)));
}

#[test]
fn reductions_follow_priority_then_position() {
    let parser = Parser::new(arithmetic(false)).unwrap();
    let mut counter = Counter::default();
    parser.parse_observed("1+2", &mut counter).unwrap();

    assert_eq!(counter.rules, vec![5, 5, 4, 4, 1]);
    assert_eq!(counter.spans, vec![0..1, 2..3, 0..1, 2..3, 0..3]);
    assert_eq!(counter.passes, 6);
}

#[test]
fn two_rule_sum_chain() {
    let mut grammar = Grammar::new("Expr");
    grammar.define_rule("Expr", "(Expr) '+' (Expr)", sum).unwrap();
    grammar.define_rule("Expr", "('[0-9]'+)", number).unwrap();
    let parser = Parser::new(grammar).unwrap();

    let mut counter = Counter::default();
    let outcome = parser.parse_observed("1+20+300", &mut counter).unwrap();
    assert_eq!(outcome.into_value(), Some(Value::Int(321)));
    assert_eq!(counter.rules, vec![2, 2, 2, 1, 1]);
}

#[test]
fn declaration_order_priority_reverses_the_snapshot() {
    let config = ParserConfig::new().with_priority(RulePriority::DeclarationOrder);
    let parser = Parser::with_config(arithmetic(false), config).unwrap();
    assert_eq!(parser.parse("(1+2)*3").unwrap().into_value(), Some(Value::Int(9)));
}

// =============================================================================
// Captures
// =============================================================================

#[test]
fn multi_digit_terminal_capture() {
    assert_eq!(eval(arithmetic(false), "123"), Some(Value::Int(123)));
}

#[test]
fn repeated_non_terminal_captures_are_flattened() {
    let mut grammar = Grammar::new("List");
    grammar.define_rule("List", "(List) '#'", pass).unwrap();
    grammar
        .define_rule("List", "'<' (Item*) '>'", |args| Ok(args.iter().cloned().collect()))
        .unwrap();
    grammar.define_rule("Item", "('[a-z]')", pass).unwrap();
    let parser = Parser::new(grammar).unwrap();

    let items = parser.parse("<abc>").unwrap().into_value().unwrap();
    assert_eq!(items, Value::from(vec!["a", "b", "c"]));
    assert_eq!(items.to_string(), "[a b c]");

    let empty = parser.parse("<>").unwrap().into_value().unwrap();
    assert_eq!(empty.to_string(), "[]");
}

#[test]
fn empty_terminal_capture_is_an_empty_string() {
    let mut grammar = Grammar::new("Opt");
    grammar.define_rule("Opt", "(Opt) '#'", pass).unwrap();
    grammar.define_rule("Opt", "'x' ('[0-9]'*) ';'", pass).unwrap();
    let parser = Parser::new(grammar).unwrap();

    assert_eq!(parser.parse("x;").unwrap().into_value(), Some(Value::from("")));
    assert_eq!(parser.parse("x42;").unwrap().into_value(), Some(Value::from("42")));
}

// =============================================================================
// Failure modes
// =============================================================================

#[test]
fn ceiling_is_inclusive() {
    let exact = ParserConfig::new().with_max_reductions(5);
    let parser = Parser::with_config(arithmetic(false), exact).unwrap();
    assert_eq!(parser.parse("1+2").unwrap().into_value(), Some(Value::Int(3)));

    let short = ParserConfig::new().with_max_reductions(4);
    let parser = Parser::with_config(arithmetic(false), short).unwrap();
    let err = parser.parse("1+2").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::LimitExceeded(SemanticLimit::MaxReductions { limit: 4 })
    ));
    assert_eq!(err.to_string(), "limit exceeded: max reductions (4) exceeded");
}

#[test]
fn nullable_rule_never_terminates_on_its_own() {
    let mut grammar = Grammar::new("A");
    grammar.define_rule("A", "(A) 'y'", pass).unwrap();
    grammar.define_rule("A", "'x'*", |_| Ok(Value::Nil)).unwrap();

    let parser = Parser::with_config(grammar, ParserConfig::new().with_max_reductions(20)).unwrap();
    let mut counter = Counter::default();
    let err = parser.parse_observed("q", &mut counter).unwrap_err();

    assert!(matches!(err.kind, ErrorKind::LimitExceeded(_)));
    assert_eq!(counter.rules.len(), 20);
    assert!(counter.spans.iter().all(|span| span == &(0..0)));
}

#[test]
fn runaway_empty_matches_stop_under_the_default_config() {
    let mut grammar = Grammar::new("A");
    grammar.define_rule("A", "'x'*", |_| Ok(Value::Nil)).unwrap();
    grammar.define_rule("A", "(A) 'y'", pass).unwrap();

    let parser = Parser::new(grammar).unwrap();
    let mut counter = Counter::default();
    let err = parser.parse_observed("q", &mut counter).unwrap_err();

    assert!(matches!(
        err.kind,
        ErrorKind::LimitExceeded(SemanticLimit::MaxBufferGrowth { limit }) if limit == DEFAULT_MAX_BUFFER_GROWTH
    ));
    assert_eq!(counter.rules.len(), DEFAULT_MAX_BUFFER_GROWTH);
    assert_eq!(err.to_string(), "limit exceeded: max buffer growth (1000) exceeded");
}

#[test]
fn failing_action_aborts_with_rule_and_message() {
    let mut grammar = Grammar::new("Expr");
    grammar.define_rule("Expr", "(Expr) '+' (Expr)", sum).unwrap();
    grammar.define_rule("Expr", "('[0-9a-f]'+)", number).unwrap();

    let err = Parser::new(grammar).unwrap().parse("1+ff").unwrap_err();
    match &err.kind {
        ErrorKind::ActionFailed { rule, message } => {
            assert_eq!(*rule, 2);
            assert_eq!(message, "invalid number: \"ff\"");
        }
        other => panic!("expected action failure, got {other:?}"),
    }
    assert_eq!(err.to_string(), "action for rule #2 failed: invalid number: \"ff\"");
}

#[test]
fn parser_is_reusable_after_errors() {
    let parser = Parser::with_config(arithmetic(false), ParserConfig::new().with_max_reductions(4))
        .unwrap();
    assert!(parser.parse("1+2").is_err());
    assert_eq!(parser.parse("7").unwrap(), ParseOutcome::Accepted { value: Value::Int(7) });
}
