//! Grammar registry integration tests

use fixgram_engine::{Grammar, Parser};
use fixgram_foundation::{ErrorKind, GrammarValidationError, Result, Value};

fn pass(args: &[Value]) -> Result<Value> {
    Ok(args.first().cloned().unwrap_or(Value::Nil))
}

fn validation_error(grammar: Grammar) -> GrammarValidationError {
    match Parser::new(grammar).unwrap_err().kind {
        ErrorKind::Validation(err) => err,
        other => panic!("expected validation error, got {other:?}"),
    }
}

// =============================================================================
// Declaration
// =============================================================================

#[test]
fn bad_pattern_reports_ordinal_and_symbol() {
    let mut grammar = Grammar::new("Expr");
    grammar.define_rule("Expr", "(Expr) '+' (Expr)", pass).unwrap();
    grammar.define_rule("Expr", "(Num)", pass).unwrap();

    let err = grammar.define_rule("Num", "'[0-9", pass).unwrap_err();
    assert!(err.is_pattern_syntax());
    assert_eq!(err.to_string(), "unexpected end in rule #3 ''[0-9'");
    assert_eq!(err.context.and_then(|c| c.source).as_deref(), Some("Num"));
}

#[test]
fn misplaced_quantifier_reports_its_offset() {
    let mut grammar = Grammar::new("Expr");
    let err = grammar.define_rule("Expr", "(Expr) '+' (Expr +)", pass).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected char '+' in rule #1 '(Expr) '+' (Expr +)'"
    );
    let context = err.context.unwrap();
    assert_eq!(context.source.as_deref(), Some("Expr"));
    assert_eq!(context.offset, Some(17));
}

#[test]
fn accessors_reflect_declarations() {
    let mut grammar = Grammar::new("Expr");
    grammar.define_rule("Expr", "(Expr) '+' (Expr)", pass).unwrap();
    grammar.define_rule("Expr", "(Num)", pass).unwrap();
    grammar.define_rule("Num", "('[0-9]'+)", pass).unwrap();

    assert_eq!(grammar.start_symbol(), "Expr");
    assert_eq!(grammar.rule_count(), 3);
    assert_eq!(
        grammar.rules_for("Expr").map(|r| r.ordinal).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(grammar.rule(3).map(ToString::to_string).as_deref(), Some("Num -> ('[0-9]'+)"));
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn missing_start_rule() {
    let mut grammar = Grammar::new("Program");
    grammar.define_rule("Expr", "(Expr) '+' (Expr)", pass).unwrap();
    assert_eq!(
        validation_error(grammar),
        GrammarValidationError::StartUndefined("Program".to_string())
    );
}

#[test]
fn undefined_reference() {
    let mut grammar = Grammar::new("Expr");
    grammar.define_rule("Expr", "(Expr) '+' (Term)", pass).unwrap();
    let err = validation_error(grammar);
    assert_eq!(err.to_string(), "non-terminal 'Term' is not defined");
}

#[test]
fn unused_symbol() {
    let mut grammar = Grammar::new("Expr");
    grammar.define_rule("Expr", "(Expr) '+' (Expr)", pass).unwrap();
    grammar.define_rule("Expr", "'x'", pass).unwrap();
    grammar.define_rule("Orphan", "'y'", pass).unwrap();
    assert_eq!(
        validation_error(grammar),
        GrammarValidationError::SymbolUnused("Orphan".to_string())
    );
}

#[test]
fn undefined_reference_wins_over_unused_symbol() {
    let mut grammar = Grammar::new("Expr");
    grammar.define_rule("Orphan", "'y'", pass).unwrap();
    grammar.define_rule("Expr", "(Expr) (Missing)", pass).unwrap();
    assert_eq!(
        validation_error(grammar),
        GrammarValidationError::NonTerminalUndefined("Missing".to_string())
    );
}

#[test]
fn validation_leaves_grammar_usable() {
    let mut grammar = Grammar::new("Expr");
    grammar.define_rule("Expr", "(Expr) '+' (Num)", pass).unwrap();
    assert!(grammar.validate().is_err());

    grammar.define_rule("Num", "'x'", pass).unwrap();
    assert!(grammar.validate().is_ok());
}
