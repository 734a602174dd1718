#![allow(missing_docs)]

mod common;

use common::{SAMPLES, erlang_splicer, erlang_table};
use lexstack::{
    LSResult,
    LexstackError,
    TextLexer,
    lexer::{GroupPiece, plan_group_pieces},
    rules::{Rule, StateTable, Transition, include},
    tokens::{Token, TokenKind, check_coverage},
    types::{check_is_send, check_is_sync},
};

fn assert_tiles(
    text: &str,
    tokens: &[Token<'_>],
) {
    assert_eq!(check_coverage(text, tokens), Ok(()), "coverage broken for {text:?}");
    for pair in tokens.windows(2) {
        assert_eq!(pair[0].end(), pair[1].offset(), "gap or overlap in {text:?}");
    }
    assert!(tokens.iter().all(|t| !t.is_empty()));
}

#[test]
fn test_table_is_shareable() {
    let table = erlang_table();
    check_is_send(&table);
    check_is_sync(&table);

    let splicer = erlang_splicer();
    check_is_send(&splicer);
    check_is_sync(&splicer);
}

#[test]
fn test_coverage_on_samples() {
    let table = erlang_table();
    for text in SAMPLES {
        let tokens = table.tokenize_to_vec(text).unwrap();
        assert_tiles(text, &tokens);

        let concatenated: String = tokens.iter().map(|t| t.text()).collect();
        assert_eq!(&concatenated, text);
    }
}

#[test]
fn test_session_coverage_on_samples() {
    let splicer = erlang_splicer();
    for text in SAMPLES {
        let tokens = splicer.tokenize_to_vec(text).unwrap();
        assert_tiles(text, &tokens);

        let prompted: String = text.lines().map(|line| format!("1> {line}\nout\n")).collect();
        let tokens = splicer.tokenize_to_vec(&prompted).unwrap();
        assert_tiles(&prompted, &tokens);
    }
}

#[test]
fn test_batch_matches_serial() {
    let table = erlang_table();
    let results = table.lex_batch(SAMPLES);
    for (text, result) in SAMPLES.iter().zip(results) {
        assert_eq!(result.unwrap(), table.tokenize_to_vec(text).unwrap());
    }
}

#[test]
fn test_stack_floor() {
    let table = erlang_table();
    let text = "}}}} ,,,, #{a => 1}}}} \"x\"\"";

    let mut tokens = table.tokenize(text);
    while let Some(token) = tokens.next() {
        token.unwrap();
        assert!(tokens.depth() >= 1);
        assert_eq!(tokens.state_stack()[0], "root");
    }
}

#[test]
fn test_group_widths_sum_to_match() {
    let groups = vec![
        Some(0..20),
        Some(0..3),
        None,
        Some(2..6),
        Some(6..6),
        Some(8..12),
        Some(15..25),
    ];
    for mask in 0..(1usize << 6) {
        let pieces = plan_group_pieces(0..20, &groups, |index| mask & (1 << index) != 0);
        let width: usize = pieces.iter().map(|p| p.span().len()).sum();
        assert_eq!(width, 20);
        assert!(pieces.iter().all(|p| !p.span().is_empty()));
        assert!(pieces.windows(2).all(|w| w[0].span().end == w[1].span().start));
        assert!(
            pieces
                .windows(2)
                .all(|w| !matches!((&w[0], &w[1]), (GroupPiece::Gap(_), GroupPiece::Gap(_))))
        );
    }
}

#[test]
fn test_termination_with_sparse_table() {
    let table = StateTable::builder()
        .state("root", [Rule::token(r"zzz", TokenKind::NAME).into()])
        .build()
        .unwrap();

    let text = "abc\n\u{e9}\u{1f600}zzz\n";
    let tokens = table.tokenize_to_vec(text).unwrap();
    assert_tiles(text, &tokens);
    assert_eq!(
        tokens
            .iter()
            .filter(|t| t.kind() == &TokenKind::ERROR)
            .count(),
        5
    );
}

#[test]
fn test_zero_width_without_transition_is_reported() {
    let table = StateTable::builder()
        .state(
            "root",
            [
                Rule::token(r"a", TokenKind::NAME).into(),
                Rule::token(r"(?=b)", TokenKind::NAME).into(),
            ],
        )
        .build()
        .unwrap();

    let results = table.tokenize("ab").collect::<Vec<_>>();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(
        results[1],
        Err(LexstackError::ZeroWidthMatch { offset: 1, .. })
    ));
}

#[test]
fn test_zero_width_cycle_is_bounded() {
    let table = StateTable::builder()
        .with_options(lexstack::TableOptions::default().with_max_zero_width_steps(8))
        .state("root", [Rule::default_to(Transition::push("a")).into()])
        .state("a", [Rule::default_to(Transition::goto("b")).into()])
        .state("b", [Rule::default_to(Transition::pop()).into()])
        .build()
        .unwrap();

    let err = table.tokenize_to_vec("x").unwrap_err();
    assert!(matches!(
        err,
        LexstackError::ZeroWidthLoop { offset: 0, steps: 8, .. }
    ));
}

#[test]
fn test_build_errors() {
    let err = StateTable::builder()
        .state("root", [include("a")])
        .state("a", [include("b")])
        .state("b", [include("a")])
        .build()
        .unwrap_err();
    assert!(matches!(err, LexstackError::IncludeCycle { .. }));
    assert!(err.to_string().contains("a -> b -> a"));

    let err = StateTable::builder()
        .state("root", [Rule::token("x", TokenKind::NAME).goto("missing").into()])
        .build()
        .unwrap_err();
    assert!(matches!(err, LexstackError::UndefinedState { .. }));
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_erlang_table_shape() -> LSResult<()> {
    let table = common::try_erlang_table()?;
    assert_eq!(
        table.state_names().collect::<Vec<_>>(),
        vec!["root", "string", "directive", "map_key", "map_val"]
    );
    let root_rules = table.rules(table.root()).len();
    let map_key = table.state_id("map_key").unwrap();
    assert_eq!(table.rules(map_key).len(), root_rules + 3);
    Ok(())
}

#[test]
fn test_long_text_without_lookaround_matches() {
    // Look-behind function-head rules never match here; the scan stays linear.
    let table = erlang_table();
    let text = "X, ".repeat(20_000);
    let tokens = table.tokenize_to_vec(&text).unwrap();
    assert_tiles(&text, &tokens);
    assert_eq!(tokens.len(), 60_000);
}
