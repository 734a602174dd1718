#![allow(missing_docs)]
#![cfg(feature = "serde")]

use lexstack::{
    LexstackError,
    rules::TableDef,
    session::SessionSplicer,
    tokens::{TokenKind, check_coverage},
};

const ERLANG_LITE: &str = r##"{
    "root": "root",
    "states": {
        "root": [
            { "pattern": "\\s+", "token": "Text" },
            { "pattern": "%.*\\n", "token": "Comment" },
            { "pattern": "^-", "token": "Punctuation", "push": "directive" },
            { "pattern": "\"", "token": "String", "push": "string" },
            { "pattern": "#\\{", "token": "Punctuation", "push": "map_key" },
            { "pattern": "(?:^|(?<=:))([a-z]\\w*)(\\s*)(\\()", "groups": ["Name.Function", "Text", "Punctuation"] },
            { "pattern": "[+-]?\\d+", "token": "Number.Integer" },
            { "pattern": "[\\]\\[:_@\".{}()|;,]", "token": "Punctuation" },
            { "pattern": "[A-Z_]\\w*", "token": "Name.Variable" },
            { "pattern": "[a-z]\\w*", "token": "Name" }
        ],
        "string": [
            { "pattern": "\"", "token": "String", "pop": 1 },
            { "pattern": "~[0-9.*]*[~#+BPWXb-ginpswx]", "token": "String.Interpol" },
            { "pattern": "[^\"\\\\~]+", "token": "String" },
            { "pattern": "~", "token": "String" }
        ],
        "directive": [
            { "pattern": "(define)(\\s*)(\\()([A-Z_]\\w*|[a-z]\\w*)", "groups": ["Name.Entity", "Text", "Punctuation", "Name.Constant"], "pop": 1 },
            { "pattern": "[a-z]\\w*", "token": "Name.Entity", "pop": 1 }
        ],
        "map_key": [
            { "pattern": "=>", "token": "Punctuation", "push": "map_val" },
            { "pattern": "\\}", "token": "Punctuation", "pop": 1 },
            { "include": "root" }
        ],
        "map_val": [
            { "pattern": ",", "token": "Punctuation", "pop": 1 },
            { "pattern": "(?=\\})", "pop": 1 },
            { "include": "root" }
        ]
    }
}"##;

#[test]
fn test_json_table_scenarios() {
    let table = TableDef::from_json_str(ERLANG_LITE).unwrap().build().unwrap();

    let text = "-define(X).";
    let tokens = table.tokenize_to_vec(text).unwrap();
    assert_eq!(check_coverage(text, &tokens), Ok(()));
    assert_eq!(
        tokens.iter().map(|t| t.text()).collect::<Vec<_>>(),
        vec!["-", "define", "(", "X", ")", "."]
    );
    assert_eq!(tokens[3].kind().as_str(), "Name.Constant");

    let text = r#""abc~n""#;
    let tokens = table.tokenize_to_vec(text).unwrap();
    assert_eq!(tokens[2].kind().as_str(), "String.Interpol");

    let mut tokens = table.tokenize("#{a => 1}");
    let all = tokens.by_ref().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(all.last().unwrap().text(), "}");
    assert_eq!(tokens.depth(), 1);
}

#[test]
fn test_json_table_session() {
    let table = TableDef::from_json_str(ERLANG_LITE).unwrap().build().unwrap();
    let splicer = SessionSplicer::new(table).unwrap();

    let text = "1> foo.\nfoo\n";
    let tokens = splicer.tokenize_to_vec(text).unwrap();
    assert_eq!(check_coverage(text, &tokens), Ok(()));
    assert_eq!(tokens[0].kind(), &TokenKind::GENERIC_PROMPT);
    assert_eq!(tokens.last().unwrap().kind(), &TokenKind::GENERIC_OUTPUT);
}

#[test]
fn test_json_table_errors() {
    let err = TableDef::from_json_str(r#"{ "states": { "root": [ { "include": "nope" } ] } }"#)
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(err, LexstackError::UndefinedState { .. }));

    let err = TableDef::from_json_str(
        r#"{ "states": { "root": [ { "pattern": "x", "token": "Name", "push": "root", "pop": 1 } ] } }"#,
    )
    .unwrap()
    .build()
    .unwrap_err();
    assert!(matches!(err, LexstackError::Config(_)));

    let err = TableDef::from_json_str(r#"{ "states": { "root": [ { "pattern": "(" , "token": "Name" } ] } }"#)
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(err, LexstackError::Pattern { .. }));

    let err = TableDef::from_json_str(r#"{ "states": { "root": [ { "pattern": "x" } ] } }"#)
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(err, LexstackError::InvalidRule { .. }));
}

#[test]
fn test_json_round_trip_document() {
    let def = TableDef::from_json_str(ERLANG_LITE).unwrap();
    let json = serde_json::to_string(&def).unwrap();
    assert_eq!(TableDef::from_json_str(&json).unwrap(), def);
}

#[test]
fn test_json_duplicate_state_is_an_error() {
    let def = TableDef::from_json_str(
        r#"{ "states": {
            "root": [ { "pattern": "a", "token": "Name" } ],
            "root": [ { "pattern": "b", "token": "Keyword" } ]
        } }"#,
    )
    .unwrap();

    let err = def.build().unwrap_err();
    assert!(matches!(err, LexstackError::DuplicateState { .. }));
    assert!(err.to_string().contains("root"));
}

#[test]
fn test_json_misspelled_transition_is_an_error() {
    let err = TableDef::from_json_str(
        r#"{ "states": {
            "root": [ { "pattern": "\"", "token": "String", "psuh": "string" } ],
            "string": [ { "pattern": "[^\"]+", "token": "String" } ]
        } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, LexstackError::Json(_)));

    let table = TableDef::from_json_str(
        r#"{ "states": {
            "root": [ { "pattern": "\"", "token": "String", "push": "string" } ],
            "string": [ { "pattern": "[^\"]+", "token": "String" } ]
        } }"#,
    )
    .unwrap()
    .build()
    .unwrap();
    let tokens = table.tokenize_to_vec("\"x").unwrap();
    assert_eq!(
        tokens.iter().map(|t| t.kind().as_str()).collect::<Vec<_>>(),
        vec!["String", "String"]
    );
}
