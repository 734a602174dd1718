#![allow(dead_code)]

use lexstack::{
    LSResult,
    rules::{GroupAction, Rule, StateEntry, StateTable, include},
    session::SessionSplicer,
    tokens::{Token, TokenKind},
};

pub const KEYWORDS: &[&str] = &[
    "after", "begin", "case", "catch", "cond", "end", "fun", "if", "let", "of", "query",
    "receive", "try", "when",
];

pub const BUILTINS: &[&str] = &[
    "abs", "apply", "element", "exit", "hd", "is_atom", "is_list", "length", "self", "send",
    "spawn", "spawn_link", "tl", "whereis",
];

pub const WORD_OPERATORS: &[&str] = &[
    "and", "andalso", "band", "bnot", "bor", "bsl", "bsr", "bxor", "div", "not", "or", "orelse",
    "rem", "xor",
];

pub const ATOM: &str = r"(?:[a-z]\w*|'[^\n']*[^\\]')";
pub const VARIABLE: &str = r"(?:[A-Z_]\w*)";
pub const OPERATORS: &str = r"(\+\+?|--?|\*|/|<|>|/=|=:=|=/=|=<|>=|==?|<-|!|\?)";

pub fn escape() -> String {
    let chars = r#"[bdefnrstv'"\\]"#;
    let octal = r"[0-7][0-7]?[0-7]?";
    let hex = r"(?:x[0-9a-fA-F]{2}|x\{[0-9a-fA-F]+\})";
    let ctrl = r"\^[a-zA-Z]";
    format!(r"(?:\\(?:{chars}|{octal}|{hex}|{ctrl}))")
}

pub fn macro_name() -> String {
    format!("(?:{VARIABLE}|{ATOM})")
}

pub fn words(words: &[&str]) -> String {
    format!(r"(?:{})\b", words.join("|"))
}

pub fn kind(path: &str) -> TokenKind {
    TokenKind::new(path)
}

fn root_state() -> Vec<StateEntry> {
    let base = r"(?:[2-9]|[12][0-9]|3[0-6])";
    vec![
        Rule::token(r"\s+", TokenKind::TEXT).into(),
        Rule::token(r"%.*\n", TokenKind::COMMENT).into(),
        Rule::token(words(KEYWORDS), TokenKind::KEYWORD).into(),
        Rule::token(words(BUILTINS), kind("Name.Builtin")).into(),
        Rule::token(words(WORD_OPERATORS), kind("Operator.Word")).into(),
        Rule::token(r"^-", TokenKind::PUNCTUATION)
            .push("directive")
            .into(),
        Rule::token(OPERATORS, TokenKind::OPERATOR).into(),
        Rule::token(r#"""#, TokenKind::STRING).push("string").into(),
        Rule::token(r"<<", kind("Name.Label")).into(),
        Rule::token(r">>", kind("Name.Label")).into(),
        Rule::by_groups(
            format!("({ATOM})(:)"),
            [kind("Name.Namespace"), TokenKind::PUNCTUATION],
        )
        .into(),
        Rule::by_groups(
            format!(r"(?:^|(?<=:))({ATOM})(\s*)(\()"),
            [
                GroupAction::Kind(kind("Name.Function")),
                GroupAction::Text,
                GroupAction::Kind(TokenKind::PUNCTUATION),
            ],
        )
        .into(),
        Rule::token(format!(r"[+-]?{base}#[0-9a-zA-Z]+"), kind("Number.Integer")).into(),
        Rule::token(r"[+-]?\d+\.\d+", kind("Number.Float")).into(),
        Rule::token(r"[+-]?\d+", kind("Number.Integer")).into(),
        Rule::token(r#"#\{"#, TokenKind::PUNCTUATION)
            .push("map_key")
            .into(),
        Rule::token(r#"[\]\[:_@".{}()|;,]"#, TokenKind::PUNCTUATION).into(),
        Rule::token(VARIABLE, kind("Name.Variable")).into(),
        Rule::token(ATOM, TokenKind::NAME).into(),
        Rule::token(format!(r"\?{}", macro_name()), kind("Name.Constant")).into(),
        Rule::token(
            format!(r"\$(?:{}|\\[ %]|[^\\])", escape()),
            kind("String.Char"),
        )
        .into(),
        Rule::token(
            format!(r"#{ATOM}(:?\.{ATOM})?"),
            kind("Name.Label"),
        )
        .into(),
    ]
}

/// An Erlang-like table: root, string, directive, map_key, map_val.
pub fn erlang_table() -> StateTable {
    try_erlang_table().unwrap()
}

pub fn try_erlang_table() -> LSResult<StateTable> {
    let macro_name = macro_name();
    StateTable::builder()
        .state("root", root_state())
        .state(
            "string",
            [
                Rule::token(escape(), kind("String.Escape")).into(),
                Rule::token(r#"""#, TokenKind::STRING).pop().into(),
                Rule::token(r"~[0-9.*]*[~#+BPWXb-ginpswx]", kind("String.Interpol")).into(),
                Rule::token(r#"[^"\\~]+"#, TokenKind::STRING).into(),
                Rule::token(r"~", TokenKind::STRING).into(),
            ],
        )
        .state(
            "directive",
            [
                Rule::by_groups(
                    format!(r"(define)(\s*)(\()({macro_name})"),
                    [
                        kind("Name.Entity"),
                        TokenKind::TEXT,
                        TokenKind::PUNCTUATION,
                        kind("Name.Constant"),
                    ],
                )
                .pop()
                .into(),
                Rule::by_groups(
                    format!(r"(record)(\s*)(\()({macro_name})"),
                    [
                        kind("Name.Entity"),
                        TokenKind::TEXT,
                        TokenKind::PUNCTUATION,
                        kind("Name.Label"),
                    ],
                )
                .pop()
                .into(),
                Rule::token(ATOM, kind("Name.Entity")).pop().into(),
            ],
        )
        .state(
            "map_key",
            [
                Rule::token(r"=>", TokenKind::PUNCTUATION)
                    .push("map_val")
                    .into(),
                Rule::token(r":=", TokenKind::PUNCTUATION)
                    .push("map_val")
                    .into(),
                Rule::token(r"\}", TokenKind::PUNCTUATION).pop().into(),
                include("root"),
            ],
        )
        .state(
            "map_val",
            [
                Rule::token(r",", TokenKind::PUNCTUATION).pop().into(),
                Rule::token(r"(?=\})", TokenKind::PUNCTUATION).pop().into(),
                include("root"),
            ],
        )
        .build()
}

pub fn erlang_splicer() -> SessionSplicer {
    SessionSplicer::new(erlang_table()).unwrap()
}

pub fn triples<'t>(tokens: &[Token<'t>]) -> Vec<(&'t str, String)> {
    tokens
        .iter()
        .map(|t| (t.text(), t.kind().to_string()))
        .collect()
}

pub const SAMPLES: &[&str] = &[
    "-module(hello).\n-export([start/0]).\n\nstart() ->\n    io:format(\"hi ~p~n\", [self()]).\n",
    "-define(X, 1).\n-record(point, {x = 0, y = 0}).\n",
    "f(#{a := A, b => B}) -> A + B.\n",
    "% comment\nloop(N) when N > 0 -> loop(N - 1);\nloop(_) -> ok.\n",
    "X = <<1, 2, 3>>, $a, $\\n, 16#ff, 2.5e, 'quoted atom'.\n",
    "\"unterminated\nstring",
    "caf\u{e9} na\u{ef}ve \u{4f60}\u{597d} \u{1f600}\n",
    "",
    "\n\n\n",
    "}}}))) ,,, ]]]",
];
