//! # Table Definition Documents
//!
//! Serde models for loading a [`StateTable`] from a JSON document.
//!
//! ```json
//! {
//!   "root": "root",
//!   "states": {
//!     "root": [
//!       { "include": "whitespace" },
//!       { "pattern": "\"", "token": "String", "push": "string" },
//!       { "pattern": "(-)(define)", "groups": ["Punctuation", "Name.Entity"] },
//!       { "default": { "goto": "body" } }
//!     ],
//!     "string": [
//!       { "pattern": "\"", "token": "String", "pop": 1 },
//!       { "pattern": "[^\"]+", "token": "String" }
//!     ]
//!   }
//! }
//! ```

use core::fmt;

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::{
    errors::{LSResult, LexstackError},
    rules::{
        DEFAULT_ROOT_STATE, GroupAction, Rule, StateEntry, StateTable, TableBuilder, TableOptions,
        Transition, include,
    },
    tokens::TokenKind,
};

/// Push target name that means "push the current state again".
pub const PUSH_CURRENT: &str = "#push";

fn default_root() -> String {
    DEFAULT_ROOT_STATE.to_string()
}

fn default_true() -> bool {
    true
}

/// A table definition document.
///
/// Unknown keys are rejected; a misspelled key is an error, not a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableDef {
    /// The root state name.
    #[serde(default = "default_root")]
    pub root: String,

    /// Do `^` and `$` match at line boundaries?
    #[serde(default = "default_true")]
    pub multi_line: bool,

    /// Does an unmatched `\n` reset the state stack?
    #[serde(default = "default_true")]
    pub reset_on_newline: bool,

    /// Override for [`TableOptions::max_zero_width_steps`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_zero_width_steps: Option<usize>,

    /// Override for [`TableOptions::max_nesting`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nesting: Option<usize>,

    /// The states, in document order.
    pub states: StateDefs,
}

/// The named states of a document, in document order.
///
/// Repeated names are kept, so that building reports
/// [`LexstackError::DuplicateState`] instead of silently dropping a state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateDefs(Vec<(String, StateDef)>);

impl StateDefs {
    /// The number of declared states, counting repeats.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Are there no states?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first state declared as `name`.
    pub fn get(
        &self,
        name: &str,
    ) -> Option<&StateDef> {
        self.0
            .iter()
            .find(|(state, _)| state == name)
            .map(|(_, def)| def)
    }

    /// Append a state.
    pub fn push<S: Into<String>>(
        &mut self,
        name: S,
        state: StateDef,
    ) {
        self.0.push((name.into(), state));
    }

    /// Iterate the states, in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateDef)> {
        self.0.iter().map(|(name, def)| (name.as_str(), def))
    }
}

impl Serialize for StateDefs {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, state) in &self.0 {
            map.serialize_entry(name, state)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StateDefs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatesVisitor;

        impl<'de> Visitor<'de> for StatesVisitor {
            type Value = StateDefs;

            fn expecting(
                &self,
                f: &mut fmt::Formatter<'_>,
            ) -> fmt::Result {
                f.write_str("a map of state names to entry lists")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> Result<Self::Value, A::Error> {
                let mut states = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, StateDef>()? {
                    states.push(entry);
                }
                Ok(StateDefs(states))
            }
        }

        deserializer.deserialize_map(StatesVisitor)
    }
}

/// The entries of one state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateDef {
    /// The entries, in priority order.
    pub entries: Vec<EntryDef>,
}

/// One state entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryDef {
    /// `{ "include": "state" }`
    Include(IncludeDef),

    /// `{ "default": { "goto": "state" } }`
    Default(DefaultDef),

    /// A rule.
    Rule(RuleDef),
}

/// An include entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncludeDef {
    /// The included state.
    pub include: String,
}

/// A default-transition entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultDef {
    /// The transition taken when nothing else matched.
    pub default: TransitionDef,
}

/// A rule definition.
///
/// Exactly one of `token` or `groups` should be set; with neither, the rule
/// emits nothing and must change state without consuming text.
/// At most one of `push`, `pop` or `goto` may be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDef {
    /// The regex pattern.
    pub pattern: String,

    /// Emit one token of this kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenKind>,

    /// Emit one token per capture group; `null` skips a group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Option<GroupDef>>>,

    /// Push one state, or several in order; `"#push"` pushes the current state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push: Option<PushDef>,

    /// Pop this many states.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pop: Option<usize>,

    /// Replace the top state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goto: Option<String>,
}

/// A capture group action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupDef {
    /// A token kind.
    Kind(TokenKind),

    /// `{ "lex": "state" }`
    Lex {
        /// The state to re-tokenize the group from.
        lex: String,
    },
}

/// A transition; at most one field may be set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionDef {
    /// Push one state, or several in order; `"#push"` pushes the current state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push: Option<PushDef>,

    /// Pop this many states.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pop: Option<usize>,

    /// Replace the top state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goto: Option<String>,
}

/// Push targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PushDef {
    /// A single state.
    One(String),

    /// Several states, pushed in order.
    Many(Vec<String>),
}

impl TransitionDef {
    /// Convert to a [`Transition`].
    pub fn to_transition(&self) -> LSResult<Transition> {
        let set = [self.push.is_some(), self.pop.is_some(), self.goto.is_some()]
            .into_iter()
            .filter(|&b| b)
            .count();
        if set > 1 {
            return Err(LexstackError::Config(format!(
                "at most one of push/pop/goto may be set: {self:?}"
            )));
        }

        Ok(match (&self.push, self.pop, &self.goto) {
            (Some(PushDef::One(name)), _, _) if name == PUSH_CURRENT => Transition::PushCurrent,
            (Some(PushDef::One(name)), _, _) => Transition::push(name),
            (Some(PushDef::Many(names)), _, _) => {
                if names.iter().any(|name| name == PUSH_CURRENT) {
                    return Err(LexstackError::Config(format!(
                        "{PUSH_CURRENT:?} is only valid as a single push target"
                    )));
                }
                Transition::push_all(names)
            }
            (_, Some(n), _) => Transition::pop_n(n),
            (_, _, Some(name)) => Transition::goto(name),
            _ => Transition::None,
        })
    }
}

impl RuleDef {
    /// The transition fields of this rule.
    pub fn transition(&self) -> TransitionDef {
        TransitionDef {
            push: self.push.clone(),
            pop: self.pop,
            goto: self.goto.clone(),
        }
    }

    /// Convert to a [`Rule`].
    pub fn to_rule(&self) -> LSResult<Rule> {
        let transition = self.transition().to_transition()?;
        let rule = match (&self.token, &self.groups) {
            (Some(_), Some(_)) => {
                return Err(LexstackError::Config(format!(
                    "rule {:?} sets both token and groups",
                    self.pattern
                )));
            }
            (Some(kind), None) => Rule::token(self.pattern.as_str(), kind.clone()),
            (None, Some(groups)) => Rule::by_groups(
                self.pattern.as_str(),
                groups.iter().map(|group| match group {
                    None => GroupAction::Skip,
                    Some(GroupDef::Kind(kind)) if kind == &TokenKind::TEXT => GroupAction::Text,
                    Some(GroupDef::Kind(kind)) => GroupAction::Kind(kind.clone()),
                    Some(GroupDef::Lex { lex }) => GroupAction::lex(lex),
                }),
            ),
            (None, None) => Rule::new(
                self.pattern.as_str(),
                crate::rules::Emission::Nothing,
                Transition::None,
            ),
        };
        Ok(rule.then(transition))
    }
}

impl EntryDef {
    /// Convert to a [`StateEntry`].
    pub fn to_entry(&self) -> LSResult<StateEntry> {
        Ok(match self {
            Self::Include(def) => include(&def.include),
            Self::Default(def) => Rule::default_to(def.default.to_transition()?).into(),
            Self::Rule(rule) => rule.to_rule()?.into(),
        })
    }
}

impl TableDef {
    /// Parse a JSON table definition.
    pub fn from_json_str(json: &str) -> LSResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The [`TableOptions`] this document describes.
    pub fn options(&self) -> TableOptions {
        let mut options = TableOptions::default()
            .with_root(&self.root)
            .with_multi_line(self.multi_line)
            .with_reset_on_newline(self.reset_on_newline);
        if let Some(steps) = self.max_zero_width_steps {
            options.set_max_zero_width_steps(steps);
        }
        if let Some(depth) = self.max_nesting {
            options.set_max_nesting(depth);
        }
        options
    }

    /// Convert to a [`TableBuilder`].
    pub fn to_builder(&self) -> LSResult<TableBuilder> {
        let mut builder = TableBuilder::new().with_options(self.options());
        for (name, state) in self.states.iter() {
            let entries = state
                .entries
                .iter()
                .map(EntryDef::to_entry)
                .collect::<LSResult<Vec<_>>>()?;
            builder.add_state(name, entries);
        }
        Ok(builder)
    }

    /// Build the [`StateTable`].
    pub fn build(&self) -> LSResult<StateTable> {
        self.to_builder()?.build()
    }
}
