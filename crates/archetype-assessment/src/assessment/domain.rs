use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for a scorable archetype within a category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchetypeId(pub String);

impl ArchetypeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchetypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for an assessment category such as `leadership`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable reference data naming one behavioral resistance pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    pub id: ArchetypeId,
    pub name: String,
}

/// Likert-style pools a question can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Direct,
    Oblique,
    Scenario,
    Balancing,
}

impl QuestionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Oblique => "oblique",
            Self::Scenario => "scenario",
            Self::Balancing => "balancing",
        }
    }
}

/// Which archetype(s) a Likert item loads on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchetypeLoading {
    Primary(ArchetypeId),
    Weighted(BTreeMap<ArchetypeId, f64>),
}

/// Discrete answer offered instead of a free 1-5 agreement scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    #[serde(alias = "label")]
    pub text: String,
    pub score: i64,
}

/// A Likert-style item from the direct, oblique, scenario or balancing pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub kind: QuestionKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<ArchetypeLoading>,
    #[serde(default, alias = "reverseCoded")]
    pub reverse_coded: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn option(&self, option_id: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}

/// One statement inside a forced-choice block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForcedChoiceStatement {
    pub archetype: ArchetypeId,
    #[serde(alias = "label")]
    pub text: String,
}

/// Ipsative block: the respondent picks one statement most and one least like them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForcedChoiceBlock {
    pub id: String,
    pub statements: Vec<ForcedChoiceStatement>,
}

/// Complete read-only definition of one assessment category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub id: CategoryId,
    pub name: String,
    pub archetypes: Vec<Archetype>,
    #[serde(default)]
    pub direct: Vec<Question>,
    #[serde(default)]
    pub oblique: Vec<Question>,
    #[serde(default)]
    pub scenario: Vec<Question>,
    #[serde(default, alias = "forcedChoice")]
    pub forced_choice: Vec<ForcedChoiceBlock>,
    #[serde(default)]
    pub balancing: Vec<Question>,
}

impl CategoryDefinition {
    /// Likert-style items in lookup order: direct, oblique, scenario, balancing.
    pub fn likert_items(&self) -> impl Iterator<Item = &Question> {
        self.direct
            .iter()
            .chain(self.oblique.iter())
            .chain(self.scenario.iter())
            .chain(self.balancing.iter())
    }

    pub fn archetype(&self, id: &ArchetypeId) -> Option<&Archetype> {
        self.archetypes.iter().find(|archetype| &archetype.id == id)
    }

    pub fn block(&self, block_id: &str) -> Option<&ForcedChoiceBlock> {
        self.forced_choice.iter().find(|block| block.id == block_id)
    }

    pub fn question_count(&self) -> usize {
        self.direct.len()
            + self.oblique.len()
            + self.scenario.len()
            + self.forced_choice.len()
            + self.balancing.len()
    }
}

/// Declared type of a submitted response. The tag decides the scoring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Direct,
    Oblique,
    Scenario,
    #[serde(alias = "forcedChoice")]
    ForcedChoice,
    Balancing,
}

impl ResponseKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Oblique => "oblique",
            Self::Scenario => "scenario",
            Self::ForcedChoice => "forced_choice",
            Self::Balancing => "balancing",
        }
    }

    /// Lenient parse used when ingesting exported response sheets.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw
            .trim()
            .to_ascii_lowercase()
            .replace(['-', ' '], "_");

        match normalized.as_str() {
            "direct" => Some(Self::Direct),
            "oblique" => Some(Self::Oblique),
            "scenario" => Some(Self::Scenario),
            "forced_choice" | "forcedchoice" => Some(Self::ForcedChoice),
            "balancing" => Some(Self::Balancing),
            _ => None,
        }
    }
}

/// Response payload. Anything the engine cannot interpret lands in `Unrecognized`
/// so a single malformed answer never rejects the whole submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    Scale(i64),
    Choice {
        option_id: String,
    },
    Pair {
        #[serde(default, alias = "mostLikeMe", skip_serializing_if = "Option::is_none")]
        most_like_me: Option<ArchetypeId>,
        #[serde(default, alias = "leastLikeMe", skip_serializing_if = "Option::is_none")]
        least_like_me: Option<ArchetypeId>,
    },
    Unrecognized(serde_json::Value),
}

impl ResponsePayload {
    pub fn pair(most_like_me: ArchetypeId, least_like_me: ArchetypeId) -> Self {
        Self::Pair {
            most_like_me: Some(most_like_me),
            least_like_me: Some(least_like_me),
        }
    }
}

/// A single answer keyed by question id (Likert/balancing) or block id (forced choice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: String,
    pub kind: ResponseKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ResponsePayload>,
}

impl Response {
    pub fn scale(id: impl Into<String>, kind: ResponseKind, value: i64) -> Self {
        Self {
            id: id.into(),
            kind,
            value: Some(ResponsePayload::Scale(value)),
        }
    }

    pub fn forced_choice(
        id: impl Into<String>,
        most_like_me: ArchetypeId,
        least_like_me: ArchetypeId,
    ) -> Self {
        Self {
            id: id.into(),
            kind: ResponseKind::ForcedChoice,
            value: Some(ResponsePayload::pair(most_like_me, least_like_me)),
        }
    }
}
