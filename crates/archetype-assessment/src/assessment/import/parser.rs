use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::warn;

use super::super::domain::{ArchetypeId, Response, ResponseKind, ResponsePayload};

pub(crate) fn parse_responses<R: Read>(reader: R) -> Result<Vec<Response>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut responses = Vec::new();

    for (line, record) in csv_reader.deserialize::<ResponseRow>().enumerate() {
        let row = record?;
        let Some(kind) = ResponseKind::parse(&row.kind) else {
            warn!(row = line + 1, kind = %row.kind, id = %row.id, "skipping row with unknown response kind");
            continue;
        };

        let value = row.payload(kind);
        responses.push(Response {
            id: row.id,
            kind,
            value,
        });
    }

    Ok(responses)
}

#[derive(Debug, Deserialize)]
struct ResponseRow {
    id: String,
    kind: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    value: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    option_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    most_like_me: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    least_like_me: Option<String>,
}

impl ResponseRow {
    fn payload(&self, kind: ResponseKind) -> Option<ResponsePayload> {
        if kind == ResponseKind::ForcedChoice {
            if self.most_like_me.is_none() && self.least_like_me.is_none() {
                return None;
            }
            return Some(ResponsePayload::Pair {
                most_like_me: self.most_like_me.clone().map(ArchetypeId),
                least_like_me: self.least_like_me.clone().map(ArchetypeId),
            });
        }

        if let Some(option_id) = &self.option_id {
            return Some(ResponsePayload::Choice {
                option_id: option_id.clone(),
            });
        }

        self.value.as_deref().map(|raw| match raw.parse::<i64>() {
            Ok(value) => ResponsePayload::Scale(value),
            Err(_) => ResponsePayload::Unrecognized(serde_json::Value::String(raw.to_string())),
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
