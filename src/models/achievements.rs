//! Player achievements as stored in the `players` table and in the static
//! profile documents.
//!
//! The stored shape is loose: competition keys map to arrays whose elements
//! are a bare year (`2013`, `"2014"`) or a record (`{"year": 2014, "shared": true}`).
//! That union is kept as-is in [`AchievementEntry`]. Years are rendered the
//! way they were written, and any truthy `shared` marks the record as shared.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

const LABELS: &[(&str, &str)] = &[
    ("WCC", "World Chess Championship"),
    ("Candidates", "Candidates Tournament"),
    ("WorldCup", "FIDE World Cup"),
    ("WRC", "World Rapid Championship"),
    ("WBC", "World Blitz Championship"),
    ("Olympiad", "Chess Olympiad"),
    ("GrandSwiss", "FIDE Grand Swiss"),
    ("TataSteel", "Tata Steel Masters"),
    ("NorwayChess", "Norway Chess"),
    ("SinquefieldCup", "Sinquefield Cup"),
    ("GCT", "Grand Chess Tour"),
    ("WJC", "World Junior Championship"),
    ("WWCC", "Women's World Chess Championship"),
];

/// Human-readable name of a competition key, or the key itself when unknown.
pub fn label_for(key: &str) -> &str {
    LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

/// A year as written in the document: a number or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Year {
    Number(Number),
    Text(String),
}

impl Year {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self::Number(n)),
            Value::String(s) => Some(Self::Text(s)),
            _ => None,
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
                (Some(i), _, _) => write!(f, "{i}"),
                (_, Some(u), _) => write!(f, "{u}"),
                // 2013.0 reads as 2013
                (_, _, Some(x)) if x.fract() == 0.0 && x.abs() < 1e15 => write!(f, "{x:.0}"),
                _ => write!(f, "{n}"),
            },
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AchievementEntry {
    Year(Year),
    Record { year: Year, shared: bool },
}

impl AchievementEntry {
    /// `None` for elements with nothing to render: booleans, nulls, nested
    /// arrays, and records without a usable `year`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(record) => {
                let year = Year::from_value(record.get("year")?.clone())?;
                let shared = record.get("shared").is_some_and(is_truthy);
                Some(Self::Record { year, shared })
            }
            other => Year::from_value(other).map(Self::Year),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0 && !x.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl fmt::Display for AchievementEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Record { year, shared: true } => write!(f, "{year} (shared)"),
            Self::Record { year, shared: false } => write!(f, "{year}"),
        }
    }
}

/// Competition key → entries, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Achievements(pub Vec<(String, Vec<AchievementEntry>)>);

impl<'de> Deserialize<'de> for Achievements {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Value::Object(map) = Value::deserialize(deserializer)? else {
            return Ok(Self::default());
        };

        let competitions = map
            .into_iter()
            .map(|(key, value)| {
                let entries: Vec<AchievementEntry> = match value {
                    Value::Array(items) => items
                        .into_iter()
                        .filter_map(AchievementEntry::from_value)
                        .collect(),
                    _ => Vec::new(),
                };
                (key, entries)
            })
            .collect();

        Ok(Self(competitions))
    }
}

/// One rendered competition line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementLine {
    pub label: String,
    pub entries: String,
}

impl fmt::Display for AchievementLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.entries)
    }
}

impl Achievements {
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|(_, entries)| entries.is_empty())
    }

    /// Renders every competition that has at least one entry.
    pub fn lines(&self) -> Vec<AchievementLine> {
        self.0
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(key, entries)| AchievementLine {
                label: label_for(key).to_string(),
                entries: itertools::join(entries, ", "),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Achievements {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn renders_bare_and_shared_years() {
        let lines = parse(r#"{ "WCC": [2013, {"year": 2014, "shared": true}] }"#).lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0].to_string(),
            "World Chess Championship: 2013, 2014 (shared)"
        );
    }

    #[test]
    fn empty_and_non_array_values_produce_no_line() {
        let achievements = parse(
            r#"{ "WCC": [], "Candidates": "lots", "WRC": null, "WBC": [2019, {"year": 2022}] }"#,
        );
        let lines = achievements.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].to_string(), "World Blitz Championship: 2019, 2022");
        assert!(!achievements.is_empty());

        assert!(parse(r#"{ "WCC": [] }"#).is_empty());
        assert!(parse("[]").lines().is_empty());
    }

    #[test]
    fn unknown_keys_keep_their_name_and_order() {
        let lines = parse(
            r#"{ "Zurich Classic": [1953], "Olympiad": [1978, "team gold"], "Alpha": [2001] }"#,
        )
        .lines();
        let rendered: Vec<String> = lines.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "Zurich Classic: 1953",
                "Chess Olympiad: 1978, team gold",
                "Alpha: 2001"
            ]
        );
    }

    #[test]
    fn loose_years_and_shared_flags_are_rendered() {
        let lines = parse(
            r#"{ "WCC": [2013.0, {"year": "2014", "shared": true}, {"year": 2016, "shared": 1},
                         {"year": 2018, "shared": 0}, {"year": 2021.5, "shared": "yes"}] }"#,
        )
        .lines();
        assert_eq!(
            lines[0].to_string(),
            "World Chess Championship: 2013, 2014 (shared), 2016 (shared), 2018, 2021.5 (shared)"
        );
    }

    #[test]
    fn unrenderable_elements_are_skipped() {
        let lines = parse(r#"{ "WCC": [true, null, {"shared": true}, 2016] }"#).lines();
        assert_eq!(lines[0].entries, "2016");
        assert_eq!(label_for("nope"), "nope");
    }
}
