//! JSON caption documents.
//!
//! Three cue encodings are accepted, selected from the shape of the first cue:
//! a `part` string, a `text` string, or a `lines` array joined with a space.
//! YouTube `json3` timed-text (`{"events": [...]}`) is also understood.

use super::CaptionCue;
use crate::error::{CueciteError, Result};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
enum CueEncoding {
    Part,
    Text,
    Lines,
}

impl CueEncoding {
    fn detect(cue: &Map<String, Value>) -> Option<Self> {
        if cue.contains_key("part") {
            Some(CueEncoding::Part)
        } else if cue.contains_key("text") {
            Some(CueEncoding::Text)
        } else if cue.contains_key("lines") {
            Some(CueEncoding::Lines)
        } else {
            None
        }
    }

    fn field(self) -> &'static str {
        match self {
            CueEncoding::Part => "part",
            CueEncoding::Text => "text",
            CueEncoding::Lines => "lines",
        }
    }
}

pub(super) fn parse(document: &str) -> Result<Vec<CaptionCue>> {
    let value: Value = serde_json::from_str(document)
        .map_err(|e| CueciteError::Parse(format!("invalid JSON caption document: {}", e)))?;

    match value {
        Value::Array(cues) => parse_cue_array(&cues),
        Value::Object(obj) => {
            if let Some(Value::Array(cues)) = obj.get("cues") {
                parse_cue_array(cues)
            } else if let Some(Value::Array(events)) = obj.get("events") {
                parse_json3_events(events)
            } else {
                Err(CueciteError::Parse(
                    "JSON caption object has no `cues` or `events` array".to_string(),
                ))
            }
        }
        _ => Err(CueciteError::Parse(
            "JSON caption document must be an array or object".to_string(),
        )),
    }
}

fn parse_cue_array(cues: &[Value]) -> Result<Vec<CaptionCue>> {
    let Some(first) = cues.first() else {
        return Ok(Vec::new());
    };

    let encoding = first
        .as_object()
        .and_then(CueEncoding::detect)
        .ok_or_else(|| {
            CueciteError::Parse("first cue has no `part`, `text` or `lines` field".to_string())
        })?;

    cues.iter()
        .enumerate()
        .map(|(i, cue)| parse_cue(i, cue, encoding))
        .collect()
}

fn parse_cue(index: usize, cue: &Value, encoding: CueEncoding) -> Result<CaptionCue> {
    let obj = cue
        .as_object()
        .ok_or_else(|| CueciteError::Parse(format!("cue {} is not an object", index)))?;

    let start = number_field(obj, "start", index)?;
    let end = number_field(obj, "end", index)?;

    let raw = obj.get(encoding.field()).ok_or_else(|| {
        CueciteError::Parse(format!(
            "cue {} lacks `{}` (documents may not mix cue encodings)",
            index,
            encoding.field()
        ))
    })?;

    let text = match (encoding, raw) {
        (CueEncoding::Part | CueEncoding::Text, Value::String(s)) => s.trim().to_string(),
        (CueEncoding::Lines, Value::Array(lines)) => lines
            .iter()
            .map(|line| {
                line.as_str().map(str::trim).ok_or_else(|| {
                    CueciteError::Parse(format!("cue {} has a non-string line", index))
                })
            })
            .collect::<Result<Vec<_>>>()?
            .join(" "),
        _ => {
            return Err(CueciteError::Parse(format!(
                "cue {} has a malformed `{}` field",
                index,
                encoding.field()
            )))
        }
    };

    Ok(CaptionCue::new(start, end, text))
}

fn number_field(obj: &Map<String, Value>, key: &str, index: usize) -> Result<f64> {
    obj.get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| CueciteError::Parse(format!("cue {} has no numeric `{}`", index, key)))
}

/// YouTube json3: events carry `tStartMs`, `dDurationMs` and `segs[].utf8`.
/// Events without text (window/style events, bare newlines) are skipped.
fn parse_json3_events(events: &[Value]) -> Result<Vec<CaptionCue>> {
    let mut cues = Vec::new();

    for (i, event) in events.iter().enumerate() {
        let Some(segs) = event.get("segs").and_then(Value::as_array) else {
            continue;
        };

        let text = segs
            .iter()
            .filter_map(|s| s.get("utf8").and_then(Value::as_str))
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        if text.is_empty() {
            continue;
        }

        let start_ms = event
            .get("tStartMs")
            .and_then(Value::as_f64)
            .ok_or_else(|| CueciteError::Parse(format!("event {} has no tStartMs", i)))?;
        let duration_ms = event
            .get("dDurationMs")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);

        cues.push(CaptionCue::new(
            start_ms / 1000.0,
            (start_ms + duration_ms) / 1000.0,
            text,
        ));
    }

    Ok(cues)
}
