//! WebVTT caption documents, as written by yt-dlp.

use super::CaptionCue;
use crate::error::{CueciteError, Result};
use regex::Regex;
use std::sync::LazyLock;

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid regex"));

/// Word-timing markup used by rolling auto-captions: `<00:00:01.234>`, `<c>`.
static TIMED_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?:\d{2}:)?\d{2}:\d{2}\.\d{3}>|</?c[.>]").expect("Invalid regex")
});

/// Rolling tracks hold each line on screen through a ~10 ms transition cue.
const TRANSITION_SECONDS: f64 = 0.05;

pub(super) fn parse(document: &str) -> Result<Vec<CaptionCue>> {
    let normalized = document.replace("\r\n", "\n").replace('\r', "\n");
    let mut blocks = normalized.split("\n\n").map(str::trim).filter(|b| !b.is_empty());

    match blocks.next() {
        Some(header) if header.starts_with("WEBVTT") => {}
        _ => return Err(CueciteError::Parse("missing WEBVTT header".to_string())),
    }

    let rolling = TIMED_TAG_REGEX.is_match(&normalized);
    let mut cues = Vec::new();
    let mut previous_lines: Vec<String> = Vec::new();

    for block in blocks {
        if block.starts_with("NOTE") || block.starts_with("STYLE") || block.starts_with("REGION") {
            continue;
        }

        let mut lines = block.lines();
        let timing = match lines.by_ref().find(|l| l.contains("-->")) {
            Some(t) => t,
            None => continue,
        };
        let (start, end) = parse_timing(timing)?;

        let raw: Vec<&str> = lines.collect();
        let cleaned: Vec<String> = raw
            .iter()
            .map(|l| clean_line(l))
            .filter(|l| !l.is_empty())
            .collect();

        let text = if rolling {
            rolling_payload(&raw, &cleaned, &previous_lines, end - start)
        } else {
            cleaned.join(" ")
        };

        if !text.is_empty() {
            cues.push(CaptionCue::new(start, end, text));
        }

        previous_lines = cleaned;
    }

    Ok(cues)
}

/// New text of a cue in a rolling auto-caption track.
///
/// Each cue shows the previous line above the line being spoken. Lines that
/// carry word timing are the spoken ones. An untimed cue drops the leading
/// lines carried over from the previous cue but always keeps its last line,
/// and a transition cue that only repeats the tail of the previous cue adds
/// nothing.
fn rolling_payload(raw: &[&str], cleaned: &[String], previous: &[String], duration: f64) -> String {
    let timed: Vec<String> = raw
        .iter()
        .filter(|l| TIMED_TAG_REGEX.is_match(l))
        .map(|l| clean_line(l))
        .filter(|l| !l.is_empty())
        .collect();

    if !timed.is_empty() {
        return timed.join(" ");
    }

    if duration < TRANSITION_SECONDS && previous.ends_with(cleaned) {
        return String::new();
    }

    let max_overlap = cleaned.len().saturating_sub(1).min(previous.len());
    let overlap = (1..=max_overlap)
        .rev()
        .find(|&k| cleaned[..k] == previous[previous.len() - k..])
        .unwrap_or(0);

    cleaned[overlap..].join(" ")
}

fn parse_timing(line: &str) -> Result<(f64, f64)> {
    let (start, rest) = line
        .split_once("-->")
        .ok_or_else(|| CueciteError::Parse(format!("bad timing line: {}", line)))?;
    let end = rest.split_whitespace().next().unwrap_or_default();

    Ok((parse_timestamp(start.trim())?, parse_timestamp(end)?))
}

/// Parse `HH:MM:SS.mmm` or `MM:SS.mmm` into seconds.
fn parse_timestamp(ts: &str) -> Result<f64> {
    let invalid = || CueciteError::Parse(format!("bad timestamp: {}", ts));

    let parts: Vec<&str> = ts.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [m, s] => ("0", *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(invalid()),
    };

    let hours: f64 = hours.parse().map_err(|_| invalid())?;
    let minutes: f64 = minutes.parse().map_err(|_| invalid())?;
    let seconds: f64 = seconds.parse().map_err(|_| invalid())?;

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Strip inline tags and decode the handful of entities WebVTT allows.
fn clean_line(line: &str) -> String {
    let stripped = TAG_REGEX.replace_all(line, "");
    stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_document() {
        let doc = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:03.500\nHello there\n\n00:03.500 --> 00:05.000 align:start position:0%\nGeneral Kenobi\n";
        let cues = parse(doc).unwrap();
        assert_eq!(
            cues,
            vec![
                CaptionCue::new(1.0, 3.5, "Hello there"),
                CaptionCue::new(3.5, 5.0, "General Kenobi"),
            ]
        );
    }

    #[test]
    fn test_multiline_payload_joined() {
        let doc = "WEBVTT\n\n00:00.000 --> 00:02.000\nfirst line\nsecond line\n";
        assert_eq!(parse(doc).unwrap()[0].text, "first line second line");
    }

    #[test]
    fn test_header_metadata_and_notes_skipped() {
        let doc = "WEBVTT\nKind: captions\nLanguage: en\n\nNOTE generated\n\nSTYLE\n::cue { color: red }\n\n00:00.000 --> 00:01.000\nonly cue\n";
        let cues = parse(doc).unwrap();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "only cue");
    }

    #[test]
    fn test_tags_and_entities_removed() {
        let doc = "WEBVTT\n\n00:00.000 --> 00:01.000\nrock<00:00:00.400><c> &amp;</c><00:00:00.800><c> roll</c>\n";
        assert_eq!(parse(doc).unwrap()[0].text, "rock & roll");
    }

    #[test]
    fn test_rolling_auto_captions_collapsed() {
        let doc = "WEBVTT\n\n\
00:00:00.000 --> 00:00:02.000\n\
never gonna\n\n\
00:00:02.000 --> 00:00:02.010\n\
never gonna\n\n\
00:00:02.010 --> 00:00:04.000\n\
never gonna\n\
give<00:00:02.500><c> you</c><00:00:03.000><c> up</c>\n\n\
00:00:04.000 --> 00:00:04.010\n\
give you up\n";
        let cues = parse(doc).unwrap();
        let texts: Vec<_> = cues.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["never gonna", "give you up"]);
    }

    #[test]
    fn test_repeated_plain_cues_are_kept() {
        let doc = "WEBVTT\n\n\
00:00.000 --> 00:02.000\n[Music]\n\n\
00:02.000 --> 00:04.000\n[Music]\n\n\
00:04.000 --> 00:06.000\nla la\n\n\
00:06.000 --> 00:08.000\nla la\n";
        let cues = parse(doc).unwrap();
        let texts: Vec<_> = cues.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["[Music]", "[Music]", "la la", "la la"]);
    }

    #[test]
    fn test_rolling_captions_keep_repeated_phrase() {
        let doc = "WEBVTT\nKind: captions\nLanguage: en\n\n\
00:00:00.000 --> 00:00:02.000 align:start position:0%\n \n\
thank<00:00:00.500><c> you</c>\n\n\
00:00:02.000 --> 00:00:02.010 align:start position:0%\nthank you\n \n\n\
00:00:02.010 --> 00:00:04.000 align:start position:0%\nthank you\n\
thank<00:00:02.500><c> you</c>\n\n\
00:00:04.000 --> 00:00:04.010 align:start position:0%\nthank you\n \n";
        let cues = parse(doc).unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(crate::captions::cues_to_text(&cues), "thank you thank you");
    }

    #[test]
    fn test_rolling_untimed_line_drops_only_carried_over_text() {
        let doc = "WEBVTT\n\n\
00:00:00.000 --> 00:00:02.000\nwell<00:00:00.500><c> then</c>\n\n\
00:00:02.000 --> 00:00:04.000\nwell then\nokay\n\n\
00:00:04.000 --> 00:00:06.000\nokay\nokay\n";
        let cues = parse(doc).unwrap();
        let texts: Vec<_> = cues.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["well then", "okay", "okay"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = "WEBVTT\r\n\r\n00:00.000 --> 00:01.000\r\nwindows\r\n";
        assert_eq!(parse(doc).unwrap()[0].text, "windows");
    }

    #[test]
    fn test_header_only_has_no_cues() {
        assert!(parse("WEBVTT\n").unwrap().is_empty());
    }

    #[test]
    fn test_bad_timestamp_is_error() {
        let doc = "WEBVTT\n\nxx:00.000 --> 00:01.000\ntext\n";
        assert!(matches!(parse(doc), Err(CueciteError::Parse(_))));
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("01:02:03.500").unwrap(), 3723.5);
        assert_eq!(parse_timestamp("02:03.250").unwrap(), 123.25);
        assert!(parse_timestamp("3.0").is_err());
    }
}
