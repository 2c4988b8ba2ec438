//! Parsing of free-form form inputs.

use std::sync::OnceLock;

use regex::Regex;

use super::entities::{JobParams, TypeId};

fn digit_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{3,})").expect("static regex"))
}

fn leading_int() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").expect("static regex"))
}

/// Pulls a type id out of a raw id or a URL such as `https://everef.net/type/645`.
///
/// The first run of at least three digits wins.
pub fn extract_type_id(raw: &str) -> Option<TypeId> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    digit_run()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<TypeId>().ok())
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let caps = leading_int().captures(raw)?;
    let digits = caps.get(1)?.as_str();
    match digits.parse::<i64>() {
        Ok(value) => Some(value),
        // Overlong input: saturate in the direction of the sign.
        Err(_) if digits.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

fn clamp_u32(value: i64, floor: u32) -> u32 {
    value.clamp(floor as i64, u32::MAX as i64) as u32
}

/// Run count: defaults to 1 and never drops below 1.
pub fn parse_runs(raw: &str) -> u32 {
    clamp_u32(parse_leading_int(raw).unwrap_or(1), 1)
}

/// Efficiency level: defaults to 0 and never drops below 0.
pub fn parse_level(raw: &str) -> u32 {
    clamp_u32(parse_leading_int(raw).unwrap_or(0), 0)
}

pub fn parse_job_params(runs: &str, me: &str, te: &str) -> JobParams {
    JobParams {
        runs: parse_runs(runs),
        me: parse_level(me),
        te: parse_level(te),
    }
}

/// Picks the product to price: the selected hull, else an id typed by hand.
pub fn select_type_id(selected: Option<TypeId>, manual: &str) -> Option<TypeId> {
    selected.or_else(|| extract_type_id(manual))
}
