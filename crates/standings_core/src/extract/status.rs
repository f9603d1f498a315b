use super::payload::RawStatusType;

/// `completed` is authoritative when present; `state == "post"` is the
/// fallback (postponed games are "post" but not completed).
pub(super) fn is_finished(status: &RawStatusType) -> bool {
    match status.completed {
        Some(completed) => completed,
        None => status.state.as_deref().is_some_and(|s| s.eq_ignore_ascii_case("post")),
    }
}

pub(super) fn went_to_extra_time(status: &RawStatusType) -> bool {
    [&status.detail, &status.short_detail, &status.name]
        .into_iter()
        .flatten()
        .any(|text| has_extra_time_marker(text))
}

/// Matches `Final/OT`, `Final/2OT`, `Final/SO`, `STATUS_FINAL_OT`,
/// `Final (Overtime)` and the like, token by token.
fn has_extra_time_marker(text: &str) -> bool {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_ascii_uppercase())
        .any(|token| match token.as_str() {
            "OT" | "SO" | "OVERTIME" | "SHOOTOUT" => true,
            t => t.strip_suffix("OT").is_some_and(|prefix| {
                !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit())
            }),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(completed: Option<bool>, state: Option<&str>) -> RawStatusType {
        RawStatusType {
            completed,
            state: state.map(str::to_string),
            name: None,
            detail: None,
            short_detail: None,
        }
    }

    #[test]
    fn test_extra_time_markers() {
        assert!(has_extra_time_marker("Final/OT"));
        assert!(has_extra_time_marker("Final/2OT"));
        assert!(has_extra_time_marker("Final/SO"));
        assert!(has_extra_time_marker("final - shootout"));
        assert!(has_extra_time_marker("STATUS_FINAL_OT"));
        assert!(!has_extra_time_marker("Final"));
        assert!(!has_extra_time_marker("STATUS_FINAL"));
        assert!(!has_extra_time_marker("Sold out"));
        assert!(!has_extra_time_marker("Boston"));
        assert!(!has_extra_time_marker(""));
    }

    #[test]
    fn test_finished() {
        assert!(is_finished(&status(Some(true), Some("in"))));
        assert!(!is_finished(&status(Some(false), Some("post"))));
        assert!(is_finished(&status(None, Some("post"))));
        assert!(!is_finished(&status(None, Some("pre"))));
        assert!(!is_finished(&status(None, None)));
    }
}
