//! String formatting shared by the list rows and the graph view.

use chrono::{DateTime, Utc};

const ELLIPSIS: char = '…';
const BARS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Shorten an issue ID to at most `max_len` chars.
///
/// IDs with more than two underscore-separated segments are abbreviated
/// to the first letter of each leading segment plus as much of the last
/// segment as fits (`proj_feature_auth_login` -> `p_f_a_log…`). Anything
/// else, or an abbreviation that still does not fit, is cut to
/// `max_len - 1` chars plus `…`.
pub fn smart_truncate_id(id: &str, max_len: usize) -> String {
    let len = id.chars().count();
    if len <= max_len {
        return id.to_string();
    }
    if max_len == 0 {
        return String::new();
    }

    let parts: Vec<&str> = id.split('_').collect();
    if parts.len() > 2 {
        if let Some(abbrev) = abbreviate(&parts, max_len) {
            return abbrev;
        }
    }

    let mut out: String = id.chars().take(max_len - 1).collect();
    out.push(ELLIPSIS);
    out
}

fn abbreviate(parts: &[&str], max_len: usize) -> Option<String> {
    let (last, leading) = parts.split_last()?;
    let mut abbrev = String::new();
    let mut used = 0;

    for part in leading {
        if let Some(first) = part.chars().next() {
            abbrev.push(first);
            abbrev.push('_');
            used += 2;
        }
    }

    let remaining = max_len.saturating_sub(used);
    if remaining > 0 {
        let last_len = last.chars().count();
        if last_len <= remaining {
            abbrev.push_str(last);
            used += last_len;
        } else {
            abbrev.extend(last.chars().take(remaining - 1));
            abbrev.push(ELLIPSIS);
            used += remaining;
        }
    }

    (used <= max_len).then_some(abbrev)
}

/// Human-readable elapsed time from `then` to `now`
pub fn format_time_rel(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 60 {
        return "now".to_string();
    }
    let minutes = secs / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else if days < 30 {
        format!("{}w ago", days / 7)
    } else if days < 365 {
        format!("{}mo ago", days / 30)
    } else {
        format!("{}y ago", days / 365)
    }
}

/// Fixed-width bar for a value in [0, 1], filled left to right in
/// eighth-cell steps.
pub fn sparkline(value: f64, width: usize) -> String {
    let value = if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    };
    let filled = value * width as f64;
    (0..width)
        .map(|cell| {
            let level = (filled - cell as f64).clamp(0.0, 1.0);
            BARS[(level * 8.0).round() as usize]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_short_ids_pass_through() {
        assert_eq!(smart_truncate_id("bd-12", 10), "bd-12");
        assert_eq!(smart_truncate_id("", 3), "");
        assert_eq!(smart_truncate_id("exactly_ten", 11), "exactly_ten");
    }

    #[test]
    fn test_abbreviates_multi_segment_ids() {
        let out = smart_truncate_id("proj_feature_auth_login", 10);
        assert_eq!(out, "p_f_a_log…");
        assert!(out.chars().count() <= 10);

        assert_eq!(smart_truncate_id("beads_core_parser", 12), "b_c_parser");
    }

    #[test]
    fn test_two_segments_fall_back_to_plain_truncation() {
        assert_eq!(smart_truncate_id("beads_corefeature", 8), "beads_c…");
    }

    #[test]
    fn test_overlong_abbreviation_is_discarded() {
        // Eight leading segments already need 16 chars
        let id = "a_b_c_d_e_f_g_h_tail";
        assert_eq!(smart_truncate_id(id, 6), "a_b_c…");
    }

    #[test]
    fn test_truncation_is_char_safe() {
        let out = smart_truncate_id("ñandú-ñandú-ñandú", 6);
        assert_eq!(out, "ñandú…");
    }

    #[test]
    fn test_truncated_length_never_exceeds_limit() {
        let ids = [
            "proj_feature_auth_login",
            "a_b",
            "x__y__z",
            "_leading_underscore_id",
            "beads-viewer-0042",
            "αβγ_δεζ_ηθι_κλμ",
        ];
        for id in ids {
            for n in 1..=id.chars().count() + 1 {
                let out = smart_truncate_id(id, n);
                assert!(out.chars().count() <= n, "{id} at {n} gave {out}");
                if id.chars().count() <= n {
                    assert_eq!(out, id);
                }
            }
        }
    }

    #[test]
    fn test_format_time_rel_buckets() {
        let now = Utc::now();
        assert_eq!(format_time_rel(now, now), "now");
        assert_eq!(format_time_rel(now + Duration::hours(1), now), "now");
        assert_eq!(format_time_rel(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_time_rel(now - Duration::hours(3), now), "3h ago");
        assert_eq!(format_time_rel(now - Duration::days(2), now), "2d ago");
        assert_eq!(format_time_rel(now - Duration::days(15), now), "2w ago");
        assert_eq!(format_time_rel(now - Duration::days(90), now), "3mo ago");
        assert_eq!(format_time_rel(now - Duration::days(800), now), "2y ago");
    }

    #[test]
    fn test_sparkline_fills_proportionally() {
        assert_eq!(sparkline(0.0, 4), "    ");
        assert_eq!(sparkline(1.0, 4), "████");
        assert_eq!(sparkline(0.5, 4), "██  ");
        assert_eq!(sparkline(2.0, 4), "████");
        assert_eq!(sparkline(f64::NAN, 2), "  ");
        assert_eq!(sparkline(0.3, 4).chars().count(), 4);
    }
}
