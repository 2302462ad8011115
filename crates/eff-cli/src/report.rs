//! Plain-text dashboard report
//!
//! Reads a canonical v1 document leniently (every field has a display
//! default) and lays it out as the dashboard sections: overview, earnings
//! readiness, signals, scenarios, explainability and diagnostics.

use eff_adapter::lookup::{is_truthy, render_text, section};
use eff_schema::{MISSING, UNKNOWN_CONFIDENCE, UNKNOWN_POSTURE};
use serde_json::{Map, Value};

use crate::config::DashboardConfig;

/// Signal panels: title, category key, key metric rows
const SIGNAL_PANELS: [(&str, &str, &[(&str, &str)]); 3] = [
    (
        "Demand",
        "demand",
        &[
            ("Orders trend", "orders_trend"),
            ("Demand stability", "demand_stability"),
            ("Repeat strength", "repeat_strength"),
            ("Preorder coverage", "preorder_coverage"),
            ("Volatility flag", "volatility_flag"),
        ],
    ),
    (
        "Capacity",
        "capacity",
        &[
            ("Capacity utilization", "capacity_utilization"),
            ("Max utilization", "max_capacity_utilization"),
            ("Delivery reliability", "delivery_reliability"),
            ("Capacity constrained", "capacity_constraint_flag"),
        ],
    ),
    (
        "Risk",
        "risk",
        &[
            ("Top-3 customer share", "avg_top3_customer_share"),
            ("Std/mean orders", "std_over_mean_orders"),
        ],
    ),
];

/// Scenario cards in display order
const SCENARIO_ORDER: [(&str, &str); 3] = [("Base", "base"), ("Upside", "upside"), ("Downside", "downside")];

/// Render a canonical document as text
#[must_use]
pub fn render(doc: &Value, config: &DashboardConfig) -> String {
    let empty = Map::new();
    let root = doc.as_object().unwrap_or(&empty);
    let mut out = String::new();

    overview(&mut out, root);
    readiness(&mut out, root, config);
    signals(&mut out, root, config);
    scenarios(&mut out, root, config);
    explainability(&mut out, root);
    diagnostics(&mut out, root);

    out
}

fn text_or(map: &Map<String, Value>, key: &str, default: &str) -> String {
    map.get(key).map_or_else(|| default.to_string(), render_text)
}

fn string_list<'a>(map: &'a Map<String, Value>, key: &str) -> Vec<&'a Value> {
    match map.get(key) {
        Some(Value::Array(items)) => items.iter().collect(),
        _ => Vec::new(),
    }
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn heading(out: &mut String, title: &str) {
    line(out, &format!("\n{title}\n{}", "=".repeat(title.chars().count())));
}

fn overview(out: &mut String, root: &Map<String, Value>) {
    let posture = text_or(root, "posture", UNKNOWN_POSTURE);
    let headline = text_or(root, "headline", "");
    let window = root.get("window_weeks").map_or_else(|| "8".to_string(), render_text);

    line(out, "EFF — Earned Future Financing");
    line(out, "Explainable earnings readiness & risk signals. Not forecasting.");
    heading(out, "Business Overview");
    line(out, &format!("[{}]", text_or(root, "business_id", MISSING)));
    line(out, &format!("EFF Assessment: {posture}"));
    if !headline.is_empty() {
        line(out, &headline);
    }
    let confidence = root
        .get("confidence")
        .map_or_else(|| title_case(UNKNOWN_CONFIDENCE), |v| normalize_label(Some(v)));
    line(out, &format!("Confidence: {confidence} | Window: {window} weeks"));
}

fn readiness(out: &mut String, root: &Map<String, Value>, config: &DashboardConfig) {
    let narrative = section(root, "narrative");
    heading(out, "Earnings Readiness");
    line(out, &text_or(root, "posture", UNKNOWN_POSTURE));

    let headline = text_or(root, "headline", "");
    if !headline.is_empty() {
        line(out, &headline);
    }
    let summary = text_or(narrative, "summary", "");
    if !summary.trim().is_empty() {
        line(out, &clamp(&summary, config.summary_chars));
    }
    let drivers = string_list(narrative, "drivers");
    if !drivers.is_empty() {
        line(out, "Decision drivers");
        for driver in drivers.into_iter().take(config.max_drivers) {
            line(out, &format!("  • {}", clamp(&render_text(driver), config.driver_chars)));
        }
    }
}

fn signals(out: &mut String, root: &Map<String, Value>, config: &DashboardConfig) {
    let signals = section(root, "signals");
    let features = section(section(root, "explainability"), "features");
    heading(out, "Signals");

    for (title, key, metrics) in SIGNAL_PANELS {
        let panel = section(signals, key);
        line(out, &format!("\n{title}"));
        line(out, &format!("  {}", text_or(panel, "assessment", MISSING)));

        if !features.is_empty() {
            line(out, "  Key metrics");
            for (label, feature) in metrics {
                line(out, &format!("    • {label}: {}", fmt_value(features.get(*feature))));
            }
        }
        for (label, list_key) in [("Key factors", "key_factors"), ("Risks / constraints", "risks_or_constraints")] {
            let items = string_list(panel, list_key);
            if items.is_empty() {
                continue;
            }
            line(out, &format!("  {label}"));
            for item in items.into_iter().take(config.max_list_items) {
                line(out, &format!("    • {}", render_text(item)));
            }
        }
    }
}

fn scenarios(out: &mut String, root: &Map<String, Value>, config: &DashboardConfig) {
    let scenarios = section(root, "scenarios");
    heading(out, "Decision Scenarios");

    for (title, key) in SCENARIO_ORDER {
        let scenario = section(scenarios, key);
        line(out, &format!("\n{title}"));
        line(out, &format!("  Earnings outlook: {}", normalize_label(scenario.get("earnings_direction"))));
        line(out, &format!("  Confidence: {}", normalize_label(scenario.get("confidence"))));

        let drivers = string_list(scenario, "primary_drivers");
        if !drivers.is_empty() {
            line(out, "  Primary drivers:");
            for driver in drivers.into_iter().take(config.max_scenario_drivers) {
                line(out, &format!("    • {}", render_text(driver)));
            }
        }
        let explanation = text_or(scenario, "explanation", "");
        if !explanation.trim().is_empty() {
            line(out, &format!("  {}", explanation.trim()));
        }
    }
}

fn explainability(out: &mut String, root: &Map<String, Value>) {
    let features = section(section(root, "explainability"), "features");
    heading(out, "Explainability");

    if features.is_empty() {
        line(out, "No features found.");
        return;
    }
    let mut rows: Vec<_> = features.iter().collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));
    let width = rows.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
    for (name, value) in rows {
        line(out, &format!("  {name:<width$}  {}", fmt_value(Some(value))));
    }
}

fn diagnostics(out: &mut String, root: &Map<String, Value>) {
    let diagnostics = section(root, "diagnostics");
    heading(out, "Diagnostics");

    line(out, "Rules fired");
    let rules = string_list(diagnostics, "rules_fired");
    if rules.is_empty() {
        line(out, &format!("  {MISSING}"));
    }
    for rule in rules {
        line(out, &format!("  • {}", render_text(rule)));
    }

    line(out, "Flags");
    let flags = diagnostics
        .get("flags")
        .filter(|v| is_truthy(v))
        .map_or_else(|| MISSING.to_string(), Value::to_string);
    line(out, &format!("  {flags}"));
}

/// Trimmed, title-cased label; absent, null or blank renders as `—`
#[must_use]
pub fn normalize_label(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => MISSING.to_string(),
        Some(Value::String(s)) => title_case(s.trim()),
        Some(other) => other.to_string(),
    }
}

/// Feature display: two decimals for numbers, Yes/No for flags
#[must_use]
pub fn fmt_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(Value::Bool(true)) => "Yes".to_string(),
        Some(Value::Bool(false)) => "No".to_string(),
        Some(Value::Number(n)) => n.as_f64().map_or_else(|| n.to_string(), |f| format!("{f:.2}")),
        Some(other) => render_text(other),
    }
}

/// Trim and cut to `max` characters at a word boundary, marking the cut with `…`
#[must_use]
pub fn clamp(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    let kept = cut.rsplit_once(' ').map_or(cut.as_str(), |(head, _)| head);
    format!("{kept}…")
}

/// Upper-case the first letter of each word, lower-case the rest
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for ch in text.chars() {
        if prev_is_letter {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        prev_is_letter = ch.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn labels() {
        assert_eq!(normalize_label(Some(&json!("  capacity-limited "))), "Capacity-Limited");
        assert_eq!(normalize_label(Some(&json!("MEDIUM"))), "Medium");
        assert_eq!(normalize_label(Some(&json!("   "))), "—");
        assert_eq!(normalize_label(None), "—");
        assert_eq!(normalize_label(Some(&json!(3))), "3");
    }

    #[test]
    fn feature_values() {
        assert_eq!(fmt_value(Some(&json!(0.8512))), "0.85");
        assert_eq!(fmt_value(Some(&json!(3))), "3.00");
        assert_eq!(fmt_value(Some(&json!(true))), "Yes");
        assert_eq!(fmt_value(Some(&json!(false))), "No");
        assert_eq!(fmt_value(None), "—");
        assert_eq!(fmt_value(Some(&json!("manual"))), "manual");
    }

    #[test]
    fn clamp_cuts_at_word_boundary() {
        assert_eq!(clamp("  short  ", 10), "short");
        assert_eq!(clamp("the quick brown fox", 12), "the quick…");
        assert_eq!(clamp("abcdefghij", 4), "abcd…");
    }

    #[test]
    fn empty_document_renders_placeholders() {
        let text = render(&json!({}), &DashboardConfig::default());
        assert!(text.contains("[—]"));
        assert!(text.contains("EFF Assessment: Unknown"));
        assert!(text.contains("Confidence: Unknown | Window: 8 weeks"));
        assert!(text.contains("No features found."));
        assert!(text.contains("Earnings outlook: —"));
    }

    #[test]
    fn sections_are_underlined_lines() {
        let doc = json!({"diagnostics": {"flags": {"stale": true}}});
        let text = render(&doc, &DashboardConfig::default());
        assert!(text.starts_with("EFF — Earned Future Financing\n"));
        assert!(text.contains("\nDiagnostics\n===========\nRules fired\n  —\nFlags\n"));
        assert!(text.ends_with("  {\"stale\":true}\n"));
    }

    #[test]
    fn non_object_document_renders_placeholders() {
        let text = render(&json!([1, 2]), &DashboardConfig::default());
        assert!(text.contains("EFF Assessment: Unknown"));
    }

    #[test]
    fn drivers_and_lists_are_limited() {
        let doc = json!({
            "narrative": {"drivers": ["one", "two", "three"]},
            "signals": {"demand": {"key_factors": ["a", "b", "c", "d"]}}
        });
        let config = DashboardConfig {
            max_list_items: 2,
            ..DashboardConfig::default()
        };
        let text = render(&doc, &config);
        assert!(text.contains("• two"));
        assert!(!text.contains("• three"));
        assert!(text.contains("• b"));
        assert!(!text.contains("• c"));
    }

    #[test]
    fn features_sorted_and_formatted() {
        let doc = json!({"explainability": {"features": {
            "utilization": 0.92,
            "capacity_constraint_flag": true
        }}});
        let text = render(&doc, &DashboardConfig::default());
        let flag = text.find("capacity_constraint_flag").unwrap();
        let util = text.find("utilization  ").unwrap();
        assert!(flag < util);
        assert!(text.contains("Capacity constrained: Yes"));
        assert!(text.contains("Capacity utilization: —"));
    }
}
