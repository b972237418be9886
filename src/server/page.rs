//! HTML rendering of a selection

use crate::selector::SelectionResult;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Bankruptcy Prediction Explorer</title>
    <style>
        body{font-family:system-ui,sans-serif;background:#111827;color:#f3f4f6;margin:0;padding:2rem}
        main{max-width:56rem;margin:0 auto}
        table{width:100%;border-collapse:collapse;margin:1.5rem 0}
        th,td{padding:.5rem .75rem;border-bottom:1px solid #374151;text-align:left}
        td.value{text-align:right;font-variant-numeric:tabular-nums}
        .labels{display:flex;gap:1rem;align-items:center}
        .badge{padding:.25rem .75rem;border-radius:9999px;font-size:.875rem}
        .match{background:#065f46}.mismatch{background:#991b1b}
        button{background:#2563eb;color:#fff;border:0;border-radius:.375rem;padding:.5rem 1rem;cursor:pointer}
        .muted{color:#9ca3af;font-size:.875rem}
    </style>
</head>
<body>
<main>
    <h1>Bankruptcy Prediction Explorer</h1>
"#;

const PAGE_TAIL: &str = r#"</main>
</body>
</html>
"#;

/// Render the page for one selected company
pub fn render_selection(result: &SelectionResult) -> String {
    let mut html = String::with_capacity(PAGE_HEAD.len() + PAGE_TAIL.len() + 2048);
    html.push_str(PAGE_HEAD);

    html.push_str(&format!(
        "    <p class=\"muted\">Company #{}</p>\n",
        result.index
    ));

    html.push_str("    <table>\n        <thead><tr><th>Feature</th><th>Value</th></tr></thead>\n        <tbody>\n");
    for feature in &result.features {
        html.push_str(&format!(
            "            <tr><td>{}</td><td class=\"value\">{}</td></tr>\n",
            escape_html(&feature.name),
            format_value(feature.value)
        ));
    }
    html.push_str("        </tbody>\n    </table>\n");

    let (badge_class, badge_text) = if result.prediction_matches() {
        ("match", "Correct prediction")
    } else {
        ("mismatch", "Wrong prediction")
    };
    html.push_str(&format!(
        "    <div class=\"labels\">\n        <span>Bankrupt: <strong>{}</strong></span>\n        <span>Predicted: <strong>{}</strong></span>\n        <span class=\"badge {}\">{}</span>\n    </div>\n",
        escape_html(&result.y_true.to_string()),
        escape_html(&result.y_pred.to_string()),
        badge_class,
        badge_text
    ));

    html.push_str(&format!(
        "    <form method=\"post\" action=\"/\">\n        <input type=\"hidden\" name=\"index\" value=\"{}\">\n        <p><button type=\"submit\">Show another company</button></p>\n    </form>\n",
        result.index
    ));

    html.push_str(PAGE_TAIL);
    html
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.2}", value)
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Label;
    use crate::selector::{FeatureValue, SelectionOutcome};

    fn result() -> SelectionResult {
        SelectionResult {
            index: 17,
            features: vec![
                FeatureValue { name: "Debt ratio %".to_string(), value: 0.1 },
                FeatureValue { name: "A<B & \"C\"".to_string(), value: f64::NAN },
            ],
            y_true: Label::Integer(1),
            y_pred: Label::Integer(0),
            outcome: SelectionOutcome::Fresh { attempts: 1 },
        }
    }

    #[test]
    fn test_render_contains_index_and_values() {
        let html = render_selection(&result());
        assert!(html.contains("name=\"index\" value=\"17\""));
        assert!(html.contains("<td>Debt ratio %</td><td class=\"value\">0.10</td>"));
        assert!(html.contains("<td class=\"value\">nan</td>"));
        assert!(html.contains("Wrong prediction"));
    }

    #[test]
    fn test_render_escapes_names() {
        let html = render_selection(&result());
        assert!(html.contains("A&lt;B &amp; &quot;C&quot;"));
        assert!(!html.contains("A<B"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href='x'>&</a>"), "&lt;a href=&#39;x&#39;&gt;&amp;&lt;/a&gt;");
    }
}
