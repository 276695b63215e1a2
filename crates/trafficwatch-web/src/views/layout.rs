//! Page shell and navigation header

use super::{Notification, escape_html};

/// Navigation entries: path and label
pub const NAV_ITEMS: [(&str, &str); 4] = [
    ("/", "Dashboard"),
    ("/upload", "Upload"),
    ("/analytics", "Analytics"),
    ("/alerts", "Alerts"),
];

const STYLE: &str = r"
body { font-family: system-ui, sans-serif; margin: 0; background: #f9fafb; color: #111827; }
header { background: #fff; border-bottom: 1px solid #e5e7eb; }
.bar { max-width: 1200px; margin: 0 auto; padding: 0 1rem; display: flex; align-items: center; justify-content: space-between; height: 4rem; }
.brand { font-size: 1.25rem; font-weight: 700; }
nav a { margin-left: 1.5rem; padding: .5rem .75rem; border-radius: .375rem; color: #4b5563; text-decoration: none; font-size: .875rem; }
nav a.active { background: #dbeafe; color: #1d4ed8; }
main { max-width: 1200px; margin: 0 auto; padding: 2rem 1rem; }
.grid { display: grid; gap: 1.5rem; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); }
.grid.wide { grid-template-columns: repeat(auto-fit, minmax(420px, 1fr)); }
.card { background: #fff; border: 1px solid #e5e7eb; border-radius: .5rem; padding: 1.5rem; }
.metric-label { font-size: .875rem; color: #6b7280; }
.metric-value { font-size: 1.75rem; font-weight: 700; }
.badge { display: inline-block; padding: .125rem .625rem; border-radius: 9999px; font-size: .75rem; font-weight: 500; }
.badge.high { background: #fee2e2; color: #991b1b; }
.badge.medium { background: #fef3c7; color: #92400e; }
.badge.low { background: #d1fae5; color: #065f46; }
.badge.info { background: #f3f4f6; color: #1f2937; }
.alert { border: 1px solid #e5e7eb; border-radius: .5rem; padding: 1rem; margin-bottom: .75rem; }
.alert.high-priority { border-color: #fca5a5; background: #fef2f2; }
.alert.traffic-congestion { border-color: #fcd34d; background: #fffbeb; }
.muted { color: #6b7280; font-size: .875rem; }
.empty { text-align: center; padding: 2rem; color: #6b7280; }
.bars .row { display: flex; align-items: center; margin: .25rem 0; font-size: .8rem; }
.bars .label { width: 6rem; }
.bars .track { flex: 1; background: #f3f4f6; height: .9rem; border-radius: .25rem; }
.bars .fill { height: 100%; border-radius: .25rem; }
.bars .value { width: 4rem; text-align: right; }
.notification { padding: .75rem 1rem; border-radius: .375rem; margin-bottom: 1rem; }
.notification.success { background: #d1fae5; color: #065f46; }
.notification.error { background: #fee2e2; color: #991b1b; }
form.inline { display: inline; }
";

/// Navigation header, highlighting the entry for `active_path`
#[must_use]
pub fn header(active_path: &str) -> String {
    let links: String = NAV_ITEMS
        .iter()
        .map(|(path, label)| {
            let class = if *path == active_path { r#" class="active""# } else { "" };
            format!(r#"<a href="{path}"{class}>{label}</a>"#)
        })
        .collect();

    format!(
        r#"<header><div class="bar"><span class="brand">Traffic Prediction System</span><nav>{links}</nav></div></header>"#
    )
}

/// Full HTML document
#[must_use]
pub fn page(title: &str, active_path: &str, notification: Option<&Notification>, body: &str) -> String {
    let notification = notification.map(Notification::render).unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - Traffic Prediction System</title>
<style>{STYLE}</style>
</head>
<body>
{header}
<main>
{notification}
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
        header = header(active_path),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_marks_active_entry() {
        let html = header("/analytics");
        assert!(html.contains(r#"<a href="/analytics" class="active">Analytics</a>"#));
        assert!(html.contains(r#"<a href="/">Dashboard</a>"#));
        assert_eq!(html.matches("class=\"active\"").count(), 1);
    }

    #[test]
    fn test_page_includes_notification() {
        let note = Notification::success("Image uploaded and analysis started!");
        let html = page("Upload", "/upload", Some(&note), "<p>body</p>");
        assert!(html.contains("Image uploaded and analysis started!"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}
