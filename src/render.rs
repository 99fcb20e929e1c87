//! HTML rendering
//!
//! Pages are assembled with plain string formatting around a shared shell;
//! there is no template engine. Styling lives in /static/style.css.

use crate::dataset::TableView;
use crate::risk::RiskScore;

const NAV_TABS: [(&str, &str); 5] = [
    ("/", "Home"),
    ("/risk", "Risk Assessment"),
    ("/cei", "CEI Data"),
    ("/employment", "Employment Data"),
    ("/ml", "ML Risk Assessment"),
];

/// Escape text for safe interpolation into HTML
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn nav(active: &str) -> String {
    let links: String = NAV_TABS
        .iter()
        .map(|(href, label)| {
            let class = if *href == active { " class=\"active\"" } else { "" };
            format!("<a href=\"{href}\"{class}>{label}</a>")
        })
        .collect();
    format!("<nav>{links}</nav>")
}

fn page(title: &str, active: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Community Risk Portal</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <div class="container">
        <h1>Community Risk &amp; Equity Portal</h1>
        {nav}
        {body}
    </div>
</body>
</html>"#,
        title = escape(title),
        nav = nav(active),
        body = body,
    )
}

fn options(items: &[impl AsRef<str>], selected: Option<&str>) -> String {
    items
        .iter()
        .map(|item| {
            let value = escape(item.as_ref());
            let flag = if Some(item.as_ref()) == selected {
                " selected"
            } else {
                ""
            };
            format!("<option value=\"{value}\"{flag}>{value}</option>")
        })
        .collect()
}

pub fn home_page() -> String {
    let body = r#"<p>Explore community risk and equity indicators, compute a
        site risk assessment, or run the pre-trained ML risk model.</p>
        <ul>
            <li><a href="/risk">Risk Assessment</a> - likelihood and consequence for a property type within a community</li>
            <li><a href="/cei">CEI Data</a> - Community Equity Index scores</li>
            <li><a href="/employment">Employment Data</a> - labour force indicators</li>
            <li><a href="/ml">ML Risk Assessment</a> - model-predicted risk score</li>
        </ul>"#;
    page("Home", "/", body)
}

pub fn risk_page(
    property_types: &[&str],
    communities: &[String],
    result: Option<(RiskScore, &str)>,
) -> String {
    let form = format!(
        r#"<form method="post" action="/risk">
            <label for="property_type">Property type</label>
            <select id="property_type" name="property_type">{property_options}</select>
            <label for="community">Community</label>
            <select id="community" name="community">{community_options}</select>
            <button type="submit">Assess Risk</button>
        </form>"#,
        property_options = options(property_types, None),
        community_options = options(communities, None),
    );

    let result_html = result.map_or_else(String::new, |(score, plot_uri)| {
        format!(
            r#"<div class="result">
            <p>Likelihood: <strong>{likelihood:.2}</strong> &middot; Consequence: <strong>{consequence:.2}</strong></p>
            <img src="{plot_uri}" alt="Risk scatter plot">
        </div>"#,
            likelihood = score.likelihood,
            consequence = score.consequence,
        )
    });

    page("Risk Assessment", "/risk", &format!("{form}{result_html}"))
}

pub fn table_page(title: &str, active: &str, view: &TableView) -> String {
    let headers: String = view
        .headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();

    let rows: String = view
        .rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| format!("<td>{}</td>", escape(cell)))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();

    let body = format!(
        r#"<table class="data-table" id="data_table">
            <thead><tr>{headers}</tr></thead>
            <tbody>{rows}</tbody>
        </table>"#
    );
    page(title, active, &body)
}

pub fn ml_page(
    communities: &[String],
    selected: Option<&str>,
    prediction: Option<&str>,
) -> String {
    let form = format!(
        r#"<form method="post" action="/ml">
            <label for="community_ml">Community</label>
            <select id="community_ml" name="community_ml">{community_options}</select>
            <button type="submit">Predict Risk</button>
        </form>"#,
        community_options = options(communities, selected),
    );

    let prediction_html = prediction.map_or_else(String::new, |msg| {
        format!("<div class=\"result\"><p>{}</p></div>", escape(msg))
    });

    page(
        "ML Risk Assessment",
        "/ml",
        &format!("{form}{prediction_html}"),
    )
}

pub fn error_page(status: u16, message: &str) -> String {
    let body = format!(
        "<div class=\"error\"><h2>Error {status}</h2><p>{}</p></div>",
        escape(message)
    );
    page("Error", "", &body)
}
