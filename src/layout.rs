// src/layout.rs

//! Page layout: a small component tree (served as JSON) and its HTML
//! rendering with the script that wires the controls to `/_update`.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::callbacks::OUTPUT_CONTAINER_ID;
use crate::selector::{
    self, DropdownOption, REPORT_TYPE_ID, YEAR_CONTAINER_ID, YEAR_ID,
};

pub const TITLE: &str = "Automobile Sales Statistics Dashboard";
const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

pub type Style = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Component {
    H1 {
        text: String,
        style: Style,
    },
    Dropdown {
        id: &'static str,
        options: Vec<DropdownOption>,
        placeholder: &'static str,
        style: Style,
    },
    Div {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<&'static str>,
        #[serde(rename = "className", skip_serializing_if = "Option::is_none")]
        class_name: Option<&'static str>,
        children: Vec<Component>,
        style: Style,
    },
}

fn style(pairs: &[(&'static str, &str)]) -> Style {
    pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
}

fn dropdown_style() -> Style {
    style(&[
        ("width", "100%"),
        ("padding", "3px"),
        ("font-size", "20px"),
        ("text-align-last", "center"),
    ])
}

/// Title, both controls, and the empty output container.
pub fn app_layout() -> Component {
    let year_display = selector::year_container_display(None);

    Component::Div {
        id: None,
        class_name: None,
        style: Style::new(),
        children: vec![
            Component::H1 {
                text: TITLE.to_string(),
                style: style(&[
                    ("text-align", "center"),
                    ("color", "#503D36"),
                    ("font-size", "25px"),
                ]),
            },
            Component::Dropdown {
                id: REPORT_TYPE_ID,
                options: selector::report_type_options(),
                placeholder: "Select a report type",
                style: dropdown_style(),
            },
            Component::Div {
                id: Some(YEAR_CONTAINER_ID),
                class_name: None,
                style: style(&[("display", year_display.as_css())]),
                children: vec![Component::Dropdown {
                    id: YEAR_ID,
                    options: selector::year_options(),
                    placeholder: "Select year",
                    style: dropdown_style(),
                }],
            },
            Component::Div {
                id: Some(OUTPUT_CONTAINER_ID),
                class_name: Some("chart-grid"),
                style: style(&[
                    ("display", "flex"),
                    ("flex-wrap", "wrap"),
                    ("justify-content", "center"),
                ]),
                children: Vec::new(),
            },
        ],
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn style_attr(style: &Style) -> String {
    if style.is_empty() {
        return String::new();
    }
    let css: Vec<String> = style.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
    format!(r#" style="{}""#, html_escape(&css.join("; ")))
}

fn render_component(c: &Component, out: &mut String) {
    match c {
        Component::H1 { text, style } => {
            out.push_str(&format!("<h1{}>{}</h1>\n", style_attr(style), html_escape(text)));
        }
        Component::Dropdown {
            id,
            options,
            placeholder,
            style,
        } => {
            out.push_str(&format!(r#"<select id="{}"{}>"#, id, style_attr(style)));
            out.push_str(&format!(
                r#"<option value="" selected>{}</option>"#,
                html_escape(placeholder)
            ));
            for opt in options {
                out.push_str(&format!(
                    r#"<option value="{}">{}</option>"#,
                    html_escape(&opt.value),
                    html_escape(&opt.label)
                ));
            }
            out.push_str("</select>\n");
        }
        Component::Div {
            id,
            class_name,
            children,
            style,
        } => {
            out.push_str("<div");
            if let Some(id) = id {
                out.push_str(&format!(r#" id="{}""#, id));
            }
            if let Some(class) = class_name {
                out.push_str(&format!(r#" class="{}""#, class));
            }
            out.push_str(&style_attr(style));
            out.push_str(">\n");
            for child in children {
                render_component(child, out);
            }
            out.push_str("</div>\n");
        }
    }
}

fn inline_javascript() -> String {
    format!(
        r#"
const CONTROLS = ["{report}", "{year}"];

function currentInputs() {{
    const inputs = {{}};
    for (const id of CONTROLS) {{
        const v = document.getElementById(id).value;
        inputs[id] = v === "" ? null : v;
    }}
    return inputs;
}}

function applyChildren(el, panels) {{
    el.replaceChildren();
    for (const panel of panels) {{
        const div = document.createElement("div");
        div.className = panel.className;
        Object.assign(div.style, panel.style);
        for (const fig of panel.figures) {{
            const graph = document.createElement("div");
            div.appendChild(graph);
            Plotly.newPlot(graph, fig.data, fig.layout, {{ responsive: true }});
        }}
        el.appendChild(div);
    }}
}}

// Per output: generation of the request whose value is on screen.
// A response only loses to a newer response for the same output.
let generation = 0;
const applied = {{}};

async function update(changed) {{
    const mine = ++generation;
    const resp = await fetch("/_update", {{
        method: "POST",
        headers: {{ "Content-Type": "application/json" }},
        body: JSON.stringify({{ changed, inputs: currentInputs() }}),
    }});
    if (!resp.ok) return;
    const body = await resp.json();
    for (const out of body.outputs) {{
        const key = out.id + "." + out.property;
        if ((applied[key] ?? 0) > mine) continue;
        applied[key] = mine;
        const el = document.getElementById(out.id);
        if (out.property === "style") Object.assign(el.style, out.value);
        else if (out.property === "children") applyChildren(el, out.value);
    }}
}}

for (const id of CONTROLS) {{
    document.getElementById(id).addEventListener("change", () => update([id]));
}}
update([]);
"#,
        report = REPORT_TYPE_ID,
        year = YEAR_ID,
    )
}

/// Full HTML page for `/`.
pub fn render_page(layout: &Component) -> String {
    let mut body = String::new();
    render_component(layout, &mut body);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{plotly}"></script>
    <style>
        body {{ font-family: system-ui, -apple-system, sans-serif; margin: 0; padding: 20px; }}
        .chart-item {{ box-sizing: border-box; min-width: 400px; }}
    </style>
</head>
<body>
{body}
<script>{js}</script>
</body>
</html>"#,
        title = html_escape(TITLE),
        plotly = PLOTLY_CDN,
        body = body,
        js = inline_javascript(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(c: &'a Component, want: &str) -> Option<&'a Component> {
        match c {
            Component::Dropdown { id, .. } if *id == want => Some(c),
            Component::Div { id: Some(id), .. } if *id == want => Some(c),
            Component::Div { children, .. } => children.iter().find_map(|ch| find(ch, want)),
            _ => None,
        }
    }

    #[test]
    fn layout_holds_controls_and_containers() {
        let layout = app_layout();
        for id in [REPORT_TYPE_ID, YEAR_ID, YEAR_CONTAINER_ID, OUTPUT_CONTAINER_ID] {
            assert!(find(&layout, id).is_some(), "missing {}", id);
        }

        match find(&layout, YEAR_CONTAINER_ID) {
            Some(Component::Div { style, .. }) => assert_eq!(style["display"], "none"),
            other => panic!("unexpected {:?}", other),
        }
        match find(&layout, OUTPUT_CONTAINER_ID) {
            Some(Component::Div { children, .. }) => assert!(children.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn layout_serializes_with_type_tags() {
        let json = serde_json::to_value(app_layout()).unwrap();
        assert_eq!(json["type"], "Div");
        assert_eq!(json["children"][0]["type"], "H1");
        assert_eq!(json["children"][0]["text"], TITLE);
        assert_eq!(json["children"][1]["id"], REPORT_TYPE_ID);
        assert_eq!(json["children"][3]["className"], "chart-grid");
    }

    #[test]
    fn page_renders_selects_with_placeholders() {
        let page = render_page(&app_layout());
        assert!(page.contains(r#"<select id="dropdown-statistics""#));
        assert!(page.contains(r#"<option value="Recession">Recession Period Statistics</option>"#));
        assert!(page.contains(r#"<option value="" selected>Select year</option>"#));
        assert!(page.contains(r#"<option value="2023">2023</option>"#));
        assert!(!page.contains(r#"<option value="2024">"#));
        assert!(page.contains(r#"id="select-year-container" style="display: none""#));
        assert!(page.contains("plotly"));
    }

    #[test]
    fn stale_responses_are_dropped_per_output() {
        let js = inline_javascript();
        assert!(js.contains("applied[key] = mine"));
        assert!(js.contains("if ((applied[key] ?? 0) > mine) continue;"));
        assert!(!js.contains("mine !== generation"));
    }

    #[test]
    fn escapes_text() {
        assert_eq!(html_escape(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
