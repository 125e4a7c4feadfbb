//! Body markup for the property panel.
//!
//! Only `"` is escaped in embedded values (as `&quot;`). Captions, tooltips,
//! option labels and `<`/`>`/`&` inside values go out verbatim.
// TODO: escape `<`, `>` and `&` in values and tooltips.

use super::props::Trigger;
use super::props_ui::{PropertyRow, Widget};
use super::surface::INPUT_CLASS;

pub fn escape_quotes(value: &str) -> String {
    value.replace('"', "&quot;")
}

fn widget_markup(row: &PropertyRow) -> String {
    let name = &row.name;
    let tooltip = &row.tooltip;
    match &row.widget {
        Widget::Display { text } => format!(r#"<span title="{tooltip}">{}</span>"#, escape_quotes(text)),
        Widget::TextArea { value } => format!(
            r#"<textarea class="{INPUT_CLASS}" name="{name}" style="width: 98%;" title="{tooltip}">{}</textarea>"#,
            escape_quotes(value)
        ),
        Widget::Number { value } => format!(
            r#"<input type="number" class="{INPUT_CLASS}" name="{name}" value="{}" title="{tooltip}" style="width: 98%;">"#,
            escape_quotes(value)
        ),
        Widget::Select { options, .. } => {
            let mut out = format!(r#"<select class="{INPUT_CLASS}" name="{name}" title="{tooltip}" style="width: 200px">"#);
            for opt in options {
                let selected = if opt.selected { " selected" } else { "" };
                out.push_str(&format!(
                    r#"<option value="{}"{}>{}</option>"#,
                    escape_quotes(&opt.value),
                    selected,
                    opt.label
                ));
            }
            out.push_str("</select>");
            out
        }
        Widget::Empty => String::new(),
    }
}

fn button_markup(trigger: &Trigger) -> String {
    format!(
        r#"<p style="text-align:center"><button id="{}">{}</button></p>"#,
        trigger.id, trigger.caption
    )
}

/// Property table followed by the trigger buttons.
///
/// The apply button comes right after the table; structural buttons are
/// fenced by rules.
pub fn panel_body(rows: &[PropertyRow], triggers: &[Trigger]) -> String {
    let mut out = String::from("<table>\n");
    out.push_str("<tr><td style=\"min-width: 80px\"></td><td style=\"\"></td></tr>\n");
    for row in rows {
        out.push_str(&format!(
            "<tr><td title=\"{}\">{}:</td><td>{}</td></tr>\n",
            row.tooltip,
            row.caption,
            widget_markup(row)
        ));
    }
    out.push_str("</table>\n");

    let (structural, plain): (Vec<&Trigger>, Vec<&Trigger>) = triggers.iter().partition(|t| t.is_structural());
    for trigger in plain {
        out.push_str(&button_markup(trigger));
        out.push('\n');
    }
    if !structural.is_empty() {
        out.push_str("<hr />\n");
        for trigger in structural {
            out.push_str(&button_markup(trigger));
            out.push('\n');
        }
        out.push_str("<hr />\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::props::surface::SelectOption;

    fn row(widget: Widget) -> PropertyRow {
        PropertyRow {
            name: "p".into(),
            caption: "Caption".into(),
            tooltip: "tip".into(),
            widget,
        }
    }

    #[test]
    fn test_escape_only_touches_quotes() {
        assert_eq!(escape_quotes(r#"a "quoted" <b> &quot;"#), "a &quot;quoted&quot; <b> &quot;");
    }

    #[test]
    fn test_number_markup_embeds_escaped_value() {
        let html = widget_markup(&row(Widget::Number { value: "1\"".into() }));
        assert!(html.contains(r#"value="1&quot;""#));
        assert!(html.contains(r#"class="propertyInput" name="p""#));
    }

    #[test]
    fn test_select_markup_marks_selected() {
        let html = widget_markup(&row(Widget::Select {
            options: vec![
                SelectOption { label: "Red".into(), value: "r".into(), selected: false },
                SelectOption { label: "Blue".into(), value: "b".into(), selected: true },
            ],
            fallback: "b".into(),
        }));
        assert!(html.contains(r#"<option value="r">Red</option>"#));
        assert!(html.contains(r#"<option value="b" selected>Blue</option>"#));
        assert!(html.ends_with("</select>"));
    }

    #[test]
    fn test_body_has_label_cell_without_rules() {
        let html = panel_body(&[row(Widget::Empty)], &[]);
        assert!(html.contains(r#"<tr><td title="tip">Caption:</td><td></td></tr>"#));
        assert!(!html.contains("<hr />"));
    }
}
