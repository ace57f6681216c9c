use html_escape::encode_text;
use serde::Serialize;

use crate::WeekPlan;

pub const CSV_HEADER: [&str; 8] = [
    "Day",
    "Exercise",
    "Movement Pattern",
    "Sets",
    "Reps",
    "Rest (s)",
    "Notes",
    "Equipment",
];

/// One line of a tabular plan export. Absent values are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRow {
    #[serde(rename = "Day")]
    pub day: String,
    #[serde(rename = "Exercise")]
    pub exercise: String,
    #[serde(rename = "Movement Pattern")]
    pub movement_pattern: String,
    #[serde(rename = "Sets")]
    pub sets: String,
    #[serde(rename = "Reps")]
    pub reps: String,
    #[serde(rename = "Rest (s)")]
    pub rest_s: String,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "Equipment")]
    pub equipment: String,
}

fn text<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[must_use]
pub fn plan_rows(plan: &WeekPlan) -> Vec<PlanRow> {
    plan.days()
        .flat_map(|(day, items)| {
            items.iter().map(move |item| PlanRow {
                day: day.to_string(),
                exercise: item.name.clone(),
                movement_pattern: text(item.movement_pattern),
                sets: text(item.sets),
                reps: text(item.reps.as_ref()),
                rest_s: text(item.rest_s),
                notes: text(item.notes.as_ref()),
                equipment: text(item.equipment.as_ref()),
            })
        })
        .collect()
}

/// Renders a standalone HTML document with one table row per exercise.
#[must_use]
pub fn render_html(title: &str, plan: &WeekPlan) -> String {
    let title = encode_text(title);
    let mut html = format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>body{{font-family:sans-serif}}table{{border-collapse:collapse}}\
         td,th{{border:1px solid #ccc;padding:4px 8px;text-align:left}}</style>\n\
         </head>\n<body>\n<h1>{title}</h1>\n<table>\n\
         <tr><th>Day</th><th>Exercise</th><th>Pattern</th><th>Sets</th><th>Reps</th>\
         <th>Rest(s)</th><th>Notes</th></tr>\n"
    );
    html.extend(plan_rows(plan).iter().map(|row| {
        format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            encode_text(&row.day),
            encode_text(&row.exercise),
            encode_text(&row.movement_pattern),
            encode_text(&row.sets),
            encode_text(&row.reps),
            encode_text(&row.rest_s),
            encode_text(&row.notes),
        )
    }));
    html.push_str("</table>\n</body>\n</html>\n");
    html
}
