use crate::AppState;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use genoscope_model::{sequence_preview, Age, PatientMetadata, PatientName, Sex};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, info, warn};

pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title} - Genoscope</title></head><body>\
<h1>{title}</h1>\
<nav><a href=\"/\">Home</a> | <a href=\"/input\">Manual Input</a> | <a href=\"/upload\">Upload Genome File</a> | <a href=\"/history\">History</a></nav>\
{body}\
</body></html>"
    ))
}

/// One-shot notices arrive as a `notice` query parameter on the redirect and
/// render exactly once on the target page.
fn notice_banner(params: &HashMap<String, String>) -> &'static str {
    match params.get("notice").map(String::as_str) {
        Some("invalid_form") => "<p class=\"notice-danger\">All fields must be filled correctly</p>",
        Some("invalid_file") => "<p class=\"notice-danger\">Please upload a valid .txt file</p>",
        _ => "",
    }
}

fn error_page(detail: &str) -> Response {
    error!("{detail}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        page("Error", "<p>Something went wrong while handling the request.</p>"),
    )
        .into_response()
}

pub(crate) async fn landing_handler() -> impl IntoResponse {
    let body = format!(
        "<p>Version: <code>{}</code></p>\
<p>Classify DNA sequences into disorder categories with a pretrained model.</p>\
<ul>\
<li><a href=\"/input\">Enter a sequence manually</a></li>\
<li><a href=\"/upload\">Upload a multi-sequence genome file</a></li>\
<li><a href=\"/history\">Browse past predictions</a></li>\
</ul>",
        env!("CARGO_PKG_VERSION")
    );
    page("Genoscope", &body)
}

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

const INPUT_FORM: &str = "<form method=\"post\" action=\"/input\">\
<label>Name <input type=\"text\" name=\"name\"></label><br>\
<label>Age <input type=\"text\" name=\"age\"></label><br>\
<label>Sex <select name=\"sex\">\
<option value=\"male\">male</option>\
<option value=\"female\">female</option>\
<option value=\"other\">other</option>\
</select></label><br>\
<label>Chronic illnesses <input type=\"text\" name=\"chronic_illnesses\"></label><br>\
<label>Symptoms <input type=\"text\" name=\"symptoms\"></label><br>\
<label>DNA sequence <textarea name=\"user_input\"></textarea></label><br>\
<button type=\"submit\">Classify</button>\
</form>";

#[derive(Debug, Deserialize)]
pub(crate) struct InputForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    sex: String,
    #[serde(default)]
    chronic_illnesses: String,
    #[serde(default)]
    symptoms: String,
    #[serde(default)]
    user_input: String,
}

pub(crate) async fn input_form_handler(
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let body = format!("{}{INPUT_FORM}", notice_banner(&params));
    page("Manual Input", &body)
}

pub(crate) async fn input_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<InputForm>,
) -> Response {
    let sequence = form.user_input.trim();
    let (name, age, sex) = match (
        PatientName::parse(&form.name),
        Age::parse(&form.age),
        Sex::parse(form.sex.trim()),
    ) {
        (Ok(name), Ok(age), Ok(sex)) if !sequence.is_empty() => (name, age, sex),
        _ => {
            warn!("manual input rejected by validation");
            return Redirect::to("/input?notice=invalid_form").into_response();
        }
    };

    let metadata =
        PatientMetadata::from_form(&name, age, sex, &form.chronic_illnesses, &form.symptoms);
    let (disorder, confidence) = match state.service.classify_and_record(sequence, metadata) {
        Ok(v) => v,
        Err(e) => return error_page(&format!("manual classification failed: {e}")),
    };
    info!(disorder = %disorder, "manual sequence classified");

    let result = format!(
        "<h2>Prediction</h2><table border=\"1\">\
<tr><th>Name</th><th>Age</th><th>Sex</th><th>Sequence</th><th>Disorder</th><th>Confidence</th></tr>\
<tr><td>{}</td><td>{}</td><td>{}</td><td><code>{}</code></td><td>{}</td><td>{:.2}%</td></tr>\
</table>",
        escape_html(name.as_str()),
        age.value(),
        sex.as_str(),
        escape_html(&sequence_preview(sequence)),
        escape_html(&disorder),
        confidence
    );
    page("Manual Input", &format!("{result}{INPUT_FORM}")).into_response()
}

const UPLOAD_FORM: &str = "<form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\
<label>Genome file (.txt) <input type=\"file\" name=\"genome_file\"></label><br>\
<button type=\"submit\">Upload and classify</button>\
</form>";

pub(crate) async fn upload_form_handler(
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let body = format!("{}{UPLOAD_FORM}", notice_banner(&params));
    page("Upload Genome File", &body)
}

pub(crate) async fn upload_submit_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut upload: Option<(String, axum::body::Bytes)> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("genome_file") {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    match field.bytes().await {
                        Ok(data) => upload = Some((filename, data)),
                        Err(e) => {
                            warn!("upload body read failed: {e}");
                            return Redirect::to("/upload?notice=invalid_file").into_response();
                        }
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("malformed multipart request: {e}");
                return Redirect::to("/upload?notice=invalid_file").into_response();
            }
        }
    }

    let Some((filename, data)) = upload else {
        warn!("upload without genome_file field");
        return Redirect::to("/upload?notice=invalid_file").into_response();
    };
    if filename.is_empty() || !filename.to_lowercase().ends_with(".txt") {
        warn!(filename = %filename, "upload rejected by extension check");
        return Redirect::to("/upload?notice=invalid_file").into_response();
    }
    // Only the final path component of the client name is trusted; traversal
    // attempts land inside the uploads directory.
    let Some(safe_name) = Path::new(&filename).file_name() else {
        return Redirect::to("/upload?notice=invalid_file").into_response();
    };

    let destination = state.api.uploads_dir.join(safe_name);
    if let Err(e) = std::fs::write(&destination, &data) {
        return error_page(&format!(
            "cannot save upload '{}': {e}",
            destination.display()
        ));
    }

    let content = String::from_utf8_lossy(&data);
    let outcomes = match state.service.process_genome_file(&content) {
        Ok(v) => v,
        Err(e) => return error_page(&format!("genome file processing failed: {e}")),
    };
    info!(records = outcomes.len(), file = %destination.display(), "genome file processed");

    let mut rows = String::new();
    for outcome in &outcomes {
        rows.push_str(&format!(
            "<tr><td><code>{}</code></td><td>{}</td><td>{:.2}%</td></tr>",
            escape_html(&outcome.preview),
            escape_html(&outcome.disorder),
            outcome.confidence
        ));
    }
    let body = format!(
        "<p class=\"notice-success\">File processed successfully</p>\
<table border=\"1\">\
<tr><th>Sequence</th><th>Disorder</th><th>Confidence</th></tr>{rows}</table>\
{UPLOAD_FORM}"
    );
    page("Upload Genome File", &body).into_response()
}

pub(crate) async fn history_handler(State(state): State<AppState>) -> Response {
    let rows = match state.service.history() {
        Ok(v) => v,
        Err(e) => return error_page(&format!("history query failed: {e}")),
    };
    let mut table = String::new();
    for row in &rows {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td><code>{}</code></td><td>{}</td><td>{:.2}%</td></tr>",
            escape_html(&row.name),
            escape_html(&row.age),
            escape_html(&row.sex),
            escape_html(&sequence_preview(&row.sequence)),
            escape_html(&row.disorder),
            row.confidence
        ));
    }
    let body = if rows.is_empty() {
        "<p>No predictions yet.</p>".to_string()
    } else {
        format!(
            "<table border=\"1\">\
<tr><th>Name</th><th>Age</th><th>Sex</th><th>Sequence</th><th>Disorder</th><th>Confidence</th></tr>\
{table}</table>"
        )
    };
    page("Prediction History", &body).into_response()
}
