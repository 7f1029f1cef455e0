//! Batch prediction handler (file upload)

use axum::extract::{Multipart, State};
use axum::response::Response;

use crate::error::{AppError, AppResult};
use crate::logic::{batch, FeatureVector};
use crate::models::PredictionRecord;
use crate::render::{self, PageContext};
use crate::session::Session;
use crate::AppState;

/// Classify every URL in an uploaded file.
///
/// Whole-file parse failures render an error banner and leave the history
/// untouched. A row whose classification fails becomes an `Error` record
/// and the batch continues. All row records are prepended to the history
/// as one block, in file order.
pub async fn upload(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            upload = Some((filename, data.to_vec()));
            break;
        }
    }
    let (filename, data) =
        upload.ok_or_else(|| AppError::BadRequest("missing file field".to_string()))?;

    let urls = match batch::parse_urls(&filename, &data) {
        Ok(urls) => urls,
        Err(err) => {
            tracing::warn!(filename = %filename, error = %err, "batch file rejected");
            let ctx = PageContext::with_history(state.history.read(session.id))
                .error(format!("Error reading file: {err}"));
            return render::page(&state, &session, ctx);
        }
    };

    tracing::info!(filename = %filename, rows = urls.len(), "processing batch upload");

    let mut results = Vec::with_capacity(urls.len());
    for url in urls {
        let features = FeatureVector::extract(&url);
        let record = match state.classifier.classify(&features) {
            Ok(result) => PredictionRecord::new(&url, result.label.into(), result.confidence),
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "row classification failed");
                PredictionRecord::error_row(&url)
            }
        };
        results.push(record);
    }

    state.history.append(session.id, results.clone());

    let ctx = PageContext::with_history(state.history.read(session.id)).batch_results(results);
    render::page(&state, &session, ctx)
}
