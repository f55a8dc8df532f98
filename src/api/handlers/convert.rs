// src/api/handlers/convert.rs
use actix_web::{HttpResponse, Result, web};
use serde::Deserialize;
use serde_json::json;

use crate::api::AppState;
use crate::compiler::CompileOutcome;

#[derive(Deserialize)]
pub struct ConvertQuery {
    pub code: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub latex_content: String,
}

/// GET form: LaTeX source in the `code` query parameter, bounded in length.
pub async fn convert_get(
    state: web::Data<AppState>,
    query: web::Query<ConvertQuery>,
) -> Result<HttpResponse> {
    let code = query.into_inner().code;
    let max_len = state.config.max_source_len;

    if code.is_empty() || code.len() > max_len {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": format!("LaTeX source must be between 1 and {} bytes", max_len)
        })));
    }

    respond(&state, &code).await
}

/// POST form for longer sources: JSON body with a `latexContent` field.
pub async fn convert_post(
    state: web::Data<AppState>,
    req: web::Json<ConvertRequest>,
) -> Result<HttpResponse> {
    let content = req.into_inner().latex_content;

    if content.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "latexContent must be a non-empty string"
        })));
    }

    respond(&state, &content).await
}

async fn respond(state: &AppState, source: &str) -> Result<HttpResponse> {
    match state.compiler.compile(source).await {
        Ok(CompileOutcome::Success(bytes)) => Ok(HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(("Content-Disposition", "inline; filename=output.pdf"))
            .body(bytes)),
        Ok(CompileOutcome::Failure(diagnostic)) => {
            log::info!(
                "Compilation failed ({:?}): {}",
                diagnostic.category,
                diagnostic.message
            );
            Ok(HttpResponse::UnprocessableEntity().json(diagnostic))
        }
        Err(e) => {
            log::error!("Compilation service error: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": e.to_string()
            })))
        }
    }
}
