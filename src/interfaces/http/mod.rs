use actix_cors::Cors;
use actix_multipart::form::bytes::Bytes as UploadedFile;
use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_web::http::StatusCode;
use actix_web::{
    dev::Server, get, middleware, post, web, App, HttpResponse, HttpServer, Responder,
    ResponseError,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::application::UploadProcessor;
use crate::domain::error::AppError;
use crate::infrastructure::config::AppConfig;

pub struct HttpState {
    pub processor: UploadProcessor,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootMessage {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(MultipartForm)]
pub struct UploadForm {
    file: UploadedFile,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: client_message(self),
        })
    }
}

fn client_message(err: &AppError) -> String {
    match err {
        AppError::UnsupportedFormat(_) => {
            "Unsupported file type. Please upload CSV or Excel files.".to_string()
        }
        AppError::EmptyTable(_) => "The uploaded file is empty.".to_string(),
        AppError::MalformedInput(msg) => format!("The file is empty or corrupted: {}", msg),
        AppError::InternalProcessing(msg) | AppError::ConfigError(msg) => {
            format!("Error processing file: {}", msg)
        }
    }
}

#[get("/")]
async fn read_root() -> impl Responder {
    HttpResponse::Ok().json(RootMessage {
        message: "Data Visualization Backend API".to_string(),
    })
}

#[post("/upload")]
async fn upload(
    data: web::Data<HttpState>,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> Result<HttpResponse, AppError> {
    let filename = form.file.file_name.clone().unwrap_or_default();
    let bytes = form.file.data;

    info!(filename = %filename, size_bytes = bytes.len(), "Received upload");

    // Parsing and normalizing are CPU bound, keep them off the worker thread
    let state = data.clone();
    let outcome = web::block(move || state.processor.process(&filename, &bytes))
        .await
        .map_err(|e| AppError::InternalProcessing(format!("processing task failed: {}", e)))?;

    match outcome {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(err) => {
            if !err.is_client_error() {
                error!(error = %err, "Upload processing failed");
            }
            Err(err)
        }
    }
}

/// Routes, shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(read_root).service(upload);
}

fn upload_limits(max_upload_bytes: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(max_upload_bytes)
        .memory_limit(max_upload_bytes)
}

pub fn start_server(config: &AppConfig) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState {
        processor: UploadProcessor::from_config(config),
    });
    let max_upload_bytes = config.max_upload_bytes;

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Browser clients upload from any origin

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(upload_limits(max_upload_bytes))
            .configure(configure)
    })
    .bind(config.bind_address())?
    .run();

    info!(
        host = %config.host,
        port = config.port,
        max_upload_bytes,
        "HTTP server listening"
    );

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header;
    use actix_web::test;
    use serde_json::{json, Value};

    const BOUNDARY: &str = "----tabula-test-boundary";

    fn multipart_body(filename: &str, content: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(filename: &str, content: &[u8]) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/upload")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_body(filename, content))
    }

    fn state() -> web::Data<HttpState> {
        web::Data::new(HttpState {
            processor: UploadProcessor::default(),
        })
    }

    #[actix_web::test]
    async fn test_read_root() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/").to_request();

        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!({"message": "Data Visualization Backend API"}));
    }

    #[actix_web::test]
    async fn test_upload_csv() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = upload_request("people.csv", b"age,status\n25,active\n30,inactive\n,active\n")
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "schema": {"age": "number", "status": "category"},
                "data": [
                    {"age": 25, "status": "active"},
                    {"age": 30, "status": "inactive"},
                    {"age": "", "status": "active"},
                ],
                "columns": ["age", "status"],
            })
        );
    }

    #[actix_web::test]
    async fn test_upload_unsupported_format() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = upload_request("report.pdf", b"%PDF-1.7").to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(
            body.detail,
            "Unsupported file type. Please upload CSV or Excel files."
        );
    }

    #[actix_web::test]
    async fn test_upload_empty_table() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = upload_request("empty.csv", b"a,b\n").to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.detail, "The uploaded file is empty.");
    }

    #[actix_web::test]
    async fn test_status_codes() {
        assert_eq!(
            AppError::MalformedInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InternalProcessing("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
