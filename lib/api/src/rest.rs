use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use facematch_core::{BatchEntry, Error, FaceImage, PresenceVerifier, RecognitionService};

#[derive(Deserialize)]
struct EnrollmentRequest {
    name: String,
    external_id: String,
    /// Base64-encoded image (PNG or JPEG).
    image: String,
}

#[derive(Deserialize)]
struct IdentifyRequest {
    image: String,
}

#[derive(Deserialize)]
struct CompareRequest {
    image_a: String,
    image_b: String,
}

#[derive(Deserialize)]
struct PresenceRequest {
    subject: String,
    reference: String,
}

#[derive(Serialize)]
struct RegistrationResponse {
    registered: usize,
}

#[derive(Serialize)]
struct MatchResponse {
    matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<f32>,
}

#[derive(Serialize)]
struct CompareResponse {
    same_person: bool,
}

#[derive(Serialize)]
struct PresenceResponse {
    code: u8,
    message: &'static str,
    elapsed_seconds: f64,
}

#[derive(Serialize)]
struct PersonSummary {
    name: String,
    external_id: String,
    created_at: String,
}

#[derive(Serialize)]
struct RegistryInfo {
    count: usize,
    people: Vec<PersonSummary>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        service: Arc<RecognitionService>,
        verifier: Arc<PresenceVerifier>,
        port: u16,
    ) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(service.clone()))
                .app_data(web::Data::new(verifier.clone()))
                .route("/", web::get().to(service_info))
                .route("/people", web::get().to(list_people))
                .route("/people", web::post().to(register_people))
                .route("/identify", web::post().to(identify_person))
                .route("/compare", web::post().to(compare_faces))
                .route("/presence", web::post().to(verify_presence))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn service_info(service: web::Data<Arc<RecognitionService>>) -> ActixResult<HttpResponse> {
    match service.count() {
        Ok(enrolled) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "service": "facematch",
            "version": env!("CARGO_PKG_VERSION"),
            "enrolled": enrolled,
            "threshold": service.threshold(),
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn list_people(service: web::Data<Arc<RecognitionService>>) -> ActixResult<HttpResponse> {
    match service.enrolled() {
        Ok(records) => {
            let people: Vec<PersonSummary> = records
                .iter()
                .map(|r| PersonSummary {
                    name: r.name.clone(),
                    external_id: r.external_id.clone(),
                    created_at: r.created_at.to_rfc3339(),
                })
                .collect();
            Ok(HttpResponse::Ok().json(RegistryInfo {
                count: people.len(),
                people,
            }))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

async fn register_people(
    service: web::Data<Arc<RecognitionService>>,
    req: web::Json<Vec<EnrollmentRequest>>,
) -> ActixResult<HttpResponse> {
    // Decode every image up front: a transport-level problem in any entry
    // rejects the whole batch before the first record is committed. Only
    // extraction and registration failures get the mid-batch abort policy.
    let mut entries = Vec::with_capacity(req.len());
    for (index, person) in req.iter().enumerate() {
        match decode_image(&person.image) {
            Ok(image) => entries.push(BatchEntry {
                name: person.name.clone(),
                external_id: person.external_id.clone(),
                image,
            }),
            Err(reason) => {
                warn!(index, name = %person.name, "rejecting batch: {reason}");
                return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                    "error": reason,
                    "failed_index": index,
                    "failed_name": person.name,
                })));
            }
        }
    }

    match service.register_batch(&entries).await {
        Ok(ids) => {
            info!(registered = ids.len(), "batch registration complete");
            Ok(HttpResponse::Ok().json(RegistrationResponse {
                registered: ids.len(),
            }))
        }
        Err(e) => {
            warn!("batch registration aborted: {e}");
            Ok(error_response(&e))
        }
    }
}

async fn identify_person(
    service: web::Data<Arc<RecognitionService>>,
    req: web::Json<IdentifyRequest>,
) -> ActixResult<HttpResponse> {
    let image = match decode_image(&req.image) {
        Ok(image) => image,
        Err(reason) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({ "error": reason })));
        }
    };

    match service.identify_image(&image).await {
        Ok(outcome) => {
            let (name, external_id) = match &outcome.record {
                Some(r) => (Some(r.name.clone()), Some(r.external_id.clone())),
                None => (None, None),
            };
            Ok(HttpResponse::Ok().json(MatchResponse {
                matched: outcome.matched,
                name,
                external_id,
                distance: outcome.distance,
            }))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

async fn compare_faces(
    service: web::Data<Arc<RecognitionService>>,
    req: web::Json<CompareRequest>,
) -> ActixResult<HttpResponse> {
    let (a, b) = match (decode_image(&req.image_a), decode_image(&req.image_b)) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(reason), _) | (_, Err(reason)) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({ "error": reason })));
        }
    };

    match service.compare_images(&a, &b).await {
        Ok(same_person) => Ok(HttpResponse::Ok().json(CompareResponse { same_person })),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn verify_presence(
    verifier: web::Data<Arc<PresenceVerifier>>,
    req: web::Json<PresenceRequest>,
) -> ActixResult<HttpResponse> {
    let (subject, reference) = match (decode_image(&req.subject), decode_image(&req.reference)) {
        (Ok(s), Ok(r)) => (s, r),
        (Err(reason), _) | (_, Err(reason)) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({ "error": reason })));
        }
    };

    match verifier.verify(&subject, &reference).await {
        Ok(report) => Ok(HttpResponse::Ok().json(PresenceResponse {
            code: report.code.as_code(),
            message: report.code.message(),
            elapsed_seconds: report.elapsed.as_secs_f64(),
        })),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Decode a base64-encoded image into a raw RGB pixel buffer.
fn decode_image(encoded: &str) -> Result<FaceImage, String> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| format!("invalid base64 image: {e}"))?;
    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| format!("unsupported or corrupt image: {e}"))?
        .to_rgb8();
    let (width, height) = decoded.dimensions();
    FaceImage::from_raw(width, height, decoded.into_raw())
        .ok_or_else(|| "pixel buffer does not match image dimensions".to_string())
}

fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::NoFaceDetected => StatusCode::BAD_REQUEST,
        Error::EmptyRegistry => StatusCode::NOT_FOUND,
        Error::MalformedEmbedding { .. } | Error::InvalidConfig(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        Error::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        Error::ExtractorUnavailable(_) => StatusCode::BAD_GATEWAY,
        // A batch abort reports the status of its cause.
        Error::BatchAborted { source, .. } => status_for(source),
    }
}

fn error_response(err: &Error) -> HttpResponse {
    if matches!(err, Error::MalformedEmbedding { .. }) {
        error!("embedding contract violated: {err}");
    }

    let mut body = serde_json::json!({ "error": err.to_string() });
    if let Error::BatchAborted { index, name, .. } = err {
        body["failed_index"] = (*index).into();
        body["failed_name"] = name.as_str().into();
    }
    HttpResponse::build(status_for(err)).json(body)
}
