use crate::detector::DetectorClient;
use actix_files::Files;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use image::ImageFormat;
use log::{error, info, warn};
use sha2::{Digest, Sha256};
use shared::{DataUrlError, DetectFoodRequest, DetectFoodResponse, EncodedImage};
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

const INVALID_IMAGE_MESSAGE: &str = "The uploaded file is not a valid image.";
const DETECTOR_UNAVAILABLE_MESSAGE: &str = "The food detection service is unavailable.";

#[derive(Error, Debug)]
enum ImageRejection {
    #[error("invalid data URL: {0}")]
    DataUrl(#[from] DataUrlError),
    #[error("unrecognised image format")]
    UnknownFormat,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: PathBuf, max_payload_bytes: usize) {
    configure_api(cfg, max_payload_bytes);
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

pub fn configure_api(cfg: &mut web::ServiceConfig, max_payload_bytes: usize) {
    let json_config = web::JsonConfig::default()
        .limit(max_payload_bytes)
        .error_handler(handle_json_error);

    cfg.service(
        web::resource(shared::DETECT_FOOD_PATH)
            .app_data(json_config)
            .route(web::post().to(handle_detect_food)),
    );
}

fn handle_json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected detection request body: {}", err);
    let response = match err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            HttpResponse::PayloadTooLarge()
        }
        _ => HttpResponse::BadRequest(),
    }
    .json(DetectFoodResponse::rejected(INVALID_IMAGE_MESSAGE));
    InternalError::from_response(err, response).into()
}

async fn handle_detect_food(
    detector: web::Data<DetectorClient>,
    payload: web::Json<DetectFoodRequest>,
) -> HttpResponse {
    let request_id = Uuid::new_v4();
    let request = payload.into_inner();

    let (format, bytes) = match sniff_image(&request.image) {
        Ok(found) => found,
        Err(e) => {
            warn!("[{}] Rejecting upload: {}", request_id, e);
            return HttpResponse::Ok().json(DetectFoodResponse::rejected(INVALID_IMAGE_MESSAGE));
        }
    };

    let digest = image_digest(&bytes);
    info!(
        "[{}] Forwarding {:?} image ({} bytes, sha256 {}) to {}",
        request_id,
        format,
        bytes.len(),
        &digest[..12],
        detector.endpoint()
    );

    match detector.detect(&request).await {
        Ok(response) => match response.into_outcome() {
            Ok(result) => {
                info!(
                    "[{}] Detected {} item(s), {} cal",
                    request_id,
                    result.items.len(),
                    result.total_calories
                );
                HttpResponse::Ok().json(DetectFoodResponse::detected(&result))
            }
            Err(shared::AnalysisError::Rejected(message)) => {
                info!("[{}] Detector declined: {}", request_id, message);
                HttpResponse::Ok().json(DetectFoodResponse::rejected(message))
            }
            Err(e) => {
                error!("[{}] Detector broke the response contract: {}", request_id, e);
                HttpResponse::BadGateway().json(DetectFoodResponse::rejected(DETECTOR_UNAVAILABLE_MESSAGE))
            }
        },
        Err(e) => {
            error!("[{}] Detector call failed: {}", request_id, e);
            HttpResponse::BadGateway().json(DetectFoodResponse::rejected(DETECTOR_UNAVAILABLE_MESSAGE))
        }
    }
}

fn sniff_image(data_url: &str) -> Result<(ImageFormat, Vec<u8>), ImageRejection> {
    let bytes = data_url.parse::<EncodedImage>()?.decode()?;
    let format = image::guess_format(&bytes).map_err(|_| ImageRejection::UnknownFormat)?;
    Ok((format, bytes))
}

fn image_digest(image_data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image_data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::{TestRequest, call_service, init_service, read_body_json};
    use actix_web::{App, HttpServer};
    use std::time::Duration;
    use url::Url;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn png_data_url() -> String {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 13, b'I', b'H', b'D', b'R']);
        EncodedImage::encode("image/png", &bytes).unwrap().to_string()
    }

    /// Starts a detector stand-in on an ephemeral port answering every POST
    /// with `status` and `body`.
    fn spawn_detector(status: u16, body: &'static str) -> Url {
        let server = HttpServer::new(move || {
            App::new().route(
                "/detect",
                web::post().to(move || async move {
                    HttpResponse::build(StatusCode::from_u16(status).unwrap())
                        .content_type("application/json")
                        .body(body)
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let port = server.addrs()[0].port();
        actix_web::rt::spawn(server.run());
        Url::parse(&format!("http://127.0.0.1:{}/detect", port)).unwrap()
    }

    async fn post_image(detector_url: Url, image: String) -> (StatusCode, DetectFoodResponse) {
        let detector = DetectorClient::new(detector_url, Duration::from_secs(5)).unwrap();
        let app = init_service(
            App::new()
                .app_data(web::Data::new(detector))
                .configure(|cfg| configure_api(cfg, 1024 * 1024)),
        )
        .await;
        let req = TestRequest::post()
            .uri(shared::DETECT_FOOD_PATH)
            .set_json(DetectFoodRequest { image })
            .to_request();
        let resp = call_service(&app, req).await;
        let status = resp.status();
        (status, read_body_json(resp).await)
    }

    fn unreachable_detector() -> Url {
        Url::parse("http://127.0.0.1:1/detect").unwrap()
    }

    #[actix_web::test]
    async fn relays_detected_items() {
        let url = spawn_detector(200, r#"{"success":true,"items":["apple","bread"],"count":250}"#);
        let (status, body) = post_image(url, png_data_url()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert_eq!(body.items, Some(vec!["apple".to_string(), "bread".to_string()]));
        assert_eq!(body.count, Some(250.0));
    }

    #[actix_web::test]
    async fn relays_detector_rejection_message() {
        let url = spawn_detector(200, r#"{"success":false,"message":"No food detected"}"#);
        let (status, body) = post_image(url, png_data_url()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, DetectFoodResponse::rejected("No food detected"));
    }

    #[actix_web::test]
    async fn rejects_non_image_without_calling_detector() {
        let (status, body) =
            post_image(unreachable_detector(), "data:image/png;base64,AAA".to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, DetectFoodResponse::rejected(INVALID_IMAGE_MESSAGE));
    }

    #[actix_web::test]
    async fn rejects_plain_urls() {
        let (status, body) =
            post_image(unreachable_detector(), "https://example.com/meal.png".to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body.success);
    }

    #[actix_web::test]
    async fn unreachable_detector_is_bad_gateway() {
        let (status, body) = post_image(unreachable_detector(), png_data_url()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, DetectFoodResponse::rejected(DETECTOR_UNAVAILABLE_MESSAGE));
    }

    #[actix_web::test]
    async fn detector_error_status_is_bad_gateway() {
        let url = spawn_detector(500, r#"{"error":"model crashed"}"#);
        let (status, _) = post_image(url, png_data_url()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[actix_web::test]
    async fn incomplete_detector_answer_is_bad_gateway() {
        let url = spawn_detector(200, r#"{"success":true,"items":["apple"]}"#);
        let (status, _) = post_image(url, png_data_url()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[actix_web::test]
    async fn oversized_body_is_rejected() {
        let detector = DetectorClient::new(unreachable_detector(), Duration::from_secs(1)).unwrap();
        let app = init_service(
            App::new()
                .app_data(web::Data::new(detector))
                .configure(|cfg| configure_api(cfg, 64)),
        )
        .await;
        let req = TestRequest::post()
            .uri(shared::DETECT_FOOD_PATH)
            .set_json(DetectFoodRequest { image: png_data_url().repeat(8) })
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn digest_is_hex_sha256() {
        assert_eq!(
            image_digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn sniff_recognises_png() {
        let (format, bytes) = sniff_image(&png_data_url()).unwrap();
        assert_eq!(format, ImageFormat::Png);
        assert!(bytes.starts_with(PNG_SIGNATURE));
    }
}
