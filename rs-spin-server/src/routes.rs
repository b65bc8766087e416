use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpResponse, Responder};
use log::error;
use serde::{Deserialize, Serialize};

use rs_spin_core::model::TrigramModel;
use rs_spin_core::spin::{DocumentSpinner, ReplacementLogEntry, RngSource, SpinnerConfig};
use rs_spin_core::text::{TreebankDetokenizer, TreebankTokenizer};
use rs_spin_core::SpinError;

/// Read-only state shared by every worker.
///
/// Nothing here is mutated after startup, so no lock is needed.
pub struct AppState {
	model: TrigramModel,
	config: SpinnerConfig,
	tokenizer: TreebankTokenizer,
	detokenizer: TreebankDetokenizer,
}

impl AppState {
	pub fn new(model: TrigramModel, config: SpinnerConfig) -> Self {
		Self { model, config, tokenizer: TreebankTokenizer::new(), detokenizer: TreebankDetokenizer::new() }
	}
}

/// Body of `POST /spin`.
#[derive(Deserialize)]
struct SpinRequest {
	text: Option<String>,
}

#[derive(Serialize)]
struct SpinResponse {
	spun_text: String,
	replaceable_words: Vec<ReplacementLogEntry>,
}

#[derive(Serialize)]
struct ErrorBody {
	error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
	HttpResponse::build(status).json(ErrorBody { error: message.into() })
}

/// HTTP POST endpoint `/spin`
///
/// Spins the submitted text and returns it with the list of replaced words.
#[post("/spin")]
async fn post_spin(data: web::Data<AppState>, body: web::Json<SpinRequest>) -> impl Responder {
	let spinner = match DocumentSpinner::new(&data.model, &data.tokenizer, &data.detokenizer, &data.config) {
		Ok(s) => s,
		Err(e) => {
			error!("Spinner setup failed: {e}");
			return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
		}
	};

	let mut rng = RngSource::thread();
	match spinner.spin_input(body.text.as_deref(), &mut rng) {
		Ok(result) => HttpResponse::Ok().json(SpinResponse {
			spun_text: result.spun_text,
			replaceable_words: result.replacements,
		}),
		Err(e @ SpinError::EmptyInput) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
		Err(e) => {
			error!("Spin failed: {e}");
			error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
		}
	}
}

/// HTTP GET endpoint `/v1/model`
///
/// Returns statistics of the loaded model.
#[get("/v1/model")]
async fn get_model(data: web::Data<AppState>) -> impl Responder {
	HttpResponse::Ok().json(data.model.stats())
}

/// Malformed or missing JSON bodies are input errors too.
fn json_config() -> web::JsonConfig {
	web::JsonConfig::default().error_handler(|err, _req| {
		let response = error_response(StatusCode::BAD_REQUEST, SpinError::EmptyInput.to_string());
		InternalError::from_response(err, response).into()
	})
}

/// Registers the endpoints and the JSON extractor settings.
pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.app_data(json_config()).service(post_spin).service(get_model);
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::{test, App};
	use rs_spin_core::model::ModelStats;
	use serde_json::{json, Value};

	fn state(corpus: &[&str], config: SpinnerConfig) -> web::Data<AppState> {
		let documents: Vec<String> = corpus.iter().map(|d| d.to_string()).collect();
		let model = TrigramModel::from_corpus(&documents, &TreebankTokenizer::new());
		web::Data::new(AppState::new(model, config))
	}

	#[actix_web::test]
	async fn test_spin_returns_text_and_log() {
		let data = state(&["the cat sat", "the dog sat"], SpinnerConfig::new().with_replace_probability(1.0));
		let app = test::init_service(App::new().app_data(data).configure(configure)).await;

		let req = test::TestRequest::post().uri("/spin").set_json(json!({ "text": "the cat sat\n\nend" })).to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);

		let body: Value = test::read_body_json(resp).await;
		let spun = body["spun_text"].as_str().unwrap();
		assert!(spun == "the cat <cat> sat\n\nend" || spun == "the cat <dog> sat\n\nend");

		let words = body["replaceable_words"].as_array().unwrap();
		assert_eq!(words.len(), 1);
		assert_eq!(words[0]["old_word"], "cat");
	}

	#[actix_web::test]
	async fn test_spin_without_text_is_bad_request() {
		let data = state(&[], SpinnerConfig::new());
		let app = test::init_service(App::new().app_data(data).configure(configure)).await;

		for payload in [json!({}), json!({ "text": "   " }), json!({ "content": "hello" })] {
			let req = test::TestRequest::post().uri("/spin").set_json(payload).to_request();
			let resp = test::call_service(&app, req).await;
			assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

			let body: Value = test::read_body_json(resp).await;
			assert_eq!(body["error"], "Text input required");
		}
	}

	#[actix_web::test]
	async fn test_spin_with_invalid_json_is_bad_request() {
		let data = state(&[], SpinnerConfig::new());
		let app = test::init_service(App::new().app_data(data).configure(configure)).await;

		let req = test::TestRequest::post()
			.uri("/spin")
			.insert_header(("content-type", "application/json"))
			.set_payload("not json")
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

		let body: Value = test::read_body_json(resp).await;
		assert_eq!(body["error"], "Text input required");
	}

	#[actix_web::test]
	async fn test_model_stats() {
		let data = state(&["the cat sat on the mat"], SpinnerConfig::new());
		let app = test::init_service(App::new().app_data(data).configure(configure)).await;

		let req = test::TestRequest::get().uri("/v1/model").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);

		let body: Value = test::read_body_json(resp).await;
		let expected = ModelStats { keys: 4, entries: 4, documents: 1, lines: 1 };
		assert_eq!(body, serde_json::to_value(expected).unwrap());
	}
}
