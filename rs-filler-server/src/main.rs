mod config;

use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::{get, middleware, put, web, App, HttpResponse, HttpServer, Responder};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use rs_filler_core::io::list_files;
use rs_filler_core::report::describe;
use rs_filler_core::{Dictionary, FillerError, GenerationInput, Generator, Granularity, LoadError, EMBEDDED_NAMES};

use config::ServerConfig;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	#[serde(rename = "type")]
	kind: Option<String>,
	min: Option<u64>,
	max: Option<u64>,
	seed: Option<u64>,
}

#[derive(Deserialize)]
struct DictionaryQuery {
	names: Option<String>,
}

/// Body of `/v1/loaded_dictionary`.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct DictionarySummary {
	name: Option<String>,
	length: usize,
	distinct: usize,
	rows: usize,
	largest: usize,
	sorted: bool,
	valid: bool,
}

/// The served dictionary is replaced, never mutated, so readers can keep a handle.
struct SharedData {
	dictionary: Arc<Dictionary>,
}

impl GenerateParams {
	/// Granularity and bounds, `words` between 1 and 100 when omitted.
	fn input(&self) -> Result<GenerationInput, FillerError> {
		let kind = match &self.kind {
			Some(name) => name.parse::<Granularity>()?,
			None => Granularity::Words,
		};
		Ok(GenerationInput::new(kind, self.min.unwrap_or(1), self.max.unwrap_or(100)))
	}
}

impl DictionarySummary {
	fn of(dict: &Dictionary) -> Self {
		Self {
			name: dict.name().map(str::to_owned),
			length: dict.length(),
			distinct: dict.distinct(),
			rows: dict.row_count(),
			largest: dict.largest(),
			sorted: dict.is_sorted(),
			valid: dict.validate().is_ok(),
		}
	}
}

/// Opens a built-in dictionary (any case) or `<data_dir>/<name>.txt`.
fn open_dictionary(config: &ServerConfig, name: &str) -> Result<Dictionary, LoadError> {
	if let Some(builtin) = EMBEDDED_NAMES.iter().find(|builtin| builtin.eq_ignore_ascii_case(name)) {
		return Ok(Dictionary::embedded(builtin));
	}
	if name.contains(['/', '\\']) || name.starts_with('.') {
		return Err(LoadError::Io(std::io::Error::new(
			std::io::ErrorKind::InvalidInput,
			format!("Invalid dictionary name: {}", name),
		)));
	}
	Dictionary::load(config.data_dir.join(format!("{}.txt", name)))
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates filler text from the served dictionary.
/// Returns the text as the response body, or the error description with a 400.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let input = query.input();
	let seed = query.seed;

	let dictionary = match data.lock() {
		Ok(m) => Arc::clone(&m.dictionary),
		Err(_) => return HttpResponse::InternalServerError().body("Dictionary lock failed"),
	};

	// Runs on the blocking pool, the lock is already released.
	let result = web::block(move || {
		input
			.and_then(|input| match seed {
				Some(seed) => Generator::with_seed(seed).generate_with(&dictionary, &input),
				None => Generator::new().generate_with(&dictionary, &input),
			})
			.map_err(|e| describe(&dictionary, e))
	})
	.await;

	match result {
		Ok(Ok(text)) => HttpResponse::Ok().body(text),
		Ok(Err(description)) => HttpResponse::BadRequest().body(description),
		Err(_) => HttpResponse::InternalServerError().body("Generation failed"),
	}
}

#[get("/v1/dictionaries")]
async fn get_dictionaries(config: web::Data<ServerConfig>) -> impl Responder {
	let mut names: Vec<String> = EMBEDDED_NAMES.iter().map(|name| (*name).to_owned()).collect();
	match list_files(&config.data_dir, "txt") {
		Ok(files) => names.extend(files.iter().map(|file| file.trim_end_matches(".txt").to_owned())),
		Err(e) => warn!("Cannot list {}: {}", config.data_dir.display(), e),
	}
	HttpResponse::Ok().body(names.join("\n"))
}

#[get("/v1/loaded_dictionary")]
async fn get_loaded_dictionary(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Dictionary lock failed"),
	};
	HttpResponse::Ok().json(DictionarySummary::of(&shared_data.dictionary))
}

#[put("/v1/load_dictionaries")]
async fn put_dictionaries(
	data: web::Data<Mutex<SharedData>>,
	config: web::Data<ServerConfig>,
	query: web::Query<DictionaryQuery>,
) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty dictionary name"),
	};

	let names: Vec<&str> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect();

	let mut merged = Dictionary::with_name(&names.join("+"));
	for name in &names {
		match open_dictionary(&config, name) {
			Ok(partial) => {
				merged.merge(&partial);
			}
			Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load dictionary {name}: {e}")),
		}
	}
	merged.clean();
	info!("Serving dictionary {} ({} words)", query_names, merged.len());

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Dictionary lock failed"),
	};
	shared_data.dictionary = Arc::new(merged);

	HttpResponse::Ok().body("Dictionaries loaded successfully")
}

/// Main entry point for the server.
///
/// Loads the built-in Latin dictionary, wraps it in a `Mutex` for thread
/// safety, and starts an Actix-web HTTP server.
///
/// # Notes
/// - Host, port and data folder come from `ServerConfig::from_env`.
/// - Set `RUST_LOG=info` to see requests.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let config = ServerConfig::from_env();
	let address = (config.host.clone(), config.port);
	info!("Listening on {}, word files in {}", config.address(), config.data_dir.display());

	let shared_data = SharedData {
		dictionary: Arc::new(Dictionary::embedded("Latin")),
	};
	let shared_dictionary = web::Data::new(Mutex::new(shared_data));
	let shared_config = web::Data::new(config);

	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_dictionary.clone())
			.app_data(shared_config.clone())
			.service(get_generated)
			.service(get_dictionaries)
			.service(get_loaded_dictionary)
			.service(put_dictionaries)
	})
		.bind(address)?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::{http::StatusCode, test};

	fn state() -> (web::Data<Mutex<SharedData>>, web::Data<ServerConfig>) {
		let shared = SharedData { dictionary: Arc::new(Dictionary::embedded("Latin")) };
		let config = ServerConfig {
			data_dir: std::env::temp_dir().join("rs-filler-server-missing"),
			..ServerConfig::default()
		};
		(web::Data::new(Mutex::new(shared)), web::Data::new(config))
	}

	macro_rules! app {
		($data:expr, $config:expr) => {
			test::init_service(
				App::new()
					.app_data($data.clone())
					.app_data($config.clone())
					.service(get_generated)
					.service(get_dictionaries)
					.service(get_loaded_dictionary)
					.service(put_dictionaries),
			)
			.await
		};
	}

	#[actix_web::test]
	async fn generate_exact_words() {
		let (data, config) = state();
		let app = app!(data, config);
		let req = test::TestRequest::get().uri("/v1/generate?type=words&min=12&max=12&seed=4").to_request();
		let body = test::call_and_read_body(&app, req).await;
		let text = String::from_utf8(body.to_vec()).unwrap();
		assert_eq!(text.split_whitespace().count(), 12);
	}

	#[actix_web::test]
	async fn long_generation_releases_the_dictionary() {
		let (data, config) = state();
		let app = app!(data, config);
		let served = Arc::clone(&data.lock().unwrap().dictionary);

		let req = test::TestRequest::get().uri("/v1/generate?type=letters&min=200000&max=200000&seed=1").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(String::from_utf8(body.to_vec()).unwrap().chars().count(), 200_000);

		let shared = data.try_lock().unwrap();
		assert!(Arc::ptr_eq(&shared.dictionary, &served));
		assert_eq!(Arc::strong_count(&served), 2);
	}

	#[actix_web::test]
	async fn reload_leaves_held_handles_intact() {
		let (data, config) = state();
		let app = app!(data, config);
		let held = Arc::clone(&data.lock().unwrap().dictionary);

		let req = test::TestRequest::put().uri("/v1/load_dictionaries?names=Seussian").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

		assert_eq!(held.name(), Some("Latin"));
		assert_eq!(data.lock().unwrap().dictionary.name(), Some("Seussian"));
	}

	#[actix_web::test]
	async fn seeded_requests_repeat() {
		let (data, config) = state();
		let app = app!(data, config);
		let uri = "/v1/generate?type=sentences&min=1&max=3&seed=99";
		let first = test::call_and_read_body(&app, test::TestRequest::get().uri(uri).to_request()).await;
		let second = test::call_and_read_body(&app, test::TestRequest::get().uri(uri).to_request()).await;
		assert_eq!(first, second);
	}

	#[actix_web::test]
	async fn errors_are_bad_requests() {
		let (data, config) = state();
		let app = app!(data, config);

		let req = test::TestRequest::get().uri("/v1/generate?type=lines").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
		let body = test::read_body(resp).await;
		assert!(body.starts_with(b"FillerError.InvalidOutputType"));

		let req = test::TestRequest::get().uri("/v1/generate?min=5&max=2").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert!(body.starts_with(b"FillerError.MaxLessThanMin"));
	}

	#[actix_web::test]
	async fn summary_and_reload() {
		let (data, config) = state();
		let app = app!(data, config);

		let req = test::TestRequest::get().uri("/v1/loaded_dictionary").to_request();
		let summary: DictionarySummary = test::call_and_read_body_json(&app, req).await;
		assert_eq!(summary.name.as_deref(), Some("Latin"));
		assert!(summary.valid);

		let req = test::TestRequest::put().uri("/v1/load_dictionaries?names=latin,SEUSSIAN").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);

		let req = test::TestRequest::get().uri("/v1/loaded_dictionary").to_request();
		let merged: DictionarySummary = test::call_and_read_body_json(&app, req).await;
		assert_eq!(merged.name.as_deref(), Some("latin+SEUSSIAN"));
		assert!(merged.distinct > summary.distinct);
		assert!(merged.valid);
	}

	#[actix_web::test]
	async fn unknown_dictionary_keeps_the_served_one() {
		let (data, config) = state();
		let app = app!(data, config);

		let req = test::TestRequest::put().uri("/v1/load_dictionaries?names=../etc").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

		let req = test::TestRequest::put().uri("/v1/load_dictionaries?names=%20").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

		let name = data.lock().unwrap().dictionary.name().map(str::to_owned);
		assert_eq!(name.as_deref(), Some("Latin"));
	}

	#[actix_web::test]
	async fn builtins_are_listed_without_data_dir() {
		let (data, config) = state();
		let app = app!(data, config);
		let req = test::TestRequest::get().uri("/v1/dictionaries").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(&body[..], b"Latin\nSeussian");
	}
}
