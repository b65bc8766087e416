mod config;
mod routes;

use std::io;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::info;

use rs_spin_core::corpus::{CorpusSource, DirectoryCorpus};
use rs_spin_core::model::TrigramModel;
use rs_spin_core::spin::SpinnerConfig;
use rs_spin_core::text::TreebankTokenizer;

use crate::config::ServerConfig;
use crate::routes::AppState;

/// Main entry point for the server.
///
/// Builds the trigram model once from the corpus folder, shares it
/// read-only with every worker and serves the spin endpoints.
///
/// # Notes
/// - Settings come from `SPIN_*` environment variables (see `ServerConfig`).
/// - Startup fails if the corpus folder is missing or a setting is invalid.
#[actix_web::main]
async fn main() -> io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = ServerConfig::from_env().map_err(io::Error::other)?;
	let spinner_config = SpinnerConfig::new().with_replace_probability(config.replace_probability);
	spinner_config.validate().map_err(io::Error::other)?;

	let documents = DirectoryCorpus::new(&config.corpus_dir, &config.corpus_extension)
		.documents()
		.map_err(io::Error::other)?;
	let model = TrigramModel::from_corpus(&documents, &TreebankTokenizer::new());

	let state = web::Data::new(AppState::new(model, spinner_config));

	info!("Listening on {}:{}", config.host, config.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(state.clone())
			.configure(routes::configure)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
