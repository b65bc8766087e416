use std::env;
use std::fs;

use log::{info, warn};

use rs_spin_core::corpus::{CorpusSource, DirectoryCorpus};
use rs_spin_core::model::TrigramModel;
use rs_spin_core::spin::{DocumentSpinner, RngSource, SpinnerConfig};
use rs_spin_core::text::{TreebankDetokenizer, TreebankTokenizer};

const SAMPLE: &str = "Shares in the firm rose sharply on Monday, the company said.\n\nProfits at the firm rose in the third quarter.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage: rs-spin-exemple [corpus_dir] [document] [seed]
    let args: Vec<String> = env::args().skip(1).collect();
    let corpus_dir = args.first().map(String::as_str).unwrap_or("./data");

    // Every .txt file of the folder is one training document
    let documents = DirectoryCorpus::new(corpus_dir, "txt").documents()?;

    // The model is built once; spinning only reads it
    let tokenizer = TreebankTokenizer::new();
    let detokenizer = TreebankDetokenizer::new();
    let model = TrigramModel::from_corpus(&documents, &tokenizer);
    let stats = model.stats();
    info!("{} contexts learned from {} documents", stats.keys, stats.documents);

    // Replace ~30% of the eligible words, marked as <word>
    let config = SpinnerConfig::new().with_replace_probability(0.3);

    // Invalid settings are rejected
    match SpinnerConfig::new().with_replace_probability(2.0).validate() {
        Ok(_) => println!("Should not happen"),
        Err(e) => warn!("{e}"),
    }

    let spinner = DocumentSpinner::new(&model, &tokenizer, &detokenizer, &config)?;

    let document = match args.get(1) {
        Some(path) => fs::read_to_string(path)?.replace("\r\n", "\n"),
        None => SAMPLE.to_owned(),
    };

    // A seed makes the output reproducible
    let result = match args.get(2) {
        Some(seed) => spinner.spin(&document, &mut RngSource::seeded(seed.parse()?)),
        None => spinner.spin(&document, &mut RngSource::thread()),
    };

    println!("{}", result.spun_text);
    println!();
    for (i, entry) in result.replacements.iter().enumerate() {
        println!("Replacement {}: {} -> {}", i + 1, entry.old_word, entry.new_word);
    }

    Ok(())
}
