use clap::{Parser, Subcommand};
use fraghmm::{
    common::EmissionProbs,
    error::Result,
    hmm::{dump::LogSink, HMMParams, HiddenMarkovModel},
    io::{graphml, json, text},
};
use itertools::Itertools;
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Opts {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Train the transition probabilities of a model on examples
    Train {
        /// Model in the text format
        model: PathBuf,
        /// JSON array of training examples
        examples: PathBuf,
        /// Number of train/evaluate epochs
        #[clap(short = 'n', long, default_value_t = 1)]
        epochs: usize,
        /// JSON file of HMMParams
        #[clap(long)]
        params: Option<PathBuf>,
        /// Pseudo counts, overriding the params file
        #[clap(short = 'p', long)]
        pseudo_counts: Option<f64>,
        /// Estimate the transitions that received no training mass
        #[clap(short, long)]
        estimate_untrained: bool,
        /// Dump the transitions to the log after each epoch
        #[clap(long)]
        dump: bool,
        /// Output model filename (text format)
        #[clap(short, long)]
        output: PathBuf,
        /// Output GraphML filename
        #[clap(short, long)]
        graphml_output: Option<PathBuf>,
        /// Output JSON report of the trained transitions
        #[clap(short, long)]
        report_output: Option<PathBuf>,
    },
    /// Print the emission probabilities of the emitting states per example
    Predict {
        /// Model in the text format
        model: PathBuf,
        /// JSON array of examples giving initial probabilities and evidence
        examples: PathBuf,
    },
}

fn load_params(params: &Option<PathBuf>, pseudo_counts: Option<f64>) -> Result<HMMParams> {
    let mut params = match params {
        Some(filename) => {
            let file = std::fs::File::open(filename)?;
            serde_json::from_reader(std::io::BufReader::new(file))?
        }
        None => HMMParams::default(),
    };
    if let Some(pseudo_counts) = pseudo_counts {
        params.pseudo_counts = pseudo_counts;
    }
    params.validate()?;
    Ok(params)
}

fn train(
    hmm: &mut HiddenMarkovModel,
    examples: &Path,
    epochs: usize,
    estimate_untrained: bool,
    dump: bool,
) -> Result<()> {
    let examples = json::read_training_examples_file(examples)?;
    info!("loaded {} examples", examples.len());
    for epoch in 0..epochs {
        let log_likelihood = hmm.train_examples(&examples)?;
        hmm.evaluate()?;
        println!(
            "{}\tepoch={}\tlog_likelihood={}",
            chrono::Local::now(),
            epoch,
            log_likelihood
        );
        if dump {
            hmm.dump(&mut LogSink);
        }
    }
    if estimate_untrained {
        let n = hmm.estimate_untrained_transitions();
        info!("estimated {} transitions", n);
    }
    Ok(())
}

fn predict(hmm: &mut HiddenMarkovModel, examples: &Path) -> Result<()> {
    let examples = json::read_training_examples_file(examples)?;
    for (i, example) in examples.iter().enumerate() {
        example.apply(hmm)?;
        let mut probs = EmissionProbs::default();
        hmm.calculate_emission_probabilities(&mut probs)?;
        for (state, prob) in probs.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            println!("{}\t{}\t{}", i, state, prob);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();
    println!("# started_at={}", chrono::Local::now());
    println!("# opts={:?}", opts);
    match &opts.command {
        Commands::Train {
            model,
            examples,
            epochs,
            params,
            pseudo_counts,
            estimate_untrained,
            dump,
            output,
            graphml_output,
            report_output,
        } => {
            let params = load_params(params, *pseudo_counts)?;
            info!("params\n{}", params);
            let mut hmm = text::read_model_file(model)?;
            hmm.set_params(params)?;
            train(&mut hmm, examples, *epochs, *estimate_untrained, *dump)?;
            text::write_model_file(&hmm, output)?;
            if let Some(filename) = graphml_output {
                graphml::write_graphml_file(&hmm, filename)?;
            }
            if let Some(filename) = report_output {
                json::write_report_file(&hmm, filename)?;
            }
        }
        Commands::Predict { model, examples } => {
            let mut hmm = text::read_model_file(model)?;
            predict(&mut hmm, examples)?;
        }
    }
    println!("# finished_at={}", chrono::Local::now());
    Ok(())
}
