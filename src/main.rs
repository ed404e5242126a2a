use actix_web::{web, App, HttpServer};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use clap::{value_parser, Arg, ArgMatches, Command};
use log::{error, info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use lant::config::{AlphabetRegistry, BoardSpec, PlayConfig, ServeConfig};
use lant::error::{LantError, Result};
use lant::handlers;
use lant::models::AppState;
use lant::services::distribution::compose_board;
use lant::services::frequency::{character_frequency, count_characters};
use lant::services::simulator::RoundSimulator;
use lant::services::word_loader::{load_corpus, load_words, LanguagePaths};
use lant::storage::{format_report, ResultsStore, RoundRecord};

// Function to initialize logging
fn init_logging(log_file: Option<&String>, level: LevelFilter) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_env("RUST_LOG");

    if let Some(file) = log_file {
        let log_output = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)?;
        builder.target(env_logger::Target::Pipe(Box::new(log_output)));
    }
    builder.init();
    Ok(())
}

fn cli() -> Command {
    Command::new("lant")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate and score Boggle letter distributions per language")
        .subcommand_required(true)
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .num_args(1)
                .global(true)
                .help("Specify a log file path (if omitted, logs to stderr)"),
        )
        .arg(
            Arg::new("log-level")
                .short('L')
                .long("log-level")
                .num_args(1)
                .global(true)
                .default_value("info")
                .value_parser(["error", "warn", "info", "debug", "trace", "off"])
                .help("Log this level and up"),
        )
        .arg(
            Arg::new("alphabets")
                .long("alphabets")
                .num_args(1)
                .global(true)
                .default_value("./share/alphabets.json")
                .help("JSON file mapping language codes to their playable letters"),
        )
        .arg(
            Arg::new("language-dir")
                .long("language-dir")
                .num_args(1)
                .global(true)
                .default_value("./data")
                .help("Directory holding <iso>/texts and <iso>/<word list>"),
        )
        .arg(
            Arg::new("word-list-file-name")
                .long("word-list-file-name")
                .num_args(1)
                .global(true)
                .default_value("wordlist"),
        )
        .arg(
            Arg::new("wordlist-cap")
                .long("wordlist-cap")
                .num_args(1)
                .global(true)
                .default_value("5000")
                .value_parser(value_parser!(usize))
                .help("Only use this many of the most frequent words"),
        )
        .arg(
            Arg::new("results")
                .short('d')
                .long("results")
                .num_args(1)
                .global(true)
                .default_value("./results.jsonl")
                .help("Append-only file the round results are recorded to"),
        )
        .subcommand(
            Command::new("play")
                .about("Score random dice sets built from the language's letter frequency")
                .arg(
                    Arg::new("iso")
                        .short('i')
                        .long("iso")
                        .num_args(1)
                        .required(true)
                        .help("ISO 639-3 language code"),
                )
                .arg(
                    Arg::new("board-size")
                        .long("board-size")
                        .num_args(1)
                        .default_value("5")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("round-size")
                        .long("round-size")
                        .num_args(1)
                        .default_value("50")
                        .value_parser(value_parser!(usize))
                        .help("Games played on one dice set"),
                )
                .arg(
                    Arg::new("rounds")
                        .long("rounds")
                        .num_args(1)
                        .default_value("100000")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("min-word-length")
                        .long("min-word-length")
                        .num_args(1)
                        .default_value("5")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .num_args(1)
                        .value_parser(value_parser!(u64))
                        .help("Seed the random source for a reproducible run"),
                ),
        )
        .subcommand(Command::new("report").about("Report the best dice set per language and exit"))
        .subcommand(
            Command::new("char-frequency")
                .about("Count the characters of a text to help choose a language's letters")
                .arg(Arg::new("file").required(true))
                .arg(
                    Arg::new("threshold")
                        .short('t')
                        .long("threshold")
                        .num_args(1)
                        .value_parser(value_parser!(usize))
                        .help("Minimum count to list a character (default 1% of all)"),
                ),
        )
        .subcommand(
            Command::new("serve")
                .about("Serve the single board solver over HTTP")
                .arg(
                    Arg::new("langs")
                        .short('l')
                        .long("langs")
                        .num_args(1)
                        .default_value("eng")
                        .help("Comma-separated list of languages to load word lists for"),
                )
                .arg(
                    Arg::new("listen-host")
                        .long("listen-host")
                        .num_args(1)
                        .default_value("127.0.0.1:8080")
                        .help("Specify the listen address (e.g., 0.0.0.0:8080)"),
                )
                .arg(
                    Arg::new("min-word-length")
                        .long("min-word-length")
                        .num_args(1)
                        .default_value("5")
                        .value_parser(value_parser!(usize)),
                ),
        )
}

fn string_arg<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(name)
        .ok_or_else(|| LantError::InvalidParameter(format!("missing --{}", name)))
}

fn usize_arg(matches: &ArgMatches, name: &str) -> Result<usize> {
    matches
        .get_one::<usize>(name)
        .copied()
        .ok_or_else(|| LantError::InvalidParameter(format!("missing --{}", name)))
}

fn play(global: &ArgMatches, matches: &ArgMatches) -> Result<()> {
    let config = PlayConfig {
        language: string_arg(matches, "iso")?.to_lowercase(),
        board_size: usize_arg(matches, "board-size")?,
        round_size: usize_arg(matches, "round-size")?,
        rounds: usize_arg(matches, "rounds")?,
        min_word_length: usize_arg(matches, "min-word-length")?,
        wordlist_cap: usize_arg(global, "wordlist-cap")?,
        seed: matches.get_one::<u64>("seed").copied(),
    };
    config.validate()?;

    let registry = AlphabetRegistry::load(Path::new(string_arg(global, "alphabets")?))?;
    let alphabet = registry.get(&config.language)?;
    info!("Playing {} with letters {}", config.language, alphabet);
    let spec = BoardSpec::new(config.board_size, alphabet)?;

    let paths = LanguagePaths::new(
        Path::new(string_arg(global, "language-dir")?),
        &config.language,
        string_arg(global, "word-list-file-name")?,
    );
    let dictionary = load_words(&paths.wordlist, config.wordlist_cap)?;
    let corpus = load_corpus(&paths.texts)?;
    let frequency = character_frequency(&corpus, alphabet);
    let composition = compose_board(&frequency, &spec)?;
    let board_string = composition.board_string();

    let store = ResultsStore::new(string_arg(global, "results")?);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let simulator = RoundSimulator::new(spec, config.min_word_length, &dictionary);
    simulator.run_rounds(
        &board_string,
        config.round_size,
        config.rounds,
        &mut rng,
        |result| {
            let record = RoundRecord::new(
                &config.language,
                config.board_size,
                config.round_size,
                dictionary.len(),
                result,
            );
            store.record_round(&record)
        },
    )?;
    info!("Finished {} rounds, results in {}", config.rounds, store.path().display());
    Ok(())
}

fn report(global: &ArgMatches) -> Result<()> {
    let store = ResultsStore::new(string_arg(global, "results")?);
    let rows = store.breakdown()?;
    println!("{}", format_report(&rows));
    Ok(())
}

fn char_frequency(matches: &ArgMatches) -> Result<()> {
    let file = PathBuf::from(string_arg(matches, "file")?);
    let text = fs::read_to_string(&file).map_err(|e| LantError::reading(&file, e))?;
    let counted = count_characters(&text);
    let summed: usize = counted.iter().map(|(_, n)| n).sum();
    let threshold = matches
        .get_one::<usize>("threshold")
        .copied()
        .unwrap_or(summed / 100);

    for (c, n) in &counted {
        println!("{} {}", c, n);
    }
    println!("threshold {}", threshold);

    let mut all: Vec<char> = counted.iter().map(|(c, _)| *c).collect();
    all.sort_unstable();
    let mut cut: Vec<char> = counted
        .iter()
        .filter(|(_, n)| *n > threshold)
        .map(|(c, _)| *c)
        .collect();
    cut.sort_unstable();
    println!("all {}", all.iter().collect::<String>());
    println!("cut {}", cut.iter().collect::<String>());
    Ok(())
}

async fn run_server(state: AppState, listen_host: String) -> std::io::Result<()> {
    let shared_state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(shared_state.clone())
            .configure(handlers::configure)
    })
    .bind(&listen_host)?
    .run()
    .await
}

fn serve(global: &ArgMatches, matches: &ArgMatches) -> Result<()> {
    let config = ServeConfig {
        langs: string_arg(matches, "langs")?
            .split(',')
            .map(|lang| lang.trim().to_lowercase())
            .filter(|lang| !lang.is_empty())
            .collect(),
        listen_host: string_arg(matches, "listen-host")?.clone(),
        min_word_length: usize_arg(matches, "min-word-length")?,
        wordlist_cap: usize_arg(global, "wordlist-cap")?,
    };
    config.validate()?;

    let language_dir = Path::new(string_arg(global, "language-dir")?);
    let wordlist_filename = string_arg(global, "word-list-file-name")?;

    let mut dictionaries = HashMap::new();
    for lang in &config.langs {
        info!("Loading word list for language: {}", lang);
        let paths = LanguagePaths::new(language_dir, lang, wordlist_filename);
        dictionaries.insert(lang.clone(), load_words(&paths.wordlist, config.wordlist_cap)?);
    }

    let state = AppState {
        dictionaries,
        min_word_length: config.min_word_length,
        result_cap: 1000,
    };
    info!("Listening on {}", config.listen_host);
    actix_web::rt::System::new().block_on(run_server(state, config.listen_host))?;
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("play", sub)) => play(matches, sub),
        Some(("report", _)) => report(matches),
        Some(("char-frequency", sub)) => char_frequency(sub),
        Some(("serve", sub)) => serve(matches, sub),
        _ => Err(LantError::InvalidParameter("unknown subcommand".to_string())),
    }
}

fn main() {
    let matches = cli().get_matches();

    let log_file = matches.get_one::<String>("log-file");
    let level = matches
        .get_one::<String>("log-level")
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    if let Err(e) = init_logging(log_file, level) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&matches) {
        error!("{} ({:?} error)", e, e.category());
        if log_file.is_some() {
            eprintln!("error: {}", e);
        }
        std::process::exit(1);
    }
}
