//! Command-line inspection of a dictionary directory.
#![forbid(unsafe_code)]

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use lexgraph::{
    verify, Dictionary, Offset, PartOfSpeech, StoreOptions, StoreStats, SynsetId, VerbFrameRegistry,
    VerifyLevel, VerifyReport,
};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "lexgraph",
    version,
    about = "Inspect and check lexical dictionary files",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "LEXGRAPH_CONFIG",
        value_name = "FILE",
        help = "TOML file with store options"
    )]
    config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format for reports"
    )]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Print record counts per part of speech")]
    Stats {
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    #[command(about = "Check that every line re-encodes byte-for-byte")]
    Verify {
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,

        #[arg(
            long,
            value_enum,
            default_value_t = VerifyLevelArg::Fast,
            help = "Verification depth"
        )]
        level: VerifyLevelArg,
    },

    #[command(about = "List verb frames, or the frames of one verb synset")]
    Frames {
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,

        #[arg(long, value_name = "OFFSET", help = "Verb synset whose frames to print")]
        synset: Option<u64>,

        #[arg(long, help = "Fill the frame placeholder with this lemma")]
        lemma: Option<String>,

        #[arg(long, value_name = "FILE", help = "TOML verb-frame bundle")]
        bundle: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum VerifyLevelArg {
    Fast,
    Full,
}

impl From<VerifyLevelArg> for VerifyLevel {
    fn from(level: VerifyLevelArg) -> Self {
        match level {
            VerifyLevelArg::Fast => VerifyLevel::Fast,
            VerifyLevelArg::Full => VerifyLevel::Full,
        }
    }
}

#[derive(Serialize)]
struct StatsReport {
    root: String,
    totals: StoreStats,
    parts: Vec<PartCounts>,
}

#[derive(Serialize)]
struct PartCounts {
    pos: PartOfSpeech,
    synsets: usize,
    index_entries: usize,
    exceptions: usize,
}

fn main() {
    install_tracing_subscriber();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn install_tracing_subscriber() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Stats { dir } => {
            let options = store_options(cli.config.as_ref(), dir)?;
            let dictionary = Dictionary::open(options)?;
            let report = stats_report(&dictionary);
            emit(cli.format, &report, || print_stats_text(&report))?;
        }
        Command::Verify { dir, level } => {
            let options = store_options(cli.config.as_ref(), dir)?;
            let report = verify(&options, level.into())?;
            emit(cli.format, &report, || print_verify_text(&report))?;
            if !report.success {
                std::process::exit(2);
            }
        }
        Command::Frames {
            dir,
            synset,
            lemma,
            bundle,
        } => {
            let registry = match bundle {
                Some(path) => VerbFrameRegistry::from_toml_str(&fs::read_to_string(path)?)?,
                None => VerbFrameRegistry::builtin(),
            };
            match synset {
                Some(offset) => {
                    let options = store_options(cli.config.as_ref(), dir)?;
                    let dictionary = Dictionary::open(options)?;
                    print_synset_frames(&dictionary, &registry, Offset(offset))?;
                }
                None => print_registry(&registry, lemma.as_deref()),
            }
        }
    }
    Ok(())
}

fn store_options(
    config: Option<&PathBuf>,
    dir: Option<PathBuf>,
) -> Result<StoreOptions, Box<dyn Error>> {
    let mut options = match config {
        Some(path) => StoreOptions::from_toml_file(path)?,
        None => StoreOptions::default(),
    };
    if let Some(dir) = dir {
        options.root = dir;
    }
    Ok(options)
}

fn stats_report(dictionary: &Dictionary) -> StatsReport {
    let graph = dictionary.graph();
    let parts: Vec<PartCounts> = PartOfSpeech::ALL
        .into_iter()
        .map(|pos| PartCounts {
            pos,
            synsets: graph.synsets(pos).len(),
            index_entries: graph.index_entries(pos).count(),
            exceptions: graph.exceptions(pos).count(),
        })
        .collect();
    StatsReport {
        root: dictionary.options().root.display().to_string(),
        totals: dictionary.load_stats(),
        parts,
    }
}

fn emit<T, F>(format: OutputFormat, value: &T, printer: F) -> Result<(), Box<dyn Error>>
where
    T: Serialize,
    F: Fn(),
{
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{json}");
        }
        OutputFormat::Text => printer(),
    }
    Ok(())
}

fn print_stats_text(report: &StatsReport) {
    println!("Dictionary: {}", report.root);
    for part in &report.parts {
        println!(
            "  {:<5} synsets={} index_entries={} exceptions={}",
            part.pos.file_suffix(),
            part.synsets,
            part.index_entries,
            part.exceptions
        );
    }
    println!(
        "Total: synsets={} index_entries={} exceptions={} mirrors_added={}",
        report.totals.synsets,
        report.totals.index_entries,
        report.totals.exceptions,
        report.totals.mirrors_added
    );
}

fn print_verify_text(report: &VerifyReport) {
    println!(
        "Verify ({:?}) => success={} files={} lines={} decode_errors={} mismatches={} graph_errors={}",
        report.level,
        report.success,
        report.counts.files_checked,
        report.counts.lines_checked,
        report.counts.decode_errors,
        report.counts.mismatches,
        report.counts.graph_errors
    );
    for finding in &report.findings {
        match (&finding.file, finding.line_number) {
            (Some(file), Some(line)) => println!("- {file}:{line}: {}", finding.message),
            _ => println!("- {}", finding.message),
        }
    }
}

fn print_registry(registry: &VerbFrameRegistry, lemma: Option<&str>) {
    for index in 1..=registry.len() as u8 {
        let text = match lemma {
            Some(lemma) => registry.instantiate(index, lemma),
            None => registry.frame(index).map(str::to_string),
        };
        if let Some(text) = text {
            println!("{index:>3} {text}");
        }
    }
}

fn print_synset_frames(
    dictionary: &Dictionary,
    registry: &VerbFrameRegistry,
    offset: Offset,
) -> Result<(), Box<dyn Error>> {
    let id = SynsetId::new(PartOfSpeech::Verb, offset);
    let synset = dictionary
        .graph()
        .synset(id)
        .ok_or_else(|| format!("verb synset {offset} not found"))?;
    for word in &synset.words {
        println!("{} ({})", word.lemma, word.index);
        for index in word.frames.iter() {
            if let Some(text) = registry.instantiate(index, &word.lemma) {
                println!("  {index:>3} {text}");
            }
        }
    }
    Ok(())
}
