//! Generic translation driver.
//!
//! Reads a file (or stdin), runs exactly one of the translations from a
//! [TranslationRegistry] on it, and writes the output to a file (or stdout).

use crate::translation::is_blank;
use crate::translation::TranslationRegistry;
use anyhow::Context;
use anyhow::Result;
use clap::ArgGroup;
use clap::ArgMatches;
use clap::Args;
use clap::Command;
use clap::FromArgMatches;
use std::ffi::OsString;
use std::io::Read;
use std::io::Write;
use tracing::subscriber::SetGlobalDefaultError;
use tracing::Level;

/// Line that separates the chunks of an input when `--split-input-file` is
/// set.
pub const SPLIT_MARKER: &str = "// -----";

// Options that every translation tool has.
#[derive(Args, Debug)]
struct TranslateArgs {
    /// The input file (- is interpreted as stdin)
    #[arg(default_value = "-")]
    input: String,
    /// The output file (- is interpreted as stdout)
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: String,
    /// Split the input on `// -----` and translate each chunk separately
    #[arg(long = "split-input-file")]
    split_input_file: bool,
    /// Print debug information
    #[arg(long)]
    debug: bool,
}

/// Parsed command line of a translation tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslateOptions {
    pub translation: &'static str,
    pub input: String,
    pub output: String,
    pub split_input_file: bool,
    pub debug: bool,
}

impl TranslateOptions {
    /// Options that read stdin, write stdout, and run `translation` once.
    pub fn new(translation: &'static str) -> TranslateOptions {
        TranslateOptions {
            translation,
            input: "-".to_string(),
            output: "-".to_string(),
            split_input_file: false,
            debug: false,
        }
    }
    pub fn from_matches(
        registry: &TranslationRegistry,
        matches: &ArgMatches,
    ) -> Result<TranslateOptions> {
        let args = TranslateArgs::from_arg_matches(matches)?;
        let selected = registry
            .names()
            .into_iter()
            .filter(|name| matches.get_flag(name))
            .collect::<Vec<&'static str>>();
        let translation = match selected.as_slice() {
            [translation] => *translation,
            [] => return Err(anyhow::anyhow!("No translation selected")),
            _ => {
                return Err(anyhow::anyhow!(
                    "Only one translation can be selected, got: {}",
                    selected.join(", ")
                ))
            }
        };
        Ok(TranslateOptions {
            translation,
            input: args.input,
            output: args.output,
            split_input_file: args.split_input_file,
            debug: args.debug,
        })
    }
}

/// Command line interface with a flag for every translation in `registry`.
pub fn cli(registry: &TranslationRegistry, description: &'static str) -> Command {
    let cli = Command::new("graphblas-translate").args(registry.arguments());
    let cli = if registry.is_empty() {
        cli
    } else {
        let group = ArgGroup::new("translation")
            .args(registry.names())
            .required(true)
            .multiple(false);
        cli.group(group)
    };
    TranslateArgs::augment_args(cli)
        .about(description)
        .version(env!("CARGO_PKG_VERSION"))
}

/// Initialize logging with the given level.
///
/// Logs go to stderr so that they do not end up in the translated output.
pub fn init_subscriber(level: Level) -> Result<(), SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

/// Split `src` into chunks on lines that consist of [SPLIT_MARKER].
///
/// The marker lines themselves are not part of any chunk.
pub fn split_input(src: &str) -> Vec<&str> {
    let mut chunks = vec![];
    let mut start = 0;
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let end = offset + line.len();
        if line.trim() == SPLIT_MARKER {
            chunks.push(&src[start..offset]);
            start = end;
        }
        offset = end;
    }
    chunks.push(&src[start..]);
    chunks
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Run the translation that is selected in `options` on `src`.
///
/// With `--split-input-file`, every chunk is translated even if an earlier
/// chunk failed. The call fails if any chunk failed. Chunks that hold only
/// whitespace and comments (e.g., after a trailing `// -----`) are skipped.
pub fn translate(
    registry: &TranslationRegistry,
    options: &TranslateOptions,
    src: &str,
) -> Result<String> {
    let translation = registry
        .get(options.translation)
        .ok_or_else(|| anyhow::anyhow!("Unknown translation: {}", options.translation))?;
    tracing::debug!("Translating with {translation}");
    if !options.split_input_file {
        return translation.run(src).map(with_newline);
    }

    let chunks = split_input(src)
        .into_iter()
        .filter(|chunk| !is_blank(chunk))
        .collect::<Vec<&str>>();
    tracing::debug!("Split input into {} chunks", chunks.len());
    if chunks.is_empty() {
        return Err(anyhow::anyhow!("Input does not contain any chunks"));
    }
    let mut outputs = vec![];
    let mut failed = 0;
    for (i, chunk) in chunks.iter().enumerate() {
        match translation.run(chunk) {
            Ok(output) => outputs.push(with_newline(output)),
            Err(err) => {
                tracing::error!("Chunk {i} failed: {err:#}");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        return Err(anyhow::anyhow!(
            "{failed} of {} chunks failed to translate",
            chunks.len()
        ));
    }
    Ok(outputs.join(&format!("{SPLIT_MARKER}\n")))
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read input file \"{input}\""))
    }
}

fn write_output(output: &str, text: &str) -> Result<()> {
    if output == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")?;
        stdout.flush().context("Failed to write to stdout")
    } else {
        std::fs::write(output, text)
            .with_context(|| format!("Failed to write output file \"{output}\""))
    }
}

/// Entry point of a translation tool.
///
/// Parses `args`, reads the input, runs the selected translation, and writes
/// the output. Command line errors are returned as [clap::Error] so that the
/// caller can let clap print them (this includes `--help`).
pub fn translate_main<I, T>(
    registry: &TranslationRegistry,
    args: I,
    description: &'static str,
) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = cli(registry, description).try_get_matches_from(args)?;
    let options = TranslateOptions::from_matches(registry, &matches)?;
    let level = if options.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    if let Err(err) = init_subscriber(level) {
        tracing::debug!("Logging was already initialized: {err}");
    }

    tracing::debug!("Reading input from {}", options.input);
    let src = read_input(&options.input)?;
    let result = translate(registry, &options, &src)?;
    tracing::debug!("Writing output to {}", options.output);
    write_output(&options.output, &result)
}
