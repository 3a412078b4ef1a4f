#![warn(clippy::pedantic)]

use std::cmp::Ordering;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pinyin_collate::weights::{CASE_FOLDING_ALPHABET, FULL_ALPHABET};
use pinyin_collate::{
    sort_records, sort_strings, CollationOptions, Collator, RankTable, RuleVariant, WeightMode,
    WeightTableCollator,
};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pinyin-collate", about = "Sort Hànyǔ Pīnyīn letter by letter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sort words (one per line) or, with --field, a JSON array of records
    Sort {
        /// Input file; stdin when omitted
        input: Option<PathBuf>,
        #[command(flatten)]
        collation: CollationArgs,
        #[arg(long)]
        reverse: bool,
        /// Record field holding the Pīnyīn
        #[arg(long)]
        field: Option<String>,
    },
    /// Compare two words and print <, = or >
    Compare {
        a: String,
        b: String,
        #[command(flatten)]
        collation: CollationArgs,
    },
    /// Write a rank table for a weight-table variant
    Table {
        #[arg(long, value_enum, default_value = "case-folding")]
        variant: VariantArg,
        #[arg(long)]
        output: PathBuf,
        /// Custom alphabet, in rank order
        #[arg(long)]
        alphabet: Option<String>,
    },
    /// Check that every line of a file collates at or after the line before it
    Check {
        input: PathBuf,
        #[command(flatten)]
        collation: CollationArgs,
    },
}

#[derive(clap::Args)]
struct CollationArgs {
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,
    /// Take input as-is instead of composing it to NFC
    #[arg(long)]
    raw: bool,
    /// JSON file with collation options
    #[arg(long)]
    options: Option<PathBuf>,
    /// Rank table written by `table`
    #[arg(long)]
    table: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    CaseFolding,
    FullAlphabet,
    Syllables,
}

impl From<VariantArg> for RuleVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::CaseFolding => RuleVariant::WeightTableCaseFolding,
            VariantArg::FullAlphabet => RuleVariant::WeightTableFullAlphabet,
            VariantArg::Syllables => RuleVariant::SyllableDecomposition,
        }
    }
}

impl CollationArgs {
    fn collator(&self) -> Result<Collator> {
        let mut options = match &self.options {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str::<CollationOptions>(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => CollationOptions::default(),
        };

        if let Some(variant) = self.variant {
            options.variant = variant.into();
        }
        if self.raw {
            options.normalize = false;
        }

        debug!(?options, "collation options");

        let Some(path) = &self.table else {
            return Ok(Collator::new(options));
        };

        let mode = match options.variant {
            RuleVariant::WeightTableCaseFolding => WeightMode::CaseFolding,
            RuleVariant::WeightTableFullAlphabet => WeightMode::FullAlphabet,
            RuleVariant::SyllableDecomposition => {
                bail!("--table only applies to weight-table variants")
            }
        };

        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let table = RankTable::from_bytes(&bytes)
            .with_context(|| format!("decoding rank table {}", path.display()))?;

        info!(size = table.len(), "loaded rank table");

        Ok(Collator::with_weight_table(
            WeightTableCollator::new(table, mode),
            options.normalize,
        ))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinyin_collate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Cli::parse().command {
        Command::Sort {
            input,
            collation,
            reverse,
            field,
        } => {
            let collator = collation.collator()?;
            let text = read_input(input.as_deref())?;

            if let Some(field) = field {
                let items: Vec<Value> =
                    serde_json::from_str(&text).context("input is not a JSON array")?;
                let sorted = sort_records(items, &collator, &field, reverse)?;
                println!("{}", serde_json::to_string_pretty(&sorted)?);
            } else {
                let words: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
                for word in sort_strings(words, &collator, reverse) {
                    println!("{word}");
                }
            }
        }
        Command::Compare { a, b, collation } => {
            let symbol = match collation.collator()?.compare(&a, &b) {
                Ordering::Less => "<",
                Ordering::Equal => "=",
                Ordering::Greater => ">",
            };
            println!("{symbol}");
        }
        Command::Table {
            variant,
            output,
            alphabet,
        } => {
            let alphabet = match (alphabet, variant) {
                (Some(alphabet), _) => alphabet,
                (None, VariantArg::CaseFolding) => CASE_FOLDING_ALPHABET.to_owned(),
                (None, VariantArg::FullAlphabet) => FULL_ALPHABET.to_owned(),
                (None, VariantArg::Syllables) => {
                    bail!("the syllable variant has no rank table")
                }
            };

            let table = RankTable::new(&alphabet)?;
            std::fs::write(&output, table.to_bytes()?)
                .with_context(|| format!("writing {}", output.display()))?;

            info!(size = table.len(), path = %output.display(), "wrote rank table");
        }
        Command::Check { input, collation } => {
            let collator = collation.collator()?;
            let lines = conformance(&input, &collator)?;

            println!("Passed {} ({lines} lines)", input.display());
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn conformance(path: &Path, collator: &Collator) -> Result<usize> {
    let test_data =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let mut max_line: Option<&str> = None;
    let mut count = 0;

    for (number, line) in test_data.lines().enumerate() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(previous) = max_line {
            if collator.compare(line, previous) == Ordering::Less {
                bail!(
                    "line {}: {line:?} sorts before {previous:?}",
                    number + 1
                );
            }
        }

        max_line = Some(line);
        count += 1;
    }

    Ok(count)
}
