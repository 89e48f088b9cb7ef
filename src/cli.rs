//! Command-line interface for relocating recorded findings.

use std::fs;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;

use crate::finder::Matcher;
use crate::query::{MatchQuery, MatchTypeHint};
use crate::result::{DEFAULT_LINE_HINT_THRESHOLD, MatchResult, best_match};

#[derive(Parser)]
#[command(name = "refind")]
#[command(about = "Relocate recorded code findings in changed source files")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find where a recorded snippet now lives in a file
    Find(FindArgs),
}

#[derive(Args)]
pub struct FindArgs {
    /// File to search
    pub file: Utf8PathBuf,

    /// The recorded snippet to locate
    #[arg(short, long)]
    pub text: String,

    /// 1-based line the snippet was last seen on
    #[arg(short, long)]
    pub line: u32,

    /// Signature of the enclosing function (e.g. Namespace::Class::Method)
    #[arg(short, long)]
    pub signature: Option<String>,

    /// What the snippet refers to
    #[arg(long, value_enum, default_value = "code")]
    pub hint_type: HintType,

    /// Require whole-token matches
    #[arg(long)]
    pub whole_tokens: bool,

    /// Print every candidate instead of just the best one
    #[arg(long)]
    pub all: bool,

    /// Maximum line distance for matches without a verified scope
    #[arg(long, default_value_t = DEFAULT_LINE_HINT_THRESHOLD)]
    pub threshold: u32,

    /// Prefer occurrences inside string literals
    #[arg(long)]
    pub prefer_strings: bool,

    /// Narrow to the signature's scopes before scanning instead of
    /// grading scopes after a full scan
    #[arg(long)]
    pub scope_first: bool,

    /// Emit JSON instead of human-readable lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HintType {
    Code,
    Function,
    Class,
}

impl From<HintType> for MatchTypeHint {
    fn from(hint: HintType) -> Self {
        match hint {
            HintType::Code => Self::Code,
            HintType::Function => Self::Function,
            HintType::Class => Self::Class,
        }
    }
}

pub fn find_run(args: &FindArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file))?;
    let matcher = Matcher::from_path(args.file.as_str(), contents);

    let mut query = MatchQuery::new(&args.text, args.line)
        .with_type_hint(args.hint_type.into())
        .with_whole_tokens(args.whole_tokens);
    if let Some(signature) = &args.signature {
        query = query.with_signature(signature);
    }

    let matches = if args.scope_first {
        matcher.find_matches(&query)
    } else {
        matcher.find_matches_v2(&query)
    };

    if args.all {
        return print_all(args, &matches);
    }

    match best_match(&matches, args.threshold, args.prefer_strings) {
        Some(best) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(best)?);
            } else {
                print_match(args, best, true);
            }
            Ok(())
        }
        None => anyhow::bail!(
            "no confident match for {:?} near line {} in {} ({} candidate(s) rejected)",
            args.text,
            args.line,
            args.file,
            matches.len()
        ),
    }
}

fn print_all(args: &FindArgs, matches: &[MatchResult]) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        eprintln!("{} no occurrences found", "note:".yellow().bold());
        return Ok(());
    }

    let best = best_match(matches, args.threshold, args.prefer_strings);
    for m in matches {
        print_match(args, m, best == Some(m));
    }
    Ok(())
}

fn print_match(args: &FindArgs, m: &MatchResult, best: bool) {
    let marker = if best { "*".green().bold().to_string() } else { " ".to_string() };
    let scope = match (m.scope_checked, m.scope_match) {
        (true, Some(delta)) => format!("scope {delta:+}"),
        (true, None) => "scope mismatch".to_string(),
        (false, _) => "scope unchecked".to_string(),
    };
    let literal = if m.string_literal { " [string]" } else { "" };

    println!(
        "{} {}:{}  bytes {}-{}  {} lines from hint  {}{}",
        marker,
        args.file.cyan(),
        m.line,
        m.span.start,
        m.span.end,
        m.distance,
        scope,
        literal
    );
}
