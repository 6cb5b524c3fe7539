//! Downline CLI - inspect materialized genealogy tree slices
//!
//! Usage: downline <COMMAND>
//!
//! Commands:
//!   inspect  Materialize a captured snapshot and print the member list
//!   pages    Show the pagination window a snapshot reports
//!   query    Print the request parameters for a set of filters

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use unicode_width::UnicodeWidthStr;

use downline::{
    load_or_default, materialize, FragmentSource, JsonFileSource, Member, MergeOutcome,
    PageWindow, SideFilter, TreeQuery,
};

/// Downline - materialization engine for paginated binary genealogy trees
#[derive(Parser, Debug)]
#[command(name = "downline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a viewer config TOML
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Materialize a captured snapshot JSON file and print the member list
    Inspect {
        /// Path to a RootSnapshot JSON capture
        snapshot: PathBuf,

        /// Branch filter: left, right or both
        #[arg(long, value_parser = parse_side)]
        side: Option<SideFilter>,

        /// Minimum depth (inclusive)
        #[arg(long)]
        min_depth: Option<u32>,

        /// Maximum depth (inclusive)
        #[arg(long)]
        max_depth: Option<u32>,

        /// Emit the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the pagination window a snapshot reports
    Pages {
        /// Path to a RootSnapshot JSON capture
        snapshot: PathBuf,

        /// Branch filter: left, right or both
        #[arg(long, value_parser = parse_side)]
        side: Option<SideFilter>,
    },

    /// Print the request parameters for a set of filters
    Query {
        /// Root node id
        root_id: i64,

        /// Branch filter: left, right or both
        #[arg(long, value_parser = parse_side)]
        side: Option<SideFilter>,

        /// 1-based page
        #[arg(long)]
        page: Option<u32>,

        /// Page size (1-100)
        #[arg(long)]
        page_size: Option<u32>,

        /// Minimum depth (inclusive)
        #[arg(long)]
        min_depth: Option<u32>,

        /// Maximum depth (inclusive)
        #[arg(long)]
        max_depth: Option<u32>,
    },
}

fn parse_side(raw: &str) -> Result<SideFilter, String> {
    match raw.to_lowercase().as_str() {
        "left" => Ok(SideFilter::Left),
        "right" => Ok(SideFilter::Right),
        "both" => Ok(SideFilter::Both),
        other => Err(format!("unknown side '{other}' (expected left, right or both)")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref());

    match cli.command {
        Commands::Inspect {
            snapshot,
            side,
            min_depth,
            max_depth,
            json,
        } => {
            let query = TreeQuery::new(0)
                .with_side(side.unwrap_or(config.side))
                .with_page_size(config.page_size)
                .with_depth_bounds(
                    min_depth.or(config.min_depth),
                    max_depth.or(config.max_depth),
                );
            let outcome = materialize_file(&snapshot, &query)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.members)?);
            } else {
                print_members(&outcome.members);
            }
            for anomaly in &outcome.report.anomalies {
                eprintln!("warning: {anomaly}");
            }
        }

        Commands::Pages { snapshot, side } => {
            let source = JsonFileSource::new(&snapshot);
            let root = source
                .fetch(&TreeQuery::new(0))
                .with_context(|| format!("loading snapshot {}", snapshot.display()))?;
            let window = PageWindow::from_snapshot(&root, side.unwrap_or(config.side));
            println!("total_pages: {}", window.total_pages);
            println!("has_next: {}", window.has_next);
            println!("has_previous: {}", window.has_previous);
        }

        Commands::Query {
            root_id,
            side,
            page,
            page_size,
            min_depth,
            max_depth,
        } => {
            let query = TreeQuery::new(root_id)
                .with_side(side.unwrap_or(config.side))
                .with_page(page.unwrap_or(1))
                .with_page_size(page_size.unwrap_or(config.page_size))
                .with_depth_bounds(
                    min_depth.or(config.min_depth),
                    max_depth.or(config.max_depth),
                );
            query.validate()?;
            println!("{}", query.query_string());
        }
    }

    Ok(())
}

fn materialize_file(path: &Path, query: &TreeQuery) -> Result<MergeOutcome> {
    let source = JsonFileSource::new(path);
    let snapshot = source
        .fetch(query)
        .with_context(|| format!("loading snapshot {}", path.display()))?;
    let outcome = materialize(&snapshot, query)?;
    Ok(outcome)
}

const COLUMNS: [&str; 7] = ["id", "name", "level", "side", "parent", "referrals", "earnings"];

fn print_members(members: &[Member]) {
    let rows: Vec<[String; 7]> = members
        .iter()
        .map(|member| {
            [
                member.id.to_string(),
                member.display_name.clone(),
                member.level.to_string(),
                member.position.as_str().to_string(),
                member.parent_name.clone(),
                member.descendant_count.to_string(),
                format!("{:.2}", member.metric_value),
            ]
        })
        .collect();

    if !std::io::stdout().is_terminal() {
        for row in &rows {
            println!("{}", row.join("\t"));
        }
        return;
    }

    let mut widths: Vec<usize> = COLUMNS.iter().map(|name| name.width()).collect();
    for row in &rows {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.width());
        }
    }

    print_row(&COLUMNS.map(String::from), &widths);
    for row in &rows {
        print_row(row, &widths);
    }
    println!("{} member(s)", rows.len());
}

fn print_row(cells: &[String; 7], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let padding = width.saturating_sub(cell.width());
            format!("{}{}", cell, " ".repeat(padding))
        })
        .collect();
    println!("{}", line.join("  ").trim_end());
}
