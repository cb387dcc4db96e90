//! Shoe Export Reconciler CLI
//!
//! Command-line tool for combining vertical shoe dumps with cut-hit
//! statistics, summarizing averages, and rendering deck grids.

use clap::{Parser, Subcommand};
use shoe_core::{
    build_grid, codec, combine_to_csv, flatten_colors, load_rounds, order_by_start, suit_counts,
    GridCell, Highlight, StatisticsTable, Suit, COMBINED_EXPORT_FILENAME,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "shoe-cli")]
#[command(about = "Shoe Export Reconciler", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine a vertical card dump with a cut-hit statistics CSV
    Combine {
        /// Path to the vertical dump (one card label per line)
        #[arg(short, long)]
        vertical: PathBuf,

        /// Path to the cut-hit statistics CSV
        #[arg(short, long)]
        stats: PathBuf,

        /// Output file path (defaults to combined_hits_vertical.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Append a timestamp to the output filename
        #[arg(long)]
        timestamp: bool,
    },

    /// Print the average summary from a statistics CSV
    Summary {
        /// Path to the cut-hit statistics CSV
        #[arg(short, long)]
        stats: PathBuf,
    },

    /// Render the shoe as a 26x16 deck grid
    Grid {
        /// Path to the vertical dump
        #[arg(short, long)]
        vertical: PathBuf,

        /// Path to a rounds JSON file providing color sequences
        #[arg(short, long)]
        rounds: Option<PathBuf>,

        /// Signal suit to emphasize (letter or symbol)
        #[arg(long)]
        signal: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Tally cards per suit across a rounds JSON file
    Suits {
        /// Path to a rounds JSON file
        #[arg(short, long)]
        rounds: PathBuf,
    },

    /// List rounds in shoe order with outcomes and markers
    Rounds {
        /// Path to a rounds JSON file
        #[arg(short, long)]
        rounds: PathBuf,
    },

    /// Parse and display a CSV file
    Parse {
        /// Path to CSV file
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> shoe_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Combine {
            vertical,
            stats,
            output,
            timestamp,
        } => cmd_combine(&vertical, &stats, output, timestamp),
        Commands::Summary { stats } => cmd_summary(&stats),
        Commands::Grid {
            vertical,
            rounds,
            signal,
            format,
            output,
        } => cmd_grid(&vertical, rounds, signal, &format, output),
        Commands::Suits { rounds } => cmd_suits(&rounds),
        Commands::Rounds { rounds } => cmd_rounds(&rounds),
        Commands::Parse { file } => cmd_parse(&file),
    }
}

fn read_text(path: &Path) -> shoe_core::Result<String> {
    fs::read_to_string(path).map_err(|e| shoe_core::Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse_signal(signal: Option<String>) -> shoe_core::Result<Option<Suit>> {
    match signal {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => Suit::parse(&raw)
            .map(Some)
            .ok_or(shoe_core::Error::SignalSuit(raw)),
    }
}

/// Insert a timestamp before the extension, matching the upstream
/// `cut_hits_<ts>.csv` download naming
fn timestamped(path: &Path) -> PathBuf {
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("export");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("csv");
    path.with_file_name(format!("{stem}_{ts}.{ext}"))
}

fn cmd_combine(
    vertical: &Path,
    stats_path: &Path,
    output: Option<PathBuf>,
    timestamp: bool,
) -> shoe_core::Result<()> {
    let cards = codec::lines(&read_text(vertical)?);
    let stats = StatisticsTable::parse(&read_text(stats_path)?);

    let csv = combine_to_csv(&cards, &stats)?;

    let mut out_path = output.unwrap_or_else(|| PathBuf::from(COMBINED_EXPORT_FILENAME));
    if timestamp {
        out_path = timestamped(&out_path);
    }
    fs::write(&out_path, csv)?;

    println!(
        "Combined {} data rows with {} cards into {}",
        stats.data_rows.len(),
        cards.len(),
        out_path.display()
    );

    match stats.average_summary() {
        Some(summary) => {
            println!("Average hits:   {:.3}", summary.avg_hit);
            println!("Average rounds: {:.3}", summary.avg_rounds);
        }
        None => println!("No average rows in statistics."),
    }

    Ok(())
}

fn cmd_summary(stats_path: &Path) -> shoe_core::Result<()> {
    let stats = StatisticsTable::parse(&read_text(stats_path)?);

    println!("File: {}", stats_path.display());
    println!("Data rows: {}", stats.data_rows.len());
    println!("Average rows: {}", stats.average_rows.len());

    match stats.average_summary() {
        Some(summary) => {
            println!();
            println!("Average hits:   {:.3}", summary.avg_hit);
            println!("Average rounds: {:.3}", summary.avg_rounds);
        }
        None => println!("No average summary available."),
    }

    Ok(())
}

fn cmd_grid(
    vertical: &Path,
    rounds_path: Option<PathBuf>,
    signal: Option<String>,
    format: &str,
    output: Option<PathBuf>,
) -> shoe_core::Result<()> {
    let cards = codec::lines(&read_text(vertical)?);

    let color_seq = match rounds_path {
        Some(path) => flatten_colors(&load_rounds(path)?),
        None => String::new(),
    };
    let signal = parse_signal(signal)?;

    let grid = build_grid(&cards, &color_seq, signal);

    let rendered = match format.to_lowercase().as_str() {
        "text" => render_grid_text(&grid),
        "json" => serde_json::to_string_pretty(&grid)?,
        _ => {
            eprintln!("Unknown format: {}. Supported formats: text, json", format);
            std::process::exit(1);
        }
    };

    match output {
        Some(path) => {
            fs::write(&path, rendered)?;
            println!("Wrote grid to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn cmd_suits(rounds_path: &Path) -> shoe_core::Result<()> {
    let rounds = load_rounds(rounds_path)?;
    let counts = suit_counts(&rounds, &[]);

    for suit in Suit::ALL {
        println!(
            "{} {} ({}): {}",
            suit.symbol(),
            suit.display_name(),
            suit.letter(),
            counts.get(suit)
        );
    }
    println!("Total: {}", counts.total());

    Ok(())
}

fn cmd_rounds(rounds_path: &Path) -> shoe_core::Result<()> {
    let rounds = load_rounds(rounds_path)?;
    let ordered = order_by_start(&rounds);

    println!(
        "{:<6} {:<8} {:<24} {:<18} {:<18} {:<5} {:<5} {:<14} {}",
        "#", "result", "cards", "player", "banker", "p", "b", "colors", "sidx"
    );

    for (index, round) in ordered.iter().enumerate() {
        let index_label = if round.is_tail {
            "尾局".to_string()
        } else {
            (index + 1).to_string()
        };
        let result = round
            .outcome()
            .map(|o| o.to_string())
            .unwrap_or_else(|| round.result.clone());
        let cards: Vec<String> = round.cards.iter().map(|c| c.label()).collect();
        let sidx = if round.is_sidx {
            if round.s_idx_ok { "♥" } else { "✖" }
        } else {
            ""
        };

        println!(
            "{:<6} {:<8} {:<24} {:<18} {:<18} {:<5} {:<5} {:<14} {}",
            index_label,
            result,
            cards.join(" "),
            round.player.join("/"),
            round.banker.join("/"),
            round.player_point.map(|p| p.to_string()).unwrap_or_default(),
            round.banker_point.map(|p| p.to_string()).unwrap_or_default(),
            round.color_seq.flattened(),
            sidx
        );
    }

    Ok(())
}

fn cmd_parse(file: &Path) -> shoe_core::Result<()> {
    let rows = codec::parse(&read_text(file)?);

    println!("File: {}", file.display());
    println!("Rows: {}", rows.len());
    println!();

    for row in rows.iter().take(10) {
        println!("{}", row.join("\t"));
    }

    if rows.len() > 10 {
        println!("... ({} more rows)", rows.len() - 10);
    }

    Ok(())
}

/// Render the grid as text: point value plus one marker character per cell
fn render_grid_text(grid: &[Vec<GridCell>]) -> String {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(cell_text)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn cell_text(cell: &GridCell) -> String {
    if cell.is_empty() {
        return "..".to_string();
    }
    let value = if cell.value.is_empty() {
        "?"
    } else {
        cell.value.as_str()
    };
    let marker = if cell.classes.contains(&Highlight::SignalMatch) {
        '*'
    } else if cell.classes.contains(&Highlight::ColorRed) {
        'R'
    } else if cell.classes.contains(&Highlight::ColorBlue) {
        'B'
    } else {
        '.'
    };
    format!("{value}{marker}")
}
