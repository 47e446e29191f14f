#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! # sudoku-solver
//!
//! `sudoku-solver` is a command-line 9x9 Sudoku solver built around an
//! exhaustive backtracking search. Puzzles are supplied as plain text
//! (digits `1`-`9`, blanks as `0` or `.`, `#` comments; see the `parse`
//! module) and solved deterministically: the same input always produces the
//! same output.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a puzzle file (bare path behaves like the `file` subcommand)
//! sudoku-solver puzzle.sudoku
//! sudoku-solver file --path puzzle.sudoku
//!
//! # Puzzle supplied inline
//! sudoku-solver text --input "53..7....6..195... (81 cells)"
//!
//! # Solve every *.sudoku file under a directory tree
//! sudoku-solver dir --path puzzles/
//!
//! # Solve the built-in Wikipedia example
//! sudoku-solver example
//!
//! # Generate shell completions
//! sudoku-solver completions bash
//! ```
//!
//! ## Common options
//!
//! - `-p, --print-puzzle`: echo the parsed puzzle before solving.
//! - `--verify`: independently re-check the returned grid (default: on).
//! - `--stats`: print parse/solve timing, placement and backtrack counts,
//!   and memory usage (default: on).
//!
//! This file contains the entry point and CLI plumbing; the search engine
//! itself lives in the library's `solver` module.

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sudoku_solver::board::Board;
use sudoku_solver::parse::{parse_puzzle_file, parse_puzzle_text};
use sudoku_solver::solver::{EXAMPLE, SearchStats, SolveError, Solver};
use tikv_jemalloc_ctl::{epoch, stats};
use walkdir::WalkDir;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku-solver", version, about = "A backtracking Sudoku solver")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    path: Option<PathBuf>,

    /// The subcommand to execute (e.g. `file`, `text`, `dir`, `example`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a puzzle file.
    File {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle provided as plain text.
    Text {
        /// The puzzle as a string: 81 cells in row-major order, digits
        /// `1`-`9`, blanks as `0` or `.`, whitespace ignored.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `*.sudoku` file under a directory tree.
    Dir {
        /// Root of the directory tree to scan.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve the built-in Wikipedia example puzzle.
    Example {
        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Echo the parsed puzzle before solving.
    #[arg(short, long, default_value_t = false)]
    print_puzzle: bool,

    /// Independently re-check the returned grid against the Sudoku rules.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Print timing, search-effort and memory statistics after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,
}

/// The main entry point.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and manages the overall execution flow.
fn main() {
    let cli = Cli::parse();

    // A bare path without a subcommand defaults to solving a puzzle file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            solve_file(&path, &cli.common);
            return;
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),

        Some(Commands::Text { input, common }) => {
            let time = Instant::now();
            match parse_puzzle_text(&input) {
                Ok(board) => solve_and_report(board, &common, time.elapsed()),
                Err(e) => {
                    eprintln!("Error parsing puzzle text: {e}");
                    std::process::exit(1);
                }
            }
        }

        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),

        Some(Commands::Example { common }) => {
            solve_and_report(Board::from(EXAMPLE), &common, Duration::ZERO);
        }

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }

        None => {
            // Reached when neither a subcommand nor a bare path was given.
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

/// Parses and solves a single puzzle file.
fn solve_file(path: &Path, common: &CommonOptions) {
    let time = Instant::now();
    match parse_puzzle_file(path) {
        Ok(board) => solve_and_report(board, common, time.elapsed()),
        Err(e) => {
            eprintln!("Error parsing puzzle file {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

/// Solves every puzzle file under `root`, printing a one-line result per
/// file and a final tally.
fn solve_dir(root: &Path, common: &CommonOptions) {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .map(walkdir::DirEntry::into_path)
        .filter(|p| is_puzzle_file(p))
        .collect();
    // Deterministic batch order regardless of directory-walk order.
    files.sort();

    if files.is_empty() {
        eprintln!("No *.sudoku files found under {}", root.display());
        std::process::exit(1);
    }

    let mut solved = 0_usize;
    let mut failed = 0_usize;

    for path in &files {
        match parse_puzzle_file(path) {
            Ok(board) => {
                let mut solver = Solver::new(board);
                let time = Instant::now();
                match solver.solve() {
                    Ok(search) => {
                        solved += 1;
                        println!(
                            "{}: solved in {:.3}ms ({} placements, {} backtracks)",
                            path.display(),
                            time.elapsed().as_secs_f64() * 1000.0,
                            search.placements,
                            search.backtracks,
                        );
                        if common.verify {
                            assert!(
                                solver.board().is_solved(),
                                "solver returned an inconsistent grid for {}",
                                path.display()
                            );
                        }
                        if common.print_puzzle {
                            println!("{}", solver.board());
                        }
                    }
                    Err(e) => {
                        failed += 1;
                        println!("{}: {e}", path.display());
                    }
                }
            }
            Err(e) => {
                failed += 1;
                println!("{}: {e}", path.display());
            }
        }
    }

    println!("\n{} solved, {} failed, {} total", solved, failed, files.len());
}

/// Checks whether a path names a puzzle file the `dir` subcommand should pick up.
fn is_puzzle_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "sudoku")
}

/// Solves one board and prints the solution (or failure), optional
/// verification verdict, and optional statistics.
#[allow(clippy::cast_precision_loss)]
fn solve_and_report(board: Board, common: &CommonOptions, parse_time: Duration) {
    if common.print_puzzle {
        println!("Parsed puzzle:\n{board}");
    }

    let givens = sudoku_solver::board::CELLS - board.blanks();
    let mut solver = Solver::new(board);

    let time = Instant::now();
    let outcome = solver.solve();
    let elapsed = time.elapsed();

    // Advance the jemalloc epoch so the memory figures reflect the solve.
    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    match &outcome {
        Ok(_) => {
            println!("Solution:\n{}", solver.board());
            if common.verify {
                let ok = solver.board().is_solved();
                println!("Verified: {ok:?}");
                assert!(ok, "solver returned an inconsistent grid");
            }
        }
        Err(e) => println!("No solution found: {e}"),
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            givens,
            &outcome,
            allocated_mib,
            resident_mib,
        );
    }
}

/// Prints a single formatted statistic line.
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The value of the statistic, implementing `std::fmt::Display`.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {:<24} {:>12}  |", label, value);
}

/// Prints a statistic line together with its per-second rate.
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The raw count for the statistic.
/// * `elapsed` - The elapsed time in seconds, used to calculate the rate.
#[allow(clippy::cast_precision_loss)]
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {:<24} {:>12} ({:>9.0}/sec)  |", label, value, rate);
}

/// Prints a summary of puzzle and search statistics.
///
/// # Arguments
/// * `parse_time` - Duration spent parsing the input.
/// * `elapsed` - Duration spent by the solver.
/// * `givens` - Number of pre-filled cells in the input.
/// * `outcome` - The solve result with its `SearchStats` on success.
/// * `allocated` - Allocated memory in MiB.
/// * `resident` - Resident memory in MiB.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    givens: usize,
    outcome: &Result<SearchStats, SolveError>,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let search = (*outcome).unwrap_or_default();

    println!("\n=====================[ Puzzle Statistics ]=====================");
    stat_line("Parse time (s)", format!("{:.6}", parse_time.as_secs_f64()));
    stat_line("Givens", givens);
    stat_line("Blanks", search.blanks);

    println!("=====================[ Search Statistics ]=====================");
    stat_line_with_rate("Placements", search.placements, elapsed_secs);
    stat_line_with_rate("Backtracks", search.backtracks, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("Solve time (s)", format!("{elapsed_secs:.6}"));
    println!("===============================================================");

    if outcome.is_ok() {
        println!("\nSOLVED");
    } else {
        println!("\nUNSOLVABLE");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_puzzle_file_matches_extension_only() {
        // Non-existent paths are never puzzle files, whatever the extension.
        assert!(!is_puzzle_file(Path::new("missing/puzzle.sudoku")));
        assert!(!is_puzzle_file(Path::new("missing/notes.txt")));
    }

    #[test]
    fn test_is_puzzle_file_accepts_real_sudoku_file() {
        let dir = std::env::temp_dir().join("sudoku-solver-test-ext");
        std::fs::create_dir_all(&dir).unwrap();
        let puzzle = dir.join("a.sudoku");
        let other = dir.join("b.txt");
        std::fs::write(&puzzle, "whatever").unwrap();
        std::fs::write(&other, "whatever").unwrap();

        assert!(is_puzzle_file(&puzzle));
        assert!(!is_puzzle_file(&other));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
