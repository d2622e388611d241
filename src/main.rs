// recurtty: step-by-step recursion visualizer

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use recurtty::algorithms::Algorithm;
use recurtty::export;
use recurtty::playback::Playback;
use recurtty::replay::Rod;
use recurtty::ui::App;

/// Visualize recursive calls step by step.
#[derive(Parser)]
#[command(name = "recurtty", version, about)]
struct Cli {
    /// Algorithm to trace
    #[arg(value_enum)]
    algorithm: Algorithm,

    /// Input n (number of disks for hanoi). Defaults per algorithm.
    #[arg(allow_negative_numbers = true)]
    n: Option<i64>,

    /// Step to show (default: last step for exports, first step in the TUI)
    #[arg(short, long)]
    step: Option<usize>,

    /// Print the call tree at STEP as Graphviz DOT and exit
    #[arg(long, conflicts_with_all = ["json", "plain"])]
    dot: bool,

    /// Print the full trace as JSON and exit
    #[arg(long, conflicts_with = "plain")]
    json: bool,

    /// Print a plain-text walkthrough up to STEP and exit
    #[arg(long)]
    plain: bool,

    /// Accept n outside the algorithm's usual range
    #[arg(long)]
    force: bool,

    /// Milliseconds between steps in auto-play mode
    #[arg(long, default_value_t = 1000)]
    interval: u64,

    /// Write logs here instead of stderr (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let algorithm = cli.algorithm;
    let n = cli.n.unwrap_or_else(|| algorithm.default_input());
    let range = algorithm.input_range();
    if !range.contains(&n) && !cli.force {
        eprintln!(
            "Error: {} takes n in {}..={} (got {}); pass --force to run anyway",
            algorithm.name(),
            range.start(),
            range.end(),
            n
        );
        std::process::exit(1);
    }
    if let Some(warning) = algorithm.warning(n) {
        eprintln!("Warning: {}", warning);
    }

    let run = algorithm.run(n);
    if let Err(e) = &run.outcome {
        eprintln!("{}({}) raised: {}", algorithm.name(), n, e);
    }

    if cli.json {
        println!("{}", export::to_json(&run)?);
        return Ok(());
    }

    let mut playback = Playback::new(run);
    if cli.dot || cli.plain {
        playback.seek(cli.step.unwrap_or(playback.total_steps()))?;
        if cli.dot {
            print!("{}", export::to_dot(&playback.tree()?));
        } else {
            print_walkthrough(&playback)?;
        }
        return Ok(());
    }

    if let Some(step) = cli.step {
        playback.seek(step)?;
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(playback, Duration::from_millis(cli.interval));
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Print each event up to the current step, then the final tree and rods
fn print_walkthrough(playback: &Playback) -> Result<(), Box<dyn std::error::Error>> {
    let trace = playback.trace();
    for step in 1..=playback.position() {
        if let Some(narrative) = recurtty::replay::narrative::describe(trace, step)? {
            println!("[{:>3}/{}] {}", step, narrative.total, narrative.headline);
            for detail in &narrative.details {
                println!("          {}", detail);
            }
        }
    }

    let tree = playback.tree()?;
    println!();
    for node in &tree.nodes {
        let ret = node
            .return_label
            .as_ref()
            .map(|r| format!(" = {}", r))
            .unwrap_or_default();
        println!("#{:<3} {:?} {}{}", node.id, node.status, node.label, ret);
    }

    if let Some(rods) = playback.rods()? {
        println!();
        for rod in Rod::ALL {
            println!("{}: {:?}", rod, rods.rod(rod));
        }
    }
    Ok(())
}
