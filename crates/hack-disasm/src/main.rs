use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use hack_disasm::{disassemble, load_rom, LineOut};

#[derive(Parser, Debug)]
#[command(author, version, about = "Hack ROM lister and disassembler", long_about = None)]
struct Cli {
    /// Input .hack file
    #[arg(value_name = "HACKFILE")]
    input: PathBuf,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every ROM word with its address
    List,
    /// Disassemble the whole ROM
    Disasm {
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn render_text(lines: &[LineOut]) -> String {
    let mut buf = String::new();
    for l in lines {
        let _ = writeln!(buf, "{:5}: {}  {}", l.addr, l.word, l.text);
    }
    buf
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rom = load_rom(&cli.input).with_context(|| format!("loading {}", cli.input.display()))?;
    debug!(words = rom.words.len(), "rom loaded");

    match cli.cmd {
        Command::List => {
            for (addr, w) in rom.words.iter().enumerate() {
                println!("{addr:5}: {w}");
            }
        }
        Command::Disasm { format, out } => {
            let lines = disassemble(&rom);
            let text = match format {
                OutputFormat::Text => render_text(&lines),
                OutputFormat::Json => serde_json::to_string_pretty(&lines)? + "\n",
            };
            match out {
                Some(path) => std::fs::write(&path, text)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => print!("{text}"),
            }
        }
    }

    Ok(())
}
