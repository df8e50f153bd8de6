use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::commands;
use crate::context::CliContext;

/// Prompt and read one line. Returns `None` at end of input.
pub fn readline() -> Result<Option<String>, String> {
    write!(io::stdout(), "> ").map_err(|e| e.to_string())?;
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut buffer = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    Ok((read > 0).then_some(buffer))
}

#[derive(Parser)]
#[command(version, about = "map quiz", no_binary_name = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available maps
    Maps,
    /// Select a map to play
    Select {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        map: Vec<String>,
    },
    /// Guess a region name
    #[command(alias = "g")]
    Guess {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        name: Vec<String>,
    },
    /// Show progress on the current map
    Status,
    /// Forget all guesses for the current map
    Reset,
    /// Print or export the regions not guessed yet
    Missing {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Draw guessed labels onto the map and save it as PNG
    Render {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show the configuration, or write it to the config file
    Config {
        #[arg(long)]
        save: bool,
    },
    Exit,
}

/// Run one REPL line. Returns `Ok(true)` when the user asked to quit.
///
/// A line that does not start with a known command is taken as a guess.
/// Lines that are not valid shell quoting (names like `O'Neill`) fall back
/// to plain whitespace splitting.
pub fn respond(line: &str, ctx: &mut CliContext, out: &mut impl Write) -> Result<bool, String> {
    let args = shlex::split(line)
        .unwrap_or_else(|| line.split_whitespace().map(String::from).collect());
    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::InvalidSubcommand => {
            commands::guess(ctx, &args.join(" "), out).map_err(|e| e.to_string())?;
            return Ok(false);
        }
        Err(e) => return Err(e.to_string()),
    };

    let result = match &cli.command {
        Some(Commands::Maps) => commands::list_maps(ctx, out),
        Some(Commands::Select { map }) => commands::select_map(ctx, &map.join(" "), out),
        Some(Commands::Guess { name }) => commands::guess(ctx, &name.join(" "), out),
        Some(Commands::Status) => commands::show_status(ctx, out),
        Some(Commands::Reset) => commands::reset(ctx, out),
        Some(Commands::Missing { out: path }) => commands::missing(ctx, path.as_deref(), out),
        Some(Commands::Render { out: path }) => commands::render(ctx, path.as_deref(), out),
        Some(Commands::Config { save }) => commands::show_config(ctx, *save, out),
        Some(Commands::Exit) => {
            commands::exit(out).map_err(|e| e.to_string())?;
            return Ok(true);
        }
        None => Ok(()),
    };
    result.map_err(|e| e.to_string())?;
    Ok(false)
}
