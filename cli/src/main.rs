use mapquiz_cli::{CliContext, logging, readline, respond};
use mapquiz_core::AppConfig;
use std::io::Write;

fn main() -> Result<(), String> {
    let _log_guard = logging::init();

    let config = AppConfig::load();
    let mut ctx = CliContext::new(config);
    tracing::info!(maps = ctx.quiz.catalog().len(), "Map quiz started");

    let mut stdout = std::io::stdout();
    while let Some(line) = readline()? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut ctx, &mut stdout) {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(stdout, "{err}").map_err(|e| e.to_string())?;
                stdout.flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}
