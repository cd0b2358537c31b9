//! Main application entry point.

use sketchsnap_app::{Script, ShortcutRegistry, describe};
use sketchsnap_core::{Editor, EngineConfig};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "Usage: sketchsnap [--config <config.json>] <script.json>\n       sketchsnap --shortcuts";

/// Parsed command line.
enum Command {
    Shortcuts,
    Replay {
        config: Option<PathBuf>,
        script: PathBuf,
    },
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let mut config = None;
    let mut script = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--shortcuts" => return Ok(Command::Shortcuts),
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            _ if script.is_none() && !arg.starts_with("--") => script = Some(PathBuf::from(&arg)),
            _ => return Err(format!("Unexpected argument: {}", arg)),
        }
    }
    let script = script.ok_or("Missing script path")?;
    Ok(Command::Replay { config, script })
}

fn run(config: Option<PathBuf>, script: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => EngineConfig::load(&path)?,
        None => EngineConfig::default(),
    };
    let script = Script::load(&script)?;

    let mut editor = Editor::new(config);
    script.replay(&mut editor);

    let lines = describe(editor.document());
    log::info!("Replay finished with {} shapes", lines.len());
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting SketchSnap");

    match parse_args(std::env::args().skip(1)) {
        Ok(Command::Shortcuts) => {
            ShortcutRegistry::print_all();
            ExitCode::SUCCESS
        }
        Ok(Command::Replay { config, script }) => match run(config, script) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{}", e);
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(message) => {
            eprintln!("{}\n{}", message, USAGE);
            ExitCode::from(2)
        }
    }
}
