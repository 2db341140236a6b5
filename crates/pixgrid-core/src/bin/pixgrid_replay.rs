use pixgrid_core::{Board, BoardConfig, NullRenderer, PaintEngine, replay_script};
use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

struct Config {
    input: PathBuf,
    seed: Option<u64>,
}

fn print_usage() {
    eprintln!(
        "Usage: pixgrid_replay --input <file> [--seed <u64>]\n\
         \n\
         Replays a paint script and prints the final grid, one row of hex colors per line.\n\
         Grid limits come from PIXGRID_MAX_SIDE, PIXGRID_INITIAL_SIDE and PIXGRID_DEFAULT_COLOR.\n\
         \n\
         Example:\n\
           pixgrid_replay --input session.txt --seed 42"
    );
}

fn parse_args() -> Result<Config, String> {
    let mut args = env::args().skip(1);
    let mut input: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--input requires a value".to_string())?;
                input = Some(PathBuf::from(value));
            }
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--seed requires a value".to_string())?;
                seed = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| "invalid --seed value".to_string())?,
                );
            }
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            _ if input.is_none() && !arg.starts_with('-') => input = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument {arg:?}")),
        }
    }

    let input = input.ok_or_else(|| "missing --input".to_string())?;
    Ok(Config { input, seed })
}

fn run() -> Result<(), Box<dyn Error>> {
    let cfg = parse_args().inspect_err(|_| {
        print_usage();
    })?;

    #[cfg(feature = "tracing-json")]
    pixgrid_core::logging::init_json_logging().map_err(|err| err as Box<dyn Error>)?;

    let script = fs::read_to_string(&cfg.input)?;
    let engine = match cfg.seed {
        Some(seed) => PaintEngine::with_seed(seed),
        None => PaintEngine::new(),
    };
    let mut board = Board::with_engine(BoardConfig::from_env(), engine, NullRenderer);
    let summary = replay_script(&mut board, &script)?;

    for row in board.grid().to_hex_rows() {
        println!("{row}");
    }
    eprintln!(
        "{} commands, {} cell writes, {} gated enters, {} empty undo/redo",
        summary.commands, summary.cells_written, summary.gated, summary.empty_steps
    );
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("pixgrid_replay error: {err}");
        std::process::exit(1);
    }
}
