use block_census::{execute, Census, CensusConfig, Command, Session, SparseWorld};
use std::error::Error;
use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: block-census <world.json> [config.json]

Reads commands from stdin, one per line:
  tp <x> <y> <z>       move to a position
  bc start | bc end    mark a corner at the current position
  bc count <filename>  count the marked region and save the report
  quit";

/// Parses `<x> <y> <z>`. NaN and infinities are refused since they have no
/// containing block.
fn parse_position(args: &[&str]) -> Option<(f64, f64, f64)> {
    let coord = |s: &str| s.parse::<f64>().ok().filter(|v| v.is_finite());
    match args {
        [x, y, z] => Some((coord(*x)?, coord(*y)?, coord(*z)?)),
        _ => None,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(world_path) = args.next() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };
    let config = match args.next() {
        Some(path) => CensusConfig::load(path)?,
        None => CensusConfig::default(),
    };

    let world = SparseWorld::load(&world_path)?;
    info!(
        "Loaded {} with {} placed blocks, fill {}",
        world_path,
        world.placed_count(),
        world.fill_block()
    );
    let census = Census::from_config(&config);
    let mut session = Session::new();
    let mut position = (0.0, 0.0, 0.0);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            ["tp", rest @ ..] => match parse_position(rest) {
                Some(pos) => {
                    position = pos;
                    writeln!(stdout, "Teleported to {:.2},{:.2},{:.2}", pos.0, pos.1, pos.2)?;
                }
                None => writeln!(stdout, "Error: tp needs three finite numbers")?,
            },
            _ => {
                let result = line
                    .parse::<Command>()
                    .and_then(|command| execute(&command, &census, &mut session, position, &world));
                match result {
                    Ok(message) => writeln!(stdout, "{}", message)?,
                    Err(e) => writeln!(stdout, "Error: {}", e)?,
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_position;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position(&["1.5", "-2", "300"]), Some((1.5, -2.0, 300.0)));
        assert_eq!(parse_position(&["1", "2"]), None);
        assert_eq!(parse_position(&["1", "2", "x"]), None);
    }

    #[test]
    fn test_parse_position_rejects_non_finite() {
        assert_eq!(parse_position(&["NaN", "0", "0"]), None);
        assert_eq!(parse_position(&["0", "inf", "0"]), None);
        assert_eq!(parse_position(&["0", "0", "-infinity"]), None);
    }
}
