use mahjong_waits::report::{self, GroupQuery, MeldJson, WaitQuery};
use mahjong_waits::{NoTrace, StderrTrace, TraceSink};
use std::process::ExitCode;

const USAGE: &str = "\
Usage:
  mahjong-waits waits <hand> [--wildcards N] [--json] [--trace]
  mahjong-waits groups <hand> [--json] [--trace]
  mahjong-waits --version

Hands use compact notation, e.g. 1112345678999m or \"123m 456p 11s\".";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Waits,
    Groups,
    Version,
}

#[derive(Debug, PartialEq, Eq)]
struct Options {
    command: Command,
    hand: Vec<String>,
    wildcards: i32,
    json: bool,
    trace: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut iter = args.iter();
    let command = match iter.next().map(String::as_str) {
        Some("waits") => Command::Waits,
        Some("groups") => Command::Groups,
        Some("--version") => Command::Version,
        Some(other) => return Err(format!("Unknown command: {}", other)),
        None => return Err("Missing command".to_string()),
    };

    let mut options = Options {
        command,
        hand: Vec::new(),
        wildcards: 0,
        json: false,
        trace: false,
    };

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => options.json = true,
            "--trace" => options.trace = true,
            "--wildcards" | "-w" => {
                let value = iter.next().ok_or("--wildcards needs a value")?;
                options.wildcards = value
                    .parse()
                    .map_err(|_| format!("Invalid wildcard count: {}", value))?;
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option: {}", flag)),
            tiles => options.hand.push(tiles.to_string()),
        }
    }

    if options.command == Command::Groups && options.wildcards != 0 {
        return Err("--wildcards only applies to waits".to_string());
    }
    Ok(options)
}

fn run(options: Options) -> Result<(), String> {
    let mut stderr_trace = StderrTrace;
    let mut no_trace = NoTrace;
    let sink: &mut dyn TraceSink = if options.trace { &mut stderr_trace } else { &mut no_trace };

    match options.command {
        Command::Version => {
            println!("mahjong-waits {} ({})", env!("CARGO_PKG_VERSION"), env!("BUILD_COMMIT"));
            Ok(())
        }
        Command::Waits => {
            let query = WaitQuery {
                hand: options.hand,
                wildcards: options.wildcards,
            };
            let result = report::run_wait_query(&query, sink);
            if options.json {
                println!("{}", serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?);
            }
            if let Some(error) = result.error {
                return Err(error);
            }
            if !options.json {
                match result.waits.as_deref() {
                    Some([]) | None => println!("Not ready: no tile completes this hand"),
                    Some(waits) => println!("Waits ({:.2} ms): {}", result.elapsed_ms, waits.join(" ")),
                }
            }
            Ok(())
        }
        Command::Groups => {
            let query = GroupQuery { hand: options.hand };
            let result = report::run_group_query(&query, sink);
            if options.json {
                println!("{}", serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?);
            }
            if let Some(error) = result.error {
                return Err(error);
            }
            if !options.json {
                let candidates = result.candidates.unwrap_or_default();
                println!("{} groupings ({:.2} ms)", candidates.len(), result.elapsed_ms);
                for (i, candidate) in candidates.iter().enumerate() {
                    let melds: Vec<String> = candidate.melds.iter().map(describe).collect();
                    match &candidate.leftover {
                        Some(tile) => println!("  {}: {} | leftover {}", i + 1, melds.join(" "), tile),
                        None => println!("  {}: {}", i + 1, melds.join(" ")),
                    }
                }
            }
            Ok(())
        }
    }
}

fn describe(meld: &MeldJson) -> String {
    let (name, tiles) = match meld {
        MeldJson::Single { tiles } => ("single", tiles),
        MeldJson::Pair { tiles } => ("pair", tiles),
        MeldJson::Partial { tiles } => ("partial", tiles),
        MeldJson::Triplet { tiles } => ("triplet", tiles),
        MeldJson::Sequence { tiles } => ("sequence", tiles),
    };
    format!("{}[{}]", name, tiles.join(" "))
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_waits() {
        let options = parse_args(&args(&["waits", "123m", "456p", "-w", "2", "--json"])).unwrap();
        assert_eq!(options.command, Command::Waits);
        assert_eq!(options.hand, args(&["123m", "456p"]));
        assert_eq!(options.wildcards, 2);
        assert!(options.json);
        assert!(!options.trace);
    }

    #[test]
    fn test_parse_groups_with_trace() {
        let options = parse_args(&args(&["groups", "1123m", "--trace"])).unwrap();
        assert_eq!(options.command, Command::Groups);
        assert!(options.trace);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&args(&["solve"])).is_err());
        assert!(parse_args(&args(&["waits", "--wildcards"])).is_err());
        assert!(parse_args(&args(&["waits", "--wildcards", "x"])).is_err());
        assert!(parse_args(&args(&["waits", "--color"])).is_err());
        assert!(parse_args(&args(&["groups", "123m", "-w", "1"])).is_err());
    }

    #[test]
    fn test_describe_meld() {
        let meld = MeldJson::Sequence {
            tiles: args(&["4p", "5p", "6p"]),
        };
        assert_eq!(describe(&meld), "sequence[4p 5p 6p]");
    }

    #[test]
    fn test_negative_wildcards_parse_then_fail() {
        let options = parse_args(&args(&["waits", "1112345678999m", "-w", "-1"])).unwrap();
        assert_eq!(options.wildcards, -1);
        assert!(run(options).unwrap_err().contains("negative"));
    }
}
