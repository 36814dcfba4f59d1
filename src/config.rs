//! Command-line configuration for the terminal binary.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

pub const DEFAULT_STORE_PATH: &str = "blockfall-record.json";

pub const USAGE: &str = "\
blockfall - terminal falling-block puzzle

USAGE:
    blockfall [--seed <u32>] [--store <path>]

OPTIONS:
    --seed <u32>     Piece sequence seed (default: derived from the clock)
    --store <path>   High score file (default: blockfall-record.json)
    -h, --help       Print this help

KEYS:
    left/right, h/l, a/d   move          up, k, w   rotate clockwise
    down, j, s             soft drop     z          rotate counter-clockwise
    space                  hard drop     p, esc     pause / resume
    enter                  start         q, ctrl-c  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: Option<u32>,
    pub store_path: PathBuf,
    pub show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            show_help: false,
        }
    }
}

impl Config {
    /// The configured seed, or one taken from the wall clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Config> {
    let mut config = Config::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                let seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                config.seed = Some(seed);
            }
            "--store" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --store"))?;
                config.store_path = PathBuf::from(v);
            }
            "-h" | "--help" => config.show_help = true,
            other => {
                return Err(anyhow!("unknown argument: {} (try --help)", other));
            }
        }
        i += 1;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_arguments() {
        let cfg = parse_args(&[]).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.store_path, PathBuf::from("blockfall-record.json"));
    }

    #[test]
    fn parses_seed_and_store() {
        let cfg = parse_args(&args(&["--seed", "42", "--store", "/tmp/x.json"])).unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.seed_or_clock(), 42);
        assert_eq!(cfg.store_path, PathBuf::from("/tmp/x.json"));
    }

    #[test]
    fn help_flag() {
        assert!(parse_args(&args(&["-h"])).unwrap().show_help);
        assert!(parse_args(&args(&["--help"])).unwrap().show_help);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--seed", "-3"])).is_err());
        let err = parse_args(&args(&["--hold"])).unwrap_err();
        assert!(err.to_string().contains("--hold"));
    }
}
