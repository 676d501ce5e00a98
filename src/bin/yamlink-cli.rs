use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use yamlink::reload::loader::read_document;

/// Older scripts name the mapping file through this variable.
const CONFIG_FILE_ENV: &str = "CONFIG_FILE";
const DEFAULT_MAP_FILE: &str = "mapping.yaml";

#[derive(Parser)]
#[command(name = "yamlink-cli")]
#[command(about = "Resolve a single path against a yamlink mapping file", long_about = None)]
struct Cli {
    /// Mapping file to resolve against [env: MAP_FILE, then CONFIG_FILE]
    /// [default: mapping.yaml]
    #[arg(short, long, env = "MAP_FILE")]
    map_file: Option<PathBuf>,

    /// Lookup path, e.g. "team/docs/1".
    query: String,
}

/// `--map-file` or `MAP_FILE` first, then `CONFIG_FILE`, then the default.
fn mapping_path(map_file: Option<PathBuf>, config_file: Option<OsString>) -> PathBuf {
    map_file
        .or_else(|| config_file.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MAP_FILE))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let map_file = mapping_path(cli.map_file, std::env::var_os(CONFIG_FILE_ENV));

    let (document, _) = match read_document(&map_file) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match document.lookup(&cli.query) {
        Ok(value) => {
            print!("{}", value);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}: {}", cli.query, e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_path_precedence() {
        assert_eq!(
            mapping_path(Some("a.yaml".into()), Some("b.yaml".into())),
            PathBuf::from("a.yaml")
        );
        assert_eq!(mapping_path(None, Some("b.yaml".into())), PathBuf::from("b.yaml"));
        assert_eq!(mapping_path(None, Some("".into())), PathBuf::from(DEFAULT_MAP_FILE));
        assert_eq!(mapping_path(None, None), PathBuf::from(DEFAULT_MAP_FILE));
    }

    #[test]
    fn test_cli_parses_query_and_flag() {
        let cli = Cli::try_parse_from(["yamlink-cli", "--map-file", "links.yaml", "team/docs/1"])
            .unwrap();
        assert_eq!(cli.map_file, Some(PathBuf::from("links.yaml")));
        assert_eq!(cli.query, "team/docs/1");
    }
}
