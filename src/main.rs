//! CLI tool to inspect how PHP files tokenize.

use std::path::Path;
use std::process::ExitCode;

use phptokens::{Config, PhpVersion, TokenStore};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn usage() -> ExitCode {
    eprintln!("Usage: phptokens <command> [options] [files...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  dump    Print one line per token");
    eprintln!("  check   Report diagnostics, exit 1 if any");
    eprintln!("  scopes  Print every scope owner with its opener and closer");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --tab-width=N        Expand tabs to N columns");
    eprintln!("  --php-version=X.Y    Tokenize as the given revision reads it");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  phptokens dump index.php");
    eprintln!("  phptokens check --php-version=7.4 src/*.php");
    ExitCode::from(2)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("PHPTOKENS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        return usage();
    }

    let command = args[1].as_str();
    let mut config = Config::new();
    let mut files = Vec::new();
    for arg in &args[2..] {
        if let Some(width) = arg.strip_prefix("--tab-width=") {
            match width.parse() {
                Ok(width) => config = config.tab_width(width),
                Err(e) => {
                    eprintln!("Error: --tab-width: {e}");
                    return ExitCode::from(2);
                }
            }
        } else if let Some(version) = arg.strip_prefix("--php-version=") {
            match version.parse::<PhpVersion>() {
                Ok(version) => config = config.php_version(version),
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::from(2);
                }
            }
        } else if arg.starts_with("--") {
            eprintln!("Unknown option: {arg}");
            return ExitCode::from(2);
        } else {
            files.push(arg.as_str());
        }
    }

    if !matches!(command, "dump" | "check" | "scopes") {
        eprintln!("Unknown command: {command}");
        return ExitCode::from(2);
    }
    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let path = Path::new(path);
        if !config.accepts(path) {
            eprintln!("{}: skipped, not a PHP file", path.display());
            continue;
        }
        let store = match phptokens::tokenize_file(path, &config) {
            Ok(store) => store,
            Err(e) => {
                eprintln!("{e}");
                had_error = true;
                continue;
            }
        };

        match command {
            "dump" => dump(&store),
            "scopes" => scopes(&store),
            _ => {
                for diagnostic in store.diagnostics() {
                    eprintln!("{}: {diagnostic}", path.display());
                }
                if store.diagnostics().is_empty() {
                    eprintln!("{}: ok ({} tokens)", path.display(), store.len());
                } else {
                    had_error = true;
                }
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn dump(store: &TokenStore) {
    for token in store {
        println!(
            "{:>5} {:>4}:{:<3} {:<28} len={:<3} lvl={} {}",
            token.position,
            token.line,
            token.column,
            token.kind,
            token.length,
            token.nesting_level,
            token.text.escape_debug()
        );
    }
}

fn scopes(store: &TokenStore) {
    for token in store {
        let Some(scope) = token.scope.filter(|s| s.owner == token.position) else {
            continue;
        };
        let closer = scope
            .closer
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        println!(
            "{:>5} {:<24} opener={} closer={}",
            token.position, token.kind, scope.opener, closer
        );
    }
}
