mod debug_report;

use saycalc::logging::{self, AuditConfig};
use saycalc::{Options, process_verbose_with};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

const LOG_FILE_ENV: &str = "SAYCALC_LOG_FILE";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let audit = AuditConfig { file: config.log_file.clone(), stderr: config.verbose, level: None };
    if audit.file.is_some() || audit.stderr {
        if let Err(err) = logging::init(&audit) {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }

    let opts = Options { precision: config.precision };
    let res = process_verbose_with(&config.input, &opts);

    if config.verbose {
        debug_report::print_run(&res, config.color);
    } else if config.json {
        match serde_json::to_string(&res.payload) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    } else {
        println!("{}", res.payload.display_text);
    }
}

struct CliConfig {
    input: String,
    precision: usize,
    json: bool,
    verbose: bool,
    color: bool,
    log_file: Option<PathBuf>,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut precision = Options::default().precision;
    let mut json = false;
    let mut verbose = false;
    let mut color = io::stdout().is_terminal();
    let mut log_file = std::env::var_os(LOG_FILE_ENV).filter(|v| !v.is_empty()).map(PathBuf::from);
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("saycalc {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--json" => json = true,
            "--verbose" | "-v" => verbose = true,
            "--precision" | "-p" => {
                let value = args.next().ok_or_else(|| "error: --precision expects a value".to_string())?;
                precision = parse_precision(&value)?;
            }
            "--log-file" => {
                let value = args.next().ok_or_else(|| "error: --log-file expects a value".to_string())?;
                log_file = Some(PathBuf::from(value));
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--precision=") => {
                precision = parse_precision(arg.trim_start_matches("--precision="))?;
            }
            _ if arg.starts_with("--log-file=") => {
                log_file = Some(PathBuf::from(arg.trim_start_matches("--log-file=")));
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') && !looks_numeric(&arg) => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, precision, json, verbose, color, log_file })
}

/// `-5 plus 3` is a command, not an option.
fn looks_numeric(arg: &str) -> bool {
    arg[1..].starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_precision(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n <= 15 => Ok(n),
        _ => Err(format!("error: invalid --precision '{value}' (expected 0..=15)")),
    }
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "saycalc {version}

Answer spoken-style arithmetic commands.

Usage:
  saycalc [OPTIONS] [--] <command...>
  saycalc [OPTIONS] --input <text>

Options:
  -i, --input <text>         Command to interpret. If omitted, reads remaining args
                             or stdin when no args are provided.
  -p, --precision <n>        Decimal places for non-integral results. Default: {precision}
  --json                     Print the response payload as JSON.
  -v, --verbose              Print the pipeline report and echo audit lines to stderr.
  --log-file <path>          Append audit lines to <path>. Default: ${log_env}
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  SAYCALC_DEBUG_RULES        Print normalizer and parser traces to stderr.

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        precision = Options::default().precision,
        log_env = LOG_FILE_ENV,
    )
}
