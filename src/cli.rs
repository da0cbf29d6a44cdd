use clap::{value_parser, Arg, ArgAction, Command};
use std::io::{self, BufRead, Write};

pub const ROLE_PROMPT: &str =
    "Enter user role (student, teacher, staff, or district_admin) or 'n' for a single user: ";

pub fn build_cli() -> Command {
    Command::new("clever-api")
        .about("Fetch Clever resources and save them as JSON")
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .num_args(1)
                .help("Override RUST_LOG level (e.g., info, debug)"),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .help("Print version and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("role")
                .long("role")
                .num_args(1)
                .help("Users role filter (student, teacher, staff, district_admin) or 'n' for none; prompted when omitted"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .num_args(1)
                .help("Folder for the JSON files (default: CLEVER_OUTPUT_DIR or output_data)"),
        )
        .arg(
            Arg::new("limit")
                .long("limit")
                .num_args(1)
                .value_parser(value_parser!(u32))
                .default_value("1")
                .help("Page size requested for every resource"),
        )
}

pub fn init_logging(level: Option<&str>) {
    // Respect explicit level, else default to info, allow env override via RUST_LOG
    if let Some(lvl) = level {
        std::env::set_var("RUST_LOG", lvl);
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Reads one line from stdin after printing the role prompt; lowercased and trimmed.
pub fn prompt_role() -> io::Result<String> {
    let mut out = io::stdout();
    write!(out, "{}", ROLE_PROMPT)?;
    out.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(normalize_role(&line))
}

pub fn normalize_role(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// `n` means "no role filter"; anything else is passed through (empty is dropped later).
pub fn role_filter(role: &str) -> Option<String> {
    if role == "n" {
        None
    } else {
        Some(role.to_string())
    }
}
