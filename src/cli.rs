// src/cli.rs
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::config::AppOptions;
use crate::config::BadgeTable;
use crate::config::consts::{DEFAULT_ACADEMIC_YEAR, DEFAULT_DATA_DIR, DEFAULT_TIMEOUT_SECS};
use crate::error::{Error, Result};
use crate::progress::Progress;
use crate::runner::{Command, Prompter, Runner, http_session};
use crate::scrape::Credentials;

#[derive(Parser, Debug)]
#[command(name = "ladok_scrape", version, about = "Ladok grades vs. LTH programme plans")]
pub struct Args {
    /// Directory holding grades.json and <CODE>-programme.json
    #[arg(long, env = "LADOK_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Lookup wait in seconds, for sessions that render pages progressively
    #[arg(long, hide = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Academic year of the programme plan, e.g. 22_23
    #[arg(long, default_value = DEFAULT_ACADEMIC_YEAR)]
    pub year: String,

    /// JSON badge table replacing the built-in one
    #[arg(long)]
    pub badges: Option<PathBuf>,

    /// Programme code (A, BME, D, ...); asked for when missing
    #[arg(long)]
    pub programme: Option<String>,

    /// Ladok username; asked for when missing
    #[arg(long, env = "LADOK_USERNAME")]
    pub username: Option<String>,

    /// Run one menu entry (1-5) and exit
    #[arg(long = "command", value_parser = clap::value_parser!(u8).range(1..=5))]
    pub command: Option<u8>,

    /// -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn options(&self) -> Result<AppOptions> {
        let mut options = AppOptions {
            data_dir: self.data_dir.clone(),
            timeout: Duration::from_secs(self.timeout),
            ..AppOptions::default()
        };
        options.portals.academic_year = self.year.clone();
        if let Some(path) = &self.badges {
            options.badges = BadgeTable::load(path)?;
        }
        Ok(options)
    }
}

/// Prompts on stdout, answers from stdin; secrets through `rpassword`.
pub struct StdioPrompter;

impl Prompter for StdioPrompter {
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        if !question.is_empty() {
            print!("{question}");
            io::stdout().flush()?;
        }
        let mut line = s!();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(s!(line.trim_end_matches(['\r', '\n']))))
    }

    fn ask_secret(&mut self, question: &str) -> Result<Option<String>> {
        match rpassword::prompt_password(question) {
            Ok(p) => Ok(Some(p)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(Error::Prompt(e.to_string())),
        }
    }

    fn say(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Prints course-by-course progress to the terminal.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    seen: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, title: &str, total: usize) {
        self.total = total;
        self.seen = 0;
        println!("{title} ({total})");
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, label: &str) {
        self.seen += 1;
        println!("[{}/{}] Adding {label}", self.seen, self.total);
    }

    fn item_skipped(&mut self, label: &str, reason: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] Skipping {label}: {reason}", self.seen, self.total);
    }
}

pub fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    crate::log::init(args.verbose)?;

    let mut runner = Runner::new(args.options()?, http_session);
    if let Some(p) = &args.programme {
        runner = runner.with_programme(p.as_str());
    }
    match (&args.username, std::env::var("LADOK_PASSWORD")) {
        (Some(u), Ok(p)) => runner = runner.with_credentials(Credentials::new(u.as_str(), p)),
        (Some(u), Err(_)) => runner = runner.with_username(u.as_str()),
        (None, _) => {}
    }

    let mut prompter = StdioPrompter;
    let mut progress = ConsoleProgress::default();

    match args.command.and_then(|n| Command::from_choice(&n.to_string())) {
        Some(command) => {
            runner.step(command, &mut prompter, &mut progress)?;
        }
        None => runner.run_menu(&mut prompter, &mut progress)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from(["ladok_scrape", "--data-dir", "/tmp/x", "--year", "23_24", "--timeout", "2", "-vv"])
            .unwrap();
        let options = args.options().unwrap();
        assert_eq!(options.data_dir, PathBuf::from("/tmp/x"));
        assert_eq!(options.portals.academic_year, "23_24");
        assert_eq!(options.timeout, Duration::from_secs(2));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn lookup_wait_is_not_advertised() {
        let help = <Args as clap::CommandFactory>::command().render_help().to_string();
        assert!(!help.contains("--timeout"));
        assert!(help.contains("--data-dir"));
    }

    #[test]
    fn command_must_be_a_menu_entry() {
        assert!(Args::try_parse_from(["ladok_scrape", "--command", "6"]).is_err());
        let args = Args::try_parse_from(["ladok_scrape", "--command", "3"]).unwrap();
        assert_eq!(args.command, Some(3));
    }
}
