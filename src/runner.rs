// src/runner.rs
//! Command dispatch, independent of how the menu is drawn.
//!
//! A frontend turns user input into a [`Command`] and hands it to
//! [`Runner::step`], supplying a [`Prompter`] for the follow-up questions
//! (credentials, programme code, specialization) and a [`Progress`] sink.

use tracing::{error, info};

use crate::analyze::{self, Analysis};
use crate::config::AppOptions;
use crate::core::net::HttpFetcher;
use crate::error::{Error, Result};
use crate::model::{ProgrammeGradeSet, normalize_programme_code};
use crate::page::Session;
use crate::progress::Progress;
use crate::scrape::{self, Credentials};
use crate::session::HtmlSession;
use crate::store;

pub const INVALID_CHOICE: &str = "Could not understand that command. Type any number between 1 and 5";
pub const MENU_PROMPT: &str = "What do you want to do (1-5)";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    RetrieveGrades,
    RetrieveCurriculum,
    Analyze,
    All,
    Exit,
}

impl Command {
    /// Menu order.
    pub const MENU: [Command; 5] = [
        Command::RetrieveGrades,
        Command::RetrieveCurriculum,
        Command::Analyze,
        Command::All,
        Command::Exit,
    ];

    pub fn key(self) -> u8 {
        match self {
            Command::RetrieveGrades => 1,
            Command::RetrieveCurriculum => 2,
            Command::Analyze => 3,
            Command::All => 4,
            Command::Exit => 5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Command::RetrieveGrades => "Retrieve your Ladok grades",
            Command::RetrieveCurriculum => "Retrieve education programme requirements",
            Command::Analyze => "Analyze your coursework based on your taken courses and programme",
            Command::All => "Do everything",
            Command::Exit => "Exit",
        }
    }

    pub fn from_choice(input: &str) -> Option<Command> {
        let key: u8 = input.trim().parse().ok()?;
        Self::MENU.into_iter().find(|c| c.key() == key)
    }
}

/// Menu text, one line per entry, after the [`MENU_PROMPT`] line.
pub fn menu_lines() -> Vec<String> {
    Command::MENU.iter().map(|c| format!("{}. {}", c.key(), c.title())).collect()
}

/// Source of answers and sink for report lines.
pub trait Prompter {
    /// `None` once input is exhausted.
    fn ask(&mut self, question: &str) -> Result<Option<String>>;

    /// Like `ask`, without echoing the answer.
    fn ask_secret(&mut self, question: &str) -> Result<Option<String>>;

    fn say(&mut self, line: &str);
}

fn require(answer: Option<String>, what: &str) -> Result<String> {
    answer.ok_or_else(|| Error::Prompt(format!("input closed while asking for {what}")))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub type SessionFactory<'a> = Box<dyn FnMut() -> Result<Box<dyn Session>> + 'a>;

/// A live session against the portals.
pub fn http_session() -> Result<Box<dyn Session>> {
    Ok(Box::new(HtmlSession::new(HttpFetcher::new()?)))
}

pub struct Runner<'a> {
    pub options: AppOptions,
    programme: Option<String>,
    username: Option<String>,
    password: Option<String>,
    open_session: SessionFactory<'a>,
}

impl<'a> Runner<'a> {
    pub fn new(options: AppOptions, open_session: impl FnMut() -> Result<Box<dyn Session>> + 'a) -> Self {
        Self { options, programme: None, username: None, password: None, open_session: Box::new(open_session) }
    }

    /// Use this programme instead of asking for one.
    pub fn with_programme(mut self, programme: impl Into<String>) -> Self {
        self.programme = Some(normalize_programme_code(&programme.into()));
        self
    }

    /// Log in as `username`; only the password is asked for.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Use these credentials instead of asking for them.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.password = Some(s!(credentials.password()));
        self.username = Some(credentials.username);
        self
    }

    /// Prompt, dispatch, repeat until `Exit` or end of input.
    pub fn run_menu(&mut self, prompter: &mut dyn Prompter, progress: &mut dyn Progress) -> Result<()> {
        loop {
            prompter.say(MENU_PROMPT);
            for line in menu_lines() {
                prompter.say(&line);
            }
            let Some(input) = prompter.ask("")? else { break };
            let Some(command) = Command::from_choice(&input) else {
                prompter.say(INVALID_CHOICE);
                continue;
            };
            if self.step(command, prompter, progress)? == Flow::Exit {
                break;
            }
        }
        prompter.say("Exiting...");
        Ok(())
    }

    /// Run one command. Failures the user can act on are reported through
    /// `prompter` and the menu carries on; only closed input is returned.
    pub fn step(&mut self, command: Command, prompter: &mut dyn Prompter, progress: &mut dyn Progress) -> Result<Flow> {
        info!("running {:?}", command);
        match self.dispatch(command, prompter, progress) {
            Ok(flow) => Ok(flow),
            Err(e @ Error::Prompt(_)) => Err(e),
            Err(e) => {
                error!("{command:?} failed: {e}");
                prompter.say(&e.to_string());
                if let Some(hint) = e.hint() {
                    prompter.say(&format!("Hint: {hint}"));
                }
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch(&mut self, command: Command, prompter: &mut dyn Prompter, progress: &mut dyn Progress) -> Result<Flow> {
        match command {
            Command::RetrieveGrades => {
                self.retrieve_grades(prompter, progress)?;
            }
            Command::RetrieveCurriculum => {
                let programme = self.programme(prompter)?;
                self.retrieve_curriculum(&programme, prompter, progress)?;
            }
            Command::Analyze => {
                let programme = self.programme(prompter)?;
                self.analyze(&programme, prompter)?;
            }
            Command::All => {
                self.retrieve_grades(prompter, progress)?;
                let programme = self.programme(prompter)?;
                if self.retrieve_curriculum(&programme, prompter, progress)? {
                    self.analyze(&programme, prompter)?;
                }
            }
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn credentials(&self, prompter: &mut dyn Prompter) -> Result<Credentials> {
        let username = match &self.username {
            Some(u) => u.clone(),
            None => require(prompter.ask("Username: ")?, "a username")?,
        };
        let password = match &self.password {
            Some(p) => p.clone(),
            None => require(prompter.ask_secret("Password: ")?, "a password")?,
        };
        Ok(Credentials::new(username.trim(), password))
    }

    fn programme(&self, prompter: &mut dyn Prompter) -> Result<String> {
        if let Some(p) = &self.programme {
            return Ok(p.clone());
        }
        loop {
            let answer = require(prompter.ask("What programme are you studying? (A, BME, V, etc.): ")?, "a programme")?;
            let code = normalize_programme_code(&answer);
            if !code.is_empty() {
                return Ok(code);
            }
        }
    }

    fn retrieve_grades(&mut self, prompter: &mut dyn Prompter, progress: &mut dyn Progress) -> Result<ProgrammeGradeSet> {
        let credentials = self.credentials(prompter)?;
        let mut session = (self.open_session)()?;
        let grades = scrape::retrieve_grades(&mut *session, &credentials, &self.options, progress)?;
        let path = store::save_grades(&self.options.data_dir, &grades)?;
        prompter.say(&format!("Writing to {}...", path.display()));
        Ok(grades)
    }

    /// `false` when the portal does not know the programme.
    fn retrieve_curriculum(&mut self, programme: &str, prompter: &mut dyn Prompter, progress: &mut dyn Progress) -> Result<bool> {
        let mut session = (self.open_session)()?;
        let Some(curriculum) = scrape::extract_curriculum(&mut *session, programme, &self.options, progress)? else {
            prompter.say(&format!(
                "Could not find programme {programme} for academic year {}",
                self.options.portals.academic_year
            ));
            return Ok(false);
        };
        if curriculum.is_empty() {
            prompter.say(&format!("Programme {programme} lists no course tables"));
        }
        let path = store::save_curriculum(&self.options.data_dir, programme, &curriculum)?;
        prompter.say(&format!("Writing to {}...", path.display()));
        Ok(true)
    }

    fn analyze(&mut self, programme: &str, prompter: &mut dyn Prompter) -> Result<Analysis> {
        let curriculum = store::load_curriculum(&self.options.data_dir, programme)?;
        let grades = store::load_grades(&self.options.data_dir)?;
        let requirements = &self.options.requirements;

        let tracks = analyze::specialization_tracks(&curriculum, requirements);
        let choice = pick_specialization(&tracks, prompter)?;
        let analysis = analyze::analyze(&curriculum, &grades, choice.as_deref(), requirements)?;

        for line in analysis.to_string().lines() {
            prompter.say(line);
        }
        prompter.say("Done");
        Ok(analysis)
    }
}

/// Let the user choose one track by number or label. Empty input means none.
pub fn pick_specialization(tracks: &[&str], prompter: &mut dyn Prompter) -> Result<Option<String>> {
    if tracks.is_empty() {
        return Ok(None);
    }
    prompter.say("Specializations:");
    for (i, t) in tracks.iter().enumerate() {
        prompter.say(&format!("{}. {t}", i + 1));
    }
    loop {
        let answer = require(
            prompter.ask(&format!("Choose a specialization (1-{}, empty for none): ", tracks.len()))?,
            "a specialization",
        )?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        let by_number = answer.parse::<usize>().ok().and_then(|n| n.checked_sub(1)).and_then(|i| tracks.get(i));
        if let Some(track) = by_number.or_else(|| tracks.iter().find(|t| **t == answer)) {
            return Ok(Some(s!(*track)));
        }
        prompter.say(&format!("Type a number between 1 and {}, or nothing", tracks.len()));
    }
}
