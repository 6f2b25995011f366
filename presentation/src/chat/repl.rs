//! REPL (Read-Eval-Print Loop) for an interactive reading session

use super::command::ReplCommand;
use crate::ConsoleFormatter;
use crate::config::ReplConfig;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tracing::{debug, warn};
use tutor_application::{ControllerError, ConversationController, Dictionary};
use tutor_domain::{
    Conversation, Lens, Phase, PhaseKind, PipelineAgent, Profile, Session, SkillLevels,
};

/// Interactive reading REPL
pub struct TutorRepl {
    controller: Arc<ConversationController>,
    dictionary: Option<Arc<dyn Dictionary>>,
    config: ReplConfig,
}

impl TutorRepl {
    /// Create a new TutorRepl
    pub fn new(controller: Arc<ConversationController>) -> Self {
        Self {
            controller,
            dictionary: None,
            config: ReplConfig::default(),
        }
    }

    pub fn with_dictionary(mut self, dictionary: Arc<dyn Dictionary>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let prompt = Self::prompt(&self.controller.snapshot());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    match ReplCommand::parse(line) {
                        Ok(command) => {
                            if self.handle(&mut rl, command).await {
                                break;
                            }
                        }
                        Err(message) => println!("{}", message.yellow()),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn prompt(session: &Session) -> String {
        match session.phase_kind() {
            PhaseKind::ProfileSetup => "profile> ".to_string(),
            PhaseKind::ContentSelection => "poem> ".to_string(),
            PhaseKind::Conversing => match (session.active_agent(), session.pending_selection()) {
                (Some(agent), _) => format!("{}> ", agent.key()),
                (None, Some(lens)) => format!("{}> ", lens.key()),
                (None, None) => "lens> ".to_string(),
            },
            PhaseKind::Summary => "summary> ".to_string(),
        }
    }

    fn print_welcome(&self) {
        let session = self.controller.snapshot();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          Verse Tutor - Reading Mode         │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("{}", session.topology().description());
        println!("Poems available: {}", self.controller.contents().len());
        println!();
        println!("Start with: /profile <name> [empathy aesthetic interpretive]");
        println!("Type /help for all commands");
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /profile <name> [E A I] - Set reader name and levels (1-6)");
        println!("  /poems                  - List poems");
        println!("  /read <id>              - Select a poem");
        println!("  /start                  - Ask the tutors to open the conversation");
        println!("  /pick <lens>            - Choose the lens question to answer");
        println!("  /agent <agent>          - Talk to teacher, criticA or criticB");
        println!("  /critique               - End the teacher talk and unlock the critics");
        println!("  /end                    - Finish the conversation and show the summary");
        println!("  /another                - Read another poem");
        println!("  /reset                  - Start over from the profile");
        println!("  /status                 - Show where the session stands");
        println!("  /history                - Show the conversation so far");
        println!("  /define <word>          - Look a word up in the dictionary");
        println!("  /quit                   - Exit");
        println!();
        println!("Any other input is sent as your reply.");
        println!();
    }

    /// Handle one command. Returns true if the REPL should exit.
    async fn handle(&self, rl: &mut DefaultEditor, command: ReplCommand) -> bool {
        debug!("REPL command: {:?}", command);
        let hint = Self::retry_hint(&command);
        let outcome = match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                self.print_help();
                return false;
            }
            ReplCommand::Status => {
                println!("{}", ConsoleFormatter::status(&self.controller.snapshot()));
                return false;
            }
            ReplCommand::Poems => {
                println!("{}", ConsoleFormatter::poem_list(&self.controller.contents()));
                return false;
            }
            ReplCommand::History => {
                Self::print_history(&self.controller.snapshot());
                return false;
            }
            ReplCommand::Define(word) => {
                self.define(&word).await;
                return false;
            }
            ReplCommand::Profile { name, levels } => self.submit_profile(name, levels).await,
            ReplCommand::Read(id) => self.controller.select_content(id).await.map(|session| {
                if let Some(content) = session.content() {
                    println!("{}", ConsoleFormatter::poem(content));
                }
                println!("{}", "Type /start when you are ready.".dimmed());
            }),
            ReplCommand::Start => self.controller.start().await.map(|session| {
                print!("{}", ConsoleFormatter::conversation_update(&session));
            }),
            ReplCommand::Pick(lens) => self
                .controller
                .pick(lens)
                .await
                .map(|session| Self::print_selected(&session, lens)),
            ReplCommand::Reply(text) => self.controller.reply(text).await.map(|session| {
                print!("{}", ConsoleFormatter::conversation_update(&session));
            }),
            ReplCommand::Agent(agent) => self
                .controller
                .switch(agent)
                .await
                .map(|session| Self::print_agent(&session, agent)),
            ReplCommand::Critique => self.controller.end_teacher().await.map(|session| {
                Self::print_agent(&session, PipelineAgent::CriticA);
                Self::print_agent(&session, PipelineAgent::CriticB);
                println!(
                    "{}",
                    "Critics unlocked. Use /agent criticA or /agent criticB.".dimmed()
                );
            }),
            ReplCommand::End => self.end(rl).await,
            ReplCommand::Another => self.controller.read_another().await.map(|_| {
                println!("{}", ConsoleFormatter::poem_list(&self.controller.contents()));
            }),
            ReplCommand::Reset => self.reset(rl).await,
        };

        if let Err(e) = outcome {
            Self::report(&e, hint);
        }
        false
    }

    async fn submit_profile(
        &self,
        name: String,
        levels: Option<[u8; 3]>,
    ) -> Result<(), ControllerError> {
        let levels = match levels {
            Some([e, a, i]) => match SkillLevels::from_values(e, a, i) {
                Ok(levels) => levels,
                Err(err) => {
                    println!("{}", err.to_string().yellow());
                    return Ok(());
                }
            },
            None => match self.controller.load_profile(name.trim()).await {
                Ok(Some(saved)) => {
                    println!("{}", "Welcome back! Using your saved levels.".green());
                    *saved.levels()
                }
                Ok(None) => SkillLevels::default(),
                Err(err) => {
                    warn!("Could not load saved profile: {}", err);
                    SkillLevels::default()
                }
            },
        };

        let session = self
            .controller
            .submit_profile(Profile::new(name, levels))
            .await?;
        println!("{}", ConsoleFormatter::profile(session.profile()));
        println!("{}", ConsoleFormatter::poem_list(&self.controller.contents()));
        println!("{}", "Choose a poem with /read <id>.".dimmed());
        Ok(())
    }

    async fn define(&self, word: &str) {
        let Some(dictionary) = &self.dictionary else {
            println!("{}", "No dictionary is configured.".yellow());
            return;
        };
        match dictionary.lookup(word).await {
            Ok(senses) => println!("{}", ConsoleFormatter::word_senses(word, &senses)),
            Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
        }
    }

    async fn end(&self, rl: &mut DefaultEditor) -> Result<(), ControllerError> {
        let session = match self.controller.end(false).await {
            Err(e) if e.needs_confirmation() => {
                if !Self::confirm(rl, "Nothing has been said yet. End anyway?") {
                    return Ok(());
                }
                self.controller.end(true).await?
            }
            other => other?,
        };
        if let Phase::Summary {
            content,
            transcript,
        } = session.phase()
        {
            println!("{}", ConsoleFormatter::summary(content, transcript));
        }
        Ok(())
    }

    async fn reset(&self, rl: &mut DefaultEditor) -> Result<(), ControllerError> {
        match self.controller.reset(false).await {
            Err(e) if e.needs_confirmation() => {
                if !Self::confirm(rl, "Discard this session and start over?") {
                    return Ok(());
                }
                self.controller.reset(true).await?;
            }
            other => {
                other?;
            }
        }
        println!("{}", "Session reset. Enter your profile again.".green());
        Ok(())
    }

    fn confirm(rl: &mut DefaultEditor, question: &str) -> bool {
        match rl.readline(&format!("{} [y/N] ", question)) {
            Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn print_selected(session: &Session, lens: Lens) {
        if let Some(Conversation::Lens(c)) = session.conversation()
            && let Some(questions) = c.questions()
        {
            println!(
                "{} {}\n  {}",
                "Answering".green().bold(),
                lens.label(),
                questions.get(lens)
            );
        }
    }

    fn print_agent(session: &Session, agent: PipelineAgent) {
        if let Some(Conversation::Pipeline(c)) = session.conversation() {
            println!("{}", ConsoleFormatter::history(agent.label(), c.history(agent)));
        }
    }

    fn print_history(session: &Session) {
        match session.transcript() {
            Some(transcript) => {
                for (agent, history) in transcript.sections() {
                    let title = agent.map(|a| a.label()).unwrap_or("Conversation");
                    println!("{}", ConsoleFormatter::history(title, history));
                }
            }
            None => println!("{}", "No conversation yet.".dimmed()),
        }
    }

    /// What to tell the reader after `command` failed upstream.
    fn retry_hint(command: &ReplCommand) -> Option<&'static str> {
        match command {
            ReplCommand::Reply(_) => Some("Your message was kept. Try again."),
            ReplCommand::Start => Some("Type /start to try again."),
            ReplCommand::Critique => Some("Type /critique to try again."),
            _ => None,
        }
    }

    fn report(error: &ControllerError, hint: Option<&str>) {
        match error {
            ControllerError::Rejected(rejection) => println!("{}", rejection.to_string().yellow()),
            ControllerError::Upstream(_) => {
                eprintln!("{} {}", "Error:".red().bold(), error);
                if let Some(hint) = hint {
                    eprintln!("{}", hint.dimmed());
                }
            }
            _ => eprintln!("{} {}", "Error:".red().bold(), error),
        }
    }
}
