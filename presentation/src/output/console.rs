//! Console output formatter for reading sessions

use colored::Colorize;
use tutor_domain::core::text::preview;
use tutor_domain::{
    ContentItem, Conversation, History, Lens, LensQuestions, Message, PipelineAgent, Profile,
    Session, Transcript, WordSense,
};

/// Shown when a dictionary lookup finds nothing.
pub const NO_SENSES: &str = "검색 결과가 없습니다.";

const TITLE_PREVIEW_CHARS: usize = 30;

/// Formats session state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Numbered list of the available poems
    pub fn poem_list(items: &[ContentItem]) -> String {
        if items.is_empty() {
            return format!("{}\n", "No poems available.".yellow());
        }

        let mut output = Self::section_header("Poems");
        for item in items {
            output.push_str(&format!(
                "  {:>4}  {}  {}\n",
                item.id.to_string().cyan(),
                preview(&item.title, TITLE_PREVIEW_CHARS).bold(),
                item.author.dimmed()
            ));
        }
        output
    }

    /// The full poem text with title and author
    pub fn poem(item: &ContentItem) -> String {
        let mut output = Self::header(&item.title);
        output.push('\n');
        output.push_str(&format!("{:>60}\n\n", item.author.dimmed()));
        output.push_str(&item.body);
        output.push('\n');
        output.push_str(&Self::footer());
        output
    }

    /// Name, current levels and the goal level per dimension
    pub fn profile(profile: &Profile) -> String {
        let mut output = format!(
            "{} {}\n",
            "Reader:".cyan().bold(),
            profile.display_name()
        );
        for (dimension, level) in profile.levels().iter() {
            output.push_str(&format!(
                "  {:<13} {} -> {}\n",
                dimension.label(),
                level,
                level.goal().to_string().green()
            ));
        }
        output
    }

    /// The three outstanding lens questions, marking the one picked
    pub fn lens_questions(questions: &LensQuestions, pending: Option<Lens>) -> String {
        let mut output = Self::section_header("Questions");
        for (lens, question) in questions.iter() {
            let marker = if pending == Some(lens) { ">" } else { " " };
            let label = format!("{} ({})", lens.label(), lens.key());
            let label = if pending == Some(lens) {
                label.green().bold()
            } else {
                label.yellow().bold()
            };
            output.push_str(&format!("{} {}\n  {}\n\n", marker, label, question));
        }
        output.push_str(&format!(
            "{}\n",
            "Pick one with /pick <lens>, then type your answer.".dimmed()
        ));
        output
    }

    /// A single agent turn
    pub fn agent_message(agent: PipelineAgent, text: &str) -> String {
        format!(
            "\n{}\n{}\n",
            format!("── {} ──", agent.label()).yellow().bold(),
            text
        )
    }

    /// Every message of a history, in order
    pub fn history(title: &str, history: &History) -> String {
        let mut output = Self::section_header(title);
        if history.is_empty() {
            output.push_str(&format!("  {}\n", "(no messages)".dimmed()));
            return output;
        }
        for message in history.messages() {
            output.push_str(&Self::message_line(message));
        }
        output
    }

    /// What the reader needs to see after a step: the questions, or the
    /// latest message from the active agent.
    pub fn conversation_update(session: &Session) -> String {
        match session.conversation() {
            Some(Conversation::Lens(c)) => match c.questions() {
                Some(questions) => Self::lens_questions(questions, c.pending_selection()),
                None => format!("{}\n", "Type /start to get the first questions.".dimmed()),
            },
            Some(Conversation::Pipeline(c)) => {
                let active = c.active();
                match c.history(active).last() {
                    Some(message) if !message.is_user() => {
                        Self::agent_message(active, message.text())
                    }
                    Some(_) => String::new(),
                    None => format!(
                        "{}\n",
                        format!("{} has not spoken yet. Type /start to begin.", active.label())
                            .dimmed()
                    ),
                }
            }
            None => String::new(),
        }
    }

    /// Review of a finished conversation
    pub fn summary(content: &ContentItem, transcript: &Transcript) -> String {
        let mut output = Self::header("Reading Summary");
        output.push('\n');
        output.push_str(&format!(
            "{} {} - {}\n",
            "Poem:".cyan().bold(),
            content.title,
            content.author
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Messages:".cyan().bold(),
            transcript.message_count()
        ));

        for (agent, history) in transcript.sections() {
            let title = agent.map(|a| a.label()).unwrap_or("Conversation");
            output.push_str(&Self::history(title, history));
        }

        output.push_str(&Self::footer());
        output.push_str(&format!(
            "{}\n",
            "/another to read another poem, /reset to start over.".dimmed()
        ));
        output
    }

    /// One-screen overview of where the session stands
    pub fn status(session: &Session) -> String {
        let mut output = format!(
            "{} {}\n{} {}\n",
            "Phase:".cyan().bold(),
            session.phase_kind(),
            "Topology:".cyan().bold(),
            session.topology().description()
        );

        if session.profile().has_name() {
            output.push_str(&Self::profile(session.profile()));
        }

        if let Some(content) = session.content() {
            output.push_str(&format!(
                "{} {} ({})\n",
                "Poem:".cyan().bold(),
                content.title,
                content.author
            ));
        }

        if let Some(agent) = session.active_agent() {
            output.push_str(&format!("{} {}\n", "Talking to:".cyan().bold(), agent.label()));
            let unlocked = session
                .unlocked()
                .iter()
                .map(|a| a.label())
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!("{} {}\n", "Available:".cyan().bold(), unlocked));
        }

        if let Some(lens) = session.pending_selection() {
            output.push_str(&format!("{} {}\n", "Answering:".cyan().bold(), lens.label()));
        }

        if let Some(in_flight) = session.in_flight() {
            output.push_str(&format!(
                "{} {} request ({})\n",
                "Waiting:".yellow().bold(),
                in_flight.kind,
                in_flight.ticket
            ));
        }

        output
    }

    /// Dictionary senses for `word`, numbered
    pub fn word_senses(word: &str, senses: &[WordSense]) -> String {
        let mut output = Self::section_header(word);
        if senses.is_empty() {
            output.push_str(&format!("  {}\n", NO_SENSES.yellow()));
            return output;
        }
        for (n, sense) in senses.iter().enumerate() {
            let tags: Vec<&str> = [sense.pos.as_deref(), sense.category.as_deref()]
                .into_iter()
                .flatten()
                .collect();
            let tags = if tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", tags.join(", "))
            };
            output.push_str(&format!(
                "  {}. {}{}\n     {}\n",
                n + 1,
                sense.word.bold(),
                tags.dimmed(),
                sense.definition
            ));
        }
        output
    }

    fn message_line(message: &Message) -> String {
        if message.is_user() {
            format!("  {} {}\n", "You:".green().bold(), message.text())
        } else {
            let speaker = message.produced_by().map(|a| a.label()).unwrap_or("Tutor");
            format!(
                "  {} {}\n",
                format!("{}:", speaker).yellow().bold(),
                message.text()
            )
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
