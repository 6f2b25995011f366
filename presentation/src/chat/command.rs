//! Parsing of REPL input lines

use tutor_domain::{Lens, PipelineAgent};

/// One line of REPL input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// `/profile NAME [E A I]`. Without levels, a saved profile (or level 1)
    /// fills them in.
    Profile {
        name: String,
        levels: Option<[u8; 3]>,
    },
    Poems,
    Read(u64),
    Start,
    Pick(Lens),
    Agent(PipelineAgent),
    Critique,
    End,
    Another,
    Reset,
    Status,
    History,
    /// `/define WORD`: dictionary lookup, independent of the session
    Define(String),
    Help,
    Quit,
    /// Anything that is not a slash command
    Reply(String),
}

impl ReplCommand {
    /// Parse a trimmed, non-empty input line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(ReplCommand::Reply(line.to_string()));
        };

        let mut parts = rest.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let args = parts.next().map(str::trim).unwrap_or_default();

        match name {
            "profile" | "p" => Self::parse_profile(args),
            "poems" | "list" | "ls" => Ok(ReplCommand::Poems),
            "read" | "r" => args
                .parse::<u64>()
                .map(ReplCommand::Read)
                .map_err(|_| format!("Usage: /read <poem id> (got '{}')", args)),
            "start" => Ok(ReplCommand::Start),
            "pick" => args
                .parse::<Lens>()
                .map(ReplCommand::Pick)
                .map_err(|_| "Usage: /pick <empathy|aesthetic|interpretive>".to_string()),
            "agent" | "to" => args
                .parse::<PipelineAgent>()
                .map(ReplCommand::Agent)
                .map_err(|_| "Usage: /agent <teacher|criticA|criticB>".to_string()),
            "critique" => Ok(ReplCommand::Critique),
            "end" => Ok(ReplCommand::End),
            "another" => Ok(ReplCommand::Another),
            "reset" => Ok(ReplCommand::Reset),
            "status" => Ok(ReplCommand::Status),
            "history" => Ok(ReplCommand::History),
            "define" | "d" | "dict" => match args {
                "" => Err("Usage: /define <word>".to_string()),
                word => Ok(ReplCommand::Define(word.to_string())),
            },
            "help" | "h" | "?" => Ok(ReplCommand::Help),
            "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
            _ => Err(format!(
                "Unknown command: /{}\nType /help for available commands",
                name
            )),
        }
    }

    // Trailing three numbers are levels; everything before them is the name,
    // so names may contain spaces.
    fn parse_profile(args: &str) -> Result<Self, String> {
        let words: Vec<&str> = args.split_whitespace().collect();
        if words.is_empty() {
            return Err("Usage: /profile <name> [empathy aesthetic interpretive]".to_string());
        }

        if words.len() > 3 {
            let (name_words, level_words) = words.split_at(words.len() - 3);
            let parsed: Vec<u8> = level_words
                .iter()
                .filter_map(|w| w.parse::<u8>().ok())
                .collect();
            if let [e, a, i] = parsed[..] {
                return Ok(ReplCommand::Profile {
                    name: name_words.join(" "),
                    levels: Some([e, a, i]),
                });
            }
        }

        Ok(ReplCommand::Profile {
            name: words.join(" "),
            levels: None,
        })
    }
}
