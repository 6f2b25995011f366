//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tutor_domain::Topology;

/// Agent topology selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TopologyArg {
    /// Three lenses ask together; answer one question per round
    Lens,
    /// Teacher first, then two critics
    Pipeline,
}

impl From<TopologyArg> for Topology {
    fn from(arg: TopologyArg) -> Self {
        match arg {
            TopologyArg::Lens => Topology::ParallelLens,
            TopologyArg::Pipeline => Topology::SequentialPipeline,
        }
    }
}

/// CLI arguments for verse-tutor
#[derive(Parser, Debug)]
#[command(name = "verse-tutor")]
#[command(author, version, about = "Poem reading companion - talk a poem through with tutor agents")]
#[command(long_about = r#"
Verse Tutor guides a reader through a poem with a small group of tutor agents.

A session has four phases:
1. Profile: your name and empathy / aesthetic / interpretive levels (1-6)
2. Poem selection
3. Conversation with the agents
4. Summary of everything that was said

Topologies:
  lens       Three lenses (empathy, aesthetic, interpretive) each ask a
             question; you pick one and answer it.
  pipeline   A teacher talks with you first. Ending that conversation asks
             two critics for opposing essays you can then discuss.

Configuration files are loaded from (in priority order):
1. --config <path>              Explicit config file
2. ./verse-tutor.toml           Project-level config
3. ~/.config/verse-tutor/config.toml   Global config

Example:
  verse-tutor
  verse-tutor --topology pipeline --tutor-url http://localhost:8000
  verse-tutor --catalog kpoem.tsv --list
"#)]
pub struct Cli {
    /// Agent topology (overrides [session] topology)
    #[arg(short, long, value_enum, value_name = "TOPOLOGY")]
    pub topology: Option<TopologyArg>,

    /// TSV poem catalog (overrides [catalog] path)
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Tutor service base URL (overrides [tutor] base_url)
    #[arg(long, value_name = "URL")]
    pub tutor_url: Option<String>,

    /// List the poems in the catalog and exit
    #[arg(long)]
    pub list: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
