use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(ValueEnum, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[value(alias = "open-ai", alias = "openai")]
    OpenAI,
    #[value(alias = "anthropic")]
    Anthropic,
    #[value(alias = "ollama")]
    Ollama,
}

#[derive(Parser, Debug)]
#[command(name = "vibe_sitegen", version, about = "Turn a plain-language app description into a downloadable web project")]
pub struct Args {
    /// TOML config file; flags given here override it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, value_enum, global = true)]
    pub provider: Option<ProviderKind>,

    #[arg(long, global = true)]
    pub model: Option<String>,

    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, global = true)]
    pub downloads_dir: Option<String>,

    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[arg(long, global = true)]
    pub bind: Option<String>,

    #[arg(long, global = true, default_value_t = false)]
    pub save_transcripts: bool,

    #[arg(long, global = true, default_value_t = false)]
    pub no_progress: bool,

    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a project archive from a prompt.
    Generate {
        #[arg(long)]
        prompt: String,
        /// Requested app type, recorded in history for non-CRUD prompts.
        #[arg(long = "type")]
        kind: Option<String>,
        /// Print the raw response object instead of the summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show the most recent generations.
    History {
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Manage the generic item collection.
    Items {
        #[command(subcommand)]
        action: ItemsCommand,
    },
    /// Serve the generation, history, item and download endpoints over HTTP.
    Serve,
}

#[derive(Subcommand, Debug)]
pub enum ItemsCommand {
    List,
    /// FIELDS is a JSON object.
    Create { fields: String },
    Update { id: String, fields: String },
    Delete { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_accepts_type_and_globals_after_subcommand() {
        let args = Args::parse_from([
            "vibe_sitegen", "generate", "--prompt", "a crud app", "--type", "crud", "--provider", "anthropic",
        ]);
        assert!(matches!(args.provider, Some(ProviderKind::Anthropic)));
        match args.command {
            Command::Generate { prompt, kind, json } => {
                assert_eq!(prompt, "a crud app");
                assert_eq!(kind.as_deref(), Some("crud"));
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn items_update_takes_id_and_json() {
        let args = Args::parse_from(["vibe_sitegen", "items", "update", "17", r#"{"name":"x"}"#]);
        match args.command {
            Command::Items { action: ItemsCommand::Update { id, fields } } => {
                assert_eq!(id, "17");
                assert_eq!(fields, r#"{"name":"x"}"#);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
