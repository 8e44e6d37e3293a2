use clap::Subcommand;
use recents::RecentsStore;
use std::path::PathBuf;
use std::sync::Arc;
use welcomekit::{Document, Outcome};

pub mod clear;
pub mod list;
pub mod new;
pub mod open;
pub mod remove;

#[derive(Subcommand)]
pub enum Commands {
    /// List recent documents, most recent first
    List,

    /// Open a document and record it as recent
    Open {
        /// Document to open (shows the open dialog if omitted)
        path: Option<PathBuf>,

        /// Pick folders instead of files in the dialog
        #[arg(long)]
        folders: bool,
    },

    /// Create a document, then open it
    New {
        /// Destination (shows the save dialog if omitted)
        path: Option<PathBuf>,

        /// Treat the destination as a project folder holding <name>/<name>.<ext>
        #[arg(short, long)]
        package: bool,

        /// File extension of the document kind
        #[arg(short, long, default_value = "txt")]
        kind: String,
    },

    /// Remove documents from the recent list
    Remove {
        /// Documents to remove
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Forget all recent documents
    Clear,
}

impl Commands {
    pub async fn execute(&self, store: Arc<RecentsStore>) -> anyhow::Result<()> {
        match self {
            Commands::List => list::execute(&store),
            Commands::Open { path, folders } => open::execute(store, path.as_deref(), *folders).await,
            Commands::New { path, package, kind } => {
                new::execute(store, path.as_deref(), *package, kind).await
            }
            Commands::Remove { paths } => remove::execute(&store, paths),
            Commands::Clear => clear::execute(&store),
        }
    }
}

/// Print the result of a workflow; failures become the command's error
pub fn report(outcome: Outcome<Document>) -> anyhow::Result<()> {
    match outcome {
        Outcome::Completed(Document::Text { path, text }) => {
            let shown = path.map_or_else(|| "untitled".to_string(), |p| p.display().to_string());
            println!("✓ Opened {shown} ({} bytes)", text.len());
        }
        Outcome::Completed(Document::Folder { path, entries }) => {
            println!("✓ Opened folder {} ({} entries)", path.display(), entries.len());
        }
        Outcome::Cancelled => println!("Cancelled"),
        Outcome::Failed(e) => return Err(e.into()),
    }
    Ok(())
}
