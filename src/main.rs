//! Stanza CLI - channel prompt editing and content services

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use stanza::error::{FixSuggestion, StanzaError};
use stanza::service::{
    create_channel_service, ContentApi, GenerateRequest, StorageApi, UploadRequest,
};
use stanza::{
    resolve_markers, standard_tags, Channel, EditorSession, NoticeLog, Selection, StanzaConfig,
    SubmissionMode, SubmitOutcome, Tag, TagSet,
};

#[derive(Parser)]
#[command(name = "stanza")]
#[command(about = "Stanza - channel prompt editor and content service client")]
#[command(version)]
struct Cli {
    /// Path to a config file (defaults to ./stanza.yaml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve markers in a prompt file against tag values
    Resolve {
        /// Path to the prompt text file
        file: PathBuf,

        /// Tag values as label=value (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Derive standard tags from a channel YAML file
        #[arg(long)]
        channel: Option<PathBuf>,
    },

    /// Insert a tag marker into a prompt file at a cursor offset
    Insert {
        /// Path to the prompt text file
        file: PathBuf,

        /// Tag label to insert as {{label}}
        #[arg(short, long)]
        label: String,

        /// Cursor offset in characters
        #[arg(long)]
        at: usize,

        /// Selection end when replacing a range (defaults to --at)
        #[arg(long)]
        end: Option<usize>,
    },

    /// Show the standard tag set for a channel
    Tags {
        /// Path to the channel YAML file
        channel: PathBuf,
    },

    /// Submit a channel's prompt to the backend
    Push {
        /// Path to the channel YAML file
        channel: PathBuf,

        /// Override the prompt with this file's contents
        #[arg(long)]
        prompt_file: Option<PathBuf>,

        /// Resolve markers before submitting instead of storing them raw
        #[arg(long)]
        resolved: bool,
    },

    /// Generate content for a channel
    Generate {
        /// Channel id
        channel_id: String,

        #[arg(long)]
        idea: Option<String>,

        #[arg(long)]
        feedback: Option<String>,

        #[arg(long)]
        content: Option<String>,

        /// Run the full pass including SEO fields
        #[arg(long)]
        full: bool,
    },

    /// Upload a file to the backend object store
    Upload {
        /// Local file to upload
        file: PathBuf,

        /// Target bucket
        bucket: String,

        /// Target path within the bucket
        path: String,

        #[arg(long, default_value = "application/octet-stream")]
        content_type: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), StanzaError> {
    let config = StanzaConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Resolve { file, tags, channel } => resolve_cmd(file, tags, channel),
        Commands::Insert { file, label, at, end } => insert_cmd(file, label, at, end),
        Commands::Tags { channel } => tags_cmd(channel),
        Commands::Push { channel, prompt_file, resolved } => {
            push_cmd(&config, channel, prompt_file, resolved).await
        }
        Commands::Generate { channel_id, idea, feedback, content, full } => {
            generate_cmd(&config, channel_id, idea, feedback, content, full).await
        }
        Commands::Upload { file, bucket, path, content_type } => {
            upload_cmd(&config, file, bucket, path, content_type).await
        }
    }
}

/// Parse repeated label=value pairs into a tag set
fn parse_tags(specs: &[String]) -> Result<TagSet, StanzaError> {
    let mut tags = TagSet::new();
    for spec in specs {
        let (label, value) = spec
            .split_once('=')
            .ok_or_else(|| StanzaError::InvalidTagSpec { spec: spec.clone() })?;
        tags.insert(Tag::new(label, value)?);
    }
    Ok(tags)
}

fn resolve_cmd(
    file: PathBuf,
    specs: Vec<String>,
    channel: Option<PathBuf>,
) -> Result<(), StanzaError> {
    let template = std::fs::read_to_string(&file)?;

    let mut tags = match channel {
        Some(path) => {
            let channel = Channel::from_yaml(&std::fs::read_to_string(path)?)?;
            standard_tags(&channel)
        }
        None => TagSet::new(),
    };
    // CLI tags layer over channel-derived ones, last definition wins
    for tag in parse_tags(&specs)?.iter() {
        tags.insert(tag.clone());
    }

    print!("{}", resolve_markers(&template, &tags));
    Ok(())
}

fn insert_cmd(
    file: PathBuf,
    label: String,
    at: usize,
    end: Option<usize>,
) -> Result<(), StanzaError> {
    let text = std::fs::read_to_string(&file)?;
    let tag = Tag::new(label, "")?;

    let mut buffer = stanza::PromptBuffer::from_text(text);
    buffer.set_selection(Selection::new(at, end.unwrap_or(at)));
    buffer.insert_tag(&tag);

    print!("{}", buffer.text());
    if let Some(sel) = buffer.selection() {
        eprintln!("{} cursor at {}", "→".cyan(), sel.start);
    }
    Ok(())
}

fn tags_cmd(channel_path: PathBuf) -> Result<(), StanzaError> {
    let channel = Channel::from_yaml(&std::fs::read_to_string(channel_path)?)?;
    let tags = standard_tags(&channel);

    println!(
        "{} {} ({})",
        "Channel:".cyan().bold(),
        channel.name,
        channel.kind.as_str().cyan()
    );
    for tag in tags.iter() {
        println!("  {} = {}", format!("{{{{{}}}}}", tag.label).green(), tag.value);
    }
    Ok(())
}

async fn push_cmd(
    config: &StanzaConfig,
    channel_path: PathBuf,
    prompt_file: Option<PathBuf>,
    resolved: bool,
) -> Result<(), StanzaError> {
    let channel = Channel::from_yaml(&std::fs::read_to_string(channel_path)?)?;

    let mode = if resolved {
        SubmissionMode::Resolved
    } else {
        config.submission
    };

    let service = create_channel_service(config)?;
    let notices = NoticeLog::new();
    let session = EditorSession::open(&channel, standard_tags(&channel), mode, service, notices.clone());

    if let Some(path) = prompt_file {
        session.set_text(std::fs::read_to_string(path)?);
    }

    println!(
        "{} Submitting prompt for {} ({:?} mode)",
        "→".cyan(),
        channel.name.cyan().bold(),
        mode
    );

    let outcome = session.submit().await;
    for notice in notices.notices() {
        let line = format!("[{}] {}", notice.severity, notice.message);
        match notice.severity {
            stanza::Severity::Error => println!("{}", line.red()),
            stanza::Severity::Success => println!("{}", line.green()),
            _ => println!("{line}"),
        }
    }

    if outcome != SubmitOutcome::Saved {
        std::process::exit(1);
    }
    Ok(())
}

async fn generate_cmd(
    config: &StanzaConfig,
    channel_id: String,
    idea: Option<String>,
    feedback: Option<String>,
    content: Option<String>,
    full: bool,
) -> Result<(), StanzaError> {
    let api = ContentApi::from_config(config)?;
    let request = GenerateRequest { idea, feedback, content };

    let result = if full {
        api.generate_full(&channel_id, request).await?
    } else {
        api.generate_initial(&channel_id, request).await?
    };

    if let Some(title) = &result.title {
        println!("{} {}", "Title:".cyan().bold(), title);
    }
    if let Some(body) = &result.content {
        println!("{body}");
    }
    if full {
        if let Some(slug) = &result.seo_slug {
            println!("{} {}", "Slug:".cyan(), slug);
        }
        if let Some(desc) = &result.seo_meta_description {
            println!("{} {}", "Meta:".cyan(), desc);
        }
    }
    Ok(())
}

async fn upload_cmd(
    config: &StanzaConfig,
    file: PathBuf,
    bucket: String,
    path: String,
    content_type: String,
) -> Result<(), StanzaError> {
    let bytes = std::fs::read(&file)?;
    let request = UploadRequest::new(bucket, path, content_type, bytes)?;

    let api = StorageApi::from_config(config)?;
    let stored = api.upload(request).await?;

    println!(
        "{} Uploaded as {}",
        "✓".green(),
        stored.key.or(stored.id).unwrap_or_else(|| "(unnamed)".into())
    );
    Ok(())
}
