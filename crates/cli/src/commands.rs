//! Command-line surface over the parser and the frame collection.
//!
//! [`run`] executes one parsed [`Command`] against the configured data
//! directory and writes user-facing output to `out`. Everything except
//! account management requires an active login session.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use storyboard_core::auth::require_authenticated;
use storyboard_core::collection::FrameCollection;
use storyboard_core::error::CoreError;
use storyboard_core::export;
use storyboard_core::frame::{Frame, FrameInput, FrameTone, FrameType};
use storyboard_core::parser;
use storyboard_core::seed;
use storyboard_core::types::FrameId;

use crate::config::CliConfig;
use crate::file_store::{JsonFileStore, KeyValueDir};
use crate::password;
use crate::session::{Credentials, SessionAuth};

/// Longest content preview shown by `list`.
const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Parser)]
#[command(name = "storyboard", version, about = "Turn scripts into storyboard frames")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in with the configured account
    Login {
        #[arg(long, short)]
        username: String,
        #[arg(long, short)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Print an Argon2id hash for STORYBOARD_PASSWORD_HASH
    HashPassword { password: String },
    /// Parse a script and print the detected frames without saving them
    Parse {
        /// Script file, or `-` for stdin
        script: PathBuf,
    },
    /// Replace the storyboard with the frames parsed from a script
    Import {
        /// Script file, or `-` for stdin
        script: PathBuf,
    },
    /// List all frames
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one frame as JSON
    Show { id: FrameId },
    /// Append a new frame
    Add(FrameFields),
    /// Edit a frame; omitted fields keep their current value
    Update {
        id: FrameId,
        #[command(flatten)]
        fields: FrameFields,
    },
    /// Delete a frame (no error if it does not exist)
    Remove { id: FrameId },
    /// Write the printable HTML storyboard
    Export {
        /// Output file (default: storyboard-YYYY-MM-DD.html in the current directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Editable frame fields as command-line flags.
#[derive(Debug, Clone, Default, Args)]
pub struct FrameFields {
    #[arg(long = "number")]
    pub frame_number: Option<String>,
    #[arg(long = "tone")]
    pub frame_tone: Option<FrameTone>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long = "type")]
    pub frame_type: Option<FrameType>,
    #[arg(long = "voice-over")]
    pub voice_over_required: Option<bool>,
    #[arg(long = "editing")]
    pub editing_required: Option<bool>,
    #[arg(long = "costume")]
    pub facilitator_costume: Option<String>,
    #[arg(long = "scene")]
    pub scene_description: Option<String>,
    #[arg(long = "camera")]
    pub camera_note: Option<String>,
    #[arg(long = "editing-note")]
    pub editing_note: Option<String>,
    #[arg(long)]
    pub suggestions: Option<String>,
}

impl FrameFields {
    /// Overlay the given flags on `base`.
    pub fn apply(self, mut base: FrameInput) -> FrameInput {
        if let Some(v) = self.frame_number {
            base.frame_number = v;
        }
        if let Some(v) = self.frame_tone {
            base.frame_tone = v;
        }
        if let Some(v) = self.content {
            base.content = v;
        }
        if let Some(v) = self.frame_type {
            base.frame_type = v;
        }
        if let Some(v) = self.voice_over_required {
            base.voice_over_required = v;
        }
        if let Some(v) = self.editing_required {
            base.editing_required = v;
        }
        if let Some(v) = self.facilitator_costume {
            base.facilitator_costume = v;
        }
        if let Some(v) = self.scene_description {
            base.scene_description = v;
        }
        if let Some(v) = self.camera_note {
            base.camera_note = v;
        }
        if let Some(v) = self.editing_note {
            base.editing_note = v;
        }
        if let Some(v) = self.suggestions {
            base.suggestions = v;
        }
        base
    }
}

/// Execute `command`, writing its output to `out`.
pub fn run(command: Command, config: &CliConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let dir = KeyValueDir::open(&config.data_dir)
        .with_context(|| format!("cannot open data directory {}", config.data_dir.display()))?;
    let auth = SessionAuth::new(
        dir.clone(),
        Credentials {
            username: config.username.clone(),
            password_hash: config.password_hash.clone(),
        },
    );

    match command {
        Command::Login { username, password } => {
            let session = auth.login(&username, &password)?;
            writeln!(out, "Logged in as {}", session.username)?;
        }
        Command::Logout => {
            if auth.logout()? {
                writeln!(out, "Logged out")?;
            } else {
                writeln!(out, "No active session")?;
            }
        }
        Command::Whoami => match auth.current()? {
            Some(session) => writeln!(out, "{}", session.username)?,
            None => writeln!(out, "Not logged in")?,
        },
        Command::HashPassword { password } => {
            writeln!(out, "{}", password::hash_password(&password)?)?;
        }
        Command::Parse { script } => {
            require_authenticated(&auth)?;
            let text = read_script(&script)?;
            let frames = parser::parse_script(&text);
            writeln!(out, "{}", serde_json::to_string_pretty(&frames)?)?;
        }
        command => {
            require_authenticated(&auth)?;
            let collection = open_collection(dir, config)?;
            run_frame_command(command, collection, out)?;
        }
    }
    Ok(())
}

fn open_collection(
    dir: KeyValueDir,
    config: &CliConfig,
) -> anyhow::Result<FrameCollection<JsonFileStore>> {
    let store = JsonFileStore::new(dir);
    let collection = if config.seed_on_empty {
        FrameCollection::open_or_seed(store, seed::sample_frames())?
    } else {
        FrameCollection::open(store)?
    };
    Ok(collection)
}

fn run_frame_command(
    command: Command,
    mut collection: FrameCollection<JsonFileStore>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Command::Import { script } => {
            let text = read_script(&script)?;
            let imported = match collection.import_script(&text) {
                Ok(frames) => frames.len(),
                Err(e @ CoreError::EmptyInput) => {
                    return Err(e).context("please provide a script to parse");
                }
                Err(e @ CoreError::NoFramesDetected) => {
                    return Err(e).context(
                        "could not find frame labels; use 'Frame 1:', 'Frame 1 -', \
                         '1.' or '[Frame 1]'",
                    );
                }
                Err(e) => return Err(e.into()),
            };
            writeln!(
                out,
                "Script imported successfully: {imported} frames created"
            )?;
        }
        Command::List { json } => {
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(collection.frames())?)?;
            } else if collection.is_empty() {
                writeln!(out, "No frames yet. Import a script or add a frame.")?;
            } else {
                for frame in collection.frames() {
                    writeln!(out, "{}", summary_line(frame))?;
                }
            }
        }
        Command::Show { id } => {
            let frame = collection.get(id).ok_or(CoreError::NotFound {
                entity: storyboard_core::collection::FRAME_ENTITY,
                id,
            })?;
            writeln!(out, "{}", serde_json::to_string_pretty(frame)?)?;
        }
        Command::Add(fields) => {
            let frame = collection.add(fields.apply(FrameInput::default()))?;
            writeln!(out, "Frame added: {}", frame.id)?;
        }
        Command::Update { id, fields } => {
            let base = collection
                .get(id)
                .map(Frame::to_input)
                .unwrap_or_default();
            let frame = match collection.update(id, fields.apply(base)) {
                Ok(frame) => frame,
                Err(e @ CoreError::NotFound { .. }) => {
                    return Err(e).context("the frame may have been deleted; run `storyboard list`");
                }
                Err(e) => return Err(e.into()),
            };
            writeln!(out, "Frame updated: {}", frame.id)?;
        }
        Command::Remove { id } => {
            if collection.remove(id)? {
                writeln!(out, "Frame deleted: {id}")?;
            } else {
                writeln!(out, "No frame with id {id}; nothing to delete")?;
            }
        }
        Command::Export { output } => {
            let now = Utc::now();
            let path = output
                .unwrap_or_else(|| PathBuf::from(export::export_file_name(now.date_naive())));
            let html = export::render_html(collection.frames(), now);
            fs::write(&path, html)
                .with_context(|| format!("cannot write export to {}", path.display()))?;
            tracing::info!(path = %path.display(), frame_count = collection.len(), "Storyboard exported");
            writeln!(out, "Storyboard exported to {}", path.display())?;
        }
        Command::Login { .. }
        | Command::Logout
        | Command::Whoami
        | Command::HashPassword { .. }
        | Command::Parse { .. } => {
            bail!("command does not use the stored storyboard")
        }
    }
    Ok(())
}

fn read_script(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("cannot read script from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("cannot read script {}", path.display()))
}

/// One-line listing: id, label, tone, type, and a content preview.
pub fn summary_line(frame: &Frame) -> String {
    let single_line = frame.content.split_whitespace().collect::<Vec<_>>().join(" ");
    let preview = if single_line.chars().count() > PREVIEW_CHARS {
        let cut: String = single_line.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        single_line
    };
    let pending = if frame.details_pending() { " [details pending]" } else { "" };
    format!(
        "{}  #{:<5} {:<11} {:<24} {}{}",
        frame.id, frame.frame_number, frame.frame_tone, frame.frame_type, preview, pending
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overlays_only_given_fields() {
        let base = FrameInput::new("1", "first draft");
        let fields = FrameFields {
            frame_tone: Some(FrameTone::Serious),
            camera_note: Some("Close-up".to_string()),
            ..FrameFields::default()
        };

        let merged = fields.apply(base);
        assert_eq!(merged.frame_number, "1");
        assert_eq!(merged.content, "first draft");
        assert_eq!(merged.frame_tone, FrameTone::Serious);
        assert_eq!(merged.camera_note, "Close-up");
    }

    #[test]
    fn summary_line_truncates_long_content() {
        let long = "word ".repeat(40);
        let frame = Frame::from_input(FrameId::generate(), FrameInput::new("3", long));
        let line = summary_line(&frame);

        assert!(line.contains("#3"));
        assert!(line.contains("Informative"));
        assert!(line.contains("..."));
        assert!(line.ends_with("[details pending]"));
    }

    #[test]
    fn summary_line_flattens_newlines() {
        let frame = Frame::from_input(FrameId::generate(), FrameInput::new("1", "a\n\nb"));
        assert!(summary_line(&frame).contains("a b"));
    }

    #[test]
    fn cli_parses_update_flags() {
        let id = FrameId::generate();
        let cli = Cli::try_parse_from([
            "storyboard",
            "update",
            &id.to_string(),
            "--tone",
            "playful",
            "--type",
            "Animation",
            "--voice-over",
            "true",
        ])
        .unwrap();

        match cli.command {
            Command::Update { id: parsed, fields } => {
                assert_eq!(parsed, id);
                assert_eq!(fields.frame_tone, Some(FrameTone::Playful));
                assert_eq!(fields.frame_type, Some(FrameType::Animation));
                assert_eq!(fields.voice_over_required, Some(true));
                assert!(fields.content.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_unknown_tone() {
        let result = Cli::try_parse_from(["storyboard", "add", "--tone", "Grumpy"]);
        assert!(result.is_err());
    }
}
