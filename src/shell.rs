//! Line-oriented drawing shell.
//!
//! Plain lines are instructions for the generator; lines starting with `:`
//! drive the session. Every change to the canvas rewrites the snapshot PNG.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use drawbot_core::{DrawingId, OwnerId};
use drawbot_designer::{DrawingSession, EditHistory, PixmapSurface, RenderOptions, Renderer, Rgba};
use drawbot_generator::{generate_with_timeout, GenerationRequest, HttpShapeGenerator, ShapeGenerator};
use drawbot_settings::{BackendKind, Config};
use drawbot_storage::{DrawingBackend, DrawingGateway, HttpBackend, MemoryBackend};
use tracing::{info, warn};

pub const HELP: &str = "\
Type an instruction to draw, or one of:
  :undo              undo the last change
  :redo              redo the last undone change
  :clear             clear the canvas
  :save [title]      save the drawing
  :load <id>         load a saved drawing
  :list              list your saved drawings
  :preview <file>    write a thumbnail PNG
  :help              show this help
  :quit              exit";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Instruction(String),
    Undo,
    Redo,
    Clear,
    Save(Option<String>),
    Load(DrawingId),
    List,
    Preview(PathBuf),
    Help,
    Quit,
    Empty,
}

/// Parses one input line.
pub fn parse_line(line: &str) -> anyhow::Result<ShellCommand> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Empty);
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(ShellCommand::Instruction(line.to_string()));
    };

    let (verb, arg) = match rest.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (rest, ""),
    };

    let command = match verb {
        "undo" => ShellCommand::Undo,
        "redo" => ShellCommand::Redo,
        "clear" => ShellCommand::Clear,
        "save" => ShellCommand::Save((!arg.is_empty()).then(|| arg.to_string())),
        "load" => {
            let id = arg
                .parse()
                .with_context(|| format!("invalid drawing id '{}'", arg))?;
            ShellCommand::Load(id)
        }
        "list" => ShellCommand::List,
        "preview" => {
            if arg.is_empty() {
                bail!(":preview needs a file name");
            }
            ShellCommand::Preview(PathBuf::from(arg))
        }
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => bail!("unknown command ':{}' (try :help)", other),
    };
    Ok(command)
}

fn render_options(color: &str, line_width: f32, font: &str) -> anyhow::Result<RenderOptions> {
    let default_color =
        Rgba::from_css(color).ok_or_else(|| anyhow!("unrecognized default color '{}'", color))?;
    Ok(RenderOptions {
        default_color,
        default_line_width: line_width,
        default_font: font.to_string(),
    })
}

/// Builds the renderer described by `config`.
pub fn renderer_from_config(config: &Config) -> anyhow::Result<Renderer> {
    let main = render_options(
        &config.render.default_color,
        config.render.default_line_width,
        &config.render.default_font,
    )?;
    let preview = render_options(
        &config.render.default_color,
        config.preview.default_line_width,
        &config.preview.default_font,
    )?;
    Ok(Renderer::new(main).with_preview_options(preview))
}

/// Interactive drawing session wired to a generator and a storage backend.
pub struct Shell {
    config: Config,
    session: DrawingSession,
    renderer: Renderer,
    generator: Box<dyn ShapeGenerator>,
    gateway: DrawingGateway<Box<dyn DrawingBackend>>,
}

impl Shell {
    pub fn new(
        config: Config,
        generator: Box<dyn ShapeGenerator>,
        backend: Box<dyn DrawingBackend>,
    ) -> anyhow::Result<Self> {
        config.validate().context("invalid configuration")?;
        let renderer = renderer_from_config(&config)?;
        let history = match config.history.max_depth {
            Some(depth) => EditHistory::with_max_depth(depth),
            None => EditHistory::new(),
        };
        let session = DrawingSession::with_history(OwnerId::new(config.backend.owner_id), history);

        Ok(Self {
            config,
            session,
            renderer,
            generator,
            gateway: DrawingGateway::new(backend),
        })
    }

    /// Shell talking to the services named in `config`.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        // The deadline is applied per instruction in `instruct`.
        let generator = HttpShapeGenerator::new(config.generator.endpoint.clone());
        let backend: Box<dyn DrawingBackend> = match config.backend.kind {
            BackendKind::Http => Box::new(HttpBackend::new(config.backend.base_url.clone())),
            BackendKind::Memory => Box::new(MemoryBackend::new()),
        };
        info!(
            "Generator at {}, {} storage backend",
            config.generator.endpoint, config.backend.kind
        );
        Self::new(config, Box::new(generator), backend)
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs one command and returns the text to show the user.
    ///
    /// Failures leave the session as it was.
    pub async fn execute(&mut self, command: ShellCommand) -> anyhow::Result<String> {
        let (message, changed) = match command {
            ShellCommand::Empty | ShellCommand::Quit => return Ok(String::new()),
            ShellCommand::Help => return Ok(HELP.to_string()),
            ShellCommand::Instruction(text) => self.instruct(&text).await?,
            ShellCommand::Undo => toggle(self.session.undo(), "Undone", "Nothing to undo"),
            ShellCommand::Redo => toggle(self.session.redo(), "Redone", "Nothing to redo"),
            ShellCommand::Clear => toggle(self.session.clear(), "Cleared", "Canvas already empty"),
            ShellCommand::Save(title) => (self.save(title).await?, false),
            ShellCommand::Load(id) => (self.load(id).await?, true),
            ShellCommand::List => (self.list().await?, false),
            ShellCommand::Preview(path) => {
                self.write_preview(&path)?;
                (format!("Preview written to {}", path.display()), false)
            }
        };

        if changed {
            let path = self.config.render.snapshot_path.clone();
            self.write_snapshot(&path)?;
        }
        Ok(message)
    }

    async fn instruct(&mut self, text: &str) -> anyhow::Result<(String, bool)> {
        let request =
            GenerationRequest::new(self.session.instructions(), self.session.commands(), text)?;
        let raws = generate_with_timeout(
            self.generator.as_ref(),
            &request,
            self.config.generator.timeout(),
        )
        .await
        .context("shape generation failed")?;

        let result = self.session.apply_instruction_batch(text, &raws);
        for rejected in &result.rejected {
            warn!("Dropped shape #{}: {}", rejected.index, rejected.error);
        }

        let added = result.commands.len();
        let mut message = format!("Added {} shape{}", added, if added == 1 { "" } else { "s" });
        if !result.rejected.is_empty() {
            message.push_str(&format!(" ({} rejected)", result.rejected.len()));
        }
        Ok((message, added > 0))
    }

    async fn save(&mut self, title: Option<String>) -> anyhow::Result<String> {
        if let Some(title) = title {
            self.session.set_title(title);
        }
        let title = self.session.title().to_string();
        let id = self
            .gateway
            .save(self.session.owner(), &title, self.session.commands())
            .await
            .context("saving drawing")?;
        self.session.mark_saved(id);
        Ok(format!("Saved '{}' as drawing {}", title, id))
    }

    async fn load(&mut self, id: DrawingId) -> anyhow::Result<String> {
        let drawing = self
            .gateway
            .load(id)
            .await
            .with_context(|| format!("loading drawing {}", id))?;
        let count = drawing.commands.len();
        let title = drawing.title.clone();
        self.session.load_drawing(drawing.id, drawing.title, drawing.commands);
        Ok(format!("Loaded '{}' ({} shapes)", title, count))
    }

    async fn list(&self) -> anyhow::Result<String> {
        let drawings = self
            .gateway
            .load_all_by_owner(self.session.owner())
            .await
            .context("listing drawings")?;
        if drawings.is_empty() {
            return Ok("No saved drawings".to_string());
        }
        let lines: Vec<String> = drawings
            .iter()
            .map(|d| {
                format!(
                    "{:>5}  {}  ({} shapes, {})",
                    d.id,
                    d.title,
                    d.commands.len(),
                    d.created_at.format("%Y-%m-%d %H:%M")
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }

    /// Renders the full canvas to a PNG file.
    pub fn write_snapshot(&self, path: &Path) -> anyhow::Result<()> {
        let mut surface = PixmapSurface::new(self.config.canvas.width, self.config.canvas.height)?;
        self.session.render(&self.renderer, &mut surface);
        surface
            .save_png(path)
            .with_context(|| format!("writing snapshot {}", path.display()))
    }

    /// Renders the fit-to-frame thumbnail to a PNG file.
    pub fn write_preview(&self, path: &Path) -> anyhow::Result<()> {
        let mut surface =
            PixmapSurface::new(self.config.preview.width, self.config.preview.height)?;
        self.session.render_preview(&self.renderer, &mut surface);
        surface
            .save_png(path)
            .with_context(|| format!("writing preview {}", path.display()))
    }
}

fn toggle(done: bool, yes: &str, no: &str) -> (String, bool) {
    (if done { yes } else { no }.to_string(), done)
}
