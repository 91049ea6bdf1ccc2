//! Canopy Application
//!
//! Command-line shell around the drawing surface: replays scripted design
//! sessions, exports editor and poster PNGs, and talks to the travel
//! advice service.

pub mod cli;
mod config;
pub mod script;

pub use cli::{AdviseArgs, ChatArgs, Cli, Command, RenderArgs};
pub use config::AppConfig;
pub use script::{Action, Script, ScriptRun, run_script};

use canopy_advice::{Advisor, ChatTurn, FallbackAdvisor, GeminiAdvisor, TravelChecklist, TravelRequest};
use canopy_core::session::SessionError;
use canopy_render::RendererError;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
    #[error("PNG export failed: {0}")]
    Export(String),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

fn read_file(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> AppResult<()> {
    fs::write(path, contents).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// What a render run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    /// Edge length of the exported PNG.
    pub size: u32,
    /// Strokes committed by the script.
    pub commits: usize,
    pub has_drawing: bool,
}

/// Replay a script and export the editor view or the poster.
pub fn render(args: &RenderArgs, config: &AppConfig) -> AppResult<RenderSummary> {
    let script = Script::from_json(&read_file(&args.script)?)?;
    let ScriptRun { mut controller, commits } = run_script(script, config.resolution)?;

    let pixmap = if args.poster {
        controller.render_poster(args.size.unwrap_or(config.poster_size))?
    } else {
        controller.render_editor()?
    };
    let png = pixmap.encode_png().map_err(|e| AppError::Export(e.to_string()))?;
    write_file(&args.out, png)?;
    log::info!("Wrote {}x{} PNG to {}", pixmap.width(), pixmap.height(), args.out.display());

    let session = controller.into_session();
    if let Some(path) = &args.snapshot {
        match session.latest_snapshot() {
            Some(snapshot) => write_file(path, snapshot.as_str())?,
            None => log::warn!("No drawing to write to {}", path.display()),
        }
    }
    if let Some(path) = &args.save_session {
        write_file(path, session.to_json()?)?;
    }

    Ok(RenderSummary {
        size: pixmap.width(),
        commits,
        has_drawing: session.has_drawing(),
    })
}

/// Advisor configured from the environment, offline when unconfigured.
pub fn advisor_from_env() -> FallbackAdvisor<GeminiAdvisor> {
    match GeminiAdvisor::from_env() {
        Ok(advisor) => {
            log::debug!("Using model {}", advisor.model());
            FallbackAdvisor::new(advisor)
        }
        Err(e) => {
            log::warn!("Advice service not configured: {e}");
            FallbackAdvisor::offline()
        }
    }
}

/// Travel checklist for the trip described by `args`.
pub fn advise<A: Advisor>(args: &AdviseArgs, advisor: &FallbackAdvisor<A>) -> TravelChecklist {
    advisor.advice(&TravelRequest {
        weather: args.weather.clone(),
        destination: args.destination.clone(),
        mode: args.mode.clone(),
    })
}

/// Assistant reply to `args.message`.
pub fn chat<A: Advisor>(args: &ChatArgs, advisor: &FallbackAdvisor<A>) -> AppResult<String> {
    let history: Vec<ChatTurn> = match &args.history {
        Some(path) => serde_json::from_str(&read_file(path)?)?,
        None => Vec::new(),
    };
    Ok(advisor.reply(&history, &args.message))
}

/// Run one parsed command, printing its result.
pub fn run(cli: Cli, config: &AppConfig) -> AppResult<()> {
    match cli.command {
        Command::Render(args) => {
            let summary = render(&args, config)?;
            println!(
                "{}: {} stroke(s) committed, {}x{} PNG written to {}",
                config.title,
                summary.commits,
                summary.size,
                summary.size,
                args.out.display()
            );
        }
        Command::Advise(args) => {
            let checklist = advise(&args, &advisor_from_env());
            println!("{}", serde_json::to_string_pretty(&checklist)?);
        }
        Command::Chat(args) => {
            println!("{}", chat(&args, &advisor_from_env())?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_advice::{AdviceError, AdviceResult, CHAT_FALLBACK, fallback_checklist};
    use canopy_core::session::DesignSession;
    use canopy_core::snapshot::Snapshot;

    const SCRIPT: &str = r##"{
        "actions": [
            { "action": "set_step", "step": "paint" },
            { "action": "set_fill_color", "color": "#059669" },
            { "action": "set_pattern", "pattern": "dots" },
            { "action": "set_brush_color", "color": "#f43f5e" },
            { "action": "pointer", "event": { "type": "down", "source": { "kind": "mouse", "client": { "x": 60, "y": 140 } } } },
            { "action": "pointer", "event": { "type": "move", "source": { "kind": "mouse", "client": { "x": 200, "y": 120 } } } },
            { "action": "pointer", "event": { "type": "move", "source": { "kind": "mouse", "client": { "x": 340, "y": 150 } } } },
            { "action": "pointer", "event": { "type": "up" } },
            { "action": "set_step", "step": "share" }
        ]
    }"##;

    fn render_args(dir: &Path, poster: bool) -> RenderArgs {
        let script = dir.join("script.json");
        fs::write(&script, SCRIPT).unwrap();
        RenderArgs {
            script,
            out: dir.join("out.png"),
            snapshot: Some(dir.join("snapshot.txt")),
            save_session: Some(dir.join("session.json")),
            poster,
            size: None,
        }
    }

    #[test]
    fn test_render_editor_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let args = render_args(dir.path(), false);
        let summary = render(&args, &AppConfig::default()).unwrap();
        assert_eq!(
            summary,
            RenderSummary {
                size: 400,
                commits: 1,
                has_drawing: true
            }
        );

        let png = fs::read(&args.out).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let snapshot = Snapshot::from_data_url(fs::read_to_string(dir.path().join("snapshot.txt")).unwrap());
        assert!(snapshot.png_bytes().is_ok());

        let session = DesignSession::from_json(&fs::read_to_string(dir.path().join("session.json")).unwrap()).unwrap();
        assert_eq!(session.latest_snapshot(), Some(&snapshot));
    }

    #[test]
    fn test_render_poster_size() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = render_args(dir.path(), true);
        assert_eq!(render(&args, &AppConfig::default()).unwrap().size, 920);
        args.size = Some(300);
        assert_eq!(render(&args, &AppConfig::default()).unwrap().size, 300);
    }

    #[test]
    fn test_missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let args = RenderArgs {
            script: dir.path().join("nope.json"),
            out: dir.path().join("out.png"),
            snapshot: None,
            save_session: None,
            poster: false,
            size: None,
        };
        assert!(matches!(render(&args, &AppConfig::default()), Err(AppError::Io { .. })));
        assert!(!args.out.exists());
    }

    struct Echo;

    impl Advisor for Echo {
        fn travel_advice(&self, request: &TravelRequest) -> AdviceResult<TravelChecklist> {
            Ok(TravelChecklist {
                weather_summary: request.weather.clone(),
                ..TravelChecklist::default()
            })
        }

        fn chat(&self, history: &[ChatTurn], message: &str) -> AdviceResult<String> {
            Ok(format!("{} turns, then: {message}", history.len()))
        }
    }

    struct Down;

    impl Advisor for Down {
        fn travel_advice(&self, _request: &TravelRequest) -> AdviceResult<TravelChecklist> {
            Err(AdviceError::ApiRequest("timeout".into()))
        }

        fn chat(&self, _history: &[ChatTurn], _message: &str) -> AdviceResult<String> {
            Err(AdviceError::ApiRequest("timeout".into()))
        }
    }

    #[test]
    fn test_advise() {
        let args = AdviseArgs {
            weather: "thunderstorm".into(),
            destination: "airport".into(),
            mode: "taxi".into(),
        };
        assert_eq!(advise(&args, &FallbackAdvisor::new(Echo)).weather_summary, "thunderstorm");
        assert_eq!(advise(&args, &FallbackAdvisor::new(Down)), fallback_checklist());
    }

    #[test]
    fn test_chat_reads_history() {
        let dir = tempfile::tempdir().unwrap();
        let history = dir.path().join("history.json");
        fs::write(
            &history,
            r#"[{"role":"model","text":"Where to?"},{"role":"user","text":"Downtown"}]"#,
        )
        .unwrap();
        let args = ChatArgs {
            history: Some(history),
            message: "Umbrella?".into(),
        };
        assert_eq!(chat(&args, &FallbackAdvisor::new(Echo)).unwrap(), "2 turns, then: Umbrella?");
        assert_eq!(chat(&args, &FallbackAdvisor::new(Down)).unwrap(), CHAT_FALLBACK);
    }

    #[test]
    fn test_chat_bad_history() {
        let dir = tempfile::tempdir().unwrap();
        let history = dir.path().join("history.json");
        fs::write(&history, "{").unwrap();
        let args = ChatArgs {
            history: Some(history),
            message: "hi".into(),
        };
        assert!(matches!(chat(&args, &FallbackAdvisor::new(Echo)), Err(AppError::Json(_))));
    }
}
