//! Frame-driven outer loop: render pass, input, tick, autosave, status

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info};

use crate::{
    config::{GameConfig, SnapshotConfig},
    input::InputSource,
    render::{plan_frame, FramePlan},
    session::{Session, SessionError, SessionState},
    snapshot::SnapshotWriter,
    systems::TickEvent,
};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub session_name: String,
    /// Nominal frames per second. Status is logged once per this many frames.
    pub framerate: u32,
    /// Sleep between frames to hold the nominal rate.
    pub realtime: bool,
    pub snapshot: SnapshotConfig,
}

impl EngineSettings {
    pub fn from_config(session_name: impl Into<String>, config: &GameConfig) -> Self {
        Self {
            session_name: session_name.into(),
            framerate: config.framerate,
            realtime: false,
            snapshot: config.snapshot.clone(),
        }
    }
}

pub struct EngineBuilder {
    settings: EngineSettings,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn realtime(mut self, realtime: bool) -> Self {
        self.settings.realtime = realtime;
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            snapshot_writer: SnapshotWriter::from_config(&self.settings.snapshot),
            settings: self.settings,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub escaped: bool,
    pub autosaves: Vec<PathBuf>,
}

pub struct Engine {
    settings: EngineSettings,
    snapshot_writer: SnapshotWriter,
}

impl Engine {
    pub fn run(
        &mut self,
        session: &mut Session,
        input: &mut dyn InputSource,
        max_frames: u64,
    ) -> Result<RunSummary> {
        self.run_with_hook(session, input, max_frames, |_| {})
    }

    /// Runs until escape or `max_frames`. The hook plays renderer: it sees
    /// each frame's plan before that frame's tick, never during one.
    pub fn run_with_hook<F>(
        &mut self,
        session: &mut Session,
        input: &mut dyn InputSource,
        max_frames: u64,
        mut hook: F,
    ) -> Result<RunSummary>
    where
        F: FnMut(&FramePlan),
    {
        match session.state() {
            SessionState::Idle => session.start()?,
            SessionState::Playing => {}
            state => return Err(SessionError::NotPlaying { state }.into()),
        }
        info!(
            session = %self.settings.session_name,
            max_frames,
            framerate = self.settings.framerate,
            realtime = self.settings.realtime,
            "session_started"
        );

        let frame_budget = Duration::from_secs_f64(1.0 / f64::from(self.settings.framerate.max(1)));
        let mut summary = RunSummary::default();
        let mut window = StatusWindow::new();

        for _ in 0..max_frames {
            let frame_start = Instant::now();
            let frame = session.world().frame_number();
            {
                let (viewport, landscape) = session.render_view();
                hook(&plan_frame(frame, viewport, landscape));
            }

            let result = session.tick(input.next_intent(frame))?;
            if result.escape_requested {
                info!(frame, reason = "escape", "shutdown_requested");
                summary.escaped = true;
                break;
            }
            summary.frames += 1;
            window.record_frame();
            for event in &result.events {
                log_event(event);
            }

            if let Some(path) = self
                .snapshot_writer
                .maybe_write(&self.settings.session_name, session.world())?
            {
                info!(path = %path.display(), "autosave_written");
                summary.autosaves.push(path);
            }

            if self.settings.realtime {
                thread::sleep(frame_budget.saturating_sub(frame_start.elapsed()));
            }

            let frame_number = session.world().frame_number();
            if frame_number % u64::from(self.settings.framerate.max(1)) == 0 {
                let fps = window.close();
                info!(
                    frame = frame_number,
                    fps = (fps * 10.0).round() / 10.0,
                    asphalt = session.world().asphalt_count(),
                    tiles = session.world().landscape.len(),
                    "status"
                );
            }
        }

        info!(
            frames = summary.frames,
            escaped = summary.escaped,
            asphalt = session.world().asphalt_count(),
            "session_finished"
        );
        Ok(summary)
    }
}

/// Frames run since the last status line. A resumed session can open with
/// a window shorter than `framerate`.
struct StatusWindow {
    started: Instant,
    frames: u32,
}

impl StatusWindow {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            frames: 0,
        }
    }

    fn record_frame(&mut self) {
        self.frames += 1;
    }

    /// Rate over the window, which then starts over.
    fn close(&mut self) -> f64 {
        let fps = frame_rate(self.frames, self.started.elapsed());
        *self = Self::new();
        fps
    }
}

fn frame_rate(frames: u32, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        f64::from(frames) / secs
    } else {
        0.0
    }
}

fn log_event(event: &TickEvent) {
    match event {
        TickEvent::AsphaltCollected { coord, inventory } => {
            debug!(x = coord.x, y = coord.y, inventory, "asphalt_collected");
        }
        TickEvent::TilePaved { coord, inventory } => {
            debug!(x = coord.x, y = coord.y, inventory, "tile_paved");
        }
    }
}
