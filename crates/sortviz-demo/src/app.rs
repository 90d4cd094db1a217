#![forbid(unsafe_code)]

//! Key bindings, status line and per-frame update for the terminal app.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor::MoveTo, queue};
use sortviz_core::{Algorithm, FrameResult, ToneSink, Visualizer, VisualizerConfig};

use crate::scene::Scene;

/// Values added or removed by one size key press.
pub const SIZE_STEP: usize = 10;

/// Rows below the scene: status line and key hints.
pub const CHROME_ROWS: u16 = 2;

const KEY_HINTS: &str =
    " space start/stop  r reset  a/1-6 algorithm  t theme  +/- speed  ]/[ size  q quit";

/// A user command decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Toggle,
    Reset,
    NextAlgorithm,
    SelectAlgorithm(Algorithm),
    NextTheme,
    Faster,
    Slower,
    Grow,
    Shrink,
    Quit,
}

impl Action {
    /// Decode a key event. Releases and unbound keys map to `None`.
    #[must_use]
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => Some(Self::Quit),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Char(' ') => Some(Self::Toggle),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Self::Reset),
            KeyCode::Char('a') | KeyCode::Char('A') => Some(Self::NextAlgorithm),
            KeyCode::Char(c @ '1'..='6') => {
                let idx = (c as usize) - ('1' as usize);
                Algorithm::ALL.get(idx).copied().map(Self::SelectAlgorithm)
            }
            KeyCode::Char('t') | KeyCode::Char('T') => Some(Self::NextTheme),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Self::Faster),
            KeyCode::Char('-') | KeyCode::Char('_') => Some(Self::Slower),
            KeyCode::Char(']') => Some(Self::Grow),
            KeyCode::Char('[') => Some(Self::Shrink),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Application model: the visualizer plus quit state.
#[derive(Debug)]
pub struct App {
    vis: Visualizer,
    quit: bool,
    was_complete: bool,
}

impl App {
    #[must_use]
    pub fn new(config: VisualizerConfig) -> Self {
        Self {
            vis: Visualizer::new(config),
            quit: false,
            was_complete: false,
        }
    }

    pub fn attach_sink(&mut self, sink: Box<dyn ToneSink>) {
        self.vis.attach_sink(sink);
    }

    pub fn start(&mut self) {
        self.vis.start();
    }

    #[must_use]
    pub fn visualizer(&self) -> &Visualizer {
        &self.vis
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event. Returns the decoded action, if any.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<Action> {
        let action = Action::from_key(key)?;
        self.apply(action);
        Some(action)
    }

    pub fn apply(&mut self, action: Action) {
        tracing::debug!(?action, "key action");
        let current = self.vis.config().clone();
        match action {
            Action::Toggle => self.vis.toggle(),
            Action::Reset => self.vis.request_reset(),
            Action::NextAlgorithm => self.reconfigure(VisualizerConfig {
                algorithm: current.algorithm.next(),
                ..current
            }),
            Action::SelectAlgorithm(algorithm) => {
                self.reconfigure(VisualizerConfig {
                    algorithm,
                    ..current
                });
            }
            Action::NextTheme => self.reconfigure(VisualizerConfig {
                theme: current.theme.next(),
                ..current
            }),
            Action::Faster => self.vis.set_speed(current.speed.saturating_sub(1)),
            Action::Slower => self.vis.set_speed(current.speed.saturating_add(1)),
            Action::Grow => self.reconfigure(VisualizerConfig {
                size: current.size.saturating_add(SIZE_STEP),
                ..current
            }),
            Action::Shrink => self.reconfigure(VisualizerConfig {
                size: current.size.saturating_sub(SIZE_STEP),
                ..current
            }),
            Action::Quit => self.quit = true,
        }
    }

    fn reconfigure(&mut self, next: VisualizerConfig) {
        if self.vis.apply_config(next) {
            self.was_complete = false;
        }
    }

    /// Advance one frame at host time `now`.
    pub fn tick(&mut self, now: Duration) -> FrameResult {
        let result = self.vis.frame(now);
        if result.reset {
            self.was_complete = false;
        }
        if result.completed && !self.was_complete {
            let config = self.vis.config();
            tracing::info!(
                algorithm = %config.algorithm,
                size = config.size,
                steps = self.vis.engine().steps(),
                "sorted"
            );
        }
        self.was_complete = result.completed;
        result
    }

    /// One-line summary: algorithm, complexity, speed, size and run state.
    #[must_use]
    pub fn status_line(&self) -> String {
        let config = self.vis.config();
        let complexity = config.algorithm.complexity();
        let state = if self.vis.is_complete() {
            "sorted"
        } else if self.vis.is_running() {
            "running"
        } else {
            "paused"
        };
        format!(
            " {} | time {} | space {} | speed {} | size {} | {} | {}",
            config.algorithm.label(),
            complexity.time,
            complexity.space,
            config.speed,
            config.size,
            config.theme.label(),
            state,
        )
    }

    /// Rasterize the current sequence for a `width` x `height` terminal.
    #[must_use]
    pub fn scene(&self, width: u16, height: u16) -> Scene {
        let config = self.vis.config();
        Scene::rasterize(
            self.vis.values(),
            self.vis.highlight(),
            config.theme,
            config.canvas_height,
            width,
            height.saturating_sub(CHROME_ROWS),
        )
    }

    /// Draw scene, status line and key hints, then flush.
    pub fn draw<W: Write>(&self, out: &mut W, width: u16, height: u16) -> io::Result<()> {
        let scene = self.scene(width, height);
        scene.paint(out, 0)?;

        let status = truncate(&self.status_line(), usize::from(width));
        let hints = truncate(KEY_HINTS, usize::from(width));
        queue!(
            out,
            MoveTo(0, scene.height()),
            Clear(ClearType::CurrentLine),
            SetAttribute(Attribute::Bold),
            Print(status),
            SetAttribute(Attribute::Reset),
            MoveTo(0, scene.height() + 1),
            Clear(ClearType::CurrentLine),
            SetAttribute(Attribute::Dim),
            Print(hints),
            SetAttribute(Attribute::Reset),
        )?;
        out.flush()
    }
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sortviz_core::Theme;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn fast_app() -> App {
        App::new(VisualizerConfig {
            speed: 1,
            size: 20,
            ..VisualizerConfig::default()
        })
    }

    fn run_frames(app: &mut App, frames: u64) {
        for f in 0..frames {
            app.tick(Duration::from_millis(16 * f));
        }
    }

    #[test]
    fn keys_decode_to_actions() {
        assert_eq!(Action::from_key(&key(KeyCode::Char(' '))), Some(Action::Toggle));
        assert_eq!(Action::from_key(&key(KeyCode::Char('r'))), Some(Action::Reset));
        assert_eq!(
            Action::from_key(&key(KeyCode::Char('4'))),
            Some(Action::SelectAlgorithm(Algorithm::Heap))
        );
        assert_eq!(Action::from_key(&key(KeyCode::Char('7'))), None);
        assert_eq!(Action::from_key(&key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            Action::from_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(Action::from_key(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut release = key(KeyCode::Char(' '));
        release.kind = KeyEventKind::Release;
        assert_eq!(Action::from_key(&release), None);
    }

    #[test]
    fn space_toggles_running() {
        let mut app = fast_app();
        app.handle_key(&key(KeyCode::Char(' ')));
        assert!(app.visualizer().is_running());
        app.handle_key(&key(KeyCode::Char(' ')));
        assert!(!app.visualizer().is_running());
    }

    #[test]
    fn speed_keys_clamp() {
        let mut app = fast_app();
        app.apply(Action::Faster);
        assert_eq!(app.visualizer().config().speed, 1);
        for _ in 0..40 {
            app.apply(Action::Slower);
        }
        assert_eq!(app.visualizer().config().speed, 30);
    }

    #[test]
    fn size_keys_reseed_with_new_length() {
        let mut app = fast_app();
        app.apply(Action::Grow);
        assert_eq!(app.visualizer().values().len(), 30);
        for _ in 0..5 {
            app.apply(Action::Shrink);
        }
        assert_eq!(app.visualizer().values().len(), 10);
    }

    #[test]
    fn algorithm_and_theme_keys_cycle() {
        let mut app = fast_app();
        app.apply(Action::NextAlgorithm);
        assert_eq!(app.visualizer().config().algorithm, Algorithm::Quick);
        app.apply(Action::SelectAlgorithm(Algorithm::Insertion));
        assert_eq!(app.visualizer().config().algorithm, Algorithm::Insertion);
        app.apply(Action::NextTheme);
        assert_eq!(app.visualizer().config().theme, Theme::Space);
    }

    #[test]
    fn reset_key_stops_on_next_frame() {
        let mut app = fast_app();
        app.start();
        run_frames(&mut app, 5);
        app.apply(Action::Reset);
        let result = app.tick(Duration::from_secs(1));
        assert!(result.reset);
        assert!(!app.visualizer().is_running());
        assert!(app.status_line().ends_with("paused"));
    }

    #[test]
    fn status_line_reports_algorithm_and_state() {
        let mut app = fast_app();
        let line = app.status_line();
        assert!(line.contains("Bubble Sort"));
        assert!(line.contains("O(n²)"));
        assert!(line.contains("speed 1"));
        assert!(line.contains("size 20"));
        assert!(line.ends_with("paused"));

        app.start();
        run_frames(&mut app, 1000);
        assert!(app.status_line().ends_with("sorted"));
    }

    #[test]
    fn quit_key_sets_flag() {
        let mut app = fast_app();
        assert!(!app.should_quit());
        app.handle_key(&key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn draw_leaves_room_for_chrome() {
        let app = fast_app();
        let scene = app.scene(40, 12);
        assert_eq!(scene.height(), 10);

        let mut out = Vec::new();
        app.draw(&mut out, 40, 12).expect("draw to vec");
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Bubble Sort"));
    }
}
