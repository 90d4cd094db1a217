//! Scripted key sessions against the app model, without a terminal.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use sortviz_core::{Algorithm, Theme};
use sortviz_demo::app::{Action, App};
use sortviz_demo::cli::{Command, Opts};

fn press(app: &mut App, c: char) -> Option<Action> {
    app.handle_key(&KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn app_from_args(list: &[&str]) -> App {
    let args = list.iter().map(|s| s.to_string());
    match Opts::parse_from(|_| None, args) {
        Ok(Command::Run(opts)) => App::new(opts.visualizer_config()),
        other => panic!("expected Run, got {other:?}"),
    }
}

#[test]
fn every_algorithm_sorts_from_the_keyboard() {
    let mut app = app_from_args(&["--size=10", "--speed=1", "--theme=tree"]);
    for (n, algorithm) in ('1'..='6').zip(Algorithm::ALL) {
        assert_eq!(press(&mut app, n), Some(Action::SelectAlgorithm(algorithm)));
        press(&mut app, ' ');

        let mut now = Duration::ZERO;
        let mut frames = 0;
        while !app.visualizer().is_complete() {
            app.tick(now);
            now += Duration::from_millis(16);
            frames += 1;
            assert!(frames < 5_000, "{algorithm} stalled");
        }
        let values = app.visualizer().values();
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "{algorithm}");
        assert!(app.status_line().ends_with("sorted"));

        // Stop, then reset for the next algorithm.
        press(&mut app, ' ');
        press(&mut app, 'r');
        app.tick(now);
    }
    assert_eq!(app.visualizer().config().theme, Theme::Tree);
}

#[test]
fn theme_switch_mid_run_reseeds_with_theme_range() {
    let mut app = app_from_args(&["--speed=1", "--autostart"]);
    app.start();
    for f in 0..20 {
        app.tick(Duration::from_millis(16 * f));
    }
    press(&mut app, 't');

    let config = app.visualizer().config().clone();
    assert_eq!(config.theme, Theme::Space);
    let range = config.value_range();
    assert!(app.visualizer().values().iter().all(|&v| range.contains(v)));
    assert!(app.visualizer().is_running());
}

#[test]
fn frames_render_at_any_terminal_size() {
    let app = app_from_args(&["--size=100"]);
    for (w, h) in [(1, 1), (20, 3), (80, 24), (300, 90)] {
        let mut out = Vec::new();
        app.draw(&mut out, w, h).expect("draw to vec");
        assert!(!out.is_empty());
    }
}
