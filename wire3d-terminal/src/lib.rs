//! Terminal front end for the wireframe demo
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::f32::consts::PI;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wire3d_core::{Axis, ManualScheduler, RenderConfig, RenderSession, ShapeName};

pub mod renderer;

pub use renderer::AsciiSurface;

/// Radians added or removed per key press on a rotation slider
pub const SLIDER_STEP: f32 = 0.1;

/// Terminal rows taken by the status line above the canvas
pub const STATUS_ROWS: usize = 1;

/// Startup options for [`TerminalApp`]
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub shape: ShapeName,
    pub animate: bool,
    pub fps: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub config: RenderConfig,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            shape: ShapeName::Cube,
            animate: false,
            fps: 60,
            canvas_width: 600,
            canvas_height: 400,
            config: RenderConfig::default(),
        }
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    session: RenderSession<ManualScheduler>,
    surface: AsciiSurface,
    running: bool,
    target_frame_time: Duration,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(options: ViewerOptions) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::with_size(options, cols as usize, rows as usize))
    }

    /// Build the app for a fixed cell grid without touching the terminal
    pub fn with_size(options: ViewerOptions, cols: usize, rows: usize) -> Self {
        let mut session =
            RenderSession::with_config(options.shape, ManualScheduler::new(), &options.config);
        if options.animate {
            session.toggle_animation();
        }

        Self {
            session,
            surface: AsciiSurface::new(
                options.canvas_width,
                options.canvas_height,
                cols,
                rows.saturating_sub(STATUS_ROWS),
            ),
            running: true,
            target_frame_time: Duration::from_secs(1) / options.fps.max(1),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn session(&self) -> &RenderSession<ManualScheduler> {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        self.session.destroy();
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // One display refresh: deliver the pending animation frame, if any
            self.advance_frame();

            if self.session.needs_redraw() {
                self.render()?;
            }

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Fire the scheduler's pending frame into the session
    pub fn advance_frame(&mut self) -> bool {
        match self.session.scheduler_mut().fire() {
            Some(handle) => self.session.on_frame(handle),
            None => false,
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => self.handle_key(code),
            Event::Resize(cols, rows) => {
                log::debug!("terminal resized to {}x{}", cols, rows);
                self.surface
                    .resize(cols as usize, (rows as usize).saturating_sub(STATUS_ROWS));
                self.session.invalidate();
            }
            _ => {}
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.session.destroy();
                self.running = false;
            }
            KeyCode::Char('1') => self.session.set_shape(ShapeName::Cube),
            KeyCode::Char('2') => self.session.set_shape(ShapeName::Pyramid),
            KeyCode::Char('3') => self.session.set_shape(ShapeName::Sphere),
            KeyCode::Char('w') | KeyCode::Up => self.nudge(Axis::X, SLIDER_STEP),
            KeyCode::Char('s') | KeyCode::Down => self.nudge(Axis::X, -SLIDER_STEP),
            KeyCode::Char('a') | KeyCode::Left => self.nudge(Axis::Y, -SLIDER_STEP),
            KeyCode::Char('d') | KeyCode::Right => self.nudge(Axis::Y, SLIDER_STEP),
            KeyCode::Char('e') => self.nudge(Axis::Z, SLIDER_STEP),
            KeyCode::Char('r') => self.nudge(Axis::Z, -SLIDER_STEP),
            KeyCode::Char(' ') => {
                let animating = self.session.toggle_animation();
                log::info!("animation {}", if animating { "on" } else { "off" });
            }
            KeyCode::Char('0') | KeyCode::Backspace => self.session.reset_rotation(),
            _ => {}
        }
    }

    /// Move a slider by `step`, keeping it inside its one-turn range
    fn nudge(&mut self, axis: Axis, step: f32) {
        let value = (self.session.slider_values().get(axis) + step).clamp(-PI, PI);
        self.session.set_rotation(axis, value);
    }

    pub fn status_line(&self) -> String {
        let sliders = self.session.slider_values();
        format!(
            "Wire3D | {} | x {:+.2} y {:+.2} z {:+.2} | {} | FPS: {:.1} | 1-3=Shape WASD/Arrows/E/R=Rotate Space=Animate 0=Reset Q=Quit",
            self.session.shape_name(),
            sliders.x,
            sliders.y,
            sliders.z,
            if self.session.is_animating() { "animating" } else { "idle" },
            self.fps
        )
    }

    fn render(&mut self) -> io::Result<()> {
        self.session.render_frame(&mut self.surface);

        // Output to terminal
        let mut stdout = stdout();
        self.surface.draw_at(&mut stdout, STATUS_ROWS as u16)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(self.status_line()),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire3d_core::RotationState;

    fn app() -> TerminalApp {
        TerminalApp::with_size(ViewerOptions::default(), 80, 24)
    }

    #[test]
    fn test_shape_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.session().shape_name(), ShapeName::Sphere);
        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.session().shape_name(), ShapeName::Pyramid);
    }

    #[test]
    fn test_slider_keys_step_and_clamp() {
        let mut app = app();
        app.handle_key(KeyCode::Up);
        app.handle_key(KeyCode::Char('d'));
        app.handle_key(KeyCode::Char('r'));
        let r = app.session().rotation();
        assert!((r.x - 0.1).abs() < 1e-6);
        assert!((r.y - 0.1).abs() < 1e-6);
        assert!((r.z + 0.1).abs() < 1e-6);

        for _ in 0..100 {
            app.handle_key(KeyCode::Char('w'));
        }
        assert!((app.session().rotation().x - PI).abs() < 1e-6);
    }

    #[test]
    fn test_space_animates_on_frames() {
        let mut app = app();
        assert!(!app.advance_frame());
        app.handle_key(KeyCode::Char(' '));
        assert!(app.session().is_animating());
        assert!(app.advance_frame());
        assert!(app.advance_frame());
        assert!((app.session().rotation().y - 0.04).abs() < 1e-6);

        app.handle_key(KeyCode::Char(' '));
        assert!(!app.advance_frame());
    }

    #[test]
    fn test_reset_key_stops_animation() {
        let mut app = app();
        app.handle_key(KeyCode::Char(' '));
        app.advance_frame();
        app.handle_key(KeyCode::Backspace);
        assert_eq!(app.session().rotation(), RotationState::zero());
        assert!(!app.session().is_animating());
        assert!(!app.advance_frame());
    }

    #[test]
    fn test_quit_destroys_session() {
        let mut app = app();
        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::Char('q'));
        assert!(!app.is_running());
        assert!(app.session().is_destroyed());
        assert_eq!(app.session().scheduler().pending_count(), 0);
    }

    #[test]
    fn test_start_animated_option() {
        let options = ViewerOptions {
            animate: true,
            shape: ShapeName::Pyramid,
            ..ViewerOptions::default()
        };
        let app = TerminalApp::with_size(options, 80, 24);
        assert!(app.session().is_animating());
        assert!(app.status_line().contains("pyramid"));
        assert!(app.status_line().contains("animating"));
    }

    #[test]
    fn test_status_row_is_reserved() {
        let app = app();
        assert_eq!(app.surface.rows(), 23);
        assert_eq!(app.surface.cols(), 80);

        // A one-row terminal leaves no canvas at all
        let tiny = TerminalApp::with_size(ViewerOptions::default(), 80, 1);
        assert!(tiny.surface.is_empty());
    }

    #[test]
    fn test_resize_keeps_status_row() {
        let mut app = app();
        app.handle_event(Event::Resize(100, 40));
        assert_eq!(app.surface.rows(), 39);
        assert_eq!(app.surface.cols(), 100);
        assert!(app.session().needs_redraw());
    }

    #[test]
    fn test_render_paints_surface() {
        let mut app = app();
        app.session.render_frame(&mut app.surface);
        let painted = app
            .surface
            .lines()
            .iter()
            .filter(|l| !l.trim().is_empty())
            .count();
        assert!(painted > 0);
        assert!(!app.session().needs_redraw());
    }
}
