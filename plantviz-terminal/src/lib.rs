/// Terminal host for plantviz scenes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod camera;
pub mod config;
pub mod demo;
pub mod renderer;
pub mod scene;
pub mod tessellate;

pub use camera::{Camera, ProjectionMode};
pub use config::HostSettings;
pub use demo::Demo;
pub use renderer::AsciiRenderer;
pub use scene::{Placed, Scene};

/// Core errors surface as `InvalidData` at the terminal boundary
pub fn core_error(err: plantviz_core::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    /// Shift the wireframe on the ground plane
    Move { dx: f32, dz: f32 },
    ToggleProjection,
}

impl Action {
    pub fn from_key(code: KeyCode, step: f32) -> Option<Self> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('w') | KeyCode::Up => Some(Action::Move { dx: 0.0, dz: -step }),
            KeyCode::Char('s') | KeyCode::Down => Some(Action::Move { dx: 0.0, dz: step }),
            KeyCode::Char('a') | KeyCode::Left => Some(Action::Move { dx: -step, dz: 0.0 }),
            KeyCode::Char('d') | KeyCode::Right => Some(Action::Move { dx: step, dz: 0.0 }),
            KeyCode::Char('p') => Some(Action::ToggleProjection),
            _ => None,
        }
    }
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    demo: Demo,
    settings: HostSettings,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(settings: HostSettings) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        // Top row is the status line
        let height = height.saturating_sub(1).max(1);

        Ok(Self {
            demo: Demo::new(settings.viewer)?,
            settings,
            camera: Camera::new(width as u32, height as u32),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = self.settings.frame_time();

        while self.running {
            let frame_start = Instant::now();

            // Drain pending input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
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

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => {
                if let Some(action) = Action::from_key(code, self.settings.translation_step) {
                    self.apply(action);
                }
            }
            Event::Resize(width, height) => {
                let height = height.saturating_sub(1).max(1);
                self.renderer = AsciiRenderer::new(width as usize, height as usize);
                self.camera.resize(width as u32, height as u32);
                execute!(stdout(), terminal::Clear(terminal::ClearType::All))?;
            }
            _ => {}
        }
        Ok(())
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Move { dx, dz } => self.demo.nudge_wireframe(dx, dz),
            Action::ToggleProjection => {
                self.camera.toggle_projection();
                tracing::debug!(mode = ?self.camera.mode, "projection toggled");
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.renderer.render_scene(&self.demo.scene, &self.camera);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;
        self.renderer.draw(&mut stdout)?;

        // Status line
        let offset = self.demo.wireframe.transform().translation();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Plantviz | FPS: {:.1} | {} | wireframe x={:.0} z={:.0} | WASD/Arrows=Move P=Projection Q=Quit",
                self.fps,
                self.camera.mode.label(),
                offset.x,
                offset.z,
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
