use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info, warn};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, interval_at};

use crate::game::{GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{BoardLayout, FoodMarker, Renderer};

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Geometry of the last drawn frame, used to split clicks
    layout: Option<BoardLayout>,
    game_over_recorded: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, food_marker: FoodMarker) -> Self {
        let renderer = Renderer::new(food_marker, config.cell_width);
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            should_quit: false,
            layout: None,
            game_over_recorded: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = match setup_terminal() {
            Ok(terminal) => terminal,
            Err(err) => {
                // Hand the shell back before reporting
                let mut stderr = stderr();
                let _ = execute!(stderr, LeaveAlternateScreen, DisableMouseCapture);
                let _ = disable_raw_mode();
                return Err(err);
            }
        };

        info!(
            "Starting game on a {0}x{0} grid, tick every {1:?}",
            self.state.grid_size,
            self.engine.config().tick_period()
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_period = self.engine.config().tick_period();
        let mut tick_timer = tick_timer(tick_period);

        // Board must be on screen before the first move and the first click
        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        if self.handle_event(event) {
                            self.draw(terminal)?;
                        }
                    }
                }

                // Game logic tick, then redraw
                _ = tick_timer.tick() => {
                    self.update_game(tick_period);
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quitting with score {}", self.state.score);
                break;
            }
        }

        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal
            .draw(|frame| {
                self.layout = Some(self.renderer.render(frame, &self.state, &self.metrics));
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    /// Apply one terminal event; returns whether the screen should be redrawn
    fn handle_event(&mut self, event: Event) -> bool {
        let action = match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return false;
                }
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => match &self.layout {
                Some(layout) => self.input_handler.handle_mouse_event(mouse, layout),
                // Nothing drawn yet, so there is no board to split
                None => KeyAction::None,
            },
            Event::Resize(..) => return true,
            _ => return false,
        };

        match action {
            KeyAction::GameAction(action) => {
                debug!("Input {:?}", action);
                self.state.apply(action);
            }
            KeyAction::Restart => {
                self.reset_game();
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => return false,
        }

        true
    }

    fn update_game(&mut self, dt: Duration) {
        let result = self.engine.update(&mut self.state, dt);

        // Track game over
        if result.terminated && !self.game_over_recorded {
            self.game_over_recorded = true;
            self.metrics.on_game_over(self.state.score);
        }
    }

    fn reset_game(&mut self) {
        info!("Restarting game");
        self.state = self.engine.reset();
        self.game_over_recorded = false;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        // Every step runs even when an earlier one fails
        first_failure([
            disable_raw_mode().context("Failed to disable raw mode"),
            execute!(
                terminal.backend_mut(),
                LeaveAlternateScreen,
                DisableMouseCapture
            )
            .context("Failed to leave alternate screen"),
            terminal.show_cursor().context("Failed to show cursor"),
        ])
    }
}

/// Enter the alternate screen and build the terminal; raw mode is already on
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Game clock whose first tick lands one full period after start
fn tick_timer(period: Duration) -> Interval {
    interval_at(Instant::now() + period, period)
}

/// Log every failed step and return the first one
fn first_failure(steps: impl IntoIterator<Item = Result<()>>) -> Result<()> {
    let mut first = None;
    for step in steps {
        if let Err(err) = step {
            warn!("Terminal restore step failed: {:#}", err);
            first.get_or_insert(err);
        }
    }
    first.map_or(Ok(()), Err)
}
