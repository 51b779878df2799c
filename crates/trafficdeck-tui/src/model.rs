//! TUI application model (Elm architecture).

use std::io;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;

use trafficdeck_core::{
    CurveOptions, DashboardModel, FormField, SubmissionWorkflow, SubmitCapability, WorkflowNotice,
};

use crate::cards::{render_cards, CaseCard};
use crate::footer::render_footer;
use crate::form::{cycle_interest, render_form};
use crate::header::render_header;
use crate::keymap::{map_key, InputMode, KeyAction};
use crate::logs::{render_logs, ActivityLog};
use crate::messages::TuiMessage;
use crate::tabs::render_tabs;

/// Event-loop poll timeout; also the animation frame interval.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Lines moved by `PageUp`/`PageDown` in the activity log.
const PAGE_SIZE: usize = 10;

/// TUI application state (Elm Model).
pub struct TuiApp<C: SubmitCapability> {
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Whether the user quit with Ctrl+C.
    pub cancelled: bool,
    /// Where keystrokes go.
    pub mode: InputMode,
    /// Form field receiving input in [`InputMode::Form`].
    pub focus: FormField,
    pub dashboard: DashboardModel,
    pub workflow: SubmissionWorkflow<C>,
    /// Cards of the active tab.
    pub cards: Vec<CaseCard>,
    /// Seconds since the active tab was shown.
    pub tab_elapsed: f64,
    pub log: ActivityLog,
    /// Errors reported since start.
    pub errors: usize,
    pub terminal_width: u16,
    pub terminal_height: u16,
    curve_options: CurveOptions,
    rx: Receiver<TuiMessage>,
}

impl<C: SubmitCapability> TuiApp<C> {
    #[must_use]
    pub fn new(
        dashboard: DashboardModel,
        workflow: SubmissionWorkflow<C>,
        curve_options: CurveOptions,
        rx: Receiver<TuiMessage>,
    ) -> Self {
        let mut app = Self {
            should_quit: false,
            cancelled: false,
            mode: InputMode::Browse,
            focus: FormField::Name,
            dashboard,
            workflow,
            cards: Vec::new(),
            tab_elapsed: 0.0,
            log: ActivityLog::default(),
            errors: 0,
            terminal_width: 80,
            terminal_height: 24,
            curve_options,
            rx,
        };
        app.refresh_cards();
        app
    }

    /// Drain pending messages (Elm Update).
    pub fn update(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
        }
    }

    /// Handle a single message.
    pub fn handle_message(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Tick(elapsed) => self.advance(elapsed),
            TuiMessage::Log(line) => self.log.push(line),
            TuiMessage::KeyPress(action) => self.handle_key_action(action),
            TuiMessage::Resize { width, height } => {
                self.terminal_width = width;
                self.terminal_height = height;
            }
            TuiMessage::Error(err) => {
                self.errors += 1;
                self.log.push(format!("ERROR {err}"));
            }
            TuiMessage::Quit => self.should_quit = true,
        }
    }

    /// Advance every component's timers and the reveal animation.
    pub fn advance(&mut self, elapsed: Duration) {
        self.dashboard.advance(elapsed);
        for notice in self.workflow.advance(elapsed) {
            self.on_notice(&notice);
        }
        self.tab_elapsed += elapsed.as_secs_f64();
    }

    fn on_notice(&mut self, notice: &WorkflowNotice) {
        match notice {
            WorkflowNotice::Succeeded => self.log.push("Access granted: application accepted"),
            WorkflowNotice::Failed(err) => {
                self.errors += 1;
                self.log.push(format!("ERROR {err}"));
            }
            WorkflowNotice::Reset => self.log.push("Form cleared"),
        }
    }

    /// Handle a keyboard action.
    pub fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Cancel => {
                self.cancelled = true;
                self.should_quit = true;
            }
            KeyAction::NextCategory => {
                self.dashboard.next_category();
                self.refresh_cards();
            }
            KeyAction::PreviousCategory => {
                self.dashboard.previous_category();
                self.refresh_cards();
            }
            KeyAction::JumpCategory(index) => self.jump_to(index),
            KeyAction::FocusForm => self.mode = InputMode::Form,
            KeyAction::LeaveForm => self.mode = InputMode::Browse,
            KeyAction::NextField => self.focus = self.focus.next(),
            KeyAction::PreviousField => self.focus = self.focus.previous(),
            KeyAction::NextOption => self.cycle_option(true),
            KeyAction::PreviousOption => self.cycle_option(false),
            KeyAction::Input(c) => self.type_char(c),
            KeyAction::Backspace => self.erase_char(),
            KeyAction::Submit => self.submit(),
            KeyAction::ScrollUp => self.log.scroll_up(1),
            KeyAction::ScrollDown => self.log.scroll_down(1),
            KeyAction::PageUp => self.log.scroll_up(PAGE_SIZE),
            KeyAction::PageDown => self.log.scroll_down(PAGE_SIZE),
            KeyAction::None => {}
        }
    }

    fn jump_to(&mut self, index: usize) {
        let key = match self.dashboard.catalog().categories().get(index) {
            Some(category) => category.key.clone(),
            None => return,
        };
        if self.dashboard.select_category(&key).is_ok() {
            self.refresh_cards();
        }
    }

    /// Rebuild the active tab's cards and restart their animation.
    fn refresh_cards(&mut self) {
        let opts = self.curve_options;
        self.cards = self
            .dashboard
            .active_cases()
            .iter()
            .cloned()
            .map(|record| CaseCard::new(record, &opts))
            .collect();
        self.tab_elapsed = 0.0;
    }

    fn type_char(&mut self, c: char) {
        if self.focus == FormField::Interest {
            return;
        }
        let mut value = self.workflow.fields().get(self.focus).to_string();
        value.push(c);
        self.workflow.edit(self.focus, value);
    }

    fn erase_char(&mut self) {
        let mut value = self.workflow.fields().get(self.focus).to_string();
        if self.focus == FormField::Interest {
            value.clear();
        } else {
            value.pop();
        }
        self.workflow.edit(self.focus, value);
    }

    fn cycle_option(&mut self, forward: bool) {
        if self.focus != FormField::Interest {
            return;
        }
        let next = cycle_interest(self.workflow.fields().get(FormField::Interest), forward);
        self.workflow.edit(FormField::Interest, next);
    }

    fn submit(&mut self) {
        match self.workflow.submit() {
            Ok(()) => self.log.push("Scanning credentials..."),
            Err(err) => self.log.push(format!("WARN {err}")),
        }
    }

    /// Cancel every timer owned by the dashboard and the form.
    pub fn shutdown(&mut self) {
        self.dashboard.teardown();
        self.workflow.teardown();
    }

    /// Returns (header, tabs, main, footer) rects.
    #[must_use]
    pub fn compute_layout(area: Rect) -> (Rect, Rect, Rect, Rect) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // header
                Constraint::Length(3), // tabs
                Constraint::Min(8),    // cards + side panel
                Constraint::Length(2), // footer
            ])
            .split(area);
        (outer[0], outer[1], outer[2], outer[3])
    }

    /// Split the main area 60/40 into (cards, side panel).
    #[must_use]
    pub fn compute_main_layout(main: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main);
        (chunks[0], chunks[1])
    }

    /// Split the side panel into (form, activity log).
    #[must_use]
    pub fn compute_side_layout(side: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(10), Constraint::Min(3)])
            .split(side);
        (chunks[0], chunks[1])
    }

    /// Render the full TUI view.
    pub fn render(&self, frame: &mut ratatui::Frame) {
        let (header, tabs, main, footer) = Self::compute_layout(frame.area());
        let (cards, side) = Self::compute_main_layout(main);
        let (form, logs) = Self::compute_side_layout(side);

        render_header(
            frame,
            header,
            self.dashboard.live_counter(),
            self.dashboard.is_live(),
        );
        let keys: Vec<&str> = self.dashboard.catalog().keys().collect();
        render_tabs(frame, tabs, &keys, self.dashboard.active_index());
        render_cards(frame, cards, &self.cards, self.tab_elapsed);

        let focus = (self.mode == InputMode::Form).then_some(self.focus);
        render_form(frame, form, &self.workflow.state(), focus);
        render_logs(frame, logs, &self.log);
        render_footer(frame, footer, self.mode);
    }

    /// Set up the terminal for TUI mode.
    pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        Terminal::new(CrosstermBackend::new(stdout))
    }

    /// Restore the terminal to normal mode.
    pub fn teardown_terminal(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the event loop until the user quits.
    ///
    /// Starts the live feed, then per iteration renders, polls input and
    /// advances every component by the wall-clock time that passed. All
    /// timers are cancelled before returning.
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = Self::setup_terminal()?;
        self.dashboard.start_live_feed();
        let result = self.event_loop(&mut terminal);
        self.shutdown();
        Self::teardown_terminal(&mut terminal)?;
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let mut last = Instant::now();
        loop {
            terminal.draw(|frame| self.render(frame))?;
            if self.should_quit {
                return Ok(());
            }

            if event::poll(TICK_RATE)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_action(map_key(key, self.mode));
                    }
                    Event::Resize(width, height) => {
                        self.handle_message(TuiMessage::Resize { width, height });
                    }
                    _ => {}
                }
            }

            let now = Instant::now();
            self.handle_message(TuiMessage::Tick(now - last));
            last = now;

            self.update();
        }
    }
}
