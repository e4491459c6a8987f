use crate::{
    form::{FormController, RequestState},
    view::{self, Field, ViewSnap},
};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::{
    event::{Event as CtEvent, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use shortfact_actors::{
    actor::{Actor, Addr, Context},
    system::ShutdownHandle,
};
use shortfact_common::FactCheckResult;
use shortfact_llm::FactChecker;
use std::{
    io::{self, Stdout},
    sync::Arc,
    time::{Duration, Instant},
};

const BRAILLE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub enum TuiMsg {
    InputEvent(CtEvent),
    Tick,
    Submit,
    CheckDone {
        generation: u64,
        outcome: std::result::Result<FactCheckResult, String>,
    },
    Shutdown,
}

/// Single-line input buffer with a byte cursor kept on char boundaries.
#[derive(Default)]
struct InputBuffer {
    text: String,
    cursor: usize,
}

impl InputBuffer {
    fn cursor_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        while self.cursor > 0 && !self.text.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn cursor_right(&mut self) {
        if self.cursor >= self.text.len() {
            return;
        }
        self.cursor += 1;
        while self.cursor < self.text.len() && !self.text.is_char_boundary(self.cursor) {
            self.cursor += 1;
        }
    }

    fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    fn cursor_end(&mut self) {
        self.cursor = self.text.len();
    }

    fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut prev = self.cursor.saturating_sub(1);
        while prev > 0 && !self.text.is_char_boundary(prev) {
            prev -= 1;
        }
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
    }

    fn delete(&mut self) {
        if self.cursor >= self.text.len() {
            return;
        }
        let start = self.cursor;
        let mut end = start + 1;
        while end < self.text.len() && !self.text.is_char_boundary(end) {
            end += 1;
        }
        self.text.drain(start..end);
    }

    fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

pub struct TuiActor {
    // deps
    checker: Arc<FactChecker>,

    // submission state machine
    form: FormController,

    // terminal
    term: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
    last_tick: Instant,

    // form inputs
    url: InputBuffer,
    claim: InputBuffer,
    focus: Field,

    // result pane
    scroll: usize,
    dirty: bool,
    spin_idx: usize,

    // shutdown coordination
    shutdown: ShutdownHandle,
}

impl TuiActor {
    pub fn new(checker: Arc<FactChecker>, shutdown: ShutdownHandle) -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut term = Terminal::new(backend)?;
        term.clear()?;

        Ok(Self {
            checker,
            form: FormController::new(),
            term,
            tick_rate: Duration::from_millis(80),
            last_tick: Instant::now(),
            url: InputBuffer::default(),
            claim: InputBuffer::default(),
            focus: Field::Url,
            scroll: 0,
            dirty: true,
            spin_idx: 0,
            shutdown,
        })
    }

    fn focused_mut(&mut self) -> &mut InputBuffer {
        match self.focus {
            Field::Url => &mut self.url,
            Field::Claim => &mut self.claim,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Url => Field::Claim,
            Field::Claim => Field::Url,
        };
    }

    fn spinner(&self) -> &'static str {
        if self.form.is_loading() {
            BRAILLE_FRAMES[self.spin_idx % BRAILLE_FRAMES.len()]
        } else {
            " "
        }
    }

    fn step_spinner(&mut self) {
        if self.form.is_loading() {
            self.spin_idx = (self.spin_idx + 1) % BRAILLE_FRAMES.len();
            self.dirty = true;
        }
    }

    fn draw(&mut self) -> Result<()> {
        let snap = ViewSnap {
            url_input: self.url.text.clone(),
            url_cursor: self.url.cursor,
            claim_input: self.claim.text.clone(),
            claim_cursor: self.claim.cursor,
            focus: self.focus,
            state: self.form.state().clone(),
            notice: self.form.notice().map(str::to_string),
            scroll: self.scroll,
            spinner: self.spinner(),
        };

        view::draw(&mut self.term, &snap)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<TuiMsg> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('q'), KeyModifiers::CONTROL) => return Some(TuiMsg::Shutdown),
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) => {
                self.toggle_focus();
                self.dirty = true;
            }
            (KeyCode::Enter, _) => {
                return Some(TuiMsg::Submit);
            }
            (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                self.dirty = true;
            }
            (KeyCode::Down, _) => {
                self.scroll = self.scroll.saturating_add(1);
                self.dirty = true;
            }
            (KeyCode::PageUp, _) => {
                self.scroll = self.scroll.saturating_sub(5);
                self.dirty = true;
            }
            (KeyCode::PageDown, _) => {
                self.scroll = self.scroll.saturating_add(5);
                self.dirty = true;
            }
            (KeyCode::Left, _) => {
                self.focused_mut().cursor_left();
                self.dirty = true;
            }
            (KeyCode::Right, _) => {
                self.focused_mut().cursor_right();
                self.dirty = true;
            }
            (KeyCode::Home, _) => {
                self.focused_mut().cursor_home();
                self.dirty = true;
            }
            (KeyCode::End, _) => {
                self.focused_mut().cursor_end();
                self.dirty = true;
            }
            (KeyCode::Backspace, _) => {
                self.focused_mut().backspace();
                self.dirty = true;
            }
            (KeyCode::Delete, _) => {
                self.focused_mut().delete();
                self.dirty = true;
            }
            (KeyCode::Esc, _) => {
                self.focused_mut().clear();
                self.dirty = true;
            }
            (KeyCode::Char(ch), _) => {
                self.focused_mut().insert_char(ch);
                self.dirty = true;
            }
            _ => {}
        }
        None
    }

    /// Route a submit through the form controller and, when accepted, run
    /// the check off-actor. The completion comes back as a mailbox message
    /// tagged with the accepted generation.
    fn start_check(&mut self, me: Addr<TuiActor>) {
        self.dirty = true;

        let Some(accepted) = self.form.submit(&self.url.text, &self.claim.text) else {
            return;
        };

        self.scroll = 0;
        let checker = self.checker.clone();
        tokio::spawn(async move {
            let generation = accepted.generation;
            let outcome = checker
                .check(&accepted.request)
                .await
                .map_err(|e| e.to_string());
            let _ = me.send(TuiMsg::CheckDone { generation, outcome }).await;
        });
    }
}

#[async_trait]
impl Actor for TuiActor {
    type Msg = TuiMsg;

    async fn handle(&mut self, msg: Self::Msg, ctx: &mut Context<Self>) -> Result<()> {
        match msg {
            TuiMsg::InputEvent(ev) => {
                if let CtEvent::Key(k) = ev {
                    if let Some(next) = self.handle_key(k) {
                        let _ = ctx.addr().try_send(next);
                    }
                }
            }
            TuiMsg::Submit => self.start_check(ctx.addr()),
            TuiMsg::CheckDone {
                generation,
                outcome,
            } => {
                if self.form.complete(generation, outcome) {
                    if let RequestState::Failed(message) = self.form.state() {
                        tracing::warn!(%message, "check failed");
                    }
                }
                self.dirty = true;
            }
            TuiMsg::Tick => {
                self.step_spinner();
                if self.dirty || self.last_tick.elapsed() >= self.tick_rate {
                    self.draw()?;
                    self.last_tick = Instant::now();
                    self.dirty = false;
                }
            }
            TuiMsg::Shutdown => {
                disable_raw_mode().ok();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                self.shutdown.signal();
                ctx.stop();
            }
        }

        Ok(())
    }
}
