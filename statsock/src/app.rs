//! App state and main loop: terminal setup, stream and input events, drawing.
//!
//! Every event is handled to completion before the next one is taken off
//! the queue: an inbound snapshot means one consumer update and one redraw.

use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::consumer::StreamConsumer;
use crate::history::HistoryBuffer;
use crate::theme::ThemeState;
use crate::ui::{self, processes, DashboardFrame};
use crate::ws::{connect, spawn_stream, ReconnectPolicy, StreamEvent, StreamTarget, WsStream};

const INPUT_POLL: Duration = Duration::from_millis(100);

pub struct App {
    consumer: StreamConsumer,
    theme: ThemeState,
    procs_scroll: usize,
    should_quit: bool,
}

impl App {
    pub fn new(history: HistoryBuffer, theme: ThemeState) -> Self {
        Self {
            consumer: StreamConsumer::new(history),
            theme,
            procs_scroll: 0,
            should_quit: false,
        }
    }

    pub fn consumer(&self) -> &StreamConsumer {
        &self.consumer
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(
        &mut self,
        target: StreamTarget,
        mut policy: Box<dyn ReconnectPolicy>,
    ) -> anyhow::Result<()> {
        self.consumer.start();
        let ws = first_connect(&target, &mut *policy).await?;

        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let (stream_tx, stream_rx) = mpsc::unbounded_channel();
        let stream = spawn_stream(ws, target, policy, stream_tx);
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let input_stop = Arc::new(AtomicBool::new(false));
        let input = spawn_input_thread(input_tx, Arc::clone(&input_stop));

        // Main loop
        let res = self.event_loop(&mut terminal, stream_rx, input_rx).await;

        // Teardown: no message is processed past this point
        self.consumer.teardown();
        input_stop.store(true, Ordering::Relaxed);
        stream.close().await;
        let _ = input.join();

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut stream_rx: mpsc::UnboundedReceiver<StreamEvent>,
        mut input_rx: mpsc::UnboundedReceiver<Event>,
    ) -> anyhow::Result<()> {
        terminal.draw(|f| self.draw(f))?;
        loop {
            let redraw = tokio::select! {
                Some(ev) = stream_rx.recv() => self.handle_stream_event(ev),
                Some(ev) = input_rx.recv() => {
                    let sz = terminal.size()?;
                    self.handle_input(ev, Rect::new(0, 0, sz.width, sz.height))
                }
                else => break,
            };
            if self.should_quit {
                break;
            }
            if redraw {
                terminal.draw(|f| self.draw(f))?;
            }
        }
        Ok(())
    }

    /// Returns whether the screen needs redrawing.
    pub fn handle_stream_event(&mut self, ev: StreamEvent) -> bool {
        match ev {
            StreamEvent::Message(payload) => {
                self.consumer.on_message(&payload, Instant::now()).is_some()
            }
            StreamEvent::Closed => {
                self.consumer.on_disconnect();
                false
            }
        }
    }

    pub fn handle_input(&mut self, ev: Event, screen: Rect) -> bool {
        match ev {
            Event::Key(k) if k.kind == KeyEventKind::Press => self.handle_key(k, screen),
            Event::Resize(_, _) => true,
            _ => false,
        }
    }

    fn handle_key(&mut self, k: KeyEvent, screen: Rect) -> bool {
        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                false
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                if let Err(e) = self.theme.toggle() {
                    warn!("could not persist theme: {e}");
                }
                true
            }
            _ => {
                let latest = self.consumer.latest();
                let page = processes::page_size(ui::procs_area(screen, latest));
                let total = latest.map(|s| s.top_procs.len()).unwrap_or(0);
                processes::processes_handle_key(&mut self.procs_scroll, k, page);
                self.procs_scroll = processes::clamp_offset(self.procs_scroll, total, page);
                true
            }
        }
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>) {
        ui::draw_dashboard(
            f,
            &DashboardFrame {
                latest: self.consumer.latest(),
                history: self.consumer.history(),
                theme: self.theme.theme(),
                procs_scroll: self.procs_scroll,
            },
        );
    }
}

/// Dial once before the terminal is taken over. A failure is fatal unless
/// the policy retries, in which case the stream task keeps dialing while the
/// dashboard shows `Loading…`.
async fn first_connect(
    target: &StreamTarget,
    policy: &mut dyn ReconnectPolicy,
) -> anyhow::Result<Option<WsStream>> {
    match connect(&target.url, target.tls_ca.as_deref()).await {
        Ok(ws) => {
            info!("connected to {}", target.url);
            Ok(Some(ws))
        }
        Err(e) if policy.next_delay(0).is_some() => {
            warn!("initial connect failed, retrying: {e}");
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("connecting to {}", target.url)),
    }
}

/// Blocking crossterm reads live on their own thread; events are forwarded
/// into the async loop.
fn spawn_input_thread(
    tx: mpsc::UnboundedSender<Event>,
    stop: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll(INPUT_POLL) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if tx.send(ev).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        warn!("terminal read failed: {e}");
                        return;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!("terminal poll failed: {e}");
                    return;
                }
            }
        }
    })
}
