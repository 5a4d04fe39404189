use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

use soundboard::hook::GlobalHook;
use soundboard::keymap::raw_event;
use soundboard::library::JsonEntryStore;
use soundboard::messages::Msg;
use soundboard::playback::{KiraBackend, PlaybackEvent, PlaybackManager};
use soundboard::status::{StatusLine, READY_GLOBAL};
use soundboard::update::update;
use soundboard::{AppConfig, Session, SoundBoard, SoundboardError};

/// How often queued hook and playback messages are drained
const POLL_INTERVAL: Duration = Duration::from_millis(10);

type AppSession = Session<JsonEntryStore, KiraBackend>;

pub struct App {
    session: Option<AppSession>,
    hook: Option<GlobalHook>,
    window: Option<Window>,
    msg_rx: Receiver<Msg>,
    playback_rx: Receiver<PlaybackEvent>,
    last_title: String,
}

impl App {
    pub fn new(config: &AppConfig, global_hotkeys: bool) -> Result<Self> {
        let (msg_tx, msg_rx) = mpsc::channel();
        let (playback_tx, playback_rx) = mpsc::channel();

        let store = JsonEntryStore::default_location().context("Cannot locate sound library")?;
        let status = StatusLine::new(READY_GLOBAL, config.status_timeout());
        let mut board = SoundBoard::new(store, status);
        board.registry().set_stop_all(config.stop_all_combination());
        board.load();

        let backend = KiraBackend::new().context("Cannot open the audio output")?;
        let playback = PlaybackManager::new(backend, playback_tx);
        let mut session = Session::new(board, playback);

        let hook = if global_hotkeys {
            session.attach_hook(install_hook(msg_tx))
        } else {
            session.window_only();
            None
        };

        Ok(Self {
            session: Some(session),
            hook,
            window: None,
            msg_rx,
            playback_rx,
            last_title: String::new(),
        })
    }

    fn dispatch(&mut self, msg: Msg) {
        if let Some(session) = self.session.as_mut() {
            update(session, msg);
        }
    }

    /// Drain messages from the hook and playback threads
    fn process_async_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
        }
        while let Ok(event) = self.playback_rx.try_recv() {
            self.dispatch(Msg::Playback(event));
        }
    }

    fn sync_title(&mut self) {
        let (Some(window), Some(session)) = (&self.window, &self.session) else {
            return;
        };
        let title = format!("Soundboard - {}", session.status_text());
        if title != self.last_title {
            window.set_title(&title);
            self.last_title = title;
        }
    }

    /// Release the hook first so no new chords arrive, then stop playback
    pub fn shutdown(&mut self) {
        if let Some(hook) = self.hook.take() {
            hook.shutdown();
        }
        if let Some(session) = self.session.take() {
            session.shutdown();
        }
    }
}

/// Forward global key events to the UI thread
fn install_hook(msg_tx: Sender<Msg>) -> Result<GlobalHook, SoundboardError> {
    GlobalHook::initialize(Box::new(move |event| {
        // The receiver only goes away during shutdown
        let _ = msg_tx.send(Msg::Key(event));
    }))
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Soundboard")
            .with_inner_size(LogicalSize::new(480, 120));

        match event_loop.create_window(window_attributes) {
            Ok(window) => {
                self.window = Some(window);
                self.sync_title();
            }
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                self.shutdown();
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested, shutting down");
                self.shutdown();
                event_loop.exit();
                return;
            }
            WindowEvent::Focused(focused) => self.dispatch(Msg::Focus(focused)),
            WindowEvent::KeyboardInput { event, .. } => {
                self.dispatch(Msg::Key(raw_event(event.physical_key, event.state)));
            }
            _ => {}
        }

        self.sync_title();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.process_async_messages();
        self.dispatch(Msg::Tick);
        self.sync_title();

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
