//! Controller runtime for the log panel
//!
//! Owns the panel state and runs the TEA cycle: each message goes through
//! `handler::update()`, the returned `UpdateAction` is executed here, and its
//! result is fed back in as a message. Settings changes are written to the
//! injected store and `ControllerEvent`s are broadcast after every message.

use std::collections::VecDeque;
use std::sync::Arc;

use logpanel_core::{Error, Result, ResultExt};
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

use crate::auto_refresh::AutoRefreshHandle;
use crate::config::{PanelSettings, SettingsStore};
use crate::controller_event::ControllerEvent;
use crate::handler::{self, UpdateAction};
use crate::loader;
use crate::message::Message;
use crate::picker::FilePicker;
use crate::state::PanelState;

/// Capacity of the message channel shared with the UI and the timer
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// Capacity of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Queue `msg` on a controller's channel without waiting
///
/// Fails with [`Error::ChannelSend`] when the queue is full and with
/// [`Error::ChannelClosed`] once the controller is gone.
pub fn post(tx: &mpsc::Sender<Message>, msg: Message) -> Result<()> {
    tx.try_send(msg).map_err(|e| match e {
        mpsc::error::TrySendError::Full(_) => Error::channel_send("message queue is full"),
        mpsc::error::TrySendError::Closed(_) => Error::ChannelClosed,
    })
}

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect what
/// changed, which settings to persist and which events to emit.
#[derive(Debug, Clone)]
struct StateSnapshot {
    settings: PanelSettings,
    total_lines: usize,
    visible_lines: usize,
    reload_count: u64,
    auto_refresh_active: bool,
}

impl StateSnapshot {
    fn capture(state: &PanelState) -> Self {
        let (total_lines, visible_lines) = state.line_counts();
        Self {
            settings: state.settings.clone(),
            total_lines,
            visible_lines,
            reload_count: state.reload_count,
            auto_refresh_active: state.auto_refresh_active,
        }
    }

    /// Whether the displayed lines may differ between the two snapshots
    fn lines_changed(&self, post: &StateSnapshot) -> bool {
        self.total_lines != post.total_lines
            || self.visible_lines != post.visible_lines
            || self.reload_count != post.reload_count
            || self.settings.level != post.settings.level
            || self.settings.filter_kind != post.settings.filter_kind
            || self.settings.filter_text != post.settings.filter_text
            || self.settings.show_timestamps != post.settings.show_timestamps
    }
}

/// Log panel controller
///
/// Encapsulates everything a host UI needs:
/// - TEA state management
/// - Message channel for UI input and auto-refresh ticks
/// - The auto-refresh task
/// - Settings persistence through the injected store
/// - File dialogs through the injected picker
/// - Event broadcasting for view consumers
///
/// Dropping the controller cancels auto-refresh.
pub struct LogController {
    /// Panel state (the Model)
    state: PanelState,

    /// Sender half of the message channel.
    msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the message channel.
    msg_rx: mpsc::Receiver<Message>,

    /// Running auto-refresh task, if any
    auto_refresh: Option<AutoRefreshHandle>,

    settings_store: Arc<dyn SettingsStore>,

    picker: Arc<dyn FilePicker>,

    /// Event broadcaster for view consumers.
    event_tx: broadcast::Sender<ControllerEvent>,

    /// Send `true` to stop `run()`.
    shutdown_tx: Arc<watch::Sender<bool>>,
}

impl LogController {
    /// Create a controller, reading the initial preferences from `settings_store`
    ///
    /// Nothing is loaded until the host sends `Message::Appear`.
    pub fn new(settings_store: Arc<dyn SettingsStore>, picker: Arc<dyn FilePicker>) -> Self {
        let settings = PanelSettings::load(settings_store.as_ref());
        debug!("Loaded panel settings: {:?}", settings);

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            state: PanelState::new(settings),
            msg_tx,
            msg_rx,
            auto_refresh: None,
            settings_store,
            picker,
            event_tx,
            shutdown_tx: Arc::new(shutdown_tx),
        }
    }

    /// Current panel state
    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Current preferences
    pub fn settings(&self) -> &PanelSettings {
        &self.state.settings
    }

    /// Whether an auto-refresh task is currently running
    pub fn is_auto_refresh_running(&self) -> bool {
        self.auto_refresh
            .as_ref()
            .is_some_and(AutoRefreshHandle::is_running)
    }

    /// Sender for UI input and other message producers
    pub fn sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Queue a message without waiting
    ///
    /// For hosts posting from synchronous UI callbacks. See [`post`].
    pub fn post(&self, msg: Message) -> Result<()> {
        post(&self.msg_tx, msg)
    }

    /// Trigger that stops `run()` from another task
    pub fn shutdown_trigger(&self) -> Arc<watch::Sender<bool>> {
        self.shutdown_tx.clone()
    }

    /// Subscribe to controller events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.event_tx.subscribe()
    }

    /// Process a message and every follow-up it produces.
    ///
    /// File reads, writes and dialogs run synchronously, so when this returns
    /// the state reflects their results.
    pub fn dispatch(&mut self, msg: Message) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            self.process_message(msg, &mut queue);
        }
    }

    /// Process all queued messages without waiting.
    ///
    /// Returns the number of messages taken from the channel.
    pub fn drain_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            count += 1;
        }
        count
    }

    /// Process messages as they arrive until shutdown is triggered.
    pub async fn run(&mut self) {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        loop {
            if *shutdown_rx.borrow() {
                break;
            }
            let msg = tokio::select! {
                msg = self.msg_rx.recv() => msg,
                changed = shutdown_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
            };
            match msg {
                Some(msg) => self.dispatch(msg),
                None => break,
            }
        }
        debug!("Controller loop stopped");
    }

    /// Stop auto-refresh and end `run()`.
    pub async fn shutdown(&mut self) {
        self.emit(ControllerEvent::Shutdown);
        self.shutdown_tx.send_replace(true);

        if let Some(handle) = self.auto_refresh.take() {
            handle.shutdown().await;
        }
        info!("Log panel controller shut down");
    }

    fn process_message(&mut self, msg: Message, queue: &mut VecDeque<Message>) {
        let pre = StateSnapshot::capture(&self.state);
        let result_event = ControllerEvent::from_result(&msg);

        let result = handler::update(&mut self.state, msg);

        if let Some(next) = result.message {
            queue.push_back(next);
        }
        if let Some(action) = result.action {
            if let Some(next) = self.handle_action(action) {
                queue.push_back(next);
            }
        }

        let post = StateSnapshot::capture(&self.state);
        self.persist_settings(&pre.settings);
        self.emit_events(&pre, &post);
        if let Some(event) = result_event {
            self.emit(event);
        }
    }

    /// Execute a side effect, returning the message that reports its result
    fn handle_action(&mut self, action: UpdateAction) -> Option<Message> {
        match action {
            UpdateAction::LoadFile { path } => Some(match loader::load_lines(&path) {
                Ok(lines) => Message::LinesLoaded { path, lines },
                Err(e) => Message::LoadFailed {
                    path,
                    error: e.to_string(),
                },
            }),

            UpdateAction::PickFileToOpen { start_dir } => Some(Message::FileOpened {
                path: self.picker.pick_file_to_open(&start_dir),
            }),

            UpdateAction::PickFileToSave {
                start_dir,
                default_name,
            } => Some(Message::SaveTargetPicked {
                path: self.picker.pick_file_to_save(&start_dir, &default_name),
            }),

            UpdateAction::WriteFile { path, lines } => {
                Some(match loader::save_lines(&path, &lines) {
                    Ok(()) => Message::SaveCompleted {
                        path,
                        line_count: lines.len(),
                    },
                    Err(e) => Message::SaveFailed {
                        path,
                        error: e.to_string(),
                    },
                })
            }

            UpdateAction::StartAutoRefresh => self.start_auto_refresh(),

            UpdateAction::StopAutoRefresh => {
                if let Some(handle) = self.auto_refresh.take() {
                    handle.cancel();
                }
                None
            }
        }
    }

    /// Spawn the auto-refresh task, replacing any running one
    ///
    /// Without a runtime the task cannot run. The stored preference is kept
    /// and the current file is loaded once in place of the first tick.
    fn start_auto_refresh(&mut self) -> Option<Message> {
        if let Some(previous) = self.auto_refresh.take() {
            previous.cancel();
        }

        if tokio::runtime::Handle::try_current().is_err() {
            warn!("No tokio runtime available, auto-refresh not started");
            self.state.auto_refresh_active = false;
            let path = self.state.source_path.clone()?;
            return self.handle_action(UpdateAction::LoadFile { path });
        }
        self.auto_refresh = Some(AutoRefreshHandle::spawn(self.msg_tx.clone()));
        None
    }

    /// Write every preference that changed while processing a message
    ///
    /// A failed write is logged; the new value still applies in memory.
    fn persist_settings(&self, previous: &PanelSettings) {
        let _ = self
            .state
            .settings
            .persist_changes(previous, self.settings_store.as_ref())
            .context("Failed to persist panel settings");
    }

    /// Emit ControllerEvents based on state changes after processing.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if pre.lines_changed(post) {
            self.emit(ControllerEvent::LinesChanged {
                total: post.total_lines,
                visible: post.visible_lines,
            });
        }

        if pre.auto_refresh_active != post.auto_refresh_active {
            self.emit(ControllerEvent::AutoRefreshChanged {
                active: post.auto_refresh_active,
            });
        }
    }

    /// send() returns Err only if there are no receivers.
    fn emit(&self, event: ControllerEvent) {
        let _ = self.event_tx.send(event);
    }
}
