//! The chat session controller.
//!
//! A [`ChatSession`] owns the configuration, the conversation store, the
//! bridge, and (while attached) the chat surface. It decides whether an
//! attach loads the page or restores it, tracks the load state, and
//! forwards host actions to the page.
//!
//! Every `&mut self` method must be called on the control thread. Work from
//! other threads reaches the session through its [`ControlQueue`] and is
//! applied by [`ChatSession::pump`].

mod snapshot;
mod state;


pub use snapshot::{restore_decision, RestoreDecision, SessionSnapshot};
pub use state::{DisplayEnvironment, SessionState};

use std::sync::{Arc, MutexGuard};

use embedchat_common::{PersistenceMode, SessionError};
use embedchat_config::{AgentConfig, ApiHost, ChatOptions, EmbedConfig};
use embedchat_storage::{DurableStore, KeyValueStore, SharedStore};
use tracing::{debug, info, warn};

use crate::bridge::BridgeMessageHandler;
use crate::control::{ControlMessage, ControlQueue, SurfaceCommand};
use crate::dispatcher::EventDispatcher;
use crate::ipc::{END_CONVERSATION_SCRIPT, PRINT_TRANSCRIPT_SCRIPT};
use crate::launch_url::build_launch_url;
use crate::listener::{ConversationListener, InitializationError};
use crate::navigation::{CertificateDecision, ExternalOpener, LogOnlyOpener, NavigationPolicy};
use crate::print::{PrintSpooler, PrintSurfaceFactory};
use crate::surface::{ChatSurface, BLANK_PAGE};

// =============================================================================
// BUILDER
// =============================================================================

pub struct ChatSessionBuilder {
    agent: AgentConfig,
    chat: ChatOptions,
    listener: Option<Arc<dyn ConversationListener>>,
    durable: Option<Arc<dyn DurableStore>>,
    opener: Option<Arc<dyn ExternalOpener>>,
    print_surfaces: Option<Box<dyn PrintSurfaceFactory>>,
    queue: ControlQueue,
}

impl ChatSessionBuilder {
    pub fn listener(mut self, listener: Arc<dyn ConversationListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Required for [`PersistenceMode::Disk`].
    pub fn durable_store(mut self, store: Arc<dyn DurableStore>) -> Self {
        self.durable = Some(store);
        self
    }

    pub fn external_opener(mut self, opener: Arc<dyn ExternalOpener>) -> Self {
        self.opener = Some(opener);
        self
    }

    pub fn print_surfaces(mut self, factory: Box<dyn PrintSurfaceFactory>) -> Self {
        self.print_surfaces = Some(factory);
        self
    }

    /// Called whenever work is queued for the control thread, so the host
    /// can schedule a [`ChatSession::pump`].
    pub fn control_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.queue = ControlQueue::with_waker(waker);
        self
    }

    /// Fails on an invalid configuration, or for disk persistence without
    /// a durable store.
    pub fn build(self) -> Result<ChatSession, SessionError> {
        let config = EmbedConfig::new(self.agent, self.chat);
        embedchat_config::validate(&config)
            .map_err(|e| SessionError::InvalidConfig(e.to_string()))?;

        let agent = &config.agent;
        let store = KeyValueStore::new(agent.persistence_mode, &agent.token, self.durable.clone())?
            .shared();

        let queue = self.queue;
        let dispatcher = EventDispatcher::new(self.listener, queue.clone());
        let bridge = Arc::new(BridgeMessageHandler::new(
            Arc::clone(&store),
            dispatcher.clone(),
            queue.clone(),
        ));
        let opener = self.opener.unwrap_or_else(|| Arc::new(LogOnlyOpener));
        let policy = NavigationPolicy::new(
            &agent.base_url(),
            agent.api_host.is_local_development(),
            opener,
        );
        let spooler = PrintSpooler::new(self.print_surfaces, queue.clone());

        info!(
            api_host = ?agent.api_host,
            persistence = ?agent.persistence_mode,
            listener = dispatcher.has_listener(),
            "chat session created"
        );

        Ok(ChatSession {
            config,
            state: SessionState::Uninitialized,
            environment: DisplayEnvironment::default(),
            launch_url: None,
            load_failed: false,
            surface: None,
            store,
            durable: self.durable,
            queue,
            dispatcher,
            bridge,
            policy,
            spooler,
        })
    }
}

// =============================================================================
// SESSION
// =============================================================================

pub struct ChatSession {
    config: EmbedConfig,
    state: SessionState,
    environment: DisplayEnvironment,
    /// URL of the most recent load.
    launch_url: Option<String>,
    /// Set when the current load reported an error before finishing.
    load_failed: bool,
    surface: Option<Box<dyn ChatSurface>>,
    store: SharedStore,
    durable: Option<Arc<dyn DurableStore>>,
    queue: ControlQueue,
    dispatcher: EventDispatcher,
    bridge: Arc<BridgeMessageHandler>,
    policy: NavigationPolicy,
    spooler: PrintSpooler,
}

impl ChatSession {
    pub fn builder(agent: AgentConfig, chat: ChatOptions) -> ChatSessionBuilder {
        ChatSessionBuilder {
            agent,
            chat,
            listener: None,
            durable: None,
            opener: None,
            print_surfaces: None,
            queue: ControlQueue::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    pub fn launch_url(&self) -> Option<&str> {
        self.launch_url.as_deref()
    }

    /// The handler the surface's IPC channel feeds. Safe to use from any
    /// thread.
    pub fn bridge(&self) -> Arc<BridgeMessageHandler> {
        Arc::clone(&self.bridge)
    }

    pub fn queue(&self) -> &ControlQueue {
        &self.queue
    }

    pub fn navigation_policy(&self) -> &NavigationPolicy {
        &self.policy
    }

    pub fn store(&self) -> SharedStore {
        Arc::clone(&self.store)
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    fn lock_store(&self) -> MutexGuard<'_, KeyValueStore> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The launch URL for the current configuration and environment.
    pub fn compute_launch_url(&self) -> Result<String, SessionError> {
        build_launch_url(
            &self.config.agent,
            &self.config.chat,
            &self.environment.locale,
        )
    }

    // -- attach / detach --

    /// Attach a surface, restoring from `snapshot` when it still matches and
    /// loading the launch URL otherwise.
    pub fn attach(
        &mut self,
        surface: Box<dyn ChatSurface>,
        environment: DisplayEnvironment,
        snapshot: Option<SessionSnapshot>,
    ) -> Result<(), SessionError> {
        if self.surface.is_some() {
            warn!("attach while attached, replacing surface");
        }
        self.surface = Some(surface);
        self.environment = environment;

        let url = self.compute_launch_url()?;
        let decision = restore_decision(
            snapshot.as_ref(),
            &self.config,
            self.environment.appearance,
            &url,
        );
        debug!(?decision, appearance = %self.environment.appearance, "attaching surface");

        match (decision, snapshot) {
            (RestoreDecision::Restore, Some(snapshot)) => {
                self.restore_entries(&snapshot);
                let restored = match (&snapshot.surface_state, self.surface.as_mut()) {
                    (Some(saved), Some(surface)) => surface.restore_state(saved),
                    _ => false,
                };
                if restored {
                    self.sync_policy();
                    self.launch_url = snapshot.launch_url.clone();
                    self.state = SessionState::Loaded;
                    info!("chat restored without reload");
                    return Ok(());
                }
                debug!("surface state not restorable, reloading");
                self.load()
            }
            (RestoreDecision::Reload { clear_store: true }, _) => {
                info!("configuration changed since snapshot, clearing conversation");
                self.lock_store().clear();
                self.load()
            }
            (_, snapshot) => {
                if let Some(snapshot) = &snapshot {
                    self.restore_entries(snapshot);
                }
                self.load()
            }
        }
    }

    /// Drop the surface and capture what the next attach needs.
    pub fn detach(&mut self) -> SessionSnapshot {
        let surface_state = self.surface.take().and_then(|surface| surface.save_state());
        let entries = {
            let store = self.lock_store();
            (store.mode() == PersistenceMode::Memory).then(|| store.get_all())
        };
        debug!(
            state = %self.state,
            surface_state = surface_state.is_some(),
            "surface detached"
        );
        SessionSnapshot {
            config: self.config.clone(),
            loaded: self.state == SessionState::Loaded,
            appearance: self.environment.appearance,
            launch_url: self.launch_url.clone(),
            surface_state,
            entries,
        }
    }

    fn restore_entries(&self, snapshot: &SessionSnapshot) {
        let Some(entries) = &snapshot.entries else {
            return;
        };
        let mut store = self.lock_store();
        if store.mode() == PersistenceMode::Memory {
            debug!(count = entries.len(), "restoring conversation entries");
            store.replace_all(entries.clone());
        }
    }

    fn sync_policy(&self) {
        let agent = &self.config.agent;
        self.policy
            .update(&agent.base_url(), agent.api_host.is_local_development());
    }

    fn load(&mut self) -> Result<(), SessionError> {
        let url = self.compute_launch_url()?;
        self.sync_policy();
        self.launch_url = Some(url.clone());
        self.load_failed = false;
        self.state = SessionState::Loading;

        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        info!(base_url = %self.policy.base_url(), "loading chat");
        if let Err(e) = surface.load_url(&url) {
            self.on_load_error(&url, &e.to_string());
        }
        Ok(())
    }

    // -- control queue --

    /// Apply everything queued for the control thread. Returns how many
    /// messages were handled.
    pub fn pump(&mut self) -> usize {
        let messages = self.queue.drain();
        let count = messages.len();
        for message in messages {
            match message {
                ControlMessage::Invoke(task) => task(),
                ControlMessage::Surface(command) => self.apply(command),
                ControlMessage::PageFinished { url } => self.on_page_finished(&url),
                ControlMessage::LoadFailed { url, description } => {
                    self.on_load_error(&url, &description)
                }
                ControlMessage::PrintReady { job } => self.spooler.complete(job),
            }
        }
        count
    }

    fn apply(&mut self, command: SurfaceCommand) {
        let Some(surface) = self.surface.as_ref() else {
            debug!(?command, "surface detached, command dropped");
            return;
        };
        match command {
            SurfaceCommand::EvaluateScript(script) => {
                if let Err(e) = surface.evaluate_script(&script) {
                    warn!(error = %e, "script evaluation failed");
                }
            }
            SurfaceCommand::Print { url, data } => {
                self.spooler.start(&url, &data);
            }
        }
    }

    // -- page load events --

    pub fn on_page_finished(&mut self, url: &str) {
        if self.surface.is_none() {
            return;
        }
        if self.state == SessionState::Loading && !self.load_failed && self.policy.matches_base(url) {
            info!("chat loaded");
            self.state = SessionState::Loaded;
        }
    }

    /// Failures outside the base URL (sub-resources, other pages) are
    /// ignored, as are failures reported after detach.
    pub fn on_load_error(&mut self, url: &str, description: &str) {
        if self.surface.is_none() {
            debug!(url, description, "surface detached, load error dropped");
            return;
        }
        if !self.policy.matches_base(url) {
            debug!(url, description, "load error outside chat ignored");
            return;
        }
        warn!(description, "chat failed to load");
        self.load_failed = true;
        self.state = SessionState::Error;
        if let Some(surface) = self.surface.as_mut() {
            if let Err(e) = surface.load_url(BLANK_PAGE) {
                warn!(error = %e, "could not blank surface");
            }
        }
        self.dispatcher
            .conversation_initialization_error(InitializationError {
                url: url.to_string(),
                description: description.to_string(),
            });
    }

    pub fn on_certificate_error(&mut self, url: &str) -> CertificateDecision {
        let decision = self.policy.certificate_decision(url);
        if decision == CertificateDecision::Cancel {
            self.on_load_error(url, "untrusted certificate");
        }
        decision
    }

    // -- host actions --

    /// Reload when the appearance changed or the launch URL (for example
    /// the locale) differs from the last load.
    pub fn on_environment_changed(&mut self, environment: DisplayEnvironment) -> Result<(), SessionError> {
        let appearance_changed = self.environment.appearance != environment.appearance;
        self.environment = environment;
        if self.surface.is_none() {
            return Ok(());
        }
        let url_changed = self.launch_url.as_deref() != Some(self.compute_launch_url()?.as_str());
        if appearance_changed || url_changed {
            info!(appearance_changed, url_changed, "display environment changed, reloading");
            self.load()?;
        }
        Ok(())
    }

    /// Replace the configuration and reload. A new token or persistence
    /// mode gets a fresh store.
    pub fn reload(&mut self, agent: AgentConfig, chat: ChatOptions) -> Result<(), SessionError> {
        let config = EmbedConfig::new(agent, chat);
        embedchat_config::validate(&config)
            .map_err(|e| SessionError::InvalidConfig(e.to_string()))?;

        let previous = &self.config.agent;
        if config.agent.token != previous.token
            || config.agent.persistence_mode != previous.persistence_mode
        {
            let store = KeyValueStore::new(
                config.agent.persistence_mode,
                &config.agent.token,
                self.durable.clone(),
            )?;
            *self.lock_store() = store;
        }

        self.config = config;
        if self.surface.is_some() {
            self.load()?;
        }
        Ok(())
    }

    /// Forget the conversation and start over.
    pub fn reset_conversation(&mut self) -> Result<(), SessionError> {
        info!("resetting conversation");
        self.lock_store().clear();
        if self.surface.is_some() {
            self.load()?;
        }
        Ok(())
    }

    /// Takes effect on the next load.
    pub fn set_api_host(&mut self, api_host: ApiHost) {
        debug!(?api_host, "api host changed");
        self.config.agent.api_host = api_host;
    }

    pub fn print_transcript(&self) {
        self.run_page_function(PRINT_TRANSCRIPT_SCRIPT);
    }

    pub fn end_conversation(&self) {
        self.run_page_function(END_CONVERSATION_SCRIPT);
    }

    fn run_page_function(&self, script: &str) {
        let Some(surface) = &self.surface else {
            debug!(script, "no surface attached, ignored");
            return;
        };
        if let Err(e) = surface.evaluate_script(script) {
            warn!(script, error = %e, "page function failed");
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        if let Some(surface) = &self.surface {
            if let Err(e) = surface.set_size(width, height) {
                warn!(width, height, error = %e, "resize failed");
            }
        }
    }
}
