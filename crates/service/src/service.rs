// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `BusService`: owns the lifetime of one platform service instance (§4.1) —
//! configuration validation, endpoint registry, verb handlers, stats
//! collection, lifecycle hooks, and clean shutdown.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use svc_bus::{AsyncErrorHandler, Bus, ClosedHandler, Message, StreamConfig, Subscription, SubscriptionInfo};
use svc_core::{is_valid_name, is_valid_subject, Clock, ServiceId, ServiceIdentity, SystemClock};
use svc_protocol::Verb;
use tokio::sync::oneshot;
use tracing::{error, warn};

use crate::config::{DefaultEndpointConfig, ServiceConfig};
use crate::dispatch::AsyncDispatcher;
use crate::endpoint::{DocProducer, Endpoint, SubscriptionHandle};
use crate::error::ServiceError;
use crate::group::{resolve_queue_group, Group};
use crate::handler::{apply_middleware, AsyncHandler, Handler, Middleware};
use crate::registry::EndpointRegistry;
use crate::request::Request;
use crate::stats::EndpointStats;
use crate::verbs;

/// Lifecycle/error hooks configured at construction (§4.1, §6
/// `hooks:{on_start, on_stop, on_error, done, stats, error}`).
#[derive(Clone, Default)]
pub struct Hooks {
    pub on_start: Option<Arc<dyn Fn() + Send + Sync>>,
    pub on_stop: Option<Arc<dyn Fn() + Send + Sync>>,
    pub on_error: Option<Arc<dyn Fn(&ServiceError) + Send + Sync>>,
    pub done: Option<Arc<dyn Fn() + Send + Sync>>,
    pub stats: Option<Arc<dyn Fn() -> serde_json::Value + Send + Sync>>,
    pub error_handler: Option<Arc<dyn Fn(&str, &str) + Send + Sync>>,
}

/// Options accepted by `add_endpoint`.
#[derive(Clone, Default)]
pub struct EndpointOptions {
    pub subject: Option<String>,
    pub metadata: HashMap<String, String>,
    pub queue_group: Option<String>,
    pub queue_group_disabled: bool,
    pub disabled: bool,
    pub doc: Option<DocProducer>,
    pub stream_config: Option<StreamConfig>,
    pub middleware: Vec<Middleware>,
    pub is_async: bool,
}

/// Options accepted by `add_group`.
#[derive(Clone, Default)]
pub struct GroupOptions {
    pub queue_group: Option<String>,
    pub queue_group_disabled: bool,
}

/// Type-erases a `Clock` down to the two operations the dispatch path
/// needs, so `Core`/`BusService` stay non-generic while still letting tests
/// drive time with `FakeClock`.
struct TimeSource {
    now: Box<dyn Fn() -> Instant + Send + Sync>,
    epoch_ms: Box<dyn Fn() -> u64 + Send + Sync>,
}

impl TimeSource {
    fn from_clock<C: Clock + 'static>(clock: C) -> Self {
        let for_now = clock.clone();
        let for_epoch = clock;
        Self {
            now: Box::new(move || for_now.now()),
            epoch_ms: Box::new(move || for_epoch.epoch_ms()),
        }
    }

    fn now(&self) -> Instant {
        (self.now)()
    }

    fn epoch_ms(&self) -> u64 {
        (self.epoch_ms)()
    }
}

#[derive(Default)]
struct State {
    initialized: bool,
    started: bool,
    stopped: bool,
    start_epoch_ms: u64,
    verb_subscriptions: Vec<SubscriptionHandle>,
    prev_closed_handler: Option<ClosedHandler>,
    prev_async_error_handler: Option<AsyncErrorHandler>,
}

struct Core {
    identity: ServiceIdentity,
    description: String,
    bus: Arc<dyn Bus>,
    time: TimeSource,
    registry: EndpointRegistry,
    state: Mutex<State>,
    dispatcher: AsyncDispatcher,
    hooks: Hooks,
    root_group: Group,
    default_endpoint: Option<DefaultEndpointConfig>,
    default_handler: Mutex<Option<Arc<dyn Handler>>>,
}

/// Owns the lifetime of one platform service instance. Cheaply cloneable —
/// every clone shares the same underlying state.
#[derive(Clone)]
pub struct BusService {
    core: Arc<Core>,
}

/// A naming scope bound to the service that created it. See [`Group`] for
/// the pure prefix/queue-group arithmetic this wraps.
#[derive(Clone)]
pub struct GroupHandle {
    core: Arc<Core>,
    group: Group,
}

/// Builds a [`BusService`], optionally from a deserialized [`ServiceConfig`].
pub struct ServiceBuilder {
    identity: ServiceIdentity,
    description: String,
    queue_group: Option<String>,
    queue_group_disabled: bool,
    default_endpoint: Option<DefaultEndpointConfig>,
    default_handler: Option<Arc<dyn Handler>>,
    hooks: Hooks,
}

impl ServiceBuilder {
    pub fn new(identity: ServiceIdentity) -> Self {
        Self {
            identity,
            description: String::new(),
            queue_group: None,
            queue_group_disabled: false,
            default_endpoint: None,
            default_handler: None,
            hooks: Hooks::default(),
        }
    }

    pub fn from_config(config: ServiceConfig) -> Self {
        let identity = ServiceIdentity {
            name: config.name,
            id: ServiceId::new(),
            version: config.version,
            metadata: config.metadata,
        };
        Self {
            identity,
            description: config.description,
            queue_group: config.queue_group,
            queue_group_disabled: config.queue_group_disabled,
            default_endpoint: config.endpoint,
            default_handler: None,
            hooks: Hooks::default(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn queue_group(mut self, queue_group: impl Into<String>) -> Self {
        self.queue_group = Some(queue_group.into());
        self
    }

    pub fn queue_group_disabled(mut self, disabled: bool) -> Self {
        self.queue_group_disabled = disabled;
        self
    }

    /// Registers `handler` as the top-level default endpoint installed at
    /// `start()`, per the configured (or explicitly set) `endpoint` shape.
    pub fn default_endpoint(mut self, subject: impl Into<String>, handler: Arc<dyn Handler>) -> Self {
        self.default_endpoint.get_or_insert_with(Default::default).subject = subject.into();
        self.default_handler = Some(handler);
        self
    }

    pub fn hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self, bus: Arc<dyn Bus>) -> BusService {
        self.build_with_clock(bus, SystemClock)
    }

    pub fn build_with_clock<C: Clock + 'static>(self, bus: Arc<dyn Bus>, clock: C) -> BusService {
        let root_group = Group::new("", self.queue_group, self.queue_group_disabled);
        let core = Core {
            identity: self.identity,
            description: self.description,
            bus,
            time: TimeSource::from_clock(clock),
            registry: EndpointRegistry::new(),
            state: Mutex::new(State::default()),
            dispatcher: AsyncDispatcher::start(),
            hooks: self.hooks,
            root_group,
            default_endpoint: self.default_endpoint,
            default_handler: Mutex::new(self.default_handler),
        };
        BusService { core: Arc::new(core) }
    }
}

impl BusService {
    pub fn identity(&self) -> &ServiceIdentity {
        &self.core.identity
    }

    pub fn is_started(&self) -> bool {
        self.core.state.lock().started
    }

    pub fn is_stopped(&self) -> bool {
        self.core.state.lock().stopped
    }

    /// Validates configuration; fails with `config_validation` on a bad
    /// name/version/queue-group. Idempotent.
    pub fn init(&self) -> Result<(), ServiceError> {
        let mut state = self.core.state.lock();
        if state.initialized {
            return Ok(());
        }
        self.core.identity.validate().map_err(ServiceError::ConfigValidation)?;
        if let Some(group) = self.core.root_group.queue_group() {
            if !is_valid_subject(group) {
                return Err(ServiceError::ConfigValidation(format!("invalid queue group: {group:?}")));
            }
        }
        state.initialized = true;
        Ok(())
    }

    /// Runs `init` if needed, installs connection-event hooks and verb
    /// subscriptions, registers the configured default endpoint (if any),
    /// records the start timestamp, and invokes `on_start`.
    pub async fn start(&self) -> Result<(), ServiceError> {
        self.init()?;
        {
            let mut state = self.core.state.lock();
            if state.started {
                return Ok(());
            }
            state.started = true;
            state.start_epoch_ms = self.core.time.epoch_ms();
        }

        if let Err(err) = self.start_inner().await {
            self.core.dispatcher.close().await;
            if let Some(on_error) = &self.core.hooks.on_error {
                on_error(&err);
            }
            return Err(err);
        }

        if let Some(on_start) = &self.core.hooks.on_start {
            on_start();
        }
        Ok(())
    }

    async fn start_inner(&self) -> Result<(), ServiceError> {
        self.install_connection_hooks();

        if let Some(default_endpoint) = self.core.default_endpoint.clone() {
            let handler = self.core.default_handler.lock().clone().ok_or_else(|| {
                ServiceError::ConfigValidation("default endpoint declared without a handler".into())
            })?;
            let opts = EndpointOptions {
                subject: Some(default_endpoint.subject),
                metadata: default_endpoint.metadata,
                queue_group: default_endpoint.queue_group,
                queue_group_disabled: default_endpoint.queue_group_disabled,
                disabled: default_endpoint.disabled,
                ..Default::default()
            };
            self.add_endpoint("default", handler, opts).await?;
        }

        self.install_verbs().await
    }

    fn install_connection_hooks(&self) {
        let core = Arc::clone(&self.core);
        let prev_closed = self.core.bus.set_closed_handler(Some(Arc::new(move || {
            warn!(service = %core.identity.name, "bus connection closed");
        })));

        let core_for_err = Arc::clone(&self.core);
        let service = self.clone();
        let prev_async_error =
            self.core.bus.set_async_error_handler(Some(Arc::new(move |subscription, err| {
                handle_async_error(&core_for_err, &service, subscription, err);
            })));

        let mut state = self.core.state.lock();
        state.prev_closed_handler = prev_closed;
        state.prev_async_error_handler = prev_async_error;
    }

    async fn install_verbs(&self) -> Result<(), ServiceError> {
        let name = self.core.identity.name.clone();
        let id = self.core.identity.id.to_string();
        for verb in Verb::ALL {
            for subject in verbs::verb_subjects(verb, &name, &id) {
                let subscription =
                    self.core.bus.subscribe(&subject, None).await.map_err(ServiceError::from)?;
                let handle = spawn_verb_task(Arc::clone(&self.core), verb, subscription);
                self.core.state.lock().verb_subscriptions.push(handle);
            }
        }
        Ok(())
    }

    /// Validates `name`/subject, checks uniqueness, resolves the effective
    /// queue group, and installs a subscription unless `disabled`.
    pub async fn add_endpoint(
        &self,
        name: &str,
        handler: Arc<dyn Handler>,
        opts: EndpointOptions,
    ) -> Result<(), ServiceError> {
        register_endpoint(&self.core, &self.core.root_group, name, handler, opts).await
    }

    /// Returns a [`GroupHandle`] inheriting this service's queue-group
    /// settings, producing prefixed subjects for endpoints registered
    /// under it.
    pub fn add_group(&self, name: &str, opts: GroupOptions) -> GroupHandle {
        let group =
            self.core.root_group.add_group(name, opts.queue_group, opts.queue_group_disabled);
        GroupHandle { core: Arc::clone(&self.core), group }
    }

    pub fn info(&self) -> svc_protocol::InfoResponse {
        build_info(&self.core)
    }

    pub fn stats(&self) -> svc_protocol::StatsResponse {
        build_stats(&self.core)
    }

    /// Clears every endpoint's stats and resets the start timestamp.
    pub fn reset(&self) {
        self.core.registry.for_each_mut(|endpoint| endpoint.stats.reset());
        self.core.state.lock().start_epoch_ms = self.core.time.epoch_ms();
    }

    /// Idempotent: stops every endpoint (draining live subscriptions),
    /// drains verb subscriptions, restores the bus's previous connection
    /// hooks, invokes `on_stop`, runs `done` through the dispatcher, then
    /// closes it.
    pub async fn stop(&self) {
        {
            let mut state = self.core.state.lock();
            if state.stopped {
                return;
            }
            state.stopped = true;
        }

        let live = !self.core.bus.is_closed();
        self.core.registry.for_each_mut(|endpoint| {
            if live {
                endpoint.drain_subscription();
            } else {
                endpoint.subscription = None;
            }
        });

        let verb_subs = std::mem::take(&mut self.core.state.lock().verb_subscriptions);
        for mut handle in verb_subs {
            if live {
                handle.drain();
            }
        }

        let (prev_closed, prev_async_error) = {
            let mut state = self.core.state.lock();
            (state.prev_closed_handler.take(), state.prev_async_error_handler.take())
        };
        self.core.bus.set_closed_handler(prev_closed);
        self.core.bus.set_async_error_handler(prev_async_error);

        if let Some(on_stop) = &self.core.hooks.on_stop {
            on_stop();
        }
        if let Some(done) = self.core.hooks.done.clone() {
            self.core.dispatcher.push(Box::new(move || done())).await;
        }
        self.core.dispatcher.close().await;
    }
}

impl GroupHandle {
    pub fn prefix(&self) -> &str {
        self.group.prefix()
    }

    pub fn add_group(&self, name: &str, opts: GroupOptions) -> GroupHandle {
        let group = self.group.add_group(name, opts.queue_group, opts.queue_group_disabled);
        GroupHandle { core: Arc::clone(&self.core), group }
    }

    pub async fn add_endpoint(
        &self,
        name: &str,
        handler: Arc<dyn Handler>,
        opts: EndpointOptions,
    ) -> Result<(), ServiceError> {
        register_endpoint(&self.core, &self.group, name, handler, opts).await
    }
}

fn build_info(core: &Arc<Core>) -> svc_protocol::InfoResponse {
    core.registry.with_endpoints(|eps| {
        verbs::build_info_response(
            &core.identity.name,
            &core.identity.id,
            &core.identity.version,
            &core.identity.metadata,
            &core.description,
            eps,
        )
    })
}

fn build_stats(core: &Arc<Core>) -> svc_protocol::StatsResponse {
    let started = core.state.lock().start_epoch_ms;
    let stats_value = core.hooks.stats.as_ref().map(|f| f());
    core.registry.with_endpoints(|eps| {
        let mut response = verbs::build_stats_response(
            &core.identity.name,
            &core.identity.id,
            &core.identity.version,
            &core.identity.metadata,
            &started.to_string(),
            eps,
        );
        if let Some(value) = stats_value {
            for entry in &mut response.endpoints {
                entry.data = Some(value.clone());
            }
        }
        response
    })
}

async fn register_endpoint(
    core: &Arc<Core>,
    parent: &Group,
    name: &str,
    handler: Arc<dyn Handler>,
    opts: EndpointOptions,
) -> Result<(), ServiceError> {
    if !is_valid_name(name) {
        return Err(ServiceError::ConfigValidation(format!("invalid endpoint name: {name:?}")));
    }
    let subject = opts.subject.clone().unwrap_or_else(|| parent.subject_for(name));
    if !is_valid_subject(&subject) {
        return Err(ServiceError::ConfigValidation(format!("invalid endpoint subject: {subject:?}")));
    }

    let (queue_group, _queue_group_disabled) = resolve_queue_group(
        opts.queue_group.as_deref(),
        opts.queue_group_disabled,
        parent.queue_group(),
        parent.queue_group_disabled(),
    );

    let wrapped = apply_middleware(handler, &opts.middleware);
    let wrapped = if opts.is_async { AsyncHandler::wrap(wrapped) } else { wrapped };

    let subscription = if opts.disabled {
        None
    } else {
        let group_opt = if queue_group.is_empty() { None } else { Some(queue_group.clone()) };
        let sub = match &opts.stream_config {
            Some(stream_config) => {
                core.bus.subscribe_stream(&subject, group_opt, stream_config.clone()).await
            }
            None => core.bus.subscribe(&subject, group_opt).await,
        }
        .map_err(ServiceError::from)?;
        Some(sub)
    };

    let subscription_handle = subscription
        .map(|sub| spawn_endpoint_task(Arc::clone(core), name.to_string(), Arc::clone(&wrapped), sub));

    let endpoint = Endpoint {
        name: name.to_string(),
        subject: subject.clone(),
        queue_group,
        metadata: opts.metadata,
        doc: opts.doc,
        stream_config: opts.stream_config,
        disabled: opts.disabled,
        handler: wrapped,
        stats: EndpointStats::new(name, subject),
        subscription: subscription_handle,
    };
    core.registry.add(endpoint)
}

fn spawn_endpoint_task(
    core: Arc<Core>,
    name: String,
    handler: Arc<dyn Handler>,
    mut subscription: Subscription,
) -> SubscriptionHandle {
    let (drain_tx, mut drain_rx) = oneshot::channel();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = &mut drain_rx => {
                    subscription.drain();
                    while let Some(message) = subscription.next().await {
                        dispatch_request(&core, &name, &handler, message).await;
                    }
                    break;
                }
                message = subscription.next() => {
                    match message {
                        Some(message) => dispatch_request(&core, &name, &handler, message).await,
                        None => break,
                    }
                }
            }
        }
    });
    SubscriptionHandle::new(drain_tx)
}

async fn dispatch_request(core: &Arc<Core>, name: &str, handler: &Arc<dyn Handler>, message: Message) {
    let request = Arc::new(Request::new(message, Arc::clone(&core.bus)));
    let start = core.time.now();
    handler.handle(Arc::clone(&request)).await;
    let elapsed_ns = core.time.now().saturating_duration_since(start).as_nanos() as u64;
    let now_ms = core.time.epoch_ms();
    let respond_error = request.respond_error();
    core.registry.with_endpoint_mut(name, |endpoint| {
        endpoint.stats.record(elapsed_ns, respond_error, now_ms);
    });
}

fn spawn_verb_task(core: Arc<Core>, verb: Verb, mut subscription: Subscription) -> SubscriptionHandle {
    let (drain_tx, mut drain_rx) = oneshot::channel();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = &mut drain_rx => {
                    subscription.drain();
                    while let Some(message) = subscription.next().await {
                        dispatch_verb(&core, verb, message).await;
                    }
                    break;
                }
                message = subscription.next() => {
                    match message {
                        Some(message) => dispatch_verb(&core, verb, message).await,
                        None => break,
                    }
                }
            }
        }
    });
    SubscriptionHandle::new(drain_tx)
}

async fn dispatch_verb(core: &Arc<Core>, verb: Verb, message: Message) {
    let request = Arc::new(Request::new(message, Arc::clone(&core.bus)));
    let result = match verb {
        Verb::Ping => {
            let response = verbs::build_ping_response(
                &core.identity.name,
                &core.identity.id,
                &core.identity.version,
                &core.identity.metadata,
            );
            request.respond_json(&response).await
        }
        Verb::Info => request.respond_json(&build_info(core)).await,
        Verb::Stats => request.respond_json(&build_stats(core)).await,
        Verb::Health => request.respond_json(&verbs::build_health_response()).await,
        Verb::Docs => {
            let response = core.registry.with_endpoints(verbs::build_docs_response);
            request.respond_json(&response).await
        }
    };

    if let Err(err) = result {
        warn!(subject = request.subject(), error = %err, "verb handler failed");
        if let Some(error_handler) = &core.hooks.error_handler {
            error_handler(&core.identity.name, &err.to_string());
        }
        if let Some(on_error) = &core.hooks.on_error {
            on_error(&err);
        }
    }
}

fn handle_async_error(
    core: &Arc<Core>,
    service: &BusService,
    subscription: Option<SubscriptionInfo>,
    err: svc_bus::BusError,
) {
    let Some(info) = subscription else {
        warn!(error = %err, "async bus error with no associated subscription");
        if let Some(error_handler) = &core.hooks.error_handler {
            error_handler(&core.identity.name, &err.to_string());
        }
        return;
    };

    let matched_endpoint = core.registry.find_matching(&info.subject, |e| e.name().to_string());
    match matched_endpoint {
        Some(endpoint_name) => {
            let description = format!("{}: {}", info.subject, err);
            core.registry.with_endpoint_mut(&endpoint_name, |endpoint| {
                endpoint.stats.num_errors += 1;
                endpoint.stats.last_error = description.clone();
            });
            if let Some(error_handler) = &core.hooks.error_handler {
                error_handler(&core.identity.name, &description);
            }
            let service = service.clone();
            tokio::spawn(async move { service.stop().await });
        }
        None if info.subject.starts_with(svc_protocol::API_PREFIX) => {
            error!(subject = %info.subject, "async error on unmatched control subject");
        }
        None => {
            if let Some(error_handler) = &core.hooks.error_handler {
                error_handler(&core.identity.name, &err.to_string());
            }
        }
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
