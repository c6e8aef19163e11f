use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use crate::content::ContentStore;
use crate::errors::AppError;
use crate::flow::{Action, FlowContext, Session};
use crate::gateway::{self, RecommendationGateway};

/// Shortest pause between two idle-session sweeps.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// One live session plus the last time a request reached it.
pub struct SessionSlot {
    session: Mutex<Session>,
    touched: Mutex<Instant>,
}

impl SessionSlot {
    fn new(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
            touched: Mutex::new(Instant::now()),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().await
    }

    async fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(*self.touched.lock().await)
    }
}

type SessionHandle = Arc<SessionSlot>;

/// Live sessions by id. Each session has its own lock so one learner's
/// pending call never blocks another's.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionRegistry {
    pub async fn create(&self) -> (Uuid, Session) {
        let id = Uuid::new_v4();
        let session = Session::new();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(SessionSlot::new(session.clone())));
        (id, session)
    }

    /// Looks up a session and marks it as used now.
    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        let slot = self.sessions.read().await.get(&id).cloned()?;
        *slot.touched.lock().await = Instant::now();
        Some(slot)
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Drops every session nobody has touched for `ttl`. A call still in
    /// flight for an evicted session finishes against its detached slot.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let mut idle = Vec::new();
        for (id, slot) in sessions.iter() {
            if slot.idle_for(now).await >= ttl {
                idle.push(*id);
            }
        }
        for id in &idle {
            sessions.remove(id);
        }
        idle.len()
    }
}

/// Drives sessions: applies actions under the session lock, performs the
/// resulting gateway call with the lock released, then folds the reply in.
#[derive(Clone)]
pub struct FlowController {
    sessions: SessionRegistry,
    store: ContentStore,
    gateway: Arc<dyn RecommendationGateway>,
    admin_password: String,
}

impl FlowController {
    pub fn new(
        store: ContentStore,
        gateway: Arc<dyn RecommendationGateway>,
        admin_password: String,
    ) -> Self {
        Self {
            sessions: SessionRegistry::default(),
            store,
            gateway,
            admin_password,
        }
    }

    pub async fn create_session(&self) -> (Uuid, Session) {
        let (id, session) = self.sessions.create().await;
        info!("Session {id} created");
        (id, session)
    }

    pub async fn snapshot(&self, id: Uuid) -> Result<Session, AppError> {
        let handle = self.handle(id).await?;
        let session = handle.lock().await;
        Ok(session.clone())
    }

    pub async fn discard(&self, id: Uuid) -> Result<(), AppError> {
        if self.sessions.remove(id).await {
            info!("Session {id} discarded");
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    /// Applies `action` and, when it issues a gateway call, waits for the
    /// reply before returning the updated session.
    ///
    /// The call and the fold run on their own task, so a caller that goes
    /// away mid-call still leaves the session resolved.
    pub async fn dispatch(&self, id: Uuid, action: Action) -> Result<Session, AppError> {
        let handle = self.handle(id).await?;

        let catalog = if action.needs_catalog() {
            self.store.list().await
        } else {
            Vec::new()
        };

        let dispatch = {
            let mut session = handle.lock().await;
            let ctx = FlowContext {
                admin_password: &self.admin_password,
                catalog: &catalog,
            };
            session.apply(action, &ctx)?
        };

        if let Some(dispatch) = dispatch {
            let backend = Arc::clone(&self.gateway);
            let slot = Arc::clone(&handle);
            let call = tokio::spawn(async move {
                let reply = gateway::perform(backend.as_ref(), &dispatch.request).await;
                let mut session = slot.lock().await;
                if !session.resolve(dispatch.ticket, reply) {
                    debug!("Session {id}: reply for ticket {} ignored", dispatch.ticket);
                }
            });
            call.await
                .map_err(|e| anyhow::anyhow!("gateway task for session {id} failed: {e}"))?;
        }

        let session = handle.lock().await;
        Ok(session.clone())
    }

    /// Periodically evicts sessions idle for longer than `ttl`.
    pub fn spawn_idle_sweeper(&self, ttl: Duration) -> JoinHandle<()> {
        let sessions = self.sessions.clone();
        let period = (ttl / 4).max(MIN_SWEEP_INTERVAL);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let evicted = sessions.evict_idle(ttl).await;
                if evicted > 0 {
                    info!("Evicted {evicted} idle sessions");
                }
            }
        })
    }

    async fn handle(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        self.sessions.get(id).await.ok_or_else(|| not_found(id))
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
