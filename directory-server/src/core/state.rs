use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use shared::models::PartnerBranding;
use shared::search::TagIndex;

use crate::auth::JwtService;
use crate::core::{BackendKind, Config, Result, ServerError};
use crate::lookup::Lookups;
use crate::store::{self, Backend};

/// Tag index snapshot of the last supplier collection load
///
/// Replaced wholesale on every load and never patched in between: edits
/// made after a load are invisible to suggestions until the next one.
#[derive(Debug, Default)]
pub struct TagIndexCache {
    current: RwLock<Option<Arc<TagIndex>>>,
}

impl TagIndexCache {
    /// Install a freshly built index and return it
    pub fn replace(&self, index: TagIndex) -> Arc<TagIndex> {
        let index = Arc::new(index);
        *self.current.write() = Some(index.clone());
        index
    }

    /// Current snapshot, `None` before the first load
    pub fn snapshot(&self) -> Option<Arc<TagIndex>> {
        self.current.read().clone()
    }
}

/// Report ids each user has opened
///
/// Lives only in process memory: a restart makes every report unread again.
#[derive(Debug, Default)]
pub struct SeenReports {
    by_user: DashMap<String, HashSet<i64>>,
}

impl SeenReports {
    /// Returns `true` when the report was not seen before
    pub fn mark(&self, user_id: &str, report_id: i64) -> bool {
        self.by_user
            .entry(user_id.to_string())
            .or_default()
            .insert(report_id)
    }

    pub fn seen_by(&self, user_id: &str) -> HashSet<i64> {
        self.by_user
            .get(user_id)
            .map(|set| set.value().clone())
            .unwrap_or_default()
    }

    /// Drop a deleted report from every user's set
    pub fn forget(&self, report_id: i64) {
        for mut set in self.by_user.iter_mut() {
            set.remove(&report_id);
        }
    }
}

/// Server state - shared references to every service
///
/// Cloning is cheap: everything behind an `Arc`.
///
/// | Field | Notes |
/// |-------|-------|
/// | config | immutable |
/// | backend | supplier/report/profile stores, auth, file storage |
/// | lookups | CNPJ registry and CEP lookup |
/// | jwt_service | session tokens |
/// | tag_index | snapshot rebuilt on each supplier list load |
/// | seen_reports | per-user opened reports, memory only |
/// | partner | current partner branding, memory only |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub backend: Backend,
    pub lookups: Lookups,
    pub jwt_service: Arc<JwtService>,
    pub tag_index: Arc<TagIndexCache>,
    pub seen_reports: Arc<SeenReports>,
    pub partner: Arc<RwLock<PartnerBranding>>,
}

impl ServerState {
    /// Assemble state from already built collaborators
    pub fn new(config: Config, backend: Backend, lookups: Lookups) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let partner = PartnerBranding {
            name: config.partner_name.clone(),
            ..Default::default()
        };
        Self {
            config,
            backend,
            lookups,
            jwt_service,
            tag_index: Arc::new(TagIndexCache::default()),
            seen_reports: Arc::new(SeenReports::default()),
            partner: Arc::new(RwLock::new(partner)),
        }
    }

    /// Build the collaborators named by the configuration
    pub fn initialize(config: &Config) -> Result<Self> {
        let backend = match config.backend {
            BackendKind::Memory => {
                tracing::warn!("Using in-memory backend, data is lost on restart");
                store::memory::backend(&config.logo_bucket)
            }
            BackendKind::Supabase => {
                tracing::info!(url = %config.supabase_url, "Using Supabase backend");
                store::supabase::backend(
                    &config.supabase_url,
                    &config.supabase_key,
                    &config.logo_bucket,
                )
                .map_err(|e| ServerError::Config(format!("Supabase client: {e}")))?
            }
        };

        let lookups = Lookups::brasil_api(&config.brasil_api_url, config.lookup_timeout_ms)
            .map_err(|e| ServerError::Config(format!("BrasilAPI client: {e}")))?;

        Ok(Self::new(config.clone(), backend, lookups))
    }

    pub fn tag_index(&self) -> Option<Arc<TagIndex>> {
        self.tag_index.snapshot()
    }

    pub fn partner(&self) -> PartnerBranding {
        self.partner.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_index_cache_replace() {
        let cache = TagIndexCache::default();
        assert!(cache.snapshot().is_none());

        cache.replace(TagIndex::from_tags(["#cimento"]));
        let first = cache.snapshot().unwrap();
        cache.replace(TagIndex::from_tags(["#areia"]));

        // an older snapshot stays valid for whoever holds it
        assert!(first.contains("#cimento"));
        assert!(cache.snapshot().unwrap().contains("#areia"));
        assert!(!cache.snapshot().unwrap().contains("#cimento"));
    }

    #[test]
    fn test_seen_reports_per_user() {
        let seen = SeenReports::default();
        assert!(seen.mark("admin-1", 7));
        assert!(!seen.mark("admin-1", 7));
        seen.mark("admin-2", 8);

        assert_eq!(seen.seen_by("admin-1"), HashSet::from([7]));
        assert!(seen.seen_by("nobody").is_empty());

        seen.forget(7);
        assert!(seen.seen_by("admin-1").is_empty());
        assert_eq!(seen.seen_by("admin-2"), HashSet::from([8]));
    }

    #[test]
    fn test_initialize_memory_backend() {
        let state = ServerState::initialize(&Config::default()).unwrap();
        assert!(state.tag_index().is_none());
        assert_eq!(state.partner(), PartnerBranding::default());
    }
}
