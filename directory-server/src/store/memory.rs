//! In-process backend
//!
//! Everything lives in process memory and is gone on restart. Used for
//! local development (`BACKEND=memory`) and by the test suite.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use shared::models::{
    NewReport, NewSupplier, Profile, ProfileFields, Report, Supplier, SupplierChanges,
};

use super::{
    AuthError, AuthProvider, AuthUser, Backend, FileStorage, ProfileStore, ReportStore,
    StoreResult, SupplierStore,
};

/// Build a complete in-memory backend
pub fn backend(bucket: &str) -> Backend {
    Backend {
        suppliers: Arc::new(MemorySupplierStore::default()),
        reports: Arc::new(MemoryReportStore::default()),
        profiles: Arc::new(MemoryProfileStore::default()),
        auth: Arc::new(MemoryAuth::default()),
        storage: Arc::new(MemoryStorage::new(bucket)),
    }
}

// ==================== Suppliers ====================

/// Rows keyed by id; ids are assigned from 1 upward
#[derive(Debug, Default)]
pub struct MemorySupplierStore {
    rows: RwLock<BTreeMap<i64, Supplier>>,
    last_id: AtomicI64,
}

impl MemorySupplierStore {
    /// Pre-populated store
    pub fn with_rows(rows: impl IntoIterator<Item = NewSupplier>) -> Self {
        let store = Self::default();
        {
            let mut map = store.rows.write();
            for row in rows {
                let id = store.next_id();
                map.insert(id, row.into_supplier(id));
            }
        }
        store
    }

    fn next_id(&self) -> i64 {
        self.last_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl SupplierStore for MemorySupplierStore {
    async fn list(&self) -> StoreResult<Vec<Supplier>> {
        Ok(self.rows.read().values().cloned().collect())
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Supplier>> {
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn find_by_phone(&self, whatsapp: &str) -> StoreResult<Vec<i64>> {
        Ok(self
            .rows
            .read()
            .values()
            .filter(|s| s.whatsapp == whatsapp)
            .map(|s| s.id)
            .collect())
    }

    async fn find_many(&self, ids: &[i64]) -> StoreResult<Vec<Supplier>> {
        let rows = self.rows.read();
        Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
    }

    async fn insert(&self, supplier: NewSupplier) -> StoreResult<Supplier> {
        let id = self.next_id();
        let row = supplier.into_supplier(id);
        self.rows.write().insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, changes: SupplierChanges) -> StoreResult<Option<Supplier>> {
        let mut rows = self.rows.write();
        Ok(rows.get_mut(&id).map(|row| {
            changes.apply_to(row);
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.rows.write().remove(&id).is_some())
    }

    async fn delete_many(&self, ids: &[i64]) -> StoreResult<usize> {
        let mut rows = self.rows.write();
        Ok(ids.iter().filter(|id| rows.remove(*id).is_some()).count())
    }
}

// ==================== Reports ====================

#[derive(Debug, Default)]
pub struct MemoryReportStore {
    rows: RwLock<BTreeMap<i64, Report>>,
    last_id: AtomicI64,
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn list(&self) -> StoreResult<Vec<Report>> {
        let mut reports: Vec<Report> = self.rows.read().values().cloned().collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(reports)
    }

    async fn insert(&self, report: NewReport) -> StoreResult<Report> {
        let id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
        let row = report.into_report(id);
        self.rows.write().insert(id, row.clone());
        Ok(row)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.rows.write().remove(&id).is_some())
    }
}

// ==================== Profiles ====================

#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    rows: DashMap<String, Profile>,
}

impl MemoryProfileStore {
    /// Change a role directly, as an operator would in the backend console
    pub fn set_role(&self, user_id: &str, role: shared::models::Role) -> bool {
        match self.rows.get_mut(user_id) {
            Some(mut profile) => {
                profile.role = role;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, user_id: &str) -> StoreResult<Option<Profile>> {
        Ok(self.rows.get(user_id).map(|p| p.value().clone()))
    }

    async fn upsert(&self, user_id: &str, fields: ProfileFields) -> StoreResult<Profile> {
        let profile = Profile {
            id: user_id.to_string(),
            name: Some(fields.name),
            company: Some(fields.company),
            sector: Some(fields.sector),
            role: fields.role,
        };
        self.rows.insert(user_id.to_string(), profile.clone());
        Ok(profile)
    }
}

// ==================== Auth ====================

#[derive(Debug, Clone)]
struct Account {
    id: String,
    email: String,
    password_hash: String,
}

/// Accounts keyed by lowercased email
#[derive(Debug, Default)]
pub struct MemoryAuth {
    accounts: DashMap<String, Account>,
}

fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let key = email.trim().to_lowercase();
        match self.accounts.get(&key) {
            Some(account) if account.password_hash == hash_password(password) => Ok(AuthUser {
                id: account.id.clone(),
                email: account.email.clone(),
            }),
            _ => Err(AuthError::InvalidCredentials(
                "Invalid login credentials".to_string(),
            )),
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let key = email.trim().to_lowercase();
        match self.accounts.entry(key.clone()) {
            Entry::Occupied(_) => Err(AuthError::Rejected("User already registered".to_string())),
            Entry::Vacant(slot) => {
                let account = Account {
                    id: uuid::Uuid::new_v4().to_string(),
                    email: key,
                    password_hash: hash_password(password),
                };
                let user = AuthUser {
                    id: account.id.clone(),
                    email: account.email.clone(),
                };
                slot.insert(account);
                Ok(user)
            }
        }
    }
}

// ==================== Storage ====================

/// Objects keyed by path inside one bucket
#[derive(Debug)]
pub struct MemoryStorage {
    bucket: String,
    objects: DashMap<String, (Vec<u8>, String)>,
}

impl MemoryStorage {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            objects: DashMap::new(),
        }
    }

    /// Stored bytes and content type
    pub fn object(&self, path: &str) -> Option<(Vec<u8>, String)> {
        self.objects.get(path).map(|o| o.value().clone())
    }
}

#[async_trait]
impl FileStorage for MemoryStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StoreResult<String> {
        self.objects
            .insert(path.to_string(), (bytes, content_type.to_string()));
        Ok(format!("memory://{}/{}", self.bucket, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Role;

    fn new_supplier(name: &str, whatsapp: &str) -> NewSupplier {
        NewSupplier {
            name: name.into(),
            company: format!("{name} Ltda"),
            whatsapp: whatsapp.into(),
            category: None,
            coopercon: false,
            qualifios: false,
            tags: vec!["#cimento".into()],
        }
    }

    #[tokio::test]
    async fn test_supplier_crud() {
        let store = MemorySupplierStore::default();
        let ana = store.insert(new_supplier("Ana", "(85) 996204919")).await.unwrap();
        let bia = store.insert(new_supplier("Bia", "(85) 32241234")).await.unwrap();
        assert_eq!((ana.id, bia.id), (1, 2));

        assert_eq!(store.find_by_phone("(85) 996204919").await.unwrap(), vec![1]);
        assert!(store.find_by_phone("(85) 00000000").await.unwrap().is_empty());

        let changes = SupplierChanges {
            name: Some("Ana Maria".into()),
            ..Default::default()
        };
        let updated = store.update(1, changes.clone()).await.unwrap().unwrap();
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.whatsapp, "(85) 996204919");
        assert!(store.update(99, changes).await.unwrap().is_none());

        assert_eq!(store.find_many(&[2, 99, 1]).await.unwrap().len(), 2);
        assert_eq!(store.delete_many(&[1, 2, 3]).await.unwrap(), 2);
        assert!(!store.delete(1).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reports_newest_first() {
        let store = MemoryReportStore::default();
        for created_at in [10, 30, 20] {
            store
                .insert(NewReport {
                    message: format!("r{created_at}"),
                    reporter_name: None,
                    flagged_contact: None,
                    supplier_id: None,
                    created_at,
                })
                .await
                .unwrap();
        }
        let order: Vec<i64> = store
            .list()
            .await
            .unwrap()
            .iter()
            .map(|r| r.created_at)
            .collect();
        assert_eq!(order, vec![30, 20, 10]);
        assert!(store.delete(1).await.unwrap());
        assert!(!store.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_auth_sign_up_and_in() {
        let auth = MemoryAuth::default();
        let user = auth.sign_up("Ana@Example.com", "segredo").await.unwrap();
        assert_eq!(user.email, "ana@example.com");

        assert!(matches!(
            auth.sign_up("ana@example.com", "outra").await,
            Err(AuthError::Rejected(_))
        ));
        assert_eq!(auth.sign_in("ana@example.com", "segredo").await.unwrap(), user);
        assert!(matches!(
            auth.sign_in("ana@example.com", "errada").await,
            Err(AuthError::InvalidCredentials(_))
        ));
    }

    #[tokio::test]
    async fn test_profile_upsert_and_role_change() {
        let profiles = MemoryProfileStore::default();
        let fields = ProfileFields {
            name: "Ana".into(),
            company: "Coopercon".into(),
            sector: "Compras".into(),
            role: Role::Pending,
        };
        profiles.upsert("u1", fields).await.unwrap();
        assert!(profiles.set_role("u1", Role::Searcher));
        assert!(!profiles.set_role("u2", Role::Searcher));
        assert_eq!(
            profiles.get("u1").await.unwrap().unwrap().role,
            Role::Searcher
        );
    }

    #[tokio::test]
    async fn test_storage_overwrites() {
        let storage = MemoryStorage::new("logos");
        let url = storage.upload("partner/logo.jpg", vec![1], "image/jpeg").await.unwrap();
        storage.upload("partner/logo.jpg", vec![2], "image/jpeg").await.unwrap();
        assert_eq!(url, "memory://logos/partner/logo.jpg");
        assert_eq!(storage.object("partner/logo.jpg").unwrap().0, vec![2]);
    }
}
