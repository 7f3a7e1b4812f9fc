//! In-memory store, connector and identity that record every call.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use load_secrets::core::store::{Connector, Identity, NewSecret, SecretStore, Written};
use load_secrets::core::types::{Region, TagKey};
use load_secrets::error::{ContractError, Result, StoreError};
use load_secrets::{RemoteState, Tag};

/// A recorded store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Describe(String),
    GetValue(String),
    Create {
        name: String,
        value: String,
        tags: Vec<Tag>,
        replica_regions: Vec<Region>,
    },
    PutValue {
        name: String,
        value: String,
    },
    Restore(String),
    AddReplicas(String, Vec<Region>),
    RemoveReplicas(String, Vec<Region>),
    Untag(String, Vec<TagKey>),
    Tag(String, Vec<Tag>),
}

impl Call {
    /// Whether the call changes remote state.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Call::Describe(_) | Call::GetValue(_))
    }
}

/// A stored secret: metadata plus value (`None` means binary-only).
#[derive(Debug, Clone)]
pub struct Stored {
    pub state: RemoteState,
    pub value: Option<String>,
}

/// Shared backing state for every regional client.
#[derive(Debug, Default)]
pub struct Backend {
    pub secrets: BTreeMap<String, Stored>,
    pub calls: Vec<Call>,
    /// Answer writes without a version id.
    pub omit_version: bool,
    /// Fail the next describe with a transport error.
    pub fail_describe: bool,
    versions: usize,
}

impl Backend {
    fn next_version(&mut self) -> Option<String> {
        self.versions += 1;
        if self.omit_version {
            None
        } else {
            Some(format!("v{}", self.versions))
        }
    }
}

/// Handle to a shared in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub backend: Rc<RefCell<Backend>>,
    pub connects: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing secret with a textual value.
    pub fn insert(&self, name: &str, state: RemoteState, value: &str) {
        self.backend.borrow_mut().secrets.insert(
            name.to_string(),
            Stored {
                state,
                value: Some(value.to_string()),
            },
        );
    }

    /// Seed an existing secret whose value is binary-only.
    pub fn insert_binary(&self, name: &str, state: RemoteState) {
        self.backend
            .borrow_mut()
            .secrets
            .insert(name.to_string(), Stored { state, value: None });
    }

    pub fn get(&self, name: &str) -> Option<Stored> {
        self.backend.borrow().secrets.get(name).cloned()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.backend.borrow().calls.clone()
    }

    pub fn mutating_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutating).collect()
    }

    pub fn omit_version(&self) {
        self.backend.borrow_mut().omit_version = true;
    }

    pub fn fail_next_describe(&self) {
        self.backend.borrow_mut().fail_describe = true;
    }

    fn record(&self, call: Call) {
        self.backend.borrow_mut().calls.push(call);
    }

    fn arn_of(name: &str) -> String {
        format!("arn:aws:secretsmanager:eu-west-1:123456789012:secret:{}", name)
    }

    /// Find a secret by full name or ARN.
    fn key_for(&self, secret_id: &str) -> String {
        let backend = self.backend.borrow();
        backend
            .secrets
            .iter()
            .find(|(name, stored)| *name == secret_id || stored.state.arn == secret_id)
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| secret_id.to_string())
    }

    fn with_secret<T>(&self, secret_id: &str, f: impl FnOnce(&mut Stored) -> T) -> Result<T> {
        let key = self.key_for(secret_id);
        let mut backend = self.backend.borrow_mut();
        let stored = backend
            .secrets
            .get_mut(&key)
            .ok_or_else(|| StoreError::transport("Mutate", secret_id, "ResourceNotFoundException"))?;
        Ok(f(stored))
    }
}

impl SecretStore for MemoryStore {
    fn describe(&self, name: &str) -> Result<Option<RemoteState>> {
        self.record(Call::Describe(name.to_string()));
        let mut backend = self.backend.borrow_mut();
        if backend.fail_describe {
            backend.fail_describe = false;
            return Err(StoreError::transport("DescribeSecret", name, "connection reset").into());
        }
        Ok(backend.secrets.get(name).map(|s| s.state.clone()))
    }

    fn get_value(&self, name: &str) -> Result<String> {
        self.record(Call::GetValue(name.to_string()));
        let backend = self.backend.borrow();
        match backend.secrets.get(name).and_then(|s| s.value.clone()) {
            Some(value) => Ok(value),
            None => Err(ContractError::BinaryValue(name.to_string()).into()),
        }
    }

    fn create(&self, secret: &NewSecret<'_>) -> Result<Written> {
        self.record(Call::Create {
            name: secret.name.to_string(),
            value: secret.value.to_string(),
            tags: secret.tags.to_vec(),
            replica_regions: secret.replica_regions.to_vec(),
        });

        let arn = Self::arn_of(secret.name);
        let mut state = RemoteState::new(arn.clone());
        state.tags = secret
            .tags
            .iter()
            .map(|t| (t.key.clone(), t.value.clone()))
            .collect();
        state.replica_regions = secret.replica_regions.iter().cloned().collect();

        let mut backend = self.backend.borrow_mut();
        backend.secrets.insert(
            secret.name.to_string(),
            Stored {
                state,
                value: Some(secret.value.to_string()),
            },
        );
        Ok(Written {
            arn: Some(arn),
            version_id: backend.next_version(),
        })
    }

    fn put_value(&self, name: &str, value: &str) -> Result<Written> {
        self.record(Call::PutValue {
            name: name.to_string(),
            value: value.to_string(),
        });
        let arn = self.with_secret(name, |stored| {
            stored.value = Some(value.to_string());
            stored.state.arn.clone()
        })?;
        Ok(Written {
            arn: Some(arn),
            version_id: self.backend.borrow_mut().next_version(),
        })
    }

    fn restore(&self, name: &str) -> Result<()> {
        self.record(Call::Restore(name.to_string()));
        self.with_secret(name, |stored| stored.state.deleted_at = None)
    }

    fn add_replica_regions(&self, name: &str, regions: &[Region]) -> Result<()> {
        self.record(Call::AddReplicas(name.to_string(), regions.to_vec()));
        self.with_secret(name, |stored| {
            stored.state.replica_regions.extend(regions.iter().cloned())
        })
    }

    fn remove_replica_regions(&self, name: &str, regions: &[Region]) -> Result<()> {
        self.record(Call::RemoveReplicas(name.to_string(), regions.to_vec()));
        self.with_secret(name, |stored| {
            for region in regions {
                stored.state.replica_regions.remove(region);
            }
        })
    }

    fn untag(&self, secret_id: &str, keys: &[TagKey]) -> Result<()> {
        self.record(Call::Untag(secret_id.to_string(), keys.to_vec()));
        self.with_secret(secret_id, |stored| {
            for key in keys {
                stored.state.tags.remove(key);
            }
        })
    }

    fn tag(&self, secret_id: &str, tags: &[Tag]) -> Result<()> {
        self.record(Call::Tag(secret_id.to_string(), tags.to_vec()));
        self.with_secret(secret_id, |stored| {
            for tag in tags {
                stored.state.tags.insert(tag.key.clone(), tag.value.clone());
            }
        })
    }
}

impl Connector for MemoryStore {
    fn connect(&self, _region: &str) -> Result<Box<dyn SecretStore>> {
        self.connects.set(self.connects.get() + 1);
        Ok(Box::new(self.clone()))
    }
}

/// Identity resolver returning a fixed account.
#[derive(Debug, Clone)]
pub struct FixedIdentity(pub String);

impl Identity for FixedIdentity {
    fn account_id(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
