//! AWS Secrets Manager and STS backends.
//!
//! Credentials come from the default provider chain (environment, profile,
//! SSO, instance role). The SDK is async; the core is not, so every call is
//! driven to completion on a current-thread runtime owned by the connector
//! and shared with every client it builds.

use std::fmt;
use std::sync::Arc;

use aws_config::{BehaviorVersion, Region as AwsRegion, SdkConfig};
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::primitives::DateTime as AwsDateTime;
use aws_sdk_secretsmanager::types::{ReplicaRegionType, Tag as AwsTag};
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use chrono::{DateTime, Utc};
use tokio::runtime::Runtime;
use tracing::{debug, trace};

use super::{Connector, Identity, NewSecret, SecretStore, Written};
use crate::core::domain::{RemoteState, Tag};
use crate::core::types::{AccountId, Region, TagKey};
use crate::error::{ContractError, Error, Result, StoreError};

/// Builds Secrets Manager clients per region.
pub struct AwsConnector {
    runtime: Arc<Runtime>,
}

impl fmt::Debug for AwsConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsConnector").finish_non_exhaustive()
    }
}

impl AwsConnector {
    /// Create a connector with its own runtime.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Runtime` if the runtime cannot be started.
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(StoreError::Runtime)?;

        Ok(Self {
            runtime: Arc::new(runtime),
        })
    }

    fn sdk_config(&self, region: &str) -> SdkConfig {
        self.runtime.block_on(
            aws_config::defaults(BehaviorVersion::latest())
                .region(AwsRegion::new(region.to_string()))
                .load(),
        )
    }

    /// Identity resolver using STS in `region`, sharing this runtime.
    pub fn identity(&self, region: &str) -> StsIdentity {
        let config = self.sdk_config(region);
        StsIdentity {
            client: aws_sdk_sts::Client::new(&config),
            runtime: Arc::clone(&self.runtime),
        }
    }
}

impl Connector for AwsConnector {
    fn connect(&self, region: &str) -> Result<Box<dyn SecretStore>> {
        let config = self.sdk_config(region);
        debug!(region, "created secrets manager client");

        Ok(Box::new(AwsSecretsManager {
            client: SecretsManagerClient::new(&config),
            runtime: Arc::clone(&self.runtime),
            region: region.to_string(),
        }))
    }
}

/// Secrets Manager client bound to one region.
pub struct AwsSecretsManager {
    client: SecretsManagerClient,
    runtime: Arc<Runtime>,
    region: Region,
}

impl fmt::Debug for AwsSecretsManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsSecretsManager")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

fn transport(operation: &'static str, name: &str, err: impl std::error::Error) -> Error {
    StoreError::transport(operation, name, DisplayErrorContext(err).to_string()).into()
}

fn to_chrono(at: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(at.secs(), at.subsec_nanos())
}

fn to_aws_tags(tags: &[Tag]) -> Vec<AwsTag> {
    tags.iter()
        .map(|t| AwsTag::builder().key(&t.key).value(&t.value).build())
        .collect()
}

fn to_replica_regions(regions: &[Region]) -> Vec<ReplicaRegionType> {
    regions
        .iter()
        .map(|r| ReplicaRegionType::builder().region(r).build())
        .collect()
}

impl SecretStore for AwsSecretsManager {
    fn describe(&self, name: &str) -> Result<Option<RemoteState>> {
        trace!(name, region = %self.region, "describing secret");

        let result = self
            .runtime
            .block_on(self.client.describe_secret().secret_id(name).send());

        let output = match result {
            Ok(output) => output,
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception()) =>
            {
                debug!(name, "secret does not exist");
                return Ok(None);
            }
            Err(err) => return Err(transport("DescribeSecret", name, err)),
        };

        let tags = output
            .tags()
            .iter()
            .filter_map(|t| {
                let key = t.key()?;
                Some((key.to_string(), t.value().unwrap_or_default().to_string()))
            })
            .collect();

        let replica_regions = output
            .replication_status()
            .iter()
            .filter_map(|status| status.region())
            .map(str::to_string)
            .collect();

        Ok(Some(RemoteState {
            arn: output.arn().unwrap_or(name).to_string(),
            tags,
            replica_regions,
            deleted_at: output.deleted_date().and_then(to_chrono),
            last_changed_at: output.last_changed_date().and_then(to_chrono),
        }))
    }

    fn get_value(&self, name: &str) -> Result<String> {
        trace!(name, "fetching secret value");

        let output = self
            .runtime
            .block_on(self.client.get_secret_value().secret_id(name).send())
            .map_err(|e| transport("GetSecretValue", name, e))?;

        output
            .secret_string()
            .map(str::to_string)
            .ok_or_else(|| ContractError::BinaryValue(name.to_string()).into())
    }

    fn create(&self, secret: &NewSecret<'_>) -> Result<Written> {
        debug!(
            name = secret.name,
            replicas = secret.replica_regions.len(),
            "creating secret"
        );

        let mut request = self
            .client
            .create_secret()
            .name(secret.name)
            .description(secret.description)
            .secret_string(secret.value)
            .set_tags(Some(to_aws_tags(secret.tags)));

        if !secret.replica_regions.is_empty() {
            request = request
                .set_add_replica_regions(Some(to_replica_regions(secret.replica_regions)));
        }

        let output = self
            .runtime
            .block_on(request.send())
            .map_err(|e| transport("CreateSecret", secret.name, e))?;

        Ok(Written {
            arn: output.arn().map(str::to_string),
            version_id: output.version_id().map(str::to_string),
        })
    }

    fn put_value(&self, name: &str, value: &str) -> Result<Written> {
        debug!(name, "putting secret value");

        let output = self
            .runtime
            .block_on(
                self.client
                    .put_secret_value()
                    .secret_id(name)
                    .secret_string(value)
                    .send(),
            )
            .map_err(|e| transport("PutSecretValue", name, e))?;

        Ok(Written {
            arn: output.arn().map(str::to_string),
            version_id: output.version_id().map(str::to_string),
        })
    }

    fn restore(&self, name: &str) -> Result<()> {
        debug!(name, "restoring secret");

        self.runtime
            .block_on(self.client.restore_secret().secret_id(name).send())
            .map_err(|e| transport("RestoreSecret", name, e))?;
        Ok(())
    }

    fn add_replica_regions(&self, name: &str, regions: &[Region]) -> Result<()> {
        debug!(name, ?regions, "adding replica regions");

        self.runtime
            .block_on(
                self.client
                    .replicate_secret_to_regions()
                    .secret_id(name)
                    .set_add_replica_regions(Some(to_replica_regions(regions)))
                    .send(),
            )
            .map_err(|e| transport("ReplicateSecretToRegions", name, e))?;
        Ok(())
    }

    fn remove_replica_regions(&self, name: &str, regions: &[Region]) -> Result<()> {
        debug!(name, ?regions, "removing replica regions");

        self.runtime
            .block_on(
                self.client
                    .remove_regions_from_replication()
                    .secret_id(name)
                    .set_remove_replica_regions(Some(regions.to_vec()))
                    .send(),
            )
            .map_err(|e| transport("RemoveRegionsFromReplication", name, e))?;
        Ok(())
    }

    fn untag(&self, secret_id: &str, keys: &[TagKey]) -> Result<()> {
        debug!(secret_id, ?keys, "removing tags");

        self.runtime
            .block_on(
                self.client
                    .untag_resource()
                    .secret_id(secret_id)
                    .set_tag_keys(Some(keys.to_vec()))
                    .send(),
            )
            .map_err(|e| transport("UntagResource", secret_id, e))?;
        Ok(())
    }

    fn tag(&self, secret_id: &str, tags: &[Tag]) -> Result<()> {
        debug!(secret_id, count = tags.len(), "storing tags");

        self.runtime
            .block_on(
                self.client
                    .tag_resource()
                    .secret_id(secret_id)
                    .set_tags(Some(to_aws_tags(tags)))
                    .send(),
            )
            .map_err(|e| transport("TagResource", secret_id, e))?;
        Ok(())
    }
}

/// Caller identity via STS `GetCallerIdentity`.
pub struct StsIdentity {
    client: aws_sdk_sts::Client,
    runtime: Arc<Runtime>,
}

impl fmt::Debug for StsIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StsIdentity").finish_non_exhaustive()
    }
}

impl Identity for StsIdentity {
    fn account_id(&self) -> Result<AccountId> {
        let output = self
            .runtime
            .block_on(self.client.get_caller_identity().send())
            .map_err(|e| {
                StoreError::Identity(aws_sdk_sts::error::DisplayErrorContext(e).to_string())
            })?;

        let account = output.account().ok_or(ContractError::MissingAccount)?;
        debug!(account, "resolved caller identity");
        Ok(account.to_string())
    }
}
