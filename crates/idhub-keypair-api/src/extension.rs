//! # Key-Pair Management API Extension
//!
//! Wires the key-pair management surface into the hub at startup:
//! registers the ownership lookup for key-pair resources with the
//! authorization service, then registers the two REST controllers into the
//! configured management context. All real logic lives in the injected
//! services — this module is composition only.

use std::sync::Arc;

use idhub_core::{
    Criterion, KeyPairResource, KeyPairService, ParticipantResource, QuerySpec, ServiceError,
    ServiceResult,
};

use crate::authorization::AuthorizationService;
use crate::config::ManagementApiConfig;
use crate::routes::all_key_pairs::{self, AllKeyPairsApiState};
use crate::routes::key_pairs::{self, KeyPairApiState};
use crate::validation::KeyDescriptorValidator;
use crate::web::WebService;

/// The key-pair management API extension.
///
/// Constructed once with its collaborator handles and initialized once
/// during startup; there is no runtime reconfiguration path.
pub struct KeyPairManagementApiExtension {
    config: ManagementApiConfig,
    key_pairs: Arc<dyn KeyPairService>,
    authorization: Arc<AuthorizationService>,
}

impl KeyPairManagementApiExtension {
    /// Extension name, for startup logging.
    pub const NAME: &'static str = "KeyPairResource Management API";

    /// Create the extension with its injected services.
    pub fn new(
        config: ManagementApiConfig,
        key_pairs: Arc<dyn KeyPairService>,
        authorization: Arc<AuthorizationService>,
    ) -> Self {
        Self {
            config,
            key_pairs,
            authorization,
        }
    }

    /// Wire the extension into the hub.
    ///
    /// Registers the key-pair ownership lookup, then both controllers under
    /// the configured context alias.
    pub fn initialize(&self, web: &mut WebService) {
        let service = Arc::clone(&self.key_pairs);
        self.authorization
            .register_lookup::<KeyPairResource>(Arc::new(move |key_pair_id| {
                find_by_id(service.as_ref(), key_pair_id)
            }));

        let api = key_pairs::router(KeyPairApiState {
            authorization: Arc::clone(&self.authorization),
            key_pairs: Arc::clone(&self.key_pairs),
            validator: Arc::new(KeyDescriptorValidator::new()),
        });
        let get_all = all_key_pairs::router(AllKeyPairsApiState {
            key_pairs: Arc::clone(&self.key_pairs),
        });

        let alias = self.config.context_alias();
        web.register_resource(alias, api);
        web.register_resource(alias, get_all);

        tracing::info!(extension = Self::NAME, context = alias, "initialized");
    }
}

/// Resolve a key-pair id to its resource.
///
/// Builds an id-equality query and takes the first match. A miss is
/// `Ok(None)`; a failed query execution is wrapped into a fault that
/// preserves the underlying failure detail.
fn find_by_id(
    service: &dyn KeyPairService,
    key_pair_id: &str,
) -> ServiceResult<Option<Box<dyn ParticipantResource>>> {
    let query = QuerySpec::builder()
        .filter(Criterion::equal("id", key_pair_id))
        .build();

    let matches = service
        .query(&query)
        .map_err(|failure| ServiceError::internal(failure.failure_detail()))?;

    Ok(matches
        .into_iter()
        .next()
        .map(|resource| Box::new(resource) as Box<dyn ParticipantResource>))
}
