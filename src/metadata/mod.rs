pub use error::*;

mod error;

use smallvec::{smallvec, SmallVec};
use tracing::warn;

use crate::metric::{Dimension, DimensionSet};

/// Dimension name carrying the identity of this host
pub const INSTANCE_ID_DIMENSION: &str = "InstanceId";

/// Dimension name carrying the deployment group this host belongs to
pub const GROUP_NAME_DIMENSION: &str = "AutoScalingGroupName";

/// Source of deployment identity used to label outgoing metrics
///
/// Resolved once at construction time; the emitter never consults it again.
#[trait_variant::make(Send)]
pub trait MetadataResolver {
    async fn instance_id(&self) -> Option<String>;

    async fn group_name(&self, instance_id: &str) -> Result<Option<String>, MetadataError>;
}

/// Resolves the dimension sets an aggregator publishes under
///
/// A missing instance id is fatal, as metrics without a primary identity are
/// meaningless. A missing or unresolvable deployment group degrades to
/// publishing under the instance dimension only.
pub async fn resolve_dimensions<R>(
    resolver: &R,
) -> Result<SmallVec<[DimensionSet; 2]>, MetadataError>
where
    R: MetadataResolver,
{
    let instance_id = resolver
        .instance_id()
        .await
        .ok_or(MetadataError::MissingInstanceId)?;

    let mut dimension_sets: SmallVec<[DimensionSet; 2]> =
        smallvec![smallvec![Dimension::new(INSTANCE_ID_DIMENSION, &instance_id)]];

    match resolver.group_name(&instance_id).await {
        Ok(Some(group_name)) => dimension_sets.push(smallvec![Dimension::new(
            GROUP_NAME_DIMENSION,
            group_name
        )]),
        Ok(None) => warn!(
            instance_id = %instance_id,
            "no deployment group found, statistics will only be published under the instance dimension"
        ),
        Err(error) => warn!(
            instance_id = %instance_id,
            error = %error,
            "deployment group lookup failed, statistics will only be published under the instance dimension"
        ),
    }

    Ok(dimension_sets)
}
