//! Asset URL resolution port.

use async_trait::async_trait;

use crate::domain::conversion::AssetUrlMap;
use crate::domain::foundation::DomainError;
use crate::domain::message::Message;

/// Pre-resolves the asset keys referenced by a message batch into
/// time-limited public URLs.
///
/// The conversion core never performs resolution itself; it only consumes
/// the returned map. Keys that cannot be resolved are simply absent from
/// the map, which the converter treats as a soft degrade.
#[async_trait]
pub trait AssetUrlResolver: Send + Sync {
    async fn resolve(&self, messages: &[Message]) -> Result<AssetUrlMap, DomainError>;
}

/// Resolver that never resolves anything, for deployments without blob
/// storage.
#[derive(Debug, Clone, Default)]
pub struct NoopAssetUrlResolver;

#[async_trait]
impl AssetUrlResolver for NoopAssetUrlResolver {
    async fn resolve(&self, _messages: &[Message]) -> Result<AssetUrlMap, DomainError> {
        Ok(AssetUrlMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_url_resolver_is_object_safe() {
        fn _accepts_dyn(_resolver: &dyn AssetUrlResolver) {}
    }

    #[tokio::test]
    async fn noop_resolver_returns_empty_map() {
        let map = NoopAssetUrlResolver.resolve(&[]).await.unwrap();
        assert!(map.is_empty());
    }
}
