use std::sync::Arc;

use meridian_providers::{
    HttpRoadSnapper, HttpSpeedLimitLookup, NominatimPlaceResolver, OrsRoutePlanner,
    ProviderConfig,
};
use meridian_routing::{AggregatorConfig, CacheConfig, ResultCache, RouteAggregator};

use crate::config::ApiConfig;

pub type HttpRouteAggregator =
    RouteAggregator<OrsRoutePlanner, HttpRoadSnapper, HttpSpeedLimitLookup>;

pub struct AppState {
    pub aggregator: HttpRouteAggregator,
    pub places: NominatimPlaceResolver,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(
        providers: &ProviderConfig,
        cache: CacheConfig,
        aggregator: AggregatorConfig,
        config: ApiConfig,
    ) -> anyhow::Result<Self> {
        let aggregator = RouteAggregator::new(
            OrsRoutePlanner::new(providers)?,
            HttpRoadSnapper::new(providers)?,
            HttpSpeedLimitLookup::new(providers)?,
            Arc::new(ResultCache::new(cache)),
            aggregator,
        );

        Ok(Self {
            aggregator,
            places: NominatimPlaceResolver::new(providers)?,
            config,
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(
            &ProviderConfig::from_env()?,
            CacheConfig::from_env()?,
            AggregatorConfig::from_env()?,
            ApiConfig::from_env()?,
        )
    }
}
