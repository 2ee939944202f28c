// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use std::sync::OnceLock;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

const REQUESTS_PER_SECOND: u64 = 20;
const BURST_SIZE: u32 = 40;

/// Per-client-IP limiter shared by every router instance in the process.
/// Returns `None` if the limiter configuration is rejected.
pub fn rate_limit_layer() -> Option<GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>> {
    static RATE_LIMITER: OnceLock<
        Option<GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>>,
    > = OnceLock::new();

    RATE_LIMITER
        .get_or_init(|| {
            let mut builder = GovernorConfigBuilder::default();
            builder.per_second(REQUESTS_PER_SECOND);
            builder.burst_size(BURST_SIZE);
            builder
                .key_extractor(SmartIpKeyExtractor)
                .finish()
                .map(GovernorLayer::new)
        })
        .clone()
}
