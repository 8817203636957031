//! Per-client rate limiting using the token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

type IpGovernorLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

fn build(per_second: u64, burst_size: u32) -> IpGovernorLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .expect("rate limit period and burst size are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Rate limiter for the public brewer list and login screens.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`. Keys are
/// the socket peer address, so the server must be started with connect info.
pub fn layer() -> IpGovernorLayer {
    build(2, 100)
}

/// Stricter rate limiter for admin screens and the JSON API.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 20 requests
pub fn secure_layer() -> IpGovernorLayer {
    build(1, 20)
}
