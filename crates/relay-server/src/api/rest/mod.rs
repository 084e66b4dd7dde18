//! REST API implementation
//!
//! - types: Request/response type definitions
//! - extractors: JSON extractor mapping parse failures to route errors
//! - handlers: relay endpoint handlers
//! - router: Router creation and CORS configuration
//! - tests: Unit tests for request mapping

mod extractors;
mod handlers;
mod router;
pub mod types;

// Re-export public API
pub use extractors::JsonExtractor;
pub use router::create_router;
pub use types::{
    AnalysisRequest, AnalysisResponse, AppState, HealthResponse, MarketDataRequest,
    TradeAction, TradeRequest,
};
