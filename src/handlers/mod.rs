// handlers/mod.rs - HTTP handlers
//
// features/   POST, GET /features and DELETE /features/:id
// stats.rs    GET /stats
// dashboard.rs GET /dashboard (HTML)
// system.rs   GET / and GET /health

pub mod dashboard;
pub mod features;
pub mod stats;
pub mod system;
