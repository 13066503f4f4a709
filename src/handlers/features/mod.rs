pub mod create;
pub mod delete;
pub mod list;

// Re-export handler functions for use in routing
pub use create::post as features_post;
pub use delete::delete as feature_delete;
pub use list::get as features_get;
