// Coordinators layer - Workflow orchestration
//
// Each coordinator owns the unit of work for its API surface: it opens a
// transaction, threads it through store calls and commits. An early return
// drops the transaction uncommitted, which rolls it back.

pub mod auth_coordinator;
pub mod cocktail_coordinator;
pub mod review_coordinator;
pub mod user_coordinator;

pub use auth_coordinator::AuthCoordinator;
pub use cocktail_coordinator::CocktailCoordinator;
pub use review_coordinator::ReviewCoordinator;
pub use user_coordinator::UserCoordinator;
