//! Role system: role definitions, teams, and the setup registry.
//!
//! ## Key Types
//!
//! - `Role`: Tagged enum of every dealable role
//! - `Team`: Werewolf team or Good team, derived from the role
//! - `RoleInfo`: Static ability and win-condition text
//! - `RoleRegistry`: Catalog lookup and standard setups per player count
//! - `Persona`: Built-in character names and speaking styles

pub mod definition;
pub mod registry;

pub use definition::{Role, RoleInfo, Team};
pub use registry::{Persona, RoleRegistry, DEFAULT_TEMPERAMENT};
