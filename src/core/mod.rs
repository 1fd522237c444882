/// Core functionality modules
///
/// The command pipeline: response types, conversation memory, the rule
/// table, the fallback chain, and the router that ties them together.

pub mod collaborators;
pub mod fallback;
pub mod memory;
pub mod response;
pub mod router;
pub mod rules;

pub use collaborators::{
    Automation, Launcher, MemoryStore, OrganizeReport, WeatherReport, WeatherSource,
};
pub use memory::{ConversationMemory, ConversationTurn, Role};
pub use response::{Response, Source, Status};
pub use router::{Collaborators, Router};
pub use rules::Rule;
