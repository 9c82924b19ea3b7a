pub mod assistant;
pub mod character;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod health;
pub mod location;
pub mod messages;
pub mod suggestion;
pub mod timeline;

pub use assistant::*;
pub use character::*;
pub use diagnostics::*;
pub use document::*;
pub use error::*;
pub use health::*;
pub use location::*;
pub use messages::*;
pub use suggestion::*;
pub use timeline::*;
