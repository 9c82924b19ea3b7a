pub mod assistant;
pub mod characters;
pub mod diagnostics;
pub mod documents;
pub mod health;
pub mod locations;
pub mod timeline;

pub use assistant::*;
pub use characters::*;
pub use diagnostics::*;
pub use documents::*;
pub use health::*;
pub use locations::*;
pub use timeline::*;
