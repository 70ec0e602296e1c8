pub mod history;
pub mod price;
pub mod snapshot;

pub use history::*;
pub use price::*;
pub use snapshot::*;
