pub mod credentials;
pub mod ids;

pub use credentials::*;
pub use ids::*;
