pub mod ids;
pub mod node;

pub use ids::*;
pub use node::*;
