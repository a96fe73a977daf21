pub mod actions;
pub mod config;
pub mod error;
pub mod form;
pub mod pipeline;
pub mod reducer;
pub mod schema;
pub mod state;
pub mod tool_spec;

pub use actions::*;
pub use error::*;
pub use reducer::*;
pub use state::*;
pub use tool_spec::*;
