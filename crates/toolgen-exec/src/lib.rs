pub mod contracts;
pub mod download;
pub mod error;
pub mod transport;
pub mod worker;

pub use contracts::*;
pub use download::*;
pub use error::*;
pub use transport::*;
pub use worker::*;
