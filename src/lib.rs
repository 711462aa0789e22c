pub mod component;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod logging;

pub use component::Component;
pub use config::{DispatchConfig, TargetConfig};
pub use dispatch::{Dispatcher, Target};
pub use error::{DispatchError, Result};
