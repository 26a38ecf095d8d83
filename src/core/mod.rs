pub mod codec;
pub mod export;
pub mod store;

pub use crate::domain::model::{Duration, RaceRecord, RaceResult, Standing};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
