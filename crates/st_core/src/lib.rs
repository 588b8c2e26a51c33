pub mod error;
pub mod limits;
pub mod models;
pub mod text;
pub mod types;

pub use error::{Error, Result};
pub use models::SummaryModel;
pub use types::{InputText, Summary};
