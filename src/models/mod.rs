mod exception_response;
mod record;
mod state;

pub use exception_response::{ExceptionMessage, ExceptionResponse, status_name};
pub use record::{NewRecord, Record};
pub use state::AppState;
