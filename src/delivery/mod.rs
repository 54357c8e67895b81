//! Hand-off of a finished estimate request.
//!
//! Nothing is actually sent. A `Dispatcher` receives the captured request
//! (the default one logs it), and `compose_draft` turns the same data into
//! an email the customer can send from their own client.

pub mod dispatch;
pub mod draft;

pub use dispatch::{Dispatcher, EstimateRequest, LogDispatcher};
pub use draft::compose_draft;
