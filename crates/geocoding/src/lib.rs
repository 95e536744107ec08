//! Address lookup: free text in, ranked candidate coordinates out.
//!
//! Providers only know how to build a request and parse a response body; the
//! transport is separate so the same providers run over reqwest natively and
//! over `fetch` in the browser.

pub mod address;
pub mod candidate;
pub mod error;
pub mod google;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;
pub mod nominatim;
pub mod provider;
pub mod resolver;

pub use address::*;
pub use candidate::*;
pub use error::*;
pub use google::*;
#[cfg(not(target_arch = "wasm32"))]
pub use http::*;
pub use nominatim::*;
pub use provider::*;
pub use resolver::*;
