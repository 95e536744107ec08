//! Three-step address-to-massing wizard.
//!
//! [`WizardController`] owns all session state, the scene host and the lot
//! estimator. Front-ends feed it user actions and render [`WizardView`].

pub mod config;
pub mod controller;
pub mod error;
pub mod map_view;
pub mod notice;
pub mod step;
pub mod view;

pub use config::*;
pub use controller::*;
pub use error::*;
pub use map_view::*;
pub use notice::*;
pub use step::*;
pub use view::*;
