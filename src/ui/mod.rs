//! Headless interaction controller for the portfolio page: mobile menu,
//! active-section highlighting, header visibility, slide carousel, lightbox
//! gallery and deep links.

pub mod carousel;
pub mod controller;
pub mod deep_link;
pub mod driver;
pub mod event;
pub mod header;
pub mod lightbox;
pub mod nav;

pub use carousel::SlideLink;
pub use controller::{InteractionController, ViewState};
pub use driver::Surface;
pub use event::{Effect, UiEvent};
