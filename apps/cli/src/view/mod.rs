// Terminal face of the workflow: explicit screen state plus the renderers
// that turn it into text. Session logic mutates the model; only main.rs and
// cards.rs ever produce output.

pub mod cards;
pub mod model;

pub use model::{ApplyButton, Modal, Panels};
