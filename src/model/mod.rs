//! Stored documents and their request/response projections.
//!
//! A `UserDocument` is the aggregate root: hubs, plants, readings and attribute
//! entries live inline inside it and are only ever written by replacing the
//! whole document.

pub mod attribute;
pub mod hub;
pub mod plant;
pub mod sensor;
pub mod user;

pub use attribute::{AttributeEntry, AttributeInput, ImageOfTheDay};
pub use hub::{summarize, CreateHub, Hub, HubInput, HubSummary, HubView, PlaceError, PlantSummary, Slot};
pub use plant::{find_plant, find_plant_mut, Plant, PlantInput};
pub use sensor::{SensorInput, SensorReading};
pub use user::{AssembleError, CreateUser, LoginRequest, RenameUser, UserDocument, UserView};

/// The most recent entry of an append-only history.
///
/// Entries are appended in arrival order, so the last element is the latest one.
pub fn latest<T>(entries: &[T]) -> Option<&T> {
    entries.last()
}
