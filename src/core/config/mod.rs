pub mod loader;
pub mod model;

pub use loader::{load_installations, parse_installations};
pub use model::{EnableMode, HostingSite, Installation, LoaderType, ModReference, Side};
