pub mod installer;
pub mod ladder;
pub mod selector;
pub mod update;

pub use installer::{CleanupFailure, InstallOutcome, ModInstaller};
pub use ladder::{Attempt, SearchLadder, Step};
pub use selector::{select_build, NotFound, StabilityMode};
pub use update::{update_mod, ModStatus, ModUpdate, UpdateTarget};
