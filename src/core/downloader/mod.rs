mod client;
mod ensure;
mod verify;

pub use client::{Downloader, FileFetcher};
pub use ensure::{ensure_verified_file, EnsureOutcome};
pub use verify::{matches_identifiers, FileIdentifiers};

#[cfg(test)]
pub(crate) use ensure::tests::{identifiers_for, FakeFetcher};
