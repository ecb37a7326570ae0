// ─── Mod Updater Core ───
// Keeps the mods folder of Minecraft client/server installations in sync
// with their hosting site.
//
// Architecture:
//   core/
//     config/     : Installation entries + JSON loading
//     version/    : Mojang manifest, latest-version resolver, downstep
//     modrinth/   : Project version listing
//     mods/       : Build selection, fallback ladder, install + cleanup
//     downloader/ : Streaming downloads with size/SHA verification
//     maven/      : Artifact coordinates + maven-metadata.xml
//     loaders/    : Fabric installer + dedicated server jar
//     java/       : Java binary lookup
//     report/     : Severity levels + run summary
//     state/      : Shared clients and endpoints for one run

pub mod config;
pub mod downloader;
pub mod error;
pub mod http;
pub mod java;
pub mod loaders;
pub mod maven;
pub mod modrinth;
pub mod mods;
pub mod report;
pub mod state;
pub mod version;
