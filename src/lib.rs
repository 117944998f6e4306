//! # Parameter Panel Engine
//!
//! This crate builds the editable *presentation model* for a device's
//! tunable numeric parameters, driven entirely by an external metadata
//! catalogue rather than hard-coded UI definitions. Given a live value store
//! and a catalogue describing display names, operating modes, units, legal
//! ranges, step sizes and enumerated values, it produces a sorted, filtered,
//! unit-scaled list of per-parameter descriptors ready for rendering — and
//! later reconciles user edits back into the store with per-field error
//! isolation. Rendering itself (controls, theming, window plumbing) is a
//! consumer of this crate, not part of it.
//!
//! ## Crate Structure
//!
//! The library is organized into several modules, each with a distinct
//! responsibility:
//!
//! - **`store`**: The `ParameterStore` trait — authoritative owner of current
//!   values — plus the in-process `MemoryStore` with synchronous change
//!   notification.
//! - **`metadata`**: The `MetadataCatalogue` trait and its attribute keys,
//!   with in-memory and TOML-file-backed implementations.
//! - **`link`**: The `ParameterLink` collaborator that repopulates the store
//!   on request; may be unavailable without being fatal.
//! - **`select`**: Filter/sort stage choosing which parameters a requested
//!   operating mode shows, ordered by display name.
//! - **`classify`**: Classifier/scaler stage deciding between ranged and
//!   enumerated controls, applying unit display scaling and formatting
//!   description text.
//! - **`descriptor`**: The presentation model types handed to the rendering
//!   surface.
//! - **`commit`**: Error-isolated write-back of edited display values.
//! - **`panel`**: The `ParameterPanel` engine tying the stages together
//!   through the refresh/activation lifecycle.
//! - **`validation`**: Tolerant numeric parsing and display formatting
//!   helpers.
//! - **`config`**: Settings for the CLI frontend.
//! - **`error`**: The crate-wide `PanelError` type.

pub mod classify;
pub mod commit;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod link;
pub mod metadata;
pub mod panel;
pub mod select;
pub mod store;
pub mod validation;
