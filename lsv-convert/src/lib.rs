//! Logstash to Vector pipeline migration.
//!
//! This library turns Logstash `.conf` pipelines, parsed by
//! `logstash-conf-core`, into Vector TOML configurations. Plugins with a
//! built-in transformer become wired Vector components; everything else is
//! reported with manual-migration guidance and emitted as a commented-out
//! placeholder so nothing is silently dropped.
//!
//! # Architecture
//!
//! ## Translation
//!
//! - [`transform`]: per-plugin transformers and the [`TransformerRegistry`]
//!   - `file` and `beats` inputs
//!   - `grok`, `mutate` and `date` filters as `remap` transforms
//!   - `elasticsearch` and `file` outputs
//! - [`migrate`]: pipeline orchestration, component ids and wiring
//! - [`vector`]: target component model
//! - [`guidance`]: guidance table for unsupported plugins
//!
//! ## Output
//!
//! - [`toml_writer`]: Vector TOML rendering
//! - [`migration_report`]: per-file and aggregate report values
//! - [`markdown`]: Markdown migration reports
//! - [`report`]: colored terminal output
//!
//! ## Files and tooling
//!
//! - [`directory`]: directory-wide migration driver
//! - [`discover`]: `.conf` discovery
//! - [`output_guard`]: overwrite protection
//! - [`validator`]: `vector validate` runner
//! - [`diff`]: plugin to component mapping for the `diff` command
//!
//! # Examples
//!
//! ```ignore
//! use lsv_convert::guidance::default_guidance;
//! use lsv_convert::migrate::migrate_file;
//! use lsv_convert::toml_writer::render_toml;
//! use lsv_convert::transform::TransformerRegistry;
//!
//! let registry = TransformerRegistry::with_builtin();
//! let outcome = migrate_file(
//!     "pipeline.conf".as_ref(),
//!     "pipeline.toml".as_ref(),
//!     &registry,
//!     &default_guidance(),
//! );
//! if let Some(config) = &outcome.config {
//!     println!("{}", render_toml(config, "pipeline.conf".as_ref(), &outcome.placeholders));
//! }
//! ```

pub mod diff;
pub mod directory;
pub mod discover;
pub mod guidance;
pub mod markdown;
pub mod migrate;
pub mod migration_report;
pub mod output_guard;
pub mod report;
pub mod toml_writer;
pub mod transform;
pub mod validator;
pub mod vector;

pub use transform::TransformerRegistry;
