//! In-memory store of integer-identified emotions and their strengths.
//!
//! Each emotion holds a single `f32` strength. Emotions can be paired with
//! directed, weighted relations: updating a source emotion by `delta` also
//! nudges every directly paired target by `delta * ratio`. Propagation stops
//! after one hop.
//!
//! # Example
//!
//! ```
//! use emotion_store::EmotionStore;
//!
//! let mut store = EmotionStore::new();
//! store.register_emotion(1);
//! store.register_emotion(2);
//! store.pair(1, 2, -0.75).unwrap();
//! store.update_value(1, 0.2).unwrap();
//!
//! assert!((store.value_for_emotion(1) - 0.7).abs() < 1e-6);
//! assert!((store.value_for_emotion(2) - 0.35).abs() < 1e-6);
//! ```
//!
//! # Modules
//!
//! - [`store`]: The [`EmotionStore`] and its operations
//! - [`record`]: Individual emotion records
//! - [`relations`]: Central directed-edge map between records
//! - [`config`]: TOML-backed store configuration
//! - [`error`]: Store and configuration errors

pub mod config;
pub mod error;
pub mod id;
pub mod record;
pub mod relations;
pub mod store;

pub use config::{default_config_toml, ReregisterPolicy, StoreConfig, DEFAULT_EMOTION_VALUE};
pub use error::{ConfigError, StoreError};
pub use id::{EmotionId, EmotionKey};
pub use record::Emotion;
pub use relations::RelationGraph;
pub use store::EmotionStore;
