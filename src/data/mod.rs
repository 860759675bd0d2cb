//! Data layer: shot events, loading, and filtering.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  keep "Shot" rows, parse locations → ShotDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌─────────────┐
//!   │ ShotDataset  │  Vec<ShotEvent>, team / player index
//!   └─────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  team / player equality → filtered indices
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod location;
pub mod model;
