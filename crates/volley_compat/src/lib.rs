//! # Volley Compat
//!
//! Reaches host-runtime internals whose names drift between releases.
//!
//! ```text
//! ItemTags / PacketAssembler
//!          │ key = (owner type, attribute)
//!          ▼
//! CompatibilityAccessor ──first call──▶ StrategyChain attempts
//!          │                                   │
//!          └──────────── cached Binding ◀──────┘
//! ```
//!
//! A binding that cannot be resolved is not an error for the caller: the
//! feature it backs turns into a no-op and the rest of the layer keeps
//! working.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod accessor;
pub mod error;
pub mod item;
pub mod mock;
pub mod packets;
pub mod strategy;

pub use accessor::{Binding, CompatibilityAccessor};
pub use error::{CompatError, CompatResult};
pub use item::{ItemRuntime, ItemTags, TagField, TagReader, TagWriter};
pub use mock::{MockItem, MockItemRuntime, MockPacket, MockPacketRuntime};
pub use packets::{constructor_names, PacketAssembler, PacketEncoder, PacketRuntime};
pub use strategy::{AttributeKey, Strategy, StrategyChain, StrategyKind};
