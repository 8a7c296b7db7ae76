//! # Mock Host Runtimes
//!
//! In-memory stand-ins for a host runtime. Each one is configured with the
//! members a particular release exposes, so tests can reproduce any mix of
//! field access, current names and legacy names.

use std::collections::HashSet;
use std::sync::Arc;

use volley_shared::{ClientboundPacket, CompoundTag, PacketKind};

use crate::item::{ItemRuntime, TagField, TagReader, TagWriter};
use crate::packets::{constructor_names, PacketEncoder, PacketRuntime};

/// Item stack with an optional compound tag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MockItem {
    /// Stored tag
    pub tag: Option<CompoundTag>,
}

/// Mock item runtime.
#[derive(Clone, Debug, Default)]
pub struct MockItemRuntime {
    field: bool,
    methods: HashSet<String>,
}

impl MockItemRuntime {
    /// A release whose tag field can be opened directly.
    #[must_use]
    pub fn with_field() -> Self {
        Self { field: true, methods: HashSet::new() }
    }

    /// A release with a sealed field and the given method names.
    #[must_use]
    pub fn with_methods(methods: &[&str]) -> Self {
        Self {
            field: false,
            methods: methods.iter().map(|&m| m.to_owned()).collect(),
        }
    }
}

fn read_tag() -> TagReader<MockItem> {
    Arc::new(|item: &MockItem| item.tag.clone())
}

fn write_tag() -> TagWriter<MockItem> {
    Arc::new(|item: &mut MockItem, tag: CompoundTag| item.tag = Some(tag))
}

impl ItemRuntime for MockItemRuntime {
    type Item = MockItem;

    fn tag_field(&self) -> Option<TagField<MockItem>> {
        self.field.then(|| TagField { read: read_tag(), write: write_tag() })
    }

    fn tag_reader(&self, name: &str) -> Option<TagReader<MockItem>> {
        match name {
            "getTag" | "getOrCreateTag" if self.methods.contains(name) => Some(read_tag()),
            _ => None,
        }
    }

    fn tag_writer(&self, name: &str) -> Option<TagWriter<MockItem>> {
        (name == "setTag" && self.methods.contains(name)).then(write_tag)
    }
}

/// Host packet produced by [`MockPacketRuntime`]: the constructor that built
/// it plus the fields it was built from.
#[derive(Clone, Debug, PartialEq)]
pub struct MockPacket {
    /// Constructor class name
    pub constructor: String,
    /// Source fields
    pub packet: ClientboundPacket,
}

/// Mock packet runtime.
#[derive(Clone, Debug, Default)]
pub struct MockPacketRuntime {
    constructors: HashSet<String>,
}

const KINDS: [PacketKind; 3] =
    [PacketKind::BlockDestruction, PacketKind::ContainerSetSlot, PacketKind::LookAt];

impl MockPacketRuntime {
    /// A release with only the given constructors.
    #[must_use]
    pub fn with_constructors(names: &[&str]) -> Self {
        Self {
            constructors: names.iter().map(|&n| n.to_owned()).collect(),
        }
    }

    /// A current release: every current constructor name.
    #[must_use]
    pub fn modern() -> Self {
        Self {
            constructors: KINDS.iter().map(|&k| constructor_names(k).0.to_owned()).collect(),
        }
    }

    /// An old release: every legacy constructor name.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            constructors: KINDS.iter().map(|&k| constructor_names(k).1.to_owned()).collect(),
        }
    }
}

impl PacketRuntime for MockPacketRuntime {
    type Packet = MockPacket;

    fn packet_constructor(&self, name: &str) -> Option<PacketEncoder<MockPacket>> {
        if !self.constructors.contains(name) {
            return None;
        }
        let constructor = name.to_owned();
        Some(Arc::new(move |packet: &ClientboundPacket| {
            let (current, legacy) = constructor_names(packet.kind());
            // A constructor only accepts its own packet kind.
            (constructor == current || constructor == legacy).then(|| MockPacket {
                constructor: constructor.clone(),
                packet: packet.clone(),
            })
        }))
    }
}
