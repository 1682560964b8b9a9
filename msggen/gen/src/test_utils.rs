//! Shared test fixtures for msggen-gen tests.

use msggen_model::{ArrayField, CompositeField, EnumField, Method, PrimitiveField, Service};

/// Path of the overridden `cause` enum in [`make_listpeers_example`].
pub const CAUSE_PATH: &str = "ListPeers.peers[].channels[].state_changes[].cause";

/// The `ChannelState` enum with a reserved slot at index 2.
pub fn channel_state_enum(path: &str) -> EnumField {
    EnumField::new(
        path,
        "state",
        "ChannelState",
        [Some("OPENING"), Some("CHANNELD_NORMAL"), None, Some("CLOSED")],
    )
}

/// `ListPeers` response: `peers[]` -> `channels[]` -> `state_changes[]`,
/// where `state_changes[].cause` is an enum.
pub fn make_listpeers_example() -> CompositeField {
    let peers = "ListPeers.peers[]";
    let channels = "ListPeers.peers[].channels[]";
    let state_changes = "ListPeers.peers[].channels[].state_changes[]";

    let state_change = CompositeField::new(state_changes, "state_changes", "state_changes")
        .with_field(PrimitiveField::new(
            format!("{state_changes}.timestamp"),
            "timestamp",
            "string",
        ))
        .with_field(EnumField::new(
            CAUSE_PATH,
            "cause",
            "state_changes_cause",
            [Some("unknown"), Some("local"), Some("remote")],
        ));

    let channel = CompositeField::new(channels, "channels", "channels_item")
        .with_field(
            PrimitiveField::new(
                format!("{channels}.short-channel-id"),
                "short-channel-id",
                "short_channel_id",
            )
            .optional(),
        )
        .with_field(ArrayField::new(state_changes, "state_changes", state_change).optional());

    let peer = CompositeField::new(peers, "peers", "peers_item")
        .with_field(PrimitiveField::new(format!("{peers}.id"), "id", "pubkey"))
        .with_field(ArrayField::new(channels, "channels", channel));

    CompositeField::new("ListPeers", "ListPeers", "ListPeers")
        .with_field(ArrayField::new(peers, "peers", peer))
}

/// A method whose request has one optional field and whose response wraps
/// a single primitive.
pub fn make_method(name: &str) -> Method {
    let request = CompositeField::new(name, name, format!("{name}Request")).with_field(
        PrimitiveField::new(format!("{name}.id"), "id", "pubkey").optional(),
    );
    let response = CompositeField::new(name, name, format!("{name}Response"))
        .with_field(PrimitiveField::new(format!("{name}.value"), "value", "number"));
    Method::new(name, request, response)
}

/// A service with the given method names, in order.
pub fn make_service(names: &[&str]) -> Service {
    Service::new(names.iter().map(|n| make_method(n)).collect())
}
