//! A subset of the lightning node JSON-RPC interface.
//!
//! Covers `Getinfo`, `ListPeers`, `ListFunds` and `ListTransactions`. The
//! paths here are the ones the default override table in `msggen-gen` is
//! keyed on (channel state enums, channel sides, forward-compatible
//! transaction type tags).

use crate::field::{ArrayField, CompositeField, EnumField, Field, PrimitiveField};
use crate::service::{Method, Service};

/// Channel states as reported by `listpeers`/`listfunds`.
const CHANNEL_STATES: [&str; 11] = [
    "OPENINGD",
    "CHANNELD_AWAITING_LOCKIN",
    "CHANNELD_NORMAL",
    "CHANNELD_SHUTTING_DOWN",
    "CLOSINGD_SIGEXCHANGE",
    "CLOSINGD_COMPLETE",
    "AWAITING_UNILATERAL",
    "FUNDING_SPEND_SEEN",
    "ONCHAIN",
    "DUALOPEND_OPEN_INIT",
    "DUALOPEND_AWAITING_LOCKIN",
];

/// Builds the bundled lightning service definition.
///
/// ## Examples
///
/// ```
/// use msggen_model::services::lightning::define_lightning_service;
///
/// let service = define_lightning_service();
/// let names: Vec<_> = service.methods.iter().map(|m| m.name.as_str()).collect();
/// assert_eq!(names, ["Getinfo", "ListPeers", "ListFunds", "ListTransactions"]);
/// ```
pub fn define_lightning_service() -> Service {
    Service::new(vec![
        define_getinfo(),
        define_listpeers(),
        define_listfunds(),
        define_listtransactions(),
    ])
}

fn prim(path: &str, name: &str, typename: &str) -> PrimitiveField {
    PrimitiveField::new(format!("{path}.{name}"), name, typename)
}

fn define_getinfo() -> Method {
    let p = "Getinfo";
    let address = format!("{p}.address[]");

    let request = CompositeField::new(p, p, "GetinfoRequest");

    let response = CompositeField::new(p, p, "GetinfoResponse")
        .with_field(prim(p, "id", "pubkey").with_description("The public key of this node"))
        .with_field(prim(p, "alias", "string").optional())
        .with_field(prim(p, "color", "hex"))
        .with_field(prim(p, "num_peers", "u32"))
        .with_field(prim(p, "blockheight", "u32"))
        .with_field(prim(p, "network", "string"))
        .with_field(prim(p, "fees_collected_msat", "msat"))
        .with_field(
            CompositeField::new(format!("{p}.our_features"), "our_features", "GetinfoOur_features")
                .optional()
                .with_description("Our BOLT #9 feature bits (as hexstring) for various contexts")
                .with_field(prim(&format!("{p}.our_features"), "init", "hex"))
                .with_field(prim(&format!("{p}.our_features"), "node", "hex"))
                .with_field(prim(&format!("{p}.our_features"), "channel", "hex"))
                .with_field(prim(&format!("{p}.our_features"), "invoice", "hex")),
        )
        .with_field(
            ArrayField::new(
                address.clone(),
                "address",
                CompositeField::new(address.clone(), "address", "GetinfoAddress")
                    .with_field(
                        EnumField::new(
                            format!("{address}.type"),
                            "type",
                            "GetinfoAddressType",
                            [
                                Some("dns"),
                                Some("ipv4"),
                                Some("ipv6"),
                                Some("torv2"),
                                Some("torv3"),
                                Some("websocket"),
                            ],
                        )
                        .with_description("Type of connection"),
                    )
                    .with_field(prim(&address, "port", "u16"))
                    .with_field(prim(&address, "address", "string").optional()),
            )
            .optional()
            .with_description("The addresses we announce to the world"),
        )
        .with_field(
            prim(p, "lightning-dir", "string")
                .with_description("Identifies where you can find the configuration and other related files"),
        );

    Method::new("Getinfo", request, response)
}

fn define_listpeers() -> Method {
    let p = "ListPeers";
    let peers = format!("{p}.peers[]");
    let channels = format!("{peers}.channels[]");
    let state_changes = format!("{channels}.state_changes[]");

    let request = CompositeField::new(p, p, "ListpeersRequest")
        .with_field(prim(p, "id", "pubkey").optional())
        .with_field(
            EnumField::new(
                format!("{p}.level"),
                "level",
                "ListpeersLevel",
                [Some("io"), Some("debug"), Some("info"), Some("unusual")],
            )
            .optional(),
        );

    let state_change = CompositeField::new(
        state_changes.clone(),
        "state_changes",
        "ListpeersPeersChannelsState_changes",
    )
    .with_field(prim(&state_changes, "timestamp", "string"))
    .with_field(EnumField::new(
        format!("{state_changes}.old_state"),
        "old_state",
        "ListpeersPeersChannelsState_changesOld_state",
        CHANNEL_STATES.map(Some),
    ))
    .with_field(EnumField::new(
        format!("{state_changes}.new_state"),
        "new_state",
        "ListpeersPeersChannelsState_changesNew_state",
        CHANNEL_STATES.map(Some),
    ))
    .with_field(EnumField::new(
        format!("{state_changes}.cause"),
        "cause",
        "ListpeersPeersChannelsState_changesCause",
        [
            Some("unknown"),
            Some("local"),
            Some("user"),
            Some("remote"),
            Some("protocol"),
            Some("onchain"),
        ],
    ))
    .with_field(prim(&state_changes, "message", "string"));

    let channel = CompositeField::new(channels.clone(), "channels", "ListpeersPeersChannels")
        .with_field(EnumField::new(
            format!("{channels}.state"),
            "state",
            "ListpeersPeersChannelsState",
            CHANNEL_STATES.map(Some),
        ))
        .with_field(prim(&channels, "scratch_txid", "txid").optional())
        .with_field(prim(&channels, "owner", "string").optional())
        .with_field(prim(&channels, "short_channel_id", "short_channel_id").optional())
        .with_field(prim(&channels, "channel_id", "hex").optional())
        .with_field(prim(&channels, "funding_txid", "txid").optional())
        .with_field(
            EnumField::new(
                format!("{channels}.opener"),
                "opener",
                "ListpeersPeersChannelsOpener",
                [Some("local"), Some("remote")],
            )
            .with_description("Who initiated the channel"),
        )
        .with_field(
            EnumField::new(
                format!("{channels}.closer"),
                "closer",
                "ListpeersPeersChannelsCloser",
                [Some("local"), Some("remote")],
            )
            .optional()
            .with_description("Who initiated the channel close"),
        )
        .with_field(
            ArrayField::new(
                format!("{channels}.features[]"),
                "features",
                EnumField::new(
                    format!("{channels}.features[]"),
                    "features",
                    "ListpeersPeersChannelsFeatures",
                    [Some("option_static_remotekey"), Some("option_anchor_outputs")],
                ),
            )
            .optional(),
        )
        .with_field(prim(&channels, "to_us_msat", "msat").optional())
        .with_field(prim(&channels, "feerate_per_kw", "u32").optional())
        .with_field(
            ArrayField::new(state_changes.clone(), "state_changes", state_change)
                .optional()
                .with_description("Prior state changes"),
        );

    let peer = CompositeField::new(peers.clone(), "peers", "ListpeersPeers")
        .with_field(prim(&peers, "id", "pubkey").with_description("the public key of the peer"))
        .with_field(prim(&peers, "connected", "boolean"))
        .with_field(ArrayField::new(channels, "channels", channel))
        .with_field(
            ArrayField::new(
                format!("{peers}.netaddr[]"),
                "netaddr",
                PrimitiveField::new(format!("{peers}.netaddr[]"), "netaddr", "string"),
            )
            .optional(),
        )
        .with_field(prim(&peers, "features", "hex").optional());

    let response = CompositeField::new(p, p, "ListpeersResponse")
        .with_field(ArrayField::new(peers, "peers", peer));

    Method::new("ListPeers", request, response)
}

fn define_listfunds() -> Method {
    let p = "ListFunds";
    let outputs = format!("{p}.outputs[]");
    let channels = format!("{p}.channels[]");

    let request = CompositeField::new(p, p, "ListfundsRequest")
        .with_field(prim(p, "spent", "boolean").optional());

    let output = CompositeField::new(outputs.clone(), "outputs", "ListfundsOutputs")
        .with_field(prim(&outputs, "txid", "txid"))
        .with_field(prim(&outputs, "output", "u32"))
        .with_field(prim(&outputs, "amount_msat", "msat"))
        .with_field(prim(&outputs, "scriptpubkey", "hex"))
        .with_field(prim(&outputs, "address", "string").optional())
        .with_field(prim(&outputs, "redeemscript", "hex").optional())
        .with_field(EnumField::new(
            format!("{outputs}.status"),
            "status",
            "ListfundsOutputsStatus",
            [Some("unconfirmed"), Some("confirmed"), Some("spent")],
        ))
        .with_field(prim(&outputs, "blockheight", "u32").optional());

    let channel = CompositeField::new(channels.clone(), "channels", "ListfundsChannels")
        .with_field(prim(&channels, "peer_id", "pubkey"))
        .with_field(prim(&channels, "our_amount_msat", "msat"))
        .with_field(prim(&channels, "amount_msat", "msat"))
        .with_field(prim(&channels, "funding_txid", "txid"))
        .with_field(prim(&channels, "funding_output", "u32"))
        .with_field(prim(&channels, "connected", "boolean"))
        .with_field(EnumField::new(
            format!("{channels}.state"),
            "state",
            "ListfundsChannelsState",
            CHANNEL_STATES.map(Some),
        ))
        .with_field(prim(&channels, "short_channel_id", "short_channel_id").optional());

    let response = CompositeField::new(p, p, "ListfundsResponse")
        .with_field(ArrayField::new(outputs, "outputs", output))
        .with_field(ArrayField::new(channels, "channels", channel));

    Method::new("ListFunds", request, response)
}

fn define_listtransactions() -> Method {
    let p = "ListTransactions";
    let transactions = format!("{p}.transactions[]");
    let inputs = format!("{transactions}.inputs[]");
    let outputs = format!("{transactions}.outputs[]");
    let types = format!("{transactions}.type[]");

    let request = CompositeField::new(p, p, "ListtransactionsRequest");

    let input = CompositeField::new(inputs.clone(), "inputs", "ListtransactionsTransactionsInputs")
        .with_field(prim(&inputs, "txid", "txid"))
        .with_field(prim(&inputs, "index", "u32"))
        .with_field(prim(&inputs, "sequence", "u32"));

    let output = CompositeField::new(outputs.clone(), "outputs", "ListtransactionsTransactionsOutputs")
        .with_field(prim(&outputs, "index", "u32"))
        .with_field(prim(&outputs, "msat", "msat"))
        .with_field(prim(&outputs, "scriptPubKey", "hex"));

    let transaction: Field = CompositeField::new(
        transactions.clone(),
        "transactions",
        "ListtransactionsTransactions",
    )
    .with_field(prim(&transactions, "hash", "txid"))
    .with_field(prim(&transactions, "rawtx", "hex"))
    .with_field(prim(&transactions, "blockheight", "u32"))
    .with_field(prim(&transactions, "txindex", "u32"))
    .with_field(prim(&transactions, "locktime", "u32"))
    .with_field(prim(&transactions, "version", "u32"))
    .with_field(
        ArrayField::new(
            types.clone(),
            "type",
            EnumField::new(
                types,
                "type",
                "ListtransactionsTransactionsType",
                [
                    Some("theirs"),
                    Some("deposit"),
                    Some("withdraw"),
                    Some("channel_funding"),
                    Some("channel_mutual_close"),
                    Some("channel_unilateral_close"),
                    Some("channel_sweep"),
                    Some("channel_htlc_success"),
                    Some("channel_htlc_timeout"),
                    Some("channel_penalty"),
                    Some("channel_unilateral_cheat"),
                ],
            ),
        )
        .optional(),
    )
    .with_field(ArrayField::new(inputs, "inputs", input))
    .with_field(ArrayField::new(outputs, "outputs", output))
    .into();

    let response = CompositeField::new(p, p, "ListtransactionsResponse")
        .with_field(ArrayField::new(transactions, "transactions", transaction));

    Method::new("ListTransactions", request, response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listpeers_exposes_overridden_paths() {
        let service = define_lightning_service();
        let method = service.method("ListPeers").expect("ListPeers is defined");

        let mut paths = Vec::new();
        Field::from(method.response.clone()).walk(&mut |f| paths.push(f.path().to_string()));

        for expected in [
            "ListPeers.peers[].channels[].state_changes[].old_state",
            "ListPeers.peers[].channels[].state_changes[].new_state",
            "ListPeers.peers[].channels[].state_changes[].cause",
            "ListPeers.peers[].channels[].opener",
            "ListPeers.peers[].channels[].closer",
            "ListPeers.peers[].channels[].features[]",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing path {expected}");
        }
    }

    #[test]
    fn transaction_type_tags_are_optional() {
        let service = define_lightning_service();
        let method = service.method("ListTransactions").expect("ListTransactions is defined");

        let mut found = None;
        Field::from(method.response.clone()).walk(&mut |f| {
            if f.path() == "ListTransactions.transactions[].type[]" && found.is_none() {
                found = Some(f.required());
            }
        });
        assert_eq!(found, Some(false));
    }

    #[test]
    fn requests_and_responses_share_root_path() {
        for method in define_lightning_service().methods {
            assert_eq!(method.request.path, method.name);
            assert_eq!(method.response.path, method.name);
        }
    }
}
