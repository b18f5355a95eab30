//! Tests for bridge dispatch.

use std::sync::{Arc, Mutex};

use embedchat_common::{BridgeError, PersistenceMode};
use embedchat_storage::KeyValueStore;
use serde_json::json;

use super::*;
use crate::listener::{ConversationListener, ConversationTransfer};

#[derive(Default)]
struct Recorder {
    transfers: Mutex<Vec<ConversationTransfer>>,
    events: Mutex<Vec<String>>,
    resolvers: Mutex<Vec<(String, SecretResolver)>>,
}

impl ConversationListener for Recorder {
    fn on_conversation_transfer(&self, transfer: ConversationTransfer) {
        self.transfers.lock().unwrap().push(transfer);
    }
    fn on_agent_message_end(&self) {
        self.events.lock().unwrap().push("agent_message_end".into());
    }
    fn on_conversation_start(&self, id: String) {
        self.events.lock().unwrap().push(format!("start:{id}"));
    }
    fn on_conversation_ended(&self) {
        self.events.lock().unwrap().push("ended".into());
    }
    fn on_secret_expiry(&self, secret_name: String, resolver: SecretResolver) {
        self.resolvers.lock().unwrap().push((secret_name, resolver));
    }
}

struct Harness {
    bridge: BridgeMessageHandler,
    recorder: Arc<Recorder>,
    queue: ControlQueue,
    store: SharedStore,
}

impl Harness {
    fn new(mode: PersistenceMode) -> Self {
        let recorder = Arc::new(Recorder::default());
        let queue = ControlQueue::new();
        let store = KeyValueStore::new(mode, "acme", None).unwrap().shared();
        let dispatcher = EventDispatcher::new(Some(recorder.clone()), queue.clone());
        let bridge = BridgeMessageHandler::new(Arc::clone(&store), dispatcher, queue.clone());
        Self {
            bridge,
            recorder,
            queue,
            store,
        }
    }

    /// Run queued listener calls; return everything else.
    fn pump(&self) -> Vec<SurfaceCommand> {
        let mut commands = Vec::new();
        for message in self.queue.drain() {
            match message {
                ControlMessage::Invoke(task) => task(),
                ControlMessage::Surface(cmd) => commands.push(cmd),
                other => panic!("unexpected {other:?}"),
            }
        }
        commands
    }
}

#[test]
fn transfer_dispatches_one_event() {
    let h = Harness::new(PersistenceMode::Memory);
    h.bridge.on_transfer(
        r#"{"isSynchronous":true,"isContactCenter":false,"data":[{"key":"a","value":"1"}]}"#,
    );
    h.pump();

    let transfers = h.recorder.transfers.lock().unwrap();
    assert_eq!(transfers.len(), 1);
    assert!(transfers[0].is_synchronous);
    assert!(!transfers[0].is_contact_center);
    assert_eq!(transfers[0].data.len(), 1);
    assert_eq!(transfers[0].data["a"], "1");
}

#[test]
fn malformed_transfer_dispatches_nothing() {
    let h = Harness::new(PersistenceMode::Memory);
    h.bridge.on_transfer("not json");
    assert!(h.queue.is_empty());
    h.pump();
    assert!(h.recorder.transfers.lock().unwrap().is_empty());
}

#[test]
fn lifecycle_events_route_to_listener() {
    let h = Harness::new(PersistenceMode::Memory);
    h.bridge.handle_message(r#"{"method":"onConversationStart","args":["c-9"]}"#);
    h.bridge.handle_message(r#"{"method":"onAgentMessageEnd"}"#);
    h.bridge.handle_message(r#"{"method":"onEndChat","args":[]}"#);
    h.pump();

    assert_eq!(
        *h.recorder.events.lock().unwrap(),
        vec!["start:c-9", "agent_message_end", "ended"]
    );
}

#[test]
fn transfer_via_ipc_accepts_string_or_object() {
    let h = Harness::new(PersistenceMode::Memory);
    h.bridge.handle_message(
        r#"{"method":"onTransfer","args":["{\"data\":[{\"key\":\"k\",\"value\":\"v\"}]}"]}"#,
    );
    h.bridge
        .handle_message(r#"{"method":"onTransfer","args":[{"isContactCenter":true}]}"#);
    h.pump();

    let transfers = h.recorder.transfers.lock().unwrap();
    assert_eq!(transfers.len(), 2);
    assert_eq!(transfers[0].data["k"], "v");
    assert!(transfers[1].is_contact_center);
}

#[test]
fn storage_calls_forward_to_store() {
    let h = Harness::new(PersistenceMode::Memory);
    h.bridge.store_value("session", "s-1");
    assert_eq!(h.bridge.get_stored_value("session").as_deref(), Some("s-1"));
    assert_eq!(h.store.lock().unwrap().get("session").as_deref(), Some("s-1"));

    h.bridge.clear_storage();
    assert_eq!(h.bridge.get_stored_value("session"), None);
    assert!(h.store.lock().unwrap().is_empty());
}

#[test]
fn storage_in_none_mode_reads_nothing() {
    let h = Harness::new(PersistenceMode::None);
    h.bridge.store_value("k", "v");
    assert_eq!(h.bridge.get_stored_value("k"), None);
}

#[test]
fn get_stored_value_returns_through_table() {
    let h = Harness::new(PersistenceMode::Memory);
    h.bridge.store_value("k", "v");

    let reply = h
        .bridge
        .dispatch(&BridgeCall::new("getStoredValue", vec![json!("k")]))
        .unwrap();
    assert_eq!(reply, BridgeReply::Value(json!("v")));

    let reply = h
        .bridge
        .dispatch(&BridgeCall::new("getStoredValue", vec![json!("missing")]))
        .unwrap();
    assert_eq!(reply, BridgeReply::Value(serde_json::Value::Null));
}

#[test]
fn call_id_gets_a_reply_script() {
    let h = Harness::new(PersistenceMode::Memory);
    h.bridge.store_value("k", "v");
    h.bridge
        .handle_message(r#"{"method":"getStoredValue","args":["k"],"callId":"c1"}"#);

    assert_eq!(
        h.pump(),
        vec![SurfaceCommand::EvaluateScript(
            r#"window.embedChatBridge._reply("c1", "v");"#.into()
        )]
    );
}

#[test]
fn unknown_method_is_rejected() {
    let h = Harness::new(PersistenceMode::Memory);
    let err = h
        .bridge
        .dispatch(&BridgeCall::new("eval", vec![json!("alert(1)")]))
        .unwrap_err();
    assert!(matches!(err, BridgeError::UnknownMethod(ref m) if m == "eval"));

    h.bridge.handle_message(r#"{"method":"eval","callId":"c1"}"#);
    assert!(h.queue.is_empty());
}

#[test]
fn bad_arguments_are_rejected() {
    let h = Harness::new(PersistenceMode::Memory);
    let err = h
        .bridge
        .dispatch(&BridgeCall::new("storeValue", vec![json!("k")]))
        .unwrap_err();
    assert!(matches!(err, BridgeError::InvalidArguments { .. }));

    let err = h
        .bridge
        .dispatch(&BridgeCall::new("storeValue", vec![json!("k"), json!(5)]))
        .unwrap_err();
    assert!(err.to_string().contains("argument 1 must be a string"));
    assert!(h.store.lock().unwrap().is_empty());
}

#[test]
fn garbage_ipc_body_is_dropped() {
    let h = Harness::new(PersistenceMode::Memory);
    h.bridge.handle_message("{{{");
    h.bridge.handle_message("");
    assert!(h.queue.is_empty());
}

#[test]
fn secret_expiry_round_trip() {
    let h = Harness::new(PersistenceMode::Memory);
    h.bridge
        .handle_message(r#"{"method":"onSecretExpiry","args":["jwt","cb-7"]}"#);
    assert!(h.pump().is_empty());

    let (name, resolver) = h.recorder.resolvers.lock().unwrap().pop().unwrap();
    assert_eq!(name, "jwt");
    assert_eq!(resolver.callback_id(), "cb-7");

    resolver.resolve("fresh-token");
    assert_eq!(
        h.pump(),
        vec![SurfaceCommand::EvaluateScript(
            r#"globalResolverFunction("cb-7", "fresh-token");"#.into()
        )]
    );
}

#[test]
fn print_is_queued_not_run() {
    let h = Harness::new(PersistenceMode::Memory);
    h.bridge
        .handle_message(r#"{"method":"onPrint","args":["https://x/print","<p>hi</p>"]}"#);
    assert_eq!(
        h.pump(),
        vec![SurfaceCommand::Print {
            url: "https://x/print".into(),
            data: "<p>hi</p>".into(),
        }]
    );
}

#[test]
fn table_lists_every_method() {
    let names: Vec<&str> = bridge_methods().collect();
    assert_eq!(
        names,
        vec![
            "onTransfer",
            "onAgentMessageEnd",
            "onEndChat",
            "onConversationStart",
            "storeValue",
            "getStoredValue",
            "clearStorage",
            "onSecretExpiry",
            "onPrint",
        ]
    );
    assert!(is_bridge_method("storeValue"));
    assert!(!is_bridge_method("StoreValue"));
    assert!(!is_bridge_method("storeValue\0"));
}
