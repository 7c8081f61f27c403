//! Flavor Selection Tests
//!
//! Selection invariants:
//! - a registered name selects an instance built by its constructor
//! - the empty name selects the default flavor
//! - an unknown name fails and never selects anything
//! - a later selection replaces an earlier one
//! - service maps are non-empty and stable

use std::sync::Arc;

use protoflavor::flavor::{
    Capability, CapabilityValue, FlavorDefinition, FlavorError, FlavorRegistry, GoRpcFlavor,
    GrpcFlavor, ProtocolsFlavor, DEFAULT_FLAVOR, GORPC, GRPC,
};

/// A flavor whose answers identify it
struct Marker(&'static str);

impl ProtocolsFlavor for Marker {
    fn binlog_player_protocol(&self) -> &str {
        self.0
    }
    fn vtctl_client_protocol(&self) -> &str {
        self.0
    }
    fn vtctl_python_client_protocol(&self) -> &str {
        self.0
    }
    fn vtworker_client_protocol(&self) -> &str {
        self.0
    }
    fn tablet_manager_protocol(&self) -> &str {
        self.0
    }
    fn tabletconn_protocol(&self) -> &str {
        self.0
    }
    fn vtgate_protocol_flags(&self) -> &str {
        "-vtgate_protocol marker"
    }
    fn rpc_timeout_message(&self) -> &str {
        "marker timeout"
    }
    fn service_map(&self) -> Vec<String> {
        vec![format!("{}-vtctl", self.0)]
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Each registered name yields its own constructor's instance.
#[test]
fn test_select_returns_registered_constructor() {
    let registry = FlavorRegistry::new();
    registry.register("alpha", || Box::new(Marker("alpha"))).unwrap();
    registry.register("beta", || Box::new(Marker("beta"))).unwrap();

    for name in ["alpha", "beta"] {
        registry.select(name).unwrap();
        let active = registry.active().unwrap();
        assert_eq!(active.tabletconn_protocol(), name);
        assert_eq!(active.service_map(), vec![format!("{}-vtctl", name)]);
    }
}

/// Empty name behaves exactly like the default name.
#[test]
fn test_empty_name_equals_default() {
    let by_empty = FlavorRegistry::with_builtin().unwrap();
    let by_name = FlavorRegistry::with_builtin().unwrap();

    let a = by_empty.select("").unwrap();
    let b = by_name.select(DEFAULT_FLAVOR).unwrap();

    assert_eq!(DEFAULT_FLAVOR, GORPC);
    assert_eq!(by_empty.active_name(), by_name.active_name());
    for capability in Capability::ALL {
        assert_eq!(a.query(capability), b.query(capability));
    }
}

/// Empty name fails when the default flavor is not registered.
#[test]
fn test_empty_name_without_default_registered() {
    let registry = FlavorRegistry::new();
    registry.register(GRPC, || Box::new(GrpcFlavor)).unwrap();
    assert_eq!(
        registry.select("").unwrap_err(),
        FlavorError::UnknownFlavor(GORPC.to_string())
    );
}

/// Unknown name is reported, and the registry stays unselected.
#[test]
fn test_unknown_flavor_never_selects() {
    let registry = FlavorRegistry::with_builtin().unwrap();
    let err = registry.select("nonexistent-flavor").unwrap_err();

    assert_eq!(err, FlavorError::UnknownFlavor("nonexistent-flavor".into()));
    assert!(err.is_fatal());
    assert!(err.to_string().contains("nonexistent-flavor"));
    assert_eq!(registry.active().unwrap_err(), FlavorError::NotSelected);
}

/// After A then B, only B is reachable through the registry.
#[test]
fn test_last_selection_wins() {
    let registry = FlavorRegistry::new();
    registry.register("A", || Box::new(Marker("a"))).unwrap();
    registry.register("B", || Box::new(Marker("b"))).unwrap();

    let a = registry.select("A").unwrap();
    let b = registry.select("B").unwrap();
    let active = registry.active().unwrap();

    assert_eq!(registry.active_name().as_deref(), Some("B"));
    assert!(Arc::ptr_eq(&active, &b));
    assert!(!Arc::ptr_eq(&active, &a));
    assert_eq!(active.binlog_player_protocol(), "b");

    // The caller's handle on A is the only one left
    assert_eq!(Arc::strong_count(&a), 1);
}

/// Readers on other threads see the selected flavor.
#[test]
fn test_active_shared_across_threads() {
    let registry = Arc::new(FlavorRegistry::with_builtin().unwrap());
    registry.select(GRPC).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || registry.active().unwrap().tabletconn_protocol().to_string())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "grpc");
    }
}

// =============================================================================
// Capability contract
// =============================================================================

/// A definition with nothing in it is NotImplemented for all nine methods.
#[test]
fn test_bare_definition_not_implemented() {
    let bare = FlavorDefinition::new("bare");
    let methods: Vec<&str> = Capability::ALL
        .iter()
        .map(|c| match bare.query(*c) {
            Err(FlavorError::NotImplemented { method }) => method,
            other => panic!("{} answered {:?}", c, other),
        })
        .collect();

    assert_eq!(
        methods,
        vec![
            "binlog_player_protocol",
            "vtctl_client_protocol",
            "vtctl_python_client_protocol",
            "vtworker_client_protocol",
            "tablet_manager_protocol",
            "tabletconn_protocol",
            "vtgate_protocol_flags",
            "rpc_timeout_message",
            "service_map",
        ]
    );
}

/// A partial definition can neither be registered nor selected.
#[test]
fn test_partial_definition_never_reaches_selection() {
    let registry = FlavorRegistry::with_builtin().unwrap();
    let partial = FlavorDefinition::new("partial")
        .with_selector(Capability::TabletconnProtocol, "grpc");

    assert!(registry.register_definition(&partial).is_err());
    assert_eq!(
        registry.select("partial").unwrap_err(),
        FlavorError::UnknownFlavor("partial".into())
    );
}

/// Service maps are non-empty and identical across calls.
#[test]
fn test_service_map_stable() {
    let flavors: [Box<dyn ProtocolsFlavor>; 2] = [Box::new(GoRpcFlavor), Box::new(GrpcFlavor)];
    for flavor in flavors.iter() {
        let first = flavor.service_map();
        assert!(!first.is_empty());
        for _ in 0..3 {
            assert_eq!(flavor.service_map(), first);
        }
        assert_eq!(
            flavor.query(Capability::ServiceMap),
            CapabilityValue::ServiceMap(first)
        );
    }
}

/// Service map stays stable through the registry's active handle.
#[test]
fn test_service_map_stable_through_registry() {
    let registry = FlavorRegistry::with_builtin().unwrap();
    registry.select(GRPC).unwrap();
    let first = registry.active().unwrap().service_map();
    let second = registry.active().unwrap().service_map();
    assert_eq!(first, second);
}
