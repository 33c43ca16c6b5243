/// Property-based tests for manifest composition
///
/// For any number of planned backends the composed manifest must:
/// - contain exactly N + 2 services, fixed services first
/// - list backends in index order
/// - make the load balancer depend on every backend and nothing else
use lb_compose::manifest::{compose, BackendSpec, ComposeOptions, DependencyCondition};
use proptest::prelude::*;
use std::path::PathBuf;

fn options() -> ComposeOptions {
    ComposeOptions {
        assets_dir: PathBuf::from("configs"),
        balancer_port: 8087,
        health_check_path: "/health".to_string(),
    }
}

/// Strategy for distinct host ports, one per backend
fn backends_strategy() -> impl Strategy<Value = Vec<BackendSpec>> {
    prop::collection::btree_set(1024u16..65535u16, 0..24).prop_map(|ports| {
        ports
            .into_iter()
            .enumerate()
            .map(|(position, port)| {
                let index = position + 1;
                BackendSpec {
                    index,
                    source: format!("http://backend{}:80", index),
                    port,
                    asset_path: PathBuf::from("configs").join(format!("index-backend{}.html", index)),
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_service_count_and_order(backends in backends_strategy()) {
        let manifest = compose(&options(), &backends);
        let names: Vec<&str> = manifest.service_names().collect();

        prop_assert_eq!(names.len(), backends.len() + 2);
        prop_assert_eq!(names[0], "load-balancer");
        prop_assert_eq!(names[1], "redis");
        for (offset, name) in names[2..].iter().enumerate() {
            let expected = format!("backend{}", offset + 1);
            prop_assert_eq!(*name, expected.as_str());
        }
    }

    #[test]
    fn prop_balancer_depends_on_every_backend(backends in backends_strategy()) {
        let manifest = compose(&options(), &backends);
        let balancer = manifest.service("load-balancer").unwrap();
        let depends_on = balancer.depends_on.as_ref().unwrap();

        prop_assert_eq!(depends_on.len(), backends.len());
        for backend in &backends {
            let dep = depends_on.get(&backend.service_name());
            prop_assert!(dep.is_some());
            prop_assert_eq!(dep.unwrap().condition, DependencyCondition::ServiceHealthy);
        }
    }

    #[test]
    fn prop_host_ports_are_carried_through(backends in backends_strategy()) {
        let manifest = compose(&options(), &backends);

        for backend in &backends {
            let service = manifest.service(&backend.service_name()).unwrap();
            prop_assert_eq!(service.ports.len(), 1);
            prop_assert_eq!(service.ports[0].to_string(), format!("{}:80", backend.port));
        }
    }
}
