use super::*;
use crate::testing::{MockBehavior, MockLookup, MockSessionFactory, google_home_advertisement};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

fn addr(host: u8) -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, host)), 8009)
}

fn chromecast_advertisement(host: u8) -> Advertisement {
    Advertisement::new(
        format!("Chromecast-{host}._googlecast._tcp.local."),
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, host)),
        8009,
        ["md=Chromecast", "fn=TV"],
    )
}

#[test]
fn test_is_supported() {
    let home = google_home_advertisement(1, "Kitchen");
    assert!(is_supported(&home, "md=Google Home"));

    let cast = chromecast_advertisement(2);
    assert!(!is_supported(&cast, "md=Google Home"));

    let bare = Advertisement::new("x", addr(3).ip(), 8009, Vec::<String>::new());
    assert!(!is_supported(&bare, "md=Google Home"));
}

#[test]
fn test_is_supported_matches_prefix_only() {
    let ad = Advertisement::new(
        "x",
        addr(3).ip(),
        8009,
        ["fn=md=Google Home", "md=Google Home Mini"],
    );
    assert!(is_supported(&ad, "md=Google Home"));

    let ad = Advertisement::new("x", addr(3).ip(), 8009, ["fn=md=Google Home"]);
    assert!(!is_supported(&ad, "md=Google Home"));
}

#[tokio::test]
async fn test_discover_connects_supported_devices() {
    let lookup = MockLookup::new(vec![
        google_home_advertisement(1, "Kitchen"),
        chromecast_advertisement(2),
        google_home_advertisement(3, "Bedroom"),
    ]);
    let factory = MockSessionFactory::new();

    let devices = discover_and_connect(
        &CallContext::new(),
        &lookup,
        factory.clone(),
        &HomecastConfig::default(),
    )
    .await;

    let names: Vec<_> = devices.iter().map(CastDevice::name).collect();
    assert_eq!(names, ["Kitchen", "Bedroom"]);
    assert!(devices.iter().all(CastDevice::is_connected));
    assert_eq!(factory.created(), vec![addr(1), addr(3)]);
}

#[tokio::test]
async fn test_discover_passes_query() {
    let lookup = MockLookup::new(Vec::new());
    let config = HomecastConfig::builder()
        .service_type("_custom._tcp.local.")
        .discovery_timeout(Duration::from_secs(4))
        .build();

    let devices =
        discover_and_connect(&CallContext::new(), &lookup, MockSessionFactory::new(), &config)
            .await;

    assert!(devices.is_empty());
    assert_eq!(
        lookup.queries(),
        vec![LookupQuery {
            service_type: "_custom._tcp.local.".to_string(),
            timeout: Duration::from_secs(4),
        }]
    );
}

#[tokio::test]
async fn test_discover_skips_failed_connect() {
    let lookup = MockLookup::new(vec![
        google_home_advertisement(1, "Kitchen"),
        google_home_advertisement(2, "Bedroom"),
    ]);
    let factory = MockSessionFactory::new().with_behavior(addr(1), MockBehavior::refusing());

    let devices = discover_and_connect(
        &CallContext::new(),
        &lookup,
        factory.clone(),
        &HomecastConfig::default(),
    )
    .await;

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].socket_addr(), addr(2));

    let failed = factory.log_for(addr(1)).unwrap();
    assert_eq!(failed.connects, 1);
    assert_eq!(failed.closes, 1);
}

#[tokio::test(start_paused = true)]
async fn test_discover_unreachable_device_times_out() {
    let lookup = MockLookup::new(vec![
        google_home_advertisement(1, "Kitchen"),
        google_home_advertisement(2, "Bedroom"),
    ]);
    let factory = MockSessionFactory::new().with_behavior(addr(1), MockBehavior::unreachable());
    let config = HomecastConfig::builder()
        .connection_timeout(Duration::from_secs(2))
        .build();

    let devices =
        discover_and_connect(&CallContext::new(), &lookup, factory.clone(), &config).await;

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].name(), "Bedroom");
}

#[tokio::test]
async fn test_discover_lookup_failure_keeps_partial_results() {
    let lookup = MockLookup::new(vec![google_home_advertisement(1, "Kitchen")])
        .failing_with("multicast socket error");

    let devices = discover_and_connect(
        &CallContext::new(),
        &lookup,
        MockSessionFactory::new(),
        &HomecastConfig::default(),
    )
    .await;

    assert_eq!(devices.len(), 1);
}

#[tokio::test]
async fn test_discover_drains_small_queue() {
    let advertisements = (1..=12)
        .map(|host| google_home_advertisement(host, &format!("Speaker {host}")))
        .collect();
    let lookup = MockLookup::new(advertisements);
    let config = HomecastConfig::builder().queue_capacity(1).build();

    let devices =
        discover_and_connect(&CallContext::new(), &lookup, MockSessionFactory::new(), &config)
            .await;

    let addresses: Vec<_> = devices.iter().map(|d| d.address()).collect();
    let expected: Vec<_> = (1..=12).map(|host| addr(host).ip()).collect();
    assert_eq!(addresses, expected);
}

#[tokio::test(start_paused = true)]
async fn test_discover_cancelled_returns_collected() {
    let lookup = MockLookup::new(vec![
        google_home_advertisement(1, "Kitchen"),
        google_home_advertisement(2, "Bedroom"),
    ])
    .with_interval(Duration::from_secs(1));
    let ctx = CallContext::new();
    let canceller = ctx.clone();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        canceller.cancel();
    });

    let devices =
        discover_and_connect(&ctx, &lookup, MockSessionFactory::new(), &HomecastConfig::default())
            .await;

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].name(), "Kitchen");
}

#[tokio::test]
async fn test_discover_connects_once_per_advertisement() {
    let lookup = MockLookup::new(vec![Advertisement::new(
        "Kitchen._googlecast._tcp.local.",
        addr(1).ip(),
        8009,
        ["md=Google Home", "md=Google Home Mini"],
    )]);
    let factory = MockSessionFactory::new();

    let devices = discover_and_connect(
        &CallContext::new(),
        &lookup,
        factory.clone(),
        &HomecastConfig::default(),
    )
    .await;

    assert_eq!(devices.len(), 1);
    assert_eq!(factory.created(), vec![addr(1)]);
    assert_eq!(factory.log_for(addr(1)).unwrap().connects, 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_discovery_closes_sessions() {
    let lookup = MockLookup::new(vec![
        google_home_advertisement(1, "Kitchen"),
        google_home_advertisement(2, "Bedroom"),
    ]);
    let factory = MockSessionFactory::new().with_behavior(
        addr(1),
        MockBehavior {
            connect_delay: Some(Duration::from_secs(5)),
            ..MockBehavior::default()
        },
    );

    let result = tokio::time::timeout(
        Duration::from_millis(100),
        discover_and_connect(
            &CallContext::new(),
            &lookup,
            factory.clone(),
            &HomecastConfig::default(),
        ),
    )
    .await;
    assert!(result.is_err());

    tokio::time::sleep(Duration::from_secs(30)).await;

    assert_eq!(factory.created(), vec![addr(1)]);
    let log = factory.log_for(addr(1)).unwrap();
    assert_eq!(log.connects, 1);
    assert_eq!(log.closes, 1);
}

#[tokio::test]
async fn test_completed_discovery_keeps_sessions_open() {
    let lookup = MockLookup::new(vec![google_home_advertisement(1, "Kitchen")]);
    let factory = MockSessionFactory::new();

    let devices = discover_and_connect(
        &CallContext::new(),
        &lookup,
        factory.clone(),
        &HomecastConfig::default(),
    )
    .await;
    tokio::task::yield_now().await;

    assert!(devices[0].is_connected());
    assert_eq!(factory.log_for(addr(1)).unwrap().closes, 0);
}
