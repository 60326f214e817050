use super::*;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use url::Url;

// --- config.rs tests ---

#[test]
fn test_config_defaults() {
    let config = HomecastConfig::default();

    assert_eq!(config.service_type, "_googlecast._tcp.local.");
    assert_eq!(config.model_marker, "md=Google Home");
    assert_eq!(config.discovery_timeout, Duration::from_secs(1));
    assert_eq!(config.connection_timeout, Duration::from_secs(10));
    assert_eq!(config.queue_capacity, 4);
    assert_eq!(config.tts_host, "translate.google.com");
}

#[test]
fn test_config_builder() {
    let config = HomecastConfig::builder()
        .model_marker("md=Google Nest")
        .discovery_timeout(Duration::from_secs(3))
        .connection_timeout(Duration::from_secs(2))
        .queue_capacity(16)
        .tts_host("tts.example.com")
        .build();

    assert_eq!(config.model_marker, "md=Google Nest");
    assert_eq!(config.discovery_timeout, Duration::from_secs(3));
    assert_eq!(config.connection_timeout, Duration::from_secs(2));
    assert_eq!(config.queue_capacity, 16);
    assert_eq!(config.tts_host, "tts.example.com");
    assert_eq!(config.service_type, CAST_SERVICE_TYPE);
}

#[test]
fn test_config_queue_capacity_clamped() {
    let config = HomecastConfig::builder().queue_capacity(0).build();
    assert_eq!(config.queue_capacity, 1);
}

// --- device.rs tests ---

fn kitchen_advertisement(fields: &[&str]) -> Advertisement {
    Advertisement::new(
        "Google-Home-abc123._googlecast._tcp.local.",
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)),
        8009,
        fields.iter().copied(),
    )
}

#[test]
fn test_advertisement_prefix() {
    let ad = kitchen_advertisement(&["id=abc123", "md=Google Home Mini", "fn=Kitchen"]);
    assert!(ad.has_field_prefix("md=Google Home"));
    assert!(!ad.has_field_prefix("md=Chromecast"));
}

#[test]
fn test_advertisement_field_lookup() {
    let ad = kitchen_advertisement(&["id=abc123", "rs=", "fn=Kitchen=Speaker"]);
    assert_eq!(ad.field("id"), Some("abc123"));
    assert_eq!(ad.field("rs"), Some(""));
    assert_eq!(ad.field("fn"), Some("Kitchen=Speaker"));
    assert_eq!(ad.field("md"), None);
}

#[test]
fn test_device_info_uses_friendly_name() {
    let ad = kitchen_advertisement(&["md=Google Home", "fn=Kitchen"]);
    let info = DeviceInfo::from_advertisement(&ad);

    assert_eq!(info.name, "Kitchen");
    assert_eq!(info.port, 8009);
    assert_eq!(info.socket_addr().to_string(), "10.0.0.5:8009");
    assert_eq!(info.info_fields.len(), 2);
}

#[test]
fn test_device_info_falls_back_to_instance_name() {
    let ad = kitchen_advertisement(&["md=Google Home", "fn="]);
    let info = DeviceInfo::from_advertisement(&ad);
    assert_eq!(info.name, "Google-Home-abc123");
}

#[test]
fn test_device_info_default_name() {
    let mut ad = kitchen_advertisement(&[]);
    ad.name = String::new();
    let info = DeviceInfo::from_advertisement(&ad);
    assert_eq!(info.name, "Cast Device");
}

// --- item.rs tests ---

#[test]
fn test_playable_item_builder() {
    let url = Url::parse("http://192.168.1.10/track.mp3").unwrap();
    let item = PlayableItem::new(url.clone()).with_title("Track");

    assert_eq!(item.url, url);
    assert_eq!(item.title.as_deref(), Some("Track"));
    assert_eq!(PlayableItem::from(url).title, None);
}
