// Primary-address heuristic tests: filtering, scoring, tie-breaks, fallback

use pisysd::probes::ipv4::{accept_fallback, is_private, is_valid_ipv4, resolve, select_primary};

#[test]
fn test_valid_ipv4_syntax() {
    assert!(is_valid_ipv4("192.168.1.50"));
    assert!(is_valid_ipv4("0.0.0.0"));
    assert!(is_valid_ipv4("255.255.255.255"));
    assert!(!is_valid_ipv4("256.1.1.1"));
    assert!(!is_valid_ipv4("192.168.1"));
    assert!(!is_valid_ipv4("192.168.1.50.1"));
    assert!(!is_valid_ipv4("fe80::1"));
    assert!(!is_valid_ipv4(""));
    assert!(!is_valid_ipv4("illegal"));
}

#[test]
fn test_private_ranges() {
    assert!(is_private("10.0.0.1"));
    assert!(is_private("172.16.0.1"));
    assert!(is_private("172.31.255.254"));
    assert!(is_private("192.168.1.1"));
    assert!(!is_private("172.15.0.1"));
    assert!(!is_private("172.32.0.1"));
    assert!(!is_private("8.8.8.8"));
    assert!(!is_private("203.0.113.7"));
}

#[test]
fn test_filter_drops_bridge_loopback_linklocal() {
    // Bridge and loopback are removed; the LAN address is the sole survivor.
    let picked = select_primary("172.17.0.1 192.168.1.50 127.0.0.1");
    assert_eq!(picked.as_deref(), Some("192.168.1.50"));

    assert_eq!(select_primary("127.0.0.1"), None);
    assert_eq!(select_primary("169.254.10.20"), None);
    assert_eq!(select_primary("172.18.0.1"), None);
}

#[test]
fn test_private_outranks_public() {
    let picked = select_primary("203.0.113.7 192.168.1.50");
    assert_eq!(picked.as_deref(), Some("192.168.1.50"));
}

#[test]
fn test_earlier_private_candidate_wins_tie() {
    let picked = select_primary("192.168.1.50 10.0.0.8");
    assert_eq!(picked.as_deref(), Some("192.168.1.50"));

    let picked = select_primary("10.0.0.8 192.168.1.50");
    assert_eq!(picked.as_deref(), Some("10.0.0.8"));
}

#[test]
fn test_malformed_tokens_are_skipped() {
    let picked = select_primary("dev0 not-an-ip 192.168.1.50");
    assert_eq!(picked.as_deref(), Some("192.168.1.50"));
    assert_eq!(select_primary(""), None);
    assert_eq!(select_primary("garbage tokens only"), None);
}

#[test]
fn test_fallback_runs_only_when_list_is_empty() {
    // Survivor in the list: fallback must not even run.
    let picked = resolve(Some("192.168.1.50".into()), || {
        panic!("fallback probed despite a surviving candidate")
    });
    assert_eq!(picked.as_deref(), Some("192.168.1.50"));

    // No survivors: the socket-derived address is the answer.
    let picked = resolve(Some("127.0.0.1".into()), || Some("203.0.113.7".into()));
    assert_eq!(picked.as_deref(), Some("203.0.113.7"));

    // Command failed entirely: same path.
    let picked = resolve(None, || Some("203.0.113.7".into()));
    assert_eq!(picked.as_deref(), Some("203.0.113.7"));
}

#[test]
fn test_fallback_address_is_still_validated() {
    assert_eq!(accept_fallback("203.0.113.7").as_deref(), Some("203.0.113.7"));
    assert_eq!(accept_fallback("127.0.0.1"), None);
    assert_eq!(accept_fallback("169.254.0.9"), None);
    assert_eq!(accept_fallback("::1"), None);
}

#[test]
fn test_nothing_survives_anywhere() {
    assert_eq!(resolve(Some("127.0.0.1 169.254.1.1".into()), || None), None);
    assert_eq!(resolve(None, || None), None);
}
