// Primary IPv4 selection: `hostname -I` candidates ranked by privacy and
// position, with a UDP-connect fallback when no candidate survives.

use std::cmp::Reverse;
use std::net::UdpSocket;

use super::CommandRunner;

/// Syntactic IPv4 check: exactly four dot-separated octets, each 0-255.
pub fn is_valid_ipv4(token: &str) -> bool {
    let mut octets = 0;
    for part in token.split('.') {
        if part.parse::<u8>().is_err() {
            return false;
        }
        octets += 1;
    }
    octets == 4
}

fn is_loopback_or_link_local(ip: &str) -> bool {
    ip.starts_with("127.") || ip.starts_with("169.254.")
}

/// Default Docker bridge subnets; useless as a LAN-facing address.
fn is_container_bridge(ip: &str) -> bool {
    ip.starts_with("172.17.") || ip.starts_with("172.18.")
}

/// RFC1918: 10.0.0.0/8, 172.16.0.0/12, 192.168.0.0/16.
pub fn is_private(ip: &str) -> bool {
    let mut octets = ip.split('.').map(|o| o.parse::<u8>().ok());
    let first = octets.next().flatten();
    let second = octets.next().flatten();
    match (first, second) {
        (Some(10), _) => true,
        (Some(172), Some(b)) => (16..=31).contains(&b),
        (Some(192), Some(168)) => true,
        _ => false,
    }
}

/// Picks the best address from a whitespace-separated candidate list.
/// Loopback, link-local and container-bridge addresses are discarded;
/// survivors are ranked by `(is_private, Reverse(position))` so private
/// addresses outrank public ones and earlier-listed addresses win ties.
pub fn select_primary(list: &str) -> Option<String> {
    list.split_whitespace()
        .enumerate()
        .filter(|(_, token)| is_valid_ipv4(token))
        .filter(|(_, token)| !is_loopback_or_link_local(token) && !is_container_bridge(token))
        .max_by_key(|(idx, token)| (is_private(token), Reverse(*idx)))
        .map(|(_, token)| token.to_string())
}

/// Validates an address produced by the outbound-socket fallback.
pub fn accept_fallback(ip: &str) -> Option<String> {
    (is_valid_ipv4(ip) && !is_loopback_or_link_local(ip)).then(|| ip.to_string())
}

/// "Try the candidate list fully, else fall back": the fallback probe only
/// runs when the list yields no survivor. The two methods are never ranked
/// against each other.
pub fn resolve(list: Option<String>, fallback: impl FnOnce() -> Option<String>) -> Option<String> {
    list.as_deref()
        .and_then(select_primary)
        .or_else(|| fallback().and_then(|ip| accept_fallback(&ip)))
}

/// Source address the kernel would route toward a public host. Connecting
/// a UDP socket only binds it; no packet is sent.
fn outbound_source_addr() -> Option<String> {
    let sock = UdpSocket::bind(("0.0.0.0", 0)).ok()?;
    sock.connect(("8.8.8.8", 80)).ok()?;
    Some(sock.local_addr().ok()?.ip().to_string())
}

pub(super) fn discover(runner: &dyn CommandRunner) -> Option<String> {
    let list = runner.run(&["hostname".into(), "-I".into()]).ok();
    resolve(list, outbound_source_addr)
}
