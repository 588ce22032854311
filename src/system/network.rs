//! Network interfaces and their addresses

use crate::core::Collector;
use crate::error::{HostFactsError, Result};
use crate::sysfs::{read_trimmed, SysRoot};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// One address reported for an interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressEntry {
    /// Interface name
    pub interface: String,
    /// Whether the interface is a loopback device
    pub loopback: bool,
    /// The address itself
    pub address: IpAddr,
    /// Netmask of the address, when reported
    pub netmask: Option<IpAddr>,
}

/// Addresses grouped under one interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceInfo {
    /// Interface name
    pub name: String,
    /// Hardware address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macaddress: Option<String>,
    /// IPv4 addresses
    pub ipv4: Vec<String>,
    /// IPv6 addresses
    pub ipv6: Vec<String>,
    /// Network of the first IPv4 address, CIDR form
    #[serde(rename = "ipv4-network", skip_serializing_if = "Option::is_none")]
    pub ipv4_network: Option<String>,
    /// Network of the first IPv6 address, CIDR form
    #[serde(rename = "ipv6-network", skip_serializing_if = "Option::is_none")]
    pub ipv6_network: Option<String>,
    #[serde(skip)]
    loopback: bool,
}

/// Host network facts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// First IPv4 address of a non-loopback interface
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipaddress: Option<String>,
    /// First IPv6 address of a non-loopback interface
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipaddressv6: Option<String>,
    /// First hardware address of a non-loopback interface
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macaddress: Option<String>,
    /// Every interface carrying at least one address
    pub interfaces: Vec<InterfaceInfo>,
}

/// Network of `address` under `netmask` in CIDR form, e.g. `10.0.0.0/16`.
///
/// `None` when the two are of different families.
pub fn network_cidr(address: IpAddr, netmask: IpAddr) -> Option<String> {
    match (address, netmask) {
        (IpAddr::V4(addr), IpAddr::V4(mask)) => {
            let mask = u32::from(mask);
            let network = Ipv4Addr::from(u32::from(addr) & mask);
            Some(format!("{}/{}", network, mask.count_ones()))
        }
        (IpAddr::V6(addr), IpAddr::V6(mask)) => {
            let mask = u128::from(mask);
            let network = Ipv6Addr::from(u128::from(addr) & mask);
            Some(format!("{}/{}", network, mask.count_ones()))
        }
        _ => None,
    }
}

/// Hardware address of an interface from `sys/class/net/<if>/address`
pub fn read_mac_address(root: &SysRoot, interface: &str) -> Option<String> {
    let path = root.net_dir().join(interface).join("address");
    match read_trimmed(&path) {
        Ok(mac) if !mac.is_empty() && mac != "00:00:00:00:00:00" => Some(mac),
        Ok(_) => None,
        Err(e) => {
            tracing::trace!("No hardware address for {}: {}", interface, e);
            None
        }
    }
}

/// Group address entries by interface and pick the host-level addresses.
///
/// Interfaces keep the order in which they first appear.
pub fn build_network_info(
    entries: impl IntoIterator<Item = AddressEntry>,
    mac_address: impl Fn(&str) -> Option<String>,
) -> NetworkInfo {
    let mut interfaces: Vec<InterfaceInfo> = Vec::new();

    for entry in entries {
        let position = match interfaces.iter().position(|i| i.name == entry.interface) {
            Some(position) => position,
            None => {
                interfaces.push(InterfaceInfo {
                    macaddress: mac_address(&entry.interface),
                    name: entry.interface.clone(),
                    loopback: entry.loopback,
                    ..Default::default()
                });
                interfaces.len() - 1
            }
        };
        let iface = &mut interfaces[position];
        let network = entry.netmask.and_then(|mask| network_cidr(entry.address, mask));

        match entry.address {
            IpAddr::V4(addr) => {
                if iface.ipv4.is_empty() {
                    iface.ipv4_network = network;
                }
                iface.ipv4.push(addr.to_string());
            }
            IpAddr::V6(addr) => {
                if iface.ipv6.is_empty() {
                    iface.ipv6_network = network;
                }
                iface.ipv6.push(addr.to_string());
            }
        }
    }

    let external = || interfaces.iter().filter(|i| !i.loopback);
    NetworkInfo {
        ipaddress: external().find_map(|i| i.ipv4.first().cloned()),
        ipaddressv6: external().find_map(|i| i.ipv6.first().cloned()),
        macaddress: external().find_map(|i| i.macaddress.clone()),
        interfaces,
    }
}

/// Enumerate interface addresses with `getifaddrs(3)`
#[cfg(unix)]
pub fn interface_addresses() -> Result<Vec<AddressEntry>> {
    use nix::ifaddrs::getifaddrs;
    use nix::net::if_::InterfaceFlags;

    let addrs = getifaddrs().map_err(|e| HostFactsError::collector("network", e.to_string()))?;

    Ok(addrs
        .filter_map(|ifaddr| {
            let address = ifaddr.address.as_ref().and_then(sockaddr_ip)?;
            Some(AddressEntry {
                loopback: ifaddr.flags.contains(InterfaceFlags::IFF_LOOPBACK),
                netmask: ifaddr.netmask.as_ref().and_then(sockaddr_ip),
                interface: ifaddr.interface_name,
                address,
            })
        })
        .collect())
}

/// Enumerate interface addresses with `getifaddrs(3)`
#[cfg(not(unix))]
pub fn interface_addresses() -> Result<Vec<AddressEntry>> {
    Err(HostFactsError::UnsupportedOperation(
        "network collection requires getifaddrs".to_string(),
    ))
}

#[cfg(unix)]
fn sockaddr_ip(addr: &nix::sys::socket::SockaddrStorage) -> Option<IpAddr> {
    use std::net::{SocketAddrV4, SocketAddrV6};

    if let Some(sin) = addr.as_sockaddr_in() {
        return Some(IpAddr::V4(*SocketAddrV4::from(*sin).ip()));
    }
    addr.as_sockaddr_in6()
        .map(|sin6| IpAddr::V6(*SocketAddrV6::from(*sin6).ip()))
}

/// The `network` collector
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkCollector;

impl Collector for NetworkCollector {
    fn name(&self) -> &'static str {
        "network"
    }

    fn collect(&self, root: &SysRoot) -> Result<serde_json::Value> {
        let entries = interface_addresses()?;
        let info = build_network_info(entries, |name| read_mac_address(root, name));
        Ok(serde_json::to_value(info)?)
    }
}
