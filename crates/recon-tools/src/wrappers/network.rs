//! Port discovery and network service enumeration

use super::output_path;
use crate::command::CommandLine;

/// `rustscan --greppable --ulimit 5000 -a <ip>`
///
/// Values: resources_dir, ip_address.
pub fn rustscan(args: &[String]) -> Option<CommandLine> {
    let [out, ip] = args else {
        return None;
    };
    Some(
        CommandLine::new("rustscan")
            .args(["--greppable", "--ulimit", "5000", "-a"])
            .arg(ip)
            .stdout_to(output_path(out, "rustscan.txt")),
    )
}

/// Full service/version/script scan of the discovered ports, run as root.
///
/// Values: resources_dir, ip_address, open_ports.
pub fn nmap(args: &[String]) -> Option<CommandLine> {
    let [out, ip, ports] = args else {
        return None;
    };
    Some(
        CommandLine::new("nmap")
            .args(["-vvv", "-sSCV", "-A", "--version-all"])
            .arg(format!("-p{ports}"))
            .args(["-Pn", "-T5", "-oN"])
            .arg(output_path(out, "nmap.txt"))
            .arg(ip)
            .privileged(),
    )
}

/// `enum4linux-ng -A <ip> -oJ <out>/enum4linux`
///
/// Values: resources_dir, ip_address.
pub fn enum4linux_ng(args: &[String]) -> Option<CommandLine> {
    let [out, ip] = args else {
        return None;
    };
    Some(
        CommandLine::new("enum4linux-ng")
            .arg("-A")
            .arg(ip)
            .arg("-oJ")
            .arg(output_path(out, "enum4linux")),
    )
}

/// Anonymous share listing as the given user.
///
/// Lists the shares (`-N -L`) instead of mirroring one share with a
/// recursive `mget`; downloading share contents is left to the operator.
/// The user is the `current_user` setting (`RECON_CURRENT_USER`, else `USER`).
///
/// Values: resources_dir, ip_address, current_user.
pub fn smbclient(args: &[String]) -> Option<CommandLine> {
    let [out, ip, user] = args else {
        return None;
    };
    Some(
        CommandLine::new("smbclient")
            .args(["-N", "-L"])
            .arg(format!("//{ip}"))
            .arg("-U")
            .arg(user)
            .stdout_to(output_path(out, "smbclient.txt")),
    )
}
