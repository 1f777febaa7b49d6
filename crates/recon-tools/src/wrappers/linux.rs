//! Local enumeration on a Linux foothold

use super::output_path;
use crate::command::CommandLine;

/// Non-interactive `sudo -l` for the operator account.
///
/// Values: resources_dir, current_user.
pub fn sudo_rights(args: &[String]) -> Option<CommandLine> {
    let [out, user] = args else {
        return None;
    };
    Some(
        CommandLine::new("sudo")
            .args(["-n", "-l", "-U"])
            .arg(user)
            .stdout_to(output_path(out, "sudo-rights.txt")),
    )
}

/// Identity and group membership of the target account.
///
/// Values: resources_dir, os_user.
pub fn account_info(args: &[String]) -> Option<CommandLine> {
    let [out, user] = args else {
        return None;
    };
    Some(
        CommandLine::new("id")
            .arg(user)
            .stdout_to(output_path(out, "account-info.txt")),
    )
}

/// SUID binaries on the local filesystem.
///
/// Values: resources_dir.
pub fn suid_binaries(args: &[String]) -> Option<CommandLine> {
    let [out] = args else {
        return None;
    };
    Some(
        CommandLine::new("find")
            .args(["/", "-xdev", "-perm", "-4000", "-type", "f"])
            .stdout_to(output_path(out, "suid-binaries.txt")),
    )
}
