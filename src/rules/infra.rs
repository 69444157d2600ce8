//! Destructive system and infrastructure rules
//!
//! Permissions, remote code execution, containers, processes, disks and
//! firewalls.

use crate::rules::{Category, Rule};

pub const INFRA_RULES: &[Rule] = &[
    // Permissions
    Rule::block(
        "chmod-777",
        Category::DestructiveInfra,
        r"(?i)\bchmod\s+(?:-[a-z]{1,8}\s+){0,4}0?777\b",
        "World-writable chmod 777 is blocked",
    ),
    Rule::block(
        "chmod-a-rwx",
        Category::DestructiveInfra,
        r"(?i)\bchmod\s+(?:-[a-z]{1,8}\s+){0,4}(?:a|ugo)\+rwx\b",
        "World-writable chmod a+rwx is blocked",
    ),
    // Remote code execution
    Rule::block(
        "download-pipe-shell",
        Category::DestructiveInfra,
        r"(?i)\b(?:curl|wget)\b[^|\n]{0,2048}\|\s{0,8}(?:ba|z|da|k|fi)?sh\b",
        "Piping a remote download into a shell is blocked",
    ),
    Rule::block(
        "download-pipe-sudo",
        Category::DestructiveInfra,
        r"(?i)\b(?:curl|wget)\b[^|\n]{0,2048}\|\s{0,8}sudo\b",
        "Piping a remote download into sudo is blocked",
    ),
    Rule::block(
        "download-pipe-interpreter",
        Category::DestructiveInfra,
        r"(?i)\b(?:curl|wget)\b[^|\n]{0,2048}\|\s{0,8}(?:python[0-9.]{0,4}|perl|ruby|node)\b",
        "Piping a remote download into a script interpreter is blocked",
    ),
    // Containers
    Rule::block(
        "docker-prune",
        Category::DestructiveInfra,
        r"(?i)\bdocker\s+(?:system|image|container|volume)\s+prune\b",
        "Bulk docker pruning is blocked",
    ),
    Rule::block(
        "docker-rm-all",
        Category::DestructiveInfra,
        r"(?i)\bdocker\s+(?:rm|rmi)\s[^;&|\n]{0,256}\$\(\s{0,8}docker\s+(?:ps|images)\s[^)\n]{0,64}-[a-z]{0,4}q",
        "Bulk container or image removal is blocked",
    ),
    // Processes
    Rule::block(
        "kill-init",
        Category::DestructiveInfra,
        r"(?i)\bkill\s+(?:-[a-z0-9]{1,8}\s+){0,3}-?1\s*(?:$|[;&|])",
        "Killing process 1 or every process is blocked",
    ),
    Rule::block(
        "kill-critical-process",
        Category::DestructiveInfra,
        r"(?i)\b(?:killall|pkill)\s+(?:-\S{1,16}\s+){0,4}(?:init|systemd|launchd|sshd|kernel_task|windowserver|loginwindow)\b",
        "Killing a system-critical process is blocked",
    ),
    // Disks
    Rule::block(
        "mkfs",
        Category::DestructiveInfra,
        r"(?i)\b(?:mkfs(?:\.[a-z0-9]{1,16})?|mke2fs|newfs(?:_[a-z]{1,8})?)\b",
        "Filesystem creation is blocked",
    ),
    Rule::block(
        "dd-block-device",
        Category::DestructiveInfra,
        r"(?i)\bdd\s[^;&|\n]{0,512}\bof=/dev/(?:sd|hd|vd|xvd|nvme|mmcblk|disk|rdisk|mapper/)",
        "Writing raw bytes to a block device is blocked",
    ),
    Rule::block(
        "redirect-block-device",
        Category::DestructiveInfra,
        r"(?i)>\s{0,4}/dev/(?:sd[a-z]|hd[a-z]|vd[a-z]|xvd[a-z]|nvme[0-9]|mmcblk[0-9]|r?disk[0-9])",
        "Writing raw bytes to a block device is blocked",
    ),
    Rule::block(
        "partition-edit",
        Category::DestructiveInfra,
        r"(?i)\b(?:fdisk|sfdisk|cfdisk|gdisk|sgdisk|parted|wipefs)\b[^;&|\n]{0,256}/dev/",
        "Partition table edits are blocked",
    ),
    // Firewall
    Rule::block(
        "iptables-flush",
        Category::DestructiveInfra,
        r"\bip6?tables(?:-legacy|-nft)?\s+(?:-t\s+[a-z]{1,16}\s+)?(?:-F|--flush)(?:\s|$)",
        "Flushing all firewall rules is blocked",
    ),
    Rule::block(
        "nft-flush",
        Category::DestructiveInfra,
        r"(?i)\bnft\s+flush\s+ruleset\b",
        "Flushing all firewall rules is blocked",
    ),
];
