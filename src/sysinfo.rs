//! Host facts shown in the About dialog. Every probe degrades to
//! `"unknown"` instead of failing.

use std::path::Path;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemInfo {
    pub os: Option<String>,
    pub host: Option<String>,
    pub arch: Option<String>,
    pub ram_mb: Option<u64>,
    pub terminal: Option<String>,
    pub shell: Option<String>,
}

impl SystemInfo {
    pub fn lines(&self) -> Vec<String> {
        let or_unknown = |v: &Option<String>| v.clone().unwrap_or_else(|| UNKNOWN.to_string());
        vec![
            format!("OS: {}", or_unknown(&self.os)),
            format!("Host: {}", or_unknown(&self.host)),
            format!("Arch: {}", or_unknown(&self.arch)),
            match self.ram_mb {
                Some(mb) => format!("RAM: {} MB", mb),
                None => format!("RAM: {}", UNKNOWN),
            },
            format!("Terminal: {}", or_unknown(&self.terminal)),
            format!("Shell: {}", or_unknown(&self.shell)),
        ]
    }
}

pub trait SystemInfoProvider {
    fn system_info(&self) -> SystemInfo;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HostSystemInfo;

impl SystemInfoProvider for HostSystemInfo {
    fn system_info(&self) -> SystemInfo {
        let (os, arch) = match uname() {
            Some(u) => (Some(format!("{} {}", u.sysname, u.release)), Some(u.machine)),
            None => (
                Some(std::env::consts::OS.to_string()),
                Some(std::env::consts::ARCH.to_string()),
            ),
        };
        let ram_mb = std::fs::read_to_string("/proc/meminfo")
            .ok()
            .and_then(|text| parse_mem_total_mb(&text));
        SystemInfo {
            os,
            host: host_name(),
            arch,
            ram_mb,
            terminal: non_empty_env("TERM"),
            shell: non_empty_env("SHELL").map(|s| shell_name(&s)),
        }
    }
}

pub fn host_name() -> Option<String> {
    hostname::get().ok().and_then(|s| s.into_string().ok())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn shell_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// `MemTotal` from `/proc/meminfo` contents, in MiB.
pub fn parse_mem_total_mb(meminfo: &str) -> Option<u64> {
    meminfo
        .lines()
        .find(|l| l.starts_with("MemTotal"))
        .and_then(|l| l.split_whitespace().nth(1))
        .and_then(|kb| kb.parse::<u64>().ok())
        .map(|kb| kb / 1024)
}

struct Uname {
    sysname: String,
    release: String,
    machine: String,
}

#[cfg(unix)]
fn uname() -> Option<Uname> {
    use std::ffi::CStr;

    // SAFETY: utsname is plain old data; uname fills every field with a
    // NUL-terminated string on success.
    unsafe {
        let mut raw: libc::utsname = std::mem::zeroed();
        if libc::uname(&mut raw) != 0 {
            return None;
        }
        let field = |ptr: *const libc::c_char| CStr::from_ptr(ptr).to_string_lossy().into_owned();
        Some(Uname {
            sysname: field(raw.sysname.as_ptr()),
            release: field(raw.release.as_ptr()),
            machine: field(raw.machine.as_ptr()),
        })
    }
}

#[cfg(not(unix))]
fn uname() -> Option<Uname> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_read_unknown() {
        let info = SystemInfo {
            host: Some("box".into()),
            ram_mb: Some(2048),
            ..Default::default()
        };
        assert_eq!(
            info.lines(),
            vec![
                "OS: unknown",
                "Host: box",
                "Arch: unknown",
                "RAM: 2048 MB",
                "Terminal: unknown",
                "Shell: unknown",
            ]
        );
    }

    #[test]
    fn meminfo_parsing() {
        let text = "MemFree:  100 kB\nMemTotal:       16303412 kB\n";
        assert_eq!(parse_mem_total_mb(text), Some(15921));
        assert_eq!(parse_mem_total_mb("garbage"), None);
    }

    #[test]
    fn shell_name_is_basename() {
        assert_eq!(shell_name("/usr/bin/zsh"), "zsh");
        assert_eq!(shell_name("fish"), "fish");
    }

    #[test]
    fn host_probe_never_panics() {
        let info = HostSystemInfo.system_info();
        assert_eq!(info.lines().len(), 6);
        assert!(info.os.is_some());
    }
}
