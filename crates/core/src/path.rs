// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path normalization for user-supplied path strings.
//!
//! Paths typed or pasted by an operator arrive in many shapes: quoted,
//! Windows-style (`C:\work\docs`), or as WSL UNC paths
//! (`\\wsl.localhost\Ubuntu\home\me`). Everything is mapped onto one
//! canonical Linux form before it is compared or stored.

use std::path::{Component, Path, PathBuf};

const WSL_HOST: &str = "wsl.localhost/";

/// Normalize a raw path string into its canonical absolute-looking form.
///
/// Does not touch the filesystem; the result is only absolute when the
/// input described an absolute location. `..` segments are folded into
/// their parent, and never climb above `/`.
pub fn normalize(raw: &str) -> PathBuf {
    let mut p = raw.trim();
    while p.len() >= 2 && is_quote(p.as_bytes()[0]) && is_quote(p.as_bytes()[p.len() - 1]) {
        p = p[1..p.len() - 1].trim();
    }

    let mut s = p.replace('\\', "/");

    // //wsl.localhost/<distro>/rest -> /rest
    let unprefixed = s.trim_start_matches('/');
    let slashes = s.len() - unprefixed.len();
    let on_wsl_host = unprefixed
        .get(..WSL_HOST.len())
        .is_some_and(|host| host.eq_ignore_ascii_case(WSL_HOST));
    if (1..=2).contains(&slashes) && on_wsl_host {
        let after_host = &unprefixed[WSL_HOST.len()..];
        s = match after_host.find('/') {
            Some(idx) => format!("/{}", &after_host[idx + 1..]),
            None => "/".to_string(),
        };
    }

    // C:/rest -> /mnt/c/rest
    let bytes = s.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/' {
        let drive = (bytes[0] as char).to_ascii_lowercase();
        s = format!("/mnt/{}/{}", drive, &s[3..]);
    }

    let mut collapsed = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(c);
    }
    if collapsed.len() > 1 && collapsed.ends_with('/') {
        collapsed.pop();
    }

    let mut out = PathBuf::new();
    for component in Path::new(&collapsed).components() {
        match component {
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

fn is_quote(b: u8) -> bool {
    b == b'"' || b == b'\''
}

/// True when `path` is `dir` itself or lies somewhere beneath it.
///
/// Purely lexical; both sides are expected to be normalized.
pub fn is_within(path: &Path, dir: &Path) -> bool {
    path.starts_with(dir)
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
