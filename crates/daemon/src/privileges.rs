// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effective group and backgrounding.
//!
//! Both must happen before the tokio runtime and the log writer thread
//! exist, since threads do not survive `fork`.

use nix::sys::stat::{umask, Mode};
use nix::unistd::{setegid, Group};

use crate::lifecycle::LifecycleError;

/// umask 002: group write enabled, for shared operator groups
const GROUP_UMASK: Mode = Mode::S_IWOTH;
/// umask 007 when running in the background
const DAEMON_UMASK: Mode = Mode::S_IRWXO;

/// Switch the effective group and let the group write what jobs create.
pub fn set_effective_group(name: &str) -> Result<(), LifecycleError> {
    let group = Group::from_name(name)
        .map_err(|source| LifecycleError::Group { name: name.to_string(), source })?
        .ok_or_else(|| LifecycleError::UnknownGroup(name.to_string()))?;
    setegid(group.gid).map_err(|source| LifecycleError::Group { name: name.to_string(), source })?;
    umask(GROUP_UMASK);
    Ok(())
}

/// Detach from the terminal, keeping the current directory.
///
/// Standard streams are redirected to `/dev/null`; the daemon lock stays
/// held because the open file description is inherited.
pub fn daemonize() -> Result<(), LifecycleError> {
    umask(DAEMON_UMASK);
    nix::unistd::daemon(true, false).map_err(LifecycleError::Daemonize)
}
